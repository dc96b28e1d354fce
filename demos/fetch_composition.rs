use index_composition::logging::init_logging;
use index_composition::{index_composition, Composition};
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LevelFilter::Debug);

    // IBOV 成分股代码，不含末尾汇总行
    let tickers = index_composition("ibov", "all", "list", false).await?;
    if let Composition::Tickers(tickers) = &tickers {
        println!("IBOV 成分股数量: {}", tickers.len());
        println!("前 5 支: {:?}", tickers.iter().take(5).collect::<Vec<_>>());
    }

    // IBOV 完整表格，解析出理论数量和权重
    let table = index_composition("ibov", "PETR4,VALE3,ITUB4", "df", true).await?;
    if let Some(table) = table.as_table() {
        println!("\n{:<8} {:<20} {:<8} {:>16} {:>8}", "代码", "名称", "类型", "理论数量", "权重%");
        println!("{:-<64}", "");
        for c in table.ibov_constituents()? {
            println!(
                "{:<8} {:<20} {:<8} {:>16} {:>8.3}",
                c.ticker,
                c.name,
                c.share_class,
                c.theoretical_quantity.map(|q| q.to_string()).unwrap_or_default(),
                c.weight_pct.unwrap_or_default()
            );
        }
    }

    // S&P 500 指定股票
    let sp500 = index_composition("sp500", "AAPL,MSFT", "list", true).await?;
    println!("\nS&P 500 筛选结果: {:?}", sp500);

    Ok(())
}
