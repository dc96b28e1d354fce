use index_composition::logging::init_logging;
use index_composition::{AssetFilter, CompositionService, Config, IndexId, OutputMode};

use anyhow::Context;
use clap::{App, Arg};
use log::{info, LevelFilter};
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = App::new("index_composition")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fetch the latest composition of IBOV or the S&P 500")
        .arg(
            Arg::with_name("index")
                .short('i')
                .long("index")
                .value_name("INDEX")
                .help("Index to fetch (ibov, sp500)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("assets")
                .short('a')
                .long("assets")
                .value_name("ASSETS")
                .help("'all' or a comma separated list of tickers to keep")
                .takes_value(true)
                .default_value("all"),
        )
        .arg(
            Arg::with_name("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Return the whole table (df) or the tickers only (list)")
                .takes_value(true)
                .default_value("df"),
        )
        .arg(
            Arg::with_name("no-reduction")
                .long("no-reduction")
                .help("Drop the trailing reduction rows of the IBOV export")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format (text, json)")
                .takes_value(true)
                .possible_values(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::with_name("ibov-url")
                .long("ibov-url")
                .value_name("URL")
                .help("Override the IBOV export URL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("sp500-url")
                .long("sp500-url")
                .value_name("URL")
                .help("Override the S&P 500 page URL")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECS")
                .help("HTTP timeout in seconds")
                .takes_value(true)
                .default_value("30"),
        )
        .arg(
            Arg::with_name("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .takes_value(false),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logging(level);

    let index = IndexId::from_str(matches.value_of("index").unwrap_or_default())?;
    let assets = AssetFilter::from_str(matches.value_of("assets").unwrap_or("all"))?;
    let mode = OutputMode::from_str(matches.value_of("mode").unwrap_or("df"))?;
    let reduction = !matches.is_present("no-reduction");

    let timeout = matches
        .value_of("timeout")
        .unwrap_or("30")
        .parse::<u64>()
        .context("--timeout must be a whole number of seconds")?;

    // 创建配置
    let mut config = Config::new().with_timeout_secs(timeout);
    if let Some(url) = matches.value_of("ibov-url") {
        config = config.with_ibov_url(url);
    }
    if let Some(url) = matches.value_of("sp500-url") {
        config = config.with_sp500_url(url);
    }
    let service = CompositionService::with_http(config)?;
    info!("Fetching {} from {}", index, service.config().url_for(index));

    let composition = service.index_composition(index, assets, mode, reduction).await?;

    let output = match matches.value_of("format").unwrap_or("text") {
        "json" => composition.to_json()?,
        _ => composition.to_text(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", output)?;

    Ok(())
}

