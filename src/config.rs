use crate::models::index::IndexId;

pub const DEFAULT_IBOV_URL: &str =
    "https://raw.githubusercontent.com/victorncg/financas_quantitativas/main/IBOV.csv";
pub const DEFAULT_SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

#[derive(Debug, Clone)]
pub struct Config {
    pub ibov_url: String,
    pub sp500_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            ibov_url: DEFAULT_IBOV_URL.to_string(),
            sp500_url: DEFAULT_SP500_URL.to_string(),
            timeout_secs: 30,
            // 维基百科会拒绝没有 User-Agent 的请求
            user_agent: concat!("index_composition/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_ibov_url(mut self, url: &str) -> Self {
        self.ibov_url = url.to_string();
        self
    }

    pub fn with_sp500_url(mut self, url: &str) -> Self {
        self.sp500_url = url.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Source URL configured for the given index.
    pub fn url_for(&self, index: IndexId) -> &str {
        match index {
            IndexId::Ibov => &self.ibov_url,
            IndexId::Sp500 => &self.sp500_url,
        }
    }
}
