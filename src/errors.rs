use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// 数据源不可达或返回非成功状态码
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// 抓取到的内容结构不符合预期
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CompositionError>;

impl CompositionError {
    pub fn parse(msg: impl Into<String>) -> Self {
        CompositionError::ParseError(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CompositionError::InvalidArgument(msg.into())
    }
}
