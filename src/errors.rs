use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    StatusError { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected payload: {0}")]
    PayloadError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl FundError {
    /// 是否为网络层失败（超时、连接失败、非 2xx 状态）
    pub fn is_transport(&self) -> bool {
        matches!(self, FundError::RequestError(_) | FundError::StatusError { .. } | FundError::IoError(_))
    }
}

pub type Result<T> = std::result::Result<T, FundError>;

// 用于从字符串创建错误
impl From<String> for FundError {
    fn from(s: String) -> Self {
        FundError::Unknown(s)
    }
}
