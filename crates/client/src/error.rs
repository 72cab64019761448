use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response with status {status} is not JSON: {source}")]
    InvalidBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
