use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure reaching a source document.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Response too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document no longer has the structure the parser expects.
    #[error("Source format changed: {0}")]
    Parse(String),
}

impl Error {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
