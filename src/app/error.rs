use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaperdropError {
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    Parse(String),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Rejected(String),
}

impl PaperdropError {
    /// True for user-facing rejections (duplicate feed, empty URL,
    /// already-downloaded link), which render as warnings rather than
    /// errors.
    pub fn is_rejection(&self) -> bool {
        matches!(self, PaperdropError::Rejected(_))
    }
}

pub type Result<T> = std::result::Result<T, PaperdropError>;
