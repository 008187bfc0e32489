use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unrecognized listing page at {url}: {reason}")]
    UnrecognizedPage { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
