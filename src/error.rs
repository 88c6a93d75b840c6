use hmac::digest::InvalidLength;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Sign Error: {0}")]
    SignError(String),
    #[error("Execute Request Error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid Config: {0}")]
    InvalidConfig(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<InvalidLength> for Error {
    fn from(e: InvalidLength) -> Self {
        Self::SignError(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::SignError(format!("invalid url: {}", e))
    }
}
