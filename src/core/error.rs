use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignInError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Required page element '{0}' not found")]
    ElementNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),
}

pub type Result<T> = std::result::Result<T, SignInError>;

impl From<reqwest::Error> for SignInError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
