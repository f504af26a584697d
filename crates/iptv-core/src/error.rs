use thiserror::Error;

/// Failure to retrieve playlist text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("playlist server answered HTTP {0}")]
    Status(u16),
    #[error("playlist request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read playlist file: {0}")]
    Io(#[from] std::io::Error),
}

/// User-supplied form input that cannot be accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("playlist URL is empty")]
    EmptyUrl,
}
