use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("{0}")]
    Message(String),
}

pub type AppResult<T> = Result<T, Error>;
