use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Connectivity failure, DNS failure or timeout. Never retried.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with anything other than `200 OK`.
    #[error("remote error: {status} {reason}")]
    Remote {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    pub fn configuration(message: impl ToString) -> Self {
        Self::Configuration(message.to_string())
    }
}
