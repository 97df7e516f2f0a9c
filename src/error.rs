use thiserror::Error;

pub const NO_RECOMMENDATION: &str = "No homes found for recommendation";

#[derive(Debug, Error)]
pub enum HomesError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("failed to open database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: diesel::ConnectionError,
    },

    #[error("database error: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model artifact: {0}")]
    Invalid(String),
}
