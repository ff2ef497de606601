use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate check id in catalogue: {0}")]
    DuplicateCheck(String),

    #[error("Check catalogue is empty")]
    EmptyCatalogue,

    #[error("Unknown check id: {0}")]
    UnknownCheck(String),

    #[error("Snapshot error ({source_name}): {message}")]
    Snapshot {
        source_name: String,
        message: String,
    },

    #[error("Output error: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl AuditError {
    pub fn exit_code(&self) -> i32 {
        2
    }

    /// Whether this error is a structural catalogue problem raised before evaluation.
    pub fn is_catalogue_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCheck(_) | Self::EmptyCatalogue | Self::UnknownCheck(_)
        )
    }
}
