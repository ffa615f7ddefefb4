use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("assessment not found: {0}")]
    AssessmentNotFound(Uuid),

    #[error("assessment already exists: {0}")]
    DuplicateAssessment(Uuid),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown time zone '{name}': {source}")]
    UnknownTimeZone {
        name: String,
        #[source]
        source: jiff::Error,
    },

    #[error("failed to read config at {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store lock poisoned")]
    StorePoisoned,
}
