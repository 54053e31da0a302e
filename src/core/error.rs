use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid blessing '{blessing}': {reason}")]
    InvalidBlessing { blessing: String, reason: String },

    #[error("Prerequisite cycle in blessing '{blessing}' involving: {}", sigils.join(", "))]
    PrerequisiteCycle { blessing: String, sigils: Vec<String> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid resource pool entry: {0}")]
    InvalidPool(String),

    #[error("Unknown blessing: {0}")]
    UnknownBlessing(String),

    #[error("TOML error in {origin}: {source}")]
    TomlError {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl BuildError {
    pub(crate) fn invalid_blessing(blessing: &str, reason: impl Into<String>) -> Self {
        BuildError::InvalidBlessing {
            blessing: blessing.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
