#![deny(unsafe_code)]

use std::path::PathBuf;

use crosswalk_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML mapping {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse JSON mapping {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported mapping file {path} (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("unknown namespace prefix {prefix} in {context}")]
    UnknownPrefix { prefix: String, context: String },

    #[error("invalid qualified name {value:?} (expected prefix:name)")]
    InvalidQualifiedName { value: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
