use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("element local name must not be empty")]
    EmptyLocalName,

    #[error("invalid element local name: {name:?}")]
    InvalidLocalName { name: String },

    #[error("namespace prefix must not be empty (uri {uri})")]
    EmptyPrefix { uri: String },

    #[error("invalid namespace prefix {prefix:?} (uri {uri})")]
    InvalidPrefix { prefix: String, uri: String },

    #[error("namespace uri must not be empty (prefix {prefix})")]
    EmptyUri { prefix: String },

    #[error("prefix {prefix} is already bound to {existing}, cannot rebind to {requested}")]
    PrefixConflict {
        prefix: String,
        existing: String,
        requested: String,
    },

    #[error("namespace {uri} is already registered as {existing}, cannot register as {requested}")]
    UriConflict {
        uri: String,
        existing: String,
        requested: String,
    },

    #[error("unknown namespace prefix: {prefix}")]
    UnknownPrefix { prefix: String },

    #[error("element {element} uses namespace {uri} which is not registered")]
    UnknownNamespace { element: String, uri: String },

    #[error("mapping has no document identifier element")]
    MissingDocumentId,
}

pub type Result<T> = std::result::Result<T, ModelError>;
