use crosswalk_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum XslError {
    #[error("invalid mapping configuration ({field}): {message}")]
    Configuration { field: &'static str, message: String },

    #[error("failed to write stylesheet: {0}")]
    Io(#[from] std::io::Error),
}

impl XslError {
    pub(crate) fn configuration(field: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            message: message.into(),
        }
    }

    /// True for errors caused by the mapping itself rather than the output sink.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<ModelError> for XslError {
    fn from(error: ModelError) -> Self {
        let field = match error {
            ModelError::MissingDocumentId => "document_id_mapping",
            ModelError::EmptyLocalName | ModelError::InvalidLocalName { .. } => "element",
            _ => "namespaces",
        };
        Self::configuration(field, error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, XslError>;
