use std::fmt;

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::namespace::Namespace;

/// A tag or attribute name: a namespace plus a local name.
///
/// Equality is structural (namespace URI and exact local name). Ordering
/// follows the same fields, so it agrees with equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Element {
    namespace: Namespace,
    local_name: String,
}

impl Element {
    /// Create an element, validating the local name.
    ///
    /// Local names must be an XML `NCName`, see [`is_ncname`].
    pub fn new(namespace: Namespace, local_name: impl Into<String>) -> Result<Self> {
        let local_name = local_name.into();
        validate_local_name(&local_name)?;
        Ok(Self {
            namespace,
            local_name,
        })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// `prefix:local_name`, the form used in XPath expressions and tag names.
    pub fn qualified_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.local_name)
    }
}

/// True for an XML `NCName`: a letter or `_`, then letters, digits, `_`, `-`
/// or `.`. Used for both local names and namespace prefixes.
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn validate_local_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModelError::EmptyLocalName);
    }
    if is_ncname(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidLocalName {
            name: name.to_string(),
        })
    }
}
