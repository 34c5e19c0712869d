use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Strip every `.` from a namespace-qualified name.
pub fn normalize_name(raw: &str) -> String {
    raw.replace('.', "")
}

/// Normalized table identifier, the primary key of a [`crate::SchemaGraph`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Build a table name from an entity or target name.
    pub fn new(raw: &str) -> Self {
        Self(normalize_name(raw))
    }

    /// Resolve the target table of an `associated_entitydefinition` link.
    ///
    /// The final path segment of the href names the target definition; an
    /// empty segment is rejected.
    pub fn from_href(href: &str) -> Result<Self> {
        let segment = href.rsplit('/').next().unwrap_or_default();
        let name = Self::new(segment);
        if name.0.is_empty() {
            return Err(Error::InvalidDefinition(format!(
                "relation target has an empty name: {href}"
            )));
        }
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
