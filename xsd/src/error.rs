use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = XsdError> = std::result::Result<T, E>;

/// Failure to turn a file into an XML tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not read file")]
    Io(#[from] std::io::Error),
    #[error("document is not well-formed")]
    Xml(#[from] roxmltree::Error),
}

#[derive(Debug, Error)]
pub enum XsdError {
    #[error("failed to parse {}", .filename.display())]
    Parse {
        filename: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("malformed schema {}: {reason}", .filename.display())]
    MalformedSchema { filename: PathBuf, reason: String },

    #[error(
        "schema {} imports namespace {} which is not registered",
        .filename.display(),
        .namespace.as_deref().unwrap_or("(absent)")
    )]
    UnresolvedImport {
        namespace: Option<String>,
        filename: PathBuf,
    },

    #[error(
        "malformed attribute {} of element {element:?} in {}: missing or invalid {missing:?}",
        .attribute.as_deref().map(|a| format!("{a:?}")).unwrap_or_else(|| "(unnamed)".into()),
        .filename.display()
    )]
    MalformedAttribute {
        filename: PathBuf,
        element: String,
        attribute: Option<String>,
        missing: &'static str,
    },

    #[error("no schema registered for namespace {uri:?}")]
    SchemaNotFound { uri: String },

    #[error("no element named {name:?}")]
    ElementNotFound { name: String },
}

impl XsdError {
    /// Whether this is one of the lookup failures (`SchemaNotFound` / `ElementNotFound`).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SchemaNotFound { .. } | Self::ElementNotFound { .. }
        )
    }
}
