//! Error types for CSDL reading.

use thiserror::Error;

/// Errors that stop a CSDL document from being read at all.
///
/// Schema authoring mistakes (unknown types, duplicate names) are not
/// reported here; they survive into the semantic model as placeholders.
#[derive(Debug, Error)]
pub enum CsdlError {
    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(String),

    /// IO error during read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension not recognised as a CSDL format.
    #[error("Unsupported schema format: {0}")]
    UnsupportedFormat(String),

    /// Missing required element or attribute.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Invalid element or attribute value.
    #[error("Invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    /// Several files failed to load.
    #[error("Failed to load {} file(s):\n  {}", .0.len(), .0.join("\n  "))]
    Batch(Vec<String>),
}

impl CsdlError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "attribute",
            name: name.into(),
        }
    }

    /// Create an invalid element error.
    pub fn invalid_element(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "element",
            message: message.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::Invalid {
            kind: "attribute",
            message: message.into(),
        }
    }
}
