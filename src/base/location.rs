//! Source locations attached to schema elements and diagnostics.

use std::fmt;
use std::sync::Arc;

use super::Span;

/// Where a schema element (or a problem with it) came from.
///
/// XML documents report line/column spans. JSON documents have no useful
/// line information after parsing, so they report the member path instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// No location is known (programmatically constructed elements).
    #[default]
    None,
    /// A span inside a named (or anonymous) text document.
    Source {
        document: Option<Arc<str>>,
        span: Span,
    },
    /// A path inside a structured document, e.g. `NS/Customer/Orders`.
    Path(String),
}

impl Location {
    pub fn source(document: Option<Arc<str>>, span: Span) -> Self {
        Self::Source { document, span }
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Location::None)
    }

    /// The 1-based line this location starts on, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Location::Source { span, .. } => Some(span.start.line),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::None => write!(f, "<unknown>"),
            Location::Source { document, span } => match document {
                Some(doc) => write!(f, "{doc}:{}", span.start),
                None => write!(f, "{}", span.start),
            },
            Location::Path(path) => write!(f, "{path}"),
        }
    }
}
