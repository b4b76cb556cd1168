//! CSDL schema reading.
//!
//! Turns CSDL text into the schema AST consumed by the semantic builder:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  CSDL XML    │     │  CSDL JSON   │
//! └──────┬───────┘     └──────┬───────┘
//!        │ read_xml           │ read_json
//!        ▼                    ▼
//! ┌──────────────────────────────────────┐
//! │            CsdlDocument              │
//! │  schemas → elements (kind, name,     │
//! │  raw type strings, children, location)│
//! └──────────────────────────────────────┘
//! ```
//!
//! Only structural problems (malformed XML/JSON, unparseable literals) are
//! errors here. Anything that needs name resolution is left to the builder.

pub mod ast;
mod error;
mod json;
mod loader;
mod xml;

use serde::{Deserialize, Serialize};

pub use ast::*;
pub use error::CsdlError;
pub use json::{read_json, read_json_str};
pub use loader::{SchemaFormat, collect_schema_paths, load_directory, load_file};
pub use xml::{read_xml, read_xml_str};

/// Options for the CSDL readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Reject unknown elements instead of skipping them with a warning.
    pub strict: bool,
    /// Name recorded in element locations (usually the file path).
    pub document_name: Option<String>,
}

impl ReadOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }
}
