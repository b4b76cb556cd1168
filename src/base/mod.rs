//! Foundation types for the EDM toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions for schema elements
//! - [`Location`] - Source span or document path of an element
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`QualifiedName`] - Namespace-aware qualified name splitting
//!
//! This module has NO dependencies on other edm modules.

mod line_index;
mod location;
pub mod names;
mod position;

pub use line_index::LineIndex;
pub use location::Location;
pub use names::{EDM_NAMESPACE, QualifiedName, collection_element, qualify};
pub use position::{Position, Span};
