//! # edm-model
//!
//! Entity Data Model (EDM) semantic model and CSDL schema reader.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! semantic  → Model, ModelBuilder, name resolution, memoized queries
//!   ↓
//! csdl      → CSDL XML/JSON readers, schema AST, directory loading
//!   ↓
//! base      → Primitives (Location, Position, qualified names)
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use edm::semantic::Model;
//!
//! let model = Model::from_xml_str(CSDL)?;
//! let customer = model.find_declared_type("Sales.Customer").unwrap();
//! for err in model.errors().errors() {
//!     eprintln!("{err}");
//! }
//! ```

// ============================================================================
// MODULES (dependency order: base → csdl → semantic)
// ============================================================================

/// Foundation types: Location, Position, qualified name handling
pub mod base;

/// CSDL readers: XML and JSON into a schema AST
pub mod csdl;

/// Semantic model: builder, resolver, queries
pub mod semantic;

// Re-export foundation types
pub use base::{Location, Position, QualifiedName, Span};

// Re-export the main entry points
pub use csdl::{CsdlDocument, CsdlError, ReadOptions};
pub use semantic::{BuildOptions, EdmError, EdmErrorCode, Model, ModelBuilder, ModelError};
