//! # Semantic Model
//!
//! Turns CSDL schema ASTs into an immutable, queryable EDM model with
//! cross-schema and cross-model name resolution.
//!
//! ## Architecture
//!
//! ```text
//! CsdlDocument ──► ModelBuilder (passes 0-4) ──► Model
//!                       │                          │
//!                       ▼                          ▼
//!                   Resolver ◄── references    arenas + registries
//!                                (Arc<Model>)  memoized queries
//! ```
//!
//! Every element lives in an arena owned by its [`Model`] and is addressed by
//! a small `Copy` handle ([`TypeId`], [`PropertyId`], ...). References that do
//! not resolve point at placeholder elements that carry an [`EdmError`], so a
//! model always builds and every handle always reads as something.

mod annotation;
mod arena;
mod builder;
mod container;
mod diagnostics;
mod element;
mod elements;
mod error;
mod ids;
mod memo;
mod model;
mod options;
mod registry;
mod resolver;
mod types;
mod walk;

pub use annotation::{Annotation, AnnotationTarget, EnumMemberRef, Expression, PropertyValue};
pub use builder::ModelBuilder;
pub use container::{
    ContainerDecl, EntityContainer, EntitySet, NavigationBinding, NavigationSource,
    OperationImport, Singleton,
};
pub use diagnostics::{DiagnosticCollector, EdmError, EdmErrorCode};
pub use element::{AmbiguousBinding, BadElement, Bindable, NamedElement, SchemaElement, Unresolvable};
pub use elements::{
    NavigationProperty, OnDeleteAction, Operation, OperationDecl, OperationKind, Parameter,
    Property, ReferentialConstraint, StructuralProperty, Term, TermDecl,
};
pub use error::ModelError;
pub use ids::{
    ContainerId, ElementHandle, ModelId, NavigationSourceId, OperationId, OperationImportId,
    PropertyId, TermId, TypeId,
};
pub use memo::Memoizer;
pub use model::Model;
pub use options::BuildOptions;
pub use registry::{MultiRegistry, Registration, Registry};
pub use resolver::ResolvedRef;
pub use types::{
    EnumMember, EnumType, Facets, PrimitiveTypeKind, SchemaType, StructuredType, TypeDefinition,
    TypeDefinitionType, TypeKind, TypeReference,
};
pub use walk::{BaseTypes, BindingKey};
