//! Diagnostics carried by placeholder elements.
//!
//! The builder never fails on an unresolved or ambiguous name. It plants a
//! placeholder element that carries one of these errors, and the model
//! reports them through [`Model::errors`](super::Model::errors).

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::base::Location;

// ============================================================================
// ERROR CODES
// ============================================================================

/// Classification of a semantic problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdmErrorCode {
    /// A type name did not resolve.
    BadUnresolvedType,
    /// A term name did not resolve.
    BadUnresolvedTerm,
    /// An operation name did not resolve.
    BadUnresolvedOperation,
    /// An entity container name did not resolve.
    BadUnresolvedEntityContainer,
    /// An entity set or singleton name did not resolve.
    BadUnresolvedEntitySet,
    /// A property name did not resolve.
    BadUnresolvedProperty,
    /// A navigation property path (binding path or partner) did not resolve.
    BadUnresolvedNavigationPropertyPath,
    /// An enum member path named a member the enum does not have.
    BadUnresolvedEnumMember,
    /// An enum member path is not of the form `Type/Member`.
    InvalidEnumMemberPath,
    /// An annotation target path did not resolve.
    BadUnresolvedTarget,
    /// A name is bound to more than one element.
    BadAmbiguousElementBinding,
    /// A structured type's base type chain loops back on itself.
    BadCyclicEntity,
}

impl EdmErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            EdmErrorCode::BadUnresolvedType => "BadUnresolvedType",
            EdmErrorCode::BadUnresolvedTerm => "BadUnresolvedTerm",
            EdmErrorCode::BadUnresolvedOperation => "BadUnresolvedOperation",
            EdmErrorCode::BadUnresolvedEntityContainer => "BadUnresolvedEntityContainer",
            EdmErrorCode::BadUnresolvedEntitySet => "BadUnresolvedEntitySet",
            EdmErrorCode::BadUnresolvedProperty => "BadUnresolvedProperty",
            EdmErrorCode::BadUnresolvedNavigationPropertyPath => {
                "BadUnresolvedNavigationPropertyPath"
            }
            EdmErrorCode::BadUnresolvedEnumMember => "BadUnresolvedEnumMember",
            EdmErrorCode::InvalidEnumMemberPath => "InvalidEnumMemberPath",
            EdmErrorCode::BadUnresolvedTarget => "BadUnresolvedTarget",
            EdmErrorCode::BadAmbiguousElementBinding => "BadAmbiguousElementBinding",
            EdmErrorCode::BadCyclicEntity => "BadCyclicEntity",
        }
    }
}

impl fmt::Display for EdmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ERROR
// ============================================================================

/// One semantic problem, located where the offending reference was written.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{location}: {code}: {message}")]
pub struct EdmError {
    pub location: Location,
    pub code: EdmErrorCode,
    pub message: Arc<str>,
}

impl EdmError {
    pub fn new(code: EdmErrorCode, location: Location, message: impl Into<Arc<str>>) -> Self {
        Self {
            location,
            code,
            message: message.into(),
        }
    }
}

// ============================================================================
// COLLECTOR
// ============================================================================

/// Gathers errors from every element of a model.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<EdmError>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: EdmError) {
        self.errors.push(error);
    }

    pub fn extend<'a>(&mut self, errors: impl IntoIterator<Item = &'a EdmError>) {
        self.errors.extend(errors.into_iter().cloned());
    }

    pub fn errors(&self) -> &[EdmError] {
        &self.errors
    }

    /// Errors with the given code.
    pub fn with_code(&self, code: EdmErrorCode) -> impl Iterator<Item = &EdmError> {
        self.errors.iter().filter(move |e| e.code == code)
    }

    pub fn has_code(&self, code: EdmErrorCode) -> bool {
        self.with_code(code).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_vec(self) -> Vec<EdmError> {
        self.errors
    }
}
