//! Vocabulary annotations and their values.

use smol_str::SmolStr;

use super::diagnostics::EdmError;
use super::element::BadElement;
use super::ids::{
    ContainerId, NavigationSourceId, OperationId, OperationImportId, PropertyId, TermId, TypeId,
};
use crate::base::Location;

/// The element an annotation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTarget {
    Type(TypeId),
    Property(PropertyId),
    EnumMember { enum_type: TypeId, member: usize },
    Term(TermId),
    Operation(OperationId),
    Parameter { operation: OperationId, index: usize },
    ReturnType(OperationId),
    Container(ContainerId),
    NavigationSource(NavigationSourceId),
    OperationImport(OperationImportId),
    /// The target path did not resolve. The annotation carries the error.
    Unresolved,
}

/// A reference to one enum member inside an enum-member expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumMemberRef {
    Member { enum_type: TypeId, member: usize },
    Unresolved(BadElement),
}

impl EnumMemberRef {
    pub fn errors(&self) -> &[EdmError] {
        match self {
            EnumMemberRef::Member { .. } => &[],
            EnumMemberRef::Unresolved(bad) => bad.errors(),
        }
    }
}

/// An annotation value with names resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(String),
    String(String),
    Date(String),
    DateTimeOffset(String),
    TimeOfDay(String),
    Duration(String),
    Guid(String),
    /// One or more space-separated members (flags enums allow several).
    EnumMember(Vec<EnumMemberRef>),
    Path(String),
    PropertyPath(String),
    NavigationPropertyPath(String),
    AnnotationPath(String),
    Collection(Vec<Expression>),
    Record {
        type_id: Option<TypeId>,
        properties: Vec<PropertyValue>,
    },
}

impl Expression {
    /// Errors from enum-member references nested anywhere in the value.
    pub fn collect_errors<'a>(&'a self, out: &mut Vec<&'a EdmError>) {
        match self {
            Expression::EnumMember(members) => {
                out.extend(members.iter().flat_map(EnumMemberRef::errors));
            }
            Expression::Collection(items) => {
                for item in items {
                    item.collect_errors(out);
                }
            }
            Expression::Record { properties, .. } => {
                for p in properties {
                    p.value.collect_errors(out);
                }
            }
            _ => {}
        }
    }
}

/// One `Property = value` pair of a record expression.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub property: SmolStr,
    pub value: Expression,
}

/// A term applied to a target element.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub(crate) term: TermId,
    pub(crate) qualifier: Option<SmolStr>,
    pub(crate) target: AnnotationTarget,
    pub(crate) target_path: Option<SmolStr>,
    pub(crate) value: Option<Expression>,
    pub(crate) location: Location,
    pub(crate) errors: Vec<EdmError>,
}

impl Annotation {
    /// The applied term; a placeholder if the term name did not resolve.
    pub fn term(&self) -> TermId {
        self.term
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn target(&self) -> AnnotationTarget {
        self.target
    }

    /// The target path as written, for out-of-line annotations.
    pub fn target_path(&self) -> Option<&str> {
        self.target_path.as_deref()
    }

    pub fn value(&self) -> Option<&Expression> {
        self.value.as_ref()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Target resolution errors plus errors inside the value.
    pub fn errors(&self) -> Vec<&EdmError> {
        let mut out: Vec<&EdmError> = self.errors.iter().collect();
        if let Some(value) = &self.value {
            value.collect_errors(&mut out);
        }
        out
    }
}
