//! Properties, terms and operations.

use smol_str::SmolStr;

use super::diagnostics::EdmError;
use super::element::{
    AmbiguousBinding, BadElement, Bindable, SchemaElement, Unresolvable,
    delegate_named,
};
use super::ids::{PropertyId, TermId, TypeId};
use super::types::{TypeReference, UNKNOWN_TYPE_REFERENCE};
use crate::base::Location;

// ============================================================================
// PROPERTIES
// ============================================================================

/// A property of a structured type, or a placeholder for one.
#[derive(Debug)]
pub enum Property {
    Structural(StructuralProperty),
    Navigation(NavigationProperty),
    Unresolved(BadElement),
    Ambiguous(AmbiguousBinding<PropertyId>),
}

pub(crate) static MISSING_PROPERTY: Property = Property::Unresolved(BadElement::MISSING);

delegate_named!(Property {
    Structural,
    Navigation,
    Unresolved,
    Ambiguous
});

impl Unresolvable for Property {
    fn unresolved(bad: BadElement) -> Self {
        Property::Unresolved(bad)
    }
}

impl Bindable<PropertyId> for Property {
    fn ambiguous(binding: AmbiguousBinding<PropertyId>) -> Self {
        Property::Ambiguous(binding)
    }

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<PropertyId>> {
        match self {
            Property::Ambiguous(binding) => Some(binding),
            _ => None,
        }
    }
}

impl Property {
    /// The type that declares this property. `None` for placeholders.
    pub fn declaring_type(&self) -> Option<TypeId> {
        match self {
            Property::Structural(p) => Some(p.declaring_type),
            Property::Navigation(p) => Some(p.declaring_type),
            _ => None,
        }
    }

    /// The property's type; placeholders answer [`TypeReference::UNKNOWN`].
    pub fn type_ref(&self) -> &TypeReference {
        match self {
            Property::Structural(p) => &p.type_ref,
            Property::Navigation(p) => &p.type_ref,
            _ => &UNKNOWN_TYPE_REFERENCE,
        }
    }

    pub fn as_navigation(&self) -> Option<&NavigationProperty> {
        match self {
            Property::Navigation(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_structural(&self) -> Option<&StructuralProperty> {
        match self {
            Property::Structural(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self, Property::Navigation(_))
    }

    pub fn ambiguous_bindings(&self) -> &[PropertyId] {
        match self {
            Property::Ambiguous(binding) => binding.bindings(),
            _ => &[],
        }
    }
}

/// A property holding a primitive, complex, enum or collection value.
#[derive(Debug)]
pub struct StructuralProperty {
    pub(crate) name: SmolStr,
    pub(crate) declaring_type: TypeId,
    pub(crate) type_ref: TypeReference,
    pub(crate) default_value: Option<String>,
    pub(crate) location: Location,
}

impl StructuralProperty {
    pub(crate) fn shell(name: impl Into<SmolStr>, declaring_type: TypeId, location: Location) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            type_ref: TypeReference::UNKNOWN,
            default_value: None,
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

/// What happens to dependents when the principal entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDeleteAction {
    None,
    Cascade,
    SetNull,
    SetDefault,
}

impl OnDeleteAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "None" => Some(OnDeleteAction::None),
            "Cascade" => Some(OnDeleteAction::Cascade),
            "SetNull" => Some(OnDeleteAction::SetNull),
            "SetDefault" => Some(OnDeleteAction::SetDefault),
            _ => None,
        }
    }
}

/// Dependent property → principal property pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferentialConstraint {
    pub property: PropertyId,
    pub referenced_property: PropertyId,
}

/// A property whose value is one or many related entities.
#[derive(Debug)]
pub struct NavigationProperty {
    pub(crate) name: SmolStr,
    pub(crate) declaring_type: TypeId,
    pub(crate) type_ref: TypeReference,
    pub(crate) partner: Option<PropertyId>,
    pub(crate) contains_target: bool,
    pub(crate) on_delete: Option<OnDeleteAction>,
    pub(crate) referential_constraints: Vec<ReferentialConstraint>,
    pub(crate) location: Location,
}

impl NavigationProperty {
    pub(crate) fn shell(name: impl Into<SmolStr>, declaring_type: TypeId, location: Location) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            type_ref: TypeReference::UNKNOWN,
            partner: None,
            contains_target: false,
            on_delete: None,
            referential_constraints: Vec::new(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn declaring_type(&self) -> TypeId {
        self.declaring_type
    }

    /// The entity type on the far side, looking through collections.
    pub fn target_type(&self) -> Option<TypeId> {
        self.type_ref.schema_type()
    }

    pub fn is_collection(&self) -> bool {
        self.type_ref.is_collection()
    }

    pub fn partner(&self) -> Option<PropertyId> {
        self.partner
    }

    pub fn contains_target(&self) -> bool {
        self.contains_target
    }

    pub fn on_delete(&self) -> Option<OnDeleteAction> {
        self.on_delete
    }

    pub fn referential_constraints(&self) -> &[ReferentialConstraint] {
        &self.referential_constraints
    }
}

// ============================================================================
// TERMS
// ============================================================================

/// A vocabulary term, or a placeholder for one.
#[derive(Debug)]
pub enum Term {
    Declared(TermDecl),
    Unresolved(BadElement),
    Ambiguous(AmbiguousBinding<TermId>),
}

pub(crate) static MISSING_TERM: Term = Term::Unresolved(BadElement::MISSING);

delegate_named!(Term {
    Declared,
    Unresolved,
    Ambiguous
});

impl SchemaElement for Term {
    fn namespace(&self) -> &str {
        match self {
            Term::Declared(t) => &t.namespace,
            Term::Unresolved(bad) => bad.namespace(),
            Term::Ambiguous(binding) => binding.namespace(),
        }
    }
}

impl Unresolvable for Term {
    fn unresolved(bad: BadElement) -> Self {
        Term::Unresolved(bad)
    }
}

impl Bindable<TermId> for Term {
    fn ambiguous(binding: AmbiguousBinding<TermId>) -> Self {
        Term::Ambiguous(binding)
    }

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<TermId>> {
        match self {
            Term::Ambiguous(binding) => Some(binding),
            _ => None,
        }
    }
}

impl Term {
    pub fn as_declared(&self) -> Option<&TermDecl> {
        match self {
            Term::Declared(t) => Some(t),
            _ => None,
        }
    }

    pub fn type_ref(&self) -> &TypeReference {
        self.as_declared()
            .map_or(&UNKNOWN_TYPE_REFERENCE, |t| &t.type_ref)
    }

    pub fn ambiguous_bindings(&self) -> &[TermId] {
        match self {
            Term::Ambiguous(binding) => binding.bindings(),
            _ => &[],
        }
    }
}

/// A declared term.
#[derive(Debug)]
pub struct TermDecl {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) type_ref: TypeReference,
    pub(crate) base_term: Option<TermId>,
    pub(crate) applies_to: Vec<SmolStr>,
    pub(crate) default_value: Option<String>,
    pub(crate) location: Location,
}

impl TermDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn base_term(&self) -> Option<TermId> {
        self.base_term
    }

    /// Element kinds this term may be applied to (`EntityType`, `Property`, ...).
    pub fn applies_to(&self) -> &[SmolStr] {
        &self.applies_to
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Distinguishes functions (side-effect free) from actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Function,
    Action,
}

/// A function or action, or a placeholder for one.
///
/// Operations may be overloaded, so names never collide into an
/// ambiguous binding here.
#[derive(Debug)]
pub enum Operation {
    Declared(OperationDecl),
    Unresolved(BadElement),
}

pub(crate) static MISSING_OPERATION: Operation = Operation::Unresolved(BadElement::MISSING);

delegate_named!(Operation { Declared, Unresolved });

impl SchemaElement for Operation {
    fn namespace(&self) -> &str {
        match self {
            Operation::Declared(op) => &op.namespace,
            Operation::Unresolved(bad) => bad.namespace(),
        }
    }
}

impl Unresolvable for Operation {
    fn unresolved(bad: BadElement) -> Self {
        Operation::Unresolved(bad)
    }
}

impl Operation {
    pub fn as_declared(&self) -> Option<&OperationDecl> {
        match self {
            Operation::Declared(op) => Some(op),
            Operation::Unresolved(_) => None,
        }
    }

    pub fn kind(&self) -> Option<OperationKind> {
        self.as_declared().map(|op| op.kind)
    }

    pub fn is_bound(&self) -> bool {
        self.as_declared().is_some_and(|op| op.is_bound)
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.as_declared().map_or(&[], |op| op.parameters.as_slice())
    }

    pub fn return_type(&self) -> Option<&TypeReference> {
        self.as_declared().and_then(|op| op.return_type.as_ref())
    }

    /// The first parameter of a bound operation.
    pub fn binding_parameter(&self) -> Option<&Parameter> {
        if self.is_bound() {
            self.parameters().first()
        } else {
            None
        }
    }

    pub fn find_parameter(&self, name: &str) -> Option<(usize, &Parameter)> {
        self.parameters()
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
    }
}

/// A declared function or action.
#[derive(Debug)]
pub struct OperationDecl {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) kind: OperationKind,
    pub(crate) is_bound: bool,
    pub(crate) is_composable: bool,
    pub(crate) entity_set_path: Option<String>,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) return_type: Option<TypeReference>,
    pub(crate) location: Location,
}

impl OperationDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn is_composable(&self) -> bool {
        self.is_composable
    }

    pub fn entity_set_path(&self) -> Option<&str> {
        self.entity_set_path.as_deref()
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: SmolStr,
    pub type_ref: TypeReference,
    pub location: Location,
}
