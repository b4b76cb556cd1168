//! Name resolution against a model and its references.
//!
//! Lookup order for a qualified name:
//! 1. `Edm.*` names are primitive types (types only)
//! 2. the model's own registry
//! 3. each referenced model, in order
//!
//! A name found in more than one referenced model (and not locally) is
//! ambiguous. A name found nowhere is unresolved. The resolver only
//! reports; turning a result into an arena entry is the builder's job.

use tracing::trace;

use super::arena::Arena;
use super::diagnostics::EdmErrorCode;
use super::element::{AmbiguousBinding, BadElement, Bindable};
use super::ids::{ContainerId, ElementHandle, OperationId, TermId, TypeId};
use super::model::Model;
use super::types::PrimitiveTypeKind;
use crate::base::{EDM_NAMESPACE, Location, QualifiedName, qualify};

/// Outcome of resolving one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRef<Id> {
    Element(Id),
    Ambiguous(AmbiguousBinding<Id>),
    Unresolved(BadElement),
}

impl<Id: ElementHandle> ResolvedRef<Id> {
    pub fn element(&self) -> Option<Id> {
        match self {
            ResolvedRef::Element(id) => Some(*id),
            _ => None,
        }
    }

    /// The handle for this result, allocating a placeholder if needed.
    pub(crate) fn into_handle<T: Bindable<Id>>(self, arena: &mut Arena<T, Id>) -> Id {
        match self {
            ResolvedRef::Element(id) => id,
            ResolvedRef::Ambiguous(binding) => arena.alloc(T::ambiguous(binding)),
            ResolvedRef::Unresolved(bad) => arena.alloc(T::unresolved(bad)),
        }
    }
}

/// What kind of element a reference was expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Capability {
    Type,
    Term,
    Operation,
    EntityContainer,
    EntitySet,
    Property,
    NavigationPropertyPath,
    EnumMember,
    Target,
}

impl Capability {
    fn code(self) -> EdmErrorCode {
        match self {
            Capability::Type => EdmErrorCode::BadUnresolvedType,
            Capability::Term => EdmErrorCode::BadUnresolvedTerm,
            Capability::Operation => EdmErrorCode::BadUnresolvedOperation,
            Capability::EntityContainer => EdmErrorCode::BadUnresolvedEntityContainer,
            Capability::EntitySet => EdmErrorCode::BadUnresolvedEntitySet,
            Capability::Property => EdmErrorCode::BadUnresolvedProperty,
            Capability::NavigationPropertyPath => EdmErrorCode::BadUnresolvedNavigationPropertyPath,
            Capability::EnumMember => EdmErrorCode::BadUnresolvedEnumMember,
            Capability::Target => EdmErrorCode::BadUnresolvedTarget,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Capability::Type => "type",
            Capability::Term => "term",
            Capability::Operation => "operation",
            Capability::EntityContainer => "entity container",
            Capability::EntitySet => "entity set",
            Capability::Property => "property",
            Capability::NavigationPropertyPath => "navigation property path",
            Capability::EnumMember => "enum member",
            Capability::Target => "annotation target",
        }
    }
}

/// Resolves names on behalf of one model.
#[derive(Clone, Copy)]
pub(crate) struct Resolver<'m> {
    model: &'m Model,
}

impl<'m> Resolver<'m> {
    pub(crate) fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// Split a raw name using every namespace and alias the model knows.
    pub(crate) fn split<'r>(&self, raw: &'r str) -> QualifiedName<'r> {
        QualifiedName::split(raw.trim(), |ns| self.model.is_known_namespace(ns))
    }

    /// `Namespace.Name` with any alias replaced by its namespace. The
    /// signature suffix is dropped.
    pub(crate) fn full_name(&self, raw: &str) -> String {
        let name = self.split(raw);
        qualify(self.model.namespaces.expand(name.namespace), name.name)
    }

    /// The primitive kind for an `Edm.*` name.
    pub(crate) fn primitive(&self, raw: &str) -> Option<PrimitiveTypeKind> {
        let name = self.split(raw);
        if name.namespace == EDM_NAMESPACE && name.signature.is_none() {
            PrimitiveTypeKind::from_name(name.name)
        } else {
            None
        }
    }

    pub(crate) fn resolve_type(&self, raw: &str, location: &Location) -> ResolvedRef<TypeId> {
        self.lookup(
            raw,
            Capability::Type,
            location,
            |m, full| m.type_names.get(full),
            Model::type_by_full_name,
        )
    }

    pub(crate) fn resolve_term(&self, raw: &str, location: &Location) -> ResolvedRef<TermId> {
        self.lookup(
            raw,
            Capability::Term,
            location,
            |m, full| m.term_names.get(full),
            Model::term_by_full_name,
        )
    }

    pub(crate) fn resolve_container(
        &self,
        raw: &str,
        location: &Location,
    ) -> ResolvedRef<ContainerId> {
        self.lookup(
            raw,
            Capability::EntityContainer,
            location,
            |m, full| m.container_names.get(full),
            Model::container_by_full_name,
        )
    }

    /// Every overload of an operation name, own model first.
    pub(crate) fn operations(&self, raw: &str) -> Vec<OperationId> {
        let full = self.full_name(raw);
        if self.model.options.search_referenced_models {
            self.model.operations_by_full_name(&full)
        } else {
            self.model.operation_names.get(&full).to_vec()
        }
    }

    /// A placeholder for `raw`, which was expected to name a `capability`.
    pub(crate) fn unresolved(
        &self,
        raw: &str,
        capability: Capability,
        location: &Location,
    ) -> BadElement {
        let name = self.split(raw);
        trace!(name = raw, kind = capability.label(), "unresolved reference");
        BadElement::new(
            self.model.namespaces.expand(name.namespace),
            name.name,
            capability.code(),
            location.clone(),
            format!("The {} '{}' could not be found.", capability.label(), raw.trim()),
        )
    }

    fn lookup<Id: ElementHandle>(
        &self,
        raw: &str,
        capability: Capability,
        location: &Location,
        local: impl Fn(&Model, &str) -> Option<Id>,
        foreign: impl Fn(&Model, &str) -> Option<Id>,
    ) -> ResolvedRef<Id> {
        let full = self.full_name(raw);
        if full.is_empty() {
            return ResolvedRef::Unresolved(self.unresolved(raw, capability, location));
        }
        if let Some(id) = local(self.model, &full) {
            return ResolvedRef::Element(id);
        }
        if !self.model.options.search_referenced_models {
            return ResolvedRef::Unresolved(self.unresolved(raw, capability, location));
        }

        let mut hits: Vec<Id> = Vec::new();
        for reference in &self.model.references {
            match foreign(reference, &full) {
                Some(id) if !hits.contains(&id) => hits.push(id),
                _ => {}
            }
        }

        match hits.as_slice() {
            [] => ResolvedRef::Unresolved(self.unresolved(raw, capability, location)),
            [id] => ResolvedRef::Element(*id),
            _ => {
                let name = self.split(raw);
                trace!(name = raw, count = hits.len(), "ambiguous across references");
                ResolvedRef::Ambiguous(AmbiguousBinding::new(
                    self.model.namespaces.expand(name.namespace),
                    name.name,
                    hits,
                    location.clone(),
                ))
            }
        }
    }
}
