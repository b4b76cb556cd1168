//! Entity containers and their children.

use smol_str::SmolStr;

use super::diagnostics::EdmError;
use super::element::{
    AmbiguousBinding, BadElement, Bindable, NamedElement, SchemaElement, Unresolvable,
    delegate_named,
};
use super::elements::OperationKind;
use super::ids::{ContainerId, NavigationSourceId, OperationId, OperationImportId, PropertyId, TypeId};
use super::registry::{MultiRegistry, Registry};
use crate::base::Location;

// ============================================================================
// CONTAINERS
// ============================================================================

/// An entity container, or a placeholder for one.
#[derive(Debug)]
pub enum EntityContainer {
    Declared(ContainerDecl),
    Unresolved(BadElement),
    Ambiguous(AmbiguousBinding<ContainerId>),
}

pub(crate) static MISSING_CONTAINER: EntityContainer =
    EntityContainer::Unresolved(BadElement::MISSING);

delegate_named!(EntityContainer {
    Declared,
    Unresolved,
    Ambiguous
});

impl SchemaElement for EntityContainer {
    fn namespace(&self) -> &str {
        match self {
            EntityContainer::Declared(c) => &c.namespace,
            EntityContainer::Unresolved(bad) => bad.namespace(),
            EntityContainer::Ambiguous(binding) => binding.namespace(),
        }
    }
}

impl Unresolvable for EntityContainer {
    fn unresolved(bad: BadElement) -> Self {
        EntityContainer::Unresolved(bad)
    }
}

impl Bindable<ContainerId> for EntityContainer {
    fn ambiguous(binding: AmbiguousBinding<ContainerId>) -> Self {
        EntityContainer::Ambiguous(binding)
    }

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<ContainerId>> {
        match self {
            EntityContainer::Ambiguous(binding) => Some(binding),
            _ => None,
        }
    }
}

impl EntityContainer {
    pub fn as_declared(&self) -> Option<&ContainerDecl> {
        match self {
            EntityContainer::Declared(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_declared_mut(&mut self) -> Option<&mut ContainerDecl> {
        match self {
            EntityContainer::Declared(c) => Some(c),
            _ => None,
        }
    }

    /// The container this one extends, if any.
    pub fn extends(&self) -> Option<ContainerId> {
        self.as_declared().and_then(|c| c.extends)
    }

    /// Entity sets and singletons declared directly in this container.
    pub fn navigation_sources(&self) -> &[NavigationSourceId] {
        self.as_declared().map_or(&[], |c| c.sources.as_slice())
    }

    pub fn operation_imports(&self) -> &[OperationImportId] {
        self.as_declared().map_or(&[], |c| c.imports.as_slice())
    }

    /// Look up a directly declared entity set or singleton.
    pub fn find_navigation_source(&self, name: &str) -> Option<NavigationSourceId> {
        self.as_declared().and_then(|c| c.source_names.get(name))
    }

    pub fn find_operation_imports(&self, name: &str) -> &[OperationImportId] {
        self.as_declared().map_or(&[], |c| c.import_names.get(name))
    }
}

/// A declared entity container.
#[derive(Debug)]
pub struct ContainerDecl {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) extends: Option<ContainerId>,
    pub(crate) sources: Vec<NavigationSourceId>,
    pub(crate) source_names: Registry<NavigationSourceId>,
    pub(crate) imports: Vec<OperationImportId>,
    pub(crate) import_names: MultiRegistry<OperationImportId>,
    pub(crate) location: Location,
}

impl ContainerDecl {
    pub(crate) fn shell(
        namespace: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            extends: None,
            sources: Vec::new(),
            source_names: Registry::new(),
            imports: Vec::new(),
            import_names: MultiRegistry::new(),
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
}

// ============================================================================
// NAVIGATION SOURCES
// ============================================================================

/// An entity set or singleton, or a placeholder for one.
#[derive(Debug)]
pub enum NavigationSource {
    EntitySet(EntitySet),
    Singleton(Singleton),
    Unresolved(BadElement),
    Ambiguous(AmbiguousBinding<NavigationSourceId>),
}

pub(crate) static MISSING_SOURCE: NavigationSource =
    NavigationSource::Unresolved(BadElement::MISSING);

delegate_named!(NavigationSource {
    EntitySet,
    Singleton,
    Unresolved,
    Ambiguous
});

impl Unresolvable for NavigationSource {
    fn unresolved(bad: BadElement) -> Self {
        NavigationSource::Unresolved(bad)
    }
}

impl Bindable<NavigationSourceId> for NavigationSource {
    fn ambiguous(binding: AmbiguousBinding<NavigationSourceId>) -> Self {
        NavigationSource::Ambiguous(binding)
    }

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<NavigationSourceId>> {
        match self {
            NavigationSource::Ambiguous(binding) => Some(binding),
            _ => None,
        }
    }
}

impl NavigationSource {
    /// The entity type of the set, or of the singleton.
    pub fn entity_type(&self) -> Option<TypeId> {
        match self {
            NavigationSource::EntitySet(s) => Some(s.entity_type),
            NavigationSource::Singleton(s) => Some(s.entity_type),
            _ => None,
        }
    }

    pub fn container(&self) -> Option<ContainerId> {
        match self {
            NavigationSource::EntitySet(s) => Some(s.container),
            NavigationSource::Singleton(s) => Some(s.container),
            _ => None,
        }
    }

    pub fn bindings(&self) -> &[NavigationBinding] {
        match self {
            NavigationSource::EntitySet(s) => &s.bindings,
            NavigationSource::Singleton(s) => &s.bindings,
            _ => &[],
        }
    }

    pub(crate) fn bindings_mut(&mut self) -> Option<&mut Vec<NavigationBinding>> {
        match self {
            NavigationSource::EntitySet(s) => Some(&mut s.bindings),
            NavigationSource::Singleton(s) => Some(&mut s.bindings),
            _ => None,
        }
    }

    /// The source a navigation property leads to from here, if bound.
    pub fn find_navigation_target(&self, property: PropertyId) -> Option<NavigationSourceId> {
        self.bindings()
            .iter()
            .find(|b| b.navigation_property == property)
            .map(|b| b.target)
    }

    pub fn is_entity_set(&self) -> bool {
        matches!(self, NavigationSource::EntitySet(_))
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, NavigationSource::Singleton(_))
    }
}

/// A named collection of entities.
#[derive(Debug)]
pub struct EntitySet {
    pub(crate) name: SmolStr,
    pub(crate) container: ContainerId,
    pub(crate) entity_type: TypeId,
    pub(crate) include_in_service_document: bool,
    pub(crate) bindings: Vec<NavigationBinding>,
    pub(crate) location: Location,
}

impl EntitySet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn include_in_service_document(&self) -> bool {
        self.include_in_service_document
    }
}

/// A single named entity.
#[derive(Debug)]
pub struct Singleton {
    pub(crate) name: SmolStr,
    pub(crate) container: ContainerId,
    pub(crate) entity_type: TypeId,
    pub(crate) bindings: Vec<NavigationBinding>,
    pub(crate) location: Location,
}

impl Singleton {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }
}

/// Pairs a navigation property path with the source its entities live in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationBinding {
    /// The path as written, e.g. `Orders` or `NS.VipCustomer/Orders`.
    pub path: SmolStr,
    pub navigation_property: PropertyId,
    pub target: NavigationSourceId,
    pub location: Location,
}

// ============================================================================
// OPERATION IMPORTS
// ============================================================================

/// A function or action exposed by the container.
#[derive(Debug)]
pub struct OperationImport {
    pub(crate) name: SmolStr,
    pub(crate) kind: OperationKind,
    pub(crate) container: ContainerId,
    pub(crate) operation: OperationId,
    pub(crate) entity_set: Option<NavigationSourceId>,
    pub(crate) include_in_service_document: bool,
    pub(crate) location: Location,
}

impl NamedElement for OperationImport {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &Location {
        &self.location
    }

    fn errors(&self) -> &[EdmError] {
        &[]
    }
}

impl OperationImport {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// The imported operation; a placeholder if the name did not resolve.
    pub fn operation(&self) -> OperationId {
        self.operation
    }

    pub fn entity_set(&self) -> Option<NavigationSourceId> {
        self.entity_set
    }

    pub fn include_in_service_document(&self) -> bool {
        self.include_in_service_document
    }
}
