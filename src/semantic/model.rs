//! The immutable semantic model and its lookup facade.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::annotation::{Annotation, AnnotationTarget};
use super::arena::Arena;
use super::builder::ModelBuilder;
use super::container::{EntityContainer, MISSING_CONTAINER, NavigationSource, MISSING_SOURCE, OperationImport};
use super::diagnostics::{DiagnosticCollector, EdmError, EdmErrorCode};
use super::element::{NamedElement, SchemaElement};
use super::elements::{MISSING_OPERATION, MISSING_PROPERTY, MISSING_TERM, Operation, Property, Term};
use super::error::ModelError;
use super::ids::{
    ContainerId, ModelId, NavigationSourceId, OperationId, OperationImportId, PropertyId, TermId,
    TypeId,
};
use super::memo::Memoizer;
use super::options::BuildOptions;
use super::registry::{MultiRegistry, Registry};
use super::resolver::Resolver;
use super::types::{MISSING_TYPE, PrimitiveTypeKind, SchemaType, TypeDefinition, TypeKind, TypeReference};
use super::walk::BindingKey;
use crate::base::EDM_NAMESPACE;
use crate::csdl::{self, CsdlDocument, ReadOptions};

// ============================================================================
// NAMESPACES
// ============================================================================

/// Declared namespaces and the aliases that stand for them.
#[derive(Debug, Default)]
pub(crate) struct NamespaceTable {
    declared: IndexSet<SmolStr>,
    aliases: FxHashMap<SmolStr, SmolStr>,
}

impl NamespaceTable {
    pub(crate) fn declare(&mut self, namespace: &str) {
        if !namespace.is_empty() {
            self.declared.insert(SmolStr::new(namespace));
        }
    }

    pub(crate) fn alias(&mut self, alias: &str, namespace: &str) {
        if !alias.is_empty() && !namespace.is_empty() {
            self.aliases
                .insert(SmolStr::new(alias), SmolStr::new(namespace));
        }
    }

    /// Replace an alias by its namespace; other names pass through.
    pub(crate) fn expand<'a>(&'a self, namespace: &'a str) -> &'a str {
        self.aliases
            .get(namespace)
            .map_or(namespace, SmolStr::as_str)
    }

    pub(crate) fn is_declared(&self, namespace: &str) -> bool {
        self.declared.contains(namespace)
    }

    pub(crate) fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.declared.iter().map(SmolStr::as_str)
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// A fully resolved EDM model.
///
/// Built once by [`ModelBuilder`] and immutable afterwards. Derived queries
/// (derived types, bindable operations) are memoized internally, so a model
/// can be shared across threads behind an `Arc` and queried concurrently.
///
/// Element accessors take handles. A handle minted by a model this one does
/// not reference resolves to an empty placeholder instead of panicking.
#[derive(Debug)]
pub struct Model {
    pub(crate) id: ModelId,
    pub(crate) options: BuildOptions,
    pub(crate) namespaces: NamespaceTable,

    pub(crate) types: Arena<SchemaType, TypeId>,
    pub(crate) properties: Arena<Property, PropertyId>,
    pub(crate) terms: Arena<Term, TermId>,
    pub(crate) operations: Arena<Operation, OperationId>,
    pub(crate) sources: Arena<NavigationSource, NavigationSourceId>,
    pub(crate) imports: Arena<OperationImport, OperationImportId>,
    pub(crate) containers: Arena<EntityContainer, ContainerId>,

    pub(crate) type_names: Registry<TypeId>,
    pub(crate) term_names: Registry<TermId>,
    pub(crate) operation_names: MultiRegistry<OperationId>,
    pub(crate) container_names: Registry<ContainerId>,
    pub(crate) entity_container: Option<ContainerId>,

    pub(crate) annotations: Vec<Annotation>,
    pub(crate) annotation_index: FxHashMap<AnnotationTarget, Vec<usize>>,

    pub(crate) references: Vec<Arc<Model>>,

    pub(crate) derived_types: Memoizer<TypeId, Arc<[TypeId]>>,
    pub(crate) bindable_operations: Memoizer<BindingKey, Arc<[OperationId]>>,
}

impl Model {
    pub(crate) fn empty(options: BuildOptions, references: Vec<Arc<Model>>) -> Self {
        let id = ModelId::next();
        Self {
            id,
            options,
            namespaces: NamespaceTable::default(),
            types: Arena::new(id),
            properties: Arena::new(id),
            terms: Arena::new(id),
            operations: Arena::new(id),
            sources: Arena::new(id),
            imports: Arena::new(id),
            containers: Arena::new(id),
            type_names: Registry::new(),
            term_names: Registry::new(),
            operation_names: MultiRegistry::new(),
            container_names: Registry::new(),
            entity_container: None,
            annotations: Vec::new(),
            annotation_index: FxHashMap::default(),
            references,
            derived_types: Memoizer::new(),
            bindable_operations: Memoizer::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Construction shortcuts
    // ------------------------------------------------------------------------

    /// Build a model from parsed documents with default options.
    pub fn from_documents(documents: &[CsdlDocument]) -> Result<Model, ModelError> {
        ModelBuilder::new().build(documents)
    }

    /// Parse CSDL XML and build a model from it.
    pub fn from_xml_str(text: &str) -> Result<Model, ModelError> {
        let document = csdl::read_xml_str(text, &ReadOptions::default())?;
        Self::from_documents(std::slice::from_ref(&document))
    }

    /// Parse CSDL JSON and build a model from it.
    pub fn from_json_str(text: &str) -> Result<Model, ModelError> {
        let document = csdl::read_json_str(text, &ReadOptions::default())?;
        Self::from_documents(std::slice::from_ref(&document))
    }

    /// Load every schema file under `dir` into one model.
    pub fn load_directory(dir: impl AsRef<Path>) -> Result<Model, ModelError> {
        let documents = csdl::load_directory(dir, &ReadOptions::default())?;
        Self::from_documents(&documents)
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Models this one was built against, in the order given to the builder.
    pub fn references(&self) -> &[Arc<Model>] {
        &self.references
    }

    /// Namespaces declared by this model's own schemas.
    pub fn declared_namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter()
    }

    /// Whether `namespace` (or alias) is known to this model or a reference.
    pub fn is_known_namespace(&self, namespace: &str) -> bool {
        namespace == EDM_NAMESPACE
            || self.namespaces.is_declared(namespace)
            || self.namespaces.is_alias(namespace)
            || self.references.iter().any(|r| r.declares_namespace(namespace))
    }

    fn declares_namespace(&self, namespace: &str) -> bool {
        self.namespaces.is_declared(namespace)
            || self.references.iter().any(|r| r.declares_namespace(namespace))
    }

    /// This model plus every model reachable through references, each once.
    pub(crate) fn all_models(&self) -> Vec<&Model> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(model) = stack.pop() {
            if !seen.insert(model.id) {
                continue;
            }
            out.push(model);
            stack.extend(model.references.iter().rev().map(Arc::as_ref));
        }
        out
    }

    fn owner(&self, model: ModelId) -> Option<&Model> {
        if self.id == model {
            return Some(self);
        }
        self.references.iter().find_map(|r| r.owner(model))
    }

    pub(crate) fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }

    // ------------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------------

    pub fn schema_type(&self, id: TypeId) -> &SchemaType {
        self.owner(id.model())
            .and_then(|m| m.types.get(id))
            .unwrap_or(&MISSING_TYPE)
    }

    pub fn property(&self, id: PropertyId) -> &Property {
        self.owner(id.model())
            .and_then(|m| m.properties.get(id))
            .unwrap_or(&MISSING_PROPERTY)
    }

    pub fn term(&self, id: TermId) -> &Term {
        self.owner(id.model())
            .and_then(|m| m.terms.get(id))
            .unwrap_or(&MISSING_TERM)
    }

    pub fn operation(&self, id: OperationId) -> &Operation {
        self.owner(id.model())
            .and_then(|m| m.operations.get(id))
            .unwrap_or(&MISSING_OPERATION)
    }

    pub fn navigation_source(&self, id: NavigationSourceId) -> &NavigationSource {
        self.owner(id.model())
            .and_then(|m| m.sources.get(id))
            .unwrap_or(&MISSING_SOURCE)
    }

    pub fn operation_import(&self, id: OperationImportId) -> Option<&OperationImport> {
        self.owner(id.model()).and_then(|m| m.imports.get(id))
    }

    pub fn container(&self, id: ContainerId) -> &EntityContainer {
        self.owner(id.model())
            .and_then(|m| m.containers.get(id))
            .unwrap_or(&MISSING_CONTAINER)
    }

    /// Every type this model owns, placeholders included.
    pub fn schema_types(&self) -> impl Iterator<Item = (TypeId, &SchemaType)> {
        self.types.iter()
    }

    /// Types declared by this model's schemas.
    pub fn declared_types(&self) -> impl Iterator<Item = (TypeId, &SchemaType)> {
        self.types
            .iter()
            .filter(|(_, t)| t.type_kind() != TypeKind::None)
    }

    pub fn declared_terms(&self) -> impl Iterator<Item = (TermId, &Term)> {
        self.terms
            .iter()
            .filter(|(_, t)| t.as_declared().is_some())
    }

    pub fn declared_operations(&self) -> impl Iterator<Item = (OperationId, &Operation)> {
        self.operations
            .iter()
            .filter(|(_, o)| o.as_declared().is_some())
    }

    // ------------------------------------------------------------------------
    // Name lookup
    // ------------------------------------------------------------------------

    /// Find a type by qualified name (aliases allowed).
    ///
    /// Looks in this model first, then in referenced models in order. An
    /// ambiguous name yields its ambiguous binding.
    pub fn find_declared_type(&self, qualified_name: &str) -> Option<TypeId> {
        let full = self.resolver().full_name(qualified_name);
        self.type_by_full_name(&full)
    }

    pub(crate) fn type_by_full_name(&self, full: &str) -> Option<TypeId> {
        self.type_names
            .get(full)
            .or_else(|| self.references.iter().find_map(|r| r.type_by_full_name(full)))
    }

    pub fn find_declared_term(&self, qualified_name: &str) -> Option<TermId> {
        let full = self.resolver().full_name(qualified_name);
        self.term_by_full_name(&full)
    }

    pub(crate) fn term_by_full_name(&self, full: &str) -> Option<TermId> {
        self.term_names
            .get(full)
            .or_else(|| self.references.iter().find_map(|r| r.term_by_full_name(full)))
    }

    /// All overloads of an operation name, own model first.
    pub fn find_operations(&self, qualified_name: &str) -> Vec<OperationId> {
        let full = self.resolver().full_name(qualified_name);
        self.operations_by_full_name(&full)
    }

    pub(crate) fn operations_by_full_name(&self, full: &str) -> Vec<OperationId> {
        let mut found: Vec<OperationId> = self.operation_names.get(full).to_vec();
        for reference in &self.references {
            for id in reference.operations_by_full_name(full) {
                if !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Find an entity container by qualified or bare name.
    pub fn find_entity_container(&self, name: &str) -> Option<ContainerId> {
        let full = self.resolver().full_name(name);
        self.container_by_full_name(&full)
    }

    pub(crate) fn container_by_full_name(&self, full: &str) -> Option<ContainerId> {
        self.container_names.get(full).or_else(|| {
            self.references
                .iter()
                .find_map(|r| r.container_by_full_name(full))
        })
    }

    /// The model's entity container, or the first referenced model's.
    pub fn entity_container(&self) -> Option<ContainerId> {
        self.entity_container
            .or_else(|| self.references.iter().find_map(|r| r.entity_container()))
    }

    /// Find an entity set or singleton in the entity container, following
    /// `Extends`.
    pub fn find_navigation_source(&self, name: &str) -> Option<NavigationSourceId> {
        let mut seen = FxHashSet::default();
        let mut current = self.entity_container();
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            let container = self.container(id);
            if let Some(found) = container.find_navigation_source(name) {
                return Some(found);
            }
            current = container.extends();
        }
        None
    }

    pub fn find_entity_set(&self, name: &str) -> Option<NavigationSourceId> {
        self.find_navigation_source(name)
            .filter(|id| self.navigation_source(*id).is_entity_set())
    }

    pub fn find_singleton(&self, name: &str) -> Option<NavigationSourceId> {
        self.find_navigation_source(name)
            .filter(|id| self.navigation_source(*id).is_singleton())
    }

    /// Operation imports named `name` in the entity container and the
    /// containers it extends.
    pub fn find_operation_imports(&self, name: &str) -> Vec<OperationImportId> {
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut current = self.entity_container();
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            let container = self.container(id);
            found.extend_from_slice(container.find_operation_imports(name));
            current = container.extends();
        }
        found
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    pub fn type_kind(&self, id: TypeId) -> TypeKind {
        self.schema_type(id).type_kind()
    }

    /// The kind a type reference denotes.
    pub fn type_reference_kind(&self, type_ref: &TypeReference) -> TypeKind {
        match &type_ref.definition {
            TypeDefinition::Primitive(PrimitiveTypeKind::None) => TypeKind::None,
            TypeDefinition::Primitive(_) => TypeKind::Primitive,
            TypeDefinition::Schema(id) => self.type_kind(*id),
            TypeDefinition::Collection(_) => TypeKind::Collection,
            TypeDefinition::EntityReference(_) => TypeKind::EntityReference,
        }
    }

    /// The navigation source a navigation property leads to from `source`.
    pub fn find_navigation_target(
        &self,
        source: NavigationSourceId,
        navigation_property: PropertyId,
    ) -> Option<NavigationSourceId> {
        self.navigation_source(source)
            .find_navigation_target(navigation_property)
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    /// Annotations declared in this model's schemas.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Annotations on `target` from this model and every referenced model.
    pub fn find_vocabulary_annotations(&self, target: AnnotationTarget) -> Vec<&Annotation> {
        self.all_models()
            .into_iter()
            .flat_map(|m| {
                m.annotation_index
                    .get(&target)
                    .into_iter()
                    .flatten()
                    .map(move |&i| &m.annotations[i])
            })
            .collect()
    }

    /// Annotations on `target` applying `term`, optionally narrowed to one
    /// qualifier.
    pub fn find_annotations_by_term(
        &self,
        target: AnnotationTarget,
        term: TermId,
        qualifier: Option<&str>,
    ) -> Vec<&Annotation> {
        self.find_vocabulary_annotations(target)
            .into_iter()
            .filter(|a| a.term() == term)
            .filter(|a| qualifier.is_none() || a.qualifier() == qualifier)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Every semantic error in this model: unresolved and ambiguous names,
    /// bad annotation targets and cyclic base types.
    ///
    /// Referenced models report their own errors.
    pub fn errors(&self) -> DiagnosticCollector {
        let mut collector = DiagnosticCollector::new();
        for (id, ty) in self.types.iter() {
            collector.extend(ty.errors());
            if ty.as_structured().is_some() && self.is_on_base_type_cycle(id) {
                collector.add(EdmError::new(
                    EdmErrorCode::BadCyclicEntity,
                    ty.location().clone(),
                    format!("The base type of '{}' refers back to itself.", ty.full_name()),
                ));
            }
        }
        for (_, property) in self.properties.iter() {
            collector.extend(property.errors());
        }
        for (_, term) in self.terms.iter() {
            collector.extend(term.errors());
        }
        for (_, operation) in self.operations.iter() {
            collector.extend(operation.errors());
        }
        for (_, source) in self.sources.iter() {
            collector.extend(source.errors());
        }
        for (_, container) in self.containers.iter() {
            collector.extend(container.errors());
        }
        for annotation in &self.annotations {
            collector.extend(annotation.errors());
        }
        collector
    }
}
