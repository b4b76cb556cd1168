//! Model construction from CSDL documents.
//!
//! The build runs in passes so that every name can be referenced before or
//! after its declaration:
//!
//! ```text
//! documents ──► 0. namespaces + aliases
//!           ──► 1. declare: shells for every named element, registered
//!           ──► 2. resolve: type references, base types, terms,
//!                  operations, entity set types, imports
//!           ──► 3. paths: keys, partners, constraints, bindings
//!           ──► 4. annotations (optional)
//!           ──► Model
//! ```
//!
//! Nothing in passes 1-4 fails on a bad name. Unresolved or ambiguous
//! references become placeholder elements carrying an [`EdmError`].
//! Only structural problems abort the build with a [`ModelError`].
//!
//! [`EdmError`]: super::EdmError

mod annotations;
mod paths;

use std::sync::Arc;

use smol_str::SmolStr;
use tracing::{debug, trace};

use super::annotation::AnnotationTarget;
use super::arena::Arena;
use super::container::{
    ContainerDecl, EntityContainer, EntitySet, NavigationBinding, NavigationSource, OperationImport,
    Singleton,
};
use super::element::{NamedElement, SchemaElement};
use super::elements::{
    NavigationProperty, OnDeleteAction, Operation, OperationDecl, OperationKind, Parameter,
    Property, ReferentialConstraint, StructuralProperty, Term, TermDecl,
};
use super::error::ModelError;
use super::ids::{ContainerId, NavigationSourceId, OperationId, OperationImportId, PropertyId, TermId, TypeId};
use super::model::Model;
use super::options::BuildOptions;
use super::resolver::Capability;
use super::types::{
    EnumMember, EnumType, Facets, PrimitiveTypeKind, SchemaType, StructuredType, TypeDefinition,
    TypeDefinitionType, TypeReference,
};
use crate::base::{Location, collection_element, qualify};
use crate::csdl::{
    CsdlAnnotation, CsdlAnnotations, CsdlDocument, CsdlElement, CsdlElementKind,
    CsdlEntityContainer, CsdlEnumType, CsdlFacets, CsdlImportKind, CsdlNavigationBinding,
    CsdlNavigationProperty, CsdlOperation, CsdlOperationImport, CsdlProperty, CsdlStructuredType,
    CsdlTerm, CsdlTypeDefinition,
};

// ============================================================================
// PUBLIC BUILDER
// ============================================================================

/// Builds a [`Model`] from parsed CSDL documents.
///
/// ```ignore
/// let core = Arc::new(ModelBuilder::new().build(&core_docs)?);
/// let model = ModelBuilder::new().with_reference(core).build(&service_docs)?;
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    options: BuildOptions,
    references: Vec<Arc<Model>>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve names that are not declared locally against `model`.
    ///
    /// References are searched in the order they are added.
    pub fn with_reference(mut self, model: Arc<Model>) -> Self {
        self.references.push(model);
        self
    }

    pub fn with_references(mut self, models: impl IntoIterator<Item = Arc<Model>>) -> Self {
        self.references.extend(models);
        self
    }

    /// Run all passes over `documents` and return the finished model.
    pub fn build(self, documents: &[CsdlDocument]) -> Result<Model, ModelError> {
        let mut session = BuildSession::new(Model::empty(self.options, self.references));
        session.declare_namespaces(documents);
        for document in documents {
            session.declare(document)?;
        }
        session.resolve_declarations();
        session.resolve_paths();
        if session.model.options.resolve_annotations {
            session.resolve_annotations();
        }

        let model = session.finish();
        debug!(
            model = model.id().get(),
            types = model.types.len(),
            properties = model.properties.len(),
            terms = model.terms.len(),
            operations = model.operations.len(),
            annotations = model.annotations.len(),
            "model built"
        );
        Ok(model)
    }
}

// ============================================================================
// SESSION
// ============================================================================

struct PendingStructured<'a> {
    id: TypeId,
    ast: &'a CsdlStructuredType,
    properties: Vec<PropertyId>,
    navigation: Vec<PropertyId>,
}

struct PendingSource<'a> {
    id: NavigationSourceId,
    container: ContainerId,
    bindings: &'a [CsdlNavigationBinding],
}

struct PendingImport<'a> {
    id: OperationImportId,
    container: ContainerId,
    ast: &'a CsdlOperationImport,
}

/// Work carried between passes of one build.
struct BuildSession<'a> {
    model: Model,
    structured: Vec<PendingStructured<'a>>,
    enums: Vec<(TypeId, &'a CsdlEnumType, Location)>,
    type_definitions: Vec<(TypeId, &'a CsdlTypeDefinition, Location)>,
    terms: Vec<(TermId, &'a CsdlTerm, Location)>,
    operations: Vec<(OperationId, &'a CsdlOperation)>,
    containers: Vec<(ContainerId, &'a CsdlEntityContainer, Location)>,
    sources: Vec<PendingSource<'a>>,
    imports: Vec<PendingImport<'a>>,
    inline_annotations: Vec<(AnnotationTarget, &'a [CsdlAnnotation])>,
    outline_annotations: Vec<&'a CsdlAnnotations>,
}

impl<'a> BuildSession<'a> {
    fn new(model: Model) -> Self {
        Self {
            model,
            structured: Vec::new(),
            enums: Vec::new(),
            type_definitions: Vec::new(),
            terms: Vec::new(),
            operations: Vec::new(),
            containers: Vec::new(),
            sources: Vec::new(),
            imports: Vec::new(),
            inline_annotations: Vec::new(),
            outline_annotations: Vec::new(),
        }
    }

    fn finish(self) -> Model {
        self.model
    }

    fn annotate(&mut self, target: AnnotationTarget, annotations: &'a [CsdlAnnotation]) {
        if !annotations.is_empty() {
            self.inline_annotations.push((target, annotations));
        }
    }

    // ========================================================================
    // PASS 0: NAMESPACES
    // ========================================================================

    fn declare_namespaces(&mut self, documents: &'a [CsdlDocument]) {
        for document in documents {
            for schema in &document.schemas {
                self.model.namespaces.declare(schema.namespace.trim());
                if let Some(alias) = &schema.alias {
                    self.model
                        .namespaces
                        .alias(alias.trim(), schema.namespace.trim());
                }
            }
            for reference in &document.references {
                for include in &reference.includes {
                    if let Some(alias) = &include.alias {
                        self.model
                            .namespaces
                            .alias(alias.trim(), include.namespace.trim());
                    }
                }
            }
        }
    }

    // ========================================================================
    // PASS 1: DECLARE
    // ========================================================================

    fn declare(&mut self, document: &'a CsdlDocument) -> Result<(), ModelError> {
        for schema in &document.schemas {
            let namespace = schema.namespace.trim();
            for element in &schema.elements {
                self.declare_element(namespace, element)?;
            }
            self.outline_annotations.extend(schema.annotations.iter());
        }
        Ok(())
    }

    fn declare_element(
        &mut self,
        namespace: &str,
        element: &'a CsdlElement,
    ) -> Result<(), ModelError> {
        let name = element.name.trim();
        let full = qualify(namespace, name);
        let location = element.location.clone();
        trace!(name = %full, kind = element.kind.tag(), "declare");

        match &element.kind {
            CsdlElementKind::EntityType(ast) | CsdlElementKind::ComplexType(ast) => {
                let mut shell = StructuredType::shell(namespace, name, location);
                shell.is_abstract = ast.is_abstract;
                shell.is_open = ast.is_open;
                shell.has_stream = ast.has_stream;
                let ty = if matches!(element.kind, CsdlElementKind::EntityType(_)) {
                    SchemaType::Entity(shell)
                } else {
                    SchemaType::Complex(shell)
                };
                let id = self.model.types.alloc(ty);
                self.model.type_names.add(&full, id, &mut self.model.types);
                self.annotate(AnnotationTarget::Type(id), &element.annotations);
                self.declare_members(id, ast);
            }
            CsdlElementKind::EnumType(ast) => {
                let members = enum_members(ast);
                let id = self.model.types.alloc(SchemaType::Enum(EnumType {
                    name: SmolStr::new(name),
                    namespace: SmolStr::new(namespace),
                    underlying_type: TypeReference::UNKNOWN,
                    is_flags: ast.is_flags,
                    members,
                    location: location.clone(),
                }));
                self.model.type_names.add(&full, id, &mut self.model.types);
                self.annotate(AnnotationTarget::Type(id), &element.annotations);
                for (index, member) in ast.members.iter().enumerate() {
                    self.annotate(
                        AnnotationTarget::EnumMember {
                            enum_type: id,
                            member: index,
                        },
                        &member.annotations,
                    );
                }
                self.enums.push((id, ast, location));
            }
            CsdlElementKind::TypeDefinition(ast) => {
                let id = self
                    .model
                    .types
                    .alloc(SchemaType::TypeDefinition(TypeDefinitionType {
                        name: SmolStr::new(name),
                        namespace: SmolStr::new(namespace),
                        underlying_type: TypeReference::UNKNOWN,
                        location: location.clone(),
                    }));
                self.model.type_names.add(&full, id, &mut self.model.types);
                self.annotate(AnnotationTarget::Type(id), &element.annotations);
                self.type_definitions.push((id, ast, location));
            }
            CsdlElementKind::Term(ast) => {
                let id = self.model.terms.alloc(Term::Declared(TermDecl {
                    name: SmolStr::new(name),
                    namespace: SmolStr::new(namespace),
                    type_ref: TypeReference::UNKNOWN,
                    base_term: None,
                    applies_to: ast.applies_to.iter().map(|s| SmolStr::new(s.trim())).collect(),
                    default_value: ast.default_value.clone(),
                    location: location.clone(),
                }));
                self.model.term_names.add(&full, id, &mut self.model.terms);
                self.annotate(AnnotationTarget::Term(id), &element.annotations);
                self.terms.push((id, ast, location));
            }
            CsdlElementKind::Function(ast) | CsdlElementKind::Action(ast) => {
                let kind = if matches!(element.kind, CsdlElementKind::Function(_)) {
                    OperationKind::Function
                } else {
                    OperationKind::Action
                };
                let parameters = ast
                    .parameters
                    .iter()
                    .map(|p| Parameter {
                        name: SmolStr::new(p.name.trim()),
                        type_ref: TypeReference::UNKNOWN,
                        location: p.location.clone(),
                    })
                    .collect();
                let id = self.model.operations.alloc(Operation::Declared(OperationDecl {
                    name: SmolStr::new(name),
                    namespace: SmolStr::new(namespace),
                    kind,
                    is_bound: ast.is_bound,
                    is_composable: ast.is_composable,
                    entity_set_path: ast.entity_set_path.clone(),
                    parameters,
                    return_type: None,
                    location,
                }));
                self.model.operation_names.add(&full, id);
                self.annotate(AnnotationTarget::Operation(id), &element.annotations);
                for (index, parameter) in ast.parameters.iter().enumerate() {
                    self.annotate(
                        AnnotationTarget::Parameter {
                            operation: id,
                            index,
                        },
                        &parameter.annotations,
                    );
                }
                self.operations.push((id, ast));
            }
            CsdlElementKind::EntityContainer(ast) => {
                if let Some(existing) = self.model.entity_container {
                    let existing = self.model.container(existing).full_name();
                    return Err(ModelError::duplicate_entity_container(
                        full, existing, location,
                    ));
                }
                let id = self
                    .model
                    .containers
                    .alloc(EntityContainer::Declared(ContainerDecl::shell(
                        namespace,
                        name,
                        location.clone(),
                    )));
                self.model
                    .container_names
                    .add(&full, id, &mut self.model.containers);
                self.model
                    .container_names
                    .add(name, id, &mut self.model.containers);
                self.model.entity_container = Some(id);
                self.annotate(AnnotationTarget::Container(id), &element.annotations);
                self.containers.push((id, ast, location));
            }
            CsdlElementKind::None => {
                return Err(ModelError::unsupported_element_kind(full, location));
            }
        }
        Ok(())
    }

    fn declare_members(&mut self, owner: TypeId, ast: &'a CsdlStructuredType) {
        let properties = ast
            .properties
            .iter()
            .map(|p| {
                let id = self.model.properties.alloc(Property::Structural(
                    StructuralProperty::shell(p.name.trim(), owner, p.location.clone()),
                ));
                attach_property(
                    &mut self.model.types,
                    &mut self.model.properties,
                    owner,
                    p.name.trim(),
                    id,
                );
                id
            })
            .collect::<Vec<_>>();
        let navigation = ast
            .navigation_properties
            .iter()
            .map(|p| {
                let id = self.model.properties.alloc(Property::Navigation(
                    NavigationProperty::shell(p.name.trim(), owner, p.location.clone()),
                ));
                attach_property(
                    &mut self.model.types,
                    &mut self.model.properties,
                    owner,
                    p.name.trim(),
                    id,
                );
                id
            })
            .collect::<Vec<_>>();

        for (id, p) in properties.iter().zip(&ast.properties) {
            self.annotate(AnnotationTarget::Property(*id), &p.annotations);
        }
        for (id, p) in navigation.iter().zip(&ast.navigation_properties) {
            self.annotate(AnnotationTarget::Property(*id), &p.annotations);
        }

        self.structured.push(PendingStructured {
            id: owner,
            ast,
            properties,
            navigation,
        });
    }

    // ========================================================================
    // PASS 2: RESOLVE DECLARATIONS
    // ========================================================================

    fn resolve_declarations(&mut self) {
        let structured = std::mem::take(&mut self.structured);
        for pending in &structured {
            self.resolve_structured(pending);
        }
        self.structured = structured;

        for (id, ast, location) in std::mem::take(&mut self.enums) {
            let underlying = match &ast.underlying_type {
                Some(raw) => self.type_reference(raw, &CsdlFacets::default(), &location),
                None => TypeReference::primitive(PrimitiveTypeKind::Int32, false),
            };
            if let Some(SchemaType::Enum(e)) = self.model.types.get_mut(id) {
                e.underlying_type = underlying;
            }
        }

        for (id, ast, location) in std::mem::take(&mut self.type_definitions) {
            let underlying = self.type_reference(&ast.underlying_type, &ast.facets, &location);
            if let Some(SchemaType::TypeDefinition(t)) = self.model.types.get_mut(id) {
                t.underlying_type = underlying;
            }
        }

        for (id, ast, location) in std::mem::take(&mut self.terms) {
            let type_ref = self.type_reference(&ast.type_name, &ast.facets, &location);
            let base_term = ast.base_term.as_deref().map(|raw| {
                let resolved = self.model.resolver().resolve_term(raw, &location);
                resolved.into_handle(&mut self.model.terms)
            });
            if let Some(Term::Declared(term)) = self.model.terms.get_mut(id) {
                term.type_ref = type_ref;
                term.base_term = base_term;
            }
        }

        for (id, ast) in std::mem::take(&mut self.operations) {
            self.resolve_operation(id, ast);
        }

        for (id, ast, location) in std::mem::take(&mut self.containers) {
            self.resolve_container(id, ast, &location);
        }
    }

    fn resolve_structured(&mut self, pending: &PendingStructured<'a>) {
        let ast = pending.ast;
        if let Some(raw) = &ast.base_type {
            let location = self.model.schema_type(pending.id).location().clone();
            let base = self.resolve_type_handle(raw, &location);
            if let Some(t) = self.model.types.get_mut(pending.id).and_then(SchemaType::as_structured_mut) {
                t.base_type = Some(base);
            }
        }

        for (id, p) in pending.properties.iter().zip(&ast.properties) {
            self.resolve_structural_property(*id, p);
        }
        for (id, p) in pending.navigation.iter().zip(&ast.navigation_properties) {
            self.resolve_navigation_property(*id, p);
        }
    }

    fn resolve_structural_property(&mut self, id: PropertyId, ast: &CsdlProperty) {
        let type_ref = self.type_reference(&ast.type_name, &ast.facets, &ast.location);
        if let Some(Property::Structural(p)) = self.model.properties.get_mut(id) {
            p.type_ref = type_ref;
            p.default_value = ast.default_value.clone();
        }
    }

    fn resolve_navigation_property(&mut self, id: PropertyId, ast: &CsdlNavigationProperty) {
        let facets = CsdlFacets {
            nullable: ast.nullable,
            ..CsdlFacets::default()
        };
        let type_ref = self.type_reference(&ast.type_name, &facets, &ast.location);
        if let Some(Property::Navigation(p)) = self.model.properties.get_mut(id) {
            p.type_ref = type_ref;
            p.contains_target = ast.contains_target;
            p.on_delete = ast.on_delete.as_deref().and_then(OnDeleteAction::parse);
        }
    }

    fn resolve_operation(&mut self, id: OperationId, ast: &CsdlOperation) {
        let parameters: Vec<TypeReference> = ast
            .parameters
            .iter()
            .map(|p| self.type_reference(&p.type_name, &p.facets, &p.location))
            .collect();
        let return_type = ast
            .return_type
            .as_ref()
            .map(|r| self.type_reference(&r.type_name, &r.facets, &r.location));

        if let Some(Operation::Declared(op)) = self.model.operations.get_mut(id) {
            for (parameter, type_ref) in op.parameters.iter_mut().zip(parameters) {
                parameter.type_ref = type_ref;
            }
            op.return_type = return_type;
        }
    }

    fn resolve_container(&mut self, id: ContainerId, ast: &'a CsdlEntityContainer, location: &Location) {
        if let Some(raw) = &ast.extends {
            let resolved = self.model.resolver().resolve_container(raw, location);
            let extends = resolved.into_handle(&mut self.model.containers);
            if let Some(container) = self.model.containers.get_mut(id).and_then(EntityContainer::as_declared_mut) {
                container.extends = Some(extends);
            }
        }

        for set in &ast.entity_sets {
            let entity_type = self.resolve_type_handle(&set.entity_type, &set.location);
            let source = self.model.sources.alloc(NavigationSource::EntitySet(EntitySet {
                name: SmolStr::new(set.name.trim()),
                container: id,
                entity_type,
                include_in_service_document: set.include_in_service_document,
                bindings: Vec::new(),
                location: set.location.clone(),
            }));
            self.attach_source(id, set.name.trim(), source);
            self.annotate(AnnotationTarget::NavigationSource(source), &set.annotations);
            self.sources.push(PendingSource {
                id: source,
                container: id,
                bindings: &set.bindings,
            });
        }

        for singleton in &ast.singletons {
            let entity_type = self.resolve_type_handle(&singleton.type_name, &singleton.location);
            let source = self.model.sources.alloc(NavigationSource::Singleton(Singleton {
                name: SmolStr::new(singleton.name.trim()),
                container: id,
                entity_type,
                bindings: Vec::new(),
                location: singleton.location.clone(),
            }));
            self.attach_source(id, singleton.name.trim(), source);
            self.annotate(AnnotationTarget::NavigationSource(source), &singleton.annotations);
            self.sources.push(PendingSource {
                id: source,
                container: id,
                bindings: &singleton.bindings,
            });
        }

        for import in &ast.operation_imports {
            let kind = match import.kind {
                CsdlImportKind::Function => OperationKind::Function,
                CsdlImportKind::Action => OperationKind::Action,
            };
            let operation = self.resolve_import_target(&import.operation, kind, &import.location);
            let import_id = self.model.imports.alloc(OperationImport {
                name: SmolStr::new(import.name.trim()),
                kind,
                container: id,
                operation,
                entity_set: None,
                include_in_service_document: import.include_in_service_document,
                location: import.location.clone(),
            });
            if let Some(container) = self.model.containers.get_mut(id).and_then(EntityContainer::as_declared_mut) {
                container.imports.push(import_id);
                container.import_names.add(import.name.trim(), import_id);
            }
            self.annotate(AnnotationTarget::OperationImport(import_id), &import.annotations);
            self.imports.push(PendingImport {
                id: import_id,
                container: id,
                ast: import,
            });
        }
    }

    fn attach_source(&mut self, container: ContainerId, name: &str, source: NavigationSourceId) {
        if let Some(decl) = self
            .model
            .containers
            .get_mut(container)
            .and_then(EntityContainer::as_declared_mut)
        {
            decl.sources.push(source);
            decl.source_names.add(name, source, &mut self.model.sources);
        }
    }

    /// The first unbound overload of the right kind, or a placeholder.
    fn resolve_import_target(
        &mut self,
        raw: &str,
        kind: OperationKind,
        location: &Location,
    ) -> OperationId {
        let candidate = self
            .model
            .resolver()
            .operations(raw)
            .into_iter()
            .find(|id| {
                let op = self.model.operation(*id);
                op.kind() == Some(kind) && !op.is_bound()
            });
        match candidate {
            Some(id) => id,
            None => {
                let bad = self
                    .model
                    .resolver()
                    .unresolved(raw, Capability::Operation, location);
                self.model.operations.alloc(Operation::Unresolved(bad))
            }
        }
    }

    // ========================================================================
    // TYPE REFERENCES
    // ========================================================================

    fn type_reference(&mut self, raw: &str, facets: &CsdlFacets, location: &Location) -> TypeReference {
        let nullable = facets.nullable.unwrap_or(true);
        let facets = convert_facets(facets);
        match collection_element(raw) {
            Some(element) => {
                let element = TypeReference {
                    definition: self.type_definition(element, location),
                    nullable,
                    facets,
                };
                TypeReference::new(TypeDefinition::Collection(Box::new(element)), false)
            }
            None => TypeReference {
                definition: self.type_definition(raw, location),
                nullable,
                facets,
            },
        }
    }

    fn type_definition(&mut self, raw: &str, location: &Location) -> TypeDefinition {
        let raw = raw.trim();
        if let Some(element) = collection_element(raw) {
            let inner = TypeReference::new(self.type_definition(element, location), true);
            return TypeDefinition::Collection(Box::new(inner));
        }
        if let Some(entity) = raw.strip_prefix("Ref(").and_then(|r| r.strip_suffix(')')) {
            return TypeDefinition::EntityReference(self.resolve_type_handle(entity, location));
        }
        if let Some(kind) = self.model.resolver().primitive(raw) {
            return TypeDefinition::Primitive(kind);
        }
        TypeDefinition::Schema(self.resolve_type_handle(raw, location))
    }

    fn resolve_type_handle(&mut self, raw: &str, location: &Location) -> TypeId {
        let resolved = self.model.resolver().resolve_type(raw, location);
        resolved.into_handle(&mut self.model.types)
    }

    /// A placeholder property for a name that did not resolve.
    fn unresolved_property(&mut self, raw: &str, capability: Capability, location: &Location) -> PropertyId {
        let bad = self.model.resolver().unresolved(raw, capability, location);
        self.model.properties.alloc(Property::Unresolved(bad))
    }

    /// A placeholder navigation source for a name that did not resolve.
    fn unresolved_source(&mut self, raw: &str, location: &Location) -> NavigationSourceId {
        let bad = self
            .model
            .resolver()
            .unresolved(raw, Capability::EntitySet, location);
        self.model.sources.alloc(NavigationSource::Unresolved(bad))
    }

    fn push_binding(&mut self, source: NavigationSourceId, binding: NavigationBinding) {
        if let Some(bindings) = self.model.sources.get_mut(source).and_then(NavigationSource::bindings_mut) {
            bindings.push(binding);
        }
    }

    fn set_key(&mut self, owner: TypeId, key: Vec<PropertyId>) {
        if let Some(t) = self.model.types.get_mut(owner).and_then(SchemaType::as_structured_mut) {
            t.key = key;
        }
    }

    fn set_partner(&mut self, property: PropertyId, partner: PropertyId) {
        if let Some(Property::Navigation(p)) = self.model.properties.get_mut(property) {
            p.partner = Some(partner);
        }
    }

    fn set_constraints(&mut self, property: PropertyId, constraints: Vec<ReferentialConstraint>) {
        if let Some(Property::Navigation(p)) = self.model.properties.get_mut(property) {
            p.referential_constraints = constraints;
        }
    }

    fn set_import_entity_set(&mut self, import: OperationImportId, source: NavigationSourceId) {
        if let Some(i) = self.model.imports.get_mut(import) {
            i.entity_set = Some(source);
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Add a property to its declaring type's property list and name registry.
fn attach_property(
    types: &mut Arena<SchemaType, TypeId>,
    properties: &mut Arena<Property, PropertyId>,
    owner: TypeId,
    name: &str,
    id: PropertyId,
) {
    if let Some(t) = types.get_mut(owner).and_then(SchemaType::as_structured_mut) {
        t.declared_properties.push(id);
        t.property_names.add(name, id, properties);
    }
}

/// Members with values filled in: an absent value is one past the previous.
fn enum_members(ast: &CsdlEnumType) -> Vec<EnumMember> {
    let mut next = 0i64;
    ast.members
        .iter()
        .map(|m| {
            let value = m.value.unwrap_or(next);
            next = value.wrapping_add(1);
            EnumMember {
                name: SmolStr::new(m.name.trim()),
                value,
                location: m.location.clone(),
            }
        })
        .collect()
}

fn convert_facets(facets: &CsdlFacets) -> Facets {
    Facets {
        max_length: facets.max_length.clone(),
        precision: facets.precision,
        scale: facets.scale.clone(),
        unicode: facets.unicode,
        srid: facets.srid.clone(),
    }
}
