//! CSDL schema AST.
//!
//! Plain data produced by the XML and JSON readers. Every node records the
//! raw names and raw type-reference strings exactly as written, plus a source
//! location. Nothing is resolved here; the semantic builder does that.

use std::sync::Arc;

use crate::base::Location;

/// One parsed CSDL document (an `edmx:Edmx` file, a bare `Schema`, or a JSON
/// CSDL object).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlDocument {
    /// Name used in diagnostics, usually the file path.
    pub name: Option<Arc<str>>,
    pub version: Option<String>,
    pub references: Vec<CsdlReference>,
    pub schemas: Vec<CsdlSchema>,
}

impl CsdlDocument {
    /// All elements of all schemas, in document order.
    pub fn elements(&self) -> impl Iterator<Item = (&CsdlSchema, &CsdlElement)> {
        self.schemas
            .iter()
            .flat_map(|schema| schema.elements.iter().map(move |e| (schema, e)))
    }
}

/// An `edmx:Reference` to another document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlReference {
    pub uri: String,
    pub includes: Vec<CsdlInclude>,
    pub location: Location,
}

/// A namespace (and optional alias) included from a referenced document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlInclude {
    pub namespace: String,
    pub alias: Option<String>,
}

/// A `Schema` element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlSchema {
    pub namespace: String,
    pub alias: Option<String>,
    pub elements: Vec<CsdlElement>,
    /// Out-of-line `Annotations Target="..."` blocks.
    pub annotations: Vec<CsdlAnnotations>,
    pub location: Location,
}

/// A schema child element: a kind tag, a name, its inline annotations and
/// where it was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct CsdlElement {
    pub name: String,
    pub kind: CsdlElementKind,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

impl CsdlElement {
    pub fn new(name: impl Into<String>, kind: CsdlElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            annotations: Vec::new(),
            location: Location::None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// Kind tag and kind-specific payload of a schema element.
#[derive(Debug, Clone, PartialEq)]
pub enum CsdlElementKind {
    /// Unknown element; rejected by the model builder.
    None,
    EntityType(CsdlStructuredType),
    ComplexType(CsdlStructuredType),
    EnumType(CsdlEnumType),
    TypeDefinition(CsdlTypeDefinition),
    Function(CsdlOperation),
    Action(CsdlOperation),
    Term(CsdlTerm),
    EntityContainer(CsdlEntityContainer),
}

impl CsdlElementKind {
    /// The CSDL element name of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            CsdlElementKind::None => "None",
            CsdlElementKind::EntityType(_) => "EntityType",
            CsdlElementKind::ComplexType(_) => "ComplexType",
            CsdlElementKind::EnumType(_) => "EnumType",
            CsdlElementKind::TypeDefinition(_) => "TypeDefinition",
            CsdlElementKind::Function(_) => "Function",
            CsdlElementKind::Action(_) => "Action",
            CsdlElementKind::Term(_) => "Term",
            CsdlElementKind::EntityContainer(_) => "EntityContainer",
        }
    }
}

/// Type facets as written on properties, parameters, return types and terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsdlFacets {
    pub nullable: Option<bool>,
    pub max_length: Option<String>,
    pub precision: Option<u32>,
    pub scale: Option<String>,
    pub unicode: Option<bool>,
    pub srid: Option<String>,
}

/// Shared payload of `EntityType` and `ComplexType`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlStructuredType {
    pub base_type: Option<String>,
    pub is_abstract: bool,
    pub is_open: bool,
    pub has_stream: bool,
    pub key: Vec<CsdlPropertyRef>,
    pub properties: Vec<CsdlProperty>,
    pub navigation_properties: Vec<CsdlNavigationProperty>,
}

/// A `Key/PropertyRef`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlPropertyRef {
    pub name: String,
    pub alias: Option<String>,
    pub location: Location,
}

/// A structural `Property`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlProperty {
    pub name: String,
    pub type_name: String,
    pub facets: CsdlFacets,
    pub default_value: Option<String>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

/// A `NavigationProperty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlNavigationProperty {
    pub name: String,
    pub type_name: String,
    pub nullable: Option<bool>,
    pub partner: Option<String>,
    pub contains_target: bool,
    pub on_delete: Option<String>,
    pub referential_constraints: Vec<CsdlReferentialConstraint>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlReferentialConstraint {
    pub property: String,
    pub referenced_property: String,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlEnumType {
    pub underlying_type: Option<String>,
    pub is_flags: bool,
    pub members: Vec<CsdlEnumMember>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlEnumMember {
    pub name: String,
    pub value: Option<i64>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlTypeDefinition {
    pub underlying_type: String,
    pub facets: CsdlFacets,
}

/// Shared payload of `Function` and `Action`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlOperation {
    pub is_bound: bool,
    pub is_composable: bool,
    pub entity_set_path: Option<String>,
    pub parameters: Vec<CsdlParameter>,
    pub return_type: Option<CsdlReturnType>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlParameter {
    pub name: String,
    pub type_name: String,
    pub facets: CsdlFacets,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlReturnType {
    pub type_name: String,
    pub facets: CsdlFacets,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlTerm {
    pub type_name: String,
    pub facets: CsdlFacets,
    pub base_term: Option<String>,
    pub applies_to: Vec<String>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlEntityContainer {
    pub extends: Option<String>,
    pub entity_sets: Vec<CsdlEntitySet>,
    pub singletons: Vec<CsdlSingleton>,
    pub operation_imports: Vec<CsdlOperationImport>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlEntitySet {
    pub name: String,
    pub entity_type: String,
    pub include_in_service_document: bool,
    pub bindings: Vec<CsdlNavigationBinding>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlSingleton {
    pub name: String,
    pub type_name: String,
    pub bindings: Vec<CsdlNavigationBinding>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

/// A `NavigationPropertyBinding`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlNavigationBinding {
    pub path: String,
    pub target: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsdlImportKind {
    Function,
    Action,
}

/// A `FunctionImport` or `ActionImport`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsdlOperationImport {
    pub name: String,
    pub kind: CsdlImportKind,
    /// Qualified name of the imported function or action.
    pub operation: String,
    pub entity_set: Option<String>,
    pub include_in_service_document: bool,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

/// An out-of-line `Annotations` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlAnnotations {
    pub target: String,
    pub qualifier: Option<String>,
    pub annotations: Vec<CsdlAnnotation>,
    pub location: Location,
}

/// A single `Annotation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsdlAnnotation {
    pub term: String,
    pub qualifier: Option<String>,
    /// `None` when the annotation carries no expression and the term's
    /// default applies.
    pub value: Option<CsdlExpression>,
    pub location: Location,
}

/// An annotation expression, unresolved.
#[derive(Debug, Clone, PartialEq)]
pub enum CsdlExpression {
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
    /// Space separated `NS.Enum/Member` references.
    EnumMember(String),
    Path(String),
    PropertyPath(String),
    NavigationPropertyPath(String),
    AnnotationPath(String),
    Collection(Vec<CsdlExpression>),
    Record {
        type_name: Option<String>,
        properties: Vec<CsdlPropertyValue>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsdlPropertyValue {
    pub property: String,
    pub value: CsdlExpression,
    pub location: Location,
}
