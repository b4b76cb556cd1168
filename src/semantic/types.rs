//! Type references and schema types.

use smol_str::SmolStr;

use super::diagnostics::EdmError;
use super::element::{
    AmbiguousBinding, BadElement, Bindable, SchemaElement, Unresolvable,
    delegate_named,
};
use super::ids::{PropertyId, TypeId};
use super::registry::Registry;
use crate::base::Location;

// ============================================================================
// KINDS
// ============================================================================

/// What a type reference or schema type denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    None,
    Primitive,
    Entity,
    Complex,
    Enum,
    TypeDefinition,
    Collection,
    EntityReference,
    Row,
}

/// Built-in `Edm.*` types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTypeKind {
    /// Not yet resolved. Only seen on shells mid-build and on placeholders.
    #[default]
    None,
    Binary,
    Boolean,
    Byte,
    Date,
    DateTimeOffset,
    Decimal,
    Double,
    Duration,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    Stream,
    String,
    TimeOfDay,
    Geography,
    GeographyPoint,
    GeographyLineString,
    GeographyPolygon,
    GeographyMultiPoint,
    GeographyMultiLineString,
    GeographyMultiPolygon,
    GeographyCollection,
    Geometry,
    GeometryPoint,
    GeometryLineString,
    GeometryPolygon,
    GeometryMultiPoint,
    GeometryMultiLineString,
    GeometryMultiPolygon,
    GeometryCollection,
    /// The abstract `Edm.PrimitiveType`.
    PrimitiveType,
    /// `Edm.Untyped`.
    Untyped,
}

const PRIMITIVE_NAMES: &[(&str, PrimitiveTypeKind)] = &[
    ("Binary", PrimitiveTypeKind::Binary),
    ("Boolean", PrimitiveTypeKind::Boolean),
    ("Byte", PrimitiveTypeKind::Byte),
    ("Date", PrimitiveTypeKind::Date),
    ("DateTimeOffset", PrimitiveTypeKind::DateTimeOffset),
    ("Decimal", PrimitiveTypeKind::Decimal),
    ("Double", PrimitiveTypeKind::Double),
    ("Duration", PrimitiveTypeKind::Duration),
    ("Guid", PrimitiveTypeKind::Guid),
    ("Int16", PrimitiveTypeKind::Int16),
    ("Int32", PrimitiveTypeKind::Int32),
    ("Int64", PrimitiveTypeKind::Int64),
    ("SByte", PrimitiveTypeKind::SByte),
    ("Single", PrimitiveTypeKind::Single),
    ("Stream", PrimitiveTypeKind::Stream),
    ("String", PrimitiveTypeKind::String),
    ("TimeOfDay", PrimitiveTypeKind::TimeOfDay),
    ("Geography", PrimitiveTypeKind::Geography),
    ("GeographyPoint", PrimitiveTypeKind::GeographyPoint),
    ("GeographyLineString", PrimitiveTypeKind::GeographyLineString),
    ("GeographyPolygon", PrimitiveTypeKind::GeographyPolygon),
    ("GeographyMultiPoint", PrimitiveTypeKind::GeographyMultiPoint),
    ("GeographyMultiLineString", PrimitiveTypeKind::GeographyMultiLineString),
    ("GeographyMultiPolygon", PrimitiveTypeKind::GeographyMultiPolygon),
    ("GeographyCollection", PrimitiveTypeKind::GeographyCollection),
    ("Geometry", PrimitiveTypeKind::Geometry),
    ("GeometryPoint", PrimitiveTypeKind::GeometryPoint),
    ("GeometryLineString", PrimitiveTypeKind::GeometryLineString),
    ("GeometryPolygon", PrimitiveTypeKind::GeometryPolygon),
    ("GeometryMultiPoint", PrimitiveTypeKind::GeometryMultiPoint),
    ("GeometryMultiLineString", PrimitiveTypeKind::GeometryMultiLineString),
    ("GeometryMultiPolygon", PrimitiveTypeKind::GeometryMultiPolygon),
    ("GeometryCollection", PrimitiveTypeKind::GeometryCollection),
    ("PrimitiveType", PrimitiveTypeKind::PrimitiveType),
    ("Untyped", PrimitiveTypeKind::Untyped),
];

impl PrimitiveTypeKind {
    /// Look up a primitive by its simple name (`String`, not `Edm.String`).
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVE_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, kind)| *kind)
    }

    /// The simple name, or `""` for [`PrimitiveTypeKind::None`].
    pub fn name(self) -> &'static str {
        PRIMITIVE_NAMES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map_or("", |(n, _)| n)
    }
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// Facets carried by a type reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Facets {
    pub max_length: Option<String>,
    pub precision: Option<u32>,
    pub scale: Option<String>,
    pub unicode: Option<bool>,
    pub srid: Option<String>,
}

impl Facets {
    pub const EMPTY: Facets = Facets {
        max_length: None,
        precision: None,
        scale: None,
        unicode: None,
        srid: None,
    };
}

/// The thing a type reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    Primitive(PrimitiveTypeKind),
    /// A declared (or placeholder) schema type.
    Schema(TypeId),
    Collection(Box<TypeReference>),
    /// `Ref(NS.Entity)`: a reference to an entity rather than the entity.
    EntityReference(TypeId),
}

impl TypeDefinition {
    /// The definition with collections peeled off.
    pub fn element(&self) -> &TypeDefinition {
        match self {
            TypeDefinition::Collection(inner) => inner.definition.element(),
            other => other,
        }
    }

    /// The schema type this definition names, looking through collections.
    pub fn schema_type(&self) -> Option<TypeId> {
        match self.element() {
            TypeDefinition::Schema(id) | TypeDefinition::EntityReference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, TypeDefinition::Collection(_))
    }
}

/// A use of a type: definition plus nullability and facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    pub definition: TypeDefinition,
    pub nullable: bool,
    pub facets: Facets,
}

impl TypeReference {
    /// The deterministic reference answered by placeholders.
    pub const UNKNOWN: TypeReference = TypeReference {
        definition: TypeDefinition::Primitive(PrimitiveTypeKind::None),
        nullable: true,
        facets: Facets::EMPTY,
    };

    pub fn new(definition: TypeDefinition, nullable: bool) -> Self {
        Self {
            definition,
            nullable,
            facets: Facets::default(),
        }
    }

    pub fn primitive(kind: PrimitiveTypeKind, nullable: bool) -> Self {
        Self::new(TypeDefinition::Primitive(kind), nullable)
    }

    pub fn is_collection(&self) -> bool {
        self.definition.is_collection()
    }

    pub fn schema_type(&self) -> Option<TypeId> {
        self.definition.schema_type()
    }
}

pub(crate) static UNKNOWN_TYPE_REFERENCE: TypeReference = TypeReference::UNKNOWN;

impl Default for TypeReference {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

// ============================================================================
// SCHEMA TYPES
// ============================================================================

/// A type declared in a schema, or a placeholder for one.
#[derive(Debug)]
pub enum SchemaType {
    Entity(StructuredType),
    Complex(StructuredType),
    Enum(EnumType),
    TypeDefinition(TypeDefinitionType),
    Unresolved(BadElement),
    Ambiguous(AmbiguousBinding<TypeId>),
}

pub(crate) static MISSING_TYPE: SchemaType = SchemaType::Unresolved(BadElement::MISSING);

delegate_named!(SchemaType {
    Entity,
    Complex,
    Enum,
    TypeDefinition,
    Unresolved,
    Ambiguous
});

impl SchemaElement for SchemaType {
    fn namespace(&self) -> &str {
        match self {
            SchemaType::Entity(t) | SchemaType::Complex(t) => &t.namespace,
            SchemaType::Enum(t) => &t.namespace,
            SchemaType::TypeDefinition(t) => &t.namespace,
            SchemaType::Unresolved(bad) => bad.namespace(),
            SchemaType::Ambiguous(binding) => binding.namespace(),
        }
    }
}

impl Unresolvable for SchemaType {
    fn unresolved(bad: BadElement) -> Self {
        SchemaType::Unresolved(bad)
    }
}

impl Bindable<TypeId> for SchemaType {
    fn ambiguous(binding: AmbiguousBinding<TypeId>) -> Self {
        SchemaType::Ambiguous(binding)
    }

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<TypeId>> {
        match self {
            SchemaType::Ambiguous(binding) => Some(binding),
            _ => None,
        }
    }
}

impl SchemaType {
    /// The kind of this type. Placeholders report [`TypeKind::None`].
    pub fn type_kind(&self) -> TypeKind {
        match self {
            SchemaType::Entity(_) => TypeKind::Entity,
            SchemaType::Complex(_) => TypeKind::Complex,
            SchemaType::Enum(_) => TypeKind::Enum,
            SchemaType::TypeDefinition(_) => TypeKind::TypeDefinition,
            SchemaType::Unresolved(_) | SchemaType::Ambiguous(_) => TypeKind::None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredType> {
        match self {
            SchemaType::Entity(t) | SchemaType::Complex(t) => Some(t),
            _ => None,
        }
    }

    pub(crate) fn as_structured_mut(&mut self) -> Option<&mut StructuredType> {
        match self {
            SchemaType::Entity(t) | SchemaType::Complex(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            SchemaType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_type_definition(&self) -> Option<&TypeDefinitionType> {
        match self {
            SchemaType::TypeDefinition(t) => Some(t),
            _ => None,
        }
    }

    /// Colliding types if this is an ambiguous binding.
    pub fn ambiguous_bindings(&self) -> &[TypeId] {
        match self {
            SchemaType::Ambiguous(binding) => binding.bindings(),
            _ => &[],
        }
    }

    pub fn base_type(&self) -> Option<TypeId> {
        self.as_structured().and_then(|t| t.base_type)
    }

    pub fn is_abstract(&self) -> bool {
        self.as_structured().is_some_and(|t| t.is_abstract)
    }

    pub fn is_open(&self) -> bool {
        self.as_structured().is_some_and(|t| t.is_open)
    }

    /// Properties declared on this type itself, in declaration order.
    pub fn declared_properties(&self) -> &[PropertyId] {
        self.as_structured()
            .map_or(&[], |t| t.declared_properties.as_slice())
    }

    /// Key properties declared on this type itself.
    pub fn declared_key(&self) -> &[PropertyId] {
        self.as_structured().map_or(&[], |t| t.key.as_slice())
    }

    pub fn find_declared_property(&self, name: &str) -> Option<PropertyId> {
        self.as_structured()
            .and_then(|t| t.property_names.get(name))
    }
}

/// An entity or complex type.
#[derive(Debug)]
pub struct StructuredType {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) base_type: Option<TypeId>,
    pub(crate) is_abstract: bool,
    pub(crate) is_open: bool,
    pub(crate) has_stream: bool,
    pub(crate) key: Vec<PropertyId>,
    pub(crate) declared_properties: Vec<PropertyId>,
    pub(crate) property_names: Registry<PropertyId>,
    pub(crate) location: Location,
}

impl StructuredType {
    pub(crate) fn shell(
        namespace: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            base_type: None,
            is_abstract: false,
            is_open: false,
            has_stream: false,
            key: Vec::new(),
            declared_properties: Vec::new(),
            property_names: Registry::new(),
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

    pub fn base_type(&self) -> Option<TypeId> {
        self.base_type
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn has_stream(&self) -> bool {
        self.has_stream
    }

    pub fn declared_key(&self) -> &[PropertyId] {
        &self.key
    }

    pub fn declared_properties(&self) -> &[PropertyId] {
        &self.declared_properties
    }
}

/// An enumeration type.
#[derive(Debug)]
pub struct EnumType {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) underlying_type: TypeReference,
    pub(crate) is_flags: bool,
    pub(crate) members: Vec<EnumMember>,
    pub(crate) location: Location,
}

impl EnumType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    /// The underlying integer type; `Edm.Int32` when none was declared.
    pub fn underlying_type(&self) -> &TypeReference {
        &self.underlying_type
    }

    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    pub fn find_member(&self, name: &str) -> Option<(usize, &EnumMember)> {
        self.members.iter().enumerate().find(|(_, m)| m.name == name)
    }
}

/// One member of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: SmolStr,
    /// Declared value, or one past the previous member's value.
    pub value: i64,
    pub location: Location,
}

/// A named alias of a primitive type with facets.
#[derive(Debug)]
pub struct TypeDefinitionType {
    pub(crate) name: SmolStr,
    pub(crate) namespace: SmolStr,
    pub(crate) underlying_type: TypeReference,
    pub(crate) location: Location,
}

impl TypeDefinitionType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &[]
    }

    pub fn underlying_type(&self) -> &TypeReference {
        &self.underlying_type
    }
}
