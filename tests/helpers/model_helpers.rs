//! Helpers for building models and looking elements up by name.

use std::sync::Arc;

use edm::csdl::{CsdlDocument, ReadOptions, read_xml_str};
use edm::semantic::{
    EdmErrorCode, Model, ModelBuilder, NamedElement, NavigationSourceId, PropertyId, TypeId,
};

/// Parse one XML document, panicking on reader errors.
pub fn parse_xml(source: &str) -> CsdlDocument {
    read_xml_str(source, &ReadOptions::default())
        .unwrap_or_else(|e| panic!("CSDL should parse: {e}"))
}

/// Build a model from one XML document.
pub fn model_from_xml(source: &str) -> Model {
    Model::from_xml_str(source).unwrap_or_else(|e| panic!("model should build: {e}"))
}

/// Build a model from one XML document against referenced models.
pub fn model_with_references(source: &str, references: &[Arc<Model>]) -> Model {
    ModelBuilder::new()
        .with_references(references.iter().cloned())
        .build(&[parse_xml(source)])
        .unwrap_or_else(|e| panic!("model should build: {e}"))
}

/// Look up a type that must exist.
pub fn type_named(model: &Model, name: &str) -> TypeId {
    model
        .find_declared_type(name)
        .unwrap_or_else(|| panic!("type '{name}' should be declared"))
}

/// Look up a property (declared or inherited) that must exist.
pub fn property_named(model: &Model, type_name: &str, property: &str) -> PropertyId {
    let owner = type_named(model, type_name);
    model
        .find_property(owner, property)
        .unwrap_or_else(|| panic!("'{type_name}' should have property '{property}'"))
}

/// Look up an entity set or singleton that must exist.
pub fn source_named(model: &Model, name: &str) -> NavigationSourceId {
    model
        .find_navigation_source(name)
        .unwrap_or_else(|| panic!("navigation source '{name}' should exist"))
}

/// Simple names of the given types, sorted.
pub fn sorted_names(model: &Model, ids: &[TypeId]) -> Vec<String> {
    let mut names: Vec<String> = ids
        .iter()
        .map(|id| model.schema_type(*id).name().to_string())
        .collect();
    names.sort();
    names
}

/// Codes of every model error, in report order.
pub fn error_codes(model: &Model) -> Vec<EdmErrorCode> {
    model.errors().errors().iter().map(|e| e.code).collect()
}

/// Assert the model reports at least one error with `code`.
pub fn assert_has_error(model: &Model, code: EdmErrorCode) {
    let errors = model.errors();
    assert!(
        errors.has_code(code),
        "expected {code}, got: {:?}",
        errors.errors()
    );
}
