//! Names bound to more than one element.

use edm::semantic::{EdmErrorCode, NamedElement, SchemaElement, TypeKind};

use crate::helpers::fixtures::DUPLICATE_TYPE_XML;
use crate::helpers::model_helpers::*;

#[test]
fn test_duplicate_type_name_yields_ambiguous_binding() {
    let model = model_from_xml(DUPLICATE_TYPE_XML);
    let id = type_named(&model, "Dup.Thing");
    let ty = model.schema_type(id);

    assert_eq!(ty.type_kind(), TypeKind::None);
    assert_eq!(ty.full_name(), "Dup.Thing");
    assert_eq!(ty.ambiguous_bindings().len(), 2);
    assert!(ty.is_bad());

    let kinds: Vec<TypeKind> = ty
        .ambiguous_bindings()
        .iter()
        .map(|t| model.type_kind(*t))
        .collect();
    assert_eq!(kinds, vec![TypeKind::Complex, TypeKind::Entity]);
}

#[test]
fn test_references_to_ambiguous_name_share_one_binding() {
    let model = model_from_xml(DUPLICATE_TYPE_XML);
    let thing = type_named(&model, "Dup.Thing");
    let value = property_named(&model, "Dup.Holder", "Value");

    assert_eq!(model.property(value).type_ref().schema_type(), Some(thing));
    assert_eq!(
        model
            .errors()
            .with_code(EdmErrorCode::BadAmbiguousElementBinding)
            .count(),
        1
    );
}

#[test]
fn test_both_colliding_declarations_stay_in_the_model() {
    let model = model_from_xml(DUPLICATE_TYPE_XML);
    let things = model
        .declared_types()
        .filter(|(_, t)| t.name() == "Thing")
        .count();
    assert_eq!(things, 2);
}

#[test]
fn test_duplicate_property_names_are_ambiguous() {
    let model = model_from_xml(
        r#"<Schema Namespace="P" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <ComplexType Name="Pair">
    <Property Name="Left" Type="Edm.String"/>
    <Property Name="Left" Type="Edm.Int32"/>
  </ComplexType>
</Schema>"#,
    );
    let pair = type_named(&model, "P.Pair");
    let left = model.schema_type(pair).find_declared_property("Left").expect("binding");

    assert_eq!(model.property(left).ambiguous_bindings().len(), 2);
    assert_eq!(model.schema_type(pair).declared_properties().len(), 2);
    assert_has_error(&model, EdmErrorCode::BadAmbiguousElementBinding);
}
