//! Unresolved references become placeholders that carry errors.

use edm::semantic::{
    AnnotationTarget, EdmErrorCode, EnumMemberRef, Expression, ModelError, NamedElement,
    SchemaElement, TypeKind,
};
use edm::Location;
use edm::csdl::{CsdlDocument, CsdlElement, CsdlElementKind, CsdlSchema};
use edm::semantic::ModelBuilder;
use rstest::rstest;

use crate::helpers::fixtures::BROKEN_XML;
use crate::helpers::model_helpers::*;

#[rstest]
#[case(EdmErrorCode::BadUnresolvedType)]
#[case(EdmErrorCode::BadUnresolvedProperty)]
#[case(EdmErrorCode::BadUnresolvedNavigationPropertyPath)]
#[case(EdmErrorCode::BadUnresolvedEntityContainer)]
#[case(EdmErrorCode::BadUnresolvedEntitySet)]
#[case(EdmErrorCode::BadUnresolvedOperation)]
#[case(EdmErrorCode::BadUnresolvedTarget)]
#[case(EdmErrorCode::BadUnresolvedTerm)]
#[case(EdmErrorCode::InvalidEnumMemberPath)]
fn test_broken_model_reports(#[case] code: EdmErrorCode) {
    let model = model_from_xml(BROKEN_XML);
    assert_has_error(&model, code);
}

#[test]
fn test_unresolved_types_are_counted_per_reference() {
    let model = model_from_xml(BROKEN_XML);
    // BaseType, Shape, Collection(Part) and the return type.
    assert_eq!(
        model
            .errors()
            .with_code(EdmErrorCode::BadUnresolvedType)
            .count(),
        4
    );
}

#[test]
fn test_unresolved_type_placeholder_keeps_requested_name() {
    let model = model_from_xml(BROKEN_XML);
    let shape = property_named(&model, "Broken.Widget", "Shape");
    let placeholder = model
        .property(shape)
        .type_ref()
        .schema_type()
        .expect("placeholder handle");
    let ty = model.schema_type(placeholder);

    assert_eq!(ty.type_kind(), TypeKind::None);
    assert_eq!(ty.name(), "Shape");
    assert_eq!(ty.namespace(), "Broken");
    assert!(ty.is_bad());
    assert!(ty.declared_properties().is_empty());
    assert_eq!(ty.base_type(), None);

    let error = &ty.errors()[0];
    assert_eq!(error.code, EdmErrorCode::BadUnresolvedType);
    assert!(error.message.contains("Broken.Shape"));
    assert_eq!(error.location.line(), Some(4));
}

#[test]
fn test_placeholder_base_type_is_still_walkable() {
    let model = model_from_xml(BROKEN_XML);
    let widget = type_named(&model, "Broken.Widget");
    let bases: Vec<_> = model.base_types(widget).collect();

    assert_eq!(bases.len(), 1);
    assert!(model.schema_type(bases[0]).is_bad());
    assert!(!model.has_base_type_cycle(widget));
}

#[test]
fn test_unresolved_key_keeps_its_slot() {
    let model = model_from_xml(BROKEN_XML);
    let widget = type_named(&model, "Broken.Widget");
    let key = model.key(widget);

    assert_eq!(key.len(), 1);
    let property = model.property(key[0]);
    assert_eq!(property.name(), "Nope");
    assert_eq!(property.errors()[0].code, EdmErrorCode::BadUnresolvedProperty);
}

#[test]
fn test_unresolved_operation_import_target() {
    let model = model_from_xml(BROKEN_XML);
    let run = model.find_operation_imports("Run");
    let import = model.operation_import(run[0]).expect("import");
    let operation = model.operation(import.operation());

    assert!(operation.as_declared().is_none());
    assert_eq!(operation.full_name(), "Broken.Run");
    assert!(operation.parameters().is_empty());
}

#[test]
fn test_unresolved_annotation_target_and_term() {
    let model = model_from_xml(BROKEN_XML);
    let lost = model
        .annotations()
        .iter()
        .find(|a| a.target_path() == Some("Broken.Nowhere"))
        .expect("annotation is kept");

    assert_eq!(lost.target(), AnnotationTarget::Unresolved);
    assert!(model.term(lost.term()).is_bad());
    let codes: Vec<_> = lost.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![EdmErrorCode::BadUnresolvedTarget]);
    assert!(model.find_vocabulary_annotations(AnnotationTarget::Unresolved).is_empty());
}

#[test]
fn test_enum_member_without_slash_is_invalid() {
    let model = model_from_xml(BROKEN_XML);
    let widget = type_named(&model, "Broken.Widget");
    let annotations = model.find_vocabulary_annotations(AnnotationTarget::Type(widget));

    assert_eq!(annotations.len(), 1);
    let Some(Expression::EnumMember(members)) = annotations[0].value() else {
        panic!("expected an enum member value");
    };
    let EnumMemberRef::Unresolved(bad) = &members[0] else {
        panic!("expected an invalid member path");
    };
    assert_eq!(bad.errors()[0].code, EdmErrorCode::InvalidEnumMemberPath);
}

#[test]
fn test_unknown_enum_member_is_unresolved() {
    let model = model_from_xml(
        r#"<Schema Namespace="E" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EnumType Name="Color"><Member Name="Red"/></EnumType>
  <Term Name="Paint" Type="E.Color"/>
  <ComplexType Name="Box">
    <Annotation Term="E.Paint" EnumMember="E.Color/Red E.Color/Green"/>
  </ComplexType>
</Schema>"#,
    );
    let box_type = type_named(&model, "E.Box");
    let annotations = model.find_vocabulary_annotations(AnnotationTarget::Type(box_type));
    let Some(Expression::EnumMember(members)) = annotations[0].value() else {
        panic!("expected an enum member value");
    };

    assert!(matches!(members[0], EnumMemberRef::Member { member: 0, .. }));
    assert!(matches!(members[1], EnumMemberRef::Unresolved(_)));
    assert_has_error(&model, EdmErrorCode::BadUnresolvedEnumMember);
}

#[test]
fn test_second_entity_container_is_a_build_error() {
    let result = edm::semantic::Model::from_xml_str(
        r#"<Schema Namespace="Two" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityContainer Name="First"/>
  <EntityContainer Name="Second"/>
</Schema>"#,
    );
    match result {
        Err(ModelError::DuplicateEntityContainer { name, existing, .. }) => {
            assert_eq!(name, "Two.Second");
            assert_eq!(existing, "Two.First");
        }
        other => panic!("expected a duplicate container error, got {other:?}"),
    }
}

#[test]
fn test_element_without_kind_is_a_build_error() {
    let document = CsdlDocument {
        schemas: vec![CsdlSchema {
            namespace: "NS".into(),
            elements: vec![
                CsdlElement::new("X", CsdlElementKind::None)
                    .with_location(Location::Path("NS/X".into())),
            ],
            ..CsdlSchema::default()
        }],
        ..CsdlDocument::default()
    };

    match ModelBuilder::new().build(&[document]) {
        Err(ModelError::UnsupportedElementKind { name, location }) => {
            assert_eq!(name, "NS.X");
            assert_eq!(location, Location::Path("NS/X".into()));
        }
        other => panic!("expected an unsupported kind error, got {other:?}"),
    }
}

#[test]
fn test_malformed_input_is_a_build_error() {
    let result = edm::semantic::Model::from_xml_str("<Schema Namespace=\"X\">");
    assert!(matches!(result, Err(ModelError::Csdl(_))));
}

#[test]
fn test_error_codes_render_by_name() {
    let model = model_from_xml(BROKEN_XML);
    let rendered: Vec<String> = model.errors().errors().iter().map(|e| e.to_string()).collect();
    assert!(rendered.iter().any(|s| s.contains("BadUnresolvedEntityContainer")));
    assert!(error_codes(&model).contains(&EdmErrorCode::BadUnresolvedTerm));
}
