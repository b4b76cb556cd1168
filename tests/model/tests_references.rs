//! Models built against referenced models.

use std::sync::Arc;

use edm::semantic::{
    AnnotationTarget, BuildOptions, EdmErrorCode, Model, ModelBuilder, NamedElement,
    SchemaElement, TypeDefinition, TypeKind,
};

use crate::helpers::fixtures::{COMMON_XML, SALES_XML, SERVICE_XML};
use crate::helpers::model_helpers::*;

fn common() -> Arc<Model> {
    Arc::new(model_from_xml(COMMON_XML))
}

#[test]
fn test_base_type_resolves_into_referenced_model() {
    let common = common();
    let service = model_with_references(SERVICE_XML, &[common.clone()]);

    let document = type_named(&service, "Service.Document");
    let entity = common.find_declared_type("Common.Entity").expect("entity");
    assert_eq!(service.schema_type(document).base_type(), Some(entity));
    assert_eq!(entity.model(), common.id());
    assert!(service.errors().is_empty());
}

#[test]
fn test_key_and_properties_inherited_across_models() {
    let common = common();
    let service = model_with_references(SERVICE_XML, &[common.clone()]);
    let document = type_named(&service, "Service.Document");

    let id = property_named(&service, "Common.Entity", "ID");
    assert_eq!(service.key(document), [id]);
    let names: Vec<String> = service
        .properties(document)
        .iter()
        .map(|p| service.property(*p).name().to_string())
        .collect();
    assert_eq!(names, vec!["ID", "Title"]);
}

#[test]
fn test_derived_types_include_referencing_model() {
    let common = common();
    let service = model_with_references(SERVICE_XML, &[common.clone()]);
    let entity = type_named(&service, "Common.Entity");

    assert_eq!(sorted_names(&service, &service.find_directly_derived_types(entity)), vec!["Document"]);
    // The referenced model does not see who references it.
    assert!(common.find_directly_derived_types(entity).is_empty());
}

#[test]
fn test_annotation_uses_term_from_referenced_model() {
    let common = common();
    let service = model_with_references(SERVICE_XML, &[common.clone()]);
    let title = property_named(&service, "Service.Document", "Title");
    let description = common.find_declared_term("Common.Description").expect("term");

    let found = service.find_annotations_by_term(AnnotationTarget::Property(title), description, None);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target_path(), Some("Service.Document/Title"));
}

#[test]
fn test_operation_bound_in_reference_is_bindable_to_derived_type() {
    let common = common();
    let service = model_with_references(SERVICE_XML, &[common]);
    let document = type_named(&service, "Service.Document");

    let found = service.find_bindable_operations(&TypeDefinition::Schema(document));
    assert_eq!(found.len(), 1);
    assert_eq!(service.operation(found[0]).full_name(), "Common.Touch");
}

#[test]
fn test_name_declared_by_two_references_is_ambiguous() {
    let first = common();
    let second = common();
    let service = model_with_references(SERVICE_XML, &[first.clone(), second.clone()]);

    let document = type_named(&service, "Service.Document");
    let base = service
        .schema_type(document)
        .base_type()
        .expect("placeholder base");
    let ty = service.schema_type(base);

    assert_eq!(ty.type_kind(), TypeKind::None);
    assert_eq!(ty.full_name(), "Common.Entity");
    let owners: Vec<_> = ty.ambiguous_bindings().iter().map(|t| t.model()).collect();
    assert_eq!(owners, vec![first.id(), second.id()]);
    assert_has_error(&service, EdmErrorCode::BadAmbiguousElementBinding);
}

#[test]
fn test_own_declaration_shadows_references() {
    let common = common();
    let model = model_with_references(
        r#"<Schema Namespace="Common" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <ComplexType Name="Entity"/>
  <ComplexType Name="Holder"><Property Name="Value" Type="Common.Entity"/></ComplexType>
</Schema>"#,
        &[common],
    );
    let entity = type_named(&model, "Common.Entity");
    assert_eq!(entity.model(), model.id());
    assert_eq!(model.type_kind(entity), TypeKind::Complex);
}

#[test]
fn test_reference_search_can_be_disabled() {
    let service = ModelBuilder::new()
        .with_options(BuildOptions::default().search_referenced_models(false))
        .with_reference(common())
        .build(&[parse_xml(SERVICE_XML)])
        .expect("model");

    let document = type_named(&service, "Service.Document");
    let base = service.schema_type(document).base_type().expect("placeholder");
    assert!(service.schema_type(base).is_bad());
    assert_has_error(&service, EdmErrorCode::BadUnresolvedType);
    assert_has_error(&service, EdmErrorCode::BadUnresolvedTerm);
}

#[test]
fn test_foreign_handle_reads_as_empty_placeholder() {
    let sales = model_from_xml(SALES_XML);
    let common = model_from_xml(COMMON_XML);
    let customer = type_named(&sales, "Sales.Customer");

    let ty = common.schema_type(customer);
    assert_eq!(ty.name(), "");
    assert_eq!(ty.type_kind(), TypeKind::None);
    assert!(ty.declared_properties().is_empty());
    assert!(common.find_directly_derived_types(customer).is_empty());
}
