//! Inline and out-of-line vocabulary annotations.

use edm::semantic::{
    AnnotationTarget, BuildOptions, EnumMemberRef, Expression, ModelBuilder, NamedElement,
};

use crate::helpers::fixtures::SALES_XML;
use crate::helpers::model_helpers::*;

fn string_value(annotation: &edm::semantic::Annotation) -> Option<&str> {
    match annotation.value() {
        Some(Expression::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

#[test]
fn test_inline_annotation_on_type() {
    let model = model_from_xml(SALES_XML);
    let customer = type_named(&model, "Sales.Customer");
    let found = model.find_vocabulary_annotations(AnnotationTarget::Type(customer));

    assert_eq!(found.len(), 1);
    assert_eq!(string_value(found[0]), Some("A customer"));
    assert_eq!(found[0].target_path(), None);
    assert_eq!(model.term(found[0].term()).name(), "Label");
}

#[test]
fn test_out_of_line_annotation_on_property() {
    let model = model_from_xml(SALES_XML);
    let name = property_named(&model, "Sales.Customer", "Name");
    let found = model.find_vocabulary_annotations(AnnotationTarget::Property(name));

    assert_eq!(found.len(), 1);
    assert_eq!(string_value(found[0]), Some("Full name"));
    assert_eq!(found[0].target_path(), Some("Sales.Customer/Name"));
}

#[test]
fn test_annotation_on_enum_member_through_alias() {
    let model = model_from_xml(SALES_XML);
    let tier = type_named(&model, "Sales.Tier");
    let target = AnnotationTarget::EnumMember {
        enum_type: tier,
        member: 2,
    };
    let found = model.find_vocabulary_annotations(target);
    assert_eq!(found.len(), 1);
    assert_eq!(string_value(found[0]), Some("Top"));
}

#[test]
fn test_annotation_on_parameter_of_matching_overload() {
    let model = model_from_xml(SALES_XML);
    let overloads = model.find_operations("Sales.TopOrders");
    let target = AnnotationTarget::Parameter {
        operation: overloads[0],
        index: 1,
    };
    let found = model.find_vocabulary_annotations(target);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].qualifier(), Some("Ui"));
    assert_eq!(string_value(found[0]), Some("How many"));
}

#[test]
fn test_annotation_on_entity_set_with_enum_value() {
    let model = model_from_xml(SALES_XML);
    let customers = source_named(&model, "Customers");
    let tier = type_named(&model, "Sales.Tier");
    let found = model.find_vocabulary_annotations(AnnotationTarget::NavigationSource(customers));

    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].value(),
        Some(&Expression::EnumMember(vec![EnumMemberRef::Member {
            enum_type: tier,
            member: 2,
        }]))
    );
}

#[test]
fn test_find_annotations_by_term_and_qualifier() {
    let model = model_from_xml(SALES_XML);
    let label = model.find_declared_term("Sales.Label").expect("term");
    let overloads = model.find_operations("Sales.TopOrders");
    let target = AnnotationTarget::Parameter {
        operation: overloads[0],
        index: 1,
    };

    assert_eq!(model.find_annotations_by_term(target, label, None).len(), 1);
    assert_eq!(model.find_annotations_by_term(target, label, Some("Ui")).len(), 1);
    assert!(model.find_annotations_by_term(target, label, Some("Other")).is_empty());
}

#[test]
fn test_every_annotation_resolves_in_sales_model() {
    let model = model_from_xml(SALES_XML);
    assert_eq!(model.annotations().len(), 5);
    assert!(model
        .annotations()
        .iter()
        .all(|a| a.target() != AnnotationTarget::Unresolved && a.errors().is_empty()));
}

#[test]
fn test_annotations_can_be_skipped() {
    let document = parse_xml(SALES_XML);
    let model = ModelBuilder::new()
        .with_options(BuildOptions::default().resolve_annotations(false))
        .build(&[document])
        .expect("model");
    assert!(model.annotations().is_empty());
    assert!(model.errors().is_empty());
}

#[test]
fn test_return_type_and_record_annotations() {
    let model = model_from_xml(
        r#"<Schema Namespace="R" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <ComplexType Name="Hint"><Property Name="Text" Type="Edm.String"/></ComplexType>
  <Term Name="Tip" Type="R.Hint"/>
  <Function Name="Compute"><ReturnType Type="Edm.Int32"/></Function>
  <Annotations Target="R.Compute/$ReturnType">
    <Annotation Term="R.Tip">
      <Record Type="R.Hint"><PropertyValue Property="Text" String="result"/></Record>
    </Annotation>
  </Annotations>
</Schema>"#,
    );
    let compute = model.find_operations("R.Compute")[0];
    let found = model.find_vocabulary_annotations(AnnotationTarget::ReturnType(compute));
    assert_eq!(found.len(), 1);

    let Some(Expression::Record {
        type_id,
        properties,
    }) = found[0].value()
    else {
        panic!("expected a record");
    };
    assert_eq!(*type_id, model.find_declared_type("R.Hint"));
    assert_eq!(properties[0].property, "Text");
    assert_eq!(properties[0].value, Expression::String("result".into()));
}
