//! Declarations, type references and container contents of a well-formed
//! model.

use edm::semantic::{
    EntityContainer, NamedElement, OnDeleteAction, OperationKind, PrimitiveTypeKind,
    SchemaElement, TypeDefinition, TypeKind,
};
use rstest::rstest;

use crate::helpers::fixtures::{DUPLICATE_TYPE_XML, SALES_XML};
use crate::helpers::model_helpers::*;

#[test]
fn test_sales_model_has_no_errors() {
    let model = model_from_xml(SALES_XML);
    let errors = model.errors();
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors.errors());
}

#[test]
fn test_declared_namespaces_exclude_aliases_and_repeats() {
    let sales = model_from_xml(SALES_XML);
    assert_eq!(sales.declared_namespaces().collect::<Vec<_>>(), vec!["Sales"]);

    let duplicated = model_from_xml(DUPLICATE_TYPE_XML);
    assert_eq!(duplicated.declared_namespaces().collect::<Vec<_>>(), vec!["Dup"]);
}

#[rstest]
#[case("Sales.Person", TypeKind::Entity)]
#[case("Sales.Customer", TypeKind::Entity)]
#[case("S.VipCustomer", TypeKind::Entity)]
#[case("Sales.Address", TypeKind::Complex)]
#[case("Sales.Tier", TypeKind::Enum)]
#[case("S.Money", TypeKind::TypeDefinition)]
fn test_find_declared_type_kinds(#[case] name: &str, #[case] kind: TypeKind) {
    let model = model_from_xml(SALES_XML);
    let id = type_named(&model, name);
    assert_eq!(model.type_kind(id), kind);
    assert!(model.schema_type(id).full_name().starts_with("Sales."));
}

#[test]
fn test_unknown_type_is_not_found() {
    let model = model_from_xml(SALES_XML);
    assert_eq!(model.find_declared_type("Sales.Nothing"), None);
    assert_eq!(model.find_declared_type("Nothing"), None);
}

#[test]
fn test_declared_types_in_declaration_order() {
    let model = model_from_xml(SALES_XML);
    let names: Vec<String> = model
        .declared_types()
        .map(|(_, t)| t.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Person", "Customer", "VipCustomer", "Order", "Address", "Tier", "Money"]
    );
}

#[test]
fn test_anonymous_types_are_built_but_not_registered() {
    let model = model_from_xml(
        r#"<Schema Namespace="Anon" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <ComplexType Name=""><Property Name="Value" Type="Edm.String"/></ComplexType>
  <ComplexType Name="Named"/>
</Schema>"#,
    );

    assert_eq!(model.declared_types().count(), 2);
    assert!(model.find_declared_type("Anon.").is_none());
    assert!(model.find_declared_type("Anon.Named").is_some());
    assert!(model.errors().is_empty());
}

#[test]
fn test_structural_property_types_and_facets() {
    let model = model_from_xml(SALES_XML);

    let id = property_named(&model, "Sales.Person", "ID");
    let type_ref = model.property(id).type_ref();
    assert_eq!(type_ref.definition, TypeDefinition::Primitive(PrimitiveTypeKind::Int32));
    assert!(!type_ref.nullable);

    let name = property_named(&model, "Sales.Person", "Name");
    let type_ref = model.property(name).type_ref();
    assert!(type_ref.nullable);
    assert_eq!(type_ref.facets.max_length.as_deref(), Some("100"));

    let tier = property_named(&model, "Sales.Customer", "Tier");
    let tier_type = model.property(tier).type_ref().schema_type();
    assert_eq!(tier_type, model.find_declared_type("Sales.Tier"));
}

#[test]
fn test_collection_nullable_applies_to_element() {
    let model = model_from_xml(SALES_XML);
    let tags = property_named(&model, "Sales.Order", "Tags");
    let type_ref = model.property(tags).type_ref();

    assert!(type_ref.is_collection());
    assert!(!type_ref.nullable);
    let TypeDefinition::Collection(element) = &type_ref.definition else {
        panic!("expected a collection");
    };
    assert!(!element.nullable);
    assert_eq!(
        element.definition,
        TypeDefinition::Primitive(PrimitiveTypeKind::String)
    );
    assert_eq!(model.type_reference_kind(type_ref), TypeKind::Collection);
}

#[test]
fn test_enum_member_values_continue_from_previous() {
    let model = model_from_xml(SALES_XML);
    let tier = type_named(&model, "Sales.Tier");
    let tier = model.schema_type(tier).as_enum().expect("enum");

    let values: Vec<(&str, i64)> = tier.members().iter().map(|m| (m.name.as_str(), m.value)).collect();
    assert_eq!(
        values,
        vec![("Bronze", 0), ("Silver", 1), ("Gold", 10), ("Platinum", 11)]
    );
    assert_eq!(
        tier.underlying_type().definition,
        TypeDefinition::Primitive(PrimitiveTypeKind::Int32)
    );
    assert!(!tier.is_flags());
}

#[test]
fn test_type_definition_underlying_type() {
    let model = model_from_xml(SALES_XML);
    let money = type_named(&model, "Sales.Money");
    let money = model.schema_type(money).as_type_definition().expect("type definition");
    let underlying = money.underlying_type();
    assert_eq!(
        underlying.definition,
        TypeDefinition::Primitive(PrimitiveTypeKind::Decimal)
    );
    assert_eq!(underlying.facets.precision, Some(18));
    assert_eq!(underlying.facets.scale.as_deref(), Some("2"));
}

#[test]
fn test_navigation_property_details() {
    let model = model_from_xml(SALES_XML);
    let orders = property_named(&model, "Sales.Customer", "Orders");
    let customer = property_named(&model, "Sales.Order", "Customer");

    let nav = model.property(orders).as_navigation().expect("navigation");
    assert!(nav.is_collection());
    assert_eq!(nav.target_type(), model.find_declared_type("Sales.Order"));
    assert_eq!(nav.partner(), Some(customer));

    let back = model.property(customer).as_navigation().expect("navigation");
    assert!(!back.is_collection());
    assert_eq!(back.partner(), Some(orders));
    assert_eq!(back.on_delete(), Some(OnDeleteAction::Cascade));

    let constraint = &back.referential_constraints()[0];
    assert_eq!(constraint.property, property_named(&model, "Sales.Order", "CustomerID"));
    assert_eq!(
        constraint.referenced_property,
        property_named(&model, "Sales.Person", "ID")
    );
}

#[test]
fn test_terms_are_declared() {
    let model = model_from_xml(SALES_XML);
    let label = model.find_declared_term("S.Label").expect("term");
    let decl = model.term(label).as_declared().expect("declared");
    let applies_to: Vec<&str> = decl.applies_to().iter().map(|s| s.as_str()).collect();
    assert_eq!(applies_to, vec!["EntityType", "Property"]);
    assert_eq!(
        model.term(label).type_ref().definition,
        TypeDefinition::Primitive(PrimitiveTypeKind::String)
    );

    let level = model.find_declared_term("Sales.Level").expect("term");
    assert_eq!(
        model.term(level).type_ref().schema_type(),
        model.find_declared_type("Sales.Tier")
    );
}

#[test]
fn test_operation_overloads_are_kept() {
    let model = model_from_xml(SALES_XML);
    let overloads = model.find_operations("Sales.TopOrders");
    assert_eq!(overloads.len(), 2);
    for id in &overloads {
        let op = model.operation(*id);
        assert_eq!(op.kind(), Some(OperationKind::Function));
        assert!(op.is_bound());
        assert!(op.return_type().is_some_and(|r| r.is_collection()));
    }
    assert_eq!(model.operation(overloads[0]).parameters().len(), 2);
    assert_eq!(model.operation(overloads[1]).parameters().len(), 1);
}

#[test]
fn test_entity_container_contents() {
    let model = model_from_xml(SALES_XML);
    let container = model.entity_container().expect("container");
    assert_eq!(model.find_entity_container("Sales.Container"), Some(container));
    assert_eq!(model.find_entity_container("Container"), Some(container));

    assert!(matches!(model.container(container), EntityContainer::Declared(_)));
    assert_eq!(model.container(container).full_name(), "Sales.Container");
    assert_eq!(model.container(container).navigation_sources().len(), 3);

    let customers = model.find_entity_set("Customers").expect("entity set");
    assert_eq!(
        model.navigation_source(customers).entity_type(),
        model.find_declared_type("Sales.Customer")
    );
    assert!(model.find_singleton("Best").is_some());
    assert_eq!(model.find_entity_set("Best"), None);
}

#[test]
fn test_operation_imports_resolve_unbound_overloads() {
    let model = model_from_xml(SALES_XML);

    let get_best = model.find_operation_imports("GetBest");
    assert_eq!(get_best.len(), 1);
    let import = model.operation_import(get_best[0]).expect("import");
    assert_eq!(import.kind(), OperationKind::Function);
    assert_eq!(model.operation(import.operation()).name(), "BestCustomer");
    assert_eq!(import.entity_set(), model.find_entity_set("Customers"));

    let reset = model.find_operation_imports("ResetAll");
    let import = model.operation_import(reset[0]).expect("import");
    assert_eq!(import.kind(), OperationKind::Action);
    assert!(!model.operation(import.operation()).is_bad());
}

#[test]
fn test_json_and_xml_build_the_same_shape() {
    use crate::helpers::fixtures::SALES_JSON;
    let from_json = edm::semantic::Model::from_json_str(SALES_JSON).expect("model");
    let from_xml = model_from_xml(SALES_XML);

    for name in ["Sales.Person", "Sales.Customer", "Sales.Order", "Sales.Address"] {
        let a = type_named(&from_json, name);
        let b = type_named(&from_xml, name);
        let props = |m: &edm::semantic::Model, id| -> Vec<String> {
            m.properties(id)
                .iter()
                .map(|p| m.property(*p).name().to_string())
                .collect()
        };
        assert_eq!(props(&from_json, a), props(&from_xml, b), "{name}");
    }
    assert!(from_json.errors().is_empty(), "{:?}", from_json.errors().errors());
}
