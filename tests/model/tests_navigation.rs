//! Navigation property bindings and target lookup.

use edm::semantic::{EdmErrorCode, NamedElement};

use crate::helpers::fixtures::SALES_XML;
use crate::helpers::model_helpers::*;

#[test]
fn test_find_navigation_target_follows_binding() {
    let model = model_from_xml(SALES_XML);
    let customers = source_named(&model, "Customers");
    let orders = source_named(&model, "Orders");
    let orders_nav = property_named(&model, "Sales.Customer", "Orders");
    let customer_nav = property_named(&model, "Sales.Order", "Customer");

    assert_eq!(model.find_navigation_target(customers, orders_nav), Some(orders));
    assert_eq!(model.find_navigation_target(orders, customer_nav), Some(customers));
}

#[test]
fn test_singleton_binds_inherited_navigation_property() {
    let model = model_from_xml(SALES_XML);
    let best = source_named(&model, "Best");
    let orders = source_named(&model, "Orders");
    let orders_nav = property_named(&model, "Sales.Customer", "Orders");

    assert!(model.navigation_source(best).is_singleton());
    assert_eq!(model.find_navigation_target(best, orders_nav), Some(orders));
}

#[test]
fn test_unbound_navigation_property_has_no_target() {
    let model = model_from_xml(SALES_XML);
    let orders = source_named(&model, "Orders");
    let orders_nav = property_named(&model, "Sales.Customer", "Orders");
    assert_eq!(model.find_navigation_target(orders, orders_nav), None);
}

#[test]
fn test_binding_records_path_as_written() {
    let model = model_from_xml(SALES_XML);
    let customers = source_named(&model, "Customers");
    let bindings = model.navigation_source(customers).bindings();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].path, "Orders");
}

const CONTAINED_XML: &str = r#"<Schema Namespace="Nav" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityType Name="Item">
    <Key><PropertyRef Name="ID"/></Key>
    <Property Name="ID" Type="Edm.Int32" Nullable="false"/>
    <NavigationProperty Name="Related" Type="Collection(Nav.Item)"/>
  </EntityType>
  <EntityType Name="Special" BaseType="Nav.Item">
    <NavigationProperty Name="Extra" Type="Nav.Item"/>
  </EntityType>
  <EntityContainer Name="Base">
    <EntitySet Name="Archive" EntityType="Nav.Item"/>
  </EntityContainer>
</Schema>"#;

const EXTENDING_XML: &str = r#"<Schema Namespace="Ext" xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EntityContainer Name="Service" Extends="Nav.Base">
    <EntitySet Name="Items" EntityType="Nav.Item">
      <NavigationPropertyBinding Path="Related" Target="Nav.Base/Archive"/>
      <NavigationPropertyBinding Path="Nav.Special/Extra" Target="Items"/>
      <NavigationPropertyBinding Path="ID" Target="Items"/>
    </EntitySet>
  </EntityContainer>
</Schema>"#;

#[test]
fn test_binding_targets_in_extended_container_and_type_cast_paths() {
    let base = std::sync::Arc::new(model_from_xml(CONTAINED_XML));
    let model = model_with_references(EXTENDING_XML, &[base.clone()]);

    let items = source_named(&model, "Items");
    let archive = base.find_navigation_source("Archive").expect("archive");
    let related = property_named(&model, "Nav.Item", "Related");
    let extra = property_named(&model, "Nav.Special", "Extra");

    assert_eq!(model.find_navigation_target(items, related), Some(archive));
    assert_eq!(model.find_navigation_target(items, extra), Some(items));
    // Archive is reachable through Extends.
    assert_eq!(model.find_navigation_source("Archive"), Some(archive));
}

#[test]
fn test_binding_path_to_structural_property_is_unresolved() {
    let base = std::sync::Arc::new(model_from_xml(CONTAINED_XML));
    let model = model_with_references(EXTENDING_XML, &[base]);

    let items = source_named(&model, "Items");
    let bad = &model.navigation_source(items).bindings()[2];
    let property = model.property(bad.navigation_property);
    assert!(property.is_bad());
    assert_eq!(
        property.errors()[0].code,
        EdmErrorCode::BadUnresolvedNavigationPropertyPath
    );
}
