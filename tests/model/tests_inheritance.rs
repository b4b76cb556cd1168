//! Base type chains, derived type queries and cyclic inheritance.

use std::sync::Arc;

use edm::semantic::{EdmErrorCode, NamedElement};

use crate::helpers::fixtures::{CYCLE_XML, FORWARD_BASE_XML, SALES_XML};
use crate::helpers::model_helpers::*;

#[test]
fn test_base_types_nearest_first() {
    let model = model_from_xml(SALES_XML);
    let vip = type_named(&model, "Sales.VipCustomer");
    let bases: Vec<_> = model.base_types(vip).collect();
    assert_eq!(sorted_names(&model, &bases[..1]), vec!["Customer"]);
    assert_eq!(sorted_names(&model, &bases[1..]), vec!["Person"]);
}

#[test]
fn test_base_type_declared_later_resolves() {
    let model = model_from_xml(FORWARD_BASE_XML);
    let customer = type_named(&model, "NS.Customer");
    let base = model.schema_type(customer).base_type().expect("base type");

    assert_eq!(model.schema_type(base).name(), "Person");
    assert!(!model.schema_type(base).is_bad());
    assert!(!model.has_base_type_cycle(customer));
    assert_eq!(model.key(customer).len(), 1);
    assert!(model.errors().is_empty());
}

#[test]
fn test_find_directly_derived_types() {
    let model = model_from_xml(SALES_XML);
    let person = type_named(&model, "Sales.Person");
    let customer = type_named(&model, "Sales.Customer");

    let direct = model.find_directly_derived_types(person);
    assert_eq!(sorted_names(&model, &direct), vec!["Customer"]);
    let direct = model.find_directly_derived_types(customer);
    assert_eq!(sorted_names(&model, &direct), vec!["VipCustomer"]);
    let order = type_named(&model, "Sales.Order");
    assert!(model.find_directly_derived_types(order).is_empty());
}

#[test]
fn test_directly_derived_types_are_memoized() {
    let model = model_from_xml(SALES_XML);
    let person = type_named(&model, "Sales.Person");
    let first = model.find_directly_derived_types(person);
    let second = model.find_directly_derived_types(person);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_find_all_derived_types_is_transitive() {
    let model = model_from_xml(SALES_XML);
    let person = type_named(&model, "Sales.Person");
    let all = model.find_all_derived_types(person);
    assert_eq!(sorted_names(&model, &all), vec!["Customer", "VipCustomer"]);
}

#[test]
fn test_inherited_properties_come_first() {
    let model = model_from_xml(SALES_XML);
    let vip = type_named(&model, "Sales.VipCustomer");
    let names: Vec<String> = model
        .properties(vip)
        .iter()
        .map(|p| model.property(*p).name().to_string())
        .collect();
    assert_eq!(names, vec!["ID", "Name", "Tier", "Address", "Orders"]);
}

#[test]
fn test_key_is_inherited() {
    let model = model_from_xml(SALES_XML);
    let customer = type_named(&model, "Sales.Customer");
    let id = property_named(&model, "Sales.Person", "ID");
    assert!(model.schema_type(customer).declared_key().is_empty());
    assert_eq!(model.key(customer), [id]);
}

#[test]
fn test_is_or_inherits_from() {
    let model = model_from_xml(SALES_XML);
    let person = type_named(&model, "Sales.Person");
    let vip = type_named(&model, "Sales.VipCustomer");
    assert!(model.is_or_inherits_from(vip, person));
    assert!(model.is_or_inherits_from(person, person));
    assert!(!model.is_or_inherits_from(person, vip));
}

#[test]
fn test_base_type_cycle_terminates() {
    let model = model_from_xml(CYCLE_XML);
    let a = type_named(&model, "Loop.A");
    let c = type_named(&model, "Loop.C");

    let from_a: Vec<_> = model.self_and_base_types(a).collect();
    assert_eq!(sorted_names(&model, &from_a), vec!["A", "B"]);
    assert!(model.has_base_type_cycle(a));
    // C is not on the loop but walks into it.
    assert!(model.has_base_type_cycle(c));
    assert!(model.find_property(a, "Missing").is_none());
    assert!(model.properties(a).is_empty());
}

#[test]
fn test_derived_types_on_a_cycle_terminate() {
    let model = model_from_xml(CYCLE_XML);
    let a = type_named(&model, "Loop.A");
    let all = model.find_all_derived_types(a);
    assert_eq!(sorted_names(&model, &all), vec!["B", "C"]);
}

#[test]
fn test_cyclic_types_are_reported_once_each() {
    let model = model_from_xml(CYCLE_XML);
    let cyclic: Vec<String> = model
        .errors()
        .with_code(EdmErrorCode::BadCyclicEntity)
        .map(|e| e.message.to_string())
        .collect();

    // A, B and Self sit on a loop; C only reaches one.
    assert_eq!(cyclic.len(), 3);
    assert!(cyclic.iter().any(|m| m.contains("Loop.Self")));
    assert!(!cyclic.iter().any(|m| m.contains("Loop.C'")));
}

#[test]
fn test_self_derived_type_is_its_own_direct_derivation() {
    let model = model_from_xml(CYCLE_XML);
    let own = type_named(&model, "Loop.Self");
    let direct = model.find_directly_derived_types(own);
    assert_eq!(sorted_names(&model, &direct), vec!["Self"]);
    assert!(model.find_all_derived_types(own).is_empty());
}
