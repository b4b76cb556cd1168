//! CSDL JSON reader.
//!
//! Reads the OData 4.01 JSON representation of CSDL into the same AST the XML
//! reader produces. JSON documents carry no reliable line information after
//! parsing, so element locations are member paths such as `NS/Customer/ID`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::ReadOptions;
use super::ast::*;
use super::error::CsdlError;
use crate::base::Location;

type Object = Map<String, Value>;

/// Read a JSON CSDL document.
pub fn read_json(input: &[u8], options: &ReadOptions) -> Result<CsdlDocument, CsdlError> {
    let value: Value = serde_json::from_slice(input).map_err(|e| {
        CsdlError::json(format!("{e} (line {}, column {})", e.line(), e.column()))
    })?;
    JsonReader::new(options).read(&value)
}

/// Read a JSON CSDL document from a string.
pub fn read_json_str(input: &str, options: &ReadOptions) -> Result<CsdlDocument, CsdlError> {
    read_json(input.as_bytes(), options)
}

struct JsonReader<'a> {
    options: &'a ReadOptions,
    document: Option<Arc<str>>,
}

impl<'a> JsonReader<'a> {
    fn new(options: &'a ReadOptions) -> Self {
        Self {
            options,
            document: options.document_name.as_deref().map(Arc::from),
        }
    }

    fn read(&self, value: &Value) -> Result<CsdlDocument, CsdlError> {
        let root = as_object(value, "$")?;
        let mut document = CsdlDocument {
            name: self.document.clone(),
            version: string_member(root, "$Version", "$")?,
            ..CsdlDocument::default()
        };

        for (key, member) in root {
            match key.as_str() {
                "$Reference" => {
                    for (uri, reference) in as_object(member, "$Reference")? {
                        document
                            .references
                            .push(self.convert_reference(uri, reference)?);
                    }
                }
                k if k.starts_with('$') => {}
                namespace => {
                    let Value::Object(schema) = member else {
                        self.unexpected(namespace)?;
                        continue;
                    };
                    document.schemas.push(self.convert_schema(namespace, schema)?);
                }
            }
        }

        debug!(schemas = document.schemas.len(), "read CSDL JSON document");
        Ok(document)
    }

    fn unexpected(&self, path: &str) -> Result<(), CsdlError> {
        if self.options.strict {
            return Err(CsdlError::invalid_element(format!("unexpected member {path}")));
        }
        warn!(path, "skipping unexpected CSDL JSON member");
        Ok(())
    }

    fn convert_reference(&self, uri: &str, value: &Value) -> Result<CsdlReference, CsdlError> {
        let path = format!("$Reference/{uri}");
        let obj = as_object(value, &path)?;
        let mut includes = Vec::new();
        if let Some(list) = obj.get("$Include") {
            for include in as_array(list, &path)? {
                let include = as_object(include, &path)?;
                includes.push(CsdlInclude {
                    namespace: string_member(include, "$Namespace", &path)?.unwrap_or_default(),
                    alias: string_member(include, "$Alias", &path)?,
                });
            }
        }
        Ok(CsdlReference {
            uri: uri.to_string(),
            includes,
            location: Location::path(path),
        })
    }

    fn convert_schema(&self, namespace: &str, obj: &Object) -> Result<CsdlSchema, CsdlError> {
        let mut schema = CsdlSchema {
            namespace: namespace.to_string(),
            alias: string_member(obj, "$Alias", namespace)?,
            location: Location::path(namespace),
            ..CsdlSchema::default()
        };

        for (name, member) in obj {
            let path = format!("{namespace}/{name}");
            if name == "$Annotations" {
                for (target, block) in as_object(member, &path)? {
                    let block_path = format!("{path}/{target}");
                    schema.annotations.push(CsdlAnnotations {
                        target: target.clone(),
                        qualifier: None,
                        annotations: self.annotations_of(as_object(block, &block_path)?, &block_path)?,
                        location: Location::path(block_path),
                    });
                }
                continue;
            }
            if name.starts_with('$') || name.starts_with('@') {
                continue;
            }

            match member {
                // Function and action overloads are arrays.
                Value::Array(overloads) => {
                    for overload in overloads {
                        let op = as_object(overload, &path)?;
                        let kind = match kind_of(op, &path)?.as_deref() {
                            Some("Function") => CsdlElementKind::Function(self.convert_operation(op, &path)?),
                            Some("Action") => CsdlElementKind::Action(self.convert_operation(op, &path)?),
                            _ => {
                                self.unexpected(&path)?;
                                continue;
                            }
                        };
                        schema.elements.push(self.element(name, kind, op, &path)?);
                    }
                }
                Value::Object(el) => {
                    let kind = match kind_of(el, &path)?.as_deref() {
                        Some("EntityType") => {
                            CsdlElementKind::EntityType(self.convert_structured(el, &path)?)
                        }
                        Some("ComplexType") => {
                            CsdlElementKind::ComplexType(self.convert_structured(el, &path)?)
                        }
                        Some("EnumType") => CsdlElementKind::EnumType(self.convert_enum(el, &path)?),
                        Some("TypeDefinition") => {
                            CsdlElementKind::TypeDefinition(CsdlTypeDefinition {
                                underlying_type: string_member(el, "$UnderlyingType", &path)?
                                    .unwrap_or_default(),
                                facets: facets(el, &path)?,
                            })
                        }
                        Some("Term") => CsdlElementKind::Term(self.convert_term(el, &path)?),
                        Some("EntityContainer") => {
                            CsdlElementKind::EntityContainer(self.convert_container(el, &path)?)
                        }
                        _ => {
                            self.unexpected(&path)?;
                            continue;
                        }
                    };
                    schema.elements.push(self.element(name, kind, el, &path)?);
                }
                _ => self.unexpected(&path)?,
            }
        }

        Ok(schema)
    }

    fn element(
        &self,
        name: &str,
        kind: CsdlElementKind,
        obj: &Object,
        path: &str,
    ) -> Result<CsdlElement, CsdlError> {
        Ok(CsdlElement {
            name: name.to_string(),
            kind,
            annotations: self.annotations_of(obj, path)?,
            location: Location::path(path),
        })
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn convert_structured(&self, obj: &Object, path: &str) -> Result<CsdlStructuredType, CsdlError> {
        let mut ty = CsdlStructuredType {
            base_type: string_member(obj, "$BaseType", path)?,
            is_abstract: bool_member(obj, "$Abstract", path)?.unwrap_or(false),
            is_open: bool_member(obj, "$OpenType", path)?.unwrap_or(false),
            has_stream: bool_member(obj, "$HasStream", path)?.unwrap_or(false),
            ..CsdlStructuredType::default()
        };

        if let Some(key) = obj.get("$Key") {
            let key_path = format!("{path}/$Key");
            for entry in as_array(key, &key_path)? {
                match entry {
                    Value::String(name) => ty.key.push(CsdlPropertyRef {
                        name: name.clone(),
                        alias: None,
                        location: Location::path(key_path.clone()),
                    }),
                    // `{ "Alias": "Path/To/Property" }`
                    Value::Object(aliased) => {
                        for (alias, target) in aliased {
                            ty.key.push(CsdlPropertyRef {
                                name: target.as_str().unwrap_or_default().to_string(),
                                alias: Some(alias.clone()),
                                location: Location::path(key_path.clone()),
                            });
                        }
                    }
                    _ => return Err(invalid(&key_path, "key entries must be strings")),
                }
            }
        }

        for (name, member) in obj {
            if name.starts_with('$') || name.contains('@') {
                continue;
            }
            let member_path = format!("{path}/{name}");
            let member_obj = as_object(member, &member_path)?;
            match kind_of(member_obj, &member_path)?.as_deref() {
                None | Some("Property") => ty.properties.push(CsdlProperty {
                    name: name.clone(),
                    type_name: type_name(member_obj, &member_path)?,
                    facets: facets(member_obj, &member_path)?,
                    default_value: scalar_member(member_obj, "$DefaultValue"),
                    annotations: self.annotations_of(member_obj, &member_path)?,
                    location: Location::path(member_path),
                }),
                Some("NavigationProperty") => {
                    let mut referential_constraints = Vec::new();
                    if let Some(rc) = member_obj.get("$ReferentialConstraint") {
                        for (property, referenced) in as_object(rc, &member_path)? {
                            referential_constraints.push(CsdlReferentialConstraint {
                                property: property.clone(),
                                referenced_property: referenced
                                    .as_str()
                                    .unwrap_or_default()
                                    .to_string(),
                                location: Location::path(format!(
                                    "{member_path}/$ReferentialConstraint/{property}"
                                )),
                            });
                        }
                    }
                    ty.navigation_properties.push(CsdlNavigationProperty {
                        name: name.clone(),
                        type_name: type_name(member_obj, &member_path)?,
                        nullable: bool_member(member_obj, "$Nullable", &member_path)?,
                        partner: string_member(member_obj, "$Partner", &member_path)?,
                        contains_target: bool_member(member_obj, "$ContainsTarget", &member_path)?
                            .unwrap_or(false),
                        on_delete: match member_obj.get("$OnDelete") {
                            Some(Value::String(action)) => Some(action.clone()),
                            Some(Value::Object(on_delete)) => {
                                string_member(on_delete, "$Action", &member_path)?
                            }
                            _ => None,
                        },
                        referential_constraints,
                        annotations: self.annotations_of(member_obj, &member_path)?,
                        location: Location::path(member_path),
                    });
                }
                Some(_) => self.unexpected(&member_path)?,
            }
        }

        Ok(ty)
    }

    fn convert_enum(&self, obj: &Object, path: &str) -> Result<CsdlEnumType, CsdlError> {
        let mut members = Vec::new();
        for (name, value) in obj {
            if name.starts_with('$') || name.contains('@') {
                continue;
            }
            let member_path = format!("{path}/{name}");
            let value = value
                .as_i64()
                .ok_or_else(|| invalid(&member_path, "enum member values must be integers"))?;
            let member_annotations = obj
                .iter()
                .filter_map(|(k, v)| {
                    k.strip_prefix(name.as_str())
                        .and_then(|rest| rest.strip_prefix('@'))
                        .map(|term| (term, v))
                })
                .map(|(term, v)| self.annotation(term, v, &member_path))
                .collect::<Result<Vec<_>, _>>()?;
            members.push(CsdlEnumMember {
                name: name.clone(),
                value: Some(value),
                annotations: member_annotations,
                location: Location::path(member_path),
            });
        }
        Ok(CsdlEnumType {
            underlying_type: string_member(obj, "$UnderlyingType", path)?,
            is_flags: bool_member(obj, "$IsFlags", path)?.unwrap_or(false),
            members,
        })
    }

    // ------------------------------------------------------------------------
    // Operations and terms
    // ------------------------------------------------------------------------

    fn convert_operation(&self, obj: &Object, path: &str) -> Result<CsdlOperation, CsdlError> {
        let mut parameters = Vec::new();
        if let Some(list) = obj.get("$Parameter") {
            for (i, param) in as_array(list, path)?.iter().enumerate() {
                let param_path = format!("{path}/$Parameter/{i}");
                let param = as_object(param, &param_path)?;
                parameters.push(CsdlParameter {
                    name: string_member(param, "$Name", &param_path)?.unwrap_or_default(),
                    type_name: type_name(param, &param_path)?,
                    facets: facets(param, &param_path)?,
                    annotations: self.annotations_of(param, &param_path)?,
                    location: Location::path(param_path),
                });
            }
        }

        let return_type = match obj.get("$ReturnType") {
            Some(ret) => {
                let ret_path = format!("{path}/$ReturnType");
                let ret = as_object(ret, &ret_path)?;
                Some(CsdlReturnType {
                    type_name: type_name(ret, &ret_path)?,
                    facets: facets(ret, &ret_path)?,
                    location: Location::path(ret_path),
                })
            }
            None => None,
        };

        Ok(CsdlOperation {
            is_bound: bool_member(obj, "$IsBound", path)?.unwrap_or(false),
            is_composable: bool_member(obj, "$IsComposable", path)?.unwrap_or(false),
            entity_set_path: string_member(obj, "$EntitySetPath", path)?,
            parameters,
            return_type,
        })
    }

    fn convert_term(&self, obj: &Object, path: &str) -> Result<CsdlTerm, CsdlError> {
        let applies_to = match obj.get("$AppliesTo") {
            Some(list) => as_array(list, path)?
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };
        Ok(CsdlTerm {
            type_name: type_name(obj, path)?,
            facets: facets(obj, path)?,
            base_term: string_member(obj, "$BaseTerm", path)?,
            applies_to,
            default_value: scalar_member(obj, "$DefaultValue"),
        })
    }

    // ------------------------------------------------------------------------
    // Entity container
    // ------------------------------------------------------------------------

    fn convert_container(&self, obj: &Object, path: &str) -> Result<CsdlEntityContainer, CsdlError> {
        let mut container = CsdlEntityContainer {
            extends: string_member(obj, "$Extends", path)?,
            ..CsdlEntityContainer::default()
        };

        for (name, member) in obj {
            if name.starts_with('$') || name.contains('@') {
                continue;
            }
            let child_path = format!("{path}/{name}");
            let child = as_object(member, &child_path)?;
            let annotations = self.annotations_of(child, &child_path)?;
            let location = Location::path(child_path.clone());

            if let Some(function) = string_member(child, "$Function", &child_path)? {
                container.operation_imports.push(CsdlOperationImport {
                    name: name.clone(),
                    kind: CsdlImportKind::Function,
                    operation: function,
                    entity_set: string_member(child, "$EntitySet", &child_path)?,
                    include_in_service_document: bool_member(
                        child,
                        "$IncludeInServiceDocument",
                        &child_path,
                    )?
                    .unwrap_or(false),
                    annotations,
                    location,
                });
            } else if let Some(action) = string_member(child, "$Action", &child_path)? {
                container.operation_imports.push(CsdlOperationImport {
                    name: name.clone(),
                    kind: CsdlImportKind::Action,
                    operation: action,
                    entity_set: string_member(child, "$EntitySet", &child_path)?,
                    include_in_service_document: false,
                    annotations,
                    location,
                });
            } else if bool_member(child, "$Collection", &child_path)?.unwrap_or(false) {
                container.entity_sets.push(CsdlEntitySet {
                    name: name.clone(),
                    entity_type: string_member(child, "$Type", &child_path)?.unwrap_or_default(),
                    include_in_service_document: bool_member(
                        child,
                        "$IncludeInServiceDocument",
                        &child_path,
                    )?
                    .unwrap_or(true),
                    bindings: bindings(child, &child_path)?,
                    annotations,
                    location,
                });
            } else {
                container.singletons.push(CsdlSingleton {
                    name: name.clone(),
                    type_name: string_member(child, "$Type", &child_path)?.unwrap_or_default(),
                    bindings: bindings(child, &child_path)?,
                    annotations,
                    location,
                });
            }
        }

        Ok(container)
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    /// Collect `@Term#Qualifier` members of an object.
    fn annotations_of(&self, obj: &Object, path: &str) -> Result<Vec<CsdlAnnotation>, CsdlError> {
        obj.iter()
            .filter_map(|(key, value)| key.strip_prefix('@').map(|term| (term, value)))
            .map(|(term, value)| self.annotation(term, value, path))
            .collect()
    }

    fn annotation(&self, key: &str, value: &Value, path: &str) -> Result<CsdlAnnotation, CsdlError> {
        let (term, qualifier) = match key.split_once('#') {
            Some((term, qualifier)) => (term, Some(qualifier.to_string())),
            None => (key, None),
        };
        let annotation_path = format!("{path}/@{key}");
        Ok(CsdlAnnotation {
            term: term.to_string(),
            qualifier,
            value: Some(expression(value, &annotation_path)?),
            location: Location::path(annotation_path),
        })
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn invalid(path: &str, message: &str) -> CsdlError {
    CsdlError::invalid_element(format!("{path}: {message}"))
}

fn as_object<'v>(value: &'v Value, path: &str) -> Result<&'v Object, CsdlError> {
    value
        .as_object()
        .ok_or_else(|| invalid(path, "expected a JSON object"))
}

fn as_array<'v>(value: &'v Value, path: &str) -> Result<&'v Vec<Value>, CsdlError> {
    value
        .as_array()
        .ok_or_else(|| invalid(path, "expected a JSON array"))
}

fn kind_of(obj: &Object, path: &str) -> Result<Option<String>, CsdlError> {
    string_member(obj, "$Kind", path)
}

fn string_member(obj: &Object, key: &str, path: &str) -> Result<Option<String>, CsdlError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(path, &format!("{key} must be a string"))),
    }
}

fn bool_member(obj: &Object, key: &str, path: &str) -> Result<Option<bool>, CsdlError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(path, &format!("{key} must be a boolean"))),
    }
}

/// A scalar member rendered as text (`$DefaultValue`, `$MaxLength`, ...).
fn scalar_member(obj: &Object, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `$Type` (default `Edm.String`) wrapped in `Collection(...)` when
/// `$Collection` is set.
fn type_name(obj: &Object, path: &str) -> Result<String, CsdlError> {
    let base = string_member(obj, "$Type", path)?.unwrap_or_else(|| "Edm.String".to_string());
    if bool_member(obj, "$Collection", path)?.unwrap_or(false) {
        Ok(format!("Collection({base})"))
    } else {
        Ok(base)
    }
}

fn facets(obj: &Object, path: &str) -> Result<CsdlFacets, CsdlError> {
    let precision = match obj.get("$Precision") {
        None => None,
        Some(v) => Some(
            v.as_u64()
                .and_then(|p| u32::try_from(p).ok())
                .ok_or_else(|| invalid(path, "$Precision must be a non-negative integer"))?,
        ),
    };
    Ok(CsdlFacets {
        nullable: bool_member(obj, "$Nullable", path)?,
        max_length: scalar_member(obj, "$MaxLength"),
        precision,
        scale: scalar_member(obj, "$Scale"),
        unicode: bool_member(obj, "$Unicode", path)?,
        srid: scalar_member(obj, "$SRID"),
    })
}

fn bindings(obj: &Object, path: &str) -> Result<Vec<CsdlNavigationBinding>, CsdlError> {
    let Some(map) = obj.get("$NavigationPropertyBinding") else {
        return Ok(Vec::new());
    };
    let binding_path = format!("{path}/$NavigationPropertyBinding");
    as_object(map, &binding_path)?
        .iter()
        .map(|(nav_path, target)| {
            Ok(CsdlNavigationBinding {
                path: nav_path.clone(),
                target: target
                    .as_str()
                    .ok_or_else(|| invalid(&binding_path, "binding targets must be strings"))?
                    .to_string(),
                location: Location::path(format!("{binding_path}/{nav_path}")),
            })
        })
        .collect()
}

/// Convert an annotation value to an expression.
fn expression(value: &Value, path: &str) -> Result<CsdlExpression, CsdlError> {
    Ok(match value {
        Value::Null => CsdlExpression::Null,
        Value::Bool(b) => CsdlExpression::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CsdlExpression::Int(i),
            None => CsdlExpression::Float(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => CsdlExpression::String(s.clone()),
        Value::Array(items) => CsdlExpression::Collection(
            items
                .iter()
                .map(|item| expression(item, path))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(obj) => {
            let path_expressions: [(&str, fn(String) -> CsdlExpression); 4] = [
                ("$Path", CsdlExpression::Path),
                ("$PropertyPath", CsdlExpression::PropertyPath),
                ("$NavigationPropertyPath", CsdlExpression::NavigationPropertyPath),
                ("$AnnotationPath", CsdlExpression::AnnotationPath),
            ];
            for (keyword, ctor) in path_expressions {
                if let Some(p) = string_member(obj, keyword, path)? {
                    return Ok(ctor(p));
                }
            }
            let type_name = string_member(obj, "@type", path)?
                .or(string_member(obj, "@odata.type", path)?)
                .map(|t| t.trim_start_matches('#').to_string());
            let properties = obj
                .iter()
                .filter(|(k, _)| !k.starts_with('@') && !k.starts_with('$') && !k.contains('@'))
                .map(|(k, v)| {
                    let property_path = format!("{path}/{k}");
                    Ok(CsdlPropertyValue {
                        property: k.clone(),
                        value: expression(v, &property_path)?,
                        location: Location::path(property_path),
                    })
                })
                .collect::<Result<Vec<_>, CsdlError>>()?;
            CsdlExpression::Record {
                type_name,
                properties,
            }
        }
    })
}
