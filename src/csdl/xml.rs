//! CSDL XML reader.
//!
//! Reads `edmx:Edmx` documents (or a bare `Schema`) into the CSDL AST.
//! The reader first streams the XML into a small element tree, recording
//! line/column positions, and then converts that tree into typed AST nodes.
//! Namespace prefixes are ignored; elements are matched by local name.

use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use super::ReadOptions;
use super::ast::*;
use super::error::CsdlError;
use crate::base::{LineIndex, Location, Span};

/// Read a CSDL XML document.
pub fn read_xml(input: &[u8], options: &ReadOptions) -> Result<CsdlDocument, CsdlError> {
    XmlReader::new(input, options).read()
}

/// Read a CSDL XML document from a string.
pub fn read_xml_str(input: &str, options: &ReadOptions) -> Result<CsdlDocument, CsdlError> {
    read_xml(input.as_bytes(), options)
}

// ============================================================================
// ELEMENT TREE
// ============================================================================

/// A parsed XML element with its local name, attributes and children.
#[derive(Debug)]
struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
    span: Span,
}

impl XmlNode {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn attr_or_empty(&self, key: &str) -> String {
        self.attr(key).unwrap_or_default().to_string()
    }

    fn opt_attr(&self, key: &str) -> Option<String> {
        self.attr(key).map(str::to_string)
    }

    fn bool_attr(&self, key: &str) -> Result<Option<bool>, CsdlError> {
        match self.attr(key) {
            None => Ok(None),
            Some("true") | Some("1") => Ok(Some(true)),
            Some("false") | Some("0") => Ok(Some(false)),
            Some(other) => Err(CsdlError::invalid_attribute(format!(
                "{key}=\"{other}\" on <{}> at line {} is not a boolean",
                self.name, self.span.start.line
            ))),
        }
    }

    fn parsed_attr<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, CsdlError> {
        match self.attr(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                CsdlError::invalid_attribute(format!(
                    "{key}=\"{raw}\" on <{}> at line {} is malformed",
                    self.name, self.span.start.line
                ))
            }),
        }
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

// ============================================================================
// XML READER
// ============================================================================

/// CSDL XML reader.
struct XmlReader<'a> {
    input: &'a [u8],
    options: &'a ReadOptions,
    line_index: LineIndex<'a>,
    document: Option<Arc<str>>,
}

impl<'a> XmlReader<'a> {
    fn new(input: &'a [u8], options: &'a ReadOptions) -> Self {
        Self {
            input,
            options,
            line_index: LineIndex::new(input),
            document: options.document_name.as_deref().map(Arc::from),
        }
    }

    fn read(&self) -> Result<CsdlDocument, CsdlError> {
        let root = self.read_tree()?;
        let mut document = CsdlDocument {
            name: self.document.clone(),
            ..CsdlDocument::default()
        };

        match root.name.as_str() {
            "Edmx" => {
                document.version = root.opt_attr("Version");
                for child in &root.children {
                    match child.name.as_str() {
                        "Reference" => document.references.push(self.convert_reference(child)),
                        "DataServices" => {
                            for schema in child.children_named("Schema") {
                                document.schemas.push(self.convert_schema(schema)?);
                            }
                        }
                        other => self.unexpected(other, child)?,
                    }
                }
            }
            "Schema" => document.schemas.push(self.convert_schema(&root)?),
            other => {
                return Err(CsdlError::invalid_element(format!(
                    "expected <edmx:Edmx> or <Schema> as document root, found <{other}>"
                )));
            }
        }

        debug!(
            schemas = document.schemas.len(),
            references = document.references.len(),
            "read CSDL XML document"
        );
        Ok(document)
    }

    /// Stream the input into an element tree.
    fn read_tree(&self) -> Result<XmlNode, CsdlError> {
        let mut reader = Reader::from_reader(self.input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            let offset = reader.buffer_position() as usize;
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(self.open_node(e, offset)?);
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing element - handle as start + end
                    let mut node = self.open_node(e, offset)?;
                    node.span.end = self.line_index.position(reader.buffer_position() as usize);
                    attach(node, &mut stack, &mut root);
                }
                Ok(Event::End(_)) => {
                    if let Some(mut node) = stack.pop() {
                        node.span.end = self.line_index.position(reader.buffer_position() as usize);
                        attach(node, &mut stack, &mut root);
                    }
                }
                Ok(Event::Text(ref t)) => {
                    if let Some(top) = stack.last_mut() {
                        let text = t
                            .unescape()
                            .map_err(|e| CsdlError::xml(format!("Text error: {e}")))?;
                        top.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref c)) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(c));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(CsdlError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(CsdlError::xml(format!(
                "unexpected end of document inside <{}>",
                stack.last().map(|n| n.name.as_str()).unwrap_or_default()
            )));
        }
        root.ok_or_else(|| CsdlError::xml("document has no root element"))
    }

    fn open_node(&self, e: &BytesStart<'_>, offset: usize) -> Result<XmlNode, CsdlError> {
        let local = e.local_name();
        let name = std::str::from_utf8(local.as_ref())
            .map_err(|e| CsdlError::xml(format!("Invalid tag name: {e}")))?
            .to_string();

        let mut attributes = Vec::new();
        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|e| CsdlError::xml(format!("Attribute error: {e}")))?;
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = std::str::from_utf8(attr.key.local_name().as_ref())
                .map_err(|e| CsdlError::xml(format!("Attribute key error: {e}")))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| CsdlError::xml(format!("Attribute value error: {e}")))?
                .to_string();
            attributes.push((key, value));
        }

        // The offset before an event may still point at skipped whitespace.
        let start = self.input[offset.min(self.input.len())..]
            .iter()
            .position(|b| *b == b'<')
            .map_or(offset, |skip| offset + skip);
        let position = self.line_index.position(start);

        Ok(XmlNode {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
            span: Span::point(position),
        })
    }

    fn location(&self, node: &XmlNode) -> Location {
        Location::source(self.document.clone(), node.span)
    }

    fn unexpected(&self, name: &str, node: &XmlNode) -> Result<(), CsdlError> {
        if self.options.strict {
            return Err(CsdlError::invalid_element(format!(
                "unexpected <{name}> at line {}",
                node.span.start.line
            )));
        }
        warn!(element = name, line = node.span.start.line, "skipping unexpected CSDL element");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Document structure
    // ------------------------------------------------------------------------

    fn convert_reference(&self, node: &XmlNode) -> CsdlReference {
        CsdlReference {
            uri: node.attr_or_empty("Uri"),
            includes: node
                .children_named("Include")
                .map(|include| CsdlInclude {
                    namespace: include.attr_or_empty("Namespace"),
                    alias: include.opt_attr("Alias"),
                })
                .collect(),
            location: self.location(node),
        }
    }

    fn convert_schema(&self, node: &XmlNode) -> Result<CsdlSchema, CsdlError> {
        let namespace = node
            .attr("Namespace")
            .ok_or_else(|| CsdlError::missing_attribute("Schema/@Namespace"))?;

        let mut schema = CsdlSchema {
            namespace: namespace.to_string(),
            alias: node.opt_attr("Alias"),
            location: self.location(node),
            ..CsdlSchema::default()
        };

        for child in &node.children {
            let kind = match child.name.as_str() {
                "EntityType" => CsdlElementKind::EntityType(self.convert_structured(child)?),
                "ComplexType" => CsdlElementKind::ComplexType(self.convert_structured(child)?),
                "EnumType" => CsdlElementKind::EnumType(self.convert_enum(child)?),
                "TypeDefinition" => CsdlElementKind::TypeDefinition(CsdlTypeDefinition {
                    underlying_type: child.attr_or_empty("UnderlyingType"),
                    facets: self.convert_facets(child)?,
                }),
                "Function" => CsdlElementKind::Function(self.convert_operation(child)?),
                "Action" => CsdlElementKind::Action(self.convert_operation(child)?),
                "Term" => CsdlElementKind::Term(self.convert_term(child)?),
                "EntityContainer" => {
                    CsdlElementKind::EntityContainer(self.convert_container(child)?)
                }
                "Annotations" => {
                    schema.annotations.push(self.convert_annotations(child)?);
                    continue;
                }
                other => {
                    self.unexpected(other, child)?;
                    continue;
                }
            };
            schema.elements.push(CsdlElement {
                name: child.attr_or_empty("Name"),
                kind,
                annotations: self.inline_annotations(child)?,
                location: self.location(child),
            });
        }

        Ok(schema)
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    fn convert_facets(&self, node: &XmlNode) -> Result<CsdlFacets, CsdlError> {
        Ok(CsdlFacets {
            nullable: node.bool_attr("Nullable")?,
            max_length: node.opt_attr("MaxLength"),
            precision: node.parsed_attr("Precision")?,
            scale: node.opt_attr("Scale"),
            unicode: node.bool_attr("Unicode")?,
            srid: node.opt_attr("SRID"),
        })
    }

    fn convert_structured(&self, node: &XmlNode) -> Result<CsdlStructuredType, CsdlError> {
        let mut ty = CsdlStructuredType {
            base_type: node.opt_attr("BaseType"),
            is_abstract: node.bool_attr("Abstract")?.unwrap_or(false),
            is_open: node.bool_attr("OpenType")?.unwrap_or(false),
            has_stream: node.bool_attr("HasStream")?.unwrap_or(false),
            ..CsdlStructuredType::default()
        };

        for child in &node.children {
            match child.name.as_str() {
                "Key" => {
                    ty.key.extend(child.children_named("PropertyRef").map(|r| CsdlPropertyRef {
                        name: r.attr_or_empty("Name"),
                        alias: r.opt_attr("Alias"),
                        location: self.location(r),
                    }));
                }
                "Property" => ty.properties.push(CsdlProperty {
                    name: child.attr_or_empty("Name"),
                    type_name: child.attr_or_empty("Type"),
                    facets: self.convert_facets(child)?,
                    default_value: child.opt_attr("DefaultValue"),
                    annotations: self.inline_annotations(child)?,
                    location: self.location(child),
                }),
                "NavigationProperty" => ty
                    .navigation_properties
                    .push(self.convert_navigation_property(child)?),
                "Annotation" => {}
                other => self.unexpected(other, child)?,
            }
        }

        Ok(ty)
    }

    fn convert_navigation_property(
        &self,
        node: &XmlNode,
    ) -> Result<CsdlNavigationProperty, CsdlError> {
        Ok(CsdlNavigationProperty {
            name: node.attr_or_empty("Name"),
            type_name: node.attr_or_empty("Type"),
            nullable: node.bool_attr("Nullable")?,
            partner: node.opt_attr("Partner"),
            contains_target: node.bool_attr("ContainsTarget")?.unwrap_or(false),
            on_delete: node
                .children_named("OnDelete")
                .next()
                .and_then(|d| d.opt_attr("Action")),
            referential_constraints: node
                .children_named("ReferentialConstraint")
                .map(|c| CsdlReferentialConstraint {
                    property: c.attr_or_empty("Property"),
                    referenced_property: c.attr_or_empty("ReferencedProperty"),
                    location: self.location(c),
                })
                .collect(),
            annotations: self.inline_annotations(node)?,
            location: self.location(node),
        })
    }

    fn convert_enum(&self, node: &XmlNode) -> Result<CsdlEnumType, CsdlError> {
        let mut members = Vec::new();
        for member in node.children_named("Member") {
            members.push(CsdlEnumMember {
                name: member.attr_or_empty("Name"),
                value: member.parsed_attr("Value")?,
                annotations: self.inline_annotations(member)?,
                location: self.location(member),
            });
        }
        Ok(CsdlEnumType {
            underlying_type: node.opt_attr("UnderlyingType"),
            is_flags: node.bool_attr("IsFlags")?.unwrap_or(false),
            members,
        })
    }

    // ------------------------------------------------------------------------
    // Operations and terms
    // ------------------------------------------------------------------------

    fn convert_operation(&self, node: &XmlNode) -> Result<CsdlOperation, CsdlError> {
        let mut parameters = Vec::new();
        for param in node.children_named("Parameter") {
            parameters.push(CsdlParameter {
                name: param.attr_or_empty("Name"),
                type_name: param.attr_or_empty("Type"),
                facets: self.convert_facets(param)?,
                annotations: self.inline_annotations(param)?,
                location: self.location(param),
            });
        }

        let return_type = match node.children_named("ReturnType").next() {
            Some(ret) => Some(CsdlReturnType {
                type_name: ret.attr_or_empty("Type"),
                facets: self.convert_facets(ret)?,
                location: self.location(ret),
            }),
            None => None,
        };

        Ok(CsdlOperation {
            is_bound: node.bool_attr("IsBound")?.unwrap_or(false),
            is_composable: node.bool_attr("IsComposable")?.unwrap_or(false),
            entity_set_path: node.opt_attr("EntitySetPath"),
            parameters,
            return_type,
        })
    }

    fn convert_term(&self, node: &XmlNode) -> Result<CsdlTerm, CsdlError> {
        Ok(CsdlTerm {
            type_name: node.attr_or_empty("Type"),
            facets: self.convert_facets(node)?,
            base_term: node.opt_attr("BaseTerm"),
            applies_to: node
                .attr("AppliesTo")
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            default_value: node.opt_attr("DefaultValue"),
        })
    }

    // ------------------------------------------------------------------------
    // Entity container
    // ------------------------------------------------------------------------

    fn convert_container(&self, node: &XmlNode) -> Result<CsdlEntityContainer, CsdlError> {
        let mut container = CsdlEntityContainer {
            extends: node.opt_attr("Extends"),
            ..CsdlEntityContainer::default()
        };

        for child in &node.children {
            match child.name.as_str() {
                "EntitySet" => container.entity_sets.push(CsdlEntitySet {
                    name: child.attr_or_empty("Name"),
                    entity_type: child.attr_or_empty("EntityType"),
                    include_in_service_document: child
                        .bool_attr("IncludeInServiceDocument")?
                        .unwrap_or(true),
                    bindings: self.convert_bindings(child),
                    annotations: self.inline_annotations(child)?,
                    location: self.location(child),
                }),
                "Singleton" => container.singletons.push(CsdlSingleton {
                    name: child.attr_or_empty("Name"),
                    type_name: child.attr_or_empty("Type"),
                    bindings: self.convert_bindings(child),
                    annotations: self.inline_annotations(child)?,
                    location: self.location(child),
                }),
                "FunctionImport" | "ActionImport" => {
                    let (kind, attr) = if child.name == "FunctionImport" {
                        (CsdlImportKind::Function, "Function")
                    } else {
                        (CsdlImportKind::Action, "Action")
                    };
                    container.operation_imports.push(CsdlOperationImport {
                        name: child.attr_or_empty("Name"),
                        kind,
                        operation: child.attr_or_empty(attr),
                        entity_set: child.opt_attr("EntitySet"),
                        include_in_service_document: child
                            .bool_attr("IncludeInServiceDocument")?
                            .unwrap_or(false),
                        annotations: self.inline_annotations(child)?,
                        location: self.location(child),
                    });
                }
                "Annotation" => {}
                other => self.unexpected(other, child)?,
            }
        }

        Ok(container)
    }

    fn convert_bindings(&self, node: &XmlNode) -> Vec<CsdlNavigationBinding> {
        node.children_named("NavigationPropertyBinding")
            .map(|b| CsdlNavigationBinding {
                path: b.attr_or_empty("Path"),
                target: b.attr_or_empty("Target"),
                location: self.location(b),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Annotations
    // ------------------------------------------------------------------------

    fn convert_annotations(&self, node: &XmlNode) -> Result<CsdlAnnotations, CsdlError> {
        Ok(CsdlAnnotations {
            target: node.attr_or_empty("Target"),
            qualifier: node.opt_attr("Qualifier"),
            annotations: self.inline_annotations(node)?,
            location: self.location(node),
        })
    }

    fn inline_annotations(&self, node: &XmlNode) -> Result<Vec<CsdlAnnotation>, CsdlError> {
        node.children_named("Annotation")
            .map(|a| self.convert_annotation(a))
            .collect()
    }

    fn convert_annotation(&self, node: &XmlNode) -> Result<CsdlAnnotation, CsdlError> {
        let value = match self.attribute_expression(node)? {
            Some(value) => Some(value),
            None => self.first_child_expression(node)?,
        };
        Ok(CsdlAnnotation {
            term: node.attr_or_empty("Term"),
            qualifier: node.opt_attr("Qualifier"),
            value,
            location: self.location(node),
        })
    }

    /// Constant expression written as an attribute, e.g. `String="..."`.
    fn attribute_expression(&self, node: &XmlNode) -> Result<Option<CsdlExpression>, CsdlError> {
        for (key, value) in &node.attributes {
            if let Some(expr) = constant_expression(key, value, node)? {
                return Ok(Some(expr));
            }
        }
        Ok(None)
    }

    fn first_child_expression(&self, node: &XmlNode) -> Result<Option<CsdlExpression>, CsdlError> {
        for child in &node.children {
            if child.name == "Annotation" {
                continue;
            }
            return self.element_expression(child).map(Some);
        }
        Ok(None)
    }

    /// Expression written as an element, e.g. `<Collection>`.
    fn element_expression(&self, node: &XmlNode) -> Result<CsdlExpression, CsdlError> {
        match node.name.as_str() {
            "Null" => Ok(CsdlExpression::Null),
            "Collection" => {
                let items = node
                    .children
                    .iter()
                    .filter(|c| c.name != "Annotation")
                    .map(|c| self.element_expression(c))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CsdlExpression::Collection(items))
            }
            "Record" => {
                let mut properties = Vec::new();
                for pv in node.children_named("PropertyValue") {
                    let value = match self.attribute_expression(pv)? {
                        Some(value) => value,
                        None => self
                            .first_child_expression(pv)?
                            .unwrap_or(CsdlExpression::Null),
                    };
                    properties.push(CsdlPropertyValue {
                        property: pv.attr_or_empty("Property"),
                        value,
                        location: self.location(pv),
                    });
                }
                Ok(CsdlExpression::Record {
                    type_name: node.opt_attr("Type"),
                    properties,
                })
            }
            other => constant_expression(other, node.text.trim(), node)?.ok_or_else(|| {
                CsdlError::invalid_element(format!(
                    "unsupported annotation expression <{other}> at line {}",
                    node.span.start.line
                ))
            }),
        }
    }
}

/// Attach a closed node to its parent, or make it the document root.
fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

/// Build a constant expression from its CSDL keyword and raw text.
fn constant_expression(
    keyword: &str,
    raw: &str,
    node: &XmlNode,
) -> Result<Option<CsdlExpression>, CsdlError> {
    let malformed = || {
        CsdlError::invalid_attribute(format!(
            "{keyword} value \"{raw}\" at line {} is malformed",
            node.span.start.line
        ))
    };
    let expr = match keyword {
        "Bool" => CsdlExpression::Bool(match raw {
            "true" => true,
            "false" => false,
            _ => return Err(malformed()),
        }),
        "Int" => CsdlExpression::Int(raw.parse().map_err(|_| malformed())?),
        "Float" => CsdlExpression::Float(raw.parse().map_err(|_| malformed())?),
        "Decimal" => CsdlExpression::Decimal(raw.to_string()),
        "String" => CsdlExpression::String(raw.to_string()),
        "Date" => CsdlExpression::Date(raw.to_string()),
        "DateTimeOffset" => CsdlExpression::DateTimeOffset(raw.to_string()),
        "TimeOfDay" => CsdlExpression::TimeOfDay(raw.to_string()),
        "Duration" => CsdlExpression::Duration(raw.to_string()),
        "Guid" => CsdlExpression::Guid(raw.to_string()),
        "EnumMember" => CsdlExpression::EnumMember(raw.to_string()),
        "Path" => CsdlExpression::Path(raw.to_string()),
        "PropertyPath" => CsdlExpression::PropertyPath(raw.to_string()),
        "NavigationPropertyPath" => CsdlExpression::NavigationPropertyPath(raw.to_string()),
        "AnnotationPath" => CsdlExpression::AnnotationPath(raw.to_string()),
        _ => return Ok(None),
    };
    Ok(Some(expr))
}
