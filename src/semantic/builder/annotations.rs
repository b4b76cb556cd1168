//! Pass 4: vocabulary annotations.
//!
//! Inline annotations already know their target. Out-of-line `Annotations`
//! blocks name theirs by path:
//!
//! ```text
//! NS.Type                    NS.Type/Property[/Property...]
//! NS.Enum/Member             NS.Term
//! NS.Container               NS.Container/EntitySetOrImport
//! NS.Operation               NS.Operation(NS.T1,Collection(NS.T2))
//! NS.Operation/parameter     NS.Operation/$ReturnType
//! ```

use smol_str::SmolStr;
use tracing::trace;

use super::BuildSession;
use crate::base::{Location, qualify};
use crate::csdl::{CsdlAnnotation, CsdlExpression};
use crate::semantic::annotation::{
    Annotation, AnnotationTarget, EnumMemberRef, Expression, PropertyValue,
};
use crate::semantic::diagnostics::EdmErrorCode;
use crate::semantic::element::{BadElement, SchemaElement};
use crate::semantic::ids::{ContainerId, OperationId, TypeId};
use crate::semantic::model::Model;
use crate::semantic::resolver::Capability;
use crate::semantic::types::{TypeDefinition, TypeReference};

const RETURN_TYPE_SEGMENT: &str = "$ReturnType";

impl BuildSession<'_> {
    pub(super) fn resolve_annotations(&mut self) {
        for (target, annotations) in std::mem::take(&mut self.inline_annotations) {
            for annotation in annotations {
                self.add_annotation(target, None, None, annotation, Vec::new());
            }
        }

        for block in std::mem::take(&mut self.outline_annotations) {
            let (target, errors) = match self.model.resolve_target_path(&block.target) {
                Some(target) => (target, Vec::new()),
                None => {
                    let bad = self.model.resolver().unresolved(
                        &block.target,
                        Capability::Target,
                        &block.location,
                    );
                    (AnnotationTarget::Unresolved, bad.errors().to_vec())
                }
            };
            let path = SmolStr::new(block.target.trim());
            for annotation in &block.annotations {
                self.add_annotation(
                    target,
                    Some(path.clone()),
                    block.qualifier.as_deref(),
                    annotation,
                    errors.clone(),
                );
            }
        }

        self.index_annotations();
    }

    fn add_annotation(
        &mut self,
        target: AnnotationTarget,
        target_path: Option<SmolStr>,
        block_qualifier: Option<&str>,
        ast: &CsdlAnnotation,
        errors: Vec<crate::semantic::EdmError>,
    ) {
        let resolved = self.model.resolver().resolve_term(&ast.term, &ast.location);
        let term = resolved.into_handle(&mut self.model.terms);
        let value = ast
            .value
            .as_ref()
            .map(|v| self.expression(v, &ast.location));
        let qualifier = ast
            .qualifier
            .as_deref()
            .or(block_qualifier)
            .map(|q| SmolStr::new(q.trim()));

        trace!(term = %ast.term, ?target, "annotation");
        self.model.annotations.push(Annotation {
            term,
            qualifier,
            target,
            target_path,
            value,
            location: ast.location.clone(),
            errors,
        });
    }

    fn index_annotations(&mut self) {
        for (index, annotation) in self.model.annotations.iter().enumerate() {
            if annotation.target != AnnotationTarget::Unresolved {
                self.model
                    .annotation_index
                    .entry(annotation.target)
                    .or_default()
                    .push(index);
            }
        }
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn expression(&mut self, ast: &CsdlExpression, location: &Location) -> Expression {
        match ast {
            CsdlExpression::Null => Expression::Null,
            CsdlExpression::Bool(b) => Expression::Bool(*b),
            CsdlExpression::Int(i) => Expression::Int(*i),
            CsdlExpression::Float(f) => Expression::Float(*f),
            CsdlExpression::Decimal(s) => Expression::Decimal(s.clone()),
            CsdlExpression::String(s) => Expression::String(s.clone()),
            CsdlExpression::Date(s) => Expression::Date(s.clone()),
            CsdlExpression::DateTimeOffset(s) => Expression::DateTimeOffset(s.clone()),
            CsdlExpression::TimeOfDay(s) => Expression::TimeOfDay(s.clone()),
            CsdlExpression::Duration(s) => Expression::Duration(s.clone()),
            CsdlExpression::Guid(s) => Expression::Guid(s.clone()),
            CsdlExpression::EnumMember(raw) => Expression::EnumMember(
                raw.split_whitespace()
                    .map(|path| self.model.resolve_enum_member(path, location))
                    .collect(),
            ),
            CsdlExpression::Path(s) => Expression::Path(s.clone()),
            CsdlExpression::PropertyPath(s) => Expression::PropertyPath(s.clone()),
            CsdlExpression::NavigationPropertyPath(s) => {
                Expression::NavigationPropertyPath(s.clone())
            }
            CsdlExpression::AnnotationPath(s) => Expression::AnnotationPath(s.clone()),
            CsdlExpression::Collection(items) => Expression::Collection(
                items.iter().map(|item| self.expression(item, location)).collect(),
            ),
            CsdlExpression::Record {
                type_name,
                properties,
            } => {
                let type_id = type_name
                    .as_deref()
                    .map(|raw| self.resolve_type_handle(raw, location));
                let properties = properties
                    .iter()
                    .map(|p| PropertyValue {
                        property: SmolStr::new(p.property.trim()),
                        value: self.expression(&p.value, &p.location),
                    })
                    .collect();
                Expression::Record {
                    type_id,
                    properties,
                }
            }
        }
    }
}

impl Model {
    /// Resolve one `NS.Enum/Member` reference.
    pub(crate) fn resolve_enum_member(&self, path: &str, location: &Location) -> EnumMemberRef {
        let Some((type_name, member)) = path.split_once('/') else {
            return EnumMemberRef::Unresolved(BadElement::new(
                "",
                path,
                EdmErrorCode::InvalidEnumMemberPath,
                location.clone(),
                format!("The enum member path '{path}' must have the form 'Type/Member'."),
            ));
        };
        let found = self
            .type_by_full_name(&self.resolver().full_name(type_name))
            .and_then(|id| {
                let index = self.schema_type(id).as_enum()?.find_member(member.trim())?.0;
                Some((id, index))
            });
        match found {
            Some((enum_type, member)) => EnumMemberRef::Member { enum_type, member },
            None => EnumMemberRef::Unresolved(self.resolver().unresolved(
                path,
                Capability::EnumMember,
                location,
            )),
        }
    }

    /// Resolve an out-of-line annotation target path.
    pub(crate) fn resolve_target_path(&self, path: &str) -> Option<AnnotationTarget> {
        let (head, rest) = split_target(path.trim());
        let resolver = self.resolver();
        let name = resolver.split(head);
        let full = resolver.full_name(head);

        if let Some(signature) = name.signature {
            let operation = self
                .operations_by_full_name(&full)
                .into_iter()
                .find(|id| self.signature_matches(*id, signature))?;
            return self.operation_target(operation, rest);
        }

        if let Some(id) = self.type_by_full_name(&full) {
            return self.type_target(id, rest);
        }
        if rest.is_none() {
            if let Some(id) = self.term_by_full_name(&full) {
                return Some(AnnotationTarget::Term(id));
            }
        }
        if let Some(id) = self.container_by_full_name(&full) {
            return self.container_target(id, rest);
        }
        let operation = self.operations_by_full_name(&full).into_iter().next()?;
        self.operation_target(operation, rest)
    }

    fn type_target(&self, id: TypeId, rest: Option<&str>) -> Option<AnnotationTarget> {
        let Some(rest) = rest else {
            return Some(AnnotationTarget::Type(id));
        };
        if let Some(enum_type) = self.schema_type(id).as_enum() {
            let (member, _) = enum_type.find_member(rest.trim())?;
            return Some(AnnotationTarget::EnumMember {
                enum_type: id,
                member,
            });
        }
        self.resolve_property_path(id, rest)
            .map(AnnotationTarget::Property)
    }

    fn container_target(&self, id: ContainerId, rest: Option<&str>) -> Option<AnnotationTarget> {
        let Some(rest) = rest else {
            return Some(AnnotationTarget::Container(id));
        };
        let rest = rest.trim();
        if let Some(source) = self.find_source_in_chain(id, rest) {
            return Some(AnnotationTarget::NavigationSource(source));
        }
        self.container(id)
            .find_operation_imports(rest)
            .first()
            .map(|import| AnnotationTarget::OperationImport(*import))
    }

    fn operation_target(&self, id: OperationId, rest: Option<&str>) -> Option<AnnotationTarget> {
        match rest.map(str::trim) {
            None => Some(AnnotationTarget::Operation(id)),
            Some(RETURN_TYPE_SEGMENT) => Some(AnnotationTarget::ReturnType(id)),
            Some(parameter) => self
                .operation(id)
                .find_parameter(parameter)
                .map(|(index, _)| AnnotationTarget::Parameter {
                    operation: id,
                    index,
                }),
        }
    }

    /// Whether `signature` (with parentheses) lists the parameter types of
    /// `operation`: all of them, or just the binding parameter.
    fn signature_matches(&self, operation: OperationId, signature: &str) -> bool {
        let inner = signature
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or("");
        let wanted: Vec<String> = split_top_level(inner)
            .into_iter()
            .map(|t| self.canonical_type_name(t))
            .collect();
        let op = self.operation(operation);
        let actual: Vec<String> = op
            .parameters()
            .iter()
            .map(|p| self.type_reference_name(&p.type_ref))
            .collect();
        wanted == actual || (op.is_bound() && !actual.is_empty() && wanted == actual[..1])
    }

    fn canonical_type_name(&self, raw: &str) -> String {
        let raw = raw.trim();
        match crate::base::collection_element(raw) {
            Some(element) => format!("Collection({})", self.canonical_type_name(element)),
            None => self.resolver().full_name(raw),
        }
    }

    fn type_reference_name(&self, type_ref: &TypeReference) -> String {
        match &type_ref.definition {
            TypeDefinition::Primitive(kind) => qualify(crate::base::EDM_NAMESPACE, kind.name()),
            TypeDefinition::Schema(id) => self.schema_type(*id).full_name(),
            TypeDefinition::Collection(inner) => {
                format!("Collection({})", self.type_reference_name(inner))
            }
            TypeDefinition::EntityReference(id) => {
                format!("Ref({})", self.schema_type(*id).full_name())
            }
        }
    }
}

/// Split a target path at the first `/` after any signature parentheses.
fn split_target(path: &str) -> (&str, Option<&str>) {
    let search_from = path.find(')').map_or(0, |close| close + 1);
    match path[search_from..].find('/') {
        Some(slash) => {
            let at = search_from + slash;
            (&path[..at], Some(&path[at + 1..]))
        }
        None => (path, None),
    }
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = list[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}
