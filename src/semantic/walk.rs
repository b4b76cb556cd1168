//! Inheritance walks and the memoized derived queries built on them.
//!
//! Base type chains come from user schemas and may loop. Every walk here
//! tracks visited types and stops at the first revisit.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::element::SchemaElement;
use super::ids::{OperationId, PropertyId, TypeId};
use super::model::Model;
use super::types::TypeDefinition;

/// Iterator over the base type chain of a type, nearest base first.
///
/// Stops at the root or at the first type already seen.
pub struct BaseTypes<'m> {
    model: &'m Model,
    next: Option<TypeId>,
    seen: FxHashSet<TypeId>,
    revisited: Option<TypeId>,
}

impl<'m> BaseTypes<'m> {
    fn new(model: &'m Model, start: TypeId, include_start: bool) -> Self {
        let mut seen = FxHashSet::default();
        let next = if include_start {
            Some(start)
        } else {
            seen.insert(start);
            model.schema_type(start).base_type()
        };
        Self {
            model,
            next,
            seen,
            revisited: None,
        }
    }

    /// Whether the walk stopped because the chain looped.
    pub fn is_cyclic(&self) -> bool {
        self.revisited.is_some()
    }
}

impl Iterator for BaseTypes<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.next?;
        if !self.seen.insert(current) {
            self.revisited = Some(current);
            self.next = None;
            return None;
        }
        self.next = self.model.schema_type(current).base_type();
        Some(current)
    }
}

/// Memo key for bindable operation lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingKey {
    pub type_id: TypeId,
    /// Bind to `Collection(type)` rather than to `type`.
    pub collection: bool,
}

impl BindingKey {
    /// The key for a binding type, if it names a schema type.
    pub fn from_definition(definition: &TypeDefinition) -> Option<Self> {
        match definition {
            TypeDefinition::Schema(id) => Some(Self {
                type_id: *id,
                collection: false,
            }),
            TypeDefinition::Collection(inner) => match inner.definition {
                TypeDefinition::Schema(id) => Some(Self {
                    type_id: id,
                    collection: true,
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Model {
    // ------------------------------------------------------------------------
    // Base chains
    // ------------------------------------------------------------------------

    /// Base types of `id`, nearest first. Excludes `id` itself.
    pub fn base_types(&self, id: TypeId) -> BaseTypes<'_> {
        BaseTypes::new(self, id, false)
    }

    /// `id` followed by its base types.
    pub fn self_and_base_types(&self, id: TypeId) -> BaseTypes<'_> {
        BaseTypes::new(self, id, true)
    }

    /// Whether walking up from `id` runs into a loop.
    pub fn has_base_type_cycle(&self, id: TypeId) -> bool {
        let mut walk = self.self_and_base_types(id);
        walk.by_ref().for_each(drop);
        walk.is_cyclic()
    }

    /// Whether `id` itself sits on a loop of its base chain.
    pub(crate) fn is_on_base_type_cycle(&self, id: TypeId) -> bool {
        self.base_types(id).is_cyclic_back_to(id)
    }

    /// Whether `derived` is `base` or inherits from it.
    pub fn is_or_inherits_from(&self, derived: TypeId, base: TypeId) -> bool {
        self.self_and_base_types(derived).any(|t| t == base)
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    /// Find a property on `id` or any of its base types.
    pub fn find_property(&self, id: TypeId, name: &str) -> Option<PropertyId> {
        self.self_and_base_types(id)
            .find_map(|t| self.schema_type(t).find_declared_property(name))
    }

    /// All properties of `id`, inherited ones first.
    pub fn properties(&self, id: TypeId) -> Vec<PropertyId> {
        let chain: Vec<TypeId> = self.self_and_base_types(id).collect();
        chain
            .iter()
            .rev()
            .flat_map(|t| self.schema_type(*t).declared_properties().iter().copied())
            .collect()
    }

    /// The effective key: the nearest key declared along the base chain.
    pub fn key(&self, id: TypeId) -> &[PropertyId] {
        self.self_and_base_types(id)
            .map(|t| self.schema_type(t).declared_key())
            .find(|key| !key.is_empty())
            .unwrap_or(&[])
    }

    // ------------------------------------------------------------------------
    // Derived types
    // ------------------------------------------------------------------------

    /// Types whose base type is exactly `base`, from this model and every
    /// referenced model. Memoized.
    pub fn find_directly_derived_types(&self, base: TypeId) -> Arc<[TypeId]> {
        self.derived_types
            .evaluate(base, |base| self.compute_directly_derived(*base))
    }

    fn compute_directly_derived(&self, base: TypeId) -> Arc<[TypeId]> {
        self.all_models()
            .into_iter()
            .flat_map(|m| m.types.iter())
            .filter(|(_, t)| t.base_type() == Some(base))
            .map(|(id, _)| id)
            .collect()
    }

    /// Transitive closure of [`Model::find_directly_derived_types`],
    /// breadth first. Terminates on cyclic chains.
    pub fn find_all_derived_types(&self, base: TypeId) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        seen.insert(base);
        let mut queue = VecDeque::from([base]);
        let mut out = Vec::new();
        while let Some(current) = queue.pop_front() {
            for derived in self.find_directly_derived_types(current).iter() {
                if seen.insert(*derived) {
                    out.push(*derived);
                    queue.push_back(*derived);
                }
            }
        }
        out
    }

    // ------------------------------------------------------------------------
    // Bindable operations
    // ------------------------------------------------------------------------

    /// Bound operations whose binding parameter accepts `binding_type`.
    ///
    /// An operation bound to a base type is bindable to its derived types.
    /// Collection binding types match collection-bound operations only.
    /// Memoized per binding type.
    pub fn find_bindable_operations(&self, binding_type: &TypeDefinition) -> Arc<[OperationId]> {
        match BindingKey::from_definition(binding_type) {
            Some(key) => self
                .bindable_operations
                .evaluate(key, |key| self.compute_bindable(*key)),
            None => Arc::from([]),
        }
    }

    /// [`Model::find_bindable_operations`] narrowed to one qualified name.
    pub fn find_bindable_operations_named(
        &self,
        binding_type: &TypeDefinition,
        qualified_name: &str,
    ) -> Vec<OperationId> {
        let full = self.resolver().full_name(qualified_name);
        self.find_bindable_operations(binding_type)
            .iter()
            .copied()
            .filter(|id| self.operation(*id).full_name() == full)
            .collect()
    }

    fn compute_bindable(&self, key: BindingKey) -> Arc<[OperationId]> {
        let accepted: FxHashSet<TypeId> = self.self_and_base_types(key.type_id).collect();
        self.all_models()
            .into_iter()
            .flat_map(|m| m.operations.iter())
            .filter(|(_, op)| {
                let Some(parameter) = op.binding_parameter() else {
                    return false;
                };
                match (&parameter.type_ref.definition, key.collection) {
                    (TypeDefinition::Schema(t), false) => accepted.contains(t),
                    (TypeDefinition::Collection(inner), true) => match inner.definition {
                        TypeDefinition::Schema(t) => accepted.contains(&t),
                        _ => false,
                    },
                    _ => false,
                }
            })
            .map(|(id, _)| id)
            .collect()
    }
}

impl BaseTypes<'_> {
    /// Consume the walk, reporting whether it came back to `start`.
    fn is_cyclic_back_to(mut self, start: TypeId) -> bool {
        // `start` is pre-seeded as seen, so reaching it again ends the walk.
        self.by_ref().for_each(drop);
        self.revisited == Some(start)
    }
}
