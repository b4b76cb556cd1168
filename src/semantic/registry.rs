//! Name registries with ambiguity tracking.
//!
//! Registration is idempotent and order-insensitive in outcome: adding the
//! same element twice changes nothing, and two distinct elements under one
//! name always end up as a single ambiguous binding that lists both.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::trace;

use super::arena::Arena;
use super::element::{AmbiguousBinding, Bindable, NamedElement};
use super::ids::ElementHandle;
use crate::base::QualifiedName;

/// Outcome of [`Registry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The name was free.
    Inserted,
    /// The element was already registered under this name.
    Unchanged,
    /// The name now resolves to an ambiguous binding.
    Ambiguous,
    /// Empty names are never registered.
    Anonymous,
}

/// Storage that can turn a name collision into an ambiguous binding.
pub(crate) trait AmbiguityStore<Id> {
    /// The binding behind `id`, if `id` is an ambiguous binding.
    fn binding_mut(&mut self, id: Id) -> Option<&mut AmbiguousBinding<Id>>;

    /// Allocate a binding for `key` listing `first` then `second`.
    fn new_binding(&mut self, key: &str, first: Id, second: Id) -> Id;
}

impl<T, Id> AmbiguityStore<Id> for Arena<T, Id>
where
    T: Bindable<Id> + NamedElement,
    Id: ElementHandle,
{
    fn binding_mut(&mut self, id: Id) -> Option<&mut AmbiguousBinding<Id>> {
        self.get_mut(id).and_then(|e| e.as_ambiguous_mut())
    }

    fn new_binding(&mut self, key: &str, first: Id, second: Id) -> Id {
        let location = self
            .get(second)
            .map(|e| e.location().clone())
            .unwrap_or_default();
        let name = QualifiedName::split(key, |_| false);
        let binding = AmbiguousBinding::new(name.namespace, name.name, vec![first, second], location);
        self.alloc(T::ambiguous(binding))
    }
}

// ============================================================================
// SINGLE-VALUED REGISTRY
// ============================================================================

/// Name → element map where collisions become ambiguous bindings.
#[derive(Debug, Clone)]
pub struct Registry<Id> {
    entries: IndexMap<SmolStr, Id>,
}

impl<Id> Default for Registry<Id> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<Id: ElementHandle> Registry<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `id`.
    ///
    /// A second distinct element under the same name replaces the entry
    /// with an ambiguous binding allocated in `store`; further distinct
    /// elements are appended to that binding.
    pub(crate) fn add(
        &mut self,
        name: &str,
        id: Id,
        store: &mut impl AmbiguityStore<Id>,
    ) -> Registration {
        if name.is_empty() {
            return Registration::Anonymous;
        }

        let Some(existing) = self.entries.get(name).copied() else {
            self.entries.insert(SmolStr::new(name), id);
            return Registration::Inserted;
        };

        if existing == id {
            return Registration::Unchanged;
        }

        if let Some(binding) = store.binding_mut(existing) {
            if binding.push(id) {
                trace!(name, ?id, "extended ambiguous binding");
                return Registration::Ambiguous;
            }
            return Registration::Unchanged;
        }

        let binding = store.new_binding(name, existing, id);
        trace!(name, ?existing, ?id, "name collision");
        self.entries.insert(SmolStr::new(name), binding);
        Registration::Ambiguous
    }

    pub fn get(&self, name: &str) -> Option<Id> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Id)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// MULTI-VALUED REGISTRY
// ============================================================================

/// Name → elements map for overloadable names (operations, imports).
#[derive(Debug, Clone)]
pub struct MultiRegistry<Id> {
    entries: IndexMap<SmolStr, Vec<Id>>,
}

impl<Id> Default for MultiRegistry<Id> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<Id: ElementHandle> MultiRegistry<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, id: Id) -> Registration {
        if name.is_empty() {
            return Registration::Anonymous;
        }
        let overloads = self.entries.entry(SmolStr::new(name)).or_default();
        if overloads.contains(&id) {
            return Registration::Unchanged;
        }
        overloads.push(id);
        Registration::Inserted
    }

    /// All elements under `name`, in registration order.
    pub fn get(&self, name: &str) -> &[Id] {
        self.entries.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Id])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
