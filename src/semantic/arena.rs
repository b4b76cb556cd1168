//! Per-model element storage.

use std::marker::PhantomData;

use super::ids::{ElementHandle, ModelId};

/// Append-only storage for one element category of one model.
///
/// Elements are pushed during the build and addressed by handles afterwards.
/// Handles minted by a different model are rejected by [`Arena::get`].
#[derive(Debug)]
pub(crate) struct Arena<T, Id> {
    model: ModelId,
    items: Vec<T>,
    _handle: PhantomData<fn() -> Id>,
}

impl<T, Id: ElementHandle> Arena<T, Id> {
    pub(crate) fn new(model: ModelId) -> Self {
        Self {
            model,
            items: Vec::new(),
            _handle: PhantomData,
        }
    }

    pub(crate) fn alloc(&mut self, item: T) -> Id {
        let id = Id::from_parts(self.model, self.items.len());
        self.items.push(item);
        id
    }

    pub(crate) fn get(&self, id: Id) -> Option<&T> {
        if id.model() != self.model {
            return None;
        }
        self.items.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        if id.model() != self.model {
            return None;
        }
        self.items.get_mut(id.index())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (Id, &T)> + '_ {
        let model = self.model;
        self.items
            .iter()
            .enumerate()
            .map(move |(i, item)| (Id::from_parts(model, i), item))
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}
