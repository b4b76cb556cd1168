//! Element handles.
//!
//! Semantic elements live in per-model arenas and are addressed by small
//! `Copy` handles. A handle pairs the owning model's [`ModelId`] with the
//! arena index, so handles from referenced models never collide with local
//! ones and compare by identity rather than by structure.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_MODEL_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of one model build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelId(u32);

impl ModelId {
    pub(crate) fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Common behaviour of all element handles.
pub trait ElementHandle: Copy + Eq + Hash + Debug {
    fn from_parts(model: ModelId, index: usize) -> Self;
    fn model(self) -> ModelId;
    fn index(self) -> usize;
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            model: ModelId,
            index: u32,
        }

        impl $name {
            /// The model whose arena holds this element.
            pub fn model(self) -> ModelId {
                self.model
            }

            /// Index into the owning model's arena.
            pub fn index(self) -> usize {
                self.index as usize
            }
        }

        impl ElementHandle for $name {
            fn from_parts(model: ModelId, index: usize) -> Self {
                Self {
                    model,
                    index: index as u32,
                }
            }

            fn model(self) -> ModelId {
                self.model
            }

            fn index(self) -> usize {
                self.index as usize
            }
        }
    };
}

define_handle!(
    /// Handle to a [`SchemaType`](super::SchemaType).
    TypeId
);
define_handle!(
    /// Handle to a [`Property`](super::Property).
    PropertyId
);
define_handle!(
    /// Handle to a [`Term`](super::Term).
    TermId
);
define_handle!(
    /// Handle to an [`Operation`](super::Operation).
    OperationId
);
define_handle!(
    /// Handle to a [`NavigationSource`](super::NavigationSource).
    NavigationSourceId
);
define_handle!(
    /// Handle to an [`OperationImport`](super::OperationImport).
    OperationImportId
);
define_handle!(
    /// Handle to an [`EntityContainer`](super::EntityContainer).
    ContainerId
);
