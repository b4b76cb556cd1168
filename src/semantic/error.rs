//! Errors that stop a model from being built.

use thiserror::Error;

use crate::base::Location;
use crate::csdl::CsdlError;

/// Structural failures of a model build.
///
/// Name resolution problems are never reported here; they become
/// placeholder elements and show up in [`Model::errors`](super::Model::errors).
#[derive(Debug, Error)]
pub enum ModelError {
    /// A second entity container was declared.
    #[error("{location}: entity container '{name}' conflicts with '{existing}'; a model holds at most one entity container")]
    DuplicateEntityContainer {
        name: String,
        existing: String,
        location: Location,
    },

    /// A schema element carried no recognised kind.
    #[error("{location}: element '{name}' has no supported schema element kind")]
    UnsupportedElementKind { name: String, location: Location },

    /// The input could not be read.
    #[error(transparent)]
    Csdl(#[from] CsdlError),
}

impl ModelError {
    pub fn duplicate_entity_container(
        name: impl Into<String>,
        existing: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::DuplicateEntityContainer {
            name: name.into(),
            existing: existing.into(),
            location,
        }
    }

    pub fn unsupported_element_kind(name: impl Into<String>, location: Location) -> Self {
        Self::UnsupportedElementKind {
            name: name.into(),
            location,
        }
    }
}
