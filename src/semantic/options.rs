//! Model build options

use serde::{Deserialize, Serialize};

/// Options controlling how a [`Model`](super::Model) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Attach inline and out-of-line annotations (the fourth build pass).
    pub resolve_annotations: bool,
    /// Fall back to referenced models when a name is not declared locally
    pub search_referenced_models: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolve_annotations: true,
            search_referenced_models: true,
        }
    }
}

impl BuildOptions {
    pub fn resolve_annotations(mut self, enabled: bool) -> Self {
        self.resolve_annotations = enabled;
        self
    }

    pub fn search_referenced_models(mut self, enabled: bool) -> Self {
        self.search_referenced_models = enabled;
        self
    }
}
