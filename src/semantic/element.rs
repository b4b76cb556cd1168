//! Capabilities shared by every semantic element, plus the two placeholder
//! shapes (unresolved and ambiguous) that stand in for broken references.

use smol_str::SmolStr;

use super::diagnostics::{EdmError, EdmErrorCode};
use super::ids::ElementHandle;
use crate::base::{Location, qualify};

/// Anything with a name that can carry errors.
pub trait NamedElement {
    fn name(&self) -> &str;

    fn location(&self) -> &Location;

    /// Errors attached to this element. Empty for well-formed elements.
    fn errors(&self) -> &[EdmError];

    fn is_bad(&self) -> bool {
        !self.errors().is_empty()
    }
}

/// A named element that lives directly in a schema namespace.
pub trait SchemaElement: NamedElement {
    fn namespace(&self) -> &str;

    fn full_name(&self) -> String {
        qualify(self.namespace(), self.name())
    }
}

/// Element categories that can be replaced by an unresolved placeholder.
pub trait Unresolvable: Sized {
    fn unresolved(bad: BadElement) -> Self;
}

/// Element categories whose names can collide into an ambiguous binding.
pub trait Bindable<Id>: Unresolvable {
    fn ambiguous(binding: AmbiguousBinding<Id>) -> Self;

    fn as_ambiguous_mut(&mut self) -> Option<&mut AmbiguousBinding<Id>>;
}

// ============================================================================
// PLACEHOLDERS
// ============================================================================

/// Stand-in for an element whose name did not resolve.
///
/// It keeps the name that was asked for (split into namespace and name)
/// and answers every structural query with an empty default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadElement {
    name: SmolStr,
    namespace: SmolStr,
    location: Location,
    errors: Vec<EdmError>,
}

impl BadElement {
    /// An empty placeholder with no errors, used for handles that point at
    /// nothing.
    pub(crate) const MISSING: BadElement = BadElement {
        name: SmolStr::new_static(""),
        namespace: SmolStr::new_static(""),
        location: Location::None,
        errors: Vec::new(),
    };

    pub fn new(
        namespace: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        code: EdmErrorCode,
        location: Location,
        message: impl Into<std::sync::Arc<str>>,
    ) -> Self {
        let error = EdmError::new(code, location.clone(), message);
        Self {
            name: name.into(),
            namespace: namespace.into(),
            location,
            errors: vec![error],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn errors(&self) -> &[EdmError] {
        &self.errors
    }
}

/// Stand-in for a name bound to several distinct elements.
///
/// The first two colliding elements create the binding; later ones are
/// appended. Order follows registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousBinding<Id> {
    name: SmolStr,
    namespace: SmolStr,
    location: Location,
    bindings: Vec<Id>,
    errors: Vec<EdmError>,
}

impl<Id: ElementHandle> AmbiguousBinding<Id> {
    pub fn new(
        namespace: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        bindings: Vec<Id>,
        location: Location,
    ) -> Self {
        let namespace = namespace.into();
        let name = name.into();
        let error = EdmError::new(
            EdmErrorCode::BadAmbiguousElementBinding,
            location.clone(),
            format!(
                "The name '{}' is ambiguous: it is bound to more than one element.",
                qualify(&namespace, &name)
            ),
        );
        Self {
            name,
            namespace,
            location,
            bindings,
            errors: vec![error],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The colliding elements, in registration order.
    pub fn bindings(&self) -> &[Id] {
        &self.bindings
    }

    pub fn errors(&self) -> &[EdmError] {
        &self.errors
    }

    /// Append a further colliding element. Already-bound elements are ignored.
    pub(crate) fn push(&mut self, id: Id) -> bool {
        if self.bindings.contains(&id) {
            return false;
        }
        self.bindings.push(id);
        true
    }
}

/// Implements [`NamedElement`] for an enum whose variants all expose
/// `name()`, `location()` and `errors()`.
macro_rules! delegate_named {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::semantic::element::NamedElement for $ty {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant(inner) => inner.name(),)+
                }
            }

            fn location(&self) -> &$crate::base::Location {
                match self {
                    $(Self::$variant(inner) => inner.location(),)+
                }
            }

            fn errors(&self) -> &[$crate::semantic::EdmError] {
                match self {
                    $(Self::$variant(inner) => inner.errors(),)+
                }
            }
        }
    };
}

pub(crate) use delegate_named;
