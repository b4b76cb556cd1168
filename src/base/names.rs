//! Qualified name handling.
//!
//! CSDL references elements by `Namespace.SimpleName`. Namespaces themselves
//! may contain dots, so splitting needs to know which namespaces exist.

use std::fmt;

/// Namespace of the built-in primitive types.
pub const EDM_NAMESPACE: &str = "Edm";

/// A raw qualified name split into its parts.
///
/// `signature` holds an operation signature suffix such as `(NS.T,NS.T2)`.
/// It is kept verbatim and never dot-split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
    pub signature: Option<&'a str>,
}

impl<'a> QualifiedName<'a> {
    /// Split `raw` using `is_namespace` to recognise registered namespaces
    /// (and aliases).
    ///
    /// The split point is the dot giving the longest known namespace prefix.
    /// Without any known prefix the last dot is used. Everything from the
    /// first `(` onward is treated as a signature suffix.
    pub fn split(raw: &'a str, is_namespace: impl Fn(&str) -> bool) -> Self {
        let (head, signature) = match raw.find('(') {
            Some(open) => (&raw[..open], Some(&raw[open..])),
            None => (raw, None),
        };

        let longest_known = head
            .match_indices('.')
            .map(|(i, _)| i)
            .rev()
            .find(|&i| is_namespace(&head[..i]));

        match longest_known.or_else(|| head.rfind('.')) {
            Some(dot) => Self {
                namespace: &head[..dot],
                name: &head[dot + 1..],
                signature,
            },
            None => Self {
                namespace: "",
                name: head,
                signature,
            },
        }
    }

    /// `Namespace.Name` without the signature suffix.
    pub fn full_name(&self) -> String {
        qualify(self.namespace, self.name)
    }
}

impl fmt::Display for QualifiedName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)?;
        } else {
            write!(f, "{}.{}", self.namespace, self.name)?;
        }
        if let Some(signature) = self.signature {
            write!(f, "{signature}")?;
        }
        Ok(())
    }
}

/// Join a namespace and a simple name.
pub fn qualify(namespace: &str, name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Return the element type name of `Collection(X)`, if `raw` has that shape.
pub fn collection_element(raw: &str) -> Option<&str> {
    raw.trim()
        .strip_prefix("Collection(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::trim)
}
