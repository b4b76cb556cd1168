//! Pass 3: names that are paths through other elements.
//!
//! Keys, partners and referential constraints walk properties of resolved
//! types. Navigation bindings walk a property path from the source's entity
//! type and name a target source, optionally qualified by container.

use rustc_hash::FxHashSet;

use super::BuildSession;
use crate::base::Location;
use crate::semantic::container::NavigationBinding;
use crate::semantic::elements::{Property, ReferentialConstraint};
use crate::semantic::ids::{ContainerId, NavigationSourceId, PropertyId, TypeId};
use crate::semantic::model::Model;
use crate::semantic::resolver::Capability;

impl Model {
    /// Follow a `/`-separated property path from `start`.
    ///
    /// Segments containing a dot are type casts and must name `start` or a
    /// type derived from the current type. Returns the last property.
    pub(crate) fn resolve_property_path(&self, start: TypeId, path: &str) -> Option<PropertyId> {
        let mut current = start;
        let mut last = None;
        for segment in path.trim().split('/') {
            let segment = segment.trim();
            if segment.contains('.') {
                let cast = self.type_by_full_name(&self.resolver().full_name(segment))?;
                if !self.is_or_inherits_from(cast, current) {
                    return None;
                }
                current = cast;
                last = None;
                continue;
            }
            let property = self.find_property(current, segment)?;
            last = Some(property);
            if let Some(next) = self.property(property).type_ref().schema_type() {
                current = next;
            }
        }
        last
    }

    /// Like [`Model::resolve_property_path`], but the path must end in a
    /// navigation property.
    pub(crate) fn resolve_navigation_path(&self, start: TypeId, path: &str) -> Option<PropertyId> {
        self.resolve_property_path(start, path)
            .filter(|p| self.property(*p).is_navigation())
    }

    /// Find a source in `container` or the containers it extends.
    pub(crate) fn find_source_in_chain(
        &self,
        container: ContainerId,
        name: &str,
    ) -> Option<NavigationSourceId> {
        let mut seen = FxHashSet::default();
        let mut current = Some(container);
        while let Some(id) = current {
            if !seen.insert(id) {
                return None;
            }
            let decl = self.container(id);
            if let Some(found) = decl.find_navigation_source(name) {
                return Some(found);
            }
            current = decl.extends();
        }
        None
    }

    /// Resolve a binding target or import entity set.
    ///
    /// `Name` looks in `container` (and what it extends); `NS.Container/Name`
    /// looks in the named container.
    pub(crate) fn resolve_source_path(
        &self,
        container: ContainerId,
        path: &str,
    ) -> Option<NavigationSourceId> {
        let path = path.trim();
        match path.split_once('/') {
            Some((container_name, rest)) => {
                let named = self.container_by_full_name(&self.resolver().full_name(container_name))?;
                self.find_source_in_chain(named, rest.trim())
            }
            None => self.find_source_in_chain(container, path),
        }
    }
}

impl BuildSession<'_> {
    pub(super) fn resolve_paths(&mut self) {
        let structured = std::mem::take(&mut self.structured);
        for pending in &structured {
            self.resolve_key(pending.id, pending.ast);
            for (id, ast) in pending.navigation.iter().zip(&pending.ast.navigation_properties) {
                self.resolve_partner(*id, ast.partner.as_deref(), &ast.location);
                self.resolve_constraints(*id, &ast.referential_constraints);
            }
        }

        for pending in std::mem::take(&mut self.sources) {
            for binding in pending.bindings {
                self.resolve_binding(pending.id, pending.container, binding);
            }
        }

        for pending in std::mem::take(&mut self.imports) {
            if let Some(raw) = &pending.ast.entity_set {
                let source = match self.model.resolve_source_path(pending.container, raw) {
                    Some(source) => source,
                    None => self.unresolved_source(raw, &pending.ast.location),
                };
                self.set_import_entity_set(pending.id, source);
            }
        }
    }

    fn resolve_key(&mut self, owner: TypeId, ast: &crate::csdl::CsdlStructuredType) {
        if ast.key.is_empty() {
            return;
        }
        let key = ast
            .key
            .iter()
            .map(|key_ref| match self.model.resolve_property_path(owner, &key_ref.name) {
                Some(id) => id,
                None => self.unresolved_property(&key_ref.name, Capability::Property, &key_ref.location),
            })
            .collect();
        self.set_key(owner, key);
    }

    fn resolve_partner(&mut self, property: PropertyId, partner: Option<&str>, location: &Location) {
        let Some(partner) = partner else {
            return;
        };
        let target = self.model.property(property).type_ref().schema_type();
        let found = target.and_then(|t| self.model.resolve_navigation_path(t, partner));
        let partner = match found {
            Some(id) => id,
            None => self.unresolved_property(partner, Capability::NavigationPropertyPath, location),
        };
        self.set_partner(property, partner);
    }

    fn resolve_constraints(
        &mut self,
        property: PropertyId,
        constraints: &[crate::csdl::CsdlReferentialConstraint],
    ) {
        if constraints.is_empty() {
            return;
        }
        let (declaring, target) = match self.model.property(property) {
            Property::Navigation(nav) => (Some(nav.declaring_type()), nav.target_type()),
            _ => (None, None),
        };

        let resolved = constraints
            .iter()
            .map(|c| {
                let dependent = declaring
                    .and_then(|t| self.model.resolve_property_path(t, &c.property))
                    .unwrap_or_else(|| {
                        self.unresolved_property(&c.property, Capability::Property, &c.location)
                    });
                let principal = target
                    .and_then(|t| self.model.resolve_property_path(t, &c.referenced_property))
                    .unwrap_or_else(|| {
                        self.unresolved_property(
                            &c.referenced_property,
                            Capability::Property,
                            &c.location,
                        )
                    });
                ReferentialConstraint {
                    property: dependent,
                    referenced_property: principal,
                }
            })
            .collect();
        self.set_constraints(property, resolved);
    }

    fn resolve_binding(
        &mut self,
        source: NavigationSourceId,
        container: ContainerId,
        binding: &crate::csdl::CsdlNavigationBinding,
    ) {
        let entity_type = self.model.navigation_source(source).entity_type();
        let navigation_property = match entity_type
            .and_then(|t| self.model.resolve_navigation_path(t, &binding.path))
        {
            Some(id) => id,
            None => self.unresolved_property(
                &binding.path,
                Capability::NavigationPropertyPath,
                &binding.location,
            ),
        };
        let target = match self.model.resolve_source_path(container, &binding.target) {
            Some(id) => id,
            None => self.unresolved_source(&binding.target, &binding.location),
        };
        self.push_binding(
            source,
            NavigationBinding {
                path: binding.path.trim().into(),
                navigation_property,
                target,
                location: binding.location.clone(),
            },
        );
    }
}
