//! The schema registry.
//!
//! # Overview
//!
//! An [`OwlSchema`] owns every element of one loaded ontology, keyed by
//! [`ElementKey`]. It is populated by the `add_*` and relationship
//! methods (usually through [`OwlSchema::load`](crate::fact)) and then
//! queried read-only by package extraction, dependency closure and
//! whatever renders the result.
//!
//! Relationships with two sides (super and sub classes, aliases,
//! domain and range indices, inverse properties) are always updated
//! on both elements by the same call.
//!
//! Mutations that mention an element that does not exist are
//! tolerated: they are logged at debug level and return `false`.
use crate::error::invalid;
use crate::error::SchemaError;
use crate::header::SchemaHeader;
use crate::key::ElementKey;
use crate::model::{
    AnnotationProperty, Datatype, Element, EquivalentExpression, Individual, Named,
    NamedElement, OwlClass, OwlProperty, PropertyClassRef, PropertyKind, Restriction,
};
use crate::model::Annotation;
use crate::repository::{SchemaInfo, SchemasRepository};
use crate::vocab::{is_well_known, thing_key, trim_separator, Namespace};

use curie::PrefixMapping;
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, info, trace};

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::convert::TryFrom;
use std::sync::Arc;

/// A namespace the schema declares but does not own.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportedSchema {
    pub prefix: String,
    pub namespace: String,
    /// Shared with every other schema importing the same namespace.
    pub info: Option<Arc<SchemaInfo>>,
}

impl ImportedSchema {
    pub fn name(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.name.as_deref())
    }

    pub fn family(&self) -> Option<&str> {
        self.info.as_ref().and_then(|i| i.family.as_deref())
    }
}

#[derive(Clone, Debug, Default)]
pub struct OwlSchema {
    repository: SchemasRepository,
    classes: IndexMap<ElementKey, OwlClass>,
    properties: IndexMap<ElementKey, OwlProperty>,
    datatype_properties: BTreeSet<ElementKey>,
    object_properties: BTreeSet<ElementKey>,
    individuals: IndexMap<ElementKey, Individual>,
    datatypes: IndexMap<ElementKey, Datatype>,
    annotations: IndexMap<ElementKey, AnnotationProperty>,
    namespaces: BTreeSet<String>,
    prefix_to_namespace: BTreeMap<String, String>,
    namespace_to_prefix: BTreeMap<String, String>,
    default_namespace: Option<String>,
    default_prefix: Option<String>,
    imported_schemas: BTreeMap<String, Arc<ImportedSchema>>,
    imported_schemas_from_namespace: BTreeMap<String, Arc<ImportedSchema>>,
    packages: Option<BTreeSet<ElementKey>>,
}

/// Record the namespace of `element` and give it the prefix bound to
/// that namespace, if it has none yet.
fn register(
    namespaces: &mut BTreeSet<String>,
    namespace_to_prefix: &BTreeMap<String, String>,
    element: &mut NamedElement,
) {
    let ns = match element.key().namespace() {
        Some(ns) => ns.to_string(),
        None => return,
    };

    if element.prefix().is_none() {
        element.set_prefix(namespace_to_prefix.get(&ns).cloned());
    }
    namespaces.insert(ns);
}

/// The package a child inherits from `parent`, if `parent` resolves to
/// exactly one.
fn inherited_package(parent: &OwlClass) -> Option<ElementKey> {
    if parent.is_package() {
        Some(parent.key().clone())
    } else if parent.package_list().is_none() {
        parent.package_key().cloned()
    } else {
        None
    }
}

impl OwlSchema {
    pub fn new(repository: SchemasRepository) -> OwlSchema {
        OwlSchema {
            repository,
            ..Default::default()
        }
    }

    /// Create a schema and compute its prefix map from `header`.
    pub fn with_header(header: &SchemaHeader, repository: SchemasRepository) -> OwlSchema {
        let mut schema = OwlSchema::new(repository);
        schema.compute_prefix_map(header);
        schema
    }

    pub fn repository(&self) -> &SchemasRepository {
        &self.repository
    }

    /// Discard everything but the repository.
    pub fn reset(&mut self) {
        let repository = std::mem::take(&mut self.repository);
        *self = OwlSchema::new(repository);
        info!("Schema reset");
    }

    // Classes

    /// Insert `class`, replacing and returning any class with the same
    /// key.
    pub fn add_owl_class(&mut self, mut class: OwlClass) -> Option<OwlClass> {
        register(
            &mut self.namespaces,
            &self.namespace_to_prefix,
            class.element_mut(),
        );
        trace!("Adding class: {}", class.key());
        self.classes.insert(class.key().clone(), class)
    }

    /// Return the class for `key`, creating an empty one if needed.
    pub fn declare_class(&mut self, key: ElementKey) -> &mut OwlClass {
        match self.classes.entry(key) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let mut class = OwlClass::new(v.key().clone());
                register(
                    &mut self.namespaces,
                    &self.namespace_to_prefix,
                    class.element_mut(),
                );
                trace!("Declaring class: {}", class.key());
                v.insert(class)
            }
        }
    }

    pub fn owl_classes(&self) -> &IndexMap<ElementKey, OwlClass> {
        &self.classes
    }

    pub fn owl_class(&self, key: &ElementKey) -> Option<&OwlClass> {
        self.classes.get(key)
    }

    pub fn has_owl_class(&self, key: &ElementKey) -> bool {
        self.classes.contains_key(key)
    }

    pub(crate) fn owl_classes_mut(&mut self) -> &mut IndexMap<ElementKey, OwlClass> {
        &mut self.classes
    }

    /// The `owl:Thing` class, if it has been declared.
    pub fn thing_class(&self) -> Option<&OwlClass> {
        self.classes.get(thing_key())
    }

    /// The `owl:Thing` class, declared on first use.
    pub fn thing_class_mut(&mut self) -> &mut OwlClass {
        self.declare_class(thing_key().clone())
    }

    // Properties

    pub fn add_owl_property(&mut self, mut property: OwlProperty) -> Option<OwlProperty> {
        let key = property.key().clone();
        self.datatype_properties.remove(&key);
        self.object_properties.remove(&key);
        match property.kind() {
            PropertyKind::Datatype => self.datatype_properties.insert(key.clone()),
            PropertyKind::Object => self.object_properties.insert(key.clone()),
        };

        register(
            &mut self.namespaces,
            &self.namespace_to_prefix,
            property.element_mut(),
        );
        trace!("Adding {:?} property: {}", property.kind(), key);
        self.properties.insert(key, property)
    }

    /// Return the property for `key`, creating one of `kind` if needed.
    ///
    /// An existing property keeps its kind.
    pub fn declare_property(&mut self, key: ElementKey, kind: PropertyKind) -> &mut OwlProperty {
        if let Some(existing) = self.properties.get(&key) {
            if existing.kind() != kind {
                debug!(
                    "Property {} already declared as {:?}, ignoring {:?}",
                    key,
                    existing.kind(),
                    kind
                );
            }
        } else {
            self.add_owl_property(OwlProperty::new(key.clone(), kind));
        }

        // The key is present after either branch.
        match self.properties.entry(key) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let property = OwlProperty::new(v.key().clone(), kind);
                v.insert(property)
            }
        }
    }

    pub fn owl_properties(&self) -> &IndexMap<ElementKey, OwlProperty> {
        &self.properties
    }

    pub fn owl_property(&self, key: &ElementKey) -> Option<&OwlProperty> {
        self.properties.get(key)
    }

    pub fn has_owl_property(&self, key: &ElementKey) -> bool {
        self.properties.contains_key(key)
    }

    pub fn datatype_properties(&self) -> impl Iterator<Item = &OwlProperty> {
        self.datatype_properties
            .iter()
            .filter_map(move |k| self.properties.get(k))
    }

    pub fn object_properties(&self) -> impl Iterator<Item = &OwlProperty> {
        self.object_properties
            .iter()
            .filter_map(move |k| self.properties.get(k))
    }

    // Individuals, datatypes and annotation properties

    pub fn add_individual(&mut self, mut individual: Individual) -> Option<Individual> {
        register(
            &mut self.namespaces,
            &self.namespace_to_prefix,
            individual.element_mut(),
        );
        trace!("Adding individual: {}", individual.key());
        self.individuals.insert(individual.key().clone(), individual)
    }

    pub fn declare_individual(&mut self, key: ElementKey) -> &mut Individual {
        match self.individuals.entry(key) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let mut individual = Individual::new(v.key().clone());
                register(
                    &mut self.namespaces,
                    &self.namespace_to_prefix,
                    individual.element_mut(),
                );
                v.insert(individual)
            }
        }
    }

    pub fn individuals(&self) -> &IndexMap<ElementKey, Individual> {
        &self.individuals
    }

    pub fn individual(&self, key: &ElementKey) -> Option<&Individual> {
        self.individuals.get(key)
    }

    pub fn has_individual(&self, key: &ElementKey) -> bool {
        self.individuals.contains_key(key)
    }

    pub fn add_datatype(&mut self, mut datatype: Datatype) -> Option<Datatype> {
        register(
            &mut self.namespaces,
            &self.namespace_to_prefix,
            datatype.element_mut(),
        );
        trace!("Adding datatype: {}", datatype.key());
        self.datatypes.insert(datatype.key().clone(), datatype)
    }

    pub fn declare_datatype(&mut self, key: ElementKey) -> &mut Datatype {
        match self.datatypes.entry(key) {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let mut datatype = Datatype::new(v.key().clone());
                register(
                    &mut self.namespaces,
                    &self.namespace_to_prefix,
                    datatype.element_mut(),
                );
                v.insert(datatype)
            }
        }
    }

    pub fn datatypes(&self) -> &IndexMap<ElementKey, Datatype> {
        &self.datatypes
    }

    pub fn datatype(&self, key: &ElementKey) -> Option<&Datatype> {
        self.datatypes.get(key)
    }

    pub fn has_datatype(&self, key: &ElementKey) -> bool {
        self.datatypes.contains_key(key)
    }

    pub fn annotation_properties(&self) -> &IndexMap<ElementKey, AnnotationProperty> {
        &self.annotations
    }

    /// Annotate the element with key `key`.
    ///
    /// The annotation property is registered even when the element is
    /// unknown. Returns false if the element is unknown or already
    /// carries this annotation.
    pub fn add_element_annotation(&mut self, key: &ElementKey, annotation: Annotation) -> bool {
        if let Entry::Vacant(v) = self.annotations.entry(annotation.property.clone()) {
            let mut property = AnnotationProperty::new(v.key().clone());
            register(
                &mut self.namespaces,
                &self.namespace_to_prefix,
                property.element_mut(),
            );
            v.insert(property);
        }

        match self.named_mut(key) {
            Some(element) => element.add_annotation(annotation),
            None => {
                debug!("Annotation on unknown element: {}", key);
                false
            }
        }
    }

    fn named_mut(&mut self, key: &ElementKey) -> Option<&mut NamedElement> {
        if let Some(c) = self.classes.get_mut(key) {
            Some(c.element_mut())
        } else if let Some(p) = self.properties.get_mut(key) {
            Some(p.element_mut())
        } else if let Some(i) = self.individuals.get_mut(key) {
            Some(i.element_mut())
        } else if let Some(d) = self.datatypes.get_mut(key) {
            Some(d.element_mut())
        } else if let Some(a) = self.annotations.get_mut(key) {
            Some(a.element_mut())
        } else {
            None
        }
    }

    /// Find an element of any kind by key.
    pub fn element(&self, key: &ElementKey) -> Option<Element<'_>> {
        self.individuals
            .get(key)
            .map(Element::Individual)
            .or_else(|| self.classes.get(key).map(Element::Class))
            .or_else(|| self.properties.get(key).map(Element::Property))
            .or_else(|| self.datatypes.get(key).map(Element::Datatype))
    }

    /// Find the individual, class or property named by `uri`, in that
    /// order of preference.
    pub fn get_element(&self, uri: &str) -> Option<Element<'_>> {
        let key = ElementKey::from_uri(uri);
        self.individuals
            .get(&key)
            .map(Element::Individual)
            .or_else(|| self.classes.get(&key).map(Element::Class))
            .or_else(|| self.properties.get(&key).map(Element::Property))
    }

    // Class hierarchy

    /// Record that `parent` is a super class of `child`.
    ///
    /// The child must exist. A parent that does not (yet) exist is
    /// recorded on the child only; `finish_load` links it once it is
    /// added. When the edge does not point to `owl:Thing` and the
    /// parent resolves to a single package, the child is offered that
    /// package.
    pub fn add_super_class(&mut self, child: &ElementKey, parent: &ElementKey) -> bool {
        let candidate = self.classes.get(parent).and_then(inherited_package);

        let class = match self.classes.get_mut(child) {
            Some(class) => class,
            None => {
                debug!("Super class edge from unknown class: {} -> {}", child, parent);
                return false;
            }
        };

        let defined = class.add_super_class(parent.clone(), thing_key());
        if defined {
            if let Some(package) = candidate {
                class.add_package_candidate(package);
            }
        }

        match self.classes.get_mut(parent) {
            Some(p) => {
                p.add_sub_class(child.clone());
            }
            None => debug!("Super class {} of {} is not declared", parent, child),
        }
        true
    }

    /// Test whether `target` is a super class of `key`, directly or,
    /// with `recursive`, through any chain of super classes.
    pub fn has_super_class(&self, key: &ElementKey, target: &ElementKey, recursive: bool) -> bool {
        match self.classes.get(key) {
            Some(class) if class.has_super_class(target) => true,
            Some(_) if recursive => self.super_class_closure(key).contains(target),
            _ => false,
        }
    }

    /// Every ancestor of `key`.
    ///
    /// `key` itself is only included if it lies on a cycle.
    pub fn super_class_closure(&self, key: &ElementKey) -> BTreeSet<ElementKey> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<&ElementKey> = VecDeque::new();
        queue.push_back(key);

        while let Some(current) = queue.pop_front() {
            if let Some(class) = self.classes.get(current) {
                for parent in class.super_classes() {
                    if seen.insert(parent.clone()) {
                        queue.push_back(parent);
                    }
                }
            }
        }
        seen
    }

    /// Classes without a defined super class, in key order.
    pub fn top_level_classes(&self) -> Vec<&OwlClass> {
        let mut top: Vec<&OwlClass> = self
            .classes
            .values()
            .filter(|c| !c.has_defined_super_class() && c.key() != thing_key())
            .collect();
        top.sort_by(|a, b| a.key().cmp(b.key()));
        top
    }

    // Equivalence

    /// Declare `alias` equivalent to `class`, linking both sides.
    pub fn add_equivalent_class(&mut self, class: &ElementKey, alias: &ElementKey) -> bool {
        if class == alias {
            return false;
        }
        if !(self.classes.contains_key(class) && self.classes.contains_key(alias)) {
            debug!("Equivalence between unknown classes: {} = {}", class, alias);
            return false;
        }

        if let Some(c) = self.classes.get_mut(class) {
            c.add_alias_class(alias.clone());
        }
        if let Some(a) = self.classes.get_mut(alias) {
            a.add_aliased_from(class.clone());
        }
        true
    }

    /// Attach an anonymous equivalent expression to `class`. Every
    /// known member records `class` as a user.
    pub fn add_equivalent_expression(
        &mut self,
        class: &ElementKey,
        expression: EquivalentExpression,
    ) -> bool {
        if !self.classes.contains_key(class) {
            debug!("Equivalent expression on unknown class: {}", class);
            return false;
        }

        for member in expression.members() {
            match self.named_mut(member) {
                Some(element) => {
                    element.add_expression_user(class.clone());
                }
                None => debug!("Unknown member {} in expression of {}", member, class),
            }
        }

        if let Some(c) = self.classes.get_mut(class) {
            c.add_equivalent_expression(expression);
        }
        true
    }

    // Property edges

    pub fn add_property_domain(
        &mut self,
        property: &ElementKey,
        class: &ElementKey,
        restriction: Restriction,
    ) -> bool {
        let (kind, ranges) = match self.properties.get_mut(property) {
            Some(p) => {
                p.add_domain(class.clone(), restriction);
                (p.kind(), p.declared_range().iter().cloned().collect::<Vec<_>>())
            }
            None => {
                debug!("Domain for unknown property: {}", property);
                return false;
            }
        };

        self.wire(property, kind, &[class.clone()], &ranges);
        true
    }

    /// Add a range entry to `property`: a class for object properties,
    /// a datatype for datatype properties.
    pub fn add_property_range(
        &mut self,
        property: &ElementKey,
        range: &ElementKey,
        restriction: Restriction,
    ) -> bool {
        let (kind, domains) = match self.properties.get_mut(property) {
            Some(p) => {
                p.add_range(range.clone(), restriction);
                (p.kind(), p.declared_domain().iter().cloned().collect::<Vec<_>>())
            }
            None => {
                debug!("Range for unknown property: {}", property);
                return false;
            }
        };

        self.wire(property, kind, &domains, &[range.clone()]);
        true
    }

    /// Record that `domain` is restricted on `property` to `range`.
    ///
    /// Both ends become entries of the property, but only this pair is
    /// linked in the class indices.
    pub fn add_property_restriction(
        &mut self,
        property: &ElementKey,
        domain: &ElementKey,
        range: &ElementKey,
        restriction: Restriction,
    ) -> bool {
        let kind = match self.properties.get_mut(property) {
            Some(p) => {
                p.add_restriction(domain.clone(), range.clone(), restriction);
                p.kind()
            }
            None => {
                debug!("Restriction on unknown property: {}", property);
                return false;
            }
        };

        self.wire(property, kind, &[domain.clone()], &[range.clone()]);
        true
    }

    /// Update the class and datatype side indices for `property`,
    /// linking every one of `domains` to every one of `ranges`.
    fn wire(
        &mut self,
        property: &ElementKey,
        kind: PropertyKind,
        domains: &[ElementKey],
        ranges: &[ElementKey],
    ) {
        for d in domains {
            if let Some(c) = self.classes.get_mut(d) {
                c.add_own_property(property.clone());
            }
        }

        match kind {
            PropertyKind::Object => {
                for r in ranges {
                    if let Some(c) = self.classes.get_mut(r) {
                        c.add_range_property(property.clone());
                    }
                }

                for d in domains {
                    for r in ranges {
                        if !(self.classes.contains_key(d) && self.classes.contains_key(r)) {
                            continue;
                        }
                        if let Some(c) = self.classes.get_mut(d) {
                            c.add_from_domain(PropertyClassRef::new(property.clone(), r.clone()));
                        }
                        if let Some(c) = self.classes.get_mut(r) {
                            c.add_to_range(PropertyClassRef::new(property.clone(), d.clone()));
                        }
                    }
                }
            }
            PropertyKind::Datatype => {
                for r in ranges {
                    if let Some(dt) = self.datatypes.get_mut(r) {
                        dt.add_used_by(property.clone());
                    }
                }
            }
        }
    }

    /// Make `inverse` the inverse of `property`. The reverse link is
    /// set too, unless `inverse` already has an inverse of its own.
    ///
    /// Datatype properties have no inverse; asking for one is an
    /// error.
    pub fn set_inverse_property(
        &mut self,
        property: &ElementKey,
        inverse: &ElementKey,
    ) -> Result<bool, SchemaError> {
        for k in [property, inverse] {
            match self.properties.get(k) {
                Some(p) if !p.is_object_property() => {
                    return Err(invalid!("Datatype property {} cannot have an inverse", k));
                }
                Some(_) => {}
                None => {
                    debug!("Inverse link with unknown property: {}", k);
                    return Ok(false);
                }
            }
        }

        if let Some(p) = self.properties.get_mut(property) {
            p.set_inverse(inverse.clone());
        }
        if let Some(p) = self.properties.get_mut(inverse) {
            if p.inverse().is_none() {
                p.set_inverse(property.clone());
            }
        }
        Ok(true)
    }

    pub fn set_functional(&mut self, property: &ElementKey, functional: bool) -> bool {
        match self.properties.get_mut(property) {
            Some(p) => {
                p.set_functional(functional);
                true
            }
            None => false,
        }
    }

    /// Set the cardinality bounds of `property`. `None` leaves a bound
    /// unchanged.
    pub fn set_cardinality(
        &mut self,
        property: &ElementKey,
        min: Option<u32>,
        max: Option<u32>,
    ) -> bool {
        match self.properties.get_mut(property) {
            Some(p) => {
                p.set_cardinality(min, max);
                true
            }
            None => false,
        }
    }

    // Individuals

    /// Record that `individual` is a member of `class`.
    pub fn add_class_assertion(&mut self, individual: &ElementKey, class: &ElementKey) -> bool {
        match self.individuals.get_mut(individual) {
            Some(i) => {
                i.add_class(class.clone());
            }
            None => {
                debug!("Class assertion on unknown individual: {}", individual);
                return false;
            }
        }

        if let Some(c) = self.classes.get_mut(class) {
            c.add_individual(individual.clone());
        }
        true
    }

    /// Rebuild every index that is derived from the primary edges.
    ///
    /// Sub classes, per-class property indices, datatype users,
    /// individual membership and expression users are all
    /// recomputed, so the result does not depend on the order in
    /// which elements and edges were added.
    pub fn finish_load(&mut self) {
        for class in self.classes.values_mut() {
            class.clear_derived_indices();
        }
        for datatype in self.datatypes.values_mut() {
            datatype.clear_used_by();
        }

        let edges: Vec<(ElementKey, ElementKey)> = self
            .classes
            .values()
            .flat_map(|c| {
                c.super_classes()
                    .iter()
                    .map(move |p| (c.key().clone(), p.clone()))
            })
            .collect();
        for (child, parent) in edges {
            if let Some(p) = self.classes.get_mut(&parent) {
                p.add_sub_class(child);
            }
        }

        let properties: Vec<_> = self
            .properties
            .values()
            .map(|p| {
                (
                    p.key().clone(),
                    p.kind(),
                    p.declared_domain().iter().cloned().collect::<Vec<_>>(),
                    p.declared_range().iter().cloned().collect::<Vec<_>>(),
                    p.restrictions().keys().cloned().collect::<Vec<_>>(),
                )
            })
            .collect();
        for (key, kind, domains, ranges, pairs) in properties {
            self.wire(&key, kind, &domains, &ranges);
            for (d, r) in pairs {
                self.wire(&key, kind, &[d], &[r]);
            }
        }

        let memberships: Vec<(ElementKey, ElementKey)> = self
            .individuals
            .values()
            .flat_map(|i| i.classes().iter().map(move |c| (i.key().clone(), c.clone())))
            .collect();
        for (individual, class) in memberships {
            if let Some(c) = self.classes.get_mut(&class) {
                c.add_individual(individual);
            }
        }

        let users: Vec<(ElementKey, ElementKey)> = self
            .classes
            .values()
            .flat_map(|c| {
                c.equivalent_expressions()
                    .iter()
                    .flat_map(|e| e.members().iter())
                    .map(move |m| (m.clone(), c.key().clone()))
            })
            .collect();
        for (member, class) in users {
            if let Some(element) = self.named_mut(&member) {
                element.add_expression_user(class);
            }
        }

        info!(
            "Loaded {} classes, {} properties, {} individuals, {} datatypes",
            self.classes.len(),
            self.properties.len(),
            self.individuals.len(),
            self.datatypes.len()
        );
    }

    // Packages

    pub(crate) fn set_packages(&mut self, packages: Option<BTreeSet<ElementKey>>) {
        self.packages = packages;
    }

    /// True once package extraction has found at least one package.
    pub fn has_packages(&self) -> bool {
        self.packages.as_ref().map_or(false, |p| !p.is_empty())
    }

    /// The package classes, or `None` before package extraction.
    pub fn packages(&self) -> Option<BTreeMap<&ElementKey, &OwlClass>> {
        self.packages.as_ref().map(|keys| {
            keys.iter()
                .filter_map(|k| self.classes.get(k).map(|c| (c.key(), c)))
                .collect()
        })
    }

    pub fn package_keys(&self) -> Option<&BTreeSet<ElementKey>> {
        self.packages.as_ref()
    }

    // Namespaces and prefixes

    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    pub fn default_prefix(&self) -> Option<&str> {
        self.default_prefix.as_deref()
    }

    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefix_to_namespace
    }

    fn add_prefix(&mut self, prefix: String, namespace: String) {
        match self.namespace_to_prefix.get(&namespace) {
            Some(existing) if !existing.is_empty() || prefix.is_empty() => {}
            _ => {
                self.namespace_to_prefix
                    .insert(namespace.clone(), prefix.clone());
            }
        }
        self.prefix_to_namespace.insert(prefix, namespace);
    }

    /// Bind `prefix` to `namespace`.
    ///
    /// The first non-empty prefix bound to a namespace is the one
    /// reported by `get_prefix`.
    pub fn declare_prefix(&mut self, prefix: &str, namespace: &str) -> Result<(), SchemaError> {
        PrefixMapping::default()
            .add_prefix(prefix, namespace)
            .map_err(|_| invalid!("Invalid prefix {:?} for {}", prefix, namespace))?;

        trace!("Declaring prefix {}: {}", prefix, namespace);
        self.add_prefix(prefix.to_string(), namespace.to_string());
        Ok(())
    }

    /// Make `namespace` the namespace this schema owns.
    pub fn set_default_namespace<P: Into<String>, N: Into<String>>(&mut self, prefix: P, namespace: N) {
        let prefix = prefix.into();
        let namespace = namespace.into();

        if let Some(imported) = self.imported_schemas_from_namespace.remove(&namespace) {
            self.imported_schemas.remove(&imported.prefix);
        }
        self.add_prefix(prefix.clone(), namespace.clone());
        self.namespaces.insert(namespace.clone());

        debug!("Default namespace {:?}: {}", prefix, namespace);
        self.default_namespace = Some(namespace);
        self.default_prefix = Some(prefix);
    }

    /// Build the prefix maps, choose the default namespace and record
    /// imported schemas from the declarations in `header`.
    ///
    /// The default namespace is the unprefixed declaration unless that
    /// is a core OWL vocabulary. Failing that, it is a declared
    /// namespace matching the ontology IRI. Every other declared
    /// namespace outside the core vocabularies is an imported schema.
    pub fn compute_prefix_map(&mut self, header: &SchemaHeader) {
        for (prefix, namespace) in &header.prefixes {
            self.add_prefix(prefix.clone(), namespace.clone());
        }

        let default = header
            .default_namespace()
            .filter(|ns| !is_well_known(ns))
            .map(str::to_string)
            .or_else(|| header.about().and_then(|about| about_namespace(header, about)));

        if let Some(namespace) = default {
            let prefix = header
                .prefixes
                .iter()
                .find(|(p, n)| !p.is_empty() && **n == namespace)
                .map(|(p, _)| p.clone())
                .unwrap_or_default();
            self.set_default_namespace(prefix, namespace);
        }

        self.imported_schemas.clear();
        self.imported_schemas_from_namespace.clear();
        for (prefix, namespace) in &self.prefix_to_namespace {
            if prefix.is_empty()
                || Some(namespace) == self.default_namespace.as_ref()
                || is_well_known(namespace)
                || self.imported_schemas_from_namespace.contains_key(namespace)
            {
                continue;
            }

            let imported = Arc::new(ImportedSchema {
                prefix: prefix.clone(),
                namespace: namespace.clone(),
                info: self.repository.get(namespace),
            });
            self.imported_schemas.insert(prefix.clone(), imported.clone());
            self.imported_schemas_from_namespace
                .insert(namespace.clone(), imported);
        }

        debug!(
            "Prefix map: {} prefixes, {} imported schemas",
            self.prefix_to_namespace.len(),
            self.imported_schemas.len()
        );
    }

    pub fn imported_schemas(&self) -> &BTreeMap<String, Arc<ImportedSchema>> {
        &self.imported_schemas
    }

    pub fn imported_schema(&self, prefix: &str) -> Option<&Arc<ImportedSchema>> {
        self.imported_schemas.get(prefix)
    }

    pub fn imported_schema_for_namespace(&self, namespace: &str) -> Option<&Arc<ImportedSchema>> {
        self.imported_schemas_from_namespace.get(namespace)
    }

    /// The prefix bound to `namespace`, or the conventional prefix of
    /// a core vocabulary.
    pub fn get_prefix(&self, namespace: &str) -> Option<&str> {
        self.namespace_to_prefix
            .get(namespace)
            .map(String::as_str)
            .or_else(|| Namespace::try_from(namespace).ok().map(|ns| ns.prefix()))
    }

    pub fn get_namespace_from_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefix_to_namespace.get(prefix).map(String::as_str)
    }

    /// True if `key` lives in a namespace other than the default one.
    ///
    /// Core vocabularies and keys without a namespace are never
    /// foreign, nor is anything when no default namespace is known.
    pub fn is_foreign(&self, key: &ElementKey) -> bool {
        match (self.default_namespace.as_deref(), key.namespace()) {
            (Some(default), Some(ns)) => {
                trim_separator(default) != trim_separator(ns) && !is_well_known(ns)
            }
            _ => false,
        }
    }

    fn prefix_mapping(&self) -> PrefixMapping {
        let mut mapping = PrefixMapping::default();
        for (prefix, namespace) in &self.prefix_to_namespace {
            if prefix.is_empty() {
                mapping.set_default(namespace);
            } else if mapping.add_prefix(prefix, namespace).is_err() {
                debug!("Skipping invalid prefix: {}", prefix);
            }
        }
        if let Some(namespace) = &self.default_namespace {
            mapping.set_default(namespace);
        }
        mapping
    }

    /// Expand a CURIE such as `dc:title` with the declared prefixes.
    pub fn expand_curie(&self, curie: &str) -> Option<String> {
        self.prefix_mapping().expand_curie_string(curie).ok()
    }

    /// Abbreviate `uri` with the declared prefixes, if one applies.
    pub fn shrink_uri(&self, uri: &str) -> Option<String> {
        match self.prefix_mapping().shrink_iri(uri) {
            Ok(curie) => Some(format!("{}", curie)),
            Err(_) => None,
        }
    }
}

/// The declared namespace that names the same resource as `about`.
fn about_namespace(header: &SchemaHeader, about: &str) -> Option<String> {
    let about = trim_separator(about);
    header
        .prefixes
        .values()
        .filter(|ns| !is_well_known(ns))
        .find(|ns| {
            let ns = trim_separator(ns);
            ns == about || ns.ends_with(about)
        })
        .cloned()
}
