//! Bounded dependency sub-graphs.
//!
//! A dependency closure is the set of classes reachable from one or
//! more seed classes. The walk is breadth first and follows:
//!
//! - property edges, from a domain class to its range classes and
//!   back, always;
//! - super class edges, with `include_parent_relations`;
//! - sub class edges, with `include_sub_classes`;
//! - alias edges in both directions, with `include_alias`.
//!
//! With `indirect_relations`, the property edges of every ancestor of
//! a class are followed as if they were its own.
//!
//! The seeds are part of the result at distance 0. `owl:Thing` never
//! is. A class is added at most once and expanded at most once, so
//! cyclic hierarchies are safe.
use crate::key::ElementKey;
use crate::model::{Named, OwlClass};
use crate::schema::OwlSchema;
use crate::vocab::thing_key;

use indexmap::IndexMap;
use log::{debug, trace};

use std::collections::VecDeque;

/// Bounds and inclusion rules for a dependency closure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DependencyFilter {
    /// Maximum number of hops from a seed; `None` for no bound.
    pub maximum_radius: Option<usize>,
    pub include_parent_relations: bool,
    pub include_sub_classes: bool,
    pub include_alias: bool,
    pub indirect_relations: bool,
    /// Expand foreign classes once reached. They are included either
    /// way.
    pub include_foreign_disconnected: bool,
    /// Hint for renderers only.
    pub show_own_elements_in_bold: bool,
}

impl Default for DependencyFilter {
    fn default() -> Self {
        DependencyFilter {
            maximum_radius: Some(1),
            include_parent_relations: true,
            include_sub_classes: false,
            include_alias: true,
            indirect_relations: false,
            include_foreign_disconnected: true,
            show_own_elements_in_bold: false,
        }
    }
}

impl DependencyFilter {
    pub fn unbounded() -> DependencyFilter {
        DependencyFilter {
            maximum_radius: None,
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius: Option<usize>) -> Self {
        self.maximum_radius = radius;
        self
    }

    /// Whether a renderer should emphasise `key`.
    pub fn emphasize(&self, schema: &OwlSchema, key: &ElementKey) -> bool {
        self.show_own_elements_in_bold && !schema.is_foreign(key)
    }
}

/// The result of a dependency walk.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DependencyClosure {
    distances: IndexMap<ElementKey, usize>,
    visits: usize,
    expanded: usize,
}

impl DependencyClosure {
    /// Hops from the nearest seed, if `key` was reached.
    pub fn distance(&self, key: &ElementKey) -> Option<usize> {
        self.distances.get(key).copied()
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.distances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Keys in the order they were reached.
    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.distances.keys()
    }

    pub fn sorted_keys(&self) -> Vec<&ElementKey> {
        let mut keys: Vec<_> = self.distances.keys().collect();
        keys.sort();
        keys
    }

    /// How many times the walk arrived at a class, counting arrivals
    /// at classes already in the result.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// How many classes had their neighbours followed.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Resolve the keys against `schema`.
    pub fn classes<'a>(&self, schema: &'a OwlSchema) -> IndexMap<ElementKey, &'a OwlClass> {
        self.distances
            .keys()
            .filter_map(|k| schema.owl_class(k).map(|c| (k.clone(), c)))
            .collect()
    }

    fn admit(&mut self, key: &ElementKey, distance: usize) -> bool {
        self.visits += 1;
        if self.distances.contains_key(key) {
            return false;
        }
        self.distances.insert(key.clone(), distance);
        true
    }
}

fn neighbours<'a>(
    schema: &'a OwlSchema,
    class: &'a OwlClass,
    filter: &DependencyFilter,
) -> Vec<&'a ElementKey> {
    let mut next: Vec<&ElementKey> = Vec::new();

    if filter.include_parent_relations {
        next.extend(class.super_classes());
    }
    if filter.include_sub_classes {
        next.extend(class.sub_classes());
    }

    next.extend(class.from_domain().keys());
    next.extend(class.to_range().keys());
    if filter.indirect_relations {
        for ancestor in schema.super_class_closure(class.key()) {
            if let Some(a) = schema.owl_class(&ancestor) {
                next.extend(a.from_domain().keys());
                next.extend(a.to_range().keys());
            }
        }
    }

    if filter.include_alias {
        next.extend(class.alias_classes());
        next.extend(class.aliased_from());
    }
    next
}

/// Walk from `seeds` under `filter`. Seeds that are not classes of
/// `schema` are ignored.
pub fn dependency_closure(
    schema: &OwlSchema,
    seeds: &[ElementKey],
    filter: &DependencyFilter,
) -> DependencyClosure {
    let mut closure = DependencyClosure::default();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if seed != thing_key() && schema.has_owl_class(seed) && closure.admit(seed, 0) {
            queue.push_back((seed, 0));
        } else if !schema.has_owl_class(seed) {
            debug!("Dependency seed is not a class: {}", seed);
        }
    }

    while let Some((key, distance)) = queue.pop_front() {
        if filter.maximum_radius.map_or(false, |r| distance >= r) {
            continue;
        }
        if distance > 0 && !filter.include_foreign_disconnected && schema.is_foreign(key) {
            trace!("Not expanding foreign class {}", key);
            continue;
        }
        let class = match schema.owl_class(key) {
            Some(class) => class,
            None => continue,
        };
        closure.expanded += 1;

        for next in neighbours(schema, class, filter) {
            if next == thing_key() || !schema.has_owl_class(next) {
                continue;
            }
            if closure.admit(next, distance + 1) {
                queue.push_back((next, distance + 1));
            }
        }
    }

    trace!(
        "Dependency closure of {} seeds: {} classes",
        seeds.len(),
        closure.len()
    );
    closure
}

impl OwlSchema {
    /// The classes that `seed` depends on under `filter`, `seed`
    /// included.
    pub fn dependent_classes(
        &self,
        seed: &ElementKey,
        filter: &DependencyFilter,
    ) -> IndexMap<ElementKey, &OwlClass> {
        self.dependency_closure(seed, filter).classes(self)
    }

    pub fn dependency_closure(
        &self,
        seed: &ElementKey,
        filter: &DependencyFilter,
    ) -> DependencyClosure {
        dependency_closure(self, std::slice::from_ref(seed), filter)
    }

    /// As [`dependent_classes`](OwlSchema::dependent_classes), seeded
    /// with the domain and range classes of `property`.
    pub fn dependent_classes_of_property(
        &self,
        property: &ElementKey,
        filter: &DependencyFilter,
    ) -> IndexMap<ElementKey, &OwlClass> {
        let seeds: Vec<ElementKey> = match self.owl_property(property) {
            Some(p) => p.domain().keys().chain(p.range().keys()).cloned().collect(),
            None => {
                debug!("Dependency seed is not a property: {}", property);
                return IndexMap::new();
            }
        };
        dependency_closure(self, &seeds, filter).classes(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{OwlProperty, Restriction};
    use pretty_assertions::assert_eq;

    const NS: &str = "http://www.example.com/onto#";

    fn key(s: &str) -> ElementKey {
        ElementKey::new(NS, s)
    }

    /// A chain A -> B -> C -> D through object properties, with E
    /// a sub class of A and F an alias of A.
    fn chain() -> OwlSchema {
        let mut s = OwlSchema::default();
        for c in &["A", "B", "C", "D", "E", "F", "Top"] {
            s.declare_class(key(c));
        }
        for (p, d, r) in &[("ab", "A", "B"), ("bc", "B", "C"), ("cd", "C", "D")] {
            s.add_owl_property(OwlProperty::object(key(p)));
            s.add_property_domain(&key(p), &key(d), Restriction::default());
            s.add_property_range(&key(p), &key(r), Restriction::default());
        }
        s.add_super_class(&key("E"), &key("A"));
        s.add_super_class(&key("A"), &key("Top"));
        s.add_equivalent_class(&key("A"), &key("F"));
        s.finish_load();
        s
    }

    fn names(c: &DependencyClosure) -> Vec<&str> {
        c.sorted_keys().iter().map(|k| k.name()).collect()
    }

    #[test]
    fn test_default_radius() {
        let s = chain();
        let c = s.dependency_closure(&key("A"), &DependencyFilter::default());
        assert_eq!(names(&c), vec!["A", "B", "F", "Top"]);
        assert_eq!(c.distance(&key("A")), Some(0));
        assert_eq!(c.distance(&key("B")), Some(1));
    }

    #[test]
    fn test_radius_bound() {
        let s = chain();
        for r in 0..4 {
            let filter = DependencyFilter::default().with_radius(Some(r));
            let c = s.dependency_closure(&key("A"), &filter);
            assert!(c.keys().all(|k| c.distance(k).unwrap() <= r));
        }
        let c = s.dependency_closure(&key("A"), &DependencyFilter::unbounded());
        assert_eq!(c.distance(&key("D")), Some(3));
    }

    #[test]
    fn test_flags() {
        let s = chain();
        let filter = DependencyFilter {
            include_parent_relations: false,
            include_alias: false,
            include_sub_classes: true,
            ..Default::default()
        };
        let c = s.dependency_closure(&key("A"), &filter);
        assert_eq!(names(&c), vec!["A", "B", "E"]);
    }

    #[test]
    fn test_indirect_relations() {
        let s = chain();
        let direct = s.dependency_closure(&key("E"), &DependencyFilter::default());
        assert!(!direct.contains(&key("B")));

        let filter = DependencyFilter {
            indirect_relations: true,
            ..Default::default()
        };
        let indirect = s.dependency_closure(&key("E"), &filter);
        assert!(indirect.contains(&key("B")));
    }

    #[test]
    fn test_no_revisit_on_cycle() {
        let mut s = chain();
        s.add_super_class(&key("Top"), &key("A"));
        s.finish_load();

        let filter = DependencyFilter {
            include_sub_classes: true,
            ..DependencyFilter::unbounded()
        };
        let c = s.dependency_closure(&key("A"), &filter);
        assert!(c.len() < c.visits());
        assert_eq!(c.expanded(), c.len());
        assert_eq!(c.len(), 7);
    }

    #[test]
    fn test_diamond_expands_once() {
        let mut s = OwlSchema::default();
        for c in &["A", "B", "C", "D"] {
            s.declare_class(key(c));
        }
        s.add_super_class(&key("D"), &key("B"));
        s.add_super_class(&key("D"), &key("C"));
        s.add_super_class(&key("B"), &key("A"));
        s.add_super_class(&key("C"), &key("A"));
        s.finish_load();

        let c = s.dependency_closure(&key("D"), &DependencyFilter::unbounded());
        assert_eq!(c.len(), 4);
        assert_eq!(c.visits(), 5);
        assert_eq!(c.expanded(), 4);
        assert_eq!(c.distance(&key("A")), Some(2));
    }

    #[test]
    fn test_foreign_not_expanded() {
        let mut s = chain();
        s.set_default_namespace("ex", NS);
        let far = ElementKey::new("http://www.example.com/other#", "Far");
        let farther = ElementKey::new("http://www.example.com/other#", "Farther");
        s.declare_class(far.clone());
        s.declare_class(farther.clone());
        s.add_super_class(&key("A"), &far);
        s.add_super_class(&far, &farther);
        s.finish_load();

        let filter = DependencyFilter::unbounded();
        assert!(s.dependency_closure(&key("A"), &filter).contains(&farther));

        let filter = DependencyFilter {
            include_foreign_disconnected: false,
            ..filter
        };
        let c = s.dependency_closure(&key("A"), &filter);
        assert!(c.contains(&far));
        assert!(!c.contains(&farther));
        assert!(filter.emphasize(&s, &key("A")) == filter.show_own_elements_in_bold);
    }

    #[test]
    fn test_unknown_seed() {
        let s = chain();
        assert!(s.dependent_classes(&key("Missing"), &DependencyFilter::default()).is_empty());
    }

    #[test]
    fn test_property_seed() {
        let s = chain();
        let filter = DependencyFilter::default().with_radius(Some(0));
        let classes = s.dependent_classes_of_property(&key("bc"), &filter);
        let mut names: Vec<_> = classes.keys().map(|k| k.name()).collect();
        names.sort();
        assert_eq!(names, vec!["B", "C"]);
    }
}
