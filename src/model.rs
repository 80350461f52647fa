//! The elements of an OWL schema.
//!
//! # Overview
//!
//! Classes, properties, individuals and datatypes all share a
//! [`NamedElement`] carrying their key, label, documentation and
//! annotations. They are reached through the [`Named`] trait.
//!
//! Elements never hold references to each other. Every relationship
//! (super class, domain, alias, membership and so on) is stored as an
//! [`ElementKey`] and resolved through the owning
//! [`OwlSchema`](crate::schema::OwlSchema). Relationships with two
//! sides are kept in step by the schema, which updates both elements
//! in a single operation.
use crate::key::ElementKey;
use crate::vocab::DocumentationKind;

use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AnnotationValue {
    Literal {
        literal: String,
        lang: Option<String>,
    },
    IRI(String),
}

impl AnnotationValue {
    pub fn literal<S: Into<String>>(s: S) -> AnnotationValue {
        AnnotationValue::Literal {
            literal: s.into(),
            lang: None,
        }
    }

    /// The textual content of the value, ignoring any language tag.
    pub fn as_str(&self) -> &str {
        match self {
            AnnotationValue::Literal { literal, .. } => literal,
            AnnotationValue::IRI(iri) => iri,
        }
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Annotation {
    pub property: ElementKey,
    pub value: AnnotationValue,
}

/// Human-facing documentation gathered from well-known annotations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Documentation {
    pub description: Option<String>,
    pub comments: Vec<String>,
    pub version_info: Option<String>,
    pub see_also: Vec<String>,
    pub is_defined_by: Option<String>,
}

impl Documentation {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.comments.is_empty()
            && self.version_info.is_none()
            && self.see_also.is_empty()
            && self.is_defined_by.is_none()
    }
}

/// The attributes shared by every kind of schema element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NamedElement {
    key: ElementKey,
    prefix: Option<String>,
    label: Option<String>,
    documentation: Documentation,
    annotations: BTreeSet<Annotation>,
    expression_users: BTreeSet<ElementKey>,
}

impl NamedElement {
    pub fn new(key: ElementKey) -> NamedElement {
        NamedElement {
            key,
            prefix: None,
            label: None,
            documentation: Documentation::default(),
            annotations: BTreeSet::new(),
            expression_users: BTreeSet::new(),
        }
    }

    pub fn key(&self) -> &ElementKey {
        &self.key
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn set_prefix<S: Into<String>>(&mut self, prefix: Option<S>) {
        self.prefix = prefix.map(Into::into);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.label = Some(label.into());
    }

    pub fn documentation(&self) -> &Documentation {
        &self.documentation
    }

    pub fn documentation_mut(&mut self) -> &mut Documentation {
        &mut self.documentation
    }

    pub fn annotations(&self) -> &BTreeSet<Annotation> {
        &self.annotations
    }

    /// Add an annotation.
    ///
    /// When the annotation property is one of the documentation
    /// properties, the value also fills the label or documentation
    /// bundle. Labels and single-valued slots keep the first value
    /// seen; comments and `seeAlso` accumulate.
    ///
    /// Returns false if the same annotation was already present.
    pub fn add_annotation(&mut self, annotation: Annotation) -> bool {
        if self.annotations.contains(&annotation) {
            return false;
        }

        let text = annotation.value.as_str().to_string();
        match DocumentationKind::for_property(&annotation.property) {
            Some(DocumentationKind::Label) => {
                if self.label.is_none() {
                    self.label = Some(text);
                }
            }
            Some(DocumentationKind::Comment) => self.documentation.comments.push(text),
            Some(DocumentationKind::Description) => {
                self.documentation.description.get_or_insert(text);
            }
            Some(DocumentationKind::SeeAlso) => self.documentation.see_also.push(text),
            Some(DocumentationKind::IsDefinedBy) => {
                self.documentation.is_defined_by.get_or_insert(text);
            }
            Some(DocumentationKind::VersionInfo) => {
                self.documentation.version_info.get_or_insert(text);
            }
            None => {}
        }

        self.annotations.insert(annotation)
    }

    /// The classes whose equivalent expressions mention this element.
    pub fn expression_users(&self) -> &BTreeSet<ElementKey> {
        &self.expression_users
    }

    pub(crate) fn add_expression_user(&mut self, class: ElementKey) -> bool {
        self.expression_users.insert(class)
    }
}

/// Access to the shared attributes of an element.
pub trait Named {
    fn element(&self) -> &NamedElement;

    fn element_mut(&mut self) -> &mut NamedElement;

    fn key(&self) -> &ElementKey {
        self.element().key()
    }

    fn namespace(&self) -> Option<&str> {
        self.element().key().namespace()
    }

    fn name(&self) -> &str {
        self.element().key().name()
    }

    fn label(&self) -> Option<&str> {
        self.element().label()
    }

    /// The label when there is one, the local name otherwise.
    fn display_name(&self) -> &str {
        self.label().unwrap_or_else(|| self.name())
    }
}

macro_rules! named {
    ($($type:ident),*) => {
        $(
            impl Named for $type {
                fn element(&self) -> &NamedElement {
                    &self.element
                }

                fn element_mut(&mut self) -> &mut NamedElement {
                    &mut self.element
                }
            }
        )*
    };
}

/// The package status of a class.
///
/// The two `Forced` states come from configuration and are never
/// changed by inference.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PackageType {
    Undefined,
    IsPackage,
    IsNotPackage,
    ForcedPackage,
    ForcedNotPackage,
}

impl Default for PackageType {
    fn default() -> Self {
        PackageType::Undefined
    }
}

impl PackageType {
    pub fn is_package(&self) -> bool {
        matches!(self, PackageType::IsPackage | PackageType::ForcedPackage)
    }
}

/// One end of a property relation, seen from the class at the other
/// end.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PropertyClassRef {
    pub property: ElementKey,
    pub class: ElementKey,
}

impl PropertyClassRef {
    pub fn new(property: ElementKey, class: ElementKey) -> PropertyClassRef {
        PropertyClassRef { property, class }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ExpressionKind {
    Intersection,
    Union,
    Enumeration,
}

/// An anonymous class expression declared equivalent to a named class.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EquivalentExpression {
    kind: ExpressionKind,
    members: Vec<ElementKey>,
    member_index: BTreeSet<ElementKey>,
}

impl EquivalentExpression {
    pub fn new(kind: ExpressionKind) -> EquivalentExpression {
        EquivalentExpression {
            kind,
            members: Vec::new(),
            member_index: BTreeSet::new(),
        }
    }

    pub fn with_members<I: IntoIterator<Item = ElementKey>>(
        kind: ExpressionKind,
        members: I,
    ) -> EquivalentExpression {
        let mut expr = EquivalentExpression::new(kind);
        for m in members {
            expr.add_member(m);
        }
        expr
    }

    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    /// Members in the order they were first added.
    pub fn members(&self) -> &[ElementKey] {
        &self.members
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.member_index.contains(key)
    }

    /// Returns false, leaving the expression unchanged, for a
    /// duplicate member.
    pub fn add_member(&mut self, key: ElementKey) -> bool {
        if self.member_index.insert(key.clone()) {
            self.members.push(key);
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwlClass {
    element: NamedElement,
    super_classes: BTreeSet<ElementKey>,
    sub_classes: BTreeSet<ElementKey>,
    has_defined_super_class: bool,
    package_type: PackageType,
    package_key: Option<ElementKey>,
    package_list: Option<BTreeSet<ElementKey>>,
    individuals: BTreeSet<ElementKey>,
    from_domain: BTreeMap<ElementKey, BTreeSet<PropertyClassRef>>,
    to_range: BTreeMap<ElementKey, BTreeSet<PropertyClassRef>>,
    own_properties: BTreeSet<ElementKey>,
    range_properties: BTreeSet<ElementKey>,
    alias_classes: BTreeSet<ElementKey>,
    aliased_from: BTreeSet<ElementKey>,
    equivalent_expressions: Vec<EquivalentExpression>,
}

named!(OwlClass);

impl OwlClass {
    pub fn new(key: ElementKey) -> OwlClass {
        OwlClass {
            element: NamedElement::new(key),
            super_classes: BTreeSet::new(),
            sub_classes: BTreeSet::new(),
            has_defined_super_class: false,
            package_type: PackageType::Undefined,
            package_key: None,
            package_list: None,
            individuals: BTreeSet::new(),
            from_domain: BTreeMap::new(),
            to_range: BTreeMap::new(),
            own_properties: BTreeSet::new(),
            range_properties: BTreeSet::new(),
            alias_classes: BTreeSet::new(),
            aliased_from: BTreeSet::new(),
            equivalent_expressions: Vec::new(),
        }
    }

    pub fn super_classes(&self) -> &BTreeSet<ElementKey> {
        &self.super_classes
    }

    pub fn sub_classes(&self) -> &BTreeSet<ElementKey> {
        &self.sub_classes
    }

    /// Direct super class test. See
    /// [`OwlSchema::has_super_class`](crate::schema::OwlSchema::has_super_class)
    /// for the transitive form.
    pub fn has_super_class(&self, key: &ElementKey) -> bool {
        self.super_classes.contains(key)
    }

    /// True iff at least one super class edge points somewhere other
    /// than `owl:Thing`.
    pub fn has_defined_super_class(&self) -> bool {
        self.has_defined_super_class
    }

    /// Record a super class edge.
    ///
    /// Returns true when the edge is a defined one, that is when
    /// `parent` is not `thing`.
    pub(crate) fn add_super_class(&mut self, parent: ElementKey, thing: &ElementKey) -> bool {
        let defined = &parent != thing;
        if defined {
            self.has_defined_super_class = true;
        }
        self.super_classes.insert(parent);
        defined
    }

    pub(crate) fn add_sub_class(&mut self, child: ElementKey) -> bool {
        self.sub_classes.insert(child)
    }

    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    pub(crate) fn set_package_type(&mut self, package_type: PackageType) {
        self.package_type = package_type;
    }

    pub fn is_package(&self) -> bool {
        self.package_type.is_package()
    }

    /// The single package this class belongs to, when resolved.
    pub fn package_key(&self) -> Option<&ElementKey> {
        self.package_key.as_ref()
    }

    /// Candidate packages, present only when more than one package
    /// claims this class.
    pub fn package_list(&self) -> Option<&BTreeSet<ElementKey>> {
        self.package_list.as_ref()
    }

    pub fn is_in_package(&self) -> bool {
        self.package_key.is_some()
    }

    /// Offer `package` as the package of this class.
    ///
    /// A second, different, candidate does not replace the first:
    /// both move to the package list and the package key is cleared.
    pub(crate) fn add_package_candidate(&mut self, package: ElementKey) {
        if let Some(list) = self.package_list.as_mut() {
            list.insert(package);
            return;
        }

        match self.package_key.take() {
            None => self.package_key = Some(package),
            Some(current) if current == package => self.package_key = Some(current),
            Some(current) => {
                let mut list = BTreeSet::new();
                list.insert(current);
                list.insert(package);
                self.package_list = Some(list);
            }
        }
    }

    pub(crate) fn clear_package(&mut self) {
        self.package_type = PackageType::Undefined;
        self.package_key = None;
        self.package_list = None;
    }

    pub fn individuals(&self) -> &BTreeSet<ElementKey> {
        &self.individuals
    }

    pub(crate) fn add_individual(&mut self, individual: ElementKey) -> bool {
        self.individuals.insert(individual)
    }

    /// Properties having this class in their domain, keyed by the
    /// range class at the other end.
    pub fn from_domain(&self) -> &BTreeMap<ElementKey, BTreeSet<PropertyClassRef>> {
        &self.from_domain
    }

    /// Properties having this class in their range, keyed by the
    /// domain class at the other end.
    pub fn to_range(&self) -> &BTreeMap<ElementKey, BTreeSet<PropertyClassRef>> {
        &self.to_range
    }

    /// Every property that links this class, as domain, to another class.
    pub fn from_domain_properties(&self) -> BTreeSet<&ElementKey> {
        self.from_domain
            .values()
            .flat_map(|refs| refs.iter().map(|r| &r.property))
            .collect()
    }

    pub(crate) fn add_from_domain(&mut self, r: PropertyClassRef) -> bool {
        self.from_domain.entry(r.class.clone()).or_default().insert(r)
    }

    pub(crate) fn add_to_range(&mut self, r: PropertyClassRef) -> bool {
        self.to_range.entry(r.class.clone()).or_default().insert(r)
    }

    pub fn own_properties(&self) -> &BTreeSet<ElementKey> {
        &self.own_properties
    }

    pub fn range_properties(&self) -> &BTreeSet<ElementKey> {
        &self.range_properties
    }

    pub(crate) fn add_own_property(&mut self, property: ElementKey) -> bool {
        self.own_properties.insert(property)
    }

    pub(crate) fn add_range_property(&mut self, property: ElementKey) -> bool {
        self.range_properties.insert(property)
    }

    /// Clear everything that is rebuilt from the primary edges by
    /// `OwlSchema::finish_load`.
    pub(crate) fn clear_derived_indices(&mut self) {
        self.sub_classes.clear();
        self.from_domain.clear();
        self.to_range.clear();
        self.own_properties.clear();
        self.range_properties.clear();
        self.individuals.clear();
    }

    /// Classes this class was declared equivalent to.
    pub fn alias_classes(&self) -> &BTreeSet<ElementKey> {
        &self.alias_classes
    }

    /// Classes that declared this class as an equivalent.
    pub fn aliased_from(&self) -> &BTreeSet<ElementKey> {
        &self.aliased_from
    }

    pub(crate) fn add_alias_class(&mut self, alias: ElementKey) -> bool {
        self.alias_classes.insert(alias)
    }

    pub(crate) fn add_aliased_from(&mut self, from: ElementKey) -> bool {
        self.aliased_from.insert(from)
    }

    pub fn equivalent_expressions(&self) -> &[EquivalentExpression] {
        &self.equivalent_expressions
    }

    pub(crate) fn add_equivalent_expression(&mut self, expr: EquivalentExpression) {
        self.equivalent_expressions.push(expr);
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Quantifier {
    Some,
    Only,
}

/// Constraints attached to one domain or range entry of a property.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Restriction {
    pub min_cardinality: Option<u32>,
    pub max_cardinality: Option<u32>,
    pub quantifier: Option<Quantifier>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PropertyKind {
    Datatype,
    Object,
}

/// A datatype or object property.
///
/// For object properties the range holds classes; for datatype
/// properties it holds datatypes. Only object properties have an
/// inverse.
///
/// Domain and range entries declared on the property itself link every
/// domain to every range. Entries that come from a class restriction
/// only link the domain and range of that restriction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwlProperty {
    element: NamedElement,
    kind: PropertyKind,
    domain: BTreeMap<ElementKey, Restriction>,
    range: BTreeMap<ElementKey, Restriction>,
    declared_domain: BTreeSet<ElementKey>,
    declared_range: BTreeSet<ElementKey>,
    restrictions: BTreeMap<(ElementKey, ElementKey), Restriction>,
    inverse: Option<ElementKey>,
    functional: bool,
    min_cardinality: Option<u32>,
    max_cardinality: Option<u32>,
}

named!(OwlProperty);

impl OwlProperty {
    pub fn new(key: ElementKey, kind: PropertyKind) -> OwlProperty {
        OwlProperty {
            element: NamedElement::new(key),
            kind,
            domain: BTreeMap::new(),
            range: BTreeMap::new(),
            declared_domain: BTreeSet::new(),
            declared_range: BTreeSet::new(),
            restrictions: BTreeMap::new(),
            inverse: None,
            functional: false,
            min_cardinality: None,
            max_cardinality: None,
        }
    }

    pub fn object<K: Into<ElementKey>>(key: K) -> OwlProperty {
        OwlProperty::new(key.into(), PropertyKind::Object)
    }

    pub fn datatype<K: Into<ElementKey>>(key: K) -> OwlProperty {
        OwlProperty::new(key.into(), PropertyKind::Datatype)
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_object_property(&self) -> bool {
        self.kind == PropertyKind::Object
    }

    pub fn domain(&self) -> &BTreeMap<ElementKey, Restriction> {
        &self.domain
    }

    pub fn range(&self) -> &BTreeMap<ElementKey, Restriction> {
        &self.range
    }

    /// Domain entries declared on the property, as opposed to those
    /// only reached through a restriction.
    pub fn declared_domain(&self) -> &BTreeSet<ElementKey> {
        &self.declared_domain
    }

    pub fn declared_range(&self) -> &BTreeSet<ElementKey> {
        &self.declared_range
    }

    /// Restrictions on this property, keyed by (restricted class, filler).
    pub fn restrictions(&self) -> &BTreeMap<(ElementKey, ElementKey), Restriction> {
        &self.restrictions
    }

    pub(crate) fn add_domain(&mut self, class: ElementKey, restriction: Restriction) {
        self.declared_domain.insert(class.clone());
        self.domain.insert(class, restriction);
    }

    pub(crate) fn add_range(&mut self, range: ElementKey, restriction: Restriction) {
        self.declared_range.insert(range.clone());
        self.range.insert(range, restriction);
    }

    pub(crate) fn add_restriction(
        &mut self,
        domain: ElementKey,
        range: ElementKey,
        restriction: Restriction,
    ) {
        self.domain
            .entry(domain.clone())
            .or_insert_with(|| restriction.clone());
        self.range
            .entry(range.clone())
            .or_insert_with(|| restriction.clone());
        self.restrictions.insert((domain, range), restriction);
    }

    pub fn inverse(&self) -> Option<&ElementKey> {
        self.inverse.as_ref()
    }

    pub(crate) fn set_inverse(&mut self, inverse: ElementKey) {
        self.inverse = Some(inverse);
    }

    pub fn is_functional(&self) -> bool {
        self.functional
    }

    pub(crate) fn set_functional(&mut self, functional: bool) {
        self.functional = functional;
    }

    pub fn min_cardinality(&self) -> Option<u32> {
        self.min_cardinality
    }

    pub fn max_cardinality(&self) -> Option<u32> {
        self.max_cardinality
    }

    pub(crate) fn set_cardinality(&mut self, min: Option<u32>, max: Option<u32>) {
        if min.is_some() {
            self.min_cardinality = min;
        }
        if max.is_some() {
            self.max_cardinality = max;
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Individual {
    element: NamedElement,
    classes: BTreeSet<ElementKey>,
}

named!(Individual);

impl Individual {
    pub fn new<K: Into<ElementKey>>(key: K) -> Individual {
        Individual {
            element: NamedElement::new(key.into()),
            classes: BTreeSet::new(),
        }
    }

    /// The classes this individual is asserted to be a member of.
    pub fn classes(&self) -> &BTreeSet<ElementKey> {
        &self.classes
    }

    pub(crate) fn add_class(&mut self, class: ElementKey) -> bool {
        self.classes.insert(class)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Datatype {
    element: NamedElement,
    used_by: BTreeSet<ElementKey>,
}

named!(Datatype);

impl Datatype {
    pub fn new<K: Into<ElementKey>>(key: K) -> Datatype {
        Datatype {
            element: NamedElement::new(key.into()),
            used_by: BTreeSet::new(),
        }
    }

    /// Datatype properties whose range includes this datatype.
    pub fn used_by(&self) -> &BTreeSet<ElementKey> {
        &self.used_by
    }

    pub(crate) fn add_used_by(&mut self, property: ElementKey) -> bool {
        self.used_by.insert(property)
    }

    pub(crate) fn clear_used_by(&mut self) {
        self.used_by.clear();
    }
}

/// An annotation property seen while loading.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnnotationProperty {
    element: NamedElement,
}

named!(AnnotationProperty);

impl AnnotationProperty {
    pub fn new<K: Into<ElementKey>>(key: K) -> AnnotationProperty {
        AnnotationProperty {
            element: NamedElement::new(key.into()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ElementKind {
    Class,
    DatatypeProperty,
    ObjectProperty,
    Individual,
    Datatype,
}

/// A borrowed schema element of any kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Element<'a> {
    Class(&'a OwlClass),
    Property(&'a OwlProperty),
    Individual(&'a Individual),
    Datatype(&'a Datatype),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Class(_) => ElementKind::Class,
            Element::Property(p) => match p.kind() {
                PropertyKind::Datatype => ElementKind::DatatypeProperty,
                PropertyKind::Object => ElementKind::ObjectProperty,
            },
            Element::Individual(_) => ElementKind::Individual,
            Element::Datatype(_) => ElementKind::Datatype,
        }
    }

    pub fn named(&self) -> &'a dyn Named {
        match *self {
            Element::Class(c) => c,
            Element::Property(p) => p,
            Element::Individual(i) => i,
            Element::Datatype(d) => d,
        }
    }

    pub fn key(&self) -> &'a ElementKey {
        self.named().key()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> ElementKey {
        ElementKey::new("http://www.example.com/onto#", s)
    }

    fn thing() -> ElementKey {
        crate::vocab::thing_key().clone()
    }

    #[test]
    fn test_defined_super_class() {
        let mut c = OwlClass::new(key("A"));
        assert!(!c.has_defined_super_class());

        assert!(!c.add_super_class(thing(), &thing()));
        assert!(!c.has_defined_super_class());

        assert!(c.add_super_class(key("B"), &thing()));
        assert!(c.has_defined_super_class());
        assert!(c.has_super_class(&key("B")));
        assert!(c.has_super_class(&thing()));
    }

    #[test]
    fn test_package_candidate_single() {
        let mut c = OwlClass::new(key("A"));
        c.add_package_candidate(key("P"));
        c.add_package_candidate(key("P"));
        assert_eq!(c.package_key(), Some(&key("P")));
        assert!(c.package_list().is_none());
    }

    #[test]
    fn test_package_candidate_conflict() {
        let mut c = OwlClass::new(key("A"));
        c.add_package_candidate(key("P"));
        c.add_package_candidate(key("Q"));
        assert_eq!(c.package_key(), None);
        assert!(!c.is_in_package());

        let list: Vec<_> = c.package_list().unwrap().iter().cloned().collect();
        assert_eq!(list, vec![key("P"), key("Q")]);

        c.add_package_candidate(key("R"));
        assert_eq!(c.package_list().unwrap().len(), 3);
    }

    #[test]
    fn test_from_domain_keyed_by_other_class() {
        let mut c = OwlClass::new(key("A"));
        assert!(c.add_from_domain(PropertyClassRef::new(key("p"), key("B"))));
        assert!(c.add_from_domain(PropertyClassRef::new(key("q"), key("B"))));
        assert!(!c.add_from_domain(PropertyClassRef::new(key("p"), key("B"))));

        assert_eq!(c.from_domain().len(), 1);
        assert_eq!(c.from_domain()[&key("B")].len(), 2);

        let props: Vec<_> = c.from_domain_properties().into_iter().cloned().collect();
        assert_eq!(props, vec![key("p"), key("q")]);
    }

    #[test]
    fn test_equivalent_expression_dedup() {
        let e = EquivalentExpression::with_members(
            ExpressionKind::Union,
            vec![key("B"), key("A"), key("B")],
        );
        assert_eq!(e.members(), &[key("B"), key("A")]);
        assert!(e.contains(&key("A")));
        assert_eq!(e.kind(), ExpressionKind::Union);
    }

    #[test]
    fn test_documentation_from_annotations() {
        let mut e = NamedElement::new(key("A"));
        let label = ElementKey::from_uri("http://www.w3.org/2000/01/rdf-schema#label");
        let comment = ElementKey::from_uri("http://www.w3.org/2000/01/rdf-schema#comment");

        assert!(e.add_annotation(Annotation {
            property: label.clone(),
            value: AnnotationValue::literal("An A"),
        }));
        assert!(e.add_annotation(Annotation {
            property: label.clone(),
            value: AnnotationValue::literal("Another A"),
        }));
        assert!(e.add_annotation(Annotation {
            property: comment.clone(),
            value: AnnotationValue::literal("first"),
        }));
        assert!(!e.add_annotation(Annotation {
            property: comment,
            value: AnnotationValue::literal("first"),
        }));

        assert_eq!(e.label(), Some("An A"));
        assert_eq!(e.documentation().comments, vec!["first".to_string()]);
        assert_eq!(e.annotations().len(), 3);
    }

    #[test]
    fn test_display_name() {
        let mut c = OwlClass::new(key("A"));
        assert_eq!(c.display_name(), "A");
        c.element_mut().set_label("Alpha");
        assert_eq!(c.display_name(), "Alpha");
    }

    #[test]
    fn test_element_kind() {
        let p = OwlProperty::datatype("http://www.example.com/onto#age");
        assert_eq!(Element::Property(&p).kind(), ElementKind::DatatypeProperty);
        let p = OwlProperty::object("http://www.example.com/onto#knows");
        assert_eq!(Element::Property(&p).kind(), ElementKind::ObjectProperty);
        assert_eq!(Element::Property(&p).key().name(), "knows");
    }
}
