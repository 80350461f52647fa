//! Translate a parsed ontology into schema facts.
//!
//! Only the parts of OWL that a schema browser shows are kept:
//! declarations, named class hierarchies, equivalences, property
//! domains and ranges (including those given as restrictions on a
//! super class), class assertions and annotations. Everything else is
//! dropped.
//!
//! Declarations are emitted before any relation, and every class or
//! individual a relation mentions is declared, so the facts can be
//! applied in order.
use horned_owl::model::{
    AnnotationSubject, AnnotationValue as HornedValue, ClassExpression, Component, DataRange,
    Individual, Literal, ObjectPropertyExpression, RcStr, IRI,
};
use horned_owl::ontology::set::SetOntology;

use log::debug;

use owl_schema::fact::Fact;
use owl_schema::key::ElementKey;
use owl_schema::model::{
    Annotation, AnnotationValue, EquivalentExpression, ExpressionKind, Quantifier, Restriction,
};

use std::collections::BTreeSet;

fn key(iri: &IRI<RcStr>) -> ElementKey {
    ElementKey::from_uri(&iri.to_string())
}

/// The property named by `ope`, and whether it is used inverted.
fn ope_key(ope: &ObjectPropertyExpression<RcStr>) -> (ElementKey, bool) {
    match ope {
        ObjectPropertyExpression::ObjectProperty(op) => (key(&op.0), false),
        ObjectPropertyExpression::InverseObjectProperty(op) => (key(&op.0), true),
    }
}

fn individual_key(i: &Individual<RcStr>) -> Option<ElementKey> {
    match i {
        Individual::Named(ni) => Some(key(&ni.0)),
        _ => None,
    }
}

fn annotation_value(av: &HornedValue<RcStr>) -> Option<AnnotationValue> {
    match av {
        HornedValue::Literal(Literal::Simple { literal }) => Some(AnnotationValue::literal(literal)),
        HornedValue::Literal(Literal::Language { literal, lang }) => {
            Some(AnnotationValue::Literal {
                literal: literal.clone(),
                lang: Some(lang.clone()),
            })
        }
        HornedValue::Literal(Literal::Datatype { literal, .. }) => {
            Some(AnnotationValue::literal(literal))
        }
        HornedValue::IRI(iri) => Some(AnnotationValue::IRI(iri.to_string())),
        _ => None,
    }
}

/// Named classes that make up a class expression used as a domain or
/// range. Unions contribute each member.
fn named_members(ce: &ClassExpression<RcStr>) -> Vec<ElementKey> {
    match ce {
        ClassExpression::Class(c) => vec![key(&c.0)],
        ClassExpression::ObjectUnionOf(v) => v.iter().flat_map(named_members).collect(),
        _ => vec![],
    }
}

#[derive(Debug, Default)]
struct Collector {
    declarations: Vec<Fact>,
    classes: BTreeSet<ElementKey>,
    individuals: BTreeSet<ElementKey>,
    object_properties: BTreeSet<ElementKey>,
    datatype_properties: BTreeSet<ElementKey>,
    datatypes: BTreeSet<ElementKey>,
    relations: Vec<Fact>,
    skipped: usize,
}

impl Collector {
    fn class(&mut self, k: ElementKey) -> ElementKey {
        if self.classes.insert(k.clone()) {
            self.declarations.push(Fact::DeclareClass(k.clone()));
        }
        k
    }

    fn individual(&mut self, k: ElementKey) -> ElementKey {
        if self.individuals.insert(k.clone()) {
            self.declarations.push(Fact::DeclareIndividual(k.clone()));
        }
        k
    }

    fn object_property(&mut self, k: ElementKey) -> ElementKey {
        if self.object_properties.insert(k.clone()) {
            self.declarations.push(Fact::DeclareObjectProperty(k.clone()));
        }
        k
    }

    fn datatype_property(&mut self, k: ElementKey) -> ElementKey {
        if self.datatype_properties.insert(k.clone()) {
            self.declarations
                .push(Fact::DeclareDatatypeProperty(k.clone()));
        }
        k
    }

    fn datatype(&mut self, k: ElementKey) -> ElementKey {
        if self.datatypes.insert(k.clone()) {
            self.declarations.push(Fact::DeclareDatatype(k.clone()));
        }
        k
    }

    fn domain(&mut self, property: &ElementKey, class: ElementKey, restriction: Restriction) {
        let class = self.class(class);
        self.relations.push(Fact::PropertyDomain {
            property: property.clone(),
            class,
            restriction,
        });
    }

    fn range(&mut self, property: &ElementKey, class: ElementKey, restriction: Restriction) {
        let class = self.class(class);
        self.relations.push(Fact::PropertyRange {
            property: property.clone(),
            class,
            restriction,
        });
    }

    /// A domain or range of `ope`, stored on the other end when `ope`
    /// is an inverse.
    fn object_end(
        &mut self,
        ope: &ObjectPropertyExpression<RcStr>,
        class: ElementKey,
        is_domain: bool,
    ) {
        let (property, inverted) = ope_key(ope);
        let property = self.object_property(property);
        if is_domain != inverted {
            self.domain(&property, class, Restriction::default());
        } else {
            self.range(&property, class, Restriction::default());
        }
    }

    fn datatype_range(&mut self, property: &ElementKey, dr: &DataRange<RcStr>) {
        match dr {
            DataRange::Datatype(dt) => {
                let datatype = self.datatype(key(&dt.0));
                self.relations.push(Fact::DatatypeRange {
                    property: property.clone(),
                    datatype,
                });
            }
            _ => self.skipped += 1,
        }
    }

    /// A super class expression of the named class `sub`.
    fn super_class(&mut self, sub: &ElementKey, sup: &ClassExpression<RcStr>) {
        let object = |q: Option<Quantifier>, min: Option<u32>, max: Option<u32>| Restriction {
            min_cardinality: min,
            max_cardinality: max,
            quantifier: q,
        };

        match sup {
            ClassExpression::Class(c) => {
                let sup = self.class(key(&c.0));
                self.relations.push(Fact::SubClassOf {
                    sub: sub.clone(),
                    sup,
                });
            }
            ClassExpression::ObjectIntersectionOf(v) => {
                for ce in v {
                    self.super_class(sub, ce);
                }
            }
            ClassExpression::ObjectSomeValuesFrom { ope, bce } => {
                self.restriction(sub, ope, bce, object(Some(Quantifier::Some), None, None))
            }
            ClassExpression::ObjectAllValuesFrom { ope, bce } => {
                self.restriction(sub, ope, bce, object(Some(Quantifier::Only), None, None))
            }
            ClassExpression::ObjectMinCardinality { n, ope, bce } => {
                self.restriction(sub, ope, bce, object(None, Some(*n), None))
            }
            ClassExpression::ObjectMaxCardinality { n, ope, bce } => {
                self.restriction(sub, ope, bce, object(None, None, Some(*n)))
            }
            ClassExpression::ObjectExactCardinality { n, ope, bce } => {
                self.restriction(sub, ope, bce, object(None, Some(*n), Some(*n)))
            }
            ClassExpression::DataSomeValuesFrom { dp, dr }
            | ClassExpression::DataAllValuesFrom { dp, dr } => {
                let property = self.datatype_property(key(&dp.0));
                self.domain(&property, sub.clone(), Restriction::default());
                self.datatype_range(&property, dr);
            }
            _ => self.skipped += 1,
        }
    }

    fn restriction(
        &mut self,
        sub: &ElementKey,
        ope: &ObjectPropertyExpression<RcStr>,
        bce: &ClassExpression<RcStr>,
        restriction: Restriction,
    ) {
        let (property, inverted) = ope_key(ope);
        let property = self.object_property(property);
        let ranges = named_members(bce);
        if ranges.is_empty() {
            self.skipped += 1;
            return;
        }

        let sub = self.class(sub.clone());
        for range in ranges {
            let range = self.class(range);
            let (domain, range) = if inverted {
                (range, sub.clone())
            } else {
                (sub.clone(), range)
            };
            self.relations.push(Fact::PropertyRestriction {
                property: property.clone(),
                domain,
                range,
                restriction: restriction.clone(),
            });
        }
    }

    fn equivalent(&mut self, v: &[ClassExpression<RcStr>]) {
        let named: Vec<ElementKey> = v
            .iter()
            .filter_map(|ce| match ce {
                ClassExpression::Class(c) => Some(key(&c.0)),
                _ => None,
            })
            .collect();
        let named: Vec<ElementKey> = named.into_iter().map(|k| self.class(k)).collect();

        for (i, class) in named.iter().enumerate() {
            for alias in &named[i + 1..] {
                self.relations.push(Fact::EquivalentClass {
                    class: class.clone(),
                    alias: alias.clone(),
                });
            }
        }

        for ce in v {
            let (kind, members) = match ce {
                ClassExpression::ObjectIntersectionOf(m) => (
                    ExpressionKind::Intersection,
                    m.iter().flat_map(named_members).collect::<Vec<_>>(),
                ),
                ClassExpression::ObjectUnionOf(m) => (
                    ExpressionKind::Union,
                    m.iter().flat_map(named_members).collect(),
                ),
                ClassExpression::ObjectOneOf(m) => (
                    ExpressionKind::Enumeration,
                    m.iter().filter_map(individual_key).collect(),
                ),
                _ => continue,
            };

            let members: Vec<ElementKey> = match kind {
                ExpressionKind::Enumeration => {
                    members.into_iter().map(|k| self.individual(k)).collect()
                }
                _ => members.into_iter().map(|k| self.class(k)).collect(),
            };
            for class in &named {
                self.relations.push(Fact::EquivalentExpression {
                    class: class.clone(),
                    expression: EquivalentExpression::with_members(kind, members.clone()),
                });
            }
        }
    }

    fn component(&mut self, c: &Component<RcStr>) {
        match c {
            Component::DeclareClass(dc) => {
                self.class(key(&(dc.0).0));
            }
            Component::DeclareObjectProperty(dop) => {
                self.object_property(key(&(dop.0).0));
            }
            Component::DeclareDataProperty(ddp) => {
                self.datatype_property(key(&(ddp.0).0));
            }
            Component::DeclareNamedIndividual(dni) => {
                self.individual(key(&(dni.0).0));
            }
            Component::DeclareDatatype(dd) => {
                self.datatype(key(&(dd.0).0));
            }
            Component::SubClassOf(sc) => match &sc.sub {
                ClassExpression::Class(c) => {
                    let sub = self.class(key(&c.0));
                    self.super_class(&sub, &sc.sup);
                }
                _ => self.skipped += 1,
            },
            Component::EquivalentClasses(ec) => self.equivalent(&ec.0),
            Component::ObjectPropertyDomain(opd) => {
                for class in named_members(&opd.ce) {
                    self.object_end(&opd.ope, class, true);
                }
            }
            Component::ObjectPropertyRange(opr) => {
                for class in named_members(&opr.ce) {
                    self.object_end(&opr.ope, class, false);
                }
            }
            Component::DataPropertyDomain(dpd) => {
                let property = self.datatype_property(key(&dpd.dp.0));
                for class in named_members(&dpd.ce) {
                    self.domain(&property, class, Restriction::default());
                }
            }
            Component::DataPropertyRange(dpr) => {
                let property = self.datatype_property(key(&dpr.dp.0));
                self.datatype_range(&property, &dpr.dr);
            }
            Component::InverseObjectProperties(iop) => {
                let property = self.object_property(key(&(iop.0).0));
                let inverse = self.object_property(key(&(iop.1).0));
                self.relations
                    .push(Fact::InverseProperties { property, inverse });
            }
            Component::FunctionalObjectProperty(fop) => match ope_key(&fop.0) {
                (property, false) => {
                    let property = self.object_property(property);
                    self.relations.push(Fact::FunctionalProperty(property));
                }
                _ => self.skipped += 1,
            },
            Component::FunctionalDataProperty(fdp) => {
                let property = self.datatype_property(key(&(fdp.0).0));
                self.relations.push(Fact::FunctionalProperty(property));
            }
            Component::ClassAssertion(ca) => match (&ca.ce, individual_key(&ca.i)) {
                (ClassExpression::Class(c), Some(i)) => {
                    let class = self.class(key(&c.0));
                    let individual = self.individual(i);
                    self.relations
                        .push(Fact::ClassAssertion { individual, class });
                }
                _ => self.skipped += 1,
            },
            Component::AnnotationAssertion(aa) => {
                let subject = match &aa.subject {
                    AnnotationSubject::IRI(iri) => key(iri),
                    _ => {
                        self.skipped += 1;
                        return;
                    }
                };
                match annotation_value(&aa.ann.av) {
                    Some(value) => self.relations.push(Fact::Annotation {
                        subject,
                        annotation: Annotation {
                            property: key(&aa.ann.ap.0),
                            value,
                        },
                    }),
                    None => self.skipped += 1,
                }
            }
            _ => self.skipped += 1,
        }
    }
}

/// The facts of `ont`, declarations first.
pub fn facts(ont: &SetOntology<RcStr>) -> Vec<Fact> {
    let mut collector = Collector::default();
    for ac in ont.iter() {
        collector.component(&ac.component);
    }

    debug!(
        "Translated ontology into {} declarations and {} relations, skipping {} components",
        collector.declarations.len(),
        collector.relations.len(),
        collector.skipped
    );

    let mut facts = collector.declarations;
    facts.append(&mut collector.relations);
    facts
}

#[cfg(test)]
mod test {
    use super::*;
    use owl_schema::closure::DependencyFilter;
    use owl_schema::schema::OwlSchema;
    use horned_owl::model::{
        Build, ClassAssertion, DeclareClass, DeclareNamedIndividual, DeclareObjectProperty,
        EquivalentClasses, MutableOntology, ObjectPropertyDomain, SubClassOf,
    };

    const NS: &str = "http://www.example.com/zoo#";

    fn k(s: &str) -> ElementKey {
        ElementKey::new(NS, s)
    }

    fn u(s: &str) -> String {
        format!("{}{}", NS, s)
    }

    fn zoo() -> SetOntology<RcStr> {
        let b = Build::new_rc();
        let mut o: SetOntology<RcStr> = SetOntology::new();

        o.insert(DeclareClass(b.class(u("Animal"))));
        o.insert(SubClassOf {
            sub: b.class(u("Cat")).into(),
            sup: b.class(u("Animal")).into(),
        });
        o.insert(SubClassOf {
            sub: b.class(u("Cat")).into(),
            sup: ClassExpression::ObjectSomeValuesFrom {
                ope: b.object_property(u("eats")).into(),
                bce: Box::new(b.class(u("Mouse")).into()),
            },
        });
        o.insert(DeclareObjectProperty(b.object_property(u("feeds"))));
        o.insert(ObjectPropertyDomain {
            ope: b.object_property(u("feeds")).into(),
            ce: ClassExpression::ObjectUnionOf(vec![
                b.class(u("Keeper")).into(),
                b.class(u("Vet")).into(),
            ]),
        });
        o.insert(EquivalentClasses(vec![
            b.class(u("Cat")).into(),
            b.class(u("Feline")).into(),
        ]));
        o.insert(DeclareNamedIndividual(b.named_individual(u("tom"))));
        o.insert(ClassAssertion {
            ce: b.class(u("Cat")).into(),
            i: b.named_individual(u("tom")).into(),
        });
        o.insert(DeclareClass(b.class(u("Mouse"))));
        o
    }

    fn position(facts: &[Fact], f: &Fact) -> usize {
        facts.iter().position(|x| x == f).unwrap()
    }

    #[test]
    fn test_declarations_come_first() {
        let facts = facts(&zoo());
        let last_declaration = facts
            .iter()
            .rposition(|f| {
                matches!(
                    f,
                    Fact::DeclareClass(_)
                        | Fact::DeclareIndividual(_)
                        | Fact::DeclareObjectProperty(_)
                        | Fact::DeclareDatatypeProperty(_)
                        | Fact::DeclareDatatype(_)
                )
            })
            .unwrap();

        let first_relation = position(
            &facts,
            &Fact::SubClassOf {
                sub: k("Cat"),
                sup: k("Animal"),
            },
        );
        assert!(last_declaration < first_relation);
        assert!(facts.contains(&Fact::DeclareClass(k("Keeper"))));
    }

    #[test]
    fn test_restriction_becomes_paired_fact() {
        let facts = facts(&zoo());
        assert!(facts.contains(&Fact::PropertyRestriction {
            property: k("eats"),
            domain: k("Cat"),
            range: k("Mouse"),
            restriction: Restriction {
                quantifier: Some(Quantifier::Some),
                ..Default::default()
            },
        }));
        assert!(!facts
            .iter()
            .any(|f| matches!(f, Fact::PropertyRange { property, .. } if property == &k("eats"))));
    }

    #[test]
    fn test_shared_property_keeps_restriction_pairs() {
        let b = Build::new_rc();
        let mut o = zoo();
        o.insert(SubClassOf {
            sub: b.class(u("Dog")).into(),
            sup: ClassExpression::ObjectSomeValuesFrom {
                ope: b.object_property(u("eats")).into(),
                bce: Box::new(b.class(u("Bone")).into()),
            },
        });

        let mut schema = OwlSchema::default();
        schema.load(facts(&o)).unwrap();

        let cat = schema.owl_class(&k("Cat")).unwrap();
        let eaten: Vec<_> = cat.from_domain().keys().cloned().collect();
        assert_eq!(eaten, vec![k("Mouse")]);

        let closure = schema.dependency_closure(&k("Cat"), &DependencyFilter::default());
        assert!(closure.contains(&k("Mouse")));
        assert!(!closure.contains(&k("Bone")));
    }

    #[test]
    fn test_inverse_restriction_swaps_ends() {
        let b = Build::new_rc();
        let mut o: SetOntology<RcStr> = SetOntology::new();
        o.insert(SubClassOf {
            sub: b.class(u("Mouse")).into(),
            sup: ClassExpression::ObjectSomeValuesFrom {
                ope: ObjectPropertyExpression::InverseObjectProperty(
                    b.object_property(u("eats")),
                ),
                bce: Box::new(b.class(u("Cat")).into()),
            },
        });
        o.insert(ObjectPropertyDomain {
            ope: ObjectPropertyExpression::InverseObjectProperty(b.object_property(u("feeds"))),
            ce: b.class(u("Animal")).into(),
        });

        let facts = facts(&o);
        assert!(facts.contains(&Fact::PropertyRestriction {
            property: k("eats"),
            domain: k("Cat"),
            range: k("Mouse"),
            restriction: Restriction {
                quantifier: Some(Quantifier::Some),
                ..Default::default()
            },
        }));
        assert!(facts.contains(&Fact::PropertyRange {
            property: k("feeds"),
            class: k("Animal"),
            restriction: Restriction::default(),
        }));
    }

    #[test]
    fn test_union_domain_is_expanded() {
        let facts = facts(&zoo());
        for c in &["Keeper", "Vet"] {
            assert!(facts.contains(&Fact::PropertyDomain {
                property: k("feeds"),
                class: k(c),
                restriction: Restriction::default(),
            }));
        }
    }

    #[test]
    fn test_equivalence_and_assertion() {
        let facts = facts(&zoo());
        assert!(facts.contains(&Fact::EquivalentClass {
            class: k("Cat"),
            alias: k("Feline"),
        }));
        assert!(facts.contains(&Fact::ClassAssertion {
            individual: k("tom"),
            class: k("Cat"),
        }));
    }
}
