//! Typed ontology facts, as produced by a parser.
//!
//! A parser translates whatever it reads into a stream of [`Fact`]s
//! and hands it to [`OwlSchema::load`]. Facts may arrive in any order:
//! `load` rebuilds the derived indices once the stream ends.
//!
//! # Examples
//! ```
//! # use owl_schema::fact::Fact;
//! # use owl_schema::key::ElementKey;
//! # use owl_schema::schema::OwlSchema;
//! let a = ElementKey::from_uri("http://www.example.com/onto#A");
//! let b = ElementKey::from_uri("http://www.example.com/onto#B");
//!
//! let mut schema = OwlSchema::default();
//! schema
//!     .load(vec![
//!         Fact::SubClassOf { sub: b.clone(), sup: a.clone() },
//!         Fact::DeclareClass(a.clone()),
//!         Fact::DeclareClass(b.clone()),
//!     ])
//!     .unwrap();
//!
//! assert!(schema.owl_class(&a).unwrap().sub_classes().contains(&b));
//! ```
use crate::error::SchemaError;
use crate::key::ElementKey;
use crate::model::{Annotation, EquivalentExpression, PropertyKind, Restriction};
use crate::schema::OwlSchema;

use log::debug;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fact {
    DeclareClass(ElementKey),
    DeclareObjectProperty(ElementKey),
    DeclareDatatypeProperty(ElementKey),
    DeclareIndividual(ElementKey),
    DeclareDatatype(ElementKey),
    SubClassOf {
        sub: ElementKey,
        sup: ElementKey,
    },
    EquivalentClass {
        class: ElementKey,
        alias: ElementKey,
    },
    EquivalentExpression {
        class: ElementKey,
        expression: EquivalentExpression,
    },
    PropertyDomain {
        property: ElementKey,
        class: ElementKey,
        restriction: Restriction,
    },
    PropertyRange {
        property: ElementKey,
        class: ElementKey,
        restriction: Restriction,
    },
    /// `domain` is restricted on `property` to values of `range`, as in
    /// a super class `property some range` of `domain`.
    PropertyRestriction {
        property: ElementKey,
        domain: ElementKey,
        range: ElementKey,
        restriction: Restriction,
    },
    DatatypeRange {
        property: ElementKey,
        datatype: ElementKey,
    },
    InverseProperties {
        property: ElementKey,
        inverse: ElementKey,
    },
    Cardinality {
        property: ElementKey,
        min: Option<u32>,
        max: Option<u32>,
    },
    FunctionalProperty(ElementKey),
    ClassAssertion {
        individual: ElementKey,
        class: ElementKey,
    },
    Annotation {
        subject: ElementKey,
        annotation: Annotation,
    },
    Prefix {
        prefix: String,
        namespace: String,
    },
    DefaultNamespace {
        prefix: String,
        namespace: String,
    },
}

impl OwlSchema {
    /// Apply a single fact.
    ///
    /// Returns `Ok(false)` when the fact refers to elements that are
    /// not (yet) known and was only partly recorded, and an error
    /// only for facts that can never be valid.
    pub fn apply(&mut self, fact: Fact) -> Result<bool, SchemaError> {
        let applied = match fact {
            Fact::DeclareClass(key) => {
                self.declare_class(key);
                true
            }
            Fact::DeclareObjectProperty(key) => {
                self.declare_property(key, PropertyKind::Object);
                true
            }
            Fact::DeclareDatatypeProperty(key) => {
                self.declare_property(key, PropertyKind::Datatype);
                true
            }
            Fact::DeclareIndividual(key) => {
                self.declare_individual(key);
                true
            }
            Fact::DeclareDatatype(key) => {
                self.declare_datatype(key);
                true
            }
            Fact::SubClassOf { sub, sup } => self.add_super_class(&sub, &sup),
            Fact::EquivalentClass { class, alias } => self.add_equivalent_class(&class, &alias),
            Fact::EquivalentExpression { class, expression } => {
                self.add_equivalent_expression(&class, expression)
            }
            Fact::PropertyDomain {
                property,
                class,
                restriction,
            } => self.add_property_domain(&property, &class, restriction),
            Fact::PropertyRange {
                property,
                class,
                restriction,
            } => self.add_property_range(&property, &class, restriction),
            Fact::PropertyRestriction {
                property,
                domain,
                range,
                restriction,
            } => self.add_property_restriction(&property, &domain, &range, restriction),
            Fact::DatatypeRange { property, datatype } => {
                self.add_property_range(&property, &datatype, Restriction::default())
            }
            Fact::InverseProperties { property, inverse } => {
                self.set_inverse_property(&property, &inverse)?
            }
            Fact::Cardinality { property, min, max } => self.set_cardinality(&property, min, max),
            Fact::FunctionalProperty(property) => self.set_functional(&property, true),
            Fact::ClassAssertion { individual, class } => {
                self.add_class_assertion(&individual, &class)
            }
            Fact::Annotation {
                subject,
                annotation,
            } => self.add_element_annotation(&subject, annotation),
            Fact::Prefix { prefix, namespace } => {
                self.declare_prefix(&prefix, &namespace)?;
                true
            }
            Fact::DefaultNamespace { prefix, namespace } => {
                self.set_default_namespace(prefix, namespace);
                true
            }
        };
        Ok(applied)
    }

    /// Apply every fact of `facts`, then [`finish_load`](OwlSchema::finish_load).
    ///
    /// Returns the number of facts applied in full. The first invalid
    /// fact stops the load, leaving the facts before it in place.
    pub fn load<I>(&mut self, facts: I) -> Result<usize, SchemaError>
    where
        I: IntoIterator<Item = Fact>,
    {
        let mut applied = 0;
        let mut partial = 0;
        for fact in facts {
            if self.apply(fact)? {
                applied += 1;
            } else {
                partial += 1;
            }
        }

        if partial > 0 {
            debug!("{} facts referred to unknown elements", partial);
        }
        self.finish_load();
        Ok(applied)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{AnnotationValue, Named};
    use pretty_assertions::assert_eq;

    const NS: &str = "http://www.example.com/onto#";

    fn key(s: &str) -> ElementKey {
        ElementKey::new(NS, s)
    }

    fn domain(property: &str, class: &str) -> Fact {
        Fact::PropertyDomain {
            property: key(property),
            class: key(class),
            restriction: Restriction::default(),
        }
    }

    fn range(property: &str, class: &str) -> Fact {
        Fact::PropertyRange {
            property: key(property),
            class: key(class),
            restriction: Restriction::default(),
        }
    }

    #[test]
    fn test_load_any_order() {
        let mut s = OwlSchema::default();
        let applied = s
            .load(vec![
                Fact::DeclareObjectProperty(key("knows")),
                domain("knows", "Person"),
                range("knows", "Person"),
                Fact::DeclareIndividual(key("alice")),
                Fact::ClassAssertion {
                    individual: key("alice"),
                    class: key("Person"),
                },
                Fact::DeclareClass(key("Person")),
            ])
            .unwrap();
        assert_eq!(applied, 6);

        let person = s.owl_class(&key("Person")).unwrap();
        assert!(person.own_properties().contains(&key("knows")));
        assert!(person.from_domain().contains_key(&key("Person")));
        assert!(person.individuals().contains(&key("alice")));
    }

    #[test]
    fn test_restrictions_sharing_a_property() {
        let restricted = |domain: &str, range: &str| Fact::PropertyRestriction {
            property: key("eats"),
            domain: key(domain),
            range: key(range),
            restriction: Restriction::default(),
        };

        let mut s = OwlSchema::default();
        s.load(vec![
            Fact::DeclareObjectProperty(key("eats")),
            restricted("Cat", "Mouse"),
            restricted("Dog", "Bone"),
            Fact::DeclareClass(key("Cat")),
            Fact::DeclareClass(key("Mouse")),
            Fact::DeclareClass(key("Dog")),
            Fact::DeclareClass(key("Bone")),
        ])
        .unwrap();

        let eats = s.owl_property(&key("eats")).unwrap();
        assert_eq!(eats.domain().len(), 2);
        assert_eq!(eats.range().len(), 2);

        let cat = s.owl_class(&key("Cat")).unwrap();
        assert!(cat.from_domain().contains_key(&key("Mouse")));
        assert!(!cat.from_domain().contains_key(&key("Bone")));
        let mouse = s.owl_class(&key("Mouse")).unwrap();
        assert!(!mouse.to_range().contains_key(&key("Dog")));
    }

    #[test]
    fn test_unknown_elements_are_partial() {
        let mut s = OwlSchema::default();
        assert_eq!(
            s.apply(Fact::SubClassOf {
                sub: key("A"),
                sup: key("B"),
            })
            .unwrap(),
            false
        );
        assert_eq!(s.apply(Fact::FunctionalProperty(key("p"))).unwrap(), false);
    }

    #[test]
    fn test_property_facts() {
        let mut s = OwlSchema::default();
        s.load(vec![
            Fact::DeclareObjectProperty(key("hasPart")),
            Fact::DeclareObjectProperty(key("partOf")),
            Fact::DeclareDatatypeProperty(key("weight")),
            Fact::DeclareDatatype(ElementKey::from_uri(
                "http://www.w3.org/2001/XMLSchema#decimal",
            )),
            Fact::InverseProperties {
                property: key("hasPart"),
                inverse: key("partOf"),
            },
            Fact::FunctionalProperty(key("weight")),
            Fact::Cardinality {
                property: key("weight"),
                min: Some(1),
                max: Some(1),
            },
            Fact::DatatypeRange {
                property: key("weight"),
                datatype: ElementKey::from_uri("http://www.w3.org/2001/XMLSchema#decimal"),
            },
        ])
        .unwrap();

        let weight = s.owl_property(&key("weight")).unwrap();
        assert!(weight.is_functional());
        assert_eq!(weight.min_cardinality(), Some(1));
        assert_eq!(
            s.owl_property(&key("partOf")).unwrap().inverse(),
            Some(&key("hasPart"))
        );
        assert!(s
            .datatype(&ElementKey::from_uri("http://www.w3.org/2001/XMLSchema#decimal"))
            .unwrap()
            .used_by()
            .contains(&key("weight")));
    }

    #[test]
    fn test_invalid_fact_stops_load() {
        let mut s = OwlSchema::default();
        let result = s.load(vec![
            Fact::DeclareDatatypeProperty(key("name")),
            Fact::DeclareObjectProperty(key("p")),
            Fact::InverseProperties {
                property: key("p"),
                inverse: key("name"),
            },
            Fact::DeclareClass(key("Never")),
        ]);
        assert!(result.is_err());
        assert!(s.has_owl_property(&key("name")));
        assert!(!s.has_owl_class(&key("Never")));
    }

    #[test]
    fn test_annotation_and_prefix_facts() {
        let mut s = OwlSchema::default();
        s.load(vec![
            Fact::Prefix {
                prefix: "ex".to_string(),
                namespace: NS.to_string(),
            },
            Fact::DefaultNamespace {
                prefix: "ex".to_string(),
                namespace: NS.to_string(),
            },
            Fact::DeclareClass(key("A")),
            Fact::Annotation {
                subject: key("A"),
                annotation: Annotation {
                    property: ElementKey::from_uri("http://www.w3.org/2000/01/rdf-schema#label"),
                    value: AnnotationValue::literal("Alpha"),
                },
            },
        ])
        .unwrap();

        assert_eq!(s.default_namespace(), Some(NS));
        assert_eq!(s.owl_class(&key("A")).unwrap().display_name(), "Alpha");
        assert_eq!(s.owl_class(&key("A")).unwrap().element().prefix(), Some("ex"));
    }
}
