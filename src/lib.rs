//! # OWL Schema
//!
//! An in-memory, cross-indexed model of an OWL ontology, built for
//! browsing and for driving diagram export rather than for reasoning.
//!
//! ## Overview
//!
//! A parser turns an ontology into a stream of [`fact::Fact`]s. These
//! are loaded into an [`schema::OwlSchema`], which owns every class,
//! property, individual and datatype by [`key::ElementKey`] and keeps
//! both sides of every relationship in step.
//!
//! Once loaded, the schema answers queries and derives views:
//!
//! - class hierarchies ([`schema::OwlSchema::super_class_closure`],
//!   [`walk`]),
//! - per-class property indices ([`model::OwlClass::from_domain`] and
//!   [`model::OwlClass::to_range`]),
//! - equivalence (alias) links,
//! - a partition of the classes into packages ([`package`]),
//! - bounded dependency sub-graphs ([`closure`]).
//!
//! Parsing files is left to other libraries, with the exception of
//! the namespace declarations at the top of an XML document
//! ([`header::SchemaHeader`]), from which the schema works out which
//! namespace it owns and which it imports.
//!
//! ## Example
//!
//! ```
//! use owl_schema::closure::DependencyFilter;
//! use owl_schema::fact::Fact;
//! use owl_schema::key::ElementKey;
//! use owl_schema::model::Restriction;
//! use owl_schema::package::PackagesConfiguration;
//! use owl_schema::schema::OwlSchema;
//!
//! let k = |n: &str| ElementKey::new("http://www.example.com/zoo#", n);
//!
//! let mut schema = OwlSchema::default();
//! schema.load(vec![
//!     Fact::DeclareClass(k("Animal")),
//!     Fact::DeclareClass(k("Cat")),
//!     Fact::DeclareClass(k("Keeper")),
//!     Fact::SubClassOf { sub: k("Cat"), sup: k("Animal") },
//!     Fact::DeclareObjectProperty(k("feeds")),
//!     Fact::PropertyDomain { property: k("feeds"), class: k("Keeper"), restriction: Restriction::default() },
//!     Fact::PropertyRange { property: k("feeds"), class: k("Cat"), restriction: Restriction::default() },
//! ]).unwrap();
//!
//! schema.extract_packages(&PackagesConfiguration::default());
//! assert!(schema.owl_class(&k("Animal")).unwrap().is_package());
//!
//! let deps = schema.dependent_classes(&k("Keeper"), &DependencyFilter::default());
//! assert!(deps.contains_key(&k("Cat")));
//! ```
pub mod closure;
pub mod error;
pub mod fact;
pub mod header;
pub mod key;
pub mod model;
pub mod package;
pub mod repository;
pub mod schema;
pub mod vocab;
pub mod walk;

pub use crate::error::SchemaError;

use crate::closure::DependencyFilter;
use crate::package::PackagesConfiguration;

/// Settings for the derived views of a schema.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaConfiguration {
    pub packages: PackagesConfiguration,
    /// Defaults for dependency queries.
    pub closure: DependencyFilter,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SchemaConfiguration::default();
        assert!(config.packages.accept_defaults);
        assert!(!config.packages.accept_sub_packages);
        assert_eq!(config.closure.maximum_radius, Some(1));
        assert_eq!(config.closure, DependencyFilter::default());
    }
}
