//! Vocabularies the schema model needs to recognise.
//!
//! Namespaces listed in [`Namespace`] are the core vocabularies of
//! OWL itself. They never count as imported schemas, and elements in
//! them are not considered foreign to any schema.
use enum_meta::*;
use lazy_static::lazy_static;

use crate::error::invalid;
use crate::error::SchemaError;
use crate::key::ElementKey;

use std::convert::TryFrom;
use std::ops::Deref;
use std::str::FromStr;

/// [Namespaces](https://www.w3.org/TR/2004/REC-owl-guide-20040210/#Namespaces)
/// that are part of the OWL language rather than of any schema.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Namespace {
    /// Ontology Web Language
    OWL,
    /// Resource Description Framework
    RDF,
    /// RDF Schema
    RDFS,
    /// XML
    XML,
    /// XML Schema datatype
    XSD,
}

lazy_meta! {
    Namespace, String, METANS;
    OWL, String::from("http://www.w3.org/2002/07/owl#");
    RDF, String::from("http://www.w3.org/1999/02/22-rdf-syntax-ns#");
    RDFS, String::from("http://www.w3.org/2000/01/rdf-schema#");
    XML, String::from("http://www.w3.org/XML/1998/namespace");
    XSD, String::from("http://www.w3.org/2001/XMLSchema#");
}

impl Deref for Namespace {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        self.meta()
    }
}

impl TryFrom<&str> for Namespace {
    type Error = SchemaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = trim_separator(value);
        Namespace::all()
            .into_iter()
            .find(|ns| trim_separator(ns.as_str()) == value)
            .ok_or_else(|| invalid!("Unknown Namespace variant: {:?}", value))
    }
}

impl FromStr for Namespace {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::try_from(s)
    }
}

impl Namespace {
    /// The prefix these namespaces are conventionally bound to.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::OWL => "owl",
            Namespace::RDF => "rdf",
            Namespace::RDFS => "rdfs",
            Namespace::XML => "xml",
            Namespace::XSD => "xsd",
        }
    }
}

/// Strip one trailing `#` or `/` so that `http://a/b#` and
/// `http://a/b` compare equal.
pub(crate) fn trim_separator(ns: &str) -> &str {
    ns.strip_suffix('#')
        .or_else(|| ns.strip_suffix('/'))
        .unwrap_or(ns)
}

/// Returns true if `ns` is one of the core OWL vocabularies.
pub fn is_well_known(ns: &str) -> bool {
    Namespace::try_from(ns).is_ok()
}

lazy_static! {
    static ref THING: ElementKey = ElementKey::new(Namespace::OWL.as_str(), "Thing");
}

/// The key of `owl:Thing`.
pub fn thing_key() -> &'static ElementKey {
    &THING
}

/// Annotation properties that feed the documentation bundle of an
/// element rather than only its annotation set.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DocumentationKind {
    Label,
    Comment,
    Description,
    SeeAlso,
    IsDefinedBy,
    VersionInfo,
}

lazy_meta! {
    DocumentationKind, Vec<&'static str>, METADOC;
    Label, vec!["http://www.w3.org/2000/01/rdf-schema#label"];
    Comment, vec!["http://www.w3.org/2000/01/rdf-schema#comment"];
    Description, vec![
        "http://purl.org/dc/elements/1.1/description",
        "http://purl.org/dc/terms/description",
        "http://www.w3.org/2004/02/skos/core#definition"
    ];
    SeeAlso, vec!["http://www.w3.org/2000/01/rdf-schema#seeAlso"];
    IsDefinedBy, vec!["http://www.w3.org/2000/01/rdf-schema#isDefinedBy"];
    VersionInfo, vec!["http://www.w3.org/2002/07/owl#versionInfo"];
}

impl DocumentationKind {
    /// Find the documentation slot an annotation property fills, if any.
    pub fn for_property(key: &ElementKey) -> Option<DocumentationKind> {
        let uri = key.to_uri();
        DocumentationKind::all()
            .into_iter()
            .find(|kind| kind.meta().iter().any(|u| *u == uri))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_namespace_roundtrip() {
        assert_eq!(
            Namespace::from_str("http://www.w3.org/2002/07/owl#").unwrap(),
            Namespace::OWL
        );
        assert_eq!(
            Namespace::from_str("http://www.w3.org/2002/07/owl").unwrap(),
            Namespace::OWL
        );
        assert!(Namespace::from_str("http://www.example.com/onto#").is_err());
    }

    #[test]
    fn test_well_known() {
        assert!(is_well_known("http://www.w3.org/2000/01/rdf-schema#"));
        assert!(is_well_known("http://www.w3.org/XML/1998/namespace"));
        assert!(!is_well_known("http://purl.org/dc/elements/1.1/"));
    }

    #[test]
    fn test_thing() {
        assert_eq!(thing_key().name(), "Thing");
        assert_eq!(thing_key().to_uri(), "http://www.w3.org/2002/07/owl#Thing");
    }

    #[test]
    fn test_documentation_kind() {
        let label = ElementKey::from_uri("http://www.w3.org/2000/01/rdf-schema#label");
        assert_eq!(
            DocumentationKind::for_property(&label),
            Some(DocumentationKind::Label)
        );

        let skos = ElementKey::from_uri("http://www.w3.org/2004/02/skos/core#definition");
        assert_eq!(
            DocumentationKind::for_property(&skos),
            Some(DocumentationKind::Description)
        );

        let other = ElementKey::from_uri("http://www.example.com/onto#note");
        assert_eq!(DocumentationKind::for_property(&other), None);
    }
}
