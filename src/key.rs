//! Identity of schema elements.
//!
//! # Overview
//!
//! Every element of an [`OwlSchema`](crate::schema::OwlSchema) is
//! identified by an [`ElementKey`], a `(namespace, name)` pair. Keys
//! are the only identity used by the model: all cross-references
//! between classes, properties and individuals are held as keys and
//! resolved through the schema.
//!
//! Keys order by namespace and then by name. A key without a
//! namespace sorts after every key that has one.
//!
//! # Examples
//! ```
//! # use owl_schema::key::ElementKey;
//! let k = ElementKey::from_uri("http://www.example.com/onto#Person");
//! assert_eq!(k.namespace(), Some("http://www.example.com/onto#"));
//! assert_eq!(k.name(), "Person");
//! assert_eq!(k.to_uri(), "http://www.example.com/onto#Person");
//! ```
use crate::error::SchemaError;

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ElementKey {
    namespace: Option<String>,
    name: String,
}

impl ElementKey {
    pub fn new<N: Into<String>, S: Into<String>>(namespace: N, name: S) -> ElementKey {
        ElementKey {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// A key with no namespace, such as one built from a relative
    /// reference.
    pub fn local<S: Into<String>>(name: S) -> ElementKey {
        ElementKey {
            namespace: None,
            name: name.into(),
        }
    }

    /// Split `uri` into a key.
    ///
    /// The split happens after the last `#`, or after the last `/`
    /// when there is no `#`. The separator stays with the namespace,
    /// so that `to_uri` gives back `uri`.
    pub fn from_uri(uri: &str) -> ElementKey {
        let split = uri.rfind('#').or_else(|| uri.rfind('/'));
        match split {
            Some(i) => ElementKey {
                namespace: Some(uri[..=i].to_string()),
                name: uri[i + 1..].to_string(),
            },
            None => ElementKey::local(uri),
        }
    }

    /// As `from_uri` but reject anything that is not an absolute IRI.
    pub fn parse_uri(uri: &str) -> Result<ElementKey, SchemaError> {
        oxiri::Iri::parse(uri)?;
        Ok(ElementKey::from_uri(uri))
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespace.as_deref() == Some(namespace)
    }

    pub fn to_uri(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

impl Ord for ElementKey {
    fn cmp(&self, other: &ElementKey) -> Ordering {
        match (&self.namespace, &other.namespace) {
            (Some(s), Some(o)) => s.cmp(o).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

impl PartialOrd for ElementKey {
    fn partial_cmp(&self, other: &ElementKey) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for ElementKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<&str> for ElementKey {
    fn from(uri: &str) -> ElementKey {
        ElementKey::from_uri(uri)
    }
}

impl From<String> for ElementKey {
    fn from(uri: String) -> ElementKey {
        ElementKey::from_uri(&uri)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_uri_hash() {
        let k = ElementKey::from_uri("http://www.example.com/onto#A");
        assert_eq!(k.namespace(), Some("http://www.example.com/onto#"));
        assert_eq!(k.name(), "A");
    }

    #[test]
    fn test_from_uri_slash() {
        let k = ElementKey::from_uri("http://purl.org/dc/elements/1.1/title");
        assert_eq!(k.namespace(), Some("http://purl.org/dc/elements/1.1/"));
        assert_eq!(k.name(), "title");
    }

    #[test]
    fn test_from_uri_hash_wins() {
        let k = ElementKey::from_uri("http://www.example.com/a/b#c/d");
        assert_eq!(k.namespace(), Some("http://www.example.com/a/b#"));
        assert_eq!(k.name(), "c/d");
    }

    #[test]
    fn test_no_namespace() {
        let k = ElementKey::from_uri("Thing");
        assert_eq!(k.namespace(), None);
        assert_eq!(k.to_uri(), "Thing");
    }

    #[test]
    fn test_uri_roundtrip() {
        for uri in [
            "http://www.example.com/onto#A",
            "http://www.example.com/onto/B",
            "urn:example:C",
        ] {
            assert_eq!(ElementKey::from_uri(uri).to_uri(), uri);
        }
    }

    #[test]
    fn test_parse_uri() {
        assert!(ElementKey::parse_uri("http://www.example.com/onto#A").is_ok());
        assert!(ElementKey::parse_uri("not a uri").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = ElementKey::new("http://a#", "Z");
        let b = ElementKey::new("http://b#", "A");
        let c = ElementKey::new("http://b#", "B");
        let d = ElementKey::local("A");

        let mut v = vec![d.clone(), c.clone(), a.clone(), b.clone()];
        v.sort();
        assert_eq!(v, vec![a, b, c, d]);
    }

    #[test]
    fn test_equality() {
        assert_eq!(
            ElementKey::new("http://a#", "X"),
            ElementKey::from_uri("http://a#X")
        );
        assert_ne!(ElementKey::new("http://a#", "X"), ElementKey::local("X"));
    }
}
