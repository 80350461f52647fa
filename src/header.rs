//! Read the namespace declarations of a schema document.
//!
//! Only the root element of an RDF/XML or OWL/XML document is
//! inspected, together with the OWL/XML `Prefix` elements and the
//! ontology header that follow it. Everything else in the document is
//! skipped; parsing the ontology itself is left to other libraries.
use crate::error::SchemaError;

use log::trace;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use std::collections::BTreeMap;
use std::io::BufRead;

/// Prefixes, base and ontology IRI declared by a document.
///
/// The empty prefix holds the unprefixed (default) namespace
/// declaration, when there is one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaHeader {
    pub prefixes: BTreeMap<String, String>,
    pub base: Option<String>,
    pub about: Option<String>,
}

impl SchemaHeader {
    pub fn new() -> SchemaHeader {
        SchemaHeader::default()
    }

    pub fn with_prefix<P: Into<String>, N: Into<String>>(mut self, prefix: P, namespace: N) -> Self {
        self.prefixes.insert(prefix.into(), namespace.into());
        self
    }

    pub fn with_about<S: Into<String>>(mut self, about: S) -> Self {
        self.about = Some(about.into());
        self
    }

    /// The unprefixed namespace declaration.
    pub fn default_namespace(&self) -> Option<&str> {
        self.prefixes.get("").map(String::as_str)
    }

    /// The ontology IRI, falling back to `xml:base`.
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref().or(self.base.as_deref())
    }

    /// Read the header of an XML serialized ontology.
    ///
    /// Reading stops at the first element that can no longer belong
    /// to the header: anything after the ontology element (RDF/XML)
    /// or after the last `Prefix` (OWL/XML).
    pub fn read<R: BufRead>(bufread: R) -> Result<SchemaHeader, SchemaError> {
        let mut reader = Reader::from_reader(bufread);
        reader.trim_text(true);

        let mut header = SchemaHeader::new();
        let mut buf = Vec::new();
        let mut depth = 0usize;

        loop {
            let pos = reader.buffer_position();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| SchemaError::ParserError(e.into(), pos.into()))?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let is_empty = matches!(event, Event::Empty(_));
                    if depth == 0 {
                        header.read_root(e)?;
                    } else if depth == 1 && !header.read_child(e)? {
                        break;
                    }
                    if !is_empty {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        trace!("Read schema header: {:?}", header);
        Ok(header)
    }

    fn read_root(&mut self, e: &BytesStart) -> Result<(), SchemaError> {
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            let value = attr.unescape_value()?.to_string();

            if key == b"xmlns" {
                self.prefixes.insert(String::new(), value);
            } else if let Some(prefix) = key.strip_prefix(b"xmlns:") {
                self.prefixes
                    .insert(String::from_utf8_lossy(prefix).to_string(), value);
            } else if key == b"xml:base" {
                self.base = Some(value);
            } else if key == b"ontologyIRI" {
                self.about = Some(value);
            }
        }
        Ok(())
    }

    /// Read a direct child of the root. Returns false once the
    /// header has been passed.
    fn read_child(&mut self, e: &BytesStart) -> Result<bool, SchemaError> {
        match e.local_name().as_ref() {
            b"Prefix" => {
                let mut name = None;
                let mut iri = None;
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.as_ref() {
                        b"name" => name = Some(attr.unescape_value()?.to_string()),
                        b"IRI" => iri = Some(attr.unescape_value()?.to_string()),
                        _ => {}
                    }
                }
                if let (Some(name), Some(iri)) = (name, iri) {
                    self.prefixes.insert(name, iri);
                }
                Ok(true)
            }
            b"Ontology" => {
                for attr in e.attributes() {
                    let attr = attr?;
                    if attr.key.local_name().as_ref() == b"about" {
                        self.about = Some(attr.unescape_value()?.to_string());
                    }
                }
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rdf_xml_header() {
        let doc = r#"<?xml version="1.0"?>
<rdf:RDF xmlns="http://www.example.com/onto#"
     xml:base="http://www.example.com/onto"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:owl="http://www.w3.org/2002/07/owl#"
     xmlns:dc="http://purl.org/dc/elements/1.1/">
    <owl:Ontology rdf:about="http://www.example.com/onto"/>
    <owl:Class rdf:about="http://www.example.com/onto#A"/>
</rdf:RDF>
"#;
        let h = SchemaHeader::read(doc.as_bytes()).unwrap();
        assert_eq!(h.default_namespace(), Some("http://www.example.com/onto#"));
        assert_eq!(h.base.as_deref(), Some("http://www.example.com/onto"));
        assert_eq!(h.about(), Some("http://www.example.com/onto"));
        assert_eq!(
            h.prefixes.get("dc").map(String::as_str),
            Some("http://purl.org/dc/elements/1.1/")
        );
        assert_eq!(h.prefixes.len(), 4);
    }

    #[test]
    fn test_owx_header() {
        let doc = r#"<?xml version="1.0"?>
<Ontology xmlns="http://www.w3.org/2002/07/owl#"
     xml:base="http://www.example.com/onto"
     ontologyIRI="http://www.example.com/onto">
    <Prefix name="" IRI="http://www.example.com/onto#"/>
    <Prefix name="skos" IRI="http://www.w3.org/2004/02/skos/core#"/>
    <Declaration>
        <Class IRI="http://www.example.com/onto#A"/>
    </Declaration>
    <Prefix name="late" IRI="http://www.example.com/late#"/>
</Ontology>
"#;
        let h = SchemaHeader::read(doc.as_bytes()).unwrap();
        assert_eq!(h.default_namespace(), Some("http://www.example.com/onto#"));
        assert_eq!(h.about(), Some("http://www.example.com/onto"));
        assert!(h.prefixes.contains_key("skos"));
        assert!(!h.prefixes.contains_key("late"));
    }

    #[test]
    fn test_about_falls_back_to_base() {
        let doc = r#"<rdf:RDF xml:base="http://www.example.com/base"
     xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#;
        let h = SchemaHeader::read(doc.as_bytes()).unwrap();
        assert_eq!(h.about(), Some("http://www.example.com/base"));
    }

    #[test]
    fn test_malformed() {
        let doc = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"></rdf:Other>"#;
        assert!(SchemaHeader::read(doc.as_bytes()).is_err());
    }
}
