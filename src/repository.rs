//! Metadata about external schemas a schema may import from.
//!
//! A [`SchemasRepository`] is built once, usually with
//! [`SchemasRepository::well_known`], and handed to each
//! [`OwlSchema`](crate::schema::OwlSchema) on construction. Records
//! are shared, so every imported schema of a given namespace points to
//! the same [`SchemaInfo`].
use crate::vocab::trim_separator;

use std::collections::BTreeMap;
use std::sync::Arc;

/// What is known about an external schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaInfo {
    pub namespace: String,
    pub family: Option<String>,
    pub name: Option<String>,
    pub default_prefix: Option<String>,
}

impl SchemaInfo {
    pub fn new<S: Into<String>>(namespace: S) -> SchemaInfo {
        SchemaInfo {
            namespace: namespace.into(),
            family: None,
            name: None,
            default_prefix: None,
        }
    }

    pub fn family<S: Into<String>>(mut self, family: S) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn default_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.default_prefix = Some(prefix.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct SchemasRepository {
    schemas: BTreeMap<String, Arc<SchemaInfo>>,
}

impl SchemasRepository {
    pub fn new() -> SchemasRepository {
        SchemasRepository::default()
    }

    /// A repository preloaded with commonly imported vocabularies.
    pub fn well_known() -> SchemasRepository {
        let mut r = SchemasRepository::new();
        for info in vec![
            SchemaInfo::new("http://purl.org/dc/elements/1.1/")
                .family("Dublin Core")
                .name("Dublin Core Elements")
                .default_prefix("dc"),
            SchemaInfo::new("http://purl.org/dc/terms/")
                .family("Dublin Core")
                .name("DCMI Metadata Terms")
                .default_prefix("dcterms"),
            SchemaInfo::new("http://www.w3.org/2004/02/skos/core#")
                .family("SKOS")
                .name("Simple Knowledge Organization System")
                .default_prefix("skos"),
            SchemaInfo::new("http://xmlns.com/foaf/0.1/")
                .family("FOAF")
                .name("Friend of a Friend")
                .default_prefix("foaf"),
            SchemaInfo::new("http://www.w3.org/ns/prov#")
                .family("PROV")
                .name("PROV Ontology")
                .default_prefix("prov"),
            SchemaInfo::new("https://schema.org/")
                .family("Schema.org")
                .name("Schema.org")
                .default_prefix("schema"),
            SchemaInfo::new("http://www.opengis.net/ont/geosparql#")
                .family("OGC")
                .name("GeoSPARQL")
                .default_prefix("geo"),
        ] {
            r.insert(info);
        }
        r
    }

    pub fn insert(&mut self, info: SchemaInfo) -> Arc<SchemaInfo> {
        let key = trim_separator(&info.namespace).to_string();
        let info = Arc::new(info);
        self.schemas.insert(key, info.clone());
        info
    }

    /// Find the record for `namespace`, ignoring a trailing `#` or `/`.
    pub fn get(&self, namespace: &str) -> Option<Arc<SchemaInfo>> {
        self.schemas.get(trim_separator(namespace)).cloned()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
