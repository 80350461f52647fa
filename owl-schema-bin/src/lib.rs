//! Support for owl-schema command line programmes

pub mod loader;

use horned_owl::{
    error::HornedError,
    io::{ParserConfiguration, ParserOutput, ResourceType},
    model::{Build, Component, RcAnnotatedComponent, RcStr},
    ontology::set::SetOntology,
};

use owl_schema::{
    error::Location, header::SchemaHeader, key::ElementKey, repository::SchemasRepository,
    schema::OwlSchema, SchemaError,
};

use std::{fs::File, io::BufReader, path::Path};

pub fn path_type(path: &Path) -> Option<ResourceType> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("ofn") => Some(ResourceType::OFN),
        Some("owx") => Some(ResourceType::OWX),
        Some("owl") => Some(ResourceType::RDF),
        _ => None,
    }
}

fn horned_error(e: HornedError) -> SchemaError {
    match e {
        HornedError::IOError(e) => SchemaError::IOError(e),
        HornedError::CommandError(s) => SchemaError::CommandError(s),
        e => SchemaError::ParserError(e.to_string().into(), Location::Unknown),
    }
}

pub fn parse_path(
    path: &Path,
    config: ParserConfiguration,
) -> Result<ParserOutput<RcStr, RcAnnotatedComponent>, SchemaError> {
    Ok(match path_type(path) {
        Some(ResourceType::OFN) => {
            let file = File::open(path)?;
            let mut bufreader = BufReader::new(file);
            ParserOutput::ofn(
                horned_owl::io::ofn::reader::read(&mut bufreader, config).map_err(horned_error)?,
            )
        }
        Some(ResourceType::OWX) => {
            let file = File::open(path)?;
            let mut bufreader = BufReader::new(file);
            ParserOutput::owx(
                horned_owl::io::owx::reader::read(&mut bufreader, config).map_err(horned_error)?,
            )
        }
        Some(ResourceType::RDF) => {
            let b = Build::new();
            let iri = horned_owl::resolve::path_to_file_iri(&b, path);
            ParserOutput::rdf(
                horned_owl::io::rdf::closure_reader::read(&iri, config).map_err(horned_error)?,
            )
        }
        None => {
            return Err(SchemaError::CommandError(format!(
                "Cannot parse a file of this format: {:?}",
                path
            )));
        }
    })
}

fn ontology_iri(ont: &SetOntology<RcStr>) -> Option<String> {
    ont.iter().find_map(|c| match &c.component {
        Component::OntologyID(id) => id.iri.as_ref().map(|i| i.to_string()),
        _ => None,
    })
}

/// Parse the ontology at `path` and load it into a fresh schema.
///
/// Namespace declarations come from the document header for the XML
/// syntaxes, merged with whatever prefixes the parser reported.
pub fn load_path(path: &Path, config: ParserConfiguration) -> Result<OwlSchema, SchemaError> {
    let (ont, mapping, _incomplete) = parse_path(path, config)?.decompose();

    let mut header = match path_type(path) {
        Some(ResourceType::OWX) | Some(ResourceType::RDF) => {
            SchemaHeader::read(BufReader::new(File::open(path)?))?
        }
        _ => SchemaHeader::new(),
    };

    if let Some(mapping) = mapping {
        for (prefix, namespace) in mapping.mappings() {
            header
                .prefixes
                .entry(prefix.clone())
                .or_insert_with(|| namespace.clone());
        }
    }
    if header.about.is_none() {
        header.about = ontology_iri(&ont);
    }

    let mut schema = OwlSchema::with_header(&header, SchemasRepository::well_known());
    schema.load(loader::facts(&ont))?;
    Ok(schema)
}

/// `key` as a CURIE when a declared prefix covers it, else as a URI.
pub fn display_key(schema: &OwlSchema, key: &ElementKey) -> String {
    let uri = key.to_uri();
    schema.shrink_uri(&uri).unwrap_or(uri)
}

pub mod summary {
    use owl_schema::schema::OwlSchema;
    use indexmap::map::IndexMap;

    #[derive(Debug)]
    pub struct SummaryStatistics {
        pub classes: usize,
        pub object_properties: usize,
        pub datatype_properties: usize,
        pub individuals: usize,
        pub datatypes: usize,
        pub annotation_properties: usize,
        pub top_level_classes: usize,
        pub classes_by_namespace: IndexMap<String, usize>,
    }

    impl SummaryStatistics {
        pub fn with_namespaces(&self) -> impl Iterator<Item = (&String, &usize)> + '_ {
            self.classes_by_namespace.iter().filter(|&(_, v)| v > &0)
        }
    }

    pub fn summarize(schema: &OwlSchema) -> SummaryStatistics {
        SummaryStatistics {
            classes: schema.owl_classes().len(),
            object_properties: schema.object_properties().count(),
            datatype_properties: schema.datatype_properties().count(),
            individuals: schema.individuals().len(),
            datatypes: schema.datatypes().len(),
            annotation_properties: schema.annotation_properties().len(),
            top_level_classes: schema.top_level_classes().len(),
            classes_by_namespace: classes_by_namespace(schema),
        }
    }

    fn classes_by_namespace(schema: &OwlSchema) -> IndexMap<String, usize> {
        let mut im = IndexMap::new();
        for ns in schema.namespaces() {
            im.insert(ns.clone(), 0);
        }
        for key in schema.owl_classes().keys() {
            let ns = key.namespace().unwrap_or("").to_string();
            *im.entry(ns).or_insert(0) += 1;
        }
        im.sort_keys();
        im
    }
}

pub mod config {
    use clap::App;
    use clap::Arg;
    use clap::ArgAction;
    use clap::ArgMatches;
    use horned_owl::io::ParserConfiguration;
    use horned_owl::io::RDFParserConfiguration;
    use owl_schema::closure::DependencyFilter;
    use owl_schema::key::ElementKey;
    use owl_schema::package::PackagesConfiguration;
    use owl_schema::schema::OwlSchema;
    use owl_schema::SchemaError;

    /// Send log records to stderr, filtered by `RUST_LOG`.
    pub fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn parser_app(app: App<'static>) -> App<'static> {
        app.arg(
            clap::arg!(--"strict")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Parse RDF strictly"),
        )
    }

    pub fn parser_config(matches: &ArgMatches) -> ParserConfiguration {
        ParserConfiguration {
            rdf: RDFParserConfiguration {
                lax: !matches.get_one::<bool>("strict").unwrap_or(&false),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn packages_app(app: App<'static>) -> App<'static> {
        app.arg(
            Arg::new("force-package")
                .long("force-package")
                .takes_value(true)
                .multiple_occurrences(true)
                .value_name("CLASS")
                .help("Treat CLASS as a package"),
        )
        .arg(
            Arg::new("forget-package")
                .long("forget-package")
                .takes_value(true)
                .multiple_occurrences(true)
                .value_name("CLASS")
                .help("Never treat CLASS as a package"),
        )
        .arg(
            Arg::new("forget-namespace")
                .long("forget-namespace")
                .takes_value(true)
                .multiple_occurrences(true)
                .value_name("NAMESPACE")
                .help("Never make packages from classes of NAMESPACE"),
        )
        .arg(
            clap::arg!(--"sub-packages")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Allow packages inside packages"),
        )
        .arg(
            clap::arg!(--"no-defaults")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Only use explicitly forced packages"),
        )
    }

    /// Resolve a class given on the command line, either as a full
    /// URI or as a CURIE known to `schema`.
    pub fn class_key(schema: &OwlSchema, s: &str) -> Result<ElementKey, SchemaError> {
        let key = ElementKey::from_uri(s);
        if schema.has_owl_class(&key) {
            return Ok(key);
        }
        match schema.expand_curie(s).map(|uri| ElementKey::from_uri(&uri)) {
            Some(key) if schema.has_owl_class(&key) => Ok(key),
            _ => Err(SchemaError::CommandError(format!("Unknown class: {}", s))),
        }
    }

    fn flag(matches: &ArgMatches, name: &str) -> bool {
        *matches.get_one::<bool>(name).unwrap_or(&false)
    }

    pub fn packages_config(
        schema: &OwlSchema,
        matches: &ArgMatches,
    ) -> Result<PackagesConfiguration, SchemaError> {
        let mut config = PackagesConfiguration {
            accept_defaults: !flag(matches, "no-defaults"),
            accept_sub_packages: flag(matches, "sub-packages"),
            ..Default::default()
        };

        for c in matches.values_of("force-package").into_iter().flatten() {
            config = config.force_package(class_key(schema, c)?);
        }
        for c in matches.values_of("forget-package").into_iter().flatten() {
            config = config.forget_package(class_key(schema, c)?);
        }
        for ns in matches.values_of("forget-namespace").into_iter().flatten() {
            config = config.forget_namespace(ns);
        }
        Ok(config)
    }

    pub fn dependency_app(app: App<'static>) -> App<'static> {
        app.arg(
            Arg::new("radius")
                .long("radius")
                .short('r')
                .takes_value(true)
                .help("Number of hops to follow from the class (default 1)"),
        )
        .arg(
            clap::arg!(--"unbounded")
                .required(false)
                .action(ArgAction::SetTrue)
                .conflicts_with("radius")
                .help("Follow dependencies without a bound"),
        )
        .arg(
            clap::arg!(--"sub-classes")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Follow sub classes"),
        )
        .arg(
            clap::arg!(--"no-parents")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Do not follow super classes"),
        )
        .arg(
            clap::arg!(--"no-alias")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Do not follow equivalent classes"),
        )
        .arg(
            clap::arg!(--"indirect")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Follow properties defined on super classes"),
        )
        .arg(
            clap::arg!(--"no-foreign")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Do not expand classes of imported schemas"),
        )
        .arg(
            clap::arg!(--"bold")
                .required(false)
                .action(ArgAction::SetTrue)
                .help("Mark classes of this schema"),
        )
    }

    pub fn dependency_filter(matches: &ArgMatches) -> Result<DependencyFilter, SchemaError> {
        let maximum_radius = if flag(matches, "unbounded") {
            None
        } else {
            match matches.value_of("radius") {
                Some(r) => Some(r.parse::<usize>().map_err(|_| {
                    SchemaError::CommandError(format!("Radius must be a number: {}", r))
                })?),
                None => Some(1),
            }
        };

        Ok(DependencyFilter {
            maximum_radius,
            include_parent_relations: !flag(matches, "no-parents"),
            include_sub_classes: flag(matches, "sub-classes"),
            include_alias: !flag(matches, "no-alias"),
            indirect_relations: flag(matches, "indirect"),
            include_foreign_disconnected: !flag(matches, "no-foreign"),
            show_own_elements_in_bold: flag(matches, "bold"),
        })
    }
}
