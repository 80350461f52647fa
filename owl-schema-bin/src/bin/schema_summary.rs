use clap::App;
use clap::Arg;
use clap::ArgMatches;

use owl_schema::SchemaError;
use owl_schema_bin::{
    config::{init_logging, parser_app, parser_config},
    load_path,
    summary::summarize,
};

use std::path::Path;

#[allow(dead_code)]
fn main() -> Result<(), SchemaError> {
    init_logging();
    let matches = app("owl-schema-summary").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &str) -> App<'static> {
    parser_app(
        App::new(name)
            .version("0.1")
            .about("Summary statistics of the schema in an OWL file")
            .author("Phillip Lord")
            .arg(
                Arg::with_name("INPUT")
                    .help("Sets the input file to use")
                    .required(true)
                    .index(1),
            ),
    )
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), SchemaError> {
    let input = matches
        .value_of("INPUT")
        .ok_or_else(|| SchemaError::CommandError("A file name must be specified".to_string()))?;

    let schema = load_path(Path::new(input), parser_config(matches))?;
    let summary = summarize(&schema);

    println!("Classes: {}", summary.classes);
    println!("Top Level Classes: {}", summary.top_level_classes);
    println!("Object Properties: {}", summary.object_properties);
    println!("Datatype Properties: {}", summary.datatype_properties);
    println!("Individuals: {}", summary.individuals);
    println!("Datatypes: {}", summary.datatypes);
    println!("Annotation Properties: {}", summary.annotation_properties);

    if let Some(ns) = schema.default_namespace() {
        println!("\nDefault Namespace: {}", ns);
    }
    for (prefix, imported) in schema.imported_schemas() {
        println!(
            "Imported: {} {} ({})",
            prefix,
            imported.namespace,
            imported.name().unwrap_or("unknown")
        );
    }

    println!("\nClasses by Namespace:");
    for (ns, count) in summary.with_namespaces() {
        let prefix = schema.get_prefix(ns).unwrap_or("");
        println!("\t{}\t{}: {}", prefix, ns, count);
    }

    Ok(())
}
