use clap::App;
use clap::Arg;
use clap::ArgMatches;

use owl_schema::SchemaError;
use owl_schema_bin::{
    config::{class_key, dependency_app, dependency_filter, init_logging, parser_app, parser_config},
    display_key, load_path,
};

use std::path::Path;

#[allow(dead_code)]
fn main() -> Result<(), SchemaError> {
    init_logging();
    let matches = app("owl-schema-depends").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &str) -> App<'static> {
    dependency_app(parser_app(
        App::new(name)
            .version("0.1")
            .about("List the classes that a class of an OWL file depends on")
            .author("Phillip Lord")
            .arg(
                Arg::with_name("INPUT")
                    .help("Sets the input file to use")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::with_name("CLASS")
                    .help("The class to start from, as a URI or CURIE")
                    .required(true)
                    .index(2),
            ),
    ))
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), SchemaError> {
    let input = matches
        .value_of("INPUT")
        .ok_or_else(|| SchemaError::CommandError("A file name must be specified".to_string()))?;
    let class = matches
        .value_of("CLASS")
        .ok_or_else(|| SchemaError::CommandError("A class must be specified".to_string()))?;

    let schema = load_path(Path::new(input), parser_config(matches))?;
    let seed = class_key(&schema, class)?;
    let filter = dependency_filter(matches)?;

    let closure = schema.dependency_closure(&seed, &filter);
    for key in closure.sorted_keys() {
        let distance = closure.distance(key).unwrap_or(0);
        let mark = if filter.emphasize(&schema, key) { "*" } else { "" };
        println!("{}\t{}{}", distance, display_key(&schema, key), mark);
    }

    Ok(())
}
