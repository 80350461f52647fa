use clap::App;
use clap::Arg;
use clap::ArgMatches;

use owl_schema::model::{Element, ElementKind, Named};
use owl_schema::walk::{walk, walk_hierarchy};
use owl_schema::SchemaError;
use owl_schema_bin::{
    config::{class_key, init_logging, parser_app, parser_config},
    display_key, load_path,
};

use std::path::Path;

#[allow(dead_code)]
fn main() -> Result<(), SchemaError> {
    init_logging();
    let matches = app("owl-schema-hierarchy").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &str) -> App<'static> {
    parser_app(
        App::new(name)
            .version("0.1")
            .about("Print the class hierarchy of an OWL file")
            .author("Phillip Lord")
            .arg(
                Arg::with_name("INPUT")
                    .help("Sets the input file to use")
                    .required(true)
                    .index(1),
            )
            .arg(
                Arg::with_name("root")
                    .long("root")
                    .takes_value(true)
                    .value_name("CLASS")
                    .help("Only print the tree below CLASS"),
            )
            .arg(
                Arg::with_name("depth")
                    .long("depth")
                    .takes_value(true)
                    .help("Stop descending below this depth"),
            ),
    )
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), SchemaError> {
    let input = matches
        .value_of("INPUT")
        .ok_or_else(|| SchemaError::CommandError("A file name must be specified".to_string()))?;
    let max_depth = match matches.value_of("depth") {
        Some(d) => Some(d.parse::<usize>().map_err(|_| {
            SchemaError::CommandError(format!("Depth must be a number: {}", d))
        })?),
        None => None,
    };

    let schema = load_path(Path::new(input), parser_config(matches))?;

    let print = |e: Element, depth: usize| {
        let label = match e.kind() {
            ElementKind::Individual => format!("- {}", display_key(&schema, e.key())),
            _ => display_key(&schema, e.key()),
        };
        match e.named().label() {
            Some(l) => println!("{}{} \"{}\"", "  ".repeat(depth), label, l),
            None => println!("{}{}", "  ".repeat(depth), label),
        }
        max_depth.map_or(true, |m| depth < m)
    };

    let count = match matches.value_of("root") {
        Some(root) => {
            let key = class_key(&schema, root)?;
            match schema.owl_class(&key) {
                Some(class) => walk(&schema, Element::Class(class), print),
                None => 0,
            }
        }
        None => walk_hierarchy(&schema, print),
    };
    println!("\nElements: {}", count);

    Ok(())
}
