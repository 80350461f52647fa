use clap::App;
use clap::Arg;
use clap::ArgMatches;

use owl_schema::model::Named;
use owl_schema::SchemaError;
use owl_schema_bin::{
    config::{init_logging, packages_app, packages_config, parser_app, parser_config},
    display_key, load_path,
};

use std::path::Path;

#[allow(dead_code)]
fn main() -> Result<(), SchemaError> {
    init_logging();
    let matches = app("owl-schema-packages").get_matches();
    matcher(&matches)
}

pub(crate) fn app(name: &str) -> App<'static> {
    packages_app(parser_app(
        App::new(name)
            .version("0.1")
            .about("Partition the classes of an OWL file into packages")
            .author("Phillip Lord")
            .arg(
                Arg::with_name("INPUT")
                    .help("Sets the input file to use")
                    .required(true)
                    .index(1),
            ),
    ))
}

pub(crate) fn matcher(matches: &ArgMatches) -> Result<(), SchemaError> {
    let input = matches
        .value_of("INPUT")
        .ok_or_else(|| SchemaError::CommandError("A file name must be specified".to_string()))?;

    let mut schema = load_path(Path::new(input), parser_config(matches))?;
    let config = packages_config(&schema, matches)?;
    let count = schema.extract_packages(&config);

    println!("Packages: {}", count);

    let keys: Vec<_> = schema
        .package_keys()
        .map(|p| p.iter().cloned().collect())
        .unwrap_or_default();
    for key in &keys {
        let view = match schema.package_view(key) {
            Some(view) => view,
            None => continue,
        };

        println!("\n{}", display_key(&schema, view.package.key()));
        for class in &view.owned {
            println!("\t{}", display_key(&schema, class.key()));
        }
        if !view.foreign.is_empty() {
            println!("\tLinked:");
            for class in &view.foreign {
                println!("\t\t{}", display_key(&schema, class.key()));
            }
        }
    }

    let loose: Vec<_> = schema
        .owl_classes()
        .values()
        .filter(|c| !c.is_package() && !c.is_in_package())
        .map(|c| display_key(&schema, c.key()))
        .collect();
    if !loose.is_empty() {
        println!("\nOutside any package: {}", loose.len());
        for k in loose {
            println!("\t{}", k);
        }
    }

    Ok(())
}
