use clap::App;
use clap::ArgMatches;

use owl_schema::SchemaError;
use owl_schema_bin::config::init_logging;

mod schema_depends;
mod schema_hierarchy;
mod schema_packages;
mod schema_summary;

fn main() -> Result<(), SchemaError> {
    init_logging();
    let matches = app().get_matches();
    matcher(matches)
}

fn app() -> App<'static> {
    App::new("owl-schema")
        .version("0.3")
        .about("Command Line tools for browsing OWL schemas")
        .author("Phillip Lord")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(schema_depends::app("depends"))
        .subcommand(schema_hierarchy::app("hierarchy"))
        .subcommand(schema_packages::app("packages"))
        .subcommand(schema_summary::app("summary"))
}

fn matcher(matches: ArgMatches) -> Result<(), SchemaError> {
    if let Some((name, submatches)) = matches.subcommand() {
        match name {
            "depends" => schema_depends::matcher(submatches),
            "hierarchy" => schema_hierarchy::matcher(submatches),
            "packages" => schema_packages::matcher(submatches),
            "summary" => schema_summary::matcher(submatches),
            _ => Err(SchemaError::CommandError(format!(
                "Unknown subcommand: {}",
                name
            ))),
        }
    } else {
        Ok(())
    }
}
