//! Implementation of the `funcx functions` command.

use funcx::builtins::string_function_names;
use funcx_semantics::{Namespace, known_base_functions};
use miette::IntoDiagnostic;
use serde::Serialize;

use super::cli_registry;
use crate::output::table::format_listing_table;

/// Arguments for the functions command.
#[derive(Debug, clap::Args)]
pub struct FunctionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for the function listing.
#[derive(Debug, Serialize)]
pub struct FunctionListing {
    pub namespaces: Vec<NamespaceEntry>,
    pub base_functions: Vec<&'static str>,
    pub string_functions: Vec<&'static str>,
}

/// One reserved namespace.
#[derive(Debug, Serialize)]
pub struct NamespaceEntry {
    pub name: &'static str,
    pub prefix: &'static str,
}

/// Run the functions command.
pub fn run_functions(args: FunctionsArgs) -> miette::Result<i32> {
    let listing = FunctionListing {
        namespaces: Namespace::ALL
            .iter()
            .map(|ns| NamespaceEntry {
                name: ns.name(),
                prefix: ns.prefix(),
            })
            .collect(),
        base_functions: known_base_functions().to_vec(),
        string_functions: string_function_names(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&listing).into_diagnostic()?
        );
        return Ok(exitcode::OK);
    }

    let namespaces: Vec<(String, String)> = listing
        .namespaces
        .iter()
        .map(|ns| (ns.prefix.to_string(), ns.name.to_string()))
        .collect();
    println!("Reserved namespaces:");
    println!("{}", format_listing_table(["Prefix", "Namespace"], &namespaces));

    let registry = cli_registry();
    let base: Vec<(String, String)> = listing
        .base_functions
        .iter()
        .map(|name| {
            let availability = if registry.has_function(name) {
                "available"
            } else {
                "supplied by the host"
            };
            (format!("{name}()"), availability.to_string())
        })
        .collect();
    println!("\nReserved base functions:");
    println!("{}", format_listing_table(["Function", "Availability"], &base));

    let strings: Vec<(String, String)> = listing
        .string_functions
        .iter()
        .map(|name| (format!("string.{name}(s, ...)"), format!(".{name}(...)")))
        .collect();
    println!("\nBuilt-in string functions:");
    println!("{}", format_listing_table(["Base form", "Chained form"], &strings));

    Ok(exitcode::OK)
}
