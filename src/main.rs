// CLI entry point: three dump files in, CSVs plus GraphQL artifacts out.

use clap::{CommandFactory, Parser};
use sqldump2graphql::emit::NamingProfile;
use sqldump2graphql::error::DumpError;
use sqldump2graphql::logger;
use sqldump2graphql::pipeline::{self, PipelineOptions};
use sqldump2graphql::report::{self, ExpectedCounts};
use std::path::PathBuf;

// Command-line flags and positional arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Naming profile for the generated GraphQL schema and mutations.
    #[arg(long, value_enum, default_value = "localized")]
    naming: NamingProfile,

    /// Also emit appsync_mutations.graphql with bulk create calls.
    #[arg(long)]
    mutations: bool,

    /// Directory where output artifacts are written.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Expected countries row count (advisory check only).
    #[arg(long, default_value_t = 246)]
    expect_countries: usize,

    /// Expected states row count (advisory check only).
    #[arg(long, default_value_t = 4121)]
    expect_states: usize,

    /// Expected cities row count (advisory check only).
    #[arg(long, default_value_t = 48356)]
    expect_cities: usize,

    /// Write the run report as JSON to this path.
    #[arg(long)]
    report_json: Option<String>,

    /// The three dump files (countries, states, cities in any order).
    #[arg(required = true, num_args = 3)]
    dumps: Vec<String>,
}

fn main() {
    if std::env::args().len() == 1 {
        let _ = Args::command().print_help();
        eprintln!();
        std::process::exit(1);
    }
    let args = Args::parse();

    // Initialize logging based on --debug.
    logger::set_debug(args.debug);

    if let Err(e) = run(args) {
        logger::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), DumpError> {
    logger::debug("main: starting dump conversion");
    for path in &args.dumps {
        logger::debug(&format!("main: input {}", path));
    }

    let opts = PipelineOptions {
        naming: args.naming,
        emit_mutations: args.mutations,
        out_dir: args.out_dir,
        expected: ExpectedCounts {
            countries: args.expect_countries,
            states: args.expect_states,
            cities: args.expect_cities,
        },
    };

    let outcome = pipeline::run(&args.dumps, &opts)?;

    report::print_summary(&outcome.reports, &outcome.discards)?;
    if let Some(path) = args.report_json.as_deref() {
        report::write_json(path, &outcome.reports)?;
        logger::debug(&format!("main: report written to {}", path));
    }

    logger::debug("main: conversion complete");
    Ok(())
}
