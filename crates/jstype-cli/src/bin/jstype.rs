#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use jstype_checker::CheckerOptions;
use jstype_cli::args::CliArgs;
use jstype_cli::config::{ResolvedOptions, load_for_args};
use jstype_cli::driver::{self, RunSummary};
use jstype_cli::reporter::Reporter;
use jstype_cli::{report, tracing_config};

const EXIT_SUCCESS: i32 = 0;
const EXIT_TYPE_ERRORS: i32 = 1;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = load_for_args(&args, &cwd)?;
    let options = ResolvedOptions::resolve(&args, &config);

    // JSTYPE_LOG / RUST_LOG, or --verbose. Supports JSTYPE_LOG_FORMAT=tree|json|text.
    tracing_config::init_tracing(options.verbose);

    let pretty = options
        .pretty
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(pretty);
    let reporter = Reporter::new(pretty);

    let files = driver::discover_files(&options, &cwd)?;
    if options.verbose {
        eprintln!(
            "Checking {} file(s){}",
            files.len(),
            if options.infer { " with inference" } else { "" }
        );
    }

    let checker_options = CheckerOptions {
        infer: options.infer,
    };
    let results = driver::check_files(&files, &cwd, &checker_options);

    for file in &results {
        println!("{}", reporter.render_file(file));
    }
    let summary = RunSummary::from_files(&results);
    if results.len() != 1 {
        println!("{}", reporter.render_summary(&summary));
    }

    if let Some(path) = options.report.as_deref() {
        report::write_report(&cwd.join(path), &results)?;
    }

    if summary.has_failures() {
        std::process::exit(EXIT_TYPE_ERRORS);
    }
    std::process::exit(EXIT_SUCCESS);
}
