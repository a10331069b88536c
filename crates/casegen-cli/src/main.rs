//! `generator` - writes one case file per row of a parameter matrix
//!
//! ```text
//! generator [--config <toml>] [--delimiter <char>] [--extension <ext>] [--log-json] <params_file> <output_dir>
//! ```

use anyhow::{Context, Result};
use casegen_core::{GenerationReport, Generator, GeneratorConfig};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: generator <params_file> <output_dir>";

fn cli() -> Command {
    Command::new("generator")
        .version(casegen_core::VERSION)
        .about("Generate cluster test case files from a pairwise parameter matrix")
        .override_usage("generator [OPTIONS] <params_file> <output_dir>")
        .arg(
            Arg::new("params_file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Parameter matrix, header row first"),
        )
        .arg(
            Arg::new("output_dir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Existing directory receiving the case files"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with generator settings"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .value_parser(parse_delimiter)
                .help("Matrix column delimiter (single character, or 'tab')"),
        )
        .arg(
            Arg::new("extension")
                .long("extension")
                .help("Case file extension [default: case]"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON on stderr"),
        )
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    match value {
        "tab" | "\\t" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(format!("expected a single character, got '{value}'")),
            }
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry
            .with(layer.with_ansi(std::io::stderr().is_terminal()))
            .init();
    }
}

fn load_config(args: &ArgMatches) -> Result<GeneratorConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => GeneratorConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GeneratorConfig::new(),
    };
    if let Some(delimiter) = args.get_one::<char>("delimiter") {
        config = config.with_delimiter(*delimiter);
    }
    if let Some(extension) = args.get_one::<String>("extension") {
        config = config.with_extension(extension.clone());
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn run(args: &ArgMatches) -> Result<GenerationReport> {
    let config = load_config(args)?;
    let params_file = args
        .get_one::<PathBuf>("params_file")
        .context("missing params_file")?;
    let output_dir = args
        .get_one::<PathBuf>("output_dir")
        .context("missing output_dir")?;

    Generator::new(config)
        .run(params_file, output_dir)
        .with_context(|| format!("generating cases from {}", params_file.display()))
}

fn main() -> ExitCode {
    let args = match cli().try_get_matches() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("{USAGE}");
            if !matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
            ) {
                eprint!("{e}");
            }
            return ExitCode::FAILURE;
        }
    };

    init_tracing(args.get_flag("log-json"));

    match run(&args) {
        Ok(report) => {
            let output_dir = args
                .get_one::<PathBuf>("output_dir")
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!(
                "generated {} case files into {}",
                report.distinct_files(),
                output_dir
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "case generation failed");
            ExitCode::FAILURE
        }
    }
}
