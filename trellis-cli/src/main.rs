//! Command-line interface for trellis
//! This binary loads a language definition, runs an input file through it and prints the
//! result in one of several formats.
//!
//! Usage:
//!   trellis `<language>` `<input>` [--format `<format>`]   - Parse input with a language definition
//!   trellis `<language>` - --format tokens                  - Read the input from stdin
//!
//! Formats: tokens (JSON token stream), graph (compiled grammar), treeviz, json.
//! Defaults come from the embedded configuration, layered with `--config <file>` and flags.

mod transforms;

use clap::{value_parser, Arg, ArgMatches, Command};
use std::fs;
use std::io::Read;
use std::process;
use tracing_subscriber::EnvFilter;
use trellis::trellis::diagnostics::{error_span, format_source_context};
use trellis::trellis::loader::LanguageLoader;
use trellis_config::{Loader, TrellisConfig};

fn main() {
    let matches = Command::new("trellis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse text with a grammar described in a language definition file")
        .arg_required_else_help(true)
        .arg(
            Arg::new("language")
                .help("Language definition file (.yaml, .yml or .json)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("input")
                .help("Input file, or '-' for stdin")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (default from configuration: treeviz)")
                .long_help(transforms::format_help())
                .value_parser(transforms::AVAILABLE_FORMATS.to_vec()),
        )
        .arg(
            Arg::new("truncate")
                .long("truncate")
                .help("Cut treeviz leaf content after this many characters")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter written to stderr, e.g. 'debug' or 'trellis=trace'")
                .default_value("warn"),
        )
        .get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    let language_path = arg(&matches, "language");
    let input_path = arg(&matches, "input");
    handle_parse_command(language_path, input_path, &config);
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

/// Embedded defaults, then `--config`, then explicit flags
fn load_config(matches: &ArgMatches) -> Result<TrellisConfig, trellis_config::ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if let Some(truncate) = matches.get_one::<u32>("truncate") {
        loader = loader.set_override("output.truncate", i64::from(*truncate))?;
    }
    loader.build()
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

/// Handle the parse command
fn handle_parse_command(language_path: &str, input_path: &str, config: &TrellisConfig) {
    let mut language = LanguageLoader::from_path(language_path)
        .map_err(trellis::trellis::Error::from)
        .and_then(|loader| loader.into_language())
        .unwrap_or_else(|e| {
            eprintln!("Error loading language '{}': {}", language_path, e);
            process::exit(1);
        });
    language.set_lexer_options(config.lexer.clone());
    language.set_parser_options(config.parser.clone());

    let source = read_input(input_path).unwrap_or_else(|e| {
        eprintln!("Error reading '{}': {}", input_path, e);
        process::exit(1);
    });

    let format = config.output.format.as_str();
    tracing::debug!(language = language_path, input = input_path, format, "running");
    match transforms::execute_transform(&language, &source, format, config.output.truncate) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(span) = error_span(&e) {
                eprintln!();
                eprint!("{}", format_source_context(&source, &span));
            }
            process::exit(1);
        }
    }
}
