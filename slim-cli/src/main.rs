//! Command-line interface for slim
//! This binary renders slim templates to HTML and dumps their parsed trees for inspection.
//!
//! Usage:
//!   slim render `<template>` [--context `<file>`] [--output `<file>`]   - Render to HTML
//!   slim inspect `<template>` [--format treeviz|json]                 - Print the node tree
//!
//! Both commands accept `--config <file>`; without it `./slim.toml` is used when present.
//! Logging goes to stderr and is controlled by `RUST_LOG`, falling back to `logging.level`.

use clap::{Arg, ArgMatches, Command};
use slim_config::{ContextFormat, Loader, SlimConfig};
use slim_html::{builtins, RenderOptions, Template};
use slim_parser::slim::formats::FormatRegistry;
use slim_parser::slim::loader::SourceLoader;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOCAL_CONFIG: &str = "slim.toml";

fn build_cli() -> Command {
    Command::new("slim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and inspect slim templates")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the defaults"),
        )
        .subcommand(
            Command::new("render")
                .about("Render a template to HTML")
                .arg(
                    Arg::new("template")
                        .help("Path to the .slim template")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("context")
                        .long("context")
                        .short('x')
                        .help("JSON or YAML file whose top-level keys become template variables"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write HTML to this file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed node tree")
                .arg(
                    Arg::new("template")
                        .help("Path to the .slim template")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["treeviz", "json"])
                        .default_value("treeviz"),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_config(matches.get_one::<String>("config").map(String::as_str));
    init_logging(&config.logging.level);

    match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(sub, &config),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        _ => {
            eprintln!("Unknown command; see `slim --help`");
            std::process::exit(1);
        }
    }
}

/// Print an error with its chain of causes and exit.
fn fail(context: &str, err: &dyn Error) -> ! {
    eprintln!("{}: {}", context, err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
    std::process::exit(1);
}

fn load_config(path: Option<&str>) -> SlimConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail("Configuration error", &e))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}

fn load_context(path: &Path, format: ContextFormat) -> Result<serde_json::Value, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let value = match format.for_path(path) {
        ContextFormat::Yaml => serde_yaml::from_str(&text)?,
        _ => serde_json::from_str(&text)?,
    };
    tracing::debug!(path = %path.display(), "loaded render context");
    Ok(value)
}

/// Handle the render command
fn handle_render_command(matches: &ArgMatches, config: &SlimConfig) {
    let Some(path) = matches.get_one::<String>("template") else {
        eprintln!("A template path is required");
        std::process::exit(1);
    };

    let mut template = Template::parse_file(path)
        .unwrap_or_else(|e| fail("Error reading template", &e))
        .with_options(RenderOptions::with_indent(config.render.indent.clone()));
    template.func_map(builtins::standard());

    let context = match matches.get_one::<String>("context") {
        Some(context_path) => load_context(Path::new(context_path), config.context.format)
            .unwrap_or_else(|e| fail("Error loading context", &*e)),
        None => serde_json::Value::Null,
    };

    let result = match matches.get_one::<String>("output") {
        Some(output) => {
            let file = File::create(output).unwrap_or_else(|e| fail("Error creating output", &e));
            let mut writer = BufWriter::new(file);
            template.execute(&mut writer, &context)
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            template.execute(&mut writer, &context)
        }
    };

    if let Err(e) = result {
        fail("Render error", &e);
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let Some(path) = matches.get_one::<String>("template") else {
        eprintln!("A template path is required");
        std::process::exit(1);
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("treeviz");

    let doc = SourceLoader::from_path(path)
        .unwrap_or_else(|e| fail("Error reading template", &e))
        .parse();

    let registry = FormatRegistry::default();
    let formatted = registry
        .serialize(&doc, format)
        .unwrap_or_else(|e| fail("Format error", &e));

    print!("{}", formatted);
    if !formatted.ends_with('\n') {
        println!();
    }
}
