//! Command-line interface for py2rb
//! This binary translates Python source files into best-effort Ruby.
//!
//! Usage:
//!   py2rb convert `<path>` [--tables `<file>`] [--output `<file>`]  - Translate a file ('-' reads stdin)
//!   py2rb dump-tables [--format `<format>`]                     - Print the built-in rewrite tables

use clap::{Arg, Command};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process;

use py2rb::{RewriteTables, Translator};

fn main() {
    init_tracing();

    let matches = Command::new("py2rb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A best-effort Python to Ruby source translator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Translate a Python source file to best-effort Ruby")
                .arg(
                    Arg::new("path")
                        .help("Path to the Python file ('-' reads stdin)")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("tables")
                        .long("tables")
                        .short('t')
                        .help("JSON or YAML file overriding the built-in rewrite tables"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write output to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("dump-tables")
                .about("Print the built-in rewrite tables")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Serialization format ('json' or 'yaml')")
                        .default_value("json"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let path = convert_matches.get_one::<String>("path").unwrap();
            handle_convert_command(
                path,
                convert_matches.get_one::<String>("tables"),
                convert_matches.get_one::<String>("output"),
            );
        }
        Some(("dump-tables", dump_matches)) => {
            let format = dump_matches.get_one::<String>("format").unwrap();
            handle_dump_tables_command(format);
        }
        _ => unreachable!(),
    }
}

/// Handle the convert command
fn handle_convert_command(path: &str, tables_path: Option<&String>, output_path: Option<&String>) {
    let tables = match tables_path {
        Some(p) => RewriteTables::from_path(Path::new(p)).unwrap_or_else(|e| {
            eprintln!("Error loading tables: {}", e);
            process::exit(1);
        }),
        None => RewriteTables::default(),
    };
    let translator = Translator::new(&tables);

    let mut input: Box<dyn io::BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error reading file: {}", e);
                process::exit(1);
            }
        }
    };

    let mut output: Box<dyn Write> = match output_path {
        Some(p) => match File::create(p) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error creating output file: {}", e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    if let Err(e) = translator.translate(&mut input, &mut output) {
        eprintln!("Translation error: {}", e);
        process::exit(1);
    }
    if let Err(e) = output.flush() {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Handle the dump-tables command
fn handle_dump_tables_command(format: &str) {
    let tables = RewriteTables::default();
    let rendered = match format {
        "json" => serde_json::to_string_pretty(&tables).expect("built-in tables serialize"),
        "yaml" => serde_yaml::to_string(&tables).expect("built-in tables serialize"),
        other => {
            eprintln!("Unknown format: {} (expected 'json' or 'yaml')", other);
            process::exit(1);
        }
    };
    println!("{}", rendered);
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
