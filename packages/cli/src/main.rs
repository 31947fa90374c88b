//! `wamctl`: WAM diagram command-line interface.
//!
//! Provides four subcommands:
//!
//! - **`export`**: encode a Graph JSON file as RDF or XML.
//! - **`import`**: decode an RDF or XML document into Graph JSON.
//! - **`validate`**: check a diagram against the structural rules.
//! - **`render`**: print a human-readable summary of a diagram.
//!
//! All subcommands read from a file path or from stdin (`-`). `validate` and
//! `render` accept Graph JSON, or an RDF/XML document when `--format` is given
//! or the file extension names one.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use wam::{validate, DecodeOptions, Format, Graph};

/// wamctl: WAM diagram CLI
///
/// Convert, validate and inspect Workflow and Access Model diagrams.
#[derive(Parser)]
#[command(name = "wamctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a Graph JSON file as RDF or XML.
    ///
    /// The input may be a bare graph (`{ nodes, edges }`) or an export request
    /// body (`{ data: { nodes, edges } }`).
    Export {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,

        /// Output format: rdf | xml
        #[arg(short, long, value_name = "FORMAT")]
        format: Format,

        /// Write to this file instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Decode an RDF or XML document and print it as Graph JSON.
    ///
    /// The format is taken from the file extension (.ttl, .rdf, .xml) unless
    /// `--format` is given; it is required when reading stdin.
    Import {
        /// Path to the document, or `-` for stdin.
        file: PathBuf,

        /// Input format: rdf | xml
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<Format>,

        #[command(flatten)]
        rdf: RdfArgs,

        /// Write to this file instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Validate a diagram. Exits 0 if valid, 1 otherwise.
    Validate {
        /// Path to the diagram, or `-` for stdin.
        file: PathBuf,

        /// Read the input as rdf | xml instead of Graph JSON.
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<Format>,

        #[command(flatten)]
        rdf: RdfArgs,

        /// Print the report as JSON (`{ errors, sources }`).
        #[arg(long)]
        json: bool,
    },

    /// Render a diagram as human-readable text.
    Render {
        /// Path to the diagram, or `-` for stdin.
        file: PathBuf,

        /// Read the input as rdf | xml instead of Graph JSON.
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<Format>,

        #[command(flatten)]
        rdf: RdfArgs,
    },
}

/// RDF decoding options.
#[derive(Args)]
struct RdfArgs {
    /// Fail on RDF syntax errors and unrecognised triples instead of skipping them.
    #[arg(long, env = "WAM_RDF_STRICT")]
    strict: bool,

    /// Take node types from the RDF class triple rather than guessing from the id.
    #[arg(long, env = "WAM_RDF_TYPE_FROM_CLASS")]
    type_from_class: bool,
}

impl RdfArgs {
    fn options(&self) -> DecodeOptions {
        DecodeOptions {
            strict: self.strict,
            type_from_class: self.type_from_class,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Export {
            file,
            format,
            output,
        } => {
            let graph = parse_graph_json(&read_input(&file));
            write_output(output.as_deref(), &wam::export(&graph, format));
        }

        Command::Import {
            file,
            format,
            rdf,
            output,
        } => {
            let format = format
                .or_else(|| Format::from_path(&file))
                .unwrap_or_else(|| fatal("cannot tell the input format; pass --format rdf|xml"));
            let graph = wam::import(&read_input(&file), format, &rdf.options())
                .unwrap_or_else(|e| fatal(&e.to_string()));
            write_output(output.as_deref(), &to_json(&graph));
        }

        Command::Validate {
            file,
            format,
            rdf,
            json,
        } => {
            let graph = load_graph(&file, format, &rdf.options());
            let report = validate(&graph);
            if json {
                println!("{}", to_json(&report));
            } else {
                print!("{}", wam::render::render_report(&report));
            }
            if !report.is_valid() {
                process::exit(1);
            }
        }

        Command::Render { file, format, rdf } => {
            let graph = load_graph(&file, format, &rdf.options());
            print!("{}", wam::render::render_graph(&graph));
        }
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &Path) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

fn write_output(path: Option<&Path>, text: &str) {
    match path {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            fatal(&format!("failed to write {}: {}", path.display(), e))
        }),
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}

/// Decode with an explicit or extension-derived format, else parse as JSON.
fn load_graph(path: &Path, format: Option<Format>, options: &DecodeOptions) -> Graph {
    let text = read_input(path);
    match format.or_else(|| Format::from_path(path)) {
        Some(format) => {
            wam::import(&text, format, options).unwrap_or_else(|e| fatal(&e.to_string()))
        }
        None => parse_graph_json(&text),
    }
}

/// Parse a bare graph, or the `{ "data": graph }` wrapper the HTTP export
/// endpoints take.
fn parse_graph_json(json: &str) -> Graph {
    #[derive(Deserialize)]
    struct Wrapped {
        data: Graph,
    }

    let value: serde_json::Value = serde_json::from_str(json)
        .unwrap_or_else(|e| fatal(&format!("failed to parse input as JSON: {}", e)));
    let parsed = if value.get("data").is_some() && value.get("nodes").is_none() {
        serde_json::from_value::<Wrapped>(value).map(|w| w.data)
    } else {
        serde_json::from_value::<Graph>(value)
    };
    parsed.unwrap_or_else(|e| fatal(&format!("failed to parse input as a diagram: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fatal(&format!("failed to serialise output: {}", e)))
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("wamctl: {}", msg);
    process::exit(2);
}
