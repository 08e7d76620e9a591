// SPDX-License-Identifier: MIT OR Apache-2.0
//! fieldpath CLI binary - address and mutate JSON documents by dotted path

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use fieldpath_cli::{parse_indices, parse_value, render};
use fieldpath_core::{Indices, concretize, templatize};
use fieldpath_ops::{
    DEFAULT_MAX_INDEX, Document, FieldAction, PartialUpdate, ResolveOptions, Submission,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldpath")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Compact JSON output
    #[arg(short = 'c', long = "compact", global = true)]
    compact: bool,

    /// Largest array index a path may address
    #[arg(long = "max-index", default_value_t = DEFAULT_MAX_INDEX, global = true)]
    max_index: usize,

    /// Log resolution steps to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for fieldpath CLI
#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get {
        /// Dotted path, may contain `$` wildcards
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Wildcard indices: `2`, `1,2`, or `[1,2]`
        #[arg(short = 'i', long = "indices")]
        indices: Option<String>,
    },
    /// Write a value at a path and print the document
    Set {
        /// Dotted path, may contain `$` wildcards
        path: String,
        /// Value as JSON; anything that is not JSON is taken as a string
        value: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Wildcard indices: `2`, `1,2`, or `[1,2]`
        #[arg(short = 'i', long = "indices")]
        indices: Option<String>,
    },
    /// Delete the value at a path and print the document
    Delete {
        /// Dotted path, may contain `$` wildcards
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Wildcard indices: `2`, `1,2`, or `[1,2]`
        #[arg(short = 'i', long = "indices")]
        indices: Option<String>,
    },
    /// Remove array elements and print the resulting partial update
    Remove {
        /// Element paths, each ending in an index
        #[arg(short = 'p', long = "path", required = true)]
        paths: Vec<String>,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Fill `$` wildcards with indices
    Concretize {
        /// Wildcard path
        path: String,
        /// Wildcard indices: `2`, `1,2`, or `[1,2]`
        #[arg(short = 'i', long = "indices")]
        indices: Option<String>,
    },
    /// Replace index segments with `$`
    Templatize {
        /// Concrete path
        path: String,
    },
    /// Build a partial update from a JSON list of field actions
    Submit {
        /// Actions file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match &args.command {
        Commands::Get {
            path,
            file,
            indices,
        } => run_get(&args, path, file.as_ref(), indices.as_deref()),
        Commands::Set {
            path,
            value,
            file,
            indices,
        } => run_set(&args, path, value, file.as_ref(), indices.as_deref()),
        Commands::Delete {
            path,
            file,
            indices,
        } => run_delete(&args, path, file.as_ref(), indices.as_deref()),
        Commands::Remove { paths, file } => run_remove(&args, paths, file.as_ref()),
        Commands::Concretize { path, indices } => run_concretize(&args, path, indices.as_deref()),
        Commands::Templatize { path } => write_output(&args, &templatize(path)),
        Commands::Submit { file } => run_submit(&args, file.as_ref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn options(args: &Args) -> ResolveOptions {
    ResolveOptions::new().with_max_index(args.max_index)
}

fn wildcard_indices(raw: Option<&str>) -> anyhow::Result<Option<Indices>> {
    raw.map(parse_indices).transpose()
}

fn run_get(
    args: &Args,
    path: &str,
    file: Option<&PathBuf>,
    raw_indices: Option<&str>,
) -> anyhow::Result<()> {
    let document = read_document(args, file)?;
    let indices = wildcard_indices(raw_indices)?;
    let Some(value) = document.value(path, indices.as_ref())? else {
        bail!("no value at '{path}'");
    };
    write_output(args, &render(value, args.compact)?)
}

fn run_set(
    args: &Args,
    path: &str,
    raw_value: &str,
    file: Option<&PathBuf>,
    raw_indices: Option<&str>,
) -> anyhow::Result<()> {
    let mut document = read_document(args, file)?;
    let indices = wildcard_indices(raw_indices)?;
    document.set_value(path, indices.as_ref(), parse_value(raw_value))?;
    write_output(args, &render(&document, args.compact)?)
}

fn run_delete(
    args: &Args,
    path: &str,
    file: Option<&PathBuf>,
    raw_indices: Option<&str>,
) -> anyhow::Result<()> {
    let mut document = read_document(args, file)?;
    let indices = wildcard_indices(raw_indices)?;
    if document.delete_value(path, indices.as_ref())?.is_none() {
        tracing::info!(path, "Nothing to delete");
    }
    write_output(args, &render(&document, args.compact)?)
}

fn run_remove(args: &Args, paths: &[String], file: Option<&PathBuf>) -> anyhow::Result<()> {
    let mut document = read_document(args, file)?;
    let removed = document.remove_elements(paths)?;
    let mut update = PartialUpdate::from_document(document)?;
    update.unset.merge(removed);
    write_output(args, &render(&update, args.compact)?)
}

fn run_concretize(args: &Args, path: &str, raw_indices: Option<&str>) -> anyhow::Result<()> {
    let indices = wildcard_indices(raw_indices)?;
    write_output(args, &concretize(path, indices.as_ref())?)
}

fn run_submit(args: &Args, file: Option<&PathBuf>) -> anyhow::Result<()> {
    let input = read_input(file)?;
    let actions: Vec<FieldAction> =
        serde_json::from_str(&input).context("expected a JSON array of field actions")?;
    tracing::debug!(count = actions.len(), "Applying field actions");

    let mut submission = Submission::with_options(options(args));
    for action in actions {
        submission.apply(action)?;
    }
    let update = submission.finish()?;
    write_output(args, &render(&update, args.compact)?)
}

fn read_document(args: &Args, file: Option<&PathBuf>) -> anyhow::Result<Document> {
    let input = read_input(file)?;
    let value: serde_json::Value =
        serde_json::from_str(&input).context("input is not valid JSON")?;
    let document = Document::try_from(value).context("input is not a JSON object")?;
    Ok(document.options(options(args)))
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    if let Some(p) = path {
        fs::read_to_string(p).with_context(|| format!("cannot read {}", p.display()))
    } else {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }
}

fn write_output(args: &Args, output: &str) -> anyhow::Result<()> {
    if let Some(path) = &args.output {
        fs::write(path, format!("{output}\n"))
            .with_context(|| format!("cannot write {}", path.display()))?;
        return Ok(());
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.write_all(b"\n")?;
    Ok(())
}
