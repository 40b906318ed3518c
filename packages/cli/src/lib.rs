//! Command-line resolver for fileserve mounts.
//!
//! Loads an environment and a mount configuration, then resolves one request
//! key with `find` or `search` and prints the locations.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fileserve_core::{FileRequest, StaticEnvironment};
use fileserve_mount::Configuration;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Fileserve(#[from] fileserve_core::Error),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// fileserve - resolve file server request keys against an environment
#[derive(Parser, Debug)]
#[command(name = "fileserve")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Environment JSON file (modules and their content tables)
    #[arg(long, short = 'e')]
    pub environment: PathBuf,

    /// Mount configuration JSON file; the default mounts are used without it
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Name of the requesting node, for per-node file mounts
    #[arg(long)]
    pub node: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Resolve a key to a single location
    Find { key: String },
    /// Resolve a key to every matching location
    Search { key: String },
}

impl Command {
    pub fn key(&self) -> &str {
        match self {
            Command::Find { key } | Command::Search { key } => key,
        }
    }
}

/// How a resolution ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NotFound,
}

/// Resolve the key named by `args`, writing results to `out`.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<Outcome, CliError> {
    let environment = StaticEnvironment::load(&args.environment)?;
    let configuration = match &args.config {
        Some(path) => Configuration::load(path)?,
        None => Configuration::with_default_mounts(),
    };

    let mut request = FileRequest::new(Arc::new(environment));
    if let Some(node) = &args.node {
        request = request.with_node(node.clone());
    }

    tracing::debug!(?request, command = ?args.command, "Resolving");

    match &args.command {
        Command::Find { key } => match configuration.find(key, &request)? {
            Some(location) => {
                if args.json {
                    writeln!(out, "{}", serde_json::to_string(&location)?)?;
                } else {
                    writeln!(out, "{}", location.display())?;
                }
                Ok(Outcome::Found)
            }
            None => Ok(Outcome::NotFound),
        },
        Command::Search { key } => match configuration.search(key, &request)? {
            Some(locations) => {
                if args.json {
                    writeln!(out, "{}", serde_json::to_string(&locations)?)?;
                } else {
                    for location in &locations {
                        writeln!(out, "{}", location.display())?;
                    }
                }
                Ok(Outcome::Found)
            }
            None => Ok(Outcome::NotFound),
        },
    }
}
