//! CLI binary for building and evaluating plotline pipelines.

mod description;
mod script;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::description::{load_description, Registries, ValueKind};
use crate::script::ScriptHost;

#[derive(Parser)]
#[command(name = "pline", version, about = "Compose and evaluate math-operation pipelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a pipeline description over one or more inputs
    Eval {
        /// Path to the pipeline description (JSON)
        description: PathBuf,

        /// Input values, evaluated in order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        /// Print results as a JSON array instead of one per line
        #[arg(long)]
        json: bool,
    },

    /// List the preset operations per category
    Ops,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Eval {
            description,
            input,
            json,
        } => {
            cmd_eval(&description, &input, json).await?;
        }
        Commands::Ops => {
            cmd_ops();
        }
    }

    Ok(())
}

async fn cmd_eval(path: &Path, inputs: &[String], json: bool) -> anyhow::Result<()> {
    let desc = load_description(path)
        .with_context(|| format!("failed to load description from {}", path.display()))?;
    let registries = Registries::default();

    match desc.values {
        ValueKind::Number => {
            let scripts = Arc::new(ScriptHost::new());
            let mut pipeline = desc.build_number(&registries, &scripts)?;
            let values: Vec<f64> = inputs
                .iter()
                .map(|s| s.parse::<f64>())
                .collect::<Result<_, _>>()
                .context("inputs must be numbers for a number pipeline")?;
            tracing::debug!(elements = pipeline.len(), inputs = values.len(), "evaluating");
            let results = pipeline.evaluate_series(&values).await?;
            print_results(&results, json)?;
        }
        ValueKind::Boolean => {
            let mut pipeline = desc.build_boolean(&registries)?;
            let values: Vec<bool> = inputs
                .iter()
                .map(|s| s.parse::<bool>())
                .collect::<Result<_, _>>()
                .context("inputs must be true/false for a boolean pipeline")?;
            tracing::debug!(elements = pipeline.len(), inputs = values.len(), "evaluating");
            let results = pipeline.evaluate_series(&values).await?;
            print_results(&results, json)?;
        }
    }

    Ok(())
}

fn print_results<T: std::fmt::Display + serde::Serialize>(
    results: &[Option<T>],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(results)?);
    } else {
        for result in results {
            match result {
                Some(value) => println!("{value}"),
                None => println!("null"),
            }
        }
    }
    Ok(())
}

fn cmd_ops() {
    let registries = Registries::default();
    println!("arithmetic: {}", registries.arithmetic.names().join(" "));
    println!("periodic:   {}", registries.periodic.names().join(" "));
    println!("boolean:    {}", registries.boolean.names().join(" "));
}
