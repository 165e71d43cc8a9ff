// ABOUTME: Command-line runner for the coded tools: lists them or invokes one
// ABOUTME: with JSON arguments and scratch, printing the result and final scratch.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coded_tools::prelude::*;

/// Run coded tools outside an agent runtime.
#[derive(Parser, Debug)]
#[command(name = "tool-runner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "CODED_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available tools
    List {
        /// Print full definitions including argument schemas
        #[arg(long)]
        schema: bool,
    },

    /// Invoke a tool
    Run {
        /// Tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,

        /// Initial scratch contents as a JSON object
        #[arg(short, long)]
        scratch: Option<String>,
    },
}

fn parse_object(raw: &str, what: &str) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_str(raw).with_context(|| format!("{} is not valid JSON", what))? {
        Value::Object(map) => Ok(map),
        _ => bail!("{} must be a JSON object", what),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("coded_tools={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => ToolsConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ToolsConfig::default(),
    }
    .with_env_credentials();

    let registry = default_registry(&config).await;

    match cli.command {
        Commands::List { schema } => {
            if schema {
                println!("{}", serde_json::to_string_pretty(&registry.definitions().await)?);
            } else {
                for def in registry.definitions().await {
                    println!("{:<26} {}", def.name, def.description);
                }
            }
        }

        Commands::Run {
            tool,
            args,
            scratch,
        } => {
            let args = Value::Object(parse_object(&args, "--args")?);
            let mut scratch = match scratch {
                Some(raw) => Scratch::from_map(parse_object(&raw, "--scratch")?),
                None => Scratch::new(),
            };

            let result = registry.invoke(&tool, args, &mut scratch).await?;
            let output = serde_json::json!({
                "result": result.content,
                "is_error": result.is_error,
                "scratch": scratch.into_map(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
