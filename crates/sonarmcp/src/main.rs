// SPDX-FileCopyrightText: 2026 Sonarmcp Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! sonarmcp - Perplexity over MCP with keyword-based mode routing.
//!
//! This is the binary entry point.

mod ask;
mod classify;
mod serve;
mod show_config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sonarmcp_config::SonarConfig;

/// sonarmcp - Perplexity over MCP with keyword-based mode routing.
#[derive(Parser, Debug)]
#[command(name = "sonarmcp", version, about, long_about = None)]
struct Cli {
    /// Load this TOML file instead of the standard config locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the perplexity_chat tool over stdio (default).
    Serve,
    /// Run one query and print the result envelope as JSON.
    Ask {
        /// The query text.
        query: String,
        /// JSON Schema requesting structured output.
        #[arg(long, value_name = "JSON")]
        schema: Option<String>,
    },
    /// Show how a query would be routed, without calling the API.
    Classify {
        /// The query text.
        query: String,
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration with secrets masked.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> SonarConfig {
    let result = match path {
        Some(path) => sonarmcp_config::load_and_validate_path(path),
        None => sonarmcp_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            sonarmcp_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::Ask { query, schema } => {
            match ask::run_ask(&config, query, schema.as_deref()).await {
                Ok(envelope) => {
                    println!("{}", ask::render_envelope(&envelope));
                    if !envelope.is_success() {
                        std::process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Classify { query, json } => {
            println!("{}", classify::run_classify(&config, &query, json));
        }
        Commands::Config => match show_config::render(&config) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
    }
}
