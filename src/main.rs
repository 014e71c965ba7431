// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use dotenv::dotenv;

use vendoora_mcp::config::AppConfig;
use vendoora_mcp::core::metrics::MetricsSink;
use vendoora_mcp::core::router::ToolRouter;
use vendoora_mcp::server;
use vendoora_mcp::tools::{build_registry, Toolset};

use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve a toolset over stdio
    Serve {
        /// Which tool family to expose
        #[arg(short, long, value_enum, default_value = "all")]
        toolset: Toolset,
    },
    /// Print the advertised tools as JSON and exit
    Tools {
        /// Which tool family to list
        #[arg(short, long, value_enum, default_value = "all")]
        toolset: Toolset,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::from_env();

    match args.command {
        Commands::Serve { toolset } => {
            let (registry, model_available) = build_registry(toolset, &config)?;
            log::info!(
                "Serving {} tools (model configured: {})",
                registry.len(),
                model_available
            );
            let router = Arc::new(ToolRouter::new(
                registry,
                Arc::new(MetricsSink::new()),
                model_available,
            ));
            server::serve_stdio(router).await?;
        }
        Commands::Tools { toolset } => {
            let (registry, _) = build_registry(toolset, &config)?;
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        }
    }

    Ok(())
}
