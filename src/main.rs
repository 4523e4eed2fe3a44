//! Edge dispatcher.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                  EDGE DISPATCH                    │
//!   Client Request       │  ┌──────────┐   ┌───────────┐   ┌────────────┐   │
//!   ─────────────────────┼─▶│  http    │──▶│ preflight │──▶│  routing   │   │
//!                        │  │  server  │   │  handler  │   │ classifier │   │
//!                        │  └──────────┘   └─────┬─────┘   └─────┬──────┘   │
//!                        │                       │ short-circuit │          │
//!                        │                       ▼               ▼          │
//!                        │                 ┌──────────┐   ┌────────────┐   │
//!                        │                 │  policy  │◀──│ redirect / │   │
//!   Client Response      │                 │ applier  │   │ proxy / api│   │
//!   ◀────────────────────┼─────────────────┤          │   │ / fallback │   │
//!                        │                 └──────────┘   └────────────┘   │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use edge_dispatch::lifecycle::startup;

#[derive(Parser)]
#[command(name = "edge-dispatch")]
#[command(about = "HTTP dispatcher for redirect, proxy and API collaborators", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = startup::resolve_config(cli.config.as_deref())?;
    startup::run(config).await
}
