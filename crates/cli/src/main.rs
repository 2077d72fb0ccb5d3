//! Order seeder CLI - create synthetic orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create 12 orders in batches of 5, 10 seconds apart
//! seed-cli orders generate --count 12
//!
//! # Smaller batches, shorter pause, report written to a file
//! seed-cli orders generate --count 40 --batch-size 4 --delay-ms 2000 --output report.json
//!
//! # Print the orders that would be sent, without creating anything
//! seed-cli orders preview --count 3 --seed 42
//! ```
//!
//! # Commands
//!
//! - `orders generate` - Create synthetic orders in paced batches
//! - `orders preview` - Dry run: synthesize orders and print them
//!
//! Configuration is read from the environment (and `.env`); see
//! `order_seeder_admin::config`. Ctrl+C cancels a running generation; the
//! report still lists every requested order.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "seed-cli")]
#[command(author, version, about = "Synthetic Shopify order seeder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or preview synthetic orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Create synthetic orders in paced batches
    Generate {
        /// Number of orders to create
        #[arg(short, long)]
        count: i64,

        /// Orders per batch (default: `ORDER_SEED_BATCH_SIZE`)
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Pause between batches in milliseconds (default: `ORDER_SEED_BATCH_DELAY_MS`)
        #[arg(short, long)]
        delay_ms: Option<u64>,

        /// Seed for reproducible order synthesis
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the JSON report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Synthesize orders and print them without sending anything
    Preview {
        /// Number of orders to synthesize
        #[arg(short, long, default_value_t = 1)]
        count: i64,

        /// Seed for reproducible order synthesis
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing (stderr, so stdout stays clean for JSON output)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_seeder_admin=info,seed_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::Generate {
                count,
                batch_size,
                delay_ms,
                seed,
                output,
            } => {
                let options = commands::orders::GenerateOptions {
                    count,
                    batch_size,
                    delay_ms,
                    seed,
                };
                commands::orders::generate(options, output.as_deref()).await?;
            }
            OrdersAction::Preview { count, seed } => {
                commands::orders::preview(count, seed).await?;
            }
        },
    }
    Ok(())
}
