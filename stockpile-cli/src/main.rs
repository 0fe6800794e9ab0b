use std::io;
use std::path::PathBuf;

use clap::Parser;
use stockpile_catalog::Inventory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod menu;

/// Interactive inventory tracker.
#[derive(Parser)]
#[command(name = "stockpile", version, about)]
struct Cli {
    /// Inventory snapshot to load before entering the menu
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockpile_cli=info,stockpile_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut inventory = Inventory::new();

    if let Some(path) = &cli.load {
        match inventory.load_from_file(path) {
            Ok(count) => {
                tracing::info!(count, path = %path.display(), "seeded inventory from snapshot")
            }
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "seed failed, starting empty")
            }
        }
    }

    let stdin = io::stdin();
    menu::run(&mut inventory, &mut stdin.lock())
}
