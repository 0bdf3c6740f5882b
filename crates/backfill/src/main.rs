//! `foster-backfill`: operator tool for canonical slug maintenance.

use clap::{Parser, Subcommand};
use foster_directory_core::canonical::{
    backfill_canonical_slugs, recompute_subtree, verify_canonical_slugs,
};
use foster_directory_core::store::postgres::PgDirectoryStore;
use foster_directory_core::LocationType;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "foster-backfill")]
#[command(about = "Populate and check canonical slugs of the location directory")]
struct Cli {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite the canonical slug of every location, parents first
    Run {
        /// Only backfill one level (country, region/county, city)
        #[arg(long = "type")]
        location_type: Option<LocationType>,
    },
    /// Rewrite one location and everything below it
    Subtree {
        #[arg(long = "type")]
        location_type: LocationType,
        #[arg(long)]
        id: String,
    },
    /// Report stored canonical slugs that no longer match their parents
    Verify,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .compact()
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&cli.database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;
    let store = PgDirectoryStore::new(pool);

    match cli.command {
        Command::Run { location_type } => {
            let levels = match location_type {
                Some(location_type) => vec![location_type],
                None => LocationType::ALL.to_vec(),
            };
            let report = backfill_canonical_slugs(&store, &levels).await?;
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
            for failure in &report.failures {
                eprintln!(
                    "failed: {} {}: {}",
                    failure.location_type, failure.location_id, failure.error
                );
            }
        }
        Command::Subtree { location_type, id } => {
            let updates = recompute_subtree(&store, location_type, &id).await?;
            for update in &updates {
                println!(
                    "{} {} -> {}",
                    update.location_type, update.location_id, update.canonical_slug
                );
            }
            tracing::info!(rewritten = updates.len(), "Subtree recompute finished");
        }
        Command::Verify => {
            let drift = verify_canonical_slugs(&store).await?;
            for entry in &drift {
                println!(
                    "{} {} ({}): stored {:?}, expected {}",
                    entry.location_type,
                    entry.location_id,
                    entry.name,
                    entry.stored.as_deref().unwrap_or("<none>"),
                    entry.expected
                );
            }
            if drift.is_empty() {
                tracing::info!("All canonical slugs are up to date");
            } else {
                tracing::warn!(count = drift.len(), "Canonical slugs out of date; run `foster-backfill run`");
            }
        }
    }

    Ok(())
}
