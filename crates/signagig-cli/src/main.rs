mod creators;
mod offers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "signagig-cli")]
#[command(about = "SignaGig command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// List the most recent offers, optionally filtered
    Offers {
        /// Case-insensitive search over product name and category
        #[arg(long)]
        query: Option<String>,
        /// Exact category, or "all"
        #[arg(long)]
        category: Option<String>,
        /// Exact affiliate platform, or "all"
        #[arg(long)]
        platform: Option<String>,
        /// Number of recent offers to consider, capped at the configured fetch limit
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        limit: Option<i64>,
    },
    /// Show a creator's normalized profile
    Profile {
        #[arg(long)]
        user_id: String,
    },
    /// Show offers matched to a creator's niche
    Matches {
        #[arg(long)]
        user_id: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert offers from the YAML catalog
    Seed {
        /// Catalog file (defaults to SIGNAGIG_OFFERS_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("signagig-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = signagig_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = signagig_db::PoolConfig::from_app_config(&config);
    let pool = signagig_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => {
                signagig_db::health_check(&pool).await?;
                println!("database ok");
            }
            DbCommands::Migrate => {
                let applied = signagig_db::run_migrations(&pool).await?;
                println!("applied {applied} migration(s)");
            }
            DbCommands::Seed { path } => {
                let path = path.unwrap_or_else(|| config.offers_path.clone());
                let catalog = signagig_core::load_offer_catalog(&path)?;
                let count = signagig_db::seed_offers(&pool, &catalog.offers).await?;
                tracing::info!(count, path = %path.display(), "offer catalog seeded");
                println!("seeded {count} offer(s) from {}", path.display());
            }
        },
        Commands::Offers {
            query,
            category,
            platform,
            limit,
        } => {
            let filters = signagig_core::OfferFilters {
                query: query.unwrap_or_default(),
                category: signagig_core::Selection::from_param(category.as_deref()),
                platform: signagig_core::Selection::from_param(platform.as_deref()),
            };
            let limit = offers::effective_limit(limit, config.offer_fetch_limit);
            offers::run_offers_list(&pool, &filters, limit).await?;
        }
        Commands::Profile { user_id } => {
            creators::run_profile(&pool, &user_id).await?;
        }
        Commands::Matches { user_id } => {
            creators::run_matches(&pool, &user_id, config.offer_fetch_limit).await?;
        }
    }

    Ok(())
}
