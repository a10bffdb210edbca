//! CLI administration tool for alias-shortener.
//!
//! Manages records and the database directly, without going through the
//! HTTP API or its basic auth.
//!
//! # Usage
//!
//! ```bash
//! # Store a URL under a generated or chosen alias
//! cargo run --bin admin -- url add https://example.com --alias ex
//!
//! # Show where an alias points
//! cargo run --bin admin -- url show ex
//!
//! # Find the oldest record for a URL
//! cargo run --bin admin -- url find https://example.com
//!
//! # Delete an alias
//! cargo run --bin admin -- url delete ex
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db init
//! cargo run --bin admin -- --env local db truncate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `ALIAS_LENGTH` (optional): length of generated aliases

use alias_shortener::application::services::ResolutionService;
use alias_shortener::config::{Config, mask_connection_string};
use alias_shortener::domain::errors::StorageError;
use alias_shortener::domain::repositories::UrlRepository;
use alias_shortener::infrastructure::persistence::PgUrlRepository;
use alias_shortener::utils::alias_generator::{AliasGenerator, DEFAULT_ALIAS_LENGTH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing alias-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load `.env.<ENV>` instead of `.env`
    #[arg(long, global = true, value_name = "ENV")]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage stored URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Record management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Store a URL
    Add {
        /// Absolute URL to store
        url: String,

        /// Alias to use (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Show the URL stored under an alias
    Show { alias: String },

    /// Show the id of the oldest record storing a URL
    Find { url: String },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the `url` table and alias index if missing
    Init,

    /// Remove every record (development databases only)
    Truncate {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.env.as_deref() {
        Some(name) => {
            dotenvy::from_filename(format!(".env.{name}"))
                .with_context(|| format!("Failed to load .env.{name}"))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let database_url = Config::load_database_url()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    let repo = Arc::new(PgUrlRepository::new(pool));

    match cli.command {
        Commands::Url { action } => handle_url_action(action, repo).await?,
        Commands::Db { action } => handle_db_action(action, repo).await?,
    }

    Ok(())
}

/// Dispatches record management commands.
async fn handle_url_action(action: UrlAction, repo: Arc<PgUrlRepository>) -> Result<()> {
    let alias_length = std::env::var("ALIAS_LENGTH")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_ALIAS_LENGTH);

    let storage: Arc<dyn UrlRepository> = repo;
    let service = ResolutionService::new(storage.clone())
        .with_generator(AliasGenerator::new(alias_length));

    match action {
        UrlAction::Add { url, alias } => {
            let saved = service
                .save(&url, alias.as_deref())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add URL: {}", e))?;

            println!("{}", "✅ URL stored".green().bold());
            println!("  Alias: {}", saved.alias.cyan());
            println!("  ID:    {}", saved.id.to_string().bright_black());
        }
        UrlAction::Show { alias } => {
            let target_url = service
                .redirect(&alias)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to resolve '{}': {}", alias, e))?;

            println!("  {} → {}", alias.cyan(), target_url.bright_white());
        }
        UrlAction::Find { url } => match storage.get_id_by_url(&url).await {
            Ok(id) => println!("  {} → id {}", url.bright_white(), id.to_string().cyan()),
            Err(StorageError::NotFound) => {
                println!("{}", "⚠️  No record stores this URL".yellow())
            }
            Err(e) => anyhow::bail!("Database error: {}", e),
        },
        UrlAction::Delete { alias, yes } => {
            if !yes && !confirm(&format!("Delete alias '{alias}'?"))? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            let deleted = service
                .delete(&alias)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete '{}': {}", alias, e))?;

            println!(
                "{} {} (id {})",
                "✅ Deleted".green().bold(),
                deleted.alias.cyan(),
                deleted.id
            );
        }
    }

    Ok(())
}

/// Handles database diagnostic and maintenance commands.
async fn handle_db_action(action: DbAction, repo: Arc<PgUrlRepository>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(repo.pool())
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Init => {
            repo.bootstrap()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to initialize schema: {}", e))?;

            println!("{}", "✅ Schema ready".green().bold());
        }
        DbAction::Truncate { yes } => {
            println!(
                "{}",
                "⚠️  This removes every stored alias and cannot be undone".yellow()
            );

            if !yes && !confirm("Truncate the url table?")? {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            repo.truncate()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to truncate: {}", e))?;

            println!("{}", "✅ Table truncated".green().bold());
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
