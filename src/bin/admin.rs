//! CLI administration tool for ephemeral-links.
//!
//! Inspects and expires links, shows store totals, and checks the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show a link with its effective status
//! cargo run --bin admin -- link show aZ3_k9Q
//!
//! # Expire a link (asks for confirmation unless --yes is given)
//! cargo run --bin admin -- link expire aZ3_k9Q
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use ephemeral_links::config::Config;
use ephemeral_links::domain::entities::ShortLink;
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ephemeral-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or expire short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its effective status
    Show {
        /// Short code
        code: String,
    },

    /// Expire a link before its expiry time
    Expire {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show server version
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinkAction::Show { code } => show_link(&repo, &code).await?,
        LinkAction::Expire { code, yes } => expire_link(&repo, &code, yes).await?,
    }

    Ok(())
}

/// Prints a link record.
///
/// # Output Format
///
/// ```text
/// 🔗 Link aZ3_k9Q
///
///   URL:      https://example.com
///   Clicks:   3
///   Created:  2026-01-01 12:00:00 UTC
///   Expires:  2026-01-01 12:30:00 UTC
///   Status:   ACTIVE
/// ```
async fn show_link(repo: &PgLinkRepository, code: &str) -> Result<()> {
    let link = find_link(repo, code).await?;

    println!("{}", format!("🔗 Link {}", link.short_code).bright_blue().bold());
    println!();
    print_link(&link);
    println!();

    Ok(())
}

/// Expires a link after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Already inactive links are reported and left alone
async fn expire_link(repo: &PgLinkRepository, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "⏹️  Expire Link".bright_blue().bold());
    println!();

    let link = find_link(repo, code).await?;

    if !link.is_active {
        println!("{}", "⚠️  This link is already expired".yellow());
        return Ok(());
    }

    print_link(&link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Expire this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.deactivate(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to expire link: {}", e))?;

    println!();
    println!("{}", "✅ Link expired successfully!".green().bold());
    println!();

    Ok(())
}

async fn find_link(repo: &PgLinkRepository, code: &str) -> Result<ShortLink> {
    repo.find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Link '{}' not found", code))
}

fn print_link(link: &ShortLink) {
    let status = if !link.is_active {
        "EXPIRED (manual)".red()
    } else if link.is_usable() {
        "ACTIVE".green()
    } else {
        "EXPIRED".red()
    };

    println!("  URL:      {}", link.original_url.cyan());
    println!(
        "  Clicks:   {}",
        link.clicks.to_string().bright_white().bold()
    );
    println!(
        "  Created:  {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Expires:  {}",
        link.expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Status:   {}", status);
}

/// Displays store-wide statistics.
///
/// Shows:
/// - Total number of links
/// - Number of links that still redirect
/// - Total number of clicks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let summary = repo
        .summary(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:         {}",
        summary.total.to_string().bright_green().bold()
    );
    println!(
        "  Active links:  {}",
        summary.usable.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        summary.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgLinkRepository::new(Arc::new(pool.clone()));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
