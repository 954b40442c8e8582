//! CLI administration tool for short-link.
//!
//! Provides commands for inspecting links and tags and for database checks
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List the 20 oldest active links
//! cargo run --bin admin -- links list --limit 20
//!
//! # Soft-delete a link
//! cargo run --bin admin -- links delete 42
//!
//! # List tags, or show one
//! cargo run --bin admin -- tags list
//! cargo run --bin admin -- tags show news
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`DATABASE_URL` or `DB_*`, `CONFIG_FILE`, ...).

use short_link::config;
use short_link::server::connect_pool;
use short_link::state::AppState;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-link.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Manage tags
    Tags {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// List active links, oldest first
    List {
        /// Maximum rows (clamped to 1-100)
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Soft-delete a link
    Delete {
        /// Link ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// List tags, oldest first
    List {
        /// Maximum rows (clamped to 1-100)
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show one tag by name
    Show {
        /// Tag name
        name: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let state = AppState::with_pool(Arc::new(pool.clone()), config.timeout(), config.alias_length);

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &state).await?,
        Commands::Tags { action } => handle_tag_action(action, &state).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, state: &AppState) -> Result<()> {
    match action {
        LinkAction::List { limit } => list_links(state, limit).await,
        LinkAction::Delete { id, yes } => delete_link(state, id, yes).await,
    }
}

/// Prints active links.
///
/// ```text
/// Links
///
///   ID    Alias       Created            Target
///   ─────────────────────────────────────────────────────────────────
///   1     Ab3dE9xQ    2024-06-01 10:30   https://example.com
/// ```
async fn list_links(state: &AppState, limit: Option<i64>) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = state
        .link_service
        .fetch(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<12} {:<18} {}",
        "ID".bright_white().bold(),
        "Alias".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<12} {:<18} {}",
            link.id.to_string().bright_black(),
            link.alias.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Soft-deletes a link after confirmation (default: No).
async fn delete_link(state: &AppState, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete link".bright_blue().bold());
    println!();

    let link = state
        .link_service
        .get_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Alias:  {}", link.alias.cyan());
    println!("  Target: {}", link.target);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    state
        .link_service
        .delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "Link deleted".green().bold());
    Ok(())
}

async fn handle_tag_action(action: TagAction, state: &AppState) -> Result<()> {
    match action {
        TagAction::List { limit } => {
            println!("{}", "Tags".bright_blue().bold());
            println!();

            let tags = state
                .tag_service
                .fetch(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list tags: {}", e))?;

            if tags.is_empty() {
                println!("{}", "  No tags found".yellow());
                return Ok(());
            }

            for tag in &tags {
                println!(
                    "  {:<5} {}",
                    tag.id.to_string().bright_black(),
                    tag.name.cyan()
                );
            }

            println!();
            println!("  Total: {}", tags.len().to_string().bright_white().bold());
            println!();
        }
        TagAction::Show { name } => {
            let tag = state
                .tag_service
                .get_by_name(name.trim())
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "Tag".bright_blue().bold());
            println!();
            println!("  ID:      {}", tag.id.to_string().bright_white());
            println!("  Name:    {}", tag.name.cyan());
            println!(
                "  Created: {}",
                tag.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
            );
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let links: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE deleted_at IS NULL")
                    .fetch_one(pool)
                    .await?;
            let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:   {}", version.bright_white());
            println!("  Active links: {}", links.to_string().bright_green().bold());
            println!("  Tags:         {}", tags.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
