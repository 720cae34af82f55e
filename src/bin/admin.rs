//! CLI administration tool for goodlink.
//!
//! Runs the validators, resolves slugs against the database and signs
//! webhook payloads without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Run a validator
//! cargo run --bin admin -- validate domain links.example.com
//! cargo run --bin admin -- validate url example.com/landing
//! cargo run --bin admin -- validate slug Spring-Sale
//!
//! # Show where a slug redirects
//! cargo run --bin admin -- resolve promo1 --domain glynk.to --query "ref=abc"
//!
//! # Sign a payload for webhook testing
//! cargo run --bin admin -- webhook sign --file payload.json
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (`resolve` and `db` only)
//! - `LEMON_SQUEEZY_WEBHOOK_SECRET`: default secret for `webhook sign`

use goodlink::application::services::RedirectService;
use goodlink::application::services::redirect_service::build_target_url;
use goodlink::application::services::webhook_service::sign_payload;
use goodlink::infrastructure::persistence::PgLinkRepository;
use goodlink::validation::{DomainOptions, validate_domain, validate_slug_format, validate_url};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for goodlink.
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
    /// Run a validator on a value
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },

    /// Show the redirect target for a slug
    Resolve {
        /// Slug to resolve
        slug: String,

        /// Domain the slug is served on
        #[arg(short, long)]
        domain: String,

        /// Inbound query string to apply (without the leading `?`)
        #[arg(short, long)]
        query: Option<String>,

        /// Fall back to the slug on any domain when the exact lookup misses
        #[arg(long)]
        loose: bool,
    },

    /// Webhook helpers
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum ValidateTarget {
    /// Validate a custom domain
    Domain {
        domain: String,

        #[arg(long)]
        allow_localhost: bool,

        #[arg(long)]
        allow_ip: bool,

        #[arg(long)]
        allow_punycode: bool,

        /// Reject subdomains of a registrable domain
        #[arg(long)]
        no_subdomains: bool,
    },

    /// Validate a destination URL
    Url { url: String },

    /// Validate slug format (no availability or moderation check)
    Slug { slug: String },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Print the X-Signature value for a payload
    Sign {
        /// Signing secret; defaults to LEMON_SQUEEZY_WEBHOOK_SECRET
        #[arg(short, long)]
        secret: Option<String>,

        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        /// Payload given inline
        payload: Option<String>,
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

    match cli.command {
        Commands::Validate { target } => handle_validate(target),
        Commands::Resolve {
            slug,
            domain,
            query,
            loose,
        } => handle_resolve(&slug, &domain, query.as_deref(), loose).await,
        Commands::Webhook { action } => handle_webhook(action),
        Commands::Db { action } => handle_db_action(action).await,
    }
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn report(kind: &str, result: Result<String, String>) {
    match result {
        Ok(value) => {
            println!("{} {} is valid", "✅".green(), kind);
            println!("  Result: {}", value.bright_white().bold());
        }
        Err(error) => {
            println!("{} {} is invalid", "❌".red(), kind);
            println!("  Reason: {}", error.yellow());
        }
    }
}

fn handle_validate(target: ValidateTarget) -> Result<()> {
    match target {
        ValidateTarget::Domain {
            domain,
            allow_localhost,
            allow_ip,
            allow_punycode,
            no_subdomains,
        } => {
            let options = DomainOptions {
                allow_localhost,
                allow_ip,
                allow_punycode,
                allow_subdomains: !no_subdomains,
                ..DomainOptions::default()
            };
            report(
                "Domain",
                validate_domain(&domain, &options).map_err(|e| e.to_string()),
            );
        }
        ValidateTarget::Url { url } => {
            report("URL", validate_url(&url).map_err(|e| e.to_string()));
        }
        ValidateTarget::Slug { slug } => {
            report("Slug", validate_slug_format(&slug).map_err(|e| e.to_string()));
        }
    }

    Ok(())
}

/// Looks up a slug the same way the redirect handler does and prints the
/// resulting `Location`.
async fn handle_resolve(slug: &str, domain: &str, query: Option<&str>, loose: bool) -> Result<()> {
    println!("{}", "🔗 Resolve slug".bright_blue().bold());
    println!();

    let pool = connect().await?;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = RedirectService::new(repo, loose);

    let slug = slug.trim().to_ascii_lowercase();
    let domain = goodlink::utils::extract_domain::normalize_host(domain)
        .context("Domain must not be empty")?;

    let link = service
        .resolve(&slug, &domain)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?;

    let Some(link) = link else {
        println!("{}", "  Link not found".yellow());
        return Ok(());
    };

    let location =
        build_target_url(&link, query).map_err(|e| anyhow::anyhow!("Bad target: {}", e))?;

    println!("  Slug:     {}", link.slug.cyan());
    println!("  Domain:   {}", link.domain.cyan());
    if link.domain != domain {
        println!("  {}", "⚠️  Matched on a different domain".yellow());
    }
    println!("  Target:   {}", link.target_url.bright_black());
    println!("  Location: {}", location.bright_white().bold());
    println!();

    Ok(())
}

fn handle_webhook(action: WebhookAction) -> Result<()> {
    match action {
        WebhookAction::Sign {
            secret,
            file,
            payload,
        } => {
            let secret = match secret {
                Some(s) => s,
                None => std::env::var("LEMON_SQUEEZY_WEBHOOK_SECRET")
                    .context("Pass --secret or set LEMON_SQUEEZY_WEBHOOK_SECRET")?,
            };

            let body = match (file, payload) {
                (Some(path), _) => std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(inline)) => inline.into_bytes(),
                (None, None) => anyhow::bail!("Provide a payload or --file"),
            };

            println!("{}", sign_payload(&secret, &body));
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    let pool = connect().await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(&pool)
                .await?;

            let clicks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Clicks:     {}", clicks.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
