//! CLI administration tool for lms-catalog.
//!
//! Manages users and API tokens, shows catalog statistics and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a user
//! cargo run --bin lms-admin -- user create --email ada@example.com --name "Ada Lovelace"
//!
//! # Issue a token acting as that user
//! cargo run --bin lms-admin -- token create --name ada-laptop --user ada@example.com
//!
//! # List and revoke tokens
//! cargo run --bin lms-admin -- token list
//! cargo run --bin lms-admin -- token revoke ada-laptop
//!
//! # Catalog statistics and connectivity
//! cargo run --bin lms-admin -- stats
//! cargo run --bin lms-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's

use lms_catalog::application::services::AuthService;
use lms_catalog::domain::entities::{NewUser, User};
use lms_catalog::domain::repositories::{TokenRepository, UserRepository};
use lms_catalog::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing lms-catalog.
#[derive(Parser)]
#[command(name = "lms-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show catalog statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        /// Email address (unique)
        #[arg(short, long)]
        email: Option<String>,

        /// Full name shown as instructor or student name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token for a user
    Create {
        /// Token name (e.g., "ada-laptop", "grading-bot")
        #[arg(short, long)]
        name: Option<String>,

        /// User the token acts as, by ID or email
        #[arg(short, long)]
        user: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create { email, name } => create_user(&repo, email, name).await,
        UserAction::List => list_users(&repo).await,
    }
}

async fn create_user(
    repo: &PgUserRepository,
    email: Option<String>,
    name: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let full_name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let user = repo
        .create(NewUser {
            email: email.trim().to_lowercase(),
            full_name: full_name.trim().to_string(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!(
        "{} {} (id {})",
        "✅ Created".green().bold(),
        user.full_name.cyan(),
        user.id.to_string().bright_white()
    );
    println!();

    Ok(())
}

async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<32} {:<30}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<32} {:<30}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            user.full_name
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let repo = Arc::new(PgTokenRepository::new(pool.clone()));

    match action {
        TokenAction::Create { name, user, yes } => {
            let users = PgUserRepository::new(pool);
            create_token(repo, &users, name, &user, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Resolves a user by numeric ID or by email.
async fn find_user(users: &PgUserRepository, id_or_email: &str) -> Result<User> {
    let user = match id_or_email.parse::<i64>() {
        Ok(id) => users.find_by_id(id).await,
        Err(_) => users.find_by_email(&id_or_email.trim().to_lowercase()).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    user.with_context(|| format!("User '{id_or_email}' not found"))
}

/// Creates a new API token acting as `user`.
///
/// Only the HMAC-SHA256 hash is stored; the raw token is displayed once.
async fn create_token(
    repo: Arc<PgTokenRepository>,
    users: &PgUserRepository,
    name: Option<String>,
    user: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let signing_secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to create tokens")?;
    anyhow::ensure!(
        !signing_secret.is_empty(),
        "TOKEN_SIGNING_SECRET must not be empty"
    );

    let owner = find_user(users, user).await?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text(format!("{}-token", owner.email))
            .interact_text()?,
    };

    println!("{}", "Token details:".bright_white().bold());
    println!("  Name: {}", token_name.cyan());
    println!(
        "  Acts as: {} <{}>",
        owner.full_name.cyan(),
        owner.email.bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let auth = AuthService::new(repo, signing_secret);
    let (_, token_value) = auth
        .issue_token(&token_name, owner.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" -d '{{\"course\": 1}}' \\\n    -H 'Content-Type: application/json' http://localhost:3000/api/enrollments",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} lms-admin -- token create --user <id>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<6} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "User".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<30} {:<6} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token.user_id,
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID after confirmation.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await,
        Err(_) => repo.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays catalog counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = |sql: &'static str| async move {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(pool)
            .await
            .with_context(|| format!("Query failed: {sql}"))
    };

    let users = count("SELECT COUNT(*) FROM users").await?;
    let categories = count("SELECT COUNT(*) FROM categories").await?;
    let courses = count("SELECT COUNT(*) FROM courses").await?;
    let published = count("SELECT COUNT(*) FROM courses WHERE is_published").await?;
    let enrollments = count("SELECT COUNT(*) FROM enrollments").await?;
    let completed = count("SELECT COUNT(*) FROM enrollments WHERE completed").await?;
    let tokens = count("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL").await?;

    println!("  Users:         {}", users.to_string().bright_green().bold());
    println!(
        "  Categories:    {}",
        categories.to_string().bright_green().bold()
    );
    println!(
        "  Courses:       {} ({} published)",
        courses.to_string().bright_green().bold(),
        published
    );
    println!(
        "  Enrollments:   {} ({} completed)",
        enrollments.to_string().bright_green().bold(),
        completed
    );
    println!(
        "  Active tokens: {}",
        tokens.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
