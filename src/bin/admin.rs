//! CLI administration tool for blog-api.
//!
//! Provides commands for managing users, issuing tokens, viewing statistics,
//! and performing database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (password is prompted)
//! cargo run --bin admin -- user create --name alice --email alice@example.com
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Delete a user and their posts
//! cargo run --bin admin -- user delete alice@example.com
//!
//! # Issue a token for a user
//! cargo run --bin admin -- token issue 1
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
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection
//! - `API_SECRET`: required by `token issue`
//! - `TOKEN_TTL_SECONDS`, `BCRYPT_COST`: same meaning as for the server

use blog_api::api::dto::user::UserRequest;
use blog_api::application::services::{AuthService, PostService, UserService};
use blog_api::config::{Config, env_or};
use blog_api::domain::entities::User;
use blog_api::domain::repositories::UserRepository;
use blog_api::infrastructure::persistence::{PgPostRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing blog-api.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Issue login tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name (prompted if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Email address (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// List users
    List {
        /// Maximum number of rows
        #[arg(
            short,
            long,
            default_value_t = 100,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        limit: u32,
    },

    /// Delete a user and all of their posts
    Delete {
        /// User ID or email
        id_or_email: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Print a signed token for a user
    Issue {
        /// User ID or email
        id_or_email: String,
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

    let database_url = Config::load_database_url()?;

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

/// Resolves a numeric ID or an email address to a user.
async fn find_user(repo: &PgUserRepository, id_or_email: &str) -> Result<User> {
    let user = match id_or_email.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_email(&id_or_email.trim().to_lowercase())
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    user.context("User not found")
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        UserAction::Create { name, email } => create_user(repo, name, email).await?,
        UserAction::List { limit } => list_users(repo, limit).await?,
        UserAction::Delete { id_or_email, yes } => delete_user(repo, id_or_email, yes).await?,
    }

    Ok(())
}

/// Creates a user with interactive prompts.
///
/// Input goes through the same validation as `POST /users`.
async fn create_user(
    repo: Arc<PgUserRepository>,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;

    let request = UserRequest {
        name: name.trim().to_string(),
        email: email.trim().to_lowercase(),
        password,
    };

    if let Err(errors) = request.validate() {
        println!("{}", "❌ Invalid input:".red().bold());
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                println!("  {}: {}", field.to_string().cyan(), message);
            }
        }
        anyhow::bail!("Validation failed");
    }

    let service = UserService::new(repo, env_or("BCRYPT_COST", bcrypt::DEFAULT_COST));
    let user = service
        .create_user(request.name, request.email, request.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!("{}", "✅ User created successfully!".green().bold());
    println!("  ID:    {}", user.id.to_string().bright_white().bold());
    println!("  Name:  {}", user.name.cyan());
    println!("  Email: {}", user.email.cyan());
    println!();

    Ok(())
}

/// Lists users ordered by ID.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID    Name                      Email                          Created
///   ──────────────────────────────────────────────────────────────────────────────
///   1     alice                     alice@example.com              2024-01-15 10:30
/// ```
async fn list_users(repo: Arc<PgUserRepository>, limit: u32) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list(0, i64::from(limit))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<25} {:<30} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Shown: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user after confirmation. Their posts are removed by cascade.
async fn delete_user(
    repo: Arc<PgUserRepository>,
    id_or_email: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = find_user(&repo, &id_or_email).await?;

    println!("  User:  {}", user.name.cyan());
    println!("  Email: {}", user.email.cyan());
    println!("  ID:    {}", user.id.to_string().bright_black());
    println!();
    println!(
        "{}",
        "⚠️  All posts written by this user will be deleted too."
            .yellow()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(user.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    if deleted {
        println!("{}", "✅ User deleted successfully!".green().bold());
    } else {
        println!("{}", "⚠️  User was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Dispatches token commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Issue { id_or_email } => issue_token(repo, id_or_email).await?,
    }

    Ok(())
}

/// Prints a token for an existing user, signed with `API_SECRET`.
async fn issue_token(repo: Arc<PgUserRepository>, id_or_email: String) -> Result<()> {
    println!("{}", "🔑 Issue Token".bright_blue().bold());
    println!();

    let secret = std::env::var("API_SECRET").context("API_SECRET must be set")?;
    if secret.is_empty() {
        anyhow::bail!("API_SECRET must not be empty");
    }
    let ttl: i64 = env_or("TOKEN_TTL_SECONDS", 3600);

    let user = find_user(&repo, &id_or_email).await?;

    let auth = AuthService::new(repo, &secret, ttl);
    let token = auth
        .issue_token(user.id)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("  User:    {}", user.name.cyan());
    println!("  Expires: in {}s", ttl.to_string().bright_white());
    println!("  Token:   {}", token.bright_yellow().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -X DELETE -H \"Authorization: Bearer {}\" http://localhost:8080/users/{}",
        token.bright_yellow(),
        user.id
    );
    println!();

    Ok(())
}

/// Displays user and post counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let pool = Arc::new(pool.clone());
    let users = UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        bcrypt::DEFAULT_COST,
    );
    let posts = PostService::new(Arc::new(PgPostRepository::new(pool)));

    let users_count = users
        .count_users()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count users: {}", e))?;
    let posts_count = posts
        .count_posts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count posts: {}", e))?;

    println!(
        "  Users: {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Posts: {}",
        posts_count.to_string().bright_green().bold()
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

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("admin").chain(args.iter().copied()))
    }

    #[test]
    fn test_user_list_limit() {
        match parse(&["user", "list", "--limit", "5"]).unwrap().command {
            Commands::User {
                action: UserAction::List { limit },
            } => assert_eq!(limit, 5),
            _ => panic!("expected user list"),
        }

        match parse(&["user", "list"]).unwrap().command {
            Commands::User {
                action: UserAction::List { limit },
            } => assert_eq!(limit, 100),
            _ => panic!("expected user list"),
        }
    }

    #[test]
    fn test_user_list_rejects_non_positive_limit() {
        assert!(parse(&["user", "list", "--limit", "-5"]).is_err());
        assert!(parse(&["user", "list", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_token_issue_takes_id_or_email() {
        match parse(&["token", "issue", "alice@example.com"]).unwrap().command {
            Commands::Token {
                action: TokenAction::Issue { id_or_email },
            } => assert_eq!(id_or_email, "alice@example.com"),
            _ => panic!("expected token issue"),
        }
    }
}
