//! CLI tool for link-gateway.
//!
//! Resolves short links through the configured backend and inspects route
//! guard decisions without running the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Resolve a short code (prompts for a passcode if the link is protected)
//! cargo run --bin gatewayctl -- resolve abc123
//!
//! # Resolve with a known passcode
//! cargo run --bin gatewayctl -- resolve abc123 --passcode 123456
//!
//! # Show what the route guard does with a path
//! cargo run --bin gatewayctl -- guard /links --token
//!
//! # Validate configuration
//! cargo run --bin gatewayctl -- config check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`link_gateway::config`]. `BACKEND_URL` can be
//! overridden with `--backend`.

use link_gateway::application::services::ResolverService;
use link_gateway::config::{self, mask_connection_string};
use link_gateway::domain::{GuardDecision, ResolutionOutcome, RouteGuard};
use link_gateway::infrastructure::backend::HttpLinkBackend;

use anyhow::{Context, Result};
use axum::http::HeaderMap;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Password;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for link-gateway.
#[derive(Parser)]
#[command(name = "gatewayctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a short code through the backend
    Resolve {
        /// Short code to resolve
        code: String,

        /// 6-digit passcode for protected links
        #[arg(short, long)]
        passcode: Option<String>,

        /// Backend base URL (defaults to BACKEND_URL)
        #[arg(short, long)]
        backend: Option<String>,

        /// Request timeout in seconds
        #[arg(short, long, default_value_t = 10)]
        timeout: u64,
    },

    /// Show the route guard decision for a path
    Guard {
        /// Requested path, e.g. /links
        path: String,

        /// Pretend the session cookie is present
        #[arg(short, long)]
        token: bool,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration from the environment
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            code,
            passcode,
            backend,
            timeout,
        } => handle_resolve(code, passcode, backend, timeout).await?,
        Commands::Guard { path, token } => handle_guard(&path, token),
        Commands::Config { action } => handle_config_action(action)?,
    }

    Ok(())
}

/// Resolves a code and prints the outcome.
///
/// # Flow
///
/// 1. Build a backend client from `--backend` or `BACKEND_URL`
/// 2. Resolve once
/// 3. If the link wants a passcode and stdin is a terminal, prompt and resolve once more
async fn handle_resolve(
    code: String,
    passcode: Option<String>,
    backend: Option<String>,
    timeout: u64,
) -> Result<()> {
    let backend_url = match backend {
        Some(url) => url,
        None => std::env::var("BACKEND_URL").context("BACKEND_URL must be set or --backend given")?,
    };

    let backend = HttpLinkBackend::new(&backend_url, Duration::from_secs(timeout))
        .context("Failed to create backend client")?;
    let resolver = ResolverService::new(Arc::new(backend));

    println!(
        "{} {} via {}",
        "Resolving".bright_blue().bold(),
        code.cyan(),
        mask_connection_string(&backend_url).bright_black()
    );
    println!();

    let mut outcome = resolver
        .resolve(&code, passcode.as_deref(), HeaderMap::new())
        .await;

    if matches!(outcome, ResolutionOutcome::PasscodeEntry { .. }) && std::io::stdin().is_terminal()
    {
        println!("{}", "This link is passcode protected.".yellow());
        let entered: String = Password::new().with_prompt("Passcode").interact()?;

        outcome = resolver
            .resolve(&code, Some(&entered), HeaderMap::new())
            .await;
    }

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::Destination { location, status } => {
            println!("  Outcome:  {}", "destination".green().bold());
            println!("  Status:   {}", status.as_u16().to_string().bright_white());
            println!("  Location: {}", location.bright_white());
        }
        ResolutionOutcome::PasscodeEntry { .. } => {
            println!("  Outcome:  {}", "passcode required".yellow().bold());
            println!("  Target:   {}", outcome.target().bright_white());
        }
        ResolutionOutcome::Error { kind, message, .. } => {
            println!("  Outcome:  {}", kind.as_str().red().bold());
            println!("  Meaning:  {}", kind.description());
            if let Some(message) = message {
                println!("  Message:  {}", message.bright_white());
            }
            println!("  Target:   {}", outcome.target().bright_black());
        }
    }
    println!();
}

/// Prints the route guard decision using configured paths when available.
fn handle_guard(path: &str, has_token: bool) {
    let guard = config::load_from_env()
        .map(|c| c.route_guard())
        .unwrap_or_default();

    let decision = match guard.decide(path, has_token) {
        GuardDecision::Pass => "pass".green().bold().to_string(),
        GuardDecision::RedirectToLogin { target } => {
            format!("{} {}", "redirect".yellow().bold(), target)
        }
        GuardDecision::RedirectToDashboard => {
            format!("{} /main", "redirect".yellow().bold())
        }
    };

    print_guard(&guard, path, has_token, &decision);
}

fn print_guard(guard: &RouteGuard, path: &str, has_token: bool, decision: &str) {
    println!("{}", "Route guard".bright_blue().bold());
    println!();
    println!("  Protected: {}", guard.protected_prefixes().join(", ").bright_black());
    println!("  Auth only: {}", guard.auth_paths().join(", ").bright_black());
    println!();
    println!("  Path:      {}", path.cyan());
    println!("  Token:     {}", if has_token { "present" } else { "absent" });
    println!("  Decision:  {}", decision);
    println!();
}

/// Handles configuration commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            println!("{}", "Checking configuration...".bright_blue());

            let config = config::load_from_env()?;

            println!("{}", "Configuration OK".green().bold());
            println!();
            println!("  Listen:    {}", config.listen_addr.bright_white());
            println!(
                "  Backend:   {}",
                mask_connection_string(&config.backend_url).bright_white()
            );
            println!("  Timeout:   {}s", config.upstream_timeout_secs);
            println!("  Cookie:    {}", config.session_cookie);
            println!("  Protected: {}", config.protected_prefixes.join(", "));
            println!("  Auth only: {}", config.auth_paths.join(", "));
            println!();
        }
    }

    Ok(())
}
