//! Lifter CLI - command-line access to the Lifter weightlifting API.
//!
//! Reads need no credentials. Writes use a refresh token taken from
//! `--token`, the `LIFTER_API_TOKEN` environment variable, or the OS
//! keychain (see `lifter login`), in that order.

use std::io;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lifter_core::auth::CredentialStore;
use lifter_core::models::{AthleteOrdering, NewAthlete};
use lifter_core::validation::validate_lifts;
use lifter_core::{Config, LifterClient};

/// Environment variable holding a refresh token
const TOKEN_ENV: &str = "LIFTER_API_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "lifter", author, version, about, long_about = None)]
struct Cli {
    /// Refresh token for write operations
    #[arg(long, global = true)]
    token: Option<String>,

    /// API base URL, overriding LIFTER_API_URL and the config file
    #[arg(long, global = true)]
    url: Option<String>,

    /// API version segment, e.g. v1
    #[arg(long = "api-version", global = true)]
    api_version: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List athletes
    Athletes {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search athletes by name
    FindAthlete {
        search: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// last_name or first_name
        #[arg(long, default_value = "last_name")]
        order_by: String,
        #[arg(long)]
        descending: bool,
    },
    /// Show one athlete with their lifts
    Athlete { id: String },
    /// Add an athlete
    AddAthlete {
        first_name: String,
        last_name: String,
        yearborn: i32,
    },
    /// List competitions
    Competitions {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one competition with its lifts
    Competition { id: String },
    /// List the sessions of a competition
    Sessions { competition: String },
    /// List the lifts of a competition
    Lifts { competition: String },
    /// Show one lift
    Lift { competition: String, id: String },
    /// Delete a lift
    DeleteLift { competition: String, id: String },
    /// Check three attempts locally, e.g. LIFT:100 NOLIFT:105 LIFT:105
    CheckLifts {
        #[arg(num_args = 3, required = true)]
        attempts: Vec<String>,
    },
    /// Store a refresh token in the OS keychain
    Login,
    /// Remove the stored refresh token
    Logout,
    /// Show where configuration is read from and which API is used
    Config {
        /// Save this base URL in the config file
        #[arg(long)]
        set_url: Option<String>,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // RUST_LOG controls the level (e.g., RUST_LOG=lifter_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Refresh token from the flag, the environment, or the keychain.
fn resolve_refresh_token(flag: Option<String>) -> Result<Option<String>> {
    if flag.is_some() {
        return Ok(flag);
    }
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.is_empty() {
            debug!("Using refresh token from {}", TOKEN_ENV);
            return Ok(Some(token));
        }
    }
    CredentialStore::refresh_token()
}

/// Split `STATUS:WEIGHT` into its parts.
fn parse_attempt(raw: &str) -> Result<(&str, u32)> {
    let (status, weight) = raw
        .split_once(':')
        .with_context(|| format!("'{}' is not STATUS:WEIGHT", raw))?;
    let weight = weight
        .parse()
        .with_context(|| format!("'{}' is not a weight in kg", weight))?;
    Ok((status, weight))
}

fn check_lifts(attempts: &[String]) -> Result<()> {
    let [first, second, third] = attempts else {
        bail!("Exactly three attempts are required");
    };
    let raw = [
        parse_attempt(first)?,
        parse_attempt(second)?,
        parse_attempt(third)?,
    ];
    let sequence = validate_lifts(raw)?;
    match sequence.best() {
        Some(best) => println!("Valid. Best lift: {} kg", best),
        None => println!("Valid. No successful lift"),
    }
    Ok(())
}

fn login() -> Result<()> {
    let token = rpassword::prompt_password("Refresh token: ")?;
    let token = token.trim();
    if token.is_empty() {
        bail!("No refresh token entered");
    }
    CredentialStore::store(token)?;
    eprintln!("Refresh token stored in the keychain.");
    Ok(())
}

/// Command-line `--url` and `--api-version` win over the environment and
/// the config file for this invocation only.
fn apply_overrides(config: &mut Config, url: Option<String>, version: Option<String>) {
    if let Some(url) = url {
        config.override_url(url);
    }
    if let Some(version) = version {
        config.version = version;
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, cli.url, cli.api_version);

    // Commands that never talk to the API
    match &cli.command {
        Commands::CheckLifts { attempts } => return check_lifts(attempts),
        Commands::Login => return login(),
        Commands::Logout => {
            CredentialStore::delete()?;
            eprintln!("Refresh token removed.");
            return Ok(());
        }
        Commands::Config { set_url } => {
            if let Some(url) = set_url {
                let mut saved = Config::load()?;
                saved.url = Some(url.clone());
                saved.save()?;
                config.url = Some(url.clone());
                eprintln!("Saved base URL {}", url);
            }
            println!("config file: {}", Config::config_path()?.display());
            println!("api url:     {}/{}", config.base_url(), config.version);
            return Ok(());
        }
        _ => {}
    }

    let refresh_token = resolve_refresh_token(cli.token)?;
    let client = LifterClient::from_config(&config, refresh_token)?;
    info!(url = client.base_url(), version = client.version(), "Using Lifter API");

    match cli.command {
        Commands::Athletes { page } => print_json(&client.athletes(page).await?),
        Commands::FindAthlete {
            search,
            page,
            order_by,
            descending,
        } => {
            let ordering: AthleteOrdering = order_by.parse()?;
            print_json(&client.find_athlete(&search, page, ordering, !descending).await?)
        }
        Commands::Athlete { id } => print_json(&client.get_athlete(&id).await?),
        Commands::AddAthlete {
            first_name,
            last_name,
            yearborn,
        } => {
            let athlete = NewAthlete {
                first_name,
                last_name,
                yearborn,
            };
            print_json(&client.create_athlete(&athlete).await?)
        }
        Commands::Competitions { page } => print_json(&client.competitions(page).await?),
        Commands::Competition { id } => print_json(&client.get_competition(&id).await?),
        Commands::Sessions { competition } => print_json(&client.sessions(&competition).await?),
        Commands::Lifts { competition } => print_json(&client.lifts(&competition).await?),
        Commands::Lift { competition, id } => print_json(&client.get_lift(&competition, &id).await?),
        Commands::DeleteLift { competition, id } => {
            print_json(&client.delete_lift(&competition, &id).await?)
        }
        Commands::CheckLifts { .. } | Commands::Login | Commands::Logout | Commands::Config { .. } => {
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    run(cli).await
}
