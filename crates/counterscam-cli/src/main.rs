//! # counterscam
//!
//! Terminal front end for the CounterScam detection service.
//!
//! This binary provides:
//! - **URL and message scans** with the verdict, risk score and reasons
//! - **Local scan history**, bounded and most recent first
//! - **Admin session** login / logout
//! - **Admin dashboard** stats, recent checks and analytics
//! - **Scam reports** submitted to the service

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use counterscam_client::{ClientConfig, ClientError, ClientState, Profile};
use counterscam_shared::{ScanKind, ScanRequest};
use tracing::info;

#[derive(Parser)]
#[command(name = "counterscam")]
#[command(about = "Check links and messages for phishing", long_about = None)]
#[command(version)]
struct Cli {
    /// Service base URL (overrides COUNTERSCAM_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Deployment profile: dashboard or mobile (overrides COUNTERSCAM_PROFILE)
    #[arg(long, global = true)]
    profile: Option<Profile>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the admin API
    Login {
        username: String,

        /// Falls back to COUNTERSCAM_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },

    /// Drop the current session
    Logout,

    /// Check a link
    ScanUrl { url: String },

    /// Check the text of a message
    ScanMessage { message: String },

    /// Show recent scans
    History {
        /// Remove every entry instead
        #[arg(long)]
        clear: bool,
    },

    /// Admin: aggregate counters
    Stats,

    /// Admin: most recent checks across all users
    Recent,

    /// Admin: attack trend and top domains
    Analytics,

    /// Report a scam link or message
    Report {
        /// url or message
        #[arg(long, default_value = "url")]
        kind: ScanKind,

        value: String,

        #[arg(long, default_value = "")]
        details: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    counterscam_client::init_logging();

    let cli = Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Load configuration, flags win over the environment
    // -----------------------------------------------------------------------
    let mut config = ClientConfig::from_env();
    if let Some(profile) = cli.profile {
        if config.max_history == config.profile.default_max_history() {
            config.max_history = profile.default_max_history();
        }
        config.profile = profile;
    }
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Build client state
    // -----------------------------------------------------------------------
    let state = ClientState::new(config).context("failed to initialise client")?;

    // -----------------------------------------------------------------------
    // 4. Run the command
    // -----------------------------------------------------------------------
    if let Err(e) = run(&state, cli.command, cli.json).await {
        let Some(client_error) = e.downcast_ref::<ClientError>() else {
            return Err(e);
        };
        eprintln!("{}", client_error.user_message());
        if client_error.is_session_ended() {
            eprintln!("Run `counterscam login <username>` to sign in.");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &ClientState, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Login { username, password } => {
            let password = password
                .or_else(|| std::env::var("COUNTERSCAM_PASSWORD").ok())
                .context("no password given: pass --password or set COUNTERSCAM_PASSWORD")?;
            state.api.login(&username, &password).await?;
            println!("Signed in as {}.", username.trim());
        }
        Commands::Logout => {
            state.api.logout();
            println!("Signed out.");
        }
        Commands::ScanUrl { url } => {
            let report = state.scanner.scan(ScanRequest::url(url)).await?;
            emit(json, &report, render::scan)?;
        }
        Commands::ScanMessage { message } => {
            let report = state.scanner.scan(ScanRequest::message(message)).await?;
            emit(json, &report, render::scan)?;
        }
        Commands::History { clear: true } => {
            state.history.clear();
            println!("History cleared.");
        }
        Commands::History { clear: false } => {
            let entries = state.history.list();
            emit(json, entries.as_slice(), render::history)?;
        }
        Commands::Stats => {
            let stats = state.api.stats().await?;
            emit(json, &stats, render::stats)?;
        }
        Commands::Recent => {
            let checks = state.api.recent_checks().await?;
            emit(json, checks.as_slice(), render::recent)?;
        }
        Commands::Analytics => {
            let analytics = state.api.analytics().await?;
            emit(json, &analytics, render::analytics)?;
        }
        Commands::Report {
            kind,
            value,
            details,
        } => {
            state.api.submit_report(kind, &value, &details).await?;
            println!("Report submitted. Thank you.");
        }
    }
    Ok(())
}

fn emit<T>(json: bool, value: &T, text: fn(&T)) -> anyhow::Result<()>
where
    T: serde::Serialize + ?Sized,
{
    if json {
        render::json(value)
    } else {
        text(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_with_kind() {
        let cli = Cli::parse_from([
            "counterscam",
            "--profile",
            "dashboard",
            "report",
            "--kind",
            "message",
            "You won a prize",
            "--details",
            "sms",
        ]);
        assert_eq!(cli.profile, Some(Profile::Dashboard));
        match cli.command {
            Commands::Report {
                kind,
                value,
                details,
            } => {
                assert_eq!(kind, ScanKind::Message);
                assert_eq!(value, "You won a prize");
                assert_eq!(details, "sms");
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_history_clear_flag() {
        let cli = Cli::parse_from(["counterscam", "history", "--clear"]);
        assert!(matches!(cli.command, Commands::History { clear: true }));
    }
}
