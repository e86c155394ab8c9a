//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Backend, Settings};
use crate::credentials::CredentialCache;
use crate::errors::{CacheError, Result};
use crate::session::LoginFlow;

/// credcache CLI: remember-me credential cache and sign-in lifecycle.
#[derive(Parser)]
#[command(
    name = "credcache",
    about = "Remember-me credential cache for sign-in flows",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for the file backend (default: .credcache)
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Storage key for the remembered record
    #[arg(long, env = "CREDCACHE_KEY", global = true)]
    pub key: Option<String>,

    /// Secure store backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Timeout for a single storage operation, in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Sign in, pre-filling from remembered credentials
    Login {
        /// Email address (default: the remembered one)
        #[arg(long)]
        email: Option<String>,

        /// Password (omit for the remembered one or an interactive prompt)
        #[arg(long, env = "CREDCACHE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Remember these credentials on this device
        #[arg(long, conflicts_with = "forget")]
        remember: bool,

        /// Forget any remembered credentials
        #[arg(long)]
        forget: bool,
    },

    /// Sign out and forget remembered credentials
    Logout,

    /// Create an account (validates the sign-up form)
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password (omit for an interactive prompt)
        #[arg(long, env = "CREDCACHE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Birth date as DD/MM/YYYY
        #[arg(long)]
        birth_date: Option<String>,

        /// Phone number without country code
        #[arg(long)]
        phone: Option<String>,

        /// Country code for the phone number (PH, US, GB, CA, AU)
        #[arg(long, default_value = "PH")]
        country: String,

        /// Remember these credentials on this device
        #[arg(long)]
        remember: bool,
    },

    /// Show the remembered credentials, if any
    Status,

    /// Show version
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Directory settings are loaded from and relative paths resolve against.
pub fn project_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?)
}

/// Load `.credcache.toml` and apply command-line overrides.
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(&project_dir()?)?;

    if let Some(dir) = &cli.store_dir {
        settings.store_dir = dir.clone();
    }
    if let Some(key) = &cli.key {
        settings.storage_key = key.clone();
    }
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(ms) = cli.timeout_ms {
        settings.io_timeout_ms = ms;
    }

    settings.validate()?;
    Ok(settings)
}

/// Build the credential cache described by the resolved settings.
pub fn open_cache(cli: &Cli) -> Result<CredentialCache> {
    let settings = resolve_settings(cli)?;
    let store = crate::storage::open_store(&settings, &project_dir()?)?;
    let cache = CredentialCache::new(store, settings.storage_key.clone())?;
    Ok(cache.with_timeout(settings.io_timeout()))
}

/// Build the sign-in flow over the configured cache.
pub fn open_flow(cli: &Cli) -> Result<LoginFlow> {
    Ok(LoginFlow::new(open_cache(cli)?))
}

/// Prompt for an email address.
pub fn prompt_email() -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(|e| prompt_error("email", e))
}

/// Prompt for an existing password.
pub fn prompt_password() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| prompt_error("password", e))
}

/// Prompt for a new password with confirmation.
pub fn prompt_new_password() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Choose a password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| prompt_error("password", e))
}

/// Ctrl-C at a prompt is a cancellation, not a failure.
fn prompt_error(prompt: &str, err: dialoguer::Error) -> CacheError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            CacheError::UserCancelled
        }
        other => CacheError::CommandFailed(format!("{prompt} prompt: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "credcache",
            "status",
            "--store-dir",
            "/tmp/x",
            "--key",
            "k1",
            "--backend",
            "file",
            "-vv",
        ]);
        assert_eq!(cli.store_dir.as_deref(), Some("/tmp/x"));
        assert_eq!(cli.key.as_deref(), Some("k1"));
        assert_eq!(cli.backend, Some(Backend::File));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn interrupted_prompt_is_a_cancellation() {
        let interrupted = std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c");
        assert!(matches!(
            prompt_error("password", dialoguer::Error::IO(interrupted)),
            CacheError::UserCancelled
        ));

        let broken = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        match prompt_error("email", dialoguer::Error::IO(broken)) {
            CacheError::CommandFailed(msg) => assert!(msg.starts_with("email prompt:")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn remember_and_forget_conflict() {
        let parsed = Cli::try_parse_from(["credcache", "login", "--remember", "--forget"]);
        assert!(parsed.is_err());
    }
}
