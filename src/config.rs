//! Configuration management for discogs2xlsx.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Command-line options (highest priority, where the CLI offers one)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.discogs.com";

/// Returns the path of the `.env` file.
///
/// - Linux: `~/.local/share/discogs2xlsx/.env`
/// - macOS: `~/Library/Application Support/discogs2xlsx/.env`
/// - Windows: `%LOCALAPPDATA%/discogs2xlsx/.env`
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discogs2xlsx/.env");
    path
}

/// Loads environment variables from the `.env` file in the local data
/// directory, creating the directory if needed.
///
/// A missing `.env` file is fine: the token can also be passed on the
/// command line. Variables already set in the environment are not
/// overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the Discogs personal access token, if one is configured.
///
/// Reads `DISCOGS_TOKEN`. An empty value counts as unset.
pub fn discogs_token() -> Option<String> {
    env::var("DISCOGS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Returns the base URL of the Discogs API.
///
/// Reads `DISCOGS_API_URL` and falls back to [`DEFAULT_API_URL`].
pub fn discogs_api_url() -> String {
    env::var("DISCOGS_API_URL")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the `User-Agent` sent with every request.
///
/// Discogs asks clients to identify themselves. Reads `DISCOGS_USER_AGENT`
/// and falls back to `discogs2xlsx/<version>`.
pub fn discogs_user_agent() -> String {
    env::var("DISCOGS_USER_AGENT")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
}
