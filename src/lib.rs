//! Discogs to xlsx exporter library
//!
//! This library fetches a user's Discogs collection or wantlist through the
//! rate-limited Discogs API, normalizes every release into a per-artist
//! record structure and writes the result into a spreadsheet.
//!
//! # Modules
//!
//! - `cli` - Command-line workflow and progress bars
//! - `config` - Configuration management and environment variables
//! - `discogs` - Rate-limited Discogs API client and catalog fetchers
//! - `management` - The per-artist catalog aggregate
//! - `spreadsheet` - xlsx writer for a finished export
//! - `types` - Data structures and type definitions
//! - `utils` - Text normalization helpers
//!
//! # Example
//!
//! ```
//! use discogs2xlsx::{config, discogs::DiscogsClient};
//!
//! #[tokio::main]
//! async fn main() -> discogs2xlsx::Res<()> {
//!     config::load_env().await?;
//!     let client = DiscogsClient::new(config::discogs_token().unwrap_or_default())?;
//!     Ok(())
//! }
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

pub mod cli;
pub mod config;
pub mod discogs;
pub mod management;
pub mod spreadsheet;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line layer where errors of different origins
/// (API, spreadsheet, configuration) meet.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Console output levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet = 0,
    Normal = 1,
    /// Everything, including request-level details.
    Debug = 2,
}

static VERBOSITY: AtomicU8 = AtomicU8::new(Verbosity::Normal as u8);

/// Sets the process-wide console verbosity.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Returns the process-wide console verbosity.
pub fn verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Debug,
        _ => Verbosity::Normal,
    }
}

/// Prints an informational message with a blue bullet point.
///
/// Suppressed in quiet mode.
///
/// # Example
///
/// ```
/// info!("Fetching Discogs collection.");
/// info!("Found {} releases", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    if $crate::verbosity() >= $crate::Verbosity::Normal {
      println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a success message with a green checkmark.
///
/// Suppressed in quiet mode.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    if $crate::verbosity() >= $crate::Verbosity::Normal {
      println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
    }
  })
}

/// Prints a debug message with a dimmed marker.
///
/// Only shown when the verbosity is [`Verbosity::Debug`]. Goes to stderr so
/// it never interleaves with a progress bar's line on stdout.
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    if $crate::verbosity() >= $crate::Verbosity::Debug {
      eprintln!("[{}] {}", "~".dimmed(), std::format_args!($($arg)*));
    }
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// such as a rejected Discogs token.
///
/// # Example
///
/// ```
/// error!("Invalid Discogs token.");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Always printed, also in quiet mode. Used for recoverable failures such as
/// an aborted fetch pass that still leaves a partial result.
///
/// # Example
///
/// ```
/// warning!("Fetching prices failed, exporting without them");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
