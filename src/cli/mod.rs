//! # CLI Module
//!
//! The command-line layer of discogs2xlsx. It turns parsed options into an
//! export run and handles everything the user sees: the progress bars, the
//! log lines and the summary table.
//!
//! ## Commands
//!
//! - [`export`] - Fetches a collection or wantlist and writes it to an xlsx file
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (options, progress bars, summary)
//!     ↓
//! Discogs Layer (identity, catalog pass, enrichment passes)
//!     ↓
//! Management Layer (per-artist aggregate)
//!     ↓
//! Spreadsheet Writer (xlsx)
//! ```
//!
//! ## Error Handling
//!
//! - A rejected token ends the program with a clear message and exit code 1
//! - Failed fetch passes print a warning, and the partial export is still written
//! - An empty export is written as a header-only sheet, with a warning
//!
//! ## Usage
//!
//! ```bash
//! discogs2xlsx collection --token <TOKEN>            # Collection only
//! discogs2xlsx collection -d -p -c USD               # With details and prices in USD
//! discogs2xlsx wantlist -f my-wantlist.xlsx          # Wantlist into a chosen file
//! ```

mod export;
pub mod progress;

pub use export::{ExportSettings, export};
