//! # Discogs Integration Module
//!
//! Everything that talks to the Discogs API: the rate-limited client, the
//! paginated catalog fetchers and the per-release enrichment passes.
//!
//! ## Architecture
//!
//! ```text
//! CLI (export workflow, progress bars)
//!          ↓
//! Discogs session (export)
//!     ├── Catalog pass (collection / wantlist pages)
//!     ├── Details pass (one request per release)
//!     └── Prices pass (one request per release)
//!          ↓
//! DiscogsClient (token, throttle, 429 retry)
//!          ↓
//! Discogs API
//! ```
//!
//! ## Request Budget
//!
//! Discogs allows 60 authenticated requests per minute. The client reads the
//! remaining budget from every response and sleeps once it runs low, so all
//! requests are issued one after another from a single client.
//!
//! ## Failure Handling
//!
//! A rejected token ends the run with [`DiscogsError::Authentication`]. Any
//! other failure ends only the pass it occurred in; the pass is recorded as
//! [`PassOutcome::Partial`] and whatever was gathered stays in the aggregate.

pub mod catalog;
pub mod client;
pub mod enrichment;
mod error;
pub mod export;
pub mod progress;

pub use client::{API_FORMAT, API_LIMIT, DiscogsClient, RateLimitPolicy};
pub use error::{DiscogsError, PassOutcome};
pub use export::Discogs;
pub use progress::{NoProgress, ProgressReporter};
