use std::{error::Error, fmt};

use crate::{debug, warning};

/// Failures of the Discogs pipeline.
///
/// Only [`DiscogsError::Authentication`] ends a run. Every other variant is a
/// fetch error: the pass that hit it stops and keeps what it gathered.
#[derive(Debug)]
pub enum DiscogsError {
    Authentication(String),
    Http(reqwest::Error),
    Decode {
        path: String,
        source: serde_json::Error,
    },
    InvalidPayload(String),
    RateLimitExhausted {
        path: String,
        attempts: u32,
    },
}

impl DiscogsError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, DiscogsError::Authentication(_))
    }
}

impl fmt::Display for DiscogsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscogsError::Authentication(msg) => write!(f, "unauthorized request: {}", msg),
            DiscogsError::Http(e) => write!(f, "request failed: {}", e),
            DiscogsError::Decode { path, source } => {
                write!(f, "cannot decode response of {}: {}", path, source)
            }
            DiscogsError::InvalidPayload(msg) => write!(f, "unexpected payload: {}", msg),
            DiscogsError::RateLimitExhausted { path, attempts } => write!(
                f,
                "{} still rate limited after {} attempts",
                path, attempts
            ),
        }
    }
}

impl Error for DiscogsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiscogsError::Http(e) => Some(e),
            DiscogsError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DiscogsError {
    fn from(err: reqwest::Error) -> Self {
        DiscogsError::Http(err)
    }
}

/// How a fetch pass ended.
#[derive(Debug)]
pub enum PassOutcome {
    Complete,
    /// The pass stopped early; whatever it merged before the error is kept.
    Partial(DiscogsError),
}

impl PassOutcome {
    /// Converts the result of a pass into its outcome.
    ///
    /// Authentication errors are handed back to the caller, any other error
    /// is logged and turned into [`PassOutcome::Partial`].
    pub fn settle(label: &str, result: Result<(), DiscogsError>) -> Result<Self, DiscogsError> {
        match result {
            Ok(()) => Ok(PassOutcome::Complete),
            Err(e) if e.is_authentication() => Err(e),
            Err(e) => {
                warning!("Fetching Discogs {} failed, keeping partial data.", label);
                debug!("{}: {:?}", label, e);
                Ok(PassOutcome::Partial(e))
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PassOutcome::Complete)
    }

    pub fn error(&self) -> Option<&DiscogsError> {
        match self {
            PassOutcome::Complete => None,
            PassOutcome::Partial(e) => Some(e),
        }
    }
}
