use std::time::Duration;

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tokio::time::{Instant, sleep};

use crate::{config, debug, discogs::DiscogsError};

pub const API_FORMAT: &str = "application/vnd.discogs.v2.plaintext+json";
pub const API_LIMIT: u32 = 100;

const RATELIMIT_REMAINING_HEADER: &str = "x-discogs-ratelimit-remaining";

/// Throttle settings for the Discogs request budget.
///
/// The defaults are the limits Discogs enforces for authenticated clients:
/// 60 requests per 60 second window.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Requests allowed per window, assumed when the response carries no
    /// remaining-budget header.
    pub budget: u32,
    /// Below this many remaining requests the client waits for a new window.
    pub low_water: u32,
    pub window: Duration,
    /// Shortest wait once the budget is low.
    pub floor: Duration,
    /// Attempts per request while the server answers 429.
    pub max_attempts: u32,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            budget: 60,
            low_water: 2,
            window: Duration::from_secs(60),
            floor: Duration::from_secs(2),
            max_attempts: 5,
        }
    }
}

/// Authenticated GET access to the Discogs API within its request budget.
///
/// The client tracks the remaining budget reported by the server and sleeps
/// before a request when it has run low. A 429 answer resets the budget to
/// zero and the same request is sent again after the throttle sleep.
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    token: String,
    policy: RateLimitPolicy,
    remaining: u32,
    last_block: Instant,
}

impl DiscogsClient {
    /// Creates a client for the configured API URL and user agent.
    pub fn new(token: impl Into<String>) -> Result<Self, DiscogsError> {
        Self::with_options(
            token,
            config::discogs_api_url(),
            config::discogs_user_agent(),
            RateLimitPolicy::default(),
        )
    }

    pub fn with_options(
        token: impl Into<String>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        policy: RateLimitPolicy,
    ) -> Result<Self, DiscogsError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_FORMAT));

        let http = Client::builder()
            .user_agent(user_agent.into())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            remaining: policy.budget,
            policy,
            last_block: Instant::now(),
        })
    }

    /// Requests remaining in the current window, as last reported.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Sends `GET {base_url}{path}` with the token, page size and `params`
    /// and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`DiscogsError::Authentication`] on 401
    /// - [`DiscogsError::RateLimitExhausted`] when every attempt got 429
    /// - [`DiscogsError::Http`] on transport errors and other error statuses
    /// - [`DiscogsError::Decode`] when the body does not match `T`
    pub async fn get<T: DeserializeOwned>(
        &mut self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, DiscogsError> {
        let api_url = format!("{}{}", self.base_url, path);

        for attempt in 1..=self.policy.max_attempts {
            self.throttle().await;

            let response = self
                .http
                .get(&api_url)
                .query(&[("token", self.token.as_str())])
                .query(&[("per_page", API_LIMIT)])
                .query(params)
                .send()
                .await?;

            self.remaining = response
                .headers()
                .get(RATELIMIT_REMAINING_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(self.policy.budget);

            match response.status() {
                StatusCode::UNAUTHORIZED => {
                    return Err(DiscogsError::Authentication(format!(
                        "{} answered 401",
                        path
                    )));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    self.remaining = 0;
                    debug!(
                        "GET {} rate limited (attempt {}/{})",
                        path, attempt, self.policy.max_attempts
                    );
                    continue;
                }
                _ => {}
            }

            let response = response.error_for_status()?;
            let body = response.bytes().await?;
            debug!(
                "GET {} ok, {} requests left in window",
                path, self.remaining
            );

            return serde_json::from_slice(&body).map_err(|source| DiscogsError::Decode {
                path: path.to_string(),
                source,
            });
        }

        Err(DiscogsError::RateLimitExhausted {
            path: path.to_string(),
            attempts: self.policy.max_attempts,
        })
    }

    async fn throttle(&mut self) {
        if self.remaining >= self.policy.low_water {
            return;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_block);
        let wait = self
            .policy
            .window
            .saturating_sub(elapsed)
            .max(self.policy.floor);

        debug!(
            "Request budget low ({} left), waiting {:.1}s",
            self.remaining,
            wait.as_secs_f64()
        );
        sleep(wait).await;
        self.last_block = now;
    }
}
