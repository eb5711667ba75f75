//! Typed client for the StatTracker REST surface.
//!
//! Every operation resolves to `Result<T, ClientError>`: success carries the
//! parsed body, failure carries a typed, human-readable error. There is no
//! "empty value pretending to be data" on the failure path.

use std::time::Duration;

use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{FantasyPlayer, Game, Player, Prediction, Team};

/// Base delay of the exponential retry backoff.
const BACKOFF_BASE: Duration = Duration::from_millis(500);
/// Maximum random jitter added to each backoff sleep.
const BACKOFF_JITTER: Duration = Duration::from_millis(250);

/// Failure taxonomy for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The request never produced a response (connect, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body was not the JSON shape we asked for.
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Typed wrapper over the analytics REST surface.
///
/// The base URL is explicit: there is no placeholder default, a consumer
/// that cannot name its backend gets an error at construction time.
#[derive(Clone, Debug)]
pub struct StatsClient {
    http: Client,
    base_url: Url,
    max_retries: u32,
}

impl StatsClient {
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(StatsClient {
            http,
            base_url,
            max_retries,
        })
    }

    /// Games for a sport.
    pub async fn games(&self, sport: &str) -> Result<Vec<Game>, ClientError> {
        self.get_json(&format!("/api/games/{sport}")).await
    }

    /// Season statistics for one team.
    pub async fn team_stats(&self, sport: &str, team_id: &str) -> Result<Team, ClientError> {
        self.get_json(&format!("/api/teams/{sport}/{team_id}")).await
    }

    /// Statistics for one player.
    pub async fn player_stats(&self, sport: &str, player_id: &str) -> Result<Player, ClientError> {
        self.get_json(&format!("/api/players/{sport}/{player_id}"))
            .await
    }

    /// Fantasy projections for an explicit set of player ids.
    pub async fn fantasy_projections(
        &self,
        sport: &str,
        player_ids: &[&str],
    ) -> Result<Vec<FantasyPlayer>, ClientError> {
        let players = player_ids.join(",");
        self.get_json(&format!(
            "/api/fantasy/{sport}/projections?players={players}"
        ))
        .await
    }

    /// Outcome prediction for one game.
    pub async fn predictions(
        &self,
        sport: &str,
        game_id: &str,
    ) -> Result<Prediction, ClientError> {
        self.get_json(&format!("/api/predictions/{sport}/{game_id}"))
            .await
    }

    /// Games for a sport with point spreads attached.
    pub async fn spreads(&self, sport: &str) -> Result<Vec<Game>, ClientError> {
        self.get_json(&format!("/api/spreads/{sport}")).await
    }

    /// GET `base_url + path` and decode the JSON body.
    ///
    /// Transport failures are retried up to `max_retries` times with
    /// jittered exponential backoff; HTTP-status failures are not (the
    /// server already answered, asking again will not change its mind).
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.base_url.join(path).map_err(|source| ClientError::BaseUrl {
            url: format!("{}{path}", self.base_url),
            source,
        })?;

        let mut attempt = 0;
        let resp = loop {
            debug!("GET {}", url);
            match self.http.get(url.clone()).send().await {
                Ok(resp) => break resp,
                Err(e) if attempt < self.max_retries => {
                    let sleep = BACKOFF_BASE * 2u32.pow(attempt)
                        + BACKOFF_JITTER.mul_f64(rand::thread_rng().gen::<f64>());
                    warn!(
                        "Request error for {} (attempt {}/{}), retrying in {:?}: {}",
                        url,
                        attempt + 1,
                        self.max_retries,
                        sleep,
                        e
                    );
                    tokio::time::sleep(sleep).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("API fetch error for {}: {}", url, e);
                    return Err(ClientError::Transport(e));
                }
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!("API error for {}: {} {}", url, status, message);
            return Err(ClientError::Status { status, message });
        }

        resp.json().await.map_err(|e| {
            warn!("API decode error for {}: {}", url, e);
            ClientError::Decode(e)
        })
    }
}
