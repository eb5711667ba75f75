pub mod thesportsdb;

pub use thesportsdb::TheSportsDb;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Event, Odds, Player, Team};

/// Trait that every sports-data provider must implement.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Look up a single team by identifier.
    async fn get_team(&self, team_id: &str) -> Result<Option<Team>>;

    /// Return upcoming and recently completed events for a league.
    async fn get_events(&self, league_id: &str) -> Result<Vec<Event>>;

    /// Look up a single event by identifier.
    async fn lookup_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// Look up a single player by identifier.
    async fn get_player(&self, player_id: &str) -> Result<Option<Player>>;

    /// Return betting lines for an event, when the provider carries them.
    async fn get_odds(&self, event_id: &str) -> Result<Option<Odds>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
