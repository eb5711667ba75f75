use std::sync::Arc;

use anyhow::Result;

use crate::models::{Event, Player, Team};
use crate::providers::SportsDataProvider;

/// Collects and normalizes statistics from a [`SportsDataProvider`].
#[derive(Clone)]
pub struct StatCollector {
    provider: Arc<dyn SportsDataProvider>,
}

impl StatCollector {
    pub fn new(provider: Arc<dyn SportsDataProvider>) -> Self {
        StatCollector { provider }
    }

    pub async fn team(&self, team_id: &str) -> Result<Option<Team>> {
        self.provider.get_team(team_id).await
    }

    pub async fn events(&self, league_id: &str) -> Result<Vec<Event>> {
        self.provider.get_events(league_id).await
    }

    pub async fn lookup_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.provider.lookup_event(event_id).await
    }

    pub async fn player(&self, player_id: &str) -> Result<Option<Player>> {
        self.provider.get_player(player_id).await
    }

    /// Fetch a batch of players, silently skipping unknown ids.
    pub async fn players(&self, player_ids: &[String]) -> Result<Vec<Player>> {
        let mut players = Vec::with_capacity(player_ids.len());
        for id in player_ids {
            if let Some(player) = self.provider.get_player(id).await? {
                players.push(player);
            }
        }
        Ok(players)
    }
}
