use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A sport available on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Sport {
    /// Lowercase identifier used as a URL path segment (e.g. "nfl")
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// TheSportsDB league id backing this sport's data
    #[serde(rename = "leagueId")]
    pub league_id: &'static str,
}

/// The static sport catalog shown on the landing page.
pub const SPORTS: [Sport; 6] = [
    Sport {
        id: "nfl",
        name: "NFL",
        icon: "🏈",
        description: "National Football League",
        league_id: "4391",
    },
    Sport {
        id: "nba",
        name: "NBA",
        icon: "🏀",
        description: "National Basketball Association",
        league_id: "4387",
    },
    Sport {
        id: "mlb",
        name: "MLB",
        icon: "⚾",
        description: "Major League Baseball",
        league_id: "4424",
    },
    Sport {
        id: "nhl",
        name: "NHL",
        icon: "🏒",
        description: "National Hockey League",
        league_id: "4380",
    },
    Sport {
        id: "soccer",
        name: "Soccer",
        icon: "⚽",
        description: "International Soccer",
        league_id: "4328",
    },
    Sport {
        id: "mma",
        name: "MMA/UFC",
        icon: "🥊",
        description: "Mixed Martial Arts",
        league_id: "4443",
    },
];

/// Look up a sport by its URL identifier.
pub fn find_sport(id: &str) -> Option<&'static Sport> {
    SPORTS.iter().find(|s| s.id == id)
}

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Completed,
}

impl GameStatus {
    /// Map a provider status string onto the three-state lifecycle.
    pub fn from_provider(s: &str) -> GameStatus {
        match s.to_lowercase().as_str() {
            "" | "ns" | "not started" | "scheduled" | "preview" => GameStatus::Scheduled,
            "ft" | "aot" | "aet" | "pen" | "final" | "finished" | "completed"
            | "match finished" => GameStatus::Completed,
            _ => GameStatus::Live,
        }
    }
}

/// A team and its season record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    /// Average points scored per game, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_for: Option<f64>,
    /// Average points allowed per game, when the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_against: Option<f64>,
}

impl Team {
    /// Placeholder record used when a team lookup fails mid-aggregation.
    pub fn unknown(id: &str) -> Team {
        Team {
            id: id.to_string(),
            name: format!("Team {id}"),
            abbreviation: String::new(),
            wins: 0,
            losses: 0,
            points_for: None,
            points_against: None,
        }
    }
}

/// A player and an open-ended per-game stats mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: String,
    pub position: String,
    /// Untyped metric name → per-game value (e.g. "points" → 27.3)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub stats: HashMap<String, f64>,
}

/// A single game between two teams.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub date: NaiveDate,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
    /// Point spread (home-team handicap), when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

/// A player with fantasy projections attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FantasyPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub projected_points: f64,
    pub average_points: f64,
    /// Pessimistic projection band
    pub floor: f64,
    /// Optimistic projection band
    pub ceiling: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injury_status: Option<String>,
}

/// Predicted outcome for a single game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub game_id: String,
    pub predicted_winner: String,
    /// Win probability of the predicted winner (0.0–1.0)
    pub confidence: f64,
    /// Predicted margin, home team perspective
    pub spread: f64,
    /// Predicted combined score
    pub total: f64,
}

/// Raw event as reported by the data provider, before team resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub event_id: String,
    pub league_id: Option<String>,
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub date: NaiveDate,
    pub status: GameStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub venue: Option<String>,
}

impl Event {
    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Assemble the wire-level `Game` once both teams are resolved.
    pub fn into_game(self, home_team: Team, away_team: Team, spread: Option<f64>) -> Game {
        Game {
            id: self.event_id,
            home_team,
            away_team,
            date: self.date,
            status: self.status,
            home_score: self.home_score,
            away_score: self.away_score,
            spread,
        }
    }
}

/// Betting market lines for an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Odds {
    pub event_id: String,
    pub home_moneyline: Option<f64>,
    pub away_moneyline: Option<f64>,
    /// Home-team point spread
    pub spread: Option<f64>,
    pub total: Option<f64>,
}
