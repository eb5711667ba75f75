pub mod collector;
pub mod fantasy;
pub mod prediction;

pub use collector::StatCollector;
pub use fantasy::FantasyProjector;
pub use prediction::PredictionEngine;

use std::sync::Arc;

use anyhow::Result;
use futures_util::future::join_all;
use tracing::warn;

use crate::models::{Event, FantasyPlayer, Game, Odds, Player, Prediction, Team};
use crate::providers::SportsDataProvider;
use prediction::{MoneylinePrediction, SpreadPrediction, TotalPrediction};

/// Everything the models produced for one event, teams resolved.
#[derive(Debug, Clone)]
pub struct EventInsights {
    pub event: Event,
    pub home_team: Team,
    pub away_team: Team,
    pub odds: Option<Odds>,
    pub spread: SpreadPrediction,
    pub total: TotalPrediction,
    pub moneyline: MoneylinePrediction,
}

/// Orchestrates collection, prediction and fantasy projection.
#[derive(Clone)]
pub struct AnalyticsService {
    collector: StatCollector,
    predictor: PredictionEngine,
    projector: FantasyProjector,
    provider: Arc<dyn SportsDataProvider>,
}

impl AnalyticsService {
    pub fn new(provider: Arc<dyn SportsDataProvider>, home_advantage: f64) -> Self {
        AnalyticsService {
            collector: StatCollector::new(Arc::clone(&provider)),
            predictor: PredictionEngine::new(home_advantage),
            projector: FantasyProjector::default(),
            provider,
        }
    }

    /// Upcoming and recent games for a league, teams resolved.
    pub async fn games(&self, league_id: &str) -> Result<Vec<Game>> {
        let events = self.collector.events(league_id).await?;
        let futures = events.into_iter().map(|event| async move {
            let (home, away) = self.resolve_teams(&event).await?;
            Ok::<Game, anyhow::Error>(event.into_game(home, away, None))
        });
        join_all(futures).await.into_iter().collect()
    }

    /// Games for a league with a point spread attached: the market line
    /// when the provider carries one, our predicted margin otherwise.
    pub async fn spreads(&self, league_id: &str) -> Result<Vec<Game>> {
        let insights = self.insights_for_league(league_id).await?;
        Ok(insights
            .into_iter()
            .map(|insight| {
                let spread = insight
                    .odds
                    .as_ref()
                    .and_then(|o| o.spread)
                    .unwrap_or_else(|| round_half(insight.spread.spread));
                insight
                    .event
                    .into_game(insight.home_team, insight.away_team, Some(spread))
            })
            .collect())
    }

    /// Full model output for every event in a league.
    pub async fn insights_for_league(&self, league_id: &str) -> Result<Vec<EventInsights>> {
        let events = self.collector.events(league_id).await?;
        let futures = events.into_iter().map(|event| self.insight_for_event(event));
        join_all(futures).await.into_iter().collect()
    }

    async fn insight_for_event(&self, event: Event) -> Result<EventInsights> {
        let (home_team, away_team) = self.resolve_teams(&event).await?;
        let odds = match self.provider.get_odds(&event.event_id).await {
            Ok(odds) => odds,
            Err(e) => {
                warn!("Odds lookup failed for event {}: {}", event.event_id, e);
                None
            }
        };
        let spread = self
            .predictor
            .predict_spread(&event, &home_team, &away_team, odds.as_ref());
        let total = self
            .predictor
            .predict_total(&event, &home_team, &away_team, odds.as_ref());
        let moneyline =
            self.predictor
                .predict_moneyline(&event, &home_team, &away_team, odds.as_ref());
        Ok(EventInsights {
            event,
            home_team,
            away_team,
            odds,
            spread,
            total,
            moneyline,
        })
    }

    /// Predict the outcome of a single game. `None` when the game id is
    /// unknown to the provider.
    pub async fn prediction(&self, game_id: &str) -> Result<Option<Prediction>> {
        let Some(event) = self.collector.lookup_event(game_id).await? else {
            return Ok(None);
        };
        let insight = self.insight_for_event(event).await?;
        let (predicted_winner, confidence) =
            if insight.moneyline.home_win_probability >= 0.5 {
                (insight.home_team.name, insight.moneyline.home_win_probability)
            } else {
                (insight.away_team.name, insight.moneyline.away_win_probability)
            };
        Ok(Some(Prediction {
            game_id: game_id.to_string(),
            predicted_winner,
            confidence,
            spread: round_half(insight.spread.spread),
            total: round_half(insight.total.total),
        }))
    }

    /// Fantasy projections for an explicit player set.
    pub async fn fantasy_projections(&self, player_ids: &[String]) -> Result<Vec<FantasyPlayer>> {
        let players = self.collector.players(player_ids).await?;
        Ok(self.projector.project(players))
    }

    pub async fn team(&self, team_id: &str) -> Result<Option<Team>> {
        self.collector.team(team_id).await
    }

    pub async fn player(&self, player_id: &str) -> Result<Option<Player>> {
        self.collector.player(player_id).await
    }

    async fn resolve_teams(&self, event: &Event) -> Result<(Team, Team)> {
        let (home, away) = tokio::join!(
            self.collector.team(&event.home_team_id),
            self.collector.team(&event.away_team_id),
        );
        let home = home?.unwrap_or_else(|| fallback_team(event, true));
        let away = away?.unwrap_or_else(|| fallback_team(event, false));
        Ok((home, away))
    }
}

/// Round to the nearest half point, the resolution betting lines use.
fn round_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

fn fallback_team(event: &Event, home: bool) -> Team {
    let (id, name) = if home {
        (&event.home_team_id, &event.home_team_name)
    } else {
        (&event.away_team_id, &event.away_team_name)
    };
    let mut team = Team::unknown(id);
    if let Some(name) = name {
        team.name = name.clone();
    }
    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    use crate::models::GameStatus;

    /// Canned provider: one league with one event, two teams, one player.
    struct FakeProvider {
        odds: Option<Odds>,
        know_teams: bool,
    }

    fn fake_event() -> Event {
        Event {
            event_id: "ev1".into(),
            league_id: Some("4387".into()),
            home_team_id: "h1".into(),
            away_team_id: "a1".into(),
            home_team_name: Some("Celtics".into()),
            away_team_name: Some("Heat".into()),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            status: GameStatus::Scheduled,
            home_score: None,
            away_score: None,
            venue: None,
        }
    }

    fn fake_team(id: &str, name: &str, wins: u32, losses: u32, pf: f64, pa: f64) -> Team {
        Team {
            id: id.into(),
            name: name.into(),
            abbreviation: name[..3].to_uppercase(),
            wins,
            losses,
            points_for: Some(pf),
            points_against: Some(pa),
        }
    }

    #[async_trait]
    impl SportsDataProvider for FakeProvider {
        async fn get_team(&self, team_id: &str) -> Result<Option<Team>> {
            if !self.know_teams {
                return Ok(None);
            }
            Ok(match team_id {
                "h1" => Some(fake_team("h1", "Celtics", 16, 4, 118.0, 106.0)),
                "a1" => Some(fake_team("a1", "Heat", 10, 10, 110.0, 110.0)),
                _ => None,
            })
        }

        async fn get_events(&self, _league_id: &str) -> Result<Vec<Event>> {
            Ok(vec![fake_event()])
        }

        async fn lookup_event(&self, event_id: &str) -> Result<Option<Event>> {
            Ok((event_id == "ev1").then(fake_event))
        }

        async fn get_player(&self, player_id: &str) -> Result<Option<Player>> {
            Ok((player_id == "p1").then(|| Player {
                id: "p1".into(),
                name: "Jayson Tatum".into(),
                team: "h1".into(),
                position: "Forward".into(),
                stats: HashMap::from([
                    ("points".to_string(), 27.0),
                    ("rebounds".to_string(), 8.0),
                    ("assists".to_string(), 4.0),
                ]),
            }))
        }

        async fn get_odds(&self, _event_id: &str) -> Result<Option<Odds>> {
            Ok(self.odds.clone())
        }

        fn name(&self) -> &str {
            "Fake"
        }
    }

    fn service(provider: FakeProvider) -> AnalyticsService {
        AnalyticsService::new(Arc::new(provider), prediction::DEFAULT_HOME_ADVANTAGE)
    }

    #[tokio::test]
    async fn games_resolve_teams() {
        let svc = service(FakeProvider { odds: None, know_teams: true });
        let games = svc.games("4387").await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].home_team.name, "Celtics");
        assert_eq!(games[0].away_team.name, "Heat");
        assert_eq!(games[0].spread, None);
    }

    #[tokio::test]
    async fn unknown_teams_fall_back_to_event_names() {
        let svc = service(FakeProvider { odds: None, know_teams: false });
        let games = svc.games("4387").await.unwrap();
        assert_eq!(games[0].home_team.name, "Celtics");
        assert_eq!(games[0].home_team.wins, 0);
    }

    #[tokio::test]
    async fn spreads_prefer_market_line() {
        let svc = service(FakeProvider {
            odds: Some(Odds {
                event_id: "ev1".into(),
                home_moneyline: Some(-160.0),
                away_moneyline: Some(140.0),
                spread: Some(-4.5),
                total: Some(220.5),
            }),
            know_teams: true,
        });
        let games = svc.spreads("4387").await.unwrap();
        assert_eq!(games[0].spread, Some(-4.5));
    }

    #[tokio::test]
    async fn spreads_fall_back_to_model_line() {
        let svc = service(FakeProvider { odds: None, know_teams: true });
        let games = svc.spreads("4387").await.unwrap();
        let spread = games[0].spread.unwrap();
        // model line is rounded to a half point
        assert_eq!(spread, (spread * 2.0).round() / 2.0);
        assert!(spread > 0.0, "stronger home team should be favored");
    }

    #[tokio::test]
    async fn prediction_picks_stronger_team() {
        let svc = service(FakeProvider { odds: None, know_teams: true });
        let pred = svc.prediction("ev1").await.unwrap().unwrap();
        assert_eq!(pred.predicted_winner, "Celtics");
        assert!(pred.confidence > 0.5);
        assert!(pred.total > 0.0);
    }

    #[tokio::test]
    async fn prediction_unknown_game_is_none() {
        let svc = service(FakeProvider { odds: None, know_teams: true });
        assert!(svc.prediction("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fantasy_projections_skip_unknown_players() {
        let svc = service(FakeProvider { odds: None, know_teams: true });
        let out = svc
            .fantasy_projections(&["p1".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].player.name, "Jayson Tatum");
        // 27*1.0 + 8*1.2 + 4*1.5 = 42.6
        assert!((out[0].projected_points - 42.6).abs() < 1e-9);
    }
}
