//! Predictive models for spreads, totals and game outcomes.
//!
//! All models run off season-level team statistics (points for/against,
//! win-loss record). When the market has published a line, the distance
//! between our number and the market's scales the reported confidence:
//! a large disagreement is either a large edge or a large mistake, and
//! both deserve attention.

use crate::models::{Event, Odds, Team};

/// Home-field advantage in points, added to the home team's expected margin.
pub const DEFAULT_HOME_ADVANTAGE: f64 = 2.5;

/// Records shorter than this carry no rating signal.
const MIN_SAMPLE_SIZE: u32 = 5;

/// Baseline Elo-style rating for teams without a usable record.
const BASE_RATING: f64 = 1500.0;

/// Numerically stable logistic function.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

fn safe_mean(values: &[Option<f64>], default: f64) -> f64 {
    let filtered: Vec<f64> = values.iter().flatten().copied().collect();
    if filtered.is_empty() {
        default
    } else {
        filtered.iter().sum::<f64>() / filtered.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadPrediction {
    pub event_id: String,
    /// Expected margin, home-team perspective (positive favors home)
    pub spread: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalPrediction {
    pub event_id: String,
    pub total: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoneylinePrediction {
    pub event_id: String,
    pub home_win_probability: f64,
    pub away_win_probability: f64,
    /// Our probability minus the market-implied probability, when odds exist
    pub edge_vs_market: Option<f64>,
}

/// Runs the predictive models against team statistics.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    home_advantage: f64,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        PredictionEngine::new(DEFAULT_HOME_ADVANTAGE)
    }
}

impl PredictionEngine {
    pub fn new(home_advantage: f64) -> Self {
        PredictionEngine { home_advantage }
    }

    /// Predict the final margin (home minus away).
    pub fn predict_spread(
        &self,
        event: &Event,
        home_team: &Team,
        away_team: &Team,
        odds: Option<&Odds>,
    ) -> SpreadPrediction {
        let home_ppg = safe_mean(&[home_team.points_for], 100.0);
        let away_ppg = safe_mean(&[away_team.points_for], 100.0);
        let defensive_factor =
            safe_mean(&[away_team.points_against, home_team.points_against], 100.0);

        let mut expected_margin =
            (home_ppg - defensive_factor / 2.0) - (away_ppg - defensive_factor / 2.0);
        expected_margin += self.home_advantage;

        let confidence = match odds.and_then(|o| o.spread) {
            Some(market_spread) => {
                (0.5 + (expected_margin - market_spread).abs() / 20.0).min(0.95)
            }
            None => 0.5,
        };

        SpreadPrediction {
            event_id: event.event_id.clone(),
            spread: expected_margin,
            confidence,
        }
    }

    /// Predict the combined final score.
    pub fn predict_total(
        &self,
        event: &Event,
        home_team: &Team,
        away_team: &Team,
        odds: Option<&Odds>,
    ) -> TotalPrediction {
        let offensive_mean = safe_mean(&[home_team.points_for, away_team.points_for], 100.0);
        let defensive_mean =
            safe_mean(&[home_team.points_against, away_team.points_against], 100.0);
        let pace_factor = if defensive_mean != 0.0 {
            offensive_mean / defensive_mean
        } else {
            1.0
        };

        let mut projected_total = offensive_mean * 2.0 * pace_factor;
        if projected_total <= 0.0 {
            projected_total = 200.0;
        }

        let confidence = match odds.and_then(|o| o.total) {
            Some(market_total) => (0.5 + (projected_total - market_total).abs() / 40.0).min(0.95),
            None => 0.5,
        };

        TotalPrediction {
            event_id: event.event_id.clone(),
            total: projected_total,
            confidence,
        }
    }

    /// Predict the win probabilities via a logistic over rating differential.
    pub fn predict_moneyline(
        &self,
        event: &Event,
        home_team: &Team,
        away_team: &Team,
        odds: Option<&Odds>,
    ) -> MoneylinePrediction {
        let home_rating = rating_from_record(home_team);
        let away_rating = rating_from_record(away_team);
        let diff = home_rating - away_rating + self.home_advantage;
        let home_prob = logistic(diff / 10.0);

        let edge = odds.and_then(|o| {
            match (o.home_moneyline, o.away_moneyline) {
                (Some(home_ml), Some(_)) => Some(home_prob - prob_from_moneyline(home_ml)),
                _ => None,
            }
        });

        MoneylinePrediction {
            event_id: event.event_id.clone(),
            home_win_probability: home_prob,
            away_win_probability: 1.0 - home_prob,
            edge_vs_market: edge,
        }
    }
}

fn rating_from_record(team: &Team) -> f64 {
    let games = team.wins + team.losses;
    if games < MIN_SAMPLE_SIZE {
        return BASE_RATING;
    }
    let win_pct = f64::from(team.wins) / f64::from(games);
    let margin = team.points_for.unwrap_or(0.0) - team.points_against.unwrap_or(0.0);
    BASE_RATING + (win_pct - 0.5) * 400.0 + margin
}

/// Implied win probability from an American moneyline.
pub fn prob_from_moneyline(moneyline: f64) -> f64 {
    if moneyline < 0.0 {
        -moneyline / (-moneyline + 100.0)
    } else {
        100.0 / (moneyline + 100.0)
    }
}

/// Confidence-weighted combination of spread predictions for one event.
pub fn ensemble_spread(predictions: &[SpreadPrediction]) -> SpreadPrediction {
    let event_id = predictions[0].event_id.clone();
    let total_weight: f64 = predictions.iter().map(|p| p.confidence).sum();
    let weight = if total_weight == 0.0 { 1.0 } else { total_weight };
    let weighted_spread: f64 = predictions
        .iter()
        .map(|p| p.confidence * p.spread)
        .sum::<f64>()
        / weight;
    let confidence = (total_weight / predictions.len() as f64).min(0.99);
    SpreadPrediction {
        event_id,
        spread: weighted_spread,
        confidence,
    }
}

/// Confidence-weighted combination of total predictions for one event.
pub fn ensemble_total(predictions: &[TotalPrediction]) -> TotalPrediction {
    let event_id = predictions[0].event_id.clone();
    let total_weight: f64 = predictions.iter().map(|p| p.confidence).sum();
    let weight = if total_weight == 0.0 { 1.0 } else { total_weight };
    let weighted_total: f64 = predictions
        .iter()
        .map(|p| p.confidence * p.total)
        .sum::<f64>()
        / weight;
    let confidence = (total_weight / predictions.len() as f64).min(0.99);
    TotalPrediction {
        event_id,
        total: weighted_total,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use crate::models::GameStatus;

    fn team(id: &str, wins: u32, losses: u32, pf: f64, pa: f64) -> Team {
        Team {
            id: id.into(),
            name: format!("Team {id}"),
            abbreviation: id.to_uppercase(),
            wins,
            losses,
            points_for: Some(pf),
            points_against: Some(pa),
        }
    }

    fn event(id: &str) -> Event {
        Event {
            event_id: id.into(),
            league_id: Some("4387".into()),
            home_team_id: "h".into(),
            away_team_id: "a".into(),
            home_team_name: None,
            away_team_name: None,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            status: GameStatus::Scheduled,
            home_score: None,
            away_score: None,
            venue: None,
        }
    }

    fn odds(spread: Option<f64>, total: Option<f64>) -> Odds {
        Odds {
            event_id: "1".into(),
            home_moneyline: Some(-150.0),
            away_moneyline: Some(130.0),
            spread,
            total,
        }
    }

    #[test]
    fn spread_includes_home_advantage() {
        let engine = PredictionEngine::default();
        // Identical teams: the whole margin is the home advantage
        let home = team("h", 10, 10, 110.0, 110.0);
        let away = team("a", 10, 10, 110.0, 110.0);
        let pred = engine.predict_spread(&event("1"), &home, &away, None);
        assert_relative_eq!(pred.spread, DEFAULT_HOME_ADVANTAGE, epsilon = 1e-9);
        assert_relative_eq!(pred.confidence, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn spread_favors_stronger_offense() {
        let engine = PredictionEngine::default();
        let home = team("h", 15, 5, 118.0, 105.0);
        let away = team("a", 5, 15, 104.0, 112.0);
        let pred = engine.predict_spread(&event("1"), &home, &away, None);
        assert!(pred.spread > DEFAULT_HOME_ADVANTAGE, "got {}", pred.spread);
    }

    #[test]
    fn spread_confidence_scales_with_market_distance() {
        let engine = PredictionEngine::default();
        let home = team("h", 10, 10, 110.0, 110.0);
        let away = team("a", 10, 10, 110.0, 110.0);
        // Our number is +2.5; market says -7.5 → distance 10 → 0.5 + 10/20 = 1.0, capped
        let pred = engine.predict_spread(
            &event("1"),
            &home,
            &away,
            Some(&odds(Some(-7.5), None)),
        );
        assert_relative_eq!(pred.confidence, 0.95, epsilon = 1e-9);

        // Market agrees exactly → confidence stays at the 0.5 baseline
        let agree = engine.predict_spread(
            &event("1"),
            &home,
            &away,
            Some(&odds(Some(DEFAULT_HOME_ADVANTAGE), None)),
        );
        assert_relative_eq!(agree.confidence, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn total_of_balanced_teams_is_twice_scoring_average() {
        let engine = PredictionEngine::default();
        let home = team("h", 10, 10, 110.0, 110.0);
        let away = team("a", 10, 10, 110.0, 110.0);
        let pred = engine.predict_total(&event("1"), &home, &away, None);
        // pace factor is 1.0 when offense and defense average the same
        assert_relative_eq!(pred.total, 220.0, epsilon = 1e-9);
    }

    #[test]
    fn total_falls_back_without_stats() {
        let engine = PredictionEngine::default();
        let mut home = team("h", 0, 0, 0.0, 0.0);
        let mut away = team("a", 0, 0, 0.0, 0.0);
        home.points_for = None;
        home.points_against = None;
        away.points_for = None;
        away.points_against = None;
        let pred = engine.predict_total(&event("1"), &home, &away, None);
        assert_relative_eq!(pred.total, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn moneyline_even_matchup_slightly_favors_home() {
        let engine = PredictionEngine::default();
        let home = team("h", 10, 10, 110.0, 110.0);
        let away = team("a", 10, 10, 110.0, 110.0);
        let pred = engine.predict_moneyline(&event("1"), &home, &away, None);
        assert!(pred.home_win_probability > 0.5);
        assert!(pred.home_win_probability < 0.6);
        assert_relative_eq!(
            pred.home_win_probability + pred.away_win_probability,
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn moneyline_short_record_uses_base_rating() {
        let engine = PredictionEngine::default();
        // 2-0 is under the sample floor: the gaudy record must not move the rating
        let home = team("h", 2, 0, 130.0, 90.0);
        let away = team("a", 10, 10, 110.0, 110.0);
        let pred = engine.predict_moneyline(&event("1"), &home, &away, None);
        // away rating is also 1500 (0.500 record, zero margin), so only
        // home advantage separates them
        assert!(pred.home_win_probability < 0.6);
    }

    #[test]
    fn moneyline_edge_against_market() {
        let engine = PredictionEngine::default();
        let home = team("h", 18, 2, 120.0, 100.0);
        let away = team("a", 2, 18, 100.0, 120.0);
        let pred =
            engine.predict_moneyline(&event("1"), &home, &away, Some(&odds(None, None)));
        let market_prob = prob_from_moneyline(-150.0);
        let edge = pred.edge_vs_market.unwrap();
        assert_relative_eq!(
            edge,
            pred.home_win_probability - market_prob,
            epsilon = 1e-9
        );
        assert!(edge > 0.0, "strong favorite vs modest line should show edge");
    }

    #[test]
    fn prob_from_moneyline_conversions() {
        assert_relative_eq!(prob_from_moneyline(-150.0), 0.6, epsilon = 1e-9);
        assert_relative_eq!(prob_from_moneyline(100.0), 0.5, epsilon = 1e-9);
        assert_relative_eq!(prob_from_moneyline(300.0), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn logistic_properties() {
        assert_relative_eq!(logistic(0.0), 0.5, epsilon = 1e-9);
        assert!(logistic(10.0) > 0.99);
        assert!(logistic(-10.0) < 0.01);
        // stable at extremes
        assert!(logistic(-1000.0) >= 0.0);
        assert!(logistic(1000.0) <= 1.0);
    }

    #[test]
    fn ensemble_spread_weights_by_confidence() {
        let preds = vec![
            SpreadPrediction { event_id: "1".into(), spread: 4.0, confidence: 0.9 },
            SpreadPrediction { event_id: "1".into(), spread: -2.0, confidence: 0.1 },
        ];
        let combined = ensemble_spread(&preds);
        // (0.9*4 + 0.1*-2) / 1.0 = 3.4
        assert_relative_eq!(combined.spread, 3.4, epsilon = 1e-9);
        assert_relative_eq!(combined.confidence, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn ensemble_total_single_prediction_is_identity() {
        let preds = vec![TotalPrediction {
            event_id: "1".into(),
            total: 215.0,
            confidence: 0.7,
        }];
        let combined = ensemble_total(&preds);
        assert_relative_eq!(combined.total, 215.0, epsilon = 1e-9);
        assert_relative_eq!(combined.confidence, 0.7, epsilon = 1e-9);
    }
}
