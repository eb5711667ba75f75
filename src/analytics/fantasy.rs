//! Fantasy scoring projections from per-game player statistics.

use crate::models::{FantasyPlayer, Player};

/// One scoring rule: a stat metric and the fantasy points per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRule {
    pub metric: &'static str,
    pub weight: f64,
}

/// Standard points-league weights.
pub const DEFAULT_RULES: [ScoringRule; 3] = [
    ScoringRule { metric: "points", weight: 1.0 },
    ScoringRule { metric: "rebounds", weight: 1.2 },
    ScoringRule { metric: "assists", weight: 1.5 },
];

const FLOOR_FACTOR: f64 = 0.85;
const CEILING_FACTOR: f64 = 1.15;

/// Generates fantasy projections from player statistics.
#[derive(Debug, Clone)]
pub struct FantasyProjector {
    scoring_rules: Vec<ScoringRule>,
}

impl Default for FantasyProjector {
    fn default() -> Self {
        FantasyProjector {
            scoring_rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl FantasyProjector {
    pub fn new(scoring_rules: Vec<ScoringRule>) -> Self {
        FantasyProjector { scoring_rules }
    }

    /// Project every player, sorted by projected points descending.
    ///
    /// A metric missing from a player's stats map simply contributes
    /// nothing; players with no scored metrics project to zero.
    pub fn project(&self, players: Vec<Player>) -> Vec<FantasyPlayer> {
        let mut projections: Vec<FantasyPlayer> = players
            .into_iter()
            .map(|player| {
                let mut projected_points = 0.0;
                let mut average_points = 0.0;
                for rule in &self.scoring_rules {
                    if let Some(value) = player.stats.get(rule.metric) {
                        projected_points += value * rule.weight;
                        average_points += value;
                    }
                }
                FantasyPlayer {
                    floor: projected_points * FLOOR_FACTOR,
                    ceiling: projected_points * CEILING_FACTOR,
                    projected_points,
                    average_points,
                    injury_status: None,
                    player,
                }
            })
            .collect();
        projections.sort_by(|a, b| {
            b.projected_points
                .partial_cmp(&a.projected_points)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        projections
    }
}
