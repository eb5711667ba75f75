use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::SportsDataProvider;
use crate::models::{Event, GameStatus, Odds, Player, Team};

/// Cache lifetimes per data class. Team and player records move slowly,
/// events and odds do not.
const TEAM_TTL: Duration = Duration::from_secs(3600);
const PLAYER_TTL: Duration = Duration::from_secs(3600);
const EVENT_TTL: Duration = Duration::from_secs(600);
const ODDS_TTL: Duration = Duration::from_secs(300);

/// Sports-data provider backed by TheSportsDB v1 free API.
/// Docs: <https://www.thesportsdb.com/api.php>
pub struct TheSportsDb {
    http: Client,
    api_key: String,
    /// Base URL for overriding in tests
    base_url: String,
    /// In-memory response cache: full request URL → (fetched-at, body)
    cache: Mutex<HashMap<String, (Instant, serde_json::Value)>>,
}

impl TheSportsDb {
    pub fn new(api_key: Option<&str>, base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(TheSportsDb {
            http,
            // "3" is TheSportsDB's public free-tier key; replace with a paid key for higher limits
            api_key: api_key.unwrap_or("3").to_string(),
            base_url: base_url
                .unwrap_or("https://www.thesportsdb.com/api/v1/json")
                .to_string(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, self.api_key, path);
        Url::parse_with_params(&url, params).with_context(|| format!("Invalid URL: {url}"))
    }

    /// GET a JSON body, honoring the per-URL TTL cache. A 404 maps to an
    /// empty object so missing records read as "no results", not errors.
    async fn get_json(&self, url: Url, ttl: Duration) -> Result<serde_json::Value> {
        let key = url.to_string();
        {
            let cache = self.cache.lock().await;
            if let Some((fetched_at, body)) = cache.get(&key) {
                if fetched_at.elapsed() < ttl {
                    return Ok(body.clone());
                }
            }
        }

        debug!("Fetching {}", key);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("TheSportsDB request failed")?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            warn!("TheSportsDB 404 for {}", key);
            return Ok(serde_json::json!({}));
        }
        if !resp.status().is_success() {
            anyhow::bail!("TheSportsDB error: {}", resp.status());
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .context("Failed to parse TheSportsDB response")?;

        let mut cache = self.cache.lock().await;
        cache.retain(|_, (fetched_at, _)| fetched_at.elapsed() < TEAM_TTL);
        cache.insert(key, (Instant::now(), body.clone()));
        Ok(body)
    }
}

#[async_trait]
impl SportsDataProvider for TheSportsDb {
    fn name(&self) -> &str {
        "TheSportsDB"
    }

    async fn get_team(&self, team_id: &str) -> Result<Option<Team>> {
        let url = self.endpoint("lookupteam.php", &[("id", team_id)])?;
        let raw = self.get_json(url, TEAM_TTL).await?;
        Ok(parse_teams(&raw).into_iter().next())
    }

    async fn get_events(&self, league_id: &str) -> Result<Vec<Event>> {
        let next = self.endpoint("eventsnextleague.php", &[("id", league_id)])?;
        let past = self.endpoint("eventspastleague.php", &[("id", league_id)])?;

        let mut events = parse_events(&self.get_json(next, EVENT_TTL).await?);
        // Past events are best-effort: a league with no finished games yet
        // should not fail the whole listing.
        match self.get_json(past, EVENT_TTL).await {
            Ok(raw) => events.extend(parse_events(&raw)),
            Err(e) => warn!("Past-events fetch failed for league {}: {}", league_id, e),
        }
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.event_id.cmp(&b.event_id)));
        events.dedup_by(|a, b| a.event_id == b.event_id);
        Ok(events)
    }

    async fn lookup_event(&self, event_id: &str) -> Result<Option<Event>> {
        let url = self.endpoint("lookupevent.php", &[("id", event_id)])?;
        let raw = self.get_json(url, EVENT_TTL).await?;
        Ok(parse_events(&raw).into_iter().next())
    }

    async fn get_player(&self, player_id: &str) -> Result<Option<Player>> {
        let url = self.endpoint("lookupplayer.php", &[("id", player_id)])?;
        let raw = self.get_json(url, PLAYER_TTL).await?;
        Ok(parse_players(&raw).into_iter().next())
    }

    async fn get_odds(&self, event_id: &str) -> Result<Option<Odds>> {
        let url = self.endpoint("lookupeventodds.php", &[("id", event_id)])?;
        let raw = self.get_json(url, ODDS_TTL).await?;
        Ok(parse_odds(&raw, event_id))
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────
//
// TheSportsDB reports numbers inconsistently: sometimes JSON numbers,
// sometimes quoted strings, sometimes null or "". Every numeric read goes
// through the lenient accessors below.

fn field_str(v: &serde_json::Value, key: &str) -> Option<String> {
    v[key].as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn field_i64(v: &serde_json::Value, key: &str) -> Option<i64> {
    v[key]
        .as_i64()
        .or_else(|| v[key].as_str().and_then(|s| s.trim().parse().ok()))
}

fn field_f64(v: &serde_json::Value, key: &str) -> Option<f64> {
    v[key]
        .as_f64()
        .or_else(|| v[key].as_str().and_then(|s| s.trim().parse().ok()))
}

fn parse_date(v: &serde_json::Value, key: &str) -> NaiveDate {
    v[key]
        .as_str()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| chrono::Utc::now().date_naive())
}

fn parse_teams(raw: &serde_json::Value) -> Vec<Team> {
    let items = match raw["teams"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    items
        .iter()
        .filter_map(|item| {
            let id = field_str(item, "idTeam")?;
            let name = field_str(item, "strTeam")?;
            Some(Team {
                id,
                abbreviation: field_str(item, "strTeamShort").unwrap_or_default(),
                name,
                wins: field_i64(item, "intWins").unwrap_or(0).max(0) as u32,
                losses: field_i64(item, "intLosses").unwrap_or(0).max(0) as u32,
                points_for: field_f64(item, "intPointsFor"),
                points_against: field_f64(item, "intPointsAgainst"),
            })
        })
        .collect()
}

fn parse_events(raw: &serde_json::Value) -> Vec<Event> {
    let items = match raw["events"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    items
        .iter()
        .filter_map(|item| {
            let event_id = field_str(item, "idEvent")?;
            let status = GameStatus::from_provider(
                item["strStatus"].as_str().unwrap_or(""),
            );
            Some(Event {
                event_id,
                league_id: field_str(item, "idLeague"),
                home_team_id: field_str(item, "idHomeTeam").unwrap_or_default(),
                away_team_id: field_str(item, "idAwayTeam").unwrap_or_default(),
                home_team_name: field_str(item, "strHomeTeam"),
                away_team_name: field_str(item, "strAwayTeam"),
                date: parse_date(item, "dateEvent"),
                status,
                home_score: field_i64(item, "intHomeScore").map(|v| v as i32),
                away_score: field_i64(item, "intAwayScore").map(|v| v as i32),
                venue: field_str(item, "strVenue"),
            })
        })
        .collect()
}

fn parse_players(raw: &serde_json::Value) -> Vec<Player> {
    let items = match raw["players"].as_array() {
        Some(a) => a,
        None => return vec![],
    };

    items
        .iter()
        .filter_map(|item| {
            let id = field_str(item, "idPlayer")?;
            let name = field_str(item, "strPlayer")?;
            let mut stats = HashMap::new();
            for (key, metric) in [
                ("strPointsPG", "points"),
                ("strReboundsPG", "rebounds"),
                ("strAssistsPG", "assists"),
            ] {
                if let Some(v) = field_f64(item, key) {
                    stats.insert(metric.to_string(), v);
                }
            }
            Some(Player {
                id,
                name,
                team: field_str(item, "idTeam").unwrap_or_default(),
                position: field_str(item, "strPosition").unwrap_or_default(),
                stats,
            })
        })
        .collect()
}

fn parse_odds(raw: &serde_json::Value, event_id: &str) -> Option<Odds> {
    let market = raw["odds"].as_array()?.first()?;
    Some(Odds {
        event_id: event_id.to_string(),
        home_moneyline: field_f64(market, "homeWinOdds"),
        away_moneyline: field_f64(market, "awayWinOdds"),
        spread: field_f64(market, "pointSpread"),
        total: field_f64(market, "total"),
    })
}
