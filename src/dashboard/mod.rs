pub mod views;

pub use views::Panel;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::analytics::AnalyticsService;
use crate::models::{find_sport, Sport};
use views::{active_panel, render_dashboard, render_home};

#[derive(Clone)]
pub struct AppState {
    pub service: AnalyticsService,
}

/// Build the Axum router for the dashboard pages and the REST surface.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/dashboard/:sport", get(dashboard_handler))
        .route("/health", get(health_handler))
        .route("/api/games/:sport", get(games_handler))
        .route("/api/teams/:sport/:team_id", get(team_handler))
        .route("/api/players/:sport/:player_id", get(player_handler))
        .route("/api/fantasy/:sport/projections", get(fantasy_handler))
        .route("/api/predictions/:sport/:game_id", get(prediction_handler))
        .route("/api/spreads/:sport", get(spreads_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

type ApiError = (StatusCode, String);

/// Resolve a URL sport segment against the catalog.
fn sport_or_404(id: &str) -> Result<&'static Sport, ApiError> {
    find_sport(id).ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown sport: {id}")))
}

/// Upstream provider failures surface as 502, like any other bad gateway.
fn upstream_error(e: anyhow::Error) -> ApiError {
    (StatusCode::BAD_GATEWAY, e.to_string())
}

async fn home_handler() -> impl IntoResponse {
    Html(render_home())
}

async fn dashboard_handler(
    Path(sport): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let panel = active_panel(params.get("tab").map(String::as_str));
    Html(render_dashboard(&sport, panel))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/games/{sport}
async fn games_handler(
    State(state): State<Arc<AppState>>,
    Path(sport): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sport = sport_or_404(&sport)?;
    state
        .service
        .games(sport.league_id)
        .await
        .map(Json)
        .map_err(upstream_error)
}

/// GET /api/teams/{sport}/{teamId}
async fn team_handler(
    State(state): State<Arc<AppState>>,
    Path((sport, team_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    sport_or_404(&sport)?;
    let team = state
        .service
        .team(&team_id)
        .await
        .map_err(upstream_error)?;
    match team {
        Some(team) => Ok(Json(team)),
        None => Err((StatusCode::NOT_FOUND, format!("unknown team: {team_id}"))),
    }
}

/// GET /api/players/{sport}/{playerId}
async fn player_handler(
    State(state): State<Arc<AppState>>,
    Path((sport, player_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    sport_or_404(&sport)?;
    let player = state
        .service
        .player(&player_id)
        .await
        .map_err(upstream_error)?;
    match player {
        Some(player) => Ok(Json(player)),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("unknown player: {player_id}"),
        )),
    }
}

#[derive(Debug, Deserialize)]
struct FantasyQuery {
    /// Comma-separated player ids
    players: Option<String>,
}

/// GET /api/fantasy/{sport}/projections?players=id1,id2
async fn fantasy_handler(
    State(state): State<Arc<AppState>>,
    Path(sport): Path<String>,
    Query(query): Query<FantasyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    sport_or_404(&sport)?;
    let player_ids: Vec<String> = query
        .players
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if player_ids.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "players cannot be empty".to_string(),
        ));
    }
    state
        .service
        .fantasy_projections(&player_ids)
        .await
        .map(Json)
        .map_err(upstream_error)
}

/// GET /api/predictions/{sport}/{gameId}
async fn prediction_handler(
    State(state): State<Arc<AppState>>,
    Path((sport, game_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    sport_or_404(&sport)?;
    let prediction = state
        .service
        .prediction(&game_id)
        .await
        .map_err(upstream_error)?;
    match prediction {
        Some(prediction) => Ok(Json(prediction)),
        None => Err((StatusCode::NOT_FOUND, format!("unknown game: {game_id}"))),
    }
}

/// GET /api/spreads/{sport}
async fn spreads_handler(
    State(state): State<Arc<AppState>>,
    Path(sport): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sport = sport_or_404(&sport)?;
    state
        .service
        .spreads(sport.league_id)
        .await
        .map(Json)
        .map_err(upstream_error)
}
