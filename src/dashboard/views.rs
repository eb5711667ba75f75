//! Server-rendered pages: the sport selector and the per-sport dashboard.

use crate::models::SPORTS;

/// One of the four mutually exclusive dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Stats,
    Spread,
    Fantasy,
    Predictions,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Stats, Panel::Spread, Panel::Fantasy, Panel::Predictions];

    pub fn id(self) -> &'static str {
        match self {
            Panel::Stats => "stats",
            Panel::Spread => "spread",
            Panel::Fantasy => "fantasy",
            Panel::Predictions => "predictions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Panel::Stats => "Statistics",
            Panel::Spread => "Point Spread",
            Panel::Fantasy => "Fantasy",
            Panel::Predictions => "Predictions",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Panel::Stats => "📊",
            Panel::Spread => "📈",
            Panel::Fantasy => "🏆",
            Panel::Predictions => "🎯",
        }
    }

    pub fn from_id(id: &str) -> Option<Panel> {
        Panel::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Tab selection: a known id activates that panel, anything else
    /// leaves the current panel unchanged. Selecting the already-active
    /// panel is a no-op.
    pub fn select(self, id: &str) -> Panel {
        Panel::from_id(id).unwrap_or(self)
    }
}

/// Minimal HTML escaping for values interpolated into markup.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --yellow: #ffb020;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  main { max-width: 1100px; margin: 0 auto; padding: 2rem; }
  header.page { text-align: center; margin-bottom: 2.5rem; }
  header.page h1 { font-size: 2.4rem; margin-bottom: .5rem; }
  header.page .tagline { color: var(--muted); font-size: 1.05rem; }
  .sport-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1.2rem; }
  a.sport-card { display: block; background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 1.6rem; text-decoration: none; color: var(--text); transition: border-color .15s, transform .15s; }
  a.sport-card:hover { border-color: var(--accent); transform: translateY(-2px); }
  .sport-card .icon { font-size: 2.6rem; margin-bottom: .6rem; }
  .sport-card h3 { font-size: 1.3rem; margin-bottom: .3rem; }
  .sport-card p { color: var(--muted); font-size: .9rem; }
  .back-link { color: var(--accent); text-decoration: none; font-size: .9rem; }
  .back-link:hover { text-decoration: underline; }
  h1.dash { font-size: 2rem; margin: .8rem 0 .3rem; }
  .subtitle { color: var(--muted); margin-bottom: 1.6rem; }
  nav.tabs { display: flex; flex-wrap: wrap; gap: .3rem; border-bottom: 1px solid var(--border); margin-bottom: 1.4rem; }
  nav.tabs a { padding: .7rem 1.2rem; color: var(--muted); text-decoration: none; border-bottom: 2px solid transparent; }
  nav.tabs a.active { color: var(--accent); border-bottom-color: var(--accent); }
  nav.tabs a:hover { color: var(--text); }
  .panel { display: none; }
  .panel.active { display: block; }
  .card { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.4rem; margin-bottom: 1rem; }
  .card h3 { margin-bottom: 1rem; }
  .item { border-left: 3px solid var(--accent); padding: .5rem 0 .5rem 1rem; margin-bottom: .8rem; }
  .item .label { color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .05em; }
  .item p { margin-top: .2rem; }
  .note { border-left: 3px solid var(--yellow); background: rgba(255,176,32,.07); border-radius: 6px; padding: 1rem 1.2rem; color: var(--muted); font-size: .9rem; }
  .note code { color: var(--text); }
  .features { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1.2rem; margin-top: 3rem; }
  .feature { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.4rem; text-align: center; }
  .feature .icon { font-size: 2rem; margin-bottom: .6rem; }
  .feature p { color: var(--muted); font-size: .9rem; margin-top: .4rem; }
"#;

/// The landing page: pick a sport.
pub fn render_home() -> String {
    let mut cards = String::new();
    for sport in &SPORTS {
        cards.push_str(&format!(
            r#"      <a class="sport-card" href="/dashboard/{id}">
        <div class="icon">{icon}</div>
        <h3>{name}</h3>
        <p>{description}</p>
      </a>
"#,
            id = sport.id,
            icon = sport.icon,
            name = sport.name,
            description = sport.description,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>StatTracker Pro</title>
<style>{STYLE}</style>
</head>
<body>
<main>
  <header class="page">
    <h1>StatTracker Pro</h1>
    <p class="tagline">Advanced Sports Analytics &amp; Predictions</p>
    <p class="tagline">Track statistics, analyze point spreads, optimize fantasy teams, and predict outcomes</p>
  </header>

  <h2 style="text-align:center;margin-bottom:1.4rem;">Select Your Sport</h2>
  <div class="sport-grid">
{cards}  </div>

  <div class="features">
    <div class="feature"><div class="icon">📊</div><h3>Statistics Tracking</h3><p>Real-time player and team statistics from public APIs</p></div>
    <div class="feature"><div class="icon">📈</div><h3>Spread Analysis</h3><p>Point spread predictions from historical data and current form</p></div>
    <div class="feature"><div class="icon">🎯</div><h3>Outcome Predictions</h3><p>Model-driven game predictions with confidence ratings</p></div>
  </div>
</main>
</body>
</html>"#
    )
}

/// The per-sport dashboard with its four panels.
///
/// Any sport id renders; the header uppercases whatever segment was in
/// the URL, matching the catalog-agnostic behavior of the selector.
pub fn render_dashboard(sport_id: &str, active: Panel) -> String {
    let sport_name = escape(&sport_id.to_uppercase());
    let sport_id = escape(sport_id);

    let mut tabs = String::new();
    let mut panels = String::new();
    for panel in Panel::ALL {
        tabs.push_str(&format!(
            r#"    <a href="/dashboard/{sport_id}?tab={id}" data-tab="{id}"{class_attr}>{icon} {title}</a>
"#,
            id = panel.id(),
            icon = panel.icon(),
            title = panel.title(),
            class_attr = if panel == active { r#" class="active""# } else { "" },
        ));
        panels.push_str(&format!(
            r#"  <section class="panel{active_class}" id="panel-{id}">
{content}  </section>
"#,
            active_class = if panel == active { " active" } else { "" },
            id = panel.id(),
            content = panel_content(panel),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{sport_name} Dashboard</title>
<style>{STYLE}</style>
</head>
<body>
<main>
  <a class="back-link" href="/">← Back to Sports</a>
  <h1 class="dash">{sport_name} Dashboard</h1>
  <p class="subtitle">Comprehensive analytics and insights</p>

  <nav class="tabs">
{tabs}  </nav>

{panels}
  <div class="note">
    Live data for this dashboard is served by this process:
    <code>/api/games/{sport_id}</code>, <code>/api/teams/{sport_id}/&lt;teamId&gt;</code>,
    <code>/api/players/{sport_id}/&lt;playerId&gt;</code>, <code>/api/fantasy/{sport_id}/projections</code>,
    <code>/api/predictions/{sport_id}/&lt;gameId&gt;</code>, <code>/api/spreads/{sport_id}</code>.
  </div>
</main>

<script>
// Tab switching without a round-trip. The hrefs stay real so the page
// also works with scripting disabled.
document.querySelectorAll('nav.tabs a').forEach(link => {{
  link.addEventListener('click', e => {{
    e.preventDefault();
    const id = link.dataset.tab;
    if (link.classList.contains('active')) return; // already showing
    document.querySelectorAll('nav.tabs a').forEach(l => l.classList.remove('active'));
    document.querySelectorAll('.panel').forEach(p => p.classList.remove('active'));
    link.classList.add('active');
    document.getElementById('panel-' + id).classList.add('active');
    history.replaceState(null, '', link.href);
  }});
}});
</script>
</body>
</html>"#
    )
}

fn panel_content(panel: Panel) -> &'static str {
    match panel {
        Panel::Stats => {
            r#"    <div class="card">
      <h3>Statistics Dashboard</h3>
      <div class="item"><div class="label">Team Statistics</div><p>Real-time team performance data from public sports APIs</p></div>
      <div class="item"><div class="label">Player Statistics</div><p>Individual player stats, trends, and performance metrics</p></div>
      <div class="item"><div class="label">Season Overview</div><p>Season standings, schedules, and historical data</p></div>
    </div>
"#
        }
        Panel::Spread => {
            r#"    <div class="card">
      <h3>Point Spread Analysis</h3>
      <div class="item"><div class="label">Upcoming Games</div><p>Point spread predictions for upcoming matchups based on historical data and current form</p></div>
      <div class="item"><div class="label">Line Movement</div><p>Track betting line movements and identify value opportunities</p></div>
    </div>
"#
        }
        Panel::Fantasy => {
            r#"    <div class="card">
      <h3>Fantasy Sports Insights</h3>
      <div class="item"><div class="label">🌟 Top Performers</div><p>Players with the highest projected fantasy points this week</p></div>
      <div class="item"><div class="label">⚠️ Injury Reports</div><p>Stay updated on player injuries affecting fantasy value</p></div>
      <div class="item"><div class="label">💎 Sleeper Picks</div><p>Undervalued players with high upside potential</p></div>
    </div>
"#
        }
        Panel::Predictions => {
            r#"    <div class="card">
      <h3>Outcome Predictions</h3>
      <div class="item"><div class="label">Model Predictions</div><p>Statistical models analyze historical data to predict game outcomes</p></div>
      <div class="item"><div class="label">Confidence Scores</div><p>Each prediction includes a confidence rating based on data quality and model accuracy</p></div>
    </div>
"#
        }
    }
}

/// Convenience used by the dashboard handler: resolve the `tab` query
/// parameter against the default panel.
pub fn active_panel(tab: Option<&str>) -> Panel {
    match tab {
        Some(id) => Panel::default().select(id),
        None => Panel::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_panel_is_stats() {
        assert_eq!(Panel::default(), Panel::Stats);
        assert_eq!(active_panel(None), Panel::Stats);
    }

    #[test]
    fn selecting_fantasy_switches_panels() {
        let panel = Panel::default().select("fantasy");
        assert_eq!(panel, Panel::Fantasy);
    }

    #[test]
    fn selecting_active_panel_is_idempotent() {
        for panel in Panel::ALL {
            assert_eq!(panel.select(panel.id()), panel);
        }
    }

    #[test]
    fn selecting_unknown_id_keeps_current_panel() {
        assert_eq!(Panel::Fantasy.select("bogus"), Panel::Fantasy);
        assert_eq!(Panel::default().select(""), Panel::Stats);
    }

    #[test]
    fn panel_ids_round_trip() {
        for panel in Panel::ALL {
            assert_eq!(Panel::from_id(panel.id()), Some(panel));
        }
        assert_eq!(Panel::from_id("nope"), None);
    }

    #[test]
    fn home_links_every_sport_by_exact_id() {
        let html = render_home();
        for sport in &SPORTS {
            let href = format!(r#"href="/dashboard/{}""#, sport.id);
            assert!(html.contains(&href), "missing link for {}", sport.id);
        }
        assert!(html.contains("StatTracker Pro"));
    }

    #[test]
    fn dashboard_header_uppercases_sport_id() {
        let html = render_dashboard("nfl", Panel::default());
        assert!(html.contains("NFL Dashboard"));
    }

    #[test]
    fn dashboard_default_marks_stats_active() {
        let html = render_dashboard("nba", Panel::default());
        assert!(html.contains(r#"<section class="panel active" id="panel-stats">"#));
        assert!(html.contains(r#"<section class="panel" id="panel-fantasy">"#));
    }

    #[test]
    fn dashboard_fantasy_tab_marks_fantasy_active() {
        let html = render_dashboard("nba", active_panel(Some("fantasy")));
        assert!(html.contains(r#"<section class="panel active" id="panel-fantasy">"#));
        assert!(html.contains(r#"<section class="panel" id="panel-stats">"#));
        assert!(html.contains("Fantasy Sports Insights"));
    }

    #[test]
    fn dashboard_escapes_sport_segment() {
        let html = render_dashboard("<script>", Panel::default());
        assert!(!html.contains("<script> Dashboard"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
