use clap::Parser;

use crate::analytics::prediction::DEFAULT_HOME_ADVANTAGE;

/// StatTracker sports-analytics dashboard server
#[derive(Parser, Debug, Clone)]
#[command(name = "stattracker", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// TheSportsDB API key ("3" is the public free-tier key)
    #[arg(long, env = "SPORTSDB_API_KEY")]
    pub sportsdb_api_key: Option<String>,

    /// TheSportsDB base URL (overridable for testing against a stub)
    #[arg(long, env = "SPORTSDB_BASE_URL")]
    pub sportsdb_base_url: Option<String>,

    /// Timeout for outbound HTTP requests, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,

    /// Home-field advantage in points used by the prediction models
    #[arg(long, env = "HOME_ADVANTAGE", default_value_t = DEFAULT_HOME_ADVANTAGE)]
    pub home_advantage: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        if !(0.0..=25.0).contains(&self.home_advantage) {
            anyhow::bail!("home_advantage must be between 0.0 and 25.0 points");
        }
        if let Some(base_url) = &self.sportsdb_base_url {
            url::Url::parse(base_url)
                .map_err(|e| anyhow::anyhow!("sportsdb_base_url is not a valid URL: {e}"))?;
        }
        self.listen_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| anyhow::anyhow!("listen_addr is not a valid socket address: {e}"))?;
        Ok(())
    }
}
