use serde::Deserialize;

pub const DEFAULT_CLEARBIT_BASE_URL: &str = "https://company-stream.clearbit.com";
pub const DEFAULT_HUNTER_BASE_URL: &str = "https://api.hunter.io";
pub const DEFAULT_BUILTWITH_BASE_URL: &str = "https://api.builtwith.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub clearbit_api_key: Option<String>,
    pub hunter_api_key: Option<String>,
    pub builtwith_api_key: Option<String>,
    pub clearbit_base_url: String,
    pub hunter_base_url: String,
    pub builtwith_base_url: String,
    pub http_timeout_secs: u64,
    pub batch_delay_ms: u64,
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            clearbit_api_key: None,
            hunter_api_key: None,
            builtwith_api_key: None,
            clearbit_base_url: DEFAULT_CLEARBIT_BASE_URL.to_string(),
            hunter_base_url: DEFAULT_HUNTER_BASE_URL.to_string(),
            builtwith_base_url: DEFAULT_BUILTWITH_BASE_URL.to_string(),
            http_timeout_secs: 30,
            batch_delay_ms: 300,
            cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Loads configuration from the environment (and `.env` when present).
    ///
    /// Every variable is optional. Without API keys the enrichment adapter
    /// serves deterministic mock data.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: parse_number("PORT", defaults.port)?,
            clearbit_api_key: optional_key("CLEARBIT_API_KEY"),
            hunter_api_key: optional_key("HUNTER_API_KEY"),
            builtwith_api_key: optional_key("BUILTWITH_API_KEY"),
            clearbit_base_url: base_url("CLEARBIT_BASE_URL", DEFAULT_CLEARBIT_BASE_URL)?,
            hunter_base_url: base_url("HUNTER_BASE_URL", DEFAULT_HUNTER_BASE_URL)?,
            builtwith_base_url: base_url("BUILTWITH_BASE_URL", DEFAULT_BUILTWITH_BASE_URL)?,
            http_timeout_secs: parse_number("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
                    }
                    Ok(secs)
                })?,
            batch_delay_ms: parse_number("ENRICHMENT_BATCH_DELAY_MS", defaults.batch_delay_ms)?,
            cache_ttl_secs: parse_number("ENRICHMENT_CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
        };

        // Log which providers are live (without key values)
        tracing::info!(
            "Enrichment providers - clearbit: {}, hunter: {}, builtwith: {}",
            provider_mode(&config.clearbit_api_key),
            provider_mode(&config.hunter_api_key),
            provider_mode(&config.builtwith_api_key)
        );
        tracing::debug!("Clearbit Base URL: {}", config.clearbit_base_url);
        tracing::debug!("Hunter Base URL: {}", config.hunter_base_url);
        tracing::debug!("BuiltWith Base URL: {}", config.builtwith_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn optional_key(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn base_url(name: &str, default: &str) -> anyhow::Result<String> {
    let url = std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string());

    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(url.trim_end_matches('/').to_string())
}

fn parse_number<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number", name)),
        _ => Ok(default),
    }
}

fn provider_mode(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "live"
    } else {
        "mock"
    }
}
