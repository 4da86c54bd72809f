use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::feed::DEFAULT_FEED_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ai: AiConfig,
    /// Curated feed categories exposed by the API
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedCategory>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            fetch: FetchConfig::default(),
            ai: AiConfig::default(),
            feeds: default_feeds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Feed request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; the analyze endpoint is disabled without one
    #[serde(default)]
    pub openai_api_key: Option<String>,
    /// OpenAI model name
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Sampling temperature for narrative generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_openai_model(),
            temperature: default_temperature(),
        }
    }
}

/// One curated feed category selectable through the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedCategory {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5100
}

fn default_timeout() -> u64 {
    30
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_feeds() -> Vec<FeedCategory> {
    vec![
        FeedCategory {
            slug: "top-stories".to_string(),
            name: "Front Page".to_string(),
            description: "Morning digest of the most relevant headlines.".to_string(),
            url: DEFAULT_FEED_URL.to_string(),
        },
        FeedCategory {
            slug: "business".to_string(),
            name: "Business Ledger".to_string(),
            description: "Market movers, finance news, and boardroom shifts.".to_string(),
            url: "https://rss.feedspot.com/folder/4BnLtF8d5g==/rss/rsscombiner".to_string(),
        },
        FeedCategory {
            slug: "science".to_string(),
            name: "Science Dispatch".to_string(),
            description: "Discoveries across biology, research, and innovation.".to_string(),
            url: "https://rss.feedspot.com/folder/5hnLtWAh7A==/rss/rsscombiner".to_string(),
        },
    ]
}

impl AppConfig {
    /// Load configuration from the default path, or fall back to defaults.
    /// Environment variables (HOST, PORT, OPENAI_API_KEY) win over the file.
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("perrymill")
            .join("config.toml")
    }

    /// Let HOST, PORT, and OPENAI_API_KEY environment variables win over
    /// file values
    pub fn apply_env_overrides(&mut self) {
        if let Some(host) = non_empty_env("HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_env("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(key) = non_empty_env("OPENAI_API_KEY") {
            self.ai.openai_api_key = Some(key);
        }
    }

    /// Look up a curated feed category by slug
    pub fn find_feed(&self, slug: &str) -> Option<&FeedCategory> {
        self.feeds.iter().find(|f| f.slug == slug)
    }

    /// Whether the analyze endpoint has a usable API key
    pub fn has_openai_key(&self) -> bool {
        self.ai
            .openai_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_curated_categories() {
        let config = AppConfig::default();
        assert_eq!(config.feeds.len(), 3);
        assert!(config.find_feed("top-stories").is_some());
        assert!(config.find_feed("business").is_some());
        assert!(config.find_feed("science").is_some());
        assert!(config.find_feed("sports").is_none());
        assert!(!config.has_openai_key());
    }

    #[test]
    fn parses_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [ai]
            openai_api_key = "sk-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.has_openai_key());
        assert_eq!(config.ai.openai_model, "gpt-4o-mini");
        assert_eq!(config.feeds.len(), 3);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut config = AppConfig::default();
        config.ai.openai_api_key = Some("   ".to_string());
        assert!(!config.has_openai_key());
    }
}
