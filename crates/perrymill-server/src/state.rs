use std::sync::Arc;

use perrymill_core::ai::{NarrativeProvider, OpenAiNarrator};
use perrymill_core::feed::FeedService;
use perrymill_core::{AppConfig, Result};

/// Shared application state: configuration, the stateless feed service, and
/// an optional narrative provider (absent when no API key is configured).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub feed_service: Arc<FeedService>,
    pub narrator: Option<Arc<dyn NarrativeProvider>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let feed_service = Arc::new(FeedService::new(&config)?);

        let narrator: Option<Arc<dyn NarrativeProvider>> = if config.has_openai_key() {
            Some(Arc::new(OpenAiNarrator::new(&config.ai)?))
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            feed_service,
            narrator,
        })
    }

    /// Replace the narrative provider (used by tests to stub the upstream)
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeProvider>) -> Self {
        self.narrator = Some(narrator);
        self
    }
}
