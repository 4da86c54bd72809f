use async_openai::{
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::narrator::{build_prompt, Narrative, NarrativeProvider, NarrativeUsage};
use crate::config::AiConfig;
use crate::feed::FeedResult;
use crate::{Error, Result};

const SYSTEM_PROMPT: &str = "You are a seasoned news editor.";

/// OpenAI-backed narrative provider
#[derive(Debug)]
pub struct OpenAiNarrator {
    client: Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAiNarrator {
    /// Build from AI configuration; requires a non-blank API key
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key not configured".to_string()))?;

        let openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait::async_trait]
impl NarrativeProvider for OpenAiNarrator {
    async fn narrate(&self, feed: &FeedResult) -> Result<Narrative> {
        let prompt = build_prompt(feed);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(vec![
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(SYSTEM_PROMPT)
                        .build()
                        .map_err(|e| Error::AiProvider(e.to_string()))?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(prompt)
                        .build()
                        .map_err(|e| Error::AiProvider(e.to_string()))?,
                ),
            ])
            .build()
            .map_err(|e| Error::AiProvider(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| Error::AiProvider(format!("Failed to contact OpenAI: {e}")))?;

        let narrative = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if narrative.is_empty() {
            return Err(Error::AiProvider(
                "OpenAI returned an empty response.".to_string(),
            ));
        }

        let usage = response
            .usage
            .map(|usage| NarrativeUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            })
            .unwrap_or_default();

        Ok(Narrative { narrative, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_config_error() {
        let config = AiConfig::default();
        let err = OpenAiNarrator::new(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn blank_key_is_rejected() {
        let config = AiConfig {
            openai_api_key: Some("  ".to_string()),
            ..AiConfig::default()
        };
        assert!(OpenAiNarrator::new(&config).is_err());
    }
}
