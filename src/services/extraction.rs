//! Extraction collaborator client
//!
//! Talks to a chat-completion style endpoint (BotHub's OpenAI-compatible
//! API) for:
//! - Candidate term extraction from free-form sentences
//! - Study recommendations for a set of resolved terms
//! - Structured parsing of natural-language catalog commands
//!
//! The client reports transport and payload-shape failures as errors;
//! degrading a failed extraction to "zero candidates" is the resolution
//! engine's decision, not this module's.

use crate::error::{LexigraphError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Default chat-completions endpoint (BotHub, OpenAI-compatible)
const DEFAULT_API_URL: &str = "https://bothub.chat/api/v2/openai/v1/chat/completions";

/// Configuration for the extraction collaborator
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Bearer token for the endpoint
    pub api_key: String,

    /// Chat-completions URL
    pub api_url: String,

    /// Model to use
    pub model: String,

    /// Max tokens for responses
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("BOTHUB_API_KEY").unwrap_or_default(),
            api_url: env::var("BOTHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: "gpt-4".to_string(),
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

/// Source of candidate term strings for a sentence
///
/// The engine depends on this seam rather than on the concrete client so
/// tests can script responses and failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TermExtractor: Send + Sync {
    /// Return the collaborator's raw response blob for a sentence.
    /// The blob is interpreted downstream by the candidate normalizer.
    async fn extract_terms(&self, sentence: &str) -> Result<String>;
}

/// Chat-completions API message format
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions API response format
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Structured catalog command extracted from a teacher's natural-language
/// request (e.g. "Свяжи термины Квант и Условие как часть")
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCommand {
    /// One of create_term, delete_term, edit_definition, create_link
    pub action: Option<String>,
    pub term_name: Option<String>,
    pub term2_name: Option<String>,
    pub definition: Option<String>,
    pub discipline: Option<String>,
    pub course: Option<String>,
    pub specialty: Option<String>,
    pub link_type: Option<String>,
}

/// Extraction collaborator client
pub struct ExtractionService {
    config: ExtractionConfig,
    client: reqwest::Client,
}

impl ExtractionService {
    /// Create a new extraction service with custom config
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LexigraphError::Config(config::ConfigError::Message(
                "BOTHUB_API_KEY not set".to_string(),
            )));
        }

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self> {
        Self::new(ExtractionConfig::default())
    }

    /// Ask the collaborator which full catalog terms the given set of
    /// resolved term names suggests studying next. Free-text passthrough.
    pub async fn recommendations(&self, terms: &[String]) -> Result<String> {
        debug!("Requesting recommendations for {} terms", terms.len());

        let prompt = format!("Рекомендации для терминов {}", terms.join(", "));
        self.call_api(None, &prompt, 150).await
    }

    /// Parse a teacher's natural-language catalog command into structured
    /// parameters. Unlike candidate extraction this path has no degraded
    /// fallback: malformed model output is an error.
    pub async fn parse_command(&self, text: &str) -> Result<CatalogCommand> {
        debug!("Parsing catalog command");

        let system = "Ты - помощник для извлечения параметров из запросов преподавателей. \
                      Возвращай только JSON с параметрами.";
        let prompt = format!(
            r#"Извлеки из запроса преподавателя следующие параметры:
1. Действие (create_term, delete_term, edit_definition, create_link)
2. Название термина(ов)
3. Определение (если есть)
4. Дисциплина (если есть)
5. Курс (если есть)
6. Специальность (если есть)
7. Тип связи (если есть)

Запрос преподавателя: {}

Верни JSON с полями action, term_name, term2_name, definition, discipline, course, specialty, link_type.
Если какой-то параметр не найден, верни для него null."#,
            text
        );

        let response = self.call_api(Some(system), &prompt, 150).await?;

        serde_json::from_str(response.trim()).map_err(|e| {
            LexigraphError::Extraction(format!("Malformed command parameters: {}", e))
        })
    }

    /// Make an API call to the chat-completions endpoint
    async fn call_api(
        &self,
        system: Option<&str>,
        prompt: &str,
        max_tokens: usize,
    ) -> Result<String> {
        debug!("Calling extraction API at {}", self.config.api_url);

        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(LexigraphError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LexigraphError::Extraction(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LexigraphError::Extraction(format!("Failed to parse response: {}", e)))?;

        api_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| LexigraphError::Extraction("Empty response from API".to_string()))
    }
}

#[async_trait]
impl TermExtractor for ExtractionService {
    async fn extract_terms(&self, sentence: &str) -> Result<String> {
        debug!("Extracting candidate terms");

        // The sentence may carry truncated or misspelled fragments; the
        // collaborator is asked for the full terms it believes were meant.
        let prompt = format!(
            "В предложении могут встречаться неполные или обрезанные термины \
             (например, 'алгорит', 'цикл', 'отор'). \
             Определи, какие полные термины имелись в виду, и верни их в виде \
             списка через запятую, без пояснений. Не более 40 слов. \
             Предложение: {}",
            sentence
        );

        self.call_api(None, &prompt, self.config.max_tokens).await
    }
}
