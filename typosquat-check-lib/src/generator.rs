//! Typo variant generation via an OpenAI-compatible completions API.
//!
//! The generator sends a single-turn chat request asking for plausible
//! typo-squatting variants of a domain and splits the response into one
//! candidate per line. No deduplication and no syntactic validation happens
//! here: malformed lines simply fail DNS resolution later.

use crate::error::TypoCheckError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_OUTPUT_TOKENS: u32 = 256;
const TEMPERATURE: f32 = 0.6;

/// Source of typo candidates for a domain.
///
/// The pipeline talks to this trait so tests can substitute a canned
/// generator for the real API client.
#[async_trait]
pub trait TypoSource: Send + Sync {
    /// Produce up to `count` typo variants for `domain`.
    ///
    /// Failures propagate; the pipeline catches them per source domain.
    async fn generate(&self, domain: &str, count: usize) -> Result<Vec<String>, TypoCheckError>;
}

/// Typo generator backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAiGenerator {
    api_key: String,
    model: String,
    client: Client,
    base_url: String,
}

impl OpenAiGenerator {
    /// Create a new generator.
    ///
    /// The timeout bounds the whole completions call, connection included.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TypoCheckError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TypoCheckError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (used to point tests at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn to_api_request(&self, domain: &str, count: usize) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(domain, count),
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[async_trait]
impl TypoSource for OpenAiGenerator {
    async fn generate(&self, domain: &str, count: usize) -> Result<Vec<String>, TypoCheckError> {
        let api_request = self.to_api_request(domain, count);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TypoCheckError::generation_with_status(
                domain,
                error_text,
                status.as_u16(),
            ));
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| {
            TypoCheckError::parse(format!("Failed to parse completions response: {}", e))
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TypoCheckError::generation(domain, "no choices in response"))?;

        let variants = parse_variant_lines(&content);
        debug!(
            "Generated {} typo candidates for {} (requested {})",
            variants.len(),
            domain,
            count
        );
        Ok(variants)
    }
}

/// Build the single-turn instruction for the completions call.
fn build_prompt(domain: &str, count: usize) -> String {
    format!(
        "Generate a list of {} plausible typo-squatting variants for the domain '{}', \
         including common keyboard mistakes, character swaps, missing letters, or substitutions. \
         Only output the raw domain variants, one per line, no commentary.",
        count, domain
    )
}

/// Split generated text into candidates: one per non-blank line, trimmed,
/// in original order.
pub fn parse_variant_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// Completions API wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant_lines_trims_and_drops_blanks() {
        let content = "typo1.com\n  typo2.com  \n\n   \ntypo3.com\n";
        assert_eq!(
            parse_variant_lines(content),
            vec!["typo1.com", "typo2.com", "typo3.com"]
        );
    }

    #[test]
    fn test_parse_variant_lines_preserves_order_and_duplicates() {
        let content = "a.com\nb.com\na.com";
        assert_eq!(parse_variant_lines(content), vec!["a.com", "b.com", "a.com"]);
    }

    #[test]
    fn test_parse_variant_lines_empty_content() {
        assert!(parse_variant_lines("").is_empty());
        assert!(parse_variant_lines("\n\n  \n").is_empty());
    }

    #[test]
    fn test_build_prompt_names_domain_and_count() {
        let prompt = build_prompt("example.com", 10);
        assert!(prompt.contains("10"));
        assert!(prompt.contains("'example.com'"));
        assert!(prompt.contains("one per line"));
    }

    #[test]
    fn test_api_request_shape() {
        let generator =
            OpenAiGenerator::new("test-key", "gpt-4o", Duration::from_secs(60)).unwrap();
        let request = generator.to_api_request("example.com", 5);

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.max_tokens, MAX_OUTPUT_TOKENS);
        assert_eq!(request.temperature, TEMPERATURE);
    }
}
