use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::Config;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_USER_PROMPT: &str = "Please review my itinerary.";
pub const REVISED_ITINERARY_MARKER: &str = "===REVISED_ITINERARY_JSON===";

pub const SYSTEM_PROMPT: &str = "You are an experienced travel advisor who specialises in Kyushu, Japan \
(Fukuoka, Saga, Nagasaki, Kumamoto, Oita, Miyazaki and Kagoshima). You know its regional transport, \
driving times, opening hours, seasonal events and local food.

The user will send a travel itinerary as JSON together with a request. Review the itinerary and answer \
in Japanese, in Markdown, using exactly these five sections:

1. Overall assessment: a short summary of the plan's strengths and weaknesses.
2. Schedule and travel time: legs that are too tight or too long, and realistic travel times.
3. Spots and ordering: better ordering, missing highlights, or places that are closed on the planned day.
4. Food and local experiences: recommendations that fit the route.
5. Practical tips: reservations, tickets, weather, parking and budget notes.

After the review, output a line containing only the marker ===REVISED_ITINERARY_JSON=== followed by the \
complete revised itinerary as a single JSON code block. The revised JSON must use exactly the same schema \
as the input itinerary (same keys and nesting), with your improvements applied, so that it can be loaded \
back into the planner without changes.";

/// Client for the Anthropic Messages API
#[derive(Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ProviderError {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl ReviewClient {
    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.anthropic_base_url.trim_end_matches('/').to_string(),
            api_key: config.anthropic_api_key.clone(),
            model: config.anthropic_model.clone(),
            max_tokens: config.review_max_tokens,
            timeout: config.review_timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model to review `itinerary`, returning its text verbatim
    ///
    /// # Errors
    /// Fails when no API key is configured, when the request fails or times
    /// out, when the provider answers with an error, and when the answer
    /// contains no text.
    pub async fn review(&self, itinerary: &JsonValue, user_prompt: Option<&str>) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("ANTHROPIC_API_KEY is not configured"))?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: user_message(itinerary, user_prompt)?,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .context("Language model request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            bail!("Language model returned {}: {}", status, message);
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("Language model response was not valid JSON")?;

        let text = collect_text(parsed);
        if text.trim().is_empty() {
            bail!("Language model returned no text");
        }

        tracing::debug!("Received review of {} bytes from {}", text.len(), self.model);
        Ok(text)
    }
}

/// User turn: the request followed by the pretty-printed itinerary
pub fn user_message(itinerary: &JsonValue, user_prompt: Option<&str>) -> Result<String> {
    let prompt = user_prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_USER_PROMPT);
    let itinerary = serde_json::to_string_pretty(itinerary).context("Failed to serialize itinerary")?;

    Ok(format!("{}\n\n```json\n{}\n```", prompt, itinerary))
}

fn collect_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("")
}
