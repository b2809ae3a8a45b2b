use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value as JsonValue};

use crate::config::Config;

pub const TEXT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const PHOTO_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

// Results are biased towards Kyushu.
const LANGUAGE: &str = "ja";
const COUNTRY_COMPONENTS: &str = "country:jp";
const BIAS_LOCATION: &str = "33.25,130.1";
const BIAS_RADIUS_M: &str = "80000";
const DETAILS_FIELDS: &str = "name,geometry,formatted_phone_number,rating,formatted_address";

/// Thin client for the Google Places web service
///
/// Responses are relayed as-is, including error payloads returned with a
/// non-2xx status. Without an API key every lookup short-circuits to an empty
/// result and no request is sent.
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlacesClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, config.places_base_url.clone(), config.google_api_key.clone())
    }

    /// Autocomplete predictions for `input`, or `{"predictions": []}`
    pub async fn autocomplete(&self, input: &str) -> Result<JsonValue> {
        let Some(key) = self.key_for(input) else {
            return Ok(json!({ "predictions": [] }));
        };

        self.get_json(
            "autocomplete/json",
            &[
                ("input", input),
                ("key", key),
                ("language", LANGUAGE),
                ("components", COUNTRY_COMPONENTS),
                ("location", BIAS_LOCATION),
                ("radius", BIAS_RADIUS_M),
            ],
        )
        .await
        .context("Places autocomplete request failed")
    }

    /// Details for `place_id`, or `{"result": {}}`
    pub async fn details(&self, place_id: &str) -> Result<JsonValue> {
        let Some(key) = self.key_for(place_id) else {
            return Ok(json!({ "result": {} }));
        };

        self.get_json(
            "details/json",
            &[
                ("place_id", place_id),
                ("key", key),
                ("language", LANGUAGE),
                ("fields", DETAILS_FIELDS),
            ],
        )
        .await
        .context("Places details request failed")
    }

    /// Fetch a photo by reference, or `None` when there is nothing to fetch
    ///
    /// The response is returned unread so the caller can stream the body.
    pub async fn photo(&self, reference: &str, width: u32) -> Result<Option<reqwest::Response>> {
        let Some(key) = self.key_for(reference) else {
            return Ok(None);
        };
        let width = width.to_string();

        let response = self
            .http
            .get(format!("{}/photo", self.base_url))
            .query(&[
                ("maxwidth", width.as_str()),
                ("photo_reference", reference),
                ("key", key),
            ])
            .timeout(PHOTO_TIMEOUT)
            .send()
            .await
            .context("Places photo request failed")?;

        tracing::debug!("Places photo responded with {}", response.status());
        Ok(Some(response))
    }

    fn key_for(&self, query: &str) -> Option<&str> {
        if query.is_empty() {
            return None;
        }
        self.api_key.as_deref()
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<JsonValue> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .query(params)
            .timeout(TEXT_QUERY_TIMEOUT)
            .send()
            .await?;

        tracing::debug!("Places {} responded with {}", path, response.status());
        let body = response
            .json::<JsonValue>()
            .await
            .context("Places response was not valid JSON")?;
        Ok(body)
    }
}
