use crate::config::Config;
use crate::places::PlacesClient;
use crate::review::ReviewClient;
use crate::store::KvStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when no `DATABASE_URL` is configured
    pub store: Option<KvStore>,
    pub places: PlacesClient,
    pub reviewer: ReviewClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>, store: Option<KvStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            store,
            places: PlacesClient::from_config(http.clone(), &config),
            reviewer: ReviewClient::from_config(http, &config),
            config,
        })
    }
}
