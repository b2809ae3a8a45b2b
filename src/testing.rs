use std::sync::Arc;

use axum::Router;

use crate::config::Config;
use crate::state::AppState;
use crate::store::KvStore;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream stub");
    let addr = listener.local_addr().expect("Failed to read stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Upstream stub crashed");
    });

    format!("http://{}", addr)
}

/// Config with nothing configured and every provider pointed at a closed port
pub fn bare_config() -> Config {
    let mut config = Config::from_vars(|_| None).expect("Default config must parse");
    config.places_base_url = "http://127.0.0.1:1".to_string();
    config.anthropic_base_url = "http://127.0.0.1:1".to_string();
    config
}

pub fn state_with(config: Config, store: Option<KvStore>) -> AppState {
    AppState::new(Arc::new(config), store).expect("Failed to build test state")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
