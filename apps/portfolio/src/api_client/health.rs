use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::api_client::ApiClient;

/// Outcome of the startup reachability probe, shown as a banner on the page.
#[derive(Debug, Clone)]
pub struct BackendStatus {
    pub reachable: bool,
    pub payload: Option<Value>,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl BackendStatus {
    /// Short text for the status banner.
    pub fn summary(&self) -> String {
        if self.reachable {
            match self
                .payload
                .as_ref()
                .and_then(|p| p.get("message"))
                .and_then(Value::as_str)
            {
                Some(message) => format!("Backend connected: {message}"),
                None => "Backend connected".to_string(),
            }
        } else {
            "Backend unavailable. The contact form may not work right now.".to_string()
        }
    }
}

/// Runs `test_connection` once and records the result. Never fails: an
/// unreachable backend must not keep the site from starting.
pub async fn check_backend(client: &ApiClient) -> BackendStatus {
    let checked_at = Utc::now();
    match client.test_connection().await {
        Ok(payload) => {
            info!("Backend reachable");
            BackendStatus {
                reachable: true,
                payload: Some(payload),
                error: None,
                checked_at,
            }
        }
        Err(e) => {
            warn!("Backend health check failed: {e}");
            BackendStatus {
                reachable: false,
                payload: None,
                error: Some(e.to_string()),
                checked_at,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_check_backend_reachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route(
            "/api/",
            get(|| async { Json(json!({"message": "Hello World"})) }),
        );
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client =
            ApiClient::new(Some(&format!("http://{addr}")), Duration::from_secs(5)).unwrap();
        let status = check_backend(&client).await;
        assert!(status.reachable);
        assert_eq!(status.summary(), "Backend connected: Hello World");
        assert!(status.error.is_none());
    }

    #[tokio::test]
    async fn test_check_backend_unconfigured() {
        let client = ApiClient::new(None, Duration::from_secs(1)).unwrap();
        let status = check_backend(&client).await;
        assert!(!status.reachable);
        assert_eq!(status.error.as_deref(), Some("Backend URL is not configured"));
        assert!(status.summary().starts_with("Backend unavailable"));
    }
}
