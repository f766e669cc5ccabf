//! API Client: the single point of entry for all calls to the contact backend.
//!
//! ARCHITECTURAL RULE: No other module may talk to the backend directly.
//! `submit_contact` never fails outward: every transport fault is classified
//! into a `SubmissionResult`. Only the startup health check returns an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::contact::ContactField;
use crate::models::contact::{ContactPayload, FailureKind, FieldErrors, SubmissionResult};

pub mod health;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Failed to send message";
pub const ACCEPTED_FALLBACK_MESSAGE: &str = "Message sent successfully";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend URL is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },
}

/// Anything that can deliver a contact submission. The form controller only
/// depends on this, so tests can swap in a scripted backend.
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit_contact(&self, contact: &ContactPayload) -> SubmissionResult;
}

/// HTTP client for the contact backend, rooted at `{BACKEND_URL}/api`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_base: Option<String>,
}

impl ApiClient {
    /// Builds the client. A missing or unusable `backend_url` is not an error
    /// here: it is logged, and every later request fails as a network error.
    pub fn new(backend_url: Option<&str>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: backend_url.and_then(api_base_for),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_base.is_some()
    }

    fn endpoint(&self, path: &str) -> Option<String> {
        self.api_base.as_ref().map(|base| format!("{base}{path}"))
    }

    /// POST /api/contact
    pub async fn submit_contact(&self, contact: &ContactPayload) -> SubmissionResult {
        let Some(url) = self.endpoint("/contact") else {
            warn!("Contact submission failed: backend URL is not configured");
            return network_failure();
        };

        let response = match self.client.post(&url).json(contact).send().await {
            Ok(r) => r,
            Err(e) => return classify_transport_error(e),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return classify_transport_error(e),
        };
        let payload: Option<Value> = serde_json::from_slice(&body).ok();

        if !status.is_success() {
            let (message, errors) = rejection_details(payload.as_ref());
            warn!(
                status = status.as_u16(),
                field_errors = errors.len(),
                "Contact submission rejected: {message}"
            );
            return SubmissionResult::failed(FailureKind::ServerRejection, message, errors);
        }

        let data = payload.unwrap_or(Value::Null);
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(ACCEPTED_FALLBACK_MESSAGE)
            .to_string();

        info!(status = status.as_u16(), "Contact submission accepted");
        SubmissionResult::succeeded(message, data)
    }

    /// GET /api/ reachability probe used at startup. Unlike `submit_contact`
    /// this propagates failures to the caller.
    pub async fn test_connection(&self) -> Result<Value, ApiError> {
        let url = self.endpoint("/").ok_or(ApiError::NotConfigured)?;

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("API connection test failed: {e}");
            ApiError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API connection test returned {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<Value>().await?;
        debug!("API connection test succeeded");
        Ok(payload)
    }
}

#[async_trait]
impl ContactApi for ApiClient {
    async fn submit_contact(&self, contact: &ContactPayload) -> SubmissionResult {
        ApiClient::submit_contact(self, contact).await
    }
}

/// Normalizes a configured base URL into the `/api` root. Only absolute
/// http(s) URLs are usable.
fn api_base_for(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        warn!("BACKEND_URL is empty; contact submissions will fail");
        return None;
    }

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Some(format!("{}/api", raw.trim_end_matches('/')))
        }
        Ok(url) => {
            warn!(
                "BACKEND_URL has unsupported scheme '{}'; contact submissions will fail",
                url.scheme()
            );
            None
        }
        Err(e) => {
            warn!("BACKEND_URL '{raw}' is invalid ({e}); contact submissions will fail");
            None
        }
    }
}

fn network_failure() -> SubmissionResult {
    SubmissionResult::failed(
        FailureKind::NetworkFailure,
        NETWORK_ERROR_MESSAGE,
        FieldErrors::new(),
    )
}

fn unexpected_failure() -> SubmissionResult {
    SubmissionResult::failed(
        FailureKind::UnexpectedClientFailure,
        UNEXPECTED_ERROR_MESSAGE,
        FieldErrors::new(),
    )
}

/// Splits reqwest faults into "no response arrived" and everything else.
fn classify_transport_error(e: reqwest::Error) -> SubmissionResult {
    if e.is_builder() {
        error!("Contact submission error: {e}");
        return unexpected_failure();
    }
    if e.is_timeout() || e.is_connect() || e.is_request() {
        warn!("Contact submission network error: {e}");
        return network_failure();
    }
    error!("Contact submission error: {e}");
    unexpected_failure()
}

/// Extracts the user-facing message and per-field errors from an error body.
///
/// Accepts `{detail: "..", errors: {field: ".."}}` as well as the framework
/// validation shape `{detail: [{loc: [.., field], msg: ".."}]}`.
fn rejection_details(body: Option<&Value>) -> (String, FieldErrors) {
    let detail = body.and_then(|b| b.get("detail"));

    let message = detail
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(REJECTED_FALLBACK_MESSAGE)
        .to_string();

    let mut errors = FieldErrors::new();

    if let Some(Value::Object(map)) = body.and_then(|b| b.get("errors")) {
        for (field, msg) in map {
            if let Some(msg) = msg.as_str() {
                errors.insert(field.clone(), msg.to_string());
            }
        }
    }

    if let Some(Value::Array(entries)) = detail {
        for entry in entries {
            let field = entry
                .get("loc")
                .and_then(Value::as_array)
                .and_then(|loc| loc.last())
                .and_then(Value::as_str)
                .and_then(|f| f.parse::<ContactField>().ok());
            let msg = entry.get("msg").and_then(Value::as_str);
            if let (Some(field), Some(msg)) = (field, msg) {
                errors
                    .entry(field.as_str().to_string())
                    .or_insert_with(|| msg.to_string());
            }
        }
    }

    (message, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn payload() -> ContactPayload {
        ContactPayload {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "hello there!!".to_string(),
        }
    }

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(Some(base), Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap()
    }

    #[test]
    fn test_api_base_normalization() {
        assert_eq!(
            api_base_for("http://localhost:8001/").as_deref(),
            Some("http://localhost:8001/api")
        );
        assert_eq!(
            api_base_for(" https://example.com ").as_deref(),
            Some("https://example.com/api")
        );
        assert_eq!(api_base_for(""), None);
        assert_eq!(api_base_for("not a url"), None);
        assert_eq!(api_base_for("ftp://example.com"), None);
    }

    #[test]
    fn test_rejection_with_detail_and_field_errors() {
        let body = json!({"detail": "bad input", "errors": {"email": "already used"}});
        let (message, errors) = rejection_details(Some(&body));
        assert_eq!(message, "bad input");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "already used");
    }

    #[test]
    fn test_rejection_without_body_uses_fallback() {
        let (message, errors) = rejection_details(None);
        assert_eq!(message, REJECTED_FALLBACK_MESSAGE);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_rejection_with_framework_validation_list() {
        let body = json!({"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "email"], "msg": "second complaint"},
            {"loc": ["body", "message"], "msg": "ensure this value has at least 10 characters"},
            {"loc": ["query", "page"], "msg": "ignored"}
        ]});
        let (message, errors) = rejection_details(Some(&body));
        assert_eq!(message, REJECTED_FALLBACK_MESSAGE);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["email"], "value is not a valid email address");
        assert!(errors["message"].contains("at least 10"));
    }

    #[test]
    fn test_builder_error_is_unexpected() {
        let err = Client::new().get("not a url").build().unwrap_err();
        let result = classify_transport_error(err);
        assert!(!result.success);
        assert_eq!(result.message, UNEXPECTED_ERROR_MESSAGE);
        assert_eq!(result.failure, Some(FailureKind::UnexpectedClientFailure));
    }

    #[tokio::test]
    async fn test_submit_success() {
        let router = Router::new().route(
            "/api/contact",
            post(|Json(body): Json<ContactPayload>| async move {
                assert_eq!(body.email, "ada@example.com");
                Json(json!({"success": true, "message": "Thanks!", "id": "abc"}))
            }),
        );
        let base = spawn_backend(router).await;

        let result = client_for(&base).submit_contact(&payload()).await;
        assert!(result.success);
        assert_eq!(result.message, "Thanks!");
        assert_eq!(result.data.unwrap()["id"], "abc");
        assert!(result.errors.is_empty());
        assert_eq!(result.failure, None);
    }

    #[tokio::test]
    async fn test_submit_success_without_message_field() {
        let router = Router::new().route("/api/contact", post(|| async { Json(json!({})) }));
        let base = spawn_backend(router).await;

        let result = client_for(&base).submit_contact(&payload()).await;
        assert!(result.success);
        assert_eq!(result.message, ACCEPTED_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_submit_server_rejection() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": "bad input", "errors": {"email": "already used"}})),
                )
            }),
        );
        let base = spawn_backend(router).await;

        let result = client_for(&base).submit_contact(&payload()).await;
        assert!(!result.success);
        assert_eq!(result.message, "bad input");
        assert_eq!(result.errors["email"], "already used");
        assert_eq!(result.failure, Some(FailureKind::ServerRejection));
    }

    #[tokio::test]
    async fn test_submit_rate_limited_without_field_errors() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"detail": "Too many requests. Please try again later."})),
                )
            }),
        );
        let base = spawn_backend(router).await;

        let result = client_for(&base).submit_contact(&payload()).await;
        assert!(!result.success);
        assert_eq!(result.message, "Too many requests. Please try again later.");
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_submit_non_json_error_body() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let base = spawn_backend(router).await;

        let result = client_for(&base).submit_contact(&payload()).await;
        assert!(!result.success);
        assert_eq!(result.message, REJECTED_FALLBACK_MESSAGE);
        assert_eq!(result.failure, Some(FailureKind::ServerRejection));
    }

    #[tokio::test]
    async fn test_submit_timeout_is_network_failure() {
        let router = Router::new().route(
            "/api/contact",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"message": "too late"}))
            }),
        );
        let base = spawn_backend(router).await;
        let client = ApiClient::new(Some(&base), Duration::from_millis(200)).unwrap();

        let result = client.submit_contact(&payload()).await;
        assert!(!result.success);
        assert_eq!(
            result.message,
            "Network error. Please check your connection and try again."
        );
        assert!(result.errors.is_empty());
        assert_eq!(result.failure, Some(FailureKind::NetworkFailure));
    }

    #[tokio::test]
    async fn test_submit_connection_refused_is_network_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client_for(&format!("http://{addr}"))
            .submit_contact(&payload())
            .await;
        assert_eq!(result.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(result.failure, Some(FailureKind::NetworkFailure));
    }

    #[tokio::test]
    async fn test_submit_without_backend_url_is_network_failure() {
        let client = ApiClient::new(None, Duration::from_secs(1)).unwrap();
        assert!(!client.is_configured());

        let result = client.submit_contact(&payload()).await;
        assert!(!result.success);
        assert_eq!(result.message, NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_connection_returns_payload() {
        let router = Router::new().route(
            "/api/",
            get(|| async { Json(json!({"message": "Hello World"})) }),
        );
        let base = spawn_backend(router).await;

        let payload = client_for(&base).test_connection().await.unwrap();
        assert_eq!(payload["message"], "Hello World");
    }

    #[tokio::test]
    async fn test_connection_propagates_status_error() {
        let router = Router::new().route(
            "/api/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let base = spawn_backend(router).await;

        match client_for(&base).test_connection().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_without_backend_url() {
        let client = ApiClient::new(None, Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.test_connection().await,
            Err(ApiError::NotConfigured)
        ));
    }
}
