//! Authenticated HTTP client for the Yonna Akademia backend.
//!
//! Wraps reqwest::Client with bearer-token injection and transparent
//! recovery from access-token expiry: a 401 response triggers one refresh
//! exchange and one retry of the original request. Recovery happens here so
//! command code never touches the token lifecycle.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

use super::error::ApiError;
use super::request::{ApiRequest, MultipartForm, RequestBody};
use crate::auth::{Session, TokenStore};
use crate::config::Config;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const REFRESH_PATH: &str = "/api/auth/refresh/";

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Why a refresh attempt did not produce a usable access token.
enum RefreshError {
    /// No refresh token stored; recovery is impossible.
    NoRefreshToken,
    /// The exchange was issued and rejected (or failed in transit).
    Exchange(String),
}

/// Authenticated client. Generic over the token store so tests can inject
/// an in-memory session instead of the on-disk config.
pub struct YonnaClient<S: TokenStore = Config> {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session<S>>,
}

impl YonnaClient<Config> {
    /// Load config from disk and build a client against the configured
    /// backend (env `YONNA_API_URL` takes precedence).
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let base_url = std::env::var("YONNA_API_URL")
            .ok()
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::with_session(base_url, Arc::new(Session::new(config))))
    }
}

impl<S: TokenStore> YonnaClient<S> {
    pub fn with_session(base_url: impl Into<String>, session: Arc<Session<S>>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Send a request with the current credentials, recovering from a 401
    /// by refreshing the access token and re-sending exactly once.
    pub async fn send(&self, req: ApiRequest) -> Result<reqwest::Response, ApiError> {
        let token = self.session.access_token();
        let resp = self.dispatch(&req, token.as_deref()).await?;

        if resp.status() != StatusCode::UNAUTHORIZED {
            return check_response(resp).await;
        }

        // Capture the original failure before attempting recovery: if the
        // refresh cannot help, the caller gets this failure, not the
        // refresh endpoint's.
        let original_status = resp.status();
        let original_body = resp.text().await.unwrap_or_default();
        tracing::debug!("401 for {} {}, attempting token refresh", req.method, req.path);

        let new_token = match self.refresh_access_token(token.as_deref()).await {
            Ok(t) => t,
            Err(RefreshError::NoRefreshToken) => {
                tracing::debug!("No refresh token stored, cannot recover");
                return Err(session_expired(original_status, original_body));
            }
            Err(RefreshError::Exchange(reason)) => {
                tracing::warn!("Token refresh failed, clearing session: {}", reason);
                self.session.clear();
                return Err(session_expired(original_status, original_body));
            }
        };

        // Single retry with the fresh token. A second 401 is terminal.
        let retried = self.dispatch(&req, Some(&new_token)).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            let status = retried.status();
            let body = retried.text().await.unwrap_or_default();
            tracing::warn!("Retried request still unauthorized, clearing session");
            self.session.clear();
            return Err(session_expired(status, body));
        }
        check_response(retried).await
    }

    /// Send and deserialize a JSON response body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        resp.json().await.map_err(|e| {
            if e.is_decode() {
                ApiError::Decode(e)
            } else {
                ApiError::Network(e)
            }
        })
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch_json(ApiRequest::get(path)).await
    }

    /// POST a JSON body and deserialize the JSON response.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        self.fetch_json(ApiRequest::post(path).json(body)).await
    }

    /// PATCH a JSON body and deserialize the JSON response.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        self.fetch_json(ApiRequest::patch(path).json(body)).await
    }

    /// DELETE a resource; the response body (if any) is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }

    /// POST a multipart form and deserialize the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.fetch_json(ApiRequest::post(path).multipart(form)).await
    }

    /// Build and transmit one attempt. Pre-send step: bearer injection.
    /// JSON bodies get their content-type from `.json()`; multipart bodies
    /// go through `.multipart()` so the transport computes the boundary —
    /// no explicit content-type override in either case.
    async fn dispatch(
        &self,
        req: &ApiRequest,
        token: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, req.path);
        let mut builder = self.http.request(req.method.clone(), &url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()),
        };
        tracing::debug!("{} {}", req.method, url);
        builder.send().await
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// `stale` is the access token the failed attempt used. The exchange is
    /// single-flight: after acquiring the gate, if the stored token already
    /// differs from `stale`, a concurrent request completed the refresh and
    /// its token is reused. The exchange itself goes directly over the bare
    /// transport, bypassing this gateway, so it can never recurse.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, RefreshError> {
        let _gate = self.session.lock_refresh().await;

        if let Some(current) = self.session.access_token() {
            if stale != Some(current.as_str()) {
                tracing::debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let refresh = self
            .session
            .refresh_token()
            .ok_or(RefreshError::NoRefreshToken)?;

        tracing::info!("Access token rejected, exchanging refresh token...");
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, REFRESH_PATH))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| RefreshError::Exchange(format!("{e:#}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RefreshError::Exchange(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: RefreshResponse = resp
            .json()
            .await
            .map_err(|e| RefreshError::Exchange(format!("{e:#}")))?;

        self.session.store_access_token(parsed.access.clone());
        tracing::info!("Access token refreshed");
        Ok(parsed.access)
    }
}

fn session_expired(status: StatusCode, body: String) -> ApiError {
    ApiError::SessionExpired {
        status: status.as_u16(),
        message: if body.is_empty() {
            "authentication failed".to_string()
        } else {
            body
        },
    }
}

/// Post-receive step: pass 2xx through, classify everything else.
/// 401s never reach here; `send` handles them before classification.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::MultipartForm;
    use crate::auth::MemoryTokenStore;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_with_tokens(
        base_url: &str,
        access: Option<&str>,
        refresh: Option<&str>,
    ) -> YonnaClient<MemoryTokenStore> {
        let store = MemoryTokenStore::new(
            access.map(String::from),
            refresh.map(String::from),
        );
        YonnaClient::with_session(base_url, Arc::new(Session::new(store)))
    }

    #[tokio::test]
    async fn attaches_stored_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let resp = client
            .send(ApiRequest::get("/api/auth/profile/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[tokio::test]
    async fn requests_without_token_carry_no_auth_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": "A1", "refresh": "R1"
            })))
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), None, None);
        let resp = client
            .send(ApiRequest::post("/api/auth/login/").json(json!({"email": "a", "password": "b"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let received = server.received_requests().await.unwrap();
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn multipart_body_is_not_sent_as_json() {
        let server = MockServer::start().await;
        // The matcher only accepts a real multipart content-type with a
        // transport-computed boundary; a forced application/json header
        // would miss it and fail the expectation.
        Mock::given(method("POST"))
            .and(path("/api/media/media/"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 9, "title": "x"})))
            .expect(1)
            .mount(&server)
            .await;

        let form = MultipartForm::new()
            .text("title", "Jayeechi")
            .file("file", "song.mp3", "audio/mpeg", vec![0xff, 0xfb]);

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let resp = client
            .send(ApiRequest::post("/api/media/media/").multipart(form))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    #[tokio::test]
    async fn refreshes_once_and_retries_with_new_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "Token is invalid or expired"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh/"))
            .and(body_json(json!({"refresh": "R1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "email": "ana@yonna.co"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let body: serde_json::Value = client
            .fetch_json(ApiRequest::get("/api/auth/profile/"))
            .await
            .unwrap();

        // The caller sees the retried 200 transparently.
        assert_eq!(body["email"], "ana@yonna.co");
        // New access token persisted; refresh token untouched.
        assert_eq!(client.session().access_token().as_deref(), Some("A2"));
        assert_eq!(client.session().refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn second_401_after_retry_is_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let err = client
            .send(ApiRequest::get("/api/auth/profile/"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SessionExpired { status: 401, .. }));
        // The session is unusable after a rejected retry.
        assert!(client.session().access_token().is_none());
        assert!(client.session().refresh_token().is_none());
    }

    #[tokio::test]
    async fn missing_refresh_token_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me/"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        // Zero refresh calls allowed.
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), None);
        let err = client
            .send(ApiRequest::get("/api/auth/me/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::SessionExpired { status: 401, .. }));
    }

    #[tokio::test]
    async fn failed_refresh_clears_tokens_and_returns_original_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/profile/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "original failure"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "detail": "refresh token expired"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let err = client
            .send(ApiRequest::get("/api/auth/profile/"))
            .await
            .unwrap_err();

        // The caller gets the original request's 401, not the refresh call's.
        match err {
            ApiError::SessionExpired { status, message } => {
                assert_eq!(status, 401);
                assert!(message.contains("original failure"));
            }
            other => panic!("expected SessionExpired, got {other:?}"),
        }
        assert!(client.session().access_token().is_none());
        assert!(client.session().refresh_token().is_none());
    }

    #[tokio::test]
    async fn concurrent_401s_share_one_refresh() {
        let server = MockServer::start().await;
        for p in ["/api/media/media/", "/api/auth/users/"] {
            Mock::given(method("GET"))
                .and(path(p))
                .and(header("authorization", "Bearer A1"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path(p))
                .and(header("authorization", "Bearer A2"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/api/auth/refresh/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "A2"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = std::sync::Arc::new(client_with_tokens(&server.uri(), Some("A1"), Some("R1")));
        let a = {
            let client = client.clone();
            tokio::spawn(async move { client.send(ApiRequest::get("/api/media/media/")).await })
        };
        let b = {
            let client = client.clone();
            tokio::spawn(async move { client.send(ApiRequest::get("/api/auth/users/")).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert_eq!(a.unwrap().status(), 200);
        assert_eq!(b.unwrap().status(), 200);
        assert_eq!(client.session().access_token().as_deref(), Some("A2"));
    }

    #[tokio::test]
    async fn sequential_sends_are_independent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media/media/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        for _ in 0..2 {
            let resp = client
                .send(ApiRequest::get("/api/media/media/"))
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
        }
        assert_eq!(client.session().access_token().as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn validation_errors_pass_through_without_token_changes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/media/media/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "title: This field is required."
            })))
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let err = client
            .send(ApiRequest::post("/api/media/media/").json(json!({})))
            .await
            .unwrap_err();

        match err {
            ApiError::Validation { status, detail } => {
                assert_eq!(status, 400);
                assert!(detail.contains("required"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(client.session().access_token().as_deref(), Some("A1"));
        assert_eq!(client.session().refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn server_errors_are_classified_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media/statistics/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let err = client
            .send(ApiRequest::get("/api/media/statistics/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn paginated_list_envelopes_are_accepted() {
        use crate::models::{ListResponse, MediaItem};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media/media/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 42,
                "next": "http://x/api/media/media/?page=2",
                "previous": null,
                "results": [
                    {"id": 1, "title": "Jayeechi"},
                    {"id": 2, "title": "Relato"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let items = client
            .get_json::<ListResponse<MediaItem>>("/api/media/media/")
            .await
            .unwrap()
            .into_results();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Jayeechi");
    }

    #[tokio::test]
    async fn bare_array_lists_still_decode() {
        use crate::models::{ListResponse, MediaItem};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/users/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "title": "x"}])),
            )
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let items = client
            .get_json::<ListResponse<MediaItem>>("/api/auth/users/")
            .await
            .unwrap()
            .into_results();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        use crate::models::MediaItem;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media/media/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let err = client
            .get_json::<MediaItem>("/api/media/media/1/")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn per_verb_helpers_use_the_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quizzes/attempt/"))
            .and(header("authorization", "Bearer A1"))
            .and(body_json(json!({"quiz": 3, "score": 80})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/media/media/9/"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), Some("R1"));
        let created: serde_json::Value = client
            .post_json("/api/quizzes/attempt/", json!({"quiz": 3, "score": 80}))
            .await
            .unwrap();
        assert_eq!(created["id"], 1);
        client.delete("/api/media/media/9/").await.unwrap();
    }

    #[tokio::test]
    async fn query_parameters_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media/media/"))
            .and(wiremock::matchers::query_param("media_type", "audio"))
            .and(wiremock::matchers::query_param("search", "jayeechi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_tokens(&server.uri(), Some("A1"), None);
        let resp = client
            .send(
                ApiRequest::get("/api/media/media/")
                    .query("media_type", "audio")
                    .query("search", "jayeechi"),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
}
