//! HTTP client wrapper shared by every resource client.
//!
//! Every call carries `Content-Type: application/json`, the bearer token from
//! the session (when there is one) and the `reqRole` navigation header;
//! per-request headers are applied last and win. Responses are unwrapped from
//! the `{ success, data, meta }` envelope.

use chrono::FixedOffset;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::config::local_offset;
use crate::error::ApiError;
use crate::navigation::NavigationState;
use crate::session_store::SessionStore;

pub const REQ_ROLE_HEADER: &str = "reqrole";

/// Unwrapped response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub meta: Option<Map<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            data: f(self.data),
            meta: self.meta,
        }
    }
}

/// One API call: method, path segments relative to the base URL, query,
/// optional JSON body and header overrides.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn put(segments: &[&str]) -> Self {
        Self::new(Method::PUT, segments)
    }

    pub fn delete(segments: &[&str]) -> Self {
        Self::new(Method::DELETE, segments)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a query pair only when the value is present.
    #[must_use]
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Cheap to clone; clones share the connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    session: SessionStore,
    navigation: NavigationState,
    utc_offset: FixedOffset,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        session: SessionStore,
        navigation: NavigationState,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|e| ApiError::BaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            base,
            http,
            session,
            navigation,
            utc_offset: local_offset(),
        })
    }

    /// Offset used by the schedule clients for wall-clock conversion.
    #[must_use]
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Send and return the whole envelope.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let url = self.url_for(&request)?;
        let headers = self.headers_for(&request)?;
        let method = request.method.clone();

        tracing::debug!(method = %method, url = %url, "api request");

        let mut builder = self.http.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(method = %method, url = %url, "api request failed: {err}");
                return Err(ApiError::Network(err));
            }
        };

        let status = response.status();
        // The body of a 401 is never read.
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(method = %method, url = %url, "session rejected by server");
            return Err(ApiError::SessionExpired);
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .map(|body| error_message(&body))
                .unwrap_or_else(|_| ApiError::GENERIC_MESSAGE.to_string());
            tracing::warn!(method = %method, url = %url, status = status.as_u16(), %message, "api error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?
        };

        let envelope = unwrap_envelope(status.as_u16(), body)?;
        let data = serde_json::from_value(envelope.data)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(ApiResponse {
            success: envelope.success,
            data,
            meta: envelope.meta,
        })
    }

    /// Send and return only the `data` payload.
    pub async fn data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await.map(|response| response.data)
    }

    /// Send when the payload is irrelevant (deletes, status updates).
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send::<Value>(request).await.map(|_| ())
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::BaseUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            segments.extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    fn headers_for(&self, request: &ApiRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Encode(format!("bearer token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        headers.insert(
            HeaderName::from_static(REQ_ROLE_HEADER),
            HeaderValue::from_static(self.navigation.get().as_header_value()),
        );

        for (name, value) in &request.headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }
}

/// Bodies that look like an envelope are unwrapped; anything else is taken
/// as the payload itself.
fn unwrap_envelope(status: u16, body: Value) -> Result<ApiResponse<Value>, ApiError> {
    match body {
        Value::Object(mut map) if map.contains_key("data") || map.contains_key("success") => {
            let success = map.get("success").and_then(Value::as_bool).unwrap_or(true);
            if !success {
                return Err(ApiError::Api {
                    status,
                    message: error_message(&Value::Object(map)),
                });
            }
            let data = map.remove("data").unwrap_or(Value::Null);
            let meta = match map.remove("meta") {
                Some(Value::Object(meta)) => Some(meta),
                _ => None,
            };
            Ok(ApiResponse {
                success,
                data,
                meta,
            })
        }
        other => Ok(ApiResponse {
            success: true,
            data: other,
            meta: None,
        }),
    }
}

/// `error.message`, then `message`, then a string `data` or `error`.
pub(crate) fn error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .or_else(|| body.get("data").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(ApiError::GENERIC_MESSAGE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, SessionStore::in_memory(), NavigationState::default()).unwrap()
    }

    #[test]
    fn error_message_precedence() {
        assert_eq!(
            error_message(&json!({ "error": { "message": "nested" }, "message": "flat" })),
            "nested"
        );
        assert_eq!(error_message(&json!({ "message": "flat", "data": "d" })), "flat");
        assert_eq!(error_message(&json!({ "data": "as data" })), "as data");
        assert_eq!(error_message(&json!({ "error": "plain" })), "plain");
        assert_eq!(error_message(&json!({ "message": "  " })), "An error occurred");
        assert_eq!(error_message(&json!([1, 2])), "An error occurred");
    }

    #[test]
    fn envelope_is_unwrapped() {
        let body = json!({ "success": true, "data": { "a": 1 }, "meta": { "total": 3 } });
        let response = unwrap_envelope(200, body).unwrap();
        assert_eq!(response.data, json!({ "a": 1 }));
        assert_eq!(response.meta.unwrap()["total"], json!(3));
    }

    #[test]
    fn bare_body_is_the_payload() {
        let response = unwrap_envelope(200, json!([1, 2, 3])).unwrap();
        assert!(response.success);
        assert_eq!(response.data, json!([1, 2, 3]));
    }

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let body = json!({ "success": false, "error": { "code": "E1", "message": "nope" } });
        match unwrap_envelope(200, body) {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "nope");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn segments_are_encoded_under_base_path() {
        let api = client("https://hr.example.com/api/");
        let request = ApiRequest::get(&["lovs", "type", "Leave Type/2"]).query("page", 2);
        let url = api.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hr.example.com/api/lovs/type/Leave%20Type%2F2?page=2"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for base in ["not a url", "mailto:hr@example.com", "ftp://example.com"] {
            let result = ApiClient::new(base, SessionStore::in_memory(), NavigationState::default());
            assert!(matches!(result, Err(ApiError::BaseUrl(_))), "{base}");
        }
    }

    #[test]
    fn caller_headers_override_defaults() {
        let api = client("http://localhost:3000");
        let request = ApiRequest::get(&["users"])
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let headers = api.headers_for(&request).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
        assert_eq!(headers[REQ_ROLE_HEADER], "staff");
        assert!(headers.get(AUTHORIZATION).is_none());
    }
}
