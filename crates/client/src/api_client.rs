//! HTTP API client with bearer authentication.

use std::rc::Rc;

use learnhub_shared::ApiError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config;

/// Callback invoked when the server answers 401; used for global
/// session teardown without coupling the gateway to any page.
type UnauthorizedHandler = Rc<dyn Fn()>;

/// HTTP client for making authenticated requests against the learnhub API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer: Option<String>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            bearer: None,
            on_unauthorized: None,
        }
    }

    /// Set the base URL for API requests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a bearer token. `None` sends requests unauthenticated.
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Install the handler run once per 401 response.
    pub fn with_unauthorized_handler(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(handler));
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn apply_headers(&self, mut rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb = rb.header(config::API_KEY_HEADER, config::CLIENT_API_KEY);
        if let Some(token) = &self.bearer {
            rb = rb.header("Authorization", format!("Bearer {token}"));
        }
        rb
    }

    /// Classify a finished response: fire the unauthorized handler on
    /// 401, map non-2xx to `ApiError::Http`, hand back the body text
    /// otherwise.
    fn interpret(&self, status: u16, is_success: bool, body: String) -> Result<String, ApiError> {
        if status == 401 {
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
        }
        if !is_success {
            return Err(ApiError::Http { status, body });
        }
        Ok(body)
    }

    fn decode<TRes: DeserializeOwned>(text: String) -> Result<TRes, ApiError> {
        let text = if text.is_empty() {
            "null".to_string()
        } else {
            text
        };
        serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    /// Make a GET request
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        let url = self.url(path);
        let rb = self.apply_headers(self.client.get(&url));

        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        Self::decode(self.interpret(status, is_success, text)?)
    }

    /// Make a POST request with JSON body
    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.send_with_body(reqwest::Method::POST, path, body).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.send_with_body(reqwest::Method::PUT, path, body).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        self.send_with_body(reqwest::Method::PATCH, path, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let rb = self.apply_headers(self.client.delete(&url));

        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        self.interpret(status, is_success, text)?;
        Ok(())
    }

    async fn send_with_body<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let url = self.url(path);
        let body_bytes =
            serde_json::to_vec(body).map_err(|e| ApiError::Deserialize(e.to_string()))?;

        let rb = self.apply_headers(self.client.request(method, &url));

        let resp = rb
            .body(body_bytes)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::decode(self.interpret(status, is_success, text)?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn url_joins_base_and_path() {
        let client = ApiClient::new().with_base_url("http://api.test/");
        assert_eq!(client.url("/cart"), "http://api.test/cart");
        assert_eq!(client.url("cart"), "http://api.test/cart");
        assert_eq!(client.url("https://pay.test/x"), "https://pay.test/x");
    }

    #[test]
    fn url_without_base_stays_relative() {
        let client = ApiClient::new();
        assert_eq!(client.url("categories"), "/categories");
        assert_eq!(client.url("/categories"), "/categories");
    }

    #[test]
    fn interpret_fires_unauthorized_handler_exactly_once_per_401() {
        let count = Rc::new(Cell::new(0u32));
        let count_for_handler = count.clone();
        let client =
            ApiClient::new().with_unauthorized_handler(move || {
                count_for_handler.set(count_for_handler.get() + 1);
            });

        let err = client
            .interpret(401, false, "{}".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }));
        assert_eq!(count.get(), 1);

        // Other statuses never fire it.
        assert!(client.interpret(200, true, "{}".to_string()).is_ok());
        let _ = client.interpret(403, false, "{}".to_string());
        let _ = client.interpret(500, false, "{}".to_string());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn interpret_maps_non_success_to_http_error() {
        let client = ApiClient::new();
        let err = client
            .interpret(404, false, "missing".to_string())
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                body: "missing".to_string()
            }
        );
    }

    #[test]
    fn decode_treats_empty_body_as_null() {
        let decoded: Result<Option<u32>, _> = ApiClient::decode(String::new());
        assert_eq!(decoded.unwrap(), None);
    }
}
