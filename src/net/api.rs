//! REST client for the inventory backend.
//!
//! DESIGN
//! ======
//! `InventoryApi` is the seam views depend on; `HttpApi` is the `reqwest`
//! implementation. Protected endpoints take a `SessionToken` argument, so a
//! protected request cannot be built without one: the token check lives in
//! the caller (see `state::view::fetch_protected`), and the header is
//! attached here in `authorized`.
//!
//! ERROR HANDLING
//! ==============
//! Any non-2xx status becomes `ApiError::Status` with the raw body kept for
//! logs. There is no retry, no token refresh, and 401 is not special-cased.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{
    Credentials, DashboardEnvelope, DashboardStats, LoginEnvelope, LoginOutcome, Product, ProductInput,
    ProductsEnvelope, RegisterOutcome, Registration, Settings,
};
use crate::config::ClientConfig;
use crate::session::{SessionToken, bearer_headers};

pub(crate) const LOGIN_PATH: &str = "/api/auth/login";
pub(crate) const REGISTER_PATH: &str = "/auth/register";
pub(crate) const DASHBOARD_PATH: &str = "/dashboard";
pub(crate) const PRODUCTS_PATH: &str = "/products";
pub(crate) const SETTINGS_PATH: &str = "/api/settings";

// =============================================================================
// TRAIT
// =============================================================================

/// Operations the dashboard views perform against the backend.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError>;

    async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError>;

    async fn dashboard(&self, token: &SessionToken) -> Result<DashboardStats, ApiError>;

    async fn list_products(&self, token: &SessionToken) -> Result<Vec<Product>, ApiError>;

    /// The response body is not interpreted; views re-fetch the list.
    async fn create_product(&self, token: &SessionToken, input: &ProductInput) -> Result<(), ApiError>;

    async fn update_product(&self, token: &SessionToken, id: &str, input: &ProductInput) -> Result<(), ApiError>;

    async fn delete_product(&self, token: &SessionToken, id: &str) -> Result<(), ApiError>;

    async fn settings(&self, token: &SessionToken) -> Result<Settings, ApiError>;

    async fn update_settings(&self, token: &SessionToken, settings: &Settings) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApi {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpApi {
    /// Build a client for `config`. A timeout is applied only when configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = self.config.url(path);
        Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
    }

    /// `/products/<id>`, with `id` percent-encoded as a single path segment.
    pub(crate) fn product_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.endpoint(PRODUCTS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.config.backend_url.clone()))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "api request");
        self.http.request(method, url)
    }

    /// Request carrying `Authorization: Bearer <token>`.
    fn authorized(&self, method: Method, url: Url, token: &SessionToken) -> RequestBuilder {
        bearer_headers(Some(token))
            .into_iter()
            .fold(self.request(method, url), |request, (name, value)| request.header(name, value))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "api request rejected");
        Err(ApiError::Status { status: status.as_u16(), body })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl InventoryApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        let request = self.request(Method::POST, self.endpoint(LOGIN_PATH)?).json(credentials);
        let envelope: LoginEnvelope = Self::send_json(request).await?;
        Ok(envelope.into())
    }

    async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError> {
        let request = self.request(Method::POST, self.endpoint(REGISTER_PATH)?).json(registration);
        Self::send_json(request).await
    }

    async fn dashboard(&self, token: &SessionToken) -> Result<DashboardStats, ApiError> {
        let request = self.authorized(Method::GET, self.endpoint(DASHBOARD_PATH)?, token);
        let envelope: DashboardEnvelope = Self::send_json(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn list_products(&self, token: &SessionToken) -> Result<Vec<Product>, ApiError> {
        let request = self.authorized(Method::GET, self.endpoint(PRODUCTS_PATH)?, token);
        let envelope: ProductsEnvelope = Self::send_json(request).await?;
        Ok(envelope.products.unwrap_or_default())
    }

    async fn create_product(&self, token: &SessionToken, input: &ProductInput) -> Result<(), ApiError> {
        let request = self.authorized(Method::POST, self.endpoint(PRODUCTS_PATH)?, token).json(input);
        Self::send(request).await.map(drop)
    }

    async fn update_product(&self, token: &SessionToken, id: &str, input: &ProductInput) -> Result<(), ApiError> {
        let request = self.authorized(Method::PUT, self.product_url(id)?, token).json(input);
        Self::send(request).await.map(drop)
    }

    async fn delete_product(&self, token: &SessionToken, id: &str) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, self.product_url(id)?, token);
        Self::send(request).await.map(drop)
    }

    async fn settings(&self, token: &SessionToken) -> Result<Settings, ApiError> {
        let request = self.authorized(Method::GET, self.endpoint(SETTINGS_PATH)?, token);
        Self::send_json(request).await
    }

    async fn update_settings(&self, token: &SessionToken, settings: &Settings) -> Result<(), ApiError> {
        let request = self.authorized(Method::PUT, self.endpoint(SETTINGS_PATH)?, token).json(settings);
        Self::send(request).await.map(drop)
    }
}
