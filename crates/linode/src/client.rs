use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Semaphore;
use url::Url;

use crate::error::{status_message, ApiError, Result};
use crate::models::Page;
use crate::transport::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.linode.com/v4";
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// A bearer token. Never printed, never placed in a URL.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ApiError::InvalidCredential("token is empty".into()));
        }
        Ok(Self(SecretString::from(token.trim().to_string())))
    }

    fn authorization(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0.expose_secret()))
            .map_err(|_| {
                ApiError::InvalidCredential(
                    "token contains characters not allowed in an HTTP header".into(),
                )
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Pagination and filtering for list endpoints.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page_size: u32,
    /// Sent verbatim as the `X-Filter` header.
    pub filter: Option<serde_json::Value>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

impl ListOptions {
    pub fn filtered(filter: serde_json::Value) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }
}

pub struct LinodeClientBuilder {
    credential: Credential,
    base_url: Option<String>,
    transport: TransportConfig,
}

impl LinodeClientBuilder {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: None,
            transport: TransportConfig::default(),
        }
    }

    /// Override the API root. Empty strings keep the default.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = (!base_url.trim().is_empty()).then_some(base_url);
        self
    }

    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn build(self) -> Result<LinodeClient> {
        let raw = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.credential.authorization()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("cloudmcp/", env!("CARGO_PKG_VERSION"))),
        );

        let http = self
            .transport
            .apply(reqwest::Client::builder().default_headers(headers))
            .build()?;

        let limiter = (self.transport.max_conns_per_host > 0)
            .then(|| Arc::new(Semaphore::new(self.transport.max_conns_per_host)));

        Ok(LinodeClient {
            http,
            base_url,
            limiter,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String> {
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed"));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Authenticated Linode API v4 client.
///
/// The HTTP pool is shared by clones of the inner `reqwest::Client`; the optional semaphore bounds
/// in-flight requests to `max_conns_per_host`.
pub struct LinodeClient {
    http: reqwest::Client,
    base_url: String,
    limiter: Option<Arc<Semaphore>>,
}

impl fmt::Debug for LinodeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinodeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LinodeClient {
    pub fn builder(credential: Credential) -> LinodeClientBuilder {
        LinodeClientBuilder::new(credential)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> Result<String> {
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };
        log::debug!("Linode API request: {method} {path}");

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::debug!("Linode API response: {method} {path} -> {}", status.as_u16());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: status_message(status, &body),
            });
        }
        Ok(body)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
        let body = if body.trim().is_empty() { "{}" } else { body };
        serde_json::from_str(body).map_err(|err| ApiError::Decode(format!("{path}: {err}")))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(self.url(path));
        let body = self.execute(Method::GET, path, request).await?;
        Self::decode(path, &body)
    }

    pub async fn list_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        options: &ListOptions,
    ) -> Result<Page<T>> {
        let mut request = self.http.get(self.url(path)).query(&[
            ("page", page.max(1).to_string()),
            ("page_size", options.page_size.to_string()),
        ]);
        if let Some(filter) = &options.filter {
            request = request.header("X-Filter", filter.to_string());
        }
        let body = self.execute(Method::GET, path, request).await?;
        Self::decode(path, &body)
    }

    /// Fetch every page of a listing.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &ListOptions,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1;
        loop {
            let current: Page<T> = self.list_page(path, page, options).await?;
            items.extend(current.data);
            if page >= current.pages {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        let body = self.execute(Method::POST, path, request).await?;
        Self::decode(path, &body)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.put(self.url(path)).json(body);
        let body = self.execute(Method::PUT, path, request).await?;
        Self::decode(path, &body)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.url(path));
        self.execute(Method::DELETE, path, request).await?;
        Ok(())
    }

    /// POST for action endpoints that answer with an empty object.
    pub async fn action<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(Method::POST, path, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        assert!(matches!(
            Credential::new("   "),
            Err(ApiError::InvalidCredential(_))
        ));
    }

    #[test]
    fn credential_debug_hides_token() {
        let credential = Credential::new("super-secret-token").unwrap();
        assert!(!format!("{credential:?}").contains("super-secret"));
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(
            parse_base_url("http://127.0.0.1:8080/v4/").unwrap(),
            "http://127.0.0.1:8080/v4"
        );
        assert!(matches!(
            parse_base_url("ftp://example.com"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn builder_keeps_default_url_for_blank_override() {
        let client = LinodeClient::builder(Credential::new("t").unwrap())
            .base_url("  ")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert!(!format!("{client:?}").contains("Bearer"));
    }

    #[test]
    fn token_with_newline_is_invalid_credential() {
        let credential = Credential::new("abc\ndef").unwrap();
        let err = LinodeClient::builder(credential).build().unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredential(_)));
        assert!(!err.to_string().contains("abc"));
    }
}
