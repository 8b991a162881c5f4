//! Supabase PostgREST client
//!
//! Content lives behind Supabase's REST surface, so every lookup is a GET
//! against `/rest/v1/{relation}` with equality filters and an order column.
//! The client is constructed once at startup and shared; it holds no session
//! state.

use crate::error::{Result, StoreError};
use reqwest::{Client, ClientBuilder, header::ACCEPT};
use std::time::Duration;
use tracing::debug;

/// Media type PostgREST uses to return exactly one object instead of an array
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST error code for "zero (or multiple) rows" on a single-object fetch
const PGRST_NO_ROWS: &str = "PGRST116";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // Content fetches are one or two round trips; anything slower
            // than this is an outage, not a slow query.
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 16,
            user_agent: format!("BlueTrails/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a configured HTTP client with connection pooling
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        // Expire idle connections before the upstream closes them; Supabase
        // drops idle connections after a couple of minutes.
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        // Use rustls for TLS (no openssl dependency)
        .use_rustls_tls()
        .build()
        .map_err(|e| StoreError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Store connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Supabase project base URL (no trailing `/rest/v1`)
    pub base_url: String,

    /// Service key, sent as both `apikey` and bearer token
    pub api_key: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl StoreConfig {
    /// Create a new store configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client_config: HttpClientConfig::default(),
        }
    }

    /// Override the HTTP client configuration
    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }
}

/// A PostgREST select, built up the way the queries read in the store schema:
/// relation, equality filters, order column, optional limit.
#[derive(Debug, Clone)]
pub struct SelectQuery<'a> {
    relation: &'a str,
    columns: &'a str,
    filters: Vec<(&'a str, String)>,
    order: Option<&'a str>,
    limit: Option<u32>,
}

impl<'a> SelectQuery<'a> {
    /// Start a query against `relation`, selecting all columns
    pub fn from(relation: &'a str) -> Self {
        Self {
            relation,
            columns: "*",
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Select specific columns instead of `*`
    pub fn columns(mut self, columns: &'a str) -> Self {
        self.columns = columns;
        self
    }

    /// Add an equality filter
    pub fn eq(mut self, column: &'a str, value: impl Into<String>) -> Self {
        self.filters.push((column, value.into()));
        self
    }

    /// Order ascending by `column`
    pub fn order(mut self, column: &'a str) -> Self {
        self.order = Some(column);
        self
    }

    /// Cap the number of returned rows
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.to_string())];
        for (column, value) in &self.filters {
            pairs.push((column.to_string(), format!("eq.{}", value)));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), format!("{}.asc", order)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

/// Supabase store client
pub struct StoreClient {
    config: StoreConfig,
    client: Client,
}

impl StoreClient {
    /// Create a new store client
    pub fn new(config: StoreConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(StoreError::Config("store base URL is empty".to_string()));
        }
        let client = create_client(&config.client_config)?;
        Ok(Self { config, client })
    }

    fn request(&self, query: &SelectQuery<'_>) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            query.relation
        );
        self.client
            .get(url)
            .query(&query.query_pairs())
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Fetch all rows matching `query` as a JSON array
    pub async fn select_list(&self, query: &SelectQuery<'_>) -> Result<Vec<serde_json::Value>> {
        debug!(relation = query.relation, "store list fetch");

        let response = self.request(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), response).await);
        }

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| StoreError::Parse(format!("expected a JSON array: {}", e)))
    }

    /// Fetch exactly one row matching `query`
    ///
    /// PostgREST answers a zero-row single-object fetch with `PGRST116`,
    /// which maps to [`StoreError::NotFound`]; every other non-success status
    /// surfaces as [`StoreError::Upstream`].
    pub async fn select_single(&self, query: &SelectQuery<'_>) -> Result<serde_json::Value> {
        debug!(relation = query.relation, "store single fetch");

        let response = self.request(query).header(ACCEPT, PGRST_OBJECT).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), response).await);
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| StoreError::Parse(format!("expected a JSON object: {}", e)))
    }
}

/// Turn a non-success PostgREST response into a structured error
async fn upstream_error(status_code: u16, response: reqwest::Response) -> StoreError {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());

    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&body) {
        if parsed.get("code").and_then(|c| c.as_str()) == Some(PGRST_NO_ROWS) {
            return StoreError::NotFound;
        }
        if let Some(message) = parsed.get("message").and_then(|m| m.as_str()) {
            return StoreError::Upstream {
                status_code,
                message: message.to_string(),
            };
        }
    }

    StoreError::Upstream {
        status_code,
        message: body,
    }
}
