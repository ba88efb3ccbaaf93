//! REST client shared by every repository and the auth provider

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, CONTENT_RANGE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, instrument};

use super::config::StoreConfig;
use crate::error::{PostgrestError, StoreError};
use crate::query::TableQuery;

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const PREFER: &str = "Prefer";

/// Access token of the signed-in user, shared between the client and the
/// auth provider
pub type TokenSlot = Arc<RwLock<Option<String>>>;

/// HTTP client for the REST interface
///
/// Cheap to clone; clones share the connection pool and the session token.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    config: Arc<StoreConfig>,
    access_token: TokenSlot,
}

impl RestClient {
    /// Create a client for the given backend
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    #[inline]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[inline]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Handle to the session token; the auth provider writes through it
    pub fn token_slot(&self) -> TokenSlot {
        Arc::clone(&self.access_token)
    }

    pub fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write() = token;
    }

    pub fn has_user_token(&self) -> bool {
        self.access_token.read().is_some()
    }

    /// Bearer for the next request: the user's token, else the API key
    fn bearer(&self) -> String {
        self.access_token
            .read()
            .clone()
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    fn request(&self, method: Method, query: &TableQuery) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.config.rest_url, query.table()))
            .query(&query.params())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            error: PostgrestError::parse(&body),
        })
    }

    /// Fetch every row matching the query
    #[instrument(skip(self), fields(table = query.table()))]
    pub async fn fetch<T: DeserializeOwned>(&self, query: &TableQuery) -> Result<Vec<T>, StoreError> {
        let response = self.send(self.request(Method::GET, query)).await?;
        let rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(rows = rows.len(), "Fetched rows");
        Ok(rows)
    }

    /// Fetch exactly one row; no match is `Ok(None)`
    #[instrument(skip(self), fields(table = query.table()))]
    pub async fn fetch_single<T: DeserializeOwned>(
        &self,
        query: &TableQuery,
    ) -> Result<Option<T>, StoreError> {
        let builder = self.request(Method::GET, query).header(ACCEPT, SINGLE_OBJECT);
        match self.send(builder).await {
            Ok(response) => response
                .json()
                .await
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Count matching rows without transferring them
    #[instrument(skip(self), fields(table = query.table()))]
    pub async fn count(&self, query: &TableQuery) -> Result<i64, StoreError> {
        let builder = self
            .request(Method::HEAD, query)
            .header(PREFER, "count=exact");
        let response = self.send(builder).await?;

        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::Decode("missing or malformed Content-Range".to_string()))
    }

    /// Insert one row and return it as stored
    #[instrument(skip(self, body))]
    pub async fn insert<B, T>(&self, table: &'static str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .request(Method::POST, &TableQuery::new(table))
            .header(PREFER, "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(body);
        let response = self.send(builder).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Patch matching rows, returning how many changed
    #[instrument(skip(self, patch), fields(table = query.table()))]
    pub async fn update<B>(&self, query: &TableQuery, patch: &B) -> Result<usize, StoreError>
    where
        B: Serialize + ?Sized,
    {
        if !query.has_filters() {
            return Err(StoreError::Unfiltered("update"));
        }

        let builder = self
            .request(Method::PATCH, query)
            .header(PREFER, "return=representation")
            .json(patch);
        self.affected_rows(builder).await
    }

    /// Delete matching rows, returning how many went
    #[instrument(skip(self), fields(table = query.table()))]
    pub async fn delete(&self, query: &TableQuery) -> Result<usize, StoreError> {
        if !query.has_filters() {
            return Err(StoreError::Unfiltered("delete"));
        }

        let builder = self
            .request(Method::DELETE, query)
            .header(PREFER, "return=representation");
        self.affected_rows(builder).await
    }

    async fn affected_rows(&self, builder: RequestBuilder) -> Result<usize, StoreError> {
        let response = self.send(builder).await?;
        let rows: Vec<IgnoredAny> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(rows.len())
    }
}

/// Total from a `Content-Range` header such as `0-24/312` or `*/0`
fn parse_content_range_total(header: &str) -> Option<i64> {
    header
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
}
