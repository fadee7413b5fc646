//! Cosmos DB (SQL API) REST client for elevator documents.

use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use super::{auth, ElevatorStore, ELEVATOR_CONTAINER};
use crate::config::Config;
use crate::elevator::{ElevatorState, ELEVATOR_COUNT};
use crate::error::StoreError;

/// REST API version sent in `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

/// Selects one document per shaft; ids are compared as strings.
pub const ELEVATOR_QUERY: &str = "SELECT * FROM c WHERE c.id <= @maxId";

const CONTINUATION_HEADER: &str = "x-ms-continuation";

/// Cosmos DB client scoped to one database.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Account endpoint as configured.
    endpoint: String,
    /// Base64 master key as configured.
    master_key: String,
    /// Database name.
    database: String,
}

/// Query body for `application/query+json`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    /// SQL text.
    pub query: String,
    /// Named parameters.
    pub parameters: Vec<QueryParameter>,
}

/// Single named query parameter.
#[derive(Debug, Clone, Serialize)]
pub struct QueryParameter {
    /// Parameter name including `@`.
    pub name: String,
    /// Parameter value.
    pub value: serde_json::Value,
}

/// One page of query results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    /// Matching documents.
    #[serde(rename = "Documents", default)]
    pub documents: Vec<ElevatorState>,
    /// Number of documents in this page.
    #[serde(rename = "_count", default)]
    pub count: usize,
}

impl QueryRequest {
    /// Query for every elevator document with `id <= "4"`.
    pub fn elevators() -> Self {
        Self {
            query: ELEVATOR_QUERY.to_string(),
            parameters: vec![QueryParameter {
                name: "@maxId".to_string(),
                value: serde_json::Value::String(ELEVATOR_COUNT.to_string()),
            }],
        }
    }
}

impl CosmosClient {
    /// Create a new client from config.
    ///
    /// Connection parameters are not checked until the first query.
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.db_timeout())
            .connect_timeout(std::time::Duration::from_millis(
                config.db_timeout_ms.min(2_000),
            ))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.db_url.clone(),
            master_key: config.db_key.clone(),
            database: config.db_name.clone(),
        })
    }

    /// Resource link of the elevator container, as signed.
    pub fn container_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, ELEVATOR_CONTAINER)
    }

    /// Full URL of the container's document feed.
    pub fn documents_url(&self) -> Result<Url, StoreError> {
        let invalid = |reason: String| StoreError::InvalidEndpoint {
            url: self.endpoint.clone(),
            reason,
        };

        let mut url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["dbs", &self.database, "colls", ELEVATOR_CONTAINER, "docs"]);

        Ok(url)
    }

    /// Run the elevator query, following continuation pages.
    #[instrument(skip(self), fields(database = %self.database))]
    pub async fn query_documents(&self) -> Result<Vec<ElevatorState>, StoreError> {
        let url = self.documents_url()?;
        let key = auth::decode_master_key(&self.master_key)?;
        let link = self.container_link();
        let body = serde_json::to_vec(&QueryRequest::elevators())
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut elevators = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let ms_date = auth::format_ms_date(Utc::now());
            let token = auth::master_key_token(&key, "post", "docs", &link, &ms_date)?;

            let mut request = self
                .http
                .post(url.clone())
                .header(reqwest::header::AUTHORIZATION, token)
                .header("x-ms-date", ms_date)
                .header("x-ms-version", API_VERSION)
                .header("x-ms-documentdb-isquery", "True")
                .header("x-ms-documentdb-query-enablecrosspartition", "True")
                .header(reqwest::header::CONTENT_TYPE, "application/query+json")
                .body(body.clone());
            if let Some(token) = &continuation {
                request = request.header(CONTINUATION_HEADER, token);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(StoreError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            continuation = response
                .headers()
                .get(CONTINUATION_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            let page = decode_page(&response.bytes().await?)?;
            debug!(
                count = page.count,
                more = continuation.is_some(),
                "Received query page"
            );
            elevators.extend(page.documents);

            if continuation.is_none() {
                break;
            }
        }

        Ok(elevators)
    }
}

impl ElevatorStore for CosmosClient {
    fn query_elevators(&self) -> BoxFuture<'_, Result<Vec<ElevatorState>, StoreError>> {
        self.query_documents().boxed()
    }
}

/// Decode one query response page.
pub fn decode_page(bytes: &[u8]) -> Result<QueryResponse, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}
