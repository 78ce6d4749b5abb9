use async_trait::async_trait;
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use giftpool_core::contributions::Contribution;
use giftpool_core::errors::RemoteError;
use giftpool_core::fundings::Funding;
use giftpool_core::storage::{ContributorEntry, FundingStore};
use giftpool_core::{Error, Result};

use crate::model::{ContributionRow, FundingRow};

/// Default timeout for data API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Table endpoints live under this prefix.
const REST_PATH: &str = "/rest/v1";

/// Error body shape of the data API.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// `FundingStore` over the hosted table store's HTTP data API.
///
/// Reads degrade to empty results on transport failure (logged, never
/// propagated); row absence is `None`. Writes surface every transport or
/// constraint failure as a `Remote` error carrying the backend's message.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key_header: HeaderValue,
    auth_header: HeaderValue,
}

impl RemoteStore {
    /// Creates a client for the data API at `base_url`, authenticating with
    /// `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let api_key_header = HeaderValue::from_str(api_key)
            .map_err(|e| Error::Unexpected(format!("Invalid API key format: {}", e)))?;
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| Error::Unexpected(format!("Invalid API key format: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key_header,
            auth_header,
        })
    }

    /// Create default headers for data API requests.
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("apikey", self.api_key_header.clone());
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    fn url(&self, table_query: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PATH, table_query)
    }

    /// Make a GET request and parse the returned rows.
    async fn get_rows<T: DeserializeOwned>(&self, table_query: &str) -> Result<Vec<T>> {
        let url = self.url(table_query);
        debug!("[RemoteStore] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::api_error(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| RemoteError::InvalidResponse(format!("{} - {}", e, body)).into())
    }

    /// Make a POST request with row payloads. `upsert` merges on conflict.
    async fn post_rows<B: Serialize>(&self, table: &str, body: &B, upsert: bool) -> Result<()> {
        let url = self.url(table);
        debug!("[RemoteStore] POST {}", url);

        let mut headers = self.headers();
        let prefer = if upsert {
            "resolution=merge-duplicates,return=minimal"
        } else {
            "return=minimal"
        };
        headers.insert("Prefer", HeaderValue::from_static(prefer));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Self::check_status(response).await
    }

    /// Invoke a server-side stored procedure.
    async fn rpc(&self, function: &str, args: serde_json::Value) -> Result<()> {
        let url = self.url(&format!("rpc/{}", function));
        debug!("[RemoteStore] RPC {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&args)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Self::check_status(response).await
    }

    async fn delete_rows(&self, table_query: &str) -> Result<()> {
        let url = self.url(table_query);
        debug!("[RemoteStore] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::api_error(status.as_u16(), &body).into())
    }

    fn api_error(status: u16, body: &str) -> RemoteError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|err| err.message.or(err.details))
            .unwrap_or_else(|| body.chars().take(200).collect());
        RemoteError::Api { status, message }
    }

    /// Point lookup that propagates transport failures. Used on write paths
    /// where a failure must not be mistaken for absence.
    async fn try_get_funding(&self, id: &str) -> Result<Option<Funding>> {
        let rows: Vec<FundingRow> = self
            .get_rows(&format!(
                "fundings?select=*&id=eq.{}",
                urlencoding::encode(id)
            ))
            .await?;
        Ok(rows.into_iter().next().map(Funding::from))
    }
}

/// Disjunctive filter for contributor lookups: contributor name contains the
/// identifier (case-insensitive) or the contribution is not anonymous.
fn contributor_filter(identifier: &str) -> String {
    format!(
        "or=(contributor_name.ilike.{},is_anonymous.is.false)",
        urlencoding::encode(&format!("*{}*", identifier))
    )
}

/// `in.(...)` membership filter with each id individually encoded.
fn id_in_filter(ids: &[&str]) -> String {
    let encoded: Vec<String> = ids
        .iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect();
    format!("id=in.({})", encoded.join(","))
}

#[async_trait]
impl FundingStore for RemoteStore {
    async fn save_funding(&self, funding: Funding) -> Result<()> {
        let row = FundingRow::from(funding);
        self.post_rows("fundings", &[row], true).await
    }

    async fn get_funding(&self, id: &str) -> Result<Option<Funding>> {
        match self.try_get_funding(id).await {
            Ok(funding) => Ok(funding),
            Err(e) => {
                error!("Error getting funding {}: {}", id, e);
                Ok(None)
            }
        }
    }

    async fn get_all_fundings(&self) -> Result<Vec<Funding>> {
        match self
            .get_rows::<FundingRow>("fundings?select=*&order=created_at.desc")
            .await
        {
            Ok(rows) => Ok(rows.into_iter().map(Funding::from).collect()),
            Err(e) => {
                error!("Error getting all fundings: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn get_fundings_by_host(&self, host_id: &str) -> Result<Vec<Funding>> {
        let query = format!(
            "fundings?select=*&host_id=eq.{}&order=created_at.desc",
            urlencoding::encode(host_id)
        );
        match self.get_rows::<FundingRow>(&query).await {
            Ok(rows) => Ok(rows.into_iter().map(Funding::from).collect()),
            Err(e) => {
                error!("Error getting fundings for host {}: {}", host_id, e);
                Ok(Vec::new())
            }
        }
    }

    async fn get_fundings_by_contributor(
        &self,
        identifier: &str,
    ) -> Result<Vec<ContributorEntry>> {
        let query = format!("contributions?select=*&{}", contributor_filter(identifier));
        let contributions: Vec<Contribution> = match self.get_rows::<ContributionRow>(&query).await
        {
            Ok(rows) => rows.into_iter().map(Contribution::from).collect(),
            Err(e) => {
                error!("Error getting contributions for '{}': {}", identifier, e);
                return Ok(Vec::new());
            }
        };
        if contributions.is_empty() {
            return Ok(Vec::new());
        }

        let mut funding_ids: Vec<&str> =
            contributions.iter().map(|c| c.funding_id.as_str()).collect();
        funding_ids.sort_unstable();
        funding_ids.dedup();
        let query = format!("fundings?select=*&{}", id_in_filter(&funding_ids));
        let fundings: Vec<Funding> = match self.get_rows::<FundingRow>(&query).await {
            Ok(rows) => rows.into_iter().map(Funding::from).collect(),
            Err(e) => {
                error!("Error getting parent fundings for '{}': {}", identifier, e);
                return Ok(Vec::new());
            }
        };

        Ok(contributions
            .into_iter()
            .filter_map(|contribution| {
                // A contribution whose parent funding is gone is dropped.
                fundings
                    .iter()
                    .find(|f| f.id == contribution.funding_id)
                    .map(|funding| ContributorEntry {
                        funding: funding.clone(),
                        contribution,
                    })
            })
            .collect())
    }

    async fn add_contribution(&self, contribution: Contribution) -> Result<()> {
        contribution.validate()?;
        if self.try_get_funding(&contribution.funding_id).await?.is_none() {
            return Err(Error::NotFound(format!(
                "funding {}",
                contribution.funding_id
            )));
        }

        let funding_id = contribution.funding_id.clone();
        let amount = contribution.amount;
        let row = ContributionRow::from(contribution);
        self.post_rows("contributions", &[row], false).await?;

        // The total is maintained server-side as an atomic compare-and-add,
        // so interleaved contributions from different clients never lose an
        // increment. If this call fails after the insert above, the total is
        // under-counted and the error goes straight to the caller.
        self.rpc(
            "increment_funding_amount",
            serde_json::json!({
                "funding_id": funding_id,
                "amount_to_add": amount,
            }),
        )
        .await
    }

    async fn get_contributions(&self, funding_id: &str) -> Result<Vec<Contribution>> {
        let query = format!(
            "contributions?select=*&funding_id=eq.{}&order=timestamp.desc",
            urlencoding::encode(funding_id)
        );
        match self.get_rows::<ContributionRow>(&query).await {
            Ok(rows) => Ok(rows.into_iter().map(Contribution::from).collect()),
            Err(e) => {
                error!("Error getting contributions for funding {}: {}", funding_id, e);
                Ok(Vec::new())
            }
        }
    }

    async fn clear_all(&self) -> Result<()> {
        // Children first so the fundings delete cannot orphan rows behind a
        // foreign key.
        self.delete_rows("contributions?id=not.is.null").await?;
        self.delete_rows("fundings?id=not.is.null").await
    }
}
