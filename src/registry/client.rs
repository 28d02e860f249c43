//! Companies House API client
//!
//! HTTP client for the UK Companies House API. One client (and so one
//! pooled connection set) is shared by every request of a crawl.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use super::source::{RegistrySource, Resource};
use super::types::{CompanyProfile, RawPage};
use crate::config::CrawlerConfig;
use crate::error::{CrawlError, Result};

/// Companies House API client
pub struct CompaniesHouseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl CompaniesHouseClient {
    /// Create a new client from crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Make a GET request with authentication
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.url(path, query)?;
        tracing::debug!(url = %url, "Registry request");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CrawlError::Fetch {
                resource: path.to_string(),
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CrawlError::decode(path, e))
    }
}

#[async_trait]
impl RegistrySource for CompaniesHouseClient {
    async fn company(&self, company_number: &str) -> Result<CompanyProfile> {
        let path = format!("/company/{}", company_number);
        let value = match self.get(&path, &[]).await {
            Err(CrawlError::Fetch { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(CrawlError::EmptyRecord {
                    company_number: company_number.to_string(),
                })
            }
            other => other?,
        };

        if value.as_object().map_or(true, |o| o.is_empty()) {
            return Err(CrawlError::EmptyRecord {
                company_number: company_number.to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| CrawlError::decode(path, e))
    }

    async fn page(
        &self,
        resource: Resource,
        company_number: &str,
        items_per_page: usize,
        start_index: usize,
    ) -> Result<RawPage> {
        let path = resource.path(company_number);
        let value = self
            .get(
                &path,
                &[
                    ("items_per_page", items_per_page.to_string()),
                    ("start_index", start_index.to_string()),
                ],
            )
            .await?;

        parse_page(resource, &path, value)
    }
}

/// Split a list response into its items and reported total
fn parse_page(resource: Resource, path: &str, mut value: Value) -> Result<RawPage> {
    let total = value
        .get(resource.total_field())
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            CrawlError::decode(path, format!("missing `{}`", resource.total_field()))
        })? as usize;

    let items = match value.get_mut("items").map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(CrawlError::decode(path, "`items` is not an array")),
    };

    Ok(RawPage { items, total })
}
