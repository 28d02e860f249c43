//! Paginated fetcher
//!
//! Accumulates every item of a counted list resource by walking
//! `start_index` forward by the number of items each page returned.

use serde::de::DeserializeOwned;

use crate::error::{CrawlError, Result};
use crate::registry::{RegistrySource, Resource};

/// Fetch all items of `resource` for a company, in registry order.
///
/// Stops exactly when the running count equals the reported total. Any page
/// failure aborts the whole accumulation. The total is assumed stable across
/// pages; an empty page before the total is reached, or more items than the
/// total, is reported as `CrawlError::Pagination`.
pub async fn fetch_all<T: DeserializeOwned>(
    source: &dyn RegistrySource,
    resource: Resource,
    company_number: &str,
    page_size: usize,
) -> Result<Vec<T>> {
    let mut items: Vec<T> = Vec::new();
    let mut start_index = 0usize;

    loop {
        let page = source
            .page(resource, company_number, page_size, start_index)
            .await?;
        let count = page.items.len();

        tracing::debug!(
            resource = %resource,
            company = company_number,
            start_index,
            count,
            total = page.total,
            "Fetched page"
        );

        for item in page.items {
            let item = serde_json::from_value(item)
                .map_err(|e| CrawlError::decode(resource.path(company_number), e))?;
            items.push(item);
        }
        start_index += count;

        if start_index == page.total {
            break;
        }
        if count == 0 || start_index > page.total {
            return Err(CrawlError::Pagination {
                resource: resource.path(company_number),
                fetched: start_index,
                total: page.total,
            });
        }
    }

    Ok(items)
}
