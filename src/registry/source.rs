//! RegistrySource trait
//!
//! The seam between the traversal engine and the upstream registry. The
//! HTTP client implements it for production; tests implement it in memory.

use async_trait::async_trait;

use super::types::{CompanyProfile, RawPage};
use crate::error::Result;

/// Counted list resources served in pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Officers,
    PersonsWithSignificantControl,
    FilingHistory,
}

impl Resource {
    /// Path of the resource for a normalized company number
    pub fn path(&self, company_number: &str) -> String {
        match self {
            Self::Officers => format!("/company/{}/officers", company_number),
            Self::PersonsWithSignificantControl => {
                format!("/company/{}/persons-with-significant-control", company_number)
            }
            Self::FilingHistory => format!("/company/{}/filing-history", company_number),
        }
    }

    /// Name of the field carrying the list total in a page response
    pub fn total_field(&self) -> &'static str {
        match self {
            Self::Officers | Self::PersonsWithSignificantControl => "total_results",
            Self::FilingHistory => "total_count",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Officers => write!(f, "officers"),
            Self::PersonsWithSignificantControl => write!(f, "persons-with-significant-control"),
            Self::FilingHistory => write!(f, "filing-history"),
        }
    }
}

/// Read access to a corporate registry
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetch the company profile for a normalized company number
    async fn company(&self, company_number: &str) -> Result<CompanyProfile>;

    /// Fetch one page of a list resource
    ///
    /// `start_index` is the zero-based offset of the first item requested.
    async fn page(
        &self,
        resource: Resource,
        company_number: &str,
        items_per_page: usize,
        start_index: usize,
    ) -> Result<RawPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(
            Resource::Officers.path("00000123"),
            "/company/00000123/officers"
        );
        assert_eq!(
            Resource::PersonsWithSignificantControl.path("00000123"),
            "/company/00000123/persons-with-significant-control"
        );
        assert_eq!(Resource::FilingHistory.total_field(), "total_count");
        assert_eq!(Resource::Officers.total_field(), "total_results");
    }
}
