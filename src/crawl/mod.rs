//! Ownership-graph crawl
//!
//! This module provides:
//! - `Entity` and company-number normalization
//! - The paginated fetcher used for officers, PSCs and filings
//! - PSC classification into report lines and graph edges
//! - Filing cutoff and description rendering
//! - The `Crawler` traversal engine

pub mod classifier;
pub mod engine;
pub mod entity;
pub mod filing;
pub mod pagination;

pub use classifier::{classify, Classification};
pub use engine::{CrawlOptions, CrawlSummary, Crawler};
pub use entity::{normalize_company_number, Entity, EntityKind};
pub use filing::{cutoff_date, FilingRenderer};
pub use pagination::fetch_all;
