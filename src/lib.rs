//! Ownership and filing reports for companies in a public registry
//!
//! Starting from one company number, the crawler discovers corporate
//! persons with significant control, visits each of them in turn, and
//! reports officers, controllers and recent filings for every company.

pub mod config;
pub mod crawl;
pub mod error;
pub mod registry;
pub mod report;
pub mod templates;

pub use config::CrawlerConfig;
pub use crawl::{CrawlOptions, CrawlSummary, Crawler, Entity};
pub use error::{CrawlError, Result};
pub use registry::{CompaniesHouseClient, RegistrySource};
pub use report::{ReportLine, ReportSink, WriterSink};
pub use templates::DescriptionTemplates;
