//! Crawler configuration
//!
//! Values are resolved from the process environment (after `.env` has been
//! loaded by the binary) and can then be overridden field by field.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_BASE: &str = "https://api.company-information.service.gov.uk";
pub const DEFAULT_PAGE_SIZE: usize = 100;
pub const DEFAULT_FILING_WINDOW_YEARS: u32 = 3;

/// Settings for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Registry API key, sent as the basic-auth user with an empty password
    pub api_key: String,
    pub base_url: String,
    /// Items requested per page for officers, PSCs and filings
    pub page_size: usize,
    /// Filings older than this many years before the crawl date are skipped
    pub filing_window_years: u32,
    pub request_timeout: Duration,
    /// Filing description table; the built-in table is used when absent
    pub templates_path: Option<PathBuf>,
    /// Maximum ownership depth to expand (None = unlimited)
    pub max_depth: Option<usize>,
}

impl CrawlerConfig {
    /// Create a config with defaults and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            filing_window_years: DEFAULT_FILING_WINDOW_YEARS,
            request_timeout: Duration::from_secs(30),
            templates_path: None,
            max_depth: None,
        }
    }

    /// Apply optional settings from the environment on top of `self`
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(base) = std::env::var("COMPANIES_HOUSE_API_BASE") {
            self.base_url = base;
        }
        if let Ok(size) = std::env::var("OWNERSHIP_PAGE_SIZE") {
            self.page_size = size
                .parse()
                .with_context(|| format!("Invalid OWNERSHIP_PAGE_SIZE: {}", size))?;
        }
        if let Ok(path) = std::env::var("FILING_DESCRIPTIONS_PATH") {
            self.templates_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_templates_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.templates_path = Some(path.into());
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Reject settings that would make pagination or auth meaningless
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("Registry API key must not be empty");
        }
        if self.page_size == 0 {
            anyhow::bail!("Page size must be at least 1");
        }
        url::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid registry base URL: {}", self.base_url))?;
        Ok(())
    }
}
