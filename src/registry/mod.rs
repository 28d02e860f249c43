//! Upstream corporate registry access
//!
//! This module provides:
//! - API types for company profiles, officers, PSCs and filings
//! - The `RegistrySource` trait consumed by the crawler
//! - An HTTP client for the Companies House API

pub mod client;
pub mod source;
pub mod types;

pub use client::CompaniesHouseClient;
pub use source::{RegistrySource, Resource};
pub use types::*;
