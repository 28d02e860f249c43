//! Companies House API response types
//!
//! Only the fields the ownership report reads are mapped; everything else
//! in the upstream payloads is ignored.
//!
//! Reference: https://developer-specs.company-information.service.gov.uk/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Company profile (`/company/{number}`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyProfile {
    pub company_number: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub date_of_creation: Option<String>,
    #[serde(rename = "type", default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub company_status: Option<String>,
    #[serde(default)]
    pub registered_office_address: Option<Address>,
    #[serde(default)]
    pub accounts: Option<AccountsInfo>,
    #[serde(default)]
    pub previous_company_names: Vec<PreviousName>,
    #[serde(default)]
    pub has_been_liquidated: Option<bool>,
}

impl CompanyProfile {
    pub fn last_accounts_made_up_to(&self) -> Option<&str> {
        self.accounts
            .as_ref()
            .and_then(|a| a.last_accounts.as_ref())
            .and_then(|l| l.made_up_to.as_deref())
    }

    pub fn accounts_overdue(&self) -> bool {
        self.accounts
            .as_ref()
            .and_then(|a| a.overdue)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Address {
    pub care_of: Option<String>,
    pub po_box: Option<String>,
    pub premises: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Single-line rendering, skipping empty parts
    pub fn one_line(&self) -> String {
        [
            &self.care_of,
            &self.po_box,
            &self.premises,
            &self.address_line_1,
            &self.address_line_2,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountsInfo {
    #[serde(default)]
    pub last_accounts: Option<LastAccounts>,
    #[serde(default)]
    pub overdue: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LastAccounts {
    #[serde(default)]
    pub made_up_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PreviousName {
    pub name: String,
    #[serde(default)]
    pub effective_from: Option<String>,
    #[serde(default)]
    pub ceased_on: Option<String>,
}

/// Partial date of birth (the registry never publishes the day)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PartialDate {
    #[serde(default)]
    pub month: Option<u32>,
    pub year: i32,
}

/// Officer list item (`/company/{number}/officers`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Officer {
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<PartialDate>,
    #[serde(default)]
    pub resigned_on: Option<String>,
    pub officer_role: String,
}

impl Officer {
    pub fn is_active(&self) -> bool {
        self.resigned_on.is_none()
    }
}

/// Person with significant control (`/company/{number}/persons-with-significant-control`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControlPerson {
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<PartialDate>,
    #[serde(default)]
    pub identification: Option<Identification>,
    #[serde(default)]
    pub ceased_on: Option<String>,
}

/// Registration details of a corporate or legal-person controller
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Identification {
    pub country_registered: Option<String>,
    pub registration_number: Option<String>,
    pub legal_authority: Option<String>,
    pub legal_form: Option<String>,
    pub place_registered: Option<String>,
}

/// Filing history item (`/company/{number}/filing-history`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Filing {
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_values: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(rename = "type", default)]
    pub filing_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Annotation {
    #[serde(default)]
    pub annotation: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of a counted list resource, items left undecoded
#[derive(Debug, Clone, Default)]
pub struct RawPage {
    pub items: Vec<serde_json::Value>,
    /// Total item count reported by the registry for the whole list
    pub total: usize,
}
