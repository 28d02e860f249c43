//! Filing description templates
//!
//! Maps a filing description code (e.g. `confirmation-statement-with-updates`)
//! to a human-readable template with `{placeholder}` slots. The table is
//! loaded from YAML in either the Companies House api-enumerations layout
//! (`description: { code: template }`) or as a flat `code: template` map.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CrawlError, Result};

const BUILTIN_TABLE: &str = include_str!("../config/filing_descriptions.yaml");

#[derive(Deserialize)]
#[serde(untagged)]
enum TableFile {
    Enumerations {
        description: HashMap<String, String>,
    },
    Flat(HashMap<String, String>),
}

/// Code to template lookup table
#[derive(Debug, Clone, Default)]
pub struct DescriptionTemplates {
    templates: HashMap<String, String>,
}

impl DescriptionTemplates {
    /// An empty table; every filing renders its raw code
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_TABLE).map_err(|message| CrawlError::Templates {
            path: "<builtin>".into(),
            message,
        })
    }

    /// Load a table from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CrawlError::Templates {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = Self::from_yaml(&content).map_err(|message| CrawlError::Templates {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = ?path, count = table.len(), "Loaded filing description templates");
        Ok(table)
    }

    /// Load from `path` when given, else fall back to the built-in table
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, String> {
        let file: TableFile = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        let templates = match file {
            TableFile::Enumerations { description } => description,
            TableFile::Flat(map) => map,
        };
        Ok(Self { templates })
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.templates.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DescriptionTemplates {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
