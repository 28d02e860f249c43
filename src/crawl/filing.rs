//! Filing renderer
//!
//! Applies the crawl-wide cutoff and turns filing records into report lines.

use std::sync::OnceLock;

use chrono::{Months, NaiveDate};
use regex::{Captures, Regex};

use crate::registry::Filing;
use crate::report::{ReportLine, UNKNOWN};
use crate::templates::DescriptionTemplates;

const FILING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a templated description could not be produced
#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateFailure {
    UnknownCode,
    MissingValue(String),
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid placeholder regex"))
}

/// Earliest filing date kept for a crawl run on `as_of`
pub fn cutoff_date(as_of: NaiveDate, window_years: u32) -> NaiveDate {
    as_of
        .checked_sub_months(Months::new(window_years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

pub struct FilingRenderer<'a> {
    cutoff: NaiveDate,
    templates: &'a DescriptionTemplates,
}

impl<'a> FilingRenderer<'a> {
    pub fn new(cutoff: NaiveDate, templates: &'a DescriptionTemplates) -> Self {
        Self { cutoff, templates }
    }

    /// Render one filing; filings before the cutoff yield no lines
    pub fn render(&self, filing: &Filing) -> Vec<ReportLine> {
        let date = match NaiveDate::parse_from_str(&filing.date, FILING_DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!(
                    date = %filing.date,
                    error = %e,
                    "Skipping filing with unreadable date"
                );
                return Vec::new();
            }
        };
        if date < self.cutoff {
            return Vec::new();
        }

        if let Some(annotations) = filing.annotations.as_ref().filter(|a| !a.is_empty()) {
            return annotations
                .iter()
                .map(|a| ReportLine::Annotation {
                    date: a.date.clone().unwrap_or_else(|| filing.date.clone()),
                    text: a
                        .annotation
                        .clone()
                        .or_else(|| a.description.clone())
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                })
                .collect();
        }

        let code = filing
            .description
            .as_deref()
            .or(filing.filing_type.as_deref())
            .unwrap_or(UNKNOWN);

        let text = match self.describe(code, filing) {
            Ok(text) => text,
            Err(TemplateFailure::UnknownCode) => code.to_string(),
            Err(TemplateFailure::MissingValue(name)) => {
                tracing::debug!(code, missing = %name, "Template value missing, using raw code");
                code.to_string()
            }
        };

        vec![ReportLine::Filing {
            date: filing.date.clone(),
            text,
        }]
    }

    fn describe(&self, code: &str, filing: &Filing) -> Result<String, TemplateFailure> {
        let template = self
            .templates
            .get(code)
            .ok_or(TemplateFailure::UnknownCode)?
            .replace("**", "");

        let mut missing = None;
        let rendered = placeholder_pattern().replace_all(&template, |caps: &Captures| {
            let name = &caps[1];
            match filing.description_values.get(name) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
                Some(other) => other.to_string(),
            }
        });

        match missing {
            Some(name) => Err(TemplateFailure::MissingValue(name)),
            None => Ok(rendered.into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Annotation;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn filing(date: &str, code: &str, values: &[(&str, &str)]) -> Filing {
        Filing {
            date: date.to_string(),
            description: Some(code.to_string()),
            description_values: values
                .iter()
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect::<BTreeMap<_, _>>(),
            annotations: None,
            filing_type: Some("CS01".to_string()),
            category: None,
        }
    }

    fn templates() -> DescriptionTemplates {
        [(
            "confirmation-statement-with-updates",
            "**Confirmation statement** made on {made_up_date} with updates",
        )]
        .into_iter()
        .collect()
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_cutoff_is_three_years_back() {
        assert_eq!(
            cutoff_date(as_of(), 3),
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_filings_before_cutoff_are_dropped() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);

        assert!(renderer
            .render(&filing("2020-06-01", "incorporation-company", &[]))
            .is_empty());
        assert_eq!(
            renderer.render(&filing("2022-06-01", "incorporation-company", &[])),
            vec![ReportLine::Filing {
                date: "2022-06-01".to_string(),
                text: "incorporation-company".to_string(),
            }]
        );
    }

    #[test]
    fn test_cutoff_day_itself_is_kept() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        assert_eq!(
            renderer
                .render(&filing("2021-01-01", "resolution", &[]))
                .len(),
            1
        );
        assert!(renderer
            .render(&filing("2020-12-31", "resolution", &[]))
            .is_empty());
    }

    #[test]
    fn test_template_substitution_strips_emphasis() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        let lines = renderer.render(&filing(
            "2023-02-03",
            "confirmation-statement-with-updates",
            &[("made_up_date", "2023-01-31")],
        ));
        assert_eq!(
            lines[0].to_string(),
            "Filing: 2023-02-03: Confirmation statement made on 2023-01-31 with updates"
        );
    }

    #[test]
    fn test_missing_value_falls_back_to_raw_code() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        let lines = renderer.render(&filing(
            "2023-02-03",
            "confirmation-statement-with-updates",
            &[],
        ));
        assert_eq!(
            lines[0].to_string(),
            "Filing: 2023-02-03: confirmation-statement-with-updates"
        );
    }

    #[test]
    fn test_annotations_replace_description() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        let mut annotated = filing(
            "2023-02-03",
            "confirmation-statement-with-updates",
            &[("made_up_date", "2023-01-31")],
        );
        annotated.annotations = Some(vec![
            Annotation {
                annotation: Some("Clarification A second filed CS01".to_string()),
                date: Some("2023-03-01".to_string()),
                description: None,
            },
            Annotation {
                annotation: None,
                date: None,
                description: Some("annotation".to_string()),
            },
        ]);

        let rendered: Vec<String> = renderer
            .render(&annotated)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "Annotation: 2023-03-01: Clarification A second filed CS01",
                "Annotation: 2023-02-03: annotation",
            ]
        );
    }

    #[test]
    fn test_empty_annotation_list_renders_description() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        let mut unannotated = filing(
            "2023-02-03",
            "confirmation-statement-with-updates",
            &[("made_up_date", "2023-01-31")],
        );
        unannotated.annotations = Some(Vec::new());

        assert_eq!(
            renderer.render(&unannotated),
            vec![ReportLine::Filing {
                date: "2023-02-03".to_string(),
                text: "Confirmation statement made on 2023-01-31 with updates".to_string(),
            }]
        );
    }

    #[test]
    fn test_unreadable_date_is_skipped() {
        let table = templates();
        let renderer = FilingRenderer::new(cutoff_date(as_of(), 3), &table);
        assert!(renderer
            .render(&filing("yesterday", "resolution", &[]))
            .is_empty());
    }
}
