//! Control-person classification
//!
//! Turns a PSC record into a report line and, for corporate controllers,
//! a new ownership edge to follow.

use crate::crawl::entity::Entity;
use crate::registry::ControlPerson;
use crate::report::{ReportLine, UNKNOWN};

pub const CORPORATE_PSC_KIND: &str = "corporate-entity-person-with-significant-control";
pub const INDIVIDUAL_PSC_KIND: &str = "individual-person-with-significant-control";

/// Outcome of classifying one control person
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A corporate controller; `discovered` is set when it has a registration number
    Corporate {
        line: ReportLine,
        discovered: Option<Entity>,
    },
    Individual {
        line: ReportLine,
    },
    /// Any other kind (legal person, super-secure, ...)
    Unrecognized {
        line: ReportLine,
    },
}

impl Classification {
    pub fn line(&self) -> &ReportLine {
        match self {
            Self::Corporate { line, .. }
            | Self::Individual { line }
            | Self::Unrecognized { line } => line,
        }
    }

    pub fn into_parts(self) -> (ReportLine, Option<Entity>) {
        match self {
            Self::Corporate { line, discovered } => (line, discovered),
            Self::Individual { line } | Self::Unrecognized { line } => (line, None),
        }
    }
}

pub fn classify(person: &ControlPerson) -> Classification {
    let name = person.name.clone().unwrap_or_else(|| UNKNOWN.to_string());

    match person.kind.as_str() {
        CORPORATE_PSC_KIND => {
            let identification = person.identification.clone().unwrap_or_default();
            let registration_number = identification
                .registration_number
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty());

            Classification::Corporate {
                line: ReportLine::CorporatePsc {
                    registration_number: registration_number.unwrap_or(UNKNOWN).to_string(),
                    name,
                    country: identification
                        .country_registered
                        .unwrap_or_else(|| UNKNOWN.to_string()),
                    ceased_on: person.ceased_on.clone(),
                },
                discovered: registration_number.map(Entity::company),
            }
        }
        INDIVIDUAL_PSC_KIND => Classification::Individual {
            line: ReportLine::IndividualPsc {
                name,
                nationality: person
                    .nationality
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                birth_year: person
                    .date_of_birth
                    .map(|d| d.year.to_string())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                ceased_on: person.ceased_on.clone(),
            },
        },
        other => Classification::Unrecognized {
            line: ReportLine::OtherPsc {
                kind: other.to_string(),
                name,
                ceased_on: person.ceased_on.clone(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Identification, PartialDate};

    fn person(kind: &str) -> ControlPerson {
        ControlPerson {
            kind: kind.to_string(),
            name: Some("HOLDCO LIMITED".to_string()),
            nationality: None,
            date_of_birth: None,
            identification: None,
            ceased_on: None,
        }
    }

    #[test]
    fn test_corporate_psc_discovers_company() {
        let mut psc = person(CORPORATE_PSC_KIND);
        psc.identification = Some(Identification {
            country_registered: Some("England".to_string()),
            registration_number: Some("456".to_string()),
            ..Default::default()
        });

        let (line, discovered) = classify(&psc).into_parts();
        assert_eq!(line.to_string(), "PSC: 456: HOLDCO LIMITED (England)");
        assert_eq!(discovered, Some(Entity::company("00000456")));
    }

    #[test]
    fn test_corporate_psc_without_registration_number_has_no_edge() {
        let (line, discovered) = classify(&person(CORPORATE_PSC_KIND)).into_parts();
        assert_eq!(line.to_string(), "PSC: ?: HOLDCO LIMITED (?)");
        assert!(discovered.is_none());
    }

    #[test]
    fn test_individual_psc() {
        let psc = ControlPerson {
            kind: INDIVIDUAL_PSC_KIND.to_string(),
            name: Some("Mrs Jane Smith".to_string()),
            nationality: Some("British".to_string()),
            date_of_birth: Some(PartialDate {
                month: Some(4),
                year: 1970,
            }),
            identification: None,
            ceased_on: Some("2022-01-01".to_string()),
        };

        let classification = classify(&psc);
        assert!(matches!(classification, Classification::Individual { .. }));
        assert_eq!(
            classification.line().to_string(),
            "PSC: Mrs Jane Smith, British, YOB 1970, ceased 2022-01-01"
        );
    }

    #[test]
    fn test_unrecognized_kind_is_surfaced() {
        let classification = classify(&person("legal-person-person-with-significant-control"));
        assert!(matches!(classification, Classification::Unrecognized { .. }));
        assert_eq!(
            classification.line().to_string(),
            "PSC: legal-person-person-with-significant-control: HOLDCO LIMITED"
        );
        assert!(classification.into_parts().1.is_none());
    }
}
