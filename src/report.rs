//! Report lines and sinks
//!
//! The crawl emits one `ReportLine` per record. Each line renders with a
//! fixed label prefix so the text output stays greppable.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::registry::CompanyProfile;

/// Placeholder for absent officer / PSC attributes
pub const UNKNOWN: &str = "?";

/// One record of the ownership report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    CompanyHeader {
        number: String,
        name: String,
        jurisdiction: String,
        incorporated: String,
        company_type: String,
        status: String,
        liquidated: Option<bool>,
    },
    CompanyAddress {
        number: String,
        address: String,
    },
    CompanyAccounts {
        number: String,
        last_made_up_to: String,
        overdue: bool,
    },
    CompanyPreviousName {
        number: String,
        name: String,
        ceased_on: Option<String>,
    },
    /// The company detail fetch gave nothing usable
    NoInformation {
        number: String,
    },
    CorporatePsc {
        registration_number: String,
        name: String,
        country: String,
        ceased_on: Option<String>,
    },
    IndividualPsc {
        name: String,
        nationality: String,
        birth_year: String,
        ceased_on: Option<String>,
    },
    /// A PSC whose kind is neither corporate nor individual
    OtherPsc {
        kind: String,
        name: String,
        ceased_on: Option<String>,
    },
    Officer {
        role: String,
        name: String,
        nationality: String,
        birth_year: String,
    },
    Filing {
        date: String,
        text: String,
    },
    Annotation {
        date: String,
        text: String,
    },
    /// A sub-report could not be fetched; the crawl carried on
    SectionUnavailable {
        number: String,
        section: String,
        reason: String,
    },
}

impl ReportLine {
    /// Build the company summary lines from a profile
    pub fn company_summary(profile: &CompanyProfile) -> Vec<ReportLine> {
        let number = profile.company_number.clone();
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());

        let mut lines = vec![ReportLine::CompanyHeader {
            number: number.clone(),
            name: field(&profile.company_name),
            jurisdiction: field(&profile.jurisdiction),
            incorporated: field(&profile.date_of_creation),
            company_type: field(&profile.company_type),
            status: field(&profile.company_status),
            liquidated: profile.has_been_liquidated,
        }];

        lines.push(ReportLine::CompanyAddress {
            number: number.clone(),
            address: profile
                .registered_office_address
                .as_ref()
                .map(|a| a.one_line())
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        });

        lines.push(ReportLine::CompanyAccounts {
            number: number.clone(),
            last_made_up_to: profile
                .last_accounts_made_up_to()
                .unwrap_or(UNKNOWN)
                .to_string(),
            overdue: profile.accounts_overdue(),
        });

        for previous in &profile.previous_company_names {
            lines.push(ReportLine::CompanyPreviousName {
                number: number.clone(),
                name: previous.name.clone(),
                ceased_on: previous.ceased_on.clone(),
            });
        }

        lines
    }
}

fn ceased_suffix(ceased_on: &Option<String>) -> String {
    ceased_on
        .as_ref()
        .map(|d| format!(", ceased {}", d))
        .unwrap_or_default()
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompanyHeader {
                number,
                name,
                jurisdiction,
                incorporated,
                company_type,
                status,
                liquidated,
            } => {
                write!(
                    f,
                    "Company {}: {} ({}), incorporated {}, type {}, status {}",
                    number, name, jurisdiction, incorporated, company_type, status
                )?;
                if let Some(liquidated) = liquidated {
                    write!(f, ", has been liquidated: {}", liquidated)?;
                }
                Ok(())
            }
            Self::CompanyAddress { number, address } => {
                write!(f, "Company {} address: {}", number, address)
            }
            Self::CompanyAccounts {
                number,
                last_made_up_to,
                overdue,
            } => {
                write!(f, "Company {} accounts: last made up to {}", number, last_made_up_to)?;
                if *overdue {
                    write!(f, " (OVERDUE)")?;
                }
                Ok(())
            }
            Self::CompanyPreviousName {
                number,
                name,
                ceased_on,
            } => {
                write!(f, "Company {} previous name: {}", number, name)?;
                if let Some(ceased_on) = ceased_on {
                    write!(f, " (until {})", ceased_on)?;
                }
                Ok(())
            }
            Self::NoInformation { number } => {
                write!(f, "Company {}: no information available", number)
            }
            Self::CorporatePsc {
                registration_number,
                name,
                country,
                ceased_on,
            } => write!(
                f,
                "PSC: {}: {} ({}){}",
                registration_number,
                name,
                country,
                ceased_suffix(ceased_on)
            ),
            Self::IndividualPsc {
                name,
                nationality,
                birth_year,
                ceased_on,
            } => write!(
                f,
                "PSC: {}, {}, YOB {}{}",
                name,
                nationality,
                birth_year,
                ceased_suffix(ceased_on)
            ),
            Self::OtherPsc {
                kind,
                name,
                ceased_on,
            } => write!(f, "PSC: {}: {}{}", kind, name, ceased_suffix(ceased_on)),
            Self::Officer {
                role,
                name,
                nationality,
                birth_year,
            } => write!(
                f,
                "Officer: {}: {}, {}, YOB {}",
                role, name, nationality, birth_year
            ),
            Self::Filing { date, text } => write!(f, "Filing: {}: {}", date, text),
            Self::Annotation { date, text } => write!(f, "Annotation: {}: {}", date, text),
            Self::SectionUnavailable {
                number,
                section,
                reason,
            } => write!(
                f,
                "Section unavailable: {} for company {}: {}",
                section, number, reason
            ),
        }
    }
}

/// Destination for report lines, written in crawl order
pub trait ReportSink {
    fn emit(&mut self, line: ReportLine) -> Result<()>;
}

/// Collects lines in memory
impl ReportSink for Vec<ReportLine> {
    fn emit(&mut self, line: ReportLine) -> Result<()> {
        self.push(line);
        Ok(())
    }
}

/// Writes one line per record to any `Write` (stdout in the binary)
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit(&mut self, line: ReportLine) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Address, PreviousName};

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_number: "00000123".to_string(),
            company_name: Some("ACME LIMITED".to_string()),
            jurisdiction: Some("england-wales".to_string()),
            date_of_creation: Some("1999-01-02".to_string()),
            company_type: Some("ltd".to_string()),
            company_status: Some("active".to_string()),
            registered_office_address: Some(Address {
                address_line_1: Some("1 High Street".to_string()),
                locality: Some("London".to_string()),
                ..Default::default()
            }),
            accounts: None,
            previous_company_names: vec![PreviousName {
                name: "ACME TRADING LIMITED".to_string(),
                effective_from: None,
                ceased_on: Some("2005-06-07".to_string()),
            }],
            has_been_liquidated: Some(false),
        }
    }

    #[test]
    fn test_company_summary_lines() {
        let rendered: Vec<String> = ReportLine::company_summary(&profile())
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            rendered,
            vec![
                "Company 00000123: ACME LIMITED (england-wales), incorporated 1999-01-02, type ltd, status active, has been liquidated: false",
                "Company 00000123 address: 1 High Street, London",
                "Company 00000123 accounts: last made up to ?",
                "Company 00000123 previous name: ACME TRADING LIMITED (until 2005-06-07)",
            ]
        );
    }

    #[test]
    fn test_label_prefixes() {
        let officer = ReportLine::Officer {
            role: "director".to_string(),
            name: "SMITH, Jane".to_string(),
            nationality: "British".to_string(),
            birth_year: "1970".to_string(),
        };
        assert_eq!(officer.to_string(), "Officer: director: SMITH, Jane, British, YOB 1970");

        let psc = ReportLine::CorporatePsc {
            registration_number: "00000456".to_string(),
            name: "HOLDCO LIMITED".to_string(),
            country: "England".to_string(),
            ceased_on: None,
        };
        assert_eq!(psc.to_string(), "PSC: 00000456: HOLDCO LIMITED (England)");

        let annotation = ReportLine::Annotation {
            date: "2023-01-01".to_string(),
            text: "Clarification".to_string(),
        };
        assert_eq!(annotation.to_string(), "Annotation: 2023-01-01: Clarification");
    }

    #[test]
    fn test_writer_sink_writes_one_line_per_record() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(ReportLine::NoInformation {
            number: "00000123".to_string(),
        })
        .unwrap();
        sink.emit(ReportLine::Filing {
            date: "2023-01-01".to_string(),
            text: "Incorporation".to_string(),
        })
        .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "Company 00000123: no information available\nFiling: 2023-01-01: Incorporation\n"
        );
    }
}
