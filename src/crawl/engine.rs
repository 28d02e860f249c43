//! Traversal engine
//!
//! Walks the ownership graph outward from a root company. The graph is
//! discovered lazily: a company's corporate controllers only become known
//! once its PSC list has been fetched.
//!
//! Order is strict FIFO breadth-first: entities are visited in the order
//! they were discovered. An entity enters the worklist at most once, since
//! the discovered set covers both visited and pending entities.

use std::collections::{HashSet, VecDeque};

use chrono::NaiveDate;

use super::classifier::{classify, Classification};
use super::entity::{Entity, EntityKind};
use super::filing::{cutoff_date, FilingRenderer};
use super::pagination::fetch_all;
use crate::config::{CrawlerConfig, DEFAULT_FILING_WINDOW_YEARS, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::registry::{ControlPerson, Filing, Officer, RegistrySource, Resource};
use crate::report::{ReportLine, ReportSink, UNKNOWN};
use crate::templates::DescriptionTemplates;

/// Options controlling one traversal
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub page_size: usize,
    pub filing_window_years: u32,
    /// Maximum ownership depth to expand; the root is depth 0
    pub max_depth: Option<usize>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            filing_window_years: DEFAULT_FILING_WINDOW_YEARS,
            max_depth: None,
        }
    }
}

impl From<&CrawlerConfig> for CrawlOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            page_size: config.page_size,
            filing_window_years: config.filing_window_years,
            max_depth: config.max_depth,
        }
    }
}

/// Outcome of a completed crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Entities in the order they were visited
    pub visited: Vec<Entity>,
    /// Companies whose detail fetch produced nothing usable
    pub unavailable: Vec<Entity>,
    /// Sub-report sections that failed and were skipped
    pub sections_failed: usize,
    pub lines: usize,
}

/// Per-section labels used in logs and `Section unavailable` lines
#[derive(Debug, Clone, Copy)]
enum Section {
    Officers,
    ControlPersons,
    Filings,
}

impl Section {
    fn label(&self) -> &'static str {
        match self {
            Self::Officers => "officers",
            Self::ControlPersons => "persons with significant control",
            Self::Filings => "filing history",
        }
    }
}

/// Ownership-graph crawler over any registry source
pub struct Crawler<'a> {
    source: &'a dyn RegistrySource,
    templates: &'a DescriptionTemplates,
    options: CrawlOptions,
    cutoff: NaiveDate,
}

impl<'a> Crawler<'a> {
    /// Create a crawler for a run dated `as_of`.
    ///
    /// The filing cutoff is fixed here and used for every entity of the run.
    pub fn new(
        source: &'a dyn RegistrySource,
        templates: &'a DescriptionTemplates,
        options: CrawlOptions,
        as_of: NaiveDate,
    ) -> Self {
        let cutoff = cutoff_date(as_of, options.filing_window_years);
        Self {
            source,
            templates,
            options,
            cutoff,
        }
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    /// Crawl from `root_number`, writing the report to `sink`
    pub async fn run(
        &self,
        root_number: &str,
        sink: &mut dyn ReportSink,
    ) -> Result<CrawlSummary> {
        let mut run = Run {
            sink,
            summary: CrawlSummary::default(),
            worklist: VecDeque::new(),
            discovered: HashSet::new(),
        };

        run.discover(Entity::company(root_number), 0);
        tracing::info!(root = %root_number, cutoff = %self.cutoff, "Starting ownership crawl");

        while let Some((entity, depth)) = run.worklist.pop_front() {
            run.summary.visited.push(entity.clone());
            match entity.kind {
                EntityKind::Company => self.visit_company(&mut run, &entity, depth).await?,
            }
        }

        tracing::info!(
            visited = run.summary.visited.len(),
            unavailable = run.summary.unavailable.len(),
            sections_failed = run.summary.sections_failed,
            "Ownership crawl finished"
        );
        Ok(run.summary)
    }

    async fn visit_company(
        &self,
        run: &mut Run<'_>,
        entity: &Entity,
        depth: usize,
    ) -> Result<()> {
        let number = entity.id.as_str();
        tracing::info!(company = number, depth, "Visiting company");

        let profile = match self.source.company(number).await {
            Ok(profile) => profile,
            Err(e) if e.is_entity_local() => {
                tracing::warn!(company = number, error = %e, "No company information");
                run.summary.unavailable.push(entity.clone());
                return run.emit(ReportLine::NoInformation {
                    number: number.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        for line in ReportLine::company_summary(&profile) {
            run.emit(line)?;
        }

        let officers = self.officers(run, number).await;
        self.settle(run, number, Section::Officers, officers)?;

        let persons = self.control_persons(run, number, depth).await;
        self.settle(run, number, Section::ControlPersons, persons)?;

        let filings = self.filings(run, number).await;
        self.settle(run, number, Section::Filings, filings)
    }

    /// Recover from a failed section unless the failure is fatal
    fn settle(
        &self,
        run: &mut Run<'_>,
        number: &str,
        section: Section,
        outcome: Result<()>,
    ) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if e.is_entity_local() => {
                tracing::warn!(
                    company = number,
                    section = section.label(),
                    error = %e,
                    "Section unavailable"
                );
                run.summary.sections_failed += 1;
                run.emit(ReportLine::SectionUnavailable {
                    number: number.to_string(),
                    section: section.label().to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn officers(&self, run: &mut Run<'_>, number: &str) -> Result<()> {
        let officers: Vec<Officer> =
            fetch_all(self.source, Resource::Officers, number, self.options.page_size).await?;

        for officer in officers.into_iter().filter(Officer::is_active) {
            run.emit(ReportLine::Officer {
                role: officer.officer_role,
                name: officer.name,
                nationality: officer.nationality.unwrap_or_else(|| UNKNOWN.to_string()),
                birth_year: officer
                    .date_of_birth
                    .map(|d| d.year.to_string())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
            })?;
        }
        Ok(())
    }

    async fn control_persons(
        &self,
        run: &mut Run<'_>,
        number: &str,
        depth: usize,
    ) -> Result<()> {
        let persons: Vec<ControlPerson> = fetch_all(
            self.source,
            Resource::PersonsWithSignificantControl,
            number,
            self.options.page_size,
        )
        .await?;

        let may_expand = self.options.max_depth.map_or(true, |max| depth < max);

        for person in &persons {
            let classification = classify(person);
            if matches!(classification, Classification::Unrecognized { .. }) {
                tracing::warn!(company = number, kind = %person.kind, "Unrecognized PSC kind");
            }

            let (line, discovered) = classification.into_parts();
            run.emit(line)?;

            if let Some(controller) = discovered {
                if may_expand && run.discover(controller.clone(), depth + 1) {
                    tracing::info!(
                        company = number,
                        controller = %controller.id,
                        "Discovered corporate controller"
                    );
                }
            }
        }
        Ok(())
    }

    async fn filings(&self, run: &mut Run<'_>, number: &str) -> Result<()> {
        let filings: Vec<Filing> = fetch_all(
            self.source,
            Resource::FilingHistory,
            number,
            self.options.page_size,
        )
        .await?;

        let renderer = FilingRenderer::new(self.cutoff, self.templates);
        for filing in &filings {
            for line in renderer.render(filing) {
                run.emit(line)?;
            }
        }
        Ok(())
    }
}

/// Mutable state of a single crawl
struct Run<'s> {
    sink: &'s mut dyn ReportSink,
    summary: CrawlSummary,
    worklist: VecDeque<(Entity, usize)>,
    /// Visited and pending entities
    discovered: HashSet<Entity>,
}

impl Run<'_> {
    /// Queue an entity unless it was already discovered; true if queued
    fn discover(&mut self, entity: Entity, depth: usize) -> bool {
        if self.discovered.insert(entity.clone()) {
            self.worklist.push_back((entity, depth));
            true
        } else {
            false
        }
    }

    fn emit(&mut self, line: ReportLine) -> Result<()> {
        self.summary.lines += 1;
        self.sink.emit(line)
    }
}
