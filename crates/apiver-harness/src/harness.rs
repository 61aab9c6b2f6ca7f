//! Suite harness: runs every enumerated control file

use crate::client::{HttpClient, RequestClient};
use crate::config::HarnessConfig;
use crate::error::{ControlError, ControlResult, TransportError};
use crate::fixtures::{Fixture, FixtureEnumerator};
use crate::runner::{CaseOutcome, ControlCaseRunner};
use tracing::{error, info};

/// Result of running one control file
#[derive(Debug)]
pub struct CaseResult {
    pub fixture: Fixture,
    pub outcome: ControlResult<CaseOutcome>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ControlError> {
        self.outcome.as_ref().err()
    }
}

/// Per-file results of a harness run
#[derive(Debug, Default)]
pub struct HarnessReport {
    pub results: Vec<CaseResult>,
}

impl HarnessReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(CaseResult::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results.iter().filter(|r| !r.passed())
    }

    /// Log one line per control file and a totals line
    pub fn log_summary(&self) {
        for result in &self.results {
            match &result.outcome {
                Ok(outcome) => info!(
                    "PASS {} [{}] ({} steps)",
                    result.fixture.path.display(),
                    result.fixture.version,
                    outcome.steps_run()
                ),
                Err(e) => error!(
                    "FAIL {} [{}]: {}",
                    result.fixture.path.display(),
                    result.fixture.version,
                    e
                ),
            }
        }

        info!("Results: {}/{} control files passed", self.passed(), self.total());
    }
}

/// Runs enumerated control files one after another.
///
/// A failing file is recorded and the harness moves on to the next one;
/// only a failure to enumerate fixtures aborts the run.
pub struct ConformanceHarness<C> {
    runner: ControlCaseRunner<C>,
}

impl ConformanceHarness<HttpClient> {
    /// Harness sending requests over HTTP as configured
    pub fn from_config(config: &HarnessConfig) -> Result<Self, TransportError> {
        Ok(Self::new(HttpClient::from_config(config)?))
    }
}

impl<C: RequestClient> ConformanceHarness<C> {
    pub fn new(client: C) -> Self {
        Self {
            runner: ControlCaseRunner::new(client),
        }
    }

    pub fn run_fixture(&self, fixture: &Fixture) -> CaseResult {
        let outcome = self.runner.run_path(&fixture.path, &fixture.version);
        if let Err(ref e) = outcome {
            error!("{}: {}", fixture.path.display(), e);
        }

        CaseResult {
            fixture: fixture.clone(),
            outcome,
        }
    }

    pub fn run_all(&self, fixtures: &dyn FixtureEnumerator) -> ControlResult<HarnessReport> {
        let fixtures = fixtures.fixtures()?;
        info!("Running {} control files", fixtures.len());

        Ok(HarnessReport {
            results: fixtures.iter().map(|f| self.run_fixture(f)).collect(),
        })
    }
}
