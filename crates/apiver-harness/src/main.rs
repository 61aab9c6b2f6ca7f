//! Runs every control file under the configured fixture directory
//!
//! Configuration comes from the environment, see [`HarnessConfig::from_env`].
//! Log verbosity follows `RUST_LOG` (default `info`); `RUST_LOG=debug` shows
//! each step and every store/replace, `trace` every comparison.

use anyhow::{bail, Result};
use apiver_harness::{ConformanceHarness, DirectoryFixtures, HarnessConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = HarnessConfig::from_env();
    info!(
        "Running control files from {} against {}",
        config.fixture_dir.display(),
        config.base_url
    );

    let harness = ConformanceHarness::from_config(&config)?;
    let report = harness.run_all(&DirectoryFixtures::new(&config.fixture_dir))?;
    report.log_summary();

    if !report.all_passed() {
        bail!(
            "{} of {} control files failed",
            report.failed(),
            report.total()
        );
    }

    Ok(())
}
