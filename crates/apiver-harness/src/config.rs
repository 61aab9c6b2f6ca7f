//! Configuration for running control files

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the endpoint under test and the fixtures to run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL requests are sent to; targets are appended as `/<version><command>`
    pub base_url: String,
    /// Bearer token sent with every request, if set
    pub token: Option<String>,
    /// Root of the `<version>/<control file>` tree
    pub fixture_dir: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables
    ///
    /// - `APIVER_BASE_URL` (default `http://localhost:2375`)
    /// - `APIVER_TOKEN`
    /// - `APIVER_FIXTURE_DIR` (default `tests/api-version-data` in the workspace)
    /// - `APIVER_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> Self {
        let fixture_dir = env::var("APIVER_FIXTURE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_fixture_dir());

        let timeout = match env::var("APIVER_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw).unwrap_or_else(|| {
                warn!(
                    "Ignoring invalid APIVER_TIMEOUT_SECS '{}', using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }),
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Self {
            base_url: env::var("APIVER_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:2375".to_string()),
            token: env::var("APIVER_TOKEN").ok().filter(|t| !t.is_empty()),
            fixture_dir,
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = dir.into();
        self
    }
}

/// `tests/api-version-data` at the workspace root
fn default_fixture_dir() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.join("tests").join("api-version-data"))
        .unwrap_or_else(|| manifest_dir.join("tests").join("api-version-data"))
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
