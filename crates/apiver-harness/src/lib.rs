//! API version conformance harness
//!
//! Runs control files (recorded request/expected-response sequences) against
//! a live API endpoint and checks every response with
//! [`apiver_match::json_contains`].
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐     ┌──────────────────┐
//! │ FixtureEnumerator │────▶│ ConformanceHarness│
//! │ <version>/<file>  │     └────────┬─────────┘
//! └───────────────────┘              │ one file at a time
//!                           ┌────────▼─────────┐    ┌───────────────┐
//!                           │ ControlCaseRunner │───▶│ RequestClient │
//!                           │  (VariableStore)  │◀───│  status, body │
//!                           └────────┬─────────┘    └───────────────┘
//!                                    │
//!                             ┌──────▼──────┐
//!                             │ json_contains│
//!                             └─────────────┘
//! ```

pub mod client;
pub mod config;
pub mod control;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod runner;

pub use client::{HttpClient, RawResponse, RequestClient};
pub use config::HarnessConfig;
pub use control::{ControlFile, ExpectedResponse, TestStep};
pub use error::{ControlError, ControlResult, TransportError};
pub use fixtures::{DirectoryFixtures, Fixture, FixtureEnumerator};
pub use harness::{CaseResult, ConformanceHarness, HarnessReport};
pub use runner::{CaseOutcome, ControlCaseRunner};
