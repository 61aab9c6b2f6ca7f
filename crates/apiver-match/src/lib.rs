//! JSON containment matching for API conformance fixtures
//!
//! This crate compares an actual JSON response against an expected template
//! recorded in a control file. Expected string leaves may carry control
//! directives (`mask`, `store(key)`, `replace(key)`) that correlate values
//! across the steps of one control file through a [`VariableStore`].
//!
//! # Example
//!
//! ```
//! use apiver_match::{json_contains, VariableStore};
//! use serde_json::json;
//!
//! let mut store = VariableStore::new();
//!
//! // Step 1: capture the generated id
//! let created = json!({"Id": "e90e34656806", "Warnings": null});
//! let template = json!({"Id": ">>>CONTROL:store(cid)", "Warnings": null});
//! json_contains(&created, &template, &mut store).unwrap();
//!
//! // Step 2: the same id must come back
//! let inspected = json!({"Id": "e90e34656806"});
//! let template = json!({"Id": ">>>CONTROL:replace(cid)"});
//! json_contains(&inspected, &template, &mut store).unwrap();
//! ```

mod contains;
mod directive;
mod error;
mod store;
mod value;

pub use contains::json_contains;
pub use directive::{ControlDirective, ControlMarker, Resolution, CONTROL_PREFIX};
pub use error::{DirectiveError, MatchResult, MismatchError};
pub use store::VariableStore;
pub use value::ValueKind;

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
