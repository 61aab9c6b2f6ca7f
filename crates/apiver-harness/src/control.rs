//! Control file model
//!
//! A control file is a JSON array of steps:
//!
//! ```text
//! [
//!   {
//!     "method": "POST",
//!     "command": "/containers/create",
//!     "request":  { "data": { "Image": "busybox" } },
//!     "response": { "data": { "Id": ">>>CONTROL:store(cid)", "Warnings": null } }
//!   }
//! ]
//! ```
//!
//! The runner prefixes `command` with `/<version>`.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Ordered steps of one control file
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ControlFile {
    steps: Vec<TestStep>,
}

impl ControlFile {
    pub fn new(steps: Vec<TestStep>) -> Self {
        Self { steps }
    }

    /// Read and decode a control file
    pub fn load(path: impl AsRef<Path>) -> ControlResult<Self> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| ControlError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_slice(&content).map_err(|e| ControlError::DecodeControlFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn steps(&self) -> &[TestStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One request and the response it should produce
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestStep {
    /// HTTP method, sent as written
    pub method: String,
    /// Path suffix appended to `/<version>`
    pub command: String,
    /// Absent or `null` sends no body
    #[serde(default)]
    pub request: Option<RequestSpec>,
    pub response: ResponseSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RequestSpec {
    /// JSON request body; `null` sends no body
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponseSpec {
    pub data: ExpectedResponse,
}

/// What the response body is checked against.
///
/// A JSON string in `response.data` means a substring check on the raw body,
/// anything else is a containment template.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "Value", into = "Value")]
pub enum ExpectedResponse {
    Text(String),
    Json(Value),
}

impl From<Value> for ExpectedResponse {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ExpectedResponse::Text(s),
            other => ExpectedResponse::Json(other),
        }
    }
}

impl From<ExpectedResponse> for Value {
    fn from(expected: ExpectedResponse) -> Self {
        match expected {
            ExpectedResponse::Text(s) => Value::String(s),
            ExpectedResponse::Json(v) => v,
        }
    }
}

impl TestStep {
    pub fn new(
        method: impl Into<String>,
        command: impl Into<String>,
        request: Value,
        response: impl Into<ExpectedResponse>,
    ) -> Self {
        Self {
            method: method.into(),
            command: command.into(),
            request: Some(RequestSpec { data: request }),
            response: ResponseSpec {
                data: response.into(),
            },
        }
    }

    /// Request path for this step under the given version tag
    pub fn target(&self, version: &str) -> String {
        format!("/{}{}", version, self.command)
    }

    /// Body to send, `None` when the request data is `null`
    pub fn request_body(&self) -> Option<&Value> {
        self.request
            .as_ref()
            .map(|request| &request.data)
            .filter(|data| !data.is_null())
    }

    pub fn expected(&self) -> &ExpectedResponse {
        &self.response.data
    }
}
