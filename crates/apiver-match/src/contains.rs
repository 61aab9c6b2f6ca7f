//! Recursive JSON containment matching

use crate::directive::{ControlMarker, Resolution};
use crate::error::{MatchResult, MismatchError};
use crate::store::VariableStore;
use crate::value::{scalars_equal, ValueKind};
use serde_json::Value;
use std::borrow::Cow;
use tracing::trace;

/// Check that `actual` is contained in the `expected` template.
///
/// - Marked string leaves run their control directives first; masked and
///   stored leaves match anything.
/// - Kinds must agree at every position.
/// - Objects: the actual object may not have more entries than the template,
///   and every template key must be present in the actual object.
/// - Arrays: equal length, compared index by index.
/// - Scalars: equal by value, numbers numerically.
///
/// The first failure is returned. `store` directives write into `store` while
/// matching, so a failed match may still have captured values.
pub fn json_contains(
    actual: &Value,
    expected: &Value,
    store: &mut VariableStore,
) -> MatchResult<()> {
    contains_at("$", actual, expected, store)
}

fn contains_at(
    path: &str,
    actual: &Value,
    expected: &Value,
    store: &mut VariableStore,
) -> MatchResult<()> {
    trace!("Comparing at {}: {} contains {}", path, actual, expected);

    let expected = match resolve(path, actual, expected, store)? {
        Resolution::Suppressed => return Ok(()),
        Resolution::Expect(expected) => expected,
    };

    let actual_kind = ValueKind::of(actual);
    let expected_kind = ValueKind::of(&expected);
    if actual_kind != expected_kind {
        return Err(MismatchError::KindMismatch {
            path: path.to_string(),
            actual: actual_kind,
            expected: expected_kind,
        });
    }

    match (actual, &*expected) {
        (Value::Object(actual_obj), Value::Object(expected_obj)) => {
            if actual_obj.len() > expected_obj.len() {
                return Err(MismatchError::TooManyActualEntries {
                    path: path.to_string(),
                    actual: actual_obj.len(),
                    expected: expected_obj.len(),
                });
            }

            for (key, expected_value) in expected_obj {
                let Some(actual_value) = actual_obj.get(key) else {
                    return Err(MismatchError::MissingKey {
                        path: path.to_string(),
                        key: key.clone(),
                    });
                };
                let child = key_path(path, key);
                contains_at(&child, actual_value, expected_value, store)?;
            }
            Ok(())
        }
        (Value::Array(actual_arr), Value::Array(expected_arr)) => {
            if actual_arr.len() != expected_arr.len() {
                return Err(MismatchError::LengthMismatch {
                    path: path.to_string(),
                    actual: actual_arr.len(),
                    expected: expected_arr.len(),
                });
            }

            for (i, (actual_elem, expected_elem)) in
                actual_arr.iter().zip(expected_arr.iter()).enumerate()
            {
                let child = format!("{}[{}]", path, i);
                contains_at(&child, actual_elem, expected_elem, store)?;
            }
            Ok(())
        }
        (actual, expected) => {
            debug_assert!(actual_kind.is_scalar());
            if scalars_equal(actual, expected) {
                Ok(())
            } else {
                Err(MismatchError::ValueMismatch {
                    path: path.to_string(),
                    actual: actual.clone(),
                    expected: expected.clone(),
                })
            }
        }
    }
}

/// Path of the member `key` under `path`.
///
/// Identifier-like keys use dot notation (`$.Config`). Any other key is
/// written as a quoted JSON string in brackets (`$["a.b"]`), so distinct
/// paths are never rendered the same.
fn key_path(path: &str, key: &str) -> String {
    let plain = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        format!("{}.{}", path, key)
    } else {
        format!("{}[{}]", path, Value::String(key.to_string()))
    }
}

/// Run the control directives of a marked leaf, if `expected` is one
fn resolve<'e>(
    path: &str,
    actual: &Value,
    expected: &'e Value,
    store: &mut VariableStore,
) -> MatchResult<Resolution<'e>> {
    let marker = ControlMarker::parse(expected).map_err(|source| MismatchError::Directive {
        path: path.to_string(),
        source,
    })?;

    Ok(match marker {
        Some(marker) => marker.evaluate(expected, actual, store),
        None => Resolution::Expect(Cow::Borrowed(expected)),
    })
}
