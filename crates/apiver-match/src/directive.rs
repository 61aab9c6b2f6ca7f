//! Control directives embedded in expected string leaves
//!
//! An expected string that starts with [`CONTROL_PREFIX`] is not a literal.
//! The remainder is a comma-separated directive list:
//!
//! - `mask` - accept any actual value at this position
//! - `store(key)` - capture the actual value under `key` (implies `mask`)
//! - `replace(key)` - compare against the value captured under `key`
//!
//! ```text
//! {"Id": ">>>CONTROL:store(container_id)"}
//! {"Id": ">>>CONTROL:replace(container_id)", "Created": ">>>CONTROL:mask"}
//! ```
//!
//! Unknown directive names are ignored.

use crate::error::DirectiveError;
use crate::store::VariableStore;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Sentinel that marks an expected string as a directive list
pub const CONTROL_PREFIX: &str = ">>>CONTROL:";

/// A single parsed directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlDirective {
    Mask,
    Store(String),
    Replace(String),
}

impl ControlDirective {
    /// Parse one token of a directive list.
    ///
    /// Returns `Ok(None)` for empty tokens and unknown directive names.
    pub fn parse(token: &str) -> Result<Option<Self>, DirectiveError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let (name, arg) = split_argument(token)?;
        match name {
            "mask" => match arg {
                Some(arg) if !arg.is_empty() => {
                    Err(DirectiveError::UnexpectedArgument(name.to_string()))
                }
                _ => Ok(Some(ControlDirective::Mask)),
            },
            "store" => Ok(Some(ControlDirective::Store(required_key(name, arg)?))),
            "replace" => Ok(Some(ControlDirective::Replace(required_key(name, arg)?))),
            other => {
                debug!("Ignoring unknown control directive: {}", other);
                Ok(None)
            }
        }
    }
}

/// Split `name(arg)` into its parts; a bare `name` has no argument
fn split_argument(token: &str) -> Result<(&str, Option<&str>), DirectiveError> {
    let unbalanced = || DirectiveError::UnbalancedParens(token.to_string());

    let Some(open) = token.find('(') else {
        if token.contains(')') {
            return Err(unbalanced());
        }
        return Ok((token, None));
    };

    let name = token[..open].trim_end();
    let arg = token[open + 1..].strip_suffix(')').ok_or_else(unbalanced)?;
    if arg.contains(['(', ')']) {
        return Err(unbalanced());
    }

    Ok((name, Some(arg.trim())))
}

fn required_key(name: &str, arg: Option<&str>) -> Result<String, DirectiveError> {
    match arg {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => Err(DirectiveError::MissingArgument(name.to_string())),
    }
}

/// What the matcher should do with a marked leaf after its directives ran
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'e> {
    /// The leaf matches whatever the actual value is
    Suppressed,
    /// Continue comparing against this expected value
    Expect(Cow<'e, Value>),
}

/// Parsed directive list of one marked expected leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMarker {
    directives: Vec<ControlDirective>,
}

impl ControlMarker {
    /// Parse the marker carried by `expected`, if any.
    ///
    /// Returns `Ok(None)` for non-strings and for strings without the
    /// control prefix. The whole list is parsed before anything is applied.
    pub fn parse(expected: &Value) -> Result<Option<Self>, DirectiveError> {
        let Some(raw) = expected
            .as_str()
            .and_then(|s| s.strip_prefix(CONTROL_PREFIX))
        else {
            return Ok(None);
        };

        let mut directives = Vec::new();
        for token in raw.split(',') {
            if let Some(directive) = ControlDirective::parse(token)? {
                directives.push(directive);
            }
        }

        Ok(Some(Self { directives }))
    }

    pub fn directives(&self) -> &[ControlDirective] {
        &self.directives
    }

    /// Apply the directives left to right against the actual value.
    ///
    /// `marker` is the expected leaf the directives were parsed from; it stays
    /// the expected value unless a `replace` substitutes another one.
    pub fn evaluate<'e>(
        &self,
        marker: &'e Value,
        actual: &Value,
        store: &mut VariableStore,
    ) -> Resolution<'e> {
        let mut suppressed = false;
        let mut expected = Cow::Borrowed(marker);

        for directive in &self.directives {
            match directive {
                ControlDirective::Mask => suppressed = true,
                ControlDirective::Store(key) => {
                    debug!("Storing {} with key {}", actual, key);
                    store.store(key.as_str(), actual);
                    suppressed = true;
                }
                ControlDirective::Replace(key) => {
                    let stored = store.lookup(key);
                    debug!("Replacing with {} using key {}", stored, key);
                    expected = Cow::Owned(stored);
                }
            }
        }

        if suppressed {
            debug!("Masked");
            Resolution::Suppressed
        } else {
            Resolution::Expect(expected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn marker(s: &str) -> ControlMarker {
        ControlMarker::parse(&json!(s)).unwrap().unwrap()
    }

    #[test]
    fn test_plain_values_are_not_markers() {
        assert_eq!(ControlMarker::parse(&json!("mask")).unwrap(), None);
        assert_eq!(ControlMarker::parse(&json!(12)).unwrap(), None);
        assert_eq!(
            ControlMarker::parse(&json!("prefix >>>CONTROL:mask")).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_directive_list() {
        let m = marker(">>>CONTROL: store(id) , replace( other ),mask");
        assert_eq!(
            m.directives(),
            &[
                ControlDirective::Store("id".to_string()),
                ControlDirective::Replace("other".to_string()),
                ControlDirective::Mask,
            ]
        );
    }

    #[test]
    fn test_unknown_and_empty_tokens_are_ignored() {
        let m = marker(">>>CONTROL:frobnicate,,ignore(me),mask");
        assert_eq!(m.directives(), &[ControlDirective::Mask]);

        let empty = marker(">>>CONTROL:");
        assert!(empty.directives().is_empty());
    }

    #[test]
    fn test_unbalanced_parens() {
        for raw in [
            ">>>CONTROL:store(id",
            ">>>CONTROL:store id)",
            ">>>CONTROL:store((id))",
            ">>>CONTROL:replace(a)b",
        ] {
            let err = ControlMarker::parse(&json!(raw)).unwrap_err();
            assert!(
                matches!(err, DirectiveError::UnbalancedParens(_)),
                "{raw}: {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_and_unexpected_arguments() {
        assert_eq!(
            ControlMarker::parse(&json!(">>>CONTROL:store")).unwrap_err(),
            DirectiveError::MissingArgument("store".to_string())
        );
        assert_eq!(
            ControlMarker::parse(&json!(">>>CONTROL:replace()")).unwrap_err(),
            DirectiveError::MissingArgument("replace".to_string())
        );
        assert_eq!(
            ControlMarker::parse(&json!(">>>CONTROL:mask(x)")).unwrap_err(),
            DirectiveError::UnexpectedArgument("mask".to_string())
        );
        assert!(ControlMarker::parse(&json!(">>>CONTROL:mask()")).is_ok());
    }

    #[test]
    fn test_store_suppresses_and_records_actual() {
        let expected = json!(">>>CONTROL:store(tok)");
        let mut store = VariableStore::new();
        let resolution = marker(">>>CONTROL:store(tok)").evaluate(&expected, &json!("xyz"), &mut store);
        assert_eq!(resolution, Resolution::Suppressed);
        assert_eq!(store.lookup("tok"), json!("xyz"));
    }

    #[test]
    fn test_replace_substitutes_stored_value() {
        let expected = json!(">>>CONTROL:replace(tok)");
        let mut store = VariableStore::new();
        store.store("tok", &json!({"nested": [1, 2]}));
        let resolution = marker(">>>CONTROL:replace(tok)").evaluate(&expected, &json!(null), &mut store);
        assert_eq!(
            resolution,
            Resolution::Expect(Cow::Owned(json!({"nested": [1, 2]})))
        );
    }

    #[test]
    fn test_replace_missing_key_substitutes_null() {
        let expected = json!(">>>CONTROL:replace(nothing)");
        let mut store = VariableStore::new();
        let resolution = marker(">>>CONTROL:replace(nothing)").evaluate(&expected, &json!("a"), &mut store);
        assert_eq!(resolution, Resolution::Expect(Cow::Owned(Value::Null)));
    }

    #[test]
    fn test_unknown_only_keeps_marker_as_expected() {
        let expected = json!(">>>CONTROL:bogus");
        let mut store = VariableStore::new();
        let resolution = marker(">>>CONTROL:bogus").evaluate(&expected, &json!("a"), &mut store);
        assert_eq!(resolution, Resolution::Expect(Cow::Borrowed(&expected)));
    }

    #[test]
    fn test_directives_apply_left_to_right() {
        let expected = json!(">>>CONTROL:store(a),replace(a)");
        let mut store = VariableStore::new();
        store.store("a", &json!("old"));
        let resolution = marker(">>>CONTROL:store(a),replace(a)").evaluate(&expected, &json!("new"), &mut store);
        // store ran first, and its implied mask survives the replace
        assert_eq!(resolution, Resolution::Suppressed);
        assert_eq!(store.lookup("a"), json!("new"));
    }
}
