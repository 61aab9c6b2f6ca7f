//! Per-file variable store for `store`/`replace` directives

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Values captured by `store(key)` directives during one control file run.
///
/// A store is created fresh for every control file and threaded by mutable
/// reference through every match of that file, so a value captured in step N
/// is visible to `replace(key)` in step N+1 and later.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableStore {
    values: HashMap<String, Value>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of `value` under `key`, replacing any previous entry
    pub fn store(&mut self, key: impl Into<String>, value: &Value) {
        self.values.insert(key.into(), value.clone());
    }

    /// Value captured under `key`, or `Null` when nothing was stored
    pub fn lookup(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or(Value::Null)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_missing_is_null() {
        let store = VariableStore::new();
        assert_eq!(store.lookup("nope"), Value::Null);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let mut store = VariableStore::new();
        store.store("id", &json!("first"));
        store.store("id", &json!("second"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("id"), json!("second"));
    }

    #[test]
    fn test_stored_value_is_independent_copy() {
        let mut store = VariableStore::new();
        let mut original = json!({"Id": "abc"});
        store.store("container", &original);
        original["Id"] = json!("changed");
        assert_eq!(store.lookup("container"), json!({"Id": "abc"}));
    }

    #[test]
    fn test_serializes_as_map() {
        let mut store = VariableStore::new();
        store.store("tok", &json!(42));
        assert_eq!(serde_json::to_value(&store).unwrap(), json!({"tok": 42}));
    }
}
