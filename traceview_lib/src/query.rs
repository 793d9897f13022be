//! Query parameters sent with every request.

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved parameter carrying the API key.
pub const KEY_PARAM: &str = "key";

/// Query parameters: name to scalar value. Order is irrelevant.
///
/// ```
/// use traceview_lib::Query;
///
/// let q = Query::new().with("time_window", "hour").with("limit", 5);
/// assert_eq!(q.pairs(), vec![
///     ("limit".to_string(), "5".to_string()),
///     ("time_window".to_string(), "hour".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query(BTreeMap<String, Value>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries of a JSON object. Anything that is not an object yields an
    /// empty query.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            _ => Self::default(),
        }
    }

    /// Serialize an options struct into parameters.
    pub fn from_serialize<T: Serialize>(options: &T) -> Result<Self, Error> {
        Ok(Self::from_value(&serde_json::to_value(options)?))
    }

    /// Overlay `other` onto `self`; entries of `other` win.
    pub fn merge(mut self, other: Query) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Start of the reporting window (`since_time`, UTC milliseconds).
    pub fn since(self, time: DateTime<Utc>) -> Self {
        self.with("since_time", time.timestamp_millis())
    }

    /// Wire form of the parameters. `null` values are dropped.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| render_value(v).map(|v| (k.clone(), v)))
            .collect()
    }

    /// Copy safe to log: the API key is masked.
    pub fn redacted(&self) -> Query {
        let mut copy = self.clone();
        if let Some(v) = copy.0.get_mut(KEY_PARAM) {
            *v = Value::String("[redacted]".to_string());
        }
        copy
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn render_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn non_object_is_empty() {
        assert!(Query::from_value(&json!([])).is_empty());
        assert!(Query::from_value(&json!("key=ABC")).is_empty());
        assert!(Query::from_value(&Value::Null).is_empty());
    }

    #[test]
    fn from_value_keeps_entries() {
        let q = Query::from_value(&json!({"foo": "bar", "lol": 5}));
        assert_eq!(q.len(), 2);
        assert_eq!(q.get("foo"), Some(&json!("bar")));
        assert_eq!(q.get("lol"), Some(&json!(5)));
    }

    #[test]
    fn merge_overlays_right_side() {
        let left = Query::new().with("a", 1).with("b", 1);
        let right = Query::new().with("b", 2);
        let merged = left.merge(right);
        assert_eq!(merged.get("a"), Some(&json!(1)));
        assert_eq!(merged.get("b"), Some(&json!(2)));
    }

    #[test]
    fn pairs_render_scalars_and_drop_nulls() {
        let q = Query::from_value(&json!({
            "create": true,
            "layer": null,
            "message": "deploy v2",
            "ratio": 0.5,
        }));
        assert_eq!(
            q.pairs(),
            vec![
                ("create".to_string(), "true".to_string()),
                ("message".to_string(), "deploy v2".to_string()),
                ("ratio".to_string(), "0.5".to_string()),
            ]
        );
    }

    #[test]
    fn since_is_utc_millis() {
        let t = Utc.with_ymd_and_hms(2014, 3, 1, 12, 0, 0).unwrap();
        let q = Query::new().since(t);
        assert_eq!(q.get("since_time"), Some(&json!(1_393_675_200_000i64)));
    }

    #[test]
    fn redacted_masks_key_only() {
        let q = Query::new().with(KEY_PARAM, "ABC123").with("foo", "bar");
        let r = q.redacted();
        assert_eq!(r.get("foo"), Some(&json!("bar")));
        assert!(!format!("{:?}", r).contains("ABC123"));
        assert_eq!(q.get(KEY_PARAM), Some(&json!("ABC123")));
    }
}
