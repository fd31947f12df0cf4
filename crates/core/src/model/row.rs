use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A loosely typed record as decoded from an uploaded question file.
///
/// Values keep whatever type the source produced; [`RawRow::text`] coerces
/// them to trimmed strings when the bank builder reads a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(HashMap<String, Value>);

impl RawRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous value under the same key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Trimmed text of `key`. Missing and null fields read as empty.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_owned(),
            Some(other) => other.to_string().trim().to_owned(),
        }
    }

    /// Trimmed text of `primary`, or of the first alias holding a value when
    /// `primary` is blank.
    ///
    /// An alias is picked on its raw value and trimmed afterwards, so a
    /// whitespace-only alias still wins over the ones after it.
    #[must_use]
    pub fn text_or_alias(&self, primary: &str, aliases: &[&str]) -> String {
        let text = self.text(primary);
        if !text.is_empty() {
            return text;
        }
        aliases
            .iter()
            .find(|alias| self.0.get(**alias).is_some_and(holds_value))
            .map(|alias| self.text(alias))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Empty strings, zero, `false` and null count as no value.
fn holds_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
