use std::collections::{btree_map, BTreeMap};

use chrono::{DateTime, Local};
use common_utils::consts::GATEWAY_DATETIME_FORMAT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single request field: either a wire-ready string or a local timestamp that is rendered
/// as `YYYYMMDDHHmmss` before it leaves the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Time(DateTime<Local>),
}

impl ParamValue {
    /// Empty text counts as "not supplied".
    pub fn is_supplied(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::Time(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Time(_) => None,
        }
    }

    pub fn to_wire_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Time(time) => time.format(GATEWAY_DATETIME_FORMAT).to_string(),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<DateTime<Local>> for ParamValue {
    fn from(value: DateTime<Local>) -> Self {
        Self::Time(value)
    }
}

impl From<common_utils::TradeNo> for ParamValue {
    fn from(value: common_utils::TradeNo) -> Self {
        Self::Text(value.into_inner())
    }
}

/// Parameters of one outgoing gateway call, keyed by wire field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParameterSet(BTreeMap<String, ParamValue>);

impl RequestParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder style [`Self::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&ParamValue> {
        self.0.get(field)
    }

    pub fn get_text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ParamValue::as_text)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<ParamValue> {
        self.0.remove(field)
    }

    pub fn is_supplied(&self, field: &str) -> bool {
        self.get(field).is_some_and(ParamValue::is_supplied)
    }

    /// Insert the lazily computed default unless the field already carries a value.
    pub fn insert_if_missing<V, F>(&mut self, field: &str, default: F)
    where
        V: Into<ParamValue>,
        F: FnOnce() -> V,
    {
        if !self.is_supplied(field) {
            self.insert(field, default());
        }
    }

    /// Overlay `other` on top of `self`; fields in `other` win.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Render a timestamp field to its wire string in place.
    pub fn format_time(&mut self, field: &str) {
        if let Some(value) = self.0.get_mut(field) {
            if matches!(value, ParamValue::Time(_)) {
                let wire = value.to_wire_string();
                *value = ParamValue::Text(wire);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }

    /// Every field as its wire string, in ascending field-name order.
    pub fn into_wire(self) -> BTreeMap<String, String> {
        self.0
            .into_iter()
            .map(|(field, value)| {
                let wire = value.to_wire_string();
                (field, wire)
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a RequestParameterSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Flat field mapping of an asynchronous gateway notification.
///
/// Values are strings straight out of the XML document; the response normalizer turns the
/// amount and count fields into integers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationRecord(Map<String, Value>);

impl NotificationRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for NotificationRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
