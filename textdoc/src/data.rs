//! JSON data store backing `value` placeholders
//!
//! The data source is a JSON object:
//!
//! ```json
//! { "title": "Invoice", "data": { "name": "Alice", "amount": "42.00" } }
//! ```
//!
//! `title` is optional document metadata some renderers display. `data` maps
//! placeholder ids to string values. A source without a usable `data` section
//! still loads: every placeholder lookup then reports a diagnostic.

use crate::error::{CompileError, DataError};
use crate::markup::{find_attribute, MarkupEvent, MarkupReader};
use serde_json::{Map, Value};
use std::io::Read;

/// Outcome of looking up a placeholder id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Value(String),
    Missing,
    NotAString,
    NoDataSection,
}

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    title: Option<String>,
    data: Option<Map<String, Value>>,
    warnings: Vec<String>,
}

impl DataStore {
    /// A store with no data section; every lookup yields `NoDataSection`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store directly from id/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let data = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        DataStore {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let Value::Object(mut root) = value else {
            return Err(DataError::NotAnObject);
        };

        let mut warnings = Vec::new();
        let data = match root.remove("data") {
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                warnings.push("Data section 'data' is not a JSON object".to_string());
                None
            }
            None => {
                warnings.push("Data source has no 'data' section".to_string());
                None
            }
        };
        let title = match root.remove("title") {
            Some(Value::String(title)) => Some(title),
            Some(_) => {
                warnings.push("Document 'title' is not a string".to_string());
                None
            }
            None => None,
        };

        tracing::debug!(
            keys = data.as_ref().map_or(0, |d| d.len()),
            has_title = title.is_some(),
            "Loaded data store"
        );
        Ok(DataStore {
            title,
            data,
            warnings,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn has_data_section(&self) -> bool {
        self.data.is_some()
    }

    /// Problems found while loading; reported once per compilation
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn resolve(&self, id: &str) -> Resolution {
        let Some(data) = &self.data else {
            return Resolution::NoDataSection;
        };
        match data.get(id) {
            Some(Value::String(value)) => Resolution::Value(value.clone()),
            Some(_) => Resolution::NotAString,
            None => Resolution::Missing,
        }
    }

    /// A data source document with an empty string for each id
    pub fn skeleton<I, S>(ids: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data: Map<String, Value> = ids
            .into_iter()
            .map(|id| (id.into(), Value::String(String::new())))
            .collect();
        let mut root = Map::new();
        root.insert("title".to_string(), Value::String(String::new()));
        root.insert("data".to_string(), Value::Object(data));
        Value::Object(root)
    }
}

/// Ids of every `value` placeholder in a template, first occurrence order
pub fn placeholder_ids(template: &str) -> Result<Vec<String>, CompileError> {
    let mut ids: Vec<String> = Vec::new();
    for event in MarkupReader::new(template) {
        if let MarkupEvent::Start { name, attributes } = event? {
            if !name.eq_ignore_ascii_case("value") {
                continue;
            }
            if let Some(id) = find_attribute(&attributes, "id") {
                if !ids.iter().any(|known| known == id) {
                    ids.push(id.to_string());
                }
            }
        }
    }
    Ok(ids)
}
