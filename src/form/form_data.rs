use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Form Data - Untyped Field Map
// ============================================================================
//
// What the admin form layer hands over: field names mapped to loosely typed
// values. The accessors perform the coercions the form layer relies on
// (numeric text to integers, form-style boolean truthiness, null-aware
// options) and turn missing fields and shape mismatches into typed errors.
//
// JSON submissions map through from_json. JSON has no date type, so date
// fields only carry a value when set programmatically as FormValue::Date;
// date-looking text stays text.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FormDataError {
    #[error("Missing form field: {0}")]
    MissingField(String),

    #[error("Form field {field} is not a valid {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
}

fn invalid_type(field: &str, expected: &'static str) -> FormDataError {
    FormDataError::InvalidType {
        field: field.to_string(),
        expected,
    }
}

/// A single submitted form value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormValue {
    Null,
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
    Date(NaiveDate),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for FormValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<NaiveDate> for FormValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl<'a> From<Vec<&'a str>> for FormValue {
    fn from(values: Vec<&'a str>) -> Self {
        Self::List(values.into_iter().map(String::from).collect())
    }
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

/// Raw form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormData {
    fields: HashMap<String, FormValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build form data from a JSON object, as the admin endpoints submit it
    pub fn from_json(value: serde_json::Value) -> Result<Self, FormDataError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(FormDataError::InvalidType {
                    field: "<form>".to_string(),
                    expected: "object",
                })
            }
        };

        let mut fields = HashMap::new();
        for (field, value) in map {
            let parsed = json_field_value(&field, value)?;
            fields.insert(field, parsed);
        }

        Ok(Self { fields })
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Look up a field, failing when the form did not submit it at all
    pub fn get(&self, field: &str) -> Result<&FormValue, FormDataError> {
        self.fields
            .get(field)
            .ok_or_else(|| FormDataError::MissingField(field.to_string()))
    }

    /// Required text field
    pub fn text(&self, field: &str) -> Result<String, FormDataError> {
        match self.get(field)? {
            FormValue::Text(value) => Ok(value.clone()),
            _ => Err(invalid_type(field, "text value")),
        }
    }

    /// Optional text field: a submitted null becomes None
    pub fn opt_text(&self, field: &str) -> Result<Option<String>, FormDataError> {
        match self.get(field)? {
            FormValue::Null => Ok(None),
            FormValue::Text(value) => Ok(Some(value.clone())),
            _ => Err(invalid_type(field, "text value")),
        }
    }

    /// Required integer field; numeric text is parsed strictly
    pub fn integer(&self, field: &str) -> Result<u64, FormDataError> {
        match self.get(field)? {
            FormValue::Text(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid_type(field, "integer")),
            FormValue::Number(value) => number_to_integer(field, *value),
            _ => Err(invalid_type(field, "integer")),
        }
    }

    /// Optional integer field: a submitted null becomes None
    pub fn opt_integer(&self, field: &str) -> Result<Option<u64>, FormDataError> {
        match self.get(field)? {
            FormValue::Null => Ok(None),
            _ => self.integer(field).map(Some),
        }
    }

    /// Required list field with every entry parsed as an integer
    pub fn integers(&self, field: &str) -> Result<Vec<u64>, FormDataError> {
        match self.get(field)? {
            FormValue::List(values) => values
                .iter()
                .map(|value| {
                    value
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| invalid_type(field, "integer list"))
                })
                .collect(),
            _ => Err(invalid_type(field, "integer list")),
        }
    }

    /// Optional integer list: a submitted null becomes None
    pub fn opt_integers(&self, field: &str) -> Result<Option<Vec<u64>>, FormDataError> {
        match self.get(field)? {
            FormValue::Null => Ok(None),
            _ => self.integers(field).map(Some),
        }
    }

    /// Required boolean field with form-style truthiness: null, empty text,
    /// "0" and zero are false, any other submitted scalar is true
    pub fn boolean(&self, field: &str) -> Result<bool, FormDataError> {
        match self.get(field)? {
            FormValue::Flag(value) => Ok(*value),
            FormValue::Text(value) => Ok(!value.is_empty() && value != "0"),
            FormValue::Number(value) => Ok(*value != 0.0),
            FormValue::Null => Ok(false),
            _ => Err(invalid_type(field, "boolean")),
        }
    }

    /// Optional decimal field: a submitted null becomes None
    pub fn opt_number(&self, field: &str) -> Result<Option<f64>, FormDataError> {
        match self.get(field)? {
            FormValue::Null => Ok(None),
            FormValue::Number(value) => Ok(Some(*value)),
            FormValue::Text(value) => value
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| invalid_type(field, "decimal")),
            _ => Err(invalid_type(field, "decimal")),
        }
    }

    /// Date field: only a submitted date carries through, any other present
    /// value counts as absent
    pub fn opt_date(&self, field: &str) -> Result<Option<NaiveDate>, FormDataError> {
        match self.get(field)? {
            FormValue::Date(value) => Ok(Some(*value)),
            _ => Ok(None),
        }
    }
}

fn number_to_integer(field: &str, value: f64) -> Result<u64, FormDataError> {
    if value >= 0.0 && value.fract() == 0.0 {
        Ok(value as u64)
    } else {
        Err(invalid_type(field, "integer"))
    }
}

fn json_field_value(field: &str, value: serde_json::Value) -> Result<FormValue, FormDataError> {
    let parsed = match value {
        serde_json::Value::Null => FormValue::Null,
        serde_json::Value::Bool(flag) => FormValue::Flag(flag),
        serde_json::Value::Number(number) => match number.as_f64() {
            Some(value) => FormValue::Number(value),
            None => return Err(invalid_type(field, "number")),
        },
        serde_json::Value::String(text) => FormValue::Text(text),
        serde_json::Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    serde_json::Value::String(text) => list.push(text),
                    serde_json::Value::Number(number) => list.push(number.to_string()),
                    _ => return Err(invalid_type(field, "list of scalars")),
                }
            }
            FormValue::List(list)
        }
        serde_json::Value::Object(_) => return Err(invalid_type(field, "scalar or list")),
    };

    Ok(parsed)
}

// ============================================================================
// Tests
// ============================================================================
