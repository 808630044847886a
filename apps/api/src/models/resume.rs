//! Resume record as supplied by the persistence layer.
//!
//! Every field is optional. Deserialization is lenient: `null`, missing keys,
//! misshapen collections and mistyped leaves (a phone number sent as a JSON number, a boolean sent as
//! a string) are accepted so that the layout engine never sees a hard failure
//! for anything short of a missing `content` object.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

/// A stored resume: display title, template identifier and structured content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub template: Option<String>,
    #[serde(deserialize_with = "lenient_object")]
    pub content: Option<ResumeContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeContent {
    #[serde(deserialize_with = "lenient_object")]
    pub basic: Option<BasicInfo>,
    #[serde(deserialize_with = "entries")]
    pub education: Option<Vec<Education>>,
    #[serde(deserialize_with = "entries")]
    pub experience: Option<Vec<Experience>>,
    #[serde(deserialize_with = "lenient_object")]
    pub skills: Option<Skills>,
    #[serde(deserialize_with = "entries")]
    pub projects: Option<Vec<Project>>,
    #[serde(deserialize_with = "entries")]
    pub certifications: Option<Vec<Certification>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "lenient_string")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub field: Option<String>,
    pub start_date: Option<DateValue>,
    pub end_date: Option<DateValue>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    pub start_date: Option<DateValue>,
    pub end_date: Option<DateValue>,
    #[serde(deserialize_with = "lenient_bool")]
    pub current: bool,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub highlights: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "lenient_strings")]
    pub technical: Option<Vec<Option<String>>>,
    #[serde(deserialize_with = "lenient_strings")]
    pub soft: Option<Vec<Option<String>>>,
    #[serde(deserialize_with = "lenient_strings")]
    pub languages: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub technologies: Option<Vec<Option<String>>>,
    #[serde(deserialize_with = "lenient_strings")]
    pub highlights: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub issuer: Option<String>,
    pub date: Option<DateValue>,
    #[serde(deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Date values
// ────────────────────────────────────────────────────────────────────────────

/// A date-like value exactly as the producer stored it.
///
/// JSON numbers are epoch milliseconds (the producer's native date objects),
/// JSON strings are kept verbatim and parsed later. Any other JSON shape is
/// kept as its textual form and will fail to parse downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    /// A typed calendar date, only constructed from Rust code.
    Calendar(NaiveDate),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    Text(String),
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DateValue::Calendar(date) => {
                serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
            }
            DateValue::Timestamp(millis) => serializer.serialize_i64(*millis),
            DateValue::Text(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => DateValue::Text(raw),
            Value::Number(number) => match number.as_i64() {
                Some(millis) => DateValue::Timestamp(millis),
                None => match number.as_f64() {
                    Some(millis) if millis.is_finite() => DateValue::Timestamp(millis as i64),
                    _ => DateValue::Text(number.to_string()),
                },
            },
            other => DateValue::Text(other.to_string()),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field deserializers
// ────────────────────────────────────────────────────────────────────────────

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// A list of strings; a lone scalar is treated as a one-element list and
/// non-text elements become `None` so they can be defaulted at render time.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Option<Vec<Option<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Array(items) => Some(items.into_iter().map(scalar_text).collect()),
        scalar => Some(vec![scalar_text(scalar)]),
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        _ => false,
    })
}

/// An object field; any other JSON shape, or an object that still fails to
/// deserialize, reads as absent.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(object_from(Value::deserialize(deserializer)?))
}

fn object_from<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// A list of entries. A non-list reads as absent; elements that are not
/// objects (including `null`) are dropped.
fn entries<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().filter_map(object_from).collect()),
        _ => None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
