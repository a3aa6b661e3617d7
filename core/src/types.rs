//! Domain DTOs for the books API.
//!
//! # Design
//! These types mirror the service's JSON schema but are defined independently
//! from the mock-server crate; the integration test catches schema drift.
//! `published_date` stays the string the service sent. Interpreting it as a
//! calendar date is the presentation layer's job.

use serde::{Deserialize, Deserializer, Serialize};

/// A persisted book owned by the remote service.
///
/// Reading is lenient so one odd row cannot fail a whole list: `id` may be a
/// string or a number, and null or missing text fields read as empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    #[serde(alias = "_id", deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Field selector for editing a `DraftRecord` one input at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    PublishedDate,
    Description,
}

/// Unsaved book being composed in the form. Sent as-is on submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub title: String,
    pub author: String,
    pub published_date: String,
    pub description: String,
}

impl DraftRecord {
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::Author => &mut self.author,
            DraftField::PublishedDate => &mut self.published_date,
            DraftField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::PublishedDate => &self.published_date,
            DraftField::Description => &self.description,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Constraints narrowing a list request. `None` means "no constraint" and is
/// omitted from the outgoing query rather than sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: Option<String>,
    pub year: Option<i32>,
}

impl FilterCriteria {
    /// Normalise a raw title input: empty means absent.
    pub fn title_from_input(input: &str) -> Option<String> {
        if input.is_empty() {
            None
        } else {
            Some(input.to_string())
        }
    }

    /// Normalise a raw year input. Blank or non-integer input yields no
    /// constraint, the same as a numeric field holding no value.
    pub fn year_from_input(input: &str) -> Option<i32> {
        input.trim().parse().ok()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.title.is_none() && self.year.is_none()
    }

    /// Query parameters for the present fields only, title before year.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(("title".to_string(), title.clone()));
        }
        if let Some(year) = self.year {
            pairs.push(("year".to_string(), year.to_string()));
        }
        pairs
    }
}
