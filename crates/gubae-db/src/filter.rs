//! Filter objects for document queries.
//!
//! A [`Filter`] is a conjunction of [`Condition`]s. An empty filter matches
//! every document in a collection.

use serde_json::Value;

use crate::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field holds exactly this JSON value.
    Equals { field: String, value: Value },
    /// The field is a string containing `needle`, ignoring case.
    Contains { field: String, needle: String },
}

impl Condition {
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Condition::Equals { field, value } => document.get(field) == Some(value),
            Condition::Contains { field, needle } => document
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|haystack| {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Equals {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    /// Adds a case-insensitive substring match. Absent or blank needles add nothing.
    pub fn contains(mut self, field: &str, needle: Option<&str>) -> Self {
        if let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) {
            self.conditions.push(Condition::Contains {
                field: field.to_string(),
                needle: needle.to_string(),
            });
        }
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }
}
