//! Field-level validation failures collected across a request payload.
//!
//! Payload constructors run every field check and report all failures at
//! once, so a client fixing a form sees each problem in one round trip.

use std::collections::BTreeMap;

use serde_json::json;

use super::Error;

/// Message used for every validation failure; field messages go in details.
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Ordered collection of `field -> message` failures.
///
/// Only the first failure per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field` unless one is already present.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Keep the successful value, or record the failure and return `None`.
    pub fn check<T, E: std::fmt::Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise the collected failures.
    pub fn finish(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldErrors> for Error {
    fn from(value: FieldErrors) -> Self {
        Error::invalid_request(VALIDATION_FAILED).with_details(json!({ "fields": value.0 }))
    }
}
