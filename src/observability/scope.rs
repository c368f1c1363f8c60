//! ObservationScope for begin/complete logging around one operation
//!
//! - Logs `{name}_BEGIN` at TRACE on creation
//! - Logs `{name}_COMPLETE` at INFO with `elapsed_ms` on `complete*`
//! - Logs `{name}_FAILED` at ERROR on `fail`
//! - Logs `{name}_INCOMPLETE` at WARN if dropped otherwise

use std::time::Instant;

use super::logger::Logger;

/// A scope that logs the outcome and duration of one operation
///
/// ```ignore
/// let scope = ObservationScope::with_fields("STORE_DELETE", &[("id", id)]);
/// // ... do work ...
/// scope.complete(); // logs STORE_DELETE_COMPLETE
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    started: Instant,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObservationScope<'a> {
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        Logger::trace(&format!("{}_BEGIN", name), fields);

        Self {
            name,
            completed: false,
            started: Instant::now(),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra_fields: &[(&str, &str)]) {
        self.completed = true;
        let elapsed = self.elapsed_ms();

        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", &elapsed));

        Logger::info(&format!("{}_COMPLETE", self.name), &all_fields);
    }

    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        let mut all_fields: Vec<(&str, &str)> =
            self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        all_fields.push(("reason", reason));

        Logger::error(&format!("{}_FAILED", self.name), &all_fields);
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
