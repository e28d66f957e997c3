//! Roster fixtures in the same shape the store persists.

use anyhow::{Context, Result};
use rollcall_types::{ClassMap, ClassRecord, Session, StudentRecord, Timestamp, encode_classes};
use serde_json::Value;

/// Fluent builder for a stored class mapping.
///
/// ```
/// use rollcall_testing::RosterFixture;
///
/// let value = RosterFixture::new()
///     .class("Math")
///     .student("Math", "Alice")
///     .session("Math", "Alice", "2024-09-02T09:00:00.000Z", "2024-09-02T09:01:30.000Z")
///     .to_value()
///     .unwrap();
/// assert!(value["Math"]["students"]["Alice"]["sessions"].is_array());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterFixture {
    classes: ClassMap,
}

pub const FIXTURE_CREATED: &str = "2024-09-01T08:00:00.000Z";

impl RosterFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, name: &str) -> Self {
        self.classes
            .entry(name.to_string())
            .or_insert_with(|| ClassRecord::new(ts(FIXTURE_CREATED)));
        self
    }

    pub fn student(mut self, class: &str, student: &str) -> Self {
        self.student_mut(class, student);
        self
    }

    pub fn session(mut self, class: &str, student: &str, start: &str, end: &str) -> Self {
        self.student_mut(class, student)
            .sessions
            .push(Session::new(ts(start), ts(end)));
        self
    }

    pub fn running(mut self, class: &str, student: &str, start: &str) -> Self {
        self.student_mut(class, student).current_session = Some(ts(start));
        self
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    pub fn to_value(&self) -> Result<Value> {
        encode_classes(&self.classes).context("Failed to encode fixture")
    }

    fn student_mut(&mut self, class: &str, student: &str) -> &mut StudentRecord {
        self.classes
            .entry(class.to_string())
            .or_insert_with(|| ClassRecord::new(ts(FIXTURE_CREATED)))
            .students
            .entry(student.to_string())
            .or_default()
    }
}

fn ts(value: &str) -> Timestamp {
    value
        .parse()
        .unwrap_or_else(|e| panic!("invalid fixture timestamp {}: {}", value, e))
}
