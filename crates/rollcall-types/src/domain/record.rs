use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;
use crate::Result;

/// Storage key under which the whole class mapping is persisted
pub const CLASSES_KEY: &str = "classes";

/// Class name -> class record, in creation order.
///
/// Renaming re-inserts the record, so a renamed class moves to the end.
pub type ClassMap = IndexMap<String, ClassRecord>;

/// Student name -> student record within one class, in the order added
pub type StudentMap = IndexMap<String, StudentRecord>;

/// One completed tracked interval.
///
/// Immutable once appended to a student's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Session {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// `end - start` in milliseconds; negative for malformed sessions
    pub fn duration_ms(&self) -> i64 {
        self.end.millis_since(self.start)
    }

    pub fn is_well_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// A student's tracked history within a class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Completed sessions in order of completion
    #[serde(default)]
    pub sessions: Vec<Session>,

    /// Start of the running interval; `None` when the timer is stopped
    #[serde(rename = "currentSession", default)]
    pub current_session: Option<Timestamp>,
}

impl StudentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.current_session.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(default)]
    pub students: StudentMap,

    /// When the class was created
    pub created: Timestamp,
}

impl ClassRecord {
    pub fn new(created: Timestamp) -> Self {
        Self {
            students: StudentMap::new(),
            created,
        }
    }

    pub fn tracking_count(&self) -> usize {
        self.students.values().filter(|s| s.is_tracking()).count()
    }
}

/// Decode a stored class mapping. `None` (absent key) decodes to an empty map.
pub fn decode_classes(value: Option<serde_json::Value>) -> Result<ClassMap> {
    match value {
        Some(serde_json::Value::Null) | None => Ok(ClassMap::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

pub fn encode_classes(classes: &ClassMap) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(classes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn test_decode_extension_blob() {
        let blob = json!({
            "Math": {
                "students": {
                    "Alice": {
                        "sessions": [
                            {"start": "2024-09-02T09:00:00.000Z", "end": "2024-09-02T09:01:30.000Z"}
                        ],
                        "currentSession": null
                    },
                    "Bob": {
                        "sessions": [],
                        "currentSession": "2024-09-02T09:05:00.000Z"
                    }
                },
                "created": "2024-09-01T08:00:00.000Z"
            }
        });

        let classes = decode_classes(Some(blob)).unwrap();
        let math = &classes["Math"];
        assert_eq!(math.created, ts("2024-09-01T08:00:00.000Z"));
        assert_eq!(math.students["Alice"].sessions[0].duration_ms(), 90_000);
        assert!(!math.students["Alice"].is_tracking());
        assert!(math.students["Bob"].is_tracking());
        assert_eq!(math.tracking_count(), 1);
    }

    #[test]
    fn test_encode_uses_extension_field_names() {
        let mut classes = ClassMap::new();
        let mut class = ClassRecord::new(ts("2024-09-01T08:00:00Z"));
        class.students.insert("Alice".to_string(), StudentRecord::new());
        classes.insert("Math".to_string(), class);

        let value = encode_classes(&classes).unwrap();
        assert_eq!(
            value,
            json!({
                "Math": {
                    "students": {"Alice": {"sessions": [], "currentSession": null}},
                    "created": "2024-09-01T08:00:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_stored_key_order_survives_decode_and_encode() {
        let blob = json!({
            "Zoology": {
                "students": {"Zed": {}, "Amy": {}},
                "created": "2024-09-01T08:00:00.000Z"
            },
            "Algebra": {"students": {}, "created": "2024-09-01T09:00:00.000Z"}
        });

        let classes = decode_classes(Some(blob)).unwrap();
        let names: Vec<&str> = classes.keys().map(String::as_str).collect();
        assert_eq!(names, ["Zoology", "Algebra"]);
        let students: Vec<&str> = classes["Zoology"].students.keys().map(String::as_str).collect();
        assert_eq!(students, ["Zed", "Amy"]);

        let value = encode_classes(&classes).unwrap();
        let encoded: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(encoded, ["Zoology", "Algebra"]);
    }

    #[test]
    fn test_decode_absent_is_empty() {
        assert!(decode_classes(None).unwrap().is_empty());
        assert!(decode_classes(Some(serde_json::Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let blob = json!({"Art": {"created": "2024-01-01T00:00:00.000Z", "students": {"Cy": {}}}});
        let classes = decode_classes(Some(blob)).unwrap();
        let cy = &classes["Art"].students["Cy"];
        assert!(cy.sessions.is_empty());
        assert!(cy.current_session.is_none());
    }

    #[test]
    fn test_session_ordering() {
        let good = Session::new(ts("2024-01-01T00:00:00Z"), ts("2024-01-01T00:00:01Z"));
        let bad = Session::new(ts("2024-01-01T00:00:01Z"), ts("2024-01-01T00:00:00Z"));
        assert!(good.is_well_ordered());
        assert!(!bad.is_well_ordered());
        assert_eq!(bad.duration_ms(), -1_000);
    }
}
