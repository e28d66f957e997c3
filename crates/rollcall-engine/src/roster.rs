use rollcall_types::{ClassMap, ClassRecord, Session, StudentRecord, Timestamp, normalize_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when a class is renamed onto a name that already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenamePolicy {
    /// Leave both classes untouched
    #[default]
    Reject,
    /// Replace the existing class with the renamed one
    Overwrite,
}

/// Result of a single roster mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    Unchanged(Skip),
}

impl Change {
    pub fn is_applied(&self) -> bool {
        matches!(self, Change::Applied)
    }
}

/// Why a guarded mutation left the roster as it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Skip {
    EmptyName,
    DuplicateName,
    SameName,
    UnknownClass,
    UnknownStudent,
    AlreadyTracking,
    NotTracking,
    NothingToDo,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Skip::EmptyName => "name is empty",
            Skip::DuplicateName => "name already exists",
            Skip::SameName => "name is unchanged",
            Skip::UnknownClass => "no such class",
            Skip::UnknownStudent => "no such student",
            Skip::AlreadyTracking => "timer is already running",
            Skip::NotTracking => "timer is not running",
            Skip::NothingToDo => "nothing to do",
        };
        f.write_str(reason)
    }
}

/// A stored session whose end precedes its start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSession {
    pub class: String,
    pub student: String,
    pub session: Session,
}

/// In-memory class mapping and every mutation allowed on it.
///
/// All operations are guards: invalid or redundant requests return
/// `Change::Unchanged` and leave the mapping untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    classes: ClassMap,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: ClassMap) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &ClassMap {
        &self.classes
    }

    pub fn into_classes(self) -> ClassMap {
        self.classes
    }

    pub fn class(&self, name: &str) -> Option<&ClassRecord> {
        self.classes.get(name)
    }

    pub fn student(&self, class: &str, student: &str) -> Option<&StudentRecord> {
        self.classes.get(class)?.students.get(student)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn add_class(&mut self, name: &str, now: Timestamp) -> Change {
        let Some(name) = normalize_name(name) else {
            return Change::Unchanged(Skip::EmptyName);
        };
        if self.classes.contains_key(&name) {
            return Change::Unchanged(Skip::DuplicateName);
        }

        self.classes.insert(name, ClassRecord::new(now));
        Change::Applied
    }

    /// Move a class to a new key, keeping its students, sessions and creation time.
    pub fn rename_class(&mut self, from: &str, to: &str, policy: RenamePolicy) -> Change {
        let Some(to) = normalize_name(to) else {
            return Change::Unchanged(Skip::EmptyName);
        };
        if to == from {
            return Change::Unchanged(Skip::SameName);
        }
        if !self.classes.contains_key(from) {
            return Change::Unchanged(Skip::UnknownClass);
        }
        if self.classes.contains_key(&to) && policy == RenamePolicy::Reject {
            return Change::Unchanged(Skip::DuplicateName);
        }

        // An overwritten target keeps its slot; otherwise the class moves to the end.
        if let Some(record) = self.classes.shift_remove(from) {
            self.classes.insert(to, record);
        }
        Change::Applied
    }

    pub fn delete_class(&mut self, name: &str) -> Change {
        match self.classes.shift_remove(name) {
            Some(_) => Change::Applied,
            None => Change::Unchanged(Skip::UnknownClass),
        }
    }

    pub fn add_student(&mut self, class: &str, student: &str) -> Change {
        let Some(student) = normalize_name(student) else {
            return Change::Unchanged(Skip::EmptyName);
        };
        let Some(record) = self.classes.get_mut(class) else {
            return Change::Unchanged(Skip::UnknownClass);
        };
        if record.students.contains_key(&student) {
            return Change::Unchanged(Skip::DuplicateName);
        }

        record.students.insert(student, StudentRecord::new());
        Change::Applied
    }

    /// Remove a student. A running interval is discarded, not stopped.
    pub fn remove_student(&mut self, class: &str, student: &str) -> Change {
        let Some(record) = self.classes.get_mut(class) else {
            return Change::Unchanged(Skip::UnknownClass);
        };
        match record.students.shift_remove(student) {
            Some(_) => Change::Applied,
            None => Change::Unchanged(Skip::UnknownStudent),
        }
    }

    pub fn start_timer(&mut self, class: &str, student: &str, now: Timestamp) -> Change {
        match self.student_mut(class, student) {
            Ok(record) => start(record, now),
            Err(skip) => Change::Unchanged(skip),
        }
    }

    pub fn stop_timer(&mut self, class: &str, student: &str, now: Timestamp) -> Change {
        match self.student_mut(class, student) {
            Ok(record) => stop(record, now),
            Err(skip) => Change::Unchanged(skip),
        }
    }

    /// Stop a running timer, or start a stopped one
    pub fn toggle_timer(&mut self, class: &str, student: &str, now: Timestamp) -> Change {
        match self.student_mut(class, student) {
            Ok(record) if record.is_tracking() => stop(record, now),
            Ok(record) => start(record, now),
            Err(skip) => Change::Unchanged(skip),
        }
    }

    pub fn start_all(&mut self, class: &str, now: Timestamp) -> Change {
        self.apply_to_class(class, |record| start(record, now))
    }

    pub fn stop_all(&mut self, class: &str, now: Timestamp) -> Change {
        self.apply_to_class(class, |record| stop(record, now))
    }

    /// Stored sessions with `end < start`, in mapping order
    pub fn malformed_sessions(&self) -> Vec<MalformedSession> {
        let mut found = Vec::new();
        for (class_name, class) in &self.classes {
            for (student_name, student) in &class.students {
                for session in student.sessions.iter().filter(|s| !s.is_well_ordered()) {
                    found.push(MalformedSession {
                        class: class_name.clone(),
                        student: student_name.clone(),
                        session: *session,
                    });
                }
            }
        }
        found
    }

    fn student_mut(
        &mut self,
        class: &str,
        student: &str,
    ) -> Result<&mut StudentRecord, Skip> {
        self.classes
            .get_mut(class)
            .ok_or(Skip::UnknownClass)?
            .students
            .get_mut(student)
            .ok_or(Skip::UnknownStudent)
    }

    fn apply_to_class<F>(&mut self, class: &str, mut step: F) -> Change
    where
        F: FnMut(&mut StudentRecord) -> Change,
    {
        let Some(record) = self.classes.get_mut(class) else {
            return Change::Unchanged(Skip::UnknownClass);
        };

        let mut applied = 0;
        for student in record.students.values_mut() {
            if step(student).is_applied() {
                applied += 1;
            }
        }

        if applied > 0 {
            Change::Applied
        } else {
            Change::Unchanged(Skip::NothingToDo)
        }
    }
}

fn start(record: &mut StudentRecord, now: Timestamp) -> Change {
    if record.is_tracking() {
        return Change::Unchanged(Skip::AlreadyTracking);
    }
    record.current_session = Some(now);
    Change::Applied
}

// End is clamped to the start so a clock that moved backwards cannot log a negative session.
fn stop(record: &mut StudentRecord, now: Timestamp) -> Change {
    let Some(start) = record.current_session.take() else {
        return Change::Unchanged(Skip::NotTracking);
    };
    record.sessions.push(Session::new(start, now.max(start)));
    Change::Applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_millis(1_725_267_600_000 + secs * 1_000).unwrap()
    }

    fn roster_with(class: &str, students: &[&str]) -> Roster {
        let mut roster = Roster::new();
        roster.add_class(class, at(0));
        for student in students {
            roster.add_student(class, student);
        }
        roster
    }

    #[test]
    fn test_add_class_trims_and_records_creation() {
        let mut roster = Roster::new();
        assert_eq!(roster.add_class("  Math  ", at(5)), Change::Applied);

        let math = roster.class("Math").expect("trimmed key");
        assert_eq!(math.created, at(5));
        assert!(math.students.is_empty());
    }

    #[test]
    fn test_add_class_guards_empty_and_duplicate() {
        let mut roster = roster_with("Math", &["Alice"]);
        let before = roster.clone();

        assert_eq!(roster.add_class("", at(1)), Change::Unchanged(Skip::EmptyName));
        assert_eq!(roster.add_class("   ", at(1)), Change::Unchanged(Skip::EmptyName));
        assert_eq!(
            roster.add_class("Math", at(1)),
            Change::Unchanged(Skip::DuplicateName)
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_rename_moves_whole_record() {
        let mut roster = roster_with("Math", &["Alice", "Bob"]);
        roster.start_timer("Math", "Alice", at(10));
        roster.stop_timer("Math", "Alice", at(100));
        let original = roster.class("Math").cloned().unwrap();

        assert_eq!(
            roster.rename_class("Math", "Algebra", RenamePolicy::Reject),
            Change::Applied
        );
        assert!(roster.class("Math").is_none());
        assert_eq!(roster.class("Algebra"), Some(&original));
    }

    #[test]
    fn test_rename_guards() {
        let mut roster = roster_with("Math", &[]);
        roster.add_class("Art", at(1));
        let before = roster.clone();

        assert_eq!(
            roster.rename_class("Math", "  ", RenamePolicy::Reject),
            Change::Unchanged(Skip::EmptyName)
        );
        assert_eq!(
            roster.rename_class("Math", " Math ", RenamePolicy::Reject),
            Change::Unchanged(Skip::SameName)
        );
        assert_eq!(
            roster.rename_class("Physics", "Chemistry", RenamePolicy::Reject),
            Change::Unchanged(Skip::UnknownClass)
        );
        assert_eq!(
            roster.rename_class("Math", "Art", RenamePolicy::Reject),
            Change::Unchanged(Skip::DuplicateName)
        );
        assert_eq!(roster, before);
    }

    #[test]
    fn test_rename_overwrite_policy_replaces_target() {
        let mut roster = roster_with("Math", &["Alice"]);
        roster.add_class("Art", at(1));
        roster.add_student("Art", "Zed");

        assert_eq!(
            roster.rename_class("Math", "Art", RenamePolicy::Overwrite),
            Change::Applied
        );
        assert_eq!(roster.classes().len(), 1);
        let art = roster.class("Art").unwrap();
        assert!(art.students.contains_key("Alice"));
        assert!(!art.students.contains_key("Zed"));
    }

    #[test]
    fn test_delete_class_is_idempotent() {
        let mut roster = roster_with("Math", &["Alice"]);
        assert_eq!(roster.delete_class("Math"), Change::Applied);
        assert_eq!(
            roster.delete_class("Math"),
            Change::Unchanged(Skip::UnknownClass)
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_student_guards() {
        let mut roster = roster_with("Math", &["Alice"]);

        assert_eq!(
            roster.add_student("Math", " "),
            Change::Unchanged(Skip::EmptyName)
        );
        assert_eq!(
            roster.add_student("Math", "Alice"),
            Change::Unchanged(Skip::DuplicateName)
        );
        assert_eq!(
            roster.add_student("Art", "Bob"),
            Change::Unchanged(Skip::UnknownClass)
        );

        assert_eq!(roster.add_student("Math", " Bob "), Change::Applied);
        let bob = roster.student("Math", "Bob").unwrap();
        assert!(bob.sessions.is_empty());
        assert!(!bob.is_tracking());
    }

    #[test]
    fn test_start_then_stop_appends_one_session() {
        let mut roster = roster_with("Math", &["Alice"]);

        assert_eq!(roster.start_timer("Math", "Alice", at(0)), Change::Applied);
        assert_eq!(roster.stop_timer("Math", "Alice", at(90)), Change::Applied);

        let alice = roster.student("Math", "Alice").unwrap();
        assert_eq!(alice.sessions, vec![Session::new(at(0), at(90))]);
        assert!(alice.current_session.is_none());
    }

    #[test]
    fn test_timer_guards() {
        let mut roster = roster_with("Math", &["Alice"]);

        assert_eq!(
            roster.stop_timer("Math", "Alice", at(1)),
            Change::Unchanged(Skip::NotTracking)
        );
        roster.start_timer("Math", "Alice", at(2));
        assert_eq!(
            roster.start_timer("Math", "Alice", at(3)),
            Change::Unchanged(Skip::AlreadyTracking)
        );
        assert_eq!(roster.student("Math", "Alice").unwrap().current_session, Some(at(2)));

        assert_eq!(
            roster.start_timer("Math", "Nobody", at(3)),
            Change::Unchanged(Skip::UnknownStudent)
        );
        assert_eq!(
            roster.start_timer("Art", "Alice", at(3)),
            Change::Unchanged(Skip::UnknownClass)
        );
    }

    #[test]
    fn test_stop_clamps_end_to_start() {
        let mut roster = roster_with("Math", &["Alice"]);
        roster.start_timer("Math", "Alice", at(100));
        roster.stop_timer("Math", "Alice", at(40));

        let session = roster.student("Math", "Alice").unwrap().sessions[0];
        assert!(session.is_well_ordered());
        assert_eq!(session.duration_ms(), 0);
    }

    #[test]
    fn test_toggle_alternates() {
        let mut roster = roster_with("Math", &["Alice"]);
        roster.toggle_timer("Math", "Alice", at(0));
        assert!(roster.student("Math", "Alice").unwrap().is_tracking());

        roster.toggle_timer("Math", "Alice", at(30));
        let alice = roster.student("Math", "Alice").unwrap();
        assert!(!alice.is_tracking());
        assert_eq!(alice.sessions.len(), 1);
    }

    #[test]
    fn test_start_all_keeps_running_timers() {
        let mut roster = roster_with("Math", &["A", "B"]);
        roster.start_timer("Math", "B", at(5));

        assert_eq!(roster.start_all("Math", at(60)), Change::Applied);
        assert_eq!(roster.student("Math", "A").unwrap().current_session, Some(at(60)));
        assert_eq!(roster.student("Math", "B").unwrap().current_session, Some(at(5)));

        assert_eq!(
            roster.start_all("Math", at(70)),
            Change::Unchanged(Skip::NothingToDo)
        );
    }

    #[test]
    fn test_stop_all_closes_only_running_timers() {
        let mut roster = roster_with("Math", &["A", "B", "C"]);
        roster.start_timer("Math", "A", at(0));
        roster.start_timer("Math", "C", at(10));

        assert_eq!(roster.stop_all("Math", at(70)), Change::Applied);
        assert_eq!(roster.student("Math", "A").unwrap().sessions.len(), 1);
        assert!(roster.student("Math", "B").unwrap().sessions.is_empty());
        assert_eq!(
            roster.student("Math", "C").unwrap().sessions[0],
            Session::new(at(10), at(70))
        );
        assert_eq!(roster.classes()["Math"].tracking_count(), 0);
    }

    #[test]
    fn test_remove_student_discards_running_interval() {
        let mut roster = roster_with("Math", &["Alice"]);
        roster.start_timer("Math", "Alice", at(0));

        assert_eq!(roster.remove_student("Math", "Alice"), Change::Applied);
        assert!(roster.student("Math", "Alice").is_none());
        assert_eq!(
            roster.remove_student("Math", "Alice"),
            Change::Unchanged(Skip::UnknownStudent)
        );
    }

    fn class_names(roster: &Roster) -> Vec<&str> {
        roster.classes().keys().map(String::as_str).collect()
    }

    fn student_names<'a>(roster: &'a Roster, class: &str) -> Vec<&'a str> {
        roster
            .class(class)
            .map(|c| c.students.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_classes_and_students_keep_insertion_order() {
        let mut roster = Roster::new();
        roster.add_class("Zoology", at(0));
        roster.add_class("Algebra", at(1));
        roster.add_student("Zoology", "Zed");
        roster.add_student("Zoology", "Amy");

        assert_eq!(class_names(&roster), ["Zoology", "Algebra"]);
        assert_eq!(student_names(&roster, "Zoology"), ["Zed", "Amy"]);
    }

    #[test]
    fn test_rename_moves_class_to_end() {
        let mut roster = Roster::new();
        for name in ["Math", "Art", "Music"] {
            roster.add_class(name, at(0));
        }

        roster.rename_class("Math", "Algebra", RenamePolicy::Reject);
        assert_eq!(class_names(&roster), ["Art", "Music", "Algebra"]);
    }

    #[test]
    fn test_rename_overwrite_keeps_target_slot() {
        let mut roster = Roster::new();
        for name in ["Math", "Art", "Music"] {
            roster.add_class(name, at(0));
        }

        roster.rename_class("Music", "Art", RenamePolicy::Overwrite);
        assert_eq!(class_names(&roster), ["Math", "Art"]);
    }

    #[test]
    fn test_removal_preserves_remaining_order() {
        let mut roster = roster_with("Math", &["Cara", "Alice", "Bob"]);
        roster.add_class("Art", at(1));
        roster.add_class("Biology", at(2));

        roster.remove_student("Math", "Cara");
        roster.delete_class("Math");
        roster.add_class("Math", at(3));

        assert_eq!(class_names(&roster), ["Art", "Biology", "Math"]);

        let mut roster = roster_with("Math", &["Cara", "Alice", "Bob"]);
        roster.remove_student("Math", "Cara");
        assert_eq!(student_names(&roster, "Math"), ["Alice", "Bob"]);
    }

    #[test]
    fn test_malformed_sessions_are_listed() {
        let mut classes = ClassMap::new();
        let mut class = ClassRecord::new(at(0));
        let mut student = StudentRecord::new();
        student.sessions.push(Session::new(at(0), at(10)));
        student.sessions.push(Session::new(at(50), at(20)));
        class.students.insert("Alice".to_string(), student);
        classes.insert("Math".to_string(), class);

        let roster = Roster::from_classes(classes);
        let malformed = roster.malformed_sessions();
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].class, "Math");
        assert_eq!(malformed[0].session, Session::new(at(50), at(20)));
    }
}
