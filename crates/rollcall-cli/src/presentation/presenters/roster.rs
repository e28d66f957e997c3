use rollcall_engine::{Roster, total_duration};
use rollcall_types::{ClassRecord, StudentRecord};

use crate::presentation::view_models::{
    ClassBlockViewModel, ClassListViewModel, ClassSummaryViewModel, RosterViewModel,
    StudentRowViewModel,
};

pub fn present_roster(roster: &Roster) -> RosterViewModel {
    let classes = roster
        .classes()
        .iter()
        .map(|(name, record)| present_class_block(name, record))
        .collect();

    RosterViewModel { classes }
}

fn present_class_block(name: &str, record: &ClassRecord) -> ClassBlockViewModel {
    ClassBlockViewModel {
        name: name.to_string(),
        created: record.created.to_iso_string(),
        running_count: record.tracking_count(),
        students: record
            .students
            .iter()
            .map(|(student, record)| present_student_row(student, record))
            .collect(),
    }
}

pub fn present_student_row(name: &str, record: &StudentRecord) -> StudentRowViewModel {
    StudentRowViewModel {
        name: name.to_string(),
        total_ms: total_duration(&record.sessions),
        session_count: record.sessions.len(),
        tracking: record.is_tracking(),
        running_since: record.current_session.map(|start| start.to_iso_string()),
    }
}

pub fn present_class_list(roster: &Roster) -> ClassListViewModel {
    let classes = roster
        .classes()
        .iter()
        .map(|(name, record)| ClassSummaryViewModel {
            name: name.clone(),
            created: record.created.to_iso_string(),
            student_count: record.students.len(),
            running_count: record.tracking_count(),
        })
        .collect();

    ClassListViewModel { classes }
}
