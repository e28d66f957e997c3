use serde::Serialize;
use std::fmt;

use super::{CreateView, TextStyle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterViewModel {
    pub classes: Vec<ClassBlockViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassBlockViewModel {
    pub name: String,
    pub created: String,
    pub running_count: usize,
    pub students: Vec<StudentRowViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRowViewModel {
    pub name: String,
    /// Sum of completed sessions; a running interval is not included
    pub total_ms: i64,
    pub session_count: usize,
    pub tracking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running_since: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassListViewModel {
    pub classes: Vec<ClassSummaryViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummaryViewModel {
    pub name: String,
    pub created: String,
    pub student_count: usize,
    pub running_count: usize,
}

impl RosterViewModel {
    pub fn class(&self, name: &str) -> Option<&ClassBlockViewModel> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl ClassBlockViewModel {
    pub fn student(&self, name: &str) -> Option<&StudentRowViewModel> {
        self.students.iter().find(|s| s.name == name)
    }
}

impl CreateView for RosterViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::roster::RosterView;
        Box::new(RosterView::new(self, style))
    }
}

impl CreateView for ClassListViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::roster::ClassListView;
        Box::new(ClassListView::new(self, style))
    }
}
