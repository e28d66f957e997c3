use rollcall_engine::format_duration;
use std::fmt;

use super::Paint;
use crate::presentation::view_models::{ClassListViewModel, RosterViewModel, TextStyle};

pub struct RosterView<'a> {
    data: &'a RosterViewModel,
    paint: Paint,
}

impl<'a> RosterView<'a> {
    pub fn new(data: &'a RosterViewModel, style: TextStyle) -> Self {
        Self {
            data,
            paint: style.into(),
        }
    }
}

impl<'a> fmt::Display for RosterView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.classes.is_empty() {
            return writeln!(f, "No classes yet.");
        }

        for (i, class) in self.data.classes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            let mut header = format!(
                "{} ({} student{}",
                self.paint.bold(&class.name),
                class.students.len(),
                if class.students.len() == 1 { "" } else { "s" }
            );
            if class.running_count > 0 {
                header.push_str(&format!(", {} running", class.running_count));
            }
            writeln!(f, "{})", header)?;

            if class.students.is_empty() {
                writeln!(f, "  {}", self.paint.dimmed("(no students)"))?;
                continue;
            }

            for student in &class.students {
                let total = format!("{:>8}", format_duration(student.total_ms));
                write!(f, "  {:<20} {}", student.name, total)?;
                if let Some(since) = &student.running_since {
                    write!(f, "  {}", self.paint.green(&format!("running since {}", since)))?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

pub struct ClassListView<'a> {
    data: &'a ClassListViewModel,
    paint: Paint,
}

impl<'a> ClassListView<'a> {
    pub fn new(data: &'a ClassListViewModel, style: TextStyle) -> Self {
        Self {
            data,
            paint: style.into(),
        }
    }
}

impl<'a> fmt::Display for ClassListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.classes.is_empty() {
            return writeln!(f, "No classes yet.");
        }

        writeln!(f, "{:<24} {:<10} {:<10} CREATED", "CLASS", "STUDENTS", "RUNNING")?;
        for class in &self.data.classes {
            writeln!(
                f,
                "{:<24} {:<10} {:<10} {}",
                class.name,
                class.student_count,
                class.running_count,
                self.paint.dimmed(&class.created)
            )?;
        }
        Ok(())
    }
}
