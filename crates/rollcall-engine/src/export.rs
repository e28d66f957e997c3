use csv::{QuoteStyle, Terminator, WriterBuilder};
use rollcall_types::{ClassMap, Timestamp};
use std::io::Write;

use crate::Result;
use crate::duration::session_minutes;

pub const CSV_HEADER: [&str; 5] = [
    "Class",
    "Student",
    "Session Start",
    "Session End",
    "Duration (minutes)",
];

/// A rendered attendance report, ready to hand to a download sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReport {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub row_count: usize,
}

impl CsvReport {
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.contents).unwrap_or_default()
    }
}

/// `attendance_YYYY-MM-DD.csv` for the UTC date of `now`
pub fn export_file_name(now: Timestamp) -> String {
    format!("attendance_{}.csv", now.date_string())
}

/// Write one row per completed session, in mapping order.
///
/// Running intervals are not sessions yet and are left out. Returns the
/// number of data rows written.
pub fn write_csv<W: Write>(classes: &ClassMap, out: W) -> Result<usize> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for (class_name, class) in classes {
        for (student_name, student) in &class.students {
            for session in &student.sessions {
                let start = session.start.to_iso_string();
                let end = session.end.to_iso_string();
                let minutes = session_minutes(session).to_string();
                writer.write_record([
                    class_name.as_str(),
                    student_name.as_str(),
                    start.as_str(),
                    end.as_str(),
                    minutes.as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

pub fn build_report(classes: &ClassMap, now: Timestamp) -> Result<CsvReport> {
    let mut contents = Vec::new();
    let row_count = write_csv(classes, &mut contents)?;

    Ok(CsvReport {
        file_name: export_file_name(now),
        contents,
        row_count,
    })
}
