use rollcall_engine::CsvReport;
use std::path::{Path, PathBuf};

use crate::Result;

/// Sink that turns an exported report into something the user can keep
pub trait Download {
    fn deliver(&self, report: &CsvReport) -> Result<PathBuf>;
}

/// Writes `<dir>/<report file name>`, creating the directory if needed.
/// An existing file with the same name is replaced.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Download for DirectoryDownload {
    fn deliver(&self, report: &CsvReport) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&report.file_name);
        std::fs::write(&path, &report.contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_report_under_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let download = DirectoryDownload::new(temp_dir.path().join("reports"));
        let report = CsvReport {
            file_name: "attendance_2024-09-02.csv".to_string(),
            contents: b"Class,Student,Session Start,Session End,Duration (minutes)\n".to_vec(),
            row_count: 0,
        };

        let path = download.deliver(&report)?;

        assert_eq!(path, temp_dir.path().join("reports/attendance_2024-09-02.csv"));
        assert_eq!(std::fs::read(&path)?, report.contents);
        Ok(())
    }
}
