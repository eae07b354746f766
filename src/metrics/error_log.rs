// Classification-error log
//
// Each human-reported misclassification is appended as one JSON line for
// offline review of the classifier.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::types::ErrorReport;

/// Entry written to the JSONL log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub reported_at: DateTime<Local>,
    #[serde(flatten)]
    pub report: ErrorReport,
    /// Whether the ticket id matched a retained ticket
    pub linked: bool,
}

/// Append-only JSONL writer
pub struct ErrorLog {
    file_path: PathBuf,
}

impl ErrorLog {
    /// Create a log at `file_path`, creating parent directories as needed
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create error log directory: {}", parent.display())
                })?;
            }
        }
        Ok(Self { file_path })
    }

    pub fn append(&self, entry: &ErrorLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .with_context(|| format!("Failed to open error log: {}", self.file_path.display()))?;

        let json = serde_json::to_string(entry).context("Failed to serialize error report")?;

        writeln!(file, "{}", json).context("Failed to write error report")?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_one_line_per_report() {
        let dir = TempDir::new().unwrap();
        let log = ErrorLog::new(dir.path().join("nested/errors.jsonl")).unwrap();

        for reason in ["phishing", "wrong queue"] {
            log.append(&ErrorLogEntry {
                reported_at: Local::now(),
                report: ErrorReport {
                    ticket_id: "t-1".to_string(),
                    predicted_department: "IT_SUPPORT".to_string(),
                    actual_department: "SECURITY".to_string(),
                    reason: reason.to_string(),
                },
                linked: false,
            })
            .unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let entry: ErrorLogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(entry.report.reason, "wrong queue");
        assert_eq!(entry.report.actual_department, "SECURITY");
    }
}
