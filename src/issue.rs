//! Core types for analysis results.
//!
//! An [`IssueRecord`] is the terminal output unit: one reported defect,
//! shaped for direct use as an issue-tracker entry. One analyzed file yields
//! a [`FileResult`]; a batch yields one result per input plus a summary.

use serde::{Deserialize, Serialize};

/// Priority levels for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("unknown priority: {}", s)),
        }
    }
}

/// One file submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUnit {
    pub path: String,
    pub content: String,
}

/// A single reported defect, shaped as an issue-tracker entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub title: String,
    /// Markdown body, already wrapped in the standard issue template.
    pub body: String,
    pub priority: Priority,
    /// 1 to 5 unique tags, ordered by relevance.
    pub tags: Vec<String>,
}

/// Outcome status for one analyzed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Success,
    Error,
}

/// Analysis result for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    pub file: String,
    pub status: FileStatus,
    pub issues: Vec<IssueRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn success(file: &str, issues: Vec<IssueRecord>) -> Self {
        Self {
            file: file.to_string(),
            status: FileStatus::Success,
            issues,
            error: None,
        }
    }

    pub fn error(file: &str, message: String) -> Self {
        Self {
            file: file.to_string(),
            status: FileStatus::Error,
            issues: Vec::new(),
            error: Some(message),
        }
    }
}

/// Aggregate counts for one batch. Only successfully produced issues count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_files: usize,
    pub total_issues: usize,
    pub files_with_issues: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[FileResult]) -> Self {
        Self {
            total_files: results.len(),
            total_issues: results.iter().map(|r| r.issues.len()).sum(),
            files_with_issues: results.iter().filter(|r| !r.issues.is_empty()).count(),
        }
    }
}

/// The complete batch response: summary plus one result per input, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub results: Vec<FileResult>,
}

/// Wrap a record body in the standard issue template.
///
/// Every emitted issue body carries the file path, the upper-cased priority,
/// the comma-joined analysis types, the finding itself, and a footer.
pub fn render_issue_body(path: &str, priority: Priority, types: &str, body: &str) -> String {
    format!(
        "## File\n`{}`\n\n## Priority\n**{}**\n\n## Type\n{}\n\n---\n\n{}\n\n---\n\n*Generated by faultline*\n",
        path,
        priority.as_str().to_uppercase(),
        types,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_priority_roundtrip() {
        for p in [
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ] {
            assert_eq!(Priority::from_str(p.as_str()).unwrap(), p);
        }
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_summary_counts_only_produced_issues() {
        let record = IssueRecord {
            title: "t".into(),
            body: "b".into(),
            priority: Priority::Medium,
            tags: vec!["rust".into()],
        };
        let results = vec![
            FileResult::success("a.rs", vec![record.clone(), record]),
            FileResult::success("b.rs", vec![]),
            FileResult::error("c.rs", "boom".into()),
        ];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.total_issues, 2);
        assert_eq!(summary.files_with_issues, 1);
    }

    #[test]
    fn test_render_issue_body_template() {
        let body = render_issue_body("src/x.py", Priority::High, "bugs, security", "**Line 3:** bad");
        assert!(body.contains("`src/x.py`"));
        assert!(body.contains("**HIGH**"));
        assert!(body.contains("bugs, security"));
        assert!(body.contains("**Line 3:** bad"));
    }
}
