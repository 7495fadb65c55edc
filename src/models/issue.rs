//! Core issue model shared by the report parser and the scan service.

use serde::{Deserialize, Serialize};

/// Fixed set of issue categories; every issue belongs to exactly one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Vulnerability,
    CodeQuality,
    BestPractice,
}

/// Issue severity; `Unknown` when no marker could be detected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    #[default]
    Unknown,
}

/// One reported problem. Immutable once constructed.
///
/// The category is internal routing state; response buckets already
/// encode it, so it is not serialized.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Issue {
    #[serde(skip_serializing)]
    pub category: IssueCategory,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// Raw provider output plus the issues recovered from it.
///
/// Owns its issue list exclusively; built once per hosted-path scan and
/// not mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub raw_output: String,
    pub issues: Vec<Issue>,
}

impl ScanResult {
    pub fn new(raw_output: String, issues: Vec<Issue>) -> Self {
        Self { raw_output, issues }
    }
}

/// Structured analysis buckets returned on the hosted-model path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub vulnerabilities: Vec<Issue>,
    pub code_quality: Vec<Issue>,
    pub best_practices: Vec<Issue>,
}

impl AnalysisReport {
    /// Group issues into their category buckets, preserving source order.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut report = Self::default();
        for issue in issues {
            match issue.category {
                IssueCategory::Vulnerability => report.vulnerabilities.push(issue.clone()),
                IssueCategory::CodeQuality => report.code_quality.push(issue.clone()),
                IssueCategory::BestPractice => report.best_practices.push(issue.clone()),
            }
        }
        report
    }
}
