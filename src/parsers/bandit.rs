//! Decoder for the local scanner's JSON report.
//!
//! The scanner already emits structured findings, so its output bypasses
//! the report parser entirely. Missing fields default to `UNKNOWN` or
//! empty; a document that is not valid JSON decodes to zero findings so
//! a failed scan reads the same as an empty one.

use serde::Deserialize;

use crate::models::scanner::ScannerFinding;

/// Source tag stamped on every finding from this decoder.
pub const SOURCE_TAG: &str = "Bandit";

#[derive(Debug, Deserialize)]
struct ScannerReport {
    #[serde(default)]
    results: Vec<ScannerIssue>,
}

#[derive(Debug, Deserialize)]
struct ScannerIssue {
    issue_severity: Option<String>,
    issue_text: Option<String>,
    line_number: Option<i64>,
    code: Option<String>,
    issue_confidence: Option<String>,
}

/// Decode a scanner JSON report into normalized findings.
pub fn parse_output(raw: &str) -> Vec<ScannerFinding> {
    let report: ScannerReport = match serde_json::from_str(raw) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Scanner output was not valid JSON; treating as zero findings");
            return Vec::new();
        }
    };

    report
        .results
        .into_iter()
        .map(|issue| ScannerFinding {
            severity: issue
                .issue_severity
                .unwrap_or_else(|| "UNKNOWN".to_string())
                .to_uppercase(),
            description: issue.issue_text.unwrap_or_default(),
            line_number: issue.line_number.unwrap_or(0),
            code_snippet: issue.code.unwrap_or_default(),
            source: SOURCE_TAG.to_string(),
            confidence: issue
                .issue_confidence
                .unwrap_or_else(|| "UNKNOWN".to_string())
                .to_uppercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_REPORT: &str = r#"{
        "errors": [],
        "metrics": {"_totals": {"loc": 8, "nosec": 0}},
        "results": [
            {
                "code": "2 import subprocess\n3 subprocess.call(cmd, shell=True)\n",
                "filename": "/tmp/snippet.py",
                "issue_confidence": "High",
                "issue_severity": "high",
                "issue_text": "subprocess call with shell=True identified.",
                "line_number": 3,
                "test_id": "B602",
                "test_name": "subprocess_popen_with_shell_equals_true"
            },
            {
                "code": "5 password = \"hunter2\"\n",
                "filename": "/tmp/snippet.py",
                "issue_confidence": "Medium",
                "issue_severity": "Low",
                "issue_text": "Possible hardcoded password.",
                "line_number": 5,
                "test_id": "B105",
                "test_name": "hardcoded_password_string"
            }
        ]
    }"#;

    #[test]
    fn maps_every_result() {
        let findings = parse_output(SAMPLE_REPORT);
        assert_eq!(findings.len(), 2);

        let first = &findings[0];
        assert_eq!(first.severity, "HIGH");
        assert_eq!(first.confidence, "HIGH");
        assert_eq!(first.line_number, 3);
        assert_eq!(first.source, "Bandit");
        assert_eq!(
            first.description,
            "subprocess call with shell=True identified."
        );
        assert!(first.code_snippet.contains("shell=True"));

        assert_eq!(findings[1].severity, "LOW");
        assert_eq!(findings[1].confidence, "MEDIUM");
    }

    #[test]
    fn malformed_json_yields_zero_findings() {
        assert!(parse_output("bandit exploded: traceback follows").is_empty());
        assert!(parse_output("{\"results\": ").is_empty());
    }

    #[test]
    fn empty_report_yields_zero_findings() {
        assert!(parse_output(r#"{"results": [], "metrics": {}}"#).is_empty());
    }

    #[test]
    fn missing_results_key_yields_zero_findings() {
        assert!(parse_output(r#"{"metrics": {}}"#).is_empty());
    }

    #[test]
    fn missing_fields_get_defaults() {
        let findings = parse_output(r#"{"results": [{}]}"#);
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.severity, "UNKNOWN");
        assert_eq!(finding.confidence, "UNKNOWN");
        assert_eq!(finding.line_number, 0);
        assert!(finding.description.is_empty());
        assert!(finding.code_snippet.is_empty());
    }
}
