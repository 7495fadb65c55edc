//! Finding record for the local static-analysis path.

use serde::{Deserialize, Serialize};

/// One finding mapped from the scanner's JSON report.
///
/// Severity and confidence keep the scanner's upper-cased strings
/// (`HIGH`, `MEDIUM`, `LOW`, `UNKNOWN`), unlike the hosted-path
/// `Severity` enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannerFinding {
    pub severity: String,
    pub description: String,
    pub line_number: i64,
    pub code_snippet: String,
    pub source: String,
    pub confidence: String,
}
