//! Scan orchestration: backend dispatch and result normalization.
//!
//! The hosted-model path and the local-scanner path keep their distinct
//! historical payload shapes; see DESIGN.md for the decision record.

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::issue::{AnalysisReport, ScanResult};
use crate::models::scanner::ScannerFinding;
use crate::parsers::report;
use crate::providers::gemini::GeminiAnalyzer;
use crate::providers::local::LocalScanner;
use crate::providers::openai::OpenAiAnalyzer;
use crate::providers::{Analyzer, AnalyzerOutput};
use crate::AppState;

/// Pointer from the scanner path toward the hosted providers.
const AI_SUGGESTION: &str =
    "Consider using AI analysis (OpenAI/Gemini) for deeper insights into these vulnerabilities.";

/// Response payload for a scan request.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScanResults {
    Model(ModelResults),
    Scanner(ScannerResults),
}

/// Hosted-model payload: parsed buckets plus the raw report.
#[derive(Debug, Serialize)]
pub struct ModelResults {
    pub structured_analysis: AnalysisReport,
    pub raw_analysis: String,
    pub provider: String,
}

/// Local-scanner payload.
#[derive(Debug, Serialize)]
pub struct ScannerResults {
    pub vulnerabilities: Vec<ScannerFinding>,
    pub provider: String,
    pub ai_suggestion: String,
    pub summary: String,
}

/// Dispatch a scan to the selected backend and normalize its output.
///
/// `openai` and `gemini` select the hosted providers; anything else,
/// including no provider at all, selects the local scanner.
pub async fn run(
    state: &AppState,
    code: &str,
    provider: Option<&str>,
) -> Result<ScanResults, AppError> {
    let scan_id = Uuid::new_v4();
    let (output, provider_name) = match provider {
        Some("openai") => {
            tracing::info!(%scan_id, provider = "openai", "Dispatching scan");
            let analyzer = OpenAiAnalyzer::new(&state.config, state.http.clone());
            (analyzer.analyze(code).await?, "openai")
        }
        Some("gemini") => {
            tracing::info!(%scan_id, provider = "gemini", "Dispatching scan");
            let analyzer = GeminiAnalyzer::new(&state.config, state.http.clone());
            (analyzer.analyze(code).await?, "gemini")
        }
        _ => {
            tracing::info!(%scan_id, provider = "bandit", "Dispatching scan");
            let analyzer = LocalScanner::new(&state.config);
            (analyzer.analyze(code).await?, "bandit")
        }
    };
    Ok(normalize(output, provider_name))
}

/// Fold backend output into the response payload for its path.
fn normalize(output: AnalyzerOutput, provider: &str) -> ScanResults {
    match output {
        AnalyzerOutput::Report(raw) => {
            let issues = report::parse_report(&raw).into_issues();
            let scan = ScanResult::new(raw, issues);
            ScanResults::Model(ModelResults {
                structured_analysis: AnalysisReport::from_issues(&scan.issues),
                raw_analysis: scan.raw_output,
                provider: provider.to_string(),
            })
        }
        AnalyzerOutput::Findings(vulnerabilities) => {
            let ai_suggestion = if vulnerabilities.is_empty() {
                String::new()
            } else {
                AI_SUGGESTION.to_string()
            };
            let summary = format!(
                "Found {} potential security issues.",
                vulnerabilities.len()
            );
            ScanResults::Scanner(ScannerResults {
                vulnerabilities,
                provider: provider.to_string(),
                ai_suggestion,
                summary,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding() -> ScannerFinding {
        ScannerFinding {
            severity: "HIGH".to_string(),
            description: "shell=True".to_string(),
            line_number: 3,
            code_snippet: "subprocess.call(cmd, shell=True)".to_string(),
            source: "Bandit".to_string(),
            confidence: "HIGH".to_string(),
        }
    }

    #[test]
    fn model_output_is_parsed_and_bucketed() {
        let raw = "SECURITY VULNERABILITIES:\n(HIGH): SQL Injection\nRecommendation: bind params\n\nCODE QUALITY:\n(LOW): dead code\n";
        let results = normalize(AnalyzerOutput::Report(raw.to_string()), "openai");
        let ScanResults::Model(model) = results else {
            panic!("expected model payload");
        };
        assert_eq!(model.provider, "openai");
        assert_eq!(model.raw_analysis, raw);
        assert_eq!(model.structured_analysis.vulnerabilities.len(), 1);
        assert_eq!(model.structured_analysis.code_quality.len(), 1);
        assert!(model.structured_analysis.best_practices.is_empty());
        assert_eq!(
            model.structured_analysis.vulnerabilities[0].recommendation,
            "bind params"
        );
    }

    #[test]
    fn unparseable_model_output_keeps_raw_text() {
        let raw = "the model rambled with no headers";
        let results = normalize(AnalyzerOutput::Report(raw.to_string()), "gemini");
        let ScanResults::Model(model) = results else {
            panic!("expected model payload");
        };
        assert_eq!(model.raw_analysis, raw);
        assert!(model.structured_analysis.vulnerabilities.is_empty());
        assert!(model.structured_analysis.code_quality.is_empty());
        assert!(model.structured_analysis.best_practices.is_empty());
    }

    #[test]
    fn scanner_findings_get_suggestion_and_summary() {
        let results = normalize(AnalyzerOutput::Findings(vec![finding()]), "bandit");
        let ScanResults::Scanner(scanner) = results else {
            panic!("expected scanner payload");
        };
        assert_eq!(scanner.provider, "bandit");
        assert_eq!(scanner.summary, "Found 1 potential security issues.");
        assert!(scanner.ai_suggestion.contains("OpenAI/Gemini"));
    }

    #[test]
    fn empty_scanner_findings_omit_suggestion() {
        let results = normalize(AnalyzerOutput::Findings(Vec::new()), "bandit");
        let ScanResults::Scanner(scanner) = results else {
            panic!("expected scanner payload");
        };
        assert!(scanner.ai_suggestion.is_empty());
        assert_eq!(scanner.summary, "Found 0 potential security issues.");
    }

    #[test]
    fn scanner_payload_serializes_historical_shape() {
        let results = normalize(AnalyzerOutput::Findings(vec![finding()]), "bandit");
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["provider"], "bandit");
        assert_eq!(json["vulnerabilities"][0]["severity"], "HIGH");
        assert_eq!(json["vulnerabilities"][0]["source"], "Bandit");
        assert!(json["summary"].as_str().unwrap().starts_with("Found 1"));
    }

    #[test]
    fn model_payload_serializes_historical_shape() {
        let raw = "SECURITY VULNERABILITIES:\n(HIGH): SQL Injection\n";
        let results = normalize(AnalyzerOutput::Report(raw.to_string()), "openai");
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["provider"], "openai");
        assert_eq!(json["raw_analysis"], raw);
        let issue = &json["structured_analysis"]["vulnerabilities"][0];
        assert_eq!(issue["severity"], "high");
        assert_eq!(issue["title"], "SQL Injection");
        assert!(issue.get("category").is_none());
    }
}
