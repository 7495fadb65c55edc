//! Analysis backends: two hosted model providers and a local scanner.
//!
//! Every backend implements [`Analyzer`], producing either a free-form
//! report for `parsers::report` to consume, or findings that arrive
//! already structured.

pub mod gemini;
pub mod local;
pub mod openai;
pub mod prompt;

use crate::errors::AppError;
use crate::models::scanner::ScannerFinding;

/// Output of an analysis backend.
#[derive(Debug)]
pub enum AnalyzerOutput {
    /// Free-form report text to be run through the report parser.
    Report(String),
    /// Findings the backend already structured itself.
    Findings(Vec<ScannerFinding>),
}

/// Capability shared by every analysis backend. The input code is never
/// mutated; internal errors surface as `AppError` and stay scoped to
/// the request.
#[allow(async_fn_in_trait)]
pub trait Analyzer {
    async fn analyze(&self, code: &str) -> Result<AnalyzerOutput, AppError>;
}
