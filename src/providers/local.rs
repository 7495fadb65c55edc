//! Local static-analysis backend driving the scanner CLI.
//!
//! The snippet is persisted to a temporary file and the scanner is run
//! against it with JSON output at medium minimum severity and all
//! confidence levels. The scanner exits non-zero whenever it has
//! findings, so the exit status is ignored and stdout is decoded
//! regardless; empty or malformed output reads as zero findings.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::parsers::bandit;
use crate::providers::{Analyzer, AnalyzerOutput};

/// Stand-in report when the scanner prints nothing at all.
const EMPTY_REPORT: &str = r#"{"results": [], "metrics": {}}"#;

pub struct LocalScanner {
    bin: String,
    timeout_secs: u64,
}

impl LocalScanner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            bin: config.scanner_bin.clone(),
            timeout_secs: config.scanner_timeout_secs,
        }
    }

    /// Persist the snippet to a scratch file the scanner can read.
    /// The file is unlinked when the handle drops, on every exit path.
    fn write_snippet(code: &str) -> Result<NamedTempFile, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("codescan-")
            .suffix(".py")
            .tempfile()?;
        file.write_all(code.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

impl Analyzer for LocalScanner {
    async fn analyze(&self, code: &str) -> Result<AnalyzerOutput, AppError> {
        let snippet = Self::write_snippet(code)?;

        let mut command = Command::new(&self.bin);
        command
            .args(["-f", "json", "-ll", "-i", "-r"])
            .arg(snippet.path());

        let output = match tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            command.output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AppError::Scanner(format!(
                    "failed to run {}: {e}",
                    self.bin
                )))
            }
            Err(_) => return Err(AppError::ScannerTimeout(self.timeout_secs)),
        };

        if !output.status.success() {
            tracing::debug!(code = ?output.status.code(), "Scanner exited non-zero");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = if stdout.trim().is_empty() {
            EMPTY_REPORT
        } else {
            stdout.as_ref()
        };

        Ok(AnalyzerOutput::Findings(bandit::parse_output(report)))
    }
}
