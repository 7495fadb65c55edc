//! Line-oriented parser for free-form model analysis reports.
//!
//! The hosted providers are prompted to answer with three fixed section
//! headers (`SECURITY VULNERABILITIES:`, `CODE QUALITY:`, `BEST
//! PRACTICES:`) where each entry opens with a bracketed severity marker
//! and may carry a `Recommendation:` line. The parser walks the text in
//! a single forward pass: a severity marker under an active section
//! opens a new issue, and every following line folds into that issue
//! until the next marker.
//!
//! Headers are matched by substring, so a header phrase inside a
//! description line also switches the active section; callers see that
//! behavior and the tests pin it.

use crate::models::issue::{Issue, IssueCategory, Severity};

const VULNERABILITIES_HEADER: &str = "SECURITY VULNERABILITIES";
const CODE_QUALITY_HEADER: &str = "CODE QUALITY";
const BEST_PRACTICES_HEADER: &str = "BEST PRACTICES";

const RECOMMENDATION_PREFIX: &str = "recommendation:";

/// Partially-built issue accumulated during a parse pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedIssue {
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// Issues grouped per category, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBuckets {
    pub vulnerabilities: Vec<ParsedIssue>,
    pub code_quality: Vec<ParsedIssue>,
    pub best_practices: Vec<ParsedIssue>,
}

impl CategoryBuckets {
    fn bucket_mut(&mut self, category: IssueCategory) -> &mut Vec<ParsedIssue> {
        match category {
            IssueCategory::Vulnerability => &mut self.vulnerabilities,
            IssueCategory::CodeQuality => &mut self.code_quality,
            IssueCategory::BestPractice => &mut self.best_practices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
            && self.code_quality.is_empty()
            && self.best_practices.is_empty()
    }

    /// Flatten the buckets into category-tagged issues, category order
    /// first, source order within each category.
    pub fn into_issues(self) -> Vec<Issue> {
        let tagged = |issues: Vec<ParsedIssue>, category: IssueCategory| {
            issues.into_iter().map(move |issue| Issue {
                category,
                severity: issue.severity,
                title: issue.title,
                description: issue.description,
                recommendation: issue.recommendation,
            })
        };
        tagged(self.vulnerabilities, IssueCategory::Vulnerability)
            .chain(tagged(self.code_quality, IssueCategory::CodeQuality))
            .chain(tagged(self.best_practices, IssueCategory::BestPractice))
            .collect()
    }
}

/// Parse a raw analysis report into per-category issue lists.
///
/// Single forward pass, no backtracking. Lines before any header, or
/// before any issue opens, are dropped. The function is total; input
/// that matches nothing yields empty buckets.
pub fn parse_report(raw: &str) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();
    let mut current_category: Option<IssueCategory> = None;
    // The open issue survives a category switch; body lines after a new
    // header still land on it until the next severity marker.
    let mut current_issue: Option<(IssueCategory, usize)> = None;

    for raw_line in raw.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let upper = line.to_uppercase();

        // Fixed precedence: HIGH wins when a line carries several markers.
        let severity = if upper.contains("(HIGH)") {
            Some(Severity::High)
        } else if upper.contains("(MEDIUM)") {
            Some(Severity::Medium)
        } else if upper.contains("(LOW)") {
            Some(Severity::Low)
        } else {
            None
        };

        // Header lines switch the bucket and are never issue content.
        if upper.contains(VULNERABILITIES_HEADER) {
            current_category = Some(IssueCategory::Vulnerability);
            continue;
        } else if upper.contains(CODE_QUALITY_HEADER) {
            current_category = Some(IssueCategory::CodeQuality);
            continue;
        } else if upper.contains(BEST_PRACTICES_HEADER) {
            current_category = Some(IssueCategory::BestPractice);
            continue;
        }

        match (current_category, severity) {
            (Some(category), Some(severity)) => {
                // Title is whatever follows the first colon; a line
                // without one is the title verbatim.
                let title = match line.split_once(':') {
                    Some((_, rest)) => rest.trim().to_string(),
                    None => line.to_string(),
                };
                let bucket = buckets.bucket_mut(category);
                bucket.push(ParsedIssue {
                    severity,
                    title,
                    description: String::new(),
                    recommendation: String::new(),
                });
                current_issue = Some((category, bucket.len() - 1));
            }
            _ => {
                if let Some((category, index)) = current_issue {
                    let issue = &mut buckets.bucket_mut(category)[index];
                    if line.to_lowercase().starts_with(RECOMMENDATION_PREFIX) {
                        issue.recommendation = line
                            .split_once(':')
                            .map(|(_, rest)| rest.trim())
                            .unwrap_or("")
                            .to_string();
                    } else {
                        issue.description.push_str(line);
                        issue.description.push(' ');
                    }
                }
            }
        }
    }

    buckets
}
