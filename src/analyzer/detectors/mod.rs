//! Prompt detectors. Each one inspects the raw prompt independently.

pub mod ambiguity;
pub mod security;
pub mod success;
pub mod token_waste;

pub use ambiguity::AmbiguityDetector;
pub use security::SecurityScanner;
pub use success::SuccessPredictor;
pub use token_waste::TokenWasteAnalyzer;

use crate::Issue;
use tracing::warn;

/// Issues and metrics produced by one detector for one prompt
#[derive(Debug, Clone)]
pub struct Analysis<M> {
    pub issues: Vec<Issue>,
    pub metrics: M,
}

impl<M> Analysis<M> {
    pub fn new(issues: Vec<Issue>, metrics: M) -> Self {
        Self { issues, metrics }
    }
}

/// Trait for prompt detectors
pub trait PromptAnalyzer: Send + Sync {
    /// Metrics this detector reports
    type Metrics: Send;

    /// Name of the detector
    fn name(&self) -> &'static str;

    /// Analyze a prompt and return the issues found with the detector's metrics
    fn analyze(&self, prompt: &str) -> Analysis<Self::Metrics>;
}

/// Whitespace-separated word count, the unit every length threshold uses
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of non-overlapping matches of `re` in `text`
pub(crate) fn count_matches(re: &regex::Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

/// All matches of a backtracking pattern. Hitting the backtrack limit ends the
/// scan for that pattern with a warning, keeping the matches found so far.
pub(crate) fn fancy_find_all<'t>(
    re: &fancy_regex::Regex,
    text: &'t str,
) -> Vec<fancy_regex::Match<'t>> {
    let mut found = Vec::new();
    for m in re.find_iter(text) {
        match m {
            Ok(m) => found.push(m),
            Err(e) => {
                warn!(
                    pattern = re.as_str(),
                    error = %e,
                    "Pattern matching aborted, later matches skipped"
                );
                break;
            }
        }
    }
    found
}

/// Round to a fixed number of decimals
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
