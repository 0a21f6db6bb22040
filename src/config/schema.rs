//! Config schema and deserialization

use crate::Severity;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_PRICE_PER_1K: f64 = 0.003;
pub const DEFAULT_MAX_PROMPT_LENGTH: usize = 200_000;

/// Root config structure for .promptdebugrc.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Run the ambiguity detector
    pub enable_ambiguity_detection: bool,

    /// Run the token waste analyzer
    pub enable_token_analysis: bool,

    /// Run the success predictor
    pub enable_success_prediction: bool,

    /// Run the security scanner
    pub enable_security_scanning: bool,

    /// Reserved for stricter thresholds. Accepted and carried, not yet read by any analyzer.
    pub strict_mode: bool,

    /// Price per 1000 tokens used for cost estimates
    pub token_price_per_1k: f64,

    /// Issues below this severity are dropped from results
    pub min_severity_to_report: Severity,

    /// Maximum prompt length in characters
    pub max_prompt_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enable_ambiguity_detection: true,
            enable_token_analysis: true,
            enable_success_prediction: true,
            enable_security_scanning: true,
            strict_mode: false,
            token_price_per_1k: DEFAULT_TOKEN_PRICE_PER_1K,
            min_severity_to_report: Severity::Low,
            max_prompt_length: DEFAULT_MAX_PROMPT_LENGTH,
        }
    }
}

impl AnalyzerConfig {
    /// Merge caller overrides into config. Override values take precedence.
    pub fn merge_with_overrides(
        mut self,
        min_severity: Option<Severity>,
        token_price_per_1k: Option<f64>,
    ) -> Self {
        if let Some(sev) = min_severity {
            self.min_severity_to_report = sev;
        }
        if let Some(price) = token_price_per_1k {
            self.token_price_per_1k = price;
        }
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity_to_report = severity;
        self
    }

    pub fn with_max_prompt_length(mut self, max: usize) -> Self {
        self.max_prompt_length = max;
        self
    }

    /// Reject values no analysis can work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.token_price_per_1k.is_finite() || self.token_price_per_1k < 0.0 {
            anyhow::bail!(
                "tokenPricePer1k must be a non-negative number, got {}",
                self.token_price_per_1k
            );
        }
        if self.max_prompt_length == 0 {
            anyhow::bail!("maxPromptLength must be greater than 0");
        }
        Ok(())
    }

    /// Number of enabled analyzers
    pub fn enabled_count(&self) -> usize {
        [
            self.enable_ambiguity_detection,
            self.enable_token_analysis,
            self.enable_success_prediction,
            self.enable_security_scanning,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}
