//! Analysis engine - orchestrates all detectors

use crate::config::AnalyzerConfig;
use crate::error::{InvalidInput, Result};
use crate::{
    AmbiguityMetrics, AnalysisResult, Comparison, Issue, SecurityMetrics, SuccessPrediction,
    TokenMetrics,
};
use chrono::Utc;
use tracing::{debug, debug_span, warn, Span};

use super::comparison::compare_results;
use super::detectors::{
    Analysis, AmbiguityDetector, PromptAnalyzer, SecurityScanner, SuccessPredictor,
    TokenWasteAnalyzer,
};
use super::ScoreCalculator;

type DetectorRuns = (
    Option<Analysis<AmbiguityMetrics>>,
    Option<Analysis<TokenMetrics>>,
    Option<Analysis<SuccessPrediction>>,
    Option<Analysis<SecurityMetrics>>,
);

/// Main entry point: runs the enabled detectors and aggregates their findings
pub struct PromptDebugger {
    config: AnalyzerConfig,
    ambiguity: AmbiguityDetector,
    tokens: TokenWasteAnalyzer,
    success: SuccessPredictor,
    security: SecurityScanner,
}

impl PromptDebugger {
    pub fn new(config: AnalyzerConfig) -> Self {
        let tokens = TokenWasteAnalyzer::with_price(config.token_price_per_1k);
        Self {
            config,
            ambiguity: AmbiguityDetector::new(),
            tokens,
            success: SuccessPredictor::new(),
            security: SecurityScanner::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn validate(&self, prompt: &str) -> std::result::Result<(), InvalidInput> {
        if prompt.trim().is_empty() {
            return Err(InvalidInput::Empty);
        }
        let length = prompt.chars().count();
        if length > self.config.max_prompt_length {
            return Err(InvalidInput::TooLong {
                length,
                max: self.config.max_prompt_length,
            });
        }
        Ok(())
    }

    /// Analyze one prompt
    pub fn analyze(&self, prompt: &str) -> Result<AnalysisResult> {
        if let Err(e) = self.validate(prompt) {
            warn!("Rejected prompt: {}", e);
            return Err(e.into());
        }

        let span = debug_span!("analyze_prompt", chars = prompt.len());
        let _guard = span.enter();

        let config = &self.config;
        let (ambiguity, tokens, success, security) = self.run_detectors(prompt, &span);

        let mut issues: Vec<Issue> = Vec::new();
        let ambiguity = collect(ambiguity, &mut issues);
        let token_metrics = collect(tokens, &mut issues);
        let prediction = collect(success, &mut issues);
        let security = collect(security, &mut issues);

        let issues = ScoreCalculator::filter_by_severity(issues, config.min_severity_to_report);

        let score = ScoreCalculator::calculate(
            ambiguity.as_ref(),
            token_metrics.as_ref(),
            prediction.as_ref(),
            security.as_ref(),
        );
        debug!(
            score = score.value,
            grade = %score.grade,
            issues = issues.len(),
            "Prompt analyzed"
        );

        Ok(AnalysisResult {
            prompt_text: prompt.to_string(),
            timestamp: Utc::now(),
            issues,
            token_metrics,
            ambiguity,
            prediction,
            security,
            score,
        })
    }

    /// Analyze two prompts and compare B against A
    pub fn compare(&self, prompt_a: &str, prompt_b: &str) -> Result<Comparison> {
        let result_a = self.analyze(prompt_a)?;
        let result_b = self.analyze(prompt_b)?;
        Ok(compare_results(result_a, result_b))
    }

    /// Run the enabled detectors on the rayon pool, each inside `span`
    fn run_detectors(&self, prompt: &str, span: &Span) -> DetectorRuns {
        let config = &self.config;
        let ((ambiguity, tokens), (success, security)) = rayon::join(
            || {
                rayon::join(
                    || {
                        span.in_scope(|| {
                            run_if(config.enable_ambiguity_detection, &self.ambiguity, prompt)
                        })
                    },
                    || span.in_scope(|| run_if(config.enable_token_analysis, &self.tokens, prompt)),
                )
            },
            || {
                rayon::join(
                    || {
                        span.in_scope(|| {
                            run_if(config.enable_success_prediction, &self.success, prompt)
                        })
                    },
                    || {
                        span.in_scope(|| {
                            run_if(config.enable_security_scanning, &self.security, prompt)
                        })
                    },
                )
            },
        );
        (ambiguity, tokens, success, security)
    }
}

impl Default for PromptDebugger {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

fn run_if<A: PromptAnalyzer>(
    enabled: bool,
    analyzer: &A,
    prompt: &str,
) -> Option<Analysis<A::Metrics>> {
    if !enabled {
        return None;
    }
    let analysis = analyzer.analyze(prompt);
    debug!(
        analyzer = analyzer.name(),
        issues = analysis.issues.len(),
        "Detector finished"
    );
    Some(analysis)
}

/// Move a detector's issues into the shared list and keep its metrics
fn collect<M>(analysis: Option<Analysis<M>>, issues: &mut Vec<Issue>) -> Option<M> {
    analysis.map(|a| {
        issues.extend(a.issues);
        a.metrics
    })
}
