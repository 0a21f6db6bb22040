//! Overall quality score from the individual analyzer scores

use crate::analyzer::detectors::round_to;
use crate::{
    AmbiguityMetrics, Issue, Score, SecurityMetrics, Severity, SuccessPrediction, TokenMetrics,
};

/// Weight of each analyzer score in the overall score
pub const CLARITY_WEIGHT: f64 = 0.25;
pub const TOKEN_EFFICIENCY_WEIGHT: f64 = 0.20;
pub const SUCCESS_WEIGHT: f64 = 0.35;
pub const SECURITY_WEIGHT: f64 = 0.20;

/// Calculator for the overall prompt quality score
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted mean over the analyzers that ran, rounded to two decimals.
    /// Weights are renormalized so disabled analyzers don't drag the score down.
    pub fn overall(
        ambiguity: Option<&AmbiguityMetrics>,
        tokens: Option<&TokenMetrics>,
        prediction: Option<&SuccessPrediction>,
        security: Option<&SecurityMetrics>,
    ) -> f64 {
        let parts = [
            ambiguity.map(|m| (m.clarity_score, CLARITY_WEIGHT)),
            tokens.map(|m| (m.token_efficiency, TOKEN_EFFICIENCY_WEIGHT)),
            prediction.map(|m| (m.success_probability, SUCCESS_WEIGHT)),
            security.map(|m| (m.security_score, SECURITY_WEIGHT)),
        ];

        let (weighted, total_weight) = parts
            .iter()
            .flatten()
            .fold((0.0_f64, 0.0_f64), |(sum, weights), &(score, weight)| {
                (sum + score * weight, weights + weight)
            });

        if total_weight == 0.0 {
            return 0.0;
        }
        round_to(weighted / total_weight, 2)
    }

    /// Overall score with its grade
    pub fn calculate(
        ambiguity: Option<&AmbiguityMetrics>,
        tokens: Option<&TokenMetrics>,
        prediction: Option<&SuccessPrediction>,
        security: Option<&SecurityMetrics>,
    ) -> Score {
        Score::new(Self::overall(ambiguity, tokens, prediction, security))
    }

    /// Keep issues at or above the minimum severity, preserving order
    pub fn filter_by_severity(issues: Vec<Issue>, min: Severity) -> Vec<Issue> {
        issues.into_iter().filter(|i| i.severity >= min).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grade, IssueCategory};

    fn clarity(score: f64) -> AmbiguityMetrics {
        AmbiguityMetrics {
            ambiguity_score: 100.0 - score,
            clarity_score: score,
            ..Default::default()
        }
    }

    fn security(score: f64) -> SecurityMetrics {
        SecurityMetrics {
            security_score: score,
            potential_injections: vec![],
            jailbreak_attempts: vec![],
            sensitive_data: vec![],
            sensitive_data_detected: false,
            malicious_indicators: vec![],
            sanitization_issues: vec![],
        }
    }

    fn prediction(probability: f64) -> SuccessPrediction {
        SuccessPrediction {
            success_probability: probability,
            confidence_score: 85.0,
            structure_score: 50.0,
            risk_factors: vec![],
            strengths: vec![],
            recommended_improvements: vec![],
        }
    }

    #[test]
    fn test_nothing_ran_scores_zero() {
        let score = ScoreCalculator::calculate(None, None, None, None);
        assert_eq!(score.value, 0.0);
        assert_eq!(score.grade, Grade::F);
    }

    #[test]
    fn test_single_analyzer_uses_its_score() {
        let c = clarity(73.0);
        assert_eq!(ScoreCalculator::overall(Some(&c), None, None, None), 73.0);
    }

    #[test]
    fn test_weights_are_renormalized() {
        // (80*0.25 + 40*0.35) / 0.60 = 56.666..
        let c = clarity(80.0);
        let p = prediction(40.0);
        assert_eq!(
            ScoreCalculator::overall(Some(&c), None, Some(&p), None),
            56.67
        );
    }

    #[test]
    fn test_three_analyzers_weighted() {
        // (80*0.25 + 60*0.35 + 100*0.20) / 0.80 = 76.25
        let c = clarity(80.0);
        let p = prediction(60.0);
        let s = security(100.0);
        let score = ScoreCalculator::calculate(Some(&c), None, Some(&p), Some(&s));
        assert_eq!(score.value, 76.25);
        assert_eq!(score.grade, Grade::C);
    }

    #[test]
    fn test_filter_by_severity_keeps_order() {
        let issues = vec![
            Issue::new(IssueCategory::Clarity, Severity::Low, "a", ""),
            Issue::new(IssueCategory::Security, Severity::Critical, "b", ""),
            Issue::new(IssueCategory::Structure, Severity::Info, "c", ""),
            Issue::new(IssueCategory::TokenWaste, Severity::Medium, "d", ""),
        ];
        let kept = ScoreCalculator::filter_by_severity(issues.clone(), Severity::Medium);
        let titles: Vec<_> = kept.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d"]);

        let all = ScoreCalculator::filter_by_severity(issues, Severity::Info);
        assert_eq!(all.len(), 4);
    }
}
