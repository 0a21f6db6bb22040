//! Side-by-side comparison of two analyzed prompts

use crate::{AnalysisResult, Comparison, Winner};

/// Quality gap (points) below which prompts count as equivalent
const QUALITY_MARGIN: f64 = 5.0;
/// Token gap worth mentioning in the summary
const TOKEN_MARGIN: i64 = 50;
/// Per-metric gap reported as a key difference
const KEY_DIFFERENCE_MARGIN: f64 = 10.0;

/// Build the comparison of two results. All deltas are B minus A.
pub fn compare_results(result_a: AnalysisResult, result_b: AnalysisResult) -> Comparison {
    let quality_difference = result_b.score.value - result_a.score.value;
    let token_difference = result_b.total_tokens() as i64 - result_a.total_tokens() as i64;
    let cost_difference = result_b.estimated_cost() - result_a.estimated_cost();

    let better_prompt = pick_winner(quality_difference, token_difference);
    let comparison_summary = summarize(
        &result_a,
        &result_b,
        quality_difference,
        token_difference,
        cost_difference,
    );
    let key_differences = key_differences(&result_a, &result_b);

    Comparison {
        prompt_a: result_a,
        prompt_b: result_b,
        quality_difference,
        token_difference,
        cost_difference,
        better_prompt,
        comparison_summary,
        key_differences,
    }
}

/// Clear quality winner first, otherwise the cheaper prompt (B on a tie)
pub fn pick_winner(quality_difference: f64, token_difference: i64) -> Winner {
    if quality_difference > QUALITY_MARGIN {
        Winner::B
    } else if quality_difference < -QUALITY_MARGIN {
        Winner::A
    } else if token_difference > 0 {
        Winner::A
    } else {
        Winner::B
    }
}

fn label(b_ahead: bool) -> &'static str {
    if b_ahead {
        "Prompt B"
    } else {
        "Prompt A"
    }
}

fn summarize(
    result_a: &AnalysisResult,
    result_b: &AnalysisResult,
    quality_difference: f64,
    token_difference: i64,
    cost_difference: f64,
) -> String {
    let mut parts = Vec::new();

    if quality_difference.abs() < QUALITY_MARGIN {
        parts.push("Both prompts have similar overall quality".to_string());
    } else {
        parts.push(format!(
            "{} has significantly better quality ({:.1} point difference)",
            label(quality_difference > 0.0),
            quality_difference.abs()
        ));
    }

    if token_difference.abs() > TOKEN_MARGIN {
        parts.push(format!(
            "{} uses {} more tokens (${:.4} cost difference)",
            label(token_difference > 0),
            token_difference.abs(),
            cost_difference.abs()
        ));
    }

    let critical_a = result_a.critical_issues().len();
    let critical_b = result_b.critical_issues().len();
    if critical_a != critical_b {
        parts.push(format!(
            "{} has fewer critical issues ({} vs {})",
            label(critical_b < critical_a),
            critical_a.min(critical_b),
            critical_a.max(critical_b)
        ));
    }

    format!("{}.", parts.join(". "))
}

/// Difference B - A when both sides measured it
fn delta<T>(a: Option<&T>, b: Option<&T>, metric: impl Fn(&T) -> f64) -> Option<f64> {
    Some(metric(b?) - metric(a?))
}

fn key_differences(result_a: &AnalysisResult, result_b: &AnalysisResult) -> Vec<String> {
    let winner = |diff: f64| if diff > 0.0 { "B" } else { "A" };
    let mut differences = Vec::new();

    let clarity = delta(result_a.ambiguity.as_ref(), result_b.ambiguity.as_ref(), |m| {
        m.clarity_score
    });
    if let Some(diff) = clarity.filter(|d| d.abs() > KEY_DIFFERENCE_MARGIN) {
        differences.push(format!(
            "Prompt {} is significantly clearer ({:.1} points)",
            winner(diff),
            diff.abs()
        ));
    }

    let success = delta(result_a.prediction.as_ref(), result_b.prediction.as_ref(), |m| {
        m.success_probability
    });
    if let Some(diff) = success.filter(|d| d.abs() > KEY_DIFFERENCE_MARGIN) {
        differences.push(format!(
            "Prompt {} has higher success probability ({:.1}% better)",
            winner(diff),
            diff.abs()
        ));
    }

    let efficiency = delta(
        result_a.token_metrics.as_ref(),
        result_b.token_metrics.as_ref(),
        |m| m.token_efficiency,
    );
    if let Some(diff) = efficiency.filter(|d| d.abs() > KEY_DIFFERENCE_MARGIN) {
        differences.push(format!(
            "Prompt {} is more token-efficient ({:.1}% better)",
            winner(diff),
            diff.abs()
        ));
    }

    let security = delta(result_a.security.as_ref(), result_b.security.as_ref(), |m| {
        m.security_score
    });
    if let Some(diff) = security.filter(|d| d.abs() > KEY_DIFFERENCE_MARGIN) {
        differences.push(format!(
            "Prompt {} is more secure ({:.1} points better)",
            winner(diff),
            diff.abs()
        ));
    }

    differences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Issue, IssueCategory, Score, SecurityMetrics, Severity};
    use chrono::Utc;

    fn result(score: f64, critical: usize, security: Option<f64>) -> AnalysisResult {
        AnalysisResult {
            prompt_text: "p".to_string(),
            timestamp: Utc::now(),
            issues: (0..critical)
                .map(|_| Issue::new(IssueCategory::Security, Severity::Critical, "c", ""))
                .collect(),
            token_metrics: None,
            ambiguity: None,
            prediction: None,
            security: security.map(|s| SecurityMetrics {
                security_score: s,
                potential_injections: vec![],
                jailbreak_attempts: vec![],
                sensitive_data: vec![],
                sensitive_data_detected: false,
                malicious_indicators: vec![],
                sanitization_issues: vec![],
            }),
            score: Score::new(score),
        }
    }

    #[test]
    fn test_winner_rules() {
        assert_eq!(pick_winner(10.0, 100), Winner::B);
        assert_eq!(pick_winner(-10.0, -100), Winner::A);
        assert_eq!(pick_winner(2.0, 30), Winner::A);
        assert_eq!(pick_winner(-2.0, -30), Winner::B);
        assert_eq!(pick_winner(0.0, 0), Winner::B);
        assert_eq!(pick_winner(5.0, 1), Winner::A);
    }

    #[test]
    fn test_similar_quality_summary() {
        let cmp = compare_results(result(70.0, 0, None), result(72.0, 0, None));
        assert_eq!(
            cmp.comparison_summary,
            "Both prompts have similar overall quality."
        );
        assert!(cmp.key_differences.is_empty());
    }

    #[test]
    fn test_summary_mentions_quality_and_critical_issues() {
        let cmp = compare_results(result(40.0, 2, Some(50.0)), result(80.0, 0, Some(100.0)));
        assert_eq!(cmp.better_prompt, Winner::B);
        assert_eq!(
            cmp.comparison_summary,
            "Prompt B has significantly better quality (40.0 point difference). \
             Prompt B has fewer critical issues (0 vs 2)."
        );
        assert_eq!(
            cmp.key_differences,
            vec!["Prompt B is more secure (50.0 points better)".to_string()]
        );
    }

    #[test]
    fn test_key_difference_skipped_when_one_side_missing() {
        let cmp = compare_results(result(50.0, 0, Some(0.0)), result(50.0, 0, None));
        assert!(cmp.key_differences.is_empty());
    }

    #[test]
    fn test_differences_are_b_minus_a() {
        let cmp = compare_results(result(80.0, 0, None), result(60.0, 0, None));
        assert_eq!(cmp.quality_difference, -20.0);
        assert_eq!(cmp.better_prompt, Winner::A);
        assert_eq!(cmp.token_difference, 0);
    }
}
