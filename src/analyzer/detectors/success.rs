//! Success prediction: estimates how likely a prompt is to get the desired
//! output from its structural signals.

use super::{word_count, Analysis, PromptAnalyzer};
use crate::{Issue, IssueCategory, Severity, SuccessPrediction};
use regex::Regex;
use std::sync::OnceLock;

/// Structural signals that raise the structure score, with their weight
const POSITIVE_SIGNALS: &[(&str, &str, f64)] = &[
    ("examples", r"(?i)example:|for example|such as", 10.0),
    ("constraints", r"(?i)must|should|exactly|between \d+ and \d+", 15.0),
    ("format", r"(?i)format|structure|template|example output", 15.0),
    ("context", r"(?i)context|background|situation|scenario", 10.0),
    ("goal", r"(?i)create|generate|write|make|produce|provide|give", 20.0),
    ("role", r"(?i)you are|act as|as a|role", 5.0),
    ("steps", r"(?i)step|first|then|finally|process", 10.0),
];

/// Signal families that hurt the structure score when overused
const NEGATIVE_SIGNALS: &[&str] = &[
    r"\b\w{20,}\b",
    r"(?i)and|also|additionally|furthermore",
    r"(?i)but|however|although|except",
    r"(?i)maybe|perhaps|might|could|anything",
];

const NEGATIVE_TOLERANCE: usize = 3;
const NEGATIVE_PENALTY_PER_MATCH: f64 = 2.0;
const NEGATIVE_PENALTY_CAP: f64 = 15.0;

const SHORT_PROMPT_WORDS: usize = 10;
const LONG_PROMPT_WORDS: usize = 500;
const SHORT_PROMPT_PENALTY: f64 = 20.0;
const LONG_PROMPT_PENALTY: f64 = 10.0;

const STRENGTH_EXAMPLES: &str = "Provides concrete examples";
const STRENGTH_FORMAT: &str = "Specifies output format";
const STRENGTH_CONSTRAINTS: &str = "Contains clear constraints";
const STRENGTH_CONTEXT: &str = "Provides relevant context";
const STRENGTH_ROLE: &str = "Defines AI role clearly";
const STRENGTH_STEPS: &str = "Uses step-by-step instructions";
const STRENGTH_CRITERIA: &str = "Defines success criteria";
const STRENGTH_DELIMITERS: &str = "Uses clear section delimiters";

/// Strength checks, in reporting order
const STRENGTH_CHECKS: &[(&str, &str)] = &[
    (STRENGTH_EXAMPLES, r"(?i)example|for instance|such as"),
    (
        STRENGTH_FORMAT,
        r"(?i)format|structure|output.*format|return.*format",
    ),
    (
        STRENGTH_CONSTRAINTS,
        r"(?i)must|should|required|exactly|between.*and",
    ),
    (STRENGTH_CONTEXT, r"(?i)context|background|scenario|situation"),
    (STRENGTH_ROLE, r"(?i)you are|act as|as a|your role"),
    (STRENGTH_STEPS, r"(?i)step|first|then|next|finally"),
    (
        STRENGTH_CRITERIA,
        r"(?i)success|correct|good|valid|acceptable",
    ),
    (STRENGTH_DELIMITERS, r"---|###|===|\*\*\*"),
];

/// Advice for each missing strength, in priority order
const RECOMMENDATIONS: &[(&str, &str)] = &[
    (
        STRENGTH_EXAMPLES,
        "Add 1-2 concrete examples of desired output to improve clarity",
    ),
    (
        STRENGTH_FORMAT,
        "Specify output format (JSON, markdown, list, etc.) for consistency",
    ),
    (
        STRENGTH_CONSTRAINTS,
        "Add explicit constraints (length, style, must/should requirements)",
    ),
    (
        STRENGTH_ROLE,
        "Consider adding role context (e.g., 'You are an expert in...')",
    ),
    (
        STRENGTH_CONTEXT,
        "Describe the background or audience the output is meant for",
    ),
    (
        STRENGTH_STEPS,
        "Break the task into ordered steps (first, then, finally)",
    ),
    (
        STRENGTH_CRITERIA,
        "State what a correct or acceptable result looks like",
    ),
];

const GOAL_VERB_RECOMMENDATION: &str =
    "Start with clear action verb: Create, Generate, Write, Analyze, etc.";
const SOLID_STRUCTURE_NOTE: &str = "Prompt structure is solid - consider A/B testing variations";
const MAX_RECOMMENDATIONS: usize = 5;

const RISK_NO_GOAL: &str = "No clear action verb - ambiguous goal";

const EXAMPLES_NEEDED_WORDS: usize = 50;
const FORMAT_NEEDED_WORDS: usize = 30;
const OPEN_ENDED_LIMIT: usize = 3;
const CONTRADICTION_LIMIT: usize = 2;
const ACRONYM_LIMIT: usize = 3;

const STRENGTH_POINTS: f64 = 6.0;
const STRENGTH_CAP: f64 = 40.0;
const RISK_POINTS: f64 = 5.0;
const RISK_CAP: f64 = 30.0;
const STRUCTURE_WEIGHT: f64 = 0.4;

struct RiskPatterns {
    goal_verb: Regex,
    open_ended: Regex,
    format_keyword: Regex,
    contradiction: Regex,
    acronym: Regex,
    context_word: Regex,
}

fn positive_signals() -> &'static [(&'static str, Regex, f64)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex, f64)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        POSITIVE_SIGNALS
            .iter()
            .map(|(name, p, w)| (*name, Regex::new(p).expect("static structure pattern"), *w))
            .collect()
    })
}

fn negative_signals() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        NEGATIVE_SIGNALS
            .iter()
            .map(|p| Regex::new(p).expect("static structure pattern"))
            .collect()
    })
}

fn strength_checks() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        STRENGTH_CHECKS
            .iter()
            .map(|(label, p)| (*label, Regex::new(p).expect("static strength pattern")))
            .collect()
    })
}

fn risk_patterns() -> &'static RiskPatterns {
    static PATTERNS: OnceLock<RiskPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| RiskPatterns {
        goal_verb: Regex::new(r"(?i)create|generate|write|make|produce|provide|give")
            .expect("static goal pattern"),
        open_ended: Regex::new(r"(?i)any|anything|whatever|however|maybe|perhaps")
            .expect("static open-ended pattern"),
        format_keyword: Regex::new(r"(?i)format|json|xml|markdown|list|table|code")
            .expect("static format pattern"),
        contradiction: Regex::new(r"(?i)but|however|although|except|unless")
            .expect("static contradiction pattern"),
        acronym: Regex::new(r"\b[A-Z]{2,}\b").expect("static acronym pattern"),
        context_word: Regex::new(r"(?i)context|background|about|regarding")
            .expect("static context pattern"),
    })
}

/// Predictor for how likely a prompt is to succeed
pub struct SuccessPredictor;

impl SuccessPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Structure score (0-100) from positive and negative signals plus length
    fn analyze_structure(&self, prompt: &str, words: usize, issues: &mut Vec<Issue>) -> f64 {
        let mut score: f64 = positive_signals()
            .iter()
            .filter(|(_, re, _)| re.is_match(prompt))
            .map(|(_, _, weight)| weight)
            .sum();

        for re in negative_signals() {
            let matches = re.find_iter(prompt).count();
            if matches > NEGATIVE_TOLERANCE {
                score -= (matches as f64 * NEGATIVE_PENALTY_PER_MATCH).min(NEGATIVE_PENALTY_CAP);
            }
        }

        if words < SHORT_PROMPT_WORDS {
            score -= SHORT_PROMPT_PENALTY;
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::High,
                    "Prompt too short",
                    "Very short prompts often lack necessary context and constraints.",
                )
                .with_suggestion("Provide more context, examples, and clear success criteria."),
            );
        } else if words > LONG_PROMPT_WORDS {
            score -= LONG_PROMPT_PENALTY;
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::Medium,
                    "Prompt may be too long",
                    "Very long prompts can dilute key instructions.",
                )
                .with_suggestion(
                    "Consider breaking into sections or removing less critical details.",
                ),
            );
        }

        score.clamp(0.0, 100.0)
    }

    fn identify_strengths(&self, prompt: &str) -> Vec<String> {
        strength_checks()
            .iter()
            .filter(|(_, re)| re.is_match(prompt))
            .map(|(label, _)| label.to_string())
            .collect()
    }

    fn identify_risk_factors(
        &self,
        prompt: &str,
        words: usize,
        issues: &mut Vec<Issue>,
    ) -> Vec<String> {
        let patterns = risk_patterns();
        let lower = prompt.to_lowercase();
        let mut risks = Vec::new();

        if !patterns.goal_verb.is_match(prompt) {
            risks.push(RISK_NO_GOAL.to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::High,
                    "Unclear goal or objective",
                    "Prompt lacks a clear action verb or goal statement.",
                )
                .with_suggestion(
                    "Start with a clear instruction like 'Create...', 'Generate...', or 'Write...'",
                ),
            );
        }

        if !lower.contains("example") && words > EXAMPLES_NEEDED_WORDS {
            risks.push("Complex prompt without examples".to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::Medium,
                    "Missing examples for complex task",
                    "Complex prompts benefit from concrete examples.",
                )
                .with_suggestion("Add 1-2 examples of desired output format or style."),
            );
        }

        let open_ended = patterns.open_ended.find_iter(prompt).count();
        if open_ended > OPEN_ENDED_LIMIT {
            risks.push(format!(
                "Too many open-ended terms ({} instances)",
                open_ended
            ));
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::Medium,
                    "Overly open-ended instructions",
                    "Too many open-ended terms may lead to inconsistent outputs.",
                )
                .with_suggestion("Add specific constraints or preferred approaches."),
            );
        }

        if !patterns.format_keyword.is_match(prompt) && words > FORMAT_NEEDED_WORDS {
            risks.push("No output format specified".to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Structure,
                    Severity::Medium,
                    "Output format not specified",
                    "Specifying format increases consistency.",
                )
                .with_suggestion(
                    "Add format instructions like 'Respond in JSON format' or 'Use markdown formatting'.",
                ),
            );
        }

        let contradictions = patterns.contradiction.find_iter(prompt).count();
        if contradictions > CONTRADICTION_LIMIT {
            risks.push(format!(
                "Multiple contradictory statements ({})",
                contradictions
            ));
        }

        let acronyms = patterns.acronym.find_iter(prompt).count();
        if acronyms > ACRONYM_LIMIT && !patterns.context_word.is_match(prompt) {
            risks.push("Technical terms without context".to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Context,
                    Severity::Medium,
                    "Technical terms without context",
                    "Found technical terms/acronyms without background context.",
                )
                .with_suggestion("Provide context or definitions for domain-specific terms."),
            );
        }

        risks
    }

    fn length_bonus(words: usize) -> f64 {
        match words {
            20..=200 => 15.0,
            10..=19 | 201..=300 => 5.0,
            _ => 0.0,
        }
    }

    fn calculate_success_probability(
        structure_score: f64,
        strengths: usize,
        risks: usize,
        words: usize,
    ) -> f64 {
        let base = structure_score * STRUCTURE_WEIGHT;
        let strength_score = (strengths as f64 * STRENGTH_POINTS).min(STRENGTH_CAP);
        let risk_penalty = (risks as f64 * RISK_POINTS).min(RISK_CAP);
        (base + strength_score + Self::length_bonus(words) - risk_penalty).clamp(0.0, 100.0)
    }

    /// Longer prompts and non-extreme probabilities give more confidence
    fn calculate_confidence(words: usize, probability: f64) -> f64 {
        let length_base = if words < 10 {
            50.0
        } else if words < 50 {
            70.0
        } else {
            85.0
        };
        let extremity_base = if probability > 20.0 && probability < 80.0 {
            100.0
        } else {
            70.0
        };
        (length_base + extremity_base) / 2.0
    }

    fn generate_recommendations(strengths: &[String], risks: &[String]) -> Vec<String> {
        let mut recommendations: Vec<String> = RECOMMENDATIONS
            .iter()
            .filter(|(strength, _)| !strengths.iter().any(|s| s == strength))
            .map(|(_, advice)| advice.to_string())
            .collect();

        if risks.iter().any(|r| r == RISK_NO_GOAL) {
            recommendations.push(GOAL_VERB_RECOMMENDATION.to_string());
        }

        if recommendations.is_empty() {
            recommendations.push(SOLID_STRUCTURE_NOTE.to_string());
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

impl Default for SuccessPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAnalyzer for SuccessPredictor {
    type Metrics = SuccessPrediction;

    fn name(&self) -> &'static str {
        "success"
    }

    fn analyze(&self, prompt: &str) -> Analysis<SuccessPrediction> {
        let mut issues = Vec::new();
        let words = word_count(prompt);

        let structure_score = self.analyze_structure(prompt, words, &mut issues);
        let strengths = self.identify_strengths(prompt);
        let risk_factors = self.identify_risk_factors(prompt, words, &mut issues);

        let success_probability = Self::calculate_success_probability(
            structure_score,
            strengths.len(),
            risk_factors.len(),
            words,
        );
        let confidence_score = Self::calculate_confidence(words, success_probability);
        let recommended_improvements = Self::generate_recommendations(&strengths, &risk_factors);

        let metrics = SuccessPrediction {
            success_probability,
            confidence_score,
            structure_score,
            risk_factors,
            strengths,
            recommended_improvements,
        };
        Analysis::new(issues, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_SPECIFIED: &str = "You are a senior Python developer. \
        Context: our team maintains a numeric library used in teaching. \
        Create a function called fibonacci that takes an integer n and returns the nth number. \
        First validate the input, then compute the value iteratively. \
        The function must reject negative input and should run in linear time. \
        For example: fibonacci(10) returns 55. \
        Format the answer as a single code block followed by a short explanation. \
        A correct answer passes these cases: fibonacci(0) is 0 and fibonacci(1) is 1.";

    fn predict(prompt: &str) -> Analysis<SuccessPrediction> {
        SuccessPredictor::new().analyze(prompt)
    }

    #[test]
    fn well_specified_prompt_scores_high() {
        let result = predict(WELL_SPECIFIED);
        assert!(
            result.metrics.success_probability > 70.0,
            "got {}",
            result.metrics.success_probability
        );
        assert!(result.metrics.strengths.len() >= 3);
        assert!(result
            .metrics
            .strengths
            .contains(&STRENGTH_EXAMPLES.to_string()));
        assert!(result.metrics.risk_factors.is_empty());
    }

    #[test]
    fn short_vague_prompt_is_flagged() {
        let result = predict("Tell me things.");
        assert!(result.metrics.success_probability < 50.0);
        assert!(result
            .issues
            .iter()
            .any(|i| i.title == "Prompt too short" && i.severity == Severity::High));
        assert!(result
            .issues
            .iter()
            .any(|i| i.title == "Unclear goal or objective"));
        assert!(result
            .metrics
            .risk_factors
            .contains(&RISK_NO_GOAL.to_string()));
    }

    #[test]
    fn missing_goal_adds_verb_recommendation_within_limit() {
        let result = predict("Tell me things.");
        // six missing strengths plus the verb advice, truncated
        assert_eq!(
            result.metrics.recommended_improvements.len(),
            MAX_RECOMMENDATIONS
        );
        assert_eq!(
            result.metrics.recommended_improvements[0],
            "Add 1-2 concrete examples of desired output to improve clarity"
        );
    }

    #[test]
    fn recommendations_follow_missing_strengths() {
        let recs = SuccessPredictor::generate_recommendations(
            &[
                STRENGTH_EXAMPLES.to_string(),
                STRENGTH_FORMAT.to_string(),
                STRENGTH_CONSTRAINTS.to_string(),
                STRENGTH_ROLE.to_string(),
                STRENGTH_CONTEXT.to_string(),
                STRENGTH_STEPS.to_string(),
            ],
            &[],
        );
        assert_eq!(
            recs,
            vec!["State what a correct or acceptable result looks like".to_string()]
        );
    }

    #[test]
    fn solid_note_when_nothing_missing() {
        let all: Vec<String> = STRENGTH_CHECKS.iter().map(|(s, _)| s.to_string()).collect();
        let recs = SuccessPredictor::generate_recommendations(&all, &[]);
        assert_eq!(recs, vec![SOLID_STRUCTURE_NOTE.to_string()]);
    }

    #[test]
    fn delimiters_count_as_strength() {
        let result = predict("Write a summary of the text below.\n---\nThe text goes here.");
        assert!(result
            .metrics
            .strengths
            .contains(&STRENGTH_DELIMITERS.to_string()));
    }

    #[test]
    fn open_ended_terms_raise_risk() {
        let result = predict(
            "Write anything you like, maybe a poem or perhaps a story, whatever comes to mind, \
             any length is fine.",
        );
        assert!(result
            .metrics
            .risk_factors
            .iter()
            .any(|r| r.starts_with("Too many open-ended terms")));
    }

    #[test]
    fn open_ended_terms_count_inside_words() {
        let result = predict(
            "Summarize the company plans, the company goals and the company values for many teams.",
        );
        assert!(result
            .metrics
            .risk_factors
            .contains(&"Too many open-ended terms (4 instances)".to_string()));
    }

    #[test]
    fn acronyms_without_context_are_a_context_issue() {
        let result = predict("Write a guide to AWS, GCP, IAM, VPC and KMS setup for teams.");
        let issue = result
            .issues
            .iter()
            .find(|i| i.title == "Technical terms without context")
            .expect("acronym risk");
        assert_eq!(issue.category, IssueCategory::Context);
    }

    #[test]
    fn length_bonus_boundaries() {
        assert_eq!(SuccessPredictor::length_bonus(9), 0.0);
        assert_eq!(SuccessPredictor::length_bonus(10), 5.0);
        assert_eq!(SuccessPredictor::length_bonus(20), 15.0);
        assert_eq!(SuccessPredictor::length_bonus(200), 15.0);
        assert_eq!(SuccessPredictor::length_bonus(201), 5.0);
        assert_eq!(SuccessPredictor::length_bonus(301), 0.0);
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(SuccessPredictor::calculate_confidence(5, 10.0), 60.0);
        assert_eq!(SuccessPredictor::calculate_confidence(30, 50.0), 85.0);
        assert_eq!(SuccessPredictor::calculate_confidence(80, 90.0), 77.5);
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(
            SuccessPredictor::calculate_success_probability(100.0, 20, 0, 100),
            95.0
        );
        assert_eq!(
            SuccessPredictor::calculate_success_probability(0.0, 0, 10, 3),
            0.0
        );
    }

    #[test]
    fn structure_score_stays_in_range() {
        let result = predict("");
        assert_eq!(result.metrics.structure_score, 0.0);
        let result = predict(WELL_SPECIFIED);
        assert!(result.metrics.structure_score <= 100.0);
    }
}
