//! Ambiguity detection: vague terms, contradictory instructions, undefined
//! acronyms and indefinite quantifiers.

use super::{count_matches, fancy_find_all, word_count, Analysis, PromptAnalyzer};
use crate::{AmbiguityMetrics, Issue, IssueCategory, Severity};
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::OnceLock;

const VAGUE_PATTERNS: &[&str] = &[
    r"(?i)\b(some|many|few|several|various|numerous)\b",
    r"(?i)\b(might|maybe|perhaps|possibly|probably)\b",
    r"(?i)\b(things|stuff|etc\.?)\b",
    // "best practice" and "good example" are specific enough
    r"(?i)\b(good|bad|better|best)\b(?!\s+(?:practice|example))",
    r"(?i)\b(appropriate|suitable|relevant)\b",
];

/// Antonym pairs that conflict when requested in separate instructions
const CONTRADICTORY_PAIRS: &[(&str, &str)] = &[
    ("concise", "detailed"),
    ("brief", "comprehensive"),
    ("short", "extensive"),
    ("simple", "complex"),
    ("formal", "casual"),
    ("technical", "layman"),
    ("creative", "factual"),
    ("subjective", "objective"),
];

const INDEFINITE_QUANTIFIERS: &[&str] = &[
    "some", "many", "few", "several", "multiple", "various", "numerous", "a lot", "plenty",
];

const WELL_KNOWN_ACRONYMS: &[&str] = &["USA", "UK", "US", "AI", "ML", "API"];

fn vague_patterns() -> &'static [FancyRegex] {
    static PATTERNS: OnceLock<Vec<FancyRegex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        VAGUE_PATTERNS
            .iter()
            .map(|p| FancyRegex::new(p).expect("static vague pattern"))
            .collect()
    })
}

fn quantifier_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        INDEFINITE_QUANTIFIERS
            .iter()
            .map(|q| {
                let re = Regex::new(&format!(r"(?i)\b{}\b\s+\w+", regex::escape(q)))
                    .expect("static quantifier pattern");
                (*q, re)
            })
            .collect()
    })
}

fn acronym_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z]{2,6}$").expect("static acronym pattern"))
}

fn imperative_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(do|make|create|write|generate|provide)\b").expect("static imperative pattern")
    })
}

/// Detector for vague, conflicting or unclear instructions
pub struct AmbiguityDetector;

impl AmbiguityDetector {
    pub fn new() -> Self {
        Self
    }

    /// Distinct vague terms, one issue per term on first occurrence
    fn detect_vague_language(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let lower = prompt.to_lowercase();
        let mut vague_terms: Vec<String> = Vec::new();

        for pattern in vague_patterns() {
            for m in fancy_find_all(pattern, &lower) {
                let term = m.as_str();
                if vague_terms.iter().any(|t| t == term) {
                    continue;
                }
                vague_terms.push(term.to_string());

                let severity = if matches!(term, "things" | "stuff") {
                    Severity::High
                } else {
                    Severity::Medium
                };
                issues.push(
                    Issue::new(
                        IssueCategory::Ambiguity,
                        severity,
                        format!("Vague term detected: '{}'", term),
                        format!(
                            "The term '{}' is ambiguous and may lead to inconsistent interpretations.",
                            term
                        ),
                    )
                    .with_suggestion(format!(
                        "Replace '{}' with specific, measurable criteria.",
                        term
                    ))
                    .with_examples([
                        "Instead of 'some examples', specify 'provide 3 examples'",
                        "Instead of 'good quality', define what 'good' means in this context",
                    ]),
                );
            }
        }

        vague_terms
    }

    /// Antonym pairs whose first occurrences sit in different sentences.
    /// Only the first sentence containing each term is compared.
    fn detect_contradictions(
        &self,
        prompt: &str,
        issues: &mut Vec<Issue>,
    ) -> Vec<(String, String)> {
        let lower = prompt.to_lowercase();
        let sentences: Vec<String> = prompt.split('.').map(str::to_lowercase).collect();
        let mut conflicts = Vec::new();

        for &(first, second) in CONTRADICTORY_PAIRS {
            if !lower.contains(first) || !lower.contains(second) {
                continue;
            }
            let first_idx = sentences.iter().position(|s| s.contains(first));
            let second_idx = sentences.iter().position(|s| s.contains(second));
            let (Some(first_idx), Some(second_idx)) = (first_idx, second_idx) else {
                continue;
            };
            if first_idx == second_idx {
                // Same sentence reads as deliberate nuance
                continue;
            }

            conflicts.push((first.to_string(), second.to_string()));
            issues.push(
                Issue::new(
                    IssueCategory::Contradiction,
                    Severity::High,
                    format!("Contradictory instructions: '{}' vs '{}'", first, second),
                    format!(
                        "The prompt contains both '{}' and '{}' which may conflict.",
                        first, second
                    ),
                )
                .with_suggestion(
                    "Clarify which requirement takes precedence or reconcile the conflict.",
                )
                .with_examples([
                    format!(
                        "If you want both, explain: 'Be {} in structure but {} in examples'",
                        first, second
                    ),
                    format!(
                        "Or prioritize: 'Prefer {} output, but include {} sections if needed'",
                        first, second
                    ),
                ]),
            );
        }

        conflicts
    }

    fn detect_undefined_terms(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut undefined: Vec<String> = Vec::new();

        for word in prompt.split_whitespace() {
            if !acronym_pattern().is_match(word) || WELL_KNOWN_ACRONYMS.contains(&word) {
                continue;
            }
            if undefined.iter().any(|u| u == word) {
                continue;
            }
            undefined.push(word.to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Clarity,
                    Severity::Low,
                    format!("Potentially undefined acronym: '{}'", word),
                    format!("The acronym '{}' may not be universally understood.", word),
                )
                .with_suggestion(format!(
                    "Define '{}' on first use or ensure it's well-known in context.",
                    word
                )),
            );
        }

        undefined
    }

    /// Every "<quantifier> <word>" occurrence is reported, repeats included
    fn detect_unclear_instructions(&self, prompt: &str, issues: &mut Vec<Issue>) -> usize {
        let before = issues.len();

        for (quantifier, pattern) in quantifier_patterns() {
            for m in pattern.find_iter(prompt) {
                let phrase = m.as_str();
                let noun = phrase.split_whitespace().last().unwrap_or(phrase);
                issues.push(
                    Issue::new(
                        IssueCategory::Instruction,
                        Severity::Medium,
                        format!("Indefinite quantifier: '{}'", phrase),
                        format!("'{}' is imprecise and may lead to variable outputs.", phrase),
                    )
                    .with_suggestion(format!(
                        "Specify an exact number or range instead of '{}'.",
                        quantifier
                    ))
                    .with_examples([
                        format!("Instead of '{}', use 'exactly 5 {}'", phrase, noun),
                        format!("Or provide a range: 'between 3-7 {}'", noun),
                    ]),
                );
            }
        }

        issues.len() - before
    }

    /// Ambiguity score (0-100, lower is better)
    fn calculate_ambiguity_score(prompt: &str, vague_terms: usize, conflicts: usize) -> f64 {
        let words = word_count(prompt);
        if words == 0 {
            return 0.0;
        }

        let vague_density = vague_terms as f64 / words as f64 * 100.0;
        let vague_score = (vague_density * 5.0).min(50.0);
        let conflict_score = (conflicts as f64 * 15.0).min(40.0);

        let imperatives = count_matches(imperative_pattern(), &prompt.to_lowercase());
        let instruction_clarity = 10usize.saturating_sub(imperatives) as f64;

        (vague_score + conflict_score + instruction_clarity).clamp(0.0, 100.0)
    }
}

impl Default for AmbiguityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAnalyzer for AmbiguityDetector {
    type Metrics = AmbiguityMetrics;

    fn name(&self) -> &'static str {
        "ambiguity"
    }

    fn analyze(&self, prompt: &str) -> Analysis<AmbiguityMetrics> {
        let mut issues = Vec::new();

        let vague_terms = self.detect_vague_language(prompt, &mut issues);
        let conflicts = self.detect_contradictions(prompt, &mut issues);
        let undefined_terms = self.detect_undefined_terms(prompt, &mut issues);
        self.detect_unclear_instructions(prompt, &mut issues);

        let ambiguity_score =
            Self::calculate_ambiguity_score(prompt, vague_terms.len(), conflicts.len());

        let metrics = AmbiguityMetrics {
            ambiguity_score,
            clarity_score: 100.0 - ambiguity_score,
            vague_terms,
            conflicting_instructions: conflicts,
            undefined_terms,
        };
        Analysis::new(issues, metrics)
    }
}
