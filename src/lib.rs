//! Prompt Debugger: Prompt Quality Analyzer
//!
//! This library scores natural-language prompts written for generative AI
//! systems, flags concrete problems (ambiguity, token waste, weak structure,
//! security concerns) and compares two prompt variants.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod tokenizer;

pub use analyzer::PromptDebugger;
pub use config::AnalyzerConfig;
pub use error::{Error, InvalidInput, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The main result of analyzing a prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analyzed prompt text
    pub prompt_text: String,
    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
    /// Issues that passed the severity filter
    pub issues: Vec<Issue>,
    /// Token usage metrics (None when token analysis is disabled)
    pub token_metrics: Option<TokenMetrics>,
    /// Ambiguity metrics (None when ambiguity detection is disabled)
    pub ambiguity: Option<AmbiguityMetrics>,
    /// Success prediction (None when success prediction is disabled)
    pub prediction: Option<SuccessPrediction>,
    /// Security metrics (None when security scanning is disabled)
    pub security: Option<SecurityMetrics>,
    /// Overall weighted quality score with grade
    pub score: Score,
}

impl AnalysisResult {
    /// All critical severity issues
    pub fn critical_issues(&self) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .collect()
    }

    /// All issues of one category, in report order
    pub fn issues_by_category(&self, category: IssueCategory) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    /// Issues grouped by category. Categories without issues are absent.
    pub fn issues_grouped_by_category(&self) -> BTreeMap<IssueCategory, Vec<&Issue>> {
        let mut grouped: BTreeMap<IssueCategory, Vec<&Issue>> = BTreeMap::new();
        for issue in &self.issues {
            grouped.entry(issue.category).or_default().push(issue);
        }
        grouped
    }

    pub fn total_tokens(&self) -> usize {
        self.token_metrics
            .as_ref()
            .map(|m| m.total_tokens)
            .unwrap_or(0)
    }

    pub fn estimated_cost(&self) -> f64 {
        self.token_metrics
            .as_ref()
            .map(|m| m.estimated_cost)
            .unwrap_or(0.0)
    }
}

/// Overall quality score with grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Weighted score (0-100, two decimals)
    pub value: f64,
    /// Letter grade (A-F)
    pub grade: Grade,
}

impl Score {
    pub fn new(value: f64) -> Self {
        let grade = Grade::from_score(value);
        Self { value, grade }
    }
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// One-line description of the grade for renderers
    pub fn description(self) -> &'static str {
        match self {
            Grade::A => "Excellent - clear, specific and safe prompt",
            Grade::B => "Good - solid prompt with room for improvement",
            Grade::C => "Fair - usable but vague or inefficient in places",
            Grade::D => "Poor - significant clarity or structure problems",
            Grade::F => "Failing - prompt needs a major rewrite",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// An issue found during analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// What kind of problem this is
    pub category: IssueCategory,
    /// Severity of the issue
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// Human-readable explanation
    pub description: String,
    /// Where in the prompt (e.g. "Sentence 3")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Suggested fix (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Illustrative rewrites
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl Issue {
    pub fn new(
        category: IssueCategory,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            title: title.into(),
            description: description.into(),
            location: None,
            suggestion: None,
            examples: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }
}

/// Severity levels for issues, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Rank used for filtering (info = 0 .. critical = 4)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// Categories of prompt issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Ambiguity,
    Contradiction,
    TokenWaste,
    Clarity,
    Structure,
    Security,
    Context,
    Instruction,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueCategory::Ambiguity => write!(f, "ambiguity"),
            IssueCategory::Contradiction => write!(f, "contradiction"),
            IssueCategory::TokenWaste => write!(f, "token_waste"),
            IssueCategory::Clarity => write!(f, "clarity"),
            IssueCategory::Structure => write!(f, "structure"),
            IssueCategory::Security => write!(f, "security"),
            IssueCategory::Context => write!(f, "context"),
            IssueCategory::Instruction => write!(f, "instruction"),
        }
    }
}

/// Metrics related to prompt ambiguity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbiguityMetrics {
    /// 0-100, lower is better
    pub ambiguity_score: f64,
    /// 0-100, higher is better (always 100 - ambiguity_score)
    pub clarity_score: f64,
    /// Distinct vague terms in first-seen order
    pub vague_terms: Vec<String>,
    /// Antonym pairs used in different sentences
    pub conflicting_instructions: Vec<(String, String)>,
    /// Acronyms that may need a definition
    pub undefined_terms: Vec<String>,
}

/// Security and safety metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// 0-100, higher is safer
    pub security_score: f64,
    pub potential_injections: Vec<String>,
    pub jailbreak_attempts: Vec<String>,
    /// Redacted sensitive values
    pub sensitive_data: Vec<SensitiveFinding>,
    pub sensitive_data_detected: bool,
    pub malicious_indicators: Vec<String>,
    pub sanitization_issues: Vec<String>,
}

/// A sensitive value found in a prompt. Only the redacted form is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveFinding {
    /// Data type, e.g. "api_key" or "email"
    pub kind: String,
    /// First characters of the match followed by a mask
    pub redacted: String,
}

/// Predicted success metrics for the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessPrediction {
    /// 0-100
    pub success_probability: f64,
    /// 0-100
    pub confidence_score: f64,
    /// Structural quality score the probability is based on (0-100)
    pub structure_score: f64,
    pub risk_factors: Vec<String>,
    pub strengths: Vec<String>,
    pub recommended_improvements: Vec<String>,
}

/// Token usage and efficiency metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetrics {
    pub total_tokens: usize,
    /// Cost in the configured currency, four decimals
    pub estimated_cost: f64,
    /// Tokens that could be saved by the listed compressions
    pub unnecessary_tokens: usize,
    /// Percentage of tokens that carry meaning (0-100, two decimals)
    pub token_efficiency: f64,
    pub redundant_phrases: Vec<String>,
    pub filler_words: Vec<String>,
    /// Previews of repeated text
    pub repetitions: Vec<String>,
    pub verbose_sections: Vec<VerboseSection>,
    pub compression_opportunities: Vec<CompressionOpportunity>,
}

/// A sentence with many tokens and low information density
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerboseSection {
    /// 1-based index of the sentence segment
    pub sentence_number: usize,
    pub tokens: usize,
    /// First 100 characters of the sentence
    pub preview: String,
}

/// Kind of token saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionKind {
    RedundantPhrase,
    FillerWord,
}

/// One concrete rewrite and the tokens it saves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionOpportunity {
    pub kind: CompressionKind,
    pub original: String,
    pub replacement: String,
    pub tokens_saved: usize,
}

/// Which prompt of a comparison is preferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::A => write!(f, "A"),
            Winner::B => write!(f, "B"),
        }
    }
}

/// Comparison between two prompts. All deltas are B minus A.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub prompt_a: AnalysisResult,
    pub prompt_b: AnalysisResult,
    pub quality_difference: f64,
    pub token_difference: i64,
    pub cost_difference: f64,
    pub better_prompt: Winner,
    pub comparison_summary: String,
    pub key_differences: Vec<String>,
}

/// Public API: analyze one prompt with the given configuration.
pub fn analyze(prompt: &str, config: &AnalyzerConfig) -> Result<AnalysisResult> {
    PromptDebugger::new(config.clone()).analyze(prompt)
}

/// Public API: analyze two prompts and compare them (B relative to A).
pub fn compare(prompt_a: &str, prompt_b: &str, config: &AnalyzerConfig) -> Result<Comparison> {
    PromptDebugger::new(config.clone()).compare(prompt_a, prompt_b)
}
