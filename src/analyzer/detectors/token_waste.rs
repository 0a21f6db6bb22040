//! Token waste analysis: redundant phrases, filler words, repetition and
//! verbose sentences, with the tokens each rewrite would save.

use super::{fancy_find_all, round_to, Analysis, PromptAnalyzer};
use crate::config::DEFAULT_TOKEN_PRICE_PER_1K;
use crate::tokenizer::{self, TokenCounter};
use crate::{
    CompressionKind, CompressionOpportunity, Issue, IssueCategory, Severity, TokenMetrics,
    VerboseSection,
};
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use std::sync::OnceLock;

const REDUNDANT_PHRASES: &[&str] = &[
    "please note that",
    "it is important to note that",
    "keep in mind that",
    "it should be noted that",
    "as mentioned above",
    "as previously stated",
    "in order to",
    "due to the fact that",
    "for the purpose of",
    "in the event that",
    "with regard to",
    "with respect to",
    "at this point in time",
    "in my opinion",
];

const FILLER_WORDS: &[&str] = &[
    "actually",
    "basically",
    "essentially",
    "literally",
    "really",
    "very",
    "quite",
    "rather",
    "somewhat",
    "just",
    "simply",
    "merely",
];

/// Run over case-folded text: backreferences compare exact characters
const REPETITION_PATTERNS: &[&str] = &[
    // same word again within five words
    r"(\b\w+\b)(?:\s+\w+){0,5}\s+\1",
    r"(\b\w{4,}\b)\s+\1",
];

/// Phrases above this token count are a medium finding
const COSTLY_PHRASE_TOKENS: usize = 5;
/// Repeated spans this short are ordinary prose
const MIN_REPETITION_CHARS: usize = 10;
const REPETITION_PREVIEW_CHARS: usize = 50;
const VERBOSE_SENTENCE_TOKENS: usize = 50;
/// Technical text runs above this tokens-per-word ratio and is not verbose
const VERBOSE_TOKENS_PER_WORD: f64 = 1.5;
const SENTENCE_PREVIEW_CHARS: usize = 100;

/// Suggested rewrite for a redundant phrase
struct Replacement {
    replacement: &'static str,
    suggestion: String,
    examples: Vec<&'static str>,
}

fn replacement_for(phrase: &str) -> Replacement {
    match phrase {
        "please note that" => Replacement {
            replacement: "Note:",
            suggestion: "Replace 'please note that' with 'Note:' or remove entirely".to_string(),
            examples: vec!["Note: The deadline is Friday", "The deadline is Friday"],
        },
        "it is important to note that" => Replacement {
            replacement: "Important:",
            suggestion: "Replace with 'Important:' or integrate into sentence".to_string(),
            examples: vec!["Important: Check formatting", "Check formatting carefully"],
        },
        "in order to" => Replacement {
            replacement: "to",
            suggestion: "Replace 'in order to' with 'to'".to_string(),
            examples: vec!["To complete this task...", "Use this to achieve..."],
        },
        "due to the fact that" => Replacement {
            replacement: "because",
            suggestion: "Replace 'due to the fact that' with 'because' or 'since'".to_string(),
            examples: vec!["Because the system...", "Since we need..."],
        },
        other => Replacement {
            replacement: "",
            suggestion: format!("Consider removing or simplifying '{}'", other),
            examples: vec!["Direct statement without preamble"],
        },
    }
}

fn repetition_patterns() -> &'static [FancyRegex] {
    static PATTERNS: OnceLock<Vec<FancyRegex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        REPETITION_PATTERNS
            .iter()
            .map(|p| FancyRegex::new(p).expect("static repetition pattern"))
            .collect()
    })
}

fn sentence_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("static sentence pattern"))
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Analyzer for tokens that could be removed without changing meaning
pub struct TokenWasteAnalyzer {
    price_per_1k: f64,
}

impl TokenWasteAnalyzer {
    pub fn new() -> Self {
        Self::with_price(DEFAULT_TOKEN_PRICE_PER_1K)
    }

    pub fn with_price(price_per_1k: f64) -> Self {
        Self { price_per_1k }
    }

    pub fn price_per_1k(&self) -> f64 {
        self.price_per_1k
    }

    /// Analyze with an explicit price per 1000 tokens
    pub fn analyze_with_price(&self, prompt: &str, price_per_1k: f64) -> Analysis<TokenMetrics> {
        let counter = tokenizer::shared();
        let mut issues = Vec::new();

        let total_tokens = counter.count(prompt);

        let redundant_phrases = self.detect_redundant_phrases(counter, prompt, &mut issues);
        let filler_words = self.detect_filler_words(counter, prompt, &mut issues);
        let repetitions = self.detect_repetitions(prompt, &mut issues);
        let verbose_sections = self.detect_verbose_sections(counter, prompt, &mut issues);

        let compression_opportunities =
            self.calculate_compressions(counter, &redundant_phrases, &filler_words);

        let savings: usize = compression_opportunities
            .iter()
            .map(|op| op.tokens_saved)
            .sum();
        let unnecessary_tokens = savings.min(total_tokens);

        let token_efficiency = if total_tokens > 0 {
            round_to(
                (total_tokens - unnecessary_tokens) as f64 / total_tokens as f64 * 100.0,
                2,
            )
        } else {
            100.0
        };
        let estimated_cost = round_to(total_tokens as f64 / 1000.0 * price_per_1k, 4);

        let metrics = TokenMetrics {
            total_tokens,
            estimated_cost,
            unnecessary_tokens,
            token_efficiency,
            redundant_phrases,
            filler_words,
            repetitions,
            verbose_sections,
            compression_opportunities,
        };
        Analysis::new(issues, metrics)
    }

    fn detect_redundant_phrases(
        &self,
        counter: &TokenCounter,
        prompt: &str,
        issues: &mut Vec<Issue>,
    ) -> Vec<String> {
        let lower = prompt.to_lowercase();
        let mut found = Vec::new();

        for &phrase in REDUNDANT_PHRASES {
            if !lower.contains(phrase) {
                continue;
            }
            let phrase_tokens = counter.count(phrase);
            let severity = if phrase_tokens > COSTLY_PHRASE_TOKENS {
                Severity::Medium
            } else {
                Severity::Low
            };
            let replacement = replacement_for(phrase);
            issues.push(
                Issue::new(
                    IssueCategory::TokenWaste,
                    severity,
                    format!("Redundant phrase: '{}'", phrase),
                    format!(
                        "This phrase uses {} tokens but adds minimal value.",
                        phrase_tokens
                    ),
                )
                .with_suggestion(replacement.suggestion)
                .with_examples(replacement.examples),
            );
            found.push(phrase.to_string());
        }

        found
    }

    /// Distinct filler words in order of first appearance
    fn detect_filler_words(
        &self,
        counter: &TokenCounter,
        prompt: &str,
        issues: &mut Vec<Issue>,
    ) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for word in prompt.split_whitespace() {
            let clean = word
                .trim_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
                .to_lowercase();
            if FILLER_WORDS.contains(&clean.as_str()) && !found.contains(&clean) {
                found.push(clean);
            }
        }

        if !found.is_empty() {
            let wasted: usize = found.iter().map(|w| counter.count(&format!(" {}", w))).sum();
            let head = |n: usize| {
                found
                    .iter()
                    .take(n)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            issues.push(
                Issue::new(
                    IssueCategory::TokenWaste,
                    Severity::Low,
                    format!("Filler words detected: {}", head(5)),
                    format!(
                        "Found {} filler words wasting ~{} tokens.",
                        found.len(),
                        wasted
                    ),
                )
                .with_suggestion("Remove filler words that don't add semantic value.")
                .with_examples([
                    format!("Remove words like: {}", head(3)),
                    "These words rarely change the AI's interpretation".to_string(),
                ]),
            );
        }

        found
    }

    fn detect_repetitions(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut repetitions = Vec::new();
        let folded = prompt.to_lowercase();
        // Offsets into the folded text are valid in the prompt only when folding kept every length
        let aligned = folded.len() == prompt.len();

        for pattern in repetition_patterns() {
            for m in fancy_find_all(pattern, &folded) {
                let repeated = if aligned {
                    prompt.get(m.start()..m.end()).unwrap_or(m.as_str())
                } else {
                    m.as_str()
                };
                if repeated.chars().count() <= MIN_REPETITION_CHARS {
                    continue;
                }
                let shown = preview(repeated, REPETITION_PREVIEW_CHARS);
                issues.push(
                    Issue::new(
                        IssueCategory::TokenWaste,
                        Severity::Medium,
                        "Repetitive text detected",
                        format!("Found repeated content: '{}...'", shown),
                    )
                    .with_suggestion(
                        "Remove duplicate instructions or consolidate repeated concepts.",
                    ),
                );
                repetitions.push(shown);
            }
        }

        repetitions
    }

    fn detect_verbose_sections(
        &self,
        counter: &TokenCounter,
        prompt: &str,
        issues: &mut Vec<Issue>,
    ) -> Vec<VerboseSection> {
        let mut sections = Vec::new();

        for (i, sentence) in sentence_splitter().split(prompt).enumerate() {
            if sentence.trim().is_empty() {
                continue;
            }
            let tokens = counter.count(sentence);
            if tokens <= VERBOSE_SENTENCE_TOKENS {
                continue;
            }
            let words = sentence.split_whitespace().count();
            let per_word = if words > 0 {
                tokens as f64 / words as f64
            } else {
                0.0
            };
            if per_word >= VERBOSE_TOKENS_PER_WORD {
                continue;
            }

            let sentence_number = i + 1;
            issues.push(
                Issue::new(
                    IssueCategory::TokenWaste,
                    Severity::Medium,
                    format!("Verbose section detected (sentence {})", sentence_number),
                    format!(
                        "This sentence uses {} tokens and may be overly verbose.",
                        tokens
                    ),
                )
                .with_suggestion(
                    "Consider breaking into multiple sentences or removing unnecessary details.",
                )
                .with_location(format!("Sentence {}", sentence_number)),
            );
            sections.push(VerboseSection {
                sentence_number,
                tokens,
                preview: preview(sentence, SENTENCE_PREVIEW_CHARS),
            });
        }

        sections
    }

    fn calculate_compressions(
        &self,
        counter: &TokenCounter,
        redundant_phrases: &[String],
        filler_words: &[String],
    ) -> Vec<CompressionOpportunity> {
        let phrases = redundant_phrases.iter().map(|phrase| {
            let replacement = replacement_for(phrase).replacement;
            let saved = counter
                .count(phrase)
                .saturating_sub(counter.count(replacement));
            CompressionOpportunity {
                kind: CompressionKind::RedundantPhrase,
                original: phrase.clone(),
                replacement: replacement.to_string(),
                tokens_saved: saved,
            }
        });

        let fillers = filler_words.iter().map(|word| CompressionOpportunity {
            kind: CompressionKind::FillerWord,
            original: word.clone(),
            replacement: String::new(),
            tokens_saved: counter.count(&format!(" {}", word)),
        });

        phrases.chain(fillers).collect()
    }
}

impl Default for TokenWasteAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAnalyzer for TokenWasteAnalyzer {
    type Metrics = TokenMetrics;

    fn name(&self) -> &'static str {
        "token_waste"
    }

    fn analyze(&self, prompt: &str) -> Analysis<TokenMetrics> {
        self.analyze_with_price(prompt, self.price_per_1k)
    }
}
