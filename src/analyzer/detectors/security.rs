//! Security scanning: prompt injection, jailbreak phrasing, sensitive data,
//! malicious intent and unsanitized input.

use super::{Analysis, PromptAnalyzer};
use crate::{Issue, IssueCategory, SecurityMetrics, SensitiveFinding, Severity};
use regex::Regex;
use std::sync::OnceLock;

const INJECTION_PATTERNS: &[&str] = &[
    r"(?i)ignore\s+(?:(?:all|any|the|your|previous|above|prior|earlier)\s+)+(?:instructions|prompts|rules|directions)",
    r"(?i)disregard\s+(?:previous|all|above|prior)",
    r"(?i)forget\s+(?:everything|all|what\s+you\s+know)",
    r"(?i)new\s+(?:instructions|rules|system\s+prompt)",
    r"(?i)system\s*:\s*(?:you\s+are\s+now|override)",
    r"(?i)---\s*begin\s+new\s+prompt",
    r"(?i)sudo\s+mode",
    r"(?i)developer\s+mode",
    r"(?i)admin\s+(?:mode|access|override)",
];

const JAILBREAK_PATTERNS: &[&str] = &[
    r"(?i)DAN|jailbreak|unrestricted|evil\s+mode",
    r"(?i)pretend\s+you\s+(?:have\s+no|don't\s+have)\s+(?:rules|restrictions|limitations)",
    r"(?i)act\s+as\s+if\s+you\s+(?:have|don't\s+have)\s+no\s+(?:ethics|morals|restrictions)",
    r"(?i)roleplay\s+(?:without|ignore)\s+(?:ethics|safety|restrictions)",
    r"(?i)hypothetically\s+speaking.*?(?:illegal|unethical|harmful)",
];

/// Sensitive data patterns keyed by type
const SENSITIVE_PATTERNS: &[(&str, &str)] = &[
    (
        "api_key",
        r#"(?i)(?:api[_-]?key|apikey)\s*[:=]\s*["']?[a-zA-Z0-9_-]{20,}["']?"#,
    ),
    ("password", r#"(?i)password\s*[:=]\s*["']?[^\s"']+["']?"#),
    (
        "token",
        r#"(?i)(?:access[_-]?token|bearer)\s*[:=]\s*["']?[a-zA-Z0-9._-]{20,}["']?"#,
    ),
    ("email", r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b"),
    ("credit_card", r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b"),
    ("ssn", r"\b\d{3}-\d{2}-\d{4}\b"),
];

/// Types whose exposure grants access to a system
const CREDENTIAL_TYPES: &[&str] = &["api_key", "password", "token"];

const MALICIOUS_PATTERNS: &[&str] = &[
    r"(?i)(?:how\s+to\s+)?(?:hack|exploit|bypass|crack|break\s+into)",
    r"(?i)(?:generate|create|make)\s+(?:malware|virus|ransomware|exploit)",
    r"(?i)(?:bypass|evade|avoid)\s+(?:security|detection|firewall)",
    r"(?i)(?:steal|exfiltrate|extract)\s+(?:data|credentials|passwords)",
];

/// Literal fragments that look like injected markup or code
const DANGEROUS_FRAGMENTS: &[(&str, &str)] = &[
    ("<script>", "XSS-like pattern"),
    ("${", "Template injection pattern"),
    ("{{", "Template injection pattern"),
    ("../../", "Path traversal pattern"),
    ("; DROP ", "SQL injection pattern"),
    ("<!--", "HTML comment injection"),
];

/// Fraction of special characters above which a prompt looks obfuscated
const SPECIAL_CHAR_RATIO_LIMIT: f64 = 0.15;

const REDACTION_VISIBLE_CHARS: usize = 5;
const REDACTION_MASK: char = '*';

const INJECTION_PENALTY: f64 = 25.0;
const JAILBREAK_PENALTY: f64 = 25.0;
const SENSITIVE_PENALTY: f64 = 15.0;
const MALICIOUS_PENALTY: f64 = 20.0;
const SANITIZATION_PENALTY: f64 = 5.0;

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static security pattern"))
        .collect()
}

fn injection_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile_all(INJECTION_PATTERNS))
}

fn jailbreak_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile_all(JAILBREAK_PATTERNS))
}

fn malicious_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile_all(MALICIOUS_PATTERNS))
}

fn sensitive_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SENSITIVE_PATTERNS
            .iter()
            .map(|(kind, p)| (*kind, Regex::new(p).expect("static sensitive pattern")))
            .collect()
    })
}

fn special_char_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z0-9\s.,;:\-]").expect("static special char pattern"))
}

/// Keep the first few characters of a sensitive value and mask the rest
pub fn redact(value: &str) -> String {
    value
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i < REDACTION_VISIBLE_CHARS {
                c
            } else {
                REDACTION_MASK
            }
        })
        .collect()
}

/// Scanner for security and safety concerns
pub struct SecurityScanner;

impl SecurityScanner {
    pub fn new() -> Self {
        Self
    }

    fn detect_prompt_injections(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut injections = Vec::new();
        for pattern in injection_patterns() {
            for m in pattern.find_iter(prompt) {
                let text = m.as_str().to_string();
                issues.push(
                    Issue::new(
                        IssueCategory::Security,
                        Severity::Critical,
                        "Potential prompt injection detected",
                        format!(
                            "Found suspicious pattern: '{}' which may attempt to override system instructions.",
                            text
                        ),
                    )
                    .with_suggestion(
                        "Remove or rephrase this instruction. If legitimate, use clear delimiters and context.",
                    )
                    .with_examples([
                        "Use clear section markers: '--- User Input ---'",
                        "Explicitly state: 'The following is user-provided content:'",
                    ]),
                );
                injections.push(text);
            }
        }
        injections
    }

    fn detect_jailbreak_attempts(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut jailbreaks = Vec::new();
        for pattern in jailbreak_patterns() {
            for m in pattern.find_iter(prompt) {
                let text = m.as_str().to_string();
                issues.push(
                    Issue::new(
                        IssueCategory::Security,
                        Severity::Critical,
                        "Potential jailbreak attempt detected",
                        format!(
                            "Found pattern associated with jailbreak attempts: '{}'",
                            text
                        ),
                    )
                    .with_suggestion("Rephrase your request within normal usage parameters.")
                    .with_examples([
                        "Ask directly: 'Explain the concept of X'",
                        "Don't use roleplay to bypass restrictions",
                    ]),
                );
                jailbreaks.push(text);
            }
        }
        jailbreaks
    }

    /// Every match is reported, but only in redacted form
    fn detect_sensitive_data(
        &self,
        prompt: &str,
        issues: &mut Vec<Issue>,
    ) -> Vec<SensitiveFinding> {
        let mut findings = Vec::new();
        for (kind, pattern) in sensitive_patterns() {
            for m in pattern.find_iter(prompt) {
                let redacted = redact(m.as_str());
                let severity = if CREDENTIAL_TYPES.contains(kind) {
                    Severity::Critical
                } else {
                    Severity::High
                };
                issues.push(
                    Issue::new(
                        IssueCategory::Security,
                        severity,
                        format!("Sensitive data detected: {}", kind),
                        format!("Found what appears to be a {}: {}", kind, redacted),
                    )
                    .with_suggestion(
                        "Remove sensitive data from prompts. Use placeholders or environment variables.",
                    )
                    .with_examples([
                        format!("Use placeholder: {}_PLACEHOLDER", kind.to_uppercase()),
                        "Reference: 'Use the API key from environment variable'".to_string(),
                    ]),
                );
                findings.push(SensitiveFinding {
                    kind: kind.to_string(),
                    redacted,
                });
            }
        }
        findings
    }

    /// First match per pattern only
    fn detect_malicious_intent(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut malicious = Vec::new();
        for pattern in malicious_patterns() {
            let Some(m) = pattern.find(prompt) else {
                continue;
            };
            let text = m.as_str().to_string();
            issues.push(
                Issue::new(
                    IssueCategory::Security,
                    Severity::High,
                    "Potentially malicious intent detected",
                    format!("Found concerning pattern: '{}'", text),
                )
                .with_suggestion("Ensure your prompt has legitimate, ethical purposes.")
                .with_examples([
                    "If educational: Clearly state 'For educational purposes to understand X'",
                    "If security research: Frame as 'defensive security' or 'vulnerability assessment'",
                ]),
            );
            malicious.push(text);
        }
        malicious
    }

    fn check_input_sanitization(&self, prompt: &str, issues: &mut Vec<Issue>) -> Vec<String> {
        let mut found = Vec::new();

        for &(fragment, issue_type) in DANGEROUS_FRAGMENTS {
            if !prompt.contains(fragment) {
                continue;
            }
            found.push(issue_type.to_string());
            issues.push(
                Issue::new(
                    IssueCategory::Security,
                    Severity::Medium,
                    format!("Input sanitization concern: {}", issue_type),
                    format!("Found '{}' which resembles {}", fragment, issue_type),
                )
                .with_suggestion(
                    "If this is legitimate content, ensure proper escaping. If user input, sanitize it.",
                )
                .with_examples([
                    "Escape special characters: &lt;script&gt; instead of <script>",
                    "Use allowlists for user input validation",
                ]),
            );
        }

        let total_chars = prompt.chars().count();
        if total_chars > 0 {
            let special = special_char_pattern().find_iter(prompt).count();
            let ratio = special as f64 / total_chars as f64;
            if ratio > SPECIAL_CHAR_RATIO_LIMIT {
                found.push("Excessive special characters".to_string());
                issues.push(
                    Issue::new(
                        IssueCategory::Security,
                        Severity::Low,
                        "High density of special characters",
                        format!(
                            "Special characters make up {:.1}% of the prompt.",
                            ratio * 100.0
                        ),
                    )
                    .with_suggestion(
                        "Ensure special characters are necessary. High density may indicate obfuscation.",
                    ),
                );
            }
        }

        found
    }

    /// Security score (0-100, higher is better)
    fn calculate_security_score(
        injections: usize,
        jailbreaks: usize,
        sensitive: usize,
        malicious: usize,
        sanitization: usize,
    ) -> f64 {
        let penalty = injections as f64 * INJECTION_PENALTY
            + jailbreaks as f64 * JAILBREAK_PENALTY
            + sensitive as f64 * SENSITIVE_PENALTY
            + malicious as f64 * MALICIOUS_PENALTY
            + sanitization as f64 * SANITIZATION_PENALTY;
        (100.0 - penalty).max(0.0)
    }
}

impl Default for SecurityScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptAnalyzer for SecurityScanner {
    type Metrics = SecurityMetrics;

    fn name(&self) -> &'static str {
        "security"
    }

    fn analyze(&self, prompt: &str) -> Analysis<SecurityMetrics> {
        let mut issues = Vec::new();

        let injections = self.detect_prompt_injections(prompt, &mut issues);
        let jailbreaks = self.detect_jailbreak_attempts(prompt, &mut issues);
        let sensitive = self.detect_sensitive_data(prompt, &mut issues);
        let malicious = self.detect_malicious_intent(prompt, &mut issues);
        let sanitization = self.check_input_sanitization(prompt, &mut issues);

        let security_score = Self::calculate_security_score(
            injections.len(),
            jailbreaks.len(),
            sensitive.len(),
            malicious.len(),
            sanitization.len(),
        );

        let metrics = SecurityMetrics {
            security_score,
            potential_injections: injections,
            jailbreak_attempts: jailbreaks,
            sensitive_data_detected: !sensitive.is_empty(),
            sensitive_data: sensitive,
            malicious_indicators: malicious,
            sanitization_issues: sanitization,
        };
        Analysis::new(issues, metrics)
    }
}
