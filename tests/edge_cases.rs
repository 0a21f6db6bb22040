//! Edge case tests: degenerate inputs must not panic.

use prompt_debugger::{analyze, AnalyzerConfig, Error, InvalidInput, PromptDebugger};

fn analyze_default(prompt: &str) -> Result<prompt_debugger::AnalysisResult, Error> {
    analyze(prompt, &AnalyzerConfig::default())
}

#[test]
fn whitespace_only_is_rejected() {
    for prompt in [" ", "\n\n", "\t \r\n", "\u{00A0}\u{2003}"] {
        assert_eq!(
            analyze_default(prompt).unwrap_err(),
            Error::InvalidInput(InvalidInput::Empty),
            "prompt {:?}",
            prompt
        );
    }
}

#[test]
fn single_word_no_panic() {
    let r = analyze_default("Hi").unwrap();
    let ambiguity = r.ambiguity.unwrap();
    assert_eq!(ambiguity.ambiguity_score + ambiguity.clarity_score, 100.0);
    assert!(r.score.value >= 0.0 && r.score.value <= 100.0);
}

#[test]
fn punctuation_only_no_panic() {
    let r = analyze_default("?!...;;;").unwrap();
    let security = r.security.unwrap();
    assert!(security
        .sanitization_issues
        .contains(&"Excessive special characters".to_string()));
}

#[test]
fn unicode_prompt_no_panic() {
    let r = analyze_default("Écris un résumé détaillé de l'article 日本語のテキスト 🚀🚀🚀").unwrap();
    let tokens = r.token_metrics.unwrap();
    assert!(tokens.total_tokens > 0);
    assert!(tokens.token_efficiency <= 100.0);
}

#[test]
fn long_sentence_with_multibyte_preview_no_panic() {
    let sentence = vec!["naïve"; 80].join(" ");
    let r = analyze_default(&sentence).unwrap();
    let tokens = r.token_metrics.unwrap();
    for section in &tokens.verbose_sections {
        assert!(section.preview.chars().count() <= 100);
    }
    for repetition in &tokens.repetitions {
        assert!(repetition.chars().count() <= 50);
    }
}

#[test]
fn prompt_at_exact_max_length_is_accepted() {
    let config = AnalyzerConfig::default().with_max_prompt_length(10);
    let debugger = PromptDebugger::new(config);
    assert!(debugger.analyze("abcdefghij").is_ok());
    assert!(debugger.analyze("abcdefghijk").is_err());
}

#[test]
fn large_prompt_is_analyzed() {
    let paragraph = "Create a concise summary of the quarterly report for the finance team. ";
    let prompt = paragraph.repeat(400);
    let r = analyze_default(&prompt).unwrap();
    let prediction = r.prediction.unwrap();
    assert!(prediction
        .risk_factors
        .contains(&"Complex prompt without examples".to_string()));
    assert!(r
        .issues
        .iter()
        .any(|i| i.title == "Prompt may be too long"));
}

#[test]
fn only_security_enabled() {
    let config = AnalyzerConfig {
        enable_ambiguity_detection: false,
        enable_token_analysis: false,
        enable_success_prediction: false,
        ..AnalyzerConfig::default()
    };
    let r = PromptDebugger::new(config)
        .analyze("Create a Python function to calculate prime numbers up to n.")
        .unwrap();
    assert_eq!(r.score.value, 100.0);
    assert!(r.ambiguity.is_none());
    assert!(r.token_metrics.is_none());
    assert!(r.prediction.is_none());
    assert_eq!(r.estimated_cost(), 0.0);
}

#[test]
fn template_markers_do_not_break_analysis() {
    let r = analyze_default("Fill in {{name}} and ${value} from ../../config; DROP users <!-- x -->")
        .unwrap();
    let security = r.security.unwrap();
    assert!(security.sanitization_issues.len() >= 5);
}
