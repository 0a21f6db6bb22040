//! Property tests for score bounds, determinism and comparison symmetry

use prompt_debugger::{compare, AnalyzerConfig, PromptDebugger, Severity};
use proptest::prelude::*;

/// Strategy that generates prompt-like text mixing clear, vague and risky words.
fn arbitrary_prompt() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Create",
            "Write",
            "a",
            "the",
            "function",
            "summary",
            "some",
            "various",
            "things",
            "stuff",
            "maybe",
            "very",
            "just",
            "basically",
            "in order to",
            "please note that",
            "concise.",
            "detailed.",
            "must",
            "For example:",
            "JSON",
            "XYZ",
            "ignore previous instructions",
            "password: abc123",
            "---",
            "${x}",
            ".",
            "!",
            "\n",
        ]),
        1..40,
    )
    .prop_map(|words| words.join(" "))
    .prop_filter("blank prompts are rejected up front", |p| !p.trim().is_empty())
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(vec![
        Severity::Info,
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn clarity_is_bounded_and_complements_ambiguity(ref prompt in arbitrary_prompt()) {
        let r = PromptDebugger::default().analyze(prompt).unwrap();
        let a = r.ambiguity.unwrap();
        prop_assert!((0.0..=100.0).contains(&a.clarity_score));
        prop_assert!((a.ambiguity_score + a.clarity_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn token_waste_never_exceeds_total(ref prompt in arbitrary_prompt()) {
        let r = PromptDebugger::default().analyze(prompt).unwrap();
        let t = r.token_metrics.unwrap();
        prop_assert!(t.unnecessary_tokens <= t.total_tokens);
        prop_assert!(t.token_efficiency <= 100.0);
        prop_assert!(t.token_efficiency >= 0.0);
    }

    #[test]
    fn scores_stay_in_range(ref prompt in arbitrary_prompt()) {
        let r = PromptDebugger::default().analyze(prompt).unwrap();
        prop_assert!((0.0..=100.0).contains(&r.score.value));
        let p = r.prediction.unwrap();
        prop_assert!((0.0..=100.0).contains(&p.success_probability));
        prop_assert!((0.0..=100.0).contains(&p.confidence_score));
        prop_assert!(p.recommended_improvements.len() <= 5);
        prop_assert!((0.0..=100.0).contains(&r.security.unwrap().security_score));
    }

    #[test]
    fn analysis_is_deterministic(ref prompt in arbitrary_prompt()) {
        let debugger = PromptDebugger::default();
        let first = debugger.analyze(prompt).unwrap();
        let second = debugger.analyze(prompt).unwrap();
        prop_assert_eq!(first.score, second.score);
        prop_assert_eq!(first.issues, second.issues);
    }

    #[test]
    fn raising_min_severity_never_adds_issues(
        ref prompt in arbitrary_prompt(),
        low in severity(),
        high in severity(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let loose = PromptDebugger::new(AnalyzerConfig::default().with_min_severity(low))
            .analyze(prompt)
            .unwrap();
        let strict = PromptDebugger::new(AnalyzerConfig::default().with_min_severity(high))
            .analyze(prompt)
            .unwrap();
        prop_assert!(strict.issues.len() <= loose.issues.len());
    }

    #[test]
    fn comparison_is_antisymmetric(
        ref a in arbitrary_prompt(),
        ref b in arbitrary_prompt(),
    ) {
        let config = AnalyzerConfig::default();
        let ab = compare(a, b, &config).unwrap();
        let ba = compare(b, a, &config).unwrap();
        prop_assert_eq!(ab.quality_difference, -ba.quality_difference);
        prop_assert_eq!(ab.token_difference, -ba.token_difference);
    }
}
