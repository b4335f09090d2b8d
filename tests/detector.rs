use std::fs;
use std::path::Path;

use indoc::indoc;
use slopcheck::{Confidence, Detector, Verdict};

const TERSE_HUMAN_SAMPLE: &str = "def add(a, b):\n    return a + b\n";

const VERBOSE_AI_SAMPLE: &str = indoc! {r#"
    """Utility for adding two validated numeric values together."""


    def add_two_numeric_values(first_value: int, second_value: int) -> int:
        """Add two integers after validating their types.

        This function will validate that both inputs are integers before
        returning the result of the addition.
        """
        # Verify that the first value is an integer
        if not isinstance(first_value, int):
            raise TypeError("first_value must be an integer")
        # Verify that the second value is an integer
        if not isinstance(second_value, int):
            raise TypeError("second_value must be an integer")
        # Return the result
        return first_value + second_value
"#};

#[test]
fn verbose_ai_style_outscores_terse_human_style() {
    let detector = Detector::new();
    let human = detector.analyze_source("human.py", TERSE_HUMAN_SAMPLE);
    let ai = detector.analyze_source("ai.py", VERBOSE_AI_SAMPLE);

    assert!(
        ai.ai_probability > human.ai_probability,
        "expected {} > {}",
        ai.ai_probability,
        human.ai_probability
    );
}

#[test]
fn probabilities_always_sum_to_one_hundred() {
    let detector = Detector::new();
    for source in [TERSE_HUMAN_SAMPLE, VERBOSE_AI_SAMPLE, "", "x = 1\n"] {
        let result = detector.analyze_source("sample.py", source);
        assert!(
            (result.ai_probability + result.human_probability - 100.0).abs() < 0.011,
            "probabilities must be complements, got {} + {}",
            result.ai_probability,
            result.human_probability
        );
    }
}

#[test]
fn textbook_loop_registers_patterns() {
    let mut source = String::from("def find(arr, flag, x):\n");
    source.push_str("    for i in range(len(arr)):\n");
    source.push_str("        if flag == True:\n");
    source.push_str("            if len(arr) == 0:\n");
    source.push_str("                return None\n");
    for i in 0..35 {
        source.push_str(&format!("    step_{i} = {i}\n"));
    }

    let result = Detector::new().analyze_source("loops.py", &source);
    let scores = result.detailed_scores.as_ref().unwrap();
    assert!(
        scores.textbook_algorithms.ai_indicators > 0.0,
        "textbook dimension should fire"
    );
    let patterns = &result.detected_patterns["textbook_patterns"];
    assert!(
        patterns
            .iter()
            .any(|p| p == "range(len()) instead of enumerate"),
        "expected a labelled pattern, got {patterns:?}"
    );
}

#[test]
fn guard_heavy_code_pushes_defensive_score_past_half() {
    let source = indoc! {"
        def f(user, data, item, value):
            if user is not None: a = 1
            if user is not None: b = 2
            if user is not None: c = 3
            if user is not None: d = 4
            if user is not None: e = 5
            if user is not None: g = 6
            isinstance(data, int)
            isinstance(item, str)
            isinstance(value, list)
            isinstance(user, dict)
            try:
                one()
            except ValueError:
                pass
            try:
                two()
            except ValueError:
                pass
            try:
                three()
            except ValueError:
                pass
            try:
                four()
            except ValueError:
                pass
    "};
    let result = Detector::new().analyze_source("guards.py", source);
    let scores = result.detailed_scores.as_ref().unwrap();
    assert_eq!(scores.defensive_coding.none_checks, 6);
    assert_eq!(scores.defensive_coding.type_checks, 4);
    assert_eq!(scores.defensive_coding.try_blocks, 4);
    assert!(
        scores.defensive_coding.ai_indicators >= 0.5,
        "got {}",
        scores.defensive_coding.ai_indicators
    );
}

#[test]
fn size_ceiling_is_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exact.py");
    let content = "x = 1\n".repeat(20); // 120 bytes
    fs::write(&path, &content).unwrap();

    let at_limit = Detector::with_max_file_size(content.len() as u64);
    let result = at_limit.analyze_file(&path);
    assert!(!result.is_error(), "a file exactly at the limit is accepted");

    let below_limit = Detector::with_max_file_size(content.len() as u64 - 1);
    let result = below_limit.analyze_file(&path);
    assert!(result.is_error(), "one byte over the limit is rejected");
    let message = result.indicators["error"].as_str().unwrap();
    assert_eq!(
        message,
        format!("File size exceeds limit of {} bytes", content.len() - 1)
    );
}

#[test]
fn missing_file_is_an_error_result_not_a_panic() {
    let result = Detector::new().analyze_file(Path::new("no/such/file.py"));
    assert!(result.is_error());
    assert_eq!(result.verdict, Verdict::Unanalyzable);
    assert_eq!(result.confidence, Confidence::Error);
    assert_eq!(
        result.indicators["error"].as_str().unwrap(),
        "File does not exist or is not a regular file"
    );
    assert!(result.detailed_scores.is_none());
    assert!(result.detected_patterns.is_empty());
}

#[test]
fn directories_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = Detector::new().analyze_file(dir.path());
    assert!(result.is_error());
}

#[test]
fn analysis_is_idempotent() {
    let detector = Detector::new();
    let a = detector.analyze_source("same.py", VERBOSE_AI_SAMPLE);
    let b = detector.analyze_source("same.py", VERBOSE_AI_SAMPLE);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap(),
        "same content must produce byte-identical results"
    );
}

#[test]
fn detection_result_serializes_with_contract_field_names() {
    let result = Detector::new().analyze_source("demo.py", "x = 1\n");
    let value = serde_json::to_value(&result).unwrap();
    let object = value.as_object().unwrap();
    for field in [
        "file_path",
        "ai_probability",
        "human_probability",
        "confidence",
        "indicators",
        "detailed_scores",
        "verdict",
        "detected_patterns",
    ] {
        assert!(object.contains_key(field), "missing field {field}");
    }
    let detailed = object["detailed_scores"].as_object().unwrap();
    assert_eq!(detailed.len(), 16);
    for dimension in [
        "naming_analysis",
        "comment_analysis",
        "structure_analysis",
        "complexity_analysis",
        "error_handling",
        "documentation",
        "formatting_consistency",
        "modern_syntax",
        "enhanced_comment_analysis",
        "defensive_coding",
        "textbook_algorithms",
        "over_modularization",
        "perfect_consistency",
        "contextual_quirks",
        "formatting_perfection",
        "obvious_comments",
    ] {
        assert!(detailed.contains_key(dimension), "missing {dimension}");
        assert!(
            detailed[dimension]["ai_indicators"].is_number(),
            "{dimension} lacks ai_indicators"
        );
    }
}

#[test]
fn verbose_sample_surfaces_readable_indicators() {
    let result = Detector::new().analyze_source("ai.py", VERBOSE_AI_SAMPLE);
    // The comment lines are pure narration, so the phrase/obvious flags come up.
    assert_eq!(
        result.indicators.get("ai_typical_comment_phrases"),
        Some(&serde_json::Value::Bool(true))
    );
    assert!(result.indicators.contains_key("ai_phrase_examples"));
    let examples = result.indicators["ai_phrase_examples"].as_array().unwrap();
    assert!(!examples.is_empty() && examples.len() <= 5);
}
