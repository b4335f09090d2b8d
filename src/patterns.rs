//! Shared pattern registries.
//!
//! Every table here is process-wide static data compiled once on first use.
//! The registries are shared by several analyzers; patterns that only one
//! analyzer needs live next to that analyzer instead.

use once_cell::sync::Lazy;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern tables hold valid patterns")
}

/// Interleaved-case identifiers like `parsedUserInputValue`.
pub static VERBOSE_NAMING: Lazy<Regex> = Lazy::new(|| re(r"[a-z]+[A-Z][a-z]+[A-Z][a-z]+"));

/// A short list of stock "descriptive" variable names AI output leans on.
pub static DESCRIPTIVE_VARS: Lazy<Regex> =
    Lazy::new(|| re(r"(user_data|response_data|result_data|input_value|output_value)"));

/// Triple-quoted block comments / docstrings.
pub static FORMAL_COMMENTS: Lazy<Regex> =
    Lazy::new(|| re(r#"("""[\s\S]*?"""|'''[\s\S]*?''')"#));

/// Classic terse human identifiers.
pub static ABBREVIATED_VARS: Lazy<Regex> =
    Lazy::new(|| re(r"\b(i|j|k|x|y|z|tmp|temp|val|res|arr|obj|fn|cb|idx|cnt|num|str)\b"));

/// TODO/FIXME-style markers in either comment syntax.
pub static INFORMAL_COMMENTS: Lazy<Regex> = Lazy::new(|| {
    re(r"(#\s*TODO|#\s*FIXME|#\s*HACK|#\s*NOTE|#\s*XXX|//\s*TODO|//\s*FIXME|//\s*HACK|//\s*NOTE|//\s*XXX)")
});

/// Identifier-shaped tokens. Applied to the whole file, comments and string
/// bodies included; the naming thresholds are calibrated against that.
pub static IDENTIFIER: Lazy<Regex> = Lazy::new(|| re(r"\b[a-zA-Z_][a-zA-Z0-9_]*\b"));

/// Over-explaining phrases typical of generated comments. Matched against the
/// lowercased comment line.
pub static AI_COMMENT_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"check\s+that",
        r"ensure\s+that",
        r"make\s+sure",
        r"initialize\s+the",
        r"set\s+up\s+the",
        r"clean\s+up\s+the",
        r"verify\s+that",
        r"validate\s+that",
        r"this\s+function\s+(will|does|should)",
        r"this\s+method\s+(will|does|should)",
        r"the\s+following\s+(code|function|method)",
        r"handles?\s+the\s+case",
        r"returns?\s+the\s+result",
        r"loop\s+through\s+(the|all|each)",
        r"iterate\s+over\s+(the|all|each)",
        r"should\s+be\s+initialized",
        r"should\s+have\s+the\s+expected",
        r"should\s+contain",
        r"test\s+that\s+the",
    ]
    .iter()
    .map(|p| re(p))
    .collect()
});

/// Comments that narrate what the next line plainly does, paired with a
/// short label for reporting.
pub static OBVIOUS_COMMENT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)#\s*increment\s+\w+", "Increment variable"),
        (r"(?i)#\s*decrement\s+\w+", "Decrement variable"),
        (r"(?i)#\s*initialize\s+(the\s+)?\w+", "Initialize variable"),
        (r"(?i)#\s*set\s+\w+\s+to", "Set variable to"),
        (r"(?i)#\s*return\s+(the\s+)?result", "Return result"),
        (r"(?i)#\s*return\s+(the\s+)?value", "Return value"),
        (r"(?i)#\s*loop\s+through", "Loop through"),
        (r"(?i)#\s*iterate\s+over", "Iterate over"),
        (r"(?i)#\s*check\s+if", "Check if"),
        (r"(?i)#\s*verify\s+that", "Verify that"),
        (r"(?i)#\s*create\s+(a\s+)?new", "Create new"),
        (r"(?i)#\s*add\s+\w+\s+to", "Add to"),
        (r"(?i)#\s*remove\s+\w+\s+from", "Remove from"),
        (r"(?i)#\s*update\s+(the\s+)?\w+", "Update variable"),
        (r"(?i)#\s*get\s+(the\s+)?\w+", "Get variable"),
        (r"(?i)#\s*set\s+(the\s+)?\w+", "Set variable"),
        (r"(?i)#\s*call\s+(the\s+)?\w+", "Call function"),
        (r"(?i)#\s*import\s+\w+", "Import statement"),
        (r"(?i)#\s*define\s+\w+", "Define variable"),
        (r"(?i)#\s*assign\s+\w+", "Assign variable"),
        (r"(?i)//\s*increment\s+\w+", "Increment variable"),
        (r"(?i)//\s*decrement\s+\w+", "Decrement variable"),
        (r"(?i)//\s*initialize\s+\w+", "Initialize variable"),
        (r"(?i)//\s*set\s+\w+\s+to", "Set variable to"),
        (r"(?i)//\s*return\s+(the\s+)?result", "Return result"),
        (r"(?i)//\s*loop\s+through", "Loop through"),
        (r"(?i)//\s*check\s+if", "Check if"),
    ]
    .iter()
    .map(|&(p, label)| (re(p), label))
    .collect()
});

/// Textbook-idiom patterns, paired with a label for reporting.
pub static TEXTBOOK_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"for\s+\w+\s+in\s+range\s*\(\s*len\s*\(\s*\w+\s*\)\s*\)",
            "range(len()) instead of enumerate",
        ),
        (
            r"for\s+\w+\s+in\s+range\s*\(\s*len\s*\(\s*\w+\s*\)\s*-\s*1\s*\)",
            "Bubble sort pattern",
        ),
        (r"if\s+\w+\s*==\s*True", "Explicit True comparison"),
        (r"if\s+\w+\s*==\s*False", "Explicit False comparison"),
        (r"if\s+len\s*\(\s*\w+\s*\)\s*==\s*0", "len() == 0 instead of not"),
        (r"if\s+len\s*\(\s*\w+\s*\)\s*>\s*0", "len() > 0 instead of truthiness"),
        (
            r"\[\s*i\s*\]\s*>\s*\[\s*i\s*\+\s*1\s*\]",
            "Adjacent element comparison (bubble sort)",
        ),
    ]
    .iter()
    .map(|&(p, label)| (re(p), label))
    .collect()
});

/// `x = x + 1` shaped assignments. The regex engine has no backreferences, so
/// this captures both identifiers and the caller compares them.
pub static SELF_INCREMENT: Lazy<Regex> = Lazy::new(|| re(r"(\w+)\s*=\s*(\w+)\s*\+\s*1"));

pub const SELF_INCREMENT_LABEL: &str = "i = i + 1 instead of i += 1";

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_compile() {
        assert!(VERBOSE_NAMING.is_match("someLongVariableName"));
        assert_eq!(AI_COMMENT_PHRASES.len(), 19);
        assert_eq!(OBVIOUS_COMMENT_PATTERNS.len(), 27);
        assert_eq!(TEXTBOOK_PATTERNS.len(), 7);
    }

    #[test]
    fn self_increment_captures_both_sides() {
        let caps = SELF_INCREMENT.captures("count = count + 1").unwrap();
        assert_eq!(&caps[1], &caps[2]);
        let caps = SELF_INCREMENT.captures("count = other + 1").unwrap();
        assert_ne!(&caps[1], &caps[2]);
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 80), "short");
    }
}
