//! Missing-backslash repair for bare math expressions.
//!
//! Authors sometimes write `frac{a}{b}` or `x in RR`-style text without any
//! escapes. When an expression carries no backslash at all, a fixed
//! vocabulary of identifiers is rewritten at token boundaries. The pass is
//! kept separate from the renderer so it can be swapped or dropped.

use regex::Regex;
use std::sync::OnceLock;

/// Fragments whose presence means the expression is already escaped.
const ESCAPED_SIGNATURES: &[&str] = &["\\mathrm{", "\\frac{", "\\left("];

/// Rewrites applied in order. ` sin ` becomes set membership.
const RULES: &[(&str, &str)] = &[
    (r"\bmathbb\{R\}", r"\mathbb{R}"),
    (r"\bDelta\b", r"\Delta"),
    (r"\btimes\b", r"\times"),
    (r"\bll\b", r"\ll"),
    (r"\bapprox\b", r"\approx"),
    (r"\bmin\b", r"\min"),
    (r"\bmax\b", r"\max"),
    (r"\bsum\b", r"\sum"),
    (r"\bexp\b", r"\exp"),
    (r"\blog\b", r"\log"),
    (r"\bsoftmax\b", r"\mathrm{softmax}"),
    (r"\bfrac\{([^}]*)\}\{([^}]*)\}", r"\frac{${1}}{${2}}"),
    (r"\bsqrt\{([^}]*)\}", r"\sqrt{${1}}"),
    (r" sin ", r" \in "),
];

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|(pattern, replacement)| {
                (
                    Regex::new(pattern).expect("normalization pattern is valid"),
                    *replacement,
                )
            })
            .collect()
    })
}

/// Whether `expression` looks like bare, unescaped math.
pub fn needs_normalization(expression: &str) -> bool {
    let escaped = expression.contains('\\')
        || ESCAPED_SIGNATURES
            .iter()
            .any(|signature| expression.contains(signature));
    !escaped
}

/// Apply the rewrite table to `expression`.
pub fn normalize(expression: &str) -> String {
    compiled_rules()
        .iter()
        .fold(expression.to_string(), |text, (regex, replacement)| {
            regex.replace_all(&text, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_needs_normalization() {
        assert!(needs_normalization("x in mathbb{R}"));
        assert!(!needs_normalization("\\alpha"));
        assert!(!needs_normalization("\\frac{1}{2}"));
    }

    #[test]
    fn test_vocabulary() {
        assert_eq!(normalize("x in mathbb{R}"), "x in \\mathbb{R}");
        assert_eq!(normalize("Delta x approx 0"), "\\Delta x \\approx 0");
        assert_eq!(normalize("a times b ll c"), "a \\times b \\ll c");
        assert_eq!(normalize("min f + max g"), "\\min f + \\max g");
        assert_eq!(normalize("sum exp log"), "\\sum \\exp \\log");
    }

    #[test]
    fn test_softmax_is_an_operator_name() {
        assert_eq!(normalize("softmax(z)"), "\\mathrm{softmax}(z)");
    }

    #[test]
    fn test_structural_fixups() {
        assert_eq!(normalize("frac{QK^T}{d}"), "\\frac{QK^T}{d}");
        assert_eq!(normalize("sqrt{d_k}"), "\\sqrt{d_k}");
        assert_eq!(normalize("frac{1}{sqrt{d}}"), "\\frac{1}{\\sqrt{d}}");
    }

    #[test]
    fn test_sin_becomes_membership() {
        assert_eq!(normalize("x sin S"), "x \\in S");
        assert_eq!(normalize("sin x"), "sin x");
    }

    #[test]
    fn test_words_inside_identifiers_are_kept() {
        assert_eq!(normalize("minimum maximal"), "minimum maximal");
        assert_eq!(normalize("logits"), "logits");
    }
}
