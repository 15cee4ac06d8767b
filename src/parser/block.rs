//! Line classification for module content.

use crate::ast::{anchor_for_line, Fragment};
use crate::parser::lexer::{
    bullet_marker, fence_marker, heading, numbered_marker, standalone_math, Token,
};

/// Classify every line of `input` into a fragment.
///
/// Single forward pass; each input line yields exactly one fragment, fence
/// lines included. A fence left open runs to the end of input.
pub fn parse_fragments(input: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut in_fence = false;

    for (index, raw) in input.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim();

        if fence_marker(trimmed).is_ok() {
            in_fence = !in_fence;
            fragments.push(if in_fence {
                Fragment::CodeFenceOpen
            } else {
                Fragment::CodeFenceClose
            });
            continue;
        }

        if in_fence {
            fragments.push(Fragment::CodeLine(line.to_string()));
            continue;
        }

        let fragment = classify_line(index, line, trimmed);
        log::trace!("line {}: {:?}", index, fragment);
        fragments.push(fragment);
    }

    if in_fence {
        log::debug!("code fence left open at end of input");
    }

    fragments
}

fn classify_line(index: usize, line: &str, trimmed: &str) -> Fragment {
    if let Ok((_, Token::Heading(level, text))) = heading(line) {
        return Fragment::Heading {
            level,
            text: text.to_string(),
            anchor: anchor_for_line(index),
        };
    }

    if let Ok((text, Token::BulletMarker)) = bullet_marker(trimmed) {
        return Fragment::BulletItem(text.to_string());
    }

    if let Ok((text, Token::NumberedMarker(number))) = numbered_marker(trimmed) {
        return Fragment::NumberedItem {
            number: number.to_string(),
            text: text.to_string(),
        };
    }

    if let Some(expression) = standalone_math(trimmed) {
        return Fragment::DisplayMathLine(expression.to_string());
    }

    if trimmed.is_empty() {
        return Fragment::BlankLine;
    }

    Fragment::Paragraph(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels() {
        let fragments = parse_fragments("# One\n## Two\n### Three\n#### Four");
        let levels: Vec<u8> = fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Heading { level, .. } => Some(*level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_heading_anchor_from_line_index() {
        let fragments = parse_fragments("intro\n\n## Details");
        assert_eq!(
            fragments[2],
            Fragment::Heading {
                level: 2,
                text: "Details".to_string(),
                anchor: "heading-2".to_string(),
            }
        );
    }

    #[test]
    fn test_indented_hash_is_paragraph() {
        let fragments = parse_fragments("  # not a heading");
        assert_eq!(
            fragments,
            vec![Fragment::Paragraph("  # not a heading".to_string())]
        );
    }

    #[test]
    fn test_bullets() {
        let fragments = parse_fragments("- dash\n  * star");
        assert_eq!(
            fragments,
            vec![
                Fragment::BulletItem("dash".to_string()),
                Fragment::BulletItem("star".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbered() {
        let fragments = parse_fragments("3. third\n3.x");
        assert_eq!(
            fragments,
            vec![
                Fragment::NumberedItem {
                    number: "3".to_string(),
                    text: "third".to_string()
                },
                Fragment::Paragraph("3.x".to_string()),
            ]
        );
    }

    #[test]
    fn test_numbered_keeps_source_digits() {
        let fragments = parse_fragments("99999999999999999999. item\n007. bond");
        assert_eq!(
            fragments,
            vec![
                Fragment::NumberedItem {
                    number: "99999999999999999999".to_string(),
                    text: "item".to_string()
                },
                Fragment::NumberedItem {
                    number: "007".to_string(),
                    text: "bond".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_code_fence_content_is_verbatim() {
        let input = "```\n# not heading\n- not bullet\n$x$\n```\nafter";
        let fragments = parse_fragments(input);
        assert_eq!(
            fragments,
            vec![
                Fragment::CodeFenceOpen,
                Fragment::CodeLine("# not heading".to_string()),
                Fragment::CodeLine("- not bullet".to_string()),
                Fragment::CodeLine("$x$".to_string()),
                Fragment::CodeFenceClose,
                Fragment::Paragraph("after".to_string()),
            ]
        );
    }

    #[test]
    fn test_fence_with_language_is_not_a_marker() {
        let fragments = parse_fragments("```python");
        assert_eq!(fragments, vec![Fragment::Paragraph("```python".to_string())]);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let fragments = parse_fragments("```\nlet a = 1;\n\n# still code");
        assert_eq!(
            fragments,
            vec![
                Fragment::CodeFenceOpen,
                Fragment::CodeLine("let a = 1;".to_string()),
                Fragment::CodeLine(String::new()),
                Fragment::CodeLine("# still code".to_string()),
            ]
        );
    }

    #[test]
    fn test_standalone_math_line() {
        let fragments = parse_fragments("  $E = mc^2$  ");
        assert_eq!(
            fragments,
            vec![Fragment::DisplayMathLine("E = mc^2".to_string())]
        );
    }

    #[test]
    fn test_double_dollar_line_falls_through_to_paragraph() {
        let fragments = parse_fragments("$$x$$\n$");
        assert_eq!(
            fragments,
            vec![
                Fragment::Paragraph("$$x$$".to_string()),
                Fragment::Paragraph("$".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_lines() {
        let fragments = parse_fragments("a\n   \nb\n");
        assert_eq!(
            fragments,
            vec![
                Fragment::Paragraph("a".to_string()),
                Fragment::BlankLine,
                Fragment::Paragraph("b".to_string()),
                Fragment::BlankLine,
            ]
        );
    }

    #[test]
    fn test_crlf_input() {
        let fragments = parse_fragments("# Title\r\n- item\r\n");
        assert_eq!(
            fragments[0],
            Fragment::Heading {
                level: 1,
                text: "Title".to_string(),
                anchor: "heading-0".to_string(),
            }
        );
        assert_eq!(fragments[1], Fragment::BulletItem("item".to_string()));
    }

    #[test]
    fn test_one_fragment_per_line() {
        let inputs = [
            "",
            "plain",
            "# h\n\n- a\n1. b\n$x$\n```\ncode\n```\ntail",
            "```\nnever closed\n",
            "```\n```\n```",
        ];
        for input in inputs {
            let lines = input.split('\n').count();
            assert_eq!(parse_fragments(input).len(), lines, "input: {:?}", input);
        }
    }
}
