//! Textual macro expansion for backends that do not know course macros.

use std::collections::BTreeMap;

/// Expand every macro in `content`.
///
/// Macro names include the leading backslash; bodies may use `#1`, `#2`...
/// for brace-delimited arguments. A name only matches when it is not
/// followed by another letter, so `\RR` leaves `\RRx` alone.
pub fn expand_macros(content: &str, macros: &BTreeMap<String, String>) -> String {
    let mut result = content.to_string();

    // Expand iteratively to handle nested macros, with a bound for cycles.
    for _ in 0..10 {
        let mut changed = false;

        for (name, body) in macros {
            if name == body {
                continue;
            }
            let expanded = expand_single_macro(&result, name, body);
            if expanded != result {
                result = expanded;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    result
}

fn expand_single_macro(content: &str, name: &str, body: &str) -> String {
    let arg_count = count_macro_args(body);
    let mut result = String::new();
    let mut remaining = content;

    while let Some(pos) = remaining.find(name) {
        result.push_str(&remaining[..pos]);
        let after_name = &remaining[pos + name.len()..];

        if after_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            // Longer command sharing this prefix
            result.push_str(name);
            remaining = after_name;
            continue;
        }

        if arg_count == 0 {
            result.push_str(body);
            remaining = after_name;
            continue;
        }

        match parse_macro_args(after_name, arg_count) {
            Some((args, rest)) => {
                result.push_str(&substitute_args(body, &args));
                remaining = rest;
            }
            None => {
                result.push_str(name);
                remaining = after_name;
            }
        }
    }

    result.push_str(remaining);
    result
}

/// Count the number of macro arguments (#1, #2, etc.) in a body.
fn count_macro_args(body: &str) -> usize {
    let mut max_arg = 0;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '#' {
            if let Some(n) = chars.peek().and_then(|d| d.to_digit(10)) {
                max_arg = max_arg.max(n as usize);
            }
        }
    }

    max_arg
}

fn parse_macro_args(input: &str, count: usize) -> Option<(Vec<String>, &str)> {
    let mut args = Vec::new();
    let mut remaining = input;

    for _ in 0..count {
        remaining = remaining.trim_start();

        if !remaining.starts_with('{') {
            return None;
        }

        let mut depth = 0;
        let mut end = None;

        for (i, c) in remaining.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end = end?;
        args.push(remaining[1..end].to_string());
        remaining = &remaining[end + 1..];
    }

    Some((args, remaining))
}

fn substitute_args(body: &str, args: &[String]) -> String {
    let mut result = body.to_string();

    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("#{}", i + 1), arg);
    }

    result
}
