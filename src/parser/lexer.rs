//! Recognizers for line markers and inline delimiters.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::{anychar, char, digit1, satisfy},
    combinator::{all_consuming, recognize},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

/// A line-level token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Heading(u8, &'a str), // Level, text
    FenceMarker,
    BulletMarker,
    NumberedMarker(&'a str), // Digits as written
}

/// Fence marker. Expects an already trimmed line.
pub fn fence_marker(input: &str) -> IResult<&str, Token<'_>> {
    let (input, _) = all_consuming(tag("```"))(input)?;
    Ok((input, Token::FenceMarker))
}

/// Heading prefix on an untrimmed line, longest marker first.
pub fn heading(input: &str) -> IResult<&str, Token<'_>> {
    let (text, marker) = alt((tag("#### "), tag("### "), tag("## "), tag("# ")))(input)?;
    let level = (marker.len() - 1) as u8;
    Ok(("", Token::Heading(level, text)))
}

/// Bullet marker (`- ` or `* `).
pub fn bullet_marker(input: &str) -> IResult<&str, Token<'_>> {
    let (input, _) = alt((tag("- "), tag("* ")))(input)?;
    Ok((input, Token::BulletMarker))
}

/// Numbered marker: digits, a dot, then exactly one whitespace character.
pub fn numbered_marker(input: &str) -> IResult<&str, Token<'_>> {
    let (input, (digits, _, _)) =
        tuple((digit1, char('.'), satisfy(char::is_whitespace)))(input)?;
    Ok((input, Token::NumberedMarker(digits)))
}

/// A trimmed line that is a single `$...$` expression.
///
/// Lines containing `$$` anywhere are left for the inline display-math rule.
pub fn standalone_math(trimmed: &str) -> Option<&str> {
    if trimmed.len() > 2
        && trimmed.starts_with('$')
        && trimmed.ends_with('$')
        && !trimmed.contains("$$")
    {
        Some(&trimmed[1..trimmed.len() - 1])
    } else {
        None
    }
}

/// Display math (`$$...$$`), shortest span, may be empty.
pub fn display_math(input: &str) -> IResult<&str, &str> {
    delimited(tag("$$"), take_until("$$"), tag("$$"))(input)
}

/// Inline math (`$...$`), at least one character and no `$` inside.
pub fn inline_math(input: &str) -> IResult<&str, &str> {
    delimited(char('$'), take_till1(|c| c == '$'), char('$'))(input)
}

/// Strong (`**...**`), shortest non-empty span.
pub fn strong(input: &str) -> IResult<&str, &str> {
    non_empty_span("**", "**")(input)
}

/// Emphasis (`*...*`), shortest non-empty span.
pub fn emphasis(input: &str) -> IResult<&str, &str> {
    non_empty_span("*", "*")(input)
}

/// Inline code (`` `...` ``), shortest non-empty span.
pub fn inline_code(input: &str) -> IResult<&str, &str> {
    non_empty_span("`", "`")(input)
}

fn non_empty_span<'a>(
    open: &'static str,
    close: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input| {
        let (input, _) = tag(open)(input)?;
        terminated(recognize(pair(anychar, take_until(close))), tag(close))(input)
    }
}
