//! Safe codec for the flat list-literal text form (`['a', 'b']`).
//!
//! The grammar is deliberately tiny: one pair of brackets, comma-separated
//! quoted strings or bare number tokens. Nothing is ever evaluated, so
//! code-shaped input is just a parse error.

use crate::error::{ConfigError, Result};

/// Parse a flat list literal into its element texts.
///
/// Quoted elements (single or double quotes, `\\`/`\'`/`\"` escapes) are
/// returned unescaped; bare elements must look like numbers and are returned
/// verbatim.
pub fn parse_list(text: &str) -> Result<Vec<String>> {
    let err = || ConfigError::parse("list literal", text);
    let mut chars = text.chars().peekable();

    skip_ws(&mut chars);
    if chars.next() != Some('[') {
        return Err(err());
    }
    skip_ws(&mut chars);

    let mut elements = Vec::new();
    if chars.peek() == Some(&']') {
        chars.next();
    } else {
        loop {
            let elem = match chars.peek() {
                Some(&q @ ('\'' | '"')) => {
                    chars.next();
                    parse_quoted(&mut chars, q).ok_or_else(err)?
                }
                Some(_) => parse_bare(&mut chars).ok_or_else(err)?,
                None => return Err(err()),
            };
            elements.push(elem);

            skip_ws(&mut chars);
            match chars.next() {
                Some(',') => skip_ws(&mut chars),
                Some(']') => break,
                _ => return Err(err()),
            }
        }
    }

    skip_ws(&mut chars);
    if chars.next().is_some() {
        return Err(err());
    }
    Ok(elements)
}

/// Render element texts as a list literal, single-quoting every element.
pub fn render_list(elements: &[String]) -> String {
    let mut out = String::from("[");
    for (i, elem) in elements.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        for c in elem.chars() {
            match c {
                '\\' | '\'' => {
                    out.push('\\');
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
        out.push('\'');
    }
    out.push(']');
    out
}

fn skip_ws(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

/// Consume a quoted element body up to the closing `quote`. The opening
/// quote has already been consumed.
fn parse_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) -> Option<String> {
    let mut elem = String::new();
    loop {
        match chars.next()? {
            '\\' => match chars.next()? {
                c @ ('\\' | '\'' | '"') => elem.push(c),
                _ => return None,
            },
            c if c == quote => return Some(elem),
            c => elem.push(c),
        }
    }
}

/// Consume a bare number token. Stops before whitespace, `,` or `]`.
fn parse_bare(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut elem = String::new();
    while let Some(&c) = chars.peek() {
        if c == ',' || c == ']' || c.is_whitespace() {
            break;
        }
        if !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
            return None;
        }
        elem.push(c);
        chars.next();
    }
    if elem.is_empty() { None } else { Some(elem) }
}
