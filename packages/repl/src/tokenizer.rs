//! Shell-style splitting of command lines.
//!
//! Follows POSIX shell quoting closely enough for property paths and JSON
//! literals:
//! - Whitespace separates tokens
//! - Single quotes keep everything literally: `'{"a": 1}'` → `{"a": 1}`
//! - Double quotes allow `\"` and `\\` escapes: `"say \"hi\""` → `say "hi"`
//! - Outside quotes a backslash escapes the next character
//! - Quoted and unquoted parts join into one token: `a."b c"` → `a.b c`

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("No closing quotation")]
    UnclosedQuote,

    #[error("No escaped character")]
    TrailingEscape,
}

/// Split `input` into tokens.
pub fn tokenize(input: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }
        tokens.push(collect_token(&mut chars)?);
    }

    Ok(tokens)
}

fn collect_token(chars: &mut Peekable<Chars<'_>>) -> Result<String, TokenizeError> {
    let mut token = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        chars.next();
        match c {
            '\'' => collect_single_quoted(chars, &mut token)?,
            '"' => collect_double_quoted(chars, &mut token)?,
            '\\' => token.push(chars.next().ok_or(TokenizeError::TrailingEscape)?),
            _ => token.push(c),
        }
    }

    Ok(token)
}

fn collect_single_quoted(
    chars: &mut Peekable<Chars<'_>>,
    token: &mut String,
) -> Result<(), TokenizeError> {
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        token.push(c);
    }
    Err(TokenizeError::UnclosedQuote)
}

fn collect_double_quoted(
    chars: &mut Peekable<Chars<'_>>,
    token: &mut String,
) -> Result<(), TokenizeError> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some(escaped @ ('"' | '\\')) => token.push(escaped),
                Some(other) => {
                    token.push('\\');
                    token.push(other);
                }
                None => return Err(TokenizeError::UnclosedQuote),
            },
            _ => token.push(c),
        }
    }
    Err(TokenizeError::UnclosedQuote)
}
