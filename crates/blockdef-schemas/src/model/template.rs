//! Message template tokenizer
//!
//! A message template mixes literal text with numbered placeholders: `%1`
//! refers to the first entry of the slot's argument list, `%2` to the second,
//! and so on. `%%` is an escaped percent sign. A `%` not followed by a digit or
//! another `%` is kept as literal text, which also covers message references
//! such as `%{BKY_MATH_ADD}`.
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

/// One lexical element of a message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal text
    Text(String),
    /// The `%%` escape
    Escape,
    /// A `%k` reference to the k-th argument (1-based)
    Placeholder(usize),
    /// A `%k` whose digits do not fit in `usize`, kept as written
    OversizedPlaceholder(String),
}

/// Split a message template into tokens
pub fn tokenize(template: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            text.push(c);
            continue;
        }

        match chars.peek() {
            Some('%') => {
                chars.next();
                flush_text(&mut text, &mut tokens);
                tokens.push(Token::Escape);
            }
            Some(d) if d.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    digits.push(d);
                    chars.next();
                }
                flush_text(&mut text, &mut tokens);
                tokens.push(match digits.parse::<usize>() {
                    Ok(index) => Token::Placeholder(index),
                    Err(_) => Token::OversizedPlaceholder(digits),
                });
            }
            _ => text.push('%'),
        }
    }

    flush_text(&mut text, &mut tokens);
    tokens
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

/// Placeholder indices in the order they appear
pub fn placeholders(tokens: &[Token]) -> impl Iterator<Item = usize> + '_ {
    tokens.iter().filter_map(|token| match token {
        Token::Placeholder(index) => Some(*index),
        _ => None,
    })
}

/// Whether a row built from `tokens` ends in an implicit dummy input.
///
/// Rows are closed by input arguments. When the last non-blank element of the
/// template is literal text or a field, the editor appends a dummy input to
/// hold it, and that dummy is what `lastDummyAlign_i` aligns. `is_input` maps
/// a 1-based placeholder index to whether that argument is an input; indices it
/// does not know are ignored.
pub fn implies_trailing_dummy<F>(tokens: &[Token], is_input: F) -> bool
where
    F: Fn(usize) -> Option<bool>,
{
    let mut ends_open = false;
    for token in tokens {
        match token {
            Token::Text(text) if text.trim().is_empty() => {}
            Token::Text(_) | Token::Escape => ends_open = true,
            Token::OversizedPlaceholder(_) => {}
            Token::Placeholder(index) => {
                if let Some(input) = is_input(*index) {
                    ends_open = !input;
                }
            }
        }
    }
    ends_open
}
