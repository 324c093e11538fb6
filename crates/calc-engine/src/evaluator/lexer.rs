//! Character-level scan of a display-form expression.
//!
//! Accepts both the display alphabet (`×`, `÷`, `π`) and the ASCII forms
//! (`*`, `/`, `pi`) so expressions typed at a terminal lex the same as
//! pad-built ones. Grouping separators must already be stripped.

use calc_model::{BinaryOp, CalcError, Function, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Number(f64),
    Op(BinaryOp),
    Func(Function),
    Pi,
    Factorial,
    Percent,
    LParen,
    RParen,
}

pub(crate) fn lex(text: &str) -> Result<Vec<Lexeme>> {
    let chars: Vec<char> = text.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '0'..='9' | '.' => {
                let (value, next) = scan_number(&chars, i)?;
                lexemes.push(Lexeme::Number(value));
                i = next;
            }
            '+' => {
                lexemes.push(Lexeme::Op(BinaryOp::Add));
                i += 1;
            }
            '-' | '−' => {
                lexemes.push(Lexeme::Op(BinaryOp::Subtract));
                i += 1;
            }
            '×' | '*' => {
                lexemes.push(Lexeme::Op(BinaryOp::Multiply));
                i += 1;
            }
            '÷' | '/' => {
                lexemes.push(Lexeme::Op(BinaryOp::Divide));
                i += 1;
            }
            '^' => {
                lexemes.push(Lexeme::Op(BinaryOp::Power));
                i += 1;
            }
            '!' => {
                lexemes.push(Lexeme::Factorial);
                i += 1;
            }
            '%' => {
                lexemes.push(Lexeme::Percent);
                i += 1;
            }
            '(' => {
                lexemes.push(Lexeme::LParen);
                i += 1;
            }
            ')' => {
                lexemes.push(Lexeme::RParen);
                i += 1;
            }
            'π' => {
                lexemes.push(Lexeme::Pi);
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let (lexeme, next) = scan_name(&chars, i)?;
                lexemes.push(lexeme);
                i = next;
            }
            other => {
                return Err(CalcError::Syntax(format!("unexpected character `{other}`")));
            }
        }
    }
    Ok(lexemes)
}

/// Scan one numeral: digits, at most one decimal point, optional exponent.
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let mut i = start;
    let mut saw_digit = false;
    while i < chars.len() && chars[i].is_ascii_digit() {
        saw_digit = true;
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            saw_digit = true;
            i += 1;
        }
    }
    if !saw_digit {
        return Err(CalcError::Syntax("lone decimal point".to_string()));
    }
    // Exponent only when the `e` is followed by digits; a bare trailing `e`
    // belongs to a function name like `exp`.
    if i < chars.len() && matches!(chars[i], 'e' | 'E') {
        let mut j = i + 1;
        if j < chars.len() && matches!(chars[j], '+' | '-') {
            j += 1;
        }
        let exp_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    let repr: String = chars[start..i].iter().collect();
    let value = repr
        .parse::<f64>()
        .map_err(|_| CalcError::Syntax(format!("invalid number `{repr}`")))?;
    Ok((value, i))
}

/// Scan a function name or the `pi` constant, longest match first.
fn scan_name(chars: &[char], start: usize) -> Result<(Lexeme, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_alphabetic() {
        end += 1;
    }
    let name: String = chars[start..end].iter().collect();
    for f in Function::ALL {
        if let Some(rest) = name.strip_prefix(f.as_str()) {
            if rest.is_empty() {
                return Ok((Lexeme::Func(f), end));
            }
        }
    }
    if name == "pi" {
        return Ok((Lexeme::Pi, end));
    }
    Err(CalcError::Syntax(format!("unknown function `{name}`")))
}
