//! Expression editor: a pure state machine over [`EditorState`].
//!
//! Every pad keystroke is an [`apply`] call; invalid edits (a leading `÷`,
//! a close bracket with nothing open, a second decimal point) are rejected
//! at the point of input rather than producing a malformed expression for
//! the evaluator to choke on. All operations work on separator-stripped
//! display text.

use calc_model::{BinaryOp, EditorState, Function, Token};
use tracing::debug;

/// Apply one keystroke, producing the next editor state.
///
/// If `state.is_prev_result` is set, an operand keystroke (digit, function,
/// `π`, bracket, constant) starts a fresh expression, while an operator or
/// postfix keystroke continues from the shown result. The flag is cleared by
/// every keystroke.
pub fn apply(state: &EditorState, token: &Token) -> EditorState {
    let fresh = state.is_prev_result;
    let expr = state.expression.as_str();
    let expression = match token {
        Token::Digit(d) => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            e.push(*d);
            e
        }
        Token::Decimal => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            if current_run_has_decimal(&e) {
                debug!("rejected second decimal point");
                e
            } else {
                e.push('.');
                e
            }
        }
        Token::Op(op) => apply_operator(expr, *op),
        Token::Func(f) => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            push_with_implicit_multiply(&mut e);
            e.push_str(f.as_str());
            e.push('(');
            e
        }
        Token::Pi => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            push_with_implicit_multiply(&mut e);
            e.push('π');
            e
        }
        Token::Factorial | Token::Percent => {
            let suffix = if matches!(token, Token::Factorial) { '!' } else { '%' };
            let mut e = expr.to_string();
            if last_char(&e).is_some_and(ends_operand) {
                e.push(suffix);
            } else {
                debug!(%suffix, "rejected postfix with no operand");
            }
            e
        }
        Token::OpenBracket => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            push_with_implicit_multiply(&mut e);
            e.push('(');
            e
        }
        Token::CloseBracket => {
            let mut e = expr.to_string();
            let last = last_char(&e);
            if open_bracket_surplus(&e) > 0 && last.is_some_and(ends_operand) {
                e.push(')');
            } else {
                debug!("rejected close bracket");
            }
            e
        }
        Token::Constant(value) => {
            let mut e = if fresh { String::new() } else { expr.to_string() };
            push_with_implicit_multiply(&mut e);
            if value.starts_with('-') && !e.is_empty() {
                // A negative literal after an operator or bracket keeps its
                // sign unambiguous inside brackets: 3×(-2).
                e.push('(');
                e.push_str(value);
                e.push(')');
            } else {
                e.push_str(value);
            }
            e
        }
    };
    EditorState {
        expression,
        is_prev_result: false,
    }
}

/// Remove one trailing logical unit.
///
/// A function name together with its opening bracket is a single unit;
/// everything else deletes one character. Deleting from an empty expression
/// is a no-op. Expects separator-stripped text.
pub fn delete(expression: &str) -> String {
    if expression.is_empty() {
        return String::new();
    }
    for f in Function::ALL {
        let unit_len = f.as_str().len() + 1;
        if expression.ends_with('(') && expression[..expression.len() - 1].ends_with(f.as_str()) {
            return expression[..expression.len() - unit_len].to_string();
        }
    }
    let mut chars: Vec<char> = expression.chars().collect();
    chars.pop();
    chars.into_iter().collect()
}

/// Empty state, regardless of any prior flags.
pub fn clear() -> EditorState {
    EditorState::new()
}

fn apply_operator(expr: &str, op: BinaryOp) -> String {
    let sym = op.symbol();
    let mut e = expr.to_string();
    match last_char(&e) {
        None => {
            // Only a sign marker may lead.
            if op == BinaryOp::Subtract {
                e.push('-');
            } else {
                debug!(%sym, "rejected leading binary operator");
            }
        }
        Some(last) if is_binary_operator(last) => {
            // Replace instead of stacking.
            e.pop();
            if e.is_empty() || last_char(&e) == Some('(') {
                // The replaced char was a sign marker; only minus fits here.
                if op == BinaryOp::Subtract {
                    e.push('-');
                }
            } else {
                e.push(sym);
            }
        }
        Some('(') => {
            if op == BinaryOp::Subtract {
                e.push('-');
            } else {
                debug!(%sym, "rejected binary operator after open bracket");
            }
        }
        Some(_) => e.push(sym),
    }
    e
}

/// Insert `×` when an operand boundary directly precedes a new operand:
/// `2sin(` → `2×sin(`, `)(` → `)×(`, `π2`-style inputs likewise.
fn push_with_implicit_multiply(e: &mut String) {
    if last_char(e).is_some_and(ends_operand) {
        e.push('×');
    }
}

fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

fn is_binary_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '×' | '÷' | '^')
}

/// True when `c` can end an operand: a following operand needs an implicit
/// `×`, a postfix may attach, a close bracket may follow.
fn ends_operand(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ')' | 'π' | '!' | '%' | '.')
}

fn open_bracket_surplus(s: &str) -> usize {
    let open = s.chars().filter(|&c| c == '(').count();
    let close = s.chars().filter(|&c| c == ')').count();
    open.saturating_sub(close)
}

/// True when the numeric run at the end of `s` already contains a decimal
/// point.
fn current_run_has_decimal(s: &str) -> bool {
    for c in s.chars().rev() {
        if c == '.' {
            return true;
        }
        if !c.is_ascii_digit() {
            return false;
        }
    }
    false
}
