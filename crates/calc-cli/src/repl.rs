//! Interactive calculator session on stdin/stdout.
//!
//! Each input line is either a session command or a run of keystrokes fed
//! through the expression editor, so the REPL exercises exactly the same
//! pad semantics as a button UI: implicit multiplication, operator
//! replacement, bracket admission and prev-result behavior all apply.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use calc_engine::Session;
use calc_model::{AngleMode, BinaryOp, EvalOptions, Function, Token};
use chrono::Utc;
use tracing::debug;

use calc_cli::history::{HistoryStore, history_table};

use crate::cli::ReplArgs;

const HELP: &str = "\
expressions   type keystrokes, e.g. 2+3×4, sin(90, 2pi
=             evaluate and record the result
del           delete one unit    ac    clear all
ms m+ m- mc   memory store/add/subtract/clear
mr            recall memory into the expression
deg | rad     switch angle mode (re-evaluates)
history       show recorded calculations
quit          leave";

enum Outcome {
    Continue,
    Quit,
}

pub fn run_repl(args: &ReplArgs) -> Result<()> {
    let options = EvalOptions::new().with_angle_mode(args.angle_mode.into());
    let mut session = Session::with_options(options, args.separator.into());
    let mut store = args.history_file.as_deref().map(HistoryStore::load);

    let mut stdout = io::stdout();
    writeln!(stdout, "calc {} — type `help` for commands", env!("CARGO_PKG_VERSION"))?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        match handle_line(&mut session, store.as_mut(), line.trim())? {
            Outcome::Quit => break,
            Outcome::Continue => render(&mut stdout, &session)?,
        }
    }
    Ok(())
}

fn handle_line(
    session: &mut Session,
    mut store: Option<&mut HistoryStore>,
    line: &str,
) -> Result<Outcome> {
    match line.to_ascii_lowercase().as_str() {
        "" => {}
        "quit" | "exit" | "q" => return Ok(Outcome::Quit),
        "help" | "?" => println!("{HELP}"),
        "=" => match session.commit(Utc::now().timestamp_millis()) {
            Ok(entry) => {
                println!("{}", entry.share_line());
                if let Some(store) = store.as_deref_mut() {
                    store.append(entry);
                    store.save()?;
                }
            }
            Err(error) => println!("error: {error}"),
        },
        "del" => session.delete(),
        "ac" | "clear" => session.clear(),
        "ms" => session.memory_store(),
        "m+" => session.memory_add(),
        "m-" => session.memory_subtract(),
        "mc" => session.memory_clear(),
        "mr" => session.memory_recall(),
        "deg" => session.set_angle_mode(AngleMode::Degrees),
        "rad" => session.set_angle_mode(AngleMode::Radians),
        "history" => match store.as_deref() {
            Some(store) if !store.entries().is_empty() => {
                println!("{}", history_table(store.entries()));
            }
            _ => println!("no history recorded"),
        },
        _ => match parse_keystrokes(line) {
            Ok(tokens) => {
                for token in &tokens {
                    session.press(token);
                }
            }
            Err(message) => println!("error: {message}"),
        },
    }
    Ok(Outcome::Continue)
}

fn render(out: &mut impl Write, session: &Session) -> Result<()> {
    let expression = session.display_expression();
    if expression.is_empty() {
        writeln!(out, "  [{}]", session.angle_mode())?;
    } else {
        writeln!(out, "  {expression}  [{}]", session.angle_mode())?;
    }
    if let Some(preview) = session.display_preview() {
        writeln!(out, "  ≈ {preview}")?;
    }
    out.flush()?;
    Ok(())
}

/// Translate one typed line into pad keystrokes.
fn parse_keystrokes(line: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | ',' => i += 1,
            '0'..='9' => {
                tokens.push(Token::Digit(c));
                i += 1;
            }
            '.' => {
                tokens.push(Token::Decimal);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Op(BinaryOp::Add));
                i += 1;
            }
            '-' | '−' => {
                tokens.push(Token::Op(BinaryOp::Subtract));
                i += 1;
            }
            '×' | '*' => {
                tokens.push(Token::Op(BinaryOp::Multiply));
                i += 1;
            }
            '÷' | '/' => {
                tokens.push(Token::Op(BinaryOp::Divide));
                i += 1;
            }
            '^' => {
                tokens.push(Token::Op(BinaryOp::Power));
                i += 1;
            }
            '!' => {
                tokens.push(Token::Factorial);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::OpenBracket);
                i += 1;
            }
            ')' => {
                tokens.push(Token::CloseBracket);
                i += 1;
            }
            'π' => {
                tokens.push(Token::Pi);
                i += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let (token, next) = scan_name(&chars, i)?;
                tokens.push(token);
                i = next;
            }
            other => return Err(format!("unrecognized input `{other}`")),
        }
    }
    debug!(count = tokens.len(), "parsed keystrokes");
    Ok(tokens)
}

/// Match a function name or `pi` at position `start`, longest name first.
fn scan_name(chars: &[char], start: usize) -> Result<(Token, usize), String> {
    let rest: String = chars[start..].iter().collect();
    for f in Function::ALL {
        if rest.starts_with(f.as_str()) {
            let mut end = start + f.as_str().len();
            // Swallow the bracket the pad would add; the editor re-adds it.
            if chars.get(end) == Some(&'(') {
                end += 1;
            }
            return Ok((Token::Func(f), end));
        }
    }
    if rest.starts_with("pi") {
        return Ok((Token::Pi, start + 2));
    }
    let name: String = chars[start..]
        .iter()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    Err(format!("unknown function `{name}`"))
}
