//! Safe numeric evaluation of display-form expressions.
//!
//! `evaluate` never panics: every failure comes back as a typed
//! [`CalcError`]. Callers strip grouping separators first; the session layer
//! uses [`balance`] to auto-close brackets for live preview and to produce
//! the committed "calculated expression" recorded in history.

mod lexer;
mod parser;

use calc_model::{BinaryOp, CalcError, EvalOptions, Function, Result};
use tracing::debug;

use parser::{Expr, Parser};

/// Largest magnitude a result may take before it is reported as overflow.
const MAX_ABS_RESULT: f64 = 1.0e308;

/// Largest integer whose factorial fits in an `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Evaluate `text` with the given options.
pub fn evaluate(text: &str, options: &EvalOptions) -> Result<f64> {
    if text.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    let lexemes = lexer::lex(text)?;
    let expr = Parser::new(&lexemes).parse()?;
    let value = eval_expr(&expr, options)?;
    ensure_in_range(value)
}

/// Produce the balanced "calculated expression": trailing dangling binary
/// operators are dropped and every unmatched `(` is closed. This is the form
/// committed to history and used for sharing; the raw display text is never
/// rewritten.
pub fn balance(text: &str) -> String {
    let mut out = text.trim().to_string();
    while out
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '+' | '-' | '×' | '÷' | '^' | '*' | '/'))
    {
        out.pop();
    }
    let open = out.chars().filter(|&c| c == '(').count();
    let close = out.chars().filter(|&c| c == ')').count();
    for _ in close..open {
        out.push(')');
    }
    if out != text {
        debug!(raw = text, balanced = %out, "balanced expression");
    }
    out
}

/// Format a result for display: up to 10 fractional digits with trailing
/// zeros trimmed, `-0` folded to `0`, exponent notation for very large or
/// very small magnitudes.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1.0e15 || magnitude < 1.0e-9 {
        return format!("{value:e}");
    }
    let mut s = format!("{value:.10}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

fn ensure_in_range(value: f64) -> Result<f64> {
    if !value.is_finite() || value.abs() > MAX_ABS_RESULT {
        return Err(CalcError::Overflow);
    }
    Ok(value)
}

fn is_zero(value: f64) -> bool {
    value.classify() == std::num::FpCategory::Zero
}

fn eval_expr(expr: &Expr, options: &EvalOptions) -> Result<f64> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Pi => Ok(std::f64::consts::PI),
        Expr::Neg(inner) => Ok(-eval_expr(inner, options)?),
        Expr::Factorial(inner) => factorial(eval_expr(inner, options)?),
        Expr::Percent(inner) => Ok(eval_expr(inner, options)? / 100.0),
        Expr::Call(f, arg) => call(*f, eval_expr(arg, options)?, options),
        Expr::Binary { op, left, right } => {
            let lhs = eval_expr(left, options)?;
            // In an additive context `a ± b%` means "b percent of a".
            if matches!(op, BinaryOp::Add | BinaryOp::Subtract) {
                if let Expr::Percent(inner) = right.as_ref() {
                    let fraction = eval_expr(inner, options)? / 100.0;
                    return match op {
                        BinaryOp::Add => Ok(lhs + lhs * fraction),
                        _ => Ok(lhs - lhs * fraction),
                    };
                }
            }
            let rhs = eval_expr(right, options)?;
            binary(*op, lhs, rhs)
        }
    }
}

fn binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Subtract => Ok(lhs - rhs),
        BinaryOp::Multiply => Ok(lhs * rhs),
        BinaryOp::Divide => {
            if is_zero(rhs) {
                return Err(CalcError::DivisionByZero);
            }
            Ok(lhs / rhs)
        }
        BinaryOp::Power => {
            if lhs < 0.0 && rhs.fract() != 0.0 {
                return Err(CalcError::Domain(
                    "negative base with fractional exponent".to_string(),
                ));
            }
            if is_zero(lhs) && rhs < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            Ok(lhs.powf(rhs))
        }
    }
}

fn factorial(value: f64) -> Result<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(CalcError::Domain(
            "factorial needs a non-negative integer".to_string(),
        ));
    }
    if value > MAX_FACTORIAL {
        return Err(CalcError::Overflow);
    }
    let mut result = 1.0_f64;
    let mut n = 2.0_f64;
    while n <= value {
        result *= n;
        n += 1.0;
    }
    Ok(result)
}

fn call(f: Function, arg: f64, options: &EvalOptions) -> Result<f64> {
    use calc_model::AngleMode;

    let to_radians = |v: f64| match options.angle_mode {
        AngleMode::Degrees => v.to_radians(),
        AngleMode::Radians => v,
    };
    let from_radians = |v: f64| match options.angle_mode {
        AngleMode::Degrees => v.to_degrees(),
        AngleMode::Radians => v,
    };

    match f {
        Function::Sin => Ok(to_radians(arg).sin()),
        Function::Cos => Ok(to_radians(arg).cos()),
        Function::Tan => {
            let radians = to_radians(arg);
            let result = radians.tan();
            if !result.is_finite() || result.abs() > 1.0e15 {
                return Err(CalcError::Domain("tangent is undefined here".to_string()));
            }
            Ok(result)
        }
        Function::Asin => {
            if !(-1.0..=1.0).contains(&arg) {
                return Err(CalcError::Domain("asin needs an input in [-1, 1]".to_string()));
            }
            Ok(from_radians(arg.asin()))
        }
        Function::Acos => {
            if !(-1.0..=1.0).contains(&arg) {
                return Err(CalcError::Domain("acos needs an input in [-1, 1]".to_string()));
            }
            Ok(from_radians(arg.acos()))
        }
        Function::Atan => Ok(from_radians(arg.atan())),
        Function::Log => {
            if arg <= 0.0 {
                return Err(CalcError::Domain("log needs a positive input".to_string()));
            }
            Ok(arg.log10())
        }
        Function::Ln => {
            if arg <= 0.0 {
                return Err(CalcError::Domain("ln needs a positive input".to_string()));
            }
            Ok(arg.ln())
        }
        Function::Exp => Ok(arg.exp()),
        Function::Sqrt => {
            if arg < 0.0 {
                return Err(CalcError::Domain("sqrt needs a non-negative input".to_string()));
            }
            Ok(arg.sqrt())
        }
        Function::Cbrt => Ok(arg.cbrt()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_model::AngleMode;

    const TOLERANCE: f64 = 1e-9;

    fn eval(text: &str) -> Result<f64> {
        evaluate(text, &EvalOptions::default())
    }

    fn eval_rad(text: &str) -> Result<f64> {
        evaluate(text, &EvalOptions::new().with_angle_mode(AngleMode::Radians))
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(eval("2+2").unwrap(), 4.0);
        assert_eq!(eval("2+3×4").unwrap(), 14.0);
        assert_eq!(eval("10÷4").unwrap(), 2.5);
        assert_eq!(eval("2^10").unwrap(), 1024.0);
        assert_eq!(eval("(2+3)×4").unwrap(), 20.0);
    }

    #[test]
    fn division_by_zero_is_typed() {
        assert_eq!(eval("1÷0"), Err(CalcError::DivisionByZero));
        assert_eq!(eval("1÷(2-2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn domain_errors_are_typed() {
        assert!(matches!(eval("sqrt(-1)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("log(0)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("ln(-5)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("asin(2)"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("acos(-1.5)"), Err(CalcError::Domain(_))));
    }

    #[test]
    fn factorial_of_integers_only() {
        assert_eq!(eval("5!").unwrap(), 120.0);
        assert_eq!(eval("0!").unwrap(), 1.0);
        assert!(matches!(eval("2.5!"), Err(CalcError::Domain(_))));
        assert!(matches!(eval("(0-3)!"), Err(CalcError::Domain(_))));
        assert_eq!(eval("171!"), Err(CalcError::Overflow));
    }

    #[test]
    fn trig_respects_angle_mode() {
        assert!((eval("sin(90)").unwrap() - 1.0).abs() < TOLERANCE);
        assert!((eval_rad("sin(π÷2)").unwrap() - 1.0).abs() < TOLERANCE);
        assert!((eval("cos(180)").unwrap() + 1.0).abs() < TOLERANCE);
        assert!((eval("asin(1)").unwrap() - 90.0).abs() < TOLERANCE);
        assert!((eval_rad("asin(1)").unwrap() - std::f64::consts::FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn scientific_functions() {
        assert!((eval("log(100)").unwrap() - 2.0).abs() < TOLERANCE);
        assert!((eval("ln(1)").unwrap()).abs() < TOLERANCE);
        assert!((eval("sqrt(16)").unwrap() - 4.0).abs() < TOLERANCE);
        assert!((eval("cbrt(27)").unwrap() - 3.0).abs() < TOLERANCE);
        assert!((eval_rad("exp(1)").unwrap() - std::f64::consts::E).abs() < TOLERANCE);
        assert!((eval("cbrt(0-8)").unwrap() + 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn percent_in_additive_context_scales_the_left_term() {
        assert!((eval("200+10%").unwrap() - 220.0).abs() < TOLERANCE);
        assert!((eval("200-10%").unwrap() - 180.0).abs() < TOLERANCE);
    }

    #[test]
    fn percent_elsewhere_is_a_plain_fraction() {
        assert!((eval("50%").unwrap() - 0.5).abs() < TOLERANCE);
        assert!((eval("200×10%").unwrap() - 20.0).abs() < TOLERANCE);
        assert!((eval("200÷50%").unwrap() - 400.0).abs() < TOLERANCE);
    }

    #[test]
    fn unary_minus_binds_tightest() {
        assert_eq!(eval("-2^2").unwrap(), 4.0);
        assert!(matches!(eval("-3!"), Err(CalcError::Domain(_))));
        assert_eq!(eval("5×-2").unwrap(), -10.0);
    }

    #[test]
    fn overflow_is_typed() {
        assert_eq!(eval("10^309"), Err(CalcError::Overflow));
        assert!(matches!(eval("0^(0-1)"), Err(CalcError::DivisionByZero)));
    }

    #[test]
    fn negative_base_power_rules() {
        assert_eq!(eval("(0-2)^3").unwrap(), -8.0);
        assert!(matches!(eval("(0-2)^0.5"), Err(CalcError::Domain(_))));
    }

    #[test]
    fn empty_expression_is_typed() {
        assert_eq!(eval(""), Err(CalcError::EmptyExpression));
        assert_eq!(eval("   "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn balance_closes_brackets_and_drops_dangling_operators() {
        assert_eq!(balance("2×(3+4"), "2×(3+4)");
        assert_eq!(balance("sin(sin(30"), "sin(sin(30))");
        assert_eq!(balance("5+"), "5");
        assert_eq!(balance("2×(3+"), "2×(3)");
        assert_eq!(balance("2+2"), "2+2");
    }

    #[test]
    fn balanced_preview_matches_explicit_form() {
        let open = balance("(2+3");
        assert_eq!(eval(&open).unwrap(), eval("(2+3)").unwrap());
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_result(1.0e16), "1e16");
    }
}
