//! End-to-end keystroke workflows across the editor, evaluator and session.

use calc_engine::Session;
use calc_model::{AngleMode, BinaryOp, CalcError, EvalOptions, Function, NumberSeparator, Token};

fn type_in(session: &mut Session, tokens: &[Token]) {
    for t in tokens {
        session.press(t);
    }
}

fn digits(session: &mut Session, text: &str) {
    for d in text.chars() {
        if d == '.' {
            session.press(&Token::Decimal);
        } else {
            session.press(&Token::Digit(d));
        }
    }
}

#[test]
fn scientific_expression_built_from_keystrokes() {
    let mut session = Session::new();
    digits(&mut session, "2");
    session.press(&Token::Func(Function::Sin));
    digits(&mut session, "90");
    assert_eq!(session.expression(), "2×sin(90");
    assert_eq!(session.preview(), Some("2"));

    let entry = session.commit(0).unwrap();
    assert_eq!(entry.expression, "2×sin(90)");
    assert_eq!(entry.result, "2");
}

#[test]
fn operator_mashing_never_stacks() {
    let mut session = Session::new();
    digits(&mut session, "5");
    type_in(
        &mut session,
        &[
            Token::Op(BinaryOp::Add),
            Token::Op(BinaryOp::Subtract),
            Token::Op(BinaryOp::Multiply),
        ],
    );
    assert_eq!(session.expression(), "5×");
    digits(&mut session, "3");
    assert_eq!(session.preview(), Some("15"));
}

#[test]
fn delete_walks_back_through_logical_units() {
    let mut session = Session::new();
    digits(&mut session, "12");
    session.press(&Token::Func(Function::Asin));
    assert_eq!(session.expression(), "12×asin(");

    session.delete();
    assert_eq!(session.expression(), "12×");
    session.delete();
    assert_eq!(session.expression(), "12");
    session.delete();
    session.delete();
    assert_eq!(session.expression(), "");
    // Empty delete is a no-op, not a failure.
    session.delete();
    assert_eq!(session.expression(), "");
}

#[test]
fn chained_calculation_from_previous_result() {
    let mut session = Session::new();
    digits(&mut session, "6");
    session.press(&Token::Op(BinaryOp::Multiply));
    digits(&mut session, "7");
    session.commit(0).unwrap();
    assert_eq!(session.expression(), "42");

    session.press(&Token::Op(BinaryOp::Divide));
    digits(&mut session, "2");
    let entry = session.commit(1).unwrap();
    assert_eq!(entry.expression, "42÷2");
    assert_eq!(entry.result, "21");
}

#[test]
fn fresh_start_after_result() {
    let mut session = Session::new();
    digits(&mut session, "2");
    session.press(&Token::Op(BinaryOp::Add));
    digits(&mut session, "2");
    session.commit(0).unwrap();

    digits(&mut session, "9");
    assert_eq!(session.expression(), "9");
}

#[test]
fn error_taxonomy_reaches_the_commit_boundary() {
    let cases: [(&str, fn(&CalcError) -> bool); 3] = [
        ("1÷0", |e| *e == CalcError::DivisionByZero),
        ("sqrt(0-1)", |e| matches!(e, CalcError::Domain(_))),
        ("171!", |e| *e == CalcError::Overflow),
    ];
    for (text, matches_kind) in cases {
        let mut session = Session::new();
        session.restore_expression(text);
        assert_eq!(session.preview(), None, "no preview for {text}");
        let error = session.commit(0).unwrap_err();
        assert!(matches_kind(&error), "unexpected error for {text}: {error}");
    }
}

#[test]
fn degrees_and_radians_agree_on_equivalent_inputs() {
    let degrees = calc_engine::evaluate("sin(90)", &EvalOptions::default()).unwrap();
    let radians = calc_engine::evaluate(
        "sin(π÷2)",
        &EvalOptions::new().with_angle_mode(AngleMode::Radians),
    )
    .unwrap();
    assert!((degrees - 1.0).abs() < 1e-9);
    assert!((radians - 1.0).abs() < 1e-9);
}

#[test]
fn indian_grouping_follows_the_expression() {
    let mut session = Session::with_options(EvalOptions::default(), NumberSeparator::Indian);
    digits(&mut session, "123456");
    session.press(&Token::Op(BinaryOp::Add));
    digits(&mut session, "7890");
    assert_eq!(session.display_expression(), "1,23,456+7,890");
    assert_eq!(session.preview(), Some("131346"));
    assert_eq!(session.display_preview().as_deref(), Some("1,31,346"));
}

#[test]
fn percent_workflow() {
    let mut session = Session::new();
    digits(&mut session, "200");
    session.press(&Token::Op(BinaryOp::Add));
    digits(&mut session, "10");
    session.press(&Token::Percent);
    assert_eq!(session.expression(), "200+10%");
    assert_eq!(session.preview(), Some("220"));
}

#[test]
fn bracket_admission_and_virtual_close() {
    let mut session = Session::new();
    // A close bracket with nothing open is ignored.
    session.press(&Token::CloseBracket);
    assert_eq!(session.expression(), "");

    type_in(&mut session, &[Token::OpenBracket, Token::Digit('8')]);
    session.press(&Token::Op(BinaryOp::Divide));
    digits(&mut session, "2");
    assert_eq!(session.expression(), "(8÷2");
    // Preview works on the virtually closed form.
    assert_eq!(session.preview(), Some("4"));
    // The explicit close is accepted now that a bracket is open.
    session.press(&Token::CloseBracket);
    assert_eq!(session.expression(), "(8÷2)");
}
