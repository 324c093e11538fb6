//! Precedence-climbing parser over the lexeme stream.
//!
//! Precedence, tightest first: unary minus, postfix (`!`, `%`), `^`
//! (right-associative), `×`/`÷`, `+`/`-`. Unary minus binding above postfix
//! means `-3!` is `(-3)!` and `-2^2` is `(-2)^2`.

use calc_model::{BinaryOp, CalcError, Function, Result};

use super::lexer::Lexeme;

const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Pi,
    Neg(Box<Expr>),
    Factorial(Box<Expr>),
    Percent(Box<Expr>),
    Call(Function, Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add | BinaryOp::Subtract => 10,
        BinaryOp::Multiply | BinaryOp::Divide => 20,
        BinaryOp::Power => 30,
    }
}

fn is_right_associative(op: BinaryOp) -> bool {
    op == BinaryOp::Power
}

pub(crate) struct Parser<'a> {
    lexemes: &'a [Lexeme],
    position: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(lexemes: &'a [Lexeme]) -> Self {
        Self {
            lexemes,
            position: 0,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Expr> {
        if self.lexemes.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        let expr = self.parse_expression(0, 0)?;
        if self.position != self.lexemes.len() {
            return Err(CalcError::Syntax(format!(
                "unexpected input at position {}",
                self.position
            )));
        }
        Ok(expr)
    }

    fn parse_expression(&mut self, min_prec: u8, depth: usize) -> Result<Expr> {
        if depth > MAX_DEPTH {
            return Err(CalcError::Syntax("expression nested too deeply".to_string()));
        }

        let mut lhs = self.parse_prefix(depth)?;

        loop {
            // An operand directly following an operand is an implicit
            // multiplication: `2(3+4)`, `2π`, `)sin(`.
            let (op, explicit) = match self.peek_binary_operator() {
                Some(op) => (op, true),
                None => match self.peek() {
                    Some(Lexeme::LParen | Lexeme::Func(_) | Lexeme::Pi | Lexeme::Number(_)) => {
                        (BinaryOp::Multiply, false)
                    }
                    _ => break,
                },
            };
            if precedence(op) < min_prec {
                break;
            }
            if explicit {
                self.position += 1;
            }
            let next_min = if is_right_associative(op) {
                precedence(op)
            } else {
                precedence(op).saturating_add(1)
            };
            let rhs = self.parse_expression(next_min, depth + 1)?;
            lhs = Expr::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    /// A primary with leading sign and any postfix operators attached.
    fn parse_prefix(&mut self, depth: usize) -> Result<Expr> {
        let mut expr = match self.peek() {
            Some(Lexeme::Op(BinaryOp::Subtract)) => {
                self.position += 1;
                Expr::Neg(Box::new(self.parse_primary(depth)?))
            }
            Some(Lexeme::Op(BinaryOp::Add)) => {
                self.position += 1;
                self.parse_primary(depth)?
            }
            _ => self.parse_primary(depth)?,
        };
        loop {
            match self.peek() {
                Some(Lexeme::Factorial) => {
                    self.position += 1;
                    expr = Expr::Factorial(Box::new(expr));
                }
                Some(Lexeme::Percent) => {
                    self.position += 1;
                    expr = Expr::Percent(Box::new(expr));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_primary(&mut self, depth: usize) -> Result<Expr> {
        if depth > MAX_DEPTH {
            return Err(CalcError::Syntax("expression nested too deeply".to_string()));
        }
        let lexeme = self
            .peek()
            .ok_or_else(|| CalcError::Syntax("unexpected end of expression".to_string()))?
            .clone();
        match lexeme {
            Lexeme::Number(value) => {
                self.position += 1;
                Ok(Expr::Number(value))
            }
            Lexeme::Pi => {
                self.position += 1;
                Ok(Expr::Pi)
            }
            Lexeme::Func(f) => {
                self.position += 1;
                match self.peek() {
                    Some(Lexeme::LParen) => {
                        self.position += 1;
                        let arg = self.parse_expression(0, depth + 1)?;
                        self.expect_rparen(f)?;
                        Ok(Expr::Call(f, Box::new(arg)))
                    }
                    _ => Err(CalcError::Syntax(format!("{f} is missing its argument"))),
                }
            }
            Lexeme::LParen => {
                self.position += 1;
                let expr = self.parse_expression(0, depth + 1)?;
                match self.peek() {
                    Some(Lexeme::RParen) => {
                        self.position += 1;
                        Ok(expr)
                    }
                    _ => Err(CalcError::Syntax("missing closing bracket".to_string())),
                }
            }
            other => Err(CalcError::Syntax(format!("unexpected token {other:?}"))),
        }
    }

    fn expect_rparen(&mut self, f: Function) -> Result<()> {
        match self.peek() {
            Some(Lexeme::RParen) => {
                self.position += 1;
                Ok(())
            }
            _ => Err(CalcError::Syntax(format!("{f} argument is not closed"))),
        }
    }

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.position)
    }

    fn peek_binary_operator(&self) -> Option<BinaryOp> {
        match self.peek() {
            Some(Lexeme::Op(op)) => Some(*op),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::lexer::lex;

    fn parse(text: &str) -> Result<Expr> {
        Parser::new(&lex(text)?).parse()
    }

    #[test]
    fn precedence_orders_add_below_multiply() {
        let expr = parse("2+3×4").unwrap();
        match expr {
            Expr::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Multiply, .. }));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2^3^2").unwrap();
        match expr {
            Expr::Binary { op: BinaryOp::Power, left, right } => {
                assert_eq!(*left, Expr::Number(2.0));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Power, .. }));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn unary_minus_binds_above_postfix_and_power() {
        assert!(matches!(parse("-3!").unwrap(), Expr::Factorial(_)));
        match parse("-2^2").unwrap() {
            Expr::Binary { op: BinaryOp::Power, left, .. } => {
                assert!(matches!(*left, Expr::Neg(_)));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn postfix_chains_attach_to_the_operand() {
        assert!(matches!(parse("5!%").unwrap(), Expr::Percent(_)));
    }

    #[test]
    fn implicit_multiplication_between_operands() {
        let expr = parse("2(3+4)").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Multiply, .. }));
        let expr = parse("2π").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Multiply, .. }));
    }

    #[test]
    fn rejects_incomplete_expressions() {
        assert!(matches!(parse("2+"), Err(CalcError::Syntax(_))));
        assert!(matches!(parse("(2+3"), Err(CalcError::Syntax(_))));
        assert!(matches!(parse("sin"), Err(CalcError::Syntax(_))));
        assert!(matches!(parse(""), Err(CalcError::EmptyExpression)));
    }
}
