//! Input vocabulary for the expression editor.
//!
//! Every pad button that mutates the expression maps to one [`Token`]
//! variant; the host UI is a thin adapter from button identity to `Token`.
//! Delete and clear are separate editor operations, not tokens.

use std::fmt;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    /// Display-form symbol appended to the expression text.
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '×',
            BinaryOp::Divide => '÷',
            BinaryOp::Power => '^',
        }
    }
}

/// Scientific function taking a bracketed argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Exp,
    Sqrt,
    Cbrt,
}

impl Function {
    /// All functions, longest names first so that prefix scans match
    /// `asin` before `sin`.
    pub const ALL: [Function; 11] = [
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sqrt,
        Function::Cbrt,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Log,
        Function::Exp,
        Function::Ln,
    ];

    /// Function name as it appears in the display text (without the bracket).
    pub fn as_str(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editor keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A single decimal digit `'0'..='9'`.
    Digit(char),
    /// The decimal point.
    Decimal,
    /// A binary operator key.
    Op(BinaryOp),
    /// A scientific function key; the editor appends `name(`.
    Func(Function),
    /// The `π` literal key.
    Pi,
    /// Postfix factorial key.
    Factorial,
    /// Postfix percent key.
    Percent,
    OpenBracket,
    CloseBracket,
    /// A numeric literal inserted whole, e.g. memory recall.
    Constant(String),
}
