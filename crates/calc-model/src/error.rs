use thiserror::Error;

/// Evaluation failure taxonomy.
///
/// Every evaluator failure maps to exactly one of these kinds; the engine
/// never panics past its boundary. The host keys localized error messages
/// off the variant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// Nothing to evaluate.
    #[error("expression is empty")]
    EmptyExpression,

    /// Malformed or unbalanced expression. Carries a short detail message.
    #[error("invalid expression: {0}")]
    Syntax(String),

    /// Division or modulo by zero.
    #[error("cannot divide by zero")]
    DivisionByZero,

    /// Input outside a function's domain (sqrt of a negative, log of a
    /// non-positive, asin/acos outside [-1, 1], factorial of a negative or
    /// non-integer).
    #[error("domain error: {0}")]
    Domain(String),

    /// Result is non-finite or exceeds the representable range.
    #[error("result out of range")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, CalcError>;
