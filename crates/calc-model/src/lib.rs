//! Shared data model for the calculator engine.
//!
//! Pure types only: the input token vocabulary, editor state, configuration
//! enums, the evaluation error taxonomy, and the history record. All logic
//! lives in `calc-engine`.

pub mod error;
pub mod history;
pub mod options;
pub mod state;
pub mod token;

pub use error::{CalcError, Result};
pub use history::HistoryEntry;
pub use options::{AngleMode, EvalOptions, NumberSeparator};
pub use state::EditorState;
pub use token::{BinaryOp, Function, Token};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn angle_mode_round_trips_through_str() {
        assert_eq!(AngleMode::from_str("DEG").unwrap(), AngleMode::Degrees);
        assert_eq!(AngleMode::from_str("radians").unwrap(), AngleMode::Radians);
        assert_eq!(AngleMode::Degrees.as_str(), "DEG");
        assert!(AngleMode::from_str("GRAD").is_err());
    }

    #[test]
    fn history_entry_serializes() {
        let entry = HistoryEntry::new("2+2", "4", 1_700_000_000_000);
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(entry.share_line(), "2+2 = 4");
    }

    #[test]
    fn error_messages_are_stable() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "cannot divide by zero");
        assert_eq!(CalcError::EmptyExpression.to_string(), "expression is empty");
    }

    #[test]
    fn function_names_match_display_alphabet() {
        assert_eq!(Function::Asin.as_str(), "asin");
        assert_eq!(Function::ALL.len(), 11);
        // Longest-first ordering so prefix scans match `asin` before `sin`.
        assert!(Function::ALL[0].as_str().len() >= Function::ALL[10].as_str().len());
    }
}
