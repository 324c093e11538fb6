//! Editor state shared between the editor and the session layer.

/// Current expression text plus the prev-result flag.
///
/// `is_prev_result` is set immediately after a successful `=` and cleared by
/// the first edit that follows. While set, a digit/function keystroke starts
/// a fresh expression and an operator keystroke continues from the shown
/// result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    /// Expression in display form, without grouping separators.
    pub expression: String,
    /// True only between a successful `=` and the next edit.
    pub is_prev_result: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State showing a committed result, ready to be continued or replaced.
    pub fn from_result(result: impl Into<String>) -> Self {
        Self {
            expression: result.into(),
            is_prev_result: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }
}
