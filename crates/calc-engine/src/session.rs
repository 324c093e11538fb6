//! One user-facing calculator session.
//!
//! [`Session`] ties the editor, evaluator and memory register together the
//! way a host view layer needs them: every keystroke mutates the expression
//! and refreshes the live preview; `=` commits the balanced expression to a
//! [`HistoryEntry`] and re-seeds the editor with the result. Settings come
//! in as explicit values, never from ambient state.

use calc_model::{
    AngleMode, CalcError, EditorState, EvalOptions, HistoryEntry, NumberSeparator, Result, Token,
};
use tracing::debug;

use crate::editor;
use crate::evaluator;
use crate::memory::MemoryRegister;
use crate::separator;

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: EditorState,
    memory: MemoryRegister,
    options: EvalOptions,
    separator: NumberSeparator,
    preview: Option<String>,
    last_error: Option<CalcError>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvalOptions, separator: NumberSeparator) -> Self {
        Self {
            options,
            separator,
            ..Self::default()
        }
    }

    /// Raw expression text, no grouping separators.
    pub fn expression(&self) -> &str {
        &self.state.expression
    }

    /// Expression formatted for display with the configured grouping.
    pub fn display_expression(&self) -> String {
        separator::insert_separators(&self.state.expression, self.separator)
    }

    /// Live preview result, if the current expression has one.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Preview formatted for display with the configured grouping.
    pub fn display_preview(&self) -> Option<String> {
        self.preview
            .as_deref()
            .map(|p| separator::insert_separators(p, self.separator))
    }

    /// The error the last preview ran into, if any. Display of this is
    /// reserved for the `=` action.
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.options.angle_mode
    }

    /// Change the angle mode and re-evaluate the displayed expression.
    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.options.angle_mode = angle_mode;
        self.refresh_preview();
    }

    pub fn number_separator(&self) -> NumberSeparator {
        self.separator
    }

    pub fn set_number_separator(&mut self, separator: NumberSeparator) {
        self.separator = separator;
    }

    /// Apply one keystroke.
    pub fn press(&mut self, token: &Token) {
        self.state = editor::apply(&self.state, token);
        self.refresh_preview();
    }

    /// Delete one trailing logical unit.
    pub fn delete(&mut self) {
        if self.state.is_empty() {
            return;
        }
        self.state.expression = editor::delete(&self.state.expression);
        self.state.is_prev_result = false;
        self.refresh_preview();
    }

    /// Reset expression and preview, regardless of any prior state.
    pub fn clear(&mut self) {
        self.state = editor::clear();
        self.preview = None;
        self.last_error = None;
    }

    /// Commit the current expression (`=`).
    ///
    /// On success the balanced expression and formatted result become a
    /// [`HistoryEntry`], the editor is re-seeded with the result, and the
    /// prev-result flag is set. Fails with the typed error when the
    /// expression is empty or has no valid preview result.
    pub fn commit(&mut self, timestamp_millis: i64) -> Result<HistoryEntry> {
        if self.state.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        let Some(result) = self.preview.clone() else {
            return Err(self
                .last_error
                .clone()
                .unwrap_or_else(|| CalcError::Syntax("expression has no result".to_string())));
        };
        let balanced = evaluator::balance(&self.state.expression);
        let entry = HistoryEntry::new(balanced, result.clone(), timestamp_millis);
        self.state = EditorState::from_result(result);
        self.preview = None;
        self.last_error = None;
        debug!(expression = %entry.expression, result = %entry.result, "committed");
        Ok(entry)
    }

    /// Shareable `expression = result` line, when a valid preview exists.
    pub fn share_line(&self) -> Option<String> {
        let preview = self.preview.as_deref()?;
        Some(format!(
            "{} = {}",
            evaluator::balance(&self.state.expression),
            preview
        ))
    }

    /// Store the current preview result in memory; no-op unless it is a
    /// valid numeral.
    pub fn memory_store(&mut self) {
        if let Some(value) = self.preview_value() {
            self.memory.store(value);
        } else {
            debug!("memory store skipped, no numeric result");
        }
    }

    /// Add the current preview result to memory; no-op unless it is a valid
    /// numeral.
    pub fn memory_add(&mut self) {
        if let Some(value) = self.preview_value() {
            self.memory.add(value);
        }
    }

    /// Subtract the current preview result from memory; no-op unless it is
    /// a valid numeral.
    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.preview_value() {
            self.memory.subtract(value);
        }
    }

    /// Insert the stored memory value into the expression as a constant.
    pub fn memory_recall(&mut self) {
        if let Some(value) = self.memory.recall() {
            let literal = evaluator::format_result(value);
            self.press(&Token::Constant(literal));
        }
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    pub fn memory(&self) -> Option<f64> {
        self.memory.recall()
    }

    /// Expression text for the host to stash when backgrounded.
    pub fn save_expression(&self) -> String {
        self.state.expression.clone()
    }

    /// Restore a previously saved expression (grouping separators allowed).
    pub fn restore_expression(&mut self, text: &str) {
        self.state = EditorState {
            expression: separator::strip_separators(text),
            is_prev_result: false,
        };
        self.refresh_preview();
    }

    /// Current preview as a number, when it is a valid numeral.
    fn preview_value(&self) -> Option<f64> {
        let preview = self.preview.as_deref()?;
        if separator::is_number(preview) {
            preview.parse::<f64>().ok()
        } else {
            None
        }
    }

    /// Re-run the live preview after a text mutation.
    ///
    /// The preview stays empty for an empty expression and for plain
    /// numerals (nothing to compute); evaluation runs on the virtually
    /// balanced form, and failures are held back for the `=` action instead
    /// of being shown mid-edit.
    fn refresh_preview(&mut self) {
        self.preview = None;
        self.last_error = None;
        let expr = self.state.expression.as_str();
        if expr.is_empty() || separator::is_number(expr) {
            return;
        }
        let balanced = evaluator::balance(expr);
        match evaluator::evaluate(&balanced, &self.options) {
            Ok(value) => self.preview = Some(evaluator::format_result(value)),
            Err(error) => {
                debug!(%error, "preview suppressed");
                self.last_error = Some(error);
            }
        }
    }
}
