//! Configuration passed explicitly into engine calls.
//!
//! There is no process-wide settings singleton: the host reads its settings
//! store and hands the engine an [`EvalOptions`] (and a [`NumberSeparator`]
//! for display formatting) on every call that needs one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Angle unit consulted by the trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleMode {
    /// Inputs to sin/cos/tan are degrees; outputs of asin/acos/atan are degrees.
    #[default]
    Degrees,
    /// Angles pass through unchanged.
    Radians,
}

impl AngleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AngleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEG" | "DEGREES" => Ok(AngleMode::Degrees),
            "RAD" | "RADIANS" => Ok(AngleMode::Radians),
            other => Err(format!("unknown angle mode: {other}")),
        }
    }
}

/// Digit-grouping style applied at the display boundary only.
///
/// Separators never reach the evaluator; they are stripped before parsing
/// and reinserted when formatting for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberSeparator {
    /// No grouping.
    Off,
    /// Groups of three: `1,234,567`.
    #[default]
    Western,
    /// First group of three, then twos: `12,34,567`.
    Indian,
}

impl NumberSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberSeparator::Off => "OFF",
            NumberSeparator::Western => "WESTERN",
            NumberSeparator::Indian => "INDIAN",
        }
    }
}

impl fmt::Display for NumberSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumberSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(NumberSeparator::Off),
            "WESTERN" => Ok(NumberSeparator::Western),
            "INDIAN" => Ok(NumberSeparator::Indian),
            other => Err(format!("unknown number separator: {other}")),
        }
    }
}

/// Options for one evaluation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Angle unit for trigonometric functions.
    pub angle_mode: AngleMode,
}

impl EvalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }
}
