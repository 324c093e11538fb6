//! CLI argument definitions for the calculator.

use std::path::PathBuf;

use calc_model::{AngleMode, NumberSeparator};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "calc",
    version,
    about = "Scientific expression calculator",
    long_about = "Evaluate arithmetic and scientific expressions.\n\n\
                  Supports +, -, ×, ÷, ^, !, %, brackets, trigonometry with\n\
                  degree/radian modes, digit grouping, a memory register and\n\
                  a persistent calculation history."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate one expression and print the result.
    Eval(EvalArgs),

    /// Start an interactive calculator session.
    Repl(ReplArgs),

    /// Show the stored calculation history.
    History(HistoryArgs),
}

#[derive(Parser)]
pub struct EvalArgs {
    /// The expression to evaluate, e.g. "2+3×4" or "sin(90)".
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,

    /// Angle unit for trigonometric functions.
    #[arg(long = "angle-mode", value_enum, default_value = "deg")]
    pub angle_mode: AngleModeArg,

    /// Digit grouping applied to the printed result.
    #[arg(long = "separator", value_enum, default_value = "off")]
    pub separator: SeparatorArg,

    /// Append the calculation to this history file.
    #[arg(long = "history-file", value_name = "PATH")]
    pub history_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReplArgs {
    /// Angle unit for trigonometric functions at startup.
    #[arg(long = "angle-mode", value_enum, default_value = "deg")]
    pub angle_mode: AngleModeArg,

    /// Digit grouping shown in the expression display.
    #[arg(long = "separator", value_enum, default_value = "western")]
    pub separator: SeparatorArg,

    /// Persist committed calculations to this history file.
    #[arg(long = "history-file", value_name = "PATH")]
    pub history_file: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// The history file to display.
    #[arg(value_name = "PATH")]
    pub history_file: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AngleModeArg {
    Deg,
    Rad,
}

impl From<AngleModeArg> for AngleMode {
    fn from(arg: AngleModeArg) -> Self {
        match arg {
            AngleModeArg::Deg => AngleMode::Degrees,
            AngleModeArg::Rad => AngleMode::Radians,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeparatorArg {
    Off,
    Western,
    Indian,
}

impl From<SeparatorArg> for NumberSeparator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Off => NumberSeparator::Off,
            SeparatorArg::Western => NumberSeparator::Western,
            SeparatorArg::Indian => NumberSeparator::Indian,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
