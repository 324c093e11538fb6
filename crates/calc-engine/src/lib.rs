//! Expression editing and evaluation core.
//!
//! The portable logic behind a pad-driven calculator, independent of any
//! view layer:
//!
//! - [`separator`]: digit-grouping for display (Western and Indian styles)
//! - [`editor`]: pure keystroke-to-expression state machine
//! - [`evaluator`]: safe numeric evaluation with typed errors and a
//!   configurable angle mode
//! - [`memory`]: the single-value memory register
//! - [`session`]: the facade a host UI drives, wiring live preview,
//!   history commits and expression save/restore together
//!
//! # Example
//!
//! ```
//! use calc_engine::Session;
//! use calc_model::{BinaryOp, Token};
//!
//! let mut session = Session::new();
//! session.press(&Token::Digit('2'));
//! session.press(&Token::Op(BinaryOp::Add));
//! session.press(&Token::Digit('2'));
//! assert_eq!(session.preview(), Some("4"));
//!
//! let entry = session.commit(0).unwrap();
//! assert_eq!(entry.result, "4");
//! ```

pub mod editor;
pub mod evaluator;
pub mod memory;
pub mod separator;
pub mod session;

pub use evaluator::{balance, evaluate, format_result};
pub use memory::MemoryRegister;
pub use session::Session;
