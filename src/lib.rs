//! A Brainfuck interpreter with switchable runtime checks.
//!
//! This crate executes a program buffer directly against a fixed-size tape of
//! signed 8-bit cells (default 30,000), one instruction at a time.
//!
//! Features and behaviors:
//! - Tape size and runtime checks are configured per run through [`RunConfig`].
//! - With checks off, cell arithmetic wraps two's-complement and cursor
//!   motion is unchecked; with `-b`/`-w`-style checks on, the corresponding
//!   boundary condition halts the program instead.
//! - Loops are resolved by rescanning for the matching bracket at dispatch
//!   time; unmatched brackets are reported as errors whenever one has to be
//!   resolved. An opt-in [`JumpTable`] variant precomputes the pairs instead.
//! - Non-instruction bytes are comments unless strict syntax checking is on,
//!   which tolerates only line breaks.
//! - Input `,` reads a single byte; end of input stores [`EOF_SENTINEL`].
//! - Every runtime error carries the instruction offset and current cell
//!   value, and [`locate`] turns the offset into a 1-based row/column pair.
//!
//! Quick start:
//!
//! ```
//! use bfi::{Interpreter, RunConfig};
//!
//! // Prints 'A': 8 * 8 = 64 in the second cell, plus one, then output.
//! let code = b"++++++++[>++++++++<-]>+.".to_vec();
//! let mut vm = Interpreter::new(code, RunConfig::default()).expect("tape allocation");
//! vm.run().expect("program should run");
//! ```

mod brackets;
mod config;
mod engine;
mod jumps;
mod position;

pub use brackets::{ScanDirection, match_bracket};
pub use config::{DEFAULT_DATA_SIZE, RunConfig};
pub use engine::{AllocationError, EOF_SENTINEL, Interpreter, RunError};
pub use jumps::JumpTable;
pub use position::locate;
