use std::collections::TryReserveError;
use std::io::{self, Read, Write};

use crate::brackets::{ScanDirection, match_bracket};
use crate::config::RunConfig;
use crate::jumps::JumpTable;

/// Value stored by `,` when the input stream is exhausted.
///
/// Fixed at `-1`, the classic result of assigning `getchar()`'s end-of-file
/// marker straight into a signed 8-bit cell.
pub const EOF_SENTINEL: i8 = -1;

/// Errors that halt a running program.
///
/// Every variant records the offset of the instruction that was executing
/// (`ip`) and the value of the current data cell (`cell`) at the moment of
/// failure, which is what a caller needs to build a positional diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// `>` would move the data cursor past the last cell (bounds check on).
    #[error("Indexing above the data segment")]
    IndexAboveSegment { ip: usize, cell: i8 },

    /// `<` would move the data cursor below the first cell (bounds check on).
    #[error("Indexing below the data segment")]
    IndexBelowSegment { ip: usize, cell: i8 },

    /// `+` on a cell already at `i8::MAX` (wrap check on).
    #[error("Data cell value wraps over")]
    WrapOver { ip: usize, cell: i8 },

    /// `-` on a cell already at `i8::MIN` (wrap check on).
    #[error("Data cell value wraps under")]
    WrapUnder { ip: usize, cell: i8 },

    /// A `[` that needed its partner and has none. Always checked.
    #[error("No match for opening bracket")]
    NoMatchForOpenBracket { ip: usize, cell: i8 },

    /// A `]` that needed its partner and has none. Always checked.
    #[error("No match for closing bracket")]
    NoMatchForCloseBracket { ip: usize, cell: i8 },

    /// A byte outside the instruction set and allow-list (syntax check on).
    #[error("Unknown instruction")]
    UnknownInstruction { ip: usize, byte: u8, cell: i8 },
}

impl RunError {
    /// Offset of the instruction that raised the error.
    pub fn ip(&self) -> usize {
        match *self {
            RunError::IndexAboveSegment { ip, .. }
            | RunError::IndexBelowSegment { ip, .. }
            | RunError::WrapOver { ip, .. }
            | RunError::WrapUnder { ip, .. }
            | RunError::NoMatchForOpenBracket { ip, .. }
            | RunError::NoMatchForCloseBracket { ip, .. }
            | RunError::UnknownInstruction { ip, .. } => ip,
        }
    }

    /// Value of the current data cell when the error was raised.
    pub fn cell(&self) -> i8 {
        match *self {
            RunError::IndexAboveSegment { cell, .. }
            | RunError::IndexBelowSegment { cell, .. }
            | RunError::WrapOver { cell, .. }
            | RunError::WrapUnder { cell, .. }
            | RunError::NoMatchForOpenBracket { cell, .. }
            | RunError::NoMatchForCloseBracket { cell, .. }
            | RunError::UnknownInstruction { cell, .. } => cell,
        }
    }
}

/// The data segment could not be allocated.
#[derive(Debug, thiserror::Error)]
#[error("Memory allocation failed for {requested} data cells")]
pub struct AllocationError {
    requested: usize,
    #[source]
    source: TryReserveError,
}

/// A direct Brainfuck interpreter.
///
/// The interpreter owns the instruction buffer and a zero-initialized tape of
/// signed 8-bit cells, and executes the buffer in place: loops are resolved
/// by rescanning for the matching bracket at dispatch time rather than
/// through a precomputed table (see [`run_prescanned`](Self::run_prescanned)
/// for the opt-in alternative). Which boundary conditions halt the program is
/// controlled by the [`RunConfig`] given at construction.
///
/// The data cursor is a signed offset: with bounds checking disabled it may
/// leave the segment in either direction, and a cell access while outside
/// panics with an index error. Enabling the bounds check makes that state
/// unreachable.
pub struct Interpreter {
    code: Vec<u8>,
    data: Vec<i8>,
    ip: usize,
    dp: isize,
    config: RunConfig,
    // Optional hooks so an embedder can redirect `.` and `,`.
    output_sink: Option<Box<dyn Fn(&[u8]) + Send + Sync>>,
    input_provider: Option<Box<dyn Fn() -> Option<u8> + Send + Sync>>,
}

impl Interpreter {
    /// Create an interpreter for `code`, allocating the data segment sized
    /// by `config`.
    pub fn new(code: Vec<u8>, config: RunConfig) -> Result<Self, AllocationError> {
        let mut data: Vec<i8> = Vec::new();
        data.try_reserve_exact(config.data_size)
            .map_err(|source| AllocationError {
                requested: config.data_size,
                source,
            })?;
        data.resize(config.data_size, 0);

        Ok(Self {
            code,
            data,
            ip: 0,
            dp: 0,
            config,
            output_sink: None,
            input_provider: None,
        })
    }

    /// The instruction buffer, e.g. for positional error reporting.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Redirect `.` to `sink` instead of stdout. The sink receives one byte
    /// per output instruction.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Redirect `,` to `provider` instead of stdin. Returning `None` signals
    /// end of input and stores [`EOF_SENTINEL`] in the current cell.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: Fn() -> Option<u8> + Send + Sync + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    /// Execute the program until the end of the buffer or the first error.
    ///
    /// On failure the instruction cursor is left on the offending
    /// instruction, and the returned [`RunError`] carries its offset together
    /// with the current cell value.
    pub fn run(&mut self) -> Result<(), RunError> {
        self.execute(None)
    }

    /// Execute with bracket targets precomputed by [`JumpTable::build`].
    ///
    /// Loop jumps become O(1) at the cost of an upfront scan that also
    /// rejects unmatched brackets the default [`run`](Self::run) would only
    /// notice when it actually resolves them.
    pub fn run_prescanned(&mut self) -> Result<(), RunError> {
        let jumps = JumpTable::build(&self.code)?;
        self.execute(Some(&jumps))
    }

    /// Shared dispatch loop for both run modes.
    fn execute(&mut self, jumps: Option<&JumpTable>) -> Result<(), RunError> {
        while self.ip < self.code.len() {
            match self.code[self.ip] {
                b'>' => {
                    if self.config.bounds_check && self.dp + 1 == self.data.len() as isize {
                        return Err(RunError::IndexAboveSegment {
                            ip: self.ip,
                            cell: self.cell(),
                        });
                    }
                    self.dp += 1;
                }
                b'<' => {
                    if self.config.bounds_check && self.dp == 0 {
                        return Err(RunError::IndexBelowSegment {
                            ip: self.ip,
                            cell: self.cell(),
                        });
                    }
                    self.dp -= 1;
                }
                b'+' => {
                    if self.config.wrap_check && self.cell() == i8::MAX {
                        return Err(RunError::WrapOver {
                            ip: self.ip,
                            cell: self.cell(),
                        });
                    }
                    self.set_cell(self.cell().wrapping_add(1));
                }
                b'-' => {
                    if self.config.wrap_check && self.cell() == i8::MIN {
                        return Err(RunError::WrapUnder {
                            ip: self.ip,
                            cell: self.cell(),
                        });
                    }
                    self.set_cell(self.cell().wrapping_sub(1));
                }
                b'[' => {
                    // Zero guard cell: skip the loop body. Otherwise fall
                    // through into it.
                    if self.cell() == 0 {
                        let target = self.resolve(jumps, ScanDirection::Forward);
                        self.ip = target.ok_or(RunError::NoMatchForOpenBracket {
                            ip: self.ip,
                            cell: self.cell(),
                        })?;
                    }
                }
                b']' => {
                    // Nonzero guard cell: back to the loop start. The +1
                    // below then moves past the '[' without re-testing it.
                    if self.cell() != 0 {
                        let target = self.resolve(jumps, ScanDirection::Backward);
                        self.ip = target.ok_or(RunError::NoMatchForCloseBracket {
                            ip: self.ip,
                            cell: self.cell(),
                        })?;
                    }
                }
                b'.' => self.write_cell(),
                b',' => self.read_cell(),
                byte => {
                    if self.config.syntax_check && byte != b'\n' {
                        return Err(RunError::UnknownInstruction {
                            ip: self.ip,
                            byte,
                            cell: self.cell(),
                        });
                    }
                }
            }

            self.ip += 1;
        }

        Ok(())
    }

    fn resolve(&self, jumps: Option<&JumpTable>, direction: ScanDirection) -> Option<usize> {
        match jumps {
            Some(table) => table.target(self.ip),
            None => match_bracket(&self.code, self.ip, direction),
        }
    }

    fn cell(&self) -> i8 {
        self.data[self.dp as usize]
    }

    fn set_cell(&mut self, value: i8) {
        let index = self.dp as usize;
        self.data[index] = value;
    }

    fn write_cell(&self) {
        let byte = [self.cell() as u8];
        if let Some(sink) = self.output_sink.as_ref() {
            (sink)(&byte);
        } else {
            let _ = io::stdout().write_all(&byte);
        }
    }

    fn read_cell(&mut self) {
        let value = if let Some(provider) = self.input_provider.as_ref() {
            (provider)()
        } else {
            let mut buf = [0u8; 1];
            // A read error is indistinguishable from end of input here.
            match io::stdin().read(&mut buf) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(buf[0]),
            }
        };
        self.set_cell(value.map_or(EOF_SENTINEL, |byte| byte as i8));
    }
}
