/// Default number of cells in the data segment.
pub const DEFAULT_DATA_SIZE: usize = 30_000;

/// Per-run interpreter settings.
///
/// A `RunConfig` is fixed for the duration of one run; the data segment is
/// sized from it before execution starts. All checks default to off, which
/// matches the classic interpreter behavior: arithmetic wraps silently and
/// cursor motion is unchecked.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Number of cells in the data segment. Must be at least 1.
    pub data_size: usize,
    /// Halt with an error instead of letting the data cursor leave the segment.
    pub bounds_check: bool,
    /// Halt with an error instead of wrapping cell arithmetic at the i8 limits.
    pub wrap_check: bool,
    /// Halt with an error on any byte that is neither an instruction nor a
    /// line break.
    pub syntax_check: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_size: DEFAULT_DATA_SIZE,
            bounds_check: false,
            wrap_check: false,
            syntax_check: false,
        }
    }
}
