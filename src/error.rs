use std::error::Error;
use std::fmt;

/// Error returned when a cursor movement would cross the sentinel node or
/// reach a nonexistent position.
///
/// Multi-step movements fail part-way: the error records how many steps were
/// taken before the boundary was hit, so callers can tell how far the cursor
/// actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeekError {
    taken: usize,
}

impl SeekError {
    pub(crate) fn new(taken: usize) -> Self {
        Self { taken }
    }

    /// The number of steps taken before the movement stopped.
    pub(crate) fn steps_taken(&self) -> usize {
        self.taken
    }
}

impl fmt::Display for SeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cursor movement out of bounds after {} step(s)",
            self.taken
        )
    }
}

impl Error for SeekError {}
