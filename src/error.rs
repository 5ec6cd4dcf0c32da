//! Errors reported by lists, views and cursors.

/// The error type for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The index does not address an element (or, for insertion, a gap) of
    /// the list or view.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// The requested sub-range is reversed or extends past the end.
    #[error("range {start}..{end} is invalid for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    /// The list was structurally modified after the view or cursor captured
    /// its version, and was not modified through that view or cursor.
    #[error("list was structurally modified (expected version {expected}, found {found})")]
    ConcurrentModification { expected: u64, found: u64 },
    /// The cursor has no element in the requested direction.
    #[error("no such element")]
    NoSuchElement,
    /// The cursor has not returned an element since it was created or since
    /// its last structural edit.
    #[error("cursor has no current element")]
    NoCurrentElement,
}

/// A specialized `Result` for list operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn error_display() {
        let err = Error::OutOfRange { index: 3, len: 3 };
        assert_eq!(err.to_string(), "index 3 is out of range for length 3");
        let err = Error::ConcurrentModification {
            expected: 4,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "list was structurally modified (expected version 4, found 5)"
        );
        assert_eq!(Error::NoSuchElement.to_string(), "no such element");
    }
}
