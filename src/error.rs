//! Container-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised by the checked (`try_*`) container operations.
///
/// The panicking operations use the same messages, so a precondition
/// violation reads identically whether it surfaces as a panic or an `Err`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContainerError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("insert position {index} beyond end of list (length {len})")]
    InsertBeyondEnd { index: usize, len: usize },

    #[error("operation on empty container: {0}")]
    Empty(&'static str),

    #[error("cannot build a tree from an empty slice")]
    EmptyInput,

    #[error("node handle does not belong to this container")]
    StaleHandle,
}

pub type ContainerResult<T> = Result<T, ContainerError>;
