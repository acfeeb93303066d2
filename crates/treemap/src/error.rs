use thiserror::Error;

/// Errors surfaced by map, view, and cursor operations.
///
/// All of these are reported immediately to the caller; nothing is retried
/// internally, and no operation leaves the tree partially rebalanced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeMapError {
    /// A requested sub-range has its low bound greater than its high bound.
    #[error("range low bound greater than high bound")]
    InvalidRange,

    /// A key fell outside the bounds of a range view, either on insertion
    /// through the view or when narrowing the view further.
    #[error("key out of range for this view")]
    OutOfRange,

    /// An extremum query was made on an empty map or empty view.
    #[error("no such element")]
    NoSuchElement,

    /// A cursor detected that the tree was structurally modified after the
    /// cursor was created. Best-effort and diagnostic only; it must never be
    /// relied upon for correctness.
    #[error("tree structurally modified during cursor traversal")]
    ConcurrentStructuralChange,

    /// Cursor removal was requested with no current element: either nothing
    /// has been yielded yet, or the current element was already removed.
    #[error("cursor has no current element to remove")]
    IllegalIteratorState,
}
