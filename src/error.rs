use std::collections::TryReserveError;

/// Errors reported by the fallible tree operations.
///
/// Lookups never fail: a missing key is an end cursor or [`None`], not an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("failed to allocate room for tree nodes: {0}")]
    Alloc(#[from] TryReserveError),
}
