use thiserror::Error;

/// Raised by indexed lookup when the key is not in the tree.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid key")]
pub struct KeyError;
