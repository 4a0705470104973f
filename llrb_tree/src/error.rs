use thiserror::Error;

/// Errors reported by the tree engine.
///
/// Only [`TreeError::EmptyTree`] can come out of a mutation; the rest are
/// produced by [`crate::LlrbTree::validate`] when a structural invariant does
/// not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Delete was invoked on a tree holding no items
    #[error("delete called on an empty tree")]
    EmptyTree,
    /// The root node is red
    #[error("root node is red")]
    RedRoot,
    /// A red link leans right
    #[error("red link leans right")]
    RightLeaningRed,
    /// A red node has a red child
    #[error("two consecutive red links")]
    ConsecutiveReds,
    /// Two sibling subtrees disagree on black height
    #[error("unbalanced black height: left {left}, right {right}")]
    UnbalancedBlacks { left: usize, right: usize },
    /// A value is on the wrong side of its ancestor
    #[error("values are out of order")]
    OutOfOrder,
    /// The maintained count does not match the number of nodes
    #[error("count mismatch: expected {expected}, found {actual} nodes")]
    CountMismatch { expected: usize, actual: usize },
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while loading a [`crate::TreeConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
