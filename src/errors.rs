// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every failure in the pipeline is a variant here; nothing is retried and
//! nothing recovers partially. Lexical, syntax and reference errors carry
//! the 1-based source position they were detected at.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedagError {
    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at {line}:{col}")]
    UnexpectedChar { ch: char, line: u32, col: u32 },

    /// Token stream did not match the grammar.
    #[error("expected {expected}, got {found} at {line}:{col}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
        col: u32,
    },

    /// An edge statement names a node id that was never declared.
    #[error("edge '{from}' -> '{to}' references undeclared node '{missing}' at {line}:{col}")]
    UndeclaredNode {
        from: String,
        to: String,
        missing: String,
        line: u32,
        col: u32,
    },

    /// The task graph is not a DAG and therefore unschedulable.
    #[error("cycle detected in task graph involving '{0}'")]
    GraphCycle(String),

    /// No processor could host the task.
    #[error("task '{0}' cannot be scheduled on any processor")]
    Unschedulable(String),

    #[error("processor count must be >= 1 (got {0})")]
    InvalidProcessorCount(usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchedagError>;
