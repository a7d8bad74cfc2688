//! Error types for decay-table loading

use core::fmt;
use thiserror::Error;

/// Result type for table and image operations
pub type Result<T> = std::result::Result<T, LutError>;

/// Why a table in the image was rejected as malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Declared entry count exceeds the compile-time table capacity
    Oversized {
        /// Entry count found in the size header
        declared: usize,
        /// Maximum number of entries a table can hold
        capacity: usize,
    },
    /// Declared entry count is zero, so there is no saturation floor
    Empty,
    /// Time shift is too wide for a 32-bit timestamp
    ShiftTooWide {
        /// Shift found in the table header
        shift: u16,
    },
    /// Entry is below zero
    NegativeEntry {
        /// Offending entry index
        index: usize,
        /// Raw entry value
        value: i16,
    },
    /// Entry is larger than its predecessor
    Increasing {
        /// Offending entry index
        index: usize,
    },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversized { declared, capacity } => {
                write!(f, "table declares {} entries (capacity {})", declared, capacity)
            }
            Self::Empty => write!(f, "table declares zero entries"),
            Self::ShiftTooWide { shift } => write!(f, "time shift {} exceeds 31", shift),
            Self::NegativeEntry { index, value } => {
                write!(f, "entry {} is negative ({})", index, value)
            }
            Self::Increasing { index } => {
                write!(f, "entry {} is larger than entry {}", index, index - 1)
            }
        }
    }
}

/// Errors raised while building or loading decay tables
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LutError {
    /// Table header or contents violate the table invariants
    #[error("Malformed image: {reason}")]
    MalformedImage {
        /// What was wrong with the table
        reason: MalformedReason,
    },

    /// Image ends before a declared field or table is complete
    #[error("Truncated image at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedImage {
        /// Cursor offset where the read was attempted
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes remaining in the image
        available: usize,
    },
}

impl LutError {
    /// Create a malformed image error
    pub const fn malformed(reason: MalformedReason) -> Self {
        Self::MalformedImage { reason }
    }

    /// Create a truncated image error
    pub const fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedImage {
            offset,
            needed,
            available,
        }
    }
}
