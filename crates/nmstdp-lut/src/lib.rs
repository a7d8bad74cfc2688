//! Fixed-point exponential decay tables for neuromodulated STDP
//!
//! This crate owns everything the timing rule needs before the first
//! timestep runs: the fixed-point scale, the decay tables that replace
//! `exp(-t/tau)` on the hot path, and the loader that lifts four of those
//! tables out of a flat configuration image.

#![deny(missing_docs)]
#![warn(clippy::all)]

use core::fmt;

/// Simulation time in whole timesteps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(pub u32);

impl Time {
    /// Zero time constant
    pub const ZERO: Self = Self(0);

    /// Create a new time value
    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Get the raw timestep count
    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Timesteps from `earlier` to `self`, or `None` if `earlier` is later
    pub const fn elapsed_since(&self, earlier: Time) -> Option<u32> {
        self.0.checked_sub(earlier.0)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}

// Core modules
pub mod error;
pub mod fixed;
pub mod generate;
pub mod image;
pub mod loader;
pub mod table;

// Re-export essential types
pub use error::{LutError, MalformedReason, Result};
pub use fixed::Fixed;
pub use image::{ImageReader, ImageWriter, WORD_BYTES};
pub use loader::{load_four, LoadedTables, TauTables};
pub use table::{DecayTable, MAX_LUT_SIZE};

/// Bytes in a table header (`size: u16`, `shift: u16`)
pub const TABLE_HEADER_BYTES: usize = 4;
