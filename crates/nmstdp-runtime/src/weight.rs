//! Additive weight dependence

use crate::error::{Result, RuntimeError};
use nmstdp_lut::Fixed;

/// Applies weight deltas additively, clamped to `[w_min, w_max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditiveWeight {
    w_min: Fixed,
    w_max: Fixed,
}

impl Default for AdditiveWeight {
    fn default() -> Self {
        Self {
            w_min: Fixed::ZERO,
            w_max: Fixed::ONE,
        }
    }
}

impl AdditiveWeight {
    /// Create with validation
    pub fn new(w_min: Fixed, w_max: Fixed) -> Result<Self> {
        if w_min > w_max {
            return Err(RuntimeError::invalid_parameter(
                "w_min",
                format!("{} (with w_max={})", w_min, w_max),
                "<= w_max",
            ));
        }
        Ok(Self { w_min, w_max })
    }

    /// Lower weight bound
    pub fn w_min(&self) -> Fixed {
        self.w_min
    }

    /// Upper weight bound
    pub fn w_max(&self) -> Fixed {
        self.w_max
    }

    /// New weight after adding `delta`
    #[inline]
    pub fn apply(&self, weight: Fixed, delta: Fixed) -> Fixed {
        (weight + delta).clamp(self.w_min, self.w_max)
    }
}
