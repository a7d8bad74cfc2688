//! Exponential decay lookup table

use crate::{
    error::{LutError, MalformedReason, Result},
    fixed::Fixed,
};
use heapless::Vec;

/// Maximum number of entries a single decay table can hold
pub const MAX_LUT_SIZE: usize = 256;

/// Precomputed `exp(-t/tau)` samples on the STDP fixed-point scale
///
/// Entry `i` covers elapsed times `[i << shift, (i + 1) << shift)`. Times at
/// or past the horizon read the last entry, the saturation floor; running
/// off the end of the table means "fully decayed", never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecayTable {
    shift: u16,
    entries: Vec<i16, MAX_LUT_SIZE>,
}

impl DecayTable {
    /// Copy `entries` verbatim into a table indexed at full timestep resolution
    pub fn build(entries: &[i16]) -> Result<Self> {
        Self::with_shift(entries, 0)
    }

    /// Copy `entries` verbatim into a table whose index is `elapsed >> shift`
    pub fn with_shift(entries: &[i16], shift: u16) -> Result<Self> {
        if entries.is_empty() {
            return Err(LutError::malformed(MalformedReason::Empty));
        }
        if shift >= 32 {
            return Err(LutError::malformed(MalformedReason::ShiftTooWide { shift }));
        }
        let entries = Vec::from_slice(entries).map_err(|_| {
            LutError::malformed(MalformedReason::Oversized {
                declared: entries.len(),
                capacity: MAX_LUT_SIZE,
            })
        })?;
        Ok(Self { shift, entries })
    }

    /// Check that entries are non-negative and non-increasing
    pub fn validate(&self) -> Result<()> {
        let mut previous = i16::MAX;
        for (index, &value) in self.entries.iter().enumerate() {
            if value < 0 {
                return Err(LutError::malformed(MalformedReason::NegativeEntry {
                    index,
                    value,
                }));
            }
            if value > previous {
                return Err(LutError::malformed(MalformedReason::Increasing { index }));
            }
            previous = value;
        }
        Ok(())
    }

    /// Decay factor after `elapsed` timesteps
    #[inline]
    pub fn lookup(&self, elapsed: u32) -> Fixed {
        let index = (elapsed >> self.shift) as usize;
        let raw = match self.entries.get(index) {
            Some(&entry) => entry,
            None => self.floor_raw(),
        };
        Fixed::from_lut_entry(raw)
    }

    /// True when `elapsed` falls inside the table rather than on the floor
    #[inline]
    pub fn covers(&self, elapsed: u32) -> bool {
        ((elapsed >> self.shift) as usize) < self.entries.len()
    }

    /// Number of timesteps before lookups saturate
    pub fn horizon(&self) -> u64 {
        (self.entries.len() as u64) << self.shift
    }

    /// Decay factor at zero elapsed time
    pub fn peak(&self) -> Fixed {
        self.lookup(0)
    }

    /// Value returned for every time past the horizon
    pub fn floor(&self) -> Fixed {
        Fixed::from_lut_entry(self.floor_raw())
    }

    /// Entry count
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Time-index shift
    pub fn shift(&self) -> u16 {
        self.shift
    }

    /// Raw entries in index order
    pub fn entries(&self) -> &[i16] {
        &self.entries
    }

    #[inline(always)]
    fn floor_raw(&self) -> i16 {
        // Construction rejects empty tables, so `last` always exists.
        self.entries.last().copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DecayTable {
        DecayTable::build(&[2048, 1500, 900, 10]).unwrap()
    }

    #[test]
    fn test_lookup_inside_table() {
        let table = sample();
        assert_eq!(table.lookup(0), Fixed::ONE);
        assert_eq!(table.lookup(2).to_raw(), 900);
        assert_eq!(table.peak(), Fixed::ONE);
    }

    #[test]
    fn test_lookup_saturates_to_floor() {
        let table = sample();
        assert_eq!(table.lookup(3).to_raw(), 10);
        assert_eq!(table.lookup(4).to_raw(), 10);
        assert_eq!(table.lookup(u32::MAX).to_raw(), 10);
        assert!(table.covers(3));
        assert!(!table.covers(4));
    }

    #[test]
    fn test_shifted_lookup() {
        let table = DecayTable::with_shift(&[2048, 1024, 0], 2).unwrap();
        assert_eq!(table.lookup(3), Fixed::ONE);
        assert_eq!(table.lookup(4).to_raw(), 1024);
        assert_eq!(table.lookup(11), Fixed::ZERO);
        assert_eq!(table.horizon(), 12);
        assert!(table.covers(11));
        assert!(!table.covers(12));
    }

    #[test]
    fn test_build_rejects_oversized() {
        let raw = [0i16; MAX_LUT_SIZE + 1];
        let err = DecayTable::build(&raw).unwrap_err();
        assert_eq!(
            err,
            LutError::malformed(MalformedReason::Oversized {
                declared: MAX_LUT_SIZE + 1,
                capacity: MAX_LUT_SIZE,
            })
        );
        assert!(DecayTable::build(&[0i16; MAX_LUT_SIZE]).is_ok());
    }

    #[test]
    fn test_build_rejects_empty_and_wide_shift() {
        assert_eq!(
            DecayTable::build(&[]).unwrap_err(),
            LutError::malformed(MalformedReason::Empty)
        );
        assert!(matches!(
            DecayTable::with_shift(&[1], 32).unwrap_err(),
            LutError::MalformedImage {
                reason: MalformedReason::ShiftTooWide { shift: 32 }
            }
        ));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let rising = DecayTable::build(&[2048, 100, 200]).unwrap();
        assert_eq!(
            rising.validate().unwrap_err(),
            LutError::malformed(MalformedReason::Increasing { index: 2 })
        );

        let negative = DecayTable::build(&[2048, -1]).unwrap();
        assert!(matches!(
            negative.validate().unwrap_err(),
            LutError::MalformedImage {
                reason: MalformedReason::NegativeEntry { index: 1, value: -1 }
            }
        ));
    }
}
