//! Host-side decay table generation
//!
//! Tables are produced once, off the hot path, from a time constant and the
//! simulation timestep. This is the only place floating point is used.

use crate::{
    error::Result,
    fixed::Fixed,
    image::ImageWriter,
    loader::TauTables,
    table::DecayTable,
};

/// Sample `exp(-t * timestep_ms / tau_ms)` for `size` entries, `1 << shift`
/// timesteps apart
///
/// Each entry is quantised to the STDP fixed-point scale and clamped to its
/// predecessor, so the result is monotonically non-increasing even where
/// rounding would otherwise tick upward. Entry 0 is always `Fixed::ONE`.
pub fn exp_decay_entries(tau_ms: f64, timestep_ms: f64, size: usize, shift: u16) -> Vec<i16> {
    let mut entries = Vec::with_capacity(size);
    let mut previous = Fixed::ONE.to_raw();
    let stride = (1u64 << shift) as f64;
    for i in 0..size {
        let t_ms = i as f64 * stride * timestep_ms;
        let raw = Fixed::from_f64((-t_ms / tau_ms).exp())
            .to_raw()
            .clamp(0, previous);
        entries.push(raw as i16);
        previous = raw;
    }
    entries
}

/// Smallest shift that lets `size` entries reach the point where the decay
/// rounds to zero
pub fn fitting_shift(tau_ms: f64, timestep_ms: f64, size: usize) -> u16 {
    // exp(-t/tau) * SCALE < 0.5  <=>  t > tau * ln(2 * SCALE)
    let zero_after_ms = tau_ms * (2.0 * Fixed::SCALE as f64).ln();
    let ticks = (zero_after_ms / timestep_ms).ceil() as u64;
    let mut shift = 0u16;
    while shift < 31 && ((size as u64) << shift) < ticks {
        shift += 1;
    }
    shift
}

/// Build a validated decay table for one time constant
pub fn exp_decay_table(tau_ms: f64, timestep_ms: f64, size: usize) -> Result<DecayTable> {
    let shift = fitting_shift(tau_ms, timestep_ms, size);
    let entries = exp_decay_entries(tau_ms, timestep_ms, size, shift);
    let table = DecayTable::with_shift(&entries, shift)?;
    table.validate()?;
    Ok(table)
}

/// Serialise four tables in the order `load_four` expects
pub fn write_tau_tables(writer: &mut ImageWriter, tables: &TauTables) {
    writer
        .write_table(&tables.tau_plus)
        .write_table(&tables.tau_minus)
        .write_table(&tables.tau_c)
        .write_table(&tables.tau_d);
}
