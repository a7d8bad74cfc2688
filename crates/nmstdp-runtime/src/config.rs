//! Plasticity configuration and host-side image generation

use crate::{
    error::{Result, RuntimeError},
    timing::NeuromodulatedTiming,
    weight::AdditiveWeight,
};
use nmstdp_lut::{
    generate::{exp_decay_table, write_tau_tables},
    Fixed, ImageWriter, TauTables, MAX_LUT_SIZE,
};

/// Time constants, table resolution and weight bounds for one population's
/// neuromodulated STDP
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlasticityConfig {
    /// Pre-synaptic trace time constant (ms)
    pub tau_plus_ms: f64,
    /// Post-synaptic trace time constant (ms)
    pub tau_minus_ms: f64,
    /// Eligibility trace time constant (ms)
    pub tau_c_ms: f64,
    /// Dopamine trace time constant (ms)
    pub tau_d_ms: f64,
    /// Simulation timestep (ms)
    pub timestep_ms: f64,
    /// Entries per decay table
    pub lut_size: usize,
    /// Minimum weight
    pub w_min: f64,
    /// Maximum weight
    pub w_max: f64,
}

impl Default for PlasticityConfig {
    fn default() -> Self {
        Self {
            tau_plus_ms: 20.0,   // 20ms potentiation window
            tau_minus_ms: 20.0,  // 20ms depression window
            tau_c_ms: 1000.0,    // 1s eligibility memory
            tau_d_ms: 200.0,     // 200ms dopamine clearance
            timestep_ms: 1.0,
            lut_size: MAX_LUT_SIZE,
            w_min: 0.0,
            w_max: 1.0,
        }
    }
}

impl PlasticityConfig {
    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tau_plus_ms", self.tau_plus_ms),
            ("tau_minus_ms", self.tau_minus_ms),
            ("tau_c_ms", self.tau_c_ms),
            ("tau_d_ms", self.tau_d_ms),
            ("timestep_ms", self.timestep_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RuntimeError::invalid_parameter(name, value.to_string(), "> 0.0"));
            }
        }
        if self.lut_size == 0 || self.lut_size > MAX_LUT_SIZE {
            return Err(RuntimeError::invalid_parameter(
                "lut_size",
                self.lut_size.to_string(),
                format!("1..={}", MAX_LUT_SIZE),
            ));
        }
        for (name, value) in [("w_min", self.w_min), ("w_max", self.w_max)] {
            if !value.is_finite() {
                return Err(RuntimeError::invalid_parameter(name, value.to_string(), "finite"));
            }
        }
        if self.w_min > self.w_max {
            return Err(RuntimeError::invalid_parameter(
                "w_min",
                format!("{} (with w_max={})", self.w_min, self.w_max),
                "<= w_max",
            ));
        }
        Ok(())
    }

    /// Generate the four decay tables
    pub fn tau_tables(&self) -> Result<TauTables> {
        self.validate()?;
        let table = |tau_ms| exp_decay_table(tau_ms, self.timestep_ms, self.lut_size);
        Ok(TauTables {
            tau_plus: table(self.tau_plus_ms)?,
            tau_minus: table(self.tau_minus_ms)?,
            tau_c: table(self.tau_c_ms)?,
            tau_d: table(self.tau_d_ms)?,
        })
    }

    /// Append the four tables to `writer` in image order
    pub fn write_image(&self, writer: &mut ImageWriter) -> Result<()> {
        write_tau_tables(writer, &self.tau_tables()?);
        Ok(())
    }

    /// Image holding only the four tables
    pub fn to_image(&self) -> Result<Vec<u8>> {
        let mut writer = ImageWriter::new();
        self.write_image(&mut writer)?;
        Ok(writer.finish())
    }

    /// Timing rule built directly from the generated tables
    pub fn timing_rule(&self) -> Result<NeuromodulatedTiming> {
        Ok(NeuromodulatedTiming::new(self.tau_tables()?))
    }

    /// Weight bounds in fixed point
    pub fn weight_dependence(&self) -> Result<AdditiveWeight> {
        self.validate()?;
        AdditiveWeight::new(Fixed::from_f64(self.w_min), Fixed::from_f64(self.w_max))
    }
}

#[cfg(feature = "serde")]
impl PlasticityConfig {
    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| RuntimeError::invalid_config(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialise to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RuntimeError::invalid_config(format!("Failed to serialize config: {}", e)))
    }
}
