//! Reward-gated STDP for a resource-constrained neuromorphic core
//!
//! Pre/post spike pairings are read off precomputed decay tables and folded
//! into a per-synapse eligibility trace; a later dopamine pulse turns that
//! eligibility into a weight change. Rules plug into the per-timestep loop
//! through the three-operation [`Capability`] contract, so the loop never
//! needs to know which rule is installed.

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export essential types from the table crate
pub use nmstdp_lut::{
    load_four, DecayTable, Fixed, LutError, TauTables, Time, MAX_LUT_SIZE,
};

// Core modules
pub mod capability;
pub mod config;
pub mod dependence;
pub mod error;
pub mod synapse;
pub mod threshold;
pub mod timing;
pub mod weight;

// Re-export essential types
pub use capability::{initialise_all, Capability};
pub use config::PlasticityConfig;
pub use dependence::TimingDependence;
pub use error::{Result, RuntimeError};
pub use synapse::PlasticSynapse;
pub use threshold::{ThresholdNone, ThresholdNoneParams, ThresholdNoneState};
pub use timing::{
    NeuromodulatedTiming, NoTiming, StdpOutcome, SynapseEvent, TimingParams, TimingRule,
    TraceState, Transition, TRACE_STATE_BYTES,
};
pub use weight::AdditiveWeight;
