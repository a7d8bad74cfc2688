//! Configuration-time choice of timing rule

use crate::{
    capability::Capability,
    error::Result,
    timing::{NeuromodulatedTiming, NoTiming, SynapseEvent, TimingParams, TraceState, Transition},
};

/// Timing rule selected when the population is configured
///
/// Callers that know the rule at compile time should use the concrete type
/// directly; this enum is for images or configs that name the rule at load
/// time. `None` is the default and never touches the tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimingDependence {
    /// Static synapses
    #[default]
    None,
    /// Reward-gated STDP
    Neuromodulated(NeuromodulatedTiming),
}

impl TimingDependence {
    /// Short rule name for logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Neuromodulated(_) => "izhikevich-neuromodulation",
        }
    }

    /// True when events can change the weight
    pub fn is_plastic(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<NeuromodulatedTiming> for TimingDependence {
    fn from(rule: NeuromodulatedTiming) -> Self {
        Self::Neuromodulated(rule)
    }
}

impl Capability for TimingDependence {
    type Params = TimingParams;
    type State = TraceState;
    type Input = SynapseEvent;
    type Output = Result<Transition>;

    fn initialise(&self, state: &mut TraceState, params: &TimingParams, n_steps_per_timestep: u32) {
        match self {
            Self::None => NoTiming.initialise(state, params, n_steps_per_timestep),
            Self::Neuromodulated(rule) => rule.initialise(state, params, n_steps_per_timestep),
        }
    }

    fn save_state(&self, state: &TraceState, params: &mut TimingParams) {
        match self {
            Self::None => NoTiming.save_state(state, params),
            Self::Neuromodulated(rule) => rule.save_state(state, params),
        }
    }

    fn evaluate(&self, state: &TraceState, input: SynapseEvent) -> Result<Transition> {
        match self {
            Self::None => NoTiming.evaluate(state, input),
            Self::Neuromodulated(rule) => rule.evaluate(state, input),
        }
    }
}
