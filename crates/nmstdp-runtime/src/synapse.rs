//! A plastic synapse: weight plus the timing rule's trace state

use crate::{
    error::Result,
    timing::{StdpOutcome, SynapseEvent, TimingRule, TraceState},
    weight::AdditiveWeight,
};
use nmstdp_lut::Fixed;

/// One synapse's weight and trace state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlasticSynapse {
    /// Current weight
    pub weight: Fixed,
    /// Timing-rule state
    pub trace: TraceState,
}

impl PlasticSynapse {
    /// Synapse with `weight` and fresh traces
    pub fn new(weight: Fixed) -> Self {
        Self {
            weight,
            trace: TraceState::default(),
        }
    }

    /// Feed one event through `rule` and fold any weight delta in
    ///
    /// Atomic: if the rule rejects the event, neither weight nor traces move.
    pub fn handle<R: TimingRule>(
        &mut self,
        rule: &R,
        weights: &AdditiveWeight,
        event: SynapseEvent,
    ) -> Result<StdpOutcome> {
        let transition = rule.evaluate(&self.trace, event)?;
        self.trace = transition.state;
        if !transition.outcome.weight_delta.is_zero() {
            self.weight = weights.apply(self.weight, transition.outcome.weight_delta);
        }
        Ok(transition.outcome)
    }
}
