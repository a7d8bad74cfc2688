//! Threshold that never fires

use crate::{capability::Capability, Fixed};

/// Parameters of [`ThresholdNone`]: there are none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdNoneParams;

/// State of [`ThresholdNone`]: there is none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdNoneState;

/// Threshold rule whose answer is always "below threshold"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdNone;

impl Capability for ThresholdNone {
    type Params = ThresholdNoneParams;
    type State = ThresholdNoneState;
    type Input = Fixed;
    type Output = bool;

    #[inline(always)]
    fn initialise(
        &self,
        _state: &mut ThresholdNoneState,
        _params: &ThresholdNoneParams,
        _n_steps_per_timestep: u32,
    ) {
    }

    #[inline(always)]
    fn save_state(&self, _state: &ThresholdNoneState, _params: &mut ThresholdNoneParams) {}

    #[inline(always)]
    fn evaluate(&self, _state: &ThresholdNoneState, _value: Fixed) -> bool {
        false
    }
}
