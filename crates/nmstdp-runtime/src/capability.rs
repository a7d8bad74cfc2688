//! The three-operation shape shared by every interchangeable neuron and
//! synapse sub-behaviour
//!
//! A scheduler holds a concrete rule type chosen at compile time (or a
//! configuration-time enum such as [`crate::TimingDependence`]) and only ever
//! calls these three operations. Generic callers are monomorphised, so an
//! empty rule compiles to nothing.

/// Per-instance strategy module: parameters in, mutable state, pure evaluation
pub trait Capability {
    /// Immutable configuration, loaded once; also the checkpoint target
    type Params;
    /// Mutable runtime state, one per instance
    type State;
    /// Evaluation input
    type Input;
    /// Evaluation result
    type Output;

    /// Set `state` up from `params`; touches nothing outside the instance
    fn initialise(&self, state: &mut Self::State, params: &Self::Params, n_steps_per_timestep: u32);

    /// Write `state` back into `params` for checkpoint or readback
    ///
    /// Must be idempotent: two calls without an intervening event produce
    /// identical params.
    fn save_state(&self, state: &Self::State, params: &mut Self::Params);

    /// Compute the result for `input` without mutating anything
    fn evaluate(&self, state: &Self::State, input: Self::Input) -> Self::Output;
}

/// Initialise a batch of instances that share one parameter set
pub fn initialise_all<C: Capability>(
    rule: &C,
    states: &mut [C::State],
    params: &C::Params,
    n_steps_per_timestep: u32,
) {
    for state in states.iter_mut() {
        rule.initialise(state, params, n_steps_per_timestep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter;

    impl Capability for Counter {
        type Params = u32;
        type State = u32;
        type Input = u32;
        type Output = u32;

        fn initialise(&self, state: &mut u32, params: &u32, n_steps_per_timestep: u32) {
            *state = *params * n_steps_per_timestep;
        }

        fn save_state(&self, state: &u32, params: &mut u32) {
            *params = *state;
        }

        fn evaluate(&self, state: &u32, input: u32) -> u32 {
            state + input
        }
    }

    #[test]
    fn test_initialise_all() {
        let mut states = [0u32; 3];
        initialise_all(&Counter, &mut states, &5, 2);
        assert_eq!(states, [10, 10, 10]);
        assert_eq!(Counter.evaluate(&states[0], 1), 11);
    }
}
