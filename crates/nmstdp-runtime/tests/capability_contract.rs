//! The per-timestep loop drives rules only through the capability contract

use nmstdp_runtime::{
    initialise_all, AdditiveWeight, Capability, Fixed, PlasticSynapse, PlasticityConfig,
    SynapseEvent, ThresholdNone, ThresholdNoneParams, ThresholdNoneState, Time, TimingDependence,
    TimingParams, TimingRule, TraceState,
};

/// Stand-in for an outer loop that is generic over whichever threshold is
/// installed
fn count_spikes<T>(rule: &T, state: &T::State, inputs: &[T::Input]) -> usize
where
    T: Capability<Output = bool>,
    T::Input: Copy,
{
    inputs.iter().filter(|&&input| rule.evaluate(state, input)).count()
}

/// Stand-in for an outer loop that is generic over the timing rule
fn run_synapses<R: TimingRule>(
    rule: &R,
    synapses: &mut [PlasticSynapse],
    events: &[SynapseEvent],
) -> Vec<Fixed> {
    let weights = AdditiveWeight::new(Fixed::ZERO, Fixed::from_int(2)).unwrap();
    let params = TimingParams::default();
    let mut traces: Vec<TraceState> = synapses.iter().map(|s| s.trace).collect();
    initialise_all(rule, &mut traces, &params, 1);
    for (synapse, trace) in synapses.iter_mut().zip(traces) {
        synapse.trace = trace;
        for &event in events {
            synapse.handle(rule, &weights, event).unwrap();
        }
    }
    synapses.iter().map(|s| s.weight).collect()
}

fn causal_then_reward() -> Vec<SynapseEvent> {
    vec![
        SynapseEvent::PreSpike { time: Time::new(10) },
        SynapseEvent::PostSpike { time: Time::new(12) },
        SynapseEvent::Reward {
            time: Time::new(30),
            magnitude: Fixed::ONE,
        },
    ]
}

#[test]
fn threshold_none_never_fires_through_generic_loop() {
    let mut state = ThresholdNoneState;
    let params = ThresholdNoneParams;
    ThresholdNone.initialise(&mut state, &params, 8);
    let inputs = [Fixed::MIN, Fixed::ZERO, Fixed::ONE, Fixed::MAX];
    assert_eq!(count_spikes(&ThresholdNone, &state, &inputs), 0);
}

#[test]
fn neuromodulated_rule_potentiates_rewarded_synapses() {
    let rule = PlasticityConfig::default().timing_rule().unwrap();
    let mut synapses = [PlasticSynapse::new(Fixed::ONE); 3];
    let weights = run_synapses(&rule, &mut synapses, &causal_then_reward());
    assert!(weights.iter().all(|&w| w > Fixed::ONE));
    assert!(weights.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn configured_selection_matches_concrete_rule() {
    let rule = PlasticityConfig::default().timing_rule().unwrap();
    let mut concrete = [PlasticSynapse::new(Fixed::ONE)];
    let mut selected = [PlasticSynapse::new(Fixed::ONE)];

    let expected = run_synapses(&rule, &mut concrete, &causal_then_reward());
    let dependence = TimingDependence::from(rule);
    let actual = run_synapses(&dependence, &mut selected, &causal_then_reward());
    assert_eq!(actual, expected);
    assert_eq!(selected[0].trace, concrete[0].trace);
}

#[test]
fn static_selection_keeps_weights() {
    let mut synapses = [PlasticSynapse::new(Fixed::ONE); 2];
    let weights = run_synapses(&TimingDependence::None, &mut synapses, &causal_then_reward());
    assert_eq!(weights, vec![Fixed::ONE, Fixed::ONE]);
}
