//! Neuromodulated STDP timing rule
//!
//! Spike pairings do not change the weight directly. Each pairing is folded
//! into a slow eligibility trace, and only a reward signal converts the
//! eligibility that is still left into a weight change. Every decay factor
//! comes from a precomputed table; nothing here evaluates an exponential.
//!
//! Traces hold their value as of their last update time and are decayed
//! lazily when read, so an event touches a fixed number of fields no matter
//! how long the synapse was idle. The eligibility trace is only rewritten when
//! a pairing changes it, and its timestamp then advances by whole `tau_c`
//! table buckets; the remainder carries into the next read so frequent events
//! cannot stall the decay.

use crate::{
    capability::Capability,
    error::{Result, RuntimeError},
};
use log::info;
use nmstdp_lut::{load_four, DecayTable, Fixed, ImageReader, TauTables, Time};

/// Bytes in an encoded [`TraceState`] checkpoint
pub const TRACE_STATE_BYTES: usize = 36;

/// Event delivered to one synapse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynapseEvent {
    /// Pre-synaptic neuron fired
    PreSpike {
        /// Timestep of the spike
        time: Time,
    },
    /// Post-synaptic neuron fired
    PostSpike {
        /// Timestep of the spike
        time: Time,
    },
    /// Dopamine pulse
    Reward {
        /// Timestep of the pulse
        time: Time,
        /// Reward concentration; negative values punish
        magnitude: Fixed,
    },
}

impl SynapseEvent {
    /// Timestep the event carries
    pub const fn time(&self) -> Time {
        match *self {
            Self::PreSpike { time } | Self::PostSpike { time } | Self::Reward { time, .. } => time,
        }
    }
}

/// Per-synapse plasticity state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceState {
    /// Time of the last accepted event of any kind
    pub last_event: Time,
    /// Time of the last pre-synaptic spike
    pub pre_time: Time,
    /// Pre-synaptic trace at `pre_time`
    pub pre_trace: Fixed,
    /// Time of the last post-synaptic spike
    pub post_time: Time,
    /// Post-synaptic trace at `post_time`
    pub post_trace: Fixed,
    /// Time `eligibility` is anchored at, a whole number of `tau_c` buckets
    /// behind the last pairing
    pub eligibility_time: Time,
    /// Eligibility ("concentration") trace at `eligibility_time`
    pub eligibility: Fixed,
    /// Time of the last reward
    pub reward_time: Time,
    /// Reward concentration delivered at `reward_time`
    pub dopamine: Fixed,
}

impl TraceState {
    /// Little-endian checkpoint of every field, in declaration order
    pub fn encode(&self) -> [u8; TRACE_STATE_BYTES] {
        let words = [
            self.last_event.ticks(),
            self.pre_time.ticks(),
            self.pre_trace.to_raw() as u32,
            self.post_time.ticks(),
            self.post_trace.to_raw() as u32,
            self.eligibility_time.ticks(),
            self.eligibility.to_raw() as u32,
            self.reward_time.ticks(),
            self.dopamine.to_raw() as u32,
        ];
        let mut bytes = [0u8; TRACE_STATE_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Inverse of [`TraceState::encode`]
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ImageReader::new(bytes);
        let mut word = || reader.read_u32();
        Ok(Self {
            last_event: Time::new(word()?),
            pre_time: Time::new(word()?),
            pre_trace: Fixed::from_raw(word()? as i32),
            post_time: Time::new(word()?),
            post_trace: Fixed::from_raw(word()? as i32),
            eligibility_time: Time::new(word()?),
            eligibility: Fixed::from_raw(word()? as i32),
            reward_time: Time::new(word()?),
            dopamine: Fixed::from_raw(word()? as i32),
        })
    }
}

/// What a single event did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdpOutcome {
    /// Magnitude added to the eligibility trace by a post-after-pre pairing
    pub potentiation: Fixed,
    /// Magnitude removed from the eligibility trace by a pre-after-post pairing
    pub depression: Fixed,
    /// Weight change to apply; non-zero only for rewards
    pub weight_delta: Fixed,
}

/// Result of evaluating an event against a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the event
    pub state: TraceState,
    /// Contributions produced by the event
    pub outcome: StdpOutcome,
}

/// Parameters for a timing rule instance: the initial trace state, which is
/// also where [`Capability::save_state`] checkpoints to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingParams {
    /// State a freshly initialised synapse starts from
    pub initial: TraceState,
}

impl TimingParams {
    /// Serialised checkpoint
    pub fn encode(&self) -> [u8; TRACE_STATE_BYTES] {
        self.initial.encode()
    }
}

/// Izhikevich-style neuromodulated STDP with eligibility and reward traces
///
/// Owns its four decay tables; several independently configured instances
/// can coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeuromodulatedTiming {
    tables: TauTables,
}

impl NeuromodulatedTiming {
    /// Create a rule over already-loaded tables
    pub fn new(tables: TauTables) -> Self {
        Self { tables }
    }

    /// Load the four tables from `image` at `offset`
    ///
    /// Returns the rule and the offset immediately after the `tau_d` table.
    pub fn from_image(image: &[u8], offset: usize) -> Result<(Self, usize)> {
        info!("Timing rule initialisation starting");
        info!("STDP neuromodulated Izhikevich rule");

        let loaded = load_four(image, offset)?;

        info!("Timing rule initialisation completed successfully");
        Ok((Self::new(loaded.tables), loaded.next_offset))
    }

    /// The decay tables in use
    pub fn tables(&self) -> &TauTables {
        &self.tables
    }

    /// Reward concentration left at `time`
    ///
    /// A `time` before the last reward reads as fully decayed: the table floor.
    pub fn dopamine_level(&self, state: &TraceState, time: Time) -> Fixed {
        let since = time.elapsed_since(state.reward_time).unwrap_or(u32::MAX);
        state.dopamine * self.tables.tau_d.lookup(since)
    }

    /// Eligibility trace as it would read at `time`
    ///
    /// A `time` before the anchor reads as fully decayed: the table floor.
    pub fn eligibility_at(&self, state: &TraceState, time: Time) -> Fixed {
        let since = time.elapsed_since(state.eligibility_time).unwrap_or(u32::MAX);
        state.eligibility * self.tables.tau_c.lookup(since)
    }

    /// Compute the effect of `event` on `state` without changing it
    pub fn transition(&self, state: &TraceState, event: SynapseEvent) -> Result<Transition> {
        let time = event.time();
        if time < state.last_event {
            return Err(RuntimeError::NonMonotonicTime {
                last: state.last_event,
                got: time,
            });
        }

        let mut next = *state;
        let mut outcome = StdpOutcome::default();
        let aged = self.eligibility_at(state, time);
        next.last_event = time;

        match event {
            SynapseEvent::PreSpike { .. } => {
                if let Some(depression) =
                    pair(state.post_trace, state.post_time, time, &self.tables.tau_minus)
                {
                    self.rebase_eligibility(&mut next, aged, aged - depression, time);
                    outcome.depression = depression;
                }
                next.pre_trace = Fixed::ONE;
                next.pre_time = time;
            }
            SynapseEvent::PostSpike { .. } => {
                if let Some(potentiation) =
                    pair(state.pre_trace, state.pre_time, time, &self.tables.tau_plus)
                {
                    self.rebase_eligibility(&mut next, aged, aged + potentiation, time);
                    outcome.potentiation = potentiation;
                }
                next.post_trace = Fixed::ONE;
                next.post_time = time;
            }
            SynapseEvent::Reward { magnitude, .. } => {
                let since = time.elapsed_since(state.reward_time).unwrap_or(u32::MAX);
                outcome.weight_delta = aged * magnitude * self.tables.tau_d.lookup(since);
                next.reward_time = time;
                next.dopamine = magnitude;
            }
        }

        Ok(Transition {
            state: next,
            outcome,
        })
    }

    /// Store a new eligibility value for `time`
    ///
    /// The anchor moves forward only by the whole `tau_c` buckets that `aged`
    /// already accounts for. A trace that had fully decayed restarts at `time`.
    fn rebase_eligibility(&self, next: &mut TraceState, aged: Fixed, value: Fixed, time: Time) {
        next.eligibility = value;
        if aged.is_zero() {
            next.eligibility_time = time;
            return;
        }
        let since = time.elapsed_since(next.eligibility_time).unwrap_or(0);
        let shift = self.tables.tau_c.shift();
        let consumed = (since >> shift) << shift;
        next.eligibility_time = Time::new(next.eligibility_time.ticks() + consumed);
    }

    /// Apply `event` to `state`; on error `state` is left untouched
    pub fn process(&self, state: &mut TraceState, event: SynapseEvent) -> Result<StdpOutcome> {
        let transition = self.transition(state, event)?;
        *state = transition.state;
        Ok(transition.outcome)
    }
}

/// Partner trace decayed to `now`, if it is live and inside the table horizon
#[inline]
fn pair(trace: Fixed, since: Time, now: Time, table: &DecayTable) -> Option<Fixed> {
    if trace.is_zero() {
        return None;
    }
    let dt = now.elapsed_since(since)?;
    if !table.covers(dt) {
        return None;
    }
    Some(trace * table.lookup(dt))
}

impl Capability for NeuromodulatedTiming {
    type Params = TimingParams;
    type State = TraceState;
    type Input = SynapseEvent;
    type Output = Result<Transition>;

    fn initialise(
        &self,
        state: &mut TraceState,
        params: &TimingParams,
        _n_steps_per_timestep: u32,
    ) {
        *state = params.initial;
    }

    fn save_state(&self, state: &TraceState, params: &mut TimingParams) {
        params.initial = *state;
    }

    fn evaluate(&self, state: &TraceState, input: SynapseEvent) -> Result<Transition> {
        self.transition(state, input)
    }
}

/// Timing rule that never produces plasticity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTiming;

impl Capability for NoTiming {
    type Params = TimingParams;
    type State = TraceState;
    type Input = SynapseEvent;
    type Output = Result<Transition>;

    #[inline(always)]
    fn initialise(
        &self,
        state: &mut TraceState,
        params: &TimingParams,
        _n_steps_per_timestep: u32,
    ) {
        *state = params.initial;
    }

    #[inline(always)]
    fn save_state(&self, state: &TraceState, params: &mut TimingParams) {
        params.initial = *state;
    }

    #[inline(always)]
    fn evaluate(&self, state: &TraceState, _input: SynapseEvent) -> Result<Transition> {
        Ok(Transition {
            state: *state,
            outcome: StdpOutcome::default(),
        })
    }
}

/// Anything that can drive a synapse's [`TraceState`] from events
pub trait TimingRule:
    Capability<
    Params = TimingParams,
    State = TraceState,
    Input = SynapseEvent,
    Output = Result<Transition>,
>
{
}

impl<T> TimingRule for T where
    T: Capability<
        Params = TimingParams,
        State = TraceState,
        Input = SynapseEvent,
        Output = Result<Transition>,
    >
{
}
