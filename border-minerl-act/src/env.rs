//! Environment whose actions are raw policy outputs.
use crate::{ActionCodec, MinerlAction, RawAction};
use anyhow::Result;
use log::{debug, trace};
use std::sync::Arc;

/// Result of applying an action to a [`MinerlTransport`].
#[derive(Debug, Clone)]
pub struct TransportStep<O, I> {
    /// Observation after the action.
    pub obs: O,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode ended.
    pub is_done: bool,

    /// Information defined by the transport.
    pub info: I,
}

/// Applies structured actions to a simulator, e.g., a MineRL process.
pub trait MinerlTransport {
    /// Observation of the simulator.
    type Obs;

    /// Additional information returned at every step.
    type Info;

    /// Resets the simulator and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Applies an action.
    fn apply(&mut self, act: &MinerlAction) -> Result<TransportStep<Self::Obs, Self::Info>>;
}

/// Wraps a [`MinerlTransport`] so that it takes [`RawAction`]s.
///
/// The codec is shared, so the environments of a vectorized batch can use
/// the same instance.
pub struct MinerlActEnv<T: MinerlTransport> {
    codec: Arc<ActionCodec>,
    transport: T,
    count_steps: usize,
    max_steps: Option<usize>,
}

impl<T: MinerlTransport> MinerlActEnv<T> {
    /// Creates an environment.
    pub fn new(codec: Arc<ActionCodec>, transport: T) -> Self {
        Self {
            codec,
            transport,
            count_steps: 0,
            max_steps: None,
        }
    }

    /// Set the maximum number of steps in an episode.
    pub fn max_steps(mut self, v: Option<usize>) -> Self {
        self.max_steps = v;
        self
    }

    /// The codec used to decode actions.
    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }

    /// Number of steps since the last reset.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    /// Returns the wrapped transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Resets the environment.
    pub fn reset(&mut self) -> Result<T::Obs> {
        trace!("MinerlActEnv::reset()");
        self.count_steps = 0;
        self.transport.reset()
    }

    /// Decodes `raw` and applies it to the transport.
    ///
    /// An invalid raw action fails before the transport is called.
    /// The episode is truncated when `max_steps` is reached.
    pub fn step(&mut self, raw: &RawAction) -> Result<TransportStep<T::Obs, T::Info>> {
        let act = self.codec.decode_action(raw)?;
        trace!("{:?} -> {:?}", raw, act);

        let mut step = self.transport.apply(&act)?;
        self.count_steps += 1;

        if let Some(max_steps) = self.max_steps {
            if self.count_steps >= max_steps && !step.is_done {
                debug!("Truncate episode at {} steps", self.count_steps);
                step.is_done = true;
            }
        }

        Ok(step)
    }
}
