//! Activation patterns built from single pin pulses.
//!
//! # Patterns
//!
//! - **lock**: one 0.25s pulse
//! - **unlock**: 0.25s pulse, 0.1s gap, 0.25s pulse
//! - **engine**: one 5s pulse
//!
//! Each pattern holds the actuator session from its first pulse to its last,
//! so two patterns never interleave on the line. Failures are not retried.

use crate::{
    models::action::Action,
    services::actuator::{ActuationError, PinActuator},
};
use std::sync::Arc;
use std::time::Duration;

/// Pulse and gap lengths for the three patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Pulse used by lock and by each half of unlock
    pub short_pulse: Duration,
    /// Gap between the two unlock pulses
    pub unlock_gap: Duration,
    /// Engine start pulse
    pub engine_pulse: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            short_pulse: Duration::from_millis(250),
            unlock_gap: Duration::from_millis(100),
            engine_pulse: Duration::from_secs(5),
        }
    }
}

#[derive(Clone)]
pub struct Sequencer {
    actuator: Arc<PinActuator>,
    timings: Timings,
}

impl Sequencer {
    pub fn new(actuator: Arc<PinActuator>) -> Self {
        Self::with_timings(actuator, Timings::default())
    }

    pub fn with_timings(actuator: Arc<PinActuator>, timings: Timings) -> Self {
        Self { actuator, timings }
    }

    pub fn actuator(&self) -> &Arc<PinActuator> {
        &self.actuator
    }

    /// Run the pattern for `action`. Blocks until the line is LOW again.
    pub fn run(&self, action: Action) -> Result<(), ActuationError> {
        match action {
            Action::Lock => self.lock(),
            Action::Unlock => self.unlock(),
            Action::Engine => self.engine(),
        }
    }

    pub fn lock(&self) -> Result<(), ActuationError> {
        self.actuator.activate(self.timings.short_pulse)
    }

    pub fn unlock(&self) -> Result<(), ActuationError> {
        let mut session = self.actuator.session();
        // Fail fast: no second pulse after a failed first one
        session.activate(self.timings.short_pulse)?;
        session.pause(self.timings.unlock_gap);
        session.activate(self.timings.short_pulse)
    }

    pub fn engine(&self) -> Result<(), ActuationError> {
        self.actuator.activate(self.timings.engine_pulse)
    }
}
