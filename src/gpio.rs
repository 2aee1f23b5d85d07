//! Output pin driver.
//!
//! This module provides:
//! - The `PinDriver` capability used by the actuator to drive a line HIGH/LOW
//! - A Raspberry Pi implementation backed by `rppal`
//! - Opening the configured pin at startup

use rppal::gpio::{Gpio, OutputPin};
use std::fmt;

/// Logic level of a digital output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Active level
    High,
    /// Inactive (safe) level
    Low,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => f.write_str("HIGH"),
            Level::Low => f.write_str("LOW"),
        }
    }
}

/// A write to the output line failed at the driver level.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DriverFault(pub String);

/// Capability to set a single output line.
///
/// Implementations are owned exclusively by the actuator, which serializes
/// every call, so they only need to be `Send`.
pub trait PinDriver: Send {
    fn write(&mut self, level: Level) -> Result<(), DriverFault>;
}

/// Raspberry Pi output line driven through `/dev/gpiomem`.
pub struct RpiPin {
    pin: OutputPin,
}

impl PinDriver for RpiPin {
    fn write(&mut self, level: Level) -> Result<(), DriverFault> {
        match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        }
        Ok(())
    }
}

/// Open the configured BCM pin as an output, initially LOW.
///
/// # Errors
///
/// Returns an error if:
/// - The GPIO peripheral cannot be accessed (not a Raspberry Pi, missing privileges)
/// - The pin is already claimed or does not exist
pub fn open_driver(bcm_pin: u8) -> Result<RpiPin, rppal::gpio::Error> {
    let pin = Gpio::new()?.get(bcm_pin)?.into_output_low();
    Ok(RpiPin { pin })
}

/// In-memory driver that records every transition, for tests.
#[cfg(test)]
pub mod fake {
    use super::{DriverFault, Level, PinDriver};
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    /// One recorded write.
    #[derive(Debug, Clone, Copy)]
    pub struct PinEvent {
        pub level: Level,
        pub at: Instant,
    }

    #[derive(Debug)]
    struct Inner {
        events: Vec<PinEvent>,
        state: Level,
        fail_on: Option<Level>,
    }

    /// Cloneable handle: one clone goes into the actuator, the test keeps another.
    #[derive(Debug, Clone)]
    pub struct RecordingPin {
        inner: Arc<Mutex<Inner>>,
    }

    impl RecordingPin {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Mutex::new(Inner {
                    events: Vec::new(),
                    state: Level::Low,
                    fail_on: None,
                })),
            }
        }

        /// Writes of `level` change the line but then report a fault.
        pub fn failing_on(level: Level) -> Self {
            let pin = Self::new();
            pin.inner.lock().unwrap().fail_on = Some(level);
            pin
        }

        pub fn events(&self) -> Vec<PinEvent> {
            self.inner.lock().unwrap().events.clone()
        }

        pub fn levels(&self) -> Vec<Level> {
            self.events().iter().map(|e| e.level).collect()
        }

        pub fn state(&self) -> Level {
            self.inner.lock().unwrap().state
        }

        /// HIGH->LOW intervals in recording order.
        pub fn pulses(&self) -> Vec<(Instant, Instant)> {
            let mut pulses = Vec::new();
            let mut raised = None;
            for event in self.events() {
                match event.level {
                    Level::High => raised = Some(event.at),
                    Level::Low => {
                        if let Some(start) = raised.take() {
                            pulses.push((start, event.at));
                        }
                    }
                }
            }
            pulses
        }
    }

    impl PinDriver for RecordingPin {
        fn write(&mut self, level: Level) -> Result<(), DriverFault> {
            let mut inner = self.inner.lock().unwrap();
            inner.state = level;
            inner.events.push(PinEvent {
                level,
                at: Instant::now(),
            });
            if inner.fail_on == Some(level) {
                return Err(DriverFault(format!("simulated fault writing {}", level)));
            }
            Ok(())
        }
    }
}
