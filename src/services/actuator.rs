//! Pin actuator - exclusive owner of the output line.
//!
//! Every activation is a HIGH pulse of a fixed duration followed by LOW.
//! The line is shared by all requests, so access goes through a mutex:
//! a `PinSession` holds the lock for a whole activation pattern and a
//! concurrent caller blocks until the previous pattern has fully finished.
//!
//! # Blocking
//!
//! All methods here block the calling thread (sleeps of up to several
//! seconds). Async callers must run them on the blocking pool.

use crate::gpio::{DriverFault, Level, PinDriver};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Activation failed at the driver.
#[derive(Debug, thiserror::Error)]
pub enum ActuationError {
    /// No driver could be opened at startup (degraded mode).
    #[error("GPIO driver is not available")]
    Unavailable,

    /// Writing a level to the line failed.
    #[error("failed to drive pin {level}: {source}")]
    Write {
        level: Level,
        #[source]
        source: DriverFault,
    },
}

/// Owner of the single controlled output line.
pub struct PinActuator {
    driver: Mutex<Option<Box<dyn PinDriver>>>,
    // Fixed at construction; readable without waiting on a running pattern
    available: bool,
}

impl PinActuator {
    pub fn new(driver: Box<dyn PinDriver>) -> Self {
        Self {
            driver: Mutex::new(Some(driver)),
            available: true,
        }
    }

    /// Actuator without a driver; every activation fails with `Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            driver: Mutex::new(None),
            available: false,
        }
    }

    /// Whether a driver was opened successfully.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Acquire exclusive use of the line, waiting for any running pattern.
    pub fn session(&self) -> PinSession<'_> {
        PinSession {
            driver: self.lock_driver(),
        }
    }

    /// Single activation: HIGH for `duration`, then LOW.
    pub fn activate(&self, duration: Duration) -> Result<(), ActuationError> {
        self.session().activate(duration)
    }

    /// Drive the line LOW. Used at shutdown.
    pub fn release(&self) {
        let mut driver = self.lock_driver();
        if let Some(driver) = driver.as_mut() {
            match driver.write(Level::Low) {
                Ok(()) => tracing::info!("GPIO pin released"),
                Err(e) => tracing::error!("Failed to release GPIO pin: {}", e),
            }
        }
    }

    // A panic elsewhere while holding the lock must not wedge the pin forever.
    fn lock_driver(&self) -> MutexGuard<'_, Option<Box<dyn PinDriver>>> {
        self.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PinActuator {
    fn drop(&mut self) {
        let driver = self.driver.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(driver) = driver.as_mut() {
            let _ = driver.write(Level::Low);
        }
    }
}

/// Exclusive access to the line for the lifetime of the guard.
pub struct PinSession<'a> {
    driver: MutexGuard<'a, Option<Box<dyn PinDriver>>>,
}

impl PinSession<'_> {
    /// Drive the line HIGH for `duration`, then LOW.
    ///
    /// The line is left LOW on every exit path: if raising it fails, a LOW
    /// write is still attempted before the original error is returned.
    pub fn activate(&mut self, duration: Duration) -> Result<(), ActuationError> {
        let driver = self.driver.as_mut().ok_or(ActuationError::Unavailable)?;

        if let Err(source) = driver.write(Level::High) {
            if let Err(e) = driver.write(Level::Low) {
                tracing::error!("Failed to restore GPIO pin LOW after fault: {}", e);
            }
            return Err(ActuationError::Write {
                level: Level::High,
                source,
            });
        }

        thread::sleep(duration);

        driver.write(Level::Low).map_err(|source| ActuationError::Write {
            level: Level::Low,
            source,
        })
    }

    /// Hold the line (LOW) for `duration` without releasing the session.
    pub fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::fake::RecordingPin;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_activate_raises_then_lowers() {
        let pin = RecordingPin::new();
        let actuator = PinActuator::new(Box::new(pin.clone()));

        let start = Instant::now();
        actuator.activate(Duration::from_millis(50)).unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(pin.levels(), vec![Level::High, Level::Low]);
        assert_eq!(pin.state(), Level::Low);

        let (high, low) = pin.pulses()[0];
        assert!(low.duration_since(high) >= Duration::from_millis(50));
    }

    #[test]
    fn test_fault_on_high_still_leaves_pin_low() {
        let pin = RecordingPin::failing_on(Level::High);
        let actuator = PinActuator::new(Box::new(pin.clone()));

        let err = actuator.activate(Duration::from_millis(10)).unwrap_err();

        assert!(matches!(
            err,
            ActuationError::Write {
                level: Level::High,
                ..
            }
        ));
        assert_eq!(pin.levels(), vec![Level::High, Level::Low]);
        assert_eq!(pin.state(), Level::Low);
    }

    #[test]
    fn test_fault_on_low_is_reported() {
        let pin = RecordingPin::failing_on(Level::Low);
        let actuator = PinActuator::new(Box::new(pin.clone()));

        let err = actuator.activate(Duration::from_millis(10)).unwrap_err();

        assert!(matches!(
            err,
            ActuationError::Write {
                level: Level::Low,
                ..
            }
        ));
    }

    #[test]
    fn test_unavailable_driver_fails_every_activation() {
        let actuator = PinActuator::unavailable();

        assert!(!actuator.is_available());
        assert!(matches!(
            actuator.activate(Duration::from_millis(10)),
            Err(ActuationError::Unavailable)
        ));
        // Releasing without a driver is a no-op
        actuator.release();
    }

    #[test]
    fn test_concurrent_activations_do_not_overlap() {
        let pin = RecordingPin::new();
        let actuator = Arc::new(PinActuator::new(Box::new(pin.clone())));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let actuator = Arc::clone(&actuator);
                thread::spawn(move || actuator.activate(Duration::from_millis(40)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let pulses = pin.pulses();
        assert_eq!(pulses.len(), 3);
        for pair in pulses.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "pulses overlap: {:?}", pair);
        }
    }

    #[test]
    fn test_availability_is_readable_during_activation() {
        let pin = RecordingPin::new();
        let actuator = Arc::new(PinActuator::new(Box::new(pin.clone())));

        let runner = {
            let actuator = Arc::clone(&actuator);
            thread::spawn(move || actuator.activate(Duration::from_millis(500)))
        };
        while pin.events().is_empty() {
            thread::sleep(Duration::from_millis(1));
        }

        let start = Instant::now();
        assert!(actuator.is_available());
        assert!(start.elapsed() < Duration::from_millis(100));

        runner.join().unwrap().unwrap();
    }

    #[test]
    fn test_release_and_drop_drive_pin_low() {
        let pin = RecordingPin::new();
        let actuator = PinActuator::new(Box::new(pin.clone()));

        actuator.release();
        assert_eq!(pin.levels(), vec![Level::Low]);

        drop(actuator);
        assert_eq!(pin.levels(), vec![Level::Low, Level::Low]);
        assert_eq!(pin.state(), Level::Low);
    }
}
