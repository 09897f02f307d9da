//! Configuration intake for the communication interface
//!
//! The com task hands raw config frames from the host to this intake,
//! which tracks what it last delivered and notifies the observer with
//! the new/displaced pair in a single synchronous invocation.

use crate::com_protocol::ConfigFrame;
use crate::domain::{ConfigUpdate, DeviceConfig};
use crate::ports::channel::{InterfaceEvent, InterfaceObserver};

/// Delivery side of configuration updates.
///
/// Owns the "previous configuration" bookkeeping so observers receive
/// both the new configuration and the one it replaces, with the
/// previous reference given up before the callback returns.
#[derive(Debug, Default)]
pub struct ConfigIntake {
    last_delivered: Option<DeviceConfig>,
}

impl ConfigIntake {
    /// Create an intake with no configuration delivered yet
    pub const fn new() -> Self {
        Self {
            last_delivered: None,
        }
    }

    /// Validate a frame and deliver it to the observer.
    ///
    /// Returns whether the frame was accepted. A frame naming a bus
    /// this device does not have is logged and dropped without
    /// disturbing the active configuration.
    pub fn deliver<O: InterfaceObserver>(&mut self, frame: ConfigFrame, observer: &mut O) -> bool {
        let Some(config) = frame.to_config() else {
            defmt::warn!("config frame with unknown bus index {} dropped", frame.bus);
            return false;
        };

        let previous = self.last_delivered.replace(config);
        observer.on_event(InterfaceEvent::ConfigChanged(ConfigUpdate {
            current: config,
            previous,
        }));
        true
    }
}
