//! Sample channel port - abstraction for the communication interface
//!
//! This trait allows the acquisition core to hand samples to the host
//! link without knowing the transport (I2C slave, mock, etc.), and
//! defines the observer boundary through which the communication layer
//! notifies the core.

use crate::domain::{ConfigUpdate, SampleBuffer};

/// Port for handing samples to the communication layer.
///
/// Fire-and-forget: the dispatch loop observes no return status. The
/// communication layer owns buffering, retry, and bus transmission;
/// the core's only obligation is a correctly-sized buffer handed off
/// synchronously within the dispatch step.
pub trait SampleChannel {
    /// Submit one sample payload for transmission
    fn submit_sample(&mut self, data: &[u8]);
}

/// Notification delivered by the communication layer to the core.
///
/// A fixed, small set of variants invoked synchronously on the same
/// execution context - no asynchronous dispatch.
#[derive(Clone, Debug, defmt::Format)]
pub enum InterfaceEvent {
    /// The host pushed data down to the device
    SampleReady(SampleBuffer),
    /// A new configuration was installed, displacing the previous one
    ConfigChanged(ConfigUpdate),
}

/// Observer for communication-interface notifications.
///
/// The configuration-update arm is the sole writer of process-wide
/// configuration state; the core must not mutate configuration outside
/// it.
pub trait InterfaceObserver {
    /// Handle one interface event
    fn on_event(&mut self, event: InterfaceEvent);
}

impl InterfaceObserver for crate::domain::ConfigStore {
    fn on_event(&mut self, event: InterfaceEvent) {
        match event {
            InterfaceEvent::ConfigChanged(update) => {
                let applied = self.replace(update.current);
                defmt::info!(
                    "config updated: {:?} (displaced: {:?})",
                    applied.current,
                    applied.previous
                );
            }
            // host-to-device data path is not wired on this device
            InterfaceEvent::SampleReady(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusId, ConfigStore, DeviceConfig};

    #[test]
    fn config_changed_updates_the_store() {
        let mut store = ConfigStore::new();
        let config = DeviceConfig::new(BusId::I2c1, 0x29, 2, 3);

        store.on_event(InterfaceEvent::ConfigChanged(ConfigUpdate {
            current: config,
            previous: None,
        }));

        assert_eq!(store.active(), Some(&config));
    }

    #[test]
    fn sample_ready_is_a_no_op() {
        let mut store = ConfigStore::new();
        store.on_event(InterfaceEvent::SampleReady(SampleBuffer::zeroed(4)));
        assert_eq!(store.active(), None);
    }
}
