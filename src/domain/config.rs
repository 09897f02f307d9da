//! Device configuration entity and active-config slot
//!
//! The communication layer delivers configuration updates; the core
//! captures them here. Exactly one configuration is active at a time.

/// I2C bus selector (the RP2040 exposes two controllers)
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum BusId {
    /// I2C0 controller
    I2c0,
    /// I2C1 controller
    I2c1,
}

/// Active device configuration.
///
/// Carries the bus-level parameters of the communication interface.
/// Callback wiring is not configuration: observers register through
/// [`InterfaceObserver`](crate::ports::channel::InterfaceObserver).
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct DeviceConfig {
    /// Which I2C controller the com interface runs on
    pub bus: BusId,
    /// 7-bit I2C address the device answers on
    pub address: u8,
    /// GPIO number of the data line
    pub sda_pin: u8,
    /// GPIO number of the clock line
    pub scl_pin: u8,
}

impl DeviceConfig {
    /// Create a configuration with explicit bus parameters
    pub const fn new(bus: BusId, address: u8, sda_pin: u8, scl_pin: u8) -> Self {
        Self {
            bus,
            address,
            sda_pin,
            scl_pin,
        }
    }
}

impl Default for DeviceConfig {
    /// The device's shipped configuration: I2C0 at 0x28, SDA 26, SCL 27
    fn default() -> Self {
        Self::new(BusId::I2c0, 0x28, 26, 27)
    }
}

/// One configuration replacement, as delivered to observers.
///
/// `previous` is moved out of the store when the update happens, so no
/// reader can retain the displaced configuration afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct ConfigUpdate {
    /// The configuration now active
    pub current: DeviceConfig,
    /// The configuration it displaced, absent on the first update
    pub previous: Option<DeviceConfig>,
}

/// Single-owner slot for the active configuration.
///
/// The slot is the sole holder; replacement is atomic from the core's
/// point of view because old and new are produced in one call. The
/// execution model is single-threaded cooperative; a port with
/// concurrent readers must wrap this slot in a single-writer/
/// multi-reader guard.
#[derive(Debug, Default)]
pub struct ConfigStore {
    active: Option<DeviceConfig>,
}

impl ConfigStore {
    /// Create an empty store (no configuration active yet)
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Install `new` as the active configuration.
    ///
    /// Returns the update pair: the now-active configuration together
    /// with the displaced one.
    pub fn replace(&mut self, new: DeviceConfig) -> ConfigUpdate {
        let previous = self.active.replace(new);
        ConfigUpdate {
            current: new,
            previous,
        }
    }

    /// The currently active configuration, if any
    pub fn active(&self) -> Option<&DeviceConfig> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(address: u8) -> DeviceConfig {
        DeviceConfig::new(BusId::I2c0, address, 26, 27)
    }

    #[test]
    fn first_update_has_no_previous() {
        let mut store = ConfigStore::new();
        let update = store.replace(cfg(0x28));
        assert_eq!(update.previous, None);
        assert_eq!(store.active(), Some(&cfg(0x28)));
    }

    #[test]
    fn update_chain_delivers_displaced_config() {
        let mut store = ConfigStore::new();

        let mut last_previous = None;
        for n in 0..5u8 {
            let update = store.replace(cfg(0x20 + n));
            assert_eq!(update.previous, last_previous);
            last_previous = Some(update.current);
        }

        // the store holds exactly the final update
        assert_eq!(store.active(), Some(&cfg(0x24)));
    }
}
