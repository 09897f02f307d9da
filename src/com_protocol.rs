//! Shared protocol for the acquisition-device communication interface
//!
//! This module defines the frames exchanged between the host and the
//! device over the I2C link: sample frames going up, configuration
//! frames coming down.
//!
//! Frames are serialized using `postcard`.

use serde::{Deserialize, Serialize};

use crate::domain::{BusId, DeviceConfig, SampleBuffer, MAX_SAMPLE_LEN};

#[cfg(feature = "std")]
use std::vec::Vec;

/// Maximum payload bytes carried by one sample frame
pub const MAX_FRAME_PAYLOAD: usize = MAX_SAMPLE_LEN;

/// One sample relayed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFrame {
    /// Monotonic frame counter, wraps at u32::MAX
    pub seq: u32,
    /// Sample payload
    #[cfg(not(feature = "std"))]
    pub payload: heapless::Vec<u8, MAX_FRAME_PAYLOAD>,
    #[cfg(feature = "std")]
    pub payload: Vec<u8>,
}

impl SampleFrame {
    /// Frame a sample buffer for transmission
    #[cfg(not(feature = "std"))]
    pub fn new(seq: u32, sample: &SampleBuffer) -> Option<Self> {
        let payload = heapless::Vec::from_slice(sample.as_bytes()).ok()?;
        Some(Self { seq, payload })
    }

    /// Frame a sample buffer for transmission (std version)
    #[cfg(feature = "std")]
    pub fn new(seq: u32, sample: &SampleBuffer) -> Option<Self> {
        Some(Self {
            seq,
            payload: sample.as_bytes().to_vec(),
        })
    }
}

/// Configuration pushed down by the host.
///
/// The bus field is a raw controller index on the wire; conversion to
/// [`DeviceConfig`] rejects indexes this device does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFrame {
    /// I2C controller index (0 or 1)
    pub bus: u8,
    /// 7-bit device address
    pub address: u8,
    /// GPIO number of the data line
    pub sda_pin: u8,
    /// GPIO number of the clock line
    pub scl_pin: u8,
}

impl ConfigFrame {
    /// Convert to the domain configuration; `None` for an unknown bus
    pub fn to_config(self) -> Option<DeviceConfig> {
        let bus = match self.bus {
            0 => BusId::I2c0,
            1 => BusId::I2c1,
            _ => return None,
        };
        Some(DeviceConfig::new(bus, self.address, self.sda_pin, self.scl_pin))
    }
}

impl From<DeviceConfig> for ConfigFrame {
    fn from(config: DeviceConfig) -> Self {
        Self {
            bus: match config.bus {
                BusId::I2c0 => 0,
                BusId::I2c1 => 1,
            },
            address: config.address,
            sda_pin: config.sda_pin,
            scl_pin: config.scl_pin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_frame_converts_both_ways() {
        let config = DeviceConfig::new(BusId::I2c1, 0x29, 2, 3);
        let frame = ConfigFrame::from(config);
        assert_eq!(frame.to_config(), Some(config));
    }

    #[test]
    fn unknown_bus_index_is_rejected() {
        let frame = ConfigFrame {
            bus: 9,
            address: 0x28,
            sda_pin: 26,
            scl_pin: 27,
        };
        assert_eq!(frame.to_config(), None);
    }

    #[test]
    fn sample_frame_carries_the_payload() {
        let sample = SampleBuffer::from_payload(&[1, 2, 3, 4]).unwrap();
        let frame = SampleFrame::new(9, &sample).unwrap();
        assert_eq!(frame.seq, 9);
        assert_eq!(&frame.payload[..], &[1, 2, 3, 4]);
    }
}
