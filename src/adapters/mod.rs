//! Adapters - concrete implementations of ports
//!
//! Adapters connect the acquisition core to the outside world by
//! implementing the port traits. Each adapter knows how to work with a
//! specific technology or hardware.
//!
//! # Available Adapters
//!
//! - **sd_volume**: FAT log file on an SD card via embedded-sdmmc
//! - **i2c_channel**: sample hand-off to the I2C slave com task
//! - **gpio_diag**: diagnostic lines on embassy-rp GPIO outputs
//! - **shared_sync**: atomic sync token shared with interrupt context
//! - **config_intake**: host config frames delivered to the observer

pub mod config_intake;
pub mod shared_sync;

#[cfg(feature = "rp2040")]
pub mod gpio_diag;
#[cfg(feature = "rp2040")]
pub mod i2c_channel;
#[cfg(feature = "rp2040")]
pub mod sd_volume;

pub use config_intake::ConfigIntake;
pub use shared_sync::{SharedSyncState, SyncReader, SyncWriter};

#[cfg(feature = "rp2040")]
pub use gpio_diag::DebugLine;
#[cfg(feature = "rp2040")]
pub use i2c_channel::{I2cSampleChannel, SampleQueue, SAMPLE_QUEUE_DEPTH};
#[cfg(feature = "rp2040")]
pub use sd_volume::{NoRtc, SdVolume};
