//! Domain layer - pure business logic independent of infrastructure
//!
//! This module contains the core domain entities and services of the
//! acquisition device: the sample payload, the active configuration,
//! the log read cursor, and the block-device registry.

pub mod config;
pub mod cursor;
pub mod registry;
pub mod sample;

pub use config::{BusId, ConfigStore, ConfigUpdate, DeviceConfig};
pub use cursor::LogCursor;
pub use registry::DeviceRegistry;
pub use sample::{SampleBuffer, MAX_SAMPLE_LEN, SAMPLE_LEN};
