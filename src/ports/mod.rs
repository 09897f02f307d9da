//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the acquisition core interacts
//! with external systems. They allow the core to remain independent of
//! specific implementations.
//!
//! # Hexagonal Architecture
//!
//! In hexagonal architecture, ports define the "holes" in the hexagon
//! where adapters plug in:
//!
//! - **VolumePort**: how the log file is mounted and read (SD/FAT, mock)
//! - **SampleChannel**: how samples reach the host link (I2C slave, mock)
//! - **SyncSource**: how the acquisition trigger is observed
//! - **DiagnosticPin**: how timing instrumentation is driven (GPIO, unwired)

pub mod channel;
pub mod diagnostics;
pub mod storage;
pub mod sync;

pub use channel::{InterfaceEvent, InterfaceObserver, SampleChannel};
pub use diagnostics::{DiagnosticPin, UnwiredPin};
pub use storage::{OpenOutcome, StorageError, VolumePort};
pub use sync::{SyncSource, SYNC_DATA_READY, SYNC_IDLE};
