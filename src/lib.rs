//! RP2040 Data-Acquisition Source Library
//!
//! This library provides a hexagonal architecture for an embedded
//! data-acquisition device: it reads a log file from an SD card in
//! bounded sequential chunks and relays samples to a host over an I2C
//! communication interface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - SampleBuffer / DeviceConfig entities                          │
//! │  - LogCursor wraparound service                                  │
//! │  - DeviceRegistry block-device enumeration                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - VolumePort: mount and read the log file                       │
//! │  - SampleChannel / InterfaceObserver: host communication         │
//! │  - SyncSource: acquisition trigger                               │
//! │  - DiagnosticPin: timing instrumentation                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - SdVolume: embedded-sdmmc FAT volume                           │
//! │  - I2cSampleChannel: I2C slave com task hand-off                 │
//! │  - DebugLine: embassy-rp GPIO debug lines                        │
//! │  - SharedSyncState: atomic sync token                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two services in `acquisition` - the storage session and the
//! dispatch loop - sit on the ports and carry all of the device's
//! state and failure handling, so they run unchanged against hardware
//! adapters or test mocks.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// ============================================================================
// Protocol (shared between host and device)
// ============================================================================

pub mod com_protocol;

pub use com_protocol::{ConfigFrame, SampleFrame, MAX_FRAME_PAYLOAD};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure business logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

/// Acquisition services - the storage and dispatch loops
pub mod acquisition;

// Re-export key domain types
pub use domain::{
    BusId, ConfigStore, ConfigUpdate, DeviceConfig, DeviceRegistry, LogCursor, SampleBuffer,
    MAX_SAMPLE_LEN, SAMPLE_LEN,
};

// Re-export key port traits
pub use ports::{
    DiagnosticPin, InterfaceEvent, InterfaceObserver, OpenOutcome, SampleChannel, StorageError,
    SyncSource, VolumePort, SYNC_DATA_READY, SYNC_IDLE,
};

// Re-export the acquisition services
pub use acquisition::{ChunkRead, DispatchLoop, PollOutcome, StorageSession};

// Re-export adapters
pub use adapters::{ConfigIntake, SharedSyncState};
