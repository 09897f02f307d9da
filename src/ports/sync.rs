//! Sync-state port - the externally-mutated acquisition trigger
//!
//! The dispatch loop owns no timing of its own: it reacts to
//! transitions of a sync token written by a source outside its control
//! (an interrupt handler, the com task, a test harness).

/// Sync token value meaning "no data pending"
pub const SYNC_IDLE: u32 = 0;

/// Sync token value meaning "new data pending" - the only value whose
/// transition triggers an acquisition cycle
pub const SYNC_DATA_READY: u32 = 1;

/// Port for reading the current sync state.
///
/// The token is volatile from the loop's point of view: it may change
/// between any two reads. Implementations on platforms with real
/// concurrency must make the read atomic and must not assume
/// sequential consistency with the writer.
pub trait SyncSource {
    /// The current sync token value
    fn current(&self) -> u32;
}
