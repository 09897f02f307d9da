//! Shared sync-state adapter
//!
//! Backs the [`SyncSource`] port with a single atomic word so the
//! token can be written from an interrupt handler or the com task and
//! read by the dispatch loop on another execution context.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::ports::sync::{SyncSource, SYNC_DATA_READY, SYNC_IDLE};

/// Process-wide sync token.
///
/// Split into a writer handle for the external source and a reader
/// implementing [`SyncSource`] for the dispatch loop. Writes are
/// `Release` and reads `Acquire`: the reader may not assume sequential
/// consistency with the writer.
#[derive(Debug)]
pub struct SharedSyncState {
    state: AtomicU32,
}

impl SharedSyncState {
    /// Create a token at the idle sentinel
    pub const fn new() -> Self {
        Self {
            state: AtomicU32::new(SYNC_IDLE),
        }
    }

    /// Writer handle for the external mutation source
    pub fn writer(&self) -> SyncWriter<'_> {
        SyncWriter { state: &self.state }
    }

    /// Reader handle for the dispatch loop
    pub fn reader(&self) -> SyncReader<'_> {
        SyncReader { state: &self.state }
    }
}

impl Default for SharedSyncState {
    fn default() -> Self {
        Self::new()
    }
}

/// Write side of the sync token
#[derive(Clone, Copy, Debug)]
pub struct SyncWriter<'a> {
    state: &'a AtomicU32,
}

impl SyncWriter<'_> {
    /// Set the token to an arbitrary value
    pub fn signal(&self, value: u32) {
        self.state.store(value, Ordering::Release);
    }

    /// Flag new data pending
    pub fn signal_data_ready(&self) {
        self.signal(SYNC_DATA_READY);
    }

    /// Return the token to idle
    pub fn clear(&self) {
        self.signal(SYNC_IDLE);
    }
}

/// Read side of the sync token
#[derive(Clone, Copy, Debug)]
pub struct SyncReader<'a> {
    state: &'a AtomicU32,
}

impl SyncSource for SyncReader<'_> {
    fn current(&self) -> u32 {
        self.state.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_updates_are_visible_to_the_reader() {
        let shared = SharedSyncState::new();
        let reader = shared.reader();

        assert_eq!(reader.current(), SYNC_IDLE);
        shared.writer().signal_data_ready();
        assert_eq!(reader.current(), SYNC_DATA_READY);
        shared.writer().clear();
        assert_eq!(reader.current(), SYNC_IDLE);
    }
}
