//! Dispatch loop - edge-triggered sample acquisition
//!
//! A single-threaded, cooperatively scheduled polling step: the caller
//! invokes `poll` repeatedly, and each observed sync-state transition
//! into the data-ready sentinel drives exactly one acquisition cycle.

use crate::domain::{SampleBuffer, SAMPLE_LEN};
use crate::ports::channel::SampleChannel;
use crate::ports::diagnostics::DiagnosticPin;
use crate::ports::sync::{SyncSource, SYNC_DATA_READY, SYNC_IDLE};

/// What one poll step did
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum PollOutcome {
    /// Sync state unchanged since the last poll
    Idle,
    /// A transition was observed but it was not into data-ready
    Observed(u32),
    /// One sample was acquired and submitted
    Dispatched,
}

/// Edge-triggered acquisition loop.
///
/// The loop never blocks and never retries. A sample overwritten at
/// the source before submission is not detected here; the channel owns
/// durability, not this loop.
pub struct DispatchLoop<S: SyncSource, C: SampleChannel, D: DiagnosticPin> {
    sync: S,
    channel: C,
    cycle_pin: D,
    last_sync_state: u32,
}

impl<S: SyncSource, C: SampleChannel, D: DiagnosticPin> DispatchLoop<S, C, D> {
    /// Create a loop; the sync state starts at the idle sentinel
    pub fn new(sync: S, channel: C, cycle_pin: D) -> Self {
        Self {
            sync,
            channel,
            cycle_pin,
            last_sync_state: SYNC_IDLE,
        }
    }

    /// Sync value seen by the most recent poll
    pub fn last_sync_state(&self) -> u32 {
        self.last_sync_state
    }

    /// One polling step.
    ///
    /// Reads the sync token, and on a transition into
    /// [`SYNC_DATA_READY`] performs one acquisition: cycle pin high,
    /// zero-initialized fixed-size sample constructed and submitted,
    /// cycle pin low - strictly in that order. Repeated identical sync
    /// values are no-ops; only the first transition into a value acts.
    pub fn poll(&mut self) -> PollOutcome {
        let state = self.sync.current();
        if state == self.last_sync_state {
            return PollOutcome::Idle;
        }
        self.last_sync_state = state;

        if state != SYNC_DATA_READY {
            return PollOutcome::Observed(state);
        }

        self.cycle_pin.set_high();
        let sample = SampleBuffer::zeroed(SAMPLE_LEN);
        self.channel.submit_sample(sample.as_bytes());
        self.cycle_pin.set_low();

        PollOutcome::Dispatched
    }
}
