//! Acquisition services - the two loops at the core of the device
//!
//! The storage session reads the log file in bounded sequential chunks
//! with wraparound recovery; the dispatch loop turns sync-state edges
//! into sample submissions. Both are generic over ports, so they run
//! identically against hardware adapters and test mocks.

pub mod dispatch;
pub mod session;

pub use dispatch::{DispatchLoop, PollOutcome};
pub use session::{ChunkRead, StorageSession};
