//! Sample buffer domain entity
//!
//! This module defines the payload handed to the communication layer.
//! It has no knowledge of how samples are framed or transmitted.

use heapless::Vec;

/// Largest payload the communication layer accepts in one hand-off
pub const MAX_SAMPLE_LEN: usize = 64;

/// Length of the fixed-size sample produced by one acquisition cycle
pub const SAMPLE_LEN: usize = 4;

/// A sample buffer from the domain perspective.
///
/// Ephemeral: constructed immediately before dispatch and not retained
/// after the channel hand-off returns.
#[derive(Clone, Debug, PartialEq, Eq, defmt::Format)]
pub struct SampleBuffer {
    data: Vec<u8, MAX_SAMPLE_LEN>,
}

impl SampleBuffer {
    /// Create a zero-initialized sample of `len` bytes.
    ///
    /// `len` is capped at `MAX_SAMPLE_LEN`.
    pub fn zeroed(len: usize) -> Self {
        let mut data = Vec::new();
        for _ in 0..len.min(MAX_SAMPLE_LEN) {
            // cannot fail: len is capped at capacity
            let _ = data.push(0);
        }
        Self { data }
    }

    /// Create a sample from an existing payload.
    ///
    /// Returns `None` if the payload exceeds `MAX_SAMPLE_LEN`.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        Vec::from_slice(payload).ok().map(|data| Self { data })
    }

    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_sample_has_requested_length() {
        let sample = SampleBuffer::zeroed(SAMPLE_LEN);
        assert_eq!(sample.len(), SAMPLE_LEN);
        assert!(sample.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn zeroed_sample_is_capped_at_capacity() {
        let sample = SampleBuffer::zeroed(MAX_SAMPLE_LEN + 10);
        assert_eq!(sample.len(), MAX_SAMPLE_LEN);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let payload = [0xA5u8; MAX_SAMPLE_LEN + 1];
        assert!(SampleBuffer::from_payload(&payload).is_none());
    }
}
