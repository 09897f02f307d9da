//! I2C communication-interface adapter
//!
//! This adapter implements the SampleChannel trait for the I2C slave
//! link to the host. Submission is a synchronous hand-off into a
//! static queue; the com task owns the bus and drains the queue when
//! the host polls.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::com_protocol::SampleFrame;
use crate::domain::SampleBuffer;
use crate::ports::channel::SampleChannel;

/// Frames buffered between the dispatch loop and the com task
pub const SAMPLE_QUEUE_DEPTH: usize = 8;

/// Queue carrying framed samples to the com task
pub type SampleQueue = Channel<CriticalSectionRawMutex, SampleFrame, SAMPLE_QUEUE_DEPTH>;

/// Com-task end of the sample queue
pub type SampleReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, SampleFrame, SAMPLE_QUEUE_DEPTH>;

/// SampleChannel adapter feeding the I2C com task.
///
/// Fire-and-forget: a full queue drops the sample with a log line. The
/// dispatch loop never observes transmission status; durability is the
/// communication layer's concern.
pub struct I2cSampleChannel<'a> {
    queue: Sender<'a, CriticalSectionRawMutex, SampleFrame, SAMPLE_QUEUE_DEPTH>,
    seq: u32,
}

impl<'a> I2cSampleChannel<'a> {
    /// Create a channel feeding the given queue
    pub fn new(queue: &'a SampleQueue) -> Self {
        Self {
            queue: queue.sender(),
            seq: 0,
        }
    }

    /// Frames submitted so far (including dropped ones)
    pub fn frames_submitted(&self) -> u32 {
        self.seq
    }
}

impl SampleChannel for I2cSampleChannel<'_> {
    fn submit_sample(&mut self, data: &[u8]) {
        let Some(sample) = SampleBuffer::from_payload(data) else {
            defmt::warn!("sample of {} bytes exceeds frame capacity, dropped", data.len());
            return;
        };
        let Some(frame) = SampleFrame::new(self.seq, &sample) else {
            return;
        };
        let seq = frame.seq;
        self.seq = self.seq.wrapping_add(1);

        if self.queue.try_send(frame).is_err() {
            defmt::warn!("sample queue full, dropping frame {}", seq);
        }
    }
}
