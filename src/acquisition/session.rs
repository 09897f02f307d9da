//! Storage session - the bounded log read/retry loop
//!
//! One session owns the volume port, the read cursor, and a working
//! buffer, and drives the mount/open/seek/read/unmount cycle that
//! feeds the device at startup.

use crate::domain::LogCursor;
use crate::ports::diagnostics::DiagnosticPin;
use crate::ports::storage::{OpenOutcome, StorageError, VolumePort};

/// Outcome of one chunk read attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub struct ChunkRead {
    /// Bytes actually placed in the working buffer
    pub bytes_read: usize,
    /// Whether the cursor wrapped back to offset zero
    pub wrapped: bool,
}

/// Sequential log reader with wraparound-on-short-read recovery.
///
/// Each `read_next_chunk` performs a full establish/tear-down cycle on
/// the volume: mount, open, seek, read, close, unmount.
// TODO: mount once and keep the file handle across cycles (DESIGN.md)
pub struct StorageSession<'buf, V: VolumePort, D: DiagnosticPin> {
    volume: V,
    read_pin: D,
    file_name: &'static str,
    cursor: LogCursor,
    buffer: &'buf mut [u8],
}

impl<'buf, V: VolumePort, D: DiagnosticPin> StorageSession<'buf, V, D> {
    /// Create a session reading `file_name` in `chunk_size`-byte chunks.
    ///
    /// `buffer` must hold at least one chunk.
    pub fn new(
        volume: V,
        read_pin: D,
        file_name: &'static str,
        chunk_size: u32,
        buffer: &'buf mut [u8],
    ) -> Self {
        defmt::assert!(
            buffer.len() >= chunk_size as usize,
            "working buffer smaller than one chunk"
        );
        Self {
            volume,
            read_pin,
            file_name,
            cursor: LogCursor::new(chunk_size),
            buffer,
        }
    }

    /// Offset of the next chunk request
    pub fn offset(&self) -> u32 {
        self.cursor.offset()
    }

    /// The working buffer, including bytes from the latest read
    pub fn working_buffer(&self) -> &[u8] {
        self.buffer
    }

    /// Read the next chunk of the log file.
    ///
    /// Mount failure and open failure other than file-absent are
    /// returned as `Err` - the fatal class, with no recovery path at
    /// this layer. An absent file, a failed seek, and a failed read all
    /// count as a zero-byte short read: logged, cursor reset to the
    /// start, `Ok` returned.
    ///
    /// The read diagnostic line brackets only the physical read call.
    pub fn read_next_chunk(&mut self) -> Result<ChunkRead, StorageError> {
        self.volume.mount()?;

        if let OpenOutcome::Absent = self.volume.open_read(self.file_name)? {
            defmt::warn!("log file {} absent, restarting from offset 0", self.file_name);
            let wrapped = self.cursor.record(0);
            self.volume.unmount();
            return Ok(ChunkRead {
                bytes_read: 0,
                wrapped,
            });
        }

        let offset = self.cursor.offset();
        let chunk = self.cursor.chunk_size() as usize;

        let bytes_read = match self.volume.seek(offset) {
            Ok(()) => {
                self.read_pin.set_high();
                let result = self.volume.read(&mut self.buffer[..chunk]);
                self.read_pin.set_low();

                match result {
                    Ok(n) => n,
                    Err(e) => {
                        defmt::warn!("log read at offset {} failed: {:?}", offset, e);
                        0
                    }
                }
            }
            Err(e) => {
                defmt::warn!("seek to offset {} failed: {:?}", offset, e);
                0
            }
        };

        let wrapped = self.cursor.record(bytes_read);
        defmt::trace!(
            "read {} bytes at offset {} (wrapped: {})",
            bytes_read,
            offset,
            wrapped
        );

        self.volume.close();
        self.volume.unmount();

        Ok(ChunkRead {
            bytes_read,
            wrapped,
        })
    }

    /// Bounded startup loop: read `cycles` chunks back to back.
    ///
    /// Stops at the first fatal error; short reads keep the loop going
    /// from offset zero.
    pub fn run(&mut self, cycles: usize) -> Result<(), StorageError> {
        for _ in 0..cycles {
            self.read_next_chunk()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Op {
        Mount,
        Open,
        Seek(u32),
        Read,
        PinHigh,
        PinLow,
        Close,
        Unmount,
    }

    type OpLog = Rc<RefCell<Vec<Op>>>;

    struct MockVolume {
        /// `None` models an absent log file
        file: Option<Vec<u8>>,
        position: u32,
        fail_mount: bool,
        fail_open: bool,
        fail_read: bool,
        log: OpLog,
    }

    impl MockVolume {
        fn with_file(len: usize, log: OpLog) -> Self {
            let file = (0..len).map(|i| i as u8).collect();
            Self {
                file: Some(file),
                position: 0,
                fail_mount: false,
                fail_open: false,
                fail_read: false,
                log,
            }
        }

        fn absent(log: OpLog) -> Self {
            Self {
                file: None,
                position: 0,
                fail_mount: false,
                fail_open: false,
                fail_read: false,
                log,
            }
        }
    }

    impl VolumePort for MockVolume {
        fn mount(&mut self) -> Result<(), StorageError> {
            self.log.borrow_mut().push(Op::Mount);
            if self.fail_mount {
                return Err(StorageError::MountFailed);
            }
            Ok(())
        }

        fn open_read(&mut self, _name: &str) -> Result<OpenOutcome, StorageError> {
            self.log.borrow_mut().push(Op::Open);
            if self.fail_open {
                return Err(StorageError::OpenFailed);
            }
            match self.file {
                Some(_) => Ok(OpenOutcome::Opened),
                None => Ok(OpenOutcome::Absent),
            }
        }

        fn seek(&mut self, offset: u32) -> Result<(), StorageError> {
            self.log.borrow_mut().push(Op::Seek(offset));
            self.position = offset;
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
            self.log.borrow_mut().push(Op::Read);
            if self.fail_read {
                return Err(StorageError::ReadFailed);
            }
            let file = self.file.as_ref().ok_or(StorageError::NotOpen)?;
            let start = (self.position as usize).min(file.len());
            let end = (start + buf.len()).min(file.len());
            buf[..end - start].copy_from_slice(&file[start..end]);
            Ok(end - start)
        }

        fn close(&mut self) {
            self.log.borrow_mut().push(Op::Close);
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(Op::Unmount);
        }
    }

    struct MockPin {
        log: OpLog,
    }

    impl DiagnosticPin for MockPin {
        fn set_high(&mut self) {
            self.log.borrow_mut().push(Op::PinHigh);
        }

        fn set_low(&mut self) {
            self.log.borrow_mut().push(Op::PinLow);
        }
    }

    fn session_over(
        volume: MockVolume,
        log: OpLog,
        chunk_size: u32,
        buffer: &mut [u8],
    ) -> StorageSession<'_, MockVolume, MockPin> {
        StorageSession::new(volume, MockPin { log }, "samples.log", chunk_size, buffer)
    }

    #[test]
    fn chunked_read_wraps_after_short_read() {
        // 1200-byte file in 500-byte chunks: 500/500/200, then restart
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 600];
        let volume = MockVolume::with_file(1200, log.clone());
        let mut session = session_over(volume, log, 500, &mut buffer);

        let first = session.read_next_chunk().unwrap();
        assert_eq!(first, ChunkRead { bytes_read: 500, wrapped: false });
        assert_eq!(session.offset(), 500);
        assert_eq!(session.working_buffer()[0], 0);
        assert_eq!(session.working_buffer()[499], (499 % 256) as u8);

        let second = session.read_next_chunk().unwrap();
        assert_eq!(second, ChunkRead { bytes_read: 500, wrapped: false });
        assert_eq!(session.offset(), 1000);

        let third = session.read_next_chunk().unwrap();
        assert_eq!(third, ChunkRead { bytes_read: 200, wrapped: true });
        assert_eq!(session.offset(), 0);

        // the log restarts from the beginning, not offset 1500
        let fourth = session.read_next_chunk().unwrap();
        assert_eq!(fourth, ChunkRead { bytes_read: 500, wrapped: false });
    }

    #[test]
    fn read_pin_brackets_only_the_read_call() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let volume = MockVolume::with_file(1024, log.clone());
        let mut session = session_over(volume, log.clone(), 128, &mut buffer);

        session.read_next_chunk().unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Op::Mount,
                Op::Open,
                Op::Seek(0),
                Op::PinHigh,
                Op::Read,
                Op::PinLow,
                Op::Close,
                Op::Unmount,
            ]
        );
    }

    #[test]
    fn absent_file_counts_as_exhausted_log() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let volume = MockVolume::absent(log.clone());
        let mut session = session_over(volume, log.clone(), 128, &mut buffer);

        let outcome = session.read_next_chunk().unwrap();
        assert_eq!(outcome, ChunkRead { bytes_read: 0, wrapped: true });
        assert_eq!(session.offset(), 0);

        // no seek, no read, no pin activity on an absent file
        assert_eq!(
            log.borrow().as_slice(),
            &[Op::Mount, Op::Open, Op::Unmount]
        );
    }

    #[test]
    fn read_fault_is_absorbed_and_resets_the_cursor() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let mut volume = MockVolume::with_file(1024, log.clone());
        volume.fail_read = true;
        let mut session = session_over(volume, log, 128, &mut buffer);

        let outcome = session.read_next_chunk().unwrap();
        assert_eq!(outcome, ChunkRead { bytes_read: 0, wrapped: true });
        assert_eq!(session.offset(), 0);
    }

    #[test]
    fn mount_failure_is_fatal() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let mut volume = MockVolume::with_file(1024, log.clone());
        volume.fail_mount = true;
        let mut session = session_over(volume, log, 128, &mut buffer);

        assert_eq!(session.read_next_chunk(), Err(StorageError::MountFailed));
    }

    #[test]
    fn open_failure_other_than_absent_is_fatal() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let mut volume = MockVolume::with_file(1024, log.clone());
        volume.fail_open = true;
        let mut session = session_over(volume, log, 128, &mut buffer);

        assert_eq!(session.read_next_chunk(), Err(StorageError::OpenFailed));
    }

    #[test]
    fn bounded_run_reads_across_the_wrap() {
        let log: OpLog = Rc::new(RefCell::new(Vec::new()));
        let mut buffer = [0u8; 128];
        let volume = MockVolume::with_file(1024, log.clone());
        let mut session = session_over(volume, log, 128, &mut buffer);

        // 1024 / 128 = 8 full reads, the 9th is short, then restart
        session.run(10).unwrap();
        assert_eq!(session.offset(), 128);
    }
}
