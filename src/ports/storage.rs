//! Storage port - abstraction over the mounted volume and log file
//!
//! This trait allows the acquisition core to read the log file without
//! knowing the specific filesystem implementation (SD/FAT, mock, etc.)

/// Error type for storage operations.
///
/// `MountFailed` and `OpenFailed` are the fatal class: they indicate an
/// unrecoverable media fault and the firmware halts on them. The rest
/// describe mis-sequenced port usage or a failed read primitive, which
/// the session absorbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum StorageError {
    /// Volume could not be mounted
    MountFailed,
    /// File exists but could not be opened
    OpenFailed,
    /// Seek to the requested offset failed
    SeekFailed,
    /// The read primitive reported an error
    ReadFailed,
    /// Operation requires a mounted volume
    NotMounted,
    /// Operation requires an open file
    NotOpen,
}

/// Outcome of opening the log file
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum OpenOutcome {
    /// File is open and readable
    Opened,
    /// File does not exist. Not a fault: the log simply has no data
    /// yet, and the session treats it as an exhausted log.
    Absent,
}

/// Port for reading the log file from block-storage-backed media.
///
/// The port is stateful: `mount` establishes the volume, `open_read`
/// the file, and the remaining calls operate on that open file until
/// `close`/`unmount`. Read-only by contract - no write path exists.
///
/// # Example Implementation
///
/// ```ignore
/// struct SdVolume<D: BlockDevice> {
///     manager: VolumeManager<D, FixedTimeSource>,
///     volume: Option<RawVolume>,
///     file: Option<RawFile>,
/// }
///
/// impl<D: BlockDevice> VolumePort for SdVolume<D> {
///     fn mount(&mut self) -> Result<(), StorageError> {
///         let volume = self.manager.open_raw_volume(VolumeIdx(0))?;
///         self.volume = Some(volume);
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait VolumePort {
    /// Mount the volume. Failure is fatal to the caller.
    fn mount(&mut self) -> Result<(), StorageError>;

    /// Open the named file in read-only mode.
    ///
    /// A missing file is reported as `Ok(OpenOutcome::Absent)`; any
    /// other failure is the fatal `Err` class.
    fn open_read(&mut self, name: &str) -> Result<OpenOutcome, StorageError>;

    /// Seek the open file to an absolute byte offset
    fn seek(&mut self, offset: u32) -> Result<(), StorageError>;

    /// Read up to `buf.len()` bytes from the current position.
    ///
    /// Returns the number of bytes actually read; fewer than requested
    /// (including zero) signals end-of-data.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Close the open file, if any
    fn close(&mut self);

    /// Unmount the volume, if mounted
    fn unmount(&mut self);
}

impl<V: VolumePort> VolumePort for &mut V {
    fn mount(&mut self) -> Result<(), StorageError> {
        (**self).mount()
    }

    fn open_read(&mut self, name: &str) -> Result<OpenOutcome, StorageError> {
        (**self).open_read(name)
    }

    fn seek(&mut self, offset: u32) -> Result<(), StorageError> {
        (**self).seek(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        (**self).read(buf)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn unmount(&mut self) {
        (**self).unmount()
    }
}
