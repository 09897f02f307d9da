//! SD-card volume adapter
//!
//! This adapter implements the VolumePort trait over embedded-sdmmc's
//! `VolumeManager`, using the raw handle API so the open volume, root
//! directory, and log file can be held across port calls.

use embedded_sdmmc::{
    BlockDevice, Error as SdError, Mode, RawDirectory, RawFile, RawVolume, TimeSource, Timestamp,
    VolumeIdx, VolumeManager,
};

use crate::ports::storage::{OpenOutcome, StorageError, VolumePort};

/// Time source for a device with no real-time clock.
///
/// The log file is read-only here, so timestamps are never written;
/// FAT metadata gets the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRtc;

impl TimeSource for NoRtc {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 0,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// VolumePort adapter over a FAT-formatted SD card.
///
/// Wraps any `BlockDevice` (the SPI SD driver on hardware, a memory
/// block device in host tooling).
pub struct SdVolume<D: BlockDevice> {
    manager: VolumeManager<D, NoRtc>,
    volume: Option<RawVolume>,
    root: Option<RawDirectory>,
    file: Option<RawFile>,
}

impl<D: BlockDevice> SdVolume<D> {
    /// Create an adapter over the given block device
    pub fn new(device: D) -> Self {
        Self {
            manager: VolumeManager::new(device, NoRtc),
            volume: None,
            root: None,
            file: None,
        }
    }
}

impl<D: BlockDevice> VolumePort for SdVolume<D> {
    fn mount(&mut self) -> Result<(), StorageError> {
        let volume = self
            .manager
            .open_raw_volume(VolumeIdx(0))
            .map_err(|_| StorageError::MountFailed)?;
        let root = match self.manager.open_root_dir(volume) {
            Ok(root) => root,
            Err(_) => {
                let _ = self.manager.close_volume(volume);
                return Err(StorageError::MountFailed);
            }
        };
        self.volume = Some(volume);
        self.root = Some(root);
        Ok(())
    }

    fn open_read(&mut self, name: &str) -> Result<OpenOutcome, StorageError> {
        let root = self.root.ok_or(StorageError::NotMounted)?;
        match self.manager.open_file_in_dir(root, name, Mode::ReadOnly) {
            Ok(file) => {
                self.file = Some(file);
                Ok(OpenOutcome::Opened)
            }
            Err(SdError::NotFound) => Ok(OpenOutcome::Absent),
            Err(_) => Err(StorageError::OpenFailed),
        }
    }

    fn seek(&mut self, offset: u32) -> Result<(), StorageError> {
        let file = self.file.ok_or(StorageError::NotOpen)?;
        self.manager
            .file_seek_from_start(file, offset)
            .map_err(|_| StorageError::SeekFailed)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let file = self.file.ok_or(StorageError::NotOpen)?;
        match self.manager.read(file, buf) {
            Ok(n) => Ok(n),
            // reading at the end of the log is exhaustion, not a fault
            Err(SdError::EndOfFile) => Ok(0),
            Err(_) => Err(StorageError::ReadFailed),
        }
    }

    fn close(&mut self) {
        if let Some(file) = self.file.take() {
            if self.manager.close_file(file).is_err() {
                defmt::warn!("log file close failed");
            }
        }
    }

    fn unmount(&mut self) {
        self.close();
        if let Some(root) = self.root.take() {
            if self.manager.close_dir(root).is_err() {
                defmt::warn!("root directory close failed");
            }
        }
        if let Some(volume) = self.volume.take() {
            if self.manager.close_volume(volume).is_err() {
                defmt::warn!("volume close failed");
            }
        }
    }
}
