//! Acquisition Device Firmware
//!
//! Full wiring of the acquisition core on RP2040 hardware:
//!
//! - SD card over SPI0 carrying the log file, read through the
//!   `SdVolume` adapter in the bounded startup loop
//! - I2C0 slave com interface relaying sample frames to the host and
//!   accepting configuration frames from it
//! - three debug lines for oscilloscope timing correlation
//!
//! Build with `--features rp2040` for a thumbv6m target.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::i2c_slave::{self, Command, I2cSlave};
use embassy_rp::peripherals::I2C0;
use embassy_rp::bind_interrupts;
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::SdCard;
use {defmt_rtt as _, panic_probe as _};

use sdsource_rp::adapters::i2c_channel::{I2cSampleChannel, SampleQueue, SampleReceiver};
use sdsource_rp::adapters::shared_sync::{SharedSyncState, SyncWriter};
use sdsource_rp::adapters::{ConfigIntake, DebugLine, SdVolume};
use sdsource_rp::com_protocol::{ConfigFrame, SampleFrame};
use sdsource_rp::{
    ConfigStore, DeviceConfig, DeviceRegistry, DispatchLoop, PollOutcome, StorageSession,
};

// ============================================================================
// Device Configuration
// ============================================================================

/// Name of the log file on the SD card (8.3)
const LOG_FILE: &str = "SAMPLES.LOG";

/// Fixed chunk request size for the startup read loop
const CHUNK_SIZE: u32 = 500;

/// Working buffer capacity (one chunk plus slack)
const WORK_BUFFER_LEN: usize = 600;

/// Chunks read during the startup self-test
const STARTUP_READ_CYCLES: usize = 100_000;

// ============================================================================
// Channels and Shared State
// ============================================================================

/// Frames buffered between the dispatch loop and the com task
static SAMPLE_QUEUE: SampleQueue = SampleQueue::new();

/// Sync token written by the com task, read by the dispatch loop
static SYNC: SharedSyncState = SharedSyncState::new();

// ============================================================================
// Interrupt Bindings
// ============================================================================

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

// ============================================================================
// Main Entry Point
// ============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("=== Acquisition Device ===");

    let p = embassy_rp::init(Default::default());

    // Debug lines start high, as the logic analyzer setup expects
    let cycle_line = DebugLine::new(Output::new(p.PIN_2, Level::High));
    let _spare_line = Output::new(p.PIN_3, Level::High);
    let read_line = DebugLine::new(Output::new(p.PIN_4, Level::High));

    // ========================================================================
    // Communication Interface (I2C0 slave)
    // ========================================================================

    let config = DeviceConfig::default();
    info!("com interface on address 0x{=u8:x}", config.address);

    let mut slave_config = i2c_slave::Config::default();
    slave_config.addr = config.address as u16;
    let slave = I2cSlave::new(p.I2C0, p.PIN_27, p.PIN_26, Irqs, slave_config);

    spawner.must_spawn(com_task(
        slave,
        config,
        SAMPLE_QUEUE.receiver(),
        SYNC.writer(),
    ));

    // ========================================================================
    // Storage: SD card over SPI0
    // ========================================================================

    let mut spi_config = spi::Config::default();
    spi_config.frequency = 400_000;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let spi_dev = ExclusiveDevice::new(spi, cs, Delay);
    let sd_card = SdCard::new(spi_dev, Delay);

    // The storage subsystem enumerates media through the registry;
    // this device carries exactly one card slot.
    let mut registry: DeviceRegistry<SdVolume<_>, 1> = DeviceRegistry::new();
    let _ = registry.register(SdVolume::new(sd_card));
    info!("block devices registered: {}", registry.count());

    let volume = match registry.by_index_mut(0) {
        Some(volume) => volume,
        None => defmt::panic!("no block device at index 0"),
    };

    // ========================================================================
    // Startup read loop
    // ========================================================================

    let mut work_buffer = [0u8; WORK_BUFFER_LEN];
    let mut session = StorageSession::new(volume, read_line, LOG_FILE, CHUNK_SIZE, &mut work_buffer);

    info!("starting log read self-test ({} cycles)", STARTUP_READ_CYCLES);
    if let Err(e) = session.run(STARTUP_READ_CYCLES) {
        defmt::panic!("log read self-test failed: {:?}", e);
    }
    info!("log read self-test complete, next offset {}", session.offset());

    // ========================================================================
    // Dispatch loop
    // ========================================================================

    let channel = I2cSampleChannel::new(&SAMPLE_QUEUE);
    let mut dispatch = DispatchLoop::new(SYNC.reader(), channel, cycle_line);

    info!("entering dispatch loop");
    loop {
        if let PollOutcome::Dispatched = dispatch.poll() {
            defmt::trace!("sample dispatched");
        }
        // cooperative scheduling: hand the core back between polls
        Timer::after(Duration::from_micros(100)).await;
    }
}

// ============================================================================
// Com Task (I2C slave protocol)
// ============================================================================

#[embassy_executor::task]
async fn com_task(
    mut slave: I2cSlave<'static, I2C0>,
    initial_config: DeviceConfig,
    samples: SampleReceiver<'static>,
    sync: SyncWriter<'static>,
) {
    let mut store = ConfigStore::new();
    let mut intake = ConfigIntake::new();

    // initial configuration is delivered through the same observer
    // path as host-pushed updates
    intake.deliver(ConfigFrame::from(initial_config), &mut store);

    let mut rx_buf = [0u8; 64];
    loop {
        match slave.listen(&mut rx_buf).await {
            Ok(Command::Write(len)) => {
                handle_config_write(&rx_buf[..len], &mut intake, &mut store);
            }
            Ok(Command::Read) => {
                respond_with_sample(&mut slave, &samples, &sync).await;
            }
            Ok(Command::WriteRead(len)) => {
                handle_config_write(&rx_buf[..len], &mut intake, &mut store);
                respond_with_sample(&mut slave, &samples, &sync).await;
            }
            Ok(Command::GeneralCall(_)) => {}
            Err(e) => warn!("i2c listen error: {:?}", e),
        }
    }
}

fn handle_config_write(data: &[u8], intake: &mut ConfigIntake, store: &mut ConfigStore) {
    match postcard::from_bytes::<ConfigFrame>(data) {
        Ok(frame) => {
            intake.deliver(frame, store);
        }
        Err(_) => warn!("undecodable config frame ({} bytes)", data.len()),
    }
}

/// Answer a host read with the next queued sample frame, or an empty
/// marker when the queue is dry. A dry queue flags data-ready so the
/// dispatch loop produces the next sample; a served frame returns the
/// token to idle.
async fn respond_with_sample(
    slave: &mut I2cSlave<'static, I2C0>,
    samples: &SampleReceiver<'static>,
    sync: &SyncWriter<'static>,
) {
    match samples.try_receive() {
        Ok(frame) => {
            sync.clear();
            match postcard::to_vec::<SampleFrame, 80>(&frame) {
                Ok(encoded) => {
                    if let Err(e) = slave.respond_to_read(&encoded).await {
                        warn!("i2c respond error: {:?}", e);
                    }
                }
                Err(_) => warn!("sample frame {} did not encode", frame.seq),
            }
        }
        Err(_) => {
            sync.signal_data_ready();
            if let Err(e) = slave.respond_to_read(&[0]).await {
                warn!("i2c respond error: {:?}", e);
            }
        }
    }
}
