//! GPIO diagnostic-line adapter
//!
//! Drives a DiagnosticPin over an embassy-rp GPIO output. The lines
//! exist for oscilloscope correlation only.

use embassy_rp::gpio::Output;

use crate::ports::diagnostics::DiagnosticPin;

/// One debug line on a GPIO output
pub struct DebugLine<'d> {
    pin: Output<'d>,
}

impl<'d> DebugLine<'d> {
    /// Wrap a configured GPIO output
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl DiagnosticPin for DebugLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }
}
