//! RP2040/RP2350 analog input adapter.
//!
//! Wraps the embassy-rp ADC in blocking mode behind [`AnalogSource`], so a
//! probe on one of the ADC-capable GPIOs (26..29) can feed the driver.

use core::sync::atomic::{AtomicU16, Ordering};

use embassy_rp::adc::{Adc, Blocking, Channel};

use crate::analog::AnalogSource;
use crate::PhError;

/// One ADC-capable GPIO as seen by the pH driver.
pub struct RpAnalogPin<'a> {
    adc: Adc<'a, Blocking>,
    channel: Channel<'a>,
    /// Last raw count, kept for diagnostics.
    last_raw: AtomicU16,
}

impl<'a> RpAnalogPin<'a> {
    pub fn new(adc: Adc<'a, Blocking>, channel: Channel<'a>) -> Self {
        Self {
            adc,
            channel,
            last_raw: AtomicU16::new(0),
        }
    }

    /// Last raw ADC count sampled through this pin.
    pub fn last_raw(&self) -> u16 {
        self.last_raw.load(Ordering::Relaxed)
    }
}

impl AnalogSource for RpAnalogPin<'_> {
    fn sample(&mut self) -> Result<u16, PhError> {
        let count = self
            .adc
            .blocking_read(&mut self.channel)
            .map_err(|_| PhError::ReadFailed)?;
        self.last_raw.store(count, Ordering::Relaxed);
        Ok(count)
    }

    // The RP2040 converter is 12-bit, not the probe board's nominal 10.
    fn max_count(&self) -> u16 {
        4095
    }
}
