#![cfg_attr(not(test), no_std)]

mod analog;
mod calibration;
mod ph_sensor;

#[cfg(feature = "rp2040")]
mod ph_rp;

pub use analog::{AnalogSource, CalibrationFeedback, DefmtConsole};
pub use calibration::PhCalibration;
pub use ph_sensor::PhSensor;

#[cfg(feature = "rp2040")]
pub use ph_rp::RpAnalogPin;

/// Factory calibration voltage of the probe in pH 7.0 buffer solution.
pub const DEFAULT_NEUTRAL_MV: f32 = 1500.0;

/// Factory calibration voltage of the probe in pH 4.0 buffer solution.
pub const DEFAULT_ACID_MV: f32 = 2032.44;

/// Compensation temperature assumed until the caller sets one.
pub const DEFAULT_TEMPERATURE_C: f32 = 25.0;

/// Full-scale count of the 10-bit ADC the probe board is specified against.
pub const ADC_FULL_SCALE: u16 = 1023;

/// Analog reference voltage of the probe board, in millivolts.
pub const VREF_MILLIVOLTS: f32 = 3300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum PhError {
    /// The ADC sample could not be read.
    ReadFailed,
    /// Both calibration voltages are equal, so the two-point slope is
    /// undefined. Recalibrate or reset before converting.
    InvalidCalibration,
}
