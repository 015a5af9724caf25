//! Two-point calibration model for the pH probe.
//!
//! The probe is calibrated against two buffer solutions of known pH
//! (7.0 neutral, 4.0 acid). The captured voltages parameterize a linear
//! slope/intercept fit that maps probe voltage to pH.

use crate::PhError;

/// Calibration voltages captured in the two buffer solutions, in millivolts.
///
/// The factory defaults are asymmetric on purpose: 1500 mV is the probe's
/// nominal output in neutral solution, 2032.44 mV its nominal output in
/// pH 4.0 buffer.
#[derive(Clone, Copy, Debug, PartialEq, defmt::Format)]
pub struct PhCalibration {
    /// Probe voltage in pH 7.0 buffer solution.
    pub neutral_mv: f32,
    /// Probe voltage in pH 4.0 buffer solution.
    pub acid_mv: f32,
}

impl PhCalibration {
    /// Factory calibration of the probe.
    pub const DEFAULT: Self = Self {
        neutral_mv: crate::DEFAULT_NEUTRAL_MV,
        acid_mv: crate::DEFAULT_ACID_MV,
    };

    /// Create a calibration from explicit buffer voltages.
    ///
    /// Not validated; a calibration with equal voltages is representable
    /// but every conversion through it fails with
    /// [`PhError::InvalidCalibration`].
    pub const fn new(neutral_mv: f32, acid_mv: f32) -> Self {
        Self { neutral_mv, acid_mv }
    }

    /// Whether the two points define a usable slope.
    pub fn is_valid(&self) -> bool {
        self.neutral_mv != self.acid_mv
    }

    /// Convert a probe voltage to pH.
    ///
    /// The result is clamped to [0, 14] and rounded to two decimals.
    /// `_temperature_c` is a compensation placeholder: the upstream formula
    /// accepts it but does not consume it, and this driver reproduces that
    /// behavior rather than guessing at a Nernst-style correction.
    pub fn ph_from_millivolts(
        &self,
        voltage_mv: f32,
        _temperature_c: f32,
    ) -> Result<f32, PhError> {
        if !self.is_valid() {
            return Err(PhError::InvalidCalibration);
        }

        let neutral = (self.neutral_mv - 1500.0) / 3.0;
        let acid = (self.acid_mv - 1500.0) / 3.0;

        let slope = (7.0 - 4.0) / (neutral - acid);
        let intercept = 7.0 - slope * neutral;

        let ph = (slope * (voltage_mv - 1500.0) / 3.0 + intercept).clamp(0.0, 14.0);
        Ok(libm::roundf(ph * 100.0) / 100.0)
    }
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}
