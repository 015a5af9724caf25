//! Hardware seams: the analog input the probe hangs off, and the display
//! used to acknowledge calibration captures to the operator.
//!
//! Keeping both behind traits lets the conversion and calibration logic run
//! against mocks on the host, and lets boards other than the RP2040 plug in.

use crate::PhError;

/// A single analog input line the pH probe is wired to.
pub trait AnalogSource {
    /// Take one blocking ADC sample.
    fn sample(&mut self) -> Result<u16, PhError>;

    /// Full-scale count of the converter behind this source.
    ///
    /// Defaults to the 10-bit range the probe board is specified against.
    /// Adapters with wider converters override this.
    fn max_count(&self) -> u16 {
        crate::ADC_FULL_SCALE
    }

    /// Analog reference voltage in millivolts.
    fn reference_mv(&self) -> f32 {
        crate::VREF_MILLIVOLTS
    }
}

/// Operator feedback during buffer-solution calibration.
///
/// The calibration routines show a one-letter marker ("N" or "A") followed
/// by the captured voltage, so whoever is holding the probe in the buffer
/// knows the capture happened and what was stored.
pub trait CalibrationFeedback {
    fn show_marker(&mut self, marker: &str);
    fn show_value(&mut self, value: i32);
}

/// Headless operation: calibration runs silently.
impl CalibrationFeedback for () {
    fn show_marker(&mut self, _marker: &str) {}
    fn show_value(&mut self, _value: i32) {}
}

/// Feedback over the defmt log channel.
pub struct DefmtConsole;

impl CalibrationFeedback for DefmtConsole {
    fn show_marker(&mut self, marker: &str) {
        defmt::info!("calibration: {}", marker);
    }

    fn show_value(&mut self, value: i32) {
        defmt::info!("calibration: {} mV", value);
    }
}
