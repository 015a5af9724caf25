//! Driver for the DFRobot Gravity analog pH probe.
//!
//! The probe presents as a plain analog voltage; everything interesting is
//! the calibration that maps that voltage to pH. The driver owns the analog
//! source, the current [`PhCalibration`] and the compensation temperature,
//! so several probes can run side by side with independent calibration.

use crate::analog::{AnalogSource, CalibrationFeedback};
use crate::calibration::PhCalibration;
use crate::PhError;

pub struct PhSensor<A: AnalogSource> {
    source: A,
    calibration: PhCalibration,
    temperature_c: f32,
}

impl<A: AnalogSource> PhSensor<A> {
    /// Create a sensor on the given analog input with factory calibration.
    pub fn new(source: A) -> Self {
        Self::with_calibration(source, PhCalibration::DEFAULT)
    }

    /// Create a sensor with a previously captured calibration, e.g. one the
    /// application persisted itself. The driver keeps calibration in memory
    /// only.
    pub fn with_calibration(source: A, calibration: PhCalibration) -> Self {
        Self {
            source,
            calibration,
            temperature_c: crate::DEFAULT_TEMPERATURE_C,
        }
    }

    /// Set the compensation temperature in Celsius.
    ///
    /// Stored unconditionally and threaded into the conversion, which
    /// currently ignores it (see [`PhCalibration::ph_from_millivolts`]).
    pub fn set_temperature(&mut self, celsius: f32) {
        self.temperature_c = celsius;
    }

    /// Current compensation temperature in Celsius.
    pub fn temperature_c(&self) -> f32 {
        self.temperature_c
    }

    /// Current calibration.
    pub fn calibration(&self) -> PhCalibration {
        self.calibration
    }

    /// Read the probe and convert to pH, clamped to [0, 14] and rounded to
    /// two decimals.
    pub fn read_ph(&mut self) -> Result<f32, PhError> {
        let voltage = self.sample_millivolts()?;
        self.calibration
            .ph_from_millivolts(voltage, self.temperature_c)
    }

    /// Read the probe voltage, rounded to the nearest millivolt.
    pub fn read_voltage_mv(&mut self) -> Result<i32, PhError> {
        let voltage = self.sample_millivolts()?;
        Ok(libm::roundf(voltage) as i32)
    }

    /// Read the raw ADC count, for diagnostics.
    pub fn read_raw(&mut self) -> Result<u16, PhError> {
        self.source.sample()
    }

    /// Convert an ADC count from this sensor's source to millivolts.
    pub fn adc_to_millivolts(&self, count: u16) -> f32 {
        count as f32 / self.source.max_count() as f32 * self.source.reference_mv()
    }

    /// Convert a probe voltage to pH using the stored calibration and
    /// compensation temperature, without touching the hardware.
    pub fn ph_from_millivolts(&self, voltage_mv: f32) -> Result<f32, PhError> {
        self.calibration
            .ph_from_millivolts(voltage_mv, self.temperature_c)
    }

    /// Capture the neutral calibration point.
    ///
    /// Call with the probe sitting in pH 7.0 buffer solution. The sampled
    /// voltage replaces the stored neutral point and is acknowledged on the
    /// feedback channel ("N", then the voltage). Returns the stored value
    /// in millivolts.
    pub fn calibrate_neutral(
        &mut self,
        feedback: &mut impl CalibrationFeedback,
    ) -> Result<f32, PhError> {
        let voltage = self.sample_millivolts()?;
        self.calibration.neutral_mv = voltage;
        feedback.show_marker("N");
        feedback.show_value(libm::roundf(voltage) as i32);
        Ok(voltage)
    }

    /// Capture the acid calibration point (probe in pH 4.0 buffer).
    /// Acknowledged with marker "A". Returns the stored value in millivolts.
    pub fn calibrate_acid(
        &mut self,
        feedback: &mut impl CalibrationFeedback,
    ) -> Result<f32, PhError> {
        let voltage = self.sample_millivolts()?;
        self.calibration.acid_mv = voltage;
        feedback.show_marker("A");
        feedback.show_value(libm::roundf(voltage) as i32);
        Ok(voltage)
    }

    /// Restore the factory calibration.
    pub fn reset_calibration(&mut self) {
        self.calibration = PhCalibration::DEFAULT;
    }

    /// Overwrite both calibration points directly, e.g. with values the
    /// application restored from its own storage. Both fields are replaced
    /// together; nothing validates that they differ.
    pub fn set_calibration(&mut self, neutral_mv: f32, acid_mv: f32) {
        self.calibration = PhCalibration::new(neutral_mv, acid_mv);
    }

    /// Stored neutral calibration voltage, rounded to the nearest millivolt.
    pub fn neutral_voltage_mv(&self) -> i32 {
        libm::roundf(self.calibration.neutral_mv) as i32
    }

    /// Stored acid calibration voltage, rounded to the nearest millivolt.
    pub fn acid_voltage_mv(&self) -> i32 {
        libm::roundf(self.calibration.acid_mv) as i32
    }

    fn sample_millivolts(&mut self) -> Result<f32, PhError> {
        let count = self.source.sample()?;
        Ok(self.adc_to_millivolts(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Analog source fed from a queue of canned counts.
    struct MockAnalog {
        counts: Vec<u16>,
        next: usize,
    }

    impl MockAnalog {
        fn new(counts: &[u16]) -> Self {
            Self {
                counts: counts.to_vec(),
                next: 0,
            }
        }
    }

    impl AnalogSource for MockAnalog {
        fn sample(&mut self) -> Result<u16, PhError> {
            let count = *self.counts.get(self.next).ok_or(PhError::ReadFailed)?;
            self.next += 1;
            Ok(count)
        }
    }

    /// Records everything shown to the operator.
    #[derive(Default)]
    struct RecordingFeedback {
        markers: Vec<String>,
        values: Vec<i32>,
    }

    impl CalibrationFeedback for RecordingFeedback {
        fn show_marker(&mut self, marker: &str) {
            self.markers.push(marker.to_string());
        }

        fn show_value(&mut self, value: i32) {
            self.values.push(value);
        }
    }

    #[test]
    fn adc_conversion_matches_reference_formula() {
        let sensor = PhSensor::new(MockAnalog::new(&[]));
        for count in [0u16, 1, 255, 512, 1022, 1023] {
            assert_eq!(
                sensor.adc_to_millivolts(count),
                count as f32 / 1023.0 * 3300.0
            );
        }
    }

    #[test]
    fn read_ph_with_factory_calibration() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[512]));
        assert_eq!(sensor.read_ph(), Ok(6.15));
    }

    #[test]
    fn read_voltage_rounds_to_whole_millivolts() {
        // 512/1023 * 3300 = 1651.61... mV
        let mut sensor = PhSensor::new(MockAnalog::new(&[512]));
        assert_eq!(sensor.read_voltage_mv(), Ok(1652));
    }

    #[test]
    fn read_raw_passes_the_count_through() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[767]));
        assert_eq!(sensor.read_raw(), Ok(767));
    }

    #[test]
    fn read_failure_propagates() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[]));
        assert_eq!(sensor.read_ph(), Err(PhError::ReadFailed));
    }

    #[test]
    fn calibrate_neutral_stores_and_acknowledges_the_sample() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[465]));
        let mut feedback = RecordingFeedback::default();

        let stored = sensor.calibrate_neutral(&mut feedback).unwrap();

        let expected = 465.0 / 1023.0 * 3300.0;
        assert_eq!(stored, expected);
        assert_eq!(sensor.calibration().neutral_mv, expected);
        assert_eq!(feedback.markers, ["N"]);
        assert_eq!(feedback.values, [libm::roundf(expected) as i32]);
    }

    #[test]
    fn calibrate_acid_stores_and_acknowledges_the_sample() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[630]));
        let mut feedback = RecordingFeedback::default();

        let stored = sensor.calibrate_acid(&mut feedback).unwrap();

        let expected = 630.0 / 1023.0 * 3300.0;
        assert_eq!(stored, expected);
        assert_eq!(sensor.calibration().acid_mv, expected);
        assert_eq!(feedback.markers, ["A"]);
        assert_eq!(feedback.values, [libm::roundf(expected) as i32]);
    }

    #[test]
    fn failed_calibration_leaves_state_untouched() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[]));
        let mut feedback = RecordingFeedback::default();

        assert_eq!(
            sensor.calibrate_neutral(&mut feedback),
            Err(PhError::ReadFailed)
        );
        assert_eq!(sensor.calibration(), PhCalibration::DEFAULT);
        assert!(feedback.markers.is_empty());
    }

    #[test]
    fn reset_restores_factory_constants() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[465, 630]));
        sensor.calibrate_neutral(&mut ()).unwrap();
        sensor.calibrate_acid(&mut ()).unwrap();

        sensor.reset_calibration();

        assert_eq!(sensor.neutral_voltage_mv(), 1500);
        assert_eq!(sensor.acid_voltage_mv(), 2032);
        assert_eq!(sensor.calibration(), PhCalibration::DEFAULT);
    }

    #[test]
    fn manual_calibration_round_trips_through_the_getters() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[]));
        sensor.set_calibration(1497.3, 2040.8);
        assert_eq!(sensor.neutral_voltage_mv(), 1497);
        assert_eq!(sensor.acid_voltage_mv(), 2041);
    }

    #[test]
    fn manual_factory_values_behave_like_the_defaults() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[]));
        sensor.set_calibration(1500.0, 2032.44);
        assert_eq!(sensor.ph_from_millivolts(1500.0), Ok(7.0));
    }

    #[test]
    fn degenerate_manual_calibration_surfaces_as_an_error() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[512]));
        sensor.set_calibration(1500.0, 1500.0);
        assert_eq!(sensor.read_ph(), Err(PhError::InvalidCalibration));
    }

    #[test]
    fn temperature_is_stored_but_does_not_shift_the_reading() {
        let mut sensor = PhSensor::new(MockAnalog::new(&[512, 512]));
        let before = sensor.read_ph().unwrap();
        sensor.set_temperature(40.0);
        assert_eq!(sensor.temperature_c(), 40.0);
        assert_eq!(sensor.read_ph(), Ok(before));
    }

    /// A 12-bit source like the RP2040 ADC.
    struct TwelveBit(u16);

    impl AnalogSource for TwelveBit {
        fn sample(&mut self) -> Result<u16, PhError> {
            Ok(self.0)
        }

        fn max_count(&self) -> u16 {
            4095
        }
    }

    #[test]
    fn wider_converters_scale_through_their_own_full_range() {
        let mut sensor = PhSensor::new(TwelveBit(2048));
        let expected = libm::roundf(2048.0 / 4095.0 * 3300.0) as i32;
        assert_eq!(sensor.read_voltage_mv(), Ok(expected));
    }
}
