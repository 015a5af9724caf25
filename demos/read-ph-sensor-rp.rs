#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::gpio::Pull;
use embassy_ph_sensor::{PhError, PhSensor, RpAnalogPin};
use embassy_time::{Duration, Timer};
use panic_probe as _;

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    // Probe signal on GPIO26 / ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);

    let mut sensor = PhSensor::new(RpAnalogPin::new(adc, channel));

    // Uncomment with the probe sitting in the matching buffer solution:
    // sensor.calibrate_neutral(&mut embassy_ph_sensor::DefmtConsole).ok();
    // sensor.calibrate_acid(&mut embassy_ph_sensor::DefmtConsole).ok();

    info!(
        "calibration: neutral {} mV, acid {} mV",
        sensor.neutral_voltage_mv(),
        sensor.acid_voltage_mv()
    );

    loop {
        match sensor.read_ph() {
            Ok(ph) => {
                let mv = sensor.read_voltage_mv().unwrap_or(0);
                info!("pH: {}, voltage: {} mV", ph, mv);
            }
            Err(e) => match e {
                PhError::ReadFailed => error!("ADC read failed"),
                PhError::InvalidCalibration => {
                    error!("calibration invalid, resetting to factory values");
                    sensor.reset_calibration();
                }
            },
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
