//! Blocking reads of the two analog sensors through ADC1.

use embassy_stm32::adc::{Adc, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;

/// The potentiometer and temperature-sensor channels, read one at a time
/// over the single ADC.
pub struct AnalogInputs {
    adc: Adc<'static, ADC1>,
    pot: AnyAdcChannel<ADC1>,
    temp: AnyAdcChannel<ADC1>,
}

impl AnalogInputs {
    pub fn new(
        mut adc: Adc<'static, ADC1>,
        pot: AnyAdcChannel<ADC1>,
        temp: AnyAdcChannel<ADC1>,
    ) -> Self {
        // The longest sample window the part offers. It is counted in ADC
        // clock cycles, so the source settling time does not shift when the
        // core clock tree changes.
        adc.set_sample_time(SampleTime::CYCLES239_5);
        Self { adc, pot, temp }
    }

    /// Raw 12-bit potentiometer reading. Blocks through sample and
    /// conversion; a conversion that never completes stalls the caller.
    pub fn read_potentiometer(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.pot)
    }

    /// Raw 12-bit reading of the board temperature sensor.
    pub fn read_temperature(&mut self) -> u16 {
        self.adc.blocking_read(&mut self.temp)
    }
}
