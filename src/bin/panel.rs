//! Rotary encoder and analog sensor panel.
//!
//! Shows the potentiometer and temperature readings on a 16x2 LCD until the
//! mode button is pressed, then switches permanently to the wheel angle and
//! raw edge count. Only a reset returns to the sensor view.
//!
//! Wiring for the STM32F103 "Blue Pill" board:
//!
//! ```
//! Encoder channel A -> PA8  (pull-up, EXTI8)
//! Encoder channel B -> PA9  (pull-up, EXTI9)
//! Mode button       -> PB1  (active low, pull-up, EXTI1)
//! Potentiometer     -> PA0  (ADC1 channel 0)
//! Temperature sense -> PA1  (ADC1 channel 1)
//! LCD RS/RW/EN      -> PA2 / PA3 / PA4
//! LCD D0..D7        -> PB5..PB12
//! ```
//!
//! Run with `cargo run -p encoder-panel --release --target thumbv7m-none-eabi`.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use embassy_executor::Spawner;
use embassy_stm32::{
    adc::{Adc, AdcChannel},
    exti::ExtiInput,
    gpio::{Level, Output, Pull, Speed},
    time::Hertz,
};
use embassy_time::{Delay, Duration, Ticker};
use encoder_logic::{Decoder, screen};
use encoder_panel::hardware::{
    analog_input::AnalogInputs,
    encoder::QuadratureLines,
    lcd1602::{Lcd1602, Line},
};
use {defmt_rtt as _, panic_probe as _};

/// Running edge count. Written only by [`watch_encoder`], read by the
/// render loop; a `load` is always a whole snapshot.
static POSITION: AtomicI32 = AtomicI32::new(0);

/// One-way mode latch. Flipped by the first button press, never cleared.
static POSITION_VIEW: AtomicBool = AtomicBool::new(false);

const REFRESH: Duration = Duration::from_millis(100);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            // Oscillator for bluepill, Bypass for nucleos.
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV1,
            mul: PllMul::MUL9,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
        // ADC clock must stay below 14 MHz; 72 MHz / 6 = 12 MHz.
        config.rcc.adc_pre = ADCPrescaler::DIV6;
    }
    let p = embassy_stm32::init(config);
    defmt::info!("encoder panel up");

    let lines = QuadratureLines::new(
        ExtiInput::new(p.PA8, p.EXTI8, Pull::Up),
        ExtiInput::new(p.PA9, p.EXTI9, Pull::Up),
    );
    let button = ExtiInput::new(p.PB1, p.EXTI1, Pull::Up);

    spawner.spawn(watch_encoder(lines)).unwrap();
    spawner.spawn(watch_button(button)).unwrap();

    let mut analog = AnalogInputs::new(
        Adc::new(p.ADC1),
        p.PA0.degrade_adc(),
        p.PA1.degrade_adc(),
    );

    let mut lcd = Lcd1602::new(
        Output::new(p.PA2, Level::Low, Speed::Low),
        Output::new(p.PA3, Level::Low, Speed::Low),
        Output::new(p.PA4, Level::Low, Speed::Low),
        [
            Output::new(p.PB5, Level::Low, Speed::Low),
            Output::new(p.PB6, Level::Low, Speed::Low),
            Output::new(p.PB7, Level::Low, Speed::Low),
            Output::new(p.PB8, Level::Low, Speed::Low),
            Output::new(p.PB9, Level::Low, Speed::Low),
            Output::new(p.PB10, Level::Low, Speed::Low),
            Output::new(p.PB11, Level::Low, Speed::Low),
            Output::new(p.PB12, Level::Low, Speed::Low),
        ],
        Delay,
    );
    lcd.initialize();

    let mut ticker = Ticker::every(REFRESH);
    loop {
        let (first, second) = if POSITION_VIEW.load(Ordering::Relaxed) {
            screen::position_lines(POSITION.load(Ordering::Relaxed))
        } else {
            screen::sensor_lines(analog.read_potentiometer(), analog.read_temperature())
        };

        lcd.select_line(Line::First);
        lcd.write_str(&first);
        lcd.select_line(Line::Second);
        lcd.write_str(&second);

        ticker.next().await;
    }
}

/// Serves every edge on either encoder line.
///
/// The pair is re-sampled after each event, so the observation may already
/// include the other line's change; the decoder applies at most one count
/// step per event and ignores pairs it cannot attribute to a single step.
#[embassy_executor::task]
async fn watch_encoder(mut lines: QuadratureLines) {
    let mut decoder = Decoder::new(lines.level());
    loop {
        lines.wait_for_edge().await;
        if let Some(step) = decoder.update(lines.level()) {
            POSITION.fetch_add(step.delta(), Ordering::Relaxed);
            defmt::trace!("step {}", step);
        }
    }
}

/// Latches the position view on the first press. Later presses store the
/// same value again; nothing ever writes `false` back.
#[embassy_executor::task]
async fn watch_button(mut button: ExtiInput<'static>) {
    loop {
        button.wait_for_falling_edge().await;
        if !POSITION_VIEW.swap(true, Ordering::Relaxed) {
            defmt::info!("mode button pressed, switching to position view");
        }
    }
}
