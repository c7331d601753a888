#![no_main]
#![no_std]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::*;
use msp430_rt::entry;
use msp430fr2x5x_windowctl::{
    adc::{AdcConfig, ClockDivider, ClockSource, Predivider, Resolution, SampleTime, SamplingRate},
    clock::MclkDiv,
    delay::Delay,
    pmm::Pmm,
    prelude::*,
    switch::Switch,
    threshold::Threshold,
    watchdog::Wdt,
};
use nb::block;
use panic_msp430 as _;

// Half of the 12-bit scale, so the tone starts at AVCC / 2
const THRESHOLD: u16 = 2048;

// Half-period of the 2 kHz tone
const TONE_HALF_PERIOD_US: u32 = 250;
// Toggles per burst; one burst lasts 25 ms, then the input is checked again
const BURST_TOGGLES: u16 = 100;

// Sounds a 2 kHz tone on a piezo buzzer wired to P1.7 while the voltage on
// P1.5 sits at or above the threshold. The buzzer pin is driven directly;
// between bursts the input is re-read, so the tone stops within 25 ms of the
// signal dropping.
#[entry]
fn main() -> ! {
    let periph = msp430fr2355::Peripherals::take().unwrap();
    let _wdt = Wdt::constrain(periph.WDT_A);

    let pmm = Pmm::new(periph.PMM);
    let p1 = periph.P1.split(&pmm);
    let mut buzzer = p1.pin7.to_output();
    let adc_pin = p1.pin5.to_alternate3();

    // ~8 MHz MCLK keeps the toggle timing tight relative to the 250 us half-period
    let (mclk, _aclk) = periph
        .CS
        .constrain()
        .mclk_dcoclk(244, MclkDiv::_1)
        .smclk_off()
        .aclk_vloclk()
        .freeze();
    let mut delay = Delay::new(&mclk);

    let mut adc = AdcConfig::new(
        ClockSource::MODCLK,
        ClockDivider::_1,
        Predivider::_1,
        Resolution::_12BIT,
        SamplingRate::_200KSPS,
        SampleTime::_16,
    )
    .configure(periph.ADC)
    .into_enabled();

    let mut switch = Switch::new(Threshold::new(THRESHOLD));

    loop {
        let sample = block!(adc.read(&adc_pin)).unwrap();
        if switch.on_sample(sample) == Some(false) {
            // Just switched off; park the pin low so the buzzer isn't left
            // half way through a cycle with current flowing
            buzzer.set_low().unwrap();
        }
        if switch.is_on() {
            for _ in 0..BURST_TOGGLES {
                buzzer.toggle().unwrap();
                delay.delay_us(TONE_HALF_PERIOD_US);
            }
        } else {
            delay.delay_ms(25);
        }
    }
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
