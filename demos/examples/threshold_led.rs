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

// ~2.4V in 12-bit counts relative to AVCC
const THRESHOLD: u16 = 3000;

// Lights the LED on P1.0 whenever the voltage on P1.1 reads at or above the
// threshold, checking it twenty times a second.
#[entry]
fn main() -> ! {
    let periph = msp430fr2355::Peripherals::take().unwrap();
    let _wdt = Wdt::constrain(periph.WDT_A);

    let pmm = Pmm::new(periph.PMM);
    let p1 = periph.P1.split(&pmm);
    let mut led = p1.pin0.to_output();
    let adc_pin = p1.pin1.to_alternate3();

    // ~1 MHz MCLK from the FLL for the delay loop
    let (mclk, _aclk) = periph
        .CS
        .constrain()
        .mclk_dcoclk(31, MclkDiv::_1)
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
        // .read() is infallible besides nb::WouldBlock, so it's safe to unwrap after block!()
        let sample = block!(adc.read(&adc_pin)).unwrap();
        if let Some(on) = switch.on_sample(sample) {
            led.set_state(on.into()).unwrap();
        }
        delay.delay_ms(50);
    }
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
