#![no_main]
#![no_std]
#![feature(abi_msp430_interrupt)]
#![feature(asm_experimental_arch)]

use embedded_hal::digital::*;
use msp430_rt::entry;
use msp430fr2355::{interrupt, TB1};
use msp430fr2x5x_windowctl::{
    adc::{
        AdcConfig, AdcIV, AdcInterrupts, ClockDivider, ClockSource, Predivider, Resolution,
        SampleTime, SampleTrigger, SamplingRate, VRef,
    },
    blink::{Blink, Retime},
    clock::MclkDiv,
    controller::Controller,
    gpio::{Output, Pin, Pin0, P1},
    lpm::request_lpm3_enable_interrupts,
    pmm::Pmm,
    prelude::*,
    shared::Shared,
    threshold::Window,
    timer::{TickTimer, TimerConfig},
    watchdog::Wdt,
};
use panic_msp430 as _;

// Window bounds in 10-bit counts relative to AVCC
const LOW: u16 = 341; // ~1.1V
const HIGH: u16 = 682; // ~2.2V

// Blink half-periods in ACLK ticks
const SLOW: u16 = 8191; // 2 Hz blink
const FAST: u16 = 2047; // 8 Hz blink

// One conversion every eighth of a second
const PACE_PERIOD: u16 = 4095;
const PACE_COMPARE: u16 = 2047;

static CONTROL: Shared<Controller<Blink>> = Shared::empty();
static VECTORS: Shared<AdcIV> = Shared::empty();
static BLINK_TIMER: Shared<TickTimer<TB1>> = Shared::empty();
static LED: Shared<Pin<P1, Pin0, Output>> = Shared::empty();

// Blinks the LED on P1.0 at a rate set by where the voltage on P1.1 falls
// relative to the window: fast above it, slow below it, held off inside it.
// A retiming command leaves the half-period in flight to finish at its old
// length, so the LED never glitches when the rate changes.
#[entry]
fn main() -> ! {
    let periph = msp430fr2355::Peripherals::take().unwrap();
    let _wdt = Wdt::constrain(periph.WDT_A);

    let pmm = Pmm::new(periph.PMM);
    let p1 = periph.P1.split(&pmm);
    let p2 = periph.P2.split(&pmm);

    let led = p1.pin0.to_output();
    let adc_pin = p1.pin1.to_alternate3();

    let xout = p2.pin6.to_alternate2();
    let xin = p2.pin7.to_alternate2();
    let (_mclk, aclk) = periph
        .CS
        .constrain()
        .mclk_refoclk(MclkDiv::_1)
        .smclk_off()
        .aclk_xt1(&xout, &xin)
        .freeze();

    // TB2's CCR1 edge paces the conversions; TB1 times the blinking
    let mut pacer = periph.TB2.to_tick_timer(TimerConfig::aclk(&aclk));
    pacer.enable_sample_trigger(PACE_COMPARE);

    let mut blink_timer = periph.TB1.to_tick_timer(TimerConfig::aclk(&aclk));
    blink_timer.enable_interrupts();
    blink_timer.start(SLOW);

    let window = Window::new(LOW, HIGH).unwrap();
    let adc = AdcConfig::new(
        ClockSource::ACLK,
        ClockDivider::_1,
        Predivider::_1,
        Resolution::_10BIT,
        SamplingRate::_200KSPS,
        SampleTime::_8,
    )
    .configure(periph.ADC);
    let (_windowed, vectors) = adc.into_windowed(
        window,
        SampleTrigger::TimerB2,
        &adc_pin,
        VRef::Avcc,
        AdcInterrupts::window(),
    );

    CONTROL.put(Controller::new(window, Blink::new(SLOW, FAST)));
    VECTORS.put(vectors);
    BLINK_TIMER.put(blink_timer);
    LED.put(led);

    pacer.start(PACE_PERIOD);

    loop {
        request_lpm3_enable_interrupts();
    }
}

#[interrupt]
fn ADC() {
    let Some(vector) = VECTORS.with(|iv| iv.interrupt_vector()) else {
        return;
    };
    let Some(zone) = vector.zone() else {
        return;
    };
    let Some(Some(command)) = CONTROL.with(|control| control.on_zone(zone)) else {
        return;
    };
    match command {
        Retime::Period(period) => {
            BLINK_TIMER.with(|timer| timer.retime(period));
        }
        Retime::Freeze { level } => {
            BLINK_TIMER.with(|timer| timer.pause());
            LED.with(|led| led.set_state(level.into()).unwrap());
        }
    }
}

#[interrupt]
fn TIMER1_B0() {
    let Some(level) = CONTROL.with(|control| control.on_tick()) else {
        return;
    };
    LED.with(|led| led.set_state(level.into()).unwrap());
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
