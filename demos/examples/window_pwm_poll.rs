#![no_main]
#![no_std]

use embedded_hal::pwm::SetDutyCycle;
use msp430_rt::entry;
use msp430fr2x5x_windowctl::{
    adc::{
        AdcConfig, AdcInterrupts, ClockDivider, ClockSource, Predivider, Resolution, SampleTime,
        SampleTrigger, SamplingRate, VRef,
    },
    clock::{MclkDiv, SmclkDiv},
    controller::{Controller, Event, Response},
    pmm::{Pmm, ReferenceVoltage},
    prelude::*,
    pwm::{PwmChannel, CCR1},
    ramp::Ramp,
    threshold::Window,
    timer::{TimerConfig, TimerDiv, TimerExDiv},
    watchdog::Wdt,
};
use nb::block;
use panic_msp430 as _;

const LOW: u16 = 2789;
const HIGH: u16 = 3931;

const PWM_PERIOD: u16 = 1023;
const DUTY_STEP: u16 = 25;
// Roughly half a second at SMCLK / 64
const TICK_PERIOD: u16 = 8191;
const TRIGGER_COMPARE: u16 = 4095;

// Polled variant of window_pwm: TB1 still paces the ADC in hardware, but the
// main loop classifies the samples and steps the ramp itself, one pass per
// tick, instead of sleeping on the window comparator interrupts. Everything
// runs off the ~1 MHz DCO, which also pushes the PWM up to ~1 kHz.
#[entry]
fn main() -> ! {
    let periph = msp430fr2355::Peripherals::take().unwrap();
    let _wdt = Wdt::constrain(periph.WDT_A);

    let mut pmm = Pmm::new(periph.PMM);
    let p1 = periph.P1.split(&pmm);

    let (_mclk, smclk, _aclk) = periph
        .CS
        .constrain()
        .mclk_dcoclk(31, MclkDiv::_1)
        .smclk_on(SmclkDiv::_1)
        .aclk_vloclk()
        .freeze();

    let vref = pmm.enable_internal_reference(ReferenceVoltage::_2V5);
    let adc_pin = p1.pin2.to_alternate3();

    let pwm_pin = p1.pin6.to_output().to_alternate2();
    let mut pwm = PwmChannel::new(periph.TB0, TimerConfig::smclk(&smclk), PWM_PERIOD, pwm_pin);

    let mut tick = periph.TB1.to_tick_timer(
        TimerConfig::smclk(&smclk).clk_div(TimerDiv::_8, TimerExDiv::_8),
    );
    tick.enable_sample_trigger(TRIGGER_COMPARE);

    let window = Window::new(LOW, HIGH).unwrap();
    let adc = AdcConfig::new(
        ClockSource::SMCLK,
        ClockDivider::_1,
        Predivider::_1,
        Resolution::_12BIT,
        SamplingRate::_200KSPS,
        SampleTime::_16,
    )
    .configure(periph.ADC);
    let (mut windowed, _vectors) = adc.into_windowed(
        window,
        SampleTrigger::TimerB1,
        &adc_pin,
        VRef::Internal(&vref),
        AdcInterrupts::empty(),
    );

    let mut control = Controller::new(window, Ramp::new(PWM_PERIOD, DUTY_STEP));

    tick.start(TICK_PERIOD);

    loop {
        // The conversion triggered mid-period has long finished by the wrap
        block!(tick.wait()).unwrap();

        // A conversion that overran its trigger period is dropped; the ramp
        // keeps moving in its last direction
        if let Ok(sample) = windowed.result() {
            control.dispatch(Event::Sample(sample));
        }
        if let Response::Drive(duty) = control.dispatch(Event::Tick) {
            pwm.set_duty_cycle(duty).unwrap();
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
