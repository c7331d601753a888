#![no_main]
#![no_std]
#![feature(abi_msp430_interrupt)]
#![feature(asm_experimental_arch)]

use embedded_hal::pwm::SetDutyCycle;
use msp430_rt::entry;
use msp430fr2355::{interrupt, TB0};
use msp430fr2x5x_windowctl::{
    adc::{
        AdcConfig, AdcIV, AdcInterrupts, ClockDivider, ClockSource, Predivider, Resolution,
        SampleTime, SampleTrigger, SamplingRate, VRef,
    },
    clock::MclkDiv,
    controller::Controller,
    lpm::request_lpm3_enable_interrupts,
    pmm::{Pmm, ReferenceVoltage},
    prelude::*,
    pwm::{PwmChannel, CCR1},
    ramp::Ramp,
    shared::Shared,
    threshold::Window,
    timer::TimerConfig,
    watchdog::Wdt,
};
use panic_msp430 as _;

// Window thresholds in 12-bit counts against the 2.5V internal reference
const LOW: u16 = 2789; // ~1.7V
const HIGH: u16 = 3931; // ~2.4V

const PWM_PERIOD: u16 = 1023;
const DUTY_STEP: u16 = 10;
// 4 samples and ramp steps per second at 32768 Hz ACLK
const TICK_PERIOD: u16 = 8191;
const TRIGGER_COMPARE: u16 = 4095;

static CONTROL: Shared<Controller<Ramp>> = Shared::empty();
static VECTORS: Shared<AdcIV> = Shared::empty();
static PWM: Shared<PwmChannel<TB0, CCR1>> = Shared::empty();

// Ramps the PWM duty cycle on P1.6 while the voltage on P1.2 sits outside the
// comparator window: up toward full scale above it, down toward zero below it.
// Inside the window the duty holds. The CPU sleeps in LPM3 the whole time;
// sampling, classification and the ramp all run off the watch crystal.
#[entry]
fn main() -> ! {
    let periph = msp430fr2355::Peripherals::take().unwrap();
    let _wdt = Wdt::constrain(periph.WDT_A);

    let mut pmm = Pmm::new(periph.PMM);
    let p1 = periph.P1.split(&pmm);
    let p2 = periph.P2.split(&pmm);

    let xout = p2.pin6.to_alternate2();
    let xin = p2.pin7.to_alternate2();
    let (_mclk, aclk) = periph
        .CS
        .constrain()
        .mclk_refoclk(MclkDiv::_1)
        .smclk_off()
        .aclk_xt1(&xout, &xin)
        .freeze();

    let vref = pmm.enable_internal_reference(ReferenceVoltage::_2V5);
    let adc_pin = p1.pin2.to_alternate3();

    let pwm_pin = p1.pin6.to_output().to_alternate2();
    let pwm = PwmChannel::new(periph.TB0, TimerConfig::aclk(&aclk), PWM_PERIOD, pwm_pin);

    // TB1 paces everything: its CCR1 edge starts each conversion and its
    // CCR0 interrupt steps the ramp
    let mut tick = periph.TB1.to_tick_timer(TimerConfig::aclk(&aclk));
    tick.enable_sample_trigger(TRIGGER_COMPARE);
    tick.enable_interrupts();

    let window = Window::new(LOW, HIGH).unwrap();
    let adc = AdcConfig::new(
        ClockSource::ACLK,
        ClockDivider::_1,
        Predivider::_1,
        Resolution::_12BIT,
        SamplingRate::_200KSPS,
        SampleTime::_16,
    )
    .configure(periph.ADC);
    let (_windowed, vectors) = adc.into_windowed(
        window,
        SampleTrigger::TimerB1,
        &adc_pin,
        VRef::Internal(&vref),
        AdcInterrupts::window(),
    );

    CONTROL.put(Controller::new(window, Ramp::new(PWM_PERIOD, DUTY_STEP)));
    VECTORS.put(vectors);
    PWM.put(pwm);

    tick.start(TICK_PERIOD);

    loop {
        request_lpm3_enable_interrupts();
    }
}

#[interrupt]
fn ADC() {
    let Some(vector) = VECTORS.with(|iv| iv.interrupt_vector()) else {
        return;
    };
    if let Some(zone) = vector.zone() {
        CONTROL.with(|control| control.on_zone(zone));
    }
}

#[interrupt]
fn TIMER1_B0() {
    let Some(duty) = CONTROL.with(|control| control.on_tick()) else {
        return;
    };
    PWM.with(|pwm| pwm.set_duty_cycle(duty).unwrap());
}

// The compiler will emit calls to the abort() compiler intrinsic if debug assertions are
// enabled (default for dev profile). MSP430 does not actually have meaningful abort() support
// so for now, we create our own in each application where debug assertions are present.
#[no_mangle]
extern "C" fn abort() -> ! {
    panic!();
}
