//! Threshold-driven control of PWM, blink and switching outputs for the MSP430FR2x5x family of
//! microcontrollers, built around the ADC window comparator. Here are the [`datasheet`] and
//! [`User's guide`] for reference.
//!
//! An analog input is converted continuously and classified against a two-threshold
//! [`Window`](threshold::Window) (in silicon, through the window comparator) or a single
//! [`Threshold`](threshold::Threshold) (in software), and the resulting zone drives an actuator:
//! a PWM duty-cycle ramp, a retimed LED blinker or a plain on/off switch. The classification
//! state machine and the actuators are plain data types that build and test on the host; the
//! driver modules wire them to the ADC, TimerB, GPIO, PMM and clock system hardware.
//!
//! As of this writing, the only supported board is the MSP430FR2355.
//!
//! [`datasheet`]: http://www.ti.com/lit/ds/symlink/msp430fr2355.pdf
//! [`User's guide`]: http://www.ti.com/lit/ug/slau445i/slau445i.pdf
//!
//! # Usage
//!
//! Requires `msp430-elf-gcc` installed and in $PATH to build for the target. The peripheral
//! driver modules only exist when building for the MSP430; the classification and actuator
//! modules build anywhere and run their unit tests on the host with a plain `cargo test`.
//!
//! When using this crate as a dependency, make sure you include the appropriate `memory.x` file
//! for your microcontroller.
//!
//! # Demos
//!
//! The `demos/` directory is a standalone crate of binaries wiring the control loop in its
//! different shapes: interrupt-driven or polled, windowed or single-threshold.

#![no_std]
#![cfg_attr(target_arch = "msp430", feature(asm_experimental_arch))]
#![deny(missing_docs)]

#[cfg(target_arch = "msp430")]
pub mod adc;
pub mod blink;
#[cfg(target_arch = "msp430")]
pub mod clock;
pub mod controller;
#[cfg(target_arch = "msp430")]
pub mod delay;
pub mod error;
#[cfg(target_arch = "msp430")]
pub mod gpio;
#[cfg(target_arch = "msp430")]
pub mod lpm;
#[cfg(target_arch = "msp430")]
pub mod pmm;
#[cfg(target_arch = "msp430")]
pub mod prelude;
#[cfg(target_arch = "msp430")]
pub mod pwm;
pub mod ramp;
pub mod shared;
pub mod switch;
pub mod threshold;
#[cfg(target_arch = "msp430")]
pub mod timer;
#[cfg(target_arch = "msp430")]
pub mod watchdog;

#[cfg(target_arch = "msp430")]
mod hw_traits;

#[cfg(target_arch = "msp430")]
pub use msp430fr2355 as pac;
