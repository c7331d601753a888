//! Blocking delays
//!
//! Busy-wait delays timed by counting CPU cycles. The loop body costs a few
//! cycles per iteration, so all delays here are approximate with a bias
//! towards running long. Peripheral-grade timing belongs on a timer; these
//! delays cover settling waits and polling-loop pacing.

use crate::clock::{Clock, Mclk};
use embedded_hal::delay::DelayNs;
use msp430::asm;

// Cost of one nop loop iteration: the nop plus decrement, compare and jump
const CYCLES_PER_ITER: u32 = 4;

/// Busy-waits at least `cycles` CPU cycles.
#[inline]
pub fn delay_cycles(cycles: u32) {
    for _ in 0..cycles / CYCLES_PER_ITER + 1 {
        asm::nop();
    }
}

/// Delay provider timed against MCLK
pub struct Delay {
    freq: u32,
}

impl Delay {
    /// Creates a delay provider from the frozen MCLK, capturing its
    /// frequency for the nanoseconds-to-cycles conversion.
    pub fn new(mclk: &Mclk) -> Self {
        Delay { freq: mclk.freq() }
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.freq as u64 / 1_000_000_000) as u32;
        delay_cycles(cycles);
    }
}
