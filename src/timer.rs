//! Timer abstraction
//!
//! [`TickTimer`] is a periodic up-mode timer used as the tick source for the
//! actuator drivers. It fires on capture-compare register 0, can be retimed
//! while running (the new period is latched in at the next wrap to zero, so
//! the period in flight completes at its old length) and can emit a hardware
//! trigger pulse on capture-compare register 1 for pacing ADC conversions.

use crate::clock::{Aclk, Smclk};
use crate::hw_traits::timerb::{CCRn, Outmod, Tbssel, TimerB};
use core::convert::Infallible;
use msp430fr2355 as pac;

pub use crate::hw_traits::timerb::{TimerDiv, TimerExDiv, CCR0, CCR1, CCR2};

/// Configures all drivers that run on the TimerB timers
pub struct TimerConfig {
    sel: Tbssel,
    div: TimerDiv,
    ex_div: TimerExDiv,
}

impl TimerConfig {
    /// Configure timer clock source to ACLK
    pub fn aclk(_aclk: &Aclk) -> Self {
        TimerConfig {
            sel: Tbssel::Aclk,
            div: TimerDiv::_1,
            ex_div: TimerExDiv::_1,
        }
    }

    /// Configure timer clock source to SMCLK
    pub fn smclk(_smclk: &Smclk) -> Self {
        TimerConfig {
            sel: Tbssel::Smclk,
            div: TimerDiv::_1,
            ex_div: TimerExDiv::_1,
        }
    }

    /// Configure timer clock source to INCLK
    pub fn inclk() -> Self {
        TimerConfig {
            sel: Tbssel::Inclk,
            div: TimerDiv::_1,
            ex_div: TimerExDiv::_1,
        }
    }

    /// Configure timer clock source to TBCLK
    pub fn tbclk() -> Self {
        TimerConfig {
            sel: Tbssel::Tbxclk,
            div: TimerDiv::_1,
            ex_div: TimerExDiv::_1,
        }
    }

    /// Configure the normal clock divider and expansion clock divider settings
    pub fn clk_div(self, div: TimerDiv, ex_div: TimerExDiv) -> Self {
        TimerConfig {
            sel: self.sel,
            div,
            ex_div,
        }
    }

    pub(crate) fn write_regs<T: TimerB>(self, timer: &T) {
        timer.reset();
        timer.set_tbidex(self.ex_div);
        timer.config_clock(self.sel, self.div);
    }
}

/// Trait of timer peripherals usable by this crate's drivers (sealed)
pub trait TimerPeriph: TimerB {}

impl TimerPeriph for pac::TB0 {}
impl TimerPeriph for pac::TB1 {}
impl TimerPeriph for pac::TB2 {}
impl TimerPeriph for pac::TB3 {}

/// Trait of timer peripherals with capture-compare register `C` (sealed)
pub trait CapCmp<C>: CCRn<C> + TimerPeriph {}

impl<T: TimerPeriph + CCRn<C>, C> CapCmp<C> for T {}

/// Periodic tick timer
pub struct TickTimer<T: CapCmp<CCR0>> {
    timer: T,
}

/// Extension trait for creating tick timers
pub trait TimerExt {
    #[doc(hidden)]
    type Tick;

    /// Create a periodic tick timer out of the peripheral
    fn to_tick_timer(self, config: TimerConfig) -> Self::Tick;
}

impl<T: CapCmp<CCR0>> TimerExt for T {
    type Tick = TickTimer<T>;

    fn to_tick_timer(self, config: TimerConfig) -> TickTimer<T> {
        config.write_regs(&self);
        TickTimer { timer: self }
    }
}

impl<T: CapCmp<CCR0>> TickTimer<T> {
    /// Starts ticking with the given period. The counter runs from 0 through
    /// `period`, so a tick fires every `period + 1` timer clocks.
    pub fn start(&mut self, period: u16) {
        if !self.timer.is_stopped() {
            self.timer.stop();
        }
        // Immediate load for the initial period write, then latch further
        // period writes to the wrap point. CCIE is left untouched so the
        // tick interrupt survives a restart.
        CCRn::<CCR0>::latch_cmp_immediate(&self.timer);
        CCRn::<CCR0>::set_ccrn(&self.timer, period);
        CCRn::<CCR0>::latch_cmp_on_zero(&self.timer);
        CCRn::<CCR0>::ccifg_clr(&self.timer);
        self.timer.upmode();
    }

    /// Changes the tick period without disturbing the period in flight.
    ///
    /// While running, the new period takes effect when the counter next
    /// wraps to zero. If the timer was paused, ticking restarts from zero
    /// with the new period.
    pub fn retime(&mut self, period: u16) {
        if self.timer.is_stopped() {
            self.start(period);
        } else {
            CCRn::<CCR0>::set_ccrn(&self.timer, period);
        }
    }

    /// Stops the counter, freezing ticks until `retime` or `start` runs it
    /// again. A tick request already latched when the timer stops is
    /// discarded, so no stale tick interrupt fires once this returns.
    pub fn pause(&mut self) {
        self.timer.stop();
        CCRn::<CCR0>::ccifg_clr(&self.timer);
    }

    /// Waits for the next tick, clearing the tick flag when it fires.
    pub fn wait(&mut self) -> nb::Result<(), Infallible> {
        if CCRn::<CCR0>::ccifg_rd(&self.timer) {
            CCRn::<CCR0>::ccifg_clr(&self.timer);
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Enables the tick interrupt, which fires on the dedicated `TIMERx_B0`
    /// vector. The flag is cleared by hardware when the vector is serviced.
    pub fn enable_interrupts(&mut self) {
        CCRn::<CCR0>::ccie_set(&self.timer);
    }

    /// Disables the tick interrupt.
    pub fn disable_interrupts(&mut self) {
        CCRn::<CCR0>::ccie_clr(&self.timer);
    }
}

impl<T: CapCmp<CCR0> + CapCmp<CCR1>> TickTimer<T> {
    /// Routes a set/reset pulse out of capture-compare register 1: the
    /// timer's CCR1 output goes high when the counter reaches `compare` and
    /// low again at the end of the period. The rising edge can start
    /// hardware-triggered ADC conversions, giving one conversion per tick
    /// period with no software in the loop.
    pub fn enable_sample_trigger(&mut self, compare: u16) {
        CCRn::<CCR1>::set_ccrn(&self.timer, compare);
        CCRn::<CCR1>::config_cmp_mode(&self.timer, Outmod::SetReset);
    }
}
