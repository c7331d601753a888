//! Low Power Mode (LPM) control
//!
//! # LPM0
//! LPM0 turns off the CPU, while the rest of the system continues unimpeded. Entering LPM0 has no
//! special requirements.
//!
//! # LPM3
//! LPM3 turns off most high frequency clocks (FLL and DCO subsystems, MODCLK, etc.), most notably
//! SMCLK. Peripherals clocked from ACLK keep running, which is what lets a timer-paced ADC loop
//! sample and classify with the CPU asleep.
//!
//! LPM3 will only be entered if no peripherals have been configured to use SMCLK, otherwise LPM0
//! will be entered instead.
//!
//! GPIO pins maintain the value they had when the low power mode was entered.

// Status register:
// SCG1 SCG0 OSC_OFF CPU_OFF GIE N Z C
// 7    6    5       4       3   2 1 0
const SCG1: u8 = 1 << 7;
const SCG0: u8 = 1 << 6;
const CPU_OFF: u8 = 1 << 4;
const GIE: u8 = 1 << 3;

/// For each set bit in the bitmask, set the corresponding bit in the status register.
#[inline(always)]
fn set_sr_bits<const MASK: u8>() {
    unsafe {
        core::arch::asm!("bis.b #{mask}, SR", mask = const MASK, options(nomem, nostack))
    };
}

/// Enter Low Power Mode 0 (LPM0).
///
/// In LPM0 the CPU and MCLK are disabled.
///
/// Power draw in LPM0: Approx 40 uA / MHz.
#[inline(always)]
pub fn enter_lpm0() {
    const LPM0: u8 = CPU_OFF;
    set_sr_bits::<LPM0>();
}

/// Request Low Power Mode 3 (LPM3).
///
/// LPM3 can only be reached if no peripherals have been configured to use SMCLK.
/// If any peripherals are configured to use SMCLK then LPM0 will be entered instead.
///
/// In LPM3 the CPU, FLL, and all clocks (except ACLK) are disabled.
///
/// Power draw in LPM3: Approx 1.4 uA.
#[inline(always)]
pub fn request_lpm3() {
    const LPM3: u8 = SCG1 + SCG0 + CPU_OFF;
    set_sr_bits::<LPM3>();
}

/// Request LPM3 and enable interrupts in the same instruction.
///
/// A wake event already pending when this runs is taken immediately after
/// the sleep begins; it cannot slip into the gap between enabling
/// interrupts and stopping the CPU, the way a separate enable-then-sleep
/// sequence would allow.
#[inline(always)]
pub fn request_lpm3_enable_interrupts() {
    const LPM3_GIE: u8 = SCG1 + SCG0 + CPU_OFF + GIE;
    set_sr_bits::<LPM3_GIE>();
}
