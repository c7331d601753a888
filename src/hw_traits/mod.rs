pub mod gpio;
pub mod timerb;

use msp430fr2355 as pac;

/// Conjure a peripheral handle out of thin air, for register access from
/// contexts that cannot borrow the owning driver (interrupt tokens, pin
/// handles). Callers must not race the registers touched by existing owners.
pub trait Steal {
    unsafe fn steal() -> Self;
}

// The ADC carries no register trait of its own; its interrupt token and the
// windowed driver steal it directly.
impl Steal for pac::ADC {
    unsafe fn steal() -> Self {
        pac::Peripherals::conjure().ADC
    }
}
