//! Power management module
//!
//! Clearing `LOCKLPM5` to unlock the GPIO pin states and enabling the
//! internal voltage reference that the ADC can convert against.

use crate::delay::delay_cycles;
use msp430fr2355::PMM;

/// PMM handle. Its existence proves `LOCKLPM5` has been cleared.
pub struct Pmm(PMM);

/// Token indicating that the internal voltage reference has been enabled and
/// configured. Passed to the ADC to convert against the reference instead of
/// the supply rail.
#[derive(Debug)]
pub struct InternalVRef(ReferenceVoltage);

impl InternalVRef {
    /// The configured reference voltage
    pub fn voltage(&self) -> ReferenceVoltage {
        self.0
    }
}

/// Selectable internal reference voltages
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferenceVoltage {
    /// 1.5V
    _1V5 = 0b00,
    /// 2.0V
    _2V0 = 0b01,
    /// 2.5V
    _2V5 = 0b10,
}

/// Cycles between enabling the reference and it being usable
const REF_SETTLE_CYCLES: u32 = 400;

impl Pmm {
    /// Clears the LOCKLPM5 bit and returns a `Pmm`
    pub fn new(pmm: PMM) -> Pmm {
        pmm.pm5ctl0.write(|w| w.locklpm5().locklpm5_0());
        Pmm(pmm)
    }

    /// Configures the internal voltage reference to the specified voltage and
    /// enables it, then waits out the reference settling time so conversions
    /// started right after see a stable reference.
    pub fn enable_internal_reference(&mut self, vref: ReferenceVoltage) -> InternalVRef {
        self.0.pmmctl2.modify(|_, w| w
            .refvsel().bits(vref as u8)
            .intrefen().intrefen_1()
        );
        delay_cycles(REF_SETTLE_CYCLES);
        InternalVRef(vref)
    }

    /// Disables the internal reference voltage
    pub fn disable_internal_reference(&mut self, _vref: InternalVRef) {
        unsafe { self.0.pmmctl2.clear_bits(|w| w.intrefen().clear_bit()); }
    }
}
