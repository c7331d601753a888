//! Clock system
//!
//! MCLK can run from REFOCLK, VLOCLK or the FLL-stabilized DCO. ACLK can run
//! from REFOCLK, VLOCLK or an external 32.768 kHz watch crystal on XT1, which
//! is the usual source when timers and the ADC keep running through LPM3.
//!
//! Configuring MCLK must happen before SMCLK is configured. SMCLK can be
//! disabled outright, in which case no `Smclk` object is produced and the
//! chip spends less power in active mode.

use crate::error::Error;
use crate::gpio::{Alternate2, Pin, Pin6, Pin7, P2};
use msp430fr2355 as pac;
use pac::cs::csctl1::DCORSEL_A;
use pac::cs::csctl4::{SELA_A, SELMS_A};
pub use pac::cs::csctl5::{DIVM_A as MclkDiv, DIVS_A as SmclkDiv};

/// REFOCLK frequency
pub const REFOCLK: u16 = 32768;
/// VLOCLK frequency
pub const VLOCLK: u16 = 10000;
/// XT1 watch crystal frequency
pub const XT1CLK: u16 = 32768;

const FLL_MAX_MUL: u16 = 732;

// FRCTL0 password, always reads as 0x96xx and must be written as 0xA5xx
const FRCTLPW: u16 = 0xA500;

enum MclkSel {
    Refoclk,
    Vloclk,
    Dcoclk { flln: u16, range: DCORSEL_A },
}

impl MclkSel {
    fn selms(&self) -> SELMS_A {
        match self {
            MclkSel::Refoclk => SELMS_A::REFOCLK,
            MclkSel::Vloclk => SELMS_A::VLOCLK,
            MclkSel::Dcoclk { flln: _, range: _ } => SELMS_A::DCOCLKDIV,
        }
    }

    fn freq(&self) -> u32 {
        match self {
            MclkSel::Vloclk => VLOCLK as u32,
            MclkSel::Refoclk => REFOCLK as u32,
            MclkSel::Dcoclk { flln, range: _ } => (REFOCLK as u32) * (*flln as u32 + 1),
        }
    }
}

#[derive(Clone, Copy)]
enum AclkSel {
    Vloclk,
    Refoclk,
    Xt1,
}

impl AclkSel {
    fn sela(self) -> SELA_A {
        match self {
            AclkSel::Vloclk => SELA_A::VLOCLK,
            AclkSel::Refoclk => SELA_A::REFOCLK,
            AclkSel::Xt1 => SELA_A::XT1CLK,
        }
    }

    fn freq(self) -> u16 {
        match self {
            AclkSel::Vloclk => VLOCLK,
            AclkSel::Refoclk => REFOCLK,
            AclkSel::Xt1 => XT1CLK,
        }
    }
}

#[doc(hidden)]
pub struct Undefined;
#[doc(hidden)]
pub struct MclkDefined;
#[doc(hidden)]
pub struct SmclkDefined(SmclkDiv);
#[doc(hidden)]
pub struct SmclkDisabled;

#[doc(hidden)]
pub trait SmclkState {
    fn div(&self) -> Option<SmclkDiv>;
}

impl SmclkState for SmclkDefined {
    fn div(&self) -> Option<SmclkDiv> {
        Some(self.0)
    }
}

impl SmclkState for SmclkDisabled {
    fn div(&self) -> Option<SmclkDiv> {
        None
    }
}

/// Builder object containing system clock configuration. Configuring MCLK must happen before SMCLK
/// is configured. SMCLK can be optionally disabled, in which case a `Smclk` object will not be
/// produced. Configuring ACLK select is optional, with its default being REFOCLK.
pub struct ClockConfig<MODE> {
    periph: pac::CS,
    mclk_sel: MclkSel,
    mclk_div: MclkDiv,
    aclk_sel: AclkSel,
    mode: MODE,
}

macro_rules! make_clkconf {
    ($conf:expr, $mode:expr) => {
        ClockConfig {
            periph: $conf.periph,
            mclk_sel: $conf.mclk_sel,
            mclk_div: $conf.mclk_div,
            aclk_sel: $conf.aclk_sel,
            mode: $mode,
        }
    };
}

/// Extension trait allowing the PAC CS struct to be converted into the clock configuration
/// builder object.
pub trait CsExt {
    /// Converts CS into clock configuration builder object
    fn constrain(self) -> ClockConfig<Undefined>;
}

impl CsExt for pac::CS {
    fn constrain(self) -> ClockConfig<Undefined> {
        // These are the microcontroller default settings
        ClockConfig {
            periph: self,
            mode: Undefined,
            mclk_div: MclkDiv::_1,
            mclk_sel: MclkSel::Refoclk,
            aclk_sel: AclkSel::Refoclk,
        }
    }
}

impl<MODE> ClockConfig<MODE> {
    /// Select REFOCLK for ACLK
    pub const fn aclk_refoclk(mut self) -> Self {
        self.aclk_sel = AclkSel::Refoclk;
        self
    }

    /// Select VLOCLK for ACLK
    pub const fn aclk_vloclk(mut self) -> Self {
        self.aclk_sel = AclkSel::Vloclk;
        self
    }

    /// Select the XT1 watch crystal for ACLK. Requires the crystal pins in
    /// their crystal function. `freeze` will block until the oscillator
    /// fault flags stay clear, so a missing crystal hangs startup rather
    /// than silently falling back to REFOCLK.
    pub fn aclk_xt1<M1, M2>(
        mut self,
        _xout: &Pin<P2, Pin6, Alternate2<M1>>,
        _xin: &Pin<P2, Pin7, Alternate2<M2>>,
    ) -> Self {
        self.aclk_sel = AclkSel::Xt1;
        self
    }
}

impl ClockConfig<Undefined> {
    /// Select REFOCLK for MCLK and set the MCLK divider. Frequency is `32768 / mclk_div` Hz.
    pub const fn mclk_refoclk(self, mclk_div: MclkDiv) -> ClockConfig<MclkDefined> {
        ClockConfig {
            mclk_div,
            mclk_sel: MclkSel::Refoclk,
            ..make_clkconf!(self, MclkDefined)
        }
    }

    /// Select VLOCLK for MCLK and set the MCLK divider. Frequency is `10000 / mclk_div` Hz.
    pub const fn mclk_vloclk(self, mclk_div: MclkDiv) -> ClockConfig<MclkDefined> {
        ClockConfig {
            mclk_div,
            mclk_sel: MclkSel::Vloclk,
            ..make_clkconf!(self, MclkDefined)
        }
    }

    /// Select DCOCLK for MCLK with FLL for stabilization. Frequency is `32768 * multiplier / mclk_div` Hz.
    /// Multiplier must be higher than 1 and lower or equal to 732, which brings the maximum
    /// frequency to around 24 MHz.
    pub fn mclk_dcoclk(self, mut multiplier: u16, mclk_div: MclkDiv) -> ClockConfig<MclkDefined> {
        if multiplier < 1 {
            multiplier = 1
        } else if multiplier > FLL_MAX_MUL {
            multiplier = FLL_MAX_MUL;
        }
        let flln = multiplier - 1;

        let range = if multiplier < 32 {
            DCORSEL_A::DCORSEL_0
        } else if multiplier < 64 {
            DCORSEL_A::DCORSEL_1
        } else if multiplier < 128 {
            DCORSEL_A::DCORSEL_2
        } else if multiplier < 256 {
            DCORSEL_A::DCORSEL_3
        } else if multiplier < 384 {
            DCORSEL_A::DCORSEL_4
        } else if multiplier < 512 {
            DCORSEL_A::DCORSEL_5
        } else if multiplier < 640 {
            DCORSEL_A::DCORSEL_6
        } else {
            DCORSEL_A::DCORSEL_7
        };

        ClockConfig {
            mclk_div,
            mclk_sel: MclkSel::Dcoclk { flln, range },
            ..make_clkconf!(self, MclkDefined)
        }
    }
}

impl ClockConfig<MclkDefined> {
    /// Enable SMCLK and set SMCLK divider, which divides the MCLK frequency
    pub const fn smclk_on(self, div: SmclkDiv) -> ClockConfig<SmclkDefined> {
        make_clkconf!(self, SmclkDefined(div))
    }

    /// Disable SMCLK
    pub const fn smclk_off(self) -> ClockConfig<SmclkDisabled> {
        make_clkconf!(self, SmclkDisabled)
    }
}

fn sfr() -> &'static pac::sfr::RegisterBlock {
    unsafe { &*pac::SFR::ptr() }
}

fn frctl() -> &'static pac::frctl::RegisterBlock {
    unsafe { &*pac::FRCTL::ptr() }
}

fn clear_oscillator_faults(cs: &pac::cs::RegisterBlock) {
    unsafe {
        cs.csctl7
            .clear_bits(|w| w.xt1offg().clear_bit().dcoffg().clear_bit());
        sfr().sfrifg1.clear_bits(|w| w.ofifg().clear_bit());
    }
}

impl<MODE: SmclkState> ClockConfig<MODE> {
    fn configure_periph(&self) {
        // FLL configuration procedure from the user's guide
        if let MclkSel::Dcoclk { flln, range } = self.mclk_sel {
            self.periph.csctl3.write(|w| w.selref().refoclk());
            self.periph.csctl0.write(|w| unsafe { w.bits(0) });
            self.periph.csctl1.write(|w| w.dcorsel().variant(range));
            self.periph
                .csctl2
                .write(|w| unsafe { w.flln().bits(flln) }.flld()._1());

            msp430::asm::nop();
            msp430::asm::nop();
            msp430::asm::nop();
            while !self.periph.csctl7.read().fllunlock().is_fllunlock_0() {}
        }

        // FRAM reads need one wait state per 8 MHz of MCLK. Program them
        // before MCLK speeds up.
        let mclk_freq = self.mclk_sel.freq() >> (self.mclk_div as u32);
        let nwaits = ((mclk_freq.saturating_sub(1)) / 8_000_000) as u16;
        frctl()
            .frctl0
            .write(|w| unsafe { w.bits(FRCTLPW | (nwaits << 4)) });

        // Dividers go in before the source switch; MCLK must not outrun the
        // wait states programmed above.
        self.periph.csctl5.write(|w| {
            let w = w.vloautooff().set_bit().divm().variant(self.mclk_div);
            match self.mode.div() {
                Some(div) => w.divs().variant(div),
                None => w.smclkoff().set_bit(),
            }
        });

        self.periph.csctl4.write(|w| {
            w.sela()
                .variant(self.aclk_sel.sela())
                .selms()
                .variant(self.mclk_sel.selms())
        });

        // A cold crystal holds the oscillator fault flags set. Keep clearing
        // them until the global fault flag stays clear, as the reference code
        // in the user's guide does.
        if let AclkSel::Xt1 = self.aclk_sel {
            loop {
                clear_oscillator_faults(&self.periph);
                if sfr().sfrifg1.read().ofifg().bit_is_clear() {
                    break;
                }
            }
        }
    }
}

impl ClockConfig<SmclkDefined> {
    /// Apply clock configuration and return MCLK, SMCLK, and ACLK clock objects
    pub fn freeze(self) -> (Mclk, Smclk, Aclk) {
        self.configure_periph();
        // The clock divider enums are ordered such that their numerical values are the log2 values
        // of the frequency divisor
        let mclk_freq = self.mclk_sel.freq() >> (self.mclk_div as u32);
        (
            Mclk(mclk_freq),
            Smclk(mclk_freq >> (self.mode.0 as u32)),
            Aclk::new(self.aclk_sel),
        )
    }
}

impl ClockConfig<SmclkDisabled> {
    /// Apply clock configuration and return MCLK and ACLK clock objects, as SMCLK is disabled
    pub fn freeze(self) -> (Mclk, Aclk) {
        self.configure_periph();
        let mclk_freq = self.mclk_sel.freq() >> (self.mclk_div as u32);
        (Mclk(mclk_freq), Aclk::new(self.aclk_sel))
    }
}

/// MCLK clock object
pub struct Mclk(u32);
/// SMCLK clock object
pub struct Smclk(u32);

/// ACLK clock object
pub struct Aclk {
    freq: u16,
    xt1: bool,
}

impl Aclk {
    fn new(sel: AclkSel) -> Self {
        Aclk {
            freq: sel.freq(),
            xt1: matches!(sel, AclkSel::Xt1),
        }
    }

    /// Checks crystal health. An oscillator fault latches the fault flags;
    /// this clears them once and reports [`Error::ClockFault`] if the fault
    /// comes straight back. Always `Ok` when ACLK runs from an internal
    /// source.
    pub fn check_fault(&self) -> Result<(), Error> {
        if !self.xt1 {
            return Ok(());
        }
        if sfr().sfrifg1.read().ofifg().bit_is_clear() {
            return Ok(());
        }
        clear_oscillator_faults(unsafe { &*pac::CS::ptr() });
        if sfr().sfrifg1.read().ofifg().bit_is_set() {
            Err(Error::ClockFault)
        } else {
            Ok(())
        }
    }
}

/// Trait for configured clock objects
pub trait Clock {
    /// Type of the returned frequency value
    type Freq;

    /// Frequency of the clock
    fn freq(&self) -> Self::Freq;
}

impl Clock for Mclk {
    type Freq = u32;

    /// Returning a 32-bit frequency may seem suspect, since we're on a 16-bit system, but it is
    /// required as MCLK can go up to 24 MHz. Clock frequencies are usually for initialization
    /// tasks such as computing delays and timer periods, which should be optimized away, avoiding
    /// the extra cost of 32-bit computations.
    fn freq(&self) -> u32 {
        self.0
    }
}

impl Clock for Smclk {
    type Freq = u32;

    /// SMCLK frequency can go as high as MCLK, so we need a 32-bit value to store it.
    fn freq(&self) -> u32 {
        self.0
    }
}

impl Clock for Aclk {
    type Freq = u16;

    fn freq(&self) -> u16 {
        self.freq
    }
}
