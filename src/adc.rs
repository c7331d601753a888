//! Analog to Digital Converter (ADC)
//!
//! The ADC may read from any of the following pins:
//!
//! P1.0 - P1.7 (channels 0 to 7), P5.0 - P5.3 (channels 8 to 11)
//!
//! Besides software-started one-shot reads, the ADC's window comparator can
//! classify conversions against a [`Window`] in silicon: conversions repeat
//! on one channel, each started by a timer trigger, and the ADC raises a
//! distinct interrupt depending on whether the result lands above, below or
//! inside the window. See [`Adc::into_windowed`].

use crate::error::Error;
use crate::gpio::{
    Alternate3, Floating, Pin, Pin0, Pin1, Pin2, Pin3, Pin4, Pin5, Pin6, Pin7, P1, P5,
};
use crate::hw_traits::Steal;
use crate::pmm::InternalVRef;
use crate::threshold::{Window, Zone};
use bitflags::bitflags;
use core::{convert::Infallible, marker::PhantomData};
use msp430fr2355::ADC;

/// How many ADCCLK cycles the ADC's sample-and-hold stage will last for.
///
/// Default: 8 cycles
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum SampleTime {
    /// Sample for 4 ADCCLK cycles
    _4 = 0b0000,
    /// Sample for 8 ADCCLK cycles
    #[default]
    _8 = 0b0001,
    /// Sample for 16 ADCCLK cycles
    _16 = 0b0010,
    /// Sample for 32 ADCCLK cycles
    _32 = 0b0011,
    /// Sample for 64 ADCCLK cycles
    _64 = 0b0100,
    /// Sample for 96 ADCCLK cycles
    _96 = 0b0101,
    /// Sample for 128 ADCCLK cycles
    _128 = 0b0110,
    /// Sample for 192 ADCCLK cycles
    _192 = 0b0111,
    /// Sample for 256 ADCCLK cycles
    _256 = 0b1000,
    /// Sample for 384 ADCCLK cycles
    _384 = 0b1001,
    /// Sample for 512 ADCCLK cycles
    _512 = 0b1010,
    /// Sample for 768 ADCCLK cycles
    _768 = 0b1011,
    /// Sample for 1024 ADCCLK cycles
    _1024 = 0b1100,
}

impl SampleTime {
    #[inline(always)]
    fn adcsht(self) -> u8 {
        self as u8
    }
}

/// How much the ADC input clock will be divided by after being divided by the predivider
///
/// Default: Divide by 1
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum ClockDivider {
    /// Divide the input clock by 1
    #[default]
    _1 = 0b000,
    /// Divide the input clock by 2
    _2 = 0b001,
    /// Divide the input clock by 3
    _3 = 0b010,
    /// Divide the input clock by 4
    _4 = 0b011,
    /// Divide the input clock by 5
    _5 = 0b100,
    /// Divide the input clock by 6
    _6 = 0b101,
    /// Divide the input clock by 7
    _7 = 0b110,
    /// Divide the input clock by 8
    _8 = 0b111,
}

impl ClockDivider {
    #[inline(always)]
    fn adcdiv(self) -> u8 {
        self as u8
    }
}

/// Which clock source the ADC uses as input.
///
/// Default: MODCLK
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum ClockSource {
    /// Use MODCLK as the ADC input clock
    #[default]
    MODCLK = 0b00,
    /// Use ACLK as the ADC input clock
    ACLK = 0b01,
    /// Use SMCLK as the ADC input clock
    SMCLK = 0b10,
}

impl ClockSource {
    #[inline(always)]
    fn adcssel(self) -> u8 {
        self as u8
    }
}

/// How much the ADC input clock will be divided by prior to being divided by the ADC clock divider
///
/// Default: Divide by 1
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum Predivider {
    /// Divide the input clock by 1
    #[default]
    _1 = 0b00,
    /// Divide the input clock by 4
    _4 = 0b01,
    /// Divide the input clock by 64
    _64 = 0b10,
}

impl Predivider {
    #[inline(always)]
    fn adcpdiv(self) -> u8 {
        self as u8
    }
}

/// The output resolution of the ADC conversion. Also determines how many ADCCLK cycles the conversion step takes.
///
/// Default: 10-bit resolution
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 8-bit ADC conversion result. The conversion step takes 10 ADCCLK cycles.
    _8BIT = 0b00,
    /// 10-bit ADC conversion result. The conversion step takes 12 ADCCLK cycles.
    #[default]
    _10BIT = 0b01,
    /// 12-bit ADC conversion result. The conversion step takes 14 ADCCLK cycles.
    _12BIT = 0b10,
}

impl Resolution {
    #[inline(always)]
    fn adcres(self) -> u8 {
        self as u8
    }
}

/// Selects the drive capability of the ADC reference buffer, which can increase the maximum sampling speed at the cost of increased power draw.
///
/// Default: 200ksps
#[derive(Default, Copy, Clone, PartialEq, Eq)]
pub enum SamplingRate {
    /// Maximum of 50 ksps. Lower power usage.
    _50KSPS,
    /// Maximum of 200 ksps. Higher power usage.
    #[default]
    _200KSPS,
}

impl SamplingRate {
    #[inline(always)]
    fn adcsr(self) -> bool {
        match self {
            SamplingRate::_200KSPS => false,
            SamplingRate::_50KSPS => true,
        }
    }
}

/// Reference voltage for conversions, determining the full-scale reading.
pub enum VRef<'a> {
    /// Measure against AVCC
    Avcc,
    /// Measure against the settled internal reference supplied by the PMM
    Internal(&'a InternalVRef),
}

impl VRef<'_> {
    #[inline(always)]
    fn adcsref(&self) -> u8 {
        match self {
            VRef::Avcc => 0b000,
            VRef::Internal(_) => 0b001,
        }
    }
}

/// Hardware trigger starting each conversion in windowed mode.
///
/// Each rising edge of the selected timer's CCR1 output starts one sample
/// and conversion, so the timer period sets the sampling period.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum SampleTrigger {
    /// Rising edge of the TB0 CCR1 output
    TimerB0 = 0b01,
    /// Rising edge of the TB1 CCR1 output
    TimerB1 = 0b10,
    /// Rising edge of the TB2 CCR1 output
    TimerB2 = 0b11,
}

impl SampleTrigger {
    #[inline(always)]
    fn adcshs(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// ADC interrupt enable flags, matching the bit layout of the ADCIE
    /// register.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct AdcInterrupts: u16 {
        /// A conversion result is ready in the result register
        const CONVERSION_DONE = 1 << 0;
        /// The result landed inside the window
        const INSIDE_WINDOW = 1 << 1;
        /// The result landed below the window's low threshold
        const BELOW_WINDOW = 1 << 2;
        /// The result landed above the window's high threshold
        const ABOVE_WINDOW = 1 << 3;
        /// A result was overwritten before it was read
        const RESULT_OVERFLOW = 1 << 4;
        /// A conversion did not finish before the next sample trigger
        const CONVERSION_TIME_OVERFLOW = 1 << 5;
    }
}

impl AdcInterrupts {
    /// The three window comparator interrupts, one per zone.
    pub const fn window() -> Self {
        Self::INSIDE_WINDOW
            .union(Self::BELOW_WINDOW)
            .union(Self::ABOVE_WINDOW)
    }
}

/// Trait of pins that route to an ADC input channel.
pub trait AdcPin {
    /// Index of the ADC channel the pin drives
    const CHANNEL: u8;
}

macro_rules! impl_adc_channel {
    ($port: ty, $pin: ty, $channel: literal ) => {
        impl AdcPin for Pin<$port, $pin, Alternate3<Floating>> {
            const CHANNEL: u8 = $channel;
        }
    };
}

impl_adc_channel!(P1, Pin0, 0);
impl_adc_channel!(P1, Pin1, 1);
impl_adc_channel!(P1, Pin2, 2);
impl_adc_channel!(P1, Pin3, 3);
impl_adc_channel!(P1, Pin4, 4);
impl_adc_channel!(P1, Pin5, 5);
impl_adc_channel!(P1, Pin6, 6);
impl_adc_channel!(P1, Pin7, 7);
impl_adc_channel!(P5, Pin0, 8);
impl_adc_channel!(P5, Pin1, 9);
impl_adc_channel!(P5, Pin2, 10);
impl_adc_channel!(P5, Pin3, 11);

/// Controls the onboard ADC
pub struct Adc<STATE: AdcState> {
    adc_reg: ADC,
    is_waiting: bool,
    _phantom: PhantomData<STATE>,
}

/// Configuration object for an ADC.
///
/// The default configuration is based on the default register values:
/// - MODCLK as input clock
/// - Predivider = 1 and clock divider = 1
/// - 10-bit resolution
/// - 8 cycle sample time
/// - Max 200 ksps sample rate
#[derive(Default, Clone, PartialEq, Eq)]
pub struct AdcConfig {
    /// Which clock source the ADC takes as an input. This clock will first be divided by the predivider, then the clock divider, to generate ADCCLK.
    pub clock_source: ClockSource,
    /// How much the input clock is divided by, after the predivider.
    pub clock_divider: ClockDivider,
    /// How much the input clock is initially divided by, before the clock divider.
    pub predivider: Predivider,
    /// How many bits the conversion result is. Also defines the number of ADCCLK cycles required to do the conversion step.
    pub resolution: Resolution,
    /// Sets the maximum sampling rate of the ADC. Lower values use less power.
    pub sampling_rate: SamplingRate,
    /// Determines the number of ADCCLK cycles the sampling time takes.
    pub sample_time: SampleTime,
}

impl AdcConfig {
    /// Creates an ADC configuration. A default implementation is also available through `::default()`
    pub fn new(
        clock_source: ClockSource,
        clock_divider: ClockDivider,
        predivider: Predivider,
        resolution: Resolution,
        sampling_rate: SamplingRate,
        sample_time: SampleTime,
    ) -> AdcConfig {
        AdcConfig {
            clock_source,
            clock_divider,
            predivider,
            resolution,
            sampling_rate,
            sample_time,
        }
    }

    /// Applies this ADC configuration to hardware registers, and returns an ADC.
    pub fn configure(self, mut adc_reg: ADC) -> Adc<Disabled> {
        // Disable the ADC before we set the other bits. Some can only be set while the ADC is disabled.
        disable_adc_reg(&mut adc_reg);

        let adcsht = self.sample_time.adcsht();
        adc_reg.adcctl0.write(|w| w.adcsht().bits(adcsht));

        let adcssel = self.clock_source.adcssel();
        let adcdiv = self.clock_divider.adcdiv();
        adc_reg.adcctl1.write(|w| {
            w.adcssel()
                .bits(adcssel)
                .adcshp()
                .adcshp_1()
                .adcdiv()
                .bits(adcdiv)
        });

        let adcpdiv = self.predivider.adcpdiv();
        let adcres = self.resolution.adcres();
        let adcsr = self.sampling_rate.adcsr();
        adc_reg.adcctl2.write(|w| {
            w.adcpdiv()
                .bits(adcpdiv)
                .adcres()
                .bits(adcres)
                .adcsr()
                .bit(adcsr)
        });

        Adc {
            adc_reg,
            is_waiting: false,
            _phantom: PhantomData,
        }
    }
}

/// Typestate for an enabled ADC. It is ready to begin conversions. The ADC must be disabled before it can be reconfigured.
pub struct Enabled;
/// Typestate for a disabled ADC. It is ready to be configured. The ADC must be enabled before it can begin conversions.
pub struct Disabled;
/// Typestate trait for the current state of the ADC. The ADC may be either `Enabled` or `Disabled.`
pub trait AdcState: private::Sealed {}
impl AdcState for Enabled {}
impl AdcState for Disabled {}

// Seal this supertrait so users can still refer to AdcState, but they can't add other implementations besides `Enabled` and `Disabled`.
mod private {
    pub trait Sealed {}
    impl Sealed for super::Enabled {}
    impl Sealed for super::Disabled {}
}

impl<S: AdcState> Adc<S> {
    /// Whether the ADC is currently sampling or converting.
    pub fn is_busy(&self) -> bool {
        self.adc_reg.adcctl1.read().adcbusy().bit_is_set()
    }

    /// Gets the latest ADC conversion result.
    pub fn result(&self) -> u16 {
        self.adc_reg.adcmem0.read().bits()
    }
}

impl Adc<Disabled> {
    /// Enables this ADC, ready to start a conversion.
    pub fn into_enabled(mut self) -> Adc<Enabled> {
        enable_adc_reg(&mut self.adc_reg);
        Adc {
            adc_reg: self.adc_reg,
            is_waiting: self.is_waiting,
            _phantom: PhantomData,
        }
    }

    /// Selects which pin to sample.
    pub fn set_pin<PIN: AdcPin>(&mut self, _pin: &PIN) {
        self.adc_reg
            .adcmctl0
            .modify(|_, w| w.adcinch().bits(PIN::CHANNEL));
    }

    /// Programs the window comparator and starts hardware-paced repeat
    /// conversions on the given pin.
    ///
    /// Each rising edge of `trigger` starts one conversion against `vref`.
    /// The window comparator checks every result against `window` and raises
    /// the interrupts enabled in `interrupts`: above the high threshold,
    /// below the low threshold or inside the window, plus the completion and
    /// overflow events. Returns the running ADC and the interrupt vector
    /// token for the ADC interrupt handler.
    ///
    /// Conversions run until the trigger timer stops. There is no timeout on
    /// an individual conversion; a conversion that overruns its trigger
    /// period is reported through [`AdcVector::ConversionTimeOverflow`] and
    /// [`WindowedAdc::result`] instead.
    pub fn into_windowed<PIN: AdcPin>(
        self,
        window: Window,
        trigger: SampleTrigger,
        _pin: &PIN,
        vref: VRef,
        interrupts: AdcInterrupts,
    ) -> (WindowedAdc, AdcIV) {
        // Window bounds and trigger select may only change while ADCENC is clear
        self.adc_reg.adchi.write(|w| unsafe { w.bits(window.high()) });
        self.adc_reg.adclo.write(|w| unsafe { w.bits(window.low()) });
        self.adc_reg
            .adcmctl0
            .modify(|_, w| w.adcinch().bits(PIN::CHANNEL).adcsref().bits(vref.adcsref()));

        let adcshs = trigger.adcshs();
        self.adc_reg
            .adcctl1
            .modify(|_, w| w.adcshs().bits(adcshs).adcconseq().adcconseq_2());

        self.adc_reg.adcie.write(|w| unsafe { w.bits(interrupts.bits()) });

        unsafe {
            self.adc_reg
                .adcctl0
                .set_bits(|w| w.adcon().set_bit().adcenc().set_bit());
        }

        let iv = AdcIV {
            adc_reg: unsafe { ADC::steal() },
        };
        (WindowedAdc { adc_reg: self.adc_reg }, iv)
    }
}

impl Adc<Enabled> {
    /// Disables this ADC to save power.
    pub fn into_disabled(mut self) -> Adc<Disabled> {
        disable_adc_reg(&mut self.adc_reg);
        Adc {
            adc_reg: self.adc_reg,
            is_waiting: self.is_waiting,
            _phantom: PhantomData,
        }
    }

    /// Starts an ADC conversion.
    pub fn start_conversion(&mut self) {
        unsafe {
            self.adc_reg
                .adcctl0
                .set_bits(|w| w.adcenc().set_bit().adcsc().set_bit());
        }
    }

    /// Disables the ADC, configures the input channel, then re-enables the ADC.
    pub fn reset_and_set_pin<PIN: AdcPin>(&mut self, _pin: &PIN) {
        disable_adc_reg(&mut self.adc_reg);
        self.adc_reg
            .adcmctl0
            .modify(|_, w| w.adcinch().bits(PIN::CHANNEL));

        enable_adc_reg(&mut self.adc_reg);
    }

    /// Begins a single ADC conversion of the pin if one is not already
    /// underway.
    ///
    /// If the result is ready it is returned, otherwise returns `WouldBlock`.
    /// A conversion always completes within a bounded number of ADCCLK
    /// cycles, so polling this blocks for at most that long.
    pub fn read<PIN: AdcPin>(&mut self, pin: &PIN) -> nb::Result<u16, Infallible> {
        if self.is_waiting {
            if self.is_busy() {
                return Err(nb::Error::WouldBlock);
            } else {
                self.is_waiting = false;
                return Ok(self.result());
            }
        }

        self.reset_and_set_pin(pin);

        self.start_conversion();
        self.is_waiting = true;
        Err(nb::Error::WouldBlock)
    }
}

fn disable_adc_reg(adc: &mut ADC) {
    unsafe {
        adc.adcctl0
            .clear_bits(|w| w.adcon().clear_bit().adcenc().clear_bit());
    }
}

fn enable_adc_reg(adc: &mut ADC) {
    unsafe {
        adc.adcctl0.set_bits(|w| w.adcon().set_bit());
    }
}

/// An ADC running hardware-paced repeat conversions through the window
/// comparator.
pub struct WindowedAdc {
    adc_reg: ADC,
}

impl WindowedAdc {
    /// Latest conversion result.
    ///
    /// Returns [`Error::ConversionTimeout`] and clears the condition if a
    /// conversion overran its trigger period since the last check.
    pub fn result(&mut self) -> Result<u16, Error> {
        if self.adc_reg.adcifg.read().adctovifg().bit_is_set() {
            unsafe {
                self.adc_reg
                    .adcifg
                    .clear_bits(|w| w.adctovifg().clear_bit());
            }
            return Err(Error::ConversionTimeout);
        }
        Ok(self.adc_reg.adcmem0.read().bits())
    }
}

/// Reads the ADC interrupt vector register. Meant to be moved into the ADC
/// interrupt handler's shared state.
pub struct AdcIV {
    adc_reg: ADC,
}

impl AdcIV {
    /// Reads the highest-priority pending ADC interrupt and clears its flag.
    ///
    /// The window comparator flags stay set until cleared here, so the
    /// handler must call this once per interrupt. Reading a finished
    /// conversion's result clears its flag as a side effect.
    pub fn interrupt_vector(&mut self) -> AdcVector {
        match self.adc_reg.adciv.read().bits() {
            0x02 => AdcVector::ResultOverflow,
            0x04 => AdcVector::ConversionTimeOverflow,
            0x06 => {
                unsafe {
                    self.adc_reg
                        .adcifg
                        .clear_bits(|w| w.adchiifg().clear_bit());
                }
                AdcVector::AboveWindow
            }
            0x08 => {
                unsafe {
                    self.adc_reg
                        .adcifg
                        .clear_bits(|w| w.adcloifg().clear_bit());
                }
                AdcVector::BelowWindow
            }
            0x0A => {
                unsafe {
                    self.adc_reg
                        .adcifg
                        .clear_bits(|w| w.adcinifg().clear_bit());
                }
                AdcVector::InsideWindow
            }
            0x0C => AdcVector::ConversionDone(self.adc_reg.adcmem0.read().bits()),
            _ => AdcVector::NoInterrupt,
        }
    }
}

/// One decoded ADC interrupt event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcVector {
    /// No interrupt pending
    NoInterrupt,
    /// A result was overwritten before it was read
    ResultOverflow,
    /// A conversion did not finish before the next sample trigger
    ConversionTimeOverflow,
    /// The latest result is above the window's high threshold
    AboveWindow,
    /// The latest result is below the window's low threshold
    BelowWindow,
    /// The latest result is inside the window
    InsideWindow,
    /// A conversion finished with this result
    ConversionDone(u16),
}

impl AdcVector {
    /// Maps the window comparator events onto threshold zones.
    pub fn zone(self) -> Option<Zone> {
        match self {
            AdcVector::AboveWindow => Some(Zone::AboveHigh),
            AdcVector::BelowWindow => Some(Zone::BelowLow),
            AdcVector::InsideWindow => Some(Zone::InBand),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_zones_match_the_window_events() {
        assert_eq!(AdcVector::AboveWindow.zone(), Some(Zone::AboveHigh));
        assert_eq!(AdcVector::BelowWindow.zone(), Some(Zone::BelowLow));
        assert_eq!(AdcVector::InsideWindow.zone(), Some(Zone::InBand));
        assert_eq!(AdcVector::ConversionDone(123).zone(), None);
        assert_eq!(AdcVector::NoInterrupt.zone(), None);
    }

    #[test]
    fn window_interrupts_cover_exactly_the_three_zones() {
        let ie = AdcInterrupts::window();
        assert!(ie.contains(AdcInterrupts::ABOVE_WINDOW));
        assert!(ie.contains(AdcInterrupts::BELOW_WINDOW));
        assert!(ie.contains(AdcInterrupts::INSIDE_WINDOW));
        assert!(!ie.intersects(
            AdcInterrupts::CONVERSION_DONE
                | AdcInterrupts::RESULT_OVERFLOW
                | AdcInterrupts::CONVERSION_TIME_OVERFLOW
        ));
    }
}
