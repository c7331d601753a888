//! PWM output
//!
//! Configures a TimerB peripheral into a single up-mode PWM channel. The
//! period lives in capture-compare register 0 and the duty cycle in the
//! channel's own capture-compare register, with the output in reset/set mode:
//! the pin goes high when the counter wraps to zero and low again when it
//! reaches the duty compare.
//!
//! Duty cycle updates go through the embedded-hal [`SetDutyCycle`] trait.

use crate::gpio::{
    Alternate1, Alternate2, ChangeSelectBits, Output, Pin, Pin0, Pin1, Pin6, Pin7, P1, P2, P5, P6,
};
use crate::hw_traits::timerb::{CCRn, Outmod};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use msp430fr2355 as pac;

pub use crate::timer::{CapCmp, TimerConfig, TimerDiv, TimerExDiv, TimerPeriph, CCR0, CCR1, CCR2};

#[doc(hidden)]
pub enum Alt {
    Alt1,
    Alt2,
}

// Sealed by CapCmp
/// Associates PWM channels with specific GPIO pins
pub trait PwmPeriph<C>: CapCmp<C> + CapCmp<CCR0> {
    /// GPIO type
    type Gpio: ChangeSelectBits;
    #[doc(hidden)]
    const ALT: Alt;

    #[doc(hidden)]
    fn to_alt(pin: &mut Self::Gpio) {
        match Self::ALT {
            Alt::Alt1 => pin.set_sel0(),
            Alt::Alt2 => pin.set_sel1(),
        }
    }

    #[doc(hidden)]
    fn to_gpio(pin: &mut Self::Gpio) {
        match Self::ALT {
            Alt::Alt1 => pin.clear_sel0(),
            Alt::Alt2 => pin.clear_sel1(),
        }
    }
}

impl PwmPeriph<CCR1> for pac::TB0 {
    type Gpio = Pin<P1, Pin6, Alternate2<Output>>;
    const ALT: Alt = Alt::Alt2;
}
impl PwmPeriph<CCR2> for pac::TB0 {
    type Gpio = Pin<P1, Pin7, Alternate2<Output>>;
    const ALT: Alt = Alt::Alt2;
}

impl PwmPeriph<CCR1> for pac::TB1 {
    type Gpio = Pin<P2, Pin0, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}
impl PwmPeriph<CCR2> for pac::TB1 {
    type Gpio = Pin<P2, Pin1, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}

impl PwmPeriph<CCR1> for pac::TB2 {
    type Gpio = Pin<P5, Pin0, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}
impl PwmPeriph<CCR2> for pac::TB2 {
    type Gpio = Pin<P5, Pin1, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}

impl PwmPeriph<CCR1> for pac::TB3 {
    type Gpio = Pin<P6, Pin0, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}
impl PwmPeriph<CCR2> for pac::TB3 {
    type Gpio = Pin<P6, Pin1, Alternate1<Output>>;
    const ALT: Alt = Alt::Alt1;
}

/// A single PWM channel driven by one TimerB peripheral
pub struct PwmChannel<T: PwmPeriph<C>, C> {
    _timer: PhantomData<T>,
    _ccrn: PhantomData<C>,
    pin: T::Gpio,
}

impl<T: PwmPeriph<C>, C> PwmChannel<T, C> {
    /// Consumes the timer and the matching alternate-function GPIO pin and
    /// starts the PWM waveform with zero duty. `period` counts timer clocks;
    /// the waveform repeats every `period + 1` clocks.
    pub fn new(timer: T, config: TimerConfig, period: u16, pin: T::Gpio) -> Self {
        config.write_regs(&timer);
        CCRn::<CCR0>::set_ccrn(&timer, period);
        CCRn::<CCR0>::config_cmp_mode(&timer, Outmod::Out);
        CCRn::<C>::set_ccrn(&timer, 0);
        CCRn::<C>::config_cmp_mode(&timer, Outmod::ResetSet);
        timer.upmode();
        PwmChannel {
            _timer: PhantomData,
            _ccrn: PhantomData,
            pin,
        }
    }

    /// Reconnects the timer output to the pin after a `disable`.
    pub fn enable(&mut self) {
        T::to_alt(&mut self.pin);
    }

    /// Disconnects the timer output from the pin, leaving the pin on its
    /// GPIO function. The timer keeps running.
    pub fn disable(&mut self) {
        T::to_gpio(&mut self.pin);
    }
}

impl<T: PwmPeriph<C>, C> ErrorType for PwmChannel<T, C> {
    type Error = Infallible;
}

impl<T: PwmPeriph<C>, C> SetDutyCycle for PwmChannel<T, C> {
    /// Maximum valid duty is equal to the period. If the duty cycle exceeds
    /// the period, the output never resets and stays high for the whole
    /// period.
    #[inline]
    fn max_duty_cycle(&self) -> u16 {
        let timer = unsafe { T::steal() };
        CCRn::<CCR0>::get_ccrn(&timer)
    }

    #[inline]
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let timer = unsafe { T::steal() };
        CCRn::<C>::set_ccrn(&timer, duty);
        Ok(())
    }
}
