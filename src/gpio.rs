//! GPIO pins
//!
//! Each pin is a zero-sized typestate handle `Pin<PORT, PIN, MODE>`. Ports
//! are split into their pins with [`GpioExt::split`], which requires the PMM
//! handle because pin states stay high-impedance until `LOCKLPM5` has been
//! cleared.
//!
//! Pins start out in the reset [`Floating`] state and can be moved to push
//! pull [`Output`] or handed to a peripheral function via the `Alternate`
//! modes. Analog and timer pin assignments are listed in the [`adc`] and
//! [`pwm`] module docs.
//!
//! [`adc`]: crate::adc
//! [`pwm`]: crate::pwm

use crate::hw_traits::gpio::GpioPeriph;
use crate::pmm::Pmm;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use msp430fr2355 as pac;

/// Marker for port P1
pub struct P1;
/// Marker for port P2
pub struct P2;
/// Marker for port P3
pub struct P3;
/// Marker for port P4
pub struct P4;
/// Marker for port P5
pub struct P5;
/// Marker for port P6
pub struct P6;

/// Trait of port type markers
pub trait PortNum {
    /// PAC peripheral owning this port's registers
    type Periph: GpioPeriph;
}

/// Trait of pin-number type markers
pub trait PinNum {
    /// Pin index within its port, 0 to 7
    const NUM: u8;
}

macro_rules! pin_num {
    ($Pin:ident, $num:literal, $doc:expr) => {
        #[doc = $doc]
        pub struct $Pin;

        impl PinNum for $Pin {
            const NUM: u8 = $num;
        }
    };
}

pin_num!(Pin0, 0, "Marker for pin 0");
pin_num!(Pin1, 1, "Marker for pin 1");
pin_num!(Pin2, 2, "Marker for pin 2");
pin_num!(Pin3, 3, "Marker for pin 3");
pin_num!(Pin4, 4, "Marker for pin 4");
pin_num!(Pin5, 5, "Marker for pin 5");
pin_num!(Pin6, 6, "Marker for pin 6");
pin_num!(Pin7, 7, "Marker for pin 7");

/// Reset pin state: high-impedance input with both select bits clear
pub struct Floating;
/// Push-pull output
pub struct Output;
/// Primary module function (SEL0 set)
pub struct Alternate1<MODE>(PhantomData<MODE>);
/// Secondary module function (SEL1 set)
pub struct Alternate2<MODE>(PhantomData<MODE>);
/// Tertiary module function (both select bits set)
pub struct Alternate3<MODE>(PhantomData<MODE>);

/// A single GPIO pin in mode `MODE`
pub struct Pin<PORT: PortNum, PIN: PinNum, MODE> {
    _marker: PhantomData<(PORT, PIN, MODE)>,
}

impl<PORT: PortNum, PIN: PinNum, MODE> Pin<PORT, PIN, MODE> {
    const MASK: u8 = 1 << PIN::NUM;

    const fn new() -> Self {
        Pin {
            _marker: PhantomData,
        }
    }

    fn periph() -> PORT::Periph {
        unsafe { PORT::Periph::steal() }
    }

    /// Selects the pin's primary module function.
    pub fn to_alternate1(self) -> Pin<PORT, PIN, Alternate1<MODE>> {
        Self::periph().pxsel0_set(Self::MASK);
        Pin::new()
    }

    /// Selects the pin's secondary module function.
    pub fn to_alternate2(self) -> Pin<PORT, PIN, Alternate2<MODE>> {
        Self::periph().pxsel1_set(Self::MASK);
        Pin::new()
    }
}

impl<PORT: PortNum, PIN: PinNum> Pin<PORT, PIN, Floating> {
    /// Makes the pin a push-pull output, driving it low first.
    pub fn to_output(self) -> Pin<PORT, PIN, Output> {
        let p = Self::periph();
        p.pxout_clear(Self::MASK);
        p.pxdir_set(Self::MASK);
        Pin::new()
    }

    /// Selects the pin's tertiary function by flipping both select bits at
    /// once through the complement register. On the analog-capable pins this
    /// disconnects the digital input buffer.
    pub fn to_alternate3(self) -> Pin<PORT, PIN, Alternate3<Floating>> {
        Self::periph().pxselc_wr(Self::MASK);
        Pin::new()
    }
}

/// Direct control over a pin's function-select bits.
///
/// Used by drivers that park their pin as plain GPIO while inactive and
/// reconnect it to the peripheral function on demand.
pub trait ChangeSelectBits {
    /// Sets the SEL0 bit
    fn set_sel0(&mut self);
    /// Sets the SEL1 bit
    fn set_sel1(&mut self);
    /// Clears the SEL0 bit
    fn clear_sel0(&mut self);
    /// Clears the SEL1 bit
    fn clear_sel1(&mut self);
}

impl<PORT: PortNum, PIN: PinNum, MODE> ChangeSelectBits for Pin<PORT, PIN, MODE> {
    fn set_sel0(&mut self) {
        Self::periph().pxsel0_set(Self::MASK);
    }

    fn set_sel1(&mut self) {
        Self::periph().pxsel1_set(Self::MASK);
    }

    fn clear_sel0(&mut self) {
        Self::periph().pxsel0_clear(Self::MASK);
    }

    fn clear_sel1(&mut self) {
        Self::periph().pxsel1_clear(Self::MASK);
    }
}

impl<PORT: PortNum, PIN: PinNum> ErrorType for Pin<PORT, PIN, Output> {
    type Error = Infallible;
}

impl<PORT: PortNum, PIN: PinNum> OutputPin for Pin<PORT, PIN, Output> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Self::periph().pxout_clear(Self::MASK);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Self::periph().pxout_set(Self::MASK);
        Ok(())
    }
}

impl<PORT: PortNum, PIN: PinNum> StatefulOutputPin for Pin<PORT, PIN, Output> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxout_rd() & Self::MASK != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::periph().pxout_rd() & Self::MASK == 0)
    }

    /// Single-instruction toggle through the port's toggle register helper.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        Self::periph().pxout_toggle(Self::MASK);
        Ok(())
    }
}

/// Extension trait for splitting a GPIO port into its pins
pub trait GpioExt {
    /// Container of the port's eight pins
    type Pins;

    /// Splits the port. The PMM handle proves `LOCKLPM5` has been cleared,
    /// otherwise pin configuration would not take effect.
    fn split(self, pmm: &Pmm) -> Self::Pins;
}

macro_rules! gpio_parts {
    ($Px:ident, $PxPins:ident) => {
        /// Pins of the port, all in their reset state
        pub struct $PxPins {
            /// Pin 0
            pub pin0: Pin<$Px, Pin0, Floating>,
            /// Pin 1
            pub pin1: Pin<$Px, Pin1, Floating>,
            /// Pin 2
            pub pin2: Pin<$Px, Pin2, Floating>,
            /// Pin 3
            pub pin3: Pin<$Px, Pin3, Floating>,
            /// Pin 4
            pub pin4: Pin<$Px, Pin4, Floating>,
            /// Pin 5
            pub pin5: Pin<$Px, Pin5, Floating>,
            /// Pin 6
            pub pin6: Pin<$Px, Pin6, Floating>,
            /// Pin 7
            pub pin7: Pin<$Px, Pin7, Floating>,
        }

        impl PortNum for $Px {
            type Periph = pac::$Px;
        }

        impl GpioExt for pac::$Px {
            type Pins = $PxPins;

            fn split(self, _pmm: &Pmm) -> $PxPins {
                $PxPins {
                    pin0: Pin::new(),
                    pin1: Pin::new(),
                    pin2: Pin::new(),
                    pin3: Pin::new(),
                    pin4: Pin::new(),
                    pin5: Pin::new(),
                    pin6: Pin::new(),
                    pin7: Pin::new(),
                }
            }
        }
    };
}

gpio_parts!(P1, P1Pins);
gpio_parts!(P2, P2Pins);
gpio_parts!(P3, P3Pins);
gpio_parts!(P4, P4Pins);
gpio_parts!(P5, P5Pins);
gpio_parts!(P6, P6Pins);
