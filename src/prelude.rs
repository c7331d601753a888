//! Prelude

pub use crate::adc::AdcPin as _msp430fr2x5x_windowctl_AdcPin;
pub use crate::clock::Clock as _msp430fr2x5x_windowctl_Clock;
pub use crate::clock::CsExt as _msp430fr2x5x_windowctl_CsExt;
pub use crate::clock::SmclkState as _msp430fr2x5x_windowctl_SmclkState;
pub use crate::controller::Actuator as _msp430fr2x5x_windowctl_Actuator;
pub use crate::gpio::GpioExt as _msp430fr2x5x_windowctl_GpioExt;
pub use crate::gpio::PinNum as _msp430fr2x5x_windowctl_PinNum;
pub use crate::gpio::PortNum as _msp430fr2x5x_windowctl_PortNum;
pub use crate::pwm::PwmPeriph as _msp430fr2x5x_windowctl_PwmPeriph;
pub use crate::timer::CapCmp as _msp430fr2x5x_windowctl_CapCmp;
pub use crate::timer::TimerExt as _msp430fr2x5x_windowctl_TimerExt;
pub use crate::timer::TimerPeriph as _msp430fr2x5x_windowctl_TimerPeriph;
