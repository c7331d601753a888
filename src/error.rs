//! Error types shared across the crate

use core::fmt;

/// Errors reported by the drivers in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// A hardware-triggered conversion fired before the previous result was read.
    ///
    /// Raised from the ADC's conversion-time overflow flag. Usually means the
    /// trigger period is shorter than sample time plus conversion time.
    ConversionTimeout,
    /// The crystal oscillator fault flag did not clear.
    ClockFault,
    /// A window was constructed with a high bound at or below its low bound.
    InvalidWindow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConversionTimeout => f.write_str("conversion overran unread result"),
            Error::ClockFault => f.write_str("oscillator fault"),
            Error::InvalidWindow => f.write_str("window high bound not above low bound"),
        }
    }
}
