//! Threshold classification of ADC readings
//!
//! A [`Window`] carries the same pair of bounds that gets programmed into the
//! ADC's window comparator, so software classification and the hardware
//! interrupt path always agree on which zone a reading falls in. A
//! [`Threshold`] is the one-bound variant used for plain on/off control.

use crate::error::Error;

/// Zone of a reading relative to a two-bound window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// Strictly above the high bound
    AboveHigh,
    /// Strictly below the low bound
    BelowLow,
    /// At or between the bounds
    InBand,
}

/// Level of a reading relative to a single threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// At or above the threshold
    Above,
    /// Below the threshold
    Below,
}

/// A validated pair of classification bounds with `high > low`.
///
/// The bounds match the hardware convention of `ADCHI` and `ADCLO`: readings
/// equal to either bound are in band, only readings strictly outside the
/// bounds classify as [`Zone::AboveHigh`] or [`Zone::BelowLow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    low: u16,
    high: u16,
}

impl Window {
    /// Creates a window from its low and high bounds.
    ///
    /// Errors with [`Error::InvalidWindow`] unless `high > low`. Equal bounds
    /// are rejected as well, since they would leave a single-point band that
    /// the comparator convention can never report as above or below.
    pub const fn new(low: u16, high: u16) -> Result<Window, Error> {
        if high > low {
            Ok(Window { low, high })
        } else {
            Err(Error::InvalidWindow)
        }
    }

    /// The low bound.
    pub const fn low(&self) -> u16 {
        self.low
    }

    /// The high bound.
    pub const fn high(&self) -> u16 {
        self.high
    }

    /// Classifies a reading into its zone.
    ///
    /// Total over all of `u16`; ties on either bound are [`Zone::InBand`].
    pub const fn classify(&self, reading: u16) -> Zone {
        if reading > self.high {
            Zone::AboveHigh
        } else if reading < self.low {
            Zone::BelowLow
        } else {
            Zone::InBand
        }
    }
}

/// A single classification bound.
///
/// Unlike [`Window`], the comparison is inclusive: a reading equal to the
/// threshold is [`Level::Above`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Threshold(u16);

impl Threshold {
    /// Creates a threshold. Any `u16` is valid.
    pub const fn new(value: u16) -> Threshold {
        Threshold(value)
    }

    /// The threshold value.
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Classifies a reading against the threshold, inclusive on the high side.
    pub const fn classify(&self, reading: u16) -> Level {
        if reading >= self.0 {
            Level::Above
        } else {
            Level::Below
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rejects_inverted_and_equal_bounds() {
        assert_eq!(Window::new(100, 100), Err(Error::InvalidWindow));
        assert_eq!(Window::new(101, 100), Err(Error::InvalidWindow));
        assert!(Window::new(100, 101).is_ok());
    }

    #[test]
    fn ties_on_bounds_are_in_band() {
        let w = Window::new(2789, 3931).unwrap();
        assert_eq!(w.classify(2789), Zone::InBand);
        assert_eq!(w.classify(3931), Zone::InBand);
        assert_eq!(w.classify(3932), Zone::AboveHigh);
        assert_eq!(w.classify(2788), Zone::BelowLow);
    }

    #[test]
    fn classify_is_total_over_the_adc_range() {
        let w = Window::new(2789, 3931).unwrap();
        for reading in 0..=4095u16 {
            let zone = w.classify(reading);
            match zone {
                Zone::AboveHigh => assert!(reading > 3931),
                Zone::BelowLow => assert!(reading < 2789),
                Zone::InBand => assert!(reading >= 2789 && reading <= 3931),
            }
        }
    }

    #[test]
    fn window_spans_the_full_range() {
        let w = Window::new(0, u16::MAX).unwrap();
        assert_eq!(w.classify(0), Zone::InBand);
        assert_eq!(w.classify(u16::MAX), Zone::InBand);
    }

    #[test]
    fn threshold_is_inclusive_above() {
        let t = Threshold::new(3000);
        assert_eq!(t.classify(3000), Level::Above);
        assert_eq!(t.classify(2999), Level::Below);
        assert_eq!(t.classify(4095), Level::Above);
    }

    #[test]
    fn zero_threshold_is_always_above() {
        let t = Threshold::new(0);
        assert_eq!(t.classify(0), Level::Above);
    }
}
