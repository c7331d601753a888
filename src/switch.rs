//! Direct on/off control from a single threshold
//!
//! [`Switch`] classifies each reading against one [`Threshold`] and reports
//! only *changes* of level, so the caller writes the output pin exactly once
//! per crossing instead of on every sample. Used for the LED and buzzer
//! demos, where the output is a plain digital level rather than a ramp or a
//! blink rate.

use crate::threshold::{Level, Threshold};

/// A change-detecting threshold switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Switch {
    threshold: Threshold,
    level: Option<Level>,
}

impl Switch {
    /// Creates a switch that has not classified anything yet. The first
    /// sample always reports a change.
    pub const fn new(threshold: Threshold) -> Switch {
        Switch {
            threshold,
            level: None,
        }
    }

    /// Classifies `reading` and returns `Some(on)` only when the output
    /// should change, with `on` true at or above the threshold.
    pub fn on_sample(&mut self, reading: u16) -> Option<bool> {
        let level = self.threshold.classify(reading);
        if self.level == Some(level) {
            return None;
        }
        self.level = Some(level);
        Some(matches!(level, Level::Above))
    }

    /// Whether the last classified reading was at or above the threshold.
    pub fn is_on(&self) -> bool {
        matches!(self.level, Some(Level::Above))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_reports_a_change() {
        let mut s = Switch::new(Threshold::new(500));
        assert_eq!(s.on_sample(100), Some(false));
        let mut s = Switch::new(Threshold::new(500));
        assert_eq!(s.on_sample(600), Some(true));
    }

    #[test]
    fn repeated_levels_are_silent() {
        let mut s = Switch::new(Threshold::new(500));
        assert_eq!(s.on_sample(700), Some(true));
        assert_eq!(s.on_sample(800), None);
        assert_eq!(s.on_sample(500), None);
        assert!(s.is_on());
        assert_eq!(s.on_sample(499), Some(false));
        assert_eq!(s.on_sample(0), None);
        assert!(!s.is_on());
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut s = Switch::new(Threshold::new(500));
        assert_eq!(s.on_sample(499), Some(false));
        assert_eq!(s.on_sample(500), Some(true));
    }
}
