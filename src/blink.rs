//! Blink-rate actuator
//!
//! [`Blink`] toggles an output on every tick and, on zone transitions, asks
//! the caller to retime the tick source: a fast period above the window, a
//! slow period below it, and a full stop with the output held low while the
//! reading sits in band. The actuator itself never counts time; period
//! changes travel out as [`Retime`] commands for the timer driver to apply.

use crate::controller::Actuator;
use crate::threshold::Zone;

/// Timing command issued on a zone transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Retime {
    /// Run the tick source with this period, in timer counts
    Period(u16),
    /// Stop the tick source and hold the output at `level`
    Freeze {
        /// Output level to park the pin at
        level: bool,
    },
}

/// A two-rate blinker.
///
/// `slow` and `fast` are tick periods in timer counts, handed back verbatim
/// inside [`Retime::Period`]. Nothing requires `fast < slow`; the names
/// describe the intended wiring, not an enforced invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    slow: u16,
    fast: u16,
    level: bool,
    frozen: bool,
}

impl Blink {
    /// Creates a blinker with its output considered low.
    pub const fn new(slow: u16, fast: u16) -> Blink {
        Blink {
            slow,
            fast,
            level: false,
            frozen: false,
        }
    }

    /// The output level after the most recent tick or freeze.
    pub const fn level(&self) -> bool {
        self.level
    }
}

impl Actuator for Blink {
    type Command = Retime;
    type Drive = bool;

    /// Above the window blinks fast, below blinks slow, in band freezes low.
    fn on_transition(&mut self, zone: Zone) -> Retime {
        match zone {
            Zone::AboveHigh => {
                self.frozen = false;
                Retime::Period(self.fast)
            }
            Zone::BelowLow => {
                self.frozen = false;
                Retime::Period(self.slow)
            }
            Zone::InBand => {
                self.frozen = true;
                self.level = false;
                Retime::Freeze { level: false }
            }
        }
    }

    /// Inverts the output level. The tick source's period, not this method,
    /// decides how fast the blinking runs.
    ///
    /// A tick that was already latched when a freeze landed leaves the
    /// parked level in place instead of inverting it.
    fn on_tick(&mut self) -> bool {
        if !self.frozen {
            self.level = !self.level;
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::threshold::Window;

    const SLOW: u16 = 8191;
    const FAST: u16 = 2047;

    #[test]
    fn transitions_pick_the_matching_period() {
        let mut blink = Blink::new(SLOW, FAST);
        assert_eq!(blink.on_transition(Zone::AboveHigh), Retime::Period(FAST));
        assert_eq!(blink.on_transition(Zone::BelowLow), Retime::Period(SLOW));
        assert_eq!(
            blink.on_transition(Zone::InBand),
            Retime::Freeze { level: false }
        );
    }

    #[test]
    fn ticks_invert_the_level() {
        let mut blink = Blink::new(SLOW, FAST);
        assert!(!blink.level());
        assert!(blink.on_tick());
        assert!(!blink.on_tick());
        assert!(blink.on_tick());
    }

    #[test]
    fn freeze_forces_the_level_low() {
        let mut blink = Blink::new(SLOW, FAST);
        blink.on_tick();
        assert!(blink.level());
        blink.on_transition(Zone::InBand);
        assert!(!blink.level());
    }

    #[test]
    fn tick_pending_at_the_freeze_leaves_the_level_parked() {
        let mut blink = Blink::new(SLOW, FAST);
        blink.on_transition(Zone::AboveHigh);
        blink.on_tick();
        assert!(blink.level());

        blink.on_transition(Zone::InBand);
        // A tick latched just before the freeze must not re-invert
        assert!(!blink.on_tick());
        assert!(!blink.level());

        // Leaving the band resumes normal toggling
        blink.on_transition(Zone::BelowLow);
        assert!(blink.on_tick());
        assert!(!blink.on_tick());
    }

    #[test]
    fn retiming_does_not_reset_the_level() {
        let mut blink = Blink::new(SLOW, FAST);
        blink.on_tick();
        blink.on_transition(Zone::AboveHigh);
        assert!(blink.level());
    }

    #[test]
    fn controller_only_retimes_on_transitions() {
        let window = Window::new(1000, 3000).unwrap();
        let mut c = Controller::new(window, Blink::new(SLOW, FAST));

        assert_eq!(c.on_sample(3500), Some(Retime::Period(FAST)));
        assert_eq!(c.on_sample(3600), None);
        assert!(c.on_tick());
        assert_eq!(c.on_sample(500), Some(Retime::Period(SLOW)));
        assert_eq!(
            c.on_sample(2000),
            Some(Retime::Freeze { level: false })
        );
        assert!(!c.actuator().level());
    }
}
