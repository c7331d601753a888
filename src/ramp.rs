//! Bounded duty-cycle ramp
//!
//! [`Ramp`] walks a PWM duty cycle up or down by a fixed step per tick,
//! saturating at zero and at a configured maximum. Which direction it walks
//! is a [`Trend`] derived from the current [`Zone`]: readings above the
//! window push the duty up, readings below pull it down, and in-band
//! readings hold it steady.

use crate::controller::Actuator;
use crate::threshold::Zone;

/// Direction the ramp moves on each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trend {
    /// Step the duty up
    Rising,
    /// Hold the duty
    Steady,
    /// Step the duty down
    Falling,
}

impl From<Zone> for Trend {
    fn from(zone: Zone) -> Trend {
        match zone {
            Zone::AboveHigh => Trend::Rising,
            Zone::BelowLow => Trend::Falling,
            Zone::InBand => Trend::Steady,
        }
    }
}

/// A saturating duty-cycle ramp.
///
/// The duty starts at zero and stays within `0..=max_duty` no matter how
/// many steps are taken in either direction. `max_duty` is normally the
/// PWM period register value, so full scale means always-on output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ramp {
    duty: u16,
    max_duty: u16,
    step: u16,
    trend: Trend,
}

impl Ramp {
    /// Creates a ramp holding steady at zero duty.
    pub const fn new(max_duty: u16, step: u16) -> Ramp {
        Ramp {
            duty: 0,
            max_duty,
            step,
            trend: Trend::Steady,
        }
    }

    /// The current duty value.
    pub const fn duty(&self) -> u16 {
        self.duty
    }

    /// The current direction of travel.
    pub const fn trend(&self) -> Trend {
        self.trend
    }

    /// Sets the direction applied by subsequent steps.
    pub fn set_trend(&mut self, trend: Trend) {
        self.trend = trend;
    }

    /// Takes one step in the current direction and returns the new duty.
    ///
    /// The returned value is always valid to write to the PWM compare
    /// register, including when the ramp is already pinned at a bound.
    pub fn step(&mut self) -> u16 {
        match self.trend {
            Trend::Rising => {
                let stepped = self.duty.saturating_add(self.step);
                self.duty = if stepped > self.max_duty {
                    self.max_duty
                } else {
                    stepped
                };
            }
            Trend::Falling => self.duty = self.duty.saturating_sub(self.step),
            Trend::Steady => {}
        }
        self.duty
    }
}

impl Actuator for Ramp {
    type Command = Trend;
    type Drive = u16;

    fn on_transition(&mut self, zone: Zone) -> Trend {
        let trend = zone.into();
        self.set_trend(trend);
        trend
    }

    fn on_tick(&mut self) -> u16 {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::threshold::Window;

    #[test]
    fn rising_clamps_at_max() {
        let mut ramp = Ramp::new(1023, 10);
        ramp.set_trend(Trend::Rising);
        for _ in 0..102 {
            ramp.step();
        }
        assert_eq!(ramp.duty(), 1020);
        assert_eq!(ramp.step(), 1023);
        assert_eq!(ramp.step(), 1023);
    }

    #[test]
    fn falling_clamps_at_zero() {
        let mut ramp = Ramp::new(1023, 10);
        ramp.set_trend(Trend::Falling);
        assert_eq!(ramp.step(), 0);
        ramp.set_trend(Trend::Rising);
        ramp.step();
        ramp.set_trend(Trend::Falling);
        assert_eq!(ramp.step(), 0);
    }

    #[test]
    fn steady_holds_the_duty() {
        let mut ramp = Ramp::new(1023, 10);
        ramp.set_trend(Trend::Rising);
        ramp.step();
        ramp.step();
        ramp.set_trend(Trend::Steady);
        assert_eq!(ramp.step(), 20);
        assert_eq!(ramp.step(), 20);
    }

    #[test]
    fn step_larger_than_max_pins_in_one_tick() {
        let mut ramp = Ramp::new(100, 1000);
        ramp.set_trend(Trend::Rising);
        assert_eq!(ramp.step(), 100);
        ramp.set_trend(Trend::Falling);
        assert_eq!(ramp.step(), 0);
    }

    // Two samples above the window ramp the duty twice, then an in-band
    // sample freezes it.
    #[test]
    fn controller_drives_ramp_through_a_scenario() {
        let window = Window::new(2789, 3931).unwrap();
        let mut c = Controller::new(window, Ramp::new(1023, 10));

        assert_eq!(c.on_sample(4000), Some(Trend::Rising));
        assert_eq!(c.on_tick(), 10);
        assert_eq!(c.on_sample(4000), None);
        assert_eq!(c.on_tick(), 20);
        assert_eq!(c.on_sample(3000), Some(Trend::Steady));
        assert_eq!(c.on_tick(), 20);
        assert_eq!(c.on_sample(2000), Some(Trend::Falling));
        assert_eq!(c.on_tick(), 10);
        assert_eq!(c.on_tick(), 0);
        assert_eq!(c.on_tick(), 0);
    }
}
