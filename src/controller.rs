//! Zone-transition controller
//!
//! [`Controller`] owns a classification [`Window`], tracks which [`Zone`] the
//! last reading fell in, and forwards *transitions* (not every reading) to an
//! [`Actuator`]. Ticks from a timing source are forwarded unconditionally.
//! Both interrupt-driven firmware (feeding [`Controller::on_zone`] straight
//! from the window comparator vector) and polling loops (feeding raw readings
//! through [`Controller::on_sample`]) share the same state machine.

use crate::threshold::{Window, Zone};

/// An input consumed by [`Controller::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A fresh ADC reading
    Sample(u16),
    /// The timing source fired
    Tick,
}

/// Policy half of the control loop.
///
/// An actuator decides what happens on a zone transition and what gets driven
/// out on every tick. It never touches hardware itself; the commands and
/// drive values it returns are applied by the caller, so the policy stays
/// testable on the host.
pub trait Actuator {
    /// Reconfiguration issued when a new zone is entered
    type Command;
    /// Output value produced on every tick
    type Drive;

    /// Reacts to entering `zone`. Called on transitions only, never on
    /// repeated readings within the same zone.
    fn on_transition(&mut self, zone: Zone) -> Self::Command;

    /// Advances one tick and returns the value to drive out.
    fn on_tick(&mut self) -> Self::Drive;
}

/// Result of dispatching one [`Event`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<C, D> {
    /// A sample moved the controller into a new zone
    Command(C),
    /// A tick produced an output value
    Drive(D),
    /// A sample landed in the current zone; nothing to do
    Unchanged,
}

/// Tracks the current zone and feeds transitions and ticks to an actuator.
///
/// Until the first sample arrives the controller is in no zone at all, so the
/// first classification always counts as a transition.
pub struct Controller<A: Actuator> {
    window: Window,
    zone: Option<Zone>,
    actuator: A,
}

impl<A: Actuator> Controller<A> {
    /// Creates a controller with no zone entered yet.
    pub const fn new(window: Window, actuator: A) -> Self {
        Controller {
            window,
            zone: None,
            actuator,
        }
    }

    /// Classifies a raw reading and applies it. Returns the actuator's
    /// command if the reading moved the controller into a new zone.
    pub fn on_sample(&mut self, reading: u16) -> Option<A::Command> {
        let zone = self.window.classify(reading);
        self.on_zone(zone)
    }

    /// Applies an already-classified zone, as delivered by the hardware
    /// window comparator interrupts. Re-entering the current zone is a no-op.
    pub fn on_zone(&mut self, zone: Zone) -> Option<A::Command> {
        if self.zone == Some(zone) {
            return None;
        }
        self.zone = Some(zone);
        Some(self.actuator.on_transition(zone))
    }

    /// Forwards a tick to the actuator and returns its output drive.
    pub fn on_tick(&mut self) -> A::Drive {
        self.actuator.on_tick()
    }

    /// Dispatches either kind of event through the state machine.
    pub fn dispatch(&mut self, event: Event) -> Response<A::Command, A::Drive> {
        match event {
            Event::Sample(reading) => match self.on_sample(reading) {
                Some(command) => Response::Command(command),
                None => Response::Unchanged,
            },
            Event::Tick => Response::Drive(self.on_tick()),
        }
    }

    /// The zone of the most recent sample, if any arrived yet.
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    /// The classification window in use.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Borrows the actuator, e.g. to inspect its current output value.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        transitions: usize,
        ticks: usize,
        last: Option<Zone>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                transitions: 0,
                ticks: 0,
                last: None,
            }
        }
    }

    impl Actuator for Recorder {
        type Command = Zone;
        type Drive = usize;

        fn on_transition(&mut self, zone: Zone) -> Zone {
            self.transitions += 1;
            self.last = Some(zone);
            zone
        }

        fn on_tick(&mut self) -> usize {
            self.ticks += 1;
            self.ticks
        }
    }

    fn controller() -> Controller<Recorder> {
        Controller::new(Window::new(1000, 3000).unwrap(), Recorder::new())
    }

    #[test]
    fn first_sample_is_always_a_transition() {
        let mut c = controller();
        assert_eq!(c.zone(), None);
        assert_eq!(c.on_sample(2000), Some(Zone::InBand));
        assert_eq!(c.zone(), Some(Zone::InBand));
    }

    #[test]
    fn repeated_zone_is_a_no_op() {
        let mut c = controller();
        assert_eq!(c.on_sample(3500), Some(Zone::AboveHigh));
        assert_eq!(c.on_sample(3600), None);
        assert_eq!(c.on_sample(4095), None);
        assert_eq!(c.actuator().transitions, 1);
        assert_eq!(c.on_sample(500), Some(Zone::BelowLow));
        assert_eq!(c.actuator().transitions, 2);
    }

    #[test]
    fn preclassified_zones_share_the_state_machine() {
        let mut c = controller();
        assert_eq!(c.on_zone(Zone::AboveHigh), Some(Zone::AboveHigh));
        // A raw sample classifying into the same zone must not re-trigger
        assert_eq!(c.on_sample(4000), None);
    }

    #[test]
    fn ticks_do_not_disturb_the_zone() {
        let mut c = controller();
        c.on_sample(2000);
        c.on_tick();
        c.on_tick();
        assert_eq!(c.zone(), Some(Zone::InBand));
        assert_eq!(c.actuator().ticks, 2);
        assert_eq!(c.actuator().transitions, 1);
    }

    #[test]
    fn dispatch_maps_events_to_responses() {
        let mut c = controller();
        assert_eq!(
            c.dispatch(Event::Sample(100)),
            Response::Command(Zone::BelowLow)
        );
        assert_eq!(c.dispatch(Event::Sample(101)), Response::Unchanged);
        assert_eq!(c.dispatch(Event::Tick), Response::Drive(1));
    }
}
