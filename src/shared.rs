//! State cells shared between `main` and interrupt handlers
//!
//! Firmware in this crate keeps controller and driver state in `static`
//! [`Shared`] cells. Every access happens inside a critical section, so an
//! interrupt can never observe a half-updated controller. The cell starts
//! empty; `main` fills it during init, before unmasking interrupts.

use core::cell::RefCell;
use critical_section::Mutex;

/// A `static`-friendly cell holding state touched by interrupt handlers.
pub struct Shared<T>(Mutex<RefCell<Option<T>>>);

impl<T> Shared<T> {
    /// Creates an empty cell. Usable in `static` initializers.
    pub const fn empty() -> Shared<T> {
        Shared(Mutex::new(RefCell::new(None)))
    }

    /// Stores `value`, dropping whatever the cell held before.
    pub fn put(&self, value: T) {
        critical_section::with(|cs| {
            self.0.borrow_ref_mut(cs).replace(value);
        });
    }

    /// Runs `f` on the stored value inside a critical section.
    ///
    /// Returns `None` without calling `f` while the cell is empty, which on
    /// the interrupt side doubles as "init has not finished yet".
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).as_mut().map(f))
    }

    /// Removes and returns the stored value.
    pub fn take(&self) -> Option<T> {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let cell: Shared<u32> = Shared::empty();
        assert_eq!(cell.with(|v| *v), None);
    }

    #[test]
    fn put_then_with_sees_the_value() {
        let cell = Shared::empty();
        cell.put(7u32);
        assert_eq!(cell.with(|v| *v), Some(7));
        cell.with(|v| *v += 1);
        assert_eq!(cell.with(|v| *v), Some(8));
    }

    #[test]
    fn put_replaces_and_take_empties() {
        let cell = Shared::empty();
        cell.put(1u32);
        cell.put(2);
        assert_eq!(cell.take(), Some(2));
        assert_eq!(cell.take(), None);
        assert_eq!(cell.with(|v| *v), None);
    }

    #[test]
    fn controller_shared_between_contexts() {
        use crate::controller::Controller;
        use crate::ramp::Ramp;
        use crate::threshold::{Window, Zone};

        static CONTROL: Shared<Controller<Ramp>> = Shared::empty();

        // The interrupt side sees an empty cell until init finishes
        assert_eq!(CONTROL.with(|c| c.on_tick()), None);

        let window = Window::new(100, 200).unwrap();
        CONTROL.put(Controller::new(window, Ramp::new(1023, 10)));

        CONTROL.with(|c| c.on_zone(Zone::AboveHigh));
        assert_eq!(CONTROL.with(|c| c.on_tick()), Some(10));
        assert_eq!(CONTROL.with(|c| c.on_tick()), Some(20));
    }
}
