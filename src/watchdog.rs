//! Watchdog timer disable
//!
//! **Note**: MSP430 devices will reset after bootup if watchdog is not stopped after an initial 32
//! ms interval (roughly). Call `Wdt::constrain()` as soon in the application as possible to stop
//! the watchdog. All firmware in this crate runs with the watchdog held.

use msp430fr2355 as pac;
use pac::wdt_a::wdtctl::WDTSSEL_A;

const PASSWORD: u8 = 0x5A;

/// Watchdog timer handle. Holding it proves the watchdog has been stopped.
pub struct Wdt {
    _periph: pac::WDT_A,
}

impl Wdt {
    /// Takes the WDT peripheral and stops the watchdog. Sets the watchdog
    /// clock source to VLOCLK.
    pub fn constrain(wdt: pac::WDT_A) -> Self {
        wdt.wdtctl.write(|w| {
            unsafe { w.wdtpw().bits(PASSWORD) }
                .wdthold()
                .hold()
                .wdtssel()
                .variant(WDTSSEL_A::VLOCLK)
        });
        Wdt { _periph: wdt }
    }
}
