use super::Steal;
use msp430fr2355 as pac;

pub trait GpioPeriph: Steal {
    fn pxout_rd(&self) -> u8;
    fn pxout_set(&self, bits: u8);
    fn pxout_clear(&self, bits: u8);
    fn pxout_toggle(&self, bits: u8);

    fn pxdir_set(&self, bits: u8);

    /// Atomically toggle both select bits of the masked pins
    fn pxselc_wr(&self, bits: u8);

    fn pxsel0_set(&self, bits: u8);
    fn pxsel0_clear(&self, bits: u8);

    fn pxsel1_set(&self, bits: u8);
    fn pxsel1_clear(&self, bits: u8);
}

macro_rules! set_clear_methods {
    ($reg:ident, $set:ident, $clear:ident) => {
        #[inline(always)]
        fn $set(&self, bits: u8) {
            unsafe { self.$reg.set_bits(|w| w.bits(bits)) }
        }

        #[inline(always)]
        fn $clear(&self, bits: u8) {
            unsafe { self.$reg.clear_bits(|w| w.bits(bits)) }
        }
    };
}

macro_rules! gpio_impl {
    ($px:ident: $Px:ident =>
     $pxout:ident, $pxdir:ident, $pxselc:ident, $pxsel0:ident, $pxsel1:ident
    ) => {
        mod $px {
            use super::*;

            impl Steal for pac::$Px {
                #[inline(always)]
                unsafe fn steal() -> Self {
                    pac::Peripherals::conjure().$Px
                }
            }

            impl GpioPeriph for pac::$Px {
                #[inline(always)]
                fn pxout_rd(&self) -> u8 {
                    self.$pxout.read().bits()
                }

                #[inline(always)]
                fn pxout_toggle(&self, bits: u8) {
                    unsafe { self.$pxout.toggle_bits(|w| w.bits(bits)) };
                }

                #[inline(always)]
                fn pxdir_set(&self, bits: u8) {
                    unsafe { self.$pxdir.set_bits(|w| w.bits(bits)) }
                }

                #[inline(always)]
                fn pxselc_wr(&self, bits: u8) {
                    self.$pxselc.write(|w| unsafe { w.bits(bits) })
                }

                set_clear_methods!($pxout, pxout_set, pxout_clear);
                set_clear_methods!($pxsel0, pxsel0_set, pxsel0_clear);
                set_clear_methods!($pxsel1, pxsel1_set, pxsel1_clear);
            }
        }
    };
}

gpio_impl!(p1: P1 => p1out, p1dir, p1selc, p1sel0, p1sel1);
gpio_impl!(p2: P2 => p2out, p2dir, p2selc, p2sel0, p2sel1);
gpio_impl!(p3: P3 => p3out, p3dir, p3selc, p3sel0, p3sel1);
gpio_impl!(p4: P4 => p4out, p4dir, p4selc, p4sel0, p4sel1);
gpio_impl!(p5: P5 => p5out, p5dir, p5selc, p5sel0, p5sel1);
gpio_impl!(p6: P6 => p6out, p6dir, p6selc, p6sel0, p6sel1);
