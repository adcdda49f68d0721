use core::cell::Cell;
use critical_section::Mutex;
use embedded_hal::delay::DelayNs;

/// Global watchdog-interval tick counter, shared between the ISR and
/// [`TickDelay`] instances.
static WDT_TICKS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

/// Advances the global tick counter by one.
///
/// Call this from the watchdog interval interrupt handler:
///
/// ```rust
/// # fn interrupt_handler() {
/// dsss437::timer::wdt_timer_tick();
/// # }
/// ```
pub fn wdt_timer_tick() {
    critical_section::with(|cs| {
        let ticks = WDT_TICKS.borrow(cs);
        ticks.set(ticks.get().wrapping_add(1));
    });
}

/// Reads the current global tick count.
pub fn wdt_ticks() -> u32 {
    critical_section::with(|cs| WDT_TICKS.borrow(cs).get())
}

/// Blocking delay driven by the watchdog-interval tick counter.
///
/// Implements [`embedded_hal::delay::DelayNs`] by busy-waiting until the
/// global counter has advanced far enough, making it suitable as the
/// delay capability of [`DsssDriver`](crate::driver::DsssDriver) on
/// hardware where the watchdog ISR calls [`wdt_timer_tick`].
///
/// Granularity is one watchdog interval; requested intervals round up to
/// whole milliseconds, so delays are never shorter than requested.
#[derive(Debug, Clone, Copy)]
pub struct TickDelay {
    ticks_per_ms: u32,
}

impl TickDelay {
    /// Creates a delay source for the given tick rate, typically from
    /// [`wdt_ticks_per_ms`](crate::timer::wdt_ticks_per_ms).
    pub const fn new(ticks_per_ms: u32) -> Self {
        Self { ticks_per_ms }
    }
}

impl DelayNs for TickDelay {
    fn delay_ns(&mut self, ns: u32) {
        let ms = ns.div_ceil(1_000_000);
        let ticks = ms.saturating_mul(self.ticks_per_ms);
        let start = wdt_ticks();
        while wdt_ticks().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }
}
