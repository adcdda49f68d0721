//! Timing utilities for the watchdog-interval tick source.
//!
//! The blocking delay the streaming engine needs is provided through
//! `embedded_hal::delay::DelayNs`, so any HAL delay works. On the CC430
//! the conventional source is the watchdog timer run in interval mode:
//! its interrupt increments a global tick counter (feature `timer-isr`,
//! see [`wdt_timer_tick`]) and [`TickDelay`] busy-waits on that counter.
//!
//! The helpers below convert a clock frequency and watchdog divider into
//! the tick rate [`TickDelay`] needs.
//!
//! Common divider choices at 8 MHz SMCLK:
//!
//! | WDT divider | Tick interval | Ticks per ms |
//! |-------------|---------------|--------------|
//! |          64 |         8 µs  |          125 |
//! |         512 |        64 µs  |           16 |
//! |        8192 |      1.024 ms |            1 |

use libm::round;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

/// Clock frequency of the stock flight configuration (8 MHz SMCLK).
pub const WDT_DEFAULT_CLOCK_HZ: u32 = 8_000_000;

/// Watchdog divider of the stock flight configuration (about 64 µs per
/// interval interrupt).
pub const WDT_DEFAULT_DIVIDER: u32 = 512;

/// Computes the watchdog tick rate (interrupts per millisecond) for a
/// clock frequency and divider, rounded to the nearest integer.
///
/// # Arguments
/// - `clock_hz`: the clock feeding the watchdog, in Hz
/// - `divider`: the watchdog interval divider (e.g. 512)
///
/// # Returns
/// Ticks per millisecond, for initializing [`TickDelay`].
pub fn wdt_ticks_per_ms(clock_hz: u32, divider: u32) -> u32 {
    round(f64::from(clock_hz) / f64::from(divider) / 1000.0) as u32
}

/// Compile-time variant of [`wdt_ticks_per_ms`].
pub const fn const_wdt_ticks_per_ms(clock_hz: u32, divider: u32) -> u32 {
    (clock_hz / divider + 500) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_configuration_rate() {
        // 8 MHz / 512 = 15625 ticks/s, rounds to 16 per ms.
        assert_eq!(
            wdt_ticks_per_ms(WDT_DEFAULT_CLOCK_HZ, WDT_DEFAULT_DIVIDER),
            16
        );
    }

    #[test]
    fn test_const_and_runtime_agree() {
        let cases = [(8_000_000, 64), (8_000_000, 512), (1_000_000, 512), (8_000_000, 8192)];
        for (clock, divider) in cases {
            assert_eq!(
                wdt_ticks_per_ms(clock, divider),
                const_wdt_ticks_per_ms(clock, divider),
                "clock {clock} divider {divider}"
            );
        }
    }
}
