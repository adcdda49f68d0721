//! # dsss437
//!
//! A portable, no_std Rust driver for transmitting single-byte telemetry
//! frames over CC430/CC1101-class sub-GHz radio cores using
//! direct-sequence spread spectrum (DSSS).
//!
//! This driver implements the full transmit pipeline in software:
//! - a (16,8,5) systematic block-code FEC encoder
//! - bit-to-chip spreading with two fixed 512-chip PRN sequences
//! - flow-controlled streaming of the chip stream through the radio's
//!   64-byte TX FIFO, driven by polled status bytes
//! - fixed or randomized pacing between byte transmissions
//!
//! Hardware access is abstracted behind two injected capabilities: the
//! [`radio::Transceiver`] trait (strobe/FIFO/configuration primitives)
//! and `embedded_hal::delay::DelayNs` for blocking delays. The crate
//! ships a simulated transceiver ([`sim::SimTransceiver`]) so the whole
//! pipeline is testable without hardware.
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with `std::vec::Vec`s |
//! | `timer-isr` (default) | Watchdog-tick delay source using `critical_section` |
//! | `demo-mode`           | Fixed 1000 ms inter-byte pacing instead of randomized gaps |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust
//! use dsss437::driver::DsssDriver;
//! use dsss437::prn::PrnPair;
//! use dsss437::sim::SimTransceiver;
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//!
//! let radio = SimTransceiver::default(); // or a register-level hardware driver
//! let mut driver = DsssDriver::new(radio, NoopDelay::new(), PrnPair::default());
//!
//! driver.set_power(10);
//! driver.tx_init();
//! driver.transmit(b"T");
//! driver.sleep();
//! ```
//!
//! On hardware, pair the driver with [`timer::TickDelay`] and call
//! [`timer::wdt_timer_tick`] from the watchdog interval ISR.
//!
//! ## Integration Notes
//!
//! - Each transmitted byte radiates 1920 chip-stream bytes (30 bits x
//!   64 bytes); at 64 kbps a frame takes about a quarter of a second.
//! - All device waits are unbounded status polls with no timeout; a
//!   non-responsive radio core blocks indefinitely. This mirrors the
//!   radio core's documented programming model.
//! - The PRN pair and register settings are fixed at construction and
//!   never change during a transmission.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod config;
pub mod consts;
pub mod driver;
pub mod fec;
pub mod frame;
pub mod power;
pub mod prn;
pub mod radio;
pub mod sim;
pub mod timer;
