//! Constants used across the DSSS telemetry protocol implementation.
//!
//! This module defines protocol-wide constants for PRN sequence sizing,
//! frame layout, hardware FIFO capacity, status-byte decoding, and the
//! pacing policy between byte transmissions.
//!
//! ## Key Concepts
//!
//! - **PRN sizing**: every logical bit is spread into one full 64-byte
//!   (512-chip) pseudorandom sequence; partial sequences never occur.
//! - **Frame layout**: one transmitted data byte becomes a fixed 30-bit
//!   frame (7-bit preamble, 8 parity bits, 8 data bits, 7-bit postamble).
//! - **Status byte**: the radio core reports its state in the high nibble
//!   and the free TX FIFO slot count in the low nibble of every strobe
//!   response; the literal `0x7F` marks a fully drained transmission.
//! - **Pacing**: inter-byte gaps are either a fixed demo interval or a
//!   randomized window that spreads transmissions over the duty cycle.

/// Length in bytes of one PRN spreading sequence (512 chips).
pub const PRN_LENGTH_BYTES: usize = 64;

/// Number of chips in one PRN sequence; each logical bit is spread into
/// exactly this many chips.
pub const CHIPS_PER_BIT: usize = PRN_LENGTH_BYTES * 8;

/// Capacity in bytes of the radio core's hardware TX FIFO.
pub const TX_FIFO_SIZE: usize = 64;

/// Number of bits in the frame preamble (`1110010`).
pub const PREAMBLE_BITS: usize = 7;

/// Number of bits in the frame postamble (`1011000`).
pub const POSTAMBLE_BITS: usize = 7;

/// Total logical bits per frame: preamble + parity byte + data byte +
/// postamble. Always exactly 30.
pub const FRAME_BITS: usize = PREAMBLE_BITS + 8 + 8 + POSTAMBLE_BITS;

/// Total chip-stream bytes produced for one frame (30 full PRN sequences).
pub const FRAME_CHIP_BYTES: usize = FRAME_BITS * PRN_LENGTH_BYTES;

/// Status-byte mask for the radio chip-state nibble. Non-zero while the
/// core is busy (not yet idle).
pub const CHIP_STATE_MASK: u8 = 0xF0;

/// Status-byte mask for the oscillator-stabilizing states entered right
/// after the transmitter is strobed on.
pub const OSC_SETTLING_MASK: u8 = 0xC0;

/// Status-byte mask for the free-TX-FIFO-slot count (0..=15).
pub const FIFO_FREE_MASK: u8 = 0x0F;

/// Status-byte sentinel reported once the TX FIFO has fully drained and
/// the last chip has been radiated.
pub const STATUS_TX_DRAINED: u8 = 0x7F;

/// Delay in milliseconds between FIFO free-space polls while streaming.
/// One quantum drains roughly eight bytes at the 64 kbps chip rate.
pub const REFILL_QUANTUM_MS: u32 = 1;

/// Fixed inter-byte gap in milliseconds used by the demo pacing policy.
pub const DEMO_BYTE_GAP_MS: u32 = 1000;

/// Exclusive upper bound in milliseconds of the randomized lead-in delay
/// before the first byte of a paced transmission.
pub const PACED_LEAD_MAX_MS: u32 = 2000;

/// Inclusive lower bound in milliseconds of the randomized gap after each
/// byte of a paced transmission.
pub const PACED_GAP_MIN_MS: u32 = 8000;

/// Exclusive upper bound in milliseconds of the randomized gap after each
/// byte of a paced transmission.
pub const PACED_GAP_MAX_MS: u32 = 12000;
