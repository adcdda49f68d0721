//! Radio transceiver capability boundary.
//!
//! The streaming engine never touches hardware registers directly; it
//! drives the radio core through the narrow [`Transceiver`] trait. Two
//! implementations are expected: a register-level hardware driver (RF1A
//! or SPI, living outside this crate) and the in-crate
//! [`SimTransceiver`](crate::sim::SimTransceiver) used for testing the
//! FEC, modulation, and FIFO streaming logic without hardware.
//!
//! ## Status byte
//!
//! Every strobe returns the core's status byte. The high nibble encodes
//! the chip state (non-zero while busy, with `0xC0` covering the
//! oscillator-settling states after TX is enabled), the low nibble
//! reports the free TX FIFO slot count (0..=15), and the literal `0x7F`
//! signals a fully drained transmission. See the masks in
//! [`crate::consts`].

use crate::config::Cc1101Settings;

/// Command strobe opcodes understood by the radio core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum Strobe {
    /// SRES: reset the radio core.
    Reset = 0x30,
    /// STX: enable the transmitter.
    StartTx = 0x35,
    /// SIDLE: exit TX/RX and return to the idle state.
    Idle = 0x36,
    /// SFTX: flush the TX FIFO.
    FlushTx = 0x3B,
    /// SNOP: no operation; used to read the status byte.
    Nop = 0x3D,
}

/// Low-level access to a CC1101-class radio core.
///
/// All methods are infallible by design: the underlying command
/// interface has no error reporting, and device readiness is awaited by
/// polling the returned status byte. A non-responsive device therefore
/// blocks rather than erroring (see the crate-level design notes).
pub trait Transceiver {
    /// Issues a command strobe and returns the current status byte.
    fn strobe(&mut self, command: Strobe) -> u8;

    /// Appends `bytes` to the hardware TX FIFO. Callers never pass more
    /// than the free space reported by the latest status byte, and never
    /// more than 64 bytes.
    fn write_tx_buffer(&mut self, bytes: &[u8]);

    /// Appends `length` zero bytes to the hardware TX FIFO, subject to
    /// the same limits as [`write_tx_buffer`](Transceiver::write_tx_buffer).
    /// Used to insert silence without a source buffer.
    fn write_tx_buffer_zeros(&mut self, length: usize);

    /// Resets the radio core. Session setup only.
    fn reset(&mut self);

    /// Uploads the configuration register table. Session setup only.
    fn write_configuration(&mut self, settings: &Cc1101Settings);

    /// Programs the PA table with the given calibration byte. Session
    /// setup only.
    fn write_pa_table(&mut self, power: u8);
}
