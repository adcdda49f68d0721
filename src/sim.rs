//! Software transceiver double for hardware-free testing.
//!
//! [`SimTransceiver`] models the pieces of a CC1101-class radio core the
//! streaming engine depends on: the 64-byte TX FIFO with a per-poll
//! drain rate, the oscillator-settling window after TX is enabled, the
//! status-byte encoding (state nibble, free-slot nibble, `0x7F` drained
//! sentinel), and the session-setup calls. Every FIFO write is logged
//! byte-for-byte together with its chunk size, so tests can assert both
//! the content and the flow-control shape of a transmission.
//!
//! The model is deliberately well-behaved: it always converges to idle
//! or drained, so the engine's unbounded polling loops terminate.

use crate::config::Cc1101Settings;
use crate::consts::{STATUS_TX_DRAINED, TX_FIFO_SIZE};
use crate::radio::{Strobe, Transceiver};

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Capacity of the byte-level write log in `no_std` builds; enough for
/// four full frames (4 x 1920 chip bytes).
pub const SIM_WRITE_LOG_LEN: usize = 8192;

/// Capacity of the chunk-size log in `no_std` builds.
pub const SIM_CHUNK_LOG_LEN: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChipState {
    Idle,
    Settling(u8),
    Tx,
}

/// Simulated CC1101-class transceiver.
///
/// Construct with [`SimTransceiver::new`] to pick the drain rate and
/// settling window, or use [`Default`] for eight bytes per poll and two
/// settling polls (roughly what the real core does with a 1 ms poll
/// quantum at 64 kbps).
#[derive(Debug)]
pub struct SimTransceiver {
    state: ChipState,
    fifo_level: usize,
    drain_per_poll: usize,
    settle_polls: u8,
    /// Every byte written to the FIFO, in write order.
    #[cfg(feature = "std")]
    pub written: Vec<u8>,
    /// Every byte written to the FIFO, in write order.
    #[cfg(not(feature = "std"))]
    pub written: Vec<u8, SIM_WRITE_LOG_LEN>,
    /// The size of each FIFO write, in call order.
    #[cfg(feature = "std")]
    pub write_sizes: Vec<usize>,
    /// The size of each FIFO write, in call order.
    #[cfg(not(feature = "std"))]
    pub write_sizes: Vec<usize, SIM_CHUNK_LOG_LEN>,
    /// The last configuration table uploaded, if any.
    pub last_settings: Option<Cc1101Settings>,
    /// The last PA calibration byte programmed, if any.
    pub last_power: Option<u8>,
    /// Number of core resets issued.
    pub resets: u8,
}

impl SimTransceiver {
    /// Creates a simulator draining `drain_per_poll` bytes per status
    /// poll while transmitting, and spending `settle_polls` polls in the
    /// oscillator-settling state after TX is enabled.
    pub fn new(drain_per_poll: usize, settle_polls: u8) -> Self {
        Self {
            state: ChipState::Idle,
            fifo_level: 0,
            drain_per_poll,
            settle_polls,
            written: Vec::new(),
            write_sizes: Vec::new(),
            last_settings: None,
            last_power: None,
            resets: 0,
        }
    }

    /// Bytes currently queued in the simulated FIFO.
    pub fn fifo_level(&self) -> usize {
        self.fifo_level
    }

    fn status(&self) -> u8 {
        let free = (TX_FIFO_SIZE - self.fifo_level).min(0x0F) as u8;
        match self.state {
            ChipState::Idle => free,
            ChipState::Settling(_) => 0xC0 | free,
            ChipState::Tx if self.fifo_level == 0 => STATUS_TX_DRAINED,
            ChipState::Tx => 0x20 | free,
        }
    }

    // One status-poll step: settle, then drain.
    fn step(&mut self) {
        match self.state {
            ChipState::Settling(n) if n <= 1 => self.state = ChipState::Tx,
            ChipState::Settling(n) => self.state = ChipState::Settling(n - 1),
            ChipState::Tx => {
                self.fifo_level = self.fifo_level.saturating_sub(self.drain_per_poll);
            }
            ChipState::Idle => {}
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        debug_assert!(
            self.fifo_level + bytes.len() <= TX_FIFO_SIZE,
            "TX FIFO overfilled"
        );
        self.fifo_level += bytes.len();
        let _ = self.written.extend_from_slice(bytes);
        let _ = self.write_sizes.push(bytes.len());
    }
}

impl Default for SimTransceiver {
    fn default() -> Self {
        Self::new(8, 2)
    }
}

impl Transceiver for SimTransceiver {
    fn strobe(&mut self, command: Strobe) -> u8 {
        match command {
            Strobe::Reset => {
                self.state = ChipState::Idle;
                self.fifo_level = 0;
                self.resets = self.resets.saturating_add(1);
            }
            Strobe::Idle => self.state = ChipState::Idle,
            Strobe::FlushTx => self.fifo_level = 0,
            Strobe::StartTx => {
                self.state = if self.settle_polls > 0 {
                    ChipState::Settling(self.settle_polls)
                } else {
                    ChipState::Tx
                };
            }
            Strobe::Nop => self.step(),
        }
        self.status()
    }

    fn write_tx_buffer(&mut self, bytes: &[u8]) {
        self.push_bytes(bytes);
    }

    fn write_tx_buffer_zeros(&mut self, length: usize) {
        debug_assert!(
            self.fifo_level + length <= TX_FIFO_SIZE,
            "TX FIFO overfilled"
        );
        self.fifo_level += length;
        for _ in 0..length {
            let _ = self.written.push(0);
        }
        let _ = self.write_sizes.push(length);
    }

    fn reset(&mut self) {
        let _ = self.strobe(Strobe::Reset);
        let _ = self.strobe(Strobe::Nop);
    }

    fn write_configuration(&mut self, settings: &Cc1101Settings) {
        self.last_settings = Some(*settings);
    }

    fn write_pa_table(&mut self, power: u8) {
        self.last_power = Some(power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CHIP_STATE_MASK, OSC_SETTLING_MASK};

    #[test]
    fn test_idle_status_reports_free_space() {
        let mut sim = SimTransceiver::default();
        let status = sim.strobe(Strobe::Nop);
        assert_eq!(status & CHIP_STATE_MASK, 0);
        assert_eq!(status & 0x0F, 0x0F); // empty FIFO caps at 15 free
    }

    #[test]
    fn test_settling_then_tx_then_drained() {
        let mut sim = SimTransceiver::new(16, 2);
        sim.write_tx_buffer(&[0xAA; 32]);
        let status = sim.strobe(Strobe::StartTx);
        assert_ne!(status & OSC_SETTLING_MASK, 0);

        // Two polls settle, two more drain 32 bytes.
        let status = sim.strobe(Strobe::Nop);
        assert_ne!(status & OSC_SETTLING_MASK, 0);
        let status = sim.strobe(Strobe::Nop);
        assert_eq!(status & OSC_SETTLING_MASK, 0);
        assert_ne!(status, STATUS_TX_DRAINED);
        let _ = sim.strobe(Strobe::Nop);
        let status = sim.strobe(Strobe::Nop);
        assert_eq!(status, STATUS_TX_DRAINED);
    }

    #[test]
    fn test_flush_empties_fifo() {
        let mut sim = SimTransceiver::default();
        sim.write_tx_buffer(&[1, 2, 3]);
        assert_eq!(sim.fifo_level(), 3);
        let _ = sim.strobe(Strobe::FlushTx);
        assert_eq!(sim.fifo_level(), 0);
    }

    #[test]
    fn test_write_log_preserves_order_and_sizes() {
        let mut sim = SimTransceiver::default();
        sim.write_tx_buffer(&[1, 2]);
        sim.write_tx_buffer_zeros(3);
        sim.write_tx_buffer(&[4]);
        assert_eq!(&sim.written[..], &[1, 2, 0, 0, 0, 4]);
        assert_eq!(&sim.write_sizes[..], &[2, 3, 1]);
    }
}
