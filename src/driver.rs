//! DSSS telemetry transmitter driver.
//!
//! This module provides the [`DsssDriver`] struct, which encodes single
//! telemetry bytes with a (16,8,5) block code, spreads each frame bit
//! into a 512-chip PRN sequence, and streams the resulting chip bytes
//! through the radio core's 64-byte TX FIFO under polled flow control.
//!
//! ## Transmission
//!
//! One data byte becomes a 30-bit frame (see [`crate::frame`]); each
//! frame bit selects one of the two PRN sequences, and the 30 selected
//! sequences (1920 bytes) are pushed through the FIFO as a single
//! uninterrupted stream:
//!
//! ```text
//! Idle -> Flushing -> InitialFill -> (StreamingRefill)* -> Draining -> Idle
//! ```
//!
//! `begin_raw_transmit` performs the flush and initial fill,
//! `continue_raw_transmit` appends to the live stream sized to the free
//! space the status byte reports, and `end_raw_transmit` waits for the
//! drained sentinel before idling the core. Frames are strictly
//! sequential; a new frame never begins before the previous one has
//! fully drained.
//!
//! ## Pacing
//!
//! Whole-buffer transmissions insert an inter-byte gap: a fixed 1000 ms
//! in demo builds (`demo-mode` feature), or randomized windows drawn
//! from the driver's PRN-seeded RNG in flight builds, which spreads
//! transmissions across the duty cycle and reduces collisions with
//! co-channel transmitters.
//!
//! ## Blocking model
//!
//! All device-readiness conditions are awaited by unbounded status
//! polling, faithfully to the radio core's documented behaviour: there
//! is no timeout and no error path, and a non-responsive device blocks
//! forever. The only suspension point is the injected
//! [`DelayNs`] between FIFO refill polls and between frames.
//!
//! ## Example
//!
//! ```rust
//! use dsss437::driver::DsssDriver;
//! use dsss437::prn::PrnPair;
//! use dsss437::sim::SimTransceiver;
//! use embedded_hal_mock::eh1::delay::NoopDelay;
//!
//! let mut driver = DsssDriver::new(SimTransceiver::default(), NoopDelay::new(), PrnPair::default());
//! driver.tx_init();
//! driver.transmit_byte(0x2A);
//! driver.sleep();
//! ```

use crate::config::Cc1101Settings;
use crate::consts::{
    CHIP_STATE_MASK, DEMO_BYTE_GAP_MS, FIFO_FREE_MASK, OSC_SETTLING_MASK, PACED_GAP_MAX_MS,
    PACED_GAP_MIN_MS, PACED_LEAD_MAX_MS, REFILL_QUANTUM_MS, STATUS_TX_DRAINED, TX_FIFO_SIZE,
};
use crate::fec;
use crate::frame::FrameBits;
use crate::power::{self, DEFAULT_POWER};
use crate::prn::PrnPair;
use crate::radio::{Strobe, Transceiver};

use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use nb::block;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// High-level state of the transmitter.
///
/// Tracks where the driver is in its session lifecycle; the fine-grained
/// FIFO states (flushing, filling, draining) are transient within a
/// single `begin`/`continue`/`end` cycle and are not observable here.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxMode {
    ///   Low-power mode; the radio core is idled and the watchdog tick
    ///   source may be disabled. Call [`DsssDriver::tx_init`] to resume.
    Sleep,
    ///   Configured and ready but not radiating. The default resting
    ///   state between frames.
    #[default]
    Idle,
    ///   A chip stream is in flight; the TX FIFO is being refilled under
    ///   flow control.
    Tx,
}

/// A DSSS telemetry transmitter for CC430/CC1101-class radio cores.
///
/// `DsssDriver` owns its entire configuration — register settings, PA
/// calibration byte, PRN sequence pair, and the pacing RNG — so multiple
/// independent instances can coexist (e.g. one per test). The radio and
/// the delay source are injected capabilities:
///
/// - `R`: a [`Transceiver`], either the register-level hardware driver
///   or [`SimTransceiver`](crate::sim::SimTransceiver) in tests
/// - `D`: an [`embedded_hal::delay::DelayNs`], e.g.
///   [`TickDelay`](crate::timer::TickDelay) on hardware
///
/// Call [`tx_init`](DsssDriver::tx_init) once before transmitting and
/// [`sleep`](DsssDriver::sleep) when done.
#[derive(Debug)]
pub struct DsssDriver<R, D>
where
    R: Transceiver,
    D: DelayNs,
{
    /// The current mode of the transmitter.
    pub mode: TxMode,
    /// The radio core. Public so tests can inspect a simulated core's
    /// write log.
    pub radio: R,
    delay: D,
    settings: Cc1101Settings,
    power: u8,
    prn: PrnPair,
    rng: SmallRng,
    /// Counter of frames streamed to completion.
    pub tx_good: u16,
}

impl<R, D> DsssDriver<R, D>
where
    R: Transceiver,
    D: DelayNs,
{
    /// Creates a driver with the stock register settings.
    ///
    /// The pacing RNG is seeded from the leading bytes of the PRN pair,
    /// so distinct sequence pairs desynchronize their transmission
    /// schedules from each other.
    pub fn new(radio: R, delay: D, prn: PrnPair) -> Self {
        Self::with_settings(radio, delay, prn, Cc1101Settings::DEFAULT)
    }

    /// Creates a driver with custom register settings.
    pub fn with_settings(radio: R, delay: D, prn: PrnPair, settings: Cc1101Settings) -> Self {
        Self {
            mode: TxMode::Sleep,
            radio,
            delay,
            settings,
            power: DEFAULT_POWER,
            prn,
            rng: SmallRng::seed_from_u64(prn.seed()),
            tx_good: 0,
        }
    }

    /// Selects the transmit power level. Default is 10 dBm.
    ///
    /// Out-of-range requests clamp to the nearest calibrated entry. The
    /// new level takes effect at the next [`tx_init`](DsssDriver::tx_init).
    pub fn set_power(&mut self, dbm: i8) {
        self.power = power::lookup(dbm);
    }

    /// The PA calibration byte currently selected.
    pub fn power(&self) -> u8 {
        self.power
    }

    /// Initializes the radio core — must be called before transmitting.
    ///
    /// Resets the core, uploads the configuration registers and the PA
    /// table, then waits for the core to report idle.
    pub fn tx_init(&mut self) {
        #[cfg(feature = "log")]
        log::debug!("radio: reset + configure");

        self.radio.reset();
        self.radio.write_configuration(&self.settings);
        self.radio.write_pa_table(self.power);

        let mut status = self.radio.strobe(Strobe::Idle);
        while status & CHIP_STATE_MASK != 0 {
            status = self.radio.strobe(Strobe::Nop);
        }
        self.mode = TxMode::Idle;

        #[cfg(feature = "log")]
        log::debug!("radio: ready");
    }

    /// Puts the radio core in low power mode — call after transmitting.
    pub fn sleep(&mut self) {
        #[cfg(feature = "log")]
        log::debug!("radio: sleep");

        let _ = self.radio.strobe(Strobe::Idle);
        self.mode = TxMode::Sleep;
    }

    /// Encodes and transmits each byte of `bytes` as an independent
    /// frame, with an inter-byte pacing delay.
    ///
    /// The pacing policy is selected at build time: the `demo-mode`
    /// feature picks [`transmit_fixed`](DsssDriver::transmit_fixed),
    /// flight builds use [`transmit_paced`](DsssDriver::transmit_paced).
    pub fn transmit(&mut self, bytes: &[u8]) {
        #[cfg(feature = "demo-mode")]
        self.transmit_fixed(bytes);
        #[cfg(not(feature = "demo-mode"))]
        self.transmit_paced(bytes);
    }

    /// Transmits with a fixed 1000 ms gap after every byte, including
    /// the last. Deterministic; intended for bench testing.
    pub fn transmit_fixed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.transmit_byte(byte);
            self.delay.delay_ms(DEMO_BYTE_GAP_MS);
        }
    }

    /// Transmits with randomized pacing: a lead-in delay drawn uniformly
    /// from `[0, 2000)` ms before the first byte, then a gap drawn
    /// uniformly from `[8000, 12000)` ms after every byte.
    ///
    /// The jitter reduces the collision probability with co-channel
    /// transmitters and keeps the transmitter inside its duty-cycle and
    /// power budget.
    pub fn transmit_paced(&mut self, bytes: &[u8]) {
        let lead = self.rng.random_range(0..PACED_LEAD_MAX_MS);
        self.delay.delay_ms(lead);

        for &byte in bytes {
            self.transmit_byte(byte);
            let gap = self.rng.random_range(PACED_GAP_MIN_MS..PACED_GAP_MAX_MS);
            self.delay.delay_ms(gap);
        }
    }

    /// Encodes one byte with FEC and streams its 30 chip-bursts as a
    /// single uninterrupted transmission. No pacing delay is inserted;
    /// spacing is the caller's concern.
    pub fn transmit_byte(&mut self, byte: u8) {
        #[cfg(feature = "log")]
        log::debug!("radio: tx byte {byte:#04x}");

        let parity = fec::encode(byte);
        let prn = self.prn;
        let mut bits = FrameBits::new(byte, parity);

        // The first chip-burst primes the freshly flushed FIFO; the
        // remaining 29 append to the live stream without returning to
        // idle in between.
        if let Some(first) = bits.next() {
            self.begin_raw_transmit(prn.sequence_for(first));
        }
        for bit in bits {
            self.continue_raw_transmit(prn.sequence_for(bit));
        }
        self.end_raw_transmit();

        self.tx_good = self.tx_good.wrapping_add(1);
    }

    /// Streams `bytes` verbatim as one transmission, bypassing FEC and
    /// PRN spreading. For diagnostics and pre-encoded payloads.
    pub fn raw_transmit(&mut self, bytes: &[u8]) {
        self.begin_raw_transmit(bytes);
        self.end_raw_transmit();
    }

    /// Starts a transmission: waits for the core to go idle, flushes the
    /// TX FIFO, writes the payload (in one shot if it fits, otherwise an
    /// initial 64-byte fill followed by flow-controlled refills), and
    /// enables the transmitter.
    pub fn begin_raw_transmit(&mut self, bytes: &[u8]) {
        #[cfg(feature = "log")]
        log::trace!("radio: begin tx, {} bytes", bytes.len());

        self.mode = TxMode::Tx;

        // Wait for the radio to be in the idle state.
        let mut status = self.radio.strobe(Strobe::Idle);
        while status & CHIP_STATE_MASK != 0 {
            status = self.radio.strobe(Strobe::Nop);
        }

        let _ = self.radio.strobe(Strobe::FlushTx);

        if bytes.len() <= TX_FIFO_SIZE {
            self.radio.write_tx_buffer(bytes);
            let _ = self.radio.strobe(Strobe::StartTx);
        } else {
            self.radio.write_tx_buffer(&bytes[..TX_FIFO_SIZE]);
            let mut status = self.radio.strobe(Strobe::StartTx);

            // Wait for the oscillator to stabilize before trusting the
            // free-space reports.
            while status & OSC_SETTLING_MASK != 0 {
                status = self.radio.strobe(Strobe::Nop);
            }

            self.refill(Some(&bytes[TX_FIFO_SIZE..]), bytes.len() - TX_FIFO_SIZE);
        }
    }

    /// Appends `bytes` to a transmission already in flight, sized to the
    /// free space the core reports each poll.
    pub fn continue_raw_transmit(&mut self, bytes: &[u8]) {
        self.refill(Some(bytes), bytes.len());
    }

    /// Appends `length` zero bytes to a transmission already in flight.
    /// Inserts silence without needing a source buffer.
    pub fn continue_raw_silence(&mut self, length: usize) {
        self.refill(None, length);
    }

    /// Waits for the chip stream to drain completely, then idles the
    /// core. On return no transmission is in flight.
    pub fn end_raw_transmit(&mut self) {
        #[cfg(feature = "log")]
        log::trace!("radio: wait for tx to finish");

        let _ = block!(self.poll_tx_drained());
        let _ = self.radio.strobe(Strobe::Idle);
        self.mode = TxMode::Idle;
    }

    fn poll_tx_drained(&mut self) -> nb::Result<(), Infallible> {
        if self.radio.strobe(Strobe::Nop) == STATUS_TX_DRAINED {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    // Flow-controlled refill loop: one delay quantum per poll, then
    // write min(free, remaining) bytes. `None` streams zeros.
    fn refill(&mut self, bytes: Option<&[u8]>, length: usize) {
        let mut bytes_to_go = length;
        let mut counter = 0usize;

        while bytes_to_go > 0 {
            // Wait for some bytes to be transmitted.
            self.delay.delay_ms(REFILL_QUANTUM_MS);

            let bytes_free = (self.radio.strobe(Strobe::Nop) & FIFO_FREE_MASK) as usize;
            let bytes_to_write = bytes_free.min(bytes_to_go);
            if bytes_to_write == 0 {
                continue; // nothing drained yet
            }

            match bytes {
                Some(src) => self
                    .radio
                    .write_tx_buffer(&src[counter..counter + bytes_to_write]),
                None => self.radio.write_tx_buffer_zeros(bytes_to_write),
            }
            bytes_to_go -= bytes_to_write;
            counter += bytes_to_write;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FRAME_CHIP_BYTES, PRN_LENGTH_BYTES};
    use crate::prn::{PRN_B, PRN_C};
    use crate::sim::SimTransceiver;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::vec::Vec;

    /// Records each `delay_ms` call instead of sleeping.
    #[derive(Debug, Default)]
    struct RecordingDelay {
        ms: std::rc::Rc<core::cell::RefCell<Vec<u32>>>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.ms.borrow_mut().push(ms);
        }
    }

    fn sim_driver() -> DsssDriver<SimTransceiver, NoopDelay> {
        DsssDriver::new(SimTransceiver::default(), NoopDelay::new(), PrnPair::default())
    }

    #[test]
    fn test_tx_init_configures_core() {
        let mut driver = sim_driver();
        assert_eq!(driver.mode, TxMode::Sleep);
        driver.tx_init();
        assert_eq!(driver.mode, TxMode::Idle);
        assert_eq!(driver.radio.resets, 1);
        assert_eq!(driver.radio.last_settings, Some(Cc1101Settings::DEFAULT));
        assert_eq!(driver.radio.last_power, Some(DEFAULT_POWER));
    }

    #[test]
    fn test_set_power_applies_at_init() {
        let mut driver = sim_driver();
        driver.set_power(10);
        assert_eq!(driver.power(), 0xC0);
        driver.set_power(42); // clamps to the 10 dBm entry
        assert_eq!(driver.power(), 0xC0);
        driver.tx_init();
        assert_eq!(driver.radio.last_power, Some(0xC0));
    }

    #[test]
    fn test_short_payload_is_one_write() {
        let mut driver = sim_driver();
        driver.tx_init();
        let payload = [0x55u8; 10];
        driver.raw_transmit(&payload);
        assert_eq!(&driver.radio.write_sizes[..], &[10]);
        assert_eq!(&driver.radio.written[..], &payload[..]);
        assert_eq!(driver.mode, TxMode::Idle);
    }

    #[test]
    fn test_long_payload_chunks_to_free_space() {
        let mut driver = sim_driver();
        driver.tx_init();
        let payload: Vec<u8> = (0..=99u8).collect();
        driver.raw_transmit(&payload);

        let sizes = &driver.radio.write_sizes;
        assert_eq!(sizes[0], 64);
        for &size in &sizes[1..] {
            assert!(size <= 15); // never exceeds a free-space report
        }
        assert_eq!(sizes.iter().sum::<usize>(), 100);
        assert_eq!(&driver.radio.written[..], &payload[..]);
    }

    #[test]
    fn test_transmit_byte_streams_thirty_bursts() {
        let mut driver = sim_driver();
        driver.tx_init();
        driver.transmit_byte(0x00);

        let written = &driver.radio.written;
        assert_eq!(written.len(), FRAME_CHIP_BYTES); // 30 * 64

        // encode(0) == 0: only preamble and postamble select the "one"
        // sequence.
        let expected = [
            1, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0,
            0,
        ];
        for (i, &sel) in expected.iter().enumerate() {
            let chunk = &written[i * PRN_LENGTH_BYTES..(i + 1) * PRN_LENGTH_BYTES];
            let want: &[u8] = if sel != 0 { &PRN_C } else { &PRN_B };
            assert_eq!(chunk, want, "burst {i}");
        }
        assert_eq!(driver.tx_good, 1);
        assert_eq!(driver.mode, TxMode::Idle);
    }

    #[test]
    fn test_frames_never_interleave() {
        let mut driver = sim_driver();
        driver.tx_init();
        driver.transmit_byte(0xA5);
        assert_eq!(driver.radio.written.len(), FRAME_CHIP_BYTES);
        driver.transmit_byte(0x5A);
        assert_eq!(driver.radio.written.len(), 2 * FRAME_CHIP_BYTES);
        assert_eq!(driver.tx_good, 2);
    }

    #[test]
    fn test_silence_streams_zeros() {
        let mut driver = sim_driver();
        driver.tx_init();
        driver.begin_raw_transmit(&PRN_B);
        driver.continue_raw_silence(32);
        driver.end_raw_transmit();

        let written = &driver.radio.written;
        assert_eq!(written.len(), PRN_LENGTH_BYTES + 32);
        assert!(written[PRN_LENGTH_BYTES..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fixed_pacing_delays_once_per_byte() {
        let delay = RecordingDelay::default();
        let log = delay.ms.clone();
        let mut driver =
            DsssDriver::new(SimTransceiver::default(), delay, PrnPair::default());
        driver.tx_init();
        driver.transmit_fixed(&[0x01, 0x02, 0x03]);

        let recorded = log.borrow();
        let gaps: Vec<u32> = recorded.iter().copied().filter(|&ms| ms >= 1000).collect();
        assert_eq!(gaps, [1000, 1000, 1000]);
        assert_eq!(*recorded.last().unwrap(), 1000); // gap follows the last byte too
    }

    #[test]
    fn test_random_pacing_windows() {
        let delay = RecordingDelay::default();
        let log = delay.ms.clone();
        let mut driver =
            DsssDriver::new(SimTransceiver::default(), delay, PrnPair::default());
        driver.tx_init();
        driver.transmit_paced(&[0x11, 0x22]);

        let recorded = log.borrow();
        // The lead-in is the very first delay issued.
        assert!(recorded[0] < 2000);
        let gap_count = recorded
            .iter()
            .filter(|&&ms| (8000..12000).contains(&ms))
            .count();
        assert_eq!(gap_count, 2); // one gap per transmitted byte
        // Nothing between the lead-in bound and the gap window.
        assert!(
            recorded
                .iter()
                .all(|&ms| ms < 2000 || (8000..12000).contains(&ms))
        );
    }

    #[cfg(feature = "demo-mode")]
    #[test]
    fn test_transmit_dispatches_to_fixed_in_demo_builds() {
        let delay = RecordingDelay::default();
        let log = delay.ms.clone();
        let mut driver =
            DsssDriver::new(SimTransceiver::default(), delay, PrnPair::default());
        driver.tx_init();
        driver.transmit(&[0xAB]);

        let recorded = log.borrow();
        assert_eq!(recorded.iter().filter(|&&ms| ms == 1000).count(), 1);
        assert!(recorded.iter().all(|&ms| ms == 1000 || ms == 1));
    }
}
