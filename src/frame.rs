//! Frame layout and the lazy bit source feeding the chip modulator.
//!
//! One transmitted data byte becomes a fixed 30-bit frame:
//!
//! ```text
//! preamble (7) ++ parity (8, MSB first) ++ data (8, MSB first) ++ postamble (7)
//! ```
//!
//! The preamble (`1110010`) and postamble (`1011000`) are protocol
//! constants and are not configurable. [`FrameBits`] yields the frame's
//! bits lazily and in order; each yielded bit selects one full PRN
//! sequence downstream, so a frame always resolves to exactly 30
//! chip-bursts, never reordered and never partial.

use crate::consts::{FRAME_BITS, POSTAMBLE_BITS, PREAMBLE_BITS};

/// Fixed frame preamble bit pattern, transmitted first.
pub const PREAMBLE: [bool; PREAMBLE_BITS] = [true, true, true, false, false, true, false];

/// Fixed frame postamble bit pattern, transmitted last.
pub const POSTAMBLE: [bool; POSTAMBLE_BITS] = [true, false, true, true, false, false, false];

/// Lazy iterator over the 30 logical bits of one frame.
///
/// Created from a data byte and its parity byte (see [`crate::fec`]);
/// holds no other state and allocates nothing. The iterator is exact-size
/// and always yields [`FRAME_BITS`] items.
#[derive(Debug, Clone)]
pub struct FrameBits {
    data: u8,
    parity: u8,
    index: usize,
}

impl FrameBits {
    /// Creates the bit source for one frame from a data byte and its
    /// precomputed parity byte.
    pub fn new(data: u8, parity: u8) -> Self {
        Self {
            data,
            parity,
            index: 0,
        }
    }
}

impl Iterator for FrameBits {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let i = self.index;
        if i >= FRAME_BITS {
            return None;
        }
        self.index += 1;

        let bit = if i < PREAMBLE_BITS {
            PREAMBLE[i]
        } else if i < PREAMBLE_BITS + 8 {
            let shift = 7 - (i - PREAMBLE_BITS);
            (self.parity >> shift) & 1 != 0
        } else if i < PREAMBLE_BITS + 16 {
            let shift = 7 - (i - PREAMBLE_BITS - 8);
            (self.data >> shift) & 1 != 0
        } else {
            POSTAMBLE[i - PREAMBLE_BITS - 16]
        };
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = FRAME_BITS - self.index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FrameBits {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fec;

    #[test]
    fn test_frame_is_exactly_30_bits() {
        for byte in [0x00u8, 0x7F, 0x80, 0xFF] {
            let bits = FrameBits::new(byte, fec::encode(byte));
            assert_eq!(bits.len(), FRAME_BITS);
            assert_eq!(bits.count(), 30);
        }
    }

    #[test]
    fn test_zero_byte_selector_sequence() {
        // encode(0) == 0, so only the preamble and postamble contribute
        // set bits.
        let expected = [
            1, 1, 1, 0, 0, 1, 0, // preamble
            0, 0, 0, 0, 0, 0, 0, 0, // parity
            0, 0, 0, 0, 0, 0, 0, 0, // data
            1, 0, 1, 1, 0, 0, 0, // postamble
        ];
        let bits: Vec<bool> = FrameBits::new(0x00, fec::encode(0x00)).collect();
        assert_eq!(bits.len(), expected.len());
        for (got, want) in bits.iter().zip(expected.iter()) {
            assert_eq!(*got, *want != 0);
        }
    }

    #[test]
    fn test_fields_are_msb_first() {
        // data = 0x80 should raise only the first data bit; its parity
        // 0x9E fills the parity field MSB first.
        let bits: Vec<bool> = FrameBits::new(0x80, fec::encode(0x80)).collect();
        let parity_field = &bits[7..15];
        let data_field = &bits[15..23];
        let expected_parity = [true, false, false, true, true, true, true, false]; // 0x9E
        assert_eq!(parity_field, expected_parity);
        assert!(data_field[0]);
        assert!(data_field[1..].iter().all(|&b| !b));
    }

    #[test]
    fn test_size_hint_tracks_consumption() {
        let mut bits = FrameBits::new(0xA5, fec::encode(0xA5));
        assert_eq!(bits.size_hint(), (30, Some(30)));
        let _ = bits.next();
        let _ = bits.next();
        assert_eq!(bits.size_hint(), (28, Some(28)));
    }
}
