//! PRN spreading sequences and the per-transmitter sequence pair.
//!
//! Direct-sequence spreading encodes each logical frame bit as one of two
//! fixed 512-chip pseudorandom sequences: the "one" sequence for a set
//! bit and the "zero" sequence for a clear bit. The sequences below are
//! truncated 511-bit Gold codes padded to 64 bytes, chosen for low
//! cross-correlation so a receiver can despread each bit by correlating
//! against both candidates.
//!
//! Three flight-proven tables ship with the crate; [`PrnPair`] binds the
//! two a transmitter actually uses. The pair is selected once at driver
//! construction and never reassigned mid-transmission.

use crate::consts::PRN_LENGTH_BYTES;

/// First stock Gold-code table.
pub static PRN_A: [u8; PRN_LENGTH_BYTES] = [
    0b00000000, 0b01110110, 0b10101101, 0b01010110, 0b00010111, 0b01111010, 0b00111000, 0b10001011,
    0b10010011, 0b10110001, 0b00110001, 0b00100110, 0b00101010, 0b11110111, 0b01010011, 0b01101011,
    0b01011110, 0b11111111, 0b00000110, 0b01000111, 0b01000010, 0b01010010, 0b11101011, 0b11000100,
    0b00001101, 0b00100110, 0b01010011, 0b01001001, 0b11101110, 0b00001110, 0b11101101, 0b11110010,
    0b00000111, 0b10010010, 0b01110100, 0b00010010, 0b10111101, 0b00011000, 0b10001010, 0b00101011,
    0b10101011, 0b10001100, 0b10111110, 0b00001110, 0b00000111, 0b11011101, 0b11101000, 0b00011110,
    0b10011000, 0b01010101, 0b10111000, 0b01101000, 0b01001111, 0b11011111, 0b00111001, 0b01100011,
    0b11001011, 0b10111010, 0b01011111, 0b00100100, 0b11011010, 0b10000000, 0b01010000, 0b10111110,
];

/// Second stock Gold-code table; the default "zero" sequence.
pub static PRN_B: [u8; PRN_LENGTH_BYTES] = [
    0b00000001, 0b01011110, 0b11010100, 0b01100001, 0b00001011, 0b11110011, 0b00110001, 0b01011100,
    0b01100110, 0b10010010, 0b01011011, 0b00101010, 0b11100000, 0b10100011, 0b00000000, 0b11100001,
    0b10111011, 0b10011111, 0b00110001, 0b11001111, 0b11110111, 0b11000000, 0b10110010, 0b01110101,
    0b10101010, 0b10100111, 0b10100101, 0b00010010, 0b00001111, 0b01011011, 0b00000010, 0b00111101,
    0b01001110, 0b01100000, 0b10001110, 0b00010111, 0b00110100, 0b10000101, 0b01100001, 0b01000101,
    0b00000110, 0b10100010, 0b00110110, 0b00101111, 0b10101001, 0b00011111, 0b11010111, 0b11111101,
    0b10011101, 0b01001000, 0b00011001, 0b00011000, 0b10101111, 0b00110110, 0b10010011, 0b00000000,
    0b00010000, 0b10000101, 0b00101000, 0b00011101, 0b01011100, 0b10101111, 0b01100100, 0b11011010,
];

/// Third stock Gold-code table; the default "one" sequence.
pub static PRN_C: [u8; PRN_LENGTH_BYTES] = [
    0b11111101, 0b00111110, 0b01110111, 0b11010101, 0b00100101, 0b11101111, 0b00101100, 0b01101001,
    0b00101010, 0b11101001, 0b00111100, 0b11000100, 0b00000111, 0b10010011, 0b11000101, 0b00000111,
    0b00110111, 0b00011111, 0b01111011, 0b11010001, 0b10111010, 0b00000111, 0b10010000, 0b00110111,
    0b11011111, 0b01011010, 0b11101101, 0b11001000, 0b10001100, 0b01101001, 0b10010111, 0b00101001,
    0b10101100, 0b11011001, 0b11010110, 0b00011010, 0b11010110, 0b10101000, 0b00000101, 0b11010011,
    0b01101010, 0b11001011, 0b11010110, 0b01010010, 0b00111111, 0b11100111, 0b10000010, 0b10000110,
    0b01101110, 0b10011010, 0b01100101, 0b10100110, 0b00101110, 0b01010100, 0b11110100, 0b01111010,
    0b11001011, 0b00101110, 0b01100011, 0b10111111, 0b01010100, 0b11000100, 0b11010100, 0b01010100,
];

/// The pair of PRN sequences a transmitter spreads its bits with.
///
/// Holds static references only; copying the pair is free and the tables
/// themselves are immutable for the program's lifetime.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PrnPair {
    zero: &'static [u8; PRN_LENGTH_BYTES],
    one: &'static [u8; PRN_LENGTH_BYTES],
}

impl PrnPair {
    /// Binds a custom pair of spreading sequences.
    pub const fn new(
        zero: &'static [u8; PRN_LENGTH_BYTES],
        one: &'static [u8; PRN_LENGTH_BYTES],
    ) -> Self {
        Self { zero, one }
    }

    /// Returns the sequence that spreads the given logical bit.
    pub fn sequence_for(&self, bit: bool) -> &'static [u8; PRN_LENGTH_BYTES] {
        if bit { self.one } else { self.zero }
    }

    /// Derives the pacing-RNG seed from the leading bytes of both tables.
    pub fn seed(&self) -> u64 {
        u64::from(self.zero[0])
            + u64::from(self.one[0])
            + u64::from(self.zero[1])
            + u64::from(self.one[1])
    }
}

impl Default for PrnPair {
    /// The stock pair: [`PRN_B`] spreads zeros, [`PRN_C`] spreads ones.
    fn default() -> Self {
        Self::new(&PRN_B, &PRN_C)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let pair = PrnPair::default();
        assert_eq!(pair.sequence_for(false), &PRN_B);
        assert_eq!(pair.sequence_for(true), &PRN_C);
    }

    #[test]
    fn test_seed_sums_leading_bytes() {
        let pair = PrnPair::default();
        let expected = u64::from(PRN_B[0])
            + u64::from(PRN_C[0])
            + u64::from(PRN_B[1])
            + u64::from(PRN_C[1]);
        assert_eq!(pair.seed(), expected);
        assert_ne!(pair.seed(), 0);
    }

    #[test]
    fn test_tables_are_distinct() {
        assert_ne!(PRN_A, PRN_B);
        assert_ne!(PRN_B, PRN_C);
        assert_ne!(PRN_A, PRN_C);
    }
}
