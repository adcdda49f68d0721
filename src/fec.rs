//! (16,8,5) systematic block-code parity encoder.
//!
//! Each transmitted data byte is protected by eight parity bits computed
//! over GF(2), forming a systematic (16,8,5) linear block code with a
//! minimum Hamming distance of 5. The receiver can therefore correct up
//! to two bit errors per codeword after despreading.
//!
//! The code is defined by the generator matrix (identity half omitted on
//! the right):
//!
//! ```text
//! G = | 1 0 0 1 1 1 1 0 . 1 0 0 0 0 0 0 0 |
//!     | 0 1 0 0 1 1 1 0 . 0 1 0 0 0 0 0 0 |
//!     | 1 1 0 0 1 1 0 1 . 0 0 1 0 0 0 0 0 |
//!     | 0 1 1 0 0 1 1 1 . 0 0 0 1 0 0 0 0 |
//!     | 0 0 1 1 0 0 1 1 . 0 0 0 0 1 0 0 0 |
//!     | 1 1 1 1 0 0 1 0 . 0 0 0 0 0 1 0 0 |
//!     | 0 1 1 1 1 0 0 0 . 0 0 0 0 0 0 1 0 |
//!     | 1 1 0 1 0 1 1 1 . 0 0 0 0 0 0 0 1 |
//! ```
//!
//! Each parity bit is the XOR of a fixed subset of the data bits; the
//! encoder is pure and total, with no failure modes.

/// Computes the parity byte for `data` under the (16,8,5) block code.
///
/// Bit 7 is the most significant bit of both input and output. The same
/// input always yields the same output.
pub fn encode(data: u8) -> u8 {
    let d = |i: u8| (data >> i) & 1;

    let mut p = 0u8;
    p |= (d(7) ^ d(5) ^ d(2) ^ d(0)) << 7;
    p |= (d(6) ^ d(5) ^ d(4) ^ d(2) ^ d(1) ^ d(0)) << 6;
    p |= (d(4) ^ d(3) ^ d(2) ^ d(1)) << 5;
    p |= (d(7) ^ d(3) ^ d(2) ^ d(1) ^ d(0)) << 4;
    p |= (d(7) ^ d(6) ^ d(5) ^ d(1)) << 3;
    p |= (d(7) ^ d(6) ^ d(5) ^ d(4) ^ d(0)) << 2;
    p |= (d(7) ^ d(6) ^ d(4) ^ d(3) ^ d(2) ^ d(0)) << 1;
    p |= d(5) ^ d(4) ^ d(3) ^ d(0);
    p
}
