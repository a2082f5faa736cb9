//! # COBS Encoding Scheme
//!
//! Consistent Overhead Byte Stuffing removes every `0x00` from a payload so
//! that `0x00` can delimit frames on the wire.
//!
//! ```text
//!   raw:      11 22 00 33
//!                   ▲
//!                 zero
//!
//!   stuffed:  03 11 22 02 33
//!             ▲        ▲
//!    code ────┘        └──── code
//! ```
//!
//! The stuffed form is a sequence of blocks. Each block starts with a code
//! byte `N` (1..=255) followed by `N - 1` literal bytes.
//! A block with `N < 0xFF` stands for its literals plus one zero, except the
//! last block which carries no zero.
//! A block with `N == 0xFF` holds 254 literals and no zero.
//!
//! Thus the overhead is at most one byte per 254 bytes of payload, plus one.
//!
//! The encoding does not include the frame delimiter.
//! Callers append `0x00` after [`encode`] and strip it before [`decode`].
//!
//! # Full Block Boundary
//!
//! A run of exactly 254 non-zero bytes that ends the payload is emitted as a
//! single `0xFF` block with no empty block after it:
//!
//! ```text
//!   01 02 .. FE   ──►   FF 01 02 .. FE
//! ```
//!
//! # Streaming
//!
//! [`Encoder`] and [`Decoder`] wrap an [`std::io::Write`] and produce the same
//! bytes as the slice functions, whatever the chunking of the input.

#[macro_use]
extern crate log;

mod error;
mod stuff;
mod unstuff;

pub use error::{CobsError, InvalidArguments, Malformed};
pub use stuff::{encode, encode_to_vec, Encoder};
pub use unstuff::{decode, decode_to_vec, Decoder};

/// frame delimiter, never present in stuffed output
pub const DELIMITER: u8 = 0x00;
/// max literal bytes carried by one block
pub const MAX_RUN: usize = 254;
const MAX_CODE: u8 = MAX_RUN as u8 + 1;

/// Worst case stuffed length of a `len` byte payload.
///
/// An [`encode`] destination of this size never overflows.
pub const fn max_encoded_len(len: usize) -> usize {
    len + len.div_ceil(MAX_RUN) + 1
}

/// Worst case payload length of a `len` byte stuffed buffer.
pub const fn max_decoded_len(len: usize) -> usize {
    len.saturating_sub(1)
}

#[cfg(test)]
mod tests;

#[cfg(test)]
const TEST_VECTOR: [(&str, &str); 9] = [
    ("00", "0101"),
    ("0000", "010101"),
    ("11220033", "0311220233"),
    ("11223344", "0511223344"),
    ("11000000", "0211010101"),
    ("01", "0201"),
    ("0011", "010211"),
    ("1100", "021101"),
    ("00110000", "0102110101"),
];

#[cfg(test)]
fn setup() {
    use std::sync::Once;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

/// Payloads around the full block boundary with their stuffed form.
#[cfg(test)]
fn boundary_vectors() -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut vectors = vec![];

    // 01..=FE
    let raw: Vec<u8> = (0x01..=0xFE).collect();
    let mut enc = vec![0xFF];
    enc.extend(0x01..=0xFE);
    vectors.push((raw, enc));

    // 00 01..=FE
    let mut raw = vec![0x00];
    raw.extend(0x01..=0xFE);
    let mut enc = vec![0x01, 0xFF];
    enc.extend(0x01..=0xFE);
    vectors.push((raw, enc));

    // 01..=FF
    let raw: Vec<u8> = (0x01..=0xFF).collect();
    let mut enc = vec![0xFF];
    enc.extend(0x01..=0xFE);
    enc.extend([0x02, 0xFF]);
    vectors.push((raw, enc));

    // 02..=FF 00
    let mut raw: Vec<u8> = (0x02..=0xFF).collect();
    raw.push(0x00);
    let mut enc = vec![0xFF];
    enc.extend(0x02..=0xFF);
    enc.extend([0x01, 0x01]);
    vectors.push((raw, enc));

    // 03..=FF 00 01
    let mut raw: Vec<u8> = (0x03..=0xFF).collect();
    raw.extend([0x00, 0x01]);
    let mut enc = vec![0xFE];
    enc.extend(0x03..=0xFF);
    enc.extend([0x02, 0x01]);
    vectors.push((raw, enc));

    vectors
}
