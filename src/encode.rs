//! Base32 encoding.
//!
//! Bytes are packed into 5-bit symbols in one of two orders:
//! - Normal - MSB-first, new bytes enter at the low end of the accumulator
//!   and symbols are taken from the high end
//! - Inverse - Rspamd's reversed octets order, new bytes are shifted above
//!   the carried bits and symbols are taken from the low end
//!
//! Five input bytes (40 bits) always yield eight symbols. A trailing partial
//! group is flushed as one extra zero-padded symbol.

#![allow(clippy::cast_possible_truncation)]

use crate::alphabet::{Alphabet, EncodeOrder, ZBASE32};

/// Output buffer size needed to encode `len` bytes.
///
/// Computed as `⌊len/5⌋·8 + (len mod 5)·2 + 1`. This is an upper bound that
/// always reserves a trailing slot, even when `len` is a multiple of 5. Use
/// the count returned by [`encode_into`] for the real length.
#[inline]
pub const fn encoded_len(len: usize) -> usize {
    (len / 5) * 8 + (len % 5) * 2 + 1
}

/// Symbol writer over a caller-supplied buffer.
struct SymbolWriter<'a> {
    alphabet: &'a Alphabet,
    output: &'a mut [u8],
    written: usize,
}

impl SymbolWriter<'_> {
    /// Emit the symbol for the low 5 bits of `bits`.
    #[inline]
    fn push(&mut self, bits: u32) {
        self.output[self.written] = self.alphabet.symbol(bits as u8);
        self.written += 1;
    }
}

/// Encode `input` into `output`.
///
/// # Arguments
/// * `input` - Bytes to encode
/// * `output` - Destination, at least [`encoded_len`]`(input.len())` bytes
/// * `alphabet` - Alphabet and bit order to encode with
///
/// # Returns
/// Number of symbols written to the front of `output`.
///
/// # Panics
/// If `output` is shorter than [`encoded_len`]`(input.len())`.
pub fn encode_into(input: &[u8], output: &mut [u8], alphabet: &Alphabet) -> usize {
    let needed = encoded_len(input.len());
    assert!(
        output.len() >= needed,
        "base32 output buffer too small: {} bytes, need {needed}",
        output.len()
    );

    let mut writer = SymbolWriter {
        alphabet,
        output,
        written: 0,
    };

    match alphabet.order() {
        EncodeOrder::Normal => encode_normal(input, &mut writer),
        EncodeOrder::Inverse => encode_inverse(input, &mut writer),
    }

    writer.written
}

/// MSB-first packing.
fn encode_normal(input: &[u8], writer: &mut SymbolWriter<'_>) {
    let mut acc = 0u32;
    let mut bits = 0u32;

    for &byte in input {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            writer.push(acc >> bits);
        }
        acc &= (1 << bits) - 1;
    }

    if bits > 0 {
        // Zero-pad the leftover bits up to a full symbol
        writer.push(acc << (5 - bits));
    }
}

/// Rspamd-compatible packing with reversed octets order.
fn encode_inverse(input: &[u8], writer: &mut SymbolWriter<'_>) {
    // Bits consumed but not yet emitted. `None` right after a 5-byte group
    // is complete, which is distinct from `Some(0)`.
    let mut carry: Option<u32> = None;

    for (i, &byte) in input.iter().enumerate() {
        let byte = u32::from(byte);
        let pending = carry.unwrap_or(0);

        carry = match i % 5 {
            0 => {
                // 8 bits of input, 3 carried
                writer.push(byte);
                Some(byte >> 5)
            }
            1 => {
                // 3 + 8 bits, 1 carried
                let x = pending | (byte << 3);
                writer.push(x);
                writer.push(x >> 5);
                Some(x >> 10)
            }
            2 => {
                // 1 + 8 bits, 4 carried
                let x = pending | (byte << 1);
                writer.push(x);
                Some(x >> 5)
            }
            3 => {
                // 4 + 8 bits, 2 carried
                let x = pending | (byte << 4);
                writer.push(x);
                writer.push(x >> 5);
                Some((x >> 10) & 0x3)
            }
            _ => {
                // 2 + 8 bits, nothing carried
                let x = pending | (byte << 2);
                writer.push(x);
                writer.push(x >> 5);
                None
            }
        };
    }

    if let Some(bits) = carry {
        writer.push(bits);
    }
}

/// Encode `input` into a newly allocated symbol buffer.
pub fn encode_to_vec(input: &[u8], alphabet: &Alphabet) -> Vec<u8> {
    let mut output = vec![0u8; encoded_len(input.len())];
    let written = encode_into(input, &mut output, alphabet);
    output.truncate(written);
    output
}

/// Encode `input` to a string.
///
/// Alphabets only hold printable ASCII, so the result is always valid UTF-8.
pub fn encode(input: impl AsRef<[u8]>, alphabet: &Alphabet) -> String {
    encode_to_vec(input.as_ref(), alphabet)
        .into_iter()
        .map(char::from)
        .collect()
}

/// Encode `input` with the Rspamd-compatible [`ZBASE32`] alphabet.
pub fn encode_zbase32(input: impl AsRef<[u8]>) -> String {
    encode(input, &ZBASE32)
}
