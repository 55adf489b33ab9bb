//! Base32 decoding.
//!
//! Inverse of the two packing orders in [`crate::encode`]:
//! - Normal - symbols are shifted in at the low end and a byte is emitted
//!   from the high end as soon as 8 bits are pending
//! - Inverse - symbols are placed above the pending bits and bytes are
//!   emitted from the low end; leftover bits after the last symbol always
//!   produce one final byte
//!
//! By default decoding matches Rspamd and silently drops trailing bits that
//! do not form a byte. [`Strictness::Strict`] rejects them instead.

#![allow(clippy::cast_possible_truncation)]

use log::trace;

use crate::alphabet::{Alphabet, EncodeOrder, ZBASE32};
use crate::error::DecodeError;

/// Upper bound on the number of bytes decoded from `len` symbols.
///
/// Computed as `⌊len/8⌋·5 + (len mod 8)`. The count returned by
/// [`decode_into`] is the real length.
#[inline]
pub const fn decoded_len(len: usize) -> usize {
    (len / 8) * 5 + len % 8
}

/// How decoding treats bits left over after the last full byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    /// Drop leftover bits without checking them, like Rspamd does.
    #[default]
    Lenient,
    /// Only accept input the encoder could have produced.
    Strict,
}

/// Byte writer over a caller-supplied buffer.
struct ByteWriter<'a> {
    output: &'a mut [u8],
    written: usize,
}

impl ByteWriter<'_> {
    #[inline]
    fn push(&mut self, byte: u8) {
        self.output[self.written] = byte;
        self.written += 1;
    }
}

/// Resolve one symbol to its 5-bit value.
#[inline]
fn lookup(alphabet: &Alphabet, offset: usize, byte: u8) -> Result<u32, DecodeError> {
    match alphabet.value(byte) {
        Some(value) => Ok(u32::from(value)),
        None => {
            trace!("invalid base32 symbol {byte:#04x} at offset {offset}");
            Err(DecodeError::InvalidSymbol { offset, byte })
        }
    }
}

/// Decode `input` into `output`, dropping trailing bits like Rspamd.
///
/// # Arguments
/// * `input` - Encoded symbols
/// * `output` - Destination, at least [`decoded_len`]`(input.len())` bytes
/// * `alphabet` - Alphabet and bit order the input was encoded with
///
/// # Returns
/// Number of bytes written to the front of `output`, or the first invalid
/// symbol. On error the contents of `output` are unspecified.
///
/// # Panics
/// If `output` is shorter than [`decoded_len`]`(input.len())`.
pub fn decode_into(
    input: &[u8],
    output: &mut [u8],
    alphabet: &Alphabet,
) -> Result<usize, DecodeError> {
    decode_into_with(input, output, alphabet, Strictness::Lenient)
}

/// Decode `input` into `output` with explicit trailing-bit handling.
///
/// See [`decode_into`] for arguments and panics.
pub fn decode_into_with(
    input: &[u8],
    output: &mut [u8],
    alphabet: &Alphabet,
    strictness: Strictness,
) -> Result<usize, DecodeError> {
    let needed = decoded_len(input.len());
    assert!(
        output.len() >= needed,
        "base32 output buffer too small: {} bytes, need {needed}",
        output.len()
    );

    let mut writer = ByteWriter { output, written: 0 };

    match alphabet.order() {
        EncodeOrder::Normal => decode_normal(input, &mut writer, alphabet, strictness)?,
        EncodeOrder::Inverse => decode_inverse(input, &mut writer, alphabet, strictness)?,
    }

    Ok(writer.written)
}

/// MSB-first unpacking.
fn decode_normal(
    input: &[u8],
    writer: &mut ByteWriter<'_>,
    alphabet: &Alphabet,
    strictness: Strictness,
) -> Result<(), DecodeError> {
    let mut acc = 0u32;
    let mut bits = 0u32;

    for (offset, &byte) in input.iter().enumerate() {
        acc = (acc << 5) | lookup(alphabet, offset, byte)?;
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            writer.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    if strictness == Strictness::Strict && !input.is_empty() {
        let offset = input.len() - 1;
        // A whole leftover symbol never comes out of the encoder
        if bits >= 5 {
            return Err(DecodeError::TrailingSymbol { offset });
        }
        if acc != 0 {
            return Err(DecodeError::TrailingBits { offset });
        }
    }

    Ok(())
}

/// Rspamd-compatible unpacking with reversed octets order.
fn decode_inverse(
    input: &[u8],
    writer: &mut ByteWriter<'_>,
    alphabet: &Alphabet,
    strictness: Strictness,
) -> Result<(), DecodeError> {
    let mut acc = 0u32;
    let mut bits = 0u32;

    for (offset, &byte) in input.iter().enumerate() {
        if bits >= 8 {
            bits -= 8;
            writer.push(acc as u8);
            acc >>= 8;
        }

        acc |= lookup(alphabet, offset, byte)? << bits;
        bits += 5;
    }

    if bits > 0 {
        if strictness == Strictness::Strict {
            let offset = input.len() - 1;
            if bits < 8 {
                return Err(DecodeError::TrailingSymbol { offset });
            }
            if acc >> 8 != 0 {
                return Err(DecodeError::TrailingBits { offset });
            }
        }

        // Anything above the low 8 bits is dropped
        writer.push(acc as u8);
    }

    Ok(())
}

/// Decode `input` into a newly allocated buffer.
///
/// Nothing is returned on failure, not even the bytes decoded before the
/// invalid symbol.
pub fn decode(input: impl AsRef<[u8]>, alphabet: &Alphabet) -> Result<Vec<u8>, DecodeError> {
    decode_with(input, alphabet, Strictness::Lenient)
}

/// Decode `input` into a newly allocated buffer with explicit trailing-bit
/// handling.
pub fn decode_with(
    input: impl AsRef<[u8]>,
    alphabet: &Alphabet,
    strictness: Strictness,
) -> Result<Vec<u8>, DecodeError> {
    let input = input.as_ref();
    let mut output = vec![0u8; decoded_len(input.len())];
    let written = decode_into_with(input, &mut output, alphabet, strictness)?;
    output.truncate(written);
    Ok(output)
}

/// Decode `input` with the Rspamd-compatible [`ZBASE32`] alphabet.
pub fn decode_zbase32(input: impl AsRef<[u8]>) -> Result<Vec<u8>, DecodeError> {
    decode(input, &ZBASE32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{BECH32, RFC4648};

    #[test]
    fn test_decoded_len() {
        assert_eq!(decoded_len(0), 0);
        assert_eq!(decoded_len(1), 1);
        assert_eq!(decoded_len(2), 2);
        assert_eq!(decoded_len(7), 7);
        assert_eq!(decoded_len(8), 5);
        assert_eq!(decoded_len(9), 6);
        assert_eq!(decoded_len(16), 10);
    }

    #[test]
    fn test_decode_zbase32() {
        assert_eq!(decode_zbase32("em3ags7p").unwrap(), b"hello");
        assert_eq!(decode_zbase32("bd").unwrap(), b"a");
        assert_eq!(decode_zbase32("yy").unwrap(), [0x00]);
        assert_eq!(decode_zbase32("99999999").unwrap(), [0xFF; 5]);
        assert!(decode_zbase32("").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rfc4648() {
        assert_eq!(decode("NBSWY3DP", &RFC4648).unwrap(), b"hello");
        assert_eq!(decode("ME", &RFC4648).unwrap(), b"a");
        assert_eq!(decode("MZXW6YTBOI", &RFC4648).unwrap(), b"foobar");
        assert!(decode("", &RFC4648).unwrap().is_empty());
    }

    #[test]
    fn test_decode_bech32() {
        assert_eq!(decode("dpjkcmr0", &BECH32).unwrap(), b"hello");
        assert_eq!(decode("m6kmamc", &BECH32).unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_decode_into_reports_count() {
        let input = b"em3ags7p";
        let mut out = [0u8; 8];
        let written = decode_into(input, &mut out, &ZBASE32).unwrap();
        assert_eq!(written, 5);
        assert_eq!(&out[..written], b"hello");
    }

    #[test]
    fn test_invalid_symbol_position() {
        // 'l' is not a z-base-32 symbol
        assert_eq!(
            decode_zbase32("hello@"),
            Err(DecodeError::InvalidSymbol {
                offset: 2,
                byte: b'l'
            })
        );
        assert_eq!(
            decode("HELLO@", &RFC4648),
            Err(DecodeError::InvalidSymbol {
                offset: 5,
                byte: b'@'
            })
        );
        assert_eq!(
            decode("hello@", &BECH32),
            Err(DecodeError::InvalidSymbol {
                offset: 4,
                byte: b'o'
            })
        );
    }

    #[test]
    fn test_case_and_whitespace_rejected() {
        assert_eq!(
            decode("nbswy3dp", &RFC4648),
            Err(DecodeError::InvalidSymbol {
                offset: 0,
                byte: b'n'
            })
        );
        assert_eq!(
            decode("NBSW Y3DP", &RFC4648),
            Err(DecodeError::InvalidSymbol {
                offset: 4,
                byte: b' '
            })
        );
        assert_eq!(
            decode_zbase32([b'e', b'm', 0xC3, 0xA9]),
            Err(DecodeError::InvalidSymbol {
                offset: 2,
                byte: 0xC3
            })
        );
    }

    #[test]
    fn test_lenient_inverse_keeps_partial_byte() {
        // A lone symbol still yields a byte
        assert_eq!(decode_zbase32("y").unwrap(), [0x00]);
        assert_eq!(decode_zbase32("9").unwrap(), [0x1F]);
        // High bits of the final group are dropped
        assert_eq!(decode_zbase32("b9").unwrap(), [0xE1]);
        assert_eq!(
            decode_zbase32("em3ags7p9").unwrap(),
            [b'h', b'e', b'l', b'l', b'o', 0x1F]
        );
    }

    #[test]
    fn test_lenient_normal_drops_partial_byte() {
        assert!(decode("M", &RFC4648).unwrap().is_empty());
        assert_eq!(decode("MF", &RFC4648).unwrap(), b"a");
        assert_eq!(decode("NBSWY3DPA", &RFC4648).unwrap(), b"hello");
    }

    #[test]
    fn test_strict_accepts_encoder_output() {
        for (input, alphabet) in [
            ("bd", &ZBASE32),
            ("em3ags7p", &ZBASE32),
            ("bmansob", &ZBASE32),
            ("ME", &RFC4648),
            ("MFQWCYI", &RFC4648),
            ("vy", &BECH32),
        ] {
            assert!(
                decode_with(input, alphabet, Strictness::Strict).is_ok(),
                "{input}"
            );
        }
    }

    #[test]
    fn test_strict_inverse_rejects_trailing() {
        assert_eq!(
            decode_with("y", &ZBASE32, Strictness::Strict),
            Err(DecodeError::TrailingSymbol { offset: 0 })
        );
        assert_eq!(
            decode_with("b9", &ZBASE32, Strictness::Strict),
            Err(DecodeError::TrailingBits { offset: 1 })
        );
        assert_eq!(
            decode_with("em3ags7p9", &ZBASE32, Strictness::Strict),
            Err(DecodeError::TrailingSymbol { offset: 8 })
        );
    }

    #[test]
    fn test_strict_normal_rejects_trailing() {
        assert_eq!(
            decode_with("M", &RFC4648, Strictness::Strict),
            Err(DecodeError::TrailingSymbol { offset: 0 })
        );
        assert_eq!(
            decode_with("MF", &RFC4648, Strictness::Strict),
            Err(DecodeError::TrailingBits { offset: 1 })
        );
        assert_eq!(
            decode_with("NBSWY3DPA", &RFC4648, Strictness::Strict),
            Err(DecodeError::TrailingSymbol { offset: 8 })
        );
    }

    #[test]
    fn test_strict_empty_input() {
        assert!(decode_with("", &ZBASE32, Strictness::Strict)
            .unwrap()
            .is_empty());
        assert!(decode_with("", &RFC4648, Strictness::Strict)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_symbol_wins_over_strictness() {
        assert_eq!(
            decode_with("M@", &RFC4648, Strictness::Strict),
            Err(DecodeError::InvalidSymbol {
                offset: 1,
                byte: b'@'
            })
        );
    }

    #[test]
    #[should_panic(expected = "output buffer too small")]
    fn test_decode_into_short_buffer() {
        let mut out = [0u8; 4];
        let _ = decode_into(b"em3ags7p", &mut out, &ZBASE32);
    }
}
