//! Base32 alphabets.
//!
//! An [`Alphabet`] maps the 5-bit values 0-31 to 32 distinct printable ASCII
//! symbols and back, and carries the [`EncodeOrder`] the codec uses with it.
//!
//! ## Lookup Tables
//! - Forward table: 32 entries, value → symbol
//! - Reverse table: 256 entries indexed by raw byte, symbol → value, with
//!   `0xFF` marking bytes that are not part of the alphabet

#![allow(clippy::cast_possible_truncation)]

use std::fmt;

use log::debug;

use crate::error::AlphabetError;

/// Number of symbols in a base32 alphabet.
pub const ALPHABET_SIZE: usize = 32;

/// Reverse table marker for bytes outside the alphabet.
const INVALID: u8 = 0xFF;

/// Bit ordering used when packing bytes into 5-bit symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodeOrder {
    /// MSB-first packing, as in RFC 4648 and BECH32.
    #[default]
    Normal,
    /// LSB-first packing with reversed octets, as produced by Rspamd.
    Inverse,
}

/// Immutable base32 alphabet with its encode order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    /// Value → symbol.
    symbols: [u8; ALPHABET_SIZE],
    /// Symbol → value, `INVALID` for unused bytes.
    values: [u8; 256],
    order: EncodeOrder,
}

impl Alphabet {
    /// Build an alphabet from a 32-character spec.
    ///
    /// # Arguments
    /// * `spec` - The 32 symbols, in value order
    /// * `order` - Bit ordering used by the codec
    ///
    /// # Returns
    /// The alphabet, or an error if `spec` has the wrong length, contains a
    /// byte outside 0x20-0x7E, or repeats a byte.
    pub fn new(spec: &str, order: EncodeOrder) -> Result<Self, AlphabetError> {
        Self::from_bytes(spec.as_bytes(), order)
    }

    /// Build an alphabet from a raw 32-byte spec.
    ///
    /// Validation is the same as [`Alphabet::new`]. Bytes are checked left to
    /// right and the first offending one is reported.
    pub fn from_bytes(spec: &[u8], order: EncodeOrder) -> Result<Self, AlphabetError> {
        let symbols: [u8; ALPHABET_SIZE] = spec
            .try_into()
            .map_err(|_| rejected(AlphabetError::InvalidLength(spec.len())))?;

        let mut values = [INVALID; 256];
        for (position, &byte) in symbols.iter().enumerate() {
            if !(0x20..=0x7E).contains(&byte) {
                return Err(rejected(AlphabetError::UnprintableSymbol { byte, position }));
            }

            let slot = &mut values[usize::from(byte)];
            if *slot != INVALID {
                return Err(rejected(AlphabetError::DuplicateSymbol { byte, position }));
            }
            *slot = position as u8;
        }

        Ok(Self {
            symbols,
            values,
            order,
        })
    }

    /// Build an alphabet from a table known to be valid.
    ///
    /// Used for the predefined alphabets so they can live in `static`s.
    const fn from_table(symbols: &[u8; ALPHABET_SIZE], order: EncodeOrder) -> Self {
        let mut values = [INVALID; 256];
        let mut i = 0;
        while i < ALPHABET_SIZE {
            values[symbols[i] as usize] = i as u8;
            i += 1;
        }

        Self {
            symbols: *symbols,
            values,
            order,
        }
    }

    /// Look up a predefined alphabet by name (`zbase32`, `rfc4648`, `bech32`).
    ///
    /// Matching is ASCII case-insensitive.
    pub fn predefined(name: &str) -> Option<&'static Self> {
        [("zbase32", &ZBASE32), ("rfc4648", &RFC4648), ("bech32", &BECH32)]
            .into_iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, alphabet)| alphabet)
    }

    /// The same symbol set with a different encode order.
    #[must_use]
    pub const fn with_order(self, order: EncodeOrder) -> Self {
        Self { order, ..self }
    }

    /// Encode order used with this alphabet.
    #[inline]
    pub const fn order(&self) -> EncodeOrder {
        self.order
    }

    /// The 32 symbols, in value order.
    #[inline]
    pub const fn symbols(&self) -> &[u8; ALPHABET_SIZE] {
        &self.symbols
    }

    /// Symbol for a 5-bit value. Only the low 5 bits of `value` are used.
    #[inline]
    pub const fn symbol(&self, value: u8) -> u8 {
        self.symbols[(value & 0x1F) as usize]
    }

    /// 5-bit value of a symbol, or `None` if the byte is not in the alphabet.
    #[inline]
    pub const fn value(&self, symbol: u8) -> Option<u8> {
        match self.values[symbol as usize] {
            INVALID => None,
            value => Some(value),
        }
    }

    /// Check whether a byte is one of the alphabet's symbols.
    #[inline]
    pub const fn contains(&self, symbol: u8) -> bool {
        self.values[symbol as usize] != INVALID
    }
}

fn rejected(err: AlphabetError) -> AlphabetError {
    debug!("rejecting base32 alphabet: {err}");
    err
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols
            .iter()
            .try_for_each(|&symbol| fmt::Write::write_char(f, char::from(symbol)))
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("symbols", &self.to_string())
            .field("order", &self.order)
            .finish()
    }
}

/// Z-base-32 alphabet with Rspamd's reversed bit order.
///
/// This is the legacy-compatible default.
pub static ZBASE32: Alphabet =
    Alphabet::from_table(b"ybndrfg8ejkmcpqxot1uwisza345h769", EncodeOrder::Inverse);

/// RFC 4648 alphabet. No padding is emitted.
pub static RFC4648: Alphabet =
    Alphabet::from_table(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567", EncodeOrder::Normal);

/// BECH32 alphabet.
pub static BECH32: Alphabet =
    Alphabet::from_table(b"qpzry9x8gf2tvdw0s3jn54khce6mua7l", EncodeOrder::Normal);
