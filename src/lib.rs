//! # Rspamd-compatible Base32
//!
//! Base32 encoding and decoding with bug-to-bug compatibility with the
//! [Rspamd](https://rspamd.com) mail filter, including the reversed octets
//! order of its z-base-32 variant.
//!
//! The same bit-packing engine also serves the standard RFC 4648 alphabet and
//! the BECH32 alphabet, which use conventional MSB-first packing.
//!
//! ## Design
//!
//! - **Byte-identical output** - Matches Rspamd's `rspamd_encode_base32` exactly
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **Two packing orders** - [`EncodeOrder::Normal`] and [`EncodeOrder::Inverse`]
//!   are separate routines, selected by the alphabet
//! - **No shared state** - Alphabets are immutable and every call is independent
//!
//! ## API Overview
//!
//! ### Alphabets
//!
//! - [`ZBASE32`] - z-base-32 with Rspamd's inverse order (the default)
//! - [`RFC4648`] - RFC 4648 alphabet, no padding
//! - [`BECH32`] - BECH32 alphabet
//! - [`Alphabet::new`] - Custom alphabet from 32 printable ASCII symbols
//!
//! ### Buffer Functions
//!
//! - [`encoded_len`] / [`decoded_len`] - Output buffer sizes
//! - [`encode_into`] / [`decode_into`] - Encode or decode into a caller buffer
//! - [`decode_into_with`] - Decode with explicit [`Strictness`]
//!
//! ### Convenience Functions
//!
//! - [`encode`] / [`decode`] - Allocating versions for any alphabet
//! - [`encode_zbase32`] / [`decode_zbase32`] - Shortcuts for [`ZBASE32`]
//!
//! ## Usage
//!
//! ```rust
//! use rspamd_base32::{decode_zbase32, encode, encode_zbase32, RFC4648};
//!
//! assert_eq!(encode_zbase32("hello"), "em3ags7p");
//! assert_eq!(decode_zbase32("em3ags7p").unwrap(), b"hello");
//!
//! assert_eq!(encode("hello", &RFC4648), "NBSWY3DP");
//! ```
//!
//! Encoding into a caller-supplied buffer:
//!
//! ```rust
//! use rspamd_base32::{encode_into, encoded_len, ZBASE32};
//!
//! let input = b"hello";
//! let mut buf = vec![0u8; encoded_len(input.len())];
//! let written = encode_into(input, &mut buf, &ZBASE32);
//! assert_eq!(&buf[..written], b"em3ags7p");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod alphabet;
mod decode;
mod encode;
mod error;

pub use alphabet::{Alphabet, EncodeOrder, ALPHABET_SIZE, BECH32, RFC4648, ZBASE32};
pub use decode::{
    decode, decode_into, decode_into_with, decode_with, decode_zbase32, decoded_len, Strictness,
};
pub use encode::{encode, encode_into, encode_to_vec, encode_zbase32, encoded_len};
pub use error::{AlphabetError, DecodeError};
