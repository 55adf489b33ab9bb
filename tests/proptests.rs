//! Property-based tests.

use proptest::prelude::*;
use rspamd_base32::{
    decode, decode_with, decoded_len, encode_to_vec, encoded_len, Alphabet, DecodeError,
    EncodeOrder, Strictness, BECH32, RFC4648, ZBASE32,
};

fn predefined() -> impl Strategy<Value = &'static Alphabet> {
    prop_oneof![Just(&ZBASE32), Just(&RFC4648), Just(&BECH32)]
}

prop_compose! {
    /// A shuffled printable alphabet with a random order.
    fn custom_alphabet()(
        symbols in Just((0x20u8..=0x7E).collect::<Vec<_>>()).prop_shuffle(),
        inverse in any::<bool>(),
    ) -> Alphabet {
        let order = if inverse { EncodeOrder::Inverse } else { EncodeOrder::Normal };
        Alphabet::from_bytes(&symbols[..32], order).unwrap()
    }
}

proptest! {
    #[test]
    fn round_trip(alphabet in predefined(), data in any::<Vec<u8>>()) {
        let encoded = encode_to_vec(&data, alphabet);
        prop_assert_eq!(decode(&encoded, alphabet).unwrap(), data.clone());
        prop_assert_eq!(decode_with(&encoded, alphabet, Strictness::Strict).unwrap(), data);
    }

    #[test]
    fn custom_round_trip(alphabet in custom_alphabet(), data in any::<Vec<u8>>()) {
        let encoded = encode_to_vec(&data, &alphabet);
        prop_assert!(encoded.iter().all(|&b| alphabet.contains(b)));
        prop_assert_eq!(decode(&encoded, &alphabet).unwrap(), data);
    }

    #[test]
    fn custom_alphabet_bijective(alphabet in custom_alphabet()) {
        for value in 0..32u8 {
            prop_assert_eq!(alphabet.value(alphabet.symbol(value)), Some(value));
        }
        let valid = (0..=255u8).filter(|&b| alphabet.contains(b)).count();
        prop_assert_eq!(valid, 32);
    }

    #[test]
    fn length_bounds(alphabet in predefined(), data in any::<Vec<u8>>()) {
        let encoded = encode_to_vec(&data, alphabet);
        prop_assert!(encoded.len() <= encoded_len(data.len()));
        prop_assert_eq!(encoded.len(), (data.len() * 8 + 4) / 5);

        let decoded = decode(&encoded, alphabet).unwrap();
        prop_assert!(decoded.len() <= decoded_len(encoded.len()));
    }

    #[test]
    fn lenient_decode_within_bound(
        alphabet in predefined(),
        symbols in prop::collection::vec(0u8..32, 0..64),
    ) {
        let input: Vec<u8> = symbols.iter().map(|&v| alphabet.symbol(v)).collect();
        let decoded = decode(&input, alphabet).unwrap();
        prop_assert!(decoded.len() <= decoded_len(input.len()));
    }

    #[test]
    fn first_invalid_symbol_reported(
        alphabet in predefined(),
        data in any::<Vec<u8>>(),
        position in any::<prop::sample::Index>(),
        byte in any::<u8>(),
    ) {
        prop_assume!(!alphabet.contains(byte));
        let mut encoded = encode_to_vec(&data, alphabet);
        let offset = position.index(encoded.len() + 1);
        encoded.insert(offset, byte);

        prop_assert_eq!(
            decode(&encoded, alphabet),
            Err(DecodeError::InvalidSymbol { offset, byte })
        );
    }
}
