use proptest::prelude::*;

use attest_types::{Address, Amount, ClaimId, PublicKey, Signature};

proptest! {
    /// Address text form parses back to the same address.
    #[test]
    fn address_display_parses_back(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// ClaimId::is_zero is true only for all-zero bytes.
    #[test]
    fn claim_id_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let id = ClaimId::new(bytes);
        prop_assert_eq!(id.is_zero(), bytes == [0u8; 32]);
    }

    /// Hex JSON and raw bincode encodings agree on signatures and keys.
    #[test]
    fn signature_and_key_encodings_agree(
        key in prop::array::uniform32(0u8..),
        lo in prop::array::uniform32(0u8..),
        hi in prop::array::uniform32(0u8..),
    ) {
        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&lo);
        sig[32..].copy_from_slice(&hi);
        let value = (PublicKey(key), Signature(sig));

        let json = serde_json::to_string(&value).unwrap();
        let from_json: (PublicKey, Signature) = serde_json::from_str(&json).unwrap();
        let bin = bincode::serialize(&value).unwrap();
        let from_bin: (PublicKey, Signature) = bincode::deserialize(&bin).unwrap();

        prop_assert_eq!(from_json, value);
        prop_assert_eq!(from_bin, value);
    }

    /// Floor proportional split never exceeds the whole.
    #[test]
    fn mul_div_floor_never_exceeds_whole(
        whole in 0u128..1_000_000_000_000,
        part in 0u128..1_000_000,
        extra in 0u128..1_000_000,
    ) {
        let total = part + extra;
        prop_assume!(total > 0);
        let share = Amount::new(whole).mul_div_floor(part, total).unwrap();
        prop_assert!(share <= Amount::new(whole));
    }
}
