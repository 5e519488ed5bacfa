#![no_main]

use libfuzzer_sys::fuzz_target;

use attest_claims::Proof;

// Decoding arbitrary input as a proof must never panic, and a decoded proof
// must survive re-encoding.
fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(proof) = Proof::from_json(json) {
            let _ = proof.check_identifier();
            let encoded = proof.to_json().expect("decoded proof re-encodes");
            assert_eq!(Proof::from_json(&encoded).ok(), Some(proof));
        }
        let _ = serde_json::from_str::<Vec<Proof>>(json);
    }

    let _ = bincode::deserialize::<Proof>(data);
});
