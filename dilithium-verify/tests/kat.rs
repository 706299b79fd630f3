use dilithium_verify::*;

use std::{fs::read_to_string, path::PathBuf};

const PERMISSIVE: VerifierConfig = VerifierConfig::new(FipsPolicy::Permissive);

fn load() -> kat::KnownAnswerFile {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("tests/kat.json");
    let tv_json = read_to_string(p.as_path()).unwrap();
    serde_json::from_str(&tv_json).unwrap()
}

fn verifier(tc: &kat::TestCase) -> DilithiumVerifier<Dilithium2> {
    DilithiumVerifier::new_with_config(&tc.pk, &PERMISSIVE).unwrap()
}

#[test]
fn known_answers() {
    let tv = load();
    assert_eq!(tv.algorithm, "Dilithium2");
    assert_eq!(tv.tests.len(), 3);

    for tc in &tv.tests {
        assert_eq!(tc.pk.len(), 1312);
        assert_eq!(tc.signature.len(), 2420);
        assert!(verifier(tc).verify(&tc.signature, &tc.message).is_ok(), "tcId {}", tc.id);
    }
}

#[test]
fn tampered_message() {
    for tc in &load().tests {
        let mut message = tc.message.clone();
        message[0] ^= 1;
        assert_eq!(
            verifier(tc).verify(&tc.signature, &message),
            Err(Error::VerificationFailed)
        );

        let mut extended = tc.message.clone();
        extended.push(0);
        assert!(verifier(tc).verify(&tc.signature, &extended).is_err());
    }
}

#[test]
fn trailing_data() {
    for tc in &load().tests {
        let mut signature = tc.signature.clone();
        signature.extend_from_slice(b"trailing");
        assert_eq!(
            verifier(tc).verify(&signature, &tc.message),
            Err(Error::VerificationFailed)
        );
    }
}

#[test]
fn truncated_signature() {
    for tc in &load().tests {
        let v = verifier(tc);
        for len in [0, 1, 32, 2336, 2419] {
            assert!(v.verify(&tc.signature[..len], &tc.message).is_err());
        }
    }
}

#[test]
fn flipped_first_byte() {
    for tc in &load().tests {
        let mut signature = tc.signature.clone();
        signature[0] ^= 1;
        assert!(verifier(tc).verify(&signature, &tc.message).is_err());
    }
}

#[test]
fn flipped_byte_in_each_field() {
    // Challenge, response and hint
    for tc in &load().tests {
        for index in [17, 100, 1500, 2335, 2340, 2419] {
            let mut signature = tc.signature.clone();
            signature[index] ^= 0x10;
            assert!(
                verifier(tc).verify(&signature, &tc.message).is_err(),
                "tcId {} byte {index}",
                tc.id
            );
        }
    }
}

#[test]
fn other_key() {
    let tv = load();
    for (i, tc) in tv.tests.iter().enumerate() {
        let other = &tv.tests[(i + 1) % tv.tests.len()];
        assert!(verifier(other).verify(&tc.signature, &tc.message).is_err());
    }
}

#[test]
fn typed_api() {
    use signature::Verifier;

    for tc in &load().tests {
        let vk_bytes = EncodedVerifyingKey::<Dilithium2>::try_from(tc.pk.as_slice()).unwrap();
        let vk = VerifyingKey::<Dilithium2>::decode(&vk_bytes);

        let sig_bytes = EncodedSignature::<Dilithium2>::try_from(tc.signature.as_slice()).unwrap();
        let sig = Signature::<Dilithium2>::decode(&sig_bytes).unwrap();

        assert!(vk.verify(&tc.message, &sig).is_ok());
        assert!(vk.verify_parts(&[&tc.message[..5], &tc.message[5..]], &sig).is_ok());
        assert_eq!(
            vk.verify_parts(&[b"not the message".as_slice()], &sig),
            Err(Error::VerificationFailed)
        );
        assert_eq!(&sig.encode()[..], &tc.signature[..]);
    }
}

mod kat {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub(crate) struct KnownAnswerFile {
        pub(crate) algorithm: String,
        pub(crate) tests: Vec<TestCase>,
    }

    #[derive(Deserialize)]
    pub(crate) struct TestCase {
        #[serde(rename = "tcId")]
        pub(crate) id: usize,

        #[serde(with = "hex::serde")]
        pub(crate) pk: Vec<u8>,

        #[serde(with = "hex::serde")]
        pub(crate) message: Vec<u8>,

        #[serde(with = "hex::serde")]
        pub(crate) signature: Vec<u8>,
    }
}
