//! Byte-oriented verifier with an explicit construction policy.

use log::debug;

use crate::arith::Portable;
use crate::error::Error;
use crate::param::DilithiumParams;
use crate::policy::VerifierConfig;
use crate::validate::validate_public_key;
use crate::verify::report;
use crate::{Dilithium2, Signature, VerifyingKey};

/// A verifier bound to one public key.
///
/// Construction checks the FIPS policy and the key length; afterwards the verifier is immutable
/// and may be shared freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct DilithiumVerifier<P: DilithiumParams = Dilithium2> {
    key: VerifyingKey<P>,
}

impl<P: DilithiumParams> DilithiumVerifier<P> {
    /// Build a verifier under the process-wide default configuration.
    ///
    /// # Errors
    ///
    /// See [`DilithiumVerifier::new_with_config`].
    pub fn new(public_key: &[u8]) -> Result<Self, Error> {
        Self::new_with_config(public_key, &VerifierConfig::default())
    }

    /// Build a verifier for an encoded public key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PolicyForbidden`] if `config` does not allow Dilithium, whatever the key,
    /// and [`Error::InvalidKey`] if the key does not have the exact encoded length.
    pub fn new_with_config(public_key: &[u8], config: &VerifierConfig) -> Result<Self, Error> {
        if !config.fips_policy.permits_dilithium() {
            debug!(
                "refusing Dilithium verifier under {:?} policy",
                config.fips_policy
            );
            return Err(Error::PolicyForbidden);
        }

        let key = validate_public_key(public_key)?;
        Ok(Self { key })
    }

    /// Verify an encoded signature over `message`.
    ///
    /// The signature must have exactly the encoded length; trailing bytes are not ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] for any signature that is not valid for this key and
    /// message.
    pub fn verify(&self, signature: &[u8], message: &[u8]) -> Result<(), Error> {
        self.verify_parts(signature, &[message])
    }

    /// Verify an encoded signature over the concatenation of the `message` parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] for any signature that is not valid for this key and
    /// message.
    pub fn verify_parts(&self, signature: &[u8], message: &[&[u8]]) -> Result<(), Error> {
        report(self.key.verify_encoded::<Portable>(message, signature))
    }

    /// The decoded public key
    pub fn verifying_key(&self) -> &VerifyingKey<P> {
        &self.key
    }
}

impl<P: DilithiumParams> signature::Verifier<Signature<P>> for DilithiumVerifier<P> {
    fn verify(&self, msg: &[u8], signature: &Signature<P>) -> Result<(), signature::Error> {
        self.key.verify_parts(&[msg], signature).map_err(Into::into)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::FipsPolicy;
    use crate::test_vectors::{first_known_answer, known_answers};

    const PERMISSIVE: VerifierConfig = VerifierConfig::new(FipsPolicy::Permissive);

    #[test]
    fn known_answers_verify() {
        for kat in known_answers() {
            let verifier = DilithiumVerifier::<Dilithium2>::new_with_config(&kat.pk, &PERMISSIVE)
                .unwrap();
            assert_eq!(verifier.verify(&kat.signature, &kat.message), Ok(()));
            assert_eq!(verifier.verifying_key().encode().as_slice(), kat.pk.as_slice());
        }
    }

    #[test]
    fn policy_is_checked_before_key() {
        let config = VerifierConfig::new(FipsPolicy::OnlyFips);
        let kat = first_known_answer();

        for pk in [&kat.pk[..], &kat.pk[1..], &[][..]] {
            assert_eq!(
                DilithiumVerifier::<Dilithium2>::new_with_config(pk, &config),
                Err(Error::PolicyForbidden)
            );
        }
    }

    #[test]
    fn every_failure_is_verification_failed() {
        let kat = first_known_answer();
        let verifier =
            DilithiumVerifier::<Dilithium2>::new_with_config(&kat.pk, &PERMISSIVE).unwrap();

        let mut trailing = kat.signature.clone();
        trailing.push(0);

        let mut oversized_hint = kat.signature.clone();
        oversized_hint[2419] = 81;

        let mut flipped = kat.signature.clone();
        flipped[0] ^= 1;

        for signature in [&trailing, &oversized_hint, &flipped] {
            assert_eq!(
                verifier.verify(signature, &kat.message),
                Err(Error::VerificationFailed)
            );
        }

        assert_eq!(
            verifier.verify(&kat.signature, b"wrong message"),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn message_parts() {
        let kat = first_known_answer();
        let verifier =
            DilithiumVerifier::<Dilithium2>::new_with_config(&kat.pk, &PERMISSIVE).unwrap();
        let parts: std::vec::Vec<&[u8]> = kat.message.chunks(7).collect();
        assert_eq!(verifier.verify_parts(&kat.signature, &parts), Ok(()));
    }

    #[test]
    fn verifier_trait() {
        use signature::Verifier;

        let kat = first_known_answer();
        let verifier =
            DilithiumVerifier::<Dilithium2>::new_with_config(&kat.pk, &PERMISSIVE).unwrap();
        let sig = Signature::<Dilithium2>::try_from(kat.signature.as_slice()).unwrap();
        assert!(Verifier::verify(&verifier, &kat.message, &sig).is_ok());
        assert!(Verifier::verify(&verifier, &[], &sig).is_err());
    }
}
