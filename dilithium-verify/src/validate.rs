//! Length and shape checks on untrusted input.  Nothing here hashes or multiplies; anything
//! refused at this stage costs only a length comparison or a scan of the hint bytes.

use hybrid_array::typenum::Unsigned;
use log::debug;

use crate::error::{Error, Rejection};
use crate::param::{
    DilithiumParams, EncodedCTilde, EncodedHint, EncodedSignature, EncodedVerifyingKey, EncodedZ,
    SignatureParams, VerifyingKeySize,
};
use crate::VerifyingKey;

/// Check that `bytes` has the exact encoded public key length and decode it.
///
/// Every byte string of the right length is a valid key encoding, so the only failure is a
/// length mismatch, reported as [`Error::InvalidKey`].
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] if `bytes` is not exactly
/// `32 + 320 * K` bytes long (1312 bytes for Dilithium2), including when it is empty.
pub fn validate_public_key<P: DilithiumParams>(bytes: &[u8]) -> Result<VerifyingKey<P>, Error> {
    let expected = VerifyingKeySize::<P>::USIZE;
    let enc = EncodedVerifyingKey::<P>::try_from(bytes).map_err(|_| {
        debug!(
            "refusing Dilithium public key: expected {expected} bytes, got {}",
            bytes.len()
        );
        Error::InvalidKey {
            expected,
            got: bytes.len(),
        }
    })?;

    Ok(VerifyingKey::decode(&enc))
}

/// The three fields of a signature of the right length, still encoded
pub(crate) struct RawSignatureFields<P: SignatureParams> {
    pub(crate) c_tilde: EncodedCTilde<P>,
    pub(crate) z: EncodedZ<P>,
    pub(crate) h: EncodedHint<P>,
}

impl<P: SignatureParams> RawSignatureFields<P> {
    pub(crate) fn split(enc: &EncodedSignature<P>) -> Self {
        let (c_tilde, z, h) = P::split_sig(enc);
        Self {
            c_tilde: c_tilde.clone(),
            z: z.clone(),
            h: h.clone(),
        }
    }
}

/// Check that `bytes` has the exact signature length and split it into its fields.
pub(crate) fn validate_signature_shape<P: SignatureParams>(
    bytes: &[u8],
) -> Result<RawSignatureFields<P>, Rejection> {
    let enc = EncodedSignature::<P>::try_from(bytes).map_err(|_| Rejection::Malformed)?;
    Ok(RawSignatureFields::split(&enc))
}
