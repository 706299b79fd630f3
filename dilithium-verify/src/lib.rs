#![no_std]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::pedantic)] // Be pedantic by default
#![warn(clippy::integer_division_remainder_used)] // Be judicious about using `/` and `%`
#![allow(non_snake_case)] // Allow notation matching the published algorithm
#![allow(clippy::clone_on_copy)] // Be explicit about moving data
#![warn(missing_docs)] // Require all public interfaces to be documented

//! # Usage
//!
//! Most callers want [`DilithiumVerifier`], which takes the public key and signature as byte
//! strings.  [`VerifyingKey`] and [`Signature`] are also usable directly, including through the
//! [`signature::Verifier`] trait.

#[cfg(test)]
extern crate std;

mod algebra;
mod arith;
mod crypto;
mod encode;
mod error;
mod hint;
mod ntt;
mod oracle;
mod param;
mod policy;
mod sampling;
mod util;
mod validate;
mod verifier;
mod verify;

#[cfg(test)]
mod test_vectors;

use hybrid_array::typenum::{Diff, Length, Quot, Shleft, U1, U2, U4, U17, U32, U44, U80};

use crate::algebra::Vector;
use crate::hint::Hint;
use crate::param::{EncodedCTilde, QMinus1};
use crate::util::B32;
use crate::validate::RawSignatureFields;

pub use crate::error::Error;
pub use crate::param::{
    DilithiumParams, EncodedSignature, EncodedVerifyingKey, ParameterSet, SignatureParams,
    VerifyingKeyParams,
};
pub use crate::policy::{FipsPolicy, VerifierConfig};
pub use crate::validate::validate_public_key;
pub use crate::verifier::DilithiumVerifier;
pub use signature;

/// A Dilithium signature
#[derive(Clone, PartialEq, Debug)]
pub struct Signature<P: SignatureParams> {
    c_tilde: EncodedCTilde<P>,
    z: Vector<P::L>,
    h: Hint<P>,
}

impl<P: SignatureParams> Signature<P> {
    /// Encode the signature in its fixed-size wire format
    pub fn encode(&self) -> EncodedSignature<P> {
        let c_tilde = self.c_tilde.clone();
        let z = P::encode_z(&self.z);
        let h = self.h.bit_pack();
        P::concat_sig(c_tilde, z, h)
    }

    /// Decode a signature.  Returns `None` if the hint is not canonically encoded.
    ///
    /// The range of `z` is not checked here; verification refuses out-of-range responses.
    pub fn decode(enc: &EncodedSignature<P>) -> Option<Self> {
        Self::from_fields(&RawSignatureFields::split(enc)).ok()
    }

    pub(crate) fn from_fields(fields: &RawSignatureFields<P>) -> Result<Self, error::Rejection> {
        Ok(Self {
            c_tilde: fields.c_tilde.clone(),
            z: P::decode_z(&fields.z),
            h: Hint::bit_unpack(&fields.h)?,
        })
    }
}

impl<P: SignatureParams> TryFrom<&[u8]> for Signature<P> {
    type Error = signature::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let enc = EncodedSignature::<P>::try_from(value).map_err(|_| signature::Error::new())?;
        Self::decode(&enc).ok_or_else(signature::Error::new)
    }
}

/// A Dilithium public key
#[derive(Clone, PartialEq, Debug)]
pub struct VerifyingKey<P: ParameterSet> {
    rho: B32,
    t1: Vector<P::K>,

    // Derived value
    tr: B32,
}

impl<P: VerifyingKeyParams> VerifyingKey<P> {
    /// Encode the key in its fixed-size wire format
    pub fn encode(&self) -> EncodedVerifyingKey<P> {
        let t1 = P::encode_t1(&self.t1);
        P::concat_vk(self.rho.clone(), t1)
    }

    /// Decode a key.  Every byte string of the right length is a valid encoding.
    pub fn decode(enc: &EncodedVerifyingKey<P>) -> Self {
        let (rho, t1_enc) = P::split_vk(enc);
        Self {
            rho: rho.clone(),
            t1: P::decode_t1(t1_enc),
            tr: oracle::public_key_digest(enc),
        }
    }
}

impl<P: DilithiumParams> TryFrom<&[u8]> for VerifyingKey<P> {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        validate_public_key(value)
    }
}

impl<P: DilithiumParams> signature::Verifier<Signature<P>> for VerifyingKey<P> {
    fn verify(&self, msg: &[u8], signature: &Signature<P>) -> Result<(), signature::Error> {
        self.verify_parts(&[msg], signature).map_err(Into::into)
    }
}

/// `Dilithium2` is the round 3.1 parameter set for NIST security category 2.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Dilithium2;

impl ParameterSet for Dilithium2 {
    type K = U4;
    type L = U4;
    type Eta = U2;
    type Gamma1 = Shleft<U1, U17>;
    type TwoGamma2 = Quot<QMinus1, U44>;
    type W1Bits = Length<Diff<U44, U1>>;
    type Lambda = U32;
    type Omega = U80;
    const TAU: usize = 39;
}
