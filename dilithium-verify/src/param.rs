//! Compile-time description of a Dilithium parameter set.
//!
//! `ParameterSet` captures the parameters as published.  `VerifyingKeyParams` and
//! `SignatureParams` are derived from it by blanket implementations; they fix the sizes of the
//! encoded objects and also carry the logic that needs to know those sizes (splitting, packing),
//! so that the complicated trait bounds stay in this module.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Rem, Sub};

use module_lattice::{ArraySize, Encode, EncodedPolynomialSize, EncodedVectorSize, EncodingSize};
use hybrid_array::{
    Array,
    typenum::{Diff, Length, Prod, Shleft, Sum, U0, U1, U13, U23, U32, U320, Unsigned},
};

use crate::algebra::Vector;
use crate::encode::{BitPack, RangeEncodedPolynomialSize, RangeEncodedVectorSize, RangeEncodingSize};
use crate::util::B32;

/// Some useful compile-time constants
pub(crate) type SpecQ = Sum<Diff<Shleft<U1, U23>, Shleft<U1, U13>>, U1>;
pub(crate) type SpecD = U13;
pub(crate) type QMinus1 = Diff<SpecQ, U1>;
pub(crate) type BitlenQMinusD = Diff<Length<SpecQ>, SpecD>;

/// A `ParameterSet` captures the parameters that describe a particular instance of Dilithium
/// (round 3.1).
pub trait ParameterSet {
    /// Number of rows in the A matrix
    type K: ArraySize;

    /// Number of columns in the A matrix
    type L: ArraySize;

    /// Private key range
    type Eta: Unsigned;

    /// Range of the response vector z
    type Gamma1: Unsigned;

    /// Twice the low-order rounding range gamma2, so that (q - 1) / (2 * gamma2) is exact
    type TwoGamma2: Unsigned;

    /// Encoding width of the w1 polynomials, namely bitlen((q - 1) / (2 * gamma2) - 1)
    type W1Bits: EncodingSize;

    /// Length of the challenge seed `c_tilde`, in bytes
    type Lambda: ArraySize;

    /// Max number of true values in the hint
    type Omega: ArraySize;

    /// Number of nonzero values in the polynomial c
    const TAU: usize;

    /// Beta = Tau * Eta
    #[allow(clippy::as_conversions)]
    #[allow(clippy::cast_possible_truncation)]
    const BETA: u32 = (Self::TAU as u32) * Self::Eta::U32;
}

/// Sizes and codecs of the public key `(rho, t1)`
pub trait VerifyingKeyParams: ParameterSet {
    /// Size of the packed `t1` vector
    type T1Size: ArraySize;
    /// Size of the whole encoded key
    type VerifyingKeySize: ArraySize;

    /// Pack `t1` with 10 bits per coefficient
    fn encode_t1(t1: &Vector<Self::K>) -> EncodedT1<Self>;
    /// Unpack `t1`
    fn decode_t1(enc: &EncodedT1<Self>) -> Vector<Self::K>;
    /// Assemble an encoded key
    fn concat_vk(rho: B32, t1: EncodedT1<Self>) -> EncodedVerifyingKey<Self>;
    /// Split an encoded key into `rho` and packed `t1`
    fn split_vk(enc: &EncodedVerifyingKey<Self>) -> (&B32, &EncodedT1<Self>);
}

pub(crate) type VerifyingKeySize<P> = <P as VerifyingKeyParams>::VerifyingKeySize;
pub(crate) type EncodedT1<P> = Array<u8, <P as VerifyingKeyParams>::T1Size>;

/// A verifying key encoded as a byte array
pub type EncodedVerifyingKey<P> = Array<u8, VerifyingKeySize<P>>;

impl<P> VerifyingKeyParams for P
where
    P: ParameterSet,
    // T1 encoding rules
    U320: Mul<P::K>,
    Prod<U320, P::K>: ArraySize + Div<P::K, Output = U320> + Rem<P::K, Output = U0>,
    // Verifying key encoding rules
    U32: Add<Prod<U320, P::K>>,
    Sum<U32, Prod<U320, P::K>>: ArraySize + Sub<U32, Output = Prod<U320, P::K>>,
{
    type T1Size = EncodedVectorSize<BitlenQMinusD, P::K>;
    type VerifyingKeySize = Sum<U32, Self::T1Size>;

    fn encode_t1(t1: &Vector<P::K>) -> EncodedT1<Self> {
        Encode::<BitlenQMinusD>::encode(t1)
    }

    fn decode_t1(enc: &EncodedT1<Self>) -> Vector<Self::K> {
        Encode::<BitlenQMinusD>::decode(enc)
    }

    fn concat_vk(rho: B32, t1: EncodedT1<Self>) -> EncodedVerifyingKey<Self> {
        rho.concat(t1)
    }

    fn split_vk(enc: &EncodedVerifyingKey<Self>) -> (&B32, &EncodedT1<Self>) {
        enc.split_ref()
    }
}

/// Sizes and codecs of the signature `(c_tilde, z, h)`
pub trait SignatureParams: ParameterSet {
    /// Size of the packed `w1` vector that is hashed into the challenge
    type W1Size: ArraySize;
    /// Size of the packed response `z`
    type ZSize: ArraySize;
    /// Size of the encoded hint
    type HintSize: ArraySize;
    /// Size of the whole encoded signature
    type SignatureSize: ArraySize;

    /// Exclusive bound on the infinity norm of z
    const GAMMA1_MINUS_BETA: u32;

    /// Split an encoded hint into position bytes and cumulative counts
    fn split_hint(y: &EncodedHint<Self>) -> (&EncodedHintIndices<Self>, &EncodedHintCuts<Self>);

    /// Pack `w1` with `W1Bits` bits per coefficient
    fn encode_w1(w1: &Vector<Self::K>) -> EncodedW1<Self>;

    /// Pack `z` as `gamma1 - z`
    fn encode_z(z: &Vector<Self::L>) -> EncodedZ<Self>;
    /// Unpack `z`
    fn decode_z(enc: &EncodedZ<Self>) -> Vector<Self::L>;

    /// Assemble an encoded signature
    fn concat_sig(
        c_tilde: EncodedCTilde<Self>,
        z: EncodedZ<Self>,
        h: EncodedHint<Self>,
    ) -> EncodedSignature<Self>;
    /// Split an encoded signature into its three fields
    fn split_sig(
        enc: &EncodedSignature<Self>,
    ) -> (&EncodedCTilde<Self>, &EncodedZ<Self>, &EncodedHint<Self>);
}

pub(crate) type SignatureSize<P> = <P as SignatureParams>::SignatureSize;
pub(crate) type EncodedCTilde<P> = Array<u8, <P as ParameterSet>::Lambda>;
pub(crate) type EncodedW1<P> = Array<u8, <P as SignatureParams>::W1Size>;
pub(crate) type EncodedZ<P> = Array<u8, <P as SignatureParams>::ZSize>;
pub(crate) type EncodedHintIndices<P> = Array<u8, <P as ParameterSet>::Omega>;
pub(crate) type EncodedHintCuts<P> = Array<u8, <P as ParameterSet>::K>;
pub(crate) type EncodedHint<P> = Array<u8, <P as SignatureParams>::HintSize>;

/// A signature encoded as a byte array
pub type EncodedSignature<P> = Array<u8, SignatureSize<P>>;

impl<P> SignatureParams for P
where
    P: ParameterSet,
    // W1
    U32: Mul<P::W1Bits>,
    EncodedPolynomialSize<P::W1Bits>: Mul<P::K>,
    Prod<EncodedPolynomialSize<P::W1Bits>, P::K>:
        ArraySize + Div<P::K, Output = EncodedPolynomialSize<P::W1Bits>> + Rem<P::K, Output = U0>,
    // Z
    P::Gamma1: Sub<U1>,
    (Diff<P::Gamma1, U1>, P::Gamma1): RangeEncodingSize,
    RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>: Mul<P::L>,
    Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>: ArraySize
        + Div<P::L, Output = RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>>
        + Rem<P::L, Output = U0>,
    // Hint
    P::Omega: Add<P::K>,
    Sum<P::Omega, P::K>: ArraySize + Sub<P::Omega, Output = P::K>,
    // Signature
    P::Lambda: Add<Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>>,
    Sum<P::Lambda, Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>>:
        ArraySize
            + Add<Sum<P::Omega, P::K>>
            + Sub<
                P::Lambda,
                Output = Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>,
            >,
    Sum<
        Sum<P::Lambda, Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>>,
        Sum<P::Omega, P::K>,
    >: ArraySize
        + Sub<
            Sum<P::Lambda, Prod<RangeEncodedPolynomialSize<Diff<P::Gamma1, U1>, P::Gamma1>, P::L>>,
            Output = Sum<P::Omega, P::K>,
        >,
{
    type W1Size = EncodedVectorSize<Self::W1Bits, P::K>;
    type ZSize = RangeEncodedVectorSize<Diff<P::Gamma1, U1>, P::Gamma1, P::L>;
    type HintSize = Sum<P::Omega, P::K>;
    type SignatureSize = Sum<Sum<P::Lambda, Self::ZSize>, Self::HintSize>;

    const GAMMA1_MINUS_BETA: u32 = P::Gamma1::U32 - P::BETA;

    fn split_hint(y: &EncodedHint<Self>) -> (&EncodedHintIndices<Self>, &EncodedHintCuts<Self>) {
        y.split_ref()
    }

    fn encode_w1(w1: &Vector<Self::K>) -> EncodedW1<Self> {
        Encode::<Self::W1Bits>::encode(w1)
    }

    fn encode_z(z: &Vector<Self::L>) -> EncodedZ<Self> {
        BitPack::<Diff<P::Gamma1, U1>, P::Gamma1>::pack(z)
    }

    fn decode_z(enc: &EncodedZ<Self>) -> Vector<Self::L> {
        BitPack::<Diff<P::Gamma1, U1>, P::Gamma1>::unpack(enc)
    }

    fn concat_sig(
        c_tilde: EncodedCTilde<P>,
        z: EncodedZ<P>,
        h: EncodedHint<P>,
    ) -> EncodedSignature<P> {
        c_tilde.concat(z).concat(h)
    }

    fn split_sig(enc: &EncodedSignature<P>) -> (&EncodedCTilde<P>, &EncodedZ<P>, &EncodedHint<P>) {
        let (enc, h) = enc.split_ref();
        let (c_tilde, z) = enc.split_ref();
        (c_tilde, z, h)
    }
}

/// An instance of `DilithiumParams` defines all of the parameters necessary for verification.
/// Typically this is done by implementing `ParameterSet` with values that will fit into the
/// blanket implementations of `VerifyingKeyParams` and `SignatureParams`.
pub trait DilithiumParams:
    VerifyingKeyParams + SignatureParams + Debug + Default + PartialEq + Clone
{
}

impl<T> DilithiumParams for T where
    T: VerifyingKeyParams + SignatureParams + Debug + Default + PartialEq + Clone
{
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Dilithium2;

    #[test]
    fn dilithium2_sizes() {
        type P = Dilithium2;

        assert_eq!(<P as VerifyingKeyParams>::T1Size::USIZE, 1280);
        assert_eq!(<P as VerifyingKeyParams>::VerifyingKeySize::USIZE, 1312);
        assert_eq!(<P as SignatureParams>::W1Size::USIZE, 768);
        assert_eq!(<P as SignatureParams>::ZSize::USIZE, 2304);
        assert_eq!(<P as SignatureParams>::HintSize::USIZE, 84);
        assert_eq!(<P as SignatureParams>::SignatureSize::USIZE, 2420);
    }

    #[test]
    fn dilithium2_constants() {
        type P = Dilithium2;

        assert_eq!(<P as ParameterSet>::Gamma1::U32, 131_072);
        assert_eq!(<P as ParameterSet>::TwoGamma2::U32, 2 * 95_232);
        assert_eq!(<P as ParameterSet>::W1Bits::USIZE, 6);
        assert_eq!(<P as ParameterSet>::BETA, 78);
        assert_eq!(<P as SignatureParams>::GAMMA1_MINUS_BETA, 130_994);
        assert_eq!(BitlenQMinusD::USIZE, 10);
        assert_eq!(SpecQ::U32, 8_380_417);
    }
}
