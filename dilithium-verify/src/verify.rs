//! The verification procedure.
//!
//! Checks run in order of cost: lengths and encodings first, then the norm bound on `z` and the
//! hint weight, and only then the matrix expansion, transforms and hashes.  A refused signature
//! is reported to the caller only as [`Error::VerificationFailed`]; the specific reason goes to
//! the debug log.

use hybrid_array::typenum::Unsigned;
use log::{debug, trace};
use subtle::ConstantTimeEq;

use crate::algebra::{AlgebraExt, Elem};
use crate::arith::{Portable, RingArithmetic};
use crate::error::{Error, Rejection};
use crate::oracle;
use crate::param::{DilithiumParams, EncodedCTilde, SpecD};
use crate::sampling::{expand_a, sample_in_ball};
use crate::validate::validate_signature_shape;
use crate::{Signature, VerifyingKey};

impl<P: DilithiumParams> VerifyingKey<P> {
    /// Verify `sigma` over the concatenation of `message`.
    ///
    /// The message is hashed incrementally, so passing it in several parts is equivalent to
    /// passing the joined bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] if the signature is not valid for this key and
    /// message.
    pub fn verify_parts(&self, message: &[&[u8]], sigma: &Signature<P>) -> Result<(), Error> {
        report(self.check::<Portable>(message, sigma))
    }

    /// Verify an encoded signature, validating its length and encoding first.
    pub(crate) fn verify_encoded<A: RingArithmetic>(
        &self,
        message: &[&[u8]],
        signature: &[u8],
    ) -> Result<(), Rejection> {
        let fields = validate_signature_shape::<P>(signature)?;
        let sigma = Signature::from_fields(&fields)?;
        self.check::<A>(message, &sigma)
    }

    pub(crate) fn check<A: RingArithmetic>(
        &self,
        message: &[&[u8]],
        sigma: &Signature<P>,
    ) -> Result<(), Rejection> {
        if sigma.z.infinity_norm() >= P::GAMMA1_MINUS_BETA {
            return Err(Rejection::OutOfBounds);
        }

        if sigma.h.hamming_weight() > P::Omega::USIZE {
            return Err(Rejection::OutOfBounds);
        }

        let A_hat = expand_a::<P::K, P::L>(&self.rho);
        let mu = oracle::message_representative(&self.tr, message);

        // Reconstruct w1 = UseHint(h, A*z - c*t1*2^d)
        let c = sample_in_ball(&sigma.c_tilde, P::TAU);
        let c_hat = A::ntt(&c);
        let z_hat = A::ntt_vector(&sigma.z);
        let t1_2d_hat = A::ntt_vector(&(Elem::new(1 << SpecD::U32) * &self.t1));

        let Az_hat = A::multiply_matrix(&A_hat, &z_hat);
        let ct1_2d_hat = A::multiply_scalar(&c_hat, &t1_2d_hat);
        let wp_approx = A::ntt_inverse_vector(&A::subtract(&Az_hat, &ct1_2d_hat));
        let w1p = sigma.h.use_hint::<A>(&wp_approx);

        let w1p_tilde = P::encode_w1(&w1p);
        let cp_tilde: EncodedCTilde<P> = oracle::challenge_seed(&mu, &w1p_tilde);

        if bool::from(sigma.c_tilde.as_slice().ct_eq(cp_tilde.as_slice())) {
            Ok(())
        } else {
            Err(Rejection::SignatureMismatch)
        }
    }
}

/// Log the outcome of a verification and collapse the rejection reason
pub(crate) fn report(outcome: Result<(), Rejection>) -> Result<(), Error> {
    match outcome {
        Ok(()) => {
            trace!("Dilithium signature verified");
            Ok(())
        }
        Err(reason) => {
            debug!("Dilithium signature rejected: {reason}");
            Err(reason.into())
        }
    }
}
