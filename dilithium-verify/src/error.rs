use thiserror::Error;

/// Errors reported to callers.
///
/// Every reason a signature can be refused collapses into [`Error::VerificationFailed`]; the
/// finer classification is only logged at debug level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The public key does not have the exact encoded length
    #[error("invalid public key length: expected {expected} bytes, got {got}")]
    InvalidKey {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        got: usize,
    },

    /// The active FIPS policy does not allow Dilithium
    #[error("Dilithium is not permitted under the active FIPS policy")]
    PolicyForbidden,

    /// The signature is not valid for this key and message
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Why a signature was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub(crate) enum Rejection {
    /// Wrong length or non-canonical encoding
    #[error("malformed signature encoding")]
    Malformed,

    /// The response or the hint exceeds its bound
    #[error("signature component out of bounds")]
    OutOfBounds,

    /// The recomputed challenge differs from the one in the signature
    #[error("challenge mismatch")]
    SignatureMismatch,
}

impl From<Rejection> for Error {
    fn from(_: Rejection) -> Self {
        Self::VerificationFailed
    }
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> Self {
        signature::Error::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::string::ToString;

    #[test]
    fn rejections_are_indistinguishable() {
        for reason in [
            Rejection::Malformed,
            Rejection::OutOfBounds,
            Rejection::SignatureMismatch,
        ] {
            assert_eq!(Error::from(reason), Error::VerificationFailed);
        }
    }

    #[test]
    fn display() {
        let err = Error::InvalidKey {
            expected: 1312,
            got: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid public key length: expected 1312 bytes, got 0"
        );
        assert_eq!(
            Rejection::SignatureMismatch.to_string(),
            "challenge mismatch"
        );
    }
}
