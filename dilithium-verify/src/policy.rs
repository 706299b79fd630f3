//! Verifier configuration

/// Whether non-FIPS algorithms such as Dilithium may be used
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FipsPolicy {
    /// Any supported algorithm may be used
    Permissive,

    /// Only FIPS-approved algorithms may be used, so Dilithium is refused
    OnlyFips,
}

impl FipsPolicy {
    /// The process-wide default, selected at build time by the `fips-only` feature
    #[must_use]
    pub const fn process_default() -> Self {
        if cfg!(feature = "fips-only") {
            Self::OnlyFips
        } else {
            Self::Permissive
        }
    }

    /// Whether Dilithium may be used under this policy
    #[must_use]
    pub const fn permits_dilithium(self) -> bool {
        matches!(self, Self::Permissive)
    }
}

impl Default for FipsPolicy {
    fn default() -> Self {
        Self::process_default()
    }
}

/// Options for constructing a [`DilithiumVerifier`](crate::DilithiumVerifier)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifierConfig {
    /// FIPS restriction to apply
    pub fips_policy: FipsPolicy,
}

impl VerifierConfig {
    /// Configuration with an explicit FIPS policy
    #[must_use]
    pub const fn new(fips_policy: FipsPolicy) -> Self {
        Self { fips_policy }
    }
}
