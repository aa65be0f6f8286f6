use serde::{Deserialize, Serialize};

/// Centralized defaults for signature checks.
/// All opinionated defaults should be defined here for consistency.
pub struct SignatureDefaults;

impl SignatureDefaults {
    // Platform default validation policy: full chain plus requirement match.
    pub const STRICT_VALIDATION: bool = false;
    pub const CHECK_NESTED_CODE: bool = false;
    pub const CHECK_ALL_ARCHITECTURES: bool = false;
}

/// Extra checks layered on top of the platform's default validation.
///
/// Every flag only tightens validation; there is no way to relax the
/// default policy through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationFlags {
    /// Reject signatures the platform would otherwise tolerate for compatibility.
    pub strict: bool,
    /// Validate nested frameworks, helpers and plug-ins as well.
    pub check_nested_code: bool,
    /// Validate every architecture slice of universal binaries, not just the native one.
    pub check_all_architectures: bool,
}

impl ValidationFlags {
    pub const fn platform_default() -> Self {
        Self {
            strict: SignatureDefaults::STRICT_VALIDATION,
            check_nested_code: SignatureDefaults::CHECK_NESTED_CODE,
            check_all_architectures: SignatureDefaults::CHECK_ALL_ARCHITECTURES,
        }
    }

    /// All stricter checks enabled. Suited to verifying self-updates.
    pub const fn hardened() -> Self {
        Self {
            strict: true,
            check_nested_code: true,
            check_all_architectures: true,
        }
    }

    pub fn is_platform_default(&self) -> bool {
        *self == Self::platform_default()
    }
}

impl Default for ValidationFlags {
    fn default() -> Self {
        Self::platform_default()
    }
}
