// crates/engine/src/lib.rs

//! Public facade for the code-signature engine.
//! Establishes a trust anchor from signed code and checks candidate bundles
//! (typically freshly downloaded self-updates) against it.

pub mod adapters;
pub mod domain;

#[cfg(all(target_os = "macos", feature = "system"))]
use std::sync::Arc;

#[cfg(all(target_os = "macos", feature = "system"))]
use adapters::security_framework::SecurityFramework;

/// Designated requirement of the running application, via Security.framework.
#[cfg(all(target_os = "macos", feature = "system"))]
pub fn current_application_signature() -> SignatureResult<TrustAnchor> {
    RequirementExtractor::new(Arc::new(SecurityFramework)).current_application_signature()
}

/// Designated requirement of a signed bundle on disk, via Security.framework.
#[cfg(all(target_os = "macos", feature = "system"))]
pub fn signature_for_bundle(bundle: impl Into<BundleLocation>) -> SignatureResult<TrustAnchor> {
    RequirementExtractor::new(Arc::new(SecurityFramework)).signature_for_bundle(bundle)
}

/// A verifier for `anchor` backed by Security.framework.
#[cfg(all(target_os = "macos", feature = "system"))]
pub fn verifier(anchor: TrustAnchor) -> SignatureVerifier<SecurityFramework> {
    SignatureVerifier::new(Arc::new(SecurityFramework), anchor)
}

// Re-exports for convenience
pub use domain::anchor::TrustAnchor;
pub use domain::error::{
    CodeSignatureError, CodeTarget, EmptyRequirementData, ErrorKind, LocationError,
    PlatformError, PlatformErrorKind, PlatformResult, SignatureResult, ERROR_DOMAIN,
};
pub use domain::extract::RequirementExtractor;
pub use domain::provider::CodeSigningProvider;
pub use domain::types::{BundleLocation, SignatureDefaults, ValidationFlags};
pub use domain::verify::{SignatureVerifier, Verification, VerificationFuture};
