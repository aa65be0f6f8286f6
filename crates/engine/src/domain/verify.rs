// crates/engine/src/domain/verify.rs

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use super::anchor::TrustAnchor;
use super::classify::{classify, Stage};
use super::error::{
    CodeSignatureError, PlatformError, PlatformErrorKind, SignatureResult,
};
use super::provider::CodeSigningProvider;
use super::types::{BundleLocation, ValidationFlags};

/// Checks candidate bundles against a held trust anchor.
pub struct SignatureVerifier<P> {
    provider: Arc<P>,
    anchor: TrustAnchor,
    flags: ValidationFlags,
}

impl<P> Clone for SignatureVerifier<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            anchor: self.anchor.clone(),
            flags: self.flags,
        }
    }
}

impl<P> fmt::Debug for SignatureVerifier<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("anchor", &self.anchor)
            .field("flags", &self.flags)
            .finish()
    }
}

impl<P: CodeSigningProvider> SignatureVerifier<P> {
    pub fn new(provider: Arc<P>, anchor: TrustAnchor) -> Self {
        Self {
            provider,
            anchor,
            flags: ValidationFlags::platform_default(),
        }
    }

    /// Build a verifier straight from a live platform requirement.
    pub fn with_requirement(
        provider: Arc<P>,
        requirement: &P::Requirement,
    ) -> SignatureResult<Self> {
        let anchor = TrustAnchor::from_requirement(&*provider, requirement)?;
        Ok(Self::new(provider, anchor))
    }

    pub fn with_flags(mut self, flags: ValidationFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn anchor(&self) -> &TrustAnchor {
        &self.anchor
    }

    pub fn flags(&self) -> ValidationFlags {
        self.flags
    }

    /// Prepare a check of the bundle at `bundle`. Nothing runs until the
    /// returned [`Verification`] is waited on or awaited.
    pub fn verify_bundle_at(&self, bundle: impl Into<BundleLocation>) -> Verification<P> {
        Verification {
            provider: Arc::clone(&self.provider),
            anchor: self.anchor.clone(),
            flags: self.flags,
            bundle: bundle.into(),
        }
    }
}

/// A cold, single-shot signature check.
///
/// Every `wait()` and every awaited clone runs the full check again; no
/// outcome is cached. Dropping it before it is polled does no platform work.
/// Once the native call has started it always runs to completion.
pub struct Verification<P> {
    provider: Arc<P>,
    anchor: TrustAnchor,
    flags: ValidationFlags,
    bundle: BundleLocation,
}

impl<P> Clone for Verification<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            anchor: self.anchor.clone(),
            flags: self.flags,
            bundle: self.bundle.clone(),
        }
    }
}

impl<P> fmt::Debug for Verification<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verification")
            .field("bundle", &self.bundle)
            .field("flags", &self.flags)
            .finish()
    }
}

impl<P: CodeSigningProvider> Verification<P> {
    pub fn bundle(&self) -> &BundleLocation {
        &self.bundle
    }

    /// Run the check on the calling thread, blocking until the platform answers.
    pub fn wait(&self) -> SignatureResult<()> {
        match self.run() {
            Ok(()) => {
                log::info!("{} satisfies the trust anchor", self.bundle);
                Ok(())
            }
            Err(err) => {
                log::warn!("rejected {}: {}", self.bundle, err);
                Err(err)
            }
        }
    }

    fn run(&self) -> SignatureResult<()> {
        let target = self.bundle.target();

        // 1) Static code for the candidate.
        let code = self
            .provider
            .static_code_at(self.bundle.path())
            .map_err(|e| classify(Stage::CreateStaticCode, target.clone(), e))?;

        // 2) Rebuild the held requirement.
        let requirement = self
            .provider
            .requirement_from_data(self.anchor.requirement_data())
            .map_err(|e| classify(Stage::DecodeAnchor, target.clone(), e))?;

        // 3) Signature plus requirement check.
        self.provider
            .check_validity(&code, &requirement, self.flags)
            .map_err(|e| classify(Stage::CheckValidity, target, e))
    }
}

pub type VerificationFuture = Pin<Box<dyn Future<Output = SignatureResult<()>> + Send + 'static>>;

impl<P> IntoFuture for Verification<P>
where
    P: CodeSigningProvider + Send + Sync + 'static,
{
    type Output = SignatureResult<()>;
    type IntoFuture = VerificationFuture;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            // Outside a Tokio runtime there is no blocking pool to hand off to.
            let handle = match tokio::runtime::Handle::try_current() {
                Ok(handle) => handle,
                Err(_) => return self.wait(),
            };

            let target = self.bundle.target();
            match handle.spawn_blocking(move || self.wait()).await {
                Ok(outcome) => outcome,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(_) => Err(CodeSignatureError::CouldNotCreateStaticCode {
                    target,
                    source: PlatformError::new(
                        PlatformErrorKind::Other,
                        0,
                        "verification was torn down before it produced a verdict",
                    ),
                }),
            }
        })
    }
}
