// crates/engine/src/domain/extract.rs

use std::sync::Arc;

use super::anchor::TrustAnchor;
use super::classify::{classify, Stage};
use super::error::{CodeTarget, SignatureResult};
use super::provider::CodeSigningProvider;
use super::types::BundleLocation;

/// Derives trust anchors from the running process or from bundles on disk.
pub struct RequirementExtractor<P> {
    provider: Arc<P>,
}

impl<P> Clone for RequirementExtractor<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: CodeSigningProvider> RequirementExtractor<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Designated requirement of the currently executing application.
    pub fn current_application_signature(&self) -> SignatureResult<TrustAnchor> {
        let target = CodeTarget::RunningProcess;
        let code = self
            .provider
            .running_process_static_code()
            .map_err(|e| classify(Stage::CreateStaticCode, target.clone(), e))?;
        self.extract(&code, target)
    }

    /// Designated requirement of the bundle at `bundle`, which must be signed.
    pub fn signature_for_bundle(
        &self,
        bundle: impl Into<BundleLocation>,
    ) -> SignatureResult<TrustAnchor> {
        let bundle = bundle.into();
        let target = bundle.target();
        let code = self
            .provider
            .static_code_at(bundle.path())
            .map_err(|e| classify(Stage::CreateStaticCode, target.clone(), e))?;
        self.extract(&code, target)
    }

    fn extract(&self, code: &P::StaticCode, target: CodeTarget) -> SignatureResult<TrustAnchor> {
        let requirement = self
            .provider
            .designated_requirement(code)
            .map_err(|e| classify(Stage::CopyDesignatedRequirement, target.clone(), e))?;

        if let Some(text) = self.provider.requirement_text(&requirement) {
            log::debug!("designated requirement of {}: {}", target, text);
        }

        let anchor = TrustAnchor::serialize(&*self.provider, &requirement, target.clone())?;
        log::info!(
            "established trust anchor from {} ({} bytes)",
            target,
            anchor.len()
        );
        Ok(anchor)
    }
}
