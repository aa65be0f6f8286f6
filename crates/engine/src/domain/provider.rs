// crates/engine/src/domain/provider.rs

use std::path::Path;

use super::error::PlatformResult;
use super::types::ValidationFlags;

/// Narrow capability over the host's code-signing API.
///
/// Handles are opened per call and never shared between verifications, so
/// they need not be `Send`. The provider itself is shared and must be.
pub trait CodeSigningProvider {
    /// Platform representation of signed code on disk.
    type StaticCode;
    /// Live platform requirement object.
    type Requirement;

    fn running_process_static_code(&self) -> PlatformResult<Self::StaticCode>;

    fn static_code_at(&self, bundle: &Path) -> PlatformResult<Self::StaticCode>;

    fn designated_requirement(&self, code: &Self::StaticCode) -> PlatformResult<Self::Requirement>;

    fn requirement_data(&self, requirement: &Self::Requirement) -> PlatformResult<Vec<u8>>;

    fn requirement_from_data(&self, data: &[u8]) -> PlatformResult<Self::Requirement>;

    /// Validate the code's signature and check it against `requirement`.
    fn check_validity(
        &self,
        code: &Self::StaticCode,
        requirement: &Self::Requirement,
        flags: ValidationFlags,
    ) -> PlatformResult<()>;

    /// Human-readable requirement, for diagnostics only.
    fn requirement_text(&self, _requirement: &Self::Requirement) -> Option<String> {
        None
    }
}
