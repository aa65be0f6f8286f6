// crates/engine/src/domain/anchor.rs

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::classify::{classify, Stage};
use super::error::{
    CodeTarget, EmptyRequirementData, PlatformError, PlatformErrorKind, SignatureResult,
};
use super::provider::CodeSigningProvider;

/// Serialized designated requirement that candidate bundles are checked against.
///
/// Immutable and never empty. Equality and hashing are over the bytes, so
/// two anchors with the same bytes verify identically. Serializes as the raw
/// byte sequence; the engine itself never persists anchors.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct TrustAnchor {
    requirement_data: Arc<[u8]>,
}

impl TrustAnchor {
    /// Serialize a live platform requirement into an anchor.
    pub fn from_requirement<P: CodeSigningProvider>(
        provider: &P,
        requirement: &P::Requirement,
    ) -> SignatureResult<Self> {
        Self::serialize(provider, requirement, CodeTarget::SuppliedRequirement)
    }

    pub(crate) fn serialize<P: CodeSigningProvider>(
        provider: &P,
        requirement: &P::Requirement,
        target: CodeTarget,
    ) -> SignatureResult<Self> {
        let data = provider
            .requirement_data(requirement)
            .map_err(|e| classify(Stage::SerializeRequirement, target.clone(), e))?;
        Self::try_from(data).map_err(|_| {
            classify(
                Stage::SerializeRequirement,
                target,
                PlatformError::new(
                    PlatformErrorKind::Malformed,
                    0,
                    "platform returned an empty requirement",
                ),
            )
        })
    }

    pub fn requirement_data(&self) -> &[u8] {
        &self.requirement_data
    }

    pub fn len(&self) -> usize {
        self.requirement_data.len()
    }

    /// Always false for a constructed anchor.
    pub fn is_empty(&self) -> bool {
        self.requirement_data.is_empty()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.requirement_data.to_vec()
    }
}

impl fmt::Debug for TrustAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustAnchor")
            .field("requirement_data_len", &self.requirement_data.len())
            .finish()
    }
}

impl AsRef<[u8]> for TrustAnchor {
    fn as_ref(&self) -> &[u8] {
        &self.requirement_data
    }
}

impl TryFrom<Vec<u8>> for TrustAnchor {
    type Error = EmptyRequirementData;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        if data.is_empty() {
            return Err(EmptyRequirementData);
        }
        Ok(Self {
            requirement_data: data.into(),
        })
    }
}

impl TryFrom<&[u8]> for TrustAnchor {
    type Error = EmptyRequirementData;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(data.to_vec())
    }
}

impl From<TrustAnchor> for Vec<u8> {
    fn from(anchor: TrustAnchor) -> Self {
        anchor.requirement_data.to_vec()
    }
}
