// crates/engine/src/domain/classify.rs

//! Folds native code-signing failures into the two domain error kinds.
//!
//! The kind depends on where the failure happened. Anything before a
//! validity check means the target could not be turned into signable code;
//! a failed validity check means it was evaluated and rejected. A target the
//! platform only discovers to be missing or unsigned during the validity
//! check still counts as "could not create static code".
//!
//! Bindings decide which native statuses count as missing code. The
//! Security.framework binding reports a bundle with no main executable as
//! [`PlatformErrorKind::NotFound`], so it is never a rejection. A bound
//! Info.plist that no longer matches its seal is reported as
//! [`PlatformErrorKind::InvalidSignature`] and does not pass.

use super::error::{
    CodeSignatureError, CodeTarget, ErrorKind, PlatformError, PlatformErrorKind,
};

/// The call site a platform failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateStaticCode,
    CopyDesignatedRequirement,
    SerializeRequirement,
    DecodeAnchor,
    CheckValidity,
}

pub fn kind_for(stage: Stage, platform: PlatformErrorKind) -> ErrorKind {
    match stage {
        Stage::CreateStaticCode
        | Stage::CopyDesignatedRequirement
        | Stage::SerializeRequirement => ErrorKind::CouldNotCreateStaticCode,
        Stage::DecodeAnchor | Stage::CheckValidity => match platform {
            PlatformErrorKind::NotFound | PlatformErrorKind::Unsigned => {
                ErrorKind::CouldNotCreateStaticCode
            }
            _ => ErrorKind::DidNotPass,
        },
    }
}

pub fn classify(stage: Stage, target: CodeTarget, source: PlatformError) -> CodeSignatureError {
    let kind = kind_for(stage, source.kind);
    log::debug!(
        "classified {:?} failure at {:?} for {} as {:?} (status {})",
        source.kind,
        stage,
        target,
        kind,
        source.status
    );
    match kind {
        ErrorKind::DidNotPass => CodeSignatureError::DidNotPass { target, source },
        ErrorKind::CouldNotCreateStaticCode => {
            CodeSignatureError::CouldNotCreateStaticCode { target, source }
        }
    }
}
