// adapters/security_framework/codes.rs

//! Security.framework status codes and flag bits.
//!
//! Kept free of any framework linkage so the mapping is testable on every host.

use crate::domain::error::PlatformErrorKind;
use crate::domain::types::ValidationFlags;

pub type OSStatus = i32;
pub type SecCSFlags = u32;

pub const ERR_SEC_SUCCESS: OSStatus = 0;

pub const ERR_SEC_CS_STATIC_CODE_NOT_FOUND: OSStatus = -67068;
pub const ERR_SEC_CS_NO_SUCH_CODE: OSStatus = -67065;
pub const ERR_SEC_CS_UNSIGNED: OSStatus = -67062;
pub const ERR_SEC_CS_SIGNATURE_FAILED: OSStatus = -67061;
pub const ERR_SEC_CS_SIGNATURE_NOT_VERIFIABLE: OSStatus = -67060;
pub const ERR_SEC_CS_SIGNATURE_UNSUPPORTED: OSStatus = -67059;
pub const ERR_SEC_CS_BAD_DICTIONARY_FORMAT: OSStatus = -67058;
pub const ERR_SEC_CS_RESOURCES_NOT_SEALED: OSStatus = -67057;
pub const ERR_SEC_CS_RESOURCES_NOT_FOUND: OSStatus = -67056;
pub const ERR_SEC_CS_RESOURCES_INVALID: OSStatus = -67055;
pub const ERR_SEC_CS_BAD_RESOURCE: OSStatus = -67054;
pub const ERR_SEC_CS_RESOURCE_RULES_INVALID: OSStatus = -67053;
pub const ERR_SEC_CS_REQ_INVALID: OSStatus = -67052;
pub const ERR_SEC_CS_REQ_UNSUPPORTED: OSStatus = -67051;
pub const ERR_SEC_CS_REQ_FAILED: OSStatus = -67050;
pub const ERR_SEC_CS_BAD_OBJECT_FORMAT: OSStatus = -67049;
pub const ERR_SEC_CS_SIGNATURE_INVALID: OSStatus = -67045;
pub const ERR_SEC_CS_BAD_BUNDLE_FORMAT: OSStatus = -67028;
pub const ERR_SEC_CS_NO_MAIN_EXECUTABLE: OSStatus = -67029;
pub const ERR_SEC_CS_INFO_PLIST_FAILED: OSStatus = -67030;

pub const K_SEC_CS_DEFAULT_FLAGS: SecCSFlags = 0;
pub const K_SEC_CS_CHECK_ALL_ARCHITECTURES: SecCSFlags = 1 << 0;
pub const K_SEC_CS_CHECK_NESTED_CODE: SecCSFlags = 1 << 3;
pub const K_SEC_CS_STRICT_VALIDATE: SecCSFlags = 1 << 4;

pub fn platform_kind(status: OSStatus) -> PlatformErrorKind {
    match status {
        // A bundle without a main executable has no code to evaluate.
        ERR_SEC_CS_STATIC_CODE_NOT_FOUND
        | ERR_SEC_CS_NO_SUCH_CODE
        | ERR_SEC_CS_NO_MAIN_EXECUTABLE => PlatformErrorKind::NotFound,
        ERR_SEC_CS_UNSIGNED => PlatformErrorKind::Unsigned,
        ERR_SEC_CS_SIGNATURE_FAILED
        | ERR_SEC_CS_SIGNATURE_NOT_VERIFIABLE
        | ERR_SEC_CS_SIGNATURE_UNSUPPORTED
        | ERR_SEC_CS_SIGNATURE_INVALID
        | ERR_SEC_CS_RESOURCES_NOT_SEALED
        | ERR_SEC_CS_RESOURCES_NOT_FOUND
        | ERR_SEC_CS_RESOURCES_INVALID
        | ERR_SEC_CS_BAD_RESOURCE
        | ERR_SEC_CS_INFO_PLIST_FAILED => PlatformErrorKind::InvalidSignature,
        ERR_SEC_CS_REQ_FAILED => PlatformErrorKind::RequirementFailed,
        ERR_SEC_CS_REQ_INVALID
        | ERR_SEC_CS_REQ_UNSUPPORTED
        | ERR_SEC_CS_BAD_OBJECT_FORMAT
        | ERR_SEC_CS_BAD_BUNDLE_FORMAT
        | ERR_SEC_CS_BAD_DICTIONARY_FORMAT
        | ERR_SEC_CS_RESOURCE_RULES_INVALID => PlatformErrorKind::Malformed,
        _ => PlatformErrorKind::Other,
    }
}

pub fn cs_flags(flags: ValidationFlags) -> SecCSFlags {
    let mut bits = K_SEC_CS_DEFAULT_FLAGS;
    if flags.strict {
        bits |= K_SEC_CS_STRICT_VALIDATE;
    }
    if flags.check_nested_code {
        bits |= K_SEC_CS_CHECK_NESTED_CODE;
    }
    if flags.check_all_architectures {
        bits |= K_SEC_CS_CHECK_ALL_ARCHITECTURES;
    }
    bits
}
