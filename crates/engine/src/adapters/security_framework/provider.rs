// adapters/security_framework/provider.rs

use std::path::Path;
use std::ptr;

use core_foundation::base::TCFType;
use core_foundation::data::{CFData, CFDataRef};
use core_foundation::error::{CFError, CFErrorRef};
use core_foundation::string::{CFString, CFStringRef};
use core_foundation::url::CFURL;
use core_foundation::{declare_TCFType, impl_TCFType};

use super::codes::{
    cs_flags, platform_kind, OSStatus, ERR_SEC_CS_STATIC_CODE_NOT_FOUND, ERR_SEC_SUCCESS,
    K_SEC_CS_DEFAULT_FLAGS,
};
use super::sys::*;
use crate::domain::error::{PlatformError, PlatformErrorKind, PlatformResult};
use crate::domain::provider::CodeSigningProvider;
use crate::domain::types::ValidationFlags;

declare_TCFType! {
    /// Code running on this host.
    SecCode, SecCodeRef
}
impl_TCFType!(SecCode, SecCodeRef, SecCodeGetTypeID);

declare_TCFType! {
    /// Signed code on disk.
    SecStaticCode, SecStaticCodeRef
}
impl_TCFType!(SecStaticCode, SecStaticCodeRef, SecStaticCodeGetTypeID);

declare_TCFType! {
    /// A compiled code requirement.
    SecRequirement, SecRequirementRef
}
impl_TCFType!(SecRequirement, SecRequirementRef, SecRequirementGetTypeID);

fn check(status: OSStatus) -> PlatformResult<()> {
    if status == ERR_SEC_SUCCESS {
        Ok(())
    } else {
        Err(PlatformError::new(platform_kind(status), status, error_message(status)))
    }
}

fn error_message(status: OSStatus) -> String {
    let text = unsafe { SecCopyErrorMessageString(status, ptr::null_mut()) };
    if text.is_null() {
        return format!("OSStatus {status}");
    }
    unsafe { CFString::wrap_under_create_rule(text) }.to_string()
}

/// Code-signing provider backed by the host's Security.framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityFramework;

impl CodeSigningProvider for SecurityFramework {
    type StaticCode = SecStaticCode;
    type Requirement = SecRequirement;

    fn running_process_static_code(&self) -> PlatformResult<SecStaticCode> {
        let mut code: SecCodeRef = ptr::null_mut();
        check(unsafe { SecCodeCopySelf(K_SEC_CS_DEFAULT_FLAGS, &mut code) })?;
        let code = unsafe { SecCode::wrap_under_create_rule(code) };

        let mut static_code: SecStaticCodeRef = ptr::null_mut();
        check(unsafe {
            SecCodeCopyStaticCode(
                code.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut static_code,
            )
        })?;
        Ok(unsafe { SecStaticCode::wrap_under_create_rule(static_code) })
    }

    fn static_code_at(&self, bundle: &Path) -> PlatformResult<SecStaticCode> {
        let url = CFURL::from_path(bundle, bundle.is_dir()).ok_or_else(|| {
            PlatformError::new(
                PlatformErrorKind::NotFound,
                ERR_SEC_CS_STATIC_CODE_NOT_FOUND,
                format!("{} cannot be expressed as a file URL", bundle.display()),
            )
        })?;

        let mut static_code: SecStaticCodeRef = ptr::null_mut();
        check(unsafe {
            SecStaticCodeCreateWithPath(
                url.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut static_code,
            )
        })?;
        Ok(unsafe { SecStaticCode::wrap_under_create_rule(static_code) })
    }

    fn designated_requirement(&self, code: &SecStaticCode) -> PlatformResult<SecRequirement> {
        let mut requirement: SecRequirementRef = ptr::null_mut();
        check(unsafe {
            SecCodeCopyDesignatedRequirement(
                code.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut requirement,
            )
        })?;
        Ok(unsafe { SecRequirement::wrap_under_create_rule(requirement) })
    }

    fn requirement_data(&self, requirement: &SecRequirement) -> PlatformResult<Vec<u8>> {
        let mut data: CFDataRef = ptr::null();
        check(unsafe {
            SecRequirementCopyData(
                requirement.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut data,
            )
        })?;
        let data = unsafe { CFData::wrap_under_create_rule(data) };
        Ok(data.bytes().to_vec())
    }

    fn requirement_from_data(&self, data: &[u8]) -> PlatformResult<SecRequirement> {
        let data = CFData::from_buffer(data);
        let mut requirement: SecRequirementRef = ptr::null_mut();
        check(unsafe {
            SecRequirementCreateWithData(
                data.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut requirement,
            )
        })?;
        Ok(unsafe { SecRequirement::wrap_under_create_rule(requirement) })
    }

    fn check_validity(
        &self,
        code: &SecStaticCode,
        requirement: &SecRequirement,
        flags: ValidationFlags,
    ) -> PlatformResult<()> {
        let mut errors: CFErrorRef = ptr::null_mut();
        let status = unsafe {
            SecStaticCodeCheckValidityWithErrors(
                code.as_concrete_TypeRef(),
                cs_flags(flags),
                requirement.as_concrete_TypeRef(),
                &mut errors,
            )
        };
        // Take ownership before anything else so the CFError is always released.
        let detail =
            (!errors.is_null()).then(|| unsafe { CFError::wrap_under_create_rule(errors) });

        if status == ERR_SEC_SUCCESS {
            return Ok(());
        }
        let message = match detail {
            Some(err) => err.description().to_string(),
            None => error_message(status),
        };
        Err(PlatformError::new(platform_kind(status), status, message))
    }

    fn requirement_text(&self, requirement: &SecRequirement) -> Option<String> {
        let mut text: CFStringRef = ptr::null();
        let status = unsafe {
            SecRequirementCopyString(
                requirement.as_concrete_TypeRef(),
                K_SEC_CS_DEFAULT_FLAGS,
                &mut text,
            )
        };
        if status != ERR_SEC_SUCCESS || text.is_null() {
            return None;
        }
        Some(unsafe { CFString::wrap_under_create_rule(text) }.to_string())
    }
}
