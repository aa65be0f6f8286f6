use std::str::FromStr;

use codesign_engine::{
    BundleLocation, CodeSignatureError, ErrorKind, LocationError, TrustAnchor, ValidationFlags,
    ERROR_DOMAIN,
};

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    DidNotPass { code: i64, status: i32, message: String },
    #[error("{message}")]
    CouldNotCreateStaticCode { code: i64, status: i32, message: String },
    #[error("{message}")]
    InvalidInput { message: String },
}

impl From<CodeSignatureError> for FfiError {
    fn from(e: CodeSignatureError) -> Self {
        let code = e.code();
        let status = e.diagnostic().status;
        let message = e.to_string();
        match e.kind() {
            ErrorKind::DidNotPass => FfiError::DidNotPass { code, status, message },
            ErrorKind::CouldNotCreateStaticCode => {
                FfiError::CouldNotCreateStaticCode { code, status, message }
            }
        }
    }
}

impl From<LocationError> for FfiError {
    fn from(e: LocationError) -> Self {
        FfiError::InvalidInput { message: e.to_string() }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiTrustAnchor {
    pub requirement_data: Vec<u8>,
}

impl From<TrustAnchor> for FfiTrustAnchor {
    fn from(v: TrustAnchor) -> Self {
        Self { requirement_data: v.into() }
    }
}

impl TryFrom<FfiTrustAnchor> for TrustAnchor {
    type Error = FfiError;
    fn try_from(v: FfiTrustAnchor) -> Result<Self, Self::Error> {
        TrustAnchor::try_from(v.requirement_data)
            .map_err(|e| FfiError::InvalidInput { message: e.to_string() })
    }
}

#[derive(uniffi::Record, Debug, Clone, Copy)]
pub struct FfiValidationFlags {
    pub strict: bool,
    pub check_nested_code: bool,
    pub check_all_architectures: bool,
}

impl From<FfiValidationFlags> for ValidationFlags {
    fn from(v: FfiValidationFlags) -> Self {
        ValidationFlags {
            strict: v.strict,
            check_nested_code: v.check_nested_code,
            check_all_architectures: v.check_all_architectures,
        }
    }
}

impl From<ValidationFlags> for FfiValidationFlags {
    fn from(v: ValidationFlags) -> Self {
        FfiValidationFlags {
            strict: v.strict,
            check_nested_code: v.check_nested_code,
            check_all_architectures: v.check_all_architectures,
        }
    }
}

#[cfg_attr(not(all(target_os = "macos", feature = "system")), allow(dead_code))]
fn parse_location(bundle_url: &str) -> Result<BundleLocation, FfiError> {
    BundleLocation::from_str(bundle_url).map_err(FfiError::from)
}

// ===== Exported functions =====

#[uniffi::export]
pub fn error_domain() -> String {
    ERROR_DOMAIN.to_string()
}

#[uniffi::export]
pub fn error_code_did_not_pass() -> i64 {
    ErrorKind::DidNotPass.code()
}

#[uniffi::export]
pub fn error_code_could_not_create_static_code() -> i64 {
    ErrorKind::CouldNotCreateStaticCode.code()
}

#[uniffi::export]
pub fn default_validation_flags() -> FfiValidationFlags {
    ValidationFlags::platform_default().into()
}

#[uniffi::export]
pub fn hardened_validation_flags() -> FfiValidationFlags {
    ValidationFlags::hardened().into()
}

#[cfg(all(target_os = "macos", feature = "system"))]
#[uniffi::export]
pub fn current_application_signature_ffi() -> Result<FfiTrustAnchor, FfiError> {
    codesign_engine::current_application_signature()
        .map(FfiTrustAnchor::from)
        .map_err(FfiError::from)
}

/// `bundle_url` may be a plain path or a `file://` URL.
#[cfg(all(target_os = "macos", feature = "system"))]
#[uniffi::export]
pub fn signature_for_bundle_ffi(bundle_url: String) -> Result<FfiTrustAnchor, FfiError> {
    let location = parse_location(&bundle_url)?;
    codesign_engine::signature_for_bundle(location)
        .map(FfiTrustAnchor::from)
        .map_err(FfiError::from)
}

/// Blocks the calling thread until Security.framework answers.
#[cfg(all(target_os = "macos", feature = "system"))]
#[uniffi::export]
pub fn verify_bundle_ffi(
    anchor: FfiTrustAnchor,
    bundle_url: String,
    flags: Option<FfiValidationFlags>,
) -> Result<(), FfiError> {
    let anchor: TrustAnchor = anchor.try_into()?;
    let location = parse_location(&bundle_url)?;
    let flags = flags.map(ValidationFlags::from).unwrap_or_default();
    codesign_engine::verifier(anchor)
        .with_flags(flags)
        .verify_bundle_at(location)
        .wait()
        .map_err(FfiError::from)
}

uniffi::setup_scaffolding!();
