// adapters/security_framework/sys.rs

//! Raw Security.framework declarations for the code-signing calls we use.

#![allow(non_camel_case_types)]

use std::os::raw::c_void;

use core_foundation::base::CFTypeID;
use core_foundation::data::CFDataRef;
use core_foundation::error::CFErrorRef;
use core_foundation::string::CFStringRef;
use core_foundation::url::CFURLRef;

use super::codes::{OSStatus, SecCSFlags};

#[repr(C)]
pub struct __SecCode(c_void);
pub type SecCodeRef = *mut __SecCode;
pub type SecStaticCodeRef = *mut __SecCode;

#[repr(C)]
pub struct __SecRequirement(c_void);
pub type SecRequirementRef = *mut __SecRequirement;

#[link(name = "Security", kind = "framework")]
extern "C" {
    pub fn SecCodeGetTypeID() -> CFTypeID;
    pub fn SecStaticCodeGetTypeID() -> CFTypeID;
    pub fn SecRequirementGetTypeID() -> CFTypeID;

    pub fn SecCodeCopySelf(flags: SecCSFlags, self_: *mut SecCodeRef) -> OSStatus;
    pub fn SecCodeCopyStaticCode(
        code: SecCodeRef,
        flags: SecCSFlags,
        static_code: *mut SecStaticCodeRef,
    ) -> OSStatus;
    pub fn SecStaticCodeCreateWithPath(
        path: CFURLRef,
        flags: SecCSFlags,
        static_code: *mut SecStaticCodeRef,
    ) -> OSStatus;
    pub fn SecCodeCopyDesignatedRequirement(
        code: SecStaticCodeRef,
        flags: SecCSFlags,
        requirement: *mut SecRequirementRef,
    ) -> OSStatus;

    pub fn SecRequirementCopyData(
        requirement: SecRequirementRef,
        flags: SecCSFlags,
        data: *mut CFDataRef,
    ) -> OSStatus;
    pub fn SecRequirementCreateWithData(
        data: CFDataRef,
        flags: SecCSFlags,
        requirement: *mut SecRequirementRef,
    ) -> OSStatus;
    pub fn SecRequirementCopyString(
        requirement: SecRequirementRef,
        flags: SecCSFlags,
        text: *mut CFStringRef,
    ) -> OSStatus;

    pub fn SecStaticCodeCheckValidityWithErrors(
        static_code: SecStaticCodeRef,
        flags: SecCSFlags,
        requirement: SecRequirementRef,
        errors: *mut CFErrorRef,
    ) -> OSStatus;

    pub fn SecCopyErrorMessageString(status: OSStatus, reserved: *mut c_void) -> CFStringRef;
}
