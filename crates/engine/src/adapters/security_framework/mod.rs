// adapters/security_framework/mod.rs

//! macOS Security.framework binding.

pub mod codes;

#[cfg(all(target_os = "macos", feature = "system"))]
mod sys;
#[cfg(all(target_os = "macos", feature = "system"))]
mod provider;

#[cfg(all(target_os = "macos", feature = "system"))]
pub use provider::{SecRequirement, SecStaticCode, SecurityFramework};
