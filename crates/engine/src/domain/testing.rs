// In-memory provider for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::error::{PlatformError, PlatformErrorKind, PlatformResult};
use super::provider::CodeSigningProvider;
use super::types::ValidationFlags;

struct MemoryBundle {
    requirement: Option<Vec<u8>>,
    intact: bool,
}

#[derive(Default)]
pub(crate) struct MemoryProvider {
    bundles: HashMap<PathBuf, MemoryBundle>,
    running: Option<PathBuf>,
    validity_checks: AtomicUsize,
    last_flags: Mutex<Option<ValidationFlags>>,
}

impl MemoryProvider {
    pub fn signed(&mut self, path: &str, requirement: &[u8]) {
        self.insert(path, Some(requirement.to_vec()), true);
    }

    pub fn tampered(&mut self, path: &str, requirement: &[u8]) {
        self.insert(path, Some(requirement.to_vec()), false);
    }

    pub fn unsigned(&mut self, path: &str) {
        self.insert(path, None, true);
    }

    pub fn running_from(&mut self, path: &str) {
        self.running = Some(PathBuf::from(path));
    }

    pub fn validity_checks(&self) -> usize {
        self.validity_checks.load(Ordering::SeqCst)
    }

    pub fn last_flags(&self) -> Option<ValidationFlags> {
        *self.last_flags.lock().unwrap()
    }

    fn insert(&mut self, path: &str, requirement: Option<Vec<u8>>, intact: bool) {
        self.bundles
            .insert(PathBuf::from(path), MemoryBundle { requirement, intact });
    }

    fn bundle(&self, path: &Path) -> PlatformResult<&MemoryBundle> {
        self.bundles.get(path).ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::NotFound, -67068, "code object not found")
        })
    }
}

fn unsigned() -> PlatformError {
    PlatformError::new(PlatformErrorKind::Unsigned, -67062, "code object is not signed at all")
}

impl CodeSigningProvider for MemoryProvider {
    type StaticCode = PathBuf;
    type Requirement = Vec<u8>;

    fn running_process_static_code(&self) -> PlatformResult<PathBuf> {
        self.running.clone().ok_or_else(unsigned)
    }

    fn static_code_at(&self, bundle: &Path) -> PlatformResult<PathBuf> {
        self.bundle(bundle)?;
        Ok(bundle.to_path_buf())
    }

    fn designated_requirement(&self, code: &PathBuf) -> PlatformResult<Vec<u8>> {
        self.bundle(code)?.requirement.clone().ok_or_else(unsigned)
    }

    fn requirement_data(&self, requirement: &Vec<u8>) -> PlatformResult<Vec<u8>> {
        Ok(requirement.clone())
    }

    fn requirement_from_data(&self, data: &[u8]) -> PlatformResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn check_validity(
        &self,
        code: &PathBuf,
        requirement: &Vec<u8>,
        flags: ValidationFlags,
    ) -> PlatformResult<()> {
        self.validity_checks.fetch_add(1, Ordering::SeqCst);
        *self.last_flags.lock().unwrap() = Some(flags);

        let bundle = self.bundle(code)?;
        let designated = bundle.requirement.as_ref().ok_or_else(unsigned)?;
        if !bundle.intact {
            return Err(PlatformError::new(
                PlatformErrorKind::InvalidSignature,
                -67061,
                "invalid signature (code or signature have been modified)",
            ));
        }
        if designated != requirement {
            return Err(PlatformError::new(
                PlatformErrorKind::RequirementFailed,
                -67050,
                "code failed to satisfy specified code requirement(s)",
            ));
        }
        Ok(())
    }
}
