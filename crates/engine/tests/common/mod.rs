#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use codesign_engine::{
    CodeSigningProvider, PlatformError, PlatformErrorKind, PlatformResult, ValidationFlags,
};

pub const EXAMPLE_REQUIREMENT: &str = concat!(
    "identifier \"com.example.App\" and anchor apple generic",
    " and certificate leaf[subject.OU] = \"EXAMPLE123\"",
);
pub const IMPOSTOR_REQUIREMENT: &str = concat!(
    "identifier \"com.example.App\" and anchor apple generic",
    " and certificate leaf[subject.OU] = \"IMPOSTOR9\"",
);

const EXECUTABLE: &str = "Contents/MacOS/Example";
const SIGNATURE_DIR: &str = "Contents/_CodeSignature";
const REQUIREMENT_FILE: &str = "requirement";
const SEAL_FILE: &str = "seal";

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create an unsigned bundle directory with a small executable.
pub fn make_bundle(dir: &Path, name: &str) -> PathBuf {
    let bundle = dir.join(name);
    let exe = bundle.join(EXECUTABLE);
    fs::create_dir_all(exe.parent().expect("executable parent")).expect("create bundle");
    fs::write(&exe, b"\xcf\xfa\xed\xfe example executable v1").expect("write executable");
    fs::create_dir_all(bundle.join("Contents/Resources")).expect("create resources");
    fs::write(bundle.join("Contents/Resources/Info.txt"), b"Example 1.0").expect("write resource");
    bundle
}

/// "Sign" a bundle: record its designated requirement and seal the executable.
pub fn sign_bundle(bundle: &Path, requirement: &str) {
    let sig_dir = bundle.join(SIGNATURE_DIR);
    fs::create_dir_all(&sig_dir).expect("create signature dir");
    fs::write(sig_dir.join(REQUIREMENT_FILE), requirement).expect("write requirement");
    let exe = fs::read(bundle.join(EXECUTABLE)).expect("read executable");
    fs::write(sig_dir.join(SEAL_FILE), exe).expect("write seal");
}

pub fn signed_bundle(dir: &Path, name: &str, requirement: &str) -> PathBuf {
    let bundle = make_bundle(dir, name);
    sign_bundle(&bundle, requirement);
    bundle
}

/// Flip bytes in the executable without re-signing.
pub fn tamper(bundle: &Path) {
    let exe = bundle.join(EXECUTABLE);
    let mut bytes = fs::read(&exe).expect("read executable");
    if let Some(last) = bytes.last_mut() {
        *last ^= 0xff;
    }
    bytes.extend_from_slice(b" injected");
    fs::write(&exe, bytes).expect("write executable");
}

pub fn copy_bundle(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).expect("create destination");
    for entry in fs::read_dir(src).expect("read source dir") {
        let entry = entry.expect("dir entry");
        let target = dst.join(entry.file_name());
        let file_type = entry.file_type().expect("file type");
        if file_type.is_dir() {
            copy_bundle(&entry.path(), &target);
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path()).expect("read link");
            std::os::unix::fs::symlink(link, &target).expect("copy link");
        } else {
            fs::copy(entry.path(), &target).expect("copy file");
        }
    }
}

/// Fake provider over bundles written by [`sign_bundle`].
#[derive(Default)]
pub struct DiskProvider {
    running: Option<PathBuf>,
    static_code_calls: AtomicUsize,
    validity_checks: AtomicUsize,
    last_flags: Mutex<Option<ValidationFlags>>,
}

#[derive(Debug)]
pub struct DiskCode {
    root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskRequirement(pub Vec<u8>);

impl DiskProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running_from(bundle: &Path) -> Self {
        Self {
            running: Some(bundle.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn static_code_calls(&self) -> usize {
        self.static_code_calls.load(Ordering::SeqCst)
    }

    pub fn validity_checks(&self) -> usize {
        self.validity_checks.load(Ordering::SeqCst)
    }

    pub fn last_flags(&self) -> Option<ValidationFlags> {
        *self.last_flags.lock().expect("flags lock")
    }
}

fn unsigned() -> PlatformError {
    PlatformError::new(PlatformErrorKind::Unsigned, -67062, "code object is not signed at all")
}

impl CodeSigningProvider for DiskProvider {
    type StaticCode = DiskCode;
    type Requirement = DiskRequirement;

    fn running_process_static_code(&self) -> PlatformResult<DiskCode> {
        match &self.running {
            Some(root) => self.static_code_at(root),
            None => Err(unsigned()),
        }
    }

    fn static_code_at(&self, bundle: &Path) -> PlatformResult<DiskCode> {
        self.static_code_calls.fetch_add(1, Ordering::SeqCst);
        if !bundle.is_dir() {
            return Err(PlatformError::new(
                PlatformErrorKind::NotFound,
                -67068,
                format!("no code at {}", bundle.display()),
            ));
        }
        Ok(DiskCode {
            root: bundle.to_path_buf(),
        })
    }

    fn designated_requirement(&self, code: &DiskCode) -> PlatformResult<DiskRequirement> {
        fs::read(code.root.join(SIGNATURE_DIR).join(REQUIREMENT_FILE))
            .map(DiskRequirement)
            .map_err(|_| unsigned())
    }

    fn requirement_data(&self, requirement: &DiskRequirement) -> PlatformResult<Vec<u8>> {
        Ok(requirement.0.clone())
    }

    fn requirement_from_data(&self, data: &[u8]) -> PlatformResult<DiskRequirement> {
        std::str::from_utf8(data).map_err(|_| {
            PlatformError::new(
                PlatformErrorKind::Malformed,
                -67052,
                "invalid or corrupted code requirement",
            )
        })?;
        Ok(DiskRequirement(data.to_vec()))
    }

    fn check_validity(
        &self,
        code: &DiskCode,
        requirement: &DiskRequirement,
        flags: ValidationFlags,
    ) -> PlatformResult<()> {
        self.validity_checks.fetch_add(1, Ordering::SeqCst);
        *self.last_flags.lock().expect("flags lock") = Some(flags);

        let designated = self.designated_requirement(code)?;
        let seal = fs::read(code.root.join(SIGNATURE_DIR).join(SEAL_FILE)).map_err(|_| unsigned())?;
        let exe = fs::read(code.root.join(EXECUTABLE)).map_err(|_| {
            PlatformError::new(PlatformErrorKind::Malformed, -67028, "bundle format unrecognized")
        })?;

        if seal != exe {
            return Err(PlatformError::new(
                PlatformErrorKind::InvalidSignature,
                -67061,
                "invalid signature (code or signature have been modified)",
            ));
        }
        if &designated != requirement {
            return Err(PlatformError::new(
                PlatformErrorKind::RequirementFailed,
                -67050,
                "code failed to satisfy specified code requirement(s)",
            ));
        }
        Ok(())
    }

    fn requirement_text(&self, requirement: &DiskRequirement) -> Option<String> {
        String::from_utf8(requirement.0.clone()).ok()
    }
}
