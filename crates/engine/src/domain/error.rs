// crates/engine/src/domain/error.rs
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The domain every code-signature error is reported under.
pub const ERROR_DOMAIN: &str = "codesign_engine.CodeSignatureError";

/// The two ways a signature check can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target was evaluated and rejected.
    DidNotPass,
    /// The target could not be represented as signable code at all.
    CouldNotCreateStaticCode,
}

impl ErrorKind {
    pub const fn code(self) -> i64 {
        match self {
            ErrorKind::DidNotPass => -1,
            ErrorKind::CouldNotCreateStaticCode => -2,
        }
    }

    pub const fn domain(self) -> &'static str {
        ERROR_DOMAIN
    }
}

/// What a failing call was examining.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodeTarget {
    RunningProcess,
    Bundle(PathBuf),
    /// A requirement object handed in directly by the caller.
    SuppliedRequirement,
}

impl fmt::Display for CodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeTarget::RunningProcess => f.write_str("the running process"),
            CodeTarget::SuppliedRequirement => f.write_str("the supplied requirement"),
            CodeTarget::Bundle(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Portable category a platform binding assigns to each native failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformErrorKind {
    NotFound,
    Unsigned,
    InvalidSignature,
    RequirementFailed,
    Malformed,
    Other,
}

/// A failure reported by the host code-signing API, with its native status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status})")]
pub struct PlatformError {
    pub kind: PlatformErrorKind,
    pub status: i32,
    pub message: String,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, status: i32, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;

#[derive(Debug, Error)]
pub enum CodeSignatureError {
    #[error("code signature of {target} did not pass validation: {source}")]
    DidNotPass {
        target: CodeTarget,
        #[source]
        source: PlatformError,
    },

    #[error("could not create static code for {target}: {source}")]
    CouldNotCreateStaticCode {
        target: CodeTarget,
        #[source]
        source: PlatformError,
    },
}

impl CodeSignatureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodeSignatureError::DidNotPass { .. } => ErrorKind::DidNotPass,
            CodeSignatureError::CouldNotCreateStaticCode { .. } => {
                ErrorKind::CouldNotCreateStaticCode
            }
        }
    }

    pub fn code(&self) -> i64 {
        self.kind().code()
    }

    pub fn domain(&self) -> &'static str {
        ERROR_DOMAIN
    }

    pub fn target(&self) -> &CodeTarget {
        match self {
            CodeSignatureError::DidNotPass { target, .. }
            | CodeSignatureError::CouldNotCreateStaticCode { target, .. } => target,
        }
    }

    /// The underlying platform diagnostic.
    pub fn diagnostic(&self) -> &PlatformError {
        match self {
            CodeSignatureError::DidNotPass { source, .. }
            | CodeSignatureError::CouldNotCreateStaticCode { source, .. } => source,
        }
    }
}

pub type SignatureResult<T> = Result<T, CodeSignatureError>;

/// Requirement bytes handed to a trust anchor were empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("requirement data must not be empty")]
pub struct EmptyRequirementData;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("bundle URL must use the file scheme, got '{0}'")]
    UnsupportedScheme(String),

    #[error("bundle URL does not name a local path: {0}")]
    NotALocalPath(String),

    #[error("bundle location is empty")]
    Empty,

    #[error(transparent)]
    Url(#[from] url::ParseError),
}
