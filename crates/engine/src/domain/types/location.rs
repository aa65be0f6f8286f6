use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use url::Url;

use crate::domain::error::{CodeTarget, LocationError};

/// Where a bundle directory lives on disk.
///
/// Accepts plain paths or `file://` URLs, which is how update feeds
/// usually hand out staged bundles:
/// - `"/Applications/Example.app"`
/// - `"file:///tmp/staging/Example.app"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleLocation(PathBuf);

impl BundleLocation {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn from_url(url: &Url) -> Result<Self, LocationError> {
        if url.scheme() != "file" {
            return Err(LocationError::UnsupportedScheme(url.scheme().to_string()));
        }
        let path = url
            .to_file_path()
            .map_err(|_| LocationError::NotALocalPath(url.to_string()))?;
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    pub(crate) fn target(&self) -> CodeTarget {
        CodeTarget::Bundle(self.0.clone())
    }
}

impl fmt::Display for BundleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for BundleLocation {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for BundleLocation {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for BundleLocation {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

impl From<&PathBuf> for BundleLocation {
    fn from(path: &PathBuf) -> Self {
        Self(path.clone())
    }
}

impl From<&BundleLocation> for BundleLocation {
    fn from(location: &BundleLocation) -> Self {
        location.clone()
    }
}

impl TryFrom<&Url> for BundleLocation {
    type Error = LocationError;

    fn try_from(url: &Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

impl TryFrom<Url> for BundleLocation {
    type Error = LocationError;

    fn try_from(url: Url) -> Result<Self, Self::Error> {
        Self::from_url(&url)
    }
}

impl FromStr for BundleLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(LocationError::Empty);
        }
        // `file:/abs` is a valid file URL; any other `scheme://` is rejected by scheme.
        if has_file_scheme(s) || s.contains("://") {
            let url = Url::parse(s)?;
            return Self::from_url(&url);
        }
        Ok(Self(PathBuf::from(s)))
    }
}

fn has_file_scheme(s: &str) -> bool {
    s.get(..5).is_some_and(|scheme| scheme.eq_ignore_ascii_case("file:"))
}
