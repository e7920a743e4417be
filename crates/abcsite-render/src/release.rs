//! Release artifacts and their download size labels.
//!
//! Sizes are looked up when a page renders. A missing or unreadable artifact
//! is an expected state (the installer may not be uploaded yet): the lookup
//! yields `None` and the page renders without a size label.

use std::fs;
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reads release artifact sizes.
pub trait ArtifactSizes: Send + Sync {
    /// Size in bytes of the artifact at `path`, or `None` if it can't be read.
    fn size(&self, path: &str) -> Option<u64>;
}

/// Artifact sizes from files under a site root directory.
#[derive(Clone, Debug)]
pub struct FsArtifacts {
    root: PathBuf,
}

impl FsArtifacts {
    /// Create a lookup rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactSizes for FsArtifacts {
    fn size(&self, path: &str) -> Option<u64> {
        let full_path = self.root.join(path);
        match fs::metadata(&full_path) {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            Ok(_) => {
                tracing::debug!(path = %full_path.display(), "Release artifact is not a file");
                None
            }
            Err(e) => {
                tracing::debug!(path = %full_path.display(), error = %e, "Release artifact unavailable");
                None
            }
        }
    }
}

/// Format a byte count as megabytes rounded to one decimal place.
///
/// # Examples
///
/// ```
/// use abcsite_render::format_size;
///
/// assert_eq!(format_size(1_572_864), "1.5MB");
/// assert_eq!(format_size(0), "0.0MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mb = bytes as f64 / BYTES_PER_MB;
    // f64::round rounds half away from zero
    let rounded = (mb * 10.0).round() / 10.0;
    format!("{rounded:.1}MB")
}

/// A published release of the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    /// Version string (e.g. "1.3.0").
    pub version: String,
    /// Installer package path, relative to the site root.
    pub installer_path: String,
    /// Archive package path, relative to the site root.
    pub archive_path: String,
}

impl Release {
    /// Release with the standard artifact layout under `installer/`.
    #[must_use]
    pub fn for_version(version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            installer_path: format!("installer/AbcPlayer_{version}.msi"),
            archive_path: format!("installer/AbcPlayer_{version}.zip"),
            version,
        }
    }

    /// Resolve download links and size labels.
    #[must_use]
    pub fn downloads(&self, sizes: &dyn ArtifactSizes) -> ReleaseDownloads {
        ReleaseDownloads {
            installer: Download::resolve(&self.installer_path, sizes),
            archive: Download::resolve(&self.archive_path, sizes),
        }
    }
}

/// A downloadable artifact with its computed size label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    /// Path relative to the site root.
    pub path: String,
    /// Size label such as "1.5MB", `None` if the file is unavailable.
    pub size_label: Option<String>,
}

impl Download {
    fn resolve(path: &str, sizes: &dyn ArtifactSizes) -> Self {
        Self {
            path: path.to_owned(),
            size_label: sizes.size(path).map(format_size),
        }
    }

    /// File name component of the path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Download links for both packages of a release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseDownloads {
    /// Windows installer.
    pub installer: Download,
    /// Plain zip archive.
    pub archive: Download,
}
