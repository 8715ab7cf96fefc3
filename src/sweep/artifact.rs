//! Artifact Module
//!
//! Defines the expiry rules for individual files in the managed directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::sweep::ARTIFACT_EXTENSION;

// == Artifact ==
/// A single candidate file in the managed directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Full path of the file
    pub path: PathBuf,
    /// Last modification time reported by the filesystem
    pub modified: SystemTime,
}

impl Artifact {
    // == Constructor ==
    /// Creates an artifact from a path and its modification time.
    pub fn new(path: PathBuf, modified: SystemTime) -> Self {
        Self { path, modified }
    }

    // == Age ==
    /// Returns the age of the artifact relative to `now`.
    ///
    /// A modification time in the future yields an age of zero.
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.modified).unwrap_or(Duration::ZERO)
    }

    // == Is Expired ==
    /// Checks whether the artifact has outlived `ttl`.
    ///
    /// Boundary condition: an artifact is expired only when its age is
    /// strictly greater than the TTL. A file whose age equals the TTL
    /// exactly is kept.
    ///
    /// # Returns
    /// - `true` if `age > ttl`
    /// - `false` otherwise, including when the modification time is in the future
    pub fn is_expired(&self, now: SystemTime, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

// == Extension Check ==
/// Returns true if the file name ends with the recognized artifact extension.
///
/// Matching is case-sensitive; `.PDF` is not recognized. A file named
/// exactly `.pdf` counts as an artifact, and names that are not valid UTF-8
/// never match.
pub fn has_artifact_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, extension)| extension == ARTIFACT_EXTENSION)
        .unwrap_or(false)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_extension_pdf() {
        assert!(has_artifact_extension(Path::new("/tmp/pdfs/letter.pdf")));
    }

    #[test]
    fn test_artifact_extension_other() {
        assert!(!has_artifact_extension(Path::new("/tmp/pdfs/readme.txt")));
        assert!(!has_artifact_extension(Path::new("/tmp/pdfs/template.html")));
        assert!(!has_artifact_extension(Path::new("/tmp/pdfs/no_extension")));
        assert!(!has_artifact_extension(Path::new("/tmp/pdfs/letter.pdf.bak")));
    }

    #[test]
    fn test_artifact_extension_case_sensitive() {
        assert!(!has_artifact_extension(Path::new("/tmp/pdfs/LETTER.PDF")));
    }

    #[test]
    fn test_artifact_extension_bare_dotfile() {
        // The whole name is ".pdf": no stem, but it still ends with the extension
        assert!(has_artifact_extension(Path::new("/tmp/pdfs/.pdf")));
    }

    #[test]
    fn test_age_of_aged_artifact() {
        let now = SystemTime::now();
        let artifact = Artifact::new("a.pdf".into(), now - Duration::from_secs(120));

        assert_eq!(artifact.age(now), Duration::from_secs(120));
    }

    #[test]
    fn test_age_of_future_artifact_is_zero() {
        let now = SystemTime::now();
        let artifact = Artifact::new("a.pdf".into(), now + Duration::from_secs(60));

        assert_eq!(artifact.age(now), Duration::ZERO);
    }

    #[test]
    fn test_expired_past_ttl() {
        let now = SystemTime::now();
        let ttl = Duration::from_secs(900);
        let artifact = Artifact::new("a.pdf".into(), now - Duration::from_secs(901));

        assert!(artifact.is_expired(now, ttl));
    }

    #[test]
    fn test_fresh_artifact_not_expired() {
        let now = SystemTime::now();
        let ttl = Duration::from_secs(900);
        let artifact = Artifact::new("a.pdf".into(), now - Duration::from_secs(60));

        assert!(!artifact.is_expired(now, ttl));
    }

    #[test]
    fn test_expiry_boundary_condition() {
        // Age exactly equal to the TTL stays on the kept side of the boundary
        let now = SystemTime::now();
        let ttl = Duration::from_secs(900);
        let artifact = Artifact::new("a.pdf".into(), now - ttl);

        assert!(
            !artifact.is_expired(now, ttl),
            "Artifact at the TTL boundary should be kept"
        );
    }

    #[test]
    fn test_expiry_with_zero_ttl() {
        let now = SystemTime::now();
        let fresh = Artifact::new("a.pdf".into(), now);
        let aged = Artifact::new("b.pdf".into(), now - Duration::from_secs(1));

        assert!(!fresh.is_expired(now, Duration::ZERO));
        assert!(aged.is_expired(now, Duration::ZERO));
    }

    #[test]
    fn test_future_artifact_never_expired() {
        let now = SystemTime::now();
        let artifact = Artifact::new("a.pdf".into(), now + Duration::from_secs(3600));

        assert!(!artifact.is_expired(now, Duration::ZERO));
    }
}
