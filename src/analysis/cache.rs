//! Per-file feature cache
//!
//! Extraction is a pure function of the file contents and the configuration,
//! so features are memoized by file identity: canonical path, size and
//! modification time. A file rewritten in place gets a new key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::error::AnalysisError;
use crate::features::pitch::{PitchExtractor, PitchFeatures};

/// Identity of a file on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

impl FileKey {
    /// Build the key for a path
    ///
    /// # Errors
    ///
    /// A missing or unreadable file is a `DecodingError`, the same error the
    /// decoder would report.
    pub fn for_path(path: &Path) -> Result<Self, AnalysisError> {
        let canonical = path.canonicalize().map_err(|e| {
            AnalysisError::DecodingError(format!("Cannot open {}: {}", path.display(), e))
        })?;
        let meta = std::fs::metadata(&canonical).map_err(|e| {
            AnalysisError::DecodingError(format!("Cannot stat {}: {}", path.display(), e))
        })?;

        Ok(Self {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoized pitch features keyed by [`FileKey`]
///
/// Holds at most one entry per canonical path: a file rewritten in place
/// replaces its stale entry. Distinct files are never evicted, so memory grows
/// with the number of files seen; call [`FeatureCache::clear`] or drop the
/// owning `Comparator` to release it.
#[derive(Debug, Default)]
pub struct FeatureCache {
    entries: HashMap<FileKey, Arc<PitchFeatures>>,
    extractions: usize,
}

impl FeatureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached features for `path`, extracting them on first use
    pub fn get_or_extract(
        &mut self,
        extractor: &PitchExtractor,
        path: &Path,
    ) -> Result<Arc<PitchFeatures>, AnalysisError> {
        let key = FileKey::for_path(path)?;

        if let Some(features) = self.entries.get(&key) {
            log::debug!("Feature cache hit: {}", path.display());
            return Ok(Arc::clone(features));
        }

        let features = Arc::new(extractor.extract_pitch_features(path)?);
        self.extractions += 1;

        let before = self.entries.len();
        self.entries.retain(|cached, _| cached.path != key.path);
        if self.entries.len() < before {
            log::debug!("Replacing stale cache entry: {}", path.display());
        }
        self.entries.insert(key, Arc::clone(&features));
        Ok(features)
    }

    /// Number of cached files
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of extractions actually performed (cache misses)
    pub fn extractions(&self) -> usize {
        self.extractions
    }

    /// Drop every cached entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
