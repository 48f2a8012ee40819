//! Scan engine.
//!
//! Walks each located root in order, builds a [`Resource`] per regular file and
//! keeps whatever the caller's mapper returns. Roots are processed one at a time;
//! an archive is open only while its own root is being walked.

use crate::error::{Result, ScanError};
use crate::locator::RootDescriptor;
use crate::path::{self, FILE_SCHEME};
use crate::resource::Resource;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};
use zip::ZipArchive;

/// Counters for one scan
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    /// Number of roots walked
    pub roots: usize,
    /// Regular files handed to the mapper
    pub discovered: usize,
    /// Mapper results kept
    pub kept: usize,
    /// Time taken for the scan
    pub duration: std::time::Duration,
}

pub struct ScanEngine<F> {
    mapper: F,
    stats: ScanStats,
}

impl<R, F> ScanEngine<F>
where
    F: FnMut(Resource) -> Option<R>,
{
    pub fn new(mapper: F) -> Self {
        Self {
            mapper,
            stats: ScanStats::default(),
        }
    }

    /// Counters of the most recent scan
    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    /// Walk every root in order, collecting the mapper's non-empty results.
    pub fn scan(&mut self, roots: &[RootDescriptor]) -> Result<Vec<R>> {
        let start = std::time::Instant::now();
        let mut stats = ScanStats::default();
        let mut collector = Vec::new();

        for root in roots {
            stats.roots += 1;
            let walked = match root {
                RootDescriptor::Directory { base, path } => {
                    self.scan_directory(base, path, &mut collector, &mut stats)
                }
                RootDescriptor::Archive {
                    base,
                    archive,
                    entry_prefix,
                } => self.scan_archive(base, archive, entry_prefix, &mut collector, &mut stats),
            };

            if let Err(e) = walked {
                warn!("Scan aborted at root {}: {}", root.base(), e);
                return Err(e);
            }
        }

        stats.duration = start.elapsed();
        info!(
            "Scan complete: {} roots, {} resources, {} kept in {:?}",
            stats.roots, stats.discovered, stats.kept, stats.duration
        );
        self.stats = stats;

        Ok(collector)
    }

    fn emit(&mut self, resource: Resource, collector: &mut Vec<R>, stats: &mut ScanStats) {
        debug!("found resource: {}", resource);
        stats.discovered += 1;
        if let Some(r) = (self.mapper)(resource) {
            stats.kept += 1;
            collector.push(r);
        }
    }

    fn scan_directory(
        &mut self,
        base: &str,
        root: &Path,
        collector: &mut Vec<R>,
        stats: &mut ScanStats,
    ) -> Result<()> {
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| ScanError::traversal(root.display().to_string(), e))?;
            if !is_regular_file(&entry) {
                continue;
            }

            let full = entry.path().to_string_lossy();
            let normalized = path::to_forward_slashes(&full);
            let Some(relative) = normalized.strip_prefix(base) else {
                return Err(ScanError::traversal(
                    root.display().to_string(),
                    format!("{full} is outside of {base}"),
                ));
            };

            let name = path::strip_leading_separator(relative);
            let resource = Resource::new(format!("{FILE_SCHEME}{full}"), name);
            self.emit(resource, collector, stats);
        }
        Ok(())
    }

    fn scan_archive(
        &mut self,
        base: &str,
        archive: &Path,
        entry_prefix: &str,
        collector: &mut Vec<R>,
        stats: &mut ScanStats,
    ) -> Result<()> {
        let root = ArchiveRoot::open(base, archive)?;
        let dir_prefix = format!("{entry_prefix}/");

        for i in 0..root.archive.len() {
            // Names come from the central directory; entry data is never opened
            let Some(raw_name) = root.archive.name_for_index(i) else {
                return Err(ScanError::traversal(
                    base,
                    format!("missing name for entry {i}"),
                ));
            };
            if raw_name.ends_with('/') {
                continue;
            }

            let name = path::strip_leading_separator(raw_name);
            if !entry_prefix.is_empty() && !name.starts_with(&dir_prefix) {
                continue;
            }

            let resource = Resource::new(base, name);
            self.emit(resource, collector, stats);
        }
        Ok(())
    }
}

/// Symbolic links count when they resolve to a file; links to directories are never followed.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// An archive held open for the walk of a single root, closed on drop.
struct ArchiveRoot {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ArchiveRoot {
    fn open(base: &str, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ScanError::root(base, e))?;
        let archive = ZipArchive::new(file).map_err(|e| ScanError::root(base, e))?;
        debug!("Opened archive {:?} ({} entries)", path, archive.len());
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }
}

impl Drop for ArchiveRoot {
    fn drop(&mut self) {
        debug!("Closed archive {:?}", self.path);
    }
}
