//! Root location.
//!
//! A [`RootSource`] answers "which roots expose this package path?" with raw
//! URL-shaped addresses. [`RootLocator`] turns each address into a [`RootDescriptor`]:
//! a directory on disk, or an archive plus the entry prefix to walk inside it.

use crate::config::ClasspathConfig;
use crate::error::{Result, ScanError};
use crate::path::{self, ARCHIVE_SEPARATOR, FILE_SCHEME, JAR_SCHEME};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;

/// Search-path capability: lists raw root addresses exposing a package path.
pub trait RootSource {
    /// Ordered root addresses for `package_path` (e.g. `com/example`)
    fn list_roots(&self, package_path: &str) -> Result<Vec<String>>;

    /// Source name (for logging/debugging)
    fn name(&self) -> &str;
}

// ==================== Static Roots ====================

/// Fixed list of addresses, returned verbatim for any package path
#[derive(Debug, Clone, Default)]
pub struct StaticRoots {
    roots: Vec<String>,
}

impl StaticRoots {
    pub fn new(roots: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

impl RootSource for StaticRoots {
    fn list_roots(&self, _package_path: &str) -> Result<Vec<String>> {
        Ok(self.roots.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

// ==================== Class Path Roots ====================

/// Looks a package path up in every class path entry, the way a JVM class loader
/// enumerates resources.
#[derive(Debug, Clone, Default)]
pub struct ClasspathRoots {
    config: ClasspathConfig,
}

impl ClasspathRoots {
    pub fn new(config: ClasspathConfig) -> Self {
        Self { config }
    }

    /// Class path taken from the `CLASSPATH` environment variable
    pub fn from_env() -> Self {
        Self::new(ClasspathConfig::from_env())
    }

    pub fn config(&self) -> &ClasspathConfig {
        &self.config
    }

    fn directory_root(&self, entry: &Path, package_path: &str) -> Result<Option<String>> {
        let candidate = if package_path.is_empty() {
            entry.to_path_buf()
        } else {
            entry.join(package_path)
        };
        if !candidate.is_dir() {
            return Ok(None);
        }

        let absolute = std::path::absolute(&candidate)
            .map_err(|e| ScanError::root(candidate.display().to_string(), e))?;
        let url = Url::from_directory_path(&absolute).map_err(|_| {
            ScanError::root(absolute.display().to_string(), "not an absolute path")
        })?;

        Ok(Some(format!("{FILE_SCHEME}{}", url.path())))
    }

    fn archive_root(&self, entry: &Path, package_path: &str) -> Result<Option<String>> {
        let address = entry.display().to_string();
        let file = File::open(entry).map_err(|e| ScanError::root(&address, e))?;
        let archive = ZipArchive::new(file).map_err(|e| ScanError::root(&address, e))?;

        let dir_prefix = format!("{package_path}/");
        let exposes = archive.len() > 0
            && (package_path.is_empty()
                || archive
                    .file_names()
                    .any(|name| name.starts_with(&dir_prefix)));
        if !exposes {
            return Ok(None);
        }

        let absolute = std::path::absolute(entry).map_err(|e| ScanError::root(&address, e))?;
        let url = Url::from_file_path(&absolute)
            .map_err(|_| ScanError::root(&address, "not an absolute path"))?;

        Ok(Some(format!(
            "{JAR_SCHEME}{FILE_SCHEME}{}{ARCHIVE_SEPARATOR}{package_path}",
            url.path()
        )))
    }
}

impl RootSource for ClasspathRoots {
    fn list_roots(&self, package_path: &str) -> Result<Vec<String>> {
        let mut roots = Vec::new();
        if !path::is_package_path(package_path) {
            debug!("`{}` is not a package path, no roots", package_path);
            return Ok(roots);
        }

        for entry in &self.config.entries {
            let found = if entry.is_dir() {
                self.directory_root(entry, package_path)?
            } else if entry.is_file() && self.config.is_archive(entry) {
                self.archive_root(entry, package_path)?
            } else {
                debug!("Skipping class path entry {:?}", entry);
                None
            };

            if let Some(root) = found {
                roots.push(root);
            }
        }

        Ok(roots)
    }

    fn name(&self) -> &str {
        "classpath"
    }
}

// ==================== Root Descriptor ====================

/// A located root, ready to be walked.
///
/// `base` is the decoded root address with the package path, the `file:` marker and
/// any trailing separator removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootDescriptor {
    Directory {
        base: String,
        path: PathBuf,
    },
    Archive {
        base: String,
        archive: PathBuf,
        entry_prefix: String,
    },
}

impl RootDescriptor {
    pub fn base(&self) -> &str {
        match self {
            RootDescriptor::Directory { base, .. } | RootDescriptor::Archive { base, .. } => base,
        }
    }
}

/// Resolves the roots of one package path through a [`RootSource`].
pub struct RootLocator<'a, S: RootSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: RootSource + ?Sized> RootLocator<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    pub fn locate(&self, package_path: &str) -> Result<Vec<RootDescriptor>> {
        let roots = self.source.list_roots(package_path)?;
        debug!(
            "{} source listed {} roots for `{}`",
            self.source.name(),
            roots.len(),
            package_path
        );

        roots
            .iter()
            .map(|raw| describe(raw, package_path))
            .collect()
    }
}

/// Classify one raw address and compute its normalized base.
pub fn describe(raw: &str, package_path: &str) -> Result<RootDescriptor> {
    let decoded = path::decode(raw)?;
    let address = path::strip_trailing_separator(&decoded);

    let base = address.strip_suffix(package_path).ok_or_else(|| {
        ScanError::root(raw, format!("address does not end with `{package_path}`"))
    })?;
    let base = path::strip_scheme_prefix(base, FILE_SCHEME);
    let base = path::strip_drive_slash(path::strip_trailing_separator(base)).to_string();

    let descriptor = if raw.starts_with(JAR_SCHEME) {
        RootDescriptor::Archive {
            base,
            archive: archive_path(raw)?,
            entry_prefix: package_path.to_string(),
        }
    } else {
        RootDescriptor::Directory {
            base,
            path: file_url_path(raw)?,
        }
    };

    debug!("Located root {:?}", descriptor);
    Ok(descriptor)
}

fn file_url_path(raw: &str) -> Result<PathBuf> {
    let url = Url::parse(raw).map_err(|e| ScanError::root(raw, e))?;
    if url.scheme() != "file" {
        return Err(ScanError::root(
            raw,
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    url.to_file_path()
        .map_err(|_| ScanError::root(raw, "not a local file path"))
}

/// Archive location of a `jar:<url>!/<entry>` address
fn archive_path(raw: &str) -> Result<PathBuf> {
    let inner = path::strip_scheme_prefix(raw, JAR_SCHEME);
    let Some((location, _)) = inner.split_once(ARCHIVE_SEPARATOR) else {
        return Err(ScanError::root(
            raw,
            format!("missing `{ARCHIVE_SEPARATOR}` separator"),
        ));
    };
    file_url_path(location).map_err(|e| match e {
        ScanError::RootResolution { reason, .. } => ScanError::root(raw, reason),
        other => other,
    })
}
