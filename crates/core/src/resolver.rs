use crate::engine::ScanEngine;
use crate::error::Result;
use crate::locator::{ClasspathRoots, RootLocator, RootSource};
use crate::path;
use crate::resource::Resource;
use tracing::warn;

/// Enumerates the resources below a base package, across every directory and
/// archive root that exposes it.
///
/// ```no_run
/// use autumn_io::ResourceResolver;
///
/// let resolver = ResourceResolver::new("com.example.app");
/// let classes = resolver.scan(|res| res.class_name())?;
/// # Ok::<(), autumn_io::ScanError>(())
/// ```
pub struct ResourceResolver<S = ClasspathRoots> {
    /// e.g. `com.example.app`
    base_package: String,
    source: S,
}

impl ResourceResolver<ClasspathRoots> {
    /// Resolve against the class path from the environment.
    pub fn new(base_package: impl Into<String>) -> Self {
        Self::with_source(base_package, ClasspathRoots::from_env())
    }
}

impl<S: RootSource> ResourceResolver<S> {
    pub fn with_source(base_package: impl Into<String>, source: S) -> Self {
        Self {
            base_package: base_package.into(),
            source,
        }
    }

    pub fn base_package(&self) -> &str {
        &self.base_package
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Map every resource under the base package, keeping the `Some` results.
    ///
    /// Fails on the first undecodable address, unresolvable root or I/O error;
    /// nothing is returned from a failed scan.
    pub fn scan<R, F>(&self, mapper: F) -> Result<Vec<R>>
    where
        F: FnMut(Resource) -> Option<R>,
    {
        let Some(package_path) = path::package_path(&self.base_package) else {
            warn!("`{}` has an empty segment, nothing to scan", self.base_package);
            return Ok(Vec::new());
        };
        let roots = RootLocator::new(&self.source).locate(&package_path)?;
        ScanEngine::new(mapper).scan(&roots)
    }
}
