use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Environment variable holding the class path
pub const CLASSPATH_VAR: &str = "CLASSPATH";

/// Search path consulted by [`crate::locator::ClasspathRoots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClasspathConfig {
    /// Directories and archives, searched in order
    pub entries: Vec<PathBuf>,
    /// Extensions (without the dot) of entries opened as archives
    pub archive_extensions: Vec<String>,
}

impl Default for ClasspathConfig {
    fn default() -> Self {
        Self {
            entries: vec![PathBuf::from(".")],
            archive_extensions: vec!["jar".to_string(), "zip".to_string()],
        }
    }
}

impl ClasspathConfig {
    /// Read entries from `CLASSPATH`, falling back to the current directory.
    pub fn from_env() -> Self {
        Self::from_classpath(std::env::var_os(CLASSPATH_VAR).as_deref())
    }

    /// Parse a platform path list such as the value of `CLASSPATH`.
    pub fn from_classpath(value: Option<&OsStr>) -> Self {
        let entries: Vec<PathBuf> = value
            .map(|value| {
                std::env::split_paths(value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if entries.is_empty() {
            Self::default()
        } else {
            Self::with_entries(entries)
        }
    }

    pub fn with_entries(entries: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_archive(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.archive_extensions
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_current_dir() {
        let config = ClasspathConfig::default();
        assert_eq!(config.entries, vec![PathBuf::from(".")]);
        assert!(config.is_archive(Path::new("lib/app.jar")));
        assert!(config.is_archive(Path::new("lib/APP.JAR")));
        assert!(config.is_archive(Path::new("bundle.zip")));
        assert!(!config.is_archive(Path::new("classes")));
        assert!(!config.is_archive(Path::new("notes.txt")));
    }

    #[test]
    fn test_from_classpath_falls_back_to_current_dir() {
        assert_eq!(ClasspathConfig::from_classpath(None), ClasspathConfig::default());
        assert_eq!(
            ClasspathConfig::from_classpath(Some(OsStr::new(""))),
            ClasspathConfig::default()
        );
    }

    #[test]
    fn test_from_classpath_splits_entries() {
        let value = std::env::join_paths(["build/classes", "", "lib/a.jar"]).unwrap();
        let config = ClasspathConfig::from_classpath(Some(value.as_os_str()));

        assert_eq!(
            config.entries,
            vec![PathBuf::from("build/classes"), PathBuf::from("lib/a.jar")]
        );
        assert_eq!(config.archive_extensions, vec!["jar", "zip"]);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClasspathConfig =
            serde_json::from_str(r#"{ "entries": ["build/classes", "lib/a.jar"] }"#).unwrap();
        assert_eq!(
            config.entries,
            vec![PathBuf::from("build/classes"), PathBuf::from("lib/a.jar")]
        );
        assert_eq!(config.archive_extensions, vec!["jar", "zip"]);
    }
}
