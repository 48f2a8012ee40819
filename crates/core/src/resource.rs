use serde::Serialize;
use std::fmt;

/// A regular file discovered under a scanned package.
///
/// `root` identifies where the file lives: the `file:`-qualified absolute path of the
/// file itself for directory roots, or the shared archive address (`jar:file:/x.jar!`)
/// for archive roots. `name` is the slash-separated path relative to the class path
/// root, e.g. `com/example/Foo.class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Resource {
    root: String,
    name: String,
}

impl Resource {
    pub fn new(root: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully qualified class name for a `.class` resource (`com/example/Foo.class` -> `com.example.Foo`)
    pub fn class_name(&self) -> Option<String> {
        let stem = self.name.strip_suffix(".class")?;
        Some(stem.replace(['/', '\\'], "."))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        let res = Resource::new("file:/tmp/classes/a/b/Foo.class", "a/b/Foo.class");
        assert_eq!(res.class_name().as_deref(), Some("a.b.Foo"));

        let inner = Resource::new("jar:file:/lib.jar!", "a/b/Foo$Bar.class");
        assert_eq!(inner.class_name().as_deref(), Some("a.b.Foo$Bar"));

        let props = Resource::new("jar:file:/lib.jar!", "a/b/app.properties");
        assert_eq!(props.class_name(), None);
    }

    #[test]
    fn test_display() {
        let res = Resource::new("jar:file:/lib.jar!", "X.class");
        assert_eq!(res.to_string(), "X.class (jar:file:/lib.jar!)");
    }

    #[test]
    fn test_serialize() {
        let res = Resource::new("jar:file:/lib.jar!", "X.class");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["root"], "jar:file:/lib.jar!");
        assert_eq!(json["name"], "X.class");
    }
}
