use crate::ScanArgs;
use autumn_io::{ClasspathConfig, ClasspathRoots, Resource, ResourceResolver};
use std::io::Write;
use tracing::info;

pub fn run(args: ScanArgs, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args)?;
    let resolver = ResourceResolver::with_source(&args.package, ClasspathRoots::new(config));
    info!(
        "Scanning {} across {} class path entries...",
        resolver.base_package(),
        resolver.source().config().entries.len()
    );

    if args.json && !args.classes {
        let resources: Vec<Resource> = resolver.scan(Some)?;
        serde_json::to_writer_pretty(&mut *out, &resources)?;
        writeln!(out)?;
        return Ok(());
    }

    let lines: Vec<String> = if args.classes {
        resolver.scan(|res| res.class_name())?
    } else {
        resolver.scan(|res| Some(format!("{}\t{}", res.name(), res.root())))?
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &lines)?;
        writeln!(out)?;
    } else {
        for line in &lines {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// `--classpath` entries win over the config file, which wins over `CLASSPATH`.
fn load_config(args: &ScanArgs) -> Result<ClasspathConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        None => ClasspathConfig::from_env(),
    };

    if !args.classpath.is_empty() {
        config.entries = args.classpath.clone();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn args(package: &str, classpath: Vec<PathBuf>) -> ScanArgs {
        ScanArgs {
            package: package.to_string(),
            classpath,
            config: None,
            classes: false,
            json: false,
        }
    }

    fn fixture() -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        let pkg = temp.path().join("classes/com/example");
        fs::create_dir_all(pkg.join("web")).unwrap();
        fs::write(pkg.join("App.class"), b"").unwrap();
        fs::write(pkg.join("web/Controller.class"), b"").unwrap();
        fs::write(pkg.join("app.properties"), b"").unwrap();
        temp
    }

    #[test]
    fn test_scan_classes() {
        let temp = fixture();
        let mut scan_args = args("com.example", vec![temp.path().join("classes")]);
        scan_args.classes = true;

        let mut out = Vec::new();
        run(scan_args, &mut out).unwrap();

        let mut lines: Vec<_> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        assert_eq!(lines, vec!["com.example.App", "com.example.web.Controller"]);
    }

    #[test]
    fn test_scan_json_resources() {
        let temp = fixture();
        let mut scan_args = args("com.example", vec![temp.path().join("classes")]);
        scan_args.json = true;

        let mut out = Vec::new();
        run(scan_args, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let resources = value.as_array().unwrap();
        assert_eq!(resources.len(), 3);
        assert!(
            resources
                .iter()
                .any(|r| r["name"] == "com/example/app.properties")
        );
    }

    #[test]
    fn test_config_file_entries_overridden_by_flags() {
        let temp = fixture();
        let config_path = temp.path().join("classpath.json");
        fs::write(
            &config_path,
            r#"{ "entries": ["/nowhere"], "archive_extensions": ["jar"] }"#,
        )
        .unwrap();

        let mut scan_args = args("com.example", vec![]);
        scan_args.config = Some(config_path.clone());
        let config = load_config(&scan_args).unwrap();
        assert_eq!(config.entries, vec![PathBuf::from("/nowhere")]);
        assert_eq!(config.archive_extensions, vec!["jar"]);

        scan_args.classpath = vec![temp.path().join("classes")];
        let config = load_config(&scan_args).unwrap();
        assert_eq!(config.entries, vec![temp.path().join("classes")]);
        assert_eq!(config.archive_extensions, vec!["jar"]);
    }
}
