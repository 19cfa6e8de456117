use modscan::model::UnreadableReason;
use modscan::output::CliReporter;
use modscan::{AuditError, Auditor, Classification, InstallTree, PackageInspector, Registry};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn install(location: &Path, name: &str, descriptor: &str) {
    let dir = location.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), descriptor).unwrap();
}

fn version_json(version: &str) -> String {
    format!(r#"{{"name":"pkg","version":"{}"}}"#, version)
}

/// Runs a full audit and returns the report text with the result.
fn audit(base: &Path, advisories: &str) -> (String, modscan::ScanResult) {
    let registry = Registry::build(advisories).unwrap();
    let tree = InstallTree::open(base, "node_modules").unwrap();
    let auditor = Auditor::new(&registry, PackageInspector::new());

    let mut reporter = CliReporter::new(Vec::new());
    let result = auditor.audit(tree.locations(), &mut reporter).unwrap();
    (String::from_utf8(reporter.into_inner()).unwrap(), result)
}

#[test]
fn test_in_range_and_out_of_range_across_nested_dirs() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("node_modules");
    install(&root, "left-pad", &version_json("1.0.1"));
    install(&root, "express", &version_json("4.18.2"));
    let nested = root.join("express").join("node_modules");
    install(&nested, "left-pad", &version_json("1.0.3"));

    let (report, result) = audit(base.path(), "left-pad@1.0.0\nleft-pad@1.0.2\n");

    assert_eq!(result.directories_checked, 2);
    assert_eq!(result.counts.in_range, 1);
    assert_eq!(result.counts.out_of_range, 1);
    assert_eq!(result.hits[0].location, root);
    assert!(report.contains("⛔️ (1.0.1 in affected range 1.0.0 - 1.0.2)"));
    assert!(report.contains("✅ (1.0.3 not in range 1.0.0 - 1.0.2)"));
}

#[test]
fn test_not_installed_is_reported() {
    let base = TempDir::new().unwrap();
    fs::create_dir_all(base.path().join("node_modules")).unwrap();

    let (report, result) = audit(base.path(), "left-pad@1.0.0\nleft-pad@1.0.2\n");

    assert_eq!(result.directories_checked, 1);
    assert_eq!(result.counts.not_installed, 1);
    assert!(!result.has_hits());
    assert!(report.contains("left-pad: (1.0.0/1.0.2): ✅ (not used)"));
}

#[test]
fn test_corrupt_descriptor_does_not_stop_scan() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("node_modules");
    install(&root, "aaa", "{ this is not json");
    install(&root, "bbb", &version_json("2.0.0"));

    let registry = Registry::build("aaa@1.0.0\nbbb@2.0.0\n").unwrap();
    let findings = Auditor::new(&registry, PackageInspector::new())
        .audit_location(&root)
        .unwrap();

    assert_eq!(findings.len(), 2);
    assert!(matches!(
        findings[0].classification,
        Classification::Unreadable(UnreadableReason::Malformed(_))
    ));
    assert_eq!(findings[1].classification, Classification::InRange);
}

#[test]
fn test_scoped_packages() {
    let base = TempDir::new().unwrap();
    let root = base.path().join("node_modules");
    install(&root, "@ctrl/tinycolor", &version_json("4.1.1"));

    let (_, result) = audit(base.path(), "@ctrl/tinycolor@4.1.1\n@ctrl/tinycolor@4.1.2\n");

    assert_eq!(result.hits.len(), 1);
    assert_eq!(result.hits[0].package, "@ctrl/tinycolor");
}

#[test]
fn test_no_locations_checks_nothing() {
    let registry = Registry::build("left-pad@1.0.0\n").unwrap();
    let mut reporter = CliReporter::new(Vec::new());
    let result = Auditor::new(&registry, PackageInspector::new())
        .audit(Vec::<PathBuf>::new(), &mut reporter)
        .unwrap();

    assert_eq!(result.directories_checked, 0);
    assert!(reporter.into_inner().is_empty());
}

#[test]
fn test_missing_install_root() {
    let base = TempDir::new().unwrap();
    let err = InstallTree::open(base.path(), "node_modules").unwrap_err();
    assert!(matches!(err, AuditError::MissingInstallRoot { .. }));
}

fn modscan(base: &Path, advisories: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_modscan"));
    cmd.arg(base)
        .arg("--advisories")
        .arg(advisories)
        .arg("--config")
        .arg(base.join("absent-config.toml"))
        .env_remove("RUST_LOG")
        .env_remove("MODSCAN_LOG");
    cmd
}

#[test]
fn test_cli_reports_and_exits_cleanly() {
    let base = TempDir::new().unwrap();
    let advisories = base.path().join("compromised.txt");
    fs::write(&advisories, "left-pad@1.0.0\nleft-pad@1.0.2\n").unwrap();
    install(&base.path().join("node_modules"), "left-pad", &version_json("1.0.1"));

    let output = modscan(base.path(), &advisories).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("in affected range"));
    assert!(stdout.contains("Checked modules in 1 directories"));

    let output = modscan(base.path(), &advisories)
        .arg("--fail-on-hit")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_fails_on_malformed_advisories() {
    let base = TempDir::new().unwrap();
    let advisories = base.path().join("compromised.txt");
    fs::write(&advisories, "left-pad@1.0.0\n@scope/no-version\n").unwrap();
    fs::create_dir_all(base.path().join("node_modules")).unwrap();

    let output = modscan(base.path(), &advisories).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("line 2"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_fails_without_install_root() {
    let base = TempDir::new().unwrap();
    let advisories = base.path().join("compromised.txt");
    fs::write(&advisories, "left-pad@1.0.0\n").unwrap();

    let output = modscan(base.path(), &advisories).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("no directory 'node_modules'"));
}

#[test]
fn test_cli_fails_without_advisories() {
    let base = TempDir::new().unwrap();
    fs::create_dir_all(base.path().join("node_modules")).unwrap();

    let output = modscan(base.path(), &base.path().join("missing.txt"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
