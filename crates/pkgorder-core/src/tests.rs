use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::*;

static TEST_INVENTORY_ROOT_COUNTER: AtomicU64 = AtomicU64::new(0);

#[test]
fn parse_toml_inventory() {
    let content = r#"
[[packages]]
name = "bash"
version = "5.2.26-3.fc40"
provides = ["bash", "/bin/sh"]
requires = ["libc.so.6", "libtinfo.so.6"]

[[packages]]
name = "glibc"
provides = ["libc.so.6"]
"#;

    let inventory = PackageInventory::from_toml_str(content).expect("inventory should parse");
    assert_eq!(inventory.len(), 2);

    let bash = inventory.get("bash").expect("bash must be present");
    assert_eq!(bash.version.as_deref(), Some("5.2.26-3.fc40"));
    assert!(bash.provides.contains("/bin/sh"));
    assert!(bash.requires.contains("libtinfo.so.6"));
    assert_eq!(bash.display_name(), "bash-5.2.26-3.fc40");

    let glibc = inventory.get("glibc").expect("glibc must be present");
    assert!(glibc.requires.is_empty());
    assert_eq!(glibc.display_name(), "glibc");
}

#[test]
fn parse_json_inventory_document_and_bare_array() {
    let document = r#"{"packages": [{"name": "a", "provides": ["x"], "requires": ["y"]}]}"#;
    let bare = r#"[{"name": "a", "provides": ["x"], "requires": ["y"]}]"#;

    let from_document = PackageInventory::from_json_str(document).expect("document must parse");
    let from_bare = PackageInventory::from_json_str(bare).expect("bare array must parse");

    assert_eq!(from_document, from_bare);
    assert_eq!(
        from_document.packages[0],
        Package::new("a").with_provides(["x"]).with_requires(["y"])
    );
}

#[test]
fn parse_empty_json_array() {
    let inventory = PackageInventory::from_json_str("[]").expect("empty array must parse");
    assert!(inventory.is_empty());
}

#[test]
fn json_errors_report_the_offending_location() {
    let bare = "[\n  {\"name\": \"a\", \"requires\": \"not-a-list\"}\n]";
    let err = PackageInventory::from_json_str(bare).expect_err("must reject bad field type");
    let detail = format!("{err:#}");
    assert!(detail.contains("line 2"), "{detail}");
    assert!(!detail.contains("untagged enum"), "{detail}");

    let document = r#"{"packages": [{"provides": ["x"]}]}"#;
    let err = PackageInventory::from_json_str(document).expect_err("must reject missing name");
    let detail = format!("{err:#}");
    assert!(detail.contains("missing field `name`"), "{detail}");
}

#[test]
fn rejects_duplicate_package_names() {
    let content = r#"
[[packages]]
name = "tool"

[[packages]]
name = "tool"
provides = ["other"]
"#;

    let err = PackageInventory::from_toml_str(content).expect_err("duplicate must be rejected");
    assert_eq!(err.to_string(), "duplicate package name 'tool'");
}

#[test]
fn validate_unique_names_accepts_distinct_names() {
    let packages = vec![Package::new("a"), Package::new("b")];
    validate_unique_names(&packages).expect("distinct names must validate");
}

#[test]
fn rejects_empty_package_name() {
    let err = PackageInventory::new(vec![Package::new("  ")]).expect_err("must reject");
    assert!(err.to_string().contains("package name must not be empty"));
}

#[test]
fn rejects_empty_capability() {
    let err = PackageInventory::new(vec![Package::new("a").with_requires([""])])
        .expect_err("must reject");
    assert_eq!(err.to_string(), "package 'a' requires an empty capability");

    let err = PackageInventory::new(vec![Package::new("a").with_provides([" "])])
        .expect_err("must reject");
    assert_eq!(err.to_string(), "package 'a' provides an empty capability");
}

#[test]
fn capability_sets_deduplicate_repeated_entries() {
    let content = r#"
[[packages]]
name = "a"
requires = ["x", "x", "y"]
"#;

    let inventory = PackageInventory::from_toml_str(content).expect("inventory should parse");
    assert_eq!(inventory.packages[0].requires.len(), 2);
}

#[test]
fn load_selects_parser_by_extension() {
    let root = test_inventory_root();
    fs::create_dir_all(&root).expect("must create test root");

    let toml_path = root.join("installed.toml");
    fs::write(&toml_path, "[[packages]]\nname = \"a\"\n").expect("must write toml");
    let json_path = root.join("installed.json");
    fs::write(&json_path, r#"[{"name": "a"}]"#).expect("must write json");

    let from_toml = PackageInventory::load(&toml_path).expect("toml must load");
    let from_json = PackageInventory::load(&json_path).expect("json must load");
    assert_eq!(from_toml, from_json);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_rejects_unknown_extension() {
    let root = test_inventory_root();
    fs::create_dir_all(&root).expect("must create test root");
    let path = root.join("installed.yaml");
    fs::write(&path, "packages: []").expect("must write file");

    let err = PackageInventory::load(&path).expect_err("must reject unknown format");
    assert!(err.to_string().contains("unsupported inventory format"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn load_reports_missing_file_path() {
    let path = test_inventory_root().join("missing.toml");
    let err = PackageInventory::load(&path).expect_err("must fail for missing file");
    assert!(err.to_string().contains("failed reading inventory"));
    assert!(err.to_string().contains("missing.toml"));
}

fn test_inventory_root() -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let counter = TEST_INVENTORY_ROOT_COUNTER.fetch_add(1, Ordering::SeqCst);
    path.push(format!(
        "pkgorder-core-tests-{}-{}-{}",
        std::process::id(),
        nanos,
        counter
    ));
    path
}
