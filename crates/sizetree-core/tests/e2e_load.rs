/// Loader integration tests against real files on disk.
use sizetree_core::load::{load_result, LoadError};
use sizetree_core::tree::validate;
use sizetree_core::{build_tree, NodeKind};
use std::fs;
use tempfile::TempDir;

const ANALYZER_OUTPUT: &str = r#"{
    "name": "hello",
    "size": 2048,
    "analyzers": ["symbol", "pclntab"],
    "sections": [
        {"name": ".text", "file_size": 1024, "known_size": 900,
         "offset": 4096, "end": 5120, "addr": 4198400, "addr_end": 4199424,
         "only_in_memory": false, "debug": false},
        {"name": ".bss", "file_size": 0, "known_size": 0,
         "offset": 0, "end": 0, "addr": 4300000, "addr_end": 4300512,
         "only_in_memory": true, "debug": false}
    ],
    "packages": {
        "fmt": {"name": "fmt", "type": "std", "size": 400,
                "files": [{"file_path": "/usr/lib/go/src/fmt/print.go", "size": 350, "pcln_size": 40}],
                "subPackages": {}, "symbols": []},
        "main": {"name": "main", "type": "main", "size": 500,
                 "files": [{"file_path": "/src/hello/main.go", "size": 500, "pcln_size": 0}],
                 "subPackages": {}, "symbols": []}
    }
}"#;

#[test]
fn load_and_build_from_file() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("hello.json");
    fs::write(&path, ANALYZER_OUTPUT).unwrap();

    let result = load_result(&path).expect("analyzer output should decode");
    assert!(validate(&result).is_empty());

    let root = build_tree(&result);
    let children = root.as_node().children();
    let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        [
            "Unknown Sections Size",
            "Std Packages Size",
            "Main Packages Size",
            "Unknown"
        ]
    );
    // 2048 - 124 (sections) - 400 - 500
    assert_eq!(children[3].size(), 1024);
    assert_eq!(children[3].kind(), NodeKind::Unknown);
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("absent.json");

    let err = load_result(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
    assert!(err.to_string().contains("absent.json"), "{err}");
}

#[test]
fn malformed_file_is_a_decode_error() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let path = tmp.path().join("broken.json");
    fs::write(&path, r#"{"name": "x", "size": "big"}"#).unwrap();

    let err = load_result(&path).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }), "{err:?}");
}
