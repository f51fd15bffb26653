use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use jwks_export::{export, ExportConfig, JwksError, KeyLoadError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn config(dir: &Path, key: &str) -> ExportConfig {
    ExportConfig {
        private_key_path: fixture(key),
        output_path: dir.join("jwks.json"),
        key_id: "fixture-key".to_string(),
        password: None,
    }
}

#[test]
fn export_matches_golden_document() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), "rsa_pkcs8.pem");

    let generated = export(&cfg).unwrap();
    assert_eq!(generated.key_id, "fixture-key");

    let written = fs::read_to_string(&cfg.output_path).unwrap();
    let expected = fs::read_to_string(fixture("jwks_expected.json")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn export_failure_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();

    for key in ["corrupt.pem", "ec_pkcs8.pem", "missing.pem"] {
        let cfg = config(dir.path(), key);
        let res = export(&cfg);
        assert!(matches!(res, Err(JwksError::KeyLoad(_))), "{key}: {res:?}");
        assert!(!cfg.output_path.exists(), "{key} produced output");
    }
}

#[test]
fn export_failure_keeps_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path(), "rsa_pkcs8_encrypted.pem");
    fs::write(&cfg.output_path, b"{\"keys\": []}\n").unwrap();

    let res = export(&cfg);
    assert!(
        matches!(res, Err(JwksError::KeyLoad(KeyLoadError::PasswordRequired))),
        "{res:?}"
    );
    assert_eq!(
        fs::read_to_string(&cfg.output_path).unwrap(),
        "{\"keys\": []}\n"
    );
}

#[test]
fn binary_writes_jwks_with_default_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(fixture("rsa_pkcs1.pem"), dir.path().join("private_key.pem")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_jwks-export"))
        .current_dir(dir.path())
        .env_remove("JWKS_PRIVATE_KEY_PATH")
        .env_remove("JWKS_OUTPUT_PATH")
        .env_remove("JWKS_KEY_PASSWORD")
        .env("JWKS_KEY_ID", "fixture-key")
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kid=fixture-key"), "{stdout}");

    let written = fs::read_to_string(dir.path().join("jwks.json")).unwrap();
    let expected = fs::read_to_string(fixture("jwks_expected.json")).unwrap();
    assert_eq!(written, expected);
}

#[test]
fn binary_exits_non_zero_without_key() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_jwks-export"))
        .current_dir(dir.path())
        .env_remove("JWKS_PRIVATE_KEY_PATH")
        .env_remove("JWKS_OUTPUT_PATH")
        .env_remove("JWKS_KEY_ID")
        .env_remove("JWKS_KEY_PASSWORD")
        .output()
        .unwrap();

    assert!(!output.status.success(), "{output:?}");
    assert!(String::from_utf8_lossy(&output.stdout).contains("JWKS export failed"));
    assert!(!dir.path().join("jwks.json").exists());
}
