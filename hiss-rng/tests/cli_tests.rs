//! Command-line behavior of the hiss-rng binary

mod helpers;

use helpers::{noise_i16, write_mono_i16};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn hiss_rng_command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hiss-rng"));
    command
        .args(args)
        .env_remove("HISS_CONFIG")
        .env_remove("HISS_WORKERS")
        .env_remove("HISS_AUDIT_DIR")
        .env_remove("HISS_LOG_LEVEL")
        .env_remove("RUST_LOG");
    command
}

fn hiss_rng(args: &[&str]) -> Output {
    hiss_rng_command(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch hiss-rng")
}

fn noise_wav(dir: &TempDir, seconds: usize) -> String {
    let path = dir.path().join("noise.wav");
    write_mono_i16(&path, 8000, &noise_i16(8000 * seconds, 123)).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_wrong_argument_count_is_usage_error() {
    let output = hiss_rng(&["only-a-file.wav", "1.0"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

    let output = hiss_rng(&["a.wav", "1.0", "2", "extra"]);
    assert!(!output.status.success());
}

#[test]
fn test_text_report() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 2);

    let output = hiss_rng(&[wav.as_str(), "1.0", "2"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shannon entropy for provided source:"));
    assert!(stdout.contains("Generated random numbers: ["));
    assert!(stdout.contains("Entropy of the generated output:"));
}

#[test]
fn test_json_report_with_audit_dir() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 1);
    let audit = dir.path().join("audit");

    let output = hiss_rng(&[
        wav.as_str(),
        "0.25",
        "4",
        "--format",
        "json",
        "--audit-dir",
        audit.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["numbers"].as_array().unwrap().len(), 4);
    assert_eq!(report["samples_per_chunk"], 2000);

    let sha = std::fs::read_to_string(Path::new(&audit).join("sha.bin")).unwrap();
    assert_eq!(sha.lines().count(), 4);
}

#[test]
fn test_insufficient_source_exit_status() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 1);

    let output = hiss_rng(&[wav.as_str(), "10.0", "1"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Source too short"));
}

#[test]
fn test_negative_duration_is_invalid_configuration() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 1);

    let output = hiss_rng(&[wav.as_str(), "-1", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[test]
fn test_missing_file_fails() {
    let output = hiss_rng(&["/nonexistent/noise.wav", "1.0", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read audio"));
}

#[test]
fn test_missing_config_file_is_logged() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 1);
    let config = dir.path().join("typo.toml");

    let output = hiss_rng_command(&[wav.as_str(), "0.5", "2", "--config", config.to_str().unwrap()])
        .output()
        .expect("failed to launch hiss-rng");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found, using defaults"), "stderr: {}", stderr);
    assert!(!stderr.contains("Config file: "), "stderr: {}", stderr);
}

#[test]
fn test_config_file_is_applied_and_logged() {
    let dir = TempDir::new().unwrap();
    let wav = noise_wav(&dir, 1);
    let config = dir.path().join("hiss.toml");
    std::fs::write(&config, "[report]\nformat = \"json\"\n").unwrap();

    let output = hiss_rng_command(&[wav.as_str(), "0.5", "2", "--config", config.to_str().unwrap()])
        .output()
        .expect("failed to launch hiss-rng");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file: "), "stderr: {}", stderr);
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["numbers"].as_array().unwrap().len(), 2);
}
