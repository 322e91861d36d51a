//! CLI contract tests
//!
//! Runs the built binary on corpora in temp directories: train writes model
//! files, classify reads them back and picks the right language.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::io::Write;

fn langdet_bin() -> String {
    env!("CARGO_BIN_EXE_langdet").to_string()
}

const ENGLISH: &str = "\
the weather is lovely today and the children are playing outside
she walked through the park while the birds were singing in the trees
there is nothing quite like a warm cup of tea on a cold winter evening
he thought that the meeting would take longer than it actually did
";

const GERMAN: &str = "\
das wetter ist heute sehr schön und die kinder spielen draußen
sie ging durch den park während die vögel in den bäumen sangen
es gibt nichts schöneres als eine warme tasse tee an einem kalten abend
er dachte dass die besprechung länger dauern würde als sie tatsächlich dauerte
";

fn write_corpora(dir: &Path) -> (PathBuf, PathBuf) {
    let en = dir.join("en.txt");
    let de = dir.join("de.txt");
    std::fs::write(&en, ENGLISH).unwrap();
    std::fs::write(&de, GERMAN).unwrap();
    (en, de)
}

fn run(args: &[&str]) -> Output {
    Command::new(langdet_bin())
        .args(args)
        .env_remove("LANGDET_CONFIG")
        .output()
        .expect("Failed to run langdet")
}

fn train_both(dir: &Path) -> (String, String) {
    let (en, de) = write_corpora(dir);
    let output = run(&["train", en.to_str().unwrap(), de.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "train failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    (
        dir.join("en.txt-model.json").display().to_string(),
        dir.join("de.txt-model.json").display().to_string(),
    )
}

#[test]
fn test_train_writes_model_files() {
    let dir = tempfile::tempdir().unwrap();
    let (en_model, de_model) = train_both(dir.path());

    for model in [&en_model, &de_model] {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(model).unwrap()).unwrap();
        assert_eq!(json["ngramSize"], 3);
        assert!(!json["ngrams"].as_object().unwrap().is_empty());
        assert!(json.get("singleChars").is_none());
    }
}

#[test]
fn test_classify_picks_language() {
    let dir = tempfile::tempdir().unwrap();
    let (en_model, de_model) = train_both(dir.path());

    let test = dir.path().join("unknown.txt");
    std::fs::write(&test, "die kinder spielen im park und die vögel singen\n").unwrap();

    let output = run(&[
        "classify",
        &en_model,
        &de_model,
        "--test",
        test.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["language"], "de");
    assert!(json["similarity"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_classify_reads_stdin_and_ranks_all() {
    let dir = tempfile::tempdir().unwrap();
    let (en_model, de_model) = train_both(dir.path());

    let mut child = Command::new(langdet_bin())
        .args([
            "classify",
            &format!("english={en_model}"),
            &format!("german={de_model}"),
            "--all",
            "--format",
            "json",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"the children walked through the park\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["best"]["language"], "english");
    let scores = json["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["language"], "english");
}

#[test]
fn test_self_classification_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let (en_model, de_model) = train_both(dir.path());

    let output = run(&[
        "classify",
        &en_model,
        &de_model,
        "--test",
        dir.path().join("en.txt").to_str().unwrap(),
        "--format",
        "json",
    ]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["language"], "en");
    assert!((json["similarity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_inconsistent_models_fail() {
    let dir = tempfile::tempdir().unwrap();
    let (en, de) = write_corpora(dir.path());
    assert!(run(&["train", en.to_str().unwrap(), "--ngram-size", "2"]).status.success());
    assert!(run(&["train", de.to_str().unwrap(), "--ngram-size", "3"]).status.success());

    let output = run(&[
        "classify",
        &dir.path().join("en.txt-model.json").display().to_string(),
        &dir.path().join("de.txt-model.json").display().to_string(),
        "--test",
        en.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ngram size"), "stderr: {stderr}");
}

#[test]
fn test_negative_ngram_size_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let (en, _) = write_corpora(dir.path());
    let output = run(&["train", en.to_str().unwrap(), "--ngram-size", "-1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ngram_size"));
    assert!(!dir.path().join("en.txt-model.json").exists());
}

#[test]
fn test_train_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let (en, _) = write_corpora(dir.path());
    let config = dir.path().join("langdet.toml");
    std::fs::write(
        &config,
        "[ngrams]\nngram_size = 2\nmax_values = 10\n\n[codeplanes]\n",
    )
    .unwrap();
    let out = dir.path().join("english.json");

    let output = run(&[
        "train",
        en.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["ngramSize"], 2);
    assert_eq!(json["ngrams"].as_object().unwrap().len(), 10);
    assert_eq!(json["unicodePlanes"]["Basic Latin (ASCII)"], 1.0);
}

#[test]
fn test_config_file_warns_about_ignored_flags() {
    let dir = tempfile::tempdir().unwrap();
    let (en, _) = write_corpora(dir.path());
    let config = dir.path().join("langdet.toml");
    std::fs::write(&config, "[ngrams]\nngram_size = 2\n").unwrap();
    let out = dir.path().join("english.json");

    let output = Command::new(langdet_bin())
        .args([
            "train",
            en.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--ngram-size",
            "5",
            "--output",
            out.to_str().unwrap(),
        ])
        .env_remove("LANGDET_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--ngram-size is ignored"), "stderr: {stderr}");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["ngramSize"], 2);
}

#[test]
fn test_misspelled_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (en, _) = write_corpora(dir.path());
    let config = dir.path().join("langdet.toml");
    std::fs::write(&config, "[ngram]\nngram_size = 3\n").unwrap();

    let output = run(&["train", en.to_str().unwrap(), "--config", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!dir.path().join("en.txt-model.json").exists());
}

#[test]
fn test_init_then_train() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("langdet.toml");
    assert!(run(&["init", config.to_str().unwrap()]).status.success());
    assert!(config.exists());

    let (en, _) = write_corpora(dir.path());
    let output = run(&[
        "train",
        en.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(output.status.success());
}

#[test]
fn test_planes_command() {
    let output = run(&["planes", "A中"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("U+0041"));
    assert!(stdout.contains("Basic Latin (ASCII)"));
    assert!(stdout.contains("CJK Unified Ideographs"));
}
