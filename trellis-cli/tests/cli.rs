use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn parse_to_treeviz_by_default() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"));

    let output_pred = predicate::str::starts_with("○ statement")
        .and(predicate::str::contains("├─ ○ foo"))
        .and(predicate::str::contains("◦ BAR \"bar\""));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_to_json() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"))
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"statement\""));
}

#[test]
fn tokens_from_stdin() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg("-")
        .arg("-f")
        .arg("tokens")
        .write_stdin("bar foo");

    cmd.assert().success().stdout(
        predicate::str::contains("\"term\": \"BAR\"").and(predicate::str::contains("\"term\": \"FOO\"")),
    );
}

#[test]
fn graph_listing() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"))
        .arg("--format")
        .arg("graph");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("statement_$BEGIN").and(predicate::str::contains("bar_$END")));
}

#[test]
fn template_language_from_yaml() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("template.yaml"))
        .arg("-")
        .write_stdin("Hello {{ name }}!");

    cmd.assert().success().stdout(
        predicate::str::contains("○ placeholder").and(predicate::str::contains("◦ NAME \"name\"")),
    );
}

#[test]
fn lexing_error_shows_source_context() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("broken.foobar"));

    cmd.assert().failure().code(1).stderr(
        predicate::str::contains("Error: text not fully tokenized")
            .and(predicate::str::contains(">>   2 | bar baz"))
            .and(predicate::str::contains("^")),
    );
}

#[test]
fn parse_error_names_expected_terms() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("template.yaml"))
        .arg("-")
        .write_stdin("Hi {{ }}");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NAME").and(predicate::str::contains(">>   1 | Hi {{ }}")));
}

#[test]
fn config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("trellis.toml");
    fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"))
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("trellis.toml");
    fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"))
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("treeviz");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("○ statement"));
}

#[test]
fn missing_language_file() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("nope.yaml"))
        .arg(fixture_path("sample.foobar"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error loading language"));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg(fixture_path("foobar.json"))
        .arg(fixture_path("sample.foobar"))
        .arg("--format")
        .arg("xml");

    cmd.assert().failure();
}

#[test]
fn long_help_lists_format_descriptions() {
    let mut cmd = cargo_bin_cmd!("trellis");
    cmd.arg("--help");

    cmd.assert().success().stdout(
        predicate::str::contains("Visual tree representation with box connectors")
            .and(predicate::str::contains("Pretty-printed JSON tree"))
            .and(predicate::str::contains("Token stream as JSON")),
    );
}
