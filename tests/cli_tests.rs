//! Integration tests for the non-interactive CLI commands

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::lingo_cmd;

fn db_arg(temp: &TempDir) -> String {
    temp.path().join("tm.db").to_string_lossy().to_string()
}

#[test]
fn test_add_and_search() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd()
        .args(["add", "Hello World", "-c", "greeting", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored source"));

    lingo_cmd()
        .args(["add", "Goodbye", "-d", &db])
        .assert()
        .success();

    lingo_cmd()
        .args(["search", "Hello", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("Goodbye").not());
}

#[test]
fn test_search_explicit_wildcard() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello World", "-d", &db]).assert().success();
    lingo_cmd().args(["add", "World Peace", "-d", &db]).assert().success();

    // Caller-supplied % suppresses the implicit double wrap: suffix match only
    lingo_cmd()
        .args(["search", "%World", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("World Peace").not());
}

#[test]
fn test_search_no_match() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello World", "-d", &db]).assert().success();

    lingo_cmd()
        .args(["search", "Nothing", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("No sources matched."));
}

#[test]
fn test_translate_and_translations_output() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello World", "-d", &db]).assert().success();
    lingo_cmd()
        .args(["translate", "Hello World", "es", "Hola Mundo", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanish"));

    lingo_cmd()
        .args(["translations", "Hello", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("es: Hola Mundo"));
}

#[test]
fn test_translate_unknown_source_fails() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd()
        .args(["translate", "Never added", "es", "Nunca", "-d", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source with text"));
}

#[test]
fn test_translate_overwrites_in_place() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello", "-d", &db]).assert().success();
    lingo_cmd()
        .args(["translate", "Hello", "es", "Hola", "-d", &db])
        .assert()
        .success();
    lingo_cmd()
        .args(["translate", "Hello", "es", "Buenas", "-d", &db])
        .assert()
        .success();

    lingo_cmd()
        .args(["translations", "Hello", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("es: Buenas"))
        .stdout(predicate::str::contains("Hola").not());
}

#[test]
fn test_comments_listing_and_unknown_source() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd()
        .args(["add", "Save", "-c", "button label", "-c", "keep it short", "-d", &db])
        .assert()
        .success();

    lingo_cmd()
        .args(["comments", "Save", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("- button label"))
        .stdout(predicate::str::contains("- keep it short"));

    lingo_cmd()
        .args(["comments", "Missing", "-d", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source with text"));
}

#[test]
fn test_duplicate_add_merges_comments() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd()
        .args(["add", "Hello World", "-c", "greeting", "-d", &db])
        .assert()
        .success();
    lingo_cmd()
        .args(["add", "Hello World", "-c", "greeting", "-c", "launch screen", "-d", &db])
        .assert()
        .success();

    lingo_cmd()
        .args(["comments", "Hello World", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting").count(1))
        .stdout(predicate::str::contains("launch screen"));

    // Still exactly one source
    lingo_cmd()
        .args(["search", "Hello", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World").count(1));
}

#[test]
fn test_search_json_format() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello World", "-d", &db]).assert().success();
    lingo_cmd()
        .args(["translate", "Hello World", "es", "Hola Mundo", "-d", &db])
        .assert()
        .success();

    let output = lingo_cmd()
        .args(["translations", "Hello", "-d", &db, "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let hits: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["source"], "Hello World");
    assert_eq!(hits[0]["translations"][0]["lang"], "es");
    assert_eq!(hits[0]["translations"][0]["text"], "Hola Mundo");
}

#[test]
fn test_languages_and_stats() {
    let temp = TempDir::new().unwrap();
    let db = db_arg(&temp);

    lingo_cmd().args(["add", "Hello", "-d", &db]).assert().success();

    // Empty store reports the base language
    lingo_cmd()
        .args(["languages", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("In store: en"))
        .stdout(predicate::str::contains("Spanish"));

    lingo_cmd()
        .args(["translate", "Hello", "fr", "Bonjour", "-d", &db])
        .assert()
        .success();

    lingo_cmd()
        .args(["languages", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("In store: fr"));

    lingo_cmd()
        .args(["stats", "-d", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sources"))
        .stdout(predicate::str::contains("Translations"));
}
