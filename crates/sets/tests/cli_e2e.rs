#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const VAULT: &str = r#"[
  {"path": "Reading List.md", "frontmatter": {"type": "collection"}},
  {"path": "Favorites.md", "frontmatter": {"type": "collection"}},
  {"path": "books/Dune.md", "frontmatter": {
    "type": "book", "status": "done", "priority": 3,
    "collection": ["[[Reading List]]"]
  }},
  {"path": "books/Emma.md", "frontmatter": {
    "type": "book", "status": "todo", "priority": 1
  }},
  {"path": "books/Neuromancer.md", "frontmatter": {
    "type": "book", "status": "todo", "priority": 5
  }},
  {"path": "notes/Scratch.md"}
]"#;

fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let vault = temp.path().join("vault.json");
    fs::write(&vault, VAULT).unwrap();
    (temp, vault)
}

fn sets_cmd(vault: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("sets"));
    cmd.env_remove("SETS_TYPE_ATTRIBUTE")
        .env_remove("SETS_COLLECTION_ATTRIBUTE")
        .env_remove("SETS_COLLECTION_TYPE")
        .env_remove("RUST_LOG")
        .arg("--vault")
        .arg(vault);
    cmd
}

fn json_names(output: &[u8]) -> Vec<String> {
    let json: serde_json::Value = serde_json::from_slice(output).unwrap();
    json["listed_docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| {
            let path = d["path"].as_str().unwrap();
            path.rsplit('/').next().unwrap().trim_end_matches(".md").to_string()
        })
        .collect()
}

#[test]
fn query_filters_and_sorts() {
    let (_temp, vault) = setup();
    let output = sets_cmd(&vault)
        .args(["query", "type:eq:book", "status:eq:todo", "-s", "priority:desc"])
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(json_names(&output.stdout), vec!["Neuromancer", "Emma"]);
}

#[test]
fn query_text_output() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["query", "priority:gte:3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("books/Dune.md"))
        .stdout(predicate::str::contains("books/Neuromancer.md"))
        .stdout(predicate::str::contains("2 documents"));
}

#[test]
fn unknown_operator_fails() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["query", "status:like:done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such operator: like"));
}

#[test]
fn link_to_this_needs_context() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["query", "collection:hasall:@link-to-this"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a context document"));

    sets_cmd(&vault)
        .args(["query", "collection:hasall:@link-to-this"])
        .args(["--context", "Reading List.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("books/Dune.md"));
}

#[test]
fn types_and_collections() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("2 types"));

    let output = sets_cmd(&vault)
        .args(["collections", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(json_names(&output.stdout), vec!["Favorites", "Reading List"]);
}

#[test]
fn add_persists_membership() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["add", "books/Emma.md", "Reading List.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Emma to Reading List"));

    let output = sets_cmd(&vault)
        .args(["members", "Reading List.md", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(json_names(&output.stdout), vec!["Dune", "Emma"]);

    let output = sets_cmd(&vault)
        .args(["available", "books/Emma.md", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(json_names(&output.stdout), vec!["Favorites"]);
}

#[test]
fn new_creates_document_in_collection() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["new", "Foundation", "--type", "book", "--in", "Favorites.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Foundation"));

    let snapshot = fs::read_to_string(&vault).unwrap();
    assert!(snapshot.contains("Foundation.md"));

    let output = sets_cmd(&vault)
        .args(["members", "Favorites.md", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(json_names(&output.stdout), vec!["Foundation"]);

    sets_cmd(&vault)
        .args(["new", "Foundation", "--type", "book"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_rejects_non_creatable_clauses() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["new", "Nope", "-w", "priority:gt:3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot create"));
    assert!(!fs::read_to_string(&vault).unwrap().contains("Nope.md"));
}

#[test]
fn config_file_next_to_vault() {
    let (temp, vault) = setup();
    fs::write(
        temp.path().join("sets.toml"),
        "collection_type = \"book\"\n\n[properties]\npriority = \"number\"\n",
    )
    .unwrap();

    let output = sets_cmd(&vault)
        .args(["collections", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(
        json_names(&output.stdout),
        vec!["Dune", "Emma", "Neuromancer"]
    );
}

#[test]
fn missing_vault_fails() {
    let temp = TempDir::new().unwrap();
    sets_cmd(&temp.path().join("nope.json"))
        .arg("types")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load vault"));
}

#[test]
fn yaml_output() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["members", "Reading List.md", "--output", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path: books/Dune.md"));
}

#[test]
fn members_of_non_collection_warns() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["members", "books/Dune.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune is not a collection"));
}

#[test]
fn new_accepts_short_flags() {
    let (_temp, vault) = setup();
    sets_cmd(&vault)
        .args(["new", "Hyperion", "-t", "book", "-i", "Reading List.md", "-w", "status:eq:todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created Hyperion"));

    let output = sets_cmd(&vault)
        .args(["query", "status:eq:todo", "-c", "Reading List.md"])
        .args(["collection:hasthis", "--output", "json"])
        .output()
        .unwrap();
    assert_eq!(json_names(&output.stdout), vec!["Hyperion"]);
}
