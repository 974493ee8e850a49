#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const FIGHTER: &str = r#"{
  "name": "Brakka",
  "type": "character",
  "hasPlayerOwner": true,
  "ownership": { "default": "NONE", "users": { "u1": "OWNER" } },
  "system": {
    "attributes": {
      "hp": { "value": 31, "max": 44, "temp": 5 },
      "ac": { "value": 18 }
    }
  }
}"#;

fn hovertip_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin("hovertip"));
    for var in [
        "HOVERTIP_LOG",
        "HOVERTIP_ROWS_PER_TOOLTIP",
        "HOVERTIP_SHOW_ON_LEFT",
        "HOVERTIP_SHOW_TOKEN_NAME",
        "HOVERTIP_VISIBILITY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_show_as_gm() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .arg("--gm")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Brakka\n"))
        .stdout(predicate::str::contains("HP 36/44"))
        .stdout(predicate::str::contains("AC 18"));
}

#[test]
fn test_show_player_is_gated_by_default() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--user", "u1"])
        .assert()
        .success()
        .stdout("No tooltip\n");
}

#[test]
fn test_show_player_with_settings_file() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);
    let settings = write(
        &temp,
        "hovertip.toml",
        "visibility = \"owned\"\nhp_minimum_permission = \"OWNER\"\nshow_token_name = false\n",
    );

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--user", "u1", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout("HP 36/44\nAC 18\n");

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--user", "u2", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout("No tooltip\n");
}

#[test]
fn test_show_token_name_override_and_json() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--gm", "--token-name", "Big B", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Big B\""))
        .stdout(predicate::str::contains("\"label\": \"HP\""))
        .stdout(predicate::str::contains("\"rows_per_column\": 5"));
}

#[test]
fn test_unknown_system_fails() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--system", "gurps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'gurps'"))
        .stderr(predicate::str::contains("dnd5e"));
}

#[test]
fn test_show_at_prints_anchor() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--gm", "--at", "100.4,50.7,100", "--scale", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("anchor: left 259, top 42\n"));

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--gm", "--json", "--at", "100.4,50.7,100", "--scale", "1.5"])
        .env("HOVERTIP_SHOW_ON_LEFT", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"side\": \"left\""))
        .stdout(predicate::str::contains("\"offset\": 1827.0"))
        .stdout(predicate::str::contains("\"name\": \"Brakka\""));
}

#[test]
fn test_show_at_skips_anchor_when_gated_off() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", FIGHTER);

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .args(["--at", "0,0,100"])
        .assert()
        .success()
        .stdout("No tooltip\n");
}

#[test]
fn test_invalid_actor_fails() {
    let temp = TempDir::new().unwrap();
    let actor = write(&temp, "actor.json", "{ not json");

    hovertip_cmd()
        .arg("show")
        .arg(&actor)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read actor"));
}

#[test]
fn test_missing_settings_file_fails() {
    let temp = TempDir::new().unwrap();

    hovertip_cmd()
        .arg("settings")
        .arg("--settings")
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Settings file not found"));
}

#[test]
fn test_settings_prints_effective_values() {
    let temp = TempDir::new().unwrap();
    let settings = write(&temp, "hovertip.toml", "rows_per_tooltip = 3\n");

    hovertip_cmd()
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("rows_per_tooltip = 5"))
        .stdout(predicate::str::contains(
            "saving_throws_minimum_permission = \"HIDE_FROM_EVERYONE\"",
        ));

    hovertip_cmd()
        .args(["settings", "--settings"])
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("rows_per_tooltip = 3"));

    hovertip_cmd()
        .args(["settings", "--settings"])
        .arg(&settings)
        .env("HOVERTIP_ROWS_PER_TOOLTIP", "7")
        .assert()
        .success()
        .stdout(predicate::str::contains("rows_per_tooltip = 7"));
}
