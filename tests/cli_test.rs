use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn herald(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("herald").unwrap();
    cmd.env("HERALD_HOME", home.path())
        .env_remove("HERALD_SUMMARIZING")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn style_set_and_show() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["style", "tts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Herald style set to: tts"));

    herald(&home)
        .arg("style")
        .assert()
        .success()
        .stdout(predicate::str::contains("Herald style: tts"));
}

#[test]
fn invalid_style_fails() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["style", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn preferences_round_trip() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["preferences", "max-words", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Max words set to: 20"));

    herald(&home)
        .args(["preferences", "summary", "\"Talk like a sports announcer\""])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Summary prompt set to: \"Talk like a sports announcer\"",
        ));

    herald(&home)
        .args(["preferences", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_words: 20"))
        .stdout(predicate::str::contains("summary: \"Talk like a sports announcer\""));

    herald(&home)
        .args(["preferences", "summary-clear"])
        .assert()
        .success();

    herald(&home)
        .args(["preferences", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uses default TTS prompt"));
}

#[test]
fn zero_max_words_is_rejected() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["preferences", "max-words", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_words requires a positive number"));
}

#[test]
fn unknown_notification_type_is_ignored() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["hook", "notification", "--json", r#"{"notification_type":"unknown_x"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"handled":false,"reason":"invalid_type"}"#));

    assert!(!home.path().join("herald.lock").exists());
}

#[test]
fn disabled_hook_does_nothing() {
    let home = TempDir::new().unwrap();

    herald(&home).arg("disable").assert().success();

    herald(&home)
        .args(["hook", "stop", "--json", "{}"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""reason":"disabled""#));
}

#[test]
fn silent_stop_leaves_no_history() {
    let home = TempDir::new().unwrap();
    herald(&home).args(["style", "silent"]).assert().success();

    for _ in 0..2 {
        herald(&home)
            .args(["hook", "stop", "--json", "{}"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#"{"handled":true,"reason":"played"}"#));
    }

    assert!(!home.path().join("recent.json").exists());
    assert!(!home.path().join("herald.lock").exists());
}

#[test]
fn unknown_provider_does_not_discard_disabled_flag() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.json"),
        r#"{"enabled":false,"style":"silent","tts":{"provider":"festival"}}"#,
    )
    .unwrap();

    herald(&home)
        .args(["hook", "stop", "--json", "{}"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"handled":false,"reason":"disabled"}"#));

    herald(&home)
        .args(["config", "--validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown TTS provider: festival"));
}

#[test]
fn hooks_are_skipped_inside_summarizer() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .env("HERALD_SUMMARIZING", "1")
        .args(["hook", "stop", "--json", "{}"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_init_and_validate() {
    let home = TempDir::new().unwrap();

    herald(&home)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized config at"));

    assert!(home.path().join("config.json").exists());

    herald(&home)
        .args(["config", "--validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config OK"));
}
