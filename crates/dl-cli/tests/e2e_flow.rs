//! End-to-end tests driving the `dl` binary against a feed source.
//!
//! A temp config points at a local JSON feed, so runs are deterministic and
//! touch no network.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn dl_binary() -> String {
    env!("CARGO_BIN_EXE_dl").to_string()
}

/// Two activities on Monday 2025-06-02, one on Wednesday 2025-06-04.
const FEED: &str = r#"[
    {
        "id": "c1",
        "type": "git-commit",
        "title": "Fix auth bug",
        "timestamp": "2025-06-02T09:07:00+02:00",
        "url": "https://github.com/acme/app/commit/abc123"
    },
    {
        "id": "m1",
        "type": "calendar",
        "title": "Standup",
        "timestamp": "2025-06-02T09:12:00+02:00",
        "duration_ms": 3600000
    },
    {
        "id": "c2",
        "type": "git-commit",
        "title": "Deploy release",
        "timestamp": "2025-06-04T15:30:00+02:00"
    }
]"#;

/// Writes the feed and a config pointing at it, returning the config path.
fn write_fixtures(temp: &Path) -> PathBuf {
    let feed_path = temp.join("feed.json");
    std::fs::write(&feed_path, FEED).unwrap();

    let config_path = temp.join("config.toml");
    std::fs::write(
        &config_path,
        format!("[sources.feed]\npath = \"{}\"\n", feed_path.display()),
    )
    .unwrap();
    config_path
}

fn run_dl(temp: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(dl_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run dl")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "dl should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn day_table_shows_legend_and_activities() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(temp.path(), &config, &["day", "--date", "2025-06-02"]);
    let text = stdout_of(&output);

    assert!(text.contains("2 activities: 1 [git-commit]  1 [calendar]"));
    assert!(text.contains("09:07  [git-commit]     Fix auth bug  (Feed)"));
    assert!(text.contains("09:12  [calendar]       Standup  (Feed)"));
}

#[test]
fn day_details_flag_adds_urls_and_durations() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(
        temp.path(),
        &config,
        &["day", "--date", "2025-06-02", "--details"],
    );
    let text = stdout_of(&output);

    assert!(text.contains("url: https://github.com/acme/app/commit/abc123"));
    assert!(text.contains("duration: 1h 0m"));
}

#[test]
fn empty_day_csv_is_header_only() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(
        temp.path(),
        &config,
        &["day", "--date", "2025-06-03", "--format", "csv"],
    );
    assert_eq!(
        stdout_of(&output),
        "timestamp,type,source,title,description,duration,url\n"
    );
}

#[test]
fn day_taxi_rounds_to_quarter_hours() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(
        temp.path(),
        &config,
        &["day", "--date", "2025-06-02", "--format", "taxi"],
    );
    let text = stdout_of(&output);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "02/06/2025");
    // 09:07 with a 5-minute gap to the next activity: end 09:12, rounded
    // out to 09:00-09:15.
    assert_eq!(lines[1], "09:00-09:15 Fix auth bug (Feed)");
    // 09:12 + 1h explicit duration, rounded out to 09:00-10:15.
    assert_eq!(lines[2], "09:00-10:15 Standup (Feed)");
}

#[test]
fn week_table_skips_empty_days() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(temp.path(), &config, &["week", "--date", "2025-06-04"]);
    let text = stdout_of(&output);

    assert!(text.contains("Monday, Jun 2, 2025"));
    assert!(text.contains("Wednesday, Jun 4, 2025"));
    assert!(!text.contains("Jun 3"));
    assert!(text.contains("Deploy release"));
}

#[test]
fn week_json_keeps_all_seven_days() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(
        temp.path(),
        &config,
        &["week", "--date", "2025-06-02", "--format", "json"],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();

    let days = value["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2025-06-02");
    assert_eq!(days[0]["activities"].as_array().unwrap().len(), 2);
    assert_eq!(days[6]["date"], "2025-06-08");
    assert_eq!(days[6]["activities"], serde_json::json!([]));
}

#[test]
fn max_items_keeps_the_earliest_activities() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(
        temp.path(),
        &config,
        &[
            "day",
            "--date",
            "2025-06-02",
            "--format",
            "csv",
            "--max-items",
            "1",
        ],
    );
    let text = stdout_of(&output);

    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("Fix auth bug"));
    assert!(!text.contains("Standup"));
}

#[test]
fn sources_command_lists_configuration_and_kinds() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(temp.path(), &config, &["sources"]);
    let text = stdout_of(&output);

    assert!(text.contains("- feed (enabled)"));
    assert!(text.contains("- github: username (required)"));
}

#[test]
fn unknown_source_kind_fails_at_startup() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "[sources.jenkins]\nurl = \"https://ci.example.com\"\n").unwrap();

    let output = run_dl(temp.path(), &config_path, &["day", "--date", "2025-06-02"]);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("unknown source kind: jenkins"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_date_argument_fails_with_a_hint() {
    let temp = TempDir::new().unwrap();
    let config = write_fixtures(temp.path());

    let output = run_dl(temp.path(), &config, &["day", "--date", "someday"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("YYYY-MM-DD"));
}
