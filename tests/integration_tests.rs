//! Integration tests for the monthview binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn monthview() -> Command {
    let mut cmd = Command::cargo_bin("monthview").unwrap();
    cmd.env("MONTHVIEW_TEST_TIME", "2024-03-14")
        .env("LC_ALL", "en_US.UTF-8")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("monthview-no-config"))
        .env_remove("MONTHVIEW_LOG");
    cmd
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "monthview-it-{}-{}",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

mod display_tests {
    use super::*;

    #[test]
    fn test_current_month_by_default() {
        monthview()
            .assert()
            .success()
            .stdout(predicate::str::starts_with("March 2024"))
            .stdout(predicate::str::contains("[<] [Today] [>]"));
    }

    #[test]
    fn test_month_and_year_arguments() {
        monthview()
            .args(["-c", "8", "2", "2026"])
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2026"))
            .stdout(predicate::str::contains("Feb"));
    }

    #[test]
    fn test_six_weeks_without_events() {
        let out = stdout_of(monthview().args(["-c", "10", "3", "2024"]));
        assert_eq!(out.lines().count(), 2 + 6);
    }

    #[test]
    fn test_visible_weeks_option() {
        let out = stdout_of(monthview().args(["-w", "3", "-c", "10", "3", "2024"]));
        assert_eq!(out.lines().count(), 2 + 3);
        assert!(!out.contains("Apr"));
    }

    #[test]
    fn test_no_escape_codes_when_piped() {
        monthview()
            .assert()
            .success()
            .stdout(predicate::str::contains("\x1b[").not());
    }

    #[test]
    fn test_week_numbers() {
        let out = stdout_of(monthview().args(["-N", "-c", "10", "3", "2024"]));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[2].starts_with(" 9 "));
    }
}

mod navigation_tests {
    use super::*;

    #[test]
    fn test_go_next() {
        monthview()
            .args(["-g", "next", "3", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("April 2024"));
    }

    #[test]
    fn test_go_prev_twice_crosses_year() {
        monthview()
            .args(["-g", "prev", "-g", "prev", "2", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("December 2023"));
    }

    #[test]
    fn test_go_today() {
        monthview()
            .args(["-g", "today", "1", "2020"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("March 2024"));
    }

    #[test]
    fn test_interactive_session() {
        monthview()
            .args(["-i", "-c", "10"])
            .write_stdin("n\np\np\npick 1 1\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("April 2024"))
            .stdout(predicate::str::contains("February 2024"))
            .stdout(predicate::str::contains("picked 2024-01-28"));
    }
}

mod events_tests {
    use super::*;

    const EVENTS: &str = r#"
[[event]]
date = "2024-03-05"
description = "First"

[[event]]
date = "2024-03-05"
description = "Second"

[[event]]
date = "2024-03-05"
description = "Third"

[[event]]
date = "2024-03-05"
description = "Fourth"

[[event]]
date = 2024-03-05
description = "Fifth"
"#;

    #[test]
    fn test_events_capped_at_three() {
        let path = temp_file("capped.toml", EVENTS);
        let out = stdout_of(monthview().args(["-c", "10", "-e"]).arg(&path).args(["3", "2024"]));
        assert!(out.contains("First"));
        assert!(out.contains("Third"));
        assert!(!out.contains("Fourth"));
        assert!(!out.contains("Fifth"));
        assert_eq!(out.lines().count(), 2 + 6 + 3);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_events_file_from_config() {
        let events = temp_file("cfg-events.toml", EVENTS);
        let config = temp_file(
            "config.toml",
            &format!(
                "visible_weeks = 2\ncell_width = 10\nevents_file = {:?}\n",
                events.display().to_string()
            ),
        );
        let out = stdout_of(monthview().arg("--config").arg(&config).args(["3", "2024"]));
        assert!(out.contains("Second"));
        assert_eq!(out.lines().count(), 2 + 2 + 3);
        std::fs::remove_file(events).ok();
        std::fs::remove_file(config).ok();
    }

    #[test]
    fn test_pick_shows_all_events() {
        let path = temp_file("pick.toml", EVENTS);
        monthview()
            .args(["-i", "-c", "10", "-e"])
            .arg(&path)
            .args(["3", "2024"])
            .write_stdin("pick 2 3\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("2024-03-05 (5 events)"))
            .stdout(predicate::str::contains("  - Fifth"));
        std::fs::remove_file(path).ok();
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_zero_weeks_rejected() {
        monthview()
            .args(["-w", "0"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("monthview: invalid configuration"));
    }

    #[test]
    fn test_huge_week_count_rejected() {
        monthview()
            .args(["-w", "4294967295"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("monthview: invalid configuration"));
    }

    #[test]
    fn test_invalid_month() {
        monthview()
            .args(["smarch", "2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid month: smarch"));
    }

    #[test]
    fn test_nonexistent_date() {
        monthview()
            .args(["30", "2", "2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid date"));
    }

    #[test]
    fn test_missing_events_file() {
        monthview()
            .args(["-e", "/nonexistent/monthview/events.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot read"));
    }

    #[test]
    fn test_unknown_go_action() {
        monthview().args(["-g", "sideways"]).assert().failure();
    }
}
