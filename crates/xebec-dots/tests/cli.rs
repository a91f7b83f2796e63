use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn xebec(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xebec"))
        .args(args)
        .env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("APPDATA")
        .env_remove("XEBEC_LOG")
        .output()
        .expect("run xebec")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

#[test]
fn dry_run_prints_selected_sections_only() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = xebec(
        tmp.path(),
        &["config", "terminal", "--dry-run", "--section", "font"],
    );
    assert!(out.status.success(), "{out:?}");
    let text = stdout(&out);
    assert!(text.contains("[font]"));
    assert!(text.contains("JetBrains Mono"));
    assert!(!text.contains("[window]"));
    assert!(!tmp.path().join(".config/alacritty").exists());
}

#[test]
fn dry_run_uses_template_from_settings() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tpl = tmp.path().join("tpl.toml");
    fs::write(&tpl, "[cursor]\nblink = true\n[font]\nsize = 9\n").expect("seed");
    let settings = tmp.path().join("settings.toml");
    fs::write(
        &settings,
        format!("alacritty_template = {:?}\n", tpl.to_string_lossy()),
    )
    .expect("seed");

    let out = xebec(
        tmp.path(),
        &[
            "--settings",
            &settings.to_string_lossy(),
            "config",
            "terminal",
            "--dry-run",
            "--section",
            "cursor",
        ],
    );
    assert!(out.status.success(), "{out:?}");
    assert_eq!(stdout(&out), "[cursor]\nblink = true\n");
}

#[test]
fn unknown_component_exits_with_one() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = xebec(tmp.path(), &["config", "editor"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown component"));
}

#[test]
fn unknown_section_is_rejected_by_the_parser() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = xebec(tmp.path(), &["config", "terminal", "--section", "theme"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("theme"));
}

#[test]
fn broken_settings_file_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join(".config/xebec");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("settings.toml"), "probe_timeout = 5\n").expect("seed");
    let out = xebec(tmp.path(), &["version"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("settings.toml"));
}

#[test]
fn version_and_shell_messages() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = xebec(tmp.path(), &["version"]);
    assert!(out.status.success(), "{out:?}");
    let text = stdout(&out);
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
    assert!(text.contains("XEBEC"));
    assert!(text.contains("Platform"));

    let out = xebec(tmp.path(), &["config", "shell"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("not available yet"));

    let out = xebec(tmp.path(), &["config"]);
    assert!(stdout(&out).contains("Usage: xebec config"));
}
