mod common;

use std::fs;

use common::{StubHost, instant};
use xebec_dots::alacritty;
use xebec_dots::error::ErrorKind;
use xebec_dots::filter::{EMPTY_CONFIG_PLACEHOLDER, FilterToggles, OptionKey};
use xebec_dots::settings::Settings;
use xebec_dots::terminals;

#[test]
fn configure_then_reconfigure_keeps_a_backup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let host = StubHost::linux(tmp.path(), &["alacritty"]);
    let settings = Settings::default();

    let before = terminals::find(&host, "alacritty").expect("registered");
    assert!(before.installed);
    assert!(!before.config_exists);

    let first = alacritty::configure(
        &host,
        &settings,
        FilterToggles::from_keys([OptionKey::Colors, OptionKey::Cursor]),
        instant(8, 0, 0),
    )
    .expect("first configure");
    assert_eq!(
        first.destination,
        tmp.path().join(".config/alacritty/alacritty.toml")
    );
    assert!(first.backup.is_none());

    let after = terminals::find(&host, "alacritty").expect("registered");
    assert!(after.config_exists);
    assert_eq!(after.config_path, first.destination.to_string_lossy());

    let second = alacritty::configure(&host, &settings, FilterToggles::all(), instant(9, 30, 0))
        .expect("second configure");
    let backup = second.backup.expect("backup of first run");
    assert_eq!(
        backup,
        tmp.path()
            .join(".config/alacritty/backups/alacritty_2026-10-19_09-30-00.toml")
    );
    let backed_up = fs::read_to_string(&backup).expect("read backup");
    assert!(backed_up.contains("[colors.primary]"));
    assert!(!backed_up.contains("[font]"));

    let current = fs::read_to_string(&second.destination).expect("read config");
    assert_eq!(current, alacritty::BUNDLED_TEMPLATE);
    assert_eq!(second.bytes_written, current.len());
}

#[test]
fn nothing_selected_writes_placeholder() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let host = StubHost::linux(tmp.path(), &["alacritty"]);
    let report = alacritty::configure(
        &host,
        &Settings::default(),
        FilterToggles::default(),
        instant(1, 2, 3),
    )
    .expect("configure");
    assert_eq!(
        fs::read_to_string(report.destination).expect("read"),
        EMPTY_CONFIG_PLACEHOLDER
    );
}

#[test]
fn missing_alacritty_leaves_filesystem_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let host = StubHost::linux(tmp.path(), &["kitty"]);
    let err = alacritty::configure(
        &host,
        &Settings::default(),
        FilterToggles::all(),
        instant(1, 2, 3),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Prerequisite);
    assert!(err.to_string().contains("not installed"));
    assert!(fs::read_dir(tmp.path()).expect("read").next().is_none());
}

#[test]
fn xdg_config_home_wins_over_home() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let xdg = tmp.path().join("xdg");
    let mut host = StubHost::linux(tmp.path(), &["alacritty"]);
    host.env = xebec_dots::platform::Env::from_pairs([
        ("HOME", tmp.path().to_string_lossy().into_owned()),
        ("XDG_CONFIG_HOME", xdg.to_string_lossy().into_owned()),
    ]);
    let report = alacritty::configure(
        &host,
        &Settings::default(),
        FilterToggles::all(),
        instant(1, 2, 3),
    )
    .expect("configure");
    assert_eq!(report.destination, xdg.join("alacritty/alacritty.toml"));
    assert!(!tmp.path().join(".config").exists());
}

#[test]
fn backups_listed_in_time_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let host = StubHost::linux(tmp.path(), &["alacritty"]);
    let settings = Settings::default();
    for (i, h) in [10, 11, 12].into_iter().enumerate() {
        let toggles = if i % 2 == 0 {
            FilterToggles::all()
        } else {
            FilterToggles::from_keys([OptionKey::Font])
        };
        alacritty::configure(&host, &settings, toggles, instant(h, 0, 0)).expect("configure");
    }
    let names: Vec<String> = alacritty::list_backups(&host)
        .expect("list")
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .collect();
    assert_eq!(
        names,
        [
            "alacritty_2026-10-19_11-00-00.toml",
            "alacritty_2026-10-19_12-00-00.toml"
        ]
    );
}
