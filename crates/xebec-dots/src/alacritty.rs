//! Filtering the Alacritty template and installing the result.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::apply::{self, ApplyReport};
use crate::error::{Error, Result};
use crate::filter::{self, FilterToggles};
use crate::platform;
use crate::settings::Settings;
use crate::terminals::{self, Host, registry};

pub const BUNDLED_TEMPLATE: &str = include_str!("../assets/alacritty.toml");

/// Where the generated config goes. Same rule order as detection, so the
/// written file is the one detection reports as the primary path.
pub fn config_path(host: &dyn Host) -> Option<PathBuf> {
    registry::ALACRITTY_CONFIGS
        .iter()
        .map(|rules| platform::resolve_path(rules, host.os(), host.env()))
        .find(|p| !p.is_empty())
        .map(PathBuf::from)
}

fn target(host: &dyn Host) -> Result<PathBuf> {
    config_path(host).ok_or_else(|| {
        Error::prerequisite(format!(
            "no Alacritty config location on {}",
            host.os().platform_name()
        ))
    })
}

pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).map_err(|e| Error::io_at("read template", p, e)),
        None => Ok(BUNDLED_TEMPLATE.to_string()),
    }
}

/// Filtered template text, nothing written.
pub fn render(settings: &Settings, toggles: FilterToggles) -> Result<String> {
    let source = load_template(settings.alacritty_template.as_deref())?;
    Ok(filter::filter(&source, toggles))
}

pub fn configure(
    host: &dyn Host,
    settings: &Settings,
    toggles: FilterToggles,
    at: NaiveDateTime,
) -> Result<ApplyReport> {
    let desc = registry::lookup(registry::ALACRITTY_ID)
        .ok_or_else(|| Error::prerequisite("Alacritty is not a known terminal"))?;
    if !terminals::is_installed(host, desc) {
        return Err(Error::prerequisite(
            "Alacritty is not installed. Install it first, then configure it.",
        ));
    }
    let dest = target(host)?;
    let content = render(settings, toggles)?;
    let keys: Vec<_> = toggles.selected().iter().map(|k| k.as_str()).collect();
    info!(dest = %dest.display(), sections = ?keys, "configuring alacritty");
    apply::apply_config(&dest, &content, at)
}

/// Copy the current config aside. `Ok(None)` when there is no config yet.
pub fn backup_now(host: &dyn Host, at: NaiveDateTime) -> Result<Option<PathBuf>> {
    let dest = target(host)?;
    apply::backup_existing(&dest, at)
}

pub fn list_backups(host: &dyn Host) -> Result<Vec<PathBuf>> {
    apply::list_backups(&target(host)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::ErrorKind;
    use crate::filter::OptionKey;
    use crate::platform::{Env, Os};
    use crate::terminals::fake::FakeHost;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 4)
            .and_then(|d| d.and_hms_opt(10, 20, 30))
            .expect("valid instant")
    }

    fn host(root: &Path, installed: bool) -> FakeHost {
        let mut h = FakeHost {
            env: Env::from_pairs([("HOME", root.to_string_lossy().into_owned())]),
            ..Default::default()
        };
        if installed {
            h.on_path.insert("alacritty".into());
        }
        h
    }

    #[test]
    fn bundled_template_has_every_section() {
        for key in OptionKey::ALL {
            let only = filter::filter(BUNDLED_TEMPLATE, FilterToggles::from_keys([key]));
            let header = match key {
                OptionKey::Shell => "[terminal".to_string(),
                other => format!("[{other}"),
            };
            assert!(only.contains(&header), "{key}: missing {header}");
        }
    }

    #[test]
    fn path_prefers_xdg_then_home() {
        let mut h = host(Path::new("/home/ana"), true);
        assert_eq!(
            config_path(&h),
            Some(PathBuf::from("/home/ana/.config/alacritty/alacritty.toml"))
        );
        h.env = Env::from_pairs([("HOME", "/home/ana"), ("XDG_CONFIG_HOME", "/xdg")]);
        assert_eq!(
            config_path(&h),
            Some(PathBuf::from("/xdg/alacritty/alacritty.toml"))
        );
    }

    #[test]
    fn windows_uses_appdata() {
        let h = FakeHost {
            os: Some(Os::Windows),
            env: Env::from_pairs([("APPDATA", "C:/Users/ana/AppData/Roaming")]),
            ..Default::default()
        };
        assert_eq!(
            config_path(&h),
            Some(PathBuf::from("C:/Users/ana/AppData/Roaming").join("alacritty/alacritty.toml"))
        );
    }

    #[test]
    fn not_installed_is_a_prerequisite_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = configure(
            &host(tmp.path(), false),
            &Settings::default(),
            FilterToggles::all(),
            at(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Prerequisite);
        assert!(!tmp.path().join(".config").exists());
    }

    #[test]
    fn configure_writes_filtered_template_and_backs_up() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let h = host(tmp.path(), true);
        let toggles = FilterToggles::from_keys([OptionKey::Font]);

        let first = configure(&h, &Settings::default(), toggles, at()).expect("configure");
        assert_eq!(first.backup, None);
        let written = fs::read_to_string(&first.destination).expect("read");
        assert_eq!(written, filter::filter(BUNDLED_TEMPLATE, toggles));
        assert!(!written.contains("[window]"));

        let second = configure(&h, &Settings::default(), FilterToggles::all(), at())
            .expect("configure again");
        let backup = second.backup.expect("backup");
        assert_eq!(fs::read_to_string(backup).expect("read backup"), written);
        assert_eq!(list_backups(&h).expect("list").len(), 1);
    }

    #[test]
    fn template_override_is_used() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let tpl = tmp.path().join("tpl.toml");
        fs::write(&tpl, "[font]\nsize = 20\n[window]\nopacity = 1\n").expect("seed");
        let settings = Settings {
            alacritty_template: Some(tpl),
            ..Settings::default()
        };
        let out = render(&settings, FilterToggles::from_keys([OptionKey::Font])).expect("render");
        assert_eq!(out, "[font]\nsize = 20\n");
    }

    #[test]
    fn missing_template_override_names_the_path() {
        let settings = Settings {
            alacritty_template: Some(PathBuf::from("/nope/tpl.toml")),
            ..Settings::default()
        };
        let err = render(&settings, FilterToggles::all()).unwrap_err();
        assert!(err.to_string().contains("/nope/tpl.toml"), "{err}");
    }

    #[test]
    fn backup_now_without_config_is_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let h = host(tmp.path(), true);
        assert_eq!(backup_now(&h, at()).expect("backup"), None);
    }
}
