use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::{FilterToggles, OptionKey};
use crate::platform::{self, Env, Os, OsSelector, PathRule, rule};

fn default_probe_timeout_ms() -> u64 {
    3000
}

const SETTINGS_PATH: &[&[PathRule]] = &[
    &[
        rule(OsSelector::Windows, "{APPDATA}/xebec/settings.toml"),
        rule(OsSelector::NotWindows, "{XDG_CONFIG_HOME}/xebec/settings.toml"),
    ],
    &[rule(OsSelector::NotWindows, "{HOME}/.config/xebec/settings.toml")],
];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Replaces the bundled Alacritty template.
    pub alacritty_template: Option<PathBuf>,
    /// Branding JSON; the bundled branding is used when unset.
    pub branding: Option<PathBuf>,
    /// Options pre-checked on the Alacritty checkbox screen.
    pub default_sections: Vec<OptionKey>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            alacritty_template: None,
            branding: None,
            default_sections: Vec::new(),
        }
    }
}

impl Settings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms.max(1))
    }

    pub fn default_toggles(&self) -> FilterToggles {
        FilterToggles::from_keys(self.default_sections.iter().copied())
    }

    pub fn parse(path: &Path, data: &str) -> Result<Self> {
        toml::from_str(data)
            .map_err(|e| Error::config(format!("TOML parse error in {}: {e}", path.display())))
    }
}

/// First existing default location, if any.
pub fn default_path(os: Os, env: &Env) -> Option<PathBuf> {
    SETTINGS_PATH
        .iter()
        .map(|rules| platform::resolve_path(rules, os, env))
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// An explicit path must exist; the default location is optional.
pub fn load(explicit: Option<&Path>, os: Os, env: &Env) -> Result<Settings> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_path(os, env) {
            Some(p) => p,
            None => {
                debug!("no settings file, using defaults");
                return Ok(Settings::default());
            }
        },
    };
    let data = fs::read_to_string(&path)
        .map_err(|e| Error::config(format!("failed to read settings {}: {e}", path.display())))?;
    let settings = Settings::parse(&path, &data)?;
    debug!(path = %path.display(), ?settings, "settings loaded");
    Ok(settings)
}
