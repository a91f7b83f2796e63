//! OS identification, environment snapshots and the generic config-path
//! resolver.
//!
//! Path templates are plain strings such as `{HOME}/.config/kitty/kitty.conf`.
//! A template may start with one `{VAR}` placeholder; the remaining segments are
//! literal and joined with the platform separator.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Environment variables consulted when resolving paths.
pub const ENV_KEYS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "APPDATA",
    "LOCALAPPDATA",
    "USERPROFILE",
    "PROGRAMFILES",
    "PROGRAMFILES(X86)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Os {
    pub fn current() -> Self {
        Self::from_id(std::env::consts::OS)
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "linux" => Os::Linux,
            "macos" | "darwin" => Os::MacOs,
            "windows" => Os::Windows,
            _ => Os::Other,
        }
    }

    pub fn platform_name(self) -> &'static str {
        match self {
            Os::Linux => "Linux",
            Os::MacOs => "macOS",
            Os::Windows => "Windows",
            Os::Other => std::env::consts::OS,
        }
    }

    pub fn package_manager(self) -> &'static str {
        match self {
            Os::Windows => "winget/scoop",
            // Debian/Ubuntu assumed.
            Os::Linux => "apt",
            _ => "N/A",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.platform_name())
    }
}

/// Which operating systems a path rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsSelector {
    Any,
    /// Linux and macOS.
    Unix,
    Windows,
    /// Everything except Windows, including unknown systems.
    NotWindows,
}

impl OsSelector {
    pub fn matches(self, os: Os) -> bool {
        match self {
            OsSelector::Any => true,
            OsSelector::Unix => matches!(os, Os::Linux | Os::MacOs),
            OsSelector::Windows => os == Os::Windows,
            OsSelector::NotWindows => os != Os::Windows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRule {
    pub os: OsSelector,
    pub template: &'static str,
}

pub const fn rule(os: OsSelector, template: &'static str) -> PathRule {
    PathRule { os, template }
}

/// Read-only snapshot of the variables in [`ENV_KEYS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    pub fn from_process() -> Self {
        let mut vars = BTreeMap::new();
        for key in ENV_KEYS {
            if let Ok(v) = std::env::var(key) {
                vars.insert((*key).to_string(), v);
            }
        }
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Missing variables read as the empty string.
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map(String::as_str).unwrap_or("")
    }
}

/// Expand a single template. Returns `None` when the leading variable is unset
/// so callers never end up with a path relative to the working directory.
pub fn expand_template(template: &str, env: &Env) -> Option<PathBuf> {
    let mut segments = template.split('/').filter(|s| !s.is_empty());
    let first = segments.next()?;

    let mut out = match first
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
    {
        Some(var) => {
            let value = env.get(var).trim();
            if value.is_empty() {
                return None;
            }
            PathBuf::from(value)
        }
        None if template.starts_with('/') => PathBuf::from("/").join(first),
        None => PathBuf::from(first),
    };

    for seg in segments {
        out.push(seg);
    }
    Some(out)
}

/// Evaluate one resolver: the first rule whose selector matches `os` decides
/// the path. No matching rule (unsupported OS) or an unset variable yields `""`.
pub fn resolve_path(rules: &[PathRule], os: Os, env: &Env) -> String {
    rules
        .iter()
        .find(|r| r.os.matches(os))
        .and_then(|r| expand_template(r.template, env))
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Directories probed for executables when the search path has no hit.
pub fn common_install_dirs(os: Os, env: &Env) -> Vec<PathBuf> {
    let templates: &[&str] = if os == Os::Windows {
        &[
            "{PROGRAMFILES}/Alacritty",
            "{PROGRAMFILES}/WezTerm",
            "{PROGRAMFILES}/Kitty",
            "{PROGRAMFILES}/Hyper",
            "{PROGRAMFILES(X86)}/Alacritty",
            "{PROGRAMFILES(X86)}/WezTerm",
            "{USERPROFILE}/AppData/Local/Programs/alacritty",
            "{USERPROFILE}/AppData/Local/Programs/wezterm",
            "{USERPROFILE}/AppData/Local/Microsoft/WindowsApps",
        ]
    } else {
        &[
            "{HOME}/.local/bin",
            "{HOME}/.local/share/applications",
            "/usr/local/bin",
            "/usr/bin",
            "/opt",
        ]
    };
    templates
        .iter()
        .filter_map(|t| expand_template(t, env))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Env {
        Env::from_pairs([("HOME", "/home/ana"), ("APPDATA", "C:/Users/ana/AppData")])
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = [
            rule(OsSelector::Windows, "{APPDATA}/rio/config.toml"),
            rule(OsSelector::Any, "{HOME}/.config/rio/config.toml"),
        ];
        assert_eq!(
            resolve_path(&rules, Os::Linux, &env()),
            PathBuf::from("/home/ana/.config/rio/config.toml")
                .to_string_lossy()
                .into_owned()
        );
        assert!(resolve_path(&rules, Os::Windows, &env()).contains("rio"));
        assert!(resolve_path(&rules, Os::Windows, &env()).starts_with("C:"));
    }

    #[test]
    fn unsupported_os_resolves_empty() {
        let rules = [rule(OsSelector::Windows, "{APPDATA}/ConEmu.xml")];
        assert_eq!(resolve_path(&rules, Os::Linux, &env()), "");
        assert_eq!(resolve_path(&rules, Os::MacOs, &env()), "");
    }

    #[test]
    fn unset_leading_variable_resolves_empty() {
        let rules = [rule(OsSelector::Any, "{XDG_CONFIG_HOME}/alacritty/alacritty.toml")];
        assert_eq!(resolve_path(&rules, Os::Linux, &env()), "");
    }

    #[test]
    fn absolute_literal_templates_stay_absolute() {
        let p = expand_template("/usr/local/bin", &Env::default()).expect("literal path");
        assert!(p.is_absolute() || cfg!(windows));
        assert!(p.ends_with("usr/local/bin"));
    }

    #[test]
    fn common_dirs_skip_unset_roots() {
        let dirs = common_install_dirs(Os::Linux, &Env::default());
        assert_eq!(dirs.len(), 3);
        let dirs = common_install_dirs(Os::Linux, &env());
        assert_eq!(dirs.len(), 5);
        let dirs = common_install_dirs(Os::Windows, &Env::default());
        assert!(dirs.is_empty());
    }

    #[test]
    fn selectors() {
        assert!(OsSelector::NotWindows.matches(Os::Other));
        assert!(!OsSelector::Unix.matches(Os::Other));
        assert!(OsSelector::Unix.matches(Os::MacOs));
        assert!(!OsSelector::Windows.matches(Os::Linux));
    }
}
