//! Section filter for the Alacritty template.
//!
//! The template is treated as lines, not parsed as TOML: a `[section]` header
//! switches the include flag, and comments and blank lines always pass.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const EMPTY_CONFIG_PLACEHOLDER: &str = "# Empty configuration - no options selected\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    Window,
    Colors,
    Font,
    Cursor,
    Shell,
}

impl OptionKey {
    pub const ALL: [OptionKey; 5] = [
        OptionKey::Window,
        OptionKey::Colors,
        OptionKey::Font,
        OptionKey::Cursor,
        OptionKey::Shell,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Window => "window",
            OptionKey::Colors => "colors",
            OptionKey::Font => "font",
            OptionKey::Cursor => "cursor",
            OptionKey::Shell => "shell",
        }
    }

    /// Template section that this option controls.
    fn for_section(segment: &str) -> Option<Self> {
        match segment {
            "window" => Some(OptionKey::Window),
            "font" => Some(OptionKey::Font),
            "cursor" => Some(OptionKey::Cursor),
            "colors" => Some(OptionKey::Colors),
            "terminal" => Some(OptionKey::Shell),
            _ => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OptionKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| {
                Error::config(format!(
                    "unknown config option '{}' (expected one of: window, colors, font, cursor, shell)",
                    s.trim()
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigOption {
    pub key: OptionKey,
    pub title: &'static str,
    pub description: &'static str,
}

pub fn config_options() -> [ConfigOption; 5] {
    [
        ConfigOption {
            key: OptionKey::Window,
            title: "Window",
            description: "decorations, opacity, startup_mode, padding",
        },
        ConfigOption {
            key: OptionKey::Colors,
            title: "Colors",
            description: "XEBEC theme - primary, normal, bright",
        },
        ConfigOption {
            key: OptionKey::Font,
            title: "Font",
            description: "JetBrains Mono, size",
        },
        ConfigOption {
            key: OptionKey::Cursor,
            title: "Cursor",
            description: "shape (Beam), blinking",
        },
        ConfigOption {
            key: OptionKey::Shell,
            title: "Shell",
            description: "shell program and arguments",
        },
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterToggles {
    pub window: bool,
    pub colors: bool,
    pub font: bool,
    pub cursor: bool,
    pub shell: bool,
}

impl FilterToggles {
    pub fn all() -> Self {
        Self {
            window: true,
            colors: true,
            font: true,
            cursor: true,
            shell: true,
        }
    }

    pub fn from_keys<I: IntoIterator<Item = OptionKey>>(keys: I) -> Self {
        let mut t = Self::default();
        for k in keys {
            t.set(k, true);
        }
        t
    }

    pub fn get(&self, key: OptionKey) -> bool {
        match key {
            OptionKey::Window => self.window,
            OptionKey::Colors => self.colors,
            OptionKey::Font => self.font,
            OptionKey::Cursor => self.cursor,
            OptionKey::Shell => self.shell,
        }
    }

    pub fn set(&mut self, key: OptionKey, on: bool) {
        match key {
            OptionKey::Window => self.window = on,
            OptionKey::Colors => self.colors = on,
            OptionKey::Font => self.font = on,
            OptionKey::Cursor => self.cursor = on,
            OptionKey::Shell => self.shell = on,
        }
    }

    pub fn any(&self) -> bool {
        OptionKey::ALL.into_iter().any(|k| self.get(k))
    }

    pub fn selected(&self) -> Vec<OptionKey> {
        OptionKey::ALL
            .into_iter()
            .filter(|k| self.get(*k))
            .collect()
    }
}

/// Top-level segment of a `[section]` / `[section.sub]` header line.
fn header_segment(trimmed: &str) -> Option<&str> {
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return None;
    }
    let section = trimmed.trim_matches(|c| c == '[' || c == ']');
    Some(section.split('.').next().unwrap_or(""))
}

fn include_section(segment: &str, toggles: &FilterToggles) -> bool {
    if segment == "terminal" && !toggles.shell {
        return false;
    }
    if let Some(key) = OptionKey::for_section(segment) {
        return toggles.get(key);
    }
    if segment.is_empty() {
        return true;
    }
    toggles.any()
}

/// Keep the sections selected by `toggles`; comments and blank lines always
/// survive. Content before the first header is dropped unless it is a comment
/// or blank.
pub fn filter(source: &str, toggles: FilterToggles) -> String {
    if !toggles.any() {
        return EMPTY_CONFIG_PLACEHOLDER.to_string();
    }

    let mut include = false;
    let mut out = Vec::new();
    for line in source.split('\n') {
        let trimmed = line.trim();
        if let Some(segment) = header_segment(trimmed) {
            include = include_section(segment, &toggles);
        }
        if include || trimmed.is_empty() || trimmed.starts_with('#') {
            out.push(line);
        }
    }
    out.join("\n")
}
