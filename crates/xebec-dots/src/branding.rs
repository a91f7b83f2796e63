//! Menu branding: names, texts, colors and the menu tree.
//!
//! Loaded once at startup and handed to the menu by reference.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

pub const BUNDLED_BRANDING: &str = include_str!("../assets/branding.json");

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Branding {
    pub name: String,
    pub version: String,
    pub logo: String,
    pub separator: String,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    pub texts: Texts,
    pub menu_options: Vec<MenuOption>,
    #[serde(default)]
    pub submenus: BTreeMap<String, Vec<MenuOption>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Texts {
    pub cli_label: String,
    pub platform_label: String,
    pub menu_title: String,
    pub footer_navigation: String,
    pub footer_back: String,
    pub prompt_selection: String,
    pub option_invalid: String,
    pub goodbye: String,
    pub executing: String,
    pub back: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    #[default]
    Action,
    Menu,
    Table,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MenuOption {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub submenu: bool,
    #[serde(default, rename = "type")]
    pub kind: MenuKind,
}

impl MenuOption {
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.icon, self.title)
        }
    }
}

impl Branding {
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_BRANDING)
    }

    pub fn parse(data: &str) -> Result<Self> {
        let b: Branding = serde_json::from_str(data)?;
        if b.menu_options.is_empty() {
            return Err(Error::config("branding defines no menu options"));
        }
        Ok(b)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| Error::io_at("read", path, e))?;
        Self::parse(&data)
            .map_err(|e| Error::config(format!("invalid branding {}: {e}", path.display())))
    }

    /// Top-level menu entries.
    pub fn menu_options(&self) -> &[MenuOption] {
        &self.menu_options
    }

    pub fn submenu(&self, id: &str) -> Option<&[MenuOption]> {
        self.submenus.get(id).map(Vec::as_slice)
    }

    pub fn has_submenu(&self, id: &str) -> bool {
        self.submenus.get(id).is_some_and(|s| !s.is_empty())
    }

    /// Navigation hint for a menu `depth` levels below the main menu.
    pub fn footer_text(&self, depth: usize) -> &str {
        if depth == 0 {
            &self.texts.footer_navigation
        } else {
            &self.texts.footer_back
        }
    }

    pub fn color(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }
}

/// Branding from `path`, or the bundled default. A broken file is reported
/// and ignored.
pub fn load(path: Option<&Path>) -> Result<Branding> {
    if let Some(p) = path {
        match Branding::from_file(p) {
            Ok(b) => return Ok(b),
            Err(e) => warn!(path = %p.display(), error = %e, "branding ignored, using bundled"),
        }
    }
    Branding::bundled()
}

/// `#RRGGBB` to its components.
pub fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
