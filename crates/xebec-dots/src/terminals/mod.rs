//! Terminal emulator detection.
//!
//! Detection walks [`registry::REGISTRY`] in order and never fails: a missing
//! executable, missing config, unsupported OS or broken version probe all
//! degrade to negative field values on [`DetectedTerminal`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::platform::{self, Env, Os};

pub mod probe;
pub mod registry;

pub use registry::TerminalDescriptor;

pub const NONE_ID: &str = "none";

/// Access to the machine being inspected. [`LocalHost`] is the real system;
/// tests substitute a fake.
pub trait Host {
    fn os(&self) -> Os;
    fn env(&self) -> &Env;
    /// Whether `name` resolves through the executable search path.
    fn on_search_path(&self, name: &str) -> bool;
    fn exists(&self, path: &Path) -> bool;
    fn probe_version(&self, command: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct LocalHost {
    os: Os,
    env: Env,
    probe_timeout: Duration,
}

impl LocalHost {
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            os: Os::current(),
            env: Env::from_process(),
            probe_timeout,
        }
    }
}

impl Host for LocalHost {
    fn os(&self) -> Os {
        self.os
    }

    fn env(&self) -> &Env {
        &self.env
    }

    fn on_search_path(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn probe_version(&self, command: &str) -> String {
        probe::probe_version(self.os, command, self.probe_timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTerminal {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub installed: bool,
    /// Empty when not probed, `"N/A"` when the probe failed.
    pub version: String,
    /// First non-empty resolver result; empty when the OS is unsupported.
    pub config_path: String,
    pub config_paths: Vec<String>,
    pub config_exists: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStatus {
    Configured,
    NotConfigured,
    NotInstalled,
}

impl ConfigStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConfigStatus::Configured => "✅ Configured",
            ConfigStatus::NotConfigured => "⚙️ Not configured",
            ConfigStatus::NotInstalled => "❌ Not installed",
        }
    }

    pub fn mark(self) -> &'static str {
        match self {
            ConfigStatus::Configured => "✅",
            ConfigStatus::NotConfigured => "⚙️",
            ConfigStatus::NotInstalled => "❌",
        }
    }
}

impl DetectedTerminal {
    /// Placeholder returned by [`detect_installed`] when nothing is installed.
    pub fn none_detected() -> Self {
        Self {
            id: NONE_ID.into(),
            name: "No compatible terminal detected".into(),
            icon: "❌".into(),
            installed: false,
            version: String::new(),
            config_path: String::new(),
            config_paths: Vec::new(),
            config_exists: false,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == NONE_ID
    }

    pub fn status(&self) -> ConfigStatus {
        match (self.installed, self.config_exists) {
            (true, true) => ConfigStatus::Configured,
            (true, false) => ConfigStatus::NotConfigured,
            (false, _) => ConfigStatus::NotInstalled,
        }
    }
}

impl fmt::Display for DetectedTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.icon, self.name, self.status().label())
    }
}

/// Search path first, then the common install directories.
pub fn is_installed(host: &dyn Host, desc: &TerminalDescriptor) -> bool {
    desc.commands.iter().any(|c| host.on_search_path(c))
        || search_common_paths(host, desc.commands)
}

pub fn detect_one(host: &dyn Host, desc: &TerminalDescriptor) -> DetectedTerminal {
    let os = host.os();
    let env = host.env();

    let installed = is_installed(host, desc);

    let version = if installed && !desc.version_cmd.is_empty() {
        host.probe_version(desc.version_cmd)
    } else {
        String::new()
    };

    let mut config_path = String::new();
    let mut config_paths = Vec::new();
    let mut config_exists = false;
    for rules in desc.configs {
        let p = platform::resolve_path(rules, os, env);
        if p.is_empty() {
            continue;
        }
        if config_path.is_empty() {
            config_path = p.clone();
        }
        if host.exists(Path::new(&p)) {
            config_exists = true;
        }
        config_paths.push(p);
    }

    debug!(
        id = desc.id,
        installed,
        config_exists,
        config_path = %config_path,
        "terminal detection"
    );

    DetectedTerminal {
        id: desc.id.to_string(),
        name: desc.name.to_string(),
        icon: desc.icon.to_string(),
        installed,
        version,
        config_path,
        config_paths,
        config_exists,
    }
}

fn search_common_paths(host: &dyn Host, commands: &[&str]) -> bool {
    let windows = host.os() == Os::Windows;
    for dir in platform::common_install_dirs(host.os(), host.env()) {
        for cmd in commands {
            if host.exists(&dir.join(cmd)) {
                return true;
            }
            if windows && host.exists(&dir.join(format!("{cmd}.exe"))) {
                return true;
            }
        }
    }
    false
}

/// Every descriptor in `registry`, installed or not, in registry order.
pub fn detect_with(host: &dyn Host, registry: &[TerminalDescriptor]) -> Vec<DetectedTerminal> {
    registry.iter().map(|d| detect_one(host, d)).collect()
}

pub fn detect_all(host: &dyn Host) -> Vec<DetectedTerminal> {
    detect_with(host, registry::REGISTRY)
}

/// Installed terminals only; never empty (see [`DetectedTerminal::none_detected`]).
pub fn installed_only(all: Vec<DetectedTerminal>) -> Vec<DetectedTerminal> {
    let installed: Vec<_> = all.into_iter().filter(|t| t.installed).collect();
    if installed.is_empty() {
        vec![DetectedTerminal::none_detected()]
    } else {
        installed
    }
}

pub fn detect_installed(host: &dyn Host) -> Vec<DetectedTerminal> {
    installed_only(detect_all(host))
}

pub fn find(host: &dyn Host, id: &str) -> Option<DetectedTerminal> {
    registry::lookup(id).map(|d| detect_one(host, d))
}

/// `1. 🐱 Kitty ✅` style listing.
pub fn format_list(terminals: &[DetectedTerminal]) -> String {
    terminals
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {} {} {}", i + 1, t.icon, t.name, t.status().mark()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aligned table of every detection: name, detected, configured, version,
/// config path.
pub fn format_table(terminals: &[DetectedTerminal]) -> String {
    let mut out = vec![format!(
        "{:<28} {:<9} {:<11} {:<20} {}",
        "TERMINAL", "DETECTED", "CONFIGURED", "VERSION", "CONFIG"
    )];
    for t in terminals {
        let name = format!("{} {}", t.icon, t.name);
        let version = if t.version.is_empty() { "-" } else { t.version.as_str() };
        let path = if t.config_path.is_empty() {
            "-"
        } else {
            t.config_path.as_str()
        };
        out.push(format!(
            "{:<28} {:<9} {:<11} {:<20} {}",
            name,
            if t.installed { "yes" } else { "no" },
            if t.config_exists { "yes" } else { "no" },
            version,
            path
        ));
    }
    out.join("\n")
}
