#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use xebec_dots::platform::{Env, Os};
use xebec_dots::terminals::Host;

/// Host whose search path is a fixed set of names. Files exist when listed in
/// `files` or when they really exist under `root`.
pub struct StubHost {
    pub os: Os,
    pub root: Option<PathBuf>,
    pub env: Env,
    pub on_path: BTreeSet<String>,
    pub files: BTreeSet<PathBuf>,
    pub version: String,
}

impl StubHost {
    pub fn linux(home: &Path, on_path: &[&str]) -> Self {
        Self {
            os: Os::Linux,
            root: Some(home.to_path_buf()),
            env: Env::from_pairs([("HOME", home.to_string_lossy().into_owned())]),
            on_path: on_path.iter().map(|s| s.to_string()).collect(),
            files: BTreeSet::new(),
            version: "1.0.0".into(),
        }
    }
}

impl Host for StubHost {
    fn os(&self) -> Os {
        self.os
    }

    fn env(&self) -> &Env {
        &self.env
    }

    fn on_search_path(&self, name: &str) -> bool {
        self.on_path.contains(name)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
            || self
                .root
                .as_ref()
                .is_some_and(|r| path.starts_with(r) && path.exists())
    }

    fn probe_version(&self, _command: &str) -> String {
        self.version.clone()
    }
}

pub fn instant(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid instant")
}
