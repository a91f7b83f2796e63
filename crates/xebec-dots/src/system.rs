use std::fmt;

use crate::platform::Os;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: Os,
    pub arch: String,
}

impl SystemInfo {
    pub fn current() -> Self {
        Self::new(Os::current(), std::env::consts::ARCH)
    }

    pub fn new(os: Os, arch: &str) -> Self {
        Self {
            os,
            arch: arch.to_string(),
        }
    }

    pub fn platform_name(&self) -> &'static str {
        self.os.platform_name()
    }

    pub fn package_manager(&self) -> &'static str {
        self.os.package_manager()
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.platform_name(),
            self.arch,
            self.package_manager()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_line() {
        assert_eq!(
            SystemInfo::new(Os::Linux, "x86_64").to_string(),
            "Linux x86_64 (apt)"
        );
        assert_eq!(
            SystemInfo::new(Os::Windows, "aarch64").to_string(),
            "Windows aarch64 (winget/scoop)"
        );
        assert_eq!(
            SystemInfo::new(Os::MacOs, "aarch64").to_string(),
            "macOS aarch64 (N/A)"
        );
    }
}
