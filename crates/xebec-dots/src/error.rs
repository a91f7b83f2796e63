use std::fmt;
use std::path::Path;

/// Broad category of a failure, used by the CLI and menu to pick how a
/// message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filesystem failure while reading a template or applying a config.
    Io,
    /// Settings or branding file could not be parsed or is invalid.
    Config,
    /// Something the operation needs is missing (e.g. the terminal is not
    /// installed). Reported to the user, never fatal for the session.
    Prerequisite,
    /// Terminal/TUI plumbing failure.
    Ui,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
}

impl Error {
    pub fn msg<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::Io, msg)
    }

    pub fn new<M: Into<String>>(kind: ErrorKind, msg: M) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    pub fn config<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::Config, msg)
    }

    pub fn prerequisite<M: Into<String>>(msg: M) -> Self {
        Self::new(ErrorKind::Prerequisite, msg)
    }

    pub fn ui<E: fmt::Display>(err: E) -> Self {
        Self::new(ErrorKind::Ui, err.to_string())
    }

    /// `failed to <action> <path>: <cause>`
    pub fn io_at(action: &str, path: &Path, err: std::io::Error) -> Self {
        Self::new(
            ErrorKind::Io,
            format!("failed to {action} {}: {err}", path.display()),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
