//! Static table of terminal emulators known to the detector.

use crate::platform::{OsSelector::*, PathRule, rule};

#[derive(Debug)]
pub struct TerminalDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Executable names tried in order.
    pub commands: &'static [&'static str],
    /// One entry per resolver; each resolver is a rule list evaluated by
    /// [`crate::platform::resolve_path`].
    pub configs: &'static [&'static [PathRule]],
    pub version_cmd: &'static str,
}

impl TerminalDescriptor {
    pub fn is_alacritty(&self) -> bool {
        self.id == ALACRITTY_ID
    }
}

pub const ALACRITTY_ID: &str = "alacritty";

const ALACRITTY_XDG: &[PathRule] = &[
    rule(Windows, "{APPDATA}/alacritty/alacritty.toml"),
    rule(Unix, "{XDG_CONFIG_HOME}/alacritty/alacritty.toml"),
];
const ALACRITTY_HOME: &[PathRule] = &[rule(Unix, "{HOME}/.config/alacritty/alacritty.toml")];

/// Resolvers for the Alacritty config file. The XDG location is preferred when
/// `XDG_CONFIG_HOME` is set.
pub const ALACRITTY_CONFIGS: &[&[PathRule]] = &[ALACRITTY_XDG, ALACRITTY_HOME];

pub static REGISTRY: &[TerminalDescriptor] = &[
    // Cross-platform
    TerminalDescriptor {
        id: ALACRITTY_ID,
        name: "Alacritty",
        icon: "🖥️",
        commands: &["alacritty"],
        configs: ALACRITTY_CONFIGS,
        version_cmd: "alacritty --version",
    },
    TerminalDescriptor {
        id: "wezterm",
        name: "WezTerm",
        icon: "🔥",
        commands: &["wezterm"],
        configs: &[&[
            rule(Windows, "{APPDATA}/wezterm/wezterm.lua"),
            rule(Unix, "{HOME}/.config/wezterm/wezterm.lua"),
        ]],
        version_cmd: "wezterm --version",
    },
    TerminalDescriptor {
        id: "kitty",
        name: "Kitty",
        icon: "🐱",
        commands: &["kitty"],
        configs: &[&[
            rule(Windows, "{USERPROFILE}/.config/kitty/kitty.conf"),
            rule(Unix, "{HOME}/.config/kitty/kitty.conf"),
        ]],
        version_cmd: "kitty --version",
    },
    TerminalDescriptor {
        id: "ghostty",
        name: "Ghostty",
        icon: "👻",
        commands: &["ghostty"],
        configs: &[&[rule(NotWindows, "{HOME}/.config/ghostty/config")]],
        version_cmd: "ghostty --version",
    },
    TerminalDescriptor {
        id: "windows-terminal",
        name: "Windows Terminal",
        icon: "🪟",
        commands: &["wt", "wt.exe"],
        configs: &[&[rule(
            Any,
            "{LOCALAPPDATA}/Packages/Microsoft.WindowsTerminal_8wekyb3d8bbwe/LocalState/settings.json",
        )]],
        version_cmd: "wt --version",
    },
    TerminalDescriptor {
        id: "hyper",
        name: "Hyper",
        icon: "⚡",
        commands: &["hyper"],
        configs: &[&[
            rule(Windows, "{APPDATA}/hyper/config.json"),
            rule(Unix, "{HOME}/.config/hyper/config.json"),
        ]],
        version_cmd: "hyper --version",
    },
    TerminalDescriptor {
        id: "tabby",
        name: "Tabby",
        icon: "📋",
        commands: &["tabby"],
        configs: &[&[
            rule(Windows, "{APPDATA}/tabby/config.yaml"),
            rule(Unix, "{HOME}/.config/tabby/config.yaml"),
        ]],
        version_cmd: "tabby --version",
    },
    TerminalDescriptor {
        id: "windterm",
        name: "WindTerm",
        icon: "💨",
        commands: &["WindTerm"],
        configs: &[&[rule(Windows, "{APPDATA}/WindTerm/config")]],
        version_cmd: "windterm --version",
    },
    TerminalDescriptor {
        id: "electerm",
        name: "Electerm",
        icon: "🔌",
        commands: &["electerm"],
        configs: &[&[
            rule(Windows, "{APPDATA}/electerm/config.json"),
            rule(Unix, "{HOME}/.config/electerm/config.json"),
        ]],
        version_cmd: "electerm --version",
    },
    // Linux desktops
    TerminalDescriptor {
        id: "gnome-terminal",
        name: "GNOME Terminal",
        icon: "🐧",
        commands: &["gnome-terminal", "gnome-terminal-server"],
        configs: &[&[rule(Any, "{HOME}/.config/dconf/user")]],
        version_cmd: "gnome-terminal --version",
    },
    TerminalDescriptor {
        id: "konsole",
        name: "Konsole",
        icon: "🎮",
        commands: &["konsole"],
        configs: &[&[rule(Any, "{HOME}/.config/konsole/konsole.rc")]],
        version_cmd: "konsole --version",
    },
    TerminalDescriptor {
        id: "terminator",
        name: "Terminator",
        icon: "🔱",
        commands: &["terminator"],
        configs: &[&[rule(Any, "{HOME}/.config/terminator/config")]],
        version_cmd: "terminator --version",
    },
    TerminalDescriptor {
        id: "tilix",
        name: "Tilix",
        icon: "📦",
        commands: &["tilix", "tilix.dcc"],
        configs: &[&[rule(Any, "{HOME}/.config/dconf/user")]],
        version_cmd: "tilix --version",
    },
    TerminalDescriptor {
        id: "guake",
        name: "Guake",
        icon: "⬇️",
        commands: &["guake"],
        configs: &[&[rule(Any, "{HOME}/.config/guake/guake.cfg")]],
        version_cmd: "guake --version",
    },
    TerminalDescriptor {
        id: "yakuake",
        name: "Yakuake",
        icon: "⬆️",
        commands: &["yakuake"],
        configs: &[&[rule(Any, "{HOME}/.config/yakuake/yakuakerc")]],
        version_cmd: "yakuake --version",
    },
    TerminalDescriptor {
        id: "xfce4-terminal",
        name: "XFCE Terminal",
        icon: "🐆",
        commands: &["xfce4-terminal"],
        configs: &[&[rule(Any, "{HOME}/.config/xfce4/terminal/accels.scm")]],
        version_cmd: "xfce4-terminal --version",
    },
    TerminalDescriptor {
        id: "lxterminal",
        name: "LXTerminal",
        icon: "🪶",
        commands: &["lxterminal"],
        configs: &[&[rule(Any, "{HOME}/.config/lxterminal/lxterminal.conf")]],
        version_cmd: "lxterminal --version",
    },
    TerminalDescriptor {
        id: "qterminal",
        name: "QTerminal",
        icon: "🟢",
        commands: &["qterminal"],
        configs: &[&[rule(Any, "{HOME}/.config/qterminal.org/terminal.conf")]],
        version_cmd: "qterminal --version",
    },
    TerminalDescriptor {
        id: "lilyterm",
        name: "LilyTerm",
        icon: "🌸",
        commands: &["lilyterm"],
        configs: &[&[rule(Any, "{HOME}/.config/lilyterm/default.cfg")]],
        version_cmd: "lilyterm --version",
    },
    TerminalDescriptor {
        id: "sakura",
        name: "Sakura",
        icon: "🌸",
        commands: &["sakura"],
        configs: &[&[rule(Any, "{HOME}/.config/sakura/sakura.conf")]],
        version_cmd: "sakura --version",
    },
    TerminalDescriptor {
        id: "st",
        name: "st (Simple Terminal)",
        icon: "📟",
        commands: &["st"],
        configs: &[&[rule(Any, "{HOME}/.config/st/config.h")]],
        version_cmd: "st --version",
    },
    TerminalDescriptor {
        id: "foot",
        name: "foot",
        icon: "🦶",
        commands: &["foot"],
        configs: &[&[rule(Any, "{HOME}/.config/foot/foot.ini")]],
        version_cmd: "foot --version",
    },
    TerminalDescriptor {
        id: "rio",
        name: "Rio Terminal",
        icon: "🌊",
        commands: &["rio"],
        configs: &[&[
            rule(Windows, "{APPDATA}/rio/config.toml"),
            rule(NotWindows, "{HOME}/.config/rio/config.toml"),
        ]],
        version_cmd: "rio --version",
    },
    // Classic X11
    TerminalDescriptor {
        id: "xterm",
        name: "XTerm",
        icon: "❎",
        commands: &["xterm"],
        configs: &[&[rule(Any, "{HOME}/.Xresources")]],
        version_cmd: "xterm -version",
    },
    TerminalDescriptor {
        id: "urxvt",
        name: "URxvt / Rxvt-unicode",
        icon: "📻",
        commands: &["urxvt", "rxvt-unicode", "urxvt256c-ml", "urxvtc"],
        configs: &[&[rule(Any, "{HOME}/.Xresources")]],
        version_cmd: "urxvt --version",
    },
    TerminalDescriptor {
        id: "eterm",
        name: "Eterm",
        icon: "🟣",
        commands: &["Eterm"],
        configs: &[&[rule(Any, "{HOME}/.Eterm/themes")]],
        version_cmd: "Eterm --version",
    },
    TerminalDescriptor {
        id: "mlterm",
        name: "MLTerm",
        icon: "📺",
        commands: &["mlterm"],
        configs: &[&[rule(Any, "{HOME}/.mlterm/main")]],
        version_cmd: "mlterm --version",
    },
    // macOS
    TerminalDescriptor {
        id: "iterm2",
        name: "iTerm2",
        icon: "💻",
        commands: &["iTerm2"],
        configs: &[&[rule(
            Any,
            "{HOME}/Library/Application Support/iTerm2/DynamicProfiles",
        )]],
        version_cmd: "iTerm2 --version",
    },
    TerminalDescriptor {
        id: "terminal",
        name: "Terminal.app",
        icon: "🖥️",
        commands: &["Terminal"],
        configs: &[&[rule(
            Any,
            "{HOME}/Library/Preferences/com.apple.Terminal.plist",
        )]],
        version_cmd: "osascript -e 'version of app \"Terminal\"'",
    },
    // Windows
    TerminalDescriptor {
        id: "terminus",
        name: "Terminus",
        icon: "🏁",
        commands: &["terminus"],
        configs: &[&[rule(Windows, "{APPDATA}/terminus/config.json")]],
        version_cmd: "terminus --version",
    },
    TerminalDescriptor {
        id: "conemu",
        name: "ConEmu",
        icon: "⬛",
        commands: &["ConEmu", "ConEmu64"],
        configs: &[&[rule(Windows, "{APPDATA}/ConEmu.xml")]],
        version_cmd: "ConEmu -Version",
    },
    TerminalDescriptor {
        id: "cmder",
        name: "Cmder",
        icon: "📦",
        commands: &["cmder"],
        configs: &[&[rule(Windows, "{USERPROFILE}/Cmder/config")]],
        version_cmd: "cmder --version",
    },
    TerminalDescriptor {
        id: "fterminal",
        name: "Fluent Terminal",
        icon: "🌊",
        commands: &["FluentTerminal"],
        configs: &[&[rule(Windows, "{LOCALAPPDATA}/FluentTerminal/config.json")]],
        version_cmd: "FluentTerminal --version",
    },
    TerminalDescriptor {
        id: "terminal-buddy",
        name: "Terminal Buddy",
        icon: "👥",
        commands: &["TerminalBuddy"],
        configs: &[&[rule(Windows, "{APPDATA}/TerminalBuddy/config.json")]],
        version_cmd: "TerminalBuddy --version",
    },
];

pub fn lookup(id: &str) -> Option<&'static TerminalDescriptor> {
    REGISTRY.iter().find(|d| d.id == id)
}

pub fn supported_ids() -> Vec<&'static str> {
    REGISTRY.iter().map(|d| d.id).collect()
}

pub fn is_supported(id: &str) -> bool {
    lookup(id).is_some()
}

/// Display name and icon for a registered terminal.
pub fn info(id: &str) -> Option<(&'static str, &'static str)> {
    lookup(id).map(|d| (d.name, d.icon))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids = supported_ids();
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn every_descriptor_is_probeable() {
        for d in REGISTRY {
            assert!(!d.commands.is_empty(), "{} has no commands", d.id);
            assert!(!d.configs.is_empty(), "{} has no config resolver", d.id);
            assert!(!d.version_cmd.trim().is_empty(), "{} has no version cmd", d.id);
        }
    }

    #[test]
    fn lookup_and_info() {
        assert!(is_supported("kitty"));
        assert!(!is_supported("nope"));
        assert_eq!(info("foot"), Some(("foot", "🦶")));
        assert!(lookup(ALACRITTY_ID).is_some_and(TerminalDescriptor::is_alacritty));
    }
}
