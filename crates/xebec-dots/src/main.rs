use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crossterm::style::Stylize;

use xebec_dots::branding::{self, Branding};
use xebec_dots::filter::{FilterToggles, OptionKey};
use xebec_dots::logging::{self, LogOptions};
use xebec_dots::platform::{Env, Os};
use xebec_dots::settings::{self, Settings};
use xebec_dots::system::SystemInfo;
use xebec_dots::terminals::{self, LocalHost};
use xebec_dots::{Error, Result, alacritty, ui};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROJECT_URL: &str = "https://github.com/XebecCorporation/XebecCorporation.Dots";

#[derive(Debug, Parser)]
#[command(name = "xebec", author, version, about = "XEBEC dotfiles: terminals, shells and tools")]
struct Args {
    /// Settings TOML (default: <config dir>/xebec/settings.toml)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Debug logging on stderr (XEBEC_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Configure a component (terminal, shell)
    Config {
        component: Option<String>,
        /// Alacritty section to apply; repeat for several (default: all)
        #[arg(long = "section", value_name = "KEY")]
        sections: Vec<OptionKey>,
        /// Print the filtered config instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Install components (tools)
    Install { component: Option<String> },
    /// Version and system information
    Version,
    /// Interactive menu (default when no command is given)
    #[command(visible_aliases = ["i", "menu"])]
    Interactive,
    /// System info and terminal detection table
    Status,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log = LogOptions {
        verbose: args.verbose,
        json: args.log_json,
    };
    if let Err(e) = logging::init(log) {
        eprintln!("{e}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let env = Env::from_process();
    let settings = settings::load(args.settings.as_deref(), Os::current(), &env)?;

    match args.cmd {
        None | Some(Command::Interactive) => {
            let branding = branding::load(settings.branding.as_deref())?;
            ui::run_menu(&branding, &settings, VERSION)
        }
        Some(Command::Config {
            component,
            sections,
            dry_run,
        }) => cmd_config(&settings, component.as_deref(), &sections, dry_run),
        Some(Command::Install { component }) => cmd_install(component.as_deref()),
        Some(Command::Version) => cmd_version(&settings),
        Some(Command::Status) => cmd_status(&settings),
    }
}

fn cmd_config(
    settings: &Settings,
    component: Option<&str>,
    sections: &[OptionKey],
    dry_run: bool,
) -> Result<()> {
    match component {
        None => {
            println!("Usage: xebec config <terminal|shell>");
            println!("  terminal  apply the XEBEC Alacritty config");
            println!("  shell     configure the shell");
            Ok(())
        }
        Some("terminal") => {
            let toggles = if sections.is_empty() {
                FilterToggles::all()
            } else {
                FilterToggles::from_keys(sections.iter().copied())
            };
            if dry_run {
                print!("{}", alacritty::render(settings, toggles)?);
                return Ok(());
            }
            let host = LocalHost::new(settings.probe_timeout());
            let now = chrono::Local::now().naive_local();
            let report = alacritty::configure(&host, settings, toggles, now)?;
            println!(
                "{} Alacritty configured: {}",
                "✅".green(),
                report.destination.display()
            );
            if let Some(b) = report.backup {
                println!("   previous config saved to {}", display_dim(&b));
            }
            Ok(())
        }
        Some("shell") => {
            println!("{}", "Shell configuration is not available yet.".yellow());
            Ok(())
        }
        Some(other) => Err(Error::config(format!(
            "unknown component '{other}' (expected terminal or shell)"
        ))),
    }
}

fn cmd_install(component: Option<&str>) -> Result<()> {
    match component {
        None | Some("tools") => {
            let system = SystemInfo::current();
            println!("System: {system}");
            println!(
                "{}",
                format!(
                    "Automatic installation is not available yet. Use {} to install tools.",
                    system.package_manager()
                )
                .yellow()
            );
            Ok(())
        }
        Some(other) => Err(Error::config(format!(
            "unknown component '{other}' (expected tools)"
        ))),
    }
}

fn cmd_version(settings: &Settings) -> Result<()> {
    let b: Branding = branding::load(settings.branding.as_deref())?;
    println!("{}", b.logo.as_str().bold());
    println!("{}", b.separator.as_str().dark_grey());
    println!("{} {} v{VERSION}", b.name, b.texts.cli_label);
    println!("{}: {}", b.texts.platform_label, SystemInfo::current());
    println!("{}", format!("  GitHub: {PROJECT_URL}").dark_grey());
    Ok(())
}

fn cmd_status(settings: &Settings) -> Result<()> {
    let host = LocalHost::new(settings.probe_timeout());
    println!("System: {}", SystemInfo::current());
    println!();
    println!("{}", terminals::format_table(&terminals::detect_all(&host)));
    Ok(())
}

fn display_dim(p: &Path) -> String {
    p.display().to_string().dark_grey().to_string()
}
