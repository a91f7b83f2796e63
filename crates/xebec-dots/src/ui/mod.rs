//! Interactive menu.
//!
//! The screen shown is the top of a history stack: branding menus, the
//! detected-terminal table, a per-terminal action list and the Alacritty
//! option checkboxes. Detection runs once on first use and again only when
//! the user picks Refresh or after a configure run.

use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::mem;
use std::time::Duration;

use chrono::NaiveDateTime;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table,
    TableState, Wrap,
};

use crate::alacritty;
use crate::branding::{self, Branding, MenuKind, MenuOption};
use crate::error::{Error, ErrorKind, Result};
use crate::filter::{self, FilterToggles};
use crate::settings::Settings;
use crate::system::SystemInfo;
use crate::terminals::{self, DetectedTerminal, Host, LocalHost, registry};

const MAX_MESSAGES: usize = 200;
const TERMINAL_ACTIONS: [&str; 3] = ["⚙️  Configure", "📦 Install", "← Back"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    /// `None` is the main menu, otherwise a branding submenu id.
    Menu(Option<String>),
    Terminals,
    /// Index into the cached detection.
    TerminalActions(usize),
    Checkboxes(FilterToggles),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Level {
    view: View,
    cursor: usize,
}

impl Level {
    fn new(view: View) -> Self {
        Self { view, cursor: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    tone: Tone,
    text: String,
}

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

struct App<'a> {
    branding: &'a Branding,
    settings: &'a Settings,
    host: &'a dyn Host,
    system: SystemInfo,
    version: String,
    current: Level,
    history: Vec<Level>,
    terminals: Option<Vec<DetectedTerminal>>,
    messages: VecDeque<Message>,
    clock: fn() -> NaiveDateTime,
}

impl<'a> App<'a> {
    fn new(
        branding: &'a Branding,
        settings: &'a Settings,
        host: &'a dyn Host,
        version: &str,
    ) -> Self {
        Self {
            branding,
            settings,
            host,
            system: SystemInfo::new(host.os(), std::env::consts::ARCH),
            version: version.to_string(),
            current: Level::new(View::Menu(None)),
            history: Vec::new(),
            terminals: None,
            messages: VecDeque::new(),
            clock: local_now,
        }
    }

    fn depth(&self) -> usize {
        self.history.len()
    }

    fn push(&mut self, view: View) {
        let prev = mem::replace(&mut self.current, Level::new(view));
        self.history.push(prev);
    }

    /// No-op on the main menu.
    fn back(&mut self) {
        if let Some(prev) = self.history.pop() {
            self.current = prev;
        }
    }

    fn options_for(&self, id: Option<&str>) -> &'a [MenuOption] {
        let branding = self.branding;
        match id {
            None => branding.menu_options(),
            Some(id) => branding.submenu(id).unwrap_or(&[]),
        }
    }

    fn terminals(&self) -> &[DetectedTerminal] {
        self.terminals.as_deref().unwrap_or(&[])
    }

    fn ensure_detected(&mut self) {
        if self.terminals.is_none() {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        self.terminals = Some(terminals::detect_installed(self.host));
    }

    fn item_count(&self) -> usize {
        match &self.current.view {
            View::Menu(id) => self.options_for(id.as_deref()).len(),
            View::Terminals => self.terminals().len() + 2,
            View::TerminalActions(_) => TERMINAL_ACTIONS.len(),
            View::Checkboxes(_) => filter::config_options().len() + 2,
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let next = self.current.cursor.saturating_add_signed(delta);
        self.current.cursor = next.min(count - 1);
    }

    fn say(&mut self, tone: Tone, text: impl Into<String>) {
        if self.messages.len() >= MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(Message {
            tone,
            text: text.into(),
        });
    }

    fn info(&mut self, text: impl Into<String>) {
        self.say(Tone::Info, text);
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.say(Tone::Warn, text);
    }

    fn report(&mut self, err: Error) {
        let tone = match err.kind() {
            ErrorKind::Prerequisite => Tone::Warn,
            _ => Tone::Error,
        };
        self.say(tone, err.to_string());
    }

    /// `Ok(true)` ends the session.
    fn handle_key(&mut self, code: KeyCode, mods: KeyModifiers) -> Result<bool> {
        if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
            return Ok(true);
        }
        let in_checkboxes = matches!(self.current.view, View::Checkboxes(_));
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => return self.select(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => self.back(),
            KeyCode::Esc | KeyCode::Char('q') if in_checkboxes => self.back(),
            KeyCode::Esc | KeyCode::Char('q') => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn select(&mut self) -> Result<bool> {
        let cursor = self.current.cursor;
        match self.current.view.clone() {
            View::Menu(id) => {
                let Some(opt) = self.options_for(id.as_deref()).get(cursor) else {
                    return Ok(false);
                };
                return Ok(self.select_option(opt));
            }
            View::Terminals => self.select_terminal_row(cursor),
            View::TerminalActions(index) => self.select_terminal_action(index, cursor),
            View::Checkboxes(toggles) => self.select_checkbox(toggles, cursor),
        }
        Ok(false)
    }

    fn select_option(&mut self, opt: &'a MenuOption) -> bool {
        match opt.id.as_str() {
            "exit" => return true,
            "back" => self.back(),
            "terminal" => {
                self.ensure_detected();
                self.push(View::Terminals);
            }
            _ if opt.kind == MenuKind::Table => {
                self.ensure_detected();
                self.push(View::Terminals);
            }
            id if opt.submenu && self.branding.has_submenu(id) => {
                self.push(View::Menu(Some(id.to_string())));
            }
            id => {
                if let Err(e) = self.run_action(id, &opt.title) {
                    self.report(e);
                }
            }
        }
        false
    }

    fn run_action(&mut self, id: &str, title: &str) -> Result<()> {
        match id {
            "status" => self.show_status(),
            "backup" => match alacritty::backup_now(self.host, (self.clock)())? {
                Some(p) => self.info(format!("💾 Backup created: {}", p.display())),
                None => self.warn("No Alacritty configuration to back up yet."),
            },
            "restore" => {
                let backups = alacritty::list_backups(self.host)?;
                if backups.is_empty() {
                    self.warn("No backups found.");
                } else {
                    self.info(format!("{} backup(s) available:", backups.len()));
                    for b in backups {
                        self.info(format!("  {}", b.display()));
                    }
                    self.info("Copy one over your alacritty.toml to restore it.");
                }
            }
            id if id.starts_with("tools") => {
                self.info(format!("{} {title}", self.branding.texts.executing));
                self.warn(format!(
                    "Automatic installation is not available yet. Use {} on {}.",
                    self.system.package_manager(),
                    self.system
                ));
            }
            id if id.starts_with("shell") => {
                self.warn(format!("{title}: shell configuration is not available yet."));
            }
            _ => {
                let text = format!("{}: {id}", self.branding.texts.option_invalid);
                self.warn(text);
            }
        }
        Ok(())
    }

    fn show_status(&mut self) {
        self.info(format!(
            "{}: {}",
            self.branding.texts.platform_label, self.system
        ));
        for t in terminals::detect_all(self.host) {
            if !t.installed && !t.config_exists {
                continue;
            }
            let version = if t.version.is_empty() { "-" } else { t.version.as_str() };
            self.info(format!("{t} ({version})"));
        }
    }

    fn select_terminal_row(&mut self, row: usize) {
        let count = self.terminals().len();
        if row < count {
            if self.terminals()[row].is_sentinel() {
                self.warn("No compatible terminal detected. Install one, then pick Refresh.");
            } else {
                self.push(View::TerminalActions(row));
            }
        } else if row == count {
            self.refresh();
            let found = self.terminals().iter().filter(|t| !t.is_sentinel()).count();
            self.info(format!("Detection refreshed: {found} terminal(s) installed."));
        } else {
            self.back();
        }
    }

    fn select_terminal_action(&mut self, index: usize, action: usize) {
        let Some(t) = self.terminals().get(index).cloned() else {
            self.back();
            return;
        };
        match action {
            0 if t.id == registry::ALACRITTY_ID => {
                let toggles = self.settings.default_toggles();
                self.push(View::Checkboxes(toggles));
            }
            0 => self.warn(format!(
                "Configuring {} is not supported yet. Only Alacritty can be configured.",
                t.name
            )),
            1 => self.warn(format!(
                "{} is already installed. Automatic installation is not available yet ({}).",
                t.name, self.system
            )),
            _ => self.back(),
        }
    }

    fn select_checkbox(&mut self, mut toggles: FilterToggles, row: usize) {
        let options = filter::config_options();
        if let Some(opt) = options.get(row) {
            toggles.set(opt.key, !toggles.get(opt.key));
            self.current.view = View::Checkboxes(toggles);
        } else if row == options.len() {
            self.confirm(toggles);
        } else {
            self.back();
        }
    }

    fn confirm(&mut self, toggles: FilterToggles) {
        match alacritty::configure(self.host, self.settings, toggles, (self.clock)()) {
            Ok(report) => {
                self.info(format!(
                    "✅ Alacritty configured: {} ({} bytes)",
                    report.destination.display(),
                    report.bytes_written
                ));
                if let Some(b) = report.backup {
                    self.info(format!("💾 Previous config saved to {}", b.display()));
                }
            }
            Err(e) => self.report(e),
        }
        // Back to the terminal table with fresh status.
        self.back();
        self.back();
        self.refresh();
    }

    fn primary(&self) -> Color {
        self.branding
            .color("primary")
            .and_then(branding::parse_hex)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(Color::Cyan)
    }

    fn highlight(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.primary())
            .add_modifier(Modifier::BOLD)
    }

    fn title(&self) -> String {
        match &self.current.view {
            View::Menu(None) => self.branding.texts.menu_title.clone(),
            View::Menu(Some(id)) => self
                .branding
                .menu_options()
                .iter()
                .find(|o| &o.id == id)
                .map(|o| o.title.clone())
                .unwrap_or_else(|| id.clone()),
            View::Terminals => "Detected terminals".into(),
            View::TerminalActions(i) => self
                .terminals()
                .get(*i)
                .map(|t| format!("{} {}", t.icon, t.name))
                .unwrap_or_default(),
            View::Checkboxes(_) => "Alacritty options".into(),
        }
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(f.area());

        self.draw_header(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_footer(f, chunks[2]);
    }

    fn draw_header(&self, f: &mut ratatui::Frame, area: Rect) {
        let b = self.branding;
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    b.logo.as_str(),
                    Style::default()
                        .fg(self.primary())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} v{}", b.texts.cli_label, self.version),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(vec![
                Span::styled(
                    format!("{}: ", b.texts.platform_label),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(self.system.to_string()),
            ]),
        ];
        let p = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Plain),
        );
        f.render_widget(p, area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame, area: Rect) {
        let hint = match self.current.view {
            View::Checkboxes(_) => "↑/↓ move · Space/Enter toggle · Esc cancel",
            _ => self.branding.footer_text(self.depth()),
        };
        let p = Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(p, area);
    }

    fn draw_main(&self, f: &mut ratatui::Frame, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(cols[1]);

        match &self.current.view {
            View::Menu(id) => self.draw_menu(f, cols[0], self.options_for(id.as_deref())),
            View::Terminals => self.draw_terminals(f, cols[0]),
            View::TerminalActions(_) => {
                let items = TERMINAL_ACTIONS.iter().map(|s| ListItem::new(*s));
                self.draw_list(f, cols[0], items.collect());
            }
            View::Checkboxes(toggles) => self.draw_checkboxes(f, cols[0], *toggles),
        }
        self.draw_details(f, right[0]);
        self.draw_messages(f, right[1]);
    }

    fn boxed(&self, title: String) -> Block<'static> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
    }

    fn draw_list(&self, f: &mut ratatui::Frame, area: Rect, items: Vec<ListItem>) {
        let list = List::new(items)
            .block(self.boxed(self.title()))
            .highlight_style(self.highlight())
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.current.cursor));
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_menu(&self, f: &mut ratatui::Frame, area: Rect, options: &[MenuOption]) {
        let items = options.iter().map(|o| ListItem::new(o.label())).collect();
        self.draw_list(f, area, items);
    }

    fn draw_terminals(&self, f: &mut ratatui::Frame, area: Rect) {
        let header = Row::new(["Terminal", "Detected", "Configured", "Version"])
            .style(Style::default().fg(Color::Yellow));
        let mut rows: Vec<Row> = self
            .terminals()
            .iter()
            .map(|t| {
                if t.is_sentinel() {
                    return Row::new([Cell::from(format!("{} {}", t.icon, t.name))]);
                }
                Row::new([
                    Cell::from(format!("{} {}", t.icon, t.name)),
                    Cell::from(if t.installed { "✅" } else { "❌" }),
                    Cell::from(if t.config_exists { "✅" } else { "⚙️" }),
                    Cell::from(if t.version.is_empty() {
                        "-".to_string()
                    } else {
                        t.version.clone()
                    }),
                ])
            })
            .collect();
        rows.push(Row::new(["🔄 Refresh"]));
        rows.push(Row::new([format!("← {}", self.branding.texts.back)]));

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Min(8),
            ],
        )
        .header(header)
        .block(self.boxed(self.title()))
        .row_highlight_style(self.highlight())
        .highlight_symbol("> ");
        let mut state = TableState::default().with_selected(Some(self.current.cursor));
        f.render_stateful_widget(table, area, &mut state);
    }

    fn draw_checkboxes(&self, f: &mut ratatui::Frame, area: Rect, toggles: FilterToggles) {
        let mut items: Vec<ListItem> = filter::config_options()
            .iter()
            .map(|o| {
                let mark = if toggles.get(o.key) { "[x]" } else { "[ ]" };
                ListItem::new(format!("{mark} {}", o.title))
            })
            .collect();
        items.push(ListItem::new("✅ Confirm"));
        items.push(ListItem::new("❌ Cancel"));
        self.draw_list(f, area, items);
    }

    fn details(&self) -> Vec<Line<'static>> {
        let cursor = self.current.cursor;
        match &self.current.view {
            View::Menu(id) => self
                .options_for(id.as_deref())
                .get(cursor)
                .map(|o| vec![Line::from(o.description.clone())])
                .unwrap_or_default(),
            View::Terminals => match self.terminals().get(cursor) {
                Some(t) if !t.is_sentinel() => {
                    let mut lines = vec![Line::from(t.status().label())];
                    if t.config_path.is_empty() {
                        lines.push(Line::from("no config location on this platform"));
                    } else {
                        lines.push(Line::from(t.config_path.clone()));
                    }
                    lines
                }
                _ => Vec::new(),
            },
            View::TerminalActions(i) => self
                .terminals()
                .get(*i)
                .map(|t| vec![Line::from(t.to_string()), Line::from(t.config_path.clone())])
                .unwrap_or_default(),
            View::Checkboxes(_) => filter::config_options()
                .get(cursor)
                .map(|o| vec![Line::from(o.description)])
                .unwrap_or_else(|| vec![Line::from("Writes alacritty.toml, backing up the old one")]),
        }
    }

    fn draw_details(&self, f: &mut ratatui::Frame, area: Rect) {
        let p = Paragraph::new(Text::from(self.details()))
            .wrap(Wrap { trim: false })
            .block(self.boxed("Details".into()));
        f.render_widget(p, area);
    }

    fn draw_messages(&self, f: &mut ratatui::Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.messages.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .messages
            .iter()
            .skip(skip)
            .map(|m| {
                let color = match m.tone {
                    Tone::Info => Color::White,
                    Tone::Warn => Color::Yellow,
                    Tone::Error => Color::Red,
                };
                Line::styled(m.text.clone(), Style::default().fg(color))
            })
            .collect();
        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(self.boxed("Messages".into()));
        f.render_widget(p, area);
    }
}

pub fn run_menu(branding: &Branding, settings: &Settings, version: &str) -> Result<()> {
    let host = LocalHost::new(settings.probe_timeout());

    let mut stdout = io::stdout();
    enable_raw_mode().map_err(Error::ui)?;
    execute!(stdout, EnterAlternateScreen, Hide).map_err(Error::ui)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(Error::ui)?;
    terminal
        .clear()
        .map_err(|e| Error::ui(format!("tui clear failed: {e}")))?;

    let mut app = App::new(branding, settings, &host, version);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show).ok();

    result?;
    println!("{}", branding.texts.goodbye);
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick = Duration::from_millis(250);
    loop {
        terminal.draw(|f| app.draw(f)).map_err(Error::ui)?;

        if !event::poll(tick).map_err(Error::ui)? {
            continue;
        }
        if let Event::Key(k) = event::read().map_err(Error::ui)? {
            if k.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(k.code, k.modifiers)? {
                return Ok(());
            }
        }
    }
}
