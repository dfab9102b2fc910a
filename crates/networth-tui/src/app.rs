//! Application core: event loop, screen management, action dispatch.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexmap::IndexMap;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use networth_api::ApiClient;

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::centered;

/// How long a toast stays in the status bar.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// All screen components, in tab-bar order.
    screens: IndexMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(client: ApiClient, message_ttl: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            active_screen: ScreenId::Dashboard,
            screens: create_screens(&client, message_ttl),
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            // Drain everything queued, including results from background tasks.
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    fn active(&self) -> Option<&dyn Component> {
        self.screens.get(&self.active_screen).map(Box::as_ref)
    }

    /// Map a key event to an action. Global keys are handled here unless
    /// the active screen has a form or dialog open.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?' | 'q') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let capturing = self.active().is_some_and(Component::captures_input);
        if !capturing {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
                (KeyModifiers::NONE, KeyCode::Char('t')) => return Ok(Some(Action::ToggleTheme)),
                (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                    let n = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                    if let Some(screen) = n.and_then(ScreenId::from_number) {
                        return Ok(Some(Action::SwitchScreen(screen)));
                    }
                }
                (KeyModifiers::NONE, KeyCode::Tab) => {
                    return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
                }
                (_, KeyCode::BackTab) => {
                    return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
                }
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::ToggleTheme => {
                let next = theme::variant().toggled();
                theme::set_variant(next);
                debug!(theme = ?next, "theme toggled");
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::Render | Action::Resize(..) => {}

            // Ticks and background results go to every screen; each one
            // ignores what it does not own.
            other => {
                if let Action::Tick = other {
                    if self
                        .notification
                        .as_ref()
                        .is_some_and(|(_, at)| at.elapsed() > NOTIFICATION_TTL)
                    {
                        self.notification = None;
                    }
                }
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::surface()), area);

        let [content, tabs, status] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.active() {
            screen.render(frame, content);
        }
        self.render_tab_bar(frame, tabs);
        self.render_status_bar(frame, status);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .screens
            .keys()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(self.screens.get_index_of(&self.active_screen).unwrap_or(0));
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let left = if let Some((ref n, _)) = self.notification {
            let (icon, style) = match n.level {
                NotificationLevel::Success => ("✓", theme::success()),
                NotificationLevel::Error => ("✗", theme::error()),
                NotificationLevel::Info => ("·", theme::text()),
            };
            Span::styled(format!(" {icon} {}", n.message), style)
        } else {
            let hints = self.active().map(Component::hints).unwrap_or_default();
            Span::styled(format!(" {hints}"), theme::key_hint())
        };

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(28)]).areas(area);
        frame.render_widget(Paragraph::new(Line::from(left)), left_area);
        frame.render_widget(
            Paragraph::new(Span::styled("? help  t theme  q quit ", theme::key_hint()))
                .alignment(ratatui::layout::Alignment::Right),
            right_area,
        );
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let popup = centered(area, 58, 24);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::surface());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let section = |title: &'static str| {
            Line::from(Span::styled(format!("  {title}"), theme::title_style()))
        };
        let key = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help = vec![
            Line::default(),
            section("Navigation"),
            key("1-9", "Jump to screen"),
            key("Tab", "Next / previous screen"),
            key("j/k ↑/↓", "Move selection"),
            key("g/G", "Top / bottom"),
            key("Ctrl+d/u", "Page down / up"),
            Line::default(),
            section("Assets"),
            key("a / e / d", "Add / edit / delete"),
            key("Enter", "View details"),
            key("v", "Table, cards, chart"),
            key("r", "Refresh"),
            key("x", "Dismiss message"),
            Line::default(),
            section("Forms"),
            key("Tab/↑/↓", "Move between fields"),
            key("←/→ Space", "Cycle option / toggle"),
            key("Ctrl+s", "Save"),
            key("Esc", "Cancel"),
            Line::default(),
            key("t  ?  q", "Theme, this help, quit"),
        ];
        frame.render_widget(Paragraph::new(help), inner);
    }
}
