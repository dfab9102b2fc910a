//! Generic asset screen: one implementation for every asset type.
//!
//! The screen owns a CRUD orchestrator and renders straight from its
//! watch channel. Every orchestrator action runs as its own task, so a
//! slow request never blocks input; the outcome shows up in the state.

use std::cell::Cell;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, Paragraph, Row, Table, TableState, Wrap,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::debug;

use networth_api::ApiClient;
use networth_core::chart::value_series;
use networth_core::{
    CoreError, CrudState, FormData, FormSchema, HttpOrchestrator, MessageKind, ModalKind,
    SchemaExt, ViewMode, http_orchestrator,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::views::AssetView;
use crate::widgets::chart_guard::render_guarded;
use crate::widgets::centered;
use crate::widgets::form::{Form, FormOutcome};
use crate::widgets::money::{fmt_age, fmt_money};

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 4;

pub struct AssetScreen<T: AssetView> {
    orchestrator: HttpOrchestrator<T>,
    state: watch::Receiver<CrudState<T>>,
    table_state: TableState,
    form: Option<Form>,
    loaded: bool,
    throbber: throbber_widgets_tui::ThrobberState,
    /// Cards per row at the last render, for vertical card navigation.
    cards_per_row: Cell<usize>,
    /// Set from the moment a save or delete is spawned until it finishes;
    /// `submitting` in the page state lags until the task is first polled.
    in_flight: Arc<AtomicBool>,
    action_tx: Option<UnboundedSender<Action>>,
}

impl<T: AssetView> AssetScreen<T> {
    pub fn new(client: ApiClient, message_ttl: Duration) -> Self {
        let orchestrator = http_orchestrator::<T>(client, message_ttl);
        let state = orchestrator.subscribe();
        Self {
            orchestrator,
            state,
            table_state: TableState::default(),
            form: None,
            loaded: false,
            throbber: throbber_widgets_tui::ThrobberState::default(),
            cards_per_row: Cell::new(1),
            in_flight: Arc::new(AtomicBool::new(false)),
            action_tx: None,
        }
    }

    fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(Action::Notify(notification));
        }
    }

    /// Run an orchestrator action in the background. Backend failures are
    /// already recorded in the page state; local refusals are surfaced as
    /// a notification.
    fn spawn<F>(&self, what: &'static str, fut: F)
    where
        F: Future<Output = Result<(), CoreError>> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        let asset = T::KIND;
        tokio::spawn(async move {
            if let Err(e) = fut.await {
                debug!(%asset, action = what, error = %e, "asset action failed");
                if e.is_local() {
                    if let Some(tx) = tx {
                        let _ = tx.send(Action::Notify(Notification::error(e.to_string())));
                    }
                }
            }
        });
    }

    /// Spawn a mutation, holding `in_flight` until it completes.
    fn spawn_mutation<F>(&self, what: &'static str, fut: F)
    where
        F: Future<Output = Result<(), CoreError>> + Send + 'static,
    {
        self.in_flight.store(true, Ordering::SeqCst);
        let in_flight = Arc::clone(&self.in_flight);
        self.spawn(what, async move {
            let result = fut.await;
            in_flight.store(false, Ordering::SeqCst);
            result
        });
    }

    fn submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) || self.state.borrow().submitting
    }

    // ── Selection ───────────────────────────────────────────────────

    fn item_count(&self) -> usize {
        self.state.borrow().items.len()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_item(&self) -> Option<T> {
        self.state.borrow().items.get(self.selected_index()).cloned()
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let next = self.selected_index().saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    /// Keep the selection inside the current item list.
    fn clamp_selection(&mut self) {
        match self.item_count() {
            0 => self.table_state.select(None),
            len => self.table_state.select(Some(self.selected_index().min(len - 1))),
        }
    }

    fn cards_that_fit(width: u16) -> usize {
        usize::from((width / CARD_WIDTH).max(1))
    }

    // ── Modals ──────────────────────────────────────────────────────

    fn form_schema(&self) -> FormSchema {
        self.state
            .borrow()
            .schema
            .clone()
            .filter(|s| !s.fields.is_empty())
            .unwrap_or_else(T::fallback_schema)
    }

    /// The schema to build a form from, or a notification when there is
    /// nothing to show.
    fn usable_schema(&self) -> Option<FormSchema> {
        let schema = self.form_schema();
        if schema.fields.is_empty() {
            self.notify(Notification::info(format!(
                "No form schema loaded for {}; press r to retry",
                self.orchestrator.config().label
            )));
            return None;
        }
        Some(schema)
    }

    fn open_add(&mut self) {
        let config = self.orchestrator.config();
        if !config.capabilities.create {
            self.notify(Notification::error(format!("Adding {} is not supported", config.label)));
            return;
        }
        let Some(schema) = self.usable_schema() else {
            return;
        };
        let defaults = schema.defaults();
        let title = format!("Add {}", config.noun);
        self.orchestrator.open_add_modal();
        self.form = Some(Form::new(title, schema, &defaults));
    }

    fn open_edit(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let config = self.orchestrator.config();
        if !config.capabilities.update {
            self.notify(Notification::error(format!("Editing {} is not supported", config.label)));
            return;
        }
        let Some(schema) = self.usable_schema() else {
            return;
        };
        let initial = match serde_json::to_value(&item) {
            Ok(Value::Object(map)) => map,
            _ => FormData::new(),
        };
        let title = format!("Edit {}", item.display_name());
        self.form = Some(Form::for_edit(title, schema, &initial));
        self.orchestrator.open_edit_modal(item);
    }

    fn open_delete(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        if !self.orchestrator.config().capabilities.delete {
            self.notify(Notification::error(format!(
                "Deleting {} is not supported",
                self.orchestrator.config().label
            )));
            return;
        }
        self.orchestrator.open_delete_modal(item);
    }

    fn close(&mut self) {
        self.form = None;
        self.orchestrator.close_modals();
    }

    fn submit(&mut self, modal: ModalKind) {
        let Some(data) = self.form.as_mut().and_then(Form::collect) else {
            return;
        };
        let payload = Value::Object(data);
        let orchestrator = self.orchestrator.clone();
        match modal {
            ModalKind::Add => {
                self.spawn_mutation("create", async move {
                    orchestrator.handle_create(payload).await
                });
            }
            ModalKind::Edit => {
                self.spawn_mutation("update", async move {
                    orchestrator.handle_update(payload).await
                });
            }
            ModalKind::View | ModalKind::Delete => {}
        }
    }

    fn handle_modal_key(&mut self, modal: ModalKind, key: KeyEvent) {
        let submitting = self.submitting();
        match modal {
            ModalKind::Add | ModalKind::Edit => {
                if submitting {
                    return;
                }
                let Some(form) = self.form.as_mut() else {
                    self.close();
                    return;
                };
                match form.handle_key(key) {
                    FormOutcome::Cancel => self.close(),
                    FormOutcome::Submit => self.submit(modal),
                    FormOutcome::Continue => {}
                }
            }
            ModalKind::View => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.close();
                }
            }
            ModalKind::Delete => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter if !submitting => {
                    let orchestrator = self.orchestrator.clone();
                    self.spawn_mutation("delete", async move {
                        orchestrator.handle_delete().await
                    });
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc if !submitting => self.close(),
                _ => {}
            },
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_status_row(&self, frame: &mut Frame, area: Rect, state: &CrudState<T>) {
        let [left, right] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(34)]).areas(area);

        if state.busy() || state.submitting {
            let label = if state.submitting {
                "Saving…".to_owned()
            } else if state.loading {
                format!("Loading {}…", self.orchestrator.config().label)
            } else {
                "Refreshing…".to_owned()
            };
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(label)
                .style(theme::text())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, left, &mut self.throbber.clone());
        } else if let Some(ref error) = state.error {
            let line = Line::from(vec![
                Span::styled(format!("✗ {error}"), theme::error()),
                Span::styled("  x dismiss", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), left);
        } else if let Some(ref message) = state.message {
            let style = match message.kind {
                MessageKind::Success => theme::success(),
                MessageKind::Error => theme::error(),
            };
            frame.render_widget(Paragraph::new(Span::styled(message.text.clone(), style)), left);
        }

        let age = state
            .last_loaded
            .map(|at| format!("loaded {}", fmt_age(at, Utc::now())))
            .unwrap_or_default();
        let right_text = Line::from(vec![
            Span::styled(age, theme::key_hint()),
            Span::styled(format!("  [{}]", state.view_mode), theme::tab_active()),
        ]);
        frame.render_widget(Paragraph::new(right_text).alignment(Alignment::Right), right);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, items: &[T]) {
        let columns = T::columns();
        let header = Row::new(columns.iter().map(|(name, _)| *name)).style(theme::table_header());
        let rows = items.iter().map(|item| Row::new(item.cells()).style(theme::text()));
        let widths = columns.iter().map(|(_, width)| *width);

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(theme::table_selected())
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(table, area, &mut self.table_state.clone());
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, items: &[T]) {
        let per_row = Self::cards_that_fit(area.width);
        self.cards_per_row.set(per_row);
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected = self.selected_index();
        let first_row = (selected / per_row).saturating_sub(visible_rows - 1);

        let card_width = area.width / u16::try_from(per_row).unwrap_or(1);
        for (i, item) in items.iter().enumerate().skip(first_row * per_row) {
            let row = i / per_row - first_row;
            if row >= visible_rows {
                break;
            }
            let col = i % per_row;
            let (Ok(col), Ok(row)) = (u16::try_from(col), u16::try_from(row)) else {
                break;
            };
            let card = Rect::new(
                area.x + col * card_width,
                area.y + row * CARD_HEIGHT,
                card_width,
                CARD_HEIGHT,
            )
            .intersection(area);

            let block = Block::default()
                .title(format!(" {} ", item.display_name()))
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if i == selected {
                    theme::border_focused()
                } else {
                    theme::border_default()
                });
            let value = item.market_value();
            let body = vec![
                Line::styled(item.subtitle(), theme::key_hint()),
                Line::styled(fmt_money(value), theme::signed(value)),
            ];
            frame.render_widget(Paragraph::new(body).block(block), card);
        }
    }

    fn render_view_modal(frame: &mut Frame, area: Rect, item: &T) {
        let pairs: Vec<_> = item.detail().into_iter().filter(|(_, v)| !v.is_empty()).collect();
        let height = u16::try_from(pairs.len() + 4).unwrap_or(u16::MAX);
        let popup = centered(area, 64, height);
        frame.render_widget(Clear, popup);

        let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let mut lines: Vec<Line> = pairs
            .into_iter()
            .map(|(k, v)| {
                Line::from(vec![
                    Span::styled(format!("{k:>width$}  "), theme::key_hint_key()),
                    Span::styled(v, theme::text()),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::styled("Esc close", theme::key_hint()));

        let block = Block::default()
            .title(format!(" {} ", item.display_name()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), popup);
    }

    fn render_delete_modal(frame: &mut Frame, area: Rect, item: &T, state: &CrudState<T>) {
        let popup = centered(area, 56, 8);
        frame.render_widget(Clear, popup);

        let mut lines = vec![
            Line::default(),
            Line::styled(format!("Delete {}?", item.display_name()), theme::text()),
            Line::default(),
        ];
        if state.submitting {
            lines.push(Line::styled("Deleting…", theme::warning()));
        } else if let Some(ref error) = state.error {
            lines.push(Line::styled(error.clone(), theme::error()));
        } else {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled("y", theme::key_hint_key()),
            Span::styled(" delete   ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled(" cancel", theme::key_hint()),
        ]));

        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::error())
            .style(theme::surface());
        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            popup,
        );
    }
}

impl<T: AssetView> Component for AssetScreen<T> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.loaded {
            self.loaded = true;
            let orchestrator = self.orchestrator.clone();
            self.spawn("initialize", async move { orchestrator.initialize().await });
        }
    }

    fn captures_input(&self) -> bool {
        self.state.borrow().active_modal().is_some()
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let (modal, view_mode) = {
            let state = self.state.borrow();
            (state.active_modal(), state.view_mode)
        };
        if let Some(modal) = modal {
            self.handle_modal_key(modal, key);
            return Ok(None);
        }

        let cards = view_mode == ViewMode::Cards;
        let row_step = if cards {
            isize::try_from(self.cards_per_row.get()).unwrap_or(1)
        } else {
            1
        };

        match (key.modifiers, key.code) {
            (_, KeyCode::Char('j') | KeyCode::Down) => self.move_selection(row_step),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.move_selection(-row_step),
            (_, KeyCode::Char('l') | KeyCode::Right) if cards => self.move_selection(1),
            (_, KeyCode::Char('h') | KeyCode::Left) if cards => self.move_selection(-1),
            (KeyModifiers::CONTROL, KeyCode::Char('d')) | (_, KeyCode::PageDown) => {
                self.move_selection(10);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) | (_, KeyCode::PageUp) => {
                self.move_selection(-10);
            }
            (_, KeyCode::Char('g') | KeyCode::Home) => self.table_state.select(Some(0)),
            (_, KeyCode::Char('G') | KeyCode::End) => {
                let len = self.item_count();
                self.table_state.select(len.checked_sub(1));
            }
            (_, KeyCode::Char('a')) => self.open_add(),
            (_, KeyCode::Char('e')) => self.open_edit(),
            (_, KeyCode::Enter) => {
                if let Some(item) = self.selected_item() {
                    self.orchestrator.open_view_modal(item);
                }
            }
            (_, KeyCode::Char('d')) => self.open_delete(),
            (_, KeyCode::Char('r')) => {
                let orchestrator = self.orchestrator.clone();
                self.spawn("refresh", async move {
                    let (items, schema) =
                        tokio::join!(orchestrator.refresh_items(), orchestrator.load_schema());
                    items.and(schema)
                });
            }
            (_, KeyCode::Char('v')) => self.orchestrator.set_view_mode(view_mode.next()),
            (_, KeyCode::Char('x')) => {
                self.orchestrator.dismiss_error();
                self.orchestrator.dismiss_message();
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Tick = action {
            let (busy, form_open) = {
                let state = self.state.borrow();
                (
                    state.busy() || state.submitting,
                    matches!(state.active_modal(), Some(ModalKind::Add | ModalKind::Edit)),
                )
            };
            if busy {
                self.throbber.calc_next();
            }
            // The orchestrator closes modals itself after a successful save.
            if !form_open {
                self.form = None;
            }
            self.clamp_selection();
            if self.table_state.selected().is_none() && self.item_count() > 0 {
                self.table_state.select(Some(0));
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let state = self.state.borrow();
        let config = self.orchestrator.config();

        let block = Block::default()
            .title(format!(" {} ({}) ", config.kind.title(), state.items.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
        self.render_status_row(frame, status_area, &state);

        if state.items.is_empty() {
            if !state.busy() {
                let hint = if state.error.is_some() {
                    format!("Could not load {}. Press r to retry.", config.label)
                } else {
                    format!("No {} yet. Press a to add one.", config.label)
                };
                let empty = Paragraph::new(Line::styled(hint, theme::key_hint()))
                    .alignment(Alignment::Center);
                frame.render_widget(empty, centered(body, body.width, 1));
            }
        } else {
            match state.view_mode {
                ViewMode::Table => self.render_table(frame, body, &state.items),
                ViewMode::Cards => self.render_cards(frame, body, &state.items),
                ViewMode::Chart => render_guarded(
                    frame,
                    body,
                    value_series(format!("{} by value", config.kind.title()), &state.items),
                ),
            }
        }

        match state.active_modal() {
            Some(ModalKind::Add | ModalKind::Edit) => {
                if let Some(ref form) = self.form {
                    let status = if state.submitting {
                        Some(Line::styled("Saving…", theme::warning()))
                    } else {
                        state
                            .message
                            .as_ref()
                            .filter(|m| m.kind == MessageKind::Error)
                            .map(|m| Line::styled(m.text.clone(), theme::error()))
                    };
                    form.render(frame, area, status);
                }
            }
            Some(ModalKind::View) => {
                if let Some(ref item) = state.selected_item {
                    Self::render_view_modal(frame, area, item);
                }
            }
            Some(ModalKind::Delete) => {
                if let Some(ref item) = state.selected_item {
                    Self::render_delete_modal(frame, area, item, &state);
                }
            }
            None => {}
        }
    }

    fn hints(&self) -> String {
        let caps = self.orchestrator.config().capabilities;
        let mut hints = Vec::with_capacity(8);
        if caps.create {
            hints.push("a add");
        }
        if caps.update {
            hints.push("e edit");
        }
        hints.push("⏎ view");
        if caps.delete {
            hints.push("d delete");
        }
        hints.extend(["r refresh", "v view mode", "x dismiss"]);
        hints.join("  ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use networth_api::TransportConfig;
    use networth_core::{AssetCategory, BackendConfig, CashHolding};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;
    use tokio::sync::mpsc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::action::NotificationLevel;

    fn screen<T: AssetView>() -> AssetScreen<T> {
        let client = BackendConfig::default().build_client().unwrap();
        AssetScreen::new(client, Duration::from_secs(3))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw<T: AssetView>(screen: &AssetScreen<T>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| screen.render(frame, frame.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn add_without_backend_schema_uses_fallback_form() {
        let mut screen = screen::<AssetCategory>();
        screen.handle_key_event(press(KeyCode::Char('a'))).unwrap();

        assert!(screen.captures_input());
        assert_eq!(screen.state.borrow().active_modal(), Some(ModalKind::Add));
        let form = screen.form.as_ref().unwrap();
        assert_eq!(form.focused_field().map(|f| f.name.as_str()), Some("name"));
        assert!(draw(&screen).contains("Add Category"));

        screen.handle_key_event(press(KeyCode::Esc)).unwrap();
        assert!(!screen.captures_input());
        assert!(screen.form.is_none());
    }

    #[test]
    fn add_without_any_schema_notifies_instead() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = screen::<CashHolding>();
        screen.init(tx).unwrap();
        screen.handle_key_event(press(KeyCode::Char('a'))).unwrap();

        assert!(!screen.captures_input());
        match rx.try_recv().unwrap() {
            Action::Notify(n) => {
                assert_eq!(n.level, NotificationLevel::Info);
                assert!(n.message.contains("press r to retry"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    fn served<T: AssetView>(server: &MockServer) -> AssetScreen<T> {
        let client = ApiClient::new(&server.uri(), &TransportConfig::default(), None).unwrap();
        AssetScreen::new(client, Duration::from_secs(3))
    }

    #[tokio::test]
    async fn edit_without_any_schema_notifies_instead() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/cash-holdings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 7,
                "institution_name": "Credit Union",
                "account_name": "Checking",
                "current_balance": "250.00"
            }])))
            .mount(&server)
            .await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut screen = served::<CashHolding>(&server);
        screen.init(tx).unwrap();
        screen.orchestrator.load_items().await.unwrap();
        screen.update(&Action::Tick).unwrap();
        assert!(screen.selected_item().is_some());

        screen.handle_key_event(press(KeyCode::Char('e'))).unwrap();

        assert!(!screen.captures_input());
        assert!(screen.form.is_none());
        match rx.try_recv().unwrap() {
            Action::Notify(n) => {
                assert_eq!(n.level, NotificationLevel::Info);
                assert!(n.message.contains("press r to retry"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_save_sends_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/asset-categories"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/asset-categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut screen = served::<AssetCategory>(&server);
        screen.init(tx).unwrap();
        screen.handle_key_event(press(KeyCode::Char('a'))).unwrap();
        for c in "Bonds".chars() {
            screen.handle_key_event(press(KeyCode::Char(c))).unwrap();
        }

        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        screen.handle_key_event(save).unwrap();
        screen.handle_key_event(save).unwrap();
        assert!(screen.submitting());

        tokio::time::timeout(Duration::from_secs(5), async {
            while screen.in_flight.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
        server.verify().await;
    }

    #[test]
    fn edit_and_delete_need_a_selection() {
        let mut screen = screen::<AssetCategory>();
        screen.handle_key_event(press(KeyCode::Char('e'))).unwrap();
        screen.handle_key_event(press(KeyCode::Char('d'))).unwrap();
        screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert_eq!(screen.state.borrow().active_modal(), None);
    }

    #[test]
    fn view_mode_cycles_on_v() {
        let mut screen = screen::<CashHolding>();
        let before = screen.state.borrow().view_mode;
        screen.handle_key_event(press(KeyCode::Char('v'))).unwrap();
        assert_eq!(screen.state.borrow().view_mode, before.next());
    }

    #[test]
    fn empty_list_shows_hint() {
        let screen = screen::<AssetCategory>();
        let out = draw(&screen);
        assert!(out.contains("No asset categories yet. Press a to add one."));
        assert!(out.contains("Categories (0)"));
    }

    #[test]
    fn hints_follow_capabilities() {
        let screen = screen::<CashHolding>();
        let hints = screen.hints();
        assert!(hints.starts_with("a add  e edit"));
        assert!(hints.contains("d delete"));
    }
}
