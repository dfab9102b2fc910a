//! Dashboard screen: net-worth headline, per-class totals, allocation.
//!
//! Layout:
//! ┌─ Net Worth ──────────────────────────────────────────────┐
//! │ net worth · total assets · total liabilities             │
//! ├─ Asset Classes ──────────┬─ Allocation ──────────────────┤
//! │ class  value  share  n   │ horizontal bar chart          │
//! └──────────────────────────┴───────────────────────────────┘

use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use networth_api::ApiClient;
use networth_core::NetWorthSummary;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::chart_guard::render_guarded;
use crate::widgets::money::{fmt_age, fmt_money};

pub struct DashboardScreen {
    client: ApiClient,
    summary: Option<Arc<NetWorthSummary>>,
    error: Option<String>,
    loading: bool,
    loaded: bool,
    last_loaded: Option<DateTime<Utc>>,
    throbber: throbber_widgets_tui::ThrobberState,
    action_tx: Option<UnboundedSender<Action>>,
}

impl DashboardScreen {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            summary: None,
            error: None,
            loading: false,
            loaded: false,
            last_loaded: None,
            throbber: throbber_widgets_tui::ThrobberState::default(),
            action_tx: None,
        }
    }

    fn fetch(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        if self.loading {
            return;
        }
        self.loading = true;
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = NetWorthSummary::fetch(&client)
                .await
                .map(Arc::new)
                .map_err(|e| {
                    warn!(error = %e, "net-worth summary failed");
                    e.user_message("Failed to load net-worth summary")
                });
            let _ = tx.send(Action::SummaryLoaded(result));
        });
    }

    fn bordered(title: &str) -> Block<'_> {
        Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
    }

    fn render_headline(&self, frame: &mut Frame, area: Rect, summary: &NetWorthSummary) {
        let block = Self::bordered(" Net Worth ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [net, assets, liabilities] = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .areas(inner);

        let stat = |label: &str, value: f64, style: Style| {
            Paragraph::new(vec![
                Line::styled(label.to_owned(), theme::key_hint()),
                Line::styled(fmt_money(value), style),
            ])
            .alignment(Alignment::Center)
        };

        let net_style = theme::signed(summary.net_worth).add_modifier(Modifier::BOLD);
        frame.render_widget(stat("Net worth", summary.net_worth, net_style), net);
        frame.render_widget(stat("Total assets", summary.total_assets, theme::success()), assets);
        frame.render_widget(
            stat("Total liabilities", summary.total_liabilities, theme::error()),
            liabilities,
        );

        if let Some(at) = self.last_loaded {
            let age = Paragraph::new(Span::styled(
                format!("updated {} ", fmt_age(at, Utc::now())),
                theme::key_hint(),
            ))
            .alignment(Alignment::Right);
            let bottom = Rect::new(
                area.x,
                area.bottom().saturating_sub(1),
                area.width.saturating_sub(1),
                1,
            );
            frame.render_widget(age, bottom);
        }
    }

    fn render_classes(frame: &mut Frame, area: Rect, summary: &NetWorthSummary) {
        let allocation = summary.allocation();
        let shares = allocation.shares();
        let counts = summary.counts;
        let rows_data = [
            ("Cash", summary.cash, counts.cash),
            ("Stocks", summary.stocks, counts.stocks),
            ("Crypto", summary.crypto, counts.crypto),
            ("Real estate", summary.real_estate_equity, counts.real_estate),
            ("Equity", summary.equity, counts.equity),
            ("Manual", summary.manual, counts.manual),
        ];

        let rows = rows_data.iter().enumerate().map(|(i, (label, value, count))| {
            let share = shares.get(i).map_or(0.0, |(_, pct)| *pct);
            Row::new(vec![
                Span::styled("■ ", Style::default().fg(theme::series_color(i))),
                Span::styled((*label).to_owned(), theme::text()),
                Span::styled(fmt_money(*value), theme::signed(*value)),
                Span::styled(format!("{share:.1}%"), theme::key_hint()),
                Span::styled(count.to_string(), theme::key_hint()),
            ])
        });

        let header =
            Row::new(vec!["", "Class", "Value", "Share", "Items"]).style(theme::table_header());
        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(12),
                Constraint::Length(18),
                Constraint::Length(7),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .column_spacing(1)
        .block(Self::bordered(" Asset Classes "));
        frame.render_widget(table, area);

        if summary.real_estate > summary.real_estate_equity {
            let note = Paragraph::new(Span::styled(
                format!(
                    " real estate shown net of mortgages ({} gross)",
                    fmt_money(summary.real_estate)
                ),
                theme::key_hint(),
            ));
            let bottom = Rect::new(
                area.x + 1,
                area.bottom().saturating_sub(2),
                area.width.saturating_sub(2),
                1,
            );
            frame.render_widget(note, bottom);
        }
    }
}

impl Component for DashboardScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn set_focused(&mut self, focused: bool) {
        if focused && !self.loaded {
            self.loaded = true;
            self.fetch();
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('r') {
            self.fetch();
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SummaryLoaded(Ok(summary)) => {
                self.loading = false;
                self.summary = Some(Arc::clone(summary));
                self.error = None;
                self.last_loaded = Some(Utc::now());
            }
            Action::SummaryLoaded(Err(message)) => {
                self.loading = false;
                self.error = Some(message.clone());
            }
            Action::Tick if self.loading => self.throbber.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [headline, body, status] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .areas(area);

        if self.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Loading summary…")
                .style(theme::text())
                .throbber_style(theme::border_focused());
            frame.render_stateful_widget(throbber, status, &mut self.throbber.clone());
        } else if let Some(ref error) = self.error {
            let line = Line::from(vec![
                Span::styled(format!("✗ {error}"), theme::error()),
                Span::styled("  r retry", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), status);
        }

        let Some(ref summary) = self.summary else {
            frame.render_widget(Self::bordered(" Net Worth "), headline);
            return;
        };

        self.render_headline(frame, headline, summary);

        let [classes, chart] =
            Layout::horizontal([Constraint::Length(52), Constraint::Min(20)]).areas(body);
        Self::render_classes(frame, classes, summary);
        render_guarded(frame, chart, summary.allocation());
    }

    fn hints(&self) -> String {
        "r refresh".into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use networth_core::BackendConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen() -> DashboardScreen {
        DashboardScreen::new(BackendConfig::default().build_client().unwrap())
    }

    fn draw(screen: &DashboardScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 16)).unwrap();
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
    fn loaded_summary_is_rendered() {
        let mut screen = screen();
        let summary = NetWorthSummary {
            cash: 5_000.0,
            stocks: 12_000.0,
            total_assets: 17_000.0,
            net_worth: 17_000.0,
            ..NetWorthSummary::default()
        };
        screen
            .update(&Action::SummaryLoaded(Ok(Arc::new(summary))))
            .unwrap();
        let out = draw(&screen);
        assert!(out.contains("17,000.00"));
        assert!(out.contains("Asset Classes"));
        assert!(out.contains("Allocation"));
    }

    #[test]
    fn failure_keeps_last_summary_and_shows_error() {
        let mut screen = screen();
        screen
            .update(&Action::SummaryLoaded(Ok(Arc::new(NetWorthSummary::default()))))
            .unwrap();
        screen
            .update(&Action::SummaryLoaded(Err("backend down".into())))
            .unwrap();
        assert!(screen.summary.is_some());
        assert!(draw(&screen).contains("backend down"));
    }

    #[test]
    fn empty_allocation_degrades_to_fallback() {
        let mut screen = screen();
        screen
            .update(&Action::SummaryLoaded(Ok(Arc::new(NetWorthSummary::default()))))
            .unwrap();
        assert!(draw(&screen).contains("Chart unavailable"));
    }
}
