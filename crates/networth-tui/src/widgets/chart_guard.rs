//! Guarded bar charts.
//!
//! A series is sanitized before it reaches the chart widget. When the data
//! is unusable the chart area shows a fallback panel instead, so one bad
//! value degrades one visualization and never the whole screen.

use ratatui::Frame;
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Wrap};
use tracing::debug;

use networth_core::{ChartError, ChartSeries};

use crate::theme;
use crate::widgets::money::fmt_compact;

/// Render `series` as a horizontal bar chart, or a fallback panel if it
/// does not pass [`ChartSeries::sanitize`].
pub fn render_guarded(frame: &mut Frame, area: Rect, series: ChartSeries) {
    let title = format!(" {} ", series.title);
    match series.sanitize() {
        Ok(clean) => render_bars(frame, area, &title, &clean),
        Err(err) => {
            debug!(chart = %title.trim(), error = %err, "chart data rejected");
            render_fallback(frame, area, &title, &err);
        }
    }
}

/// Bars are integral; negative slices draw as empty.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn bar_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_default())
}

fn render_bars(frame: &mut Frame, area: Rect, title: &str, series: &ChartSeries) {
    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let color = theme::series_color(i);
            Bar::default()
                .label(Line::from(point.label.clone()))
                .value(bar_value(point.value))
                .text_value(fmt_compact(point.value))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::palette().surface).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars))
        .max(bar_value(series.max_value()).max(1));
    frame.render_widget(chart, area);
}

fn render_fallback(frame: &mut Frame, area: Rect, title: &str, err: &ChartError) {
    let text = vec![
        Line::from(""),
        Line::styled(format!("Chart unavailable: {err}"), theme::warning()),
    ];
    let panel = Paragraph::new(text)
        .block(chart_block(title))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}
