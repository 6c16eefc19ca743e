use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{grid, EventId, EventStore};
use crate::theme;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub struct MonthView;

impl MonthView {
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        days: &[NaiveDate],
        reference: NaiveDate,
        cursor: NaiveDate,
        today: NaiveDate,
        store: &EventStore,
        selected: Option<EventId>,
    ) {
        let title = format!(" {} {} ", grid::month_name(reference.month()), reference.year());

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let weeks: Vec<&[NaiveDate]> = days.chunks(7).collect();

        let mut constraints = vec![Constraint::Length(1)]; // header
        constraints.extend(weeks.iter().map(|_| Constraint::Ratio(1, weeks.len() as u32)));
        let rows = Layout::vertical(constraints).split(inner);

        let header_cols = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(rows[0]);
        for (i, name) in DAY_NAMES.iter().enumerate() {
            let cell = Paragraph::new(Span::styled(format!(" {}", name), theme::current().header));
            frame.render_widget(cell, header_cols[i]);
        }

        for (w, week) in weeks.iter().enumerate() {
            let cols = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(rows[w + 1]);
            for (i, &date) in week.iter().enumerate() {
                render_day_cell(frame, cols[i], date, reference, cursor, today, store, selected);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_day_cell(
    frame: &mut Frame,
    area: Rect,
    date: NaiveDate,
    reference: NaiveDate,
    cursor: NaiveDate,
    today: NaiveDate,
    store: &EventStore,
    selected: Option<EventId>,
) {
    let in_month = date.month() == reference.month() && date.year() == reference.year();

    let number_style = if date == today && date == cursor {
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(ratatui::style::Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if date == cursor {
        theme::current().selected
    } else if date == today {
        theme::current().today
    } else if !in_month {
        theme::current().dim
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(Span::styled(format!(" {:>2} ", date.day()), number_style))];

    // One line per event, capped to the cell height; the remainder is
    // summarized so the user knows to open the day.
    let events = store.events_on(date);
    let max_events = area.height.saturating_sub(1) as usize;
    let shown = if events.len() > max_events && max_events > 0 {
        max_events - 1
    } else {
        events.len()
    };
    let width = area.width as usize;

    for event in &events[..shown] {
        let is_selected = selected == Some(event.id);
        let marker = if is_selected { "▸" } else { "•" };
        let style = if is_selected {
            theme::current().selected
        } else if in_month {
            theme::current().event
        } else {
            theme::current().dim
        };
        let text = truncate(&format!(" {} {}", marker, event.title), width);
        lines.push(Line::from(Span::styled(text, style)));
    }
    if shown < events.len() {
        let text = truncate(&format!(" +{} more", events.len() - shown), width);
        lines.push(Line::from(Span::styled(text, theme::current().dim)));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        s.chars().take(width.saturating_sub(1)).chain(['…']).collect()
    }
}
