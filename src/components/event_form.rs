use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::calendar::{Event, EventId};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Date,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Date,
            FormField::Description => FormField::Title,
            FormField::Date => FormField::Description,
        }
    }
}

/// Draft fields for the event being created or edited. Nothing here
/// touches the store until the form is submitted.
#[derive(Debug, Clone)]
pub struct EventFormState {
    pub editing: Option<EventId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub active_field: FormField,
}

impl EventFormState {
    /// Empty draft for a new event on the given day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            active_field: FormField::Title,
        }
    }

    /// Draft prefilled from an existing event.
    pub fn edit(event: &Event) -> Self {
        Self {
            editing: Some(event.id),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            active_field: FormField::Title,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Title => self.title.push(c),
            FormField::Description => self.description.push(c),
            FormField::Date => self.date.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
        }
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState) {
        let form_w = area.width.min(50).max(30);
        let form_h = area.height.min(10).max(8);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = if state.editing.is_some() {
            " Edit Event "
        } else {
            " New Event "
        };

        let block = Block::default()
            .title(title)
            .title_style(
                Style::default()
                    .fg(ratatui::style::Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // description
            Constraint::Length(1), // date
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "Title:",
            &state.title,
            state.active_field == FormField::Title,
        );
        render_field(
            frame,
            rows[1],
            "Desc:",
            &state.description,
            state.active_field == FormField::Description,
        );
        render_field(
            frame,
            rows[2],
            "Date:",
            &state.date,
            state.active_field == FormField::Date,
        );

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[4]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let spans = vec![
        Span::styled(format!("{:<6}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_draft_carries_the_clicked_date() {
        let form = EventFormState::new(d(2024, 6, 15));
        assert_eq!(form.date, "2024-06-15");
        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert_eq!(form.editing, None);
    }

    #[test]
    fn edit_draft_prefills_from_the_event() {
        let event = Event {
            id: EventId(7),
            title: "Lunch".into(),
            description: "team lunch".into(),
            date: d(2024, 6, 15),
        };
        let form = EventFormState::edit(&event);
        assert_eq!(form.editing, Some(EventId(7)));
        assert_eq!(form.title, "Lunch");
        assert_eq!(form.description, "team lunch");
        assert_eq!(form.date, "2024-06-15");
    }

    #[test]
    fn date_field_round_trips_through_text() {
        let mut form = EventFormState::new(d(2024, 6, 15));
        assert_eq!(form.parsed_date(), Some(d(2024, 6, 15)));

        form.date = "2024-13-40".into();
        assert_eq!(form.parsed_date(), None);

        form.date = "2024-07-04".into();
        assert_eq!(form.parsed_date(), Some(d(2024, 7, 4)));
    }

    #[test]
    fn tab_order_cycles_through_all_fields() {
        let mut field = FormField::Title;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Date);
    }
}
