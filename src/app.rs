use chrono::{Datelike, Local, NaiveDate};

use crate::calendar::{grid, EventId, EventStore};
use crate::components::event_form::EventFormState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
}

/// All UI state. Every key press maps to one transition method here;
/// each transition leaves the grid consistent with the reference month
/// before the next key is read.
pub struct App {
    pub running: bool,
    pub today: NaiveDate,
    /// Any date inside the displayed month.
    pub reference: NaiveDate,
    /// The visible grid, always recomputed from `reference` as a whole.
    pub days: Vec<NaiveDate>,
    /// Day the keyboard cursor is on.
    pub cursor: NaiveDate,
    pub selected: Option<EventId>,
    pub form: Option<EventFormState>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub store: EventStore,
}

impl App {
    pub fn new() -> Self {
        let today = Local::now().date_naive();
        Self::with_today(today)
    }

    fn with_today(today: NaiveDate) -> Self {
        Self {
            running: true,
            today,
            reference: today,
            days: grid::month_grid(today),
            cursor: today,
            selected: None,
            form: None,
            status_message: None,
            show_help: false,
            store: EventStore::new(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.form.is_some() {
            InputMode::Form
        } else {
            InputMode::Normal
        }
    }

    fn set_reference(&mut self, reference: NaiveDate) {
        self.reference = reference;
        self.days = grid::month_grid(reference);
    }

    // ── Month navigation ──

    pub fn prev_month(&mut self) {
        self.set_reference(grid::prev_month(self.reference));
        self.cursor = self.reference;
    }

    pub fn next_month(&mut self) {
        self.set_reference(grid::next_month(self.reference));
        self.cursor = self.reference;
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.set_reference(self.today);
        self.cursor = self.today;
    }

    // ── Cursor movement ──

    /// Move the cursor by whole days; leaving the visible grid carries
    /// the reference month along with it.
    pub fn move_cursor(&mut self, days: i64) {
        self.cursor += chrono::Duration::days(days);
        if !self.days.contains(&self.cursor) {
            self.set_reference(self.cursor);
        }
    }

    // ── Selection ──

    /// Keyboard analogue of clicking events to toggle selection: walk
    /// through the cursor day's events, then deselect.
    pub fn cycle_selection(&mut self) {
        let ids: Vec<EventId> = self
            .store
            .events_on(self.cursor)
            .iter()
            .map(|e| e.id)
            .collect();
        if ids.is_empty() {
            return;
        }

        self.selected = match self.selected.and_then(|id| ids.iter().position(|&i| i == id)) {
            None => Some(ids[0]),
            Some(pos) if pos + 1 < ids.len() => Some(ids[pos + 1]),
            Some(_) => None,
        };
    }

    pub fn toggle_select(&mut self, id: EventId) {
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    // ── Event form ──

    pub fn open_form(&mut self) {
        self.form = Some(EventFormState::new(self.cursor));
    }

    pub fn edit_selected(&mut self) {
        let Some(event) = self.selected.and_then(|id| self.store.get(id)) else {
            self.status_message = Some("No event selected".to_string());
            return;
        };
        self.form = Some(EventFormState::edit(event));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Commit the draft. Invalid input keeps the form (and the user's
    /// text) open and posts a status message instead.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };

        if form.title.trim().is_empty() {
            self.status_message = Some("Title required".to_string());
            return;
        }
        let Some(date) = form.parsed_date() else {
            self.status_message = Some("Date must be YYYY-MM-DD".to_string());
            return;
        };

        let committed = match form.editing {
            Some(id) => {
                if self.store.update(id, &form.title, &form.description, date) {
                    Some(id)
                } else {
                    None
                }
            }
            None => self.store.create(&form.title, &form.description, date),
        };

        if committed.is_some() {
            self.form = None;
            // Follow the event so it is visible after saving.
            self.cursor = date;
            if date.year() != self.reference.year() || date.month() != self.reference.month() {
                self.set_reference(date);
            }
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(ref mut form) = self.form {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(ref mut form) = self.form {
            form.backspace();
        }
    }

    pub fn form_tab(&mut self) {
        if let Some(ref mut form) = self.form {
            form.active_field = form.active_field.next();
        }
    }

    pub fn form_backtab(&mut self) {
        if let Some(ref mut form) = self.form {
            form.active_field = form.active_field.prev();
        }
    }

    // ── Deletion ──

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected else {
            self.status_message = Some("No event selected".to_string());
            return;
        };
        let title = self.store.get(id).map(|e| e.title.clone());
        if self.store.delete(id) {
            self.selected = None;
            if let Some(title) = title {
                self.status_message = Some(format!("Deleted \"{}\"", title));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::event_form::FormField;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn app_at(date: NaiveDate) -> App {
        App::with_today(date)
    }

    #[test]
    fn month_navigation_round_trips() {
        let mut app = app_at(d(2024, 6, 15));
        let original = app.days.clone();

        app.next_month();
        assert_eq!(app.reference, d(2024, 7, 1));
        app.prev_month();
        assert_eq!(app.reference, d(2024, 6, 30));
        assert_eq!(app.days, original);
    }

    #[test]
    fn go_to_today_restores_the_current_month() {
        let mut app = app_at(d(2024, 6, 15));
        app.next_month();
        app.next_month();
        app.go_to_today();
        assert_eq!(app.cursor, app.today);
        assert!(app.days.contains(&app.today));
    }

    #[test]
    fn cursor_follows_into_adjacent_months() {
        let mut app = app_at(d(2024, 6, 30));
        // June's grid runs through 2024-07-06, so one step stays put.
        app.move_cursor(1);
        assert_eq!(app.cursor, d(2024, 7, 1));
        assert_eq!(app.reference, d(2024, 6, 30));
        // A week later the cursor leaves the grid and drags the month.
        app.move_cursor(7);
        assert_eq!(app.cursor, d(2024, 7, 8));
        assert_eq!(app.reference, d(2024, 7, 8));
    }

    #[test]
    fn events_survive_navigation() {
        let mut app = app_at(d(2024, 6, 15));
        app.store.create("Lunch", "", d(2024, 6, 15));
        app.next_month();
        app.prev_month();
        assert_eq!(app.store.events_on(d(2024, 6, 15)).len(), 1);
    }

    #[test]
    fn submit_creates_an_event_on_the_draft_date() {
        let mut app = app_at(d(2024, 6, 15));
        app.open_form();
        for c in "Lunch".chars() {
            app.form_input_char(c);
        }
        app.submit_form();

        assert!(app.form.is_none());
        let events = app.store.events_on(d(2024, 6, 15));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Lunch");
    }

    #[test]
    fn blank_title_keeps_the_form_open() {
        let mut app = app_at(d(2024, 6, 15));
        app.open_form();
        app.form_input_char(' ');
        app.submit_form();

        assert!(app.form.is_some());
        assert!(app.store.events().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Title required"));
    }

    #[test]
    fn malformed_date_keeps_the_form_open() {
        let mut app = app_at(d(2024, 6, 15));
        app.open_form();
        app.form_input_char('x');
        app.form_tab();
        app.form_tab();
        assert_eq!(app.form.as_ref().unwrap().active_field, FormField::Date);
        app.form_backspace();
        app.submit_form();

        assert!(app.form.is_some());
        assert!(app.store.events().is_empty());
        assert_eq!(app.status_message.as_deref(), Some("Date must be YYYY-MM-DD"));
    }

    #[test]
    fn cancel_discards_the_draft() {
        let mut app = app_at(d(2024, 6, 15));
        app.open_form();
        for c in "Lunch".chars() {
            app.form_input_char(c);
        }
        app.close_form();
        assert!(app.store.events().is_empty());
    }

    #[test]
    fn editing_replaces_in_place() {
        let mut app = app_at(d(2024, 6, 15));
        let id = app.store.create("Lunch", "", d(2024, 6, 15)).unwrap();
        app.toggle_select(id);
        app.edit_selected();

        let form = app.form.as_mut().unwrap();
        form.title = "Team lunch".to_string();
        app.submit_form();

        assert!(app.form.is_none());
        assert_eq!(app.store.get(id).unwrap().title, "Team lunch");
        assert_eq!(app.store.events().len(), 1);
    }

    #[test]
    fn submitting_a_moved_date_follows_the_event() {
        let mut app = app_at(d(2024, 6, 15));
        app.open_form();
        for c in "Trip".chars() {
            app.form_input_char(c);
        }
        let form = app.form.as_mut().unwrap();
        form.date = "2024-08-02".to_string();
        app.submit_form();

        assert_eq!(app.cursor, d(2024, 8, 2));
        assert!(app.days.contains(&d(2024, 8, 2)));
    }

    #[test]
    fn selection_toggles() {
        let mut app = app_at(d(2024, 6, 15));
        let id = app.store.create("Lunch", "", d(2024, 6, 15)).unwrap();

        app.toggle_select(id);
        assert_eq!(app.selected, Some(id));
        app.toggle_select(id);
        assert_eq!(app.selected, None);
    }

    #[test]
    fn cycling_walks_the_days_events_then_deselects() {
        let mut app = app_at(d(2024, 6, 15));
        let a = app.store.create("a", "", d(2024, 6, 15)).unwrap();
        let b = app.store.create("b", "", d(2024, 6, 15)).unwrap();

        app.cycle_selection();
        assert_eq!(app.selected, Some(a));
        app.cycle_selection();
        assert_eq!(app.selected, Some(b));
        app.cycle_selection();
        assert_eq!(app.selected, None);
    }

    #[test]
    fn delete_clears_the_selection() {
        let mut app = app_at(d(2024, 6, 15));
        let keep = app.store.create("keep", "", d(2024, 6, 14)).unwrap();
        let id = app.store.create("Lunch", "", d(2024, 6, 15)).unwrap();

        app.toggle_select(id);
        app.delete_selected();

        assert_eq!(app.selected, None);
        assert_eq!(app.store.events().len(), 1);
        assert_eq!(app.store.events()[0].id, keep);
    }
}
