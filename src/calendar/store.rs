use chrono::NaiveDate;

use super::event::{Event, EventId};

/// In-memory event collection. Mutations build a fresh `Vec` and swap it
/// in, so a slice handed out before a mutation never observes it.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// All events scheduled on the given calendar day, in creation order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Adds an event and returns its id. A whitespace-only title is
    /// rejected and the collection is left untouched.
    pub fn create(&mut self, title: &str, description: &str, date: NaiveDate) -> Option<EventId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let id = EventId(self.next_id);
        self.next_id += 1;

        let mut events = self.events.clone();
        events.push(Event {
            id,
            title: title.to_string(),
            description: description.to_string(),
            date,
        });
        self.events = events;
        Some(id)
    }

    /// Replaces the event matching `id`, keeping its id. Returns false
    /// without touching the collection on an empty trimmed title or an
    /// unknown id.
    pub fn update(&mut self, id: EventId, title: &str, description: &str, date: NaiveDate) -> bool {
        let title = title.trim();
        if title.is_empty() || self.get(id).is_none() {
            return false;
        }

        self.events = self
            .events
            .iter()
            .map(|e| {
                if e.id == id {
                    Event {
                        id,
                        title: title.to_string(),
                        description: description.to_string(),
                        date,
                    }
                } else {
                    e.clone()
                }
            })
            .collect();
        true
    }

    /// Removes the event matching `id`. Returns false if no event has
    /// that id.
    pub fn delete(&mut self, id: EventId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.events = self.events.iter().filter(|e| e.id != id).cloned().collect();
        true
    }
}
