use chrono::{DateTime, Utc};
use kernel::model::{event::Event, id::EventId};

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            location,
            date,
        } = value;
        Event {
            id: event_id,
            title,
            description,
            location,
            date,
        }
    }
}
