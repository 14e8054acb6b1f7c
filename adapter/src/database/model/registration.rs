use kernel::model::{id::EventId, registration::Registration};

#[derive(sqlx::FromRow)]
pub struct RegistrationRow {
    pub username: String,
    pub event_id: EventId,
}

impl From<RegistrationRow> for Registration {
    fn from(value: RegistrationRow) -> Self {
        let RegistrationRow { username, event_id } = value;
        Registration { username, event_id }
    }
}
