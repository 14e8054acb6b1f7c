use crate::model::id::EventId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}

/// 更新ではすべての可変フィールドを置き換える
/// ID は不変であり、既存の参加登録もそのまま残す
#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
}
