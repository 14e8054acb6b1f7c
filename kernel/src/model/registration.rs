use crate::model::id::EventId;
use derive_new::new;

/// ユーザーとイベントの多対多を結ぶ参加登録
/// (username, event_id) の組で一意になる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub event_id: EventId,
}

/// 参加登録時に呼び出し側が申告するユーザー情報
/// name と email は保存済みのユーザーと一致している必要がある
#[derive(new)]
pub struct CreateRegistration {
    pub username: String,
    pub name: String,
    pub email: String,
    pub event_id: EventId,
}

#[derive(Debug, new)]
pub struct DeleteRegistration {
    pub username: String,
    pub event_id: EventId,
}
