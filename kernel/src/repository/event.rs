use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    event::{CreateEvent, Event, UpdateEvent},
    id::EventId,
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    // イベントの一覧を取得する
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    // イベント ID からイベントを取得する
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    // イベントを作成し、採番された ID を返す
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    // イベントの可変フィールドをすべて置き換える（参加登録は残す）
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    // 全イベントと全参加登録を削除する
    async fn delete_all(&self) -> AppResult<()>;
    // イベントと、そのイベントの参加登録をすべて削除する
    async fn delete(&self, event_id: EventId) -> AppResult<()>;
}
