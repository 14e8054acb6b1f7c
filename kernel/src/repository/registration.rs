use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    event::Event,
    registration::{CreateRegistration, DeleteRegistration, Registration},
};

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    // すべての参加登録を取得する
    async fn find_all(&self) -> AppResult<Vec<Registration>>;
    // ユーザーが参加登録しているイベントの一覧を取得する
    async fn find_events_by_username(&self, username: &str) -> AppResult<Vec<Event>>;
    // ユーザーをイベントに参加登録する
    // ユーザー存在 → 申告データ一致 → イベント存在 → 重複、の順に検証する
    async fn create(&self, event: CreateRegistration) -> AppResult<()>;
    // 参加登録を削除する（ユーザー・イベント・登録の存在を検証してから削除）
    async fn delete(&self, event: DeleteRegistration) -> AppResult<()>;
}
