use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::user::{CreateUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    // ユーザーの一覧を取得する
    async fn find_all(&self) -> AppResult<Vec<User>>;
    // username からユーザーを取得する
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    // ユーザーを登録する（email・username の重複は Conflict）
    async fn create(&self, event: CreateUser) -> AppResult<()>;
    // 全ユーザーと全参加登録を削除する
    async fn delete_all(&self) -> AppResult<()>;
    // ユーザーと、そのユーザーの参加登録をすべて削除する
    async fn delete(&self, username: &str) -> AppResult<()>;
}
