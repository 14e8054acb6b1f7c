use async_trait::async_trait;
use derive_new::new;
use kernel::model::user::{CreateUser, User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT username, email, name
                FROM users
                ORDER BY username ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(User::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(
            r#"
                SELECT username, email, name
                FROM users
                WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(User::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateUser) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 登録前のチェックとして、以下を順に調べる。
        // ① 同じ email のユーザーがいないか
        // ② 同じ username のユーザーがいないか
        {
            let duplicated_email = sqlx::query_as::<_, UserRow>(
                r#"
                    SELECT username, email, name
                    FROM users
                    WHERE email = ?
                "#,
            )
            .bind(&event.email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if duplicated_email.is_some() {
                return Err(AppError::ResourceConflict(
                    "Email already registered".into(),
                ));
            }

            let duplicated_username = sqlx::query_as::<_, UserRow>(
                r#"
                    SELECT username, email, name
                    FROM users
                    WHERE username = ?
                "#,
            )
            .bind(&event.username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if duplicated_username.is_some() {
                return Err(AppError::ResourceConflict(
                    "Username is already taken".into(),
                ));
            }
        }

        let res = sqlx::query(
            r#"
                INSERT INTO users (username, email, name)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(&event.username)
        .bind(&event.email)
        .bind(&event.name)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    // 全ユーザー削除は常に成功する。テーブルが空でもエラーにはしない。
    async fn delete_all(&self) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM users")
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        // ユーザーがいなくなるため、参加登録も残さず削除する
        sqlx::query("DELETE FROM registrations")
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, username: &str) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let res = sqlx::query(
            r#"
                DELETE FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("User not found".into()));
        }

        // 同一トランザクション内でこのユーザーの参加登録を削除する。
        // コミットされるまで外部からは見えないため、登録だけが残る瞬間はない。
        sqlx::query(
            r#"
                DELETE FROM registrations WHERE username = ?
            "#,
        )
        .bind(username)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}
