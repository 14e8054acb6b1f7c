use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::Event,
    id::EventId,
    registration::{CreateRegistration, DeleteRegistration, Registration},
};
use kernel::repository::registration::RegistrationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{event::EventRow, registration::RegistrationRow, user::UserRow},
    ConnectionPool,
};

#[derive(new)]
pub struct RegistrationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RegistrationRepository for RegistrationRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, RegistrationRow>(
            r#"
                SELECT username, event_id
                FROM registrations
                ORDER BY username ASC, event_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Registration::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    // ユーザーが参加登録しているイベントを INNER JOIN で取得する。
    // 登録が 1 件もなければ空の Vec を返す（ユーザーの存在チェックはしない）。
    async fn find_events_by_username(&self, username: &str) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    e.event_id,
                    e.title,
                    e.description,
                    e.location,
                    e.date
                FROM registrations AS r
                INNER JOIN events AS e ON r.event_id = e.event_id
                WHERE r.username = ?
                ORDER BY e.event_id ASC
            "#,
        )
        .bind(username)
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateRegistration) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 登録前のチェックとして、以下を順に調べる。
        // チェックの順序は返すエラーに現れるため、入れ替えないこと。
        {
            //
            // ① 申告された username のユーザーが存在するか
            //
            let user_row = sqlx::query_as::<_, UserRow>(
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

            let user = match user_row {
                None => return Err(AppError::EntityNotFound("User not found".into())),
                Some(u) => u,
            };

            //
            // ② 申告された name・email が保存済みの値と一致するか
            //    別人のユーザーレコードを騙って登録するのを防ぐ
            //
            if user.name != event.name || user.email != event.email {
                return Err(AppError::ResourceConflict(
                    "User data does not match".into(),
                ));
            }

            //
            // ③ 指定のイベント ID をもつイベントが存在するか
            //
            let event_row = sqlx::query_scalar::<_, EventId>(
                r#"
                    SELECT event_id
                    FROM events
                    WHERE event_id = ?
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if event_row.is_none() {
                return Err(AppError::EntityNotFound("Event not found".into()));
            }

            //
            // ④ 同じ (username, event_id) の参加登録が既にないか
            //
            let duplicated = sqlx::query_as::<_, RegistrationRow>(
                r#"
                    SELECT username, event_id
                    FROM registrations
                    WHERE username = ? AND event_id = ?
                "#,
            )
            .bind(&event.username)
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if duplicated.is_some() {
                return Err(AppError::ResourceConflict(
                    "User already registered to this event".into(),
                ));
            }
        }

        let res = sqlx::query(
            r#"
                INSERT INTO registrations (username, event_id)
                VALUES (?, ?)
            "#,
        )
        .bind(&event.username)
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No registration record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteRegistration) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 削除前のチェックとして、参照先のユーザーとイベント、
        // そして参加登録そのものが存在するかを順に調べる。
        {
            let user_row = sqlx::query_scalar::<_, String>(
                r#"
                    SELECT username
                    FROM users
                    WHERE username = ?
                "#,
            )
            .bind(&event.username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if user_row.is_none() {
                return Err(AppError::EntityNotFound("User not found".into()));
            }

            let event_row = sqlx::query_scalar::<_, EventId>(
                r#"
                    SELECT event_id
                    FROM events
                    WHERE event_id = ?
                "#,
            )
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if event_row.is_none() {
                return Err(AppError::EntityNotFound("Event not found".into()));
            }

            let registration_row = sqlx::query_as::<_, RegistrationRow>(
                r#"
                    SELECT username, event_id
                    FROM registrations
                    WHERE username = ? AND event_id = ?
                "#,
            )
            .bind(&event.username)
            .bind(event.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if registration_row.is_none() {
                return Err(AppError::EntityNotFound("Registration not found".into()));
            }
        }

        let res = sqlx::query(
            r#"
                DELETE FROM registrations
                WHERE username = ? AND event_id = ?
            "#,
        )
        .bind(&event.username)
        .bind(event.event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No registration record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{event::EventRepositoryImpl, user::UserRepositoryImpl};
    use chrono::{TimeZone, Utc};
    use kernel::model::{event::CreateEvent, user::CreateUser};
    use kernel::repository::{event::EventRepository, user::UserRepository};

    async fn seed_user(pool: &sqlx::SqlitePool, username: &str, email: &str, name: &str) {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        repo.create(CreateUser {
            username: username.into(),
            email: email.into(),
            name: name.into(),
        })
        .await
        .unwrap();
    }

    async fn seed_event(pool: &sqlx::SqlitePool, title: &str) -> EventId {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        repo.create(CreateEvent {
            title: title.into(),
            description: "An evening of live music".into(),
            location: "Piazza del Campo, Siena".into(),
            date: Utc.with_ymd_and_hms(2026, 9, 12, 21, 0, 0).unwrap(),
        })
        .await
        .unwrap()
    }

    fn registration(username: &str, name: &str, email: &str, event_id: EventId) -> CreateRegistration {
        CreateRegistration::new(username.into(), name.into(), email.into(), event_id)
    }

    #[sqlx::test]
    async fn test_register_user_to_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        let event_id = seed_event(&pool, "Concerto d'estate").await;

        repo.create(registration(
            "mrossi",
            "Mario Rossi",
            "mrossi@example.it",
            event_id,
        ))
        .await?;

        let res = repo.find_all().await?;
        assert_eq!(
            res,
            vec![Registration {
                username: "mrossi".into(),
                event_id,
            }]
        );

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_checks_user_before_event(
        pool: sqlx::SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool));

        // ユーザーもイベントも存在しない場合、先に User not found が返る
        let res = repo
            .create(registration(
                "mrossi",
                "Mario Rossi",
                "mrossi@example.it",
                EventId::new(999),
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "User not found"));

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_checks_identity_before_event(
        pool: sqlx::SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;

        // 申告データ不一致かつイベント不存在の場合、先に data mismatch が返る
        let res = repo
            .create(registration(
                "mrossi",
                "Maria Rossi",
                "mrossi@example.it",
                EventId::new(999),
            ))
            .await;
        assert!(
            matches!(res, Err(AppError::ResourceConflict(ref m)) if m == "User data does not match")
        );

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_rejects_email_mismatch(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        let event_id = seed_event(&pool, "Concerto d'estate").await;

        let res = repo
            .create(registration(
                "mrossi",
                "Mario Rossi",
                "other@example.it",
                event_id,
            ))
            .await;
        assert!(
            matches!(res, Err(AppError::ResourceConflict(ref m)) if m == "User data does not match")
        );

        // 部分的な書き込みは残らない
        assert!(repo.find_all().await?.is_empty());

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_rejects_missing_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;

        let res = repo
            .create(registration(
                "mrossi",
                "Mario Rossi",
                "mrossi@example.it",
                EventId::new(999),
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "Event not found"));

        Ok(())
    }

    #[sqlx::test]
    async fn test_register_rejects_duplicate(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        let event_id = seed_event(&pool, "Concerto d'estate").await;

        repo.create(registration(
            "mrossi",
            "Mario Rossi",
            "mrossi@example.it",
            event_id,
        ))
        .await?;

        let res = repo
            .create(registration(
                "mrossi",
                "Mario Rossi",
                "mrossi@example.it",
                event_id,
            ))
            .await;
        assert!(
            matches!(res, Err(AppError::ResourceConflict(ref m)) if m == "User already registered to this event")
        );

        assert_eq!(repo.find_all().await?.len(), 1);

        Ok(())
    }

    #[sqlx::test]
    async fn test_find_events_by_username(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        seed_user(&pool, "gverdi", "gverdi@example.it", "Giuseppe Verdi").await;
        let first = seed_event(&pool, "Concerto d'estate").await;
        let second = seed_event(&pool, "Sagra del tartufo").await;

        for event_id in [first, second] {
            repo.create(registration(
                "mrossi",
                "Mario Rossi",
                "mrossi@example.it",
                event_id,
            ))
            .await?;
        }
        repo.create(registration(
            "gverdi",
            "Giuseppe Verdi",
            "gverdi@example.it",
            first,
        ))
        .await?;

        let events = repo.find_events_by_username("mrossi").await?;
        assert_eq!(
            events.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![first, second]
        );
        assert_eq!(events[0].title, "Concerto d'estate");

        // 登録のないユーザー（未知のユーザーを含む）は空のリスト
        let events = repo.find_events_by_username("nobody").await?;
        assert!(events.is_empty());

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_registration(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        let event_id = seed_event(&pool, "Concerto d'estate").await;

        repo.create(registration(
            "mrossi",
            "Mario Rossi",
            "mrossi@example.it",
            event_id,
        ))
        .await?;

        repo.delete(DeleteRegistration::new("mrossi".into(), event_id))
            .await?;
        assert!(repo.find_all().await?.is_empty());

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_validates_before_deleting(
        pool: sqlx::SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        // ユーザー不存在
        let res = repo
            .delete(DeleteRegistration::new("mrossi".into(), EventId::new(1)))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "User not found"));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;

        // イベント不存在
        let res = repo
            .delete(DeleteRegistration::new("mrossi".into(), EventId::new(999)))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "Event not found"));

        let event_id = seed_event(&pool, "Concerto d'estate").await;

        // 登録そのものが不存在（無条件削除で握りつぶさず 404 を返す）
        let res = repo
            .delete(DeleteRegistration::new("mrossi".into(), event_id))
            .await;
        assert!(
            matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "Registration not found")
        );

        Ok(())
    }

    // ユーザー作成 → イベント作成 → 参加登録 → 重複登録拒否 →
    // ユーザー削除 → 登録イベント一覧が空になる、という一連の流れ
    #[sqlx::test]
    async fn test_registration_lifecycle(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let user_repo = UserRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let repo = RegistrationRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        seed_user(&pool, "mrossi", "mrossi@example.it", "Mario Rossi").await;
        let event_id = seed_event(&pool, "Concerto d'estate").await;
        assert_eq!(event_id, EventId::new(1));

        repo.create(registration(
            "mrossi",
            "Mario Rossi",
            "mrossi@example.it",
            event_id,
        ))
        .await?;

        let res = repo
            .create(registration(
                "mrossi",
                "Mario Rossi",
                "mrossi@example.it",
                event_id,
            ))
            .await;
        assert!(
            matches!(res, Err(AppError::ResourceConflict(ref m)) if m == "User already registered to this event")
        );

        user_repo.delete("mrossi").await?;

        let events = repo.find_events_by_username("mrossi").await?;
        assert!(events.is_empty());

        Ok(())
    }
}
