use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    event::{CreateEvent, Event, UpdateEvent},
    id::EventId,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::event::EventRow, ConnectionPool};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, description, location, date
                FROM events
                ORDER BY event_id ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Event::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, EventRow>(
            r#"
                SELECT event_id, title, description, location, date
                FROM events
                WHERE event_id = ?
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Event::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let res = sqlx::query(
            r#"
                INSERT INTO events (title, description, location, date)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        // ID はストレージ側で採番される
        Ok(EventId::new(res.last_insert_rowid()))
    }

    // 更新は ID 以外の全フィールドを置き換える。
    // 参加登録には触れない。既存参加者への通知に将来使えるよう残しておく。
    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE events
                SET title = ?, description = ?, location = ?, date = ?
                WHERE event_id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date)
        .bind(event.event_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        Ok(())
    }

    // 全イベント削除は常に成功する。テーブルが空でもエラーにはしない。
    async fn delete_all(&self) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM events")
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        // イベントがなくなるため、参加登録も残さず削除する
        sqlx::query("DELETE FROM registrations")
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event_id: EventId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let res = sqlx::query(
            r#"
                DELETE FROM events WHERE event_id = ?
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Event not found".into()));
        }

        // 同一トランザクション内でこのイベントの参加登録を削除する
        sqlx::query(
            r#"
                DELETE FROM registrations WHERE event_id = ?
            "#,
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn new_event(title: &str) -> CreateEvent {
        CreateEvent {
            title: title.into(),
            description: "An evening of live music".into(),
            location: "Piazza del Campo, Siena".into(),
            date: Utc.with_ymd_and_hms(2026, 9, 12, 21, 0, 0).unwrap(),
        }
    }

    #[sqlx::test]
    async fn test_register_and_find_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let first = repo.create(new_event("Concerto d'estate")).await?;
        let second = repo.create(new_event("Sagra del tartufo")).await?;
        assert_eq!(first, EventId::new(1));
        assert_eq!(second, EventId::new(2));

        let res = repo.find_all().await?;
        assert_eq!(res.len(), 2);

        let res = repo.find_by_id(first).await?;
        assert!(res.is_some());

        let Event {
            id,
            title,
            description,
            location,
            date,
        } = res.unwrap();
        assert_eq!(id, first);
        assert_eq!(title, "Concerto d'estate");
        assert_eq!(description, "An evening of live music");
        assert_eq!(location, "Piazza del Campo, Siena");
        assert_eq!(date, Utc.with_ymd_and_hms(2026, 9, 12, 21, 0, 0).unwrap());

        let res = repo.find_by_id(EventId::new(999)).await?;
        assert!(res.is_none());

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let event_id = repo.create(new_event("Concerto d'estate")).await?;

        // 参加登録は更新を生き延びる
        sqlx::query("INSERT INTO registrations (username, event_id) VALUES (?, ?)")
            .bind("mrossi")
            .bind(event_id)
            .execute(&pool)
            .await?;

        let new_date = Utc.with_ymd_and_hms(2026, 10, 1, 18, 30, 0).unwrap();
        repo.update(UpdateEvent {
            event_id,
            title: "Concerto d'autunno".into(),
            description: "Rescheduled to October".into(),
            location: "Teatro Comunale, Firenze".into(),
            date: new_date,
        })
        .await?;

        let updated = repo.find_by_id(event_id).await?.unwrap();
        assert_eq!(updated.id, event_id);
        assert_eq!(updated.title, "Concerto d'autunno");
        assert_eq!(updated.description, "Rescheduled to October");
        assert_eq!(updated.location, "Teatro Comunale, Firenze");
        assert_eq!(updated.date, new_date);

        let regs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&pool)
            .await?;
        assert_eq!(regs, 1);

        Ok(())
    }

    #[sqlx::test]
    async fn test_update_missing_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo
            .update(UpdateEvent {
                event_id: EventId::new(999),
                title: "Concerto d'autunno".into(),
                description: "Rescheduled".into(),
                location: "Teatro Comunale, Firenze".into(),
                date: Utc.with_ymd_and_hms(2026, 10, 1, 18, 30, 0).unwrap(),
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "Event not found"));

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_event_cascades_registrations(
        pool: sqlx::SqlitePool,
    ) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let first = repo.create(new_event("Concerto d'estate")).await?;
        let second = repo.create(new_event("Sagra del tartufo")).await?;

        for event_id in [first, second] {
            sqlx::query("INSERT INTO registrations (username, event_id) VALUES (?, ?)")
                .bind("mrossi")
                .bind(event_id)
                .execute(&pool)
                .await?;
        }

        repo.delete(first).await?;

        assert!(repo.find_by_id(first).await?.is_none());

        // 消えるのは削除したイベントの登録だけ
        let remaining: Vec<i64> =
            sqlx::query_scalar("SELECT event_id FROM registrations ORDER BY event_id")
                .fetch_all(&pool)
                .await?;
        assert_eq!(remaining, vec![second.raw()]);

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_missing_event(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool));

        let res = repo.delete(EventId::new(999)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(ref m)) if m == "Event not found"));

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_all_is_idempotent(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let repo = EventRepositoryImpl::new(ConnectionPool::new(pool.clone()));

        let event_id = repo.create(new_event("Concerto d'estate")).await?;
        sqlx::query("INSERT INTO registrations (username, event_id) VALUES (?, ?)")
            .bind("mrossi")
            .bind(event_id)
            .execute(&pool)
            .await?;

        repo.delete_all().await?;
        assert!(repo.find_all().await?.is_empty());

        let regs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(&pool)
            .await?;
        assert_eq!(regs, 0);

        repo.delete_all().await?;

        Ok(())
    }
}
