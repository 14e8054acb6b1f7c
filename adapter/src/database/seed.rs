use chrono::{Duration, Utc};
use fake::faker::address::en::CityName;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use shared::error::{AppError, AppResult};

use crate::database::ConnectionPool;

const SEED_COUNT: usize = 10;

/// 開発環境向けの初期データ投入
/// データベースファイルが存在しなかった初回起動時にのみ呼ばれる
pub async fn seed_database(db: &ConnectionPool) -> AppResult<()> {
    let mut rng = rand::thread_rng();

    // username と email はどちらも一意でなければならないため、
    // 生成済みの値と重複したら引き直す
    let mut usernames: Vec<String> = Vec::with_capacity(SEED_COUNT);
    let mut emails: Vec<String> = Vec::with_capacity(SEED_COUNT);

    for _ in 0..SEED_COUNT {
        let mut username: String = Username().fake();
        while usernames.contains(&username) {
            username = Username().fake();
        }

        let mut email: String = FreeEmail().fake();
        while emails.contains(&email) {
            email = FreeEmail().fake();
        }

        let name: String = Name().fake();

        sqlx::query(
            r#"
                INSERT INTO users (username, email, name)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&name)
        .execute(db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        usernames.push(username);
        emails.push(email);
    }

    let mut event_ids: Vec<i64> = Vec::with_capacity(SEED_COUNT);

    for _ in 0..SEED_COUNT {
        let title = Words(3..6).fake::<Vec<String>>().join(" ");
        let description: String = Sentence(10..20).fake();
        let location: String = CityName().fake();
        let date = Utc::now() + Duration::days(rng.gen_range(1..120));

        let res = sqlx::query(
            r#"
                INSERT INTO events (title, description, location, date)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(&location)
        .bind(date)
        .execute(db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        event_ids.push(res.last_insert_rowid());
    }

    // (username, event_id) は複合主キーなので、既出の組を引いたら引き直す
    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(SEED_COUNT);

    for _ in 0..SEED_COUNT {
        let mut pair = (
            rng.gen_range(0..SEED_COUNT),
            rng.gen_range(0..SEED_COUNT),
        );
        while pairs.contains(&pair) {
            pair = (
                rng.gen_range(0..SEED_COUNT),
                rng.gen_range(0..SEED_COUNT),
            );
        }

        sqlx::query(
            r#"
                INSERT INTO registrations (username, event_id)
                VALUES (?, ?)
            "#,
        )
        .bind(&usernames[pair.0])
        .bind(event_ids[pair.1])
        .execute(db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        pairs.push(pair);
    }

    tracing::info!(
        "Seeded {} users, {} events and {} registrations",
        SEED_COUNT,
        SEED_COUNT,
        SEED_COUNT
    );

    Ok(())
}
