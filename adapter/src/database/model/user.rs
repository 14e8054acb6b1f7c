use kernel::model::user::User;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub username: String,
    pub email: String,
    pub name: String,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            username,
            email,
            name,
        } = value;
        User {
            username,
            email,
            name,
        }
    }
}
