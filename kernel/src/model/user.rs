#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub email: String,
    pub name: String,
}

pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub name: String,
}
