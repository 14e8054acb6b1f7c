use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::user::{CreateUserRequest, UserResponse};

pub async fn show_user_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<UserResponse>>> {
    registry
        .user_repository()
        .find_all()
        .await
        .map(|users| users.into_iter().map(UserResponse::from).collect())
        .map(Json)
}

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<Json<&'static str>> {
    req.validate(&())?;

    registry
        .user_repository()
        .create(req.into())
        .await
        .map(|_| Json("User successfully created"))
}

pub async fn show_user(
    Path(username): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_by_username(&username)
        .await
        .and_then(|user| match user {
            Some(user) => Ok(Json(user.into())),
            None => Err(AppError::EntityNotFound("User not found".into())),
        })
}

pub async fn delete_user_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<&'static str>> {
    registry
        .user_repository()
        .delete_all()
        .await
        .map(|_| Json("Users successfully deleted"))
}

pub async fn delete_user(
    Path(username): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<&'static str>> {
    registry
        .user_repository()
        .delete(&username)
        .await
        .map(|_| Json("User successfully deleted."))
}
