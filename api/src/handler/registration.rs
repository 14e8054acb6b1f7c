use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::{id::EventId, registration::DeleteRegistration};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::{
    event::EventResponse,
    registration::{RegisterToEventRequest, RegisterToEventRequestWithId, RegistrationResponse},
};

pub async fn show_registration_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<RegistrationResponse>>> {
    registry
        .registration_repository()
        .find_all()
        .await
        .map(|regs| regs.into_iter().map(RegistrationResponse::from).collect())
        .map(Json)
}

// 生の参加登録ではなく、ユーザーが登録しているイベントの一覧を返す
pub async fn show_registered_events(
    Path(username): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .registration_repository()
        .find_events_by_username(&username)
        .await
        .map(|events| events.into_iter().map(EventResponse::from).collect())
        .map(Json)
}

pub async fn register_user_to_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<RegisterToEventRequest>,
) -> AppResult<Json<&'static str>> {
    req.validate(&())?;

    let create_registration = RegisterToEventRequestWithId::new(event_id, req);
    registry
        .registration_repository()
        .create(create_registration.into())
        .await
        .map(|_| Json("User successfully registered."))
}

pub async fn delete_registration(
    Path((username, event_id)): Path<(String, EventId)>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<&'static str>> {
    registry
        .registration_repository()
        .delete(DeleteRegistration::new(username, event_id))
        .await
        .map(|_| Json("Registration deleted successfully"))
}
