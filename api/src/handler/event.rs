use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::id::EventId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::event::{
    CreateEventRequest, EventResponse, UpdateEventRequest, UpdateEventRequestWithId,
};

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<EventResponse>>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(|events| events.into_iter().map(EventResponse::from).collect())
        .map(Json)
}

pub async fn register_event(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<Json<&'static str>> {
    req.validate(&())?;

    registry
        .event_repository()
        .create(req.into())
        .await
        .map(|_| Json("Event successfully created."))
}

pub async fn show_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound("Event not found".into())),
        })
}

pub async fn update_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Json<&'static str>> {
    req.validate(&())?;

    let update_event = UpdateEventRequestWithId::new(event_id, req);
    registry
        .event_repository()
        .update(update_event.into())
        .await
        .map(|_| Json("Event successfully updated."))
}

pub async fn delete_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<&'static str>> {
    registry
        .event_repository()
        .delete_all()
        .await
        .map(|_| Json("Events successfully deleted."))
}

pub async fn delete_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<&'static str>> {
    registry
        .event_repository()
        .delete(event_id)
        .await
        .map(|_| Json("Event successfully deleted."))
}
