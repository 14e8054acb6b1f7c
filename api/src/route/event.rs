use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::event::{
    delete_event, delete_event_list, register_event, show_event, show_event_list, update_event,
};
use crate::handler::registration::register_user_to_event;

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new()
        .route("/", get(show_event_list))
        .route("/", post(register_event))
        .route("/", delete(delete_event_list))
        .route("/:event_id", get(show_event))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event))
        // 参加登録の作成だけはイベント配下のパスで受ける
        .route("/:event_id/register", post(register_user_to_event));

    Router::new().nest("/events", events_routers)
}
