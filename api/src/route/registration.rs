use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::registration::{
    delete_registration, show_registered_events, show_registration_list,
};

pub fn build_registration_routers() -> Router<AppRegistry> {
    let registrations_routers = Router::new()
        .route("/", get(show_registration_list))
        .route("/:username", get(show_registered_events))
        .route("/:username/:event_id", delete(delete_registration));

    Router::new().nest("/registrations", registrations_routers)
}
