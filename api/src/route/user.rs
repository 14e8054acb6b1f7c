use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::user::{
    delete_user, delete_user_list, register_user, show_user, show_user_list,
};

pub fn build_user_routers() -> Router<AppRegistry> {
    let users_routers = Router::new()
        .route("/", get(show_user_list))
        .route("/", post(register_user))
        .route("/", delete(delete_user_list))
        .route("/:username", get(show_user))
        .route("/:username", delete(delete_user));

    Router::new().nest("/users", users_routers)
}
