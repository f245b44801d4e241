use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_user, delete_user, show_user, update_user};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route(
            "/{user_id}",
            get(show_user).put(update_user).delete(delete_user),
        )
}
