use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_delivery, delete_delivery, show_delivery, update_delivery};

pub fn init_deliveries_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_delivery))
        .route(
            "/{delivery_id}",
            get(show_delivery).put(update_delivery).delete(delete_delivery),
        )
}
