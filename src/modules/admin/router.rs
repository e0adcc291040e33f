use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::admin_test;

pub fn init_admin_router() -> Router<AppState> {
    Router::new().route("/test", get(admin_test))
}
