//! Employee API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/search", get(handler::search))
        .route("/department/{department}", get(handler::by_department))
        .route("/position/{position}", get(handler::by_position))
        .route("/status/{status}", get(handler::by_status))
        .route("/hired-between", get(handler::hired_between))
        .route("/recently-hired/{months}", get(handler::recently_hired))
        .route(
            "/salary/greater-than/{amount}",
            get(handler::salary_greater_than),
        )
        .route("/salary/between", get(handler::salary_between))
        .route(
            "/statistics/departments",
            get(handler::department_statistics),
        )
        .route("/statistics/status", get(handler::status_statistics))
}
