mod body;
mod coerce;
mod db;
pub mod dbs;
mod error;
mod handlers;

pub use crate::db::AppState;
use crate::dbs::Database;
use crate::handlers::{
    create_character, delete_character, get_character, index_page, list_characters, list_page,
    new_page, submit_new, update_character,
};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Mounts the REST API and the HTML pages on `router`, backed by `db`.
pub fn init(router: Router<AppState>, db: Arc<dyn Database>) -> Router<()> {
    let state = AppState::new(db);

    router
        .route("/health", get(|| async { "OK" }))
        .route(
            "/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .route("/index", get(index_page))
        .route("/list", get(list_page))
        .route("/new", get(new_page).post(submit_new))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
