//! # Sitedocs Server
//!
//! HTTP surface for the project document manager. Routes mirror the
//! filesystem operations in `sitedocs-store`; every user-facing failure is a
//! flash notice carried on a redirect, never a partial render.

use axum::{routing::get, Router};
use sitedocs_store::ProjectStore;

mod handlers;
mod templates;

#[derive(Clone)]
pub struct AppState {
    pub store: ProjectStore,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/create_project",
            get(handlers::create_project_form).post(handlers::create_project_submit),
        )
        .route("/list_projects", get(handlers::list_projects))
        .route(
            "/project/:project_id",
            get(handlers::show_project).post(handlers::upload_document),
        )
        .route(
            "/download_document/:project_id/:folder_type/:filename",
            get(handlers::download_document),
        )
        .route("/download_project/:project_id", get(handlers::download_project))
        .with_state(state)
}
