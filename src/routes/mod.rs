use axum::{Router, routing::get};

mod repo;

pub fn build_router() -> Router {
    Router::new()
        .route("/", get(repo::home))
        .route("/:owner", get(repo::user))
        .route("/:owner/:repo", get(repo::repository))
        .route("/:owner/:repo/*ref_and_path", get(repo::tree))
}
