use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use documenter::projects::{self, Category, Project};
use serde::Deserialize;

use crate::server::error::ErrorBody;

#[derive(Deserialize)]
pub struct ProjectsQuery {
    category: Option<String>,
}

/// Project catalog, optionally filtered by `?category=`.
pub async fn projects_handler(Query(params): Query<ProjectsQuery>) -> Response {
    let filter = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "all");

    let listed: Vec<&Project> = match filter {
        None => projects::catalog().iter().collect(),
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => projects::by_category(category).collect(),
            Err(message) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new("Invalid request", message)),
                )
                    .into_response()
            }
        },
    };

    Json(listed).into_response()
}
