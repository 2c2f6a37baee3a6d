//! Job-board resource routes: companies, jobs, users and applications.

use crate::handlers::{companies, jobs, users};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::read).patch(companies::update).delete(companies::delete),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route("/jobs/:id", get(jobs::read).patch(jobs::update).delete(jobs::delete))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:username",
            get(users::read).patch(users::update).delete(users::delete),
        )
        .route("/users/:username/jobs/:id", post(users::apply))
        .with_state(state)
}
