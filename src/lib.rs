//! Jobly: job-board REST backend (companies, jobs, users, applications) over PostgreSQL.

pub mod case;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, SqlBuildError};
pub use migration::apply_migrations;
pub use response::{success_many, success_one};
pub use routes::{app, common_routes_with_ready, resource_routes};
pub use service::{ApplicationService, CrudService, QueryExecutor};
pub use sql::{filter, partial_update, partial_update_allowed, FieldMap, FilterCriteria, FilterSpec, SqlFragment, UpdatePayload};
pub use state::AppState;
