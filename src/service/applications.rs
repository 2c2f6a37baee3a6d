//! Job applications and the related-row lookups that decorate company and user responses.

use super::crud::CrudService;
use super::executor::QueryExecutor;
use crate::entity::{APPLICATIONS, COMPANIES, JOBS, USERS};
use crate::error::AppError;
use crate::sql::{insert_or_skip, UpdatePayload};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub struct ApplicationService;

impl ApplicationService {
    /// Record that `username` applied to job `job_id`. Both must exist; applying twice is a conflict.
    pub async fn apply<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        username: &str,
        job_id: i64,
    ) -> Result<Value, AppError> {
        let user = Value::String(username.to_string());
        let job = Value::Number(job_id.into());
        CrudService::read(db, schema, &USERS, &user).await?;
        CrudService::read(db, schema, &JOBS, &job).await?;

        let body: UpdatePayload = [("username", user), ("jobId", job)].into_iter().collect();
        let q = insert_or_skip(&APPLICATIONS, schema, &body);
        let row = db
            .fetch_optional(&q.sql, &q.params)
            .await?
            .ok_or_else(|| AppError::Conflict(format!("Duplicate application: {}--{}", username, job_id)))?;
        tracing::info!(username, job_id, "application recorded");
        Ok(crate::case::value_keys_to_camel_case_recursive(row))
    }

    /// Job ids a user has applied to, in job id order.
    pub async fn job_ids_for_user<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        username: &str,
    ) -> Result<Vec<Value>, AppError> {
        let rows = CrudService::fetch_where(db, schema, &APPLICATIONS, "username", &Value::String(username.into()))
            .await?;
        Ok(rows.into_iter().filter_map(|r| r.get("jobId").cloned()).collect())
    }

    /// One user with a `jobs` array of applied job ids.
    pub async fn user_with_jobs<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        username: &str,
    ) -> Result<Value, AppError> {
        let mut user = CrudService::read(db, schema, &USERS, &Value::String(username.into())).await?;
        let jobs = Self::job_ids_for_user(db, schema, username).await?;
        if let Value::Object(ref mut m) = user {
            m.insert("jobs".into(), Value::Array(jobs));
        }
        Ok(user)
    }

    /// All users, each with a `jobs` array. Applications are fetched in one query and grouped.
    pub async fn users_with_jobs<E: QueryExecutor + ?Sized>(db: &E, schema: &str) -> Result<Vec<Value>, AppError> {
        let users = CrudService::list(db, schema, &USERS, &Default::default()).await?;
        let apps = CrudService::list(db, schema, &APPLICATIONS, &Default::default()).await?;
        let mut by_user: HashMap<String, Vec<Value>> = HashMap::new();
        for app in apps {
            if let (Some(Value::String(u)), Some(job)) = (app.get("username"), app.get("jobId")) {
                by_user.entry(u.clone()).or_default().push(job.clone());
            }
        }
        Ok(users
            .into_iter()
            .map(|mut user| {
                let jobs = user
                    .get("username")
                    .and_then(Value::as_str)
                    .and_then(|u| by_user.remove(u))
                    .unwrap_or_default();
                if let Value::Object(ref mut m) = user {
                    m.insert("jobs".into(), Value::Array(jobs));
                }
                user
            })
            .collect())
    }

    /// One company with its jobs (without the redundant `companyHandle`).
    pub async fn company_with_jobs<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        handle: &str,
    ) -> Result<Value, AppError> {
        let key = Value::String(handle.into());
        let mut company = CrudService::read(db, schema, &COMPANIES, &key).await?;
        let jobs: Vec<Value> = CrudService::fetch_where(db, schema, &JOBS, "company_handle", &key)
            .await?
            .into_iter()
            .map(|job| match job {
                Value::Object(m) => {
                    Value::Object(m.into_iter().filter(|(k, _)| k != "companyHandle").collect::<Map<_, _>>())
                }
                other => other,
            })
            .collect();
        if let Value::Object(ref mut m) = company {
            m.insert("jobs".into(), Value::Array(jobs));
        }
        Ok(company)
    }
}
