//! Create the job-board tables: schema, then tables in foreign-key order, then indexes.
//! Every statement is idempotent so the server can run this on each start.

use crate::error::AppError;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// DDL statements for `schema`, in the order they must run.
pub fn migration_statements(schema: &str) -> Vec<String> {
    let s = quote(schema);
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", s),
        format!(
            "CREATE TABLE IF NOT EXISTS {s}.\"companies\" (\n  \
             handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),\n  \
             name TEXT UNIQUE NOT NULL,\n  \
             num_employees INTEGER CHECK (num_employees >= 0),\n  \
             description TEXT,\n  \
             logo_url TEXT\n)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {s}.\"jobs\" (\n  \
             id SERIAL PRIMARY KEY,\n  \
             title TEXT NOT NULL,\n  \
             salary INTEGER CHECK (salary >= 0),\n  \
             equity NUMERIC CHECK (equity <= 1.0),\n  \
             company_handle VARCHAR(25) NOT NULL REFERENCES {s}.\"companies\" ON DELETE CASCADE\n)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {s}.\"users\" (\n  \
             username VARCHAR(25) PRIMARY KEY,\n  \
             first_name TEXT NOT NULL,\n  \
             last_name TEXT NOT NULL,\n  \
             email TEXT NOT NULL CHECK (position('@' IN email) > 1),\n  \
             is_admin BOOLEAN NOT NULL DEFAULT FALSE\n)"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {s}.\"applications\" (\n  \
             username VARCHAR(25) REFERENCES {s}.\"users\" ON DELETE CASCADE,\n  \
             job_id INTEGER REFERENCES {s}.\"jobs\" ON DELETE CASCADE,\n  \
             applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),\n  \
             PRIMARY KEY (username, job_id)\n)"
        ),
        format!("CREATE INDEX IF NOT EXISTS jobs_company_handle_idx ON {s}.\"jobs\" (company_handle)"),
        format!("CREATE INDEX IF NOT EXISTS jobs_salary_idx ON {s}.\"jobs\" (salary)"),
        format!("CREATE INDEX IF NOT EXISTS companies_num_employees_idx ON {s}.\"companies\" (num_employees)"),
    ]
}

/// Apply all DDL for `schema` to the database.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    for sql in migration_statements(schema) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema, "migrations applied");
    Ok(())
}
