//! Static table definitions for the job board. Every identifier that reaches SQL text
//! comes from here.

use crate::sql::{FieldMap, FilterSpec};

/// Primary key type for parsing path ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkType {
    Int,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    /// Postgres `numeric`; selected as text so precision survives.
    Decimal,
    Bool,
    Timestamp,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef { name, kind }
}

#[derive(Clone, Copy, Debug)]
pub struct EntityDef {
    pub table: &'static str,
    /// Singular name used in error messages ("No job: 7").
    pub label: &'static str,
    pub pk: &'static str,
    pub pk_type: PkType,
    pub columns: &'static [ColumnDef],
    /// API field name -> column, for fields whose names differ.
    pub field_map: &'static [(&'static str, &'static str)],
    /// API fields a PATCH may change.
    pub updatable: &'static [&'static str],
    pub order_by: &'static str,
    pub filter: Option<FilterSpec>,
}

impl EntityDef {
    pub fn field_map(&self) -> FieldMap {
        self.field_map.iter().copied().collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

pub const COMPANIES: EntityDef = EntityDef {
    table: "companies",
    label: "company",
    pk: "handle",
    pk_type: PkType::Text,
    columns: &[
        col("handle", ColumnKind::Text),
        col("name", ColumnKind::Text),
        col("description", ColumnKind::Text),
        col("num_employees", ColumnKind::Integer),
        col("logo_url", ColumnKind::Text),
    ],
    field_map: &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
    updatable: &["name", "description", "numEmployees", "logoUrl"],
    order_by: "name",
    filter: Some(FilterSpec {
        text_key: "name",
        text_column: "name",
        min_key: "minEmployees",
        max_key: "maxEmployees",
        numeric_column: "num_employees",
        toggles: &[],
    }),
};

pub const JOBS: EntityDef = EntityDef {
    table: "jobs",
    label: "job",
    pk: "id",
    pk_type: PkType::Int,
    columns: &[
        col("id", ColumnKind::Integer),
        col("title", ColumnKind::Text),
        col("salary", ColumnKind::Integer),
        col("equity", ColumnKind::Decimal),
        col("company_handle", ColumnKind::Text),
    ],
    field_map: &[("companyHandle", "company_handle")],
    updatable: &["title", "salary", "equity"],
    order_by: "title",
    filter: Some(FilterSpec {
        text_key: "title",
        text_column: "title",
        min_key: "minSalary",
        max_key: "maxSalary",
        numeric_column: "salary",
        toggles: &[("hasEquity", "equity>0")],
    }),
};

pub const USERS: EntityDef = EntityDef {
    table: "users",
    label: "user",
    pk: "username",
    pk_type: PkType::Text,
    columns: &[
        col("username", ColumnKind::Text),
        col("first_name", ColumnKind::Text),
        col("last_name", ColumnKind::Text),
        col("email", ColumnKind::Text),
        col("is_admin", ColumnKind::Bool),
    ],
    field_map: &[
        ("firstName", "first_name"),
        ("lastName", "last_name"),
        ("isAdmin", "is_admin"),
    ],
    updatable: &["firstName", "lastName", "email", "isAdmin"],
    order_by: "username",
    filter: None,
};

pub const APPLICATIONS: EntityDef = EntityDef {
    table: "applications",
    label: "application",
    pk: "username",
    pk_type: PkType::Text,
    columns: &[
        col("username", ColumnKind::Text),
        col("job_id", ColumnKind::Integer),
        col("applied_at", ColumnKind::Timestamp),
    ],
    field_map: &[("jobId", "job_id"), ("appliedAt", "applied_at")],
    updatable: &[],
    order_by: "job_id",
    filter: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_fields_point_at_real_columns() {
        for e in [COMPANIES, JOBS, USERS, APPLICATIONS] {
            for (_, column) in e.field_map {
                assert!(e.has_column(column), "{}: {}", e.table, column);
            }
            for field in e.updatable {
                assert!(e.has_column(e.field_map().column(field)), "{}: {}", e.table, field);
            }
            assert!(e.has_column(e.pk));
        }
    }

    #[test]
    fn filter_columns_exist() {
        for e in [COMPANIES, JOBS] {
            let spec = e.filter.unwrap();
            assert!(e.has_column(spec.text_column));
            assert!(e.has_column(spec.numeric_column));
        }
    }
}
