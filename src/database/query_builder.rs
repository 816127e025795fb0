use serde_json::Value;
use sqlx::{self, postgres::PgArguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::database::predicate::Predicate;

/// Builds and executes SELECT/COUNT statements for one table.
///
/// The same `Predicate` drives both `select_all` and `count`, so pagination
/// metadata always reflects the WHERE clause the page was fetched with.
pub struct QueryBuilder<T> {
    table_name: &'static str,
    select_columns: &'static str,
    join_clause: Option<&'static str>,
    distinct: bool,
    predicate: Predicate,
    order_by: Option<&'static str>,
    limit: Option<i64>,
    offset: Option<i64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            select_columns: "*",
            join_clause: None,
            distinct: false,
            predicate: Predicate::new(),
            order_by: None,
            limit: None,
            offset: None,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn select(mut self, columns: &'static str) -> Self {
        self.select_columns = columns;
        self
    }

    pub fn join(mut self, clause: &'static str) -> Self {
        self.join_clause = Some(clause);
        self
    }

    /// DISTINCT on both the data and the count query; required when a join
    /// fans out rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn order_by(mut self, order: &'static str) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn page(mut self, skip: i64, limit: i64) -> Self {
        self.offset = Some(skip);
        self.limit = Some(limit);
        self
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let (sql, params) = self.data_sql();
        let mut q = sqlx::query_as::<_, T>(&sql);
        for p in params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let (sql, params) = self.data_sql();
        let mut q = sqlx::query_as::<_, T>(&sql);
        for p in params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let (sql, params) = self.count_sql();
        let mut q = sqlx::query(&sql);
        for p in params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    fn data_sql(&self) -> (String, Vec<Value>) {
        let where_sql = self.predicate.to_sql(0);

        let select_kw = if self.distinct {
            "SELECT DISTINCT"
        } else {
            "SELECT"
        };
        let mut parts = vec![
            format!("{} {}", select_kw, self.select_columns),
            format!("FROM \"{}\"", self.table_name),
        ];
        if let Some(join) = self.join_clause {
            parts.push(join.to_string());
        }
        if !where_sql.clause.is_empty() {
            parts.push(format!("WHERE {}", where_sql.clause));
        }
        if let Some(order) = self.order_by {
            parts.push(format!("ORDER BY {}", order));
        }
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => parts.push(format!("LIMIT {} OFFSET {}", l, o)),
            (Some(l), None) => parts.push(format!("LIMIT {}", l)),
            _ => {}
        }

        (parts.join(" "), where_sql.params)
    }

    fn count_sql(&self) -> (String, Vec<Value>) {
        let where_sql = self.predicate.to_sql(0);

        let count_expr = if self.distinct {
            // Count distinct base rows, not join fan-out
            format!("COUNT(DISTINCT \"{}\".\"id\")", self.table_name)
        } else {
            "COUNT(*)".to_string()
        };
        let mut parts = vec![
            format!("SELECT {} as count", count_expr),
            format!("FROM \"{}\"", self.table_name),
        ];
        if let Some(join) = self.join_clause {
            parts.push(join.to_string());
        }
        if !where_sql.clause.is_empty() {
            parts.push(format!("WHERE {}", where_sql.clause));
        }

        (parts.join(" "), where_sql.params)
    }
}

pub(crate) fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                // Postgres doesn't have u64; cast down if safe
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        // Arrays never reach here from Predicate (IN lists are expanded to
        // scalar placeholders); a JSON array payload binds as JSONB
        Value::Array(_) => q.bind(v.clone()),
        Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}

pub(crate) fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(u) = n.as_u64() {
                q.bind(u as i64)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s),
        Value::Array(_) => q.bind(v.clone()),
        Value::Object(_) => q.bind(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::tenant::Tenant;

    #[test]
    fn plain_select_has_no_where() {
        let qb = QueryBuilder::<Tenant>::new("tenants").order_by("id");
        let (sql, params) = qb.data_sql();
        assert_eq!(sql, "SELECT * FROM \"tenants\" ORDER BY id");
        assert!(params.is_empty());
    }

    #[test]
    fn data_and_count_share_the_same_predicate() {
        let predicate = Predicate::new()
            .exclude_deleted("tenants.is_deleted", false)
            .eq("tenants.status", "active");
        let qb = QueryBuilder::<Tenant>::new("tenants")
            .predicate(predicate)
            .order_by("id")
            .page(10, 5);

        let (data_sql, data_params) = qb.data_sql();
        let (count_sql, count_params) = qb.count_sql();

        assert!(data_sql.contains("WHERE \"tenants\".\"is_deleted\" = FALSE AND \"tenants\".\"status\" = $1"));
        assert!(count_sql.contains("WHERE \"tenants\".\"is_deleted\" = FALSE AND \"tenants\".\"status\" = $1"));
        assert!(data_sql.ends_with("LIMIT 5 OFFSET 10"));
        assert!(!count_sql.contains("LIMIT"));
        assert_eq!(data_params, count_params);
    }

    #[test]
    fn join_applies_distinct_to_both_queries() {
        let qb = QueryBuilder::<Tenant>::new("tenants")
            .select("\"tenants\".*")
            .join("JOIN \"tenant_sports_mapping\" ON \"tenant_sports_mapping\".\"tenant_id\" = \"tenants\".\"id\"")
            .distinct()
            .predicate(Predicate::new().eq("tenant_sports_mapping.sport_id", 3))
            .order_by("\"tenants\".\"id\"");

        let (data_sql, _) = qb.data_sql();
        let (count_sql, _) = qb.count_sql();
        assert!(data_sql.starts_with("SELECT DISTINCT \"tenants\".*"));
        assert!(count_sql.starts_with("SELECT COUNT(DISTINCT \"tenants\".\"id\") as count"));
        assert!(count_sql.contains("JOIN \"tenant_sports_mapping\""));
    }
}
