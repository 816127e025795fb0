use serde_json::Value;

/// A rendered WHERE clause plus its positional bind values.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub clause: String,
    pub params: Vec<Value>,
}

/// Pure WHERE-clause builder shared by the data query and the count query.
///
/// Both queries for a list endpoint must be built from the same `Predicate`
/// instance, otherwise `total_count` stops matching the returned page.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

#[derive(Debug, Clone)]
enum Condition {
    /// `col = ?`
    Eq { column: String, value: Value },
    /// `col IN (?, ?, ...)`
    InIds { column: String, ids: Vec<i64> },
    /// `(a ILIKE ? OR b ILIKE ?)` with a `%term%` pattern
    Search { columns: Vec<String>, term: String },
    /// Raw condition with no binds, e.g. `is_deleted = FALSE`
    Raw(String),
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Adds an equality condition only when the value is present.
    pub fn eq_opt<V: Into<Value>>(self, column: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(column, v),
            None => self,
        }
    }

    pub fn in_ids(mut self, column: &str, ids: &[i64]) -> Self {
        self.conditions.push(Condition::InIds {
            column: column.to_string(),
            ids: ids.to_vec(),
        });
        self
    }

    /// Case-insensitive substring match over several text columns,
    /// OR-combined.
    pub fn search(mut self, columns: &[&str], term: &str) -> Self {
        self.conditions.push(Condition::Search {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            term: term.to_string(),
        });
        self
    }

    /// Excludes soft-deleted rows unless the caller opted in.
    pub fn exclude_deleted(mut self, column: &str, include_deleted: bool) -> Self {
        if !include_deleted {
            self.conditions
                .push(Condition::Raw(format!("{} = FALSE", quote_ident(column))));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders `WHERE`-clause SQL with `$N` placeholders starting at
    /// `starting_param_index + 1`. Empty clause when no conditions.
    pub fn to_sql(&self, starting_param_index: usize) -> SqlResult {
        let mut params: Vec<Value> = vec![];
        let mut parts: Vec<String> = vec![];
        let mut index = starting_param_index;

        for condition in &self.conditions {
            match condition {
                Condition::Eq { column, value } => {
                    index += 1;
                    params.push(value.clone());
                    parts.push(format!("{} = ${}", quote_ident(column), index));
                }
                Condition::InIds { column, ids } => {
                    if ids.is_empty() {
                        // IN () is invalid SQL; an empty id set matches nothing
                        parts.push("1=0".to_string());
                        continue;
                    }
                    let mut placeholders = Vec::with_capacity(ids.len());
                    for id in ids {
                        index += 1;
                        params.push(Value::from(*id));
                        placeholders.push(format!("${}", index));
                    }
                    parts.push(format!(
                        "{} IN ({})",
                        quote_ident(column),
                        placeholders.join(", ")
                    ));
                }
                Condition::Search { columns, term } => {
                    let pattern = format!("%{}%", term);
                    let mut ors = Vec::with_capacity(columns.len());
                    for column in columns {
                        index += 1;
                        params.push(Value::from(pattern.clone()));
                        ors.push(format!("{} ILIKE ${}", quote_ident(column), index));
                    }
                    parts.push(format!("({})", ors.join(" OR ")));
                }
                Condition::Raw(sql) => parts.push(sql.clone()),
            }
        }

        SqlResult {
            clause: parts.join(" AND "),
            params,
        }
    }
}

/// Quote an identifier, preserving table qualification ("tenants.status").
fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_predicate_renders_empty_clause() {
        let sql = Predicate::new().to_sql(0);
        assert_eq!(sql.clause, "");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn eq_and_soft_delete_guard() {
        let sql = Predicate::new()
            .exclude_deleted("is_deleted", false)
            .eq("status", "active")
            .to_sql(0);
        assert_eq!(sql.clause, "\"is_deleted\" = FALSE AND \"status\" = $1");
        assert_eq!(sql.params, vec![Value::from("active")]);
    }

    #[test]
    fn include_deleted_drops_the_guard() {
        let sql = Predicate::new()
            .exclude_deleted("is_deleted", true)
            .to_sql(0);
        assert_eq!(sql.clause, "");
    }

    #[test]
    fn search_is_or_combined_across_columns() {
        let sql = Predicate::new()
            .search(&["sport_name", "sport_code"], "bas")
            .to_sql(0);
        assert_eq!(
            sql.clause,
            "(\"sport_name\" ILIKE $1 OR \"sport_code\" ILIKE $2)"
        );
        assert_eq!(
            sql.params,
            vec![Value::from("%bas%"), Value::from("%bas%")]
        );
    }

    #[test]
    fn in_ids_expands_placeholders() {
        let sql = Predicate::new()
            .eq("tenant_id", 7)
            .in_ids("sport_id", &[1, 2, 3])
            .to_sql(0);
        assert_eq!(
            sql.clause,
            "\"tenant_id\" = $1 AND \"sport_id\" IN ($2, $3, $4)"
        );
        assert_eq!(sql.params.len(), 4);
    }

    #[test]
    fn empty_in_ids_matches_nothing() {
        let sql = Predicate::new().in_ids("sport_id", &[]).to_sql(0);
        assert_eq!(sql.clause, "1=0");
    }

    #[test]
    fn qualified_columns_are_quoted_per_segment() {
        let sql = Predicate::new().eq("tenants.status", "active").to_sql(0);
        assert_eq!(sql.clause, "\"tenants\".\"status\" = $1");
    }

    #[test]
    fn starting_index_offsets_placeholders() {
        let sql = Predicate::new().eq("id", 1).to_sql(2);
        assert_eq!(sql.clause, "\"id\" = $3");
    }

    #[test]
    fn eq_opt_skips_absent_values() {
        let sql = Predicate::new()
            .eq_opt("status", None::<&str>)
            .eq_opt("category", Some("other"))
            .to_sql(0);
        assert_eq!(sql.clause, "\"category\" = $1");
    }
}
