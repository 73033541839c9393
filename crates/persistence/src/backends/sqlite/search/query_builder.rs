//! SQL query builder for recipe search.
//!
//! Translates [`RecipeFilters`] into a conjunction of parameterized SQL
//! conditions. User-supplied values only ever travel as bound parameters;
//! the SQL text is assembled from column names, fixed expressions and
//! operator tokens from [`CompareOp::as_sql`](crate::types::CompareOp::as_sql).
//!
//! Conditions are emitted in a fixed order (title, cuisine, rating,
//! total_time, calories) and numbered `?1..?N` in that order.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;

use crate::nutrients::{CALORIE_KEYS, NUMERIC_TEXT_FUNCTION};
use crate::types::{Comparison, PageRequest, RECIPE_ORDER_BY, RecipeFilters};

/// Columns selected for a [`Recipe`](crate::types::Recipe), in row order.
pub const RECIPE_COLUMNS: &str =
    "id, title, cuisine, rating, prep_time, cook_time, total_time, description, nutrients, serves";

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Creates a float parameter.
    pub fn float(f: f64) -> Self {
        SqlParam::Float(f)
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlParam::String(s) => ToSqlOutput::from(s.as_str()),
            SqlParam::Integer(i) => ToSqlOutput::from(*i),
            SqlParam::Float(f) => ToSqlOutput::from(*f),
        })
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    ///
    /// Placeholders are not renumbered; the caller numbers them up front.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("{} AND {}", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

/// Name of the SQL scalar function that lowercases text with full Unicode
/// case mapping. SQLite's own `LIKE` and `lower()` only fold ASCII.
pub const CASEFOLD_FUNCTION: &str = "casefold";

/// Builds SQL queries from recipe filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one condition per active filter, in the fixed filter order.
    ///
    /// Each condition holds exactly one placeholder and one bound value.
    pub fn conditions(&self, filters: &RecipeFilters) -> Vec<SqlFragment> {
        let mut conditions: Vec<SqlFragment> = Vec::new();

        if let Some(title) = filters.title.as_deref().filter(|t| !t.is_empty()) {
            let param_num = next_param(&conditions);
            conditions.push(Self::title_condition(title, param_num));
        }
        if let Some(cuisine) = filters.cuisine.as_deref().filter(|c| !c.is_empty()) {
            let param_num = next_param(&conditions);
            conditions.push(SqlFragment::with_params(
                format!("cuisine = ?{}", param_num),
                vec![SqlParam::string(cuisine)],
            ));
        }
        if let Some(rating) = &filters.rating {
            let param_num = next_param(&conditions);
            conditions.push(Self::column_condition("rating", rating, param_num));
        }
        if let Some(total_time) = &filters.total_time {
            let param_num = next_param(&conditions);
            conditions.push(Self::column_condition("total_time", total_time, param_num));
        }
        if let Some(calories) = &filters.calories {
            let param_num = next_param(&conditions);
            conditions.push(Self::column_condition(
                &calories_expression(),
                calories,
                param_num,
            ));
        }

        conditions
    }

    /// Builds the conjunction of all active filters.
    ///
    /// Returns an empty fragment when no filter is active.
    pub fn build(&self, filters: &RecipeFilters) -> SqlFragment {
        self.conditions(filters)
            .into_iter()
            .fold(SqlFragment::new(""), SqlFragment::and)
    }

    /// Builds the complete search statement: filtered, ordered and capped at
    /// `limit` rows.
    pub fn build_search(&self, filters: &RecipeFilters, limit: u32) -> SqlFragment {
        let mut fragment = self.build(filters);

        let where_clause = if fragment.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", fragment.sql)
        };
        let limit_param = fragment.params.len() + 1;

        fragment.sql = format!(
            "SELECT {} FROM recipes{} {} LIMIT ?{}",
            RECIPE_COLUMNS, where_clause, RECIPE_ORDER_BY, limit_param
        );
        fragment.params.push(SqlParam::integer(i64::from(limit)));
        fragment
    }

    /// Builds the unfiltered listing statement for one page.
    pub fn build_page(&self, request: PageRequest) -> SqlFragment {
        SqlFragment::with_params(
            format!(
                "SELECT {} FROM recipes {} LIMIT ?1 OFFSET ?2",
                RECIPE_COLUMNS, RECIPE_ORDER_BY
            ),
            vec![
                SqlParam::integer(i64::from(request.limit())),
                SqlParam::integer(i64::try_from(request.offset()).unwrap_or(i64::MAX)),
            ],
        )
    }

    /// Case-insensitive substring match on the title.
    ///
    /// Both sides are lowercased with Unicode case mapping: the pattern here,
    /// the column through [`CASEFOLD_FUNCTION`].
    fn title_condition(title: &str, param_num: usize) -> SqlFragment {
        SqlFragment::with_params(
            format!(
                "{}(title) LIKE ?{} ESCAPE '\\'",
                CASEFOLD_FUNCTION, param_num
            ),
            vec![SqlParam::string(format!(
                "%{}%",
                escape_like(&title.to_lowercase())
            ))],
        )
    }

    /// `<expression> <op> ?N`.
    fn column_condition(expression: &str, comparison: &Comparison, param_num: usize) -> SqlFragment {
        SqlFragment::with_params(
            format!("{} {} ?{}", expression, comparison.op.as_sql(), param_num),
            vec![SqlParam::float(comparison.value)],
        )
    }
}

/// SQL expression yielding the calorie count of a row as a REAL.
///
/// Takes the first non-null calorie key, strips everything but digits and
/// dots, and collapses an empty result to `0`. Rows whose calorie text has
/// no digits, or which have no calorie value at all, therefore compare as
/// zero calories.
pub fn calories_expression() -> String {
    let lookups = CALORIE_KEYS
        .iter()
        .map(|key| format!("json_extract(nutrients, '$.{}')", key))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CAST(COALESCE(NULLIF({}(COALESCE({})), ''), '0') AS REAL)",
        NUMERIC_TEXT_FUNCTION, lookups
    )
}

/// Placeholder number for the next condition.
fn next_param(conditions: &[SqlFragment]) -> usize {
    conditions.iter().map(|c| c.params.len()).sum::<usize>() + 1
}

/// Escapes LIKE wildcards so the text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompareOp;

    #[test]
    fn test_fragment_creation() {
        let frag = SqlFragment::new("rating > ?1");
        assert_eq!(frag.sql, "rating > ?1");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_fragment_and() {
        let frag1 = SqlFragment::with_params("a = ?1", vec![SqlParam::string("x")]);
        let frag2 = SqlFragment::with_params("b = ?2", vec![SqlParam::string("y")]);

        let combined = frag1.and(frag2);
        assert_eq!(combined.sql, "a = ?1 AND b = ?2");
        assert_eq!(combined.params.len(), 2);
    }

    #[test]
    fn test_fragment_and_with_empty() {
        let frag = SqlFragment::new("").and(SqlFragment::with_params(
            "a = ?1",
            vec![SqlParam::integer(1)],
        ));
        assert_eq!(frag.sql, "a = ?1");
        assert_eq!(frag.params, vec![SqlParam::Integer(1)]);
    }

    #[test]
    fn test_no_filters_no_conditions() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new();

        assert!(builder.conditions(&filters).is_empty());
        assert!(builder.build(&filters).is_empty());
    }

    #[test]
    fn test_title_is_bound_with_wildcards() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new().with_title("pie");

        let fragment = builder.build(&filters);
        assert_eq!(fragment.sql, "casefold(title) LIKE ?1 ESCAPE '\\'");
        assert_eq!(fragment.params, vec![SqlParam::string("%pie%")]);
    }

    #[test]
    fn test_title_pattern_is_lowercased() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new().with_title("CRÈME Brûlée");

        let fragment = builder.build(&filters);
        assert_eq!(fragment.params, vec![SqlParam::string("%crème brûlée%")]);
    }

    #[test]
    fn test_title_like_wildcards_are_escaped() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new().with_title("100%_pure\\");

        let fragment = builder.build(&filters);
        assert_eq!(fragment.params, vec![SqlParam::string("%100\\%\\_pure\\\\%")]);
    }

    #[test]
    fn test_untrusted_text_never_reaches_sql() {
        let builder = QueryBuilder::new();
        let hostile = "'; DROP TABLE recipes; --";
        let filters = RecipeFilters::new()
            .with_title(hostile)
            .with_cuisine(hostile);

        let fragment = builder.build_search(&filters, 200);
        assert!(!fragment.sql.contains("DROP"));
        assert!(!fragment.sql.contains(hostile));
        assert_eq!(fragment.params[1], SqlParam::string(hostile));
    }

    #[test]
    fn test_cuisine_exact_match() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new().with_cuisine("Thai");

        let fragment = builder.build(&filters);
        assert_eq!(fragment.sql, "cuisine = ?1");
        assert_eq!(fragment.params, vec![SqlParam::string("Thai")]);
    }

    #[test]
    fn test_empty_text_filters_are_ignored() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters {
            title: Some(String::new()),
            cuisine: Some(String::new()),
            ..Default::default()
        };

        assert!(builder.build(&filters).is_empty());
    }

    #[test]
    fn test_numeric_comparisons() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new()
            .with_rating(Comparison::new(CompareOp::Ge, 4.5))
            .with_total_time(Comparison::new(CompareOp::Lt, 30.0));

        let fragment = builder.build(&filters);
        assert_eq!(fragment.sql, "rating >= ?1 AND total_time < ?2");
        assert_eq!(
            fragment.params,
            vec![SqlParam::float(4.5), SqlParam::float(30.0)]
        );
    }

    #[test]
    fn test_calories_condition() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new().with_calories(Comparison::new(CompareOp::Le, 400.0));

        let conditions = builder.conditions(&filters);
        assert_eq!(conditions.len(), 1);

        let sql = &conditions[0].sql;
        assert!(sql.starts_with("CAST(COALESCE(NULLIF(nutrient_digits("));
        assert!(sql.contains("json_extract(nutrients, '$.calories')"));
        assert!(sql.contains("json_extract(nutrients, '$.Calorie')"));
        assert!(sql.ends_with("AS REAL) <= ?1"));
        assert_eq!(conditions[0].params, vec![SqlParam::float(400.0)]);
    }

    #[test]
    fn test_fixed_order_and_numbering() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::from_raw(
            Some("soup"),
            Some("French"),
            Some(">4"),
            Some("<=60"),
            Some("<500"),
        );

        let conditions = builder.conditions(&filters);
        assert_eq!(conditions.len(), 5);
        for (i, condition) in conditions.iter().enumerate() {
            assert_eq!(condition.params.len(), 1);
            assert!(condition.sql.contains(&format!("?{}", i + 1)));
        }
        assert!(conditions[0].sql.starts_with("casefold(title)"));
        assert!(conditions[1].sql.starts_with("cuisine"));
        assert!(conditions[2].sql.starts_with("rating"));
        assert!(conditions[3].sql.starts_with("total_time"));
        assert!(conditions[4].sql.starts_with("CAST"));
    }

    #[test]
    fn test_search_statement_without_filters() {
        let builder = QueryBuilder::new();
        let fragment = builder.build_search(&RecipeFilters::new(), 200);

        assert!(!fragment.sql.contains("WHERE"));
        assert!(fragment.sql.contains("ORDER BY rating DESC NULLS LAST, id ASC"));
        assert!(fragment.sql.ends_with("LIMIT ?1"));
        assert_eq!(fragment.params, vec![SqlParam::integer(200)]);
    }

    #[test]
    fn test_search_statement_with_filters() {
        let builder = QueryBuilder::new();
        let filters = RecipeFilters::new()
            .with_cuisine("Thai")
            .with_rating(Comparison::new(CompareOp::Ge, 4.5));

        let fragment = builder.build_search(&filters, 200);
        assert!(
            fragment
                .sql
                .contains("WHERE cuisine = ?1 AND rating >= ?2 ORDER BY")
        );
        assert!(fragment.sql.ends_with("LIMIT ?3"));
        assert_eq!(fragment.params.len(), 3);
        assert_eq!(fragment.params[2], SqlParam::integer(200));
    }

    #[test]
    fn test_page_statement() {
        let builder = QueryBuilder::new();
        let fragment = builder.build_page(PageRequest::new(3, 20));

        assert!(fragment.sql.contains("ORDER BY rating DESC NULLS LAST, id ASC"));
        assert!(fragment.sql.ends_with("LIMIT ?1 OFFSET ?2"));
        assert_eq!(
            fragment.params,
            vec![SqlParam::integer(20), SqlParam::integer(40)]
        );
    }

    #[test]
    fn test_page_statement_clamps_huge_offset() {
        let builder = QueryBuilder::new();
        let fragment = builder.build_page(PageRequest::new(i64::MAX, 100));
        assert_eq!(fragment.params[1], SqlParam::integer(i64::MAX));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("a%b_c\\d"), "a\\%b\\_c\\\\d");
    }
}
