//! RecipeStorage implementation for SQLite.

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params, params_from_iter};
use serde_json::Value;

use crate::core::RecipeStorage;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{NewRecipe, Page, PageRequest, Recipe, RecipeFilters};

use super::SqliteBackend;
use super::backend::{BACKEND_NAME, connection_failed, internal_error, query_error};
use super::search::{QueryBuilder, SqlParam};

const INSERT_RECIPE: &str = "INSERT INTO recipes
    (title, cuisine, rating, prep_time, cook_time, total_time, description, nutrients, serves)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

impl SqliteBackend {
    /// Runs blocking database work on the blocking thread pool with a pooled
    /// connection.
    async fn with_connection<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StorageResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| connection_failed(e.to_string()))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| internal_error(format!("Task join error: {}", e)))?
    }
}

/// Maps a row selected with `RECIPE_COLUMNS` to a [`Recipe`].
fn row_to_recipe(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let nutrients: Option<Value> = row.get(8)?;
    let nutrients = match nutrients {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                8,
                Type::Text,
                "nutrients is not a JSON object".into(),
            ));
        }
    };

    Ok(Recipe {
        id: row.get(0)?,
        title: row.get(1)?,
        cuisine: row.get(2)?,
        rating: row.get(3)?,
        prep_time: row.get(4)?,
        cook_time: row.get(5)?,
        total_time: row.get(6)?,
        description: row.get(7)?,
        nutrients,
        serves: row.get(9)?,
    })
}

/// Inserts one recipe and returns its new id.
fn insert_recipe(conn: &Connection, recipe: &NewRecipe) -> StorageResult<i64> {
    let nutrients = recipe
        .nutrients
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| serialization_error(format!("Failed to serialize nutrients: {}", e)))?;

    let mut stmt = conn
        .prepare_cached(INSERT_RECIPE)
        .map_err(|e| query_error("Failed to prepare insert", e))?;
    stmt.execute(params![
        recipe.title,
        recipe.cuisine,
        recipe.rating,
        recipe.prep_time,
        recipe.cook_time,
        recipe.total_time,
        recipe.description,
        nutrients,
        recipe.serves,
    ])
    .map_err(|e| query_error("Failed to insert recipe", e))?;

    Ok(conn.last_insert_rowid())
}

fn count_recipes(conn: &Connection) -> StorageResult<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))
        .map_err(|e| query_error("Failed to count recipes", e))?;
    Ok(u64::try_from(count).unwrap_or(0))
}

fn query_recipes(
    conn: &Connection,
    sql: &str,
    params: &[SqlParam],
) -> StorageResult<Vec<Recipe>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| query_error("Failed to prepare query", e))?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), row_to_recipe)
        .map_err(|e| query_error("Failed to execute query", e))?;
    let recipes = rows
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| query_error("Failed to read recipe row", e))?;
    Ok(recipes)
}

#[async_trait]
impl RecipeStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn count(&self) -> StorageResult<u64> {
        self.with_connection(|conn| count_recipes(conn)).await
    }

    async fn list_page(&self, request: PageRequest) -> StorageResult<Page<Recipe>> {
        let query = QueryBuilder::new().build_page(request);

        self.with_connection(move |conn| {
            // Count and page read from one snapshot
            let tx = conn
                .transaction()
                .map_err(|e| query_error("Failed to begin read transaction", e))?;
            let total = count_recipes(&tx)?;
            let data = query_recipes(&tx, &query.sql, &query.params)?;
            tx.commit()
                .map_err(|e| query_error("Failed to end read transaction", e))?;

            tracing::debug!(
                page = request.page(),
                limit = request.limit(),
                total,
                returned = data.len(),
                "Listed recipes"
            );
            Ok(Page::new(request, total, data))
        })
        .await
    }

    async fn search(&self, filters: &RecipeFilters, limit: u32) -> StorageResult<Vec<Recipe>> {
        let query = QueryBuilder::new().build_search(filters, limit);
        let active = filters.active_count();

        self.with_connection(move |conn| {
            tracing::debug!(sql = %query.sql, active_filters = active, "Executing recipe search");
            let data = query_recipes(conn, &query.sql, &query.params)?;
            tracing::debug!(returned = data.len(), "Recipe search complete");
            Ok(data)
        })
        .await
    }

    async fn insert(&self, recipe: NewRecipe) -> StorageResult<Recipe> {
        self.with_connection(move |conn| {
            let id = insert_recipe(conn, &recipe)?;
            Ok(Recipe {
                id,
                title: recipe.title,
                cuisine: recipe.cuisine,
                rating: recipe.rating,
                prep_time: recipe.prep_time,
                cook_time: recipe.cook_time,
                total_time: recipe.total_time,
                description: recipe.description,
                nutrients: recipe.nutrients,
                serves: recipe.serves,
            })
        })
        .await
    }

    async fn import(&self, recipes: Vec<NewRecipe>) -> StorageResult<usize> {
        self.with_connection(move |conn| {
            let tx = conn
                .transaction()
                .map_err(|e| query_error("Failed to begin import transaction", e))?;

            for recipe in &recipes {
                insert_recipe(&tx, recipe)?;
            }

            tx.commit()
                .map_err(|e| query_error("Failed to commit import", e))?;

            tracing::info!(count = recipes.len(), "Imported recipes");
            Ok(recipes.len())
        })
        .await
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(|e| {
                    StorageError::Backend(BackendError::Unavailable {
                        backend_name: BACKEND_NAME.to_string(),
                        message: e.to_string(),
                    })
                })?;
            Ok(())
        })
        .await
    }
}
