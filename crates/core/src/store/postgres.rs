use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use super::{ContentStore, LocationStore, StoreError, StoreResult};
use crate::content::model::LocationContent;
use crate::location::model::{LocationRecord, LocationType};

/// SQLSTATE for `undefined_column`.
const UNDEFINED_COLUMN: &str = "42703";
/// SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

/// Schema capabilities read once per store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaInfo {
    /// `countries`, `regions` and `cities` carry `canonical_slug`.
    pub canonical_slug_column: bool,
    /// `location_content` carries its own copy of `canonical_slug`.
    pub content_canonical_slug_column: bool,
}

/// Location and content ids are UUID columns; anything else matches no row.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// Select list for content rows. Without the column the slug reads as NULL.
fn content_columns(with_canonical: bool) -> String {
    let canonical = if with_canonical {
        "c.canonical_slug"
    } else {
        "NULL::text AS canonical_slug"
    };
    format!(
        "c.location_id::text AS location_id, c.template_type, {canonical}, \
         c.content_json, c.updated_at"
    )
}

/// Postgres-backed directory store.
///
/// Which optional columns exist is read from `information_schema` the first
/// time it matters and cached for the lifetime of the store, so deployments
/// mid-migration do not pay a probing round trip per request.
#[derive(Debug)]
pub struct PgDirectoryStore {
    pool: PgPool,
    schema: OnceCell<SchemaInfo>,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Cached schema capabilities, detected on first use.
    pub async fn schema_info(&self) -> StoreResult<SchemaInfo> {
        self.schema
            .get_or_try_init(|| detect_schema(&self.pool))
            .await
            .copied()
    }

    fn location_select(location_type: LocationType, with_canonical: bool) -> String {
        let parent = match location_type.parent_column() {
            Some(column) => format!("{column}::text"),
            None => "NULL::text".to_string(),
        };
        let canonical = if with_canonical {
            "canonical_slug"
        } else {
            "NULL::text AS canonical_slug"
        };
        format!(
            "SELECT id::text AS id, COALESCE(name, '') AS name, COALESCE(slug, '') AS slug, \
             {parent} AS parent_id, {canonical} FROM {table}",
            table = location_type.table(),
        )
    }

    /// Whether content rows can be read with their own canonical slug. A
    /// failed detection reads it as NULL so the fallbacks keep working.
    async fn content_has_canonical_slug(&self) -> bool {
        match self.schema_info().await {
            Ok(schema) => schema.content_canonical_slug_column,
            Err(err) => {
                debug!(error = %err, "Schema detection failed; not reading location_content.canonical_slug");
                false
            }
        }
    }

    async fn content_where(&self, from: &str, filter: &str, value: &str) -> StoreResult<Option<LocationContent>> {
        let columns = content_columns(self.content_has_canonical_slug().await);
        let sql = format!("SELECT {columns} FROM {from} WHERE {filter} = $1 LIMIT 1");
        sqlx::query_as::<_, LocationContent>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    /// Like [`Self::content_where`] but for queries through the `locations`
    /// view, where a missing view or column means the join is unavailable.
    async fn joined_content_where(&self, filter: &str, value: &str) -> StoreResult<Option<LocationContent>> {
        self.content_where(
            "location_content c JOIN locations l ON l.id = c.location_id",
            filter,
            value,
        )
        .await
        .map_err(|err| match err {
            StoreError::ColumnMissing(msg) => StoreError::RelationshipNotEmbeddable(msg),
            StoreError::Database(ref db) if sqlstate(db).as_deref() == Some(UNDEFINED_TABLE) => {
                StoreError::RelationshipNotEmbeddable(db.to_string())
            }
            other => other,
        })
    }
}

async fn column_exists(pool: &PgPool, table: &str, column: &str) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.columns \
         WHERE table_schema = ANY (current_schemas(false)) \
         AND table_name = $1 AND column_name = $2)",
    )
    .bind(table)
    .bind(column)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

async fn detect_schema(pool: &PgPool) -> StoreResult<SchemaInfo> {
    let canonical_slug_column = column_exists(pool, "countries", "canonical_slug").await?;
    let content_canonical_slug_column =
        column_exists(pool, "location_content", "canonical_slug").await?;

    tracing::info!(
        canonical_slug_column,
        content_canonical_slug_column,
        "Detected location schema"
    );
    Ok(SchemaInfo {
        canonical_slug_column,
        content_canonical_slug_column,
    })
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

/// Map driver errors, singling out missing columns.
fn classify(err: sqlx::Error) -> StoreError {
    match sqlstate(&err).as_deref() {
        Some(UNDEFINED_COLUMN) => StoreError::ColumnMissing(err.to_string()),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl LocationStore for PgDirectoryStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn probe_canonical_slug_column(&self) -> StoreResult<()> {
        if self.schema_info().await?.canonical_slug_column {
            Ok(())
        } else {
            Err(StoreError::ColumnMissing("countries.canonical_slug".to_string()))
        }
    }

    async fn fetch_location(
        &self,
        location_type: LocationType,
        id: &str,
    ) -> StoreResult<Option<LocationRecord>> {
        let Some(uuid) = parse_id(id) else {
            debug!(%location_type, id, "Not a location id");
            return Ok(None);
        };
        let sql = format!(
            "{} WHERE id = $1",
            Self::location_select(location_type, false)
        );
        sqlx::query_as::<_, LocationRecord>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn list_locations(
        &self,
        location_type: LocationType,
        with_canonical: bool,
    ) -> StoreResult<Vec<LocationRecord>> {
        let sql = format!(
            "{} ORDER BY name, id",
            Self::location_select(location_type, with_canonical)
        );
        sqlx::query_as::<_, LocationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn list_location_ids(&self, location_type: LocationType) -> StoreResult<Vec<String>> {
        let sql = format!(
            "SELECT id::text FROM {} ORDER BY name, id",
            location_type.table()
        );
        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_location_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<(LocationType, LocationRecord)>> {
        for location_type in [LocationType::City, LocationType::Region, LocationType::Country] {
            let sql = format!(
                "{} WHERE canonical_slug = $1 LIMIT 1",
                Self::location_select(location_type, true)
            );
            let found = sqlx::query_as::<_, LocationRecord>(&sql)
                .bind(canonical_slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(classify)?;
            if let Some(record) = found {
                return Ok(Some((location_type, record)));
            }
        }
        Ok(None)
    }

    async fn write_canonical_slug(
        &self,
        location_type: LocationType,
        id: &str,
        canonical_slug: &str,
    ) -> StoreResult<()> {
        let not_found = || StoreError::RowNotFound {
            table: location_type.table(),
            id: id.to_string(),
        };
        let uuid = parse_id(id).ok_or_else(not_found)?;
        let sql = format!(
            "UPDATE {} SET canonical_slug = $1 WHERE id = $2",
            location_type.table()
        );
        let result = sqlx::query(&sql)
            .bind(canonical_slug)
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for PgDirectoryStore {
    async fn content_by_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>> {
        if !self.schema_info().await?.content_canonical_slug_column {
            return Err(StoreError::ColumnMissing(
                "location_content.canonical_slug".to_string(),
            ));
        }
        self.content_where("location_content c", "c.canonical_slug", canonical_slug)
            .await
    }

    async fn content_by_location_canonical_slug(
        &self,
        canonical_slug: &str,
    ) -> StoreResult<Option<LocationContent>> {
        self.joined_content_where("l.canonical_slug", canonical_slug)
            .await
    }

    async fn content_by_location_id(&self, location_id: &str) -> StoreResult<Option<LocationContent>> {
        let Some(uuid) = parse_id(location_id) else {
            return Ok(None);
        };
        let columns = content_columns(self.content_has_canonical_slug().await);
        let sql = format!("SELECT {columns} FROM location_content c WHERE c.location_id = $1");
        sqlx::query_as::<_, LocationContent>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn content_by_legacy_slug(&self, slug: &str) -> StoreResult<Option<LocationContent>> {
        self.joined_content_where("l.slug", slug).await
    }

    async fn content_location_ids(&self) -> StoreResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT location_id::text FROM location_content")
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }
}
