//! SQLite catalog backend
//!
//! Read-only access to the term catalog maintained by the surrounding
//! CRUD layer, plus the append-only extraction audit log.
//!
//! Matching is against Cyrillic names, which rules out SQLite's own
//! case handling: `LIKE` and the NOCASE collation only fold ASCII. The
//! case-sensitive tiers therefore use `instr()` and BINARY equality,
//! and the case-insensitive tier folds in Rust.

use crate::catalog::{ExtractionLog, TermCatalog};
use crate::error::{LexigraphError, Result};
use crate::types::{LinkType, SemanticLink, Term, TermId};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// SQLite-backed term catalog
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open a catalog database
    ///
    /// # Arguments
    /// * `database_url` - SQLite URL (e.g. "sqlite://catalog.db" or "sqlite::memory:")
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Connecting to catalog database: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePool::connect_with(options).await?;

        info!("Catalog connection established");

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running catalog migrations...");

        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?;

        info!("Catalog migrations completed");
        Ok(())
    }

    /// Convert a database row to a Term
    fn row_to_term(row: &SqliteRow) -> Result<Term> {
        let id_str: String = row.try_get("id")?;
        let id = TermId::from_string(&id_str)?;

        let parse_axis = |column: &str| -> Result<Option<Uuid>> {
            let value: Option<String> = row.try_get(column)?;
            value
                .map(|s| Uuid::parse_str(&s).map_err(LexigraphError::from))
                .transpose()
        };

        Ok(Term {
            id,
            name: row.try_get("name")?,
            definition: row.try_get("definition")?,
            discipline_id: parse_axis("discipline_id")?,
            course_id: parse_axis("course_id")?,
            specialty_id: parse_axis("specialty_id")?,
        })
    }
}

#[async_trait]
impl TermCatalog for SqliteCatalog {
    async fn find_by_name_contains(&self, fragment: &str) -> Result<Vec<Term>> {
        debug!("Catalog contains-scan for fragment: {:?}", fragment);

        // instr(name, '') is 1 for every row; an empty fragment would
        // match the whole catalog
        if fragment.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query("SELECT * FROM terms WHERE instr(name, ?) > 0 ORDER BY name")
            .bind(fragment)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_term).collect()
    }

    async fn find_by_name_exact(&self, name: &str) -> Result<Vec<Term>> {
        debug!("Catalog exact lookup for name: {:?}", name);

        let rows = sqlx::query("SELECT * FROM terms WHERE name = ?")
            .bind(name)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_term).collect()
    }

    async fn find_by_name_iexact(&self, name: &str) -> Result<Vec<Term>> {
        debug!("Catalog case-insensitive lookup for name: {:?}", name);

        // Folded in Rust: NOCASE only handles ASCII and the catalog is
        // Cyrillic. The catalog is small and curated, a full scan is fine.
        let needle = name.to_lowercase();
        let rows = sqlx::query("SELECT * FROM terms ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(Self::row_to_term)
            .filter(|t| {
                t.as_ref()
                    .map(|t| t.name.to_lowercase() == needle)
                    .unwrap_or(true)
            })
            .collect()
    }

    async fn find_by_name_in(&self, names: &[String]) -> Result<Vec<Term>> {
        debug!("Catalog batch exact lookup for {} names", names.len());

        if names.is_empty() {
            return Ok(vec![]);
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "SELECT * FROM terms WHERE name IN ({}) ORDER BY name",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for name in names {
            query = query.bind(name);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(Self::row_to_term).collect()
    }

    async fn find_links_by_endpoint(&self, term: TermId) -> Result<Vec<SemanticLink>> {
        debug!("Fetching links touching term: {}", term);

        let rows = sqlx::query(
            r#"
            SELECT
                l.id AS link_id, l.link_type,
                s.id AS s_id, s.name AS s_name, s.definition AS s_definition,
                s.discipline_id AS s_discipline_id, s.course_id AS s_course_id,
                s.specialty_id AS s_specialty_id,
                t.id AS t_id, t.name AS t_name, t.definition AS t_definition,
                t.discipline_id AS t_discipline_id, t.course_id AS t_course_id,
                t.specialty_id AS t_specialty_id
            FROM semantic_links l
            JOIN terms s ON s.id = l.source_id
            JOIN terms t ON t.id = l.target_id
            WHERE l.source_id = ? OR l.target_id = ?
            "#,
        )
        .bind(term.to_string())
        .bind(term.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut links = Vec::with_capacity(rows.len());
        for row in rows {
            links.push(Self::row_to_link(&row)?);
        }
        Ok(links)
    }

    async fn get_term(&self, id: TermId) -> Result<Term> {
        debug!("Fetching term: {}", id);

        let row = sqlx::query("SELECT * FROM terms WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| LexigraphError::TermNotFound(id.to_string()))?;

        Self::row_to_term(&row)
    }
}

impl SqliteCatalog {
    fn row_to_link(row: &SqliteRow) -> Result<SemanticLink> {
        let endpoint = |prefix: &str| -> Result<Term> {
            let id_str: String = row.try_get(format!("{}_id", prefix).as_str())?;
            let parse_axis = |column: String| -> Result<Option<Uuid>> {
                let value: Option<String> = row.try_get(column.as_str())?;
                value
                    .map(|s| Uuid::parse_str(&s).map_err(LexigraphError::from))
                    .transpose()
            };

            Ok(Term {
                id: TermId::from_string(&id_str)?,
                name: row.try_get(format!("{}_name", prefix).as_str())?,
                definition: row.try_get(format!("{}_definition", prefix).as_str())?,
                discipline_id: parse_axis(format!("{}_discipline_id", prefix))?,
                course_id: parse_axis(format!("{}_course_id", prefix))?,
                specialty_id: parse_axis(format!("{}_specialty_id", prefix))?,
            })
        };

        let link_id_str: String = row.try_get("link_id")?;
        let link_type_str: String = row.try_get("link_type")?;

        Ok(SemanticLink {
            id: Uuid::parse_str(&link_id_str)?,
            source: endpoint("s")?,
            target: endpoint("t")?,
            link_type: LinkType::from_str(&link_type_str)?,
        })
    }
}

#[async_trait]
impl ExtractionLog for SqliteCatalog {
    async fn record(&self, input: &str, output: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO extraction_log (input_text, output_text, requested_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(input)
        .bind(output)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
