use crate::{
    access::owner_only,
    errors::GenerationError,
    providers::db::storage::{FileStore, GenerationStore},
    search::{like_patterns, relevance, tokenize},
    types::{
        ContentType, FileMatch, FileRecord, Generation, NewFile, NewGeneration, Philosophy, Usage,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use std::{
    fmt::{self, Debug},
    sync::{Arc, Mutex},
};
use tracing::{debug, info};
use turso::{Database, Row, Value as TursoValue};
use uuid::Uuid;

pub mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// This provider holds a `Database` instance, which manages a connection pool.
/// When cloned, it shares the same underlying database, allowing for concurrent and
/// shared access to the same database file or in-memory instance.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
    /// The last creation timestamp handed out, shared between clones.
    last_timestamp: Arc<Mutex<DateTime<Utc>>>,
}

impl SqliteProvider {
    /// Creates a new `SqliteProvider` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:" for a unique,
    ///   isolated in-memory database. To share an in-memory database across multiple
    ///   `SqliteProvider` instances (e.g., in tests), create one provider and
    ///   then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, GenerationError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| GenerationError::StorageConnection(e.to_string()))?;

        // WAL has no effect on in-memory databases but is safe to run.
        let conn = db
            .connect()
            .map_err(|e| GenerationError::StorageConnection(e.to_string()))?;
        // Use `query` for PRAGMA statements that return a value to avoid "unexpected row" errors.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| GenerationError::StorageConnection(e.to_string()))?;

        Ok(Self {
            db,
            last_timestamp: Arc::new(Mutex::new(DateTime::<Utc>::MIN_UTC)),
        })
    }

    /// Ensures that all required application tables and indexes exist.
    /// This function is idempotent and safe to call on every application startup.
    pub async fn initialize_schema(&self) -> Result<(), GenerationError> {
        let conn = self.connect()?;
        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| GenerationError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }

    fn connect(&self) -> Result<turso::Connection, GenerationError> {
        self.db
            .connect()
            .map_err(|e| GenerationError::StorageConnection(e.to_string()))
    }

    /// Hands out creation timestamps at microsecond precision, strictly
    /// increasing across this provider and its clones so that newest-first
    /// ordering never ties.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let mut last = self
            .last_timestamp
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Utc::now().trunc_subsecs(6);
        let next = if now > *last {
            now
        } else {
            *last + Duration::microseconds(1)
        };
        *last = next;
        next
    }

    async fn query_generations(
        &self,
        sql: &str,
        params: Vec<TursoValue>,
    ) -> Result<Vec<Generation>, GenerationError> {
        let conn = self.connect()?;
        let mut rows = conn.query(sql, params).await?;
        let mut generations = Vec::new();
        while let Some(row) = rows.next().await? {
            generations.push(generation_from_row(&row)?);
        }
        Ok(generations)
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn text_at(row: &Row, idx: usize) -> Result<String, GenerationError> {
    match row.get_value(idx)? {
        TursoValue::Text(s) => Ok(s),
        other => Err(GenerationError::DataIntegrity(format!(
            "expected text in column {idx}, found {other:?}"
        ))),
    }
}

fn optional_text_at(row: &Row, idx: usize) -> Result<Option<String>, GenerationError> {
    match row.get_value(idx)? {
        TursoValue::Null => Ok(None),
        TursoValue::Text(s) => Ok(Some(s)),
        other => Err(GenerationError::DataIntegrity(format!(
            "expected optional text in column {idx}, found {other:?}"
        ))),
    }
}

fn count_at(row: &Row, idx: usize) -> Result<u64, GenerationError> {
    let value = match row.get_value(idx)? {
        TursoValue::Integer(i) => i,
        TursoValue::Real(f) => f as i64,
        other => {
            return Err(GenerationError::DataIntegrity(format!(
                "expected integer in column {idx}, found {other:?}"
            )))
        }
    };
    u64::try_from(value).map_err(|_| {
        GenerationError::DataIntegrity(format!("negative token count {value} in column {idx}"))
    })
}

fn token_value(count: u64) -> Result<TursoValue, GenerationError> {
    i64::try_from(count)
        .map(TursoValue::Integer)
        .map_err(|_| GenerationError::DataIntegrity(format!("token count {count} is too large")))
}

/// Parses a row selected with `sql::GENERATION_COLUMNS`.
fn generation_from_row(row: &Row) -> Result<Generation, GenerationError> {
    let created_at_str = text_at(row, 11)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            GenerationError::DataIntegrity(format!(
                "Failed to parse date '{created_at_str}': {e}"
            ))
        })?;

    Ok(Generation {
        id: text_at(row, 0)?,
        user_id: text_at(row, 1)?,
        topic: text_at(row, 2)?,
        url: optional_text_at(row, 3)?,
        region: text_at(row, 4)?,
        content_type: ContentType::from(text_at(row, 5)?),
        model: text_at(row, 6)?,
        result_text: text_at(row, 7)?,
        philosophy: Philosophy::from(text_at(row, 8)?),
        usage: Usage {
            prompt_tokens: count_at(row, 9)?,
            total_tokens: count_at(row, 10)?,
        },
        created_at,
    })
}

#[async_trait]
impl GenerationStore for SqliteProvider {
    async fn save(&self, new: NewGeneration) -> Result<Generation, GenerationError> {
        let generation = Generation {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            topic: new.topic,
            url: new.url,
            region: new.region,
            content_type: new.content_type,
            model: new.model,
            result_text: new.result_text,
            philosophy: new.philosophy,
            usage: new.usage,
            created_at: self.next_timestamp(),
        };

        let params = vec![
            TursoValue::Text(generation.id.clone()),
            TursoValue::Text(generation.user_id.clone()),
            TursoValue::Text(generation.topic.clone()),
            generation
                .url
                .clone()
                .map(TursoValue::Text)
                .unwrap_or(TursoValue::Null),
            TursoValue::Text(generation.region.clone()),
            TursoValue::Text(generation.content_type.as_str().to_string()),
            TursoValue::Text(generation.model.clone()),
            TursoValue::Text(generation.result_text.clone()),
            TursoValue::Text(generation.philosophy.as_str().to_string()),
            token_value(generation.usage.prompt_tokens)?,
            token_value(generation.usage.total_tokens)?,
            TursoValue::Text(format_timestamp(&generation.created_at)),
        ];

        let conn = self.connect()?;
        conn.execute(sql::INSERT_GENERATION_SQL, params).await?;

        info!(
            generation_id = %generation.id,
            user_id = %generation.user_id,
            "Saved generation."
        );
        Ok(generation)
    }

    async fn get_by_id(
        &self,
        caller: &str,
        generation_id: &str,
    ) -> Result<Option<Generation>, GenerationError> {
        let found = self
            .query_generations(
                &sql::select_generation_by_id(),
                vec![TursoValue::Text(generation_id.to_string())],
            )
            .await?
            .into_iter()
            .next();
        Ok(owner_only(found, caller))
    }

    async fn search_by_topic(
        &self,
        caller: &str,
        query: &str,
    ) -> Result<Vec<Generation>, GenerationError> {
        if query.trim().is_empty() {
            debug!(caller = %caller, "Listing all generations newest first.");
            return self
                .query_generations(
                    &sql::select_generations_by_user(),
                    vec![TursoValue::Text(caller.to_string())],
                )
                .await;
        }

        let terms = tokenize(query);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = vec![TursoValue::Text(caller.to_string())];
        params.extend(like_patterns(&terms).into_iter().map(TursoValue::Text));
        let mut generations = self
            .query_generations(&sql::select_generations_by_topic_terms(terms.len()), params)
            .await?;

        // Stable sort: equally relevant records stay newest first.
        generations.sort_by_key(|g| std::cmp::Reverse(relevance(&g.topic, &terms)));
        info!(
            caller = %caller,
            query = %query,
            "Topic search matched {} generations.",
            generations.len()
        );
        Ok(generations)
    }

    async fn usage_total(&self, caller: &str) -> Result<u64, GenerationError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(
                sql::SUM_USAGE_BY_USER_SQL,
                vec![TursoValue::Text(caller.to_string())],
            )
            .await?;
        match rows.next().await? {
            Some(row) => count_at(&row, 0),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl FileStore for SqliteProvider {
    async fn save_file(&self, file: NewFile) -> Result<FileRecord, GenerationError> {
        let id = Uuid::new_v4().to_string();
        let record = FileRecord {
            storage_id: file.storage_id.unwrap_or_else(|| format!("inline:{id}")),
            id,
            name: file.name,
            text_content: file.text_content,
        };

        let conn = self.connect()?;
        conn.execute(
            sql::INSERT_FILE_SQL,
            vec![
                TursoValue::Text(record.id.clone()),
                TursoValue::Text(record.name.clone()),
                TursoValue::Text(record.storage_id.clone()),
                TursoValue::Text(record.text_content.clone()),
                TursoValue::Text(format_timestamp(&self.next_timestamp())),
            ],
        )
        .await?;

        info!(file_id = %record.id, name = %record.name, "Saved file.");
        Ok(record)
    }

    async fn search_files(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<FileMatch>, GenerationError> {
        let terms = tokenize(query);
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let conn = self.connect()?;
        let params: Vec<TursoValue> = like_patterns(&terms)
            .into_iter()
            .map(TursoValue::Text)
            .collect();
        let mut rows = conn
            .query(&sql::select_files_by_content_terms(terms.len()), params)
            .await?;

        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            let text = text_at(&row, 2)?;
            candidates.push((
                relevance(&text, &terms),
                FileMatch {
                    id: text_at(&row, 0)?,
                    name: text_at(&row, 1)?,
                },
            ));
        }

        candidates.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
        let matches: Vec<FileMatch> = candidates
            .into_iter()
            .take(limit as usize)
            .map(|(_, file)| file)
            .collect();

        info!(query = %query, "File search returned {} matches.", matches.len());
        Ok(matches)
    }

    async fn get_file_content(&self, file_id: &str) -> Result<Option<String>, GenerationError> {
        let conn = self.connect()?;
        let mut rows = conn
            .query(
                sql::SELECT_FILE_CONTENT_SQL,
                vec![TursoValue::Text(file_id.to_string())],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(text_at(&row, 0)?)),
            None => Ok(None),
        }
    }
}
