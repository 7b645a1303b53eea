//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the SQLite provider.
//! This makes the core logic cleaner and isolates database-specific syntax.

pub const CREATE_USERS_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
);";

pub const CREATE_FILES_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS files (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    storage_id TEXT NOT NULL,
    text_content TEXT NOT NULL,
    created_at TEXT NOT NULL
);";

pub const CREATE_GENERATIONS_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS generations (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    topic TEXT NOT NULL,
    url TEXT,
    region TEXT NOT NULL,
    content_type TEXT NOT NULL,
    model TEXT NOT NULL,
    result_text TEXT NOT NULL,
    philosophy TEXT NOT NULL,
    prompt_tokens INTEGER NOT NULL,
    total_tokens INTEGER NOT NULL,
    created_at TEXT NOT NULL
);";

pub const CREATE_GENERATIONS_USER_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS idx_generations_user_id ON generations (user_id);";

/// Every statement needed to bring an empty database up to the current schema.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_USERS_TABLE_SQL,
    CREATE_FILES_TABLE_SQL,
    CREATE_GENERATIONS_TABLE_SQL,
    CREATE_GENERATIONS_USER_INDEX_SQL,
];

/// Column list shared by every generation read, in the order `generation_from_row` expects.
pub const GENERATION_COLUMNS: &str = "id, user_id, topic, url, region, content_type, model, result_text, philosophy, prompt_tokens, total_tokens, created_at";

pub const INSERT_GENERATION_SQL: &str = "
INSERT INTO generations (id, user_id, topic, url, region, content_type, model, result_text, philosophy, prompt_tokens, total_tokens, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);";

pub const INSERT_FILE_SQL: &str =
    "INSERT INTO files (id, name, storage_id, text_content, created_at) VALUES (?, ?, ?, ?, ?);";

pub fn select_generation_by_id() -> String {
    format!("SELECT {GENERATION_COLUMNS} FROM generations WHERE id = ?")
}

pub fn select_generations_by_user() -> String {
    format!("SELECT {GENERATION_COLUMNS} FROM generations WHERE user_id = ? ORDER BY created_at DESC")
}

/// Candidate generations for a topic search: the caller's records whose topic
/// contains any of `term_count` patterns (`%term%`, already lowercased).
pub fn select_generations_by_topic_terms(term_count: usize) -> String {
    let likes = vec!["lower(topic) LIKE ?"; term_count].join(" OR ");
    format!(
        "SELECT {GENERATION_COLUMNS} FROM generations WHERE user_id = ? AND ({likes}) ORDER BY created_at DESC"
    )
}

/// Candidate files for a content search over `term_count` patterns.
pub fn select_files_by_content_terms(term_count: usize) -> String {
    let likes = vec!["lower(text_content) LIKE ?"; term_count].join(" OR ");
    format!(
        "SELECT id, name, text_content FROM files WHERE {likes} ORDER BY created_at DESC"
    )
}

pub const SELECT_FILE_CONTENT_SQL: &str = "SELECT text_content FROM files WHERE id = ?";

pub const SUM_USAGE_BY_USER_SQL: &str =
    "SELECT COALESCE(SUM(total_tokens), 0) FROM generations WHERE user_id = ?";
