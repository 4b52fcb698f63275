use async_trait::async_trait;
use shared::models::{Character, Field};
use thiserror::Error;

pub mod memory;

pub use memory::MemoryDatabase;

pub type DbResult<T> = Result<T, DbError>;

/// Inclusive bounds for a character's level on the validated path.
pub const MIN_LEVEL: i64 = 1;
pub const MAX_LEVEL: i64 = 99;

#[derive(Error, Debug, PartialEq)]
pub enum DbError {
    #[error("Character not found: {0}")]
    NotFound(i64),
    #[error("ID or name already exists")]
    AlreadyExists,
    #[error("Level must be between 1 and 99")]
    LevelOutOfRange,
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait Database: Send + Sync {
    async fn get_characters(&self) -> DbResult<Vec<Character>>;
    async fn get_character(&self, character_id: i64) -> DbResult<Character>;
    /// Validated insert: rejects id/name clashes and out-of-range levels.
    async fn create_character(&self, character: Character) -> DbResult<()>;
    /// Full replace of the first record with `character_id`.
    async fn update_character(&self, character_id: i64, character: Character) -> DbResult<()>;
    async fn delete_character(&self, character_id: i64) -> DbResult<()>;
    /// Unvalidated insert used by the form pages.
    async fn append_character(&self, character: Character) -> DbResult<()>;
}

/// Missing and not-a-number levels never fail the bound checks; null
/// compares as zero.
pub fn check_level(level: &Field<i64>) -> DbResult<()> {
    let level = match level {
        Field::Value(level) => *level,
        Field::Null => 0,
        Field::Missing | Field::NotANumber => return Ok(()),
    };
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(DbError::LevelOutOfRange)
    }
}
