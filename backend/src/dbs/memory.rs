use crate::dbs::{Database, DbError, DbResult, check_level};
use async_trait::async_trait;
use shared::models::Character;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-lifetime character collection. Every operation runs under a single
/// lock acquisition, so a check and the mutation it guards never interleave
/// with another request.
#[derive(Default)]
pub struct MemoryDatabase {
    characters: RwLock<Vec<Character>>,
}

impl MemoryDatabase {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters: RwLock::new(characters),
        }
    }

    /// The three records present at startup.
    pub fn seeded() -> Self {
        Self::new(seed_characters())
    }

    fn read(&self) -> DbResult<RwLockReadGuard<'_, Vec<Character>>> {
        self.characters
            .read()
            .map_err(|_| DbError::Internal("character store lock poisoned".into()))
    }

    fn write(&self) -> DbResult<RwLockWriteGuard<'_, Vec<Character>>> {
        self.characters
            .write()
            .map_err(|_| DbError::Internal("character store lock poisoned".into()))
    }
}

pub fn seed_characters() -> Vec<Character> {
    vec![
        Character::new(1, "Cloud Strife", "Soldier", "Buster sword", 25),
        Character::new(2, "Tifa Lockhart", "Fighter", "Leather gloves", 22),
        Character::new(3, "Aerith Gainsborough", "Mage", "Magic staff", 20),
    ]
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn get_characters(&self) -> DbResult<Vec<Character>> {
        let db = self.read()?;
        Ok(db.clone())
    }

    async fn get_character(&self, character_id: i64) -> DbResult<Character> {
        let db = self.read()?;
        db.iter()
            .find(|c| c.id.is(&character_id))
            .cloned()
            .ok_or(DbError::NotFound(character_id))
    }

    async fn create_character(&self, character: Character) -> DbResult<()> {
        let mut db = self.write()?;
        if db.iter().any(|c| c.collides_with(&character)) {
            return Err(DbError::AlreadyExists);
        }
        check_level(&character.level)?;
        db.push(character);
        Ok(())
    }

    async fn update_character(&self, character_id: i64, character: Character) -> DbResult<()> {
        let mut db = self.write()?;
        let index = db
            .iter()
            .position(|c| c.id.is(&character_id))
            .ok_or(DbError::NotFound(character_id))?;

        // Records carrying the target id are not "others", wherever they sit.
        let duplicate = db
            .iter()
            .any(|c| c.collides_with(&character) && !c.id.is(&character_id));
        if duplicate {
            return Err(DbError::AlreadyExists);
        }
        check_level(&character.level)?;

        db[index] = character;
        Ok(())
    }

    async fn delete_character(&self, character_id: i64) -> DbResult<()> {
        let mut db = self.write()?;
        let index = db
            .iter()
            .position(|c| c.id.is(&character_id))
            .ok_or(DbError::NotFound(character_id))?;
        db.remove(index);
        Ok(())
    }

    async fn append_character(&self, character: Character) -> DbResult<()> {
        let mut db = self.write()?;
        db.push(character);
        Ok(())
    }
}
