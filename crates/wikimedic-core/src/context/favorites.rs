//! Favorite medicines.

use crate::db::{Database, DbResult};
use crate::models::FavoriteMedicine;

/// Favorites list backed by the key-value store, in the order they were added.
pub struct FavoritesContext<'a> {
    db: &'a Database,
    key: &'a str,
    favorites: Vec<FavoriteMedicine>,
}

impl<'a> FavoritesContext<'a> {
    /// Restore the stored list; an unreadable list is discarded.
    pub fn load(db: &'a Database, key: &'a str) -> DbResult<Self> {
        let favorites = match db.get_value(key)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(err) => {
                    tracing::warn!(key, error = %err, "discarding unreadable favorites");
                    db.remove_value(key)?;
                    Vec::new()
                }
            },
        };
        Ok(Self { db, key, favorites })
    }

    /// Add the medicine, or remove it if already present. Returns whether it
    /// is a favorite afterwards.
    pub fn toggle(&mut self, medicine: FavoriteMedicine) -> DbResult<bool> {
        let now_favorite = match self.favorites.iter().position(|f| f.id == medicine.id) {
            Some(index) => {
                self.favorites.remove(index);
                false
            }
            None => {
                self.favorites.push(medicine);
                true
            }
        };
        self.db.set_json(self.key, &self.favorites)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, medicine_id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == medicine_id)
    }

    pub fn list(&self) -> &[FavoriteMedicine] {
        &self.favorites
    }

    /// Forget every favorite, in memory and on disk.
    pub fn clear(&mut self) -> DbResult<()> {
        self.favorites.clear();
        self.db.remove_value(self.key)?;
        Ok(())
    }
}
