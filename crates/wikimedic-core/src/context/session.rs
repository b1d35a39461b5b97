//! Signed-in user.

use crate::db::{Database, DbResult};
use crate::models::User;

/// Session state backed by the key-value store.
pub struct SessionContext<'a> {
    db: &'a Database,
    key: &'a str,
    user: Option<User>,
}

impl<'a> SessionContext<'a> {
    /// Restore the stored session. A stored entry that no longer decodes is
    /// discarded and the session starts signed out.
    pub fn load(db: &'a Database, key: &'a str) -> DbResult<Self> {
        let user = match db.get_value(key)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(key, error = %err, "discarding unreadable session");
                    db.remove_value(key)?;
                    None
                }
            },
        };
        Ok(Self { db, key, user })
    }

    pub fn sign_in(&mut self, user: User) -> DbResult<()> {
        self.db.set_json(self.key, &user)?;
        tracing::info!(user_id = %user.id, "signed in");
        self.user = Some(user);
        Ok(())
    }

    pub fn sign_out(&mut self) -> DbResult<()> {
        self.db.remove_value(self.key)?;
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
