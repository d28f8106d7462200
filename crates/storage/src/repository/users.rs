use uuid::Uuid;

use crate::Store;
use crate::error::{Result, StorageError};
use crate::models::User;

/// Repository for User records.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn insert(&self, user: User) -> Result<User> {
        if self.store.users().contains_key(&user.user_id) {
            return Err(StorageError::BusinessRule(format!(
                "user {} already exists",
                user.user_id
            )));
        }
        self.store.users().insert(user.user_id, user.clone());
        Ok(user)
    }

    pub fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        self.store
            .users()
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .ok_or(StorageError::NotFound)
    }

    pub fn list(&self) -> Vec<User> {
        let mut all: Vec<User> = self
            .store
            .users()
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|u| u.created_at);
        all
    }
}
