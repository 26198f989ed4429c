//! [`UserRepository`] implementation for the in-memory store.

use super::InMemoryStore;
use crate::user::{
    domain::{NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if state.email_taken(user.email(), None) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        let id = state.next_user_id();
        let stored = user.clone().with_id(id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if !state.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::NotFound(user.id()));
        }
        if state.email_taken(user.email(), Some(user.id())) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        let mut state = self.write().map_err(UserRepositoryError::persistence)?;
        if !state.users.contains_key(&id) {
            return Ok(false);
        }
        if state.owns_projects(id) {
            return Err(UserRepositoryError::OwnsProjects(id));
        }
        Ok(state.remove_user(id))
    }
}
