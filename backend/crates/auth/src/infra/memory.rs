//! In-memory user repository
//!
//! Same contract as the PostgreSQL store, including failure on a taken
//! user name. Backs the test suites and local runs without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{InternalError, InternalResult};

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> InternalResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| InternalError::Store("user store lock poisoned".to_string()))?;

        if users.contains_key(user.user_name.as_str()) {
            return Err(InternalError::Store(format!(
                "username '{}' already exists",
                user.user_name
            )));
        }

        users.insert(user.user_name.as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> InternalResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| InternalError::Store("user store lock poisoned".to_string()))?;

        Ok(users.get(user_name.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashedPassword;

    fn user(name: &str) -> User {
        User::new(
            UserName::new(name).unwrap(),
            HashedPassword::from_stored("$2b$10$placeholder"),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let alice = user("alice");
        repo.create(&alice).await.unwrap();

        let found = repo
            .find_by_user_name(&UserName::new("alice").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_id, alice.user_id);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_user_name_fails() {
        let repo = InMemoryUserRepository::new();
        repo.create(&user("alice")).await.unwrap();

        let err = repo.create(&user("alice")).await.unwrap_err();
        assert!(matches!(err, InternalError::Store(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let found = repo
            .find_by_user_name(&UserName::new("nobody").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
