use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{
        entity::{EntityData, Ident, User, UserState},
        repository::UserRepository,
    },
    error::persistence::PersistenceError,
};

#[derive(Debug, Default)]
struct Store {
    /// Last id handed out; ids of deleted users are never reused.
    last_id: Ident,
    users: BTreeMap<Ident, User>,
}

/// Process-local user store, ordered by id.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Ident) -> Result<Option<User>, PersistenceError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, PersistenceError> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn insert(&self, state: UserState) -> Result<User, PersistenceError> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let id = store.last_id;

        let user = User::restore(EntityData::restore(id), state);
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Ident, state: UserState) -> Result<Option<User>, PersistenceError> {
        let mut store = self.store.write().await;
        Ok(store.users.get_mut(&id).map(|user| {
            user.overwrite(state);
            user.clone()
        }))
    }

    async fn delete(&self, id: Ident) -> Result<bool, PersistenceError> {
        let mut store = self.store.write().await;
        Ok(store.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::entity::Entity;

    fn state(first_name: &str) -> UserState {
        UserState::new(first_name.into(), "Doe".into(), "john@doe.com".into())
    }

    #[tokio::test]
    async fn assign_increasing_ids() {
        let repo = MemoryUserRepository::new();

        let first = repo.insert(state("Test1")).await.unwrap();
        let second = repo.insert(state("Test2")).await.unwrap();

        assert_eq!(first.ident(), 1);
        assert_eq!(second.ident(), 2);
        assert_eq!(repo.find_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn list_in_insertion_order() {
        let repo = MemoryUserRepository::new();
        for name in ["Test1", "Test2", "Test3"] {
            repo.insert(state(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|user| user.first_name().clone())
            .collect();

        assert_eq!(names, ["Test1", "Test2", "Test3"]);
    }

    #[tokio::test]
    async fn never_reuse_deleted_ids() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(state("Test1")).await.unwrap();

        assert!(repo.delete(user.ident()).await.unwrap());
        assert!(!repo.delete(user.ident()).await.unwrap());

        let next = repo.insert(state("Test2")).await.unwrap();
        assert_eq!(next.ident(), 2);
        assert_eq!(repo.find_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_keeps_id() {
        let repo = MemoryUserRepository::new();
        let user = repo.insert(state("Original")).await.unwrap();

        let updated = repo
            .update(user.ident(), state("Updated"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.ident(), user.ident());
        assert_eq!(updated.first_name(), "Updated");
        assert_eq!(repo.update(99, state("Nobody")).await.unwrap(), None);
    }
}
