use std::sync::Arc;

use async_trait::async_trait;

use super::entity::{Ident, User, UserState};
use crate::error::persistence::PersistenceError;

/// Storage collaborator for users.
///
/// Every write is a single atomic unit of work: it either commits completely or leaves
/// the store untouched.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Ident) -> Result<Option<User>, PersistenceError>;

    /// All users in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, PersistenceError>;

    /// Persists a new user, the store assigns its id.
    async fn insert(&self, state: UserState) -> Result<User, PersistenceError>;

    /// Overwrites every field of an existing user, `None` when there is no user with `id`.
    async fn update(&self, id: Ident, state: UserState) -> Result<Option<User>, PersistenceError>;

    /// Removes a user permanently, `false` when there is no user with `id`.
    async fn delete(&self, id: Ident) -> Result<bool, PersistenceError>;
}

pub type SharedUserRepository = Arc<dyn UserRepository>;
