pub mod user;

pub use user::{User, UserState};

/// Store-assigned identifier of every persisted entity.
pub type Ident = i64;

pub trait Entity {
    fn ident(&self) -> Ident;
}

/// Data used to restore a entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityData {
    pub(in crate::domain) id: Ident,
}

impl EntityData {
    /// Only a storage backend hands out ids, so this is the single way to build one.
    pub fn restore(id: Ident) -> Self {
        Self { id }
    }
}

macro_rules! impl_entity {
    ($entity:ty) => {
        impl crate::domain::entity::Entity for $entity {
            fn ident(&self) -> crate::domain::entity::Ident {
                self.data.id
            }
        }
    };
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.state.$prop
        }
    };
}

pub(self) use impl_entity;
pub(self) use state_ref;
