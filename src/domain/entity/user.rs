use validator::Validate;

use super::{impl_entity, state_ref, EntityData};

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserState {
    #[validate(
        custom(
            function = "crate::domain::validation::not_blank",
            message = "First name must not be blank"
        ),
        length(min = 3, message = "First name must have at least 3 characters")
    )]
    pub(in crate::domain) first_name: String,
    #[validate(
        custom(
            function = "crate::domain::validation::not_blank",
            message = "Last name must not be blank"
        ),
        length(min = 3, message = "Last name must have at least 3 characters")
    )]
    pub(in crate::domain) last_name: String,
    #[validate(email(message = "Email should be valid"))]
    pub(in crate::domain) email: String,
}

impl UserState {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: UserState,
}

impl_entity!(User);

impl User {
    state_ref!(first_name, String);
    state_ref!(last_name, String);
    state_ref!(email, String);

    pub fn restore(data: EntityData, state: UserState) -> Self {
        Self { data, state }
    }

    pub fn state(&self) -> &UserState {
        &self.state
    }

    /// Overwrites every mutable field at once; the id never changes.
    pub fn overwrite(&mut self, state: UserState) {
        self.state = state;
    }
}
