pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod user {
        use crate::{
            app::resource::user::{UserPayload, UserResponse},
            domain::entity::{Entity, User, UserState},
        };

        impl UserPayload {
            /// Names of the wire properties that are absent or `null`.
            pub fn missing_fields(&self) -> Vec<String> {
                [
                    ("firstName", self.first_name.is_none()),
                    ("lastName", self.last_name.is_none()),
                    ("email", self.email.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(name, _)| name.to_string())
                .collect()
            }
        }

        /// Absent fields become empty strings, which no field rule accepts.
        impl From<&UserPayload> for UserState {
            fn from(payload: &UserPayload) -> Self {
                Self::new(
                    payload.first_name.clone().unwrap_or_default(),
                    payload.last_name.clone().unwrap_or_default(),
                    payload.email.clone().unwrap_or_default(),
                )
            }
        }

        impl From<User> for UserResponse {
            fn from(user: User) -> Self {
                Self {
                    id: user.ident(),
                    first_name: user.first_name().clone(),
                    last_name: user.last_name().clone(),
                    email: user.email().clone(),
                }
            }
        }
    }
}
