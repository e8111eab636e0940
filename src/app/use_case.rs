pub mod user {
    use crate::{
        app::resource::user::{UserPayload, UserResponse},
        domain::{
            entity::{Entity, Ident, UserState},
            repository::UserRepository,
            validation,
        },
        error::{
            app::ApplicationError,
            resource::{
                InputError, NotFoundError, ValidationError, ValidationErrorKind,
                ValidationFieldError,
            },
        },
    };

    mod validation_step {
        use super::*;

        pub fn user_state(
            payload: &UserPayload,
        ) -> Result<UserState, ApplicationError<UserPayload>> {
            let state = UserState::from(payload);
            validation::validate_user(&state).map_err(|mut fields| {
                skip_length_of_missing(&mut fields, &payload.missing_fields());
                ValidationError::from_resource(payload.clone(), fields)
            })?;
            Ok(state)
        }

        /// A length rule holds for an absent value; only its other rules apply.
        fn skip_length_of_missing(fields: &mut Vec<ValidationFieldError>, missing: &[String]) {
            for field in fields.iter_mut() {
                let name = field.path.trim_start_matches('/');
                if missing.iter().any(|m| m == name) {
                    field
                        .violations
                        .retain(|v| !matches!(v.kind, ValidationErrorKind::MinLength(_)));
                }
            }
            fields.retain(|field| !field.violations.is_empty());
        }
    }

    pub async fn create_user(
        repository: &dyn UserRepository,
        payload: UserPayload,
    ) -> Result<UserResponse, ApplicationError<UserPayload>> {
        if let Some(id) = payload.id {
            return Err(InputError::IdProvided { id }.into());
        }

        let state = validation_step::user_state(&payload)?;
        let user = repository.insert(state).await?;

        tracing::info!(user_id = user.ident(), "created user");
        Ok(user.into())
    }

    /// Missing users are not an error here, the caller receives `None`.
    pub async fn find_user(
        repository: &dyn UserRepository,
        id: Ident,
    ) -> Result<Option<UserResponse>, ApplicationError<()>> {
        let user = repository.find_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    pub async fn list_users(
        repository: &dyn UserRepository,
    ) -> Result<Vec<UserResponse>, ApplicationError<()>> {
        let users = repository.list_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update_user(
        repository: &dyn UserRepository,
        id: Ident,
        payload: UserPayload,
    ) -> Result<UserResponse, ApplicationError<UserPayload>> {
        let fields = payload.missing_fields();
        if !fields.is_empty() {
            return Err(InputError::MissingFields { fields }.into());
        }

        let state = validation_step::user_state(&payload)?;
        let user = repository
            .update(id, state)
            .await?
            .ok_or_else(|| NotFoundError::from_resource::<UserResponse>(id))?;

        tracing::info!(user_id = id, "updated user");
        Ok(user.into())
    }

    pub async fn delete_user(
        repository: &dyn UserRepository,
        id: Ident,
    ) -> Result<(), ApplicationError<()>> {
        if !repository.delete(id).await? {
            return Err(NotFoundError::from_resource::<UserResponse>(id).into());
        }

        tracing::info!(user_id = id, "deleted user");
        Ok(())
    }
}
