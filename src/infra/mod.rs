pub mod controller;
pub mod database;
pub mod memory;

pub mod router {
    use salvo::{logging::Logger, Router};

    use super::controller::*;
    use crate::domain::repository::SharedUserRepository;

    pub fn app(repository: SharedUserRepository) -> Router {
        Router::new()
            .push(
                Router::with_path("users")
                    .get(ListUsersController::new(repository.clone()))
                    .post(CreateUserController::new(repository.clone()))
                    .push(
                        Router::with_path("<id>")
                            .get(GetUserController::new(repository.clone()))
                            .put(UpdateUserController::new(repository.clone()))
                            .delete(DeleteUserController::new(repository)),
                    ),
            )
            .hoop(Logger)
    }
}
