use async_trait::async_trait;
use salvo::{http::StatusCode, writer::Json, Depot, FlowCtrl, Handler, Request, Response};

use crate::{
    app::{
        resource::user::{UserPayload, UserResponse},
        use_case,
    },
    domain::{entity::Ident, repository::SharedUserRepository},
    error::{app::ApplicationError, http::BadRequest, resource::NotFoundError},
};

macro_rules! map_res_err {
    ($result:ident, $response:ident) => {
        match $result {
            Err(err) => {
                $response.render(err);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

macro_rules! user_controller {
    ($name:ident) => {
        pub struct $name {
            repository: SharedUserRepository,
        }

        impl $name {
            pub fn new(repository: SharedUserRepository) -> Self {
                Self { repository }
            }
        }
    };
}

/// Extract a user id from a request id param.
///
/// An id that is not a 64-bit integer cannot name a stored user, so it is reported as
/// not found instead of as malformed input, on every `/users/<id>` route.
fn extract_id(req: &Request) -> Result<Ident, NotFoundError> {
    let param = req.params().get("id").map(String::as_str).unwrap_or_default();
    param
        .parse()
        .map_err(|_| NotFoundError::from_resource::<UserResponse>(param))
}

user_controller!(CreateUserController);

#[async_trait]
impl Handler for CreateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserPayload, _> = req.parse_body().await.map_err(BadRequest::from);
        let payload = map_res_err!(result, res);

        let result = use_case::user::create_user(self.repository.as_ref(), payload).await;
        let user = map_res_err!(result, res);

        res.render(Json(user));
        res.set_status_code(StatusCode::CREATED);
    }
}

user_controller!(GetUserController);

#[async_trait]
impl Handler for GetUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req).map_err(ApplicationError::<()>::from);
        let id = map_res_err!(result, res);

        let result = use_case::user::find_user(self.repository.as_ref(), id).await;
        let user = map_res_err!(result, res);

        res.render(Json(user));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(ListUsersController);

#[async_trait]
impl Handler for ListUsersController {
    async fn handle(&self, _: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = use_case::user::list_users(self.repository.as_ref()).await;
        let users = map_res_err!(result, res);

        res.render(Json(users));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(UpdateUserController);

#[async_trait]
impl Handler for UpdateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req).map_err(ApplicationError::<()>::from);
        let id = map_res_err!(result, res);

        let result: Result<UserPayload, _> = req.parse_body().await.map_err(BadRequest::from);
        let payload = map_res_err!(result, res);

        let result = use_case::user::update_user(self.repository.as_ref(), id, payload).await;
        let user = map_res_err!(result, res);

        res.render(Json(user));
        res.set_status_code(StatusCode::OK);
    }
}

user_controller!(DeleteUserController);

#[async_trait]
impl Handler for DeleteUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_id(req).map_err(ApplicationError::<()>::from);
        let id = map_res_err!(result, res);

        let result = use_case::user::delete_user(self.repository.as_ref(), id).await;
        map_res_err!(result, res);

        res.set_status_code(StatusCode::NO_CONTENT);
    }
}
