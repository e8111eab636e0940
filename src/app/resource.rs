pub mod user {
    use serde::{Deserialize, Serialize};

    use crate::base::resource_id;

    /// Body of create and update requests.
    ///
    /// Every property is optional on the wire so that a missing or `null` field reaches
    /// the use case, which decides whether it is an error.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserPayload {
        pub id: Option<i64>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
    }

    resource_id!(UserPayload, "user::UserPayload");

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserResponse {
        pub id: i64,
        pub first_name: String,
        pub last_name: String,
        pub email: String,
    }

    resource_id!(UserResponse, "user::User");
}
