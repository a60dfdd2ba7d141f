use database::UserRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `/users` 的响应体，按 position 升序
#[derive(Clone, Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserRecord>,
}
