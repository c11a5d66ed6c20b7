use axum::http::StatusCode;
use axum::Extension;

use super::get_user_by_email::UserData;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

pub async fn me(Extension(current_user): Extension<CurrentUser>) -> ApiSuccess<UserData> {
    ApiSuccess::new(StatusCode::OK, (&current_user.user).into())
}
