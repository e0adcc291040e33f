use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::authn::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::User;
use super::service::UserService;

/// Get the profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile of the caller", body = User),
        (status = 401, description = "Not authenticated", body = crate::modules::auth::controller::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(email = %auth_user.0.subject))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_by_email(state.users.as_ref(), &auth_user.0.subject).await?;
    Ok(Json(user))
}
