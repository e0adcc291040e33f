use axum::Json;

use crate::modules::auth::model::MessageResponse;

/// Admin access check
///
/// Trivial endpoint behind the admin-only policy tier; the storefront uses
/// it to probe whether the stored session still has admin access.
#[utoipa::path(
    get,
    path = "/api/admin/test",
    responses(
        (status = 200, description = "Caller has admin access", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = crate::modules::auth::controller::ErrorResponse),
        (status = 403, description = "Authenticated but not an admin", body = crate::modules::auth::controller::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn admin_test() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Admin access confirmed".to_string(),
    })
}
