use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResendVerificationRequest,
};
use crate::modules::users::model::{Role, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_email,
        crate::modules::auth::controller::resend_verification,
        crate::modules::users::controller::get_me,
        crate::modules::admin::controller::admin_test,
    ),
    components(
        schemas(
            User,
            Role,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            ResendVerificationRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and email verification"),
        (name = "Users", description = "Account endpoints for the authenticated caller"),
        (name = "Admin", description = "Administrator-only endpoints")
    ),
    info(
        title = "Inkshelf API",
        version = "0.1.0",
        description = "Online bookstore API: authentication, session tokens and route authorization.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
