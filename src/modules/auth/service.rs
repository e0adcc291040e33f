use tracing::{debug, instrument};

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::UserRecord;
use crate::store::UserStore;
use crate::utils::errors::AppError;
use crate::utils::jwt::issue_session_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

/// Both credential failure causes surface as this one message. The wire
/// boundary must not reveal whether the email exists.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService;

impl AuthService {
    /// Authenticates the credentials and issues a session token.
    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        store: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let user = Self::authenticate(store, &dto.email, &dto.password).await?;
        let token = issue_session_token(&user.email, user.role, jwt_config)?;

        Ok(LoginResponse {
            token,
            role: user.role,
        })
    }

    /// Checks an email/password pair against the stored credential record.
    ///
    /// Unknown email and wrong password are distinguished only in server
    /// logs; the returned error is identical for both.
    pub async fn authenticate(
        store: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AppError> {
        let Some(user) = store.find_by_email(email).await? else {
            debug!(%email, "login rejected: no account for email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &user.password_hash)? {
            debug!(%email, "login rejected: password mismatch");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }
}
