//! Administrative commands.
//!
//! Administrators are never created through the API; the `create-admin`
//! subcommand on the server binary is the only path.

use crate::modules::users::model::{NewUser, Role, UserRecord};
use crate::store::UserStore;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Creates a pre-verified administrator account.
pub async fn create_admin(
    store: &dyn UserStore,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<UserRecord, AppError> {
    if store.email_exists(email).await? {
        return Err(AppError::bad_request(format!(
            "An account already exists for {}",
            email
        )));
    }

    let password_hash = hash_password(password)?;

    store
        .insert(NewUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            country: None,
            date_of_birth: None,
            password_hash,
            role: Role::Admin,
            verified: true,
            verification_token: None,
            verification_expires: None,
        })
        .await
}
