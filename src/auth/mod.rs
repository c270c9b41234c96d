pub mod authorization;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use authorization::{authorize_path_owner, parse_task_id};
pub use extractors::AuthClaims;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims};

/// Payload for a new account registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account; unique across all users.
    #[validate(email)]
    pub email: String,
    /// Optional display name.
    #[validate(length(max = 255))]
    pub name: Option<String>,
    /// Password, at least 6 characters.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Form-encoded login credentials. Not validated beyond shape: any
/// credential that fails to match a stored user is a uniform 401.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
