//! Owner authorization for task-scoped routes.
//!
//! Every task operation carries the owner's id in the URL. The authenticated
//! token subject must match that path segment exactly before anything else
//! happens: no identifier parsing, no repository access, no existence checks.
//! A mismatch is reported as 401, indistinguishable from an authentication
//! failure, so a caller can never probe whether another owner's resources
//! exist.

use crate::auth::token::Claims;
use crate::error::AppError;
use uuid::Uuid;

/// Checks that the token subject matches the `{user_id}` path segment, then
/// parses it into a `Uuid`.
///
/// The comparison is string-exact on the canonical identifier form and runs
/// before parsing: an authenticated user asking for someone else's path gets
/// `Unauthorized`, while a matching but malformed id gets `BadRequest`.
pub fn authorize_path_owner(claims: &Claims, path_user_id: &str) -> Result<Uuid, AppError> {
    if claims.sub != path_user_id {
        return Err(AppError::Unauthorized(
            "Unauthorized access to these tasks".into(),
        ));
    }

    Uuid::parse_str(path_user_id)
        .map_err(|_| AppError::BadRequest("Invalid user ID format".into()))
}

/// Parses the `{task_id}` path segment. Malformed ids are a 400, never a 404.
pub fn parse_task_id(path_task_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(path_task_id).map_err(|_| AppError::BadRequest("Invalid task ID format".into()))
}
