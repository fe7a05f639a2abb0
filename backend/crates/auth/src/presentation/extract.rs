//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::validate_access_token::CurrentUser;
use crate::error::AuthError;

/// Reads the user the guard attached; absent means the route was not guarded
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}
