//! Auth Guard
//!
//! Every route declares whether it is public. Protected routes need a valid
//! access token cookie; the resolved caller is stored in request extensions
//! for the [`CurrentUser`] extractor. Requests that pass are then counted
//! against the caller's rate limit.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::validate_access_token::{CurrentUser, ValidateAccessTokenUseCase};
use crate::domain::repository::UserDirectory;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::throttle::throttle_key;

/// Access flag attached to each route
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RouteAccess {
    #[display("public")]
    Public,
    #[display("protected")]
    Protected,
}

/// Result of [`authorize`]
#[derive(Debug)]
pub enum GuardOutcome {
    /// `None` for public routes, which never look at the cookie
    Allowed(Option<CurrentUser>),
    Denied(AuthError),
}

/// Middleware state
#[derive(Clone)]
pub struct GuardState<R>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    pub app: AuthAppState<R>,
    pub access: RouteAccess,
}

/// Decide whether a request may reach its handler
pub async fn authorize<R>(
    state: &AuthAppState<R>,
    access: RouteAccess,
    headers: &HeaderMap,
) -> GuardOutcome
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    if access == RouteAccess::Public {
        return GuardOutcome::Allowed(None);
    }

    let Some(token) = platform::cookie::extract_cookie(headers, &state.config.access_cookie_name)
    else {
        return GuardOutcome::Denied(AuthError::Unauthorized);
    };

    let use_case = ValidateAccessTokenUseCase::new(state.directory.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(user) => GuardOutcome::Allowed(Some(user)),
        Err(err) => GuardOutcome::Denied(denial(err)),
    }
}

/// Callers only learn whether the token expired
fn denial(err: AuthError) -> AuthError {
    match err {
        AuthError::TokenExpired | AuthError::Database(_) | AuthError::Internal(_) => err,
        _ => AuthError::Unauthorized,
    }
}

/// Guard middleware, attached per route with that route's access flag
pub async fn auth_guard<R>(
    State(guard): State<GuardState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let outcome = authorize(&guard.app, guard.access, req.headers()).await;

    match outcome {
        GuardOutcome::Allowed(user) => {
            if let Some(throttle) = &guard.app.throttle {
                let key = throttle_key(user.as_ref(), req.headers(), req.extensions());
                if let Err(err) = throttle.check(&key).await {
                    return err.into_response();
                }
            }

            if let Some(user) = user {
                tracing::debug!(user_id = %user.user_id, "Request authenticated");
                req.extensions_mut().insert(user);
            }
            next.run(req).await
        }
        GuardOutcome::Denied(err) => err.into_response(),
    }
}
