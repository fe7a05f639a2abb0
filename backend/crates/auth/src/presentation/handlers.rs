//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, header};
use axum::response::{AppendHeaders, IntoResponse};
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::validate_access_token::CurrentUser;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
    RefreshTokenUseCase, SignUpInput, SignUpUseCase, TokenPair, UpdateProfileInput,
    UpdateProfileUseCase,
};
use crate::domain::repository::UserDirectory;
use crate::error::AuthResult;
use crate::messages;
use crate::presentation::dto::{
    AuthResponse, ChangePasswordRequest, JsonBody, LoginRequest, SignUpRequest,
    UpdateProfileRequest, UserInfoResponse,
};
use crate::presentation::throttle::Throttle;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    pub directory: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// Shared by every route; `None` when throttling is off
    pub throttle: Option<Throttle>,
}

type SetCookies = AppendHeaders<[(HeaderName, String); 2]>;

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.directory.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        token_cookies(&state.config, &output.tokens),
        ApiResponse::created(
            messages::USER_CREATED,
            AuthResponse {
                user_info: output.user_info.into(),
            },
        ),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.directory.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        token_cookies(&state.config, &output.tokens),
        ApiResponse::ok(
            messages::USER_LOGIN,
            AuthResponse {
                user_info: output.user_info.into(),
            },
        ),
    ))
}

// ============================================================================
// Refresh Token
// ============================================================================

/// POST /auth/refresh-token
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.refresh_cookie_name);

    let use_case = RefreshTokenUseCase::new(state.directory.clone(), state.config.clone());
    let tokens = use_case.execute(token.as_deref()).await?;

    Ok((
        token_cookies(&state.config, &tokens),
        ApiResponse::message_only(messages::USER_REFRESH_TOKEN),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
///
/// Stateless: clears both cookies, issued tokens expire on their own.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    (
        AppendHeaders([
            (
                header::SET_COOKIE,
                state.config.access_cookie().build_delete_cookie(),
            ),
            (
                header::SET_COOKIE,
                state.config.refresh_cookie().build_delete_cookie(),
            ),
        ]),
        ApiResponse::message_only(messages::USER_LOGOUT),
    )
}

// ============================================================================
// Change Password (requires authentication)
// ============================================================================

/// POST /auth/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.directory.clone(), state.config.clone());

    use_case
        .execute(
            &current_user.user_id,
            ChangePasswordInput {
                old_password: req.old_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(ApiResponse::message_only(messages::USER_CHANGE_PASSWORD))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /user/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    current_user: CurrentUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let info = GetProfileUseCase::new(state.directory.clone())
        .execute(&current_user.user_id)
        .await?;

    Ok(ApiResponse::ok(
        messages::USER_GET_PROFILE,
        UserInfoResponse::from(info),
    ))
}

/// PUT /user/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    current_user: CurrentUser,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let info = UpdateProfileUseCase::new(state.directory.clone())
        .execute(&current_user.user_id, UpdateProfileInput { name: req.name })
        .await?;

    Ok(ApiResponse::ok(
        messages::USER_UPDATE_PROFILE,
        UserInfoResponse::from(info),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn token_cookies(config: &AuthConfig, tokens: &TokenPair) -> SetCookies {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.access_cookie().build_set_cookie(&tokens.access_token),
        ),
        (
            header::SET_COOKIE,
            config.refresh_cookie().build_set_cookie(&tokens.refresh_token),
        ),
    ])
}
