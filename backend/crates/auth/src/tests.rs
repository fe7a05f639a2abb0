//! Scenario tests over the in-memory user directory, and router tests

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase, LoginInput, LoginUseCase,
    RefreshTokenUseCase, SignUpInput, SignUpOutput, SignUpUseCase, TokenIssuer, TokenKind,
    UpdateProfileInput, UpdateProfileUseCase, ValidateAccessTokenUseCase,
};
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{user_id::UserId, user_status::UserStatus};
use crate::{AuthConfig, AuthError, InMemoryUserDirectory, auth_router_generic, messages};
use platform::rate_limit::RateLimitConfig;

const TEST_ROUNDS: u32 = 1_000;
const PASSWORD: &str = "Abc@1234";

fn config() -> AuthConfig {
    AuthConfig::new(b"test-access-secret".to_vec(), b"test-refresh-secret".to_vec())
        .with_password_rounds(TEST_ROUNDS)
}

struct Harness {
    directory: Arc<InMemoryUserDirectory>,
    config: Arc<AuthConfig>,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(config())
    }

    fn with_config(config: AuthConfig) -> Self {
        Self {
            directory: Arc::new(InMemoryUserDirectory::new()),
            config: Arc::new(config),
        }
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<SignUpOutput, AuthError> {
        SignUpUseCase::new(self.directory.clone(), self.config.clone())
            .execute(SignUpInput {
                email: email.to_string(),
                password: password.to_string(),
                name: name.to_string(),
            })
            .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<crate::application::LoginOutput, AuthError> {
        LoginUseCase::new(self.directory.clone(), self.config.clone())
            .execute(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }

    async fn change_password(&self, user_id: &UserId, old: &str, new: &str) -> Result<(), AuthError> {
        ChangePasswordUseCase::new(self.directory.clone(), self.config.clone())
            .execute(
                user_id,
                ChangePasswordInput {
                    old_password: old.to_string(),
                    new_password: new.to_string(),
                },
            )
            .await
    }

    fn refresh(&self) -> RefreshTokenUseCase<InMemoryUserDirectory> {
        RefreshTokenUseCase::new(self.directory.clone(), self.config.clone())
    }

    fn validate(&self) -> ValidateAccessTokenUseCase<InMemoryUserDirectory> {
        ValidateAccessTokenUseCase::new(self.directory.clone(), self.config.clone())
    }
}

fn validation_key(err: &AuthError) -> String {
    match err {
        AuthError::Validation(message) => message.key().to_string(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ============================================================================
// Sign Up
// ============================================================================

#[tokio::test]
async fn signup_then_login() {
    let h = Harness::new();
    let signed_up = h.sign_up(" Ada@Example.com ", PASSWORD, " Ada ").await.unwrap();

    assert_eq!(signed_up.user_info.email, "ada@example.com");
    assert_eq!(signed_up.user_info.name, "Ada");

    let logged_in = h.login("ada@example.com", PASSWORD).await.unwrap();
    assert_eq!(logged_in.user_info, signed_up.user_info);

    let issuer = TokenIssuer::new(h.config.clone());
    assert_eq!(
        issuer
            .verify(TokenKind::AccessToken, &logged_in.tokens.access_token)
            .unwrap(),
        signed_up.user_info.id
    );
    assert_eq!(
        issuer
            .verify(TokenKind::RefreshToken, &logged_in.tokens.refresh_token)
            .unwrap(),
        signed_up.user_info.id
    );
}

#[tokio::test]
async fn signup_stores_hash_not_password() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let user = h
        .directory
        .find_by_id(&out.user_info.id)
        .await
        .unwrap()
        .unwrap();
    let stored = user.password_hash.as_str();
    assert!(!stored.contains(PASSWORD));
    let (key_hex, salt_hex) = stored.split_once('.').unwrap();
    assert_eq!((key_hex.len(), salt_hex.len()), (128, 32));
}

#[tokio::test]
async fn signup_rejects_duplicate_email_case_insensitively() {
    let h = Harness::new();
    h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let err = h.sign_up("ADA@example.com", PASSWORD, "Other").await.unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_validates_input() {
    let h = Harness::new();

    let err = h.sign_up("not-an-email", PASSWORD, "Ada").await.unwrap_err();
    assert_eq!(validation_key(&err), messages::IS_EMAIL);

    let err = h.sign_up("ada@example.com", "abc@1234", "Ada").await.unwrap_err();
    assert_eq!(validation_key(&err), messages::INVALID_PASSWORD);

    let err = h.sign_up("ada@example.com", PASSWORD, "   ").await.unwrap_err();
    assert_eq!(validation_key(&err), messages::NOT_EMPTY);

    assert!(h.directory.is_empty().await);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let h = Harness::new();
    h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let wrong_password = h.login("ada@example.com", "Abc@12345").await.unwrap_err();
    let unknown_email = h.login("nobody@example.com", PASSWORD).await.unwrap_err();
    let malformed_email = h.login("nobody", PASSWORD).await.unwrap_err();

    for err in [&wrong_password, &unknown_email, &malformed_email] {
        assert!(matches!(err, AuthError::InvalidCredentials), "{err:?}");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(
        wrong_password.to_app_error().to_string(),
        unknown_email.to_app_error().to_string()
    );
}

#[tokio::test]
async fn login_inactive_account() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();
    h.directory
        .set_status(&out.user_info.id, UserStatus::Deactive)
        .await
        .unwrap();

    let err = h.login("ada@example.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, AuthError::AccountNotActive));
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    // Status is only revealed to callers who know the password
    let err = h.login("ada@example.com", "Wrong@123").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn refresh_rotates_tokens() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let pair = h
        .refresh()
        .execute(Some(&out.tokens.refresh_token))
        .await
        .unwrap();

    assert_ne!(pair.access_token, out.tokens.access_token);
    assert_ne!(pair.refresh_token, out.tokens.refresh_token);

    // Stateless: the old refresh token still works until it expires
    assert!(h.refresh().execute(Some(&out.tokens.refresh_token)).await.is_ok());
}

#[tokio::test]
async fn refresh_chain_rotates() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let first = h
        .refresh()
        .execute(Some(&out.tokens.refresh_token))
        .await
        .unwrap();
    let second = h
        .refresh()
        .execute(Some(&first.refresh_token))
        .await
        .unwrap();

    assert_ne!(second.access_token, first.access_token);
    assert_ne!(second.refresh_token, first.refresh_token);

    let current = h.validate().execute(&second.access_token).await.unwrap();
    assert_eq!(current.user_id, out.user_info.id);
}

#[tokio::test]
async fn refresh_rejects_missing_and_wrong_kind() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    for token in [None, Some(""), Some(out.tokens.access_token.as_str()), Some("garbage")] {
        let err = h.refresh().execute(token).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized), "{token:?}: {err:?}");
    }
}

#[tokio::test]
async fn refresh_for_unknown_or_inactive_owner() {
    let h = Harness::new();

    let orphan = TokenIssuer::new(h.config.clone())
        .issue(TokenKind::RefreshToken, &UserId::new())
        .unwrap();
    assert!(matches!(
        h.refresh().execute(Some(&orphan)).await,
        Err(AuthError::Unauthorized)
    ));

    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();
    h.directory
        .set_status(&out.user_info.id, UserStatus::Deactive)
        .await
        .unwrap();
    let err = h
        .refresh()
        .execute(Some(&out.tokens.refresh_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenOwnerInactive));
    assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.message().key(), messages::ACCOUNT_NOT_ACTIVE);
}

#[tokio::test]
async fn refresh_with_expired_token() {
    let mut config = config();
    config.refresh_ttl = Duration::ZERO;
    let h = Harness::with_config(config);
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let err = h
        .refresh()
        .execute(Some(&out.tokens.refresh_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenExpired));
    assert_eq!(err.message().key(), messages::TOKEN_EXPIRED);
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_invalid() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let other = Harness::with_config(AuthConfig::new(
        b"other-access".to_vec(),
        b"other-refresh".to_vec(),
    ));
    let forged = TokenIssuer::new(other.config.clone())
        .issue(TokenKind::RefreshToken, &out.user_info.id)
        .unwrap();

    assert!(matches!(
        h.refresh().execute(Some(&forged)).await,
        Err(AuthError::Unauthorized)
    ));
}

// ============================================================================
// Validate Access Token
// ============================================================================

#[tokio::test]
async fn validate_access_token_resolves_user() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let current = h.validate().execute(&out.tokens.access_token).await.unwrap();
    assert_eq!(current.user_id, out.user_info.id);
    assert_eq!(current.name, "Ada");

    assert!(matches!(
        h.validate().execute(&out.tokens.refresh_token).await,
        Err(AuthError::Unauthorized)
    ));
}

#[tokio::test]
async fn validate_access_token_for_deactivated_user() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();
    h.directory
        .set_status(&out.user_info.id, UserStatus::Deactive)
        .await
        .unwrap();

    assert!(matches!(
        h.validate().execute(&out.tokens.access_token).await,
        Err(AuthError::Unauthorized)
    ));
}

// ============================================================================
// Change Password
// ============================================================================

#[tokio::test]
async fn change_password_same_password_checked_first() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    // Even a wrong old password reports the same-password error
    let err = h
        .change_password(&out.user_info.id, "Zzz@9999", "Zzz@9999")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::SamePassword));
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_policy_then_old_password() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let err = h
        .change_password(&out.user_info.id, "Wrong@123", "weak")
        .await
        .unwrap_err();
    match err {
        AuthError::Validation(message) => assert_eq!(message.arg("key"), Some("newPassword")),
        other => panic!("unexpected {other:?}"),
    }

    let err = h
        .change_password(&out.user_info.id, "Wrong@123", "New@54321")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::WrongOldPassword));
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn change_password_replaces_credentials_only() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    h.change_password(&out.user_info.id, PASSWORD, "New@54321")
        .await
        .unwrap();

    assert!(matches!(
        h.login("ada@example.com", PASSWORD).await,
        Err(AuthError::InvalidCredentials)
    ));
    let relogin = h.login("ada@example.com", "New@54321").await.unwrap();
    assert_eq!(relogin.user_info, out.user_info);

    // Issued tokens are not revoked by a password change
    assert!(h.validate().execute(&out.tokens.access_token).await.is_ok());
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn profile_get_and_update() {
    let h = Harness::new();
    let out = h.sign_up("ada@example.com", PASSWORD, "Ada").await.unwrap();

    let info = GetProfileUseCase::new(h.directory.clone())
        .execute(&out.user_info.id)
        .await
        .unwrap();
    assert_eq!(info, out.user_info);

    let updated = UpdateProfileUseCase::new(h.directory.clone())
        .execute(
            &out.user_info.id,
            UpdateProfileInput {
                name: "Countess".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Countess");
    assert_eq!(updated.email, "ada@example.com");

    assert!(matches!(
        GetProfileUseCase::new(h.directory.clone())
            .execute(&UserId::new())
            .await,
        Err(AuthError::UserNotFound)
    ));
}

// ============================================================================
// Router
// ============================================================================

mod router {
    use super::*;

    struct TestApp {
        router: Router,
        directory: InMemoryUserDirectory,
    }

    struct TestResponse {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    }

    impl TestResponse {
        fn set_cookies(&self) -> Vec<String> {
            self.headers
                .get_all(header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(str::to_string)
                .collect()
        }

        /// `name=value` from the matching Set-Cookie header
        fn cookie(&self, name: &str) -> String {
            self.set_cookies()
                .into_iter()
                .find(|c| c.starts_with(&format!("{name}=")))
                .and_then(|c| c.split(';').next().map(str::to_string))
                .unwrap_or_else(|| panic!("no {name} cookie in {:?}", self.set_cookies()))
        }
    }

    fn app_with(config: AuthConfig) -> TestApp {
        let directory = InMemoryUserDirectory::new();
        TestApp {
            router: auth_router_generic(directory.clone(), config),
            directory,
        }
    }

    fn app() -> TestApp {
        app_with(config())
    }

    fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &TestApp, req: Request<Body>) -> TestResponse {
        let response = app.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    async fn sign_up(app: &TestApp) -> TestResponse {
        send(
            app,
            request(
                "POST",
                "/auth/signup",
                Some(json!({ "email": "ada@example.com", "password": PASSWORD, "name": "Ada" })),
                None,
            ),
        )
        .await
    }

    #[tokio::test]
    async fn signup_sets_cookies_and_hides_tokens() {
        let app = app();
        let res = sign_up(&app).await;

        assert_eq!(res.status, StatusCode::CREATED);
        assert_eq!(res.body["message"], "User created successfully");
        assert_eq!(res.body["data"]["userInfo"]["email"], "ada@example.com");
        assert_eq!(res.body["data"]["userInfo"]["name"], "Ada");
        assert!(res.body["data"].get("accessToken").is_none());
        assert!(res.body["error"].is_null());

        let cookies = res.set_cookies();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
        assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
        assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
        assert_eq!(app.directory.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let app = app();
        sign_up(&app).await;
        let res = sign_up(&app).await;

        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(res.body["error"]["key"], messages::USER_EXISTS_WITH_SAME_EMAIL);
        assert!(res.set_cookies().is_empty());
    }

    #[tokio::test]
    async fn login_errors_share_one_body() {
        let app = app();
        sign_up(&app).await;

        let wrong = send(
            &app,
            request(
                "POST",
                "/auth/login",
                Some(json!({ "email": "ada@example.com", "password": "Nope@1234" })),
                None,
            ),
        )
        .await;
        let unknown = send(
            &app,
            request(
                "POST",
                "/auth/login",
                Some(json!({ "email": "ghost@example.com", "password": "Nope@1234" })),
                None,
            ),
        )
        .await;

        assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong.status, unknown.status);
        assert_eq!(wrong.body, unknown.body);
        assert_eq!(wrong.body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn protected_route_requires_cookie() {
        let app = app();
        let res = send(&app, request("GET", "/user/profile", None, None)).await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["error"]["key"], messages::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn profile_with_access_cookie() {
        let app = app();
        let signed_up = sign_up(&app).await;
        let access = signed_up.cookie("access_token");

        let res = send(&app, request("GET", "/user/profile", None, Some(&access))).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["message"], "Profile fetched successfully");
        assert_eq!(res.body["data"]["email"], "ada@example.com");
        assert_eq!(res.body["data"]["id"], signed_up.body["data"]["userInfo"]["id"]);

        let res = send(
            &app,
            request("PUT", "/user/profile", Some(json!({ "name": "Countess" })), Some(&access)),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["data"]["name"], "Countess");
    }

    #[tokio::test]
    async fn refresh_token_in_access_cookie_is_rejected() {
        let app = app();
        let signed_up = sign_up(&app).await;
        let refresh_value = signed_up
            .cookie("refresh_token")
            .trim_start_matches("refresh_token=")
            .to_string();

        let res = send(
            &app,
            request(
                "GET",
                "/user/profile",
                None,
                Some(&format!("access_token={refresh_value}")),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["error"]["key"], messages::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_access_cookie_reports_expiry() {
        let mut config = config();
        config.access_ttl = Duration::ZERO;
        let app = app_with(config);
        let access = sign_up(&app).await.cookie("access_token");

        tokio::time::sleep(Duration::from_millis(1_100)).await;

        let res = send(&app, request("GET", "/user/profile", None, Some(&access))).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["error"]["key"], messages::TOKEN_EXPIRED);
        assert_eq!(res.body["message"], "Token has expired");
    }

    #[tokio::test]
    async fn public_route_ignores_bad_access_cookie() {
        let app = app();
        sign_up(&app).await;

        let res = send(
            &app,
            request(
                "POST",
                "/auth/login",
                Some(json!({ "email": "ada@example.com", "password": PASSWORD })),
                Some("access_token=garbage"),
            ),
        )
        .await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["message"], "Login successful");
    }

    #[tokio::test]
    async fn refresh_endpoint() {
        let app = app();
        let signed_up = sign_up(&app).await;

        let missing = send(&app, request("POST", "/auth/refresh-token", None, None)).await;
        assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

        let refresh = signed_up.cookie("refresh_token");
        let res = send(&app, request("POST", "/auth/refresh-token", None, Some(&refresh))).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["message"], "Token refreshed successfully");
        assert!(res.body["data"].is_null());
        assert_ne!(res.cookie("refresh_token"), refresh);
        assert_ne!(res.cookie("access_token"), signed_up.cookie("access_token"));
    }

    #[tokio::test]
    async fn logout_expires_both_cookies() {
        let app = app();
        let res = send(&app, request("POST", "/auth/logout", None, None)).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["message"], "Logout successful");
        let cookies = res.set_cookies();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn change_password_over_http() {
        let app = app();
        let access = sign_up(&app).await.cookie("access_token");

        let same = send(
            &app,
            request(
                "POST",
                "/auth/change-password",
                Some(json!({ "oldPassword": PASSWORD, "newPassword": PASSWORD })),
                Some(&access),
            ),
        )
        .await;
        assert_eq!(same.status, StatusCode::BAD_REQUEST);
        assert_eq!(same.body["error"]["key"], messages::SAME_PASSWORD);

        let ok = send(
            &app,
            request(
                "POST",
                "/auth/change-password",
                Some(json!({ "oldPassword": PASSWORD, "newPassword": "New@54321" })),
                Some(&access),
            ),
        )
        .await;
        assert_eq!(ok.status, StatusCode::OK);
        assert_eq!(ok.body["message"], "Password changed successfully");

        let unauthenticated = send(
            &app,
            request(
                "POST",
                "/auth/change-password",
                Some(json!({ "oldPassword": "New@54321", "newPassword": "Other@987" })),
                None,
            ),
        )
        .await;
        assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let res = send(&app, req).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"]["key"], messages::INVALID_BODY);
    }

    #[tokio::test]
    async fn missing_fields_report_the_field() {
        let app = app();
        let res = send(
            &app,
            request("POST", "/auth/signup", Some(json!({ "email": "ada@example.com" })), None),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"]["key"], messages::NOT_EMPTY);
    }

    fn logout_from(ip: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/logout")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn eleventh_request_in_a_second_is_throttled() {
        let app = app();

        for i in 0..10 {
            let res = send(&app, logout_from("203.0.113.7")).await;
            assert_eq!(res.status, StatusCode::OK, "request {i}");
        }

        let res = send(&app, logout_from("203.0.113.7")).await;
        assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(res.body["error"]["key"], messages::TOO_MANY_REQUESTS);
        assert_eq!(res.body["message"], "Too many requests");
        assert!(res.headers.get(header::RETRY_AFTER).is_some());
        assert!(res.set_cookies().is_empty());

        // Other clients keep their own budget
        let res = send(&app, logout_from("203.0.113.8")).await;
        assert_eq!(res.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn authenticated_callers_are_tracked_by_user() {
        let app = app_with(
            config().with_rate_limit(Some(RateLimitConfig::new(3, Duration::from_secs(60)))),
        );
        let access = sign_up(&app).await.cookie("access_token");

        for _ in 0..3 {
            let res = send(&app, request("GET", "/user/profile", None, Some(&access))).await;
            assert_eq!(res.status, StatusCode::OK);
        }
        let res = send(&app, request("GET", "/user/profile", None, Some(&access))).await;
        assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);

        // The anonymous budget for this client is separate: signup used one
        let res = send(&app, request("POST", "/auth/logout", None, None)).await;
        assert_eq!(res.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn throttling_can_be_disabled() {
        let app = app_with(config().with_rate_limit(None));

        for _ in 0..15 {
            let res = send(&app, logout_from("203.0.113.7")).await;
            assert_eq!(res.status, StatusCode::OK);
        }
    }
}
