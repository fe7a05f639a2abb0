//! Auth Router
//!
//! Routes are declared in one table together with their access flag; the
//! guard is layered onto each route from that flag.

use axum::{
    Router, middleware,
    routing::{MethodRouter, get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserDirectory;
use crate::infra::postgres::PgUserDirectory;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{GuardState, RouteAccess, auth_guard};
use crate::presentation::throttle::Throttle;

/// One row of the route table
pub struct RouteEntry<R>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    pub path: &'static str,
    pub access: RouteAccess,
    pub handler: MethodRouter<AuthAppState<R>>,
}

impl<R> RouteEntry<R>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    fn new(path: &'static str, access: RouteAccess, handler: MethodRouter<AuthAppState<R>>) -> Self {
        Self {
            path,
            access,
            handler,
        }
    }
}

/// Every auth and user route, relative to the API prefix
pub fn route_table<R>() -> Vec<RouteEntry<R>>
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    use RouteAccess::{Protected, Public};

    vec![
        RouteEntry::new("/auth/signup", Public, post(handlers::sign_up::<R>)),
        RouteEntry::new("/auth/login", Public, post(handlers::login::<R>)),
        RouteEntry::new("/auth/refresh-token", Public, post(handlers::refresh_token::<R>)),
        RouteEntry::new("/auth/logout", Public, post(handlers::logout::<R>)),
        RouteEntry::new(
            "/auth/change-password",
            Protected,
            post(handlers::change_password::<R>),
        ),
        RouteEntry::new(
            "/user/profile",
            Protected,
            get(handlers::get_profile::<R>).put(handlers::update_profile::<R>),
        ),
    ]
}

/// Create the Auth router with PostgreSQL user directory
pub fn auth_router(directory: PgUserDirectory, config: AuthConfig) -> Router {
    auth_router_generic(directory, config)
}

/// Create a generic Auth router for any user directory implementation
pub fn auth_router_generic<R>(directory: R, config: AuthConfig) -> Router
where
    R: UserDirectory + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        directory: Arc::new(directory),
        throttle: config.rate_limit.map(Throttle::new),
        config: Arc::new(config),
    };

    let router = route_table::<R>()
        .into_iter()
        .fold(Router::<AuthAppState<R>>::new(), |router, entry| {
            let guard = GuardState {
                app: state.clone(),
                access: entry.access,
            };
            router.route(
                entry.path,
                entry
                    .handler
                    .route_layer(middleware::from_fn_with_state(guard, auth_guard::<R>)),
            )
        });

    router.with_state(state)
}
