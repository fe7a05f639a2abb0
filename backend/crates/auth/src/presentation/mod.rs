//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod throttle;

pub use handlers::AuthAppState;
pub use middleware::{GuardOutcome, GuardState, RouteAccess, auth_guard, authorize};
pub use router::{RouteEntry, auth_router, auth_router_generic, route_table};
pub use throttle::{Throttle, throttle_key};
