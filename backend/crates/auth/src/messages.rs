//! Message keys used by the auth crate
//!
//! Keys resolve against the catalog in `kernel::i18n`.

// Success
pub const USER_CREATED: &str = "success.USER.CREATED";
pub const USER_LOGIN: &str = "success.USER.LOGIN";
pub const USER_LOGOUT: &str = "success.USER.LOGOUT";
pub const USER_REFRESH_TOKEN: &str = "success.USER.REFRESH_TOKEN";
pub const USER_CHANGE_PASSWORD: &str = "success.USER.CHANGE_PASSWORD";
pub const USER_GET_PROFILE: &str = "success.USER.GET_PROFILE";
pub const USER_UPDATE_PROFILE: &str = "success.USER.UPDATE_PROFILE";

// Errors
pub const UNAUTHORIZED: &str = "error.UNAUTHORIZED";
pub const TOKEN_EXPIRED: &str = "error.TOKEN_EXPIRED";
pub const TOO_MANY_REQUESTS: &str = "error.TOO_MANY_REQUESTS";
pub const INVALID_CREDENTIALS: &str = "error.INVALID_CREDENTIALS";
pub const INTERNAL_SERVER: &str = "error.SERVER.INTERNAL_SERVER";
pub const USER_NOT_FOUND: &str = "error.USER.NOT_FOUND";
pub const USER_EXISTS_WITH_SAME_EMAIL: &str = "error.USER.USER_EXISTS_WITH_SAME_EMAIL";
pub const ACCOUNT_NOT_ACTIVE: &str = "error.USER.ACCOUNT_NOT_ACTIVE";
pub const SAME_PASSWORD: &str = "error.PASSWORD.SAME_PASSWORD";
pub const INVALID_OLD_PASSWORD: &str = "error.PASSWORD.INVALID_OLD_PASSWORD";
pub const INVALID_PASSWORD: &str = "error.PASSWORD.INVALID_PASSWORD";
pub const INVALID_BODY: &str = "error.VALIDATION.INVALID_BODY";
pub const NOT_EMPTY: &str = "error.VALIDATION.NOT_EMPTY";
pub const IS_EMAIL: &str = "error.VALIDATION.IS_EMAIL";
pub const MIN_LENGTH: &str = "error.VALIDATION.MIN_LENGTH";
pub const MAX_LENGTH: &str = "error.VALIDATION.MAX_LENGTH";
