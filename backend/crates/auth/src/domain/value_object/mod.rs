//! Value Object Module

pub mod display_name;
pub mod email;
pub mod user_id;
pub mod user_password;
pub mod user_status;

use kernel::error::app_error::AppError;
use kernel::i18n::Message;

/// Longest accepted email or display name, in characters
pub const MAX_TEXT_LENGTH: usize = 250;

/// 400 with the offending field named in the `key` argument
pub(crate) fn field_error(message_key: &'static str, field: &'static str) -> AppError {
    AppError::bad_request(Message::new(message_key).with_arg("key", field))
}

pub(crate) fn max_length_error(field: &'static str, length: usize) -> AppError {
    AppError::bad_request(
        Message::new(crate::messages::MAX_LENGTH)
            .with_arg("key", field)
            .with_arg("length", length),
    )
}
