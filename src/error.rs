//! Error codes shared by every error enum in the crate.

/// Grepable error code and retryable flag for user-facing error output.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
