//! Business result codes.
//!
//! A fixed, process-wide set established at compile time: each symbolic
//! code maps to a numeric status, a message-catalog lookup key and a
//! default message used when no translation exists. There is no dynamic
//! registration; exceptions and route declarations reference codes by
//! variant.

/// Symbolic business status paired with a numeric code and a message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Success,
    Error,
    BusinessException,
}

impl ResultCode {
    /// Every defined code, for catalog-coverage checks.
    pub const ALL: [ResultCode; 3] = [Self::Success, Self::Error, Self::BusinessException];

    /// Numeric status carried in the response envelope.
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::Error => 500,
            Self::BusinessException => 502,
        }
    }

    /// Lookup key into the message catalog.
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::BusinessException => "business.exception",
        }
    }

    /// Message used when the catalog has no translation for any locale.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::BusinessException => "business exception",
        }
    }
}
