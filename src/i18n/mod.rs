//! Internationalization (i18n) module.
//!
//! All locale handling and localized text lives here:
//!
//! - `locale`: per-request locale derivation from the `Accept-Language` header
//! - `catalog`: the immutable, startup-loaded message catalog with
//!   default-locale fallback and positional argument substitution
//!
//! The catalog is built once at boot and shared read-only across requests,
//! so resolution is safe to call concurrently without locking.

mod catalog;
mod locale;

pub use catalog::{MessageCatalog, MessageError};
pub use locale::Locale;
