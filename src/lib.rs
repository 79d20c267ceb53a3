//! Demo web service: localized failure envelopes over a uniform API
//! response shape, plus a name-based user lookup backed by SQLite.
//!
//! Failures of any kind are caught at a single boundary middleware and
//! converted into `{"success": false, "code": ..., "message": ...}`
//! envelopes, with the message localized for the locale derived from the
//! request's `Accept-Language` header.

pub mod api;
pub mod codes;
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod response;
