// =====================================================================
// File: error.rs
//
//! [`MapError`] covers the "hard," `Result`-returning edge of the map's
//! lookup/removal surface: [`crate::SplayMap::get_or_err`],
//! [`crate::SplayMap::try_remove`], and [`crate::SplayMap::try_key_for_value`]
//! all report a missing key/value through it rather than an `Option`. The
//! plain `Option`-returning operations ([`crate::SplayMap::get`],
//! [`crate::SplayMap::remove`], ...) are unaffected; both styles stay
//! available side by side.
// =====================================================================

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError<K>
where
    K: fmt::Debug,
{
    #[error("key not found: {0:?}")]
    KeyNotFound(K),

    #[error("no entry holds the given value")]
    ValueNotFound,
}
