//! Decoding helpers for the backend's JSON.
//!
//! The backend writes unset slices, strings and nested objects as `null`
//! rather than leaving them out, so `#[serde(default)]` alone is not enough.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing field is defaulted too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
