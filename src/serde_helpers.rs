//! Deserialization helpers shared by the wire types

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field
///
/// Pair with `#[serde(default)]` so absence also yields `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
