// src/models/mod.rs

pub mod attempt;
pub mod question;
pub mod quiz;
pub mod social;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Reads an explicit JSON `null` as the type's default, like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
