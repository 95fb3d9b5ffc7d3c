use serde::{Deserialize, Deserializer};

pub mod card;
pub mod favourite;
pub mod image;
pub mod vote;

/// Reads an explicit `null` the same way as a missing field.
///
/// Pair with `#[serde(default)]` on fields that are not `Option`s.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
