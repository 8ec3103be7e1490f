use serde::Deserialize;

use crate::model::TransportMode;

/// Integer barrier flag: zero is false, any other integer is true
pub(super) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse::<i64>()
        .map(|value| value != 0)
        .map_err(|_| serde::de::Error::custom(format!("invalid barrier flag '{raw}'")))
}

pub(super) fn deserialize_mode<'de, D>(deserializer: D) -> Result<TransportMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(TransportMode::parse(&raw))
}
