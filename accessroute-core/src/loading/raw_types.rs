use serde::Deserialize;

use super::de::{deserialize_flag, deserialize_mode};
use crate::model::TransportMode;

/// Node row reduced to the fields the graph keeps
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

/// Edge row, deserialized by position:
/// `from,to,time_minutes,transfer,stairs,bad_sidewalk,flood_risk,mode`
#[derive(Debug, Clone, Deserialize)]
pub struct RawEdge {
    pub from: String,
    pub to: String,
    pub time_minutes: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub transfer: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub stairs: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub bad_sidewalk: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub flood_risk: bool,
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: TransportMode,
}
