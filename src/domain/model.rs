use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest and highest national number kept in the roster.
pub const FIRST_ENTRY: u32 = 1;
pub const LAST_ENTRY: u32 = 151;

/// Display order for base stats. Keys match the title-cased names in
/// [`RecordDetail::stats`].
pub const STAT_ORDER: [&str; 6] = [
    "Hp",
    "Attack",
    "Defense",
    "Special Attack",
    "Special Defense",
    "Speed",
];

pub const UNKNOWN_GENUS: &str = "Unknown Pokémon";
pub const NO_FLAVOR_TEXT: &str = "No Pokédex entry found.";

// 图鉴列表条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,     // 显示名, e.g. "Mr Mime"
    pub api_name: String, // 查询键, e.g. "mr-mime"
}

// 单个条目的完整信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDetail {
    pub id: u32,
    pub name: String,
    pub height_m: f64,
    pub weight_kg: f64,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: HashMap<String, i64>,
    pub genus: String,
    pub flavor_text: String,
    pub image_url: Option<String>,
    pub cry_url: Option<String>,
}

impl RecordDetail {
    /// Stat rows in display order; `None` marks a stat the source omitted.
    pub fn ordered_stats(&self) -> Vec<(&'static str, Option<i64>)> {
        STAT_ORDER
            .iter()
            .map(|name| (*name, self.stats.get(*name).copied()))
            .collect()
    }
}

/// Raw sprite payload. Cloning shares the underlying buffer.
pub type ImageBytes = Bytes;
