use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::constants::{DEFAULT_DEAD_WALL, DEFAULT_ROUND_COUNT};
use crate::game::wind::Wind;
use crate::tile::TileSetType;

/// 牌桌配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub tile_set: TileSetType,
    /// 是否开启宝牌指示牌
    pub enable_dora: bool,
    /// 王牌张数
    pub dead_wall_size: usize,
    /// 每局第一个行动的座位
    pub starting_wind: Wind,
    /// 洗牌种子，`None` 时使用系统熵
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tile_set: TileSetType::Japanese,
            enable_dora: false,
            dead_wall_size: DEFAULT_DEAD_WALL,
            starting_wind: Wind::East,
            seed: None,
        }
    }
}

/// 对局配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// 对局局数
    pub round_count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            round_count: DEFAULT_ROUND_COUNT,
        }
    }
}

impl GameConfig {
    /// 从 JSON 字符串读取，缺省字段使用默认值
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.round_count, 500);
        assert_eq!(config.board.dead_wall_size, 14);
        assert_eq!(config.board.tile_set, TileSetType::Japanese);
        assert_eq!(config.board.starting_wind, Wind::East);
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json_str(
            r#"{ "round_count": 20, "board": { "seed": 7, "starting_wind": "West" } }"#,
        )
        .unwrap();
        assert_eq!(config.round_count, 20);
        assert_eq!(config.board.seed, Some(7));
        assert_eq!(config.board.starting_wind, Wind::West);
        assert_eq!(config.board.dead_wall_size, 14);
    }

    #[test]
    fn test_bad_json() {
        let result = GameConfig::from_json_str("{ \"round_count\": \"many\" }");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_competitive_parses() {
        let config =
            GameConfig::from_json_str(r#"{ "board": { "tile_set": "Competitive" } }"#).unwrap();
        assert_eq!(config.board.tile_set, TileSetType::Competitive);
    }
}
