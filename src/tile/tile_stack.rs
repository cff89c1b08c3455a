use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::tile::{Location, Suit, Tile};
use crate::error::ConfigError;
use crate::game::constants::DEAL_TILES;

/// 牌组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileSetType {
    /// 日本麻将 136 张：万筒条各 1-9 × 4，字牌 1-7 × 4
    #[default]
    Japanese,
    /// 竞技麻将牌组（未实现）
    Competitive,
}

impl TileSetType {
    /// 生成完整的牌组（未洗牌）
    pub fn build(self) -> Result<Vec<Tile>, ConfigError> {
        match self {
            TileSetType::Japanese => {
                let mut tiles = Vec::with_capacity(136);
                for suit in Suit::all() {
                    for rank in Tile::MIN_RANK..=suit.max_rank() {
                        for _ in 0..Tile::COPIES {
                            if let Some(tile) = Tile::new(suit, rank) {
                                tiles.push(tile);
                            }
                        }
                    }
                }
                Ok(tiles)
            }
            TileSetType::Competitive => Err(ConfigError::UnsupportedTileSet(self)),
        }
    }
}

/// 牌堆
///
/// 从末尾摸牌；开头的 `dead_wall` 张为王牌，永远不会被摸到。
/// 只剩王牌时 `is_empty()` 即为真
#[derive(Debug, Clone)]
pub struct TileStack {
    tiles: Vec<Tile>,
    tile_set: TileSetType,
    enable_dora: bool,
    dead_wall: usize,
    rng: ChaCha8Rng,
}

impl TileStack {
    /// 创建并洗好一副牌
    ///
    /// `seed` 为 `None` 时使用系统熵
    pub fn new(
        tile_set: TileSetType,
        enable_dora: bool,
        dead_wall: usize,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut stack = Self {
            tiles: Vec::new(),
            tile_set,
            enable_dora,
            dead_wall,
            rng,
        };
        stack.setup(tile_set, enable_dora, dead_wall)?;
        Ok(stack)
    }

    /// 按给定顺序摸牌的牌堆（用于固定牌局）
    ///
    /// `draws[0]` 最先被摸到；`dead_wall` 为王牌
    pub fn from_draw_order(draws: Vec<Tile>, dead_wall: Vec<Tile>) -> Self {
        let reserve = dead_wall.len();
        let mut tiles: Vec<Tile> = dead_wall
            .into_iter()
            .map(|t| t.with_location(Location::DeadWall))
            .collect();
        tiles.extend(draws.into_iter().rev());
        Self {
            tiles,
            tile_set: TileSetType::Japanese,
            enable_dora: false,
            dead_wall: reserve,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    /// 重新生成牌组、洗牌，并记录王牌张数
    pub fn setup(
        &mut self,
        tile_set: TileSetType,
        enable_dora: bool,
        dead_wall: usize,
    ) -> Result<(), ConfigError> {
        let mut tiles = tile_set.build()?;
        if dead_wall + DEAL_TILES > tiles.len() {
            return Err(ConfigError::InvalidDeadWall {
                dead_wall,
                total: tiles.len(),
            });
        }

        tiles.shuffle(&mut self.rng);
        for tile in tiles.iter_mut().take(dead_wall) {
            *tile = tile.with_location(Location::DeadWall);
        }

        self.tiles = tiles;
        self.tile_set = tile_set;
        self.enable_dora = enable_dora;
        self.dead_wall = dead_wall;
        Ok(())
    }

    /// 以相同配置重新洗牌
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.setup(self.tile_set, self.enable_dora, self.dead_wall)
    }

    /// 摸一张牌
    ///
    /// 只剩王牌时返回 `None`；状态机应先检查 `is_empty()`
    pub fn draw_tile(&mut self) -> Option<Tile> {
        if self.is_empty() {
            return None;
        }
        self.tiles.pop()
    }

    /// 是否只剩王牌
    pub fn is_empty(&self) -> bool {
        self.tiles.len() <= self.dead_wall
    }

    /// 掷骰子（1-6），与摸牌无关
    pub fn throw_dice(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    /// 宝牌指示牌（王牌第一张），未开启宝牌时为 `None`
    pub fn dora_indicator(&self) -> Option<Tile> {
        if self.enable_dora && self.dead_wall > 0 {
            self.tiles.first().copied()
        } else {
            None
        }
    }

    /// 剩余总张数（包括王牌）
    pub fn remaining_count(&self) -> usize {
        self.tiles.len()
    }

    /// 还能摸的张数
    pub fn live_count(&self) -> usize {
        self.tiles.len().saturating_sub(self.dead_wall)
    }

    pub fn dead_wall_count(&self) -> usize {
        self.dead_wall
    }

    pub fn tile_set(&self) -> TileSetType {
        self.tile_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_japanese_tile_set() {
        let stack = TileStack::new(TileSetType::Japanese, false, 14, Some(1)).unwrap();
        assert_eq!(stack.remaining_count(), 136);
        assert_eq!(stack.live_count(), 122);

        let mut counts = HashMap::new();
        for tile in &stack.tiles {
            *counts.entry((tile.suit(), tile.rank())).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 34);
        assert!(counts.values().all(|&c| c == 4));
    }

    #[test]
    fn test_competitive_is_unsupported() {
        let result = TileStack::new(TileSetType::Competitive, false, 0, Some(1));
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedTileSet(TileSetType::Competitive))
        ));
    }

    #[test]
    fn test_dead_wall_too_large() {
        let result = TileStack::new(TileSetType::Japanese, false, 100, Some(1));
        assert!(matches!(result, Err(ConfigError::InvalidDeadWall { .. })));
    }

    #[test]
    fn test_empty_at_dead_wall_reserve() {
        let mut stack = TileStack::new(TileSetType::Japanese, false, 14, Some(7)).unwrap();
        let mut drawn = 0;
        while !stack.is_empty() {
            let tile = stack.draw_tile().unwrap();
            assert_ne!(tile.location(), Location::DeadWall);
            drawn += 1;
        }
        assert_eq!(drawn, 122);
        assert_eq!(stack.remaining_count(), 14);
        assert!(stack.draw_tile().is_none());
        assert_eq!(stack.remaining_count(), 14);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = TileStack::new(TileSetType::Japanese, false, 14, Some(42)).unwrap();
        let mut b = TileStack::new(TileSetType::Japanese, false, 14, Some(42)).unwrap();
        for _ in 0..20 {
            assert_eq!(a.draw_tile(), b.draw_tile());
        }
    }

    #[test]
    fn test_reset_restores_full_set() {
        let mut stack = TileStack::new(TileSetType::Japanese, true, 14, Some(3)).unwrap();
        for _ in 0..30 {
            stack.draw_tile();
        }
        stack.reset().unwrap();
        assert_eq!(stack.remaining_count(), 136);
        assert_eq!(stack.dead_wall_count(), 14);
    }

    #[test]
    fn test_dora_indicator() {
        let stack = TileStack::new(TileSetType::Japanese, true, 14, Some(3)).unwrap();
        let indicator = stack.dora_indicator().unwrap();
        assert_eq!(indicator.location(), Location::DeadWall);

        let stack = TileStack::new(TileSetType::Japanese, false, 14, Some(3)).unwrap();
        assert!(stack.dora_indicator().is_none());
    }

    #[test]
    fn test_throw_dice_range() {
        let mut stack = TileStack::new(TileSetType::Japanese, false, 0, Some(9)).unwrap();
        for _ in 0..200 {
            let value = stack.throw_dice();
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn test_from_draw_order() {
        let mut stack = TileStack::from_draw_order(
            vec![Tile::character(1), Tile::dot(2)],
            vec![Tile::special(7)],
        );
        assert_eq!(stack.draw_tile(), Some(Tile::character(1)));
        assert_eq!(stack.draw_tile(), Some(Tile::dot(2)));
        assert!(stack.is_empty());
        assert_eq!(stack.draw_tile(), None);
    }
}
