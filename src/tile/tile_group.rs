use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::tile::{parse_token, Location, Tile};
use crate::error::ParseTileError;

/// 有序牌组
///
/// 始终按 `(suit, rank)` 排序，每种牌最多 4 张
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TileGroup {
    tiles: Vec<Tile>,
}

impl TileGroup {
    /// 创建空牌组
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// 由若干张牌创建牌组
    ///
    /// 某种牌超过 4 张时返回错误
    pub fn from_tiles<I>(tiles: I) -> Result<Self, ParseTileError>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut group = Self::new();
        for tile in tiles {
            if !group.add_tile(tile) {
                return Err(ParseTileError::TooManyCopies(tile));
            }
        }
        Ok(group)
    }

    /// 添加一张牌并保持有序
    ///
    /// # Returns
    ///
    /// - `true`：成功添加
    /// - `false`：该牌已有 4 张
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if self.count(&tile) >= Tile::COPIES {
            return false;
        }
        // 插入到相同牌之后，保持稳定
        let position = self.tiles.partition_point(|t| t <= &tile);
        self.tiles.insert(position, tile.with_location(Location::Hand));
        true
    }

    /// 移除一张相同的牌
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let position = self.tiles.iter().position(|t| t == tile)?;
        Some(self.tiles.remove(position))
    }

    /// 按索引移除
    pub fn remove_at(&mut self, index: usize) -> Option<Tile> {
        if index < self.tiles.len() {
            Some(self.tiles.remove(index))
        } else {
            None
        }
    }

    /// 某种牌的张数
    pub fn count(&self, tile: &Tile) -> u8 {
        self.tiles.iter().filter(|t| *t == tile).count() as u8
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.tiles.binary_search(tile).is_ok()
    }

    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// 重新排序（稳定排序）
    ///
    /// 所有插入操作都已保持有序，这里只用于外部批量修改之后
    pub fn sort(&mut self) {
        self.tiles.sort();
    }

    /// 各种类牌的张数（索引见 `Tile::to_index`）
    pub fn counts(&self) -> [u8; Tile::KINDS] {
        let mut counts = [0u8; Tile::KINDS];
        for tile in &self.tiles {
            counts[tile.to_index()] += 1;
        }
        counts
    }

    /// 可以和 `tile` 组成顺子的两张牌组合
    ///
    /// 只对数牌有效，字牌永远返回空
    pub fn can_chi(&self, tile: &Tile) -> SmallVec<[[Tile; 2]; 3]> {
        let mut result = SmallVec::new();
        if !tile.suit().is_numbered() {
            return result;
        }
        let rank = tile.rank();
        // 三种位置：tile 在顺子的头、中、尾
        for start in [rank.saturating_sub(2), rank.saturating_sub(1), rank] {
            if start < Tile::MIN_RANK || start + 2 > Tile::MAX_RANK {
                continue;
            }
            let others: SmallVec<[Tile; 2]> = (start..start + 3)
                .filter(|&r| r != rank)
                .filter_map(|r| Tile::new(tile.suit(), r))
                .collect();
            if others.len() == 2 && others.iter().all(|t| self.contains(t)) {
                result.push([others[0], others[1]]);
            }
        }
        result
    }

    /// 手中至少有 2 张相同的牌
    pub fn can_pong(&self, tile: &Tile) -> bool {
        self.count(tile) >= 2
    }

    /// 手中至少有 3 张相同的牌
    pub fn can_kang(&self, tile: &Tile) -> bool {
        self.count(tile) >= 3
    }

    /// 可读形式，用于控制台显示
    pub fn printable(&self) -> String {
        self.tiles
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for TileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

impl FromStr for TileGroup {
    type Err = ParseTileError;

    /// 解析连续记号，例如 `C1C1C1D5D5D5B7B7`，允许空白分隔
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().filter(|c| !c.is_whitespace());
        let mut group = Self::new();
        while let Some(marker) = chars.next() {
            let digit = chars.next().ok_or(ParseTileError::Truncated)?;
            let tile = parse_token(marker, digit)?;
            if !group.add_tile(tile) {
                return Err(ParseTileError::TooManyCopies(tile));
            }
        }
        Ok(group)
    }
}

impl<'a> IntoIterator for &'a TileGroup {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
