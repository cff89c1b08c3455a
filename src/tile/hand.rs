use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use super::tile::{Location, Tile};
use super::tile_group::TileGroup;
use super::win_check::{self, TileCounts, MELDS_IN_WIN};
use crate::error::ParseTileError;

/// 杠类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum KongType {
    /// 直杠（别人打出的牌）
    Direct,
    /// 加杠（已碰的刻子加上第四张）
    Added,
    /// 暗杠（手中四张）
    Concealed,
}

/// 副露牌组
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Meld {
    /// 吃（顺子），按点数排序
    Sequence { tiles: [Tile; 3] },
    /// 碰（刻子）
    Triplet { tile: Tile },
    /// 杠
    Kong { tile: Tile, kind: KongType },
}

impl Meld {
    /// 该组包含的牌数
    pub fn tile_count(&self) -> usize {
        match self {
            Meld::Kong { .. } => 4,
            _ => 3,
        }
    }

    /// 该组的所有牌（位置标签为已副露）
    pub fn tiles(&self) -> SmallVec<[Tile; 4]> {
        let revealed = |t: Tile| t.with_location(Location::Revealed);
        match *self {
            Meld::Sequence { tiles } => tiles.iter().map(|&t| revealed(t)).collect(),
            Meld::Triplet { tile } => SmallVec::from_elem(revealed(tile), 3),
            Meld::Kong { tile, .. } => SmallVec::from_elem(revealed(tile), 4),
        }
    }

    /// 是否为暗杠（不破坏门清）
    pub fn is_concealed(&self) -> bool {
        matches!(self, Meld::Kong { kind: KongType::Concealed, .. })
    }
}

/// 手牌
///
/// 暗手牌是一个 `TileGroup`，副露另行记录。回合之间暗手 + 副露折算为 13 张，
/// 摸牌或鸣牌之后、出牌之前为 14 张
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    concealed: TileGroup,
    melds: SmallVec<[Meld; 4]>,
    /// 只有自摸和牌那次摸牌才会设置
    tsumo: bool,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 由暗手牌创建
    pub fn from_group(concealed: TileGroup) -> Self {
        Self {
            concealed,
            ..Self::default()
        }
    }

    /// 暗手牌
    pub fn concealed(&self) -> &TileGroup {
        &self.concealed
    }

    pub fn tiles(&self) -> &[Tile] {
        self.concealed.tiles()
    }

    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    /// 暗手牌张数
    pub fn len(&self) -> usize {
        self.concealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concealed.is_empty() && self.melds.is_empty()
    }

    /// 暗手 + 副露的实际张数（杠算 4 张）
    pub fn physical_count(&self) -> usize {
        self.concealed.len() + self.melds.iter().map(Meld::tile_count).sum::<usize>()
    }

    /// 还需要的面子数
    pub fn melds_needed(&self) -> u8 {
        MELDS_IN_WIN.saturating_sub(self.melds.len() as u8)
    }

    //
    // 游戏动作
    //

    /// 摸一张牌
    pub fn pick_tile(&mut self, tile: Tile) -> bool {
        self.concealed.add_tile(tile)
    }

    /// 打出一张相同的牌
    pub fn discard_tile(&mut self, tile: &Tile) -> Option<Tile> {
        self.concealed
            .remove_tile(tile)
            .map(|t| t.with_location(Location::Discarded))
    }

    /// 按索引打出（索引按排序后的暗手牌）
    pub fn discard_index(&mut self, index: usize) -> Option<Tile> {
        self.concealed
            .remove_at(index)
            .map(|t| t.with_location(Location::Discarded))
    }

    /// 吃：`tile` 是别人打出的牌，`with` 是手中组成顺子的两张
    pub fn chi(&mut self, tile: Tile, with: [Tile; 2]) -> bool {
        if !tile.can_form_sequence(&with[0], &with[1]) {
            return false;
        }
        let available = if with[0] == with[1] {
            false
        } else {
            with.iter().all(|t| self.concealed.contains(t))
        };
        if !available {
            return false;
        }
        for t in &with {
            self.concealed.remove_tile(t);
        }
        let mut tiles = [tile, with[0], with[1]];
        tiles.sort();
        self.melds.push(Meld::Sequence { tiles });
        true
    }

    /// 碰：从手中移除两张相同的牌
    pub fn pong(&mut self, tile: Tile) -> bool {
        if !self.concealed.can_pong(&tile) {
            return false;
        }
        for _ in 0..2 {
            self.concealed.remove_tile(&tile);
        }
        self.melds.push(Meld::Triplet { tile });
        true
    }

    /// 直杠：别人打出第四张，从手中移除三张
    pub fn kang(&mut self, tile: Tile) -> bool {
        if !self.concealed.can_kang(&tile) {
            return false;
        }
        for _ in 0..3 {
            self.concealed.remove_tile(&tile);
        }
        self.melds.push(Meld::Kong {
            tile,
            kind: KongType::Direct,
        });
        true
    }

    /// 加杠：已碰的刻子加上手中的第四张
    pub fn added_kang(&mut self, tile: Tile) -> bool {
        let Some(position) = self.triplet_position(&tile) else {
            return false;
        };
        if self.concealed.remove_tile(&tile).is_none() {
            return false;
        }
        self.melds[position] = Meld::Kong {
            tile,
            kind: KongType::Added,
        };
        true
    }

    /// 暗杠：手中四张相同的牌
    pub fn concealed_kang(&mut self, tile: Tile) -> bool {
        if self.concealed.count(&tile) < Tile::COPIES {
            return false;
        }
        for _ in 0..4 {
            self.concealed.remove_tile(&tile);
        }
        self.melds.push(Meld::Kong {
            tile,
            kind: KongType::Concealed,
        });
        true
    }

    fn triplet_position(&self, tile: &Tile) -> Option<usize> {
        self.melds
            .iter()
            .position(|m| matches!(m, Meld::Triplet { tile: t } if t == tile))
    }

    //
    // 查询
    //

    pub fn can_chi(&self, tile: &Tile) -> SmallVec<[[Tile; 2]; 3]> {
        self.concealed.can_chi(tile)
    }

    pub fn can_pong(&self, tile: &Tile) -> bool {
        self.concealed.can_pong(tile)
    }

    pub fn can_kang(&self, tile: &Tile) -> bool {
        self.concealed.can_kang(tile)
    }

    pub fn can_added_kang(&self, tile: &Tile) -> bool {
        self.triplet_position(tile).is_some() && self.concealed.contains(tile)
    }

    pub fn can_concealed_kang(&self, tile: &Tile) -> bool {
        self.concealed.count(tile) >= Tile::COPIES
    }

    /// 手牌是否胡牌
    ///
    /// 暗手牌必须恰好拆成剩余面子 + 1 个雀头
    pub fn test_win(&self) -> bool {
        win_check::is_complete(&self.concealed.counts(), self.melds_needed())
    }

    /// 假设再加入 `picked` 后是否胡牌，不修改手牌
    pub fn test_win_with(&self, picked: Tile) -> bool {
        let mut counts: TileCounts = self.concealed.counts();
        counts[picked.to_index()] += 1;
        win_check::is_complete(&counts, self.melds_needed())
    }

    /// 听哪些牌
    pub fn waiting_tiles(&self) -> SmallVec<[Tile; 8]> {
        win_check::waiting_tiles(&self.concealed.counts(), self.melds_needed())
    }

    /// 打出 `tile` 后能否立直：门清（只允许暗杠）且打出后听牌
    pub fn can_richii(&self, tile: &Tile) -> bool {
        if !self.melds.iter().all(Meld::is_concealed) || !self.concealed.contains(tile) {
            return false;
        }
        let mut counts = self.concealed.counts();
        counts[tile.to_index()] -= 1;
        !win_check::waiting_tiles(&counts, self.melds_needed()).is_empty()
    }

    pub fn set_tsumo(&mut self) {
        self.tsumo = true;
    }

    pub fn is_tsumo(&self) -> bool {
        self.tsumo
    }

    /// 清空（每局开始时）
    pub fn clear(&mut self) {
        self.concealed.clear();
        self.melds.clear();
        self.tsumo = false;
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.concealed)?;
        for meld in &self.melds {
            write!(f, " [")?;
            for tile in meld.tiles() {
                write!(f, "{}", tile)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_group(s.parse()?))
    }
}
