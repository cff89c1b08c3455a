use std::collections::HashMap;

use log::trace;
use smallvec::SmallVec;

use super::Tile;

/// 各种类牌的张数，索引见 `Tile::to_index`
pub type TileCounts = [u8; Tile::KINDS];

/// 标准胡牌型的面子数
pub const MELDS_IN_WIN: u8 = 4;

/// 胡牌拆解中的一组牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// 顺子（连续三张同花色数牌），记录最小的一张
    Sequence { start: Tile },
    /// 刻子（三张相同牌）
    Triplet { tile: Tile },
    /// 雀头
    Pair { tile: Tile },
}

/// 一种胡牌拆解：1 个雀头 + 若干面子
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub pair: Tile,
    pub groups: SmallVec<[Group; 4]>,
}

/// 由若干张牌统计张数
pub fn counts_of<'a, I>(tiles: I) -> TileCounts
where
    I: IntoIterator<Item = &'a Tile>,
{
    let mut counts = [0u8; Tile::KINDS];
    for tile in tiles {
        counts[tile.to_index()] += 1;
    }
    counts
}

/// 判定剩余牌能否恰好拆成 `melds_needed` 个面子 + 1 个雀头
///
/// 张数必须正好是 `3 * melds_needed + 2`，所以 13 张牌永远不能胡
pub fn is_complete(counts: &TileCounts, melds_needed: u8) -> bool {
    decompose(counts, melds_needed).is_some()
}

/// 同 `is_complete`，并返回找到的第一种拆解
pub fn decompose(counts: &TileCounts, melds_needed: u8) -> Option<Decomposition> {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    if total != 3 * melds_needed as usize + 2 {
        return None;
    }

    let mut work = *counts;
    let mut path: SmallVec<[Group; 5]> = SmallVec::new();
    if !search(&mut work, melds_needed, false, &mut path) {
        return None;
    }

    let mut pair = None;
    let mut groups = SmallVec::new();
    for group in path {
        match group {
            Group::Pair { tile } => pair = Some(tile),
            other => groups.push(other),
        }
    }
    pair.map(|pair| Decomposition { pair, groups })
}

/// 14 张牌是否胡牌（4 面子 + 1 雀头）
pub fn is_win(tiles: &[Tile]) -> bool {
    tiles.len() == 14 && is_complete(&counts_of(tiles), MELDS_IN_WIN)
}

/// 假设再摸到 `picked` 后是否胡牌，不修改输入
pub fn is_win_with(tiles: &[Tile], picked: Tile) -> bool {
    let mut counts = counts_of(tiles);
    counts[picked.to_index()] += 1;
    tiles.len() == 13 && is_complete(&counts, MELDS_IN_WIN)
}

/// 听牌：加入哪些牌后能够胡牌
///
/// 已经持有 4 张的牌不计入
pub fn waiting_tiles(counts: &TileCounts, melds_needed: u8) -> SmallVec<[Tile; 8]> {
    let mut result = SmallVec::new();
    let mut work = *counts;
    for index in 0..Tile::KINDS {
        if work[index] >= Tile::COPIES {
            continue;
        }
        work[index] += 1;
        if is_complete(&work, melds_needed) {
            if let Some(tile) = Tile::from_index(index) {
                result.push(tile);
            }
        }
        work[index] -= 1;
    }
    result
}

/// 递归回溯：每次取最小的剩余牌，依次尝试刻子、顺子、雀头
///
/// 分支前减去张数、返回前加回（撤销），成功时 `path` 保留拆解
fn search(
    counts: &mut TileCounts,
    melds_left: u8,
    pair_used: bool,
    path: &mut SmallVec<[Group; 5]>,
) -> bool {
    let Some(index) = counts.iter().position(|&c| c > 0) else {
        return melds_left == 0 && pair_used;
    };
    let Some(tile) = Tile::from_index(index) else {
        return false;
    };

    // 刻子
    if melds_left > 0 && counts[index] >= 3 {
        counts[index] -= 3;
        path.push(Group::Triplet { tile });
        let found = search(counts, melds_left - 1, pair_used, path);
        counts[index] += 3;
        if found {
            return true;
        }
        path.pop();
    }

    // 顺子：只限数牌，不跨花色（index % 9 <= 6 即点数 1-7 起头）
    if melds_left > 0
        && tile.suit().is_numbered()
        && index % 9 <= 6
        && counts[index + 1] > 0
        && counts[index + 2] > 0
    {
        counts[index] -= 1;
        counts[index + 1] -= 1;
        counts[index + 2] -= 1;
        path.push(Group::Sequence { start: tile });
        let found = search(counts, melds_left - 1, pair_used, path);
        counts[index] += 1;
        counts[index + 1] += 1;
        counts[index + 2] += 1;
        if found {
            return true;
        }
        path.pop();
    }

    // 雀头：每条路径最多一次
    if !pair_used && counts[index] >= 2 {
        counts[index] -= 2;
        path.push(Group::Pair { tile });
        let found = search(counts, melds_left, true, path);
        counts[index] += 2;
        if found {
            return true;
        }
        path.pop();
    }

    false
}

/// 胡牌判定器
///
/// 在 `is_complete` 之上加一层结果缓存，键为张数数组的打包值
pub struct WinChecker {
    /// 结果缓存
    result_cache: HashMap<u128, bool>,
    /// 最大缓存大小（超过后清空）
    max_cache_size: usize,
}

impl WinChecker {
    pub fn new() -> Self {
        Self::with_cache_size(1000)
    }

    pub fn with_cache_size(max_cache_size: usize) -> Self {
        Self {
            result_cache: HashMap::new(),
            max_cache_size,
        }
    }

    /// 带缓存的 `is_complete`
    pub fn check(&mut self, counts: &TileCounts, melds_needed: u8) -> bool {
        let key = Self::cache_key(counts, melds_needed);
        if let Some(&cached) = self.result_cache.get(&key) {
            return cached;
        }

        trace!("win check cache miss");
        let result = is_complete(counts, melds_needed);
        if self.result_cache.len() >= self.max_cache_size {
            self.result_cache.clear();
        }
        self.result_cache.insert(key, result);
        result
    }

    /// 每种牌 3 位（0-4），34 种共 102 位，高位放面子数
    fn cache_key(counts: &TileCounts, melds_needed: u8) -> u128 {
        let mut key = 0u128;
        for &count in counts {
            key = (key << 3) | (count & 0b111) as u128;
        }
        key | ((melds_needed as u128) << 120)
    }

    pub fn clear_cache(&mut self) {
        self.result_cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.result_cache.len()
    }
}

impl Default for WinChecker {
    fn default() -> Self {
        Self::new()
    }
}
