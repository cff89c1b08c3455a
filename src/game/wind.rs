use std::fmt;

use serde::{Deserialize, Serialize};

/// 座位（风位）
///
/// 出牌顺序固定为 东 → 南 → 西 → 北 → 东
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Wind {
    #[default]
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    /// 所有座位（固定顺序）
    pub fn all() -> [Wind; 4] {
        [Wind::East, Wind::South, Wind::West, Wind::North]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Wind> {
        Wind::all().get(index).copied()
    }

    /// 下家
    pub fn next(self) -> Wind {
        Wind::all()[(self.index() + 1) % 4]
    }

    /// 从 `from` 出发按出牌方向到 `self` 的距离（0-3）
    pub fn distance_from(self, from: Wind) -> usize {
        (self.index() + 4 - from.index()) % 4
    }

    /// 从 `start` 开始的一圈座位
    pub fn rotation_from(start: Wind) -> [Wind; 4] {
        let mut seats = [start; 4];
        for i in 1..4 {
            seats[i] = seats[i - 1].next();
        }
        seats
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Wind::East => "East",
            Wind::South => "South",
            Wind::West => "West",
            Wind::North => "North",
        };
        f.write_str(name)
    }
}
