/// 游戏常量定义

/// 玩家数量
pub const NUM_PLAYERS: usize = 4;

/// 日本麻将牌组总张数（34 种 × 4 张）
pub const TOTAL_TILES: usize = 136;

/// 每人起手张数
pub const HAND_SIZE: usize = 13;

/// 起手发牌总张数
pub const DEAL_TILES: usize = NUM_PLAYERS * HAND_SIZE;

/// 默认王牌张数
pub const DEFAULT_DEAD_WALL: usize = 14;

/// 默认对局局数
pub const DEFAULT_ROUND_COUNT: u32 = 500;
