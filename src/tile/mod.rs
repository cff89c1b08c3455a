/// 牌相关模块
///
/// 包含牌（Tile）、牌组（TileGroup）、手牌（Hand）、胡牌判定和牌堆（TileStack）

pub mod tile;
pub mod tile_group;
pub mod hand;
pub mod win_check;
pub mod tile_stack;

// 重新导出常用类型
pub use tile::{Tile, Suit, Location};
pub use tile_group::TileGroup;
pub use hand::{Hand, Meld, KongType};
pub use tile_stack::{TileStack, TileSetType};
pub use win_check::{WinChecker, Group, Decomposition, is_win, is_win_with};
