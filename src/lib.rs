/// 四人麻将规则引擎
///
/// 胡牌判定（递归拆解）与出牌后的响应仲裁状态机

pub mod tile;
pub mod game;
pub mod engine;
pub mod bots;
pub mod config;
pub mod error;

// 重新导出常用类型
pub use tile::{Tile, Suit, Location, TileGroup, Hand, Meld, KongType, TileStack, TileSetType, WinChecker};
pub use game::wind::Wind;
pub use game::action::{Action, ActionKind};
pub use game::player::{Player, PlayerView, FnPlayer};
pub use game::lifecycle::{GameCallbacks, RoundOutcome};
pub use game::board::Board;
pub use game::simple_game::{SimpleGame, GameStats};
pub use engine::action_mask::ActionMask;
pub use config::{BoardConfig, GameConfig};
pub use error::{ConfigError, GameError, ParseTileError, StrategyError};
