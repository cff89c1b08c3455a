/// 脚本化玩家策略
///
/// 包括几个简单机器人和控制台（人类输入）玩家

pub mod discard_first;
pub mod random;
pub mod always_lose;
pub mod greedy;
pub mod console;

pub use discard_first::AlwaysDiscardFirstPlayer;
pub use random::{RandomPlayer, RandomPlayerMode};
pub use always_lose::AlwaysLosePlayer;
pub use greedy::GreedyPlayer;
pub use console::ConsolePlayer;

use crate::error::StrategyError;
use crate::game::action::Action;
use crate::tile::Tile;

/// 别人动作里打出的那张牌
pub(crate) fn reacted_tile(player: &str, action: &Action) -> Result<Tile, StrategyError> {
    match *action {
        Action::Discard { tile } | Action::Richii { tile } => Ok(tile),
        _ => Err(StrategyError::UnsupportedContext {
            player: player.to_string(),
            context: "reacting to anything but a discard",
        }),
    }
}
