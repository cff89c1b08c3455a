use std::io;

use crate::game::action::Action;
use crate::tile::{Suit, Tile, TileSetType};

/// 牌面记号解析错误
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTileError {
    #[error("unknown suit marker '{0}'")]
    UnknownSuit(char),
    #[error("invalid rank '{rank}' for suit {suit:?}")]
    InvalidRank { suit: Suit, rank: char },
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("tile token is truncated")]
    Truncated,
    #[error("more than four copies of {0}")]
    TooManyCopies(Tile),
}

/// 配置错误：在建立牌局时报告，不可恢复
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("tile set {0:?} is not supported")]
    UnsupportedTileSet(TileSetType),
    #[error("dead wall of {dead_wall} tiles leaves nothing to deal from {total} tiles")]
    InvalidDeadWall { dead_wall: usize, total: usize },
    #[error("malformed deal: {0}")]
    MalformedDeal(&'static str),
    #[error("malformed tile notation: {0}")]
    Parse(#[from] ParseTileError),
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config io: {0}")]
    Io(#[from] io::Error),
}

/// 策略（玩家）违约：错误必须能追溯到具体玩家
#[derive(thiserror::Error, Debug)]
pub enum StrategyError {
    #[error("player '{player}' does not support {context}")]
    UnsupportedContext { player: String, context: &'static str },
    #[error("player '{player}' returned illegal action {action:?}: {reason}")]
    IllegalAction {
        player: String,
        action: Action,
        reason: &'static str,
    },
    #[error("input closed")]
    InputClosed,
    #[error("input io: {0}")]
    Io(#[from] io::Error),
}

/// 游戏引擎错误
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    /// 状态机实现正确时不应出现
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
    #[error("no round in progress")]
    RoundNotStarted,
}
