/// 游戏逻辑模块
///
/// 包含座位、动作、玩家接口、响应仲裁、牌桌状态机和对局驱动

pub mod wind;
pub mod constants;
pub mod action;
pub mod player;
pub mod rules;
pub mod state;
pub mod lifecycle;
pub mod board;
pub mod simple_game;
