use smallvec::SmallVec;

use crate::game::wind::Wind;
use crate::tile::{Hand, Tile};

/// 一局的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 该局序号（从 0 开始）
    pub round: u32,
    /// 流局
    pub drained: bool,
    /// 和牌者，按出牌方向离放铳者由近到远
    pub winners: SmallVec<[Wind; 3]>,
    /// 放铳者，自摸或流局时为 `None`
    pub discarder: Option<Wind>,
    pub winning_tile: Option<Tile>,
    /// 每个和牌者的得分
    pub scores: SmallVec<[(Wind, i32); 3]>,
    /// 本局各座位的行动次数
    pub seat_turns: [u32; 4],
}

impl RoundOutcome {
    /// 流局结果
    pub fn drained(round: u32, seat_turns: [u32; 4]) -> Self {
        Self {
            round,
            drained: true,
            winners: SmallVec::new(),
            discarder: None,
            winning_tile: None,
            scores: SmallVec::new(),
            seat_turns,
        }
    }

    pub fn is_tsumo(&self) -> bool {
        !self.drained && self.discarder.is_none() && !self.winners.is_empty()
    }
}

/// 对局层的回调
///
/// 牌桌在每个阶段通知对局，除计分外都有空实现
pub trait GameCallbacks {
    fn on_round_start(&mut self, _round: u32) {}

    fn on_before_player_pick_tile(&mut self, _seat: Wind, _name: &str) {}

    fn on_after_player_pick_tile(&mut self, _seat: Wind, _name: &str, _tile: Tile) {}

    fn on_player_discard_tile(&mut self, _seat: Wind, _name: &str, _tile: Tile) {}

    fn on_player_pass(&mut self, _seat: Wind, _name: &str) {}

    fn on_round_finished(&mut self, _outcome: &RoundOutcome) {}

    /// 计算和牌手牌的得分
    fn calculate_score(&self, hand: &Hand) -> i32;
}
