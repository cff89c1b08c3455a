use crate::game::action::Action;
use crate::game::wind::Wind;
use crate::tile::{Hand, Tile};

/// 弃牌记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscardRecord {
    /// 出牌座位
    pub seat: Wind,
    /// 打出的牌
    pub tile: Tile,
    /// 出牌时的回合数
    pub turn: u32,
    /// 被谁吃碰杠走
    pub claimed_by: Option<Wind>,
}

/// 单个座位的状态
#[derive(Debug, Clone, Default)]
pub struct SeatState {
    pub wind: Wind,
    pub hand: Hand,
    /// 牌河：仍留在桌上的弃牌
    pub discards: Vec<Tile>,
    pub richii: bool,
    /// 本局轮到该座位的次数
    pub turns: u32,
}

impl SeatState {
    pub fn new(wind: Wind) -> Self {
        Self {
            wind,
            ..Self::default()
        }
    }

    fn clear(&mut self) {
        self.hand.clear();
        self.discards.clear();
        self.richii = false;
        self.turns = 0;
    }
}

/// 牌桌状态
#[derive(Debug, Clone)]
pub struct BoardState {
    pub seats: [SeatState; 4],
    /// 当前行动的座位
    pub active: Wind,
    /// 本局回合数
    pub turn: u32,
    /// 已完成的局数
    pub round: u32,
    pub round_in_progress: bool,
    /// 按顺序记录所有弃牌
    pub discard_history: Vec<DiscardRecord>,
    pub last_action: Option<(Wind, Action)>,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            seats: Wind::all().map(SeatState::new),
            active: Wind::East,
            turn: 0,
            round: 0,
            round_in_progress: false,
            discard_history: Vec::new(),
            last_action: None,
        }
    }

    /// 开始新一局之前清空局内状态，`round` 保留
    pub fn reset_for_round(&mut self, start: Wind) {
        for seat in &mut self.seats {
            seat.clear();
        }
        self.active = start;
        self.turn = 0;
        self.round_in_progress = false;
        self.discard_history.clear();
        self.last_action = None;
    }

    pub fn seat(&self, wind: Wind) -> &SeatState {
        &self.seats[wind.index()]
    }

    pub fn seat_mut(&mut self, wind: Wind) -> &mut SeatState {
        &mut self.seats[wind.index()]
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
