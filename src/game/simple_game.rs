use std::fmt;

use log::info;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::board::Board;
use crate::game::lifecycle::{GameCallbacks, RoundOutcome};
use crate::game::player::Player;
use crate::game::wind::Wind;
use crate::tile::Hand;

/// 对局统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameStats {
    /// 座位名称
    pub names: [String; 4],
    /// 每个座位的和牌次数
    pub wins: [u32; 4],
    /// 每个座位的自摸次数
    pub tsumo_wins: [u32; 4],
    /// 每个座位的放铳次数
    pub deal_ins: [u32; 4],
    /// 流局次数
    pub drains: u32,
    /// 已完成局数
    pub rounds: u32,
    /// 和牌者用了多少次行动，用于计算平均
    turns_to_win: Vec<u32>,
}

impl GameStats {
    pub fn new(names: [String; 4]) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        if outcome.drained {
            self.drains += 1;
            return;
        }
        for &seat in &outcome.winners {
            self.wins[seat.index()] += 1;
            if outcome.is_tsumo() {
                self.tsumo_wins[seat.index()] += 1;
            }
            self.turns_to_win.push(outcome.seat_turns[seat.index()]);
        }
        if let Some(discarder) = outcome.discarder {
            self.deal_ins[discarder.index()] += 1;
        }
    }

    /// 某座位的和牌率
    pub fn win_rate(&self, seat: Wind) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.wins[seat.index()] as f64 / self.rounds as f64
    }

    pub fn drain_rate(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.drains as f64 / self.rounds as f64
    }

    /// 和牌者平均行动次数
    pub fn average_turns_to_win(&self) -> Option<f64> {
        if self.turns_to_win.is_empty() {
            return None;
        }
        let total: u32 = self.turns_to_win.iter().sum();
        Some(total as f64 / self.turns_to_win.len() as f64)
    }
}

impl GameCallbacks for GameStats {
    fn on_round_finished(&mut self, outcome: &RoundOutcome) {
        self.record(outcome);
    }

    /// 简化规则只判断是否和牌
    fn calculate_score(&self, hand: &Hand) -> i32 {
        hand.test_win() as i32
    }
}

impl fmt::Display for GameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rounds played: {}", self.rounds)?;
        for seat in Wind::all() {
            writeln!(
                f,
                "{:<5} {:<12} wins {:>4} ({:>5.1}%)  tsumo {:>4}  deal-in {:>4}",
                seat,
                self.names[seat.index()],
                self.wins[seat.index()],
                self.win_rate(seat) * 100.0,
                self.tsumo_wins[seat.index()],
                self.deal_ins[seat.index()],
            )?;
        }
        writeln!(f, "drained: {} ({:.1}%)", self.drains, self.drain_rate() * 100.0)?;
        match self.average_turns_to_win() {
            Some(avg) => write!(f, "average turns to win: {:.2}", avg),
            None => write!(f, "average turns to win: -"),
        }
    }
}

/// 简单对局：用同一张牌桌连续打 `round_count` 局
pub struct SimpleGame<'p> {
    board: Board<'p>,
    stats: GameStats,
    round_count: u32,
}

impl<'p> SimpleGame<'p> {
    pub fn new(players: [&'p mut dyn Player; 4], config: GameConfig) -> Result<Self, GameError> {
        let names = [0, 1, 2, 3].map(|i| players[i].name().to_string());
        let board = Board::new(players, config.board)?;
        Ok(Self {
            board,
            stats: GameStats::new(names),
            round_count: config.round_count,
        })
    }

    /// 打完所有局，返回统计
    ///
    /// 任何一局出错都会中止对局
    pub fn start_game(&mut self) -> Result<&GameStats, GameError> {
        for _ in 0..self.round_count {
            self.board.play_round(&mut self.stats)?;
        }
        info!("game over after {} rounds", self.stats.rounds);
        Ok(&self.stats)
    }

    pub fn board(&self) -> &Board<'p> {
        &self.board
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }
}
