use std::fmt;

use log::{debug, info, trace, warn};
use smallvec::SmallVec;

use crate::config::BoardConfig;
use crate::engine::action_mask::ActionMask;
use crate::error::{ConfigError, GameError, StrategyError};
use crate::game::action::Action;
use crate::game::constants::HAND_SIZE;
use crate::game::lifecycle::{GameCallbacks, RoundOutcome};
use crate::game::player::{Player, PlayerView};
use crate::game::rules::{self, Reaction, Resolution};
use crate::game::state::{BoardState, DiscardRecord};
use crate::game::wind::Wind;
use crate::tile::{Hand, Tile, TileStack};

/// 牌桌
///
/// 借用四个玩家，持有牌堆和所有手牌，驱动回合状态机：
/// 摸牌 → 自摸判定 → 出牌 → 响应窗口 → 鸣牌或轮转 → 结束。
/// 一个 `Board` 在整场对局中复用，每局通过 `setup` 重新洗牌发牌
pub struct Board<'p> {
    players: [&'p mut dyn Player; 4],
    config: BoardConfig,
    stack: TileStack,
    state: BoardState,
    /// 吃碰之后的回合不摸牌
    skip_draw: bool,
}

impl<'p> Board<'p> {
    /// 创建牌桌，不支持的牌组或过大的王牌在这里报错
    pub fn new(players: [&'p mut dyn Player; 4], config: BoardConfig) -> Result<Self, GameError> {
        let stack = TileStack::new(
            config.tile_set,
            config.enable_dora,
            config.dead_wall_size,
            config.seed,
        )?;
        Ok(Self {
            players,
            config,
            stack,
            state: BoardState::new(),
            skip_draw: false,
        })
    }

    /// 洗牌并发牌
    ///
    /// 从起始座位开始按 4-4-4-1 每人发 13 张
    pub fn setup(&mut self) -> Result<(), GameError> {
        self.stack.reset()?;
        let dice = self.stack.throw_dice() + self.stack.throw_dice();
        debug!("round {} dice {}", self.state.round, dice);

        let start = self.config.starting_wind;
        self.state.reset_for_round(start);
        self.skip_draw = false;

        let seats = Wind::rotation_from(start);
        for batch in [4, 4, 4, 1] {
            for seat in seats {
                for _ in 0..batch {
                    let tile = self
                        .stack
                        .draw_tile()
                        .ok_or(GameError::InvariantViolation("stack ran out while dealing"))?;
                    self.state.seat_mut(seat).hand.pick_tile(tile);
                }
            }
        }

        self.state.round_in_progress = true;
        Ok(())
    }

    /// 用给定的牌堆和起手牌开始一局（用于固定牌局）
    ///
    /// `hands` 按座位顺序（东南西北），每手必须恰好 13 张
    pub fn setup_preset(&mut self, stack: TileStack, hands: [Hand; 4]) -> Result<(), GameError> {
        if hands.iter().any(|h| h.physical_count() != HAND_SIZE) {
            return Err(ConfigError::MalformedDeal("every seat must start with 13 tiles").into());
        }

        self.state.reset_for_round(self.config.starting_wind);
        self.skip_draw = false;
        self.stack = stack;
        for (seat, hand) in self.state.seats.iter_mut().zip(hands) {
            seat.hand = hand;
        }
        self.state.round_in_progress = true;
        Ok(())
    }

    /// 发牌并打完一局
    pub fn play_round(&mut self, game: &mut dyn GameCallbacks) -> Result<RoundOutcome, GameError> {
        self.setup()?;
        self.run_round(game)
    }

    /// 打完已经发好牌的一局
    ///
    /// 出错时本局作废，`is_round_in_progress()` 变为 `false`
    pub fn run_round(&mut self, game: &mut dyn GameCallbacks) -> Result<RoundOutcome, GameError> {
        if !self.state.round_in_progress {
            return Err(GameError::RoundNotStarted);
        }
        info!("round {} starts, {} to play first", self.state.round, self.state.active);
        game.on_round_start(self.state.round);

        loop {
            match self.proceed_to_next_player(game) {
                Ok(Some(outcome)) => return Ok(outcome),
                Ok(None) => {}
                Err(e) => {
                    warn!("round {} aborted: {}", self.state.round, e);
                    self.state.round_in_progress = false;
                    return Err(e);
                }
            }
        }
    }

    /// 推进一个回合
    ///
    /// 当前座位摸牌、行动，打出的牌经过响应窗口仲裁。本局结束时返回结果
    pub fn proceed_to_next_player(
        &mut self,
        game: &mut dyn GameCallbacks,
    ) -> Result<Option<RoundOutcome>, GameError> {
        if !self.state.round_in_progress {
            return Err(GameError::RoundNotStarted);
        }

        let seat = self.state.active;
        self.state.turn += 1;
        self.state.seat_mut(seat).turns += 1;

        let mut drawn = None;
        if self.skip_draw {
            self.skip_draw = false;
        } else {
            match self.draw_for(seat, game) {
                Some(tile) => drawn = Some(tile),
                None => return Ok(Some(self.finish_drained(game))),
            }
        }

        loop {
            let action = self.ask_turn(seat, drawn)?;
            self.state.last_action = Some((seat, action));
            match action {
                Action::Win { tile } => {
                    self.state.seat_mut(seat).hand.set_tsumo();
                    return Ok(Some(self.finish_tsumo(seat, tile, game)));
                }
                Action::ConcealedKang { tile } | Action::Kang { tile } => {
                    let hand = &mut self.state.seat_mut(seat).hand;
                    let committed = match action {
                        Action::ConcealedKang { .. } => hand.concealed_kang(tile),
                        _ => hand.added_kang(tile),
                    };
                    if !committed {
                        return Err(GameError::InvariantViolation("validated kang could not be applied"));
                    }
                    debug!("{} {}", seat, action);
                    // 杠后补牌
                    match self.draw_for(seat, game) {
                        Some(tile) => drawn = Some(tile),
                        None => return Ok(Some(self.finish_drained(game))),
                    }
                }
                Action::Discard { tile } | Action::Richii { tile } => {
                    if matches!(action, Action::Richii { .. }) {
                        self.state.seat_mut(seat).richii = true;
                    }
                    let discarded = self.discard(seat, tile, game)?;
                    return self.open_action_window(seat, discarded, action, game);
                }
                Action::Pass | Action::Chi { .. } | Action::Pong { .. } => {
                    return Err(GameError::InvariantViolation("unvalidated turn action"));
                }
            }
        }
    }

    /// 摸牌，只剩王牌时返回 `None`
    fn draw_for(&mut self, seat: Wind, game: &mut dyn GameCallbacks) -> Option<Tile> {
        if self.stack.is_empty() {
            return None;
        }
        let name = self.players[seat.index()].name();
        game.on_before_player_pick_tile(seat, name);
        let tile = self.stack.draw_tile()?;
        self.state.seat_mut(seat).hand.pick_tile(tile);
        game.on_after_player_pick_tile(seat, name, tile);
        trace!("{} draws {}, {} left", seat, tile, self.stack.live_count());
        Some(tile)
    }

    fn view(&self, seat: Wind) -> PlayerView<'_> {
        let seat_state = self.state.seat(seat);
        PlayerView {
            seat,
            hand: &seat_state.hand,
            richii: seat_state.richii,
            live_tiles: self.stack.live_count(),
        }
    }

    /// 询问当前座位的动作并校验
    fn ask_turn(&mut self, seat: Wind, drawn: Option<Tile>) -> Result<Action, GameError> {
        let seat_state = &self.state.seats[seat.index()];
        let view = PlayerView {
            seat,
            hand: &seat_state.hand,
            richii: seat_state.richii,
            live_tiles: self.stack.live_count(),
        };
        let player = &mut *self.players[seat.index()];
        let action = player.on_turn(&view, drawn)?;
        if let Err(reason) = ActionMask::check_turn_action(&view, drawn, &action) {
            return Err(StrategyError::IllegalAction {
                player: player.name().to_string(),
                action,
                reason,
            }
            .into());
        }
        Ok(action)
    }

    /// 打出一张牌到牌河
    fn discard(&mut self, seat: Wind, tile: Tile, game: &mut dyn GameCallbacks) -> Result<Tile, GameError> {
        let turn = self.state.turn;
        let seat_state = self.state.seat_mut(seat);
        let discarded = seat_state
            .hand
            .discard_tile(&tile)
            .ok_or(GameError::InvariantViolation("validated discard missing from hand"))?;
        seat_state.discards.push(discarded);
        self.state.discard_history.push(DiscardRecord {
            seat,
            tile: discarded,
            turn,
            claimed_by: None,
        });

        let name = self.players[seat.index()].name();
        debug!("{} ({}) discards {}", name, seat, discarded);
        game.on_player_discard_tile(seat, name, discarded);
        Ok(discarded)
    }

    /// 响应窗口：按固定座位顺序询问其他三家，收齐后再仲裁
    fn open_action_window(
        &mut self,
        discarder: Wind,
        tile: Tile,
        announced: Action,
        game: &mut dyn GameCallbacks,
    ) -> Result<Option<RoundOutcome>, GameError> {
        let discarder_name = self.players[discarder.index()].name().to_string();
        let mut reactions: SmallVec<[Reaction; 3]> = SmallVec::new();

        for seat in Wind::all() {
            if seat == discarder {
                continue;
            }
            let seat_state = &self.state.seats[seat.index()];
            let view = PlayerView {
                seat,
                hand: &seat_state.hand,
                richii: seat_state.richii,
                live_tiles: self.stack.live_count(),
            };
            let player = &mut *self.players[seat.index()];
            let action = player.on_other_player_make_action(&view, discarder, &discarder_name, &announced)?;
            if let Err(reason) = ActionMask::check_reaction(&view, discarder, tile, &action) {
                return Err(StrategyError::IllegalAction {
                    player: player.name().to_string(),
                    action,
                    reason,
                }
                .into());
            }
            reactions.push(Reaction { seat, action });
        }

        for reaction in reactions.iter().filter(|r| r.action == Action::Pass) {
            game.on_player_pass(reaction.seat, self.players[reaction.seat.index()].name());
        }

        match rules::arbitrate(discarder, &reactions) {
            Resolution::AllPass => {
                self.state.active = discarder.next();
                Ok(None)
            }
            Resolution::Win { winners } => Ok(Some(self.finish_ron(discarder, tile, winners, game))),
            Resolution::Claim { seat, action } => {
                self.apply_claim(discarder, seat, action)?;
                Ok(None)
            }
        }
    }

    /// 吃碰杠：牌从牌河移入鸣牌者的副露，轮到鸣牌者
    fn apply_claim(&mut self, discarder: Wind, claimant: Wind, action: Action) -> Result<(), GameError> {
        let tile = self
            .state
            .seat_mut(discarder)
            .discards
            .pop()
            .ok_or(GameError::InvariantViolation("claimed discard missing from pile"))?;
        if let Some(record) = self.state.discard_history.last_mut() {
            record.claimed_by = Some(claimant);
        }

        let hand = &mut self.state.seat_mut(claimant).hand;
        let committed = match action {
            Action::Chi { with, .. } => hand.chi(tile, with),
            Action::Pong { .. } => hand.pong(tile),
            Action::Kang { .. } => hand.kang(tile),
            _ => false,
        };
        if !committed {
            return Err(GameError::InvariantViolation("validated claim could not be applied"));
        }

        debug!("{} claims from {}: {}", claimant, discarder, action);
        self.state.active = claimant;
        self.state.last_action = Some((claimant, action));
        // 直杠之后照常摸牌
        self.skip_draw = !matches!(action, Action::Kang { .. });
        Ok(())
    }

    fn finish_tsumo(&mut self, seat: Wind, tile: Tile, game: &mut dyn GameCallbacks) -> RoundOutcome {
        let score = game.calculate_score(&self.state.seat(seat).hand);
        let outcome = RoundOutcome {
            round: self.state.round,
            drained: false,
            winners: SmallVec::from_slice(&[seat]),
            discarder: None,
            winning_tile: Some(tile),
            scores: SmallVec::from_slice(&[(seat, score)]),
            seat_turns: self.seat_turns(),
        };
        self.finish(outcome, game)
    }

    /// 荣和：打出的牌留在牌河，用手牌副本计分
    fn finish_ron(
        &mut self,
        discarder: Wind,
        tile: Tile,
        winners: SmallVec<[Wind; 3]>,
        game: &mut dyn GameCallbacks,
    ) -> RoundOutcome {
        let scores = winners
            .iter()
            .map(|&seat| {
                let mut hand = self.state.seat(seat).hand.clone();
                hand.pick_tile(tile);
                (seat, game.calculate_score(&hand))
            })
            .collect();
        let outcome = RoundOutcome {
            round: self.state.round,
            drained: false,
            winners,
            discarder: Some(discarder),
            winning_tile: Some(tile),
            scores,
            seat_turns: self.seat_turns(),
        };
        self.finish(outcome, game)
    }

    fn finish_drained(&mut self, game: &mut dyn GameCallbacks) -> RoundOutcome {
        let outcome = RoundOutcome::drained(self.state.round, self.seat_turns());
        self.finish(outcome, game)
    }

    fn finish(&mut self, outcome: RoundOutcome, game: &mut dyn GameCallbacks) -> RoundOutcome {
        self.state.round_in_progress = false;
        self.state.round += 1;

        if outcome.drained {
            info!("round {} drained after {} turns", outcome.round, self.state.turn);
        } else {
            info!(
                "round {} won by {:?} on {:?} after {} turns",
                outcome.round, outcome.winners, outcome.winning_tile, self.state.turn
            );
        }

        game.on_round_finished(&outcome);
        for player in self.players.iter_mut() {
            player.on_round_finished(&outcome);
        }
        outcome
    }

    fn seat_turns(&self) -> [u32; 4] {
        Wind::all().map(|seat| self.state.seat(seat).turns)
    }

    //
    // 查询
    //

    /// 桌上所有牌：牌堆（含王牌）+ 手牌（含副露）+ 牌河
    pub fn tiles_in_play(&self) -> usize {
        self.stack.remaining_count()
            + self
                .state
                .seats
                .iter()
                .map(|s| s.hand.physical_count() + s.discards.len())
                .sum::<usize>()
    }

    pub fn active_seat(&self) -> Wind {
        self.state.active
    }

    /// 已完成的局数
    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn is_round_in_progress(&self) -> bool {
        self.state.round_in_progress
    }

    pub fn hand(&self, seat: Wind) -> &Hand {
        &self.state.seat(seat).hand
    }

    pub fn is_richii(&self, seat: Wind) -> bool {
        self.state.seat(seat).richii
    }

    /// 牌河
    pub fn discards(&self, seat: Wind) -> &[Tile] {
        &self.state.seat(seat).discards
    }

    pub fn discard_history(&self) -> &[DiscardRecord] {
        &self.state.discard_history
    }

    pub fn last_action(&self) -> Option<(Wind, Action)> {
        self.state.last_action
    }

    pub fn stack(&self) -> &TileStack {
        &self.stack
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn player_name(&self, seat: Wind) -> &str {
        self.players[seat.index()].name()
    }

    /// 某座位当前能看到的信息
    pub fn player_view(&self, seat: Wind) -> PlayerView<'_> {
        self.view(seat)
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seat in Wind::all() {
            let marker = if seat == self.state.active { '*' } else { ' ' };
            writeln!(
                f,
                "{}{:<5} {:<12} {}",
                marker,
                seat,
                self.player_name(seat),
                self.hand(seat).concealed().printable()
            )?;
        }
        write!(f, "live tiles: {}", self.stack.live_count())
    }
}
