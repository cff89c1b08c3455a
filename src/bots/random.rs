use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bots::reacted_tile;
use crate::engine::action_mask::ActionMask;
use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::player::{Player, PlayerView};
use crate::game::wind::Wind;
use crate::tile::Tile;

/// 随机玩家的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomPlayerMode {
    /// 回合和响应都在合法动作中随机选择
    #[default]
    Simple,
    /// 只会随机出牌，不支持响应
    DiscardOnly,
}

/// 随机玩家
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    mode: RandomPlayerMode,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>, mode: RandomPlayerMode, seed: u64) -> Self {
        Self {
            name: name.into(),
            mode,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> RandomPlayerMode {
        self.mode
    }

    fn pick(&mut self, actions: &[Action], context: &'static str) -> Result<Action, StrategyError> {
        actions
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| StrategyError::UnsupportedContext {
                player: self.name.clone(),
                context,
            })
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        let mut actions = ActionMask::turn_actions(view, drawn);
        if self.mode == RandomPlayerMode::DiscardOnly {
            actions.retain(|a| matches!(a, Action::Discard { .. }));
        }
        self.pick(&actions, "a turn with nothing to discard")
    }

    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        actor: Wind,
        _actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        if self.mode == RandomPlayerMode::DiscardOnly {
            return Err(StrategyError::UnsupportedContext {
                player: self.name.clone(),
                context: "reacting to other players",
            });
        }
        let tile = reacted_tile(&self.name, action)?;
        let reactions = ActionMask::reactions(view, actor, tile);
        self.pick(&reactions, "a reaction window with no options")
    }
}
