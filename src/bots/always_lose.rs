use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::player::{Player, PlayerView};
use crate::game::wind::Wind;
use crate::tile::Tile;

/// 从不和牌、从不鸣牌：打出摸到的牌，没摸牌时打第一张
#[derive(Debug, Clone)]
pub struct AlwaysLosePlayer {
    name: String,
}

impl AlwaysLosePlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for AlwaysLosePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        drawn
            .or_else(|| view.hand.tiles().first().copied())
            .map(|tile| Action::Discard { tile })
            .ok_or_else(|| StrategyError::UnsupportedContext {
                player: self.name.clone(),
                context: "a turn with an empty hand",
            })
    }

    fn on_other_player_make_action(
        &mut self,
        _view: &PlayerView<'_>,
        _actor: Wind,
        _actor_name: &str,
        _action: &Action,
    ) -> Result<Action, StrategyError> {
        Ok(Action::Pass)
    }
}
