use crate::bots::reacted_tile;
use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::player::{Player, PlayerView};
use crate::game::wind::Wind;
use crate::tile::Tile;

/// 能和就和，否则总是打出手中第一张牌
#[derive(Debug, Clone)]
pub struct AlwaysDiscardFirstPlayer {
    name: String,
}

impl AlwaysDiscardFirstPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for AlwaysDiscardFirstPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        if let Some(tile) = drawn {
            if view.hand.test_win() {
                return Ok(Action::Win { tile });
            }
        }
        let tile = view
            .hand
            .tiles()
            .first()
            .copied()
            .ok_or_else(|| StrategyError::UnsupportedContext {
                player: self.name.clone(),
                context: "a turn with an empty hand",
            })?;
        Ok(Action::Discard { tile })
    }

    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        _actor: Wind,
        _actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        let tile = reacted_tile(&self.name, action)?;
        if view.hand.test_win_with(tile) {
            Ok(Action::Win { tile })
        } else {
            Ok(Action::Pass)
        }
    }
}
