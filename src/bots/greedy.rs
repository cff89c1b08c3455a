use crate::bots::reacted_tile;
use crate::engine::action_mask::ActionMask;
use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::player::{Player, PlayerView};
use crate::game::wind::Wind;
use crate::tile::{Hand, Tile};

/// 贪心玩家
///
/// 回合内：和 > 杠 > 立直 > 打出最孤立的牌。响应时总是选择优先级最高的合法动作
#[derive(Debug, Clone)]
pub struct GreedyPlayer {
    name: String,
}

impl GreedyPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 与手中其他牌的关联程度，越小越孤立
///
/// 同一种牌每张多计 2 分；数牌基础 1 分，同花色点数相差 1 或 2 的牌各计 1 分
fn connectivity(hand: &Hand, tile: &Tile) -> u32 {
    let counts = hand.concealed().counts();
    let mut score = (counts[tile.to_index()] as u32).saturating_sub(1) * 2;
    if tile.suit().is_numbered() {
        score += 1;
        let index = tile.to_index();
        let base = index - index % 9;
        for offset in [-2i32, -1, 1, 2] {
            let neighbor = index as i32 + offset;
            if neighbor >= base as i32 && neighbor < base as i32 + 9 {
                score += counts[neighbor as usize] as u32;
            }
        }
    }
    score
}

fn least_connected(hand: &Hand, candidates: impl Iterator<Item = Tile>) -> Option<Tile> {
    candidates.min_by_key(|t| connectivity(hand, t))
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        let actions = ActionMask::turn_actions(view, drawn);

        let claim = actions.iter().find(|a| {
            matches!(
                a,
                Action::Win { .. } | Action::ConcealedKang { .. } | Action::Kang { .. }
            )
        });
        if let Some(&action) = claim {
            return Ok(action);
        }

        let richii = least_connected(
            view.hand,
            actions.iter().filter_map(|a| match a {
                Action::Richii { tile } => Some(*tile),
                _ => None,
            }),
        );
        if let Some(tile) = richii {
            return Ok(Action::Richii { tile });
        }

        least_connected(
            view.hand,
            actions.iter().filter_map(|a| match a {
                Action::Discard { tile } => Some(*tile),
                _ => None,
            }),
        )
        .map(|tile| Action::Discard { tile })
        .ok_or_else(|| StrategyError::UnsupportedContext {
            player: self.name.clone(),
            context: "a turn with nothing to discard",
        })
    }

    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        actor: Wind,
        _actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        let tile = reacted_tile(&self.name, action)?;
        let best = ActionMask::reactions(view, actor, tile)
            .into_iter()
            .rev()
            .max_by_key(Action::priority)
            .unwrap_or(Action::Pass);
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(seat: Wind, hand: &Hand) -> PlayerView<'_> {
        PlayerView {
            seat,
            hand,
            richii: false,
            live_tiles: 40,
        }
    }

    #[test]
    fn test_discards_isolated_honor() {
        let hand: Hand = "C1C2C3D4D5D6B7B8B9C5C9S3D9D9".parse().unwrap();
        let mut player = GreedyPlayer::new("greedy");
        assert_eq!(
            player.on_turn(&view(Wind::East, &hand), Some(Tile::dot(9))).unwrap(),
            Action::Discard { tile: Tile::special(3) }
        );
    }

    #[test]
    fn test_prefers_richii_when_ready() {
        let hand: Hand = "C1C2C3C4C5C6B2B2B2S7S7D4D5S1".parse().unwrap();
        let mut player = GreedyPlayer::new("greedy");
        assert_eq!(
            player.on_turn(&view(Wind::East, &hand), Some(Tile::special(1))).unwrap(),
            Action::Richii { tile: Tile::special(1) }
        );
    }

    #[test]
    fn test_reaction_prefers_pong_over_chi() {
        let hand: Hand = "D4D5D6D6C9".parse().unwrap();
        let mut player = GreedyPlayer::new("greedy");
        let tile = Tile::dot(6);
        // 东家出牌，南家可以吃也可以碰
        let reaction = player
            .on_other_player_make_action(&view(Wind::South, &hand), Wind::East, "east", &Action::Discard { tile })
            .unwrap();
        assert_eq!(reaction, Action::Pong { tile });
    }

    #[test]
    fn test_connectivity_stays_in_suit() {
        let hand: Hand = "C9D1D2".parse().unwrap();
        assert_eq!(connectivity(&hand, &Tile::character(9)), 1);
        assert_eq!(connectivity(&hand, &Tile::dot(1)), 2);
        assert_eq!(connectivity(&hand, &Tile::special(1)), 0);
    }
}
