use crate::game::action::Action;
use crate::game::player::PlayerView;
use crate::game::wind::Wind;
use crate::tile::Tile;

/// 动作掩码
///
/// 列出并校验某个座位在当前时机可以做的动作。牌桌在应用任何动作之前都会先校验
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionMask;

impl ActionMask {
    /// 自己回合内所有合法动作
    ///
    /// 顺序：自摸、暗杠、加杠、立直、出牌
    pub fn turn_actions(view: &PlayerView<'_>, drawn: Option<Tile>) -> Vec<Action> {
        let hand = view.hand;
        let mut actions = Vec::new();

        if let Some(tile) = drawn {
            if hand.test_win() {
                actions.push(Action::Win { tile });
            }
        }

        let distinct = distinct_tiles(hand.tiles());
        for &tile in &distinct {
            if hand.can_concealed_kang(&tile) {
                actions.push(Action::ConcealedKang { tile });
            }
        }
        if !view.richii {
            for &tile in &distinct {
                if hand.can_added_kang(&tile) {
                    actions.push(Action::Kang { tile });
                }
            }
            for &tile in &distinct {
                if hand.can_richii(&tile) {
                    actions.push(Action::Richii { tile });
                }
            }
        }

        match (view.richii, drawn) {
            (true, Some(tile)) => actions.push(Action::Discard { tile }),
            _ => actions.extend(distinct.iter().map(|&tile| Action::Discard { tile })),
        }
        actions
    }

    /// 对 `discarder` 打出的 `tile` 所有合法响应，第一个总是 `Pass`
    pub fn reactions(view: &PlayerView<'_>, discarder: Wind, tile: Tile) -> Vec<Action> {
        let hand = view.hand;
        let mut actions = vec![Action::Pass];

        if hand.test_win_with(tile) {
            actions.push(Action::Win { tile });
        }
        if view.richii {
            return actions;
        }
        if view.seat == discarder.next() {
            actions.extend(hand.can_chi(&tile).into_iter().map(|with| Action::Chi { tile, with }));
        }
        if hand.can_pong(&tile) {
            actions.push(Action::Pong { tile });
        }
        if hand.can_kang(&tile) {
            actions.push(Action::Kang { tile });
        }
        actions
    }

    /// 校验自己回合内的动作，返回不合法的原因
    pub fn check_turn_action(
        view: &PlayerView<'_>,
        drawn: Option<Tile>,
        action: &Action,
    ) -> Result<(), &'static str> {
        let hand = view.hand;
        match *action {
            Action::Discard { tile } => {
                if !hand.concealed().contains(&tile) {
                    return Err("tile is not in hand");
                }
                if view.richii && drawn.is_some_and(|d| d != tile) {
                    return Err("must discard the drawn tile after richii");
                }
                Ok(())
            }
            Action::Win { tile } => match drawn {
                None => Err("no tile drawn this turn"),
                Some(d) if d != tile => Err("self-draw win must name the drawn tile"),
                Some(_) if !hand.test_win() => Err("hand is not complete"),
                Some(_) => Ok(()),
            },
            Action::Richii { tile } => {
                if view.richii {
                    Err("already declared richii")
                } else if !hand.can_richii(&tile) {
                    Err("hand is not ready after this discard")
                } else {
                    Ok(())
                }
            }
            Action::ConcealedKang { tile } => {
                if hand.can_concealed_kang(&tile) {
                    Ok(())
                } else {
                    Err("needs four copies in hand")
                }
            }
            Action::Kang { tile } => {
                if view.richii {
                    Err("cannot add to a triplet after richii")
                } else if !hand.can_added_kang(&tile) {
                    Err("needs a revealed triplet and the fourth copy")
                } else {
                    Ok(())
                }
            }
            Action::Pass | Action::Chi { .. } | Action::Pong { .. } => {
                Err("not an action for one's own turn")
            }
        }
    }

    /// 校验对别人出牌的响应，返回不合法的原因
    pub fn check_reaction(
        view: &PlayerView<'_>,
        discarder: Wind,
        tile: Tile,
        action: &Action,
    ) -> Result<(), &'static str> {
        let hand = view.hand;
        if action.tile().is_some_and(|t| t != tile) {
            return Err("reaction must name the discarded tile");
        }
        match *action {
            Action::Pass => Ok(()),
            Action::Win { .. } => {
                if hand.test_win_with(tile) {
                    Ok(())
                } else {
                    Err("discard does not complete the hand")
                }
            }
            Action::Chi { with, .. } => {
                if view.seat != discarder.next() {
                    return Err("only the next seat may chi");
                }
                if view.richii {
                    return Err("cannot chi after richii");
                }
                let mut with = with;
                with.sort();
                if hand.can_chi(&tile).contains(&with) {
                    Ok(())
                } else {
                    Err("tiles do not form a run with the discard")
                }
            }
            Action::Pong { .. } => {
                if view.richii {
                    Err("cannot pong after richii")
                } else if !hand.can_pong(&tile) {
                    Err("needs two copies in hand")
                } else {
                    Ok(())
                }
            }
            Action::Kang { .. } => {
                if view.richii {
                    Err("cannot kang a discard after richii")
                } else if !hand.can_kang(&tile) {
                    Err("needs three copies in hand")
                } else {
                    Ok(())
                }
            }
            Action::Discard { .. } | Action::ConcealedKang { .. } | Action::Richii { .. } => {
                Err("not a reaction")
            }
        }
    }
}

/// 手牌已排序，相同的牌相邻
fn distinct_tiles(tiles: &[Tile]) -> Vec<Tile> {
    let mut distinct: Vec<Tile> = tiles.to_vec();
    distinct.dedup();
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Hand;

    fn view(seat: Wind, hand: &Hand, richii: bool) -> PlayerView<'_> {
        PlayerView {
            seat,
            hand,
            richii,
            live_tiles: 50,
        }
    }

    #[test]
    fn test_discard_must_be_in_hand() {
        let hand: Hand = "C1C2C3D4D4".parse().unwrap();
        let v = view(Wind::East, &hand, false);
        assert!(ActionMask::check_turn_action(&v, None, &Action::Discard { tile: Tile::dot(4) }).is_ok());
        assert_eq!(
            ActionMask::check_turn_action(&v, None, &Action::Discard { tile: Tile::dot(5) }),
            Err("tile is not in hand")
        );
        assert!(ActionMask::check_turn_action(&v, None, &Action::Pass).is_err());
    }

    #[test]
    fn test_richii_locks_discard() {
        let hand: Hand = "C1C2C3C4C5C6B2B2B2S7S7D4D5S1".parse().unwrap();
        let v = view(Wind::East, &hand, true);
        let drawn = Some(Tile::special(1));
        assert!(ActionMask::check_turn_action(&v, drawn, &Action::Discard { tile: Tile::special(1) }).is_ok());
        assert!(ActionMask::check_turn_action(&v, drawn, &Action::Discard { tile: Tile::character(1) }).is_err());
        assert_eq!(
            ActionMask::turn_actions(&v, drawn),
            vec![Action::Discard { tile: Tile::special(1) }]
        );
    }

    #[test]
    fn test_self_draw_win() {
        let hand: Hand = "C1C1C1C2C2C2C3C3C3D5D5D5B7B7".parse().unwrap();
        let v = view(Wind::South, &hand, false);
        let drawn = Some(Tile::bamboo(7));
        assert!(ActionMask::check_turn_action(&v, drawn, &Action::Win { tile: Tile::bamboo(7) }).is_ok());
        assert!(ActionMask::check_turn_action(&v, None, &Action::Win { tile: Tile::bamboo(7) }).is_err());
        assert!(ActionMask::check_turn_action(&v, drawn, &Action::Win { tile: Tile::dot(5) }).is_err());
        assert_eq!(ActionMask::turn_actions(&v, drawn)[0], Action::Win { tile: Tile::bamboo(7) });
    }

    #[test]
    fn test_chi_only_from_previous_seat() {
        let hand: Hand = "B4B6C1".parse().unwrap();
        let tile = Tile::bamboo(5);
        let chi = Action::Chi {
            tile,
            with: [Tile::bamboo(6), Tile::bamboo(4)],
        };
        let south = view(Wind::South, &hand, false);
        assert!(ActionMask::check_reaction(&south, Wind::East, tile, &chi).is_ok());
        let west = view(Wind::West, &hand, false);
        assert_eq!(
            ActionMask::check_reaction(&west, Wind::East, tile, &chi),
            Err("only the next seat may chi")
        );
        assert_eq!(ActionMask::reactions(&west, Wind::East, tile), vec![Action::Pass]);
    }

    #[test]
    fn test_reaction_tile_mismatch() {
        let hand: Hand = "D3D3D3".parse().unwrap();
        let v = view(Wind::North, &hand, false);
        let tile = Tile::dot(3);
        assert!(ActionMask::check_reaction(&v, Wind::East, tile, &Action::Kang { tile }).is_ok());
        assert!(ActionMask::check_reaction(&v, Wind::East, tile, &Action::Pong { tile: Tile::dot(4) }).is_err());
        assert!(ActionMask::check_reaction(&v, Wind::East, tile, &Action::Discard { tile }).is_err());
        assert_eq!(
            ActionMask::reactions(&v, Wind::East, tile),
            vec![Action::Pass, Action::Pong { tile }, Action::Kang { tile }]
        );
    }

    #[test]
    fn test_richii_blocks_claims_but_not_ron() {
        let hand: Hand = "C1C1C1C2C2C2C3C3C3D5D5D5B7".parse().unwrap();
        let v = view(Wind::West, &hand, true);
        let tile = Tile::bamboo(7);
        assert!(ActionMask::check_reaction(&v, Wind::South, tile, &Action::Win { tile }).is_ok());
        let pong_tile = Tile::character(1);
        assert!(ActionMask::check_reaction(&v, Wind::South, pong_tile, &Action::Pong { tile: pong_tile }).is_err());
    }
}
