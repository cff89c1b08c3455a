use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::Tile;

/// 动作
///
/// 出牌回合内可用：出牌、自摸、暗杠、加杠、立直。
/// 响应别人出牌时可用：过、荣和、吃、碰、杠
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// 过（放弃）
    Pass,
    /// 出牌
    Discard { tile: Tile },
    /// 和牌：自摸时为摸到的牌，荣和时为别人打出的牌
    Win { tile: Tile },
    /// 吃：`with` 为手中组成顺子的两张
    Chi { tile: Tile, with: [Tile; 2] },
    /// 碰
    Pong { tile: Tile },
    /// 杠：响应时为直杠，自己回合为加杠
    Kang { tile: Tile },
    /// 暗杠
    ConcealedKang { tile: Tile },
    /// 立直并打出 `tile`
    Richii { tile: Tile },
}

/// 动作类型，不带牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Pass,
    Discard,
    Win,
    Chi,
    Pong,
    Kang,
    ConcealedKang,
    Richii,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Pass => ActionKind::Pass,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Win { .. } => ActionKind::Win,
            Action::Chi { .. } => ActionKind::Chi,
            Action::Pong { .. } => ActionKind::Pong,
            Action::Kang { .. } => ActionKind::Kang,
            Action::ConcealedKang { .. } => ActionKind::ConcealedKang,
            Action::Richii { .. } => ActionKind::Richii,
        }
    }

    /// 动作涉及的牌，`Pass` 没有
    pub fn tile(&self) -> Option<Tile> {
        match *self {
            Action::Pass => None,
            Action::Discard { tile }
            | Action::Win { tile }
            | Action::Chi { tile, .. }
            | Action::Pong { tile }
            | Action::Kang { tile }
            | Action::ConcealedKang { tile }
            | Action::Richii { tile } => Some(tile),
        }
    }

    /// 响应优先级：和 > 杠 > 碰 > 吃 > 过
    pub fn priority(&self) -> u8 {
        match self.kind() {
            ActionKind::Win => 4,
            ActionKind::Kang => 3,
            ActionKind::Pong => 2,
            ActionKind::Chi => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => write!(f, "Pass"),
            Action::Discard { tile } => write!(f, "Discard {}", tile),
            Action::Win { tile } => write!(f, "Win on {}", tile),
            Action::Chi { tile, with } => write!(f, "Chi {} with {}{}", tile, with[0], with[1]),
            Action::Pong { tile } => write!(f, "Pong {}", tile),
            Action::Kang { tile } => write!(f, "Kang {}", tile),
            Action::ConcealedKang { tile } => write!(f, "Concealed Kang {}", tile),
            Action::Richii { tile } => write!(f, "Richii, discard {}", tile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let tile = Tile::dot(3);
        let win = Action::Win { tile };
        let kang = Action::Kang { tile };
        let pong = Action::Pong { tile };
        let chi = Action::Chi {
            tile,
            with: [Tile::dot(1), Tile::dot(2)],
        };
        assert!(win.priority() > kang.priority());
        assert!(kang.priority() > pong.priority());
        assert!(pong.priority() > chi.priority());
        assert!(chi.priority() > Action::Pass.priority());
    }

    #[test]
    fn test_tile_and_display() {
        assert_eq!(Action::Pass.tile(), None);
        let action = Action::Chi {
            tile: Tile::bamboo(5),
            with: [Tile::bamboo(4), Tile::bamboo(6)],
        };
        assert_eq!(action.tile(), Some(Tile::bamboo(5)));
        assert_eq!(action.to_string(), "Chi B5 with B4B6");
    }
}
