use smallvec::SmallVec;

use crate::game::action::Action;
use crate::game::wind::Wind;

/// 某个座位对一张打出的牌的响应（已校验合法）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub seat: Wind,
    pub action: Action,
}

/// 仲裁结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 所有人都过
    AllPass,
    /// 一人或多人荣和，按出牌方向离出牌者由近到远排列
    Win { winners: SmallVec<[Wind; 3]> },
    /// 吃、碰或杠，由唯一的座位执行
    Claim { seat: Wind, action: Action },
}

/// 按优先级仲裁一张牌的所有响应
///
/// 和 > 杠 > 碰 > 吃 > 过。同为和牌时全部生效；其余同优先级时按出牌方向离
/// `discarder` 最近者优先
pub fn arbitrate(discarder: Wind, reactions: &[Reaction]) -> Resolution {
    let Some(top) = reactions.iter().map(|r| r.action.priority()).max() else {
        return Resolution::AllPass;
    };
    if top == 0 {
        return Resolution::AllPass;
    }

    let mut candidates: SmallVec<[Reaction; 3]> = reactions
        .iter()
        .filter(|r| r.action.priority() == top)
        .copied()
        .collect();
    candidates.sort_by_key(|r| r.seat.distance_from(discarder));

    if matches!(candidates[0].action, Action::Win { .. }) {
        return Resolution::Win {
            winners: candidates.iter().map(|r| r.seat).collect(),
        };
    }
    Resolution::Claim {
        seat: candidates[0].seat,
        action: candidates[0].action,
    }
}
