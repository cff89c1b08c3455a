use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::lifecycle::RoundOutcome;
use crate::game::wind::Wind;
use crate::tile::{Hand, Tile};

/// 玩家在决策时能看到的信息
///
/// 只能看到自己的手牌；手牌由牌桌持有和修改
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    /// 自己的座位
    pub seat: Wind,
    /// 自己的手牌
    pub hand: &'a Hand,
    /// 是否已立直
    pub richii: bool,
    /// 牌堆中还能摸的张数
    pub live_tiles: usize,
}

/// 玩家策略
///
/// 由牌桌调用，玩家从不反向调用牌桌。策略在不支持的场景下被调用时必须返回
/// `StrategyError::UnsupportedContext`，不能默默返回默认动作
pub trait Player {
    /// 玩家名称
    fn name(&self) -> &str;

    /// 轮到自己：返回出牌、自摸、暗杠/加杠或立直
    ///
    /// `drawn` 为本回合摸到的牌，吃碰之后的回合为 `None`
    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError>;

    /// 别人出牌后：返回过、荣和、吃、碰或杠
    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        actor: Wind,
        actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError>;

    /// 一局结束的通知
    fn on_round_finished(&mut self, _outcome: &RoundOutcome) {}
}

/// 函数式玩家适配器
///
/// 将两个闭包转换为 `Player`
pub struct FnPlayer<T, R> {
    name: String,
    on_turn: T,
    on_react: R,
}

impl<T, R> FnPlayer<T, R>
where
    T: FnMut(&PlayerView<'_>, Option<Tile>) -> Action,
    R: FnMut(&PlayerView<'_>, Wind, &Action) -> Action,
{
    pub fn new(name: impl Into<String>, on_turn: T, on_react: R) -> Self {
        Self {
            name: name.into(),
            on_turn,
            on_react,
        }
    }
}

impl<T, R> Player for FnPlayer<T, R>
where
    T: FnMut(&PlayerView<'_>, Option<Tile>) -> Action,
    R: FnMut(&PlayerView<'_>, Wind, &Action) -> Action,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        Ok((self.on_turn)(view, drawn))
    }

    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        actor: Wind,
        _actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        Ok((self.on_react)(view, actor, action))
    }
}
