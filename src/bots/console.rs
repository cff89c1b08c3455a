use std::io::{BufRead, Write};

use crate::bots::reacted_tile;
use crate::engine::action_mask::ActionMask;
use crate::error::StrategyError;
use crate::game::action::Action;
use crate::game::player::{Player, PlayerView};
use crate::game::wind::Wind;
use crate::tile::Tile;

/// 控制台玩家（人类输入）
///
/// 每次决策列出编号的合法动作，读取一行输入：编号，或者直接输入要打出的牌（如 `C5`）。
/// 无法识别的输入会重新提示；输入结束时返回 `StrategyError::InputClosed`
pub struct ConsolePlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn choose(&mut self, actions: &[Action]) -> Result<Action, StrategyError> {
        for (i, action) in actions.iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i, action)?;
        }
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(StrategyError::InputClosed);
            }
            if let Some(action) = parse_choice(line.trim(), actions) {
                return Ok(action);
            }
            writeln!(self.output, "invalid choice: {}", line.trim())?;
        }
    }
}

/// 编号或牌面记号（视为出这张牌）
fn parse_choice(input: &str, actions: &[Action]) -> Option<Action> {
    if let Ok(index) = input.parse::<usize>() {
        return actions.get(index).copied();
    }
    let tile: Tile = input.parse().ok()?;
    let discard = Action::Discard { tile };
    actions.contains(&discard).then_some(discard)
}

impl<R: BufRead, W: Write> Player for ConsolePlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        writeln!(self.output, "[{}] {} your hand: {}", view.seat, self.name, view.hand)?;
        if let Some(tile) = drawn {
            writeln!(self.output, "drew {} ({}), {} tiles left", tile, tile.name(), view.live_tiles)?;
        }
        let actions = ActionMask::turn_actions(view, drawn);
        self.choose(&actions)
    }

    fn on_other_player_make_action(
        &mut self,
        view: &PlayerView<'_>,
        actor: Wind,
        actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        let tile = reacted_tile(&self.name, action)?;
        let reactions = ActionMask::reactions(view, actor, tile);
        if reactions.len() == 1 {
            return Ok(Action::Pass);
        }
        writeln!(self.output, "{} ({}): {}", actor_name, actor, action)?;
        writeln!(self.output, "your hand: {}", view.hand)?;
        self.choose(&reactions)
    }
}
