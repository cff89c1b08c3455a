use std::collections::VecDeque;

use simple_mahjong::bots::{AlwaysDiscardFirstPlayer, AlwaysLosePlayer, GreedyPlayer, RandomPlayer, RandomPlayerMode};
use simple_mahjong::game::constants::TOTAL_TILES;
use simple_mahjong::{
    Action, Board, BoardConfig, GameError, GameStats, Hand, KongType, Meld, Player, PlayerView, StrategyError,
    Tile, TileStack, Wind,
};

/// 按脚本行动的玩家，脚本用完后打出摸到的牌、响应时过
struct ScriptedPlayer {
    name: String,
    turns: VecDeque<Action>,
    reactions: VecDeque<Action>,
    seen: Vec<(Wind, Action)>,
}

impl ScriptedPlayer {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            turns: VecDeque::new(),
            reactions: VecDeque::new(),
            seen: Vec::new(),
        }
    }

    fn on_turn_do(mut self, action: Action) -> Self {
        self.turns.push_back(action);
        self
    }

    fn react_with(mut self, action: Action) -> Self {
        self.reactions.push_back(action);
        self
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_turn(&mut self, view: &PlayerView<'_>, drawn: Option<Tile>) -> Result<Action, StrategyError> {
        Ok(self.turns.pop_front().unwrap_or_else(|| Action::Discard {
            tile: drawn.unwrap_or(view.hand.tiles()[0]),
        }))
    }

    fn on_other_player_make_action(
        &mut self,
        _view: &PlayerView<'_>,
        actor: Wind,
        _actor_name: &str,
        action: &Action,
    ) -> Result<Action, StrategyError> {
        self.seen.push((actor, *action));
        Ok(self.reactions.pop_front().unwrap_or(Action::Pass))
    }
}

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

fn tiles(s: &str) -> Vec<Tile> {
    let group: simple_mahjong::TileGroup = s.parse().unwrap();
    group.tiles().to_vec()
}

/// 14 张王牌
fn dead_wall() -> Vec<Tile> {
    tiles("S7S7S7S6S6S6S5S5S5S4S4S4B1B1")
}

#[test]
fn test_pong_beats_chi_and_claimant_skips_draw() {
    let d5 = Tile::dot(5);
    let mut east = ScriptedPlayer::new("east").on_turn_do(Action::Discard { tile: d5 });
    let mut south = ScriptedPlayer::new("south").react_with(Action::Chi {
        tile: d5,
        with: [Tile::dot(4), Tile::dot(6)],
    });
    let mut west = ScriptedPlayer::new("west").react_with(Action::Pong { tile: d5 });
    let mut north = ScriptedPlayer::new("north");

    {
        let mut board = Board::new(
            [&mut east, &mut south, &mut west, &mut north],
            BoardConfig::default(),
        )
        .unwrap();
        board
            .setup_preset(
                TileStack::from_draw_order(tiles("S3C9C8C7"), dead_wall()),
                [
                    hand("C1C2C3C4C5C6C7C8C9D5S1S2S3"),
                    hand("D4D6B1B2B3B4B5B6B7B8B9S5S6"),
                    hand("D5D5B1B2B3B4B5B6B7B8B9S5S6"),
                    hand("C1C2C3C4C5C6C7C8C9D1D2D3D3"),
                ],
            )
            .unwrap();
        let mut stats = GameStats::default();

        assert_eq!(board.proceed_to_next_player(&mut stats).unwrap(), None);
        assert_eq!(board.active_seat(), Wind::West);
        assert_eq!(board.hand(Wind::West).melds(), &[Meld::Triplet { tile: d5 }]);
        assert_eq!(board.hand(Wind::South).len(), 13);
        assert!(board.discards(Wind::East).is_empty());
        assert_eq!(board.discard_history()[0].claimed_by, Some(Wind::West));

        // 碰牌后不摸牌，直接出牌
        let before = board.stack().remaining_count();
        assert_eq!(board.proceed_to_next_player(&mut stats).unwrap(), None);
        assert_eq!(board.stack().remaining_count(), before);
        assert_eq!(board.hand(Wind::West).len(), 10);
        assert_eq!(board.hand(Wind::West).physical_count(), 13);
        assert_eq!(board.discards(Wind::West), &[Tile::bamboo(1)]);
        assert_eq!(board.active_seat(), Wind::North);
    }

    // 三家都看到了东家的出牌
    for player in [&south, &west, &north] {
        assert_eq!(player.seen[0], (Wind::East, Action::Discard { tile: d5 }));
    }
}

#[test]
fn test_multiple_ron_all_win() {
    let b7 = Tile::bamboo(7);
    let mut east = ScriptedPlayer::new("east").on_turn_do(Action::Discard { tile: b7 });
    let mut south = AlwaysDiscardFirstPlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysDiscardFirstPlayer::new("north");

    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("C8"), dead_wall()),
            [
                hand("B7S2S2S3S3S4S4S5S5S6S6S7C9"),
                hand("C1C1C1C2C2C2C3C3C3D5D5D5B7"),
                hand("C4C4C4C5C5C5C6C6C6D6D6D6B9"),
                hand("D1D2D3D4D5D6D7D8D9S1S1S1B7"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    let outcome = board.proceed_to_next_player(&mut stats).unwrap().unwrap();
    assert!(!outcome.drained);
    assert_eq!(outcome.winners.as_slice(), &[Wind::South, Wind::North]);
    assert_eq!(outcome.discarder, Some(Wind::East));
    assert_eq!(outcome.winning_tile, Some(b7));
    assert_eq!(outcome.scores.as_slice(), &[(Wind::South, 1), (Wind::North, 1)]);
    assert!(!outcome.is_tsumo());

    // 放铳的牌留在牌河，和牌者手牌不变
    assert_eq!(board.discards(Wind::East), &[b7]);
    assert_eq!(board.hand(Wind::South).len(), 13);
    assert!(!board.is_round_in_progress());
    assert_eq!(board.round(), 1);
    assert_eq!(stats.wins, [0, 1, 0, 1]);
    assert_eq!(stats.deal_ins, [1, 0, 0, 0]);
}

#[test]
fn test_turn_rotation_when_everyone_passes() {
    let mut east = AlwaysLosePlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let config = BoardConfig {
        seed: Some(2024),
        ..BoardConfig::default()
    };
    let mut board = Board::new([&mut east, &mut south, &mut west, &mut north], config).unwrap();
    board.setup().unwrap();
    let mut stats = GameStats::default();

    let mut order = Vec::new();
    for _ in 0..5 {
        order.push(board.active_seat());
        assert_eq!(board.proceed_to_next_player(&mut stats).unwrap(), None);
        assert_eq!(board.tiles_in_play(), TOTAL_TILES);
    }
    assert_eq!(
        order,
        vec![Wind::East, Wind::South, Wind::West, Wind::North, Wind::East]
    );
    assert_eq!(board.turn(), 5);
    assert_eq!(board.discard_history().len(), 5);
}

#[test]
fn test_starting_wind_is_configurable() {
    let mut east = AlwaysLosePlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let config = BoardConfig {
        seed: Some(1),
        starting_wind: Wind::West,
        ..BoardConfig::default()
    };
    let mut board = Board::new([&mut east, &mut south, &mut west, &mut north], config).unwrap();
    board.setup().unwrap();
    assert_eq!(board.active_seat(), Wind::West);
    let mut stats = GameStats::default();
    board.proceed_to_next_player(&mut stats).unwrap();
    assert_eq!(board.discard_history()[0].seat, Wind::West);
    assert_eq!(board.active_seat(), Wind::North);
}

#[test]
fn test_stack_exhaustion_drains_without_touching_dead_wall() {
    let mut east = AlwaysLosePlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("C9D9"), dead_wall()),
            [
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    let outcome = board.run_round(&mut stats).unwrap();
    assert!(outcome.drained);
    assert!(outcome.winners.is_empty());
    assert_eq!(outcome.seat_turns, [1, 1, 1, 0]);
    assert!(board.stack().is_empty());
    assert_eq!(board.stack().remaining_count(), 14);
    assert_eq!(stats.drains, 1);
}

#[test]
fn test_self_draw_win() {
    let mut east = AlwaysDiscardFirstPlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("B7"), dead_wall()),
            [
                hand("C1C1C1C2C2C2C3C3C3D5D5D5B7"),
                hand("C4C4C4C5C5C5C6C6C6D6D6D6B9"),
                hand("D1D2D3D4D5D6D7D8D9S1S1S1B8"),
                hand("B2B3B4B5B6B8B9S2S2S3S3D7D8"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    let outcome = board.run_round(&mut stats).unwrap();
    assert!(outcome.is_tsumo());
    assert_eq!(outcome.winners.as_slice(), &[Wind::East]);
    assert_eq!(outcome.scores.as_slice(), &[(Wind::East, 1)]);
    assert!(board.hand(Wind::East).is_tsumo());
    assert_eq!(stats.tsumo_wins, [1, 0, 0, 0]);
}

#[test]
fn test_concealed_kang_takes_replacement_draw() {
    let mut east = GreedyPlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("C9D9B1B2"), dead_wall()),
            [
                hand("S1S1S1S1C1C4C7D2D5D8B3B6B9"),
                hand("C2C3C5C6C8D1D3D4D6D7B4B5B7"),
                hand("C2C3C5C6C8D1D3D4D6D7B4B5B7"),
                hand("C2C3C5C6C8D1D3D4D6D7B4B5B7"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    assert_eq!(board.proceed_to_next_player(&mut stats).unwrap(), None);
    let east_hand = board.hand(Wind::East);
    assert_eq!(
        east_hand.melds(),
        &[Meld::Kong {
            tile: Tile::special(1),
            kind: KongType::Concealed
        }]
    );
    assert_eq!(east_hand.len(), 10);
    assert_eq!(east_hand.physical_count(), 14);
    assert_eq!(board.discards(Wind::East).len(), 1);
    // 摸牌一次，补牌一次
    assert_eq!(board.stack().live_count(), 2);
}

#[test]
fn test_richii_declaration() {
    let mut east = GreedyPlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("S1"), dead_wall()),
            [
                hand("C1C2C3C4C5C6B2B2B2S7S7D4D5"),
                hand("C7C8D1D2D7D8D9B4B5B6B7B8B9"),
                hand("C7C8D1D2D7D8D9B4B5B6B7B8B9"),
                hand("C7C8D1D2D7D8D9B4B5B6B7B8B9"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    board.proceed_to_next_player(&mut stats).unwrap();
    assert!(board.is_richii(Wind::East));
    assert_eq!(board.discards(Wind::East), &[Tile::special(1)]);
    assert_eq!(board.last_action(), Some((Wind::East, Action::Richii { tile: Tile::special(1) })));
}

#[test]
fn test_illegal_discard_is_attributed() {
    let mut east = ScriptedPlayer::new("cheater").on_turn_do(Action::Discard { tile: Tile::special(7) });
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("C9"), dead_wall()),
            [
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    let err = board.run_round(&mut stats).unwrap_err();
    match err {
        GameError::Strategy(StrategyError::IllegalAction { player, action, .. }) => {
            assert_eq!(player, "cheater");
            assert_eq!(action, Action::Discard { tile: Tile::special(7) });
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!board.is_round_in_progress());
}

#[test]
fn test_illegal_reaction_is_attributed() {
    let mut east = ScriptedPlayer::new("east").on_turn_do(Action::Discard { tile: Tile::character(9) });
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = ScriptedPlayer::new("liar").react_with(Action::Pong { tile: Tile::character(9) });
    let mut north = AlwaysLosePlayer::new("north");
    let mut board = Board::new(
        [&mut east, &mut south, &mut west, &mut north],
        BoardConfig::default(),
    )
    .unwrap();
    board
        .setup_preset(
            TileStack::from_draw_order(tiles("C9"), dead_wall()),
            [
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("C1C2C3C4C5C6C7C8D1D2D3D4D5"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
                hand("B2B3B4B5B6B7B8B9D6D7D8S1S2"),
            ],
        )
        .unwrap();
    let mut stats = GameStats::default();

    let err = board.run_round(&mut stats).unwrap_err();
    assert!(matches!(
        err,
        GameError::Strategy(StrategyError::IllegalAction { ref player, .. }) if player == "liar"
    ));
}

#[test]
fn test_unsupported_context_fails_loudly() {
    let mut east = AlwaysLosePlayer::new("east");
    let mut south = RandomPlayer::new("picky", RandomPlayerMode::DiscardOnly, 4);
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let config = BoardConfig {
        seed: Some(8),
        ..BoardConfig::default()
    };
    let mut board = Board::new([&mut east, &mut south, &mut west, &mut north], config).unwrap();
    let mut stats = GameStats::default();

    let err = board.play_round(&mut stats).unwrap_err();
    assert!(matches!(
        err,
        GameError::Strategy(StrategyError::UnsupportedContext { ref player, .. }) if player == "picky"
    ));
    assert_eq!(stats.rounds, 0);
}

#[test]
fn test_unsupported_tile_set_is_rejected() {
    let mut east = AlwaysLosePlayer::new("east");
    let mut south = AlwaysLosePlayer::new("south");
    let mut west = AlwaysLosePlayer::new("west");
    let mut north = AlwaysLosePlayer::new("north");
    let config = BoardConfig {
        tile_set: simple_mahjong::TileSetType::Competitive,
        ..BoardConfig::default()
    };
    let result = Board::new([&mut east, &mut south, &mut west, &mut north], config);
    assert!(matches!(
        result,
        Err(GameError::Config(simple_mahjong::ConfigError::UnsupportedTileSet(_)))
    ));
}
