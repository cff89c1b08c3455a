//! 命令行入口：四个座位打若干局并打印统计

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use simple_mahjong::bots::{
    AlwaysDiscardFirstPlayer, AlwaysLosePlayer, ConsolePlayer, GreedyPlayer, RandomPlayer, RandomPlayerMode,
};
use simple_mahjong::{GameConfig, Player, SimpleGame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Bot {
    DiscardFirst,
    Random,
    AlwaysLose,
    Greedy,
}

#[derive(Parser, Debug)]
#[command(name = "simple_mahjong", about = "Four-player mahjong simulator")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of rounds to play
    #[arg(long)]
    rounds: Option<u32>,
    /// Shuffle seed
    #[arg(long)]
    seed: Option<u64>,
    /// Dead wall size
    #[arg(long)]
    dead_wall: Option<usize>,
    /// Seat a console player at East
    #[arg(long)]
    human: bool,
    /// Strategy for the bot seats
    #[arg(long, value_enum, default_value_t = Bot::Greedy)]
    bot: Bot,
}

fn make_bot(bot: Bot, name: &str, seed: u64) -> Box<dyn Player> {
    match bot {
        Bot::DiscardFirst => Box::new(AlwaysDiscardFirstPlayer::new(name)),
        Bot::Random => Box::new(RandomPlayer::new(name, RandomPlayerMode::Simple, seed)),
        Bot::AlwaysLose => Box::new(AlwaysLosePlayer::new(name)),
        Bot::Greedy => Box::new(GreedyPlayer::new(name)),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.round_count = rounds;
    }
    if let Some(seed) = args.seed {
        config.board.seed = Some(seed);
    }
    if let Some(dead_wall) = args.dead_wall {
        config.board.dead_wall_size = dead_wall;
    }
    if args.human {
        config.round_count = config.round_count.min(1);
    }

    let seed = config.board.seed.unwrap_or(0);
    let mut seats: [Box<dyn Player>; 4] = [
        if args.human {
            Box::new(ConsolePlayer::new("you", io::stdin().lock(), io::stdout())) as Box<dyn Player>
        } else {
            make_bot(args.bot, "east", seed)
        },
        make_bot(args.bot, "south", seed.wrapping_add(1)),
        make_bot(args.bot, "west", seed.wrapping_add(2)),
        make_bot(args.bot, "north", seed.wrapping_add(3)),
    ];
    info!("playing {} rounds with {:?} bots", config.round_count, args.bot);

    let [east, south, west, north] = &mut seats;
    let mut game = SimpleGame::new(
        [east.as_mut(), south.as_mut(), west.as_mut(), north.as_mut()],
        config,
    )?;
    let stats = game.start_game()?;
    println!("{}", stats);
    Ok(())
}
