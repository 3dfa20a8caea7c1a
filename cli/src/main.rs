use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use minewalk_core as game;
use game::{BoardGenerator, GameState, MoveOutcome};
use serde::Serialize;

mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    board: BoardArgs,

    /// Print JSON instead of a text grid
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// Number of columns
    #[arg(short, long, global = true, default_value_t = game::DEFAULT_COLUMNS)]
    columns: game::Coord,

    /// Number of rows
    #[arg(short, long, global = true, default_value_t = game::DEFAULT_ROWS)]
    rows: game::Coord,

    /// Requested number of mines
    #[arg(short, long, global = true, default_value_t = game::DEFAULT_MINE_COUNT)]
    mines: game::CellCount,

    /// Force a seed instead of the clock; numbers and text are both accepted
    #[arg(short, long, global = true)]
    seed: Option<String>,
}

impl BoardArgs {
    fn config(&self) -> game::GameConfig {
        let config = game::GameConfig::new(self.columns, self.rows, self.mines);
        match &self.seed {
            Some(seed) => config.with_seed(parse_seed(seed)),
            None => config,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a board and print it
    Generate,
    /// Generate a board and print its escape route
    Route,
    /// Generate a board and replay a list of direction keys on it
    Play {
        /// Direction keys, e.g. `d s c` or `arrowright pagedown`
        keys: Vec<String>,
    },
}

#[derive(Serialize)]
struct RouteReport<'a> {
    board: &'a game::Board,
    route: Option<game::Path>,
}

#[derive(Serialize)]
struct PlayReport<'a> {
    board: &'a game::Board,
    state: &'a GameState,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let config = cli.board.config();
    log::debug!("config: {config:?}");
    let board = game::SolvableBoardGenerator::default()
        .generate(&config)
        .context("Could not generate a board, try fewer mines")?;
    log::info!("Generated board with seed {}", board.seed());

    match cli.command {
        Command::Generate => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                print!("{}", render::board(&board, None, &[]));
            }
        }
        Command::Route => {
            let route = board.escape_route();
            if cli.json {
                let report = RouteReport {
                    board: &board,
                    route,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let cells = route.as_deref().unwrap_or_default();
                print!("{}", render::board(&board, None, cells));
                match &route {
                    Some(route) => println!("route ({} steps): {:?}", route.len() - 1, route),
                    None => println!("no route"),
                }
            }
        }
        Command::Play { keys } => {
            let state = play(&board, &keys);
            if cli.json {
                let report = PlayReport {
                    board: &board,
                    state: &state,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::board(&board, Some(&state), &[]));
                println!("{:?} after {} steps", state.phase(), state.steps());
            }
        }
    }

    Ok(())
}

/// Numbers stay numeric only when they print back unchanged, so `0099` keeps
/// its leading zeros.
fn parse_seed(seed: &str) -> game::Seed {
    match seed.parse::<u64>() {
        Ok(number) if number.to_string() == seed => game::Seed::Number(number),
        _ => game::Seed::from(seed),
    }
}

fn play(board: &game::Board, keys: &[String]) -> GameState {
    let mut state = GameState::for_board(board);
    state.start();

    for key in keys {
        let direction: game::Direction = match key.parse() {
            Ok(direction) => direction,
            Err(error) => {
                log::warn!("{error}, skipped");
                continue;
            }
        };
        let Some(target) =
            game::directional_target(state.current_index(), direction, board.cols(), board.rows())
        else {
            log::warn!("{key}: move would leave the board");
            continue;
        };

        match state.apply_move(board, target) {
            MoveOutcome::Rejected if state.is_finished() => {
                log::warn!("{key}: game already ended ({:?})", state.phase())
            }
            MoveOutcome::Rejected => log::warn!("{key}: move to {target} rejected"),
            MoveOutcome::Landed(landing) => log::info!("{key}: landed on {target}, {landing:?}"),
        }
    }

    state
}
