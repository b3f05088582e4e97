use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use legalease_games_core::*;

use crate::command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Legal-literacy mini-games in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start straight into a game
    #[arg(short, long)]
    mode: Option<Mode>,

    /// JSON file replacing the built-in puzzles
    #[arg(short, long)]
    puzzles: Option<PathBuf>,

    /// Print state as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let puzzles = match &args.puzzles {
        Some(path) => load_puzzles(path)?,
        None => PuzzleSet::default(),
    };
    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {seed}");

    let mut session = GameSession::new(puzzles, SessionConfig { seed });
    if let Some(mode) = args.mode {
        session.select_mode(mode)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_state(&mut out, &session, args.json)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match apply(&mut session, command) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Help) => writeln!(out, "{HELP}")?,
            Ok(Reply::Redraw(points)) => {
                if points > 0 {
                    writeln!(out, "+{points} points")?;
                }
                print_state(&mut out, &session, args.json)?;
            }
            Err(err) => {
                log::warn!("{err}");
                writeln!(out, "{err}")?;
            }
        }
    }

    log::info!("session ended with {} points", session.ledger().total());
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Reply {
    Redraw(Points),
    Help,
    Quit,
}

fn apply(session: &mut GameSession, command: Command) -> std::result::Result<Reply, GameError> {
    match command {
        Command::Play(mode) => session.select_mode(mode)?,
        Command::Menu => session.clear_mode(),
        Command::Reset => session.reset_game()?,
        Command::Show => {}
        Command::Help => return Ok(Reply::Help),
        Command::Quit => return Ok(Reply::Quit),
        Command::Event(event) => {
            let update = session.dispatch(event)?;
            return Ok(Reply::Redraw(update.points));
        }
    }
    Ok(Reply::Redraw(0))
}

fn print_state(out: &mut impl Write, session: &GameSession, json: bool) -> Result<()> {
    let snapshot = session.snapshot();
    if json {
        writeln!(out, "{}", render::render_json(&snapshot)?)?;
    } else {
        writeln!(out, "{}", render::render(&snapshot))?;
    }
    out.flush()?;
    Ok(())
}

fn load_puzzles(path: &Path) -> Result<PuzzleSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read puzzles from {}", path.display()))?;
    let puzzles = serde_json::from_str(&text)
        .with_context(|| format!("Could not parse puzzles in {}", path.display()))?;
    log::info!("loaded puzzles from {}", path.display());
    Ok(puzzles)
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(PuzzleSet::default(), SessionConfig { seed: 3 })
    }

    fn drop_item(item: ItemId, zone: Zone) -> Command {
        Command::Event(GameEvent::Classification(ClassificationEvent::Drop { item, zone }))
    }

    #[test]
    fn redraw_carries_points_gained() {
        let mut session = session();

        assert_eq!(apply(&mut session, Command::Play(Mode::Classification)), Ok(Reply::Redraw(0)));
        assert_eq!(apply(&mut session, drop_item(1, Zone::Safe)), Ok(Reply::Redraw(10)));
        assert_eq!(apply(&mut session, drop_item(2, Zone::Safe)), Ok(Reply::Redraw(0)));
        assert_eq!(session.ledger().total(), 10);
    }

    #[test]
    fn rejected_commands_do_not_redraw() {
        let mut session = session();

        assert_eq!(apply(&mut session, Command::Reset), Err(GameError::NoActiveMode));
        apply(&mut session, Command::Play(Mode::Matching)).unwrap();
        let before = session.snapshot();

        let advance = Command::Event(GameEvent::Dilemma(DilemmaEvent::Advance));
        assert_eq!(
            apply(&mut session, advance),
            Err(GameError::ModeMismatch {
                event: Mode::Dilemma,
                active: Mode::Matching,
            })
        );
        assert!(apply(&mut session, drop_item(1, Zone::Safe)).is_err());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn session_commands_map_to_replies() {
        let mut session = session();
        apply(&mut session, Command::Play(Mode::Dilemma)).unwrap();

        assert_eq!(apply(&mut session, Command::Help), Ok(Reply::Help));
        assert_eq!(apply(&mut session, Command::Show), Ok(Reply::Redraw(0)));
        assert_eq!(apply(&mut session, Command::Menu), Ok(Reply::Redraw(0)));
        assert_eq!(session.mode(), None);
        assert_eq!(apply(&mut session, Command::Quit), Ok(Reply::Quit));
    }
}
