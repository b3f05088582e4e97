use anyhow::{Context, Result, anyhow, bail};
use legalease_games_core::*;

/// One line typed at the prompt.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Play(Mode),
    Menu,
    Reset,
    Show,
    Help,
    Quit,
    Event(GameEvent),
}

pub const HELP: &str = "\
play <crossword|matching|classification|dilemma>   start a game
menu                                              leave the current game
reset                                             play the current game again
show                                              print the current state

crossword:       select <row> <col> | type <row> <col> [letter] | move <up|down|left|right> | confirm
matching:        term <id> | def <id>
classification:  drop <item> <safe|risky>
dilemma:         choose <option> | next

help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Show);
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb, args.as_slice()) {
            ("play" | "mode", [mode]) => Self::Play(mode.parse()?),
            ("menu", []) => Self::Menu,
            ("reset" | "again", []) => Self::Reset,
            ("show", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,

            ("select", [row, col]) => crossword(CrosswordEvent::SelectCell(coords(row, col)?)),
            ("type", [row, col]) => crossword(CrosswordEvent::InputLetter {
                coords: coords(row, col)?,
                input: String::new(),
            }),
            ("type", [row, col, letter]) => crossword(CrosswordEvent::InputLetter {
                coords: coords(row, col)?,
                input: (*letter).to_owned(),
            }),
            ("move", [step]) => crossword(CrosswordEvent::MoveFocus(parse_step(step)?)),
            ("confirm" | "enter", []) => crossword(CrosswordEvent::Confirm),

            ("term", [id]) => Self::Event(GameEvent::Matching(MatchingEvent::SelectTerm(number(id)?))),
            ("def", [id]) => {
                Self::Event(GameEvent::Matching(MatchingEvent::SelectDefinition(number(id)?)))
            }

            ("drop", [item, zone]) => Self::Event(GameEvent::Classification(
                ClassificationEvent::Drop {
                    item: number(item)?,
                    zone: zone.parse()?,
                },
            )),

            ("choose", [option]) => {
                Self::Event(GameEvent::Dilemma(DilemmaEvent::Choose(number(option)?)))
            }
            ("next", []) => Self::Event(GameEvent::Dilemma(DilemmaEvent::Advance)),

            (verb, _) => bail!("unrecognized command {verb:?}, try `help`"),
        };
        Ok(command)
    }
}

fn crossword(event: CrosswordEvent) -> Command {
    Command::Event(GameEvent::Crossword(event))
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T> {
    word.parse().map_err(|_| anyhow!("expected a number, got {word:?}"))
}

fn coords(row: &str, col: &str) -> Result<Coord2> {
    let row = number(row).context("row")?;
    let col = number(col).context("column")?;
    Ok((row, col))
}

fn parse_step(word: &str) -> Result<Step> {
    Ok(match word {
        "up" => Step::Up,
        "down" => Step::Down,
        "left" => Step::Left,
        "right" => Step::Right,
        _ => bail!("expected up, down, left or right, got {word:?}"),
    })
}
