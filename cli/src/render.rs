use std::fmt::{self, Display, Formatter};

use legalease_games_core::*;

/// Plain-text view of the session, redrawn after every command.
pub struct SessionView<'a>(pub &'a SessionSnapshot);

impl Display for SessionView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        writeln!(f, "Legal Points: {}", snapshot.points)?;
        if !snapshot.power_ups.is_empty() {
            let power_ups: Vec<&str> = snapshot.power_ups.iter().map(|p| p.id()).collect();
            writeln!(f, "Power-Ups Unlocked: {}", power_ups.join(", "))?;
        }
        writeln!(f)?;

        match &snapshot.game {
            None => {
                writeln!(f, "Select a game to start learning with fun!")?;
                for mode in Mode::ALL {
                    writeln!(f, "  play {:<15} {}", mode.name(), mode.title())?;
                }
                Ok(())
            }
            Some(GameSnapshot::Crossword(game)) => render_crossword(f, game),
            Some(GameSnapshot::Matching(game)) => render_matching(f, game),
            Some(GameSnapshot::Classification(game)) => render_classification(f, game),
            Some(GameSnapshot::Dilemma(game)) => render_dilemma(f, game),
        }
    }
}

pub fn render(snapshot: &SessionSnapshot) -> String {
    SessionView(snapshot).to_string()
}

pub fn render_json(snapshot: &SessionSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

fn render_message(f: &mut Formatter<'_>, message: Option<&Message>) -> fmt::Result {
    match message {
        Some(message) => writeln!(f, "\n{message}"),
        None => Ok(()),
    }
}

fn play_again(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "Type `reset` to play again.")
}

fn render_crossword(f: &mut Formatter<'_>, game: &CrosswordSnapshot) -> fmt::Result {
    if game.complete {
        writeln!(f, "Case Closed! You've solved the entire crossword! 🎉")?;
        return play_again(f);
    }

    let (_, cols) = game.cells.dim();
    write!(f, "   ")?;
    for col in 0..cols {
        write!(f, " {col} ")?;
    }
    writeln!(f)?;

    for (row, cells) in game.cells.outer_iter().enumerate() {
        write!(f, "{row:>2} ")?;
        for (col, cell) in cells.iter().enumerate() {
            let focused = game.focus == Some((row as Coord, col as Coord));
            match cell {
                CellView::Blocked => write!(f, "###")?,
                CellView::Open {
                    letter,
                    solved,
                    highlighted,
                    ..
                } => {
                    let letter = letter.unwrap_or('_');
                    match (focused, *highlighted, *solved) {
                        (true, _, _) => write!(f, ">{letter}<")?,
                        (false, true, _) => write!(f, "[{letter}]")?,
                        (false, false, true) => write!(f, "*{letter}*")?,
                        (false, false, false) => write!(f, " {letter} ")?,
                    }
                }
            }
        }
        writeln!(f)?;
    }

    for (title, clues) in [("Across", &game.across), ("Down", &game.down)] {
        writeln!(f, "\n{title}")?;
        for clue in clues {
            let mark = if clue.solved { " ✓" } else { "" };
            writeln!(f, "  {}. {}{mark}", clue.number, clue.prompt)?;
        }
    }
    render_message(f, game.message.as_ref())
}

fn render_matching(f: &mut Formatter<'_>, game: &MatchingSnapshot) -> fmt::Result {
    if game.complete {
        writeln!(f, "All pairs matched! Score: {}", game.score)?;
        return play_again(f);
    }

    writeln!(f, "Score: {}\n\nTerms", game.score)?;
    for term in &game.terms {
        let state = match (term.matched, game.pending == Some(term.id)) {
            (true, _) => "✓",
            (false, true) => ">",
            (false, false) => " ",
        };
        writeln!(f, " {state} {:>2}. {}", term.id, term.content)?;
    }
    writeln!(f, "\nDefinitions")?;
    for definition in &game.definitions {
        let state = if definition.matched { "✓" } else { " " };
        writeln!(f, " {state} {:>2}. {}", definition.id, definition.content)?;
    }
    render_message(f, game.message.as_ref())
}

fn render_classification(f: &mut Formatter<'_>, game: &ClassificationSnapshot) -> fmt::Result {
    if game.complete {
        writeln!(f, "Game over! Final score: {}", game.score)?;
        return play_again(f);
    }

    writeln!(f, "Score: {}\n\nPractices", game.score)?;
    for item in &game.available {
        writeln!(f, "  {}. {} {}", item.id, item.emoji, item.label)?;
    }
    for zone in Zone::ALL {
        writeln!(f, "\n{} ({})", zone.label(), zone.id())?;
        for placed in game.placed.iter().filter(|placed| placed.zone == zone) {
            writeln!(f, "  {} {}", placed.item.emoji, placed.item.label)?;
        }
    }
    render_message(f, game.message.as_ref())
}

fn render_dilemma(f: &mut Formatter<'_>, game: &DilemmaSnapshot) -> fmt::Result {
    if game.complete {
        writeln!(
            f,
            "You answered {} of {} dilemmas correctly.",
            game.score / POINTS_PER_CORRECT,
            game.step_count
        )?;
        return play_again(f);
    }

    writeln!(f, "Dilemma {} of {}  (score {})", game.step + 1, game.step_count, game.score)?;
    writeln!(f, "\n{}\n", game.situation)?;
    for (index, text) in game.options.iter().enumerate() {
        let mark = match &game.choice {
            Some(choice) if choice.correct_option == Some(index) => "✓",
            Some(choice) if choice.option == index => "✗",
            _ => " ",
        };
        writeln!(f, " {mark} {index}. {text}")?;
    }

    if let Some(choice) = &game.choice {
        writeln!(f, "\n{}", choice.consequence)?;
        let next = if game.is_last_step { "Show Final Score" } else { "Next Dilemma" };
        writeln!(f, "Type `next`: {next}")?;
    }
    Ok(())
}
