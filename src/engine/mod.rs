//! The engine puts all pieces together: it reads commands from the input
//! stream, applies them to the [`Game`] and writes the board and messages to
//! the output stream.
//!
//! [`Engine::run`] is the "main loop" of the front end. It only deals with
//! presentation and turn order; all rules live in [`crate::chess`].

use std::io::{BufRead, Write};

use anyhow::Context;
use itertools::Itertools;

use crate::chess::core::{Square, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::chess::game::Game;
use crate::engine::command::{Command, HELP};

mod command;

/// Interactive front end reading commands from `input` and writing responses
/// to `output`.
pub struct Engine<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Creates a new instance of the engine with provided I/O.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Starts a game and continuously executes commands from the input stream
    /// until `exit` is sent or the input is exhausted.
    ///
    /// Board dimensions that are not given are asked for interactively.
    ///
    /// Invalid commands, square names and moves are reported to the output
    /// and never stop the loop.
    ///
    /// # Errors
    ///
    /// Fails only when reading the input or writing the output fails.
    pub fn run(&mut self, width: Option<usize>, height: Option<usize>) -> anyhow::Result<()> {
        writeln!(self.output, "------------------------")?;
        writeln!(self.output, "Welcome to Unvoid Chess")?;
        writeln!(self.output, "------------------------")?;
        writeln!(self.output, "{}", crate::engine_version())?;

        let Some(mut game) = self.start_game(width, height)? else {
            return Ok(());
        };
        writeln!(self.output, "\nType `help` for commands.")?;

        loop {
            writeln!(self.output, "\nTurn: {}", game.side_to_move())?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            let command = Command::parse(&line);
            tracing::debug!(?command, "received command");
            match command {
                Command::Empty => {},
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                },
                Command::Restart { size } => {
                    let (width, height) = match size {
                        Some((width, height)) if !is_valid_size(width) || !is_valid_size(height) => {
                            writeln!(
                                self.output,
                                "Board dimensions should be between {MIN_BOARD_SIZE} and \
                                 {MAX_BOARD_SIZE}, got {width}x{height}."
                            )?;
                            continue;
                        },
                        Some((width, height)) => (Some(width), Some(height)),
                        None => (None, None),
                    };
                    match self.start_game(width, height)? {
                        Some(restarted) => game = restarted,
                        None => break,
                    }
                },
                Command::Board => self.handle_board(&game)?,
                Command::Select { square } => self.handle_select(&mut game, &square)?,
                Command::Move { from, to } => self.handle_move(&mut game, &from, &to)?,
                Command::Usage(usage) => writeln!(self.output, "{usage}")?,
                Command::Unknown(keyword) => writeln!(self.output, "Unknown command: {keyword}")?,
            }
        }
        Ok(())
    }

    /// Reads one line, returns `None` on EOF.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("reading from input")?;
        Ok((read != 0).then_some(line))
    }

    /// Asks for a board dimension until a valid one is entered. Returns `None`
    /// on EOF.
    fn read_dimension(&mut self, name: &str) -> anyhow::Result<Option<usize>> {
        loop {
            write!(
                self.output,
                "Enter {name} ({MIN_BOARD_SIZE}–{MAX_BOARD_SIZE}): "
            )?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) if is_valid_size(value) => return Ok(Some(value)),
                _ => writeln!(
                    self.output,
                    "Invalid. Please enter an integer between {MIN_BOARD_SIZE} and \
                     {MAX_BOARD_SIZE}."
                )?,
            }
        }
    }

    /// Creates a fresh game, asking for missing dimensions. Returns `None` if
    /// the input ends before the dimensions are known.
    fn start_game(
        &mut self,
        width: Option<usize>,
        height: Option<usize>,
    ) -> anyhow::Result<Option<Game>> {
        let width = match width {
            Some(width) => width,
            None => match self.read_dimension("width")? {
                Some(width) => width,
                None => return Ok(None),
            },
        };
        let height = match height {
            Some(height) => height,
            None => match self.read_dimension("height")? {
                Some(height) => height,
                None => return Ok(None),
            },
        };
        tracing::info!(width, height, "starting new game");
        writeln!(self.output, "Starting a {width}x{height} board...\n")?;
        let game = Game::new(width, height);
        write!(self.output, "{}", game.board())?;
        Ok(Some(game))
    }

    fn handle_board(&mut self, game: &Game) -> anyhow::Result<()> {
        let destinations = game
            .selected()
            .map(|square| game.legal_destinations(square))
            .unwrap_or_default();
        write!(self.output, "{}", game.board().highlight(&destinations))?;
        Ok(())
    }

    fn handle_select(&mut self, game: &mut Game, name: &str) -> anyhow::Result<()> {
        if game.is_finished() {
            return self.report_finished();
        }
        let Some(square) = parse_square(game, name) else {
            writeln!(self.output, "Invalid square: {name}")?;
            return Ok(());
        };
        let Some(destinations) = game.select(square) else {
            writeln!(self.output, "No {} piece at {name}", game.side_to_move())?;
            return Ok(());
        };
        write!(self.output, "{}", game.board().highlight(&destinations))?;
        // Selection implies there is a piece.
        let symbol = game.board().at(square).map_or('?', |piece| piece.symbol());
        writeln!(
            self.output,
            "Valid moves for {symbol} at {square}: [{}]",
            destinations.iter().sorted().join(", ")
        )?;
        Ok(())
    }

    fn handle_move(&mut self, game: &mut Game, from: &str, to: &str) -> anyhow::Result<()> {
        if game.is_finished() {
            return self.report_finished();
        }
        let (Some(origin), Some(destination)) = (parse_square(game, from), parse_square(game, to))
        else {
            writeln!(self.output, "Invalid squares: {from} {to}")?;
            return Ok(());
        };
        let outcome = match game.make_move(origin, destination) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(self.output, "Move error: {e}")?;
                return Ok(());
            },
        };
        if !outcome.captured.is_empty() {
            writeln!(
                self.output,
                "{} captured: {}",
                outcome.piece.owner,
                outcome
                    .captured
                    .iter()
                    .map(|piece| format!("{piece} ({} {})", piece.owner, piece.kind))
                    .join(", ")
            )?;
        }
        let winner = game.end_turn();
        write!(self.output, "{}", game.board())?;
        match winner {
            Some(winner) => {
                writeln!(self.output, "{winner} wins!")?;
                self.report_finished()?;
            },
            None => writeln!(self.output, "{} to move.", game.side_to_move())?,
        }
        Ok(())
    }

    fn report_finished(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "The game is over. Type `restart` to play again or `exit` to quit."
        )?;
        Ok(())
    }
}

const fn is_valid_size(size: usize) -> bool {
    MIN_BOARD_SIZE <= size && size <= MAX_BOARD_SIZE
}

/// Parses a square name and checks that it is on the board of the game.
fn parse_square(game: &Game, name: &str) -> Option<Square> {
    Square::try_from(name)
        .ok()
        .filter(|square| game.board().in_bounds(*square))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn transcript(width: Option<usize>, height: Option<usize>, input: &str) -> String {
        let mut output = Vec::new();
        Engine::new(input.as_bytes(), &mut output)
            .run(width, height)
            .expect("in-memory I/O does not fail");
        String::from_utf8(output).expect("output is UTF-8")
    }

    #[test]
    fn prompts_for_dimensions() {
        let output = transcript(None, None, "5\nseven\n6\n13\n8\nexit\n");
        assert_eq!(
            output
                .matches("Invalid. Please enter an integer between 6 and 12.")
                .count(),
            3
        );
        assert!(output.contains("Starting a 6x8 board..."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn eof_while_prompting() {
        let output = transcript(None, None, "8\n");
        assert!(!output.contains("Starting"));
    }

    #[test]
    fn select_and_move() {
        let output = transcript(
            Some(8),
            Some(8),
            "select a1\nselect h8\nselect Z1\nmove B1 B4\n",
        );
        assert!(output.contains("Valid moves for ♔ at A1: [A2, B2]"));
        assert!(output.contains("No White piece at h8"));
        assert!(output.contains("Invalid square: Z1"));
        assert!(output.contains("Black to move."));
        assert!(output.ends_with("Turn: Black\n> "));
    }

    #[test]
    fn rejected_moves() {
        let output = transcript(
            Some(6),
            Some(6),
            "move A1 A1\nmove F6 F5\nmove A1 G1\nmove B1 B5\nmove\n",
        );
        assert!(output.contains("Move error: piece has to move to a different square"));
        assert!(output.contains("Move error: not your turn: White to move"));
        assert!(output.contains("Invalid squares: A1 G1"));
        assert!(output.contains("Move error: illegal move from B1 to B5"));
        assert!(output.contains(command::MOVE_USAGE));
        assert!(!output.contains("Black to move."));
    }

    #[test]
    fn restart_with_inline_size() {
        let output = transcript(Some(6), Some(6), "restart 20 8\nrestart 12 7\nboard\n");
        assert!(output.contains("Board dimensions should be between 6 and 12, got 20x8."));
        assert!(output.contains("Starting a 12x7 board..."));
    }

    #[test]
    fn royal_capture_finishes_the_game() {
        // White's leaper walks C1-B3-C5-E4 and takes the royal on F6 while
        // Black shuffles its slider.
        let output = transcript(
            Some(6),
            Some(6),
            "move C1 B3\nmove E6 E5\nmove B3 C5\nmove E5 E6\nmove C5 E4\nmove E6 E5\n\
             move E4 F6\nmove A1 A2\nselect A1\n",
        );
        assert!(output.contains("White captured: ♚ (Black royal)"));
        assert!(output.contains("White wins!"));
        assert_eq!(output.matches("The game is over.").count(), 3);
    }

    #[test]
    fn unknown_and_help() {
        let output = transcript(Some(6), Some(6), "dance\nhelp\n\n");
        assert!(output.contains("Unknown command: dance"));
        assert!(output.contains("move <from> <to>"));
    }
}
