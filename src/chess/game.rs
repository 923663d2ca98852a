//! State of a single game and the only way to mutate it: [`Game::make_move`].
//!
//! The game does not alternate turns by itself. The caller advances the turn
//! through [`Game::end_turn`] after a successful move, which is also where the
//! loss of a royal piece is detected.

use crate::chess::board::Board;
use crate::chess::core::{Captures, MoveOutcome, PieceKind, Player, Square};
use crate::chess::movegen::{self, Destinations};

/// Reasons for rejecting a move. None of them modify the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Origin or destination is not on the board.
    #[error("square {0} is outside of the board")]
    OutOfBounds(Square),
    /// Origin and destination coincide.
    #[error("piece has to move to a different square")]
    SameSquare,
    /// There is nothing to move.
    #[error("no piece at {0}")]
    EmptyOrigin(Square),
    /// The piece belongs to the player who is not on turn.
    #[error("not your turn: {side_to_move} to move")]
    WrongTurn {
        #[allow(missing_docs)]
        side_to_move: Player,
    },
    /// The piece can not reach the destination.
    #[error("illegal move from {from} to {to}")]
    IllegalDestination {
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
}

/// Board, side to move and the front end's selection.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    selected: Option<Square>,
    finished: bool,
}

impl Game {
    /// Starts a game on a `width`×`height` board with the standard layout.
    /// White moves first.
    ///
    /// The front end only offers 6 to 12 squares per side; other sizes are
    /// not rejected, see [`Board::starting`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_board(Board::starting(width, height), Player::White)
    }

    /// Resumes a game from an arbitrary board.
    #[must_use]
    pub const fn from_board(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
            selected: None,
            finished: false,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Square picked by the player through the front end, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Returns true once a player has lost their royal piece.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// The player who captured the opponent's royal piece.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.finished.then_some(!self.side_to_move)
    }

    /// Returns destinations of the piece on the square. Empty and off-board
    /// squares have no destinations.
    #[must_use]
    pub fn legal_destinations(&self, square: Square) -> Destinations {
        self.board.at(square).map_or_else(Destinations::new, |piece| {
            movegen::legal_destinations(piece.kind, piece.owner, square, &self.board)
        })
    }

    /// Selects a piece of the side to move and returns its destinations. If
    /// there is no such piece on the square, the previous selection is kept
    /// and `None` is returned.
    pub fn select(&mut self, square: Square) -> Option<Destinations> {
        let piece = self.board.at(square)?;
        if piece.owner != self.side_to_move {
            return None;
        }
        self.selected = Some(square);
        Some(self.legal_destinations(square))
    }

    /// Validates and executes a move of the side to move.
    ///
    /// A slider removes every enemy piece it passes over; any piece standing
    /// on the destination is captured as well.
    ///
    /// # Errors
    ///
    /// The checks are done in order and the first failure is returned:
    /// [`MoveError::OutOfBounds`] and [`MoveError::SameSquare`],
    /// [`MoveError::EmptyOrigin`], [`MoveError::WrongTurn`] and finally
    /// [`MoveError::IllegalDestination`]. The game is left untouched.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        for square in [from, to] {
            if !self.board.in_bounds(square) {
                return Err(MoveError::OutOfBounds(square));
            }
        }
        if from == to {
            return Err(MoveError::SameSquare);
        }
        let piece = self.board.at(from).ok_or(MoveError::EmptyOrigin(from))?;
        if piece.owner != self.side_to_move {
            return Err(MoveError::WrongTurn {
                side_to_move: self.side_to_move,
            });
        }
        if !movegen::is_legal(piece.kind, piece.owner, from, to, &self.board) {
            return Err(MoveError::IllegalDestination { from, to });
        }

        let mut captured = Captures::new();
        if piece.kind == PieceKind::Slider {
            for square in movegen::slider_path(from, to) {
                // Friendly pieces would have blocked the line.
                if self.board.at(square).is_some_and(|p| p.owner != piece.owner) {
                    captured.extend(self.board.remove(square));
                }
            }
        }
        captured.extend(self.board.remove(to));
        let _ = self.board.remove(from);
        self.board.place(to, piece);
        self.selected = None;

        let outcome = MoveOutcome {
            piece,
            from,
            to,
            captured,
        };
        tracing::debug!(%outcome, "move executed");
        Ok(outcome)
    }

    /// Passes the turn to the opponent. Returns the winner if the opponent
    /// has no royal piece left, which finishes the game.
    pub fn end_turn(&mut self) -> Option<Player> {
        self.side_to_move = !self.side_to_move;
        self.selected = None;
        if self.board.has_royal(self.side_to_move) {
            return None;
        }
        self.finished = true;
        let winner = !self.side_to_move;
        tracing::info!(%winner, "royal captured, game over");
        Some(winner)
    }
}
