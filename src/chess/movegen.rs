//! Move generation: legal destination squares for each [`PieceKind`].
//!
//! Generation is a pure function of the board snapshot. Nothing is cached and
//! nothing is mutated, so querying the same piece repeatedly always yields the
//! same destinations in the same order.
//!
//! The three kinds have different blocking semantics:
//!
//! - [`PieceKind::Royal`] steps to any of the 8 adjacent squares.
//! - [`PieceKind::Leaper`] jumps by a knight offset, ignoring everything in
//!   between.
//! - [`PieceKind::Slider`] walks up to [`SLIDER_RANGE`] squares along each of
//!   the 8 lines. Friendly pieces block the line. Enemy pieces do not: the
//!   slider passes over them (their squares are not destinations) and the
//!   executor sweeps them off the board once the move is made.
//!
//! No piece can ever land on a square occupied by its own side.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Direction, PieceKind, Player, Square};

/// How far a slider travels along a line.
pub const SLIDER_RANGE: i32 = 3;

/// The most destinations any piece can have: a slider on an open board reaches
/// [`SLIDER_RANGE`] squares in each of 8 directions.
pub const MAX_DESTINATIONS: usize = 8 * SLIDER_RANGE as usize;

/// Legal destinations of a single piece. Contains no duplicates.
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

/// Knight-style jumps of the leaper.
const LEAPER_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Calculates all squares a piece of given kind and owner standing on `from`
/// can move to.
///
/// ```
/// use unvoid::chess::board::Board;
/// use unvoid::chess::core::{PieceKind, Player, Square};
/// use unvoid::chess::movegen::legal_destinations;
///
/// let board = Board::empty(8, 8);
/// let destinations = legal_destinations(PieceKind::Leaper, Player::White, Square::new(0, 0), &board);
/// assert_eq!(destinations.as_slice(), &[Square::new(1, 2), Square::new(2, 1)]);
/// ```
#[must_use]
pub fn legal_destinations(
    kind: PieceKind,
    owner: Player,
    from: Square,
    board: &Board,
) -> Destinations {
    let mut destinations = Destinations::new();
    match kind {
        PieceKind::Royal => {
            for direction in Direction::ALL {
                let target = from.shift(direction, 1);
                if is_available(board, owner, target) {
                    destinations.push(target);
                }
            }
        },
        PieceKind::Leaper => {
            for (dx, dy) in LEAPER_OFFSETS {
                let target = from.offset(dx, dy);
                if is_available(board, owner, target) {
                    destinations.push(target);
                }
            }
        },
        PieceKind::Slider => {
            for direction in Direction::ALL {
                for steps in 1..=SLIDER_RANGE {
                    let target = from.shift(direction, steps);
                    if !board.in_bounds(target) {
                        break;
                    }
                    match board.at(target) {
                        None => destinations.push(target),
                        Some(piece) if piece.owner == owner => break,
                        // Passed over, captured on execution.
                        Some(_) => {},
                    }
                }
            }
        },
    }
    destinations
}

/// Checks whether `to` is among the legal destinations of the piece.
#[must_use]
pub fn is_legal(kind: PieceKind, owner: Player, from: Square, to: Square, board: &Board) -> bool {
    legal_destinations(kind, owner, from, board).contains(&to)
}

/// Squares strictly between `from` and `to`, walking from `from`.
///
/// The squares are expected to share a rank, a file or a diagonal. For any
/// other pair the walk follows the sign of each coordinate delta and stops
/// after the longer delta, which is meaningless but harmless.
pub fn slider_path(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let (dx, dy) = (to.x.saturating_sub(from.x), to.y.saturating_sub(from.y));
    let distance = dx.saturating_abs().max(dy.saturating_abs());
    (1..distance).map(move |steps| from.offset(dx.signum() * steps, dy.signum() * steps))
}

/// A square a non-sliding piece can land on: on the board and not occupied by
/// its own side.
fn is_available(board: &Board, owner: Player, square: Square) -> bool {
    board.in_bounds(square) && board.at(square).map_or(true, |piece| piece.owner != owner)
}
