//! Game primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;
use std::str::FromStr;

use arrayvec::ArrayVec;

/// Smallest board side the front end accepts.
pub const MIN_BOARD_SIZE: usize = 6;
/// Largest board side the front end accepts.
pub const MAX_BOARD_SIZE: usize = 12;

/// Upper bound on the number of pieces a single move can capture: a slider
/// travels at most 3 squares, sweeping 2 intermediate squares and landing on
/// the third.
pub const MAX_CAPTURES: usize = 3;

/// Pieces captured by a single move, path captures first.
pub type Captures = ArrayVec<Piece, MAX_CAPTURES>;

/// A square of the board: `x` is the file (column), `y` is the rank (row),
/// both zero-based and counted from the bottom-left corner of White.
///
/// Squares are plain coordinates and are not tied to a specific board size:
/// shifting a square off the edge produces a perfectly valid value that
/// [`crate::chess::board::Board::in_bounds`] rejects.
///
/// ```
/// use unvoid::chess::core::Square;
///
/// assert_eq!(Square::try_from("A1").unwrap(), Square::new(0, 0));
/// assert_eq!(Square::try_from("c5").unwrap(), Square::new(2, 4));
/// assert_eq!(Square::new(11, 11).to_string(), "L12");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Square {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the square displaced by `(dx, dy)`. Coordinates saturate at
    /// the `i32` limits, which are far off any board.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns the square `steps` squares away in the given direction.
    #[must_use]
    pub const fn shift(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx.saturating_mul(steps), dy.saturating_mul(steps))
    }
}

/// Failure to read a square name such as `"B4"`.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("square name should be a letter followed by a rank, got '{0}'")]
    Malformed(String),
    #[error("file should be a letter, got '{0}'")]
    File(char),
    #[error("rank should be a positive integer, got '{0}'")]
    Rank(String),
}

impl TryFrom<&str> for Square {
    type Error = ParseError;

    /// Parses a square name: file letter (case-insensitive) followed by the
    /// 1-based rank. The result is not checked against any board size.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the name is empty, the file is not an ASCII
    /// letter or the rank is not a positive integer.
    fn try_from(name: &str) -> Result<Self, ParseError> {
        let name = name.trim();
        let mut chars = name.chars();
        let (file, rank) = match (chars.next(), chars.as_str()) {
            (Some(file), rank) if !rank.is_empty() => (file, rank),
            _ => return Err(ParseError::Malformed(name.to_string())),
        };
        if !file.is_ascii_alphabetic() {
            return Err(ParseError::File(file));
        }
        let rank: i32 = match rank.parse() {
            Ok(rank) if rank >= 1 => rank,
            _ => return Err(ParseError::Rank(rank.to_string())),
        };
        let file = u8::try_from(file.to_ascii_uppercase()).map_err(|_| ParseError::File(file))?;
        Ok(Self::new(i32::from(file - b'A'), rank - 1))
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::try_from(name)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Off-board files have no letter.
        let file = u8::try_from(self.x)
            .ok()
            .filter(|x| *x < 26)
            .map_or('?', |x| char::from(b'A' + x));
        write!(f, "{file}{}", i64::from(self.y) + 1)
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// All 8 directions: 4 orthogonal and 4 diagonal.
    pub const ALL: [Self; 8] = [
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];

    /// Unit vector `(dx, dy)` of the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::UpLeft => (-1, 1),
            Self::Up => (0, 1),
            Self::UpRight => (1, 1),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::DownLeft => (-1, -1),
            Self::Down => (0, -1),
            Self::DownRight => (1, -1),
        }
    }
}

/// The game is played between two players: White (having the advantage of the
/// first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// The three kinds of pieces each side starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Steps one square in any direction. Losing it loses the game.
    Royal,
    /// Travels up to 3 squares along a line and sweeps enemies off its path.
    Slider,
    /// Jumps like a knight.
    Leaper,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Royal => "royal",
            Self::Slider => "slider",
            Self::Leaper => "leaper",
        })
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Figurine symbol of the piece.
    #[must_use]
    pub const fn symbol(self) -> char {
        match (self.owner, self.kind) {
            (Player::White, PieceKind::Royal) => '♔',
            (Player::White, PieceKind::Slider) => '♖',
            (Player::White, PieceKind::Leaper) => '♘',
            (Player::Black, PieceKind::Royal) => '♚',
            (Player::Black, PieceKind::Slider) => '♜',
            (Player::Black, PieceKind::Leaper) => '♞',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// Result of a successfully executed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The piece that moved.
    pub piece: Piece,
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// Captured pieces: the ones swept off the path first, then the one
    /// standing on the destination.
    pub captured: Captures,
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.piece, self.from, self.to)?;
        for (index, piece) in self.captured.iter().enumerate() {
            f.write_str(if index == 0 { " x" } else { "," })?;
            write!(f, "{piece}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_square() {
        assert_eq!(Square::try_from("A1"), Ok(Square::new(0, 0)));
        assert_eq!(Square::try_from("C5"), Ok(Square::new(2, 4)));
        assert_eq!(Square::try_from("c5"), Ok(Square::new(2, 4)));
        assert_eq!(Square::try_from(" l12\n"), Ok(Square::new(11, 11)));
        // Bounds are the board's business.
        assert_eq!(Square::try_from("Z99"), Ok(Square::new(25, 98)));
        assert_eq!("b4".parse::<Square>(), Ok(Square::new(1, 3)));
    }

    #[test]
    fn parse_malformed_square() {
        assert_eq!(
            Square::try_from(""),
            Err(ParseError::Malformed(String::new()))
        );
        assert_eq!(
            Square::try_from("A"),
            Err(ParseError::Malformed("A".to_string()))
        );
        assert_eq!(Square::try_from("11"), Err(ParseError::File('1')));
        assert_eq!(Square::try_from("A0"), Err(ParseError::Rank("0".to_string())));
        assert_eq!(
            Square::try_from("A-3"),
            Err(ParseError::Rank("-3".to_string()))
        );
        assert_eq!(
            Square::try_from("Bx"),
            Err(ParseError::Rank("x".to_string()))
        );
        assert_eq!(
            Square::try_from("A99999999999"),
            Err(ParseError::Rank("99999999999".to_string()))
        );
    }

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            Square::try_from("C0").unwrap_err().to_string(),
            "rank should be a positive integer, got '0'"
        );
        assert_eq!(
            Square::try_from("?4").unwrap_err().to_string(),
            "file should be a letter, got '?'"
        );
    }

    #[test]
    fn format_square() {
        assert_eq!(Square::new(0, 0).to_string(), "A1");
        assert_eq!(Square::new(2, 4).to_string(), "C5");
        assert_eq!(Square::new(7, 7).to_string(), "H8");
        assert_eq!(Square::new(-1, 0).to_string(), "?1");
        for x in 0..12 {
            for y in 0..12 {
                let square = Square::new(x, y);
                assert_eq!(Square::try_from(square.to_string().as_str()), Ok(square));
            }
        }
    }

    #[test]
    fn shift() {
        let square = Square::new(4, 4);
        assert_eq!(square.shift(Direction::Up, 1), Square::new(4, 5));
        assert_eq!(square.shift(Direction::UpLeft, 2), Square::new(2, 6));
        assert_eq!(square.shift(Direction::DownRight, 3), Square::new(7, 1));
        assert_eq!(square.shift(Direction::Left, 5), Square::new(-1, 4));
        for direction in Direction::ALL {
            assert_eq!(square.shift(direction, 0), square);
        }
    }

    #[test]
    fn shift_saturates_at_the_limits() {
        let edge = Square::new(i32::MAX, i32::MIN);
        assert_eq!(edge.shift(Direction::UpRight, 3), Square::new(i32::MAX, i32::MIN + 3));
        assert_eq!(edge.shift(Direction::DownLeft, 1), Square::new(i32::MAX - 1, i32::MIN));
        assert_eq!(edge.offset(2, -1), edge);
        assert_eq!(Square::new(0, 0).shift(Direction::Up, i32::MAX), Square::new(0, i32::MAX));
    }

    #[test]
    fn directions_are_distinct_units() {
        let deltas: Vec<_> = Direction::ALL.iter().map(|d| d.delta()).collect();
        for (index, (dx, dy)) in deltas.iter().enumerate() {
            assert!(dx.abs() <= 1 && dy.abs() <= 1 && (*dx, *dy) != (0, 0));
            assert!(!deltas[index + 1..].contains(&(*dx, *dy)));
        }
    }

    #[test]
    fn player() {
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.to_string(), "White");
    }

    #[test]
    fn outcome_display() {
        let mut captured = Captures::new();
        captured.push(Piece::new(Player::Black, PieceKind::Leaper));
        captured.push(Piece::new(Player::Black, PieceKind::Royal));
        let outcome = MoveOutcome {
            piece: Piece::new(Player::White, PieceKind::Slider),
            from: Square::new(1, 0),
            to: Square::new(1, 3),
            captured,
        };
        assert_eq!(outcome.to_string(), "♖ B1-B4 x♞,♚");
    }
}
